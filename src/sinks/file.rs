//! File sink factory

use super::{DailyFileSink, RotatingFileSink};
use crate::core::{File, Result, SinkRef};
use std::sync::Arc;

/// Build the sink described by `config`
///
/// Returns `None` for [`File::None`] and when the sink cannot be constructed;
/// in the latter case a diagnostic is written to stderr so a broken path
/// never takes the other sinks down with it.
pub fn create_file_sink(config: &File) -> Option<SinkRef> {
    match try_create_file_sink(config) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("[LOGGER ERROR] failed to create file log, {}", e);
            None
        }
    }
}

/// Like [`create_file_sink`] but hands construction errors to the caller
pub fn try_create_file_sink(config: &File) -> Result<Option<SinkRef>> {
    let sink: SinkRef = match config {
        File::None => return Ok(None),
        File::Rotating {
            path,
            max_size,
            max_files,
            compress,
        } => Arc::new(RotatingFileSink::new(path, *max_size, *max_files)?.with_compression(*compress)),
        File::Daily { path, hour, minute } => Arc::new(DailyFileSink::new(path, *hour, *minute)?),
    };
    Ok(Some(sink))
}
