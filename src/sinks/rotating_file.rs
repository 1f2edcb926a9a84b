//! Size-rotating file sink
//!
//! Writes to a base path. Before a write that would push the active file past
//! `max_size` bytes, the file is rotated aside:
//!
//! ```text
//! app.log      -> app.log.1
//! app.log.1    -> app.log.2
//! ...
//! app.log.N    -> deleted
//! ```
//!
//! With compression enabled, archives are gzipped to `app.log.1.gz` etc.

use crate::core::{LoggerError, PatternFormatter, Record, Result, Sink};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const MAX_DELETION_FAILURES: usize = 5;

struct RotatingState {
    writer: Option<BufWriter<fs::File>>,
    current_size: u64,
    formatter: PatternFormatter,
    /// Consecutive failures to delete the oldest archive
    deletion_failure_count: usize,
}

/// File sink rotating on size with a bounded number of archives
///
/// # Examples
///
/// ```no_run
/// use organizer_log::sinks::RotatingFileSink;
///
/// // 1 MB per file, keep five archives, gzip them
/// let sink = RotatingFileSink::new("/var/log/app.log", 1024 * 1024, 5)
///     .unwrap()
///     .with_compression(true);
/// ```
pub struct RotatingFileSink {
    base_path: PathBuf,
    max_size: u64,
    max_files: usize,
    compress: bool,
    state: Mutex<RotatingState>,
}

impl RotatingFileSink {
    /// Open (or create) the active file in append mode
    ///
    /// # Errors
    ///
    /// Returns error if `max_size` is zero or the file cannot be opened
    pub fn new(path: impl AsRef<Path>, max_size: u64, max_files: usize) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if max_size == 0 {
            return Err(LoggerError::config(
                "RotatingFileSink",
                "max_size must be greater than zero",
            ));
        }

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = open_append(&base_path)?;
        let current_size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_sink(
                    base_path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok(Self {
            base_path,
            max_size,
            max_files,
            compress: false,
            state: Mutex::new(RotatingState {
                writer: Some(BufWriter::new(file)),
                current_size,
                formatter: PatternFormatter::default(),
                deletion_failure_count: 0,
            }),
        })
    }

    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    #[must_use]
    pub fn max_files(&self) -> usize {
        self.max_files
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.state.lock().current_size
    }

    /// Path of the archive with the given index (1 is the newest)
    pub fn archive_path(&self, index: usize) -> PathBuf {
        archive_path(&self.base_path, index)
    }

    fn rotate(&self, state: &mut RotatingState) -> Result<()> {
        if let Some(mut writer) = state.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.max_files == 0 {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&self.base_path)
                .map_err(|e| {
                    LoggerError::file_rotation(
                        self.base_path.display().to_string(),
                        format!("Failed to truncate log file: {}", e),
                    )
                })?;
            state.writer = Some(BufWriter::new(file));
            state.current_size = 0;
            return Ok(());
        }

        self.remove_oldest(state)?;

        for i in (1..self.max_files).rev() {
            let from = self.archive_path(i);
            let to = self.archive_path(i + 1);
            shift(&with_gz(&from), &with_gz(&to))?;
            shift(&from, &to)?;
        }

        let newest = self.archive_path(1);
        if self.base_path.exists() {
            fs::rename(&self.base_path, &newest).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;

            if self.compress {
                if let Err(e) = compress_file(&newest) {
                    eprintln!("[LOGGER WARNING] Failed to compress {}: {}", newest.display(), e);
                }
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.base_path)
            .map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to create new log file: {}", e),
                )
            })?;

        state.writer = Some(BufWriter::new(file));
        state.current_size = 0;
        Ok(())
    }

    /// Delete the archive that would exceed `max_files` after shifting
    fn remove_oldest(&self, state: &mut RotatingState) -> Result<()> {
        let oldest = self.archive_path(self.max_files);
        let mut deletion_failed = false;

        for path in [with_gz(&oldest), oldest] {
            if path.exists() {
                if let Err(e) = fs::remove_file(&path) {
                    deletion_failed = true;
                    eprintln!(
                        "[LOGGER WARNING] Failed to remove oldest archive {}: {} (failure #{}/{})",
                        path.display(),
                        e,
                        state.deletion_failure_count + 1,
                        MAX_DELETION_FAILURES
                    );
                }
            }
        }

        if !deletion_failed {
            state.deletion_failure_count = 0;
            return Ok(());
        }

        state.deletion_failure_count += 1;
        if state.deletion_failure_count >= MAX_DELETION_FAILURES {
            return Err(LoggerError::file_rotation(
                self.base_path.display().to_string(),
                format!(
                    "Rotation aborted: failed to delete old archives {} consecutive times",
                    state.deletion_failure_count
                ),
            ));
        }
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn log(&self, record: &Record<'_>) -> Result<()> {
        let mut state = self.state.lock();
        let formatted = state.formatter.format(record).text;
        let len = formatted.len() as u64;

        if state.current_size + len > self.max_size && state.current_size > 0 {
            if let Err(e) = self.rotate(&mut state) {
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if state.writer.is_none() {
                    let file = open_append(&self.base_path)?;
                    state.writer = Some(BufWriter::new(file));
                }
                // Let the file grow past the limit rather than retry on every record
                state.current_size = 0;
            }
        }

        let writer = state
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Writer not initialized"))?;
        writer.write_all(formatted.as_bytes()).map_err(|e| {
            LoggerError::file_sink(
                self.base_path.display().to_string(),
                format!("Failed to write log record: {}", e),
            )
        })?;
        state.current_size += len;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(ref mut writer) = state.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_sink(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn set_pattern(&self, pattern: &str) {
        self.state.lock().formatter = PatternFormatter::new(pattern);
    }

    fn name(&self) -> &str {
        "rotating_file"
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.state.get_mut().writer.take() {
            let _ = writer.flush();
        }
    }
}

fn open_append(path: &Path) -> Result<fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LoggerError::file_sink(path.display().to_string(), format!("Failed to open: {}", e))
        })
}

fn archive_path(base: &Path, index: usize) -> PathBuf {
    let mut name = base.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}", index));
    base.with_file_name(name)
}

fn with_gz(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}

/// Move `from` onto `to`, replacing it
fn shift(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Ok(());
    }
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    // Some platforms refuse to rename onto an existing file
    if to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to).map_err(|e| {
        LoggerError::file_rotation(
            from.display().to_string(),
            format!("Failed to rotate archive: {}", e),
        )
    })
}

/// Gzip `path` to `path.gz`, removing the original only once the archive is
/// complete
fn compress_file(path: &Path) -> Result<()> {
    use flate2::{write::GzEncoder, Compression};
    use std::io::BufReader;

    let gz_path = with_gz(path);
    let mut tmp_name = gz_path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = (|| -> Result<()> {
        let input = fs::File::open(path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to open {}", path.display()),
                e,
            )
        })?;
        let output = fs::File::create(&tmp_path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to create {}", tmp_path.display()),
                e,
            )
        })?;

        let mut reader = BufReader::with_capacity(64 * 1024, input);
        let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
        std::io::copy(&mut reader, &mut encoder)?;
        encoder.finish()?.flush()?;
        fs::rename(&tmp_path, &gz_path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
        return result;
    }

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[LOGGER WARNING] Compressed {} but failed to remove the original: {}",
            path.display(),
            e
        );
    }
    Ok(())
}
