//! Daily file sink
//!
//! Each file carries its date before the extension, e.g. `app_2026-10-19.log`
//! for a base path of `app.log`. The first record stamped at or after the
//! configured local `hour:minute` closes the current file and opens the one
//! named after the record's date.

use crate::core::{LoggerError, PatternFormatter, Record, Result, Sink};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

struct DailyState {
    writer: BufWriter<fs::File>,
    current_path: PathBuf,
    next_rotation: DateTime<Local>,
    formatter: PatternFormatter,
}

/// File sink starting a new dated file once per day
///
/// Rollover is driven by record timestamps, so a sink opened with
/// [`open_at`](DailyFileSink::open_at) can be exercised with any clock.
pub struct DailyFileSink {
    base_path: PathBuf,
    hour: u32,
    minute: u32,
    state: Mutex<DailyState>,
}

impl DailyFileSink {
    /// Open today's file
    ///
    /// # Errors
    ///
    /// Returns error if the rollover time is out of range or the file cannot
    /// be opened
    pub fn new(path: impl AsRef<Path>, hour: u32, minute: u32) -> Result<Self> {
        Self::open_at(path, hour, minute, Local::now())
    }

    /// Open the file dated `now` and schedule the next rollover after it
    pub fn open_at(
        path: impl AsRef<Path>,
        hour: u32,
        minute: u32,
        now: DateTime<Local>,
    ) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(LoggerError::config(
                "DailyFileSink",
                format!("rollover time {:02}:{:02} is out of range", hour, minute),
            ));
        }

        let base_path = path.as_ref().to_path_buf();
        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let current_path = dated_path(&base_path, now.date_naive());
        let writer = BufWriter::new(open_append(&current_path)?);

        Ok(Self {
            base_path,
            hour,
            minute,
            state: Mutex::new(DailyState {
                writer,
                current_path,
                next_rotation: next_rotation_after(now, hour, minute),
                formatter: PatternFormatter::default(),
            }),
        })
    }

    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Rollover time as `(hour, minute)`
    #[must_use]
    pub fn rollover_time(&self) -> (u32, u32) {
        (self.hour, self.minute)
    }

    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.state.lock().current_path.clone()
    }

    #[must_use]
    pub fn next_rotation(&self) -> DateTime<Local> {
        self.state.lock().next_rotation
    }
}

impl Sink for DailyFileSink {
    fn log(&self, record: &Record<'_>) -> Result<()> {
        let mut state = self.state.lock();

        if record.time >= state.next_rotation {
            let path = dated_path(&self.base_path, record.time.date_naive());
            state.writer.flush()?;
            state.writer = BufWriter::new(open_append(&path)?);
            state.current_path = path;
            state.next_rotation = next_rotation_after(record.time, self.hour, self.minute);
        }

        let line = state.formatter.format(record).text;
        state.writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_sink(
                state.current_path.display().to_string(),
                format!("Failed to write log record: {}", e),
            )
        })?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.state.lock().writer.flush()?;
        Ok(())
    }

    fn set_pattern(&self, pattern: &str) {
        self.state.lock().formatter = PatternFormatter::new(pattern);
    }

    fn name(&self) -> &str {
        "daily_file"
    }
}

impl Drop for DailyFileSink {
    fn drop(&mut self) {
        let _ = self.state.get_mut().writer.flush();
    }
}

/// File name for `date`: `<stem>_<YYYY-MM-DD>.<ext>` beside `base`
pub fn dated_path(base: &Path, date: NaiveDate) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}_{}", stem, date.format("%Y-%m-%d"));
    if let Some(ext) = base.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    base.with_file_name(name)
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

/// First local `hour:minute` strictly after `now`
fn next_rotation_after(now: DateTime<Local>, hour: u32, minute: u32) -> DateTime<Local> {
    let today = now.date_naive();
    [Some(today), today.succ_opt()]
        .into_iter()
        .flatten()
        .filter_map(|date| rollover_on(date, hour, minute))
        .find(|candidate| *candidate > now)
        .unwrap_or_else(|| now + Duration::days(1))
}

fn rollover_on(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    let naive = date.and_hms_opt(hour, minute, 0)?;
    // A rollover inside a DST gap moves to the first valid instant after it
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}
