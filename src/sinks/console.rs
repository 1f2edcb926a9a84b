//! Console sink implementation

use crate::core::{BackendLevel, PatternFormatter, Record, Result, Sink};
use colored::{Color, Colorize};
use parking_lot::Mutex;
use std::io::{self, IsTerminal, Write};

struct ConsoleState {
    writer: Box<dyn Write + Send>,
    formatter: PatternFormatter,
    use_colors: bool,
    colors: [Option<Color>; BackendLevel::COUNT],
}

/// Writes formatted records to standard error, painting the pattern's color
/// range (`%^ .. %$`) with the record's level color
pub struct ConsoleSink {
    state: Mutex<ConsoleState>,
}

impl ConsoleSink {
    /// Standard error, colored when it is a terminal
    pub fn stderr() -> Self {
        let use_colors = io::stderr().is_terminal();
        Self::build(Box::new(io::stderr()), use_colors)
    }

    /// Any writer, uncolored unless [`with_colors`](Self::with_colors) is used
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self::build(Box::new(writer), false)
    }

    fn build(writer: Box<dyn Write + Send>, use_colors: bool) -> Self {
        let colors = std::array::from_fn(|index| BackendLevel::from_u8(index as u8).color_code());

        Self {
            state: Mutex::new(ConsoleState {
                writer,
                formatter: PatternFormatter::default(),
                use_colors,
                colors,
            }),
        }
    }

    #[must_use]
    pub fn with_colors(self, use_colors: bool) -> Self {
        self.state.lock().use_colors = use_colors;
        self
    }

    /// Override the color used for one level; `None` leaves it unpainted
    pub fn set_color(&self, level: BackendLevel, color: Option<Color>) {
        self.state.lock().colors[level.index()] = color;
    }

    pub fn color(&self, level: BackendLevel) -> Option<Color> {
        self.state.lock().colors[level.index()]
    }

    pub fn uses_colors(&self) -> bool {
        self.state.lock().use_colors
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Sink for ConsoleSink {
    fn log(&self, record: &Record<'_>) -> Result<()> {
        let mut state = self.state.lock();
        let formatted = state.formatter.format(record);

        let color = state.colors[record.level.index()];
        match (state.use_colors, color, formatted.color_range) {
            (true, Some(color), Some(range)) => {
                let text = &formatted.text;
                let mut painted = text[range.clone()].color(color);
                if record.level >= BackendLevel::Warn {
                    painted = painted.bold();
                }
                let line = format!("{}{}{}", &text[..range.start], painted, &text[range.end..]);
                state.writer.write_all(line.as_bytes())?;
            }
            _ => state.writer.write_all(formatted.text.as_bytes())?,
        }
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
        "console"
    }
}
