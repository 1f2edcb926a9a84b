//! Pattern formatting for text sinks
//!
//! A pattern is a string with percent escapes, compiled once into a token list
//! and rendered for every record. Supported escapes:
//!
//! | Escape | Meaning | Example |
//! |---|---|---|
//! | `%v` | message payload | `hello` |
//! | `%l` / `%L` | level name / short level | `warning` / `W` |
//! | `%n` | logger name | `default` |
//! | `%t` / `%P` | thread id / process id | `3` / `4242` |
//! | `%Y %y %m %d` | year, 2-digit year, month, day | `2026 26 10 19` |
//! | `%H %I %M %S %p` | hour (24h, 12h), minute, second, AM/PM | `14 02 05 09 PM` |
//! | `%e %f %F` | milli-, micro-, nanoseconds | `042` |
//! | `%a %A %b %B` | weekday and month names | `Mon Monday Oct October` |
//! | `%D %T %R %r %c` | composite date/time forms | `10/19/26 14:05:09` |
//! | `%z` / `%E` | UTC offset / seconds since epoch | `+02:00` |
//! | `%+` | the default pattern | |
//! | `%^` / `%$` | start / end of the colored range | |
//! | `%%` | a literal percent sign | |
//!
//! Unknown escapes are copied to the output unchanged.

use super::log_entry::Record;
use std::fmt::Write as _;
use std::ops::Range;

/// Pattern used when none is configured
pub const DEFAULT_PATTERN: &str = "[%Y-%m-%d %H:%M:%S.%e] [%n] [%^%l%$] %v";

/// Terminator appended to every formatted line
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Payload,
    LevelName,
    ShortLevel,
    LoggerName,
    ThreadId,
    ProcessId,
    /// Delegated to chrono's strftime
    Time(&'static str),
    Millis,
    Micros,
    Nanos,
    Epoch,
    ColorStart,
    ColorEnd,
}

/// A rendered record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    /// Full line including [`LINE_ENDING`]
    pub text: String,
    /// Byte range to paint with the level color, if the pattern marks one
    pub color_range: Option<Range<usize>>,
}

#[derive(Debug, Clone)]
pub struct PatternFormatter {
    pattern: String,
    tokens: Vec<Token>,
}

impl PatternFormatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let tokens = compile(&pattern);
        Self { pattern, tokens }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, record: &Record<'_>) -> FormattedLine {
        let mut text = String::with_capacity(64 + record.payload.len());
        let mut color_start = None;
        let mut color_end = None;

        for token in &self.tokens {
            match token {
                Token::Literal(s) => text.push_str(s),
                Token::Payload => text.push_str(record.payload),
                Token::LevelName => text.push_str(record.level.to_str()),
                Token::ShortLevel => text.push_str(record.level.short_str()),
                Token::LoggerName => text.push_str(record.logger_name),
                Token::ThreadId => {
                    let _ = write!(text, "{}", record.thread_id);
                }
                Token::ProcessId => {
                    let _ = write!(text, "{}", std::process::id());
                }
                Token::Time(spec) => {
                    let _ = write!(text, "{}", record.time.format(spec));
                }
                Token::Millis => {
                    let _ = write!(text, "{:03}", record.time.timestamp_subsec_millis() % 1000);
                }
                Token::Micros => {
                    let _ = write!(
                        text,
                        "{:06}",
                        record.time.timestamp_subsec_micros() % 1_000_000
                    );
                }
                Token::Nanos => {
                    let _ = write!(
                        text,
                        "{:09}",
                        record.time.timestamp_subsec_nanos() % 1_000_000_000
                    );
                }
                Token::Epoch => {
                    let _ = write!(text, "{}", record.time.timestamp());
                }
                Token::ColorStart => color_start = Some(text.len()),
                Token::ColorEnd => color_end = Some(text.len()),
            }
        }

        let color_range = color_start.map(|start| {
            let end = color_end.filter(|end| *end >= start).unwrap_or(text.len());
            start..end
        });

        text.push_str(LINE_ENDING);
        FormattedLine { text, color_range }
    }

    /// Render a record and drop the line terminator
    pub fn format_line(&self, record: &Record<'_>) -> String {
        let mut line = self.format(record).text;
        let kept = strip_line_ending(&line).len();
        line.truncate(kept);
        line
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

/// Remove one trailing `\r\n` or `\n`
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

fn compile(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let Some(flag) = chars.next() else {
            literal.push('%');
            break;
        };

        let token = match flag {
            'v' => Token::Payload,
            'l' => Token::LevelName,
            'L' => Token::ShortLevel,
            'n' => Token::LoggerName,
            't' => Token::ThreadId,
            'P' => Token::ProcessId,
            'Y' => Token::Time("%Y"),
            'y' => Token::Time("%y"),
            'm' => Token::Time("%m"),
            'd' => Token::Time("%d"),
            'H' => Token::Time("%H"),
            'I' => Token::Time("%I"),
            'M' => Token::Time("%M"),
            'S' => Token::Time("%S"),
            'p' => Token::Time("%p"),
            'a' => Token::Time("%a"),
            'A' => Token::Time("%A"),
            'b' | 'h' => Token::Time("%b"),
            'B' => Token::Time("%B"),
            'D' | 'x' => Token::Time("%m/%d/%y"),
            'T' | 'X' => Token::Time("%H:%M:%S"),
            'R' => Token::Time("%H:%M"),
            'r' => Token::Time("%I:%M:%S %p"),
            'c' => Token::Time("%a %b %d %H:%M:%S %Y"),
            'z' => Token::Time("%:z"),
            'e' => Token::Millis,
            'f' => Token::Micros,
            'F' => Token::Nanos,
            'E' => Token::Epoch,
            '^' => Token::ColorStart,
            '$' => Token::ColorEnd,
            '%' => {
                literal.push('%');
                continue;
            }
            '+' => {
                flush_literal(&mut literal, &mut tokens);
                tokens.extend(compile(DEFAULT_PATTERN));
                continue;
            }
            other => {
                literal.push('%');
                literal.push(other);
                continue;
            }
        };

        flush_literal(&mut literal, &mut tokens);
        tokens.push(token);
    }

    flush_literal(&mut literal, &mut tokens);
    tokens
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    if literal.is_empty() {
        return;
    }
    match tokens.last_mut() {
        Some(Token::Literal(prev)) => prev.push_str(literal),
        _ => tokens.push(Token::Literal(std::mem::take(literal))),
    }
    literal.clear();
}
