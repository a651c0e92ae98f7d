//! Record formatting patterns
//!
//! A pattern is a plain string with named placeholders that is parsed once
//! when set and then applied to every rendered record. Recognized
//! placeholders: `{date}`, `{time}`, `{name}`, `{level}`, `{message}`.
//! Anything else, including unknown `{...}` tokens, is emitted verbatim.

use super::record::LogRecord;
use colored::Colorize;

/// Default rendering layout: date, time with fraction, logger name,
/// level, message.
pub const DEFAULT_PATTERN: &str = "[{date} {time}][{name}][{level}] : {message} ";

const DATE_FORMAT: &str = "%m/%d/%y";
const TIME_FORMAT: &str = "%H:%M:%S%.3f";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Date,
    Time,
    Name,
    Level,
    Message,
}

/// A compiled pattern string.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = Self::parse(&raw);
        Self { raw, segments }
    }

    /// The pattern string as originally supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    fn parse(raw: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            let (before, tail) = rest.split_at(open);
            literal.push_str(before);

            match tail.find('}') {
                Some(close) => {
                    let token = &tail[1..close];
                    let segment = match token {
                        "date" => Some(Segment::Date),
                        "time" => Some(Segment::Time),
                        "name" => Some(Segment::Name),
                        "level" => Some(Segment::Level),
                        "message" => Some(Segment::Message),
                        _ => None,
                    };
                    match segment {
                        Some(seg) => {
                            if !literal.is_empty() {
                                segments.push(Segment::Literal(std::mem::take(&mut literal)));
                            }
                            segments.push(seg);
                        }
                        // Unknown token stays literal
                        None => literal.push_str(&tail[..=close]),
                    }
                    rest = &tail[close + 1..];
                }
                None => {
                    literal.push_str(tail);
                    rest = "";
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        segments
    }

    /// Render a record as plain text.
    pub fn render(&self, record: &LogRecord) -> String {
        self.render_with(record, false)
    }

    /// Render a record with the level token colorized for terminals.
    pub fn render_colored(&self, record: &LogRecord) -> String {
        self.render_with(record, true)
    }

    fn render_with(&self, record: &LogRecord, colorize: bool) -> String {
        let mut out = String::with_capacity(self.raw.len() + record.message.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Date => {
                    out.push_str(&record.timestamp.format(DATE_FORMAT).to_string());
                }
                Segment::Time => {
                    out.push_str(&record.timestamp.format(TIME_FORMAT).to_string());
                }
                Segment::Name => out.push_str(&record.logger_name),
                Segment::Level => {
                    if colorize {
                        out.push_str(
                            &record
                                .level
                                .to_str()
                                .color(record.level.color_code())
                                .to_string(),
                        );
                    } else {
                        out.push_str(record.level.to_str());
                    }
                }
                Segment::Message => out.push_str(&record.message),
            }
        }
        out
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}
