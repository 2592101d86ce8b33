//! Timestamp formatting utilities
//!
//! Handler configuration describes timestamps with moment-style patterns such
//! as `YYYY-MM-DD HH:mm:ss.SSS`. A pattern is compiled once into a chrono
//! strftime string and reused for every entry.
//!
//! Supported tokens:
//!
//! | Token  | Output                | Token | Output             |
//! |--------|-----------------------|-------|--------------------|
//! | `YYYY` | 4-digit year          | `HH`  | hour, 00-23        |
//! | `YY`   | 2-digit year          | `H`   | hour, 0-23         |
//! | `MMMM` | month name            | `hh`  | hour, 01-12        |
//! | `MMM`  | abbreviated month     | `h`   | hour, 1-12         |
//! | `MM`   | month, 01-12          | `mm`  | minute, 00-59      |
//! | `M`    | month, 1-12           | `m`   | minute, 0-59       |
//! | `DD`   | day, 01-31            | `ss`  | second, 00-59      |
//! | `D`    | day, 1-31             | `s`   | second, 0-59       |
//! | `dddd` | weekday name          | `SSS` | milliseconds       |
//! | `ddd`  | abbreviated weekday   | `A`   | AM/PM              |
//! | `ZZ`   | offset, `+0100`       | `a`   | am/pm              |
//! | `Z`    | offset, `+01:00`      | `X`   | unix seconds       |
//!
//! Text inside square brackets is copied literally; every other character is
//! copied as-is.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

// Longest tokens first so that `YYYY` wins over `YY`.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("dddd", "%A"),
    ("MMM", "%b"),
    ("ddd", "%a"),
    ("SSS", "%3f"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ZZ", "%z"),
    ("M", "%-m"),
    ("D", "%-d"),
    ("H", "%-H"),
    ("h", "%-I"),
    ("m", "%-M"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
    ("Z", "%:z"),
    ("X", "%s"),
];

/// A compiled timestamp pattern
///
/// # Examples
///
/// ```
/// use logful::TimestampFormat;
/// use chrono::{Local, TimeZone};
///
/// let format = TimestampFormat::new("HH:mm:ss.SSS");
/// let time = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(format.format(&time), "10:30:45.000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TimestampFormat {
    pattern: String,
    strftime: String,
}

impl TimestampFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let strftime = compile_pattern(&pattern);
        Self { pattern, strftime }
    }

    /// The moment-style pattern this format was built from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent chrono strftime string
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        datetime.format(&self.strftime).to_string()
    }
}

impl From<String> for TimestampFormat {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

impl From<TimestampFormat> for String {
    fn from(format: TimestampFormat) -> Self {
        format.pattern
    }
}

fn compile_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                push_literal(&mut out, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        for (token, spec) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }

        push_literal(&mut out, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    out
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}
