//! Template compiler
//!
//! Substitutes `{field}` placeholders in a template string. The compiler is
//! shared by every handler; handlers decide what each field resolves to.
//!
//! Rules:
//!
//! - a placeholder is `{` followed by one or more ASCII alphanumerics or `_`,
//!   followed by `}`
//! - a placeholder whose name the resolver does not know is left in the output
//!   literally (`{bogus}` stays `{bogus}`)
//! - `{{name}}` is an escape and renders as the literal `{name}`
//! - anything else is copied verbatim

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use super::error::LoggerError;

/// The fixed placeholder vocabulary available to every template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    LevelCode,
    LevelName,
    LevelLongName,
    Message,
    Timestamp,
    Identity,
    Application,
    Module,
    Pid,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::LevelCode,
        Field::LevelName,
        Field::LevelLongName,
        Field::Message,
        Field::Timestamp,
        Field::Identity,
        Field::Application,
        Field::Module,
        Field::Pid,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Field::LevelCode => "levelCode",
            Field::LevelName => "levelName",
            Field::LevelLongName => "levelLongName",
            Field::Message => "message",
            Field::Timestamp => "timestamp",
            Field::Identity => "identity",
            Field::Application => "application",
            Field::Module => "module",
            Field::Pid => "pid",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| LoggerError::config("template", format!("unknown field '{}'", s)))
    }
}

/// Compile a template, resolving each placeholder name through `resolve`.
///
/// # Examples
///
/// ```
/// use logful::core::template::compile;
///
/// let line = compile("{identity} {message}", |name| match name {
///     "identity" => Some("app\\mod".into()),
///     "message" => Some("hi".into()),
///     _ => None,
/// });
/// assert_eq!(line, "app\\mod hi");
/// ```
pub fn compile<'a, F>(template: &str, mut resolve: F) -> String
where
    F: FnMut(&str) -> Option<Cow<'a, str>>,
{
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len() + 32);
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }

        let name_len = bytes[i + 1..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        let close = i + 1 + name_len;

        if name_len == 0 || bytes.get(close) != Some(&b'}') {
            i += 1;
            continue;
        }

        // Indices below always sit on ASCII bytes, so slicing stays on char boundaries
        let name = &template[i + 1..close];
        let escaped = i > 0 && bytes[i - 1] == b'{' && bytes.get(close + 1) == Some(&b'}');

        if escaped {
            out.push_str(&template[copied..i - 1]);
            out.push_str(&template[i..=close]);
            copied = close + 2;
            i = close + 2;
            continue;
        }

        out.push_str(&template[copied..i]);
        match resolve(name) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&template[i..=close]),
        }
        copied = close + 1;
        i = close + 1;
    }

    out.push_str(&template[copied..]);
    out
}
