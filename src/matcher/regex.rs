use crate::error::{MatchError, MatchResult};
use crate::matcher::Match;
use crate::value::Value;
use anyhow::Result;
use regex::bytes;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a regex has to match in the candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegexMode {
    Match,
    Search,
    Fullmatch,
}

impl RegexMode {
    fn anchor(&self, pattern: &str) -> String {
        match self {
            Self::Match => format!(r"\A(?:{pattern})"),
            Self::Search => pattern.to_string(),
            Self::Fullmatch => format!(r"\A(?:{pattern})\z"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Search => "search",
            Self::Fullmatch => "fullmatch",
        }
    }
}

#[derive(Debug)]
enum CompiledRegex {
    Text(Regex),
    Bytes(bytes::Regex),
}

/// Matches `str` candidates against a text pattern, or `bytes` candidates against a bytes pattern.
///
/// Anything else, including a candidate of the other string kind, is a non-match.
#[derive(Debug)]
pub struct RegexMatcher {
    source: String,
    mode: RegexMode,
    regex: CompiledRegex,
    name: Option<String>,
}

impl RegexMatcher {
    pub fn new(pattern: &str, mode: RegexMode) -> Result<Self> {
        Ok(Self {
            source: pattern.to_string(),
            mode,
            regex: CompiledRegex::Text(Regex::new(&mode.anchor(pattern))?),
            name: None,
        })
    }

    /// Pattern for `bytes` candidates. Unicode is off unless the pattern turns it on with `(?u)`.
    pub fn bytes(pattern: &str, mode: RegexMode) -> Result<Self> {
        let regex = bytes::RegexBuilder::new(&mode.anchor(pattern))
            .unicode(false)
            .build()?;
        Ok(Self {
            source: pattern.to_string(),
            mode,
            regex: CompiledRegex::Bytes(regex),
            name: None,
        })
    }

    pub fn from_regex(regex: &Regex, mode: RegexMode) -> Result<Self> {
        Self::new(regex.as_str(), mode)
    }

    pub fn from_bytes_regex(regex: &bytes::Regex, mode: RegexMode) -> Result<Self> {
        Self::bytes(regex.as_str(), mode)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn mode(&self) -> RegexMode {
        self.mode
    }

    pub fn pattern(&self) -> &str {
        &self.source
    }
}

impl Match for RegexMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        match (&self.regex, value) {
            (CompiledRegex::Text(regex), Value::Str(s)) => Ok(regex.is_match(s)),
            (CompiledRegex::Bytes(regex), Value::Bytes(b)) => Ok(regex.is_match(b)),
            (CompiledRegex::Text(_), Value::Bytes(_)) => Err(MatchError::type_mismatch(
                "cannot use a string pattern on a bytes-like object",
            )),
            (CompiledRegex::Bytes(_), Value::Str(_)) => Err(MatchError::type_mismatch(
                "cannot use a bytes pattern on a string-like object",
            )),
            (_, other) => Err(MatchError::type_mismatch(format!(
                "expected string or bytes-like object, got '{}'",
                other.type_name()
            ))),
        }
    }
}

impl fmt::Display for RegexMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return f.write_str(name);
        }
        let prefix = match self.regex {
            CompiledRegex::Text(_) => "",
            CompiledRegex::Bytes(_) => "b",
        };
        write!(
            f,
            "RegexMatcher({}, {prefix}{:?})",
            self.mode.name(),
            self.source
        )
    }
}
