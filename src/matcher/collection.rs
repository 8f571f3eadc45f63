use crate::error::MatchResult;
use crate::matcher::{write_named, Match};
use crate::value::Value;
use anyhow::Result;
use std::fmt;

/// Matches values equal to one of a list of candidates. Candidates may be matchers.
#[derive(Debug)]
pub struct InMatcher {
    candidates: Vec<Value>,
    name: Option<String>,
}

impl InMatcher {
    pub fn new<I, T>(candidates: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            name: None,
        }
    }

    /// Candidates from iterating over `source`: a string's characters, a dict's keys, and so on.
    pub fn from_value(source: &Value) -> Result<Self> {
        Ok(Self {
            candidates: source.items()?,
            name: None,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn candidates(&self) -> &[Value] {
        &self.candidates
    }
}

impl Match for InMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        for candidate in &self.candidates {
            if candidate.try_eq(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl fmt::Display for InMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_named(
            f,
            &self.name,
            "InMatcher",
            Value::List(self.candidates.clone()),
        )
    }
}

/// Matches values contained in a string or bytes haystack.
///
/// This is membership the other way round from [`ContainsMatcher`]: the candidate is the needle.
#[derive(Debug)]
pub struct SubstrMatcher {
    haystack: Value,
    name: Option<String>,
}

impl SubstrMatcher {
    pub fn new(haystack: impl Into<Value>) -> Self {
        Self {
            haystack: haystack.into(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Match for SubstrMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        self.haystack.contains(value)
    }
}

impl fmt::Display for SubstrMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_named(f, &self.name, "SubstrMatcher", &self.haystack)
    }
}

/// Matches containers holding `needle`.
///
/// A matcher needle is compared against each item the candidate iterates over. Any other needle
/// is looked up with the candidate's own membership test, so sets and dicts check by key.
#[derive(Debug)]
pub struct ContainsMatcher {
    needle: Value,
    name: Option<String>,
}

impl ContainsMatcher {
    pub fn new(needle: impl Into<Value>) -> Self {
        Self {
            needle: needle.into(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Match for ContainsMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        match &self.needle {
            Value::Matcher(matcher) => {
                for item in value.items()? {
                    if matcher.try_eq(&item)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            needle => value.contains(needle),
        }
    }
}

impl fmt::Display for ContainsMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_named(f, &self.name, "ContainsMatcher", &self.needle)
    }
}
