use crate::error::{MatchError, MatchResult};
use crate::matcher::Match;
use crate::value::{write_pairs, Value};
use std::fmt;

/// Matches values where every listed key is present and its entry equals the expected value.
///
/// Unlisted keys are ignored. The candidate can be anything indexable, so integer keys work on
/// lists too.
#[derive(Debug)]
pub struct EntriesMatcher {
    entries: Vec<(Value, Value)>,
    name: Option<String>,
}

impl EntriesMatcher {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, expected)| (key.into(), expected.into()))
                .collect(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Match for EntriesMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        for (key, expected) in &self.entries {
            let actual = match value.get_item(key) {
                Ok(actual) => actual,
                Err(MatchError::Lookup(_)) => return Ok(false),
                Err(e) => return Err(e),
            };
            if !expected.try_eq(&actual)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for EntriesMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return f.write_str(name);
        }
        f.write_str("EntriesMatcher(")?;
        write_pairs(f, self.entries.iter().map(|(k, v)| (k, v)))?;
        f.write_str(")")
    }
}

/// Matches values where every listed attribute is present and equals the expected value.
#[derive(Debug)]
pub struct AttrsMatcher {
    attrs: Vec<(String, Value)>,
    name: Option<String>,
}

impl AttrsMatcher {
    pub fn new<I, K, V>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            attrs: attrs
                .into_iter()
                .map(|(name, expected)| (name.into(), expected.into()))
                .collect(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Match for AttrsMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        for (name, expected) in &self.attrs {
            let actual = match value.attr(name) {
                Ok(actual) => actual,
                Err(MatchError::Attribute(_)) => return Ok(false),
                Err(e) => return Err(e),
            };
            if !expected.try_eq(actual)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for AttrsMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return f.write_str(name);
        }
        let names = self
            .attrs
            .iter()
            .map(|(name, _)| Value::from(name.as_str()))
            .collect::<Vec<_>>();
        f.write_str("AttrsMatcher(")?;
        write_pairs(f, names.iter().zip(self.attrs.iter().map(|(_, v)| v)))?;
        f.write_str(")")
    }
}
