use crate::error::MatchResult;
use crate::matcher::{write_named, Match};
use crate::value::{KindSet, Value};
use std::fmt;

/// Matches values of a kind, or of any kind in a tuple of kinds.
#[derive(Debug)]
pub struct InstanceMatcher {
    kinds: KindSet,
    name: Option<String>,
}

impl InstanceMatcher {
    pub fn new(kinds: impl Into<KindSet>) -> Self {
        Self {
            kinds: kinds.into(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kinds(&self) -> &KindSet {
        &self.kinds
    }
}

impl Match for InstanceMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        Ok(self.kinds.includes(value))
    }
}

impl fmt::Display for InstanceMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_named(f, &self.name, "InstanceMatcher", &self.kinds)
    }
}
