use crate::error::MatchResult;
use crate::matcher::{write_named, Match, Matcher};
use crate::value::Value;
use std::fmt;

/// Matches `None`, or anything equal to `inner`.
#[derive(Debug)]
pub struct MaybeMatcher {
    inner: Value,
    name: Option<String>,
}

impl MaybeMatcher {
    pub fn new(inner: impl Into<Value>) -> Self {
        Self {
            inner: inner.into(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn inner(&self) -> &Value {
        &self.inner
    }
}

impl Match for MaybeMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        if value.is_none() {
            return Ok(true);
        }
        self.inner.try_eq(value)
    }
}

impl fmt::Display for MaybeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_named(f, &self.name, "MaybeMatcher", &self.inner)
    }
}

/// Matches anything not equal to `inner`.
#[derive(Debug)]
pub struct NotMatcher {
    inner: Value,
    name: Option<String>,
}

impl NotMatcher {
    pub fn new(inner: impl Into<Value>) -> Self {
        Self {
            inner: inner.into(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn inner(&self) -> &Value {
        &self.inner
    }
}

impl Match for NotMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        Ok(!self.inner.try_eq(value)?)
    }
}

impl fmt::Display for NotMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_named(f, &self.name, "NotMatcher", &self.inner)
    }
}

fn write_children(
    f: &mut fmt::Formatter<'_>,
    name: &Option<String>,
    type_name: &str,
    children: &[Matcher],
) -> fmt::Result {
    if let Some(name) = name {
        return f.write_str(name);
    }
    write!(f, "{type_name}(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}

/// Matches values that every child matches, checking children in order.
#[derive(Debug)]
pub struct AndMatcher {
    children: Vec<Matcher>,
    name: Option<String>,
}

impl AndMatcher {
    pub fn new(children: impl IntoIterator<Item = Matcher>) -> Self {
        Self {
            children: children.into_iter().collect(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn children(&self) -> &[Matcher] {
        &self.children
    }
}

impl Match for AndMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        for child in &self.children {
            if !child.try_eq(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for AndMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_children(f, &self.name, "AndMatcher", &self.children)
    }
}

/// Matches values that at least one child matches, checking children in order.
#[derive(Debug)]
pub struct OrMatcher {
    children: Vec<Matcher>,
    name: Option<String>,
}

impl OrMatcher {
    pub fn new(children: impl IntoIterator<Item = Matcher>) -> Self {
        Self {
            children: children.into_iter().collect(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn children(&self) -> &[Matcher] {
        &self.children
    }
}

impl Match for OrMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        for child in &self.children {
            if child.try_eq(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl fmt::Display for OrMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_children(f, &self.name, "OrMatcher", &self.children)
    }
}
