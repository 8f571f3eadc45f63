use thiserror::Error;

/// Failure raised while a matcher evaluates its rule against a candidate.
///
/// Which of these count as "no match" depends on where they surface:
/// [`Type`](MatchError::Type) and [`Value`](MatchError::Value) are turned into `false` at every
/// matcher's equality boundary, [`Lookup`](MatchError::Lookup) only by
/// [`EntriesMatcher`](crate::EntriesMatcher), and [`Attribute`](MatchError::Attribute) only by
/// [`AttrsMatcher`](crate::AttrsMatcher). Anything else propagates to the caller.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The operation isn't defined for the kinds of values involved.
    #[error("type mismatch: {0}")]
    Type(String),
    /// The operation is defined for these kinds, but not for this particular value.
    #[error("invalid value: {0}")]
    Value(String),
    /// Missing mapping key or out-of-range index.
    #[error("lookup failed: {0}")]
    Lookup(String),
    #[error("no such attribute: {0}")]
    Attribute(String),
    /// Unrelated failure, typically from a user predicate.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MatchError {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::Type(message.into())
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::Value(message.into())
    }

    /// Errors that mean "this comparison makes no sense", reported as a non-match.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Type(_) | Self::Value(_))
    }
}

pub type MatchResult = Result<bool, MatchError>;
