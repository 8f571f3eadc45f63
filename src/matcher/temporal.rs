use crate::error::MatchResult;
use crate::matcher::Match;
use crate::value::Value;
use std::fmt;

/// Fixed checks on date and time values that a kind check alone can't express.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporalMatcher {
    /// A date that isn't also a datetime.
    StrictDate,
    AwareDateTime,
    NaiveDateTime,
    AwareTime,
    NaiveTime,
}

impl Match for TemporalMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        Ok(match (self, value) {
            (Self::StrictDate, Value::Date(_)) => true,
            (Self::AwareDateTime, Value::DateTime { offset, .. }) => offset.is_some(),
            (Self::NaiveDateTime, Value::DateTime { offset, .. }) => offset.is_none(),
            (Self::AwareTime, Value::Time { offset, .. }) => offset.is_some(),
            (Self::NaiveTime, Value::Time { offset, .. }) => offset.is_none(),
            _ => false,
        })
    }
}

impl fmt::Display for TemporalMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StrictDate => "ANY_STRICT_DATE",
            Self::AwareDateTime => "ANY_AWARE_DATETIME",
            Self::NaiveDateTime => "ANY_NAIVE_DATETIME",
            Self::AwareTime => "ANY_AWARE_TIME",
            Self::NaiveTime => "ANY_NAIVE_TIME",
        })
    }
}
