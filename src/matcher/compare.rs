use crate::error::MatchResult;
use crate::matcher::{write_named, Match};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    pub(crate) fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }
}

/// Matches values that compare to `bound` under `op`, using the candidate's own ordering.
#[derive(Debug)]
pub struct CompareMatcher {
    op: CompareOp,
    bound: Value,
    name: Option<String>,
}

impl CompareMatcher {
    pub fn new(op: CompareOp, bound: impl Into<Value>) -> Self {
        Self {
            op,
            bound: bound.into(),
            name: None,
        }
    }

    pub fn lt(bound: impl Into<Value>) -> Self {
        Self::new(CompareOp::Lt, bound)
    }

    pub fn le(bound: impl Into<Value>) -> Self {
        Self::new(CompareOp::Le, bound)
    }

    pub fn gt(bound: impl Into<Value>) -> Self {
        Self::new(CompareOp::Gt, bound)
    }

    pub fn ge(bound: impl Into<Value>) -> Self {
        Self::new(CompareOp::Ge, bound)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn op(&self) -> CompareOp {
        self.op
    }

    pub fn bound(&self) -> &Value {
        &self.bound
    }
}

impl Match for CompareMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        value.compare(&self.bound, self.op)
    }
}

impl fmt::Display for CompareMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_named(
            f,
            &self.name,
            "CompareMatcher",
            format_args!("{} {}", self.op.symbol(), self.bound),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use crate::testing::{assert_matches_everywhere, assert_rejects_everywhere};
    use time::macros::{date, datetime};

    #[test]
    fn test_lt() {
        let a: Matcher = CompareMatcher::lt(42).into();
        assert_eq!(a.to_string(), "CompareMatcher(< 42)");
        for value in [Value::from(-23), Value::from(41), Value::from(41.9), Value::from(false)] {
            assert_matches_everywhere(&a, value);
        }
        for value in [
            Value::from(42),
            Value::from(43),
            Value::from("41"),
            Value::None,
            Value::list([1]),
        ] {
            assert_rejects_everywhere(&a, value);
        }
    }

    #[test]
    fn test_le() {
        let a: Matcher = CompareMatcher::le(42).into();
        assert_eq!(a.to_string(), "CompareMatcher(<= 42)");
        assert_matches_everywhere(&a, 42);
        assert_matches_everywhere(&a, 42.0);
        assert_rejects_everywhere(&a, 42.5);
    }

    #[test]
    fn test_gt_ge() {
        let gt: Matcher = CompareMatcher::gt(42).into();
        let ge: Matcher = CompareMatcher::ge(42).into();
        assert_rejects_everywhere(&gt, 42);
        assert_matches_everywhere(&ge, 42);
        assert_matches_everywhere(&gt, 1000);
        assert_rejects_everywhere(&ge, 41);
    }

    #[test]
    fn test_float_bound_against_large_int() {
        let gt: Matcher = CompareMatcher::gt(9_007_199_254_740_992.0).into();
        assert_matches_everywhere(&gt, 9_007_199_254_740_993_i64);
        assert_rejects_everywhere(&gt, 9_007_199_254_740_992_i64);
    }

    #[test]
    fn test_strings() {
        let a: Matcher = CompareMatcher::ge("foo").into();
        assert_eq!(a.to_string(), r#"CompareMatcher(>= "foo")"#);
        assert_matches_everywhere(&a, "foo");
        assert_matches_everywhere(&a, "zap");
        assert_rejects_everywhere(&a, "bar");
        assert_rejects_everywhere(&a, 42);
        assert_rejects_everywhere(&a, Value::bytes(b"zap"));
    }

    #[test]
    fn test_dates() {
        let a: Matcher = CompareMatcher::lt(date!(2021 - 06 - 24)).into();
        assert_eq!(a.to_string(), "CompareMatcher(< 2021-06-24)");
        assert_matches_everywhere(&a, date!(2021 - 06 - 23));
        assert_rejects_everywhere(&a, date!(2021 - 06 - 24));
        assert_rejects_everywhere(&a, "2021-06-23");
    }

    #[test]
    fn test_mixed_awareness_is_a_non_match() {
        let a: Matcher = CompareMatcher::lt(datetime!(2021-06-24 12:00 UTC)).into();
        assert_matches_everywhere(&a, datetime!(2021-06-24 11:00 UTC));
        assert_rejects_everywhere(&a, datetime!(2021-06-24 11:00));
    }

    #[test]
    fn test_sets_compare_by_inclusion() {
        let a: Matcher = CompareMatcher::le(Value::set([1, 2, 3])).into();
        assert_matches_everywhere(&a, Value::set([1, 3]));
        assert_rejects_everywhere(&a, Value::set([1, 4]));
    }

    #[test]
    fn test_named() {
        let a: Matcher = CompareMatcher::gt(0).named("POSITIVE").into();
        assert_eq!(a.to_string(), "POSITIVE");
        assert_matches_everywhere(&a, 1);
    }
}
