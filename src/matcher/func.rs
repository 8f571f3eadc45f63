use crate::error::MatchResult;
use crate::matcher::{write_named, Match};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type Predicate = dyn Fn(&Value) -> MatchResult + Send + Sync;

/// Matches values for which a predicate returns true.
///
/// Type and value mismatches raised by a [`fallible`](FuncMatcher::fallible) predicate count as a
/// non-match. Any other error propagates out of the comparison.
#[derive(Clone)]
pub struct FuncMatcher {
    predicate: Arc<Predicate>,
    repr: &'static str,
    name: Option<String>,
}

impl FuncMatcher {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(move |value: &Value| Ok(predicate(value))),
            repr: std::any::type_name::<F>(),
            name: None,
        }
    }

    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> MatchResult + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            repr: std::any::type_name::<F>(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Match for FuncMatcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        (self.predicate)(value)
    }
}

impl fmt::Display for FuncMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_named(f, &self.name, "FuncMatcher", self.repr)
    }
}

impl fmt::Debug for FuncMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchError;
    use crate::matcher::Matcher;
    use crate::testing::{assert_matches_everywhere, assert_rejects_everywhere};
    use anyhow::anyhow;

    fn is_even(value: &Value) -> bool {
        matches!(value, Value::Int(n) if n % 2 == 0)
    }

    #[test]
    fn test_simple() {
        let a: Matcher = FuncMatcher::new(is_even).into();
        assert!(a.to_string().starts_with("FuncMatcher("));
        assert!(a.to_string().contains("is_even"));
        assert_matches_everywhere(&a, 42);
        assert_rejects_everywhere(&a, 23);
        assert_rejects_everywhere(&a, "42");
    }

    #[test]
    fn test_named() {
        let a: Matcher = FuncMatcher::new(is_even).named("EVEN").into();
        assert_eq!(a.to_string(), "EVEN");
    }

    #[test]
    fn test_type_mismatch_is_a_non_match() {
        let a: Matcher = FuncMatcher::fallible(|v| Ok(v.as_str()?.len() > 2)).into();
        assert_matches_everywhere(&a, "foo");
        assert_rejects_everywhere(&a, "fo");
        assert_rejects_everywhere(&a, 42);
    }

    #[test]
    fn test_value_error_is_a_non_match() {
        let a: Matcher = FuncMatcher::fallible(|v| {
            let s = v.as_str()?;
            s.parse::<i64>()
                .map(|n| n > 0)
                .map_err(|e| MatchError::invalid_value(e.to_string()))
        })
        .into();
        assert_matches_everywhere(&a, "12");
        assert_rejects_everywhere(&a, "twelve");
    }

    #[test]
    fn test_other_errors_propagate() {
        let a: Matcher = FuncMatcher::fallible(|_| Err(anyhow!("predicate exploded").into())).into();
        assert!(matches!(a.try_eq(&Value::from(1)), Err(MatchError::Other(_))));
        assert!(Value::list([&a]).try_eq(&Value::list([1])).is_err());
        let lookup: Matcher =
            FuncMatcher::fallible(|v| Ok(v.get_item(&Value::from("key"))?.is_truthy())).into();
        assert!(matches!(
            lookup.try_eq(&Value::dict([("other", 1)])),
            Err(MatchError::Lookup(_))
        ));
    }

    #[test]
    #[should_panic(expected = "predicate exploded")]
    fn test_other_errors_panic_in_eq() {
        let a: Matcher = FuncMatcher::fallible(|_| Err(anyhow!("predicate exploded").into())).into();
        let _ = a == 1;
    }
}
