//! Assertion helpers shared by unit tests.

use crate::matcher::Matcher;
use crate::value::Value;

/// Install a log subscriber that writes through the test harness. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// The ways a test might compare a matcher against a value: both orders of `==`, and embedded in
/// a dict entry or list element on either side.
fn comparisons(matcher: &Matcher, value: &Value) -> Vec<(&'static str, bool)> {
    let embedded = Value::from(matcher);
    vec![
        ("matcher == value", matcher == value),
        ("value == matcher", value == matcher),
        (
            "{foo: value} == {foo: matcher}",
            Value::dict([("foo", value.clone())]) == Value::dict([("foo", embedded.clone())]),
        ),
        (
            "{foo: matcher} == {foo: value}",
            Value::dict([("foo", embedded.clone())]) == Value::dict([("foo", value.clone())]),
        ),
        (
            "[1, 2, value, 3] == [1, 2, matcher, 3]",
            Value::list([Value::from(1), Value::from(2), value.clone(), Value::from(3)])
                == Value::list([Value::from(1), Value::from(2), embedded.clone(), Value::from(3)]),
        ),
        (
            "[1, 2, matcher, 3] == [1, 2, value, 3]",
            Value::list([Value::from(1), Value::from(2), embedded, Value::from(3)])
                == Value::list([Value::from(1), Value::from(2), value.clone(), Value::from(3)]),
        ),
    ]
}

#[track_caller]
pub fn assert_matches_everywhere(matcher: &Matcher, value: impl Into<Value>) {
    init_tracing();
    let value = value.into();
    for (comparison, equal) in comparisons(matcher, &value) {
        assert!(equal, "{comparison} should hold for {matcher} and {value}");
    }
}

#[track_caller]
pub fn assert_rejects_everywhere(matcher: &Matcher, value: impl Into<Value>) {
    init_tracing();
    let value = value.into();
    for (comparison, equal) in comparisons(matcher, &value) {
        assert!(!equal, "{comparison} should not hold for {matcher} and {value}");
    }
}
