//! The matcher protocol and every matcher kind.
//!
//! Each kind is a plain struct implementing [`Match`]. They're collected into the closed
//! [`MatcherKind`] enum and handed around as a cheaply cloneable [`Matcher`], which is what
//! takes part in equality comparisons with [`Value`]s.

mod collection;
mod compare;
mod func;
mod instance;
mod logic;
mod regex;
mod structure;
mod temporal;

pub use collection::{ContainsMatcher, InMatcher, SubstrMatcher};
pub use compare::{CompareMatcher, CompareOp};
pub use func::FuncMatcher;
pub use instance::InstanceMatcher;
pub use logic::{AndMatcher, MaybeMatcher, NotMatcher, OrMatcher};
pub use self::regex::{RegexMatcher, RegexMode};
pub use structure::{AttrsMatcher, EntriesMatcher};
pub use temporal::TemporalMatcher;

use crate::error::MatchResult;
use crate::value::Value;
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::sync::Arc;
use tracing::trace;

/// A rule that a candidate value either satisfies or doesn't.
pub trait Match {
    /// Apply the rule. May fail with any [`MatchError`](crate::MatchError); deciding which
    /// failures count as a non-match is up to [`Matcher::try_eq`].
    fn try_match(&self, value: &Value) -> MatchResult;
}

pub(crate) fn write_named(
    f: &mut fmt::Formatter<'_>,
    name: &Option<String>,
    type_name: &str,
    arg: impl fmt::Display,
) -> fmt::Result {
    match name {
        Some(name) => f.write_str(name),
        None => write!(f, "{type_name}({arg})"),
    }
}

#[derive(Debug)]
pub enum MatcherKind {
    Func(FuncMatcher),
    Instance(InstanceMatcher),
    Temporal(TemporalMatcher),
    Regex(RegexMatcher),
    Compare(CompareMatcher),
    In(InMatcher),
    Substr(SubstrMatcher),
    Contains(ContainsMatcher),
    Entries(EntriesMatcher),
    Attrs(AttrsMatcher),
    Maybe(MaybeMatcher),
    Not(NotMatcher),
    And(AndMatcher),
    Or(OrMatcher),
}

impl Match for MatcherKind {
    fn try_match(&self, value: &Value) -> MatchResult {
        match self {
            Self::Func(matcher) => matcher.try_match(value),
            Self::Instance(matcher) => matcher.try_match(value),
            Self::Temporal(matcher) => matcher.try_match(value),
            Self::Regex(matcher) => matcher.try_match(value),
            Self::Compare(matcher) => matcher.try_match(value),
            Self::In(matcher) => matcher.try_match(value),
            Self::Substr(matcher) => matcher.try_match(value),
            Self::Contains(matcher) => matcher.try_match(value),
            Self::Entries(matcher) => matcher.try_match(value),
            Self::Attrs(matcher) => matcher.try_match(value),
            Self::Maybe(matcher) => matcher.try_match(value),
            Self::Not(matcher) => matcher.try_match(value),
            Self::And(matcher) => matcher.try_match(value),
            Self::Or(matcher) => matcher.try_match(value),
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Func(matcher) => matcher.fmt(f),
            Self::Instance(matcher) => matcher.fmt(f),
            Self::Temporal(matcher) => matcher.fmt(f),
            Self::Regex(matcher) => matcher.fmt(f),
            Self::Compare(matcher) => matcher.fmt(f),
            Self::In(matcher) => matcher.fmt(f),
            Self::Substr(matcher) => matcher.fmt(f),
            Self::Contains(matcher) => matcher.fmt(f),
            Self::Entries(matcher) => matcher.fmt(f),
            Self::Attrs(matcher) => matcher.fmt(f),
            Self::Maybe(matcher) => matcher.fmt(f),
            Self::Not(matcher) => matcher.fmt(f),
            Self::And(matcher) => matcher.fmt(f),
            Self::Or(matcher) => matcher.fmt(f),
        }
    }
}

/// Shared handle to an immutable matcher.
///
/// Compare it with `==` against a [`Value`] (on either side), or embed it in a list or dict
/// value and compare the container.
#[derive(Clone)]
pub struct Matcher(Arc<MatcherKind>);

impl Matcher {
    pub fn kind(&self) -> &MatcherKind {
        self.0.as_ref()
    }

    pub fn ptr_eq(&self, other: &Matcher) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn children(&self) -> Option<&[Matcher]> {
        match self.kind() {
            MatcherKind::And(and) => Some(and.children()),
            MatcherKind::Or(or) => Some(or.children()),
            _ => None,
        }
    }

    /// Equality with a candidate: type and value mismatches count as a non-match, and any other
    /// error is returned.
    pub fn try_eq(&self, value: &Value) -> MatchResult {
        match self.0.try_match(value) {
            Err(e) if e.is_suppressed() => {
                trace!("{self}: {value} is a non-match: {e}");
                Ok(false)
            }
            result => result,
        }
    }

    /// # Panics
    ///
    /// If matching raises an error other than a type or value mismatch, such as a failure from a
    /// [`FuncMatcher`] predicate.
    pub fn is_match(&self, value: &Value) -> bool {
        match self.try_eq(value) {
            Ok(matched) => matched,
            Err(e) => panic!("{self} failed while matching {value}: {e}"),
        }
    }

    /// Both this and `other`. An existing AND on either side is spliced in rather than nested.
    pub fn and_(&self, other: &Matcher) -> Matcher {
        let mut parts = vec![];
        for side in [self, other] {
            match side.kind() {
                MatcherKind::And(and) => parts.extend(and.children().iter().cloned()),
                _ => parts.push(side.clone()),
            }
        }
        AndMatcher::new(parts).into()
    }

    /// Either this or `other`. An existing OR on either side is spliced in rather than nested.
    pub fn or_(&self, other: &Matcher) -> Matcher {
        let mut parts = vec![];
        for side in [self, other] {
            match side.kind() {
                MatcherKind::Or(or) => parts.extend(or.children().iter().cloned()),
                _ => parts.push(side.clone()),
            }
        }
        OrMatcher::new(parts).into()
    }
}

impl Match for Matcher {
    fn try_match(&self, value: &Value) -> MatchResult {
        self.0.try_match(value)
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! into_matcher {
    ($($variant:ident($t:ty)),* $(,)?) => {
        $(
            impl From<$t> for Matcher {
                fn from(matcher: $t) -> Self {
                    Self(Arc::new(MatcherKind::$variant(matcher)))
                }
            }
        )*
    };
}

into_matcher!(
    Func(FuncMatcher),
    Instance(InstanceMatcher),
    Temporal(TemporalMatcher),
    Regex(RegexMatcher),
    Compare(CompareMatcher),
    In(InMatcher),
    Substr(SubstrMatcher),
    Contains(ContainsMatcher),
    Entries(EntriesMatcher),
    Attrs(AttrsMatcher),
    Maybe(MaybeMatcher),
    Not(NotMatcher),
    And(AndMatcher),
    Or(OrMatcher),
);

impl BitAnd for Matcher {
    type Output = Matcher;

    fn bitand(self, other: Matcher) -> Matcher {
        self.and_(&other)
    }
}

impl BitAnd<&Matcher> for &Matcher {
    type Output = Matcher;

    fn bitand(self, other: &Matcher) -> Matcher {
        self.and_(other)
    }
}

impl BitOr for Matcher {
    type Output = Matcher;

    fn bitor(self, other: Matcher) -> Matcher {
        self.or_(&other)
    }
}

impl BitOr<&Matcher> for &Matcher {
    type Output = Matcher;

    fn bitor(self, other: &Matcher) -> Matcher {
        self.or_(other)
    }
}

impl PartialEq<Value> for Matcher {
    fn eq(&self, value: &Value) -> bool {
        self.is_match(value)
    }
}

impl PartialEq<Matcher> for Value {
    fn eq(&self, matcher: &Matcher) -> bool {
        matcher.is_match(self)
    }
}

macro_rules! eq_primitive {
    ($($t:ty),*) => {
        $(
            impl PartialEq<$t> for Matcher {
                fn eq(&self, other: &$t) -> bool {
                    self.is_match(&Value::from(other.clone()))
                }
            }

            impl PartialEq<Matcher> for $t {
                fn eq(&self, matcher: &Matcher) -> bool {
                    matcher.is_match(&Value::from(self.clone()))
                }
            }
        )*
    };
}

eq_primitive!(bool, i32, i64, f64, String, &str);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::named::{ANY_FLOAT, ANY_INT, ANY_LIST, ANY_STR};
    use crate::testing::{assert_matches_everywhere, assert_rejects_everywhere};
    use crate::value::Kind;

    #[test]
    fn test_or_flattens() {
        let a = ANY_INT.clone() | ANY_STR.clone() | ANY_FLOAT.clone();
        assert!(matches!(a.kind(), MatcherKind::Or(_)));
        let children = a.children().expect("No children");
        assert_eq!(children.len(), 3);
        assert!(children[0].ptr_eq(&ANY_INT));
        assert!(children[1].ptr_eq(&ANY_STR));
        assert!(children[2].ptr_eq(&ANY_FLOAT));
    }

    #[test]
    fn test_or_of_ors_flattens_in_order() {
        let a = (ANY_INT.clone() | ANY_FLOAT.clone()) | (ANY_STR.clone() | ANY_LIST.clone());
        let children = a.children().expect("No children");
        assert_eq!(children.len(), 4);
        for (child, expected) in children.iter().zip([&*ANY_INT, &*ANY_FLOAT, &*ANY_STR, &*ANY_LIST]) {
            assert!(child.ptr_eq(expected));
        }
    }

    #[test]
    fn test_and_of_ands_flattens() {
        let a1: Matcher = CompareMatcher::gt(23).into();
        let a2: Matcher = CompareMatcher::lt(42).into();
        let a4: Matcher = FuncMatcher::fallible(|v| Ok(v.as_int()? % 2 == 1)).into();
        let a = (&a1 & &a2) & (ANY_INT.clone() & a4.clone());
        let children = a.children().expect("No children");
        assert_eq!(children.len(), 4);
        assert!(children[0].ptr_eq(&a1));
        assert!(children[1].ptr_eq(&a2));
        assert!(children[2].ptr_eq(&ANY_INT));
        assert!(children[3].ptr_eq(&a4));

        assert_matches_everywhere(&a, 31);
        for value in [Value::from(30), Value::from(31.0), Value::from(23), Value::from(42)] {
            assert_rejects_everywhere(&a, value);
        }
    }

    #[test]
    fn test_mixed_combinators_do_not_flatten() {
        let a = (ANY_INT.clone() & ANY_STR.clone()) & (ANY_FLOAT.clone() | ANY_LIST.clone());
        let children = a.children().expect("No children");
        assert_eq!(children.len(), 3);
        assert!(matches!(children[2].kind(), MatcherKind::Or(_)));
        assert_eq!(
            a.to_string(),
            "AndMatcher(ANY_INT, ANY_STR, OrMatcher(ANY_FLOAT, ANY_LIST))"
        );
    }

    #[test]
    fn test_any_int_or_str() {
        let a = ANY_INT.clone() | ANY_STR.clone();
        assert_eq!(a.to_string(), "OrMatcher(ANY_INT, ANY_STR)");
        for value in [
            Value::from(-23),
            Value::from(0),
            Value::from(true),
            Value::from(""),
            Value::from("foo"),
        ] {
            assert_matches_everywhere(&a, value);
        }
        for value in [
            Value::None,
            Value::tuple(Vec::<Value>::new()),
            Value::from(2.5),
            Value::complex(1.0, 2.0),
            Value::bytes(b"bar"),
        ] {
            assert_rejects_everywhere(&a, value);
        }
    }

    #[test]
    fn test_range_with_and() {
        let a = Matcher::from(CompareMatcher::gt(23)) & Matcher::from(CompareMatcher::lt(42));
        assert_eq!(a.to_string(), "AndMatcher(CompareMatcher(> 23), CompareMatcher(< 42))");
        for value in [Value::from(24), Value::from(32.5), Value::from(41)] {
            assert_matches_everywhere(&a, value);
        }
        for value in [
            Value::from(23),
            Value::from(42),
            Value::None,
            Value::from("foo"),
            Value::list(Vec::<Value>::new()),
        ] {
            assert_rejects_everywhere(&a, value);
        }
    }

    #[test]
    fn test_primitive_equality_both_ways() {
        assert!(*ANY_INT == 42);
        assert!(42 == *ANY_INT);
        assert!(*ANY_STR == "foo");
        assert!("foo" == *ANY_STR);
        assert!(*ANY_FLOAT != 42);
        assert_eq!(ANY_FLOAT.clone(), 2.5);
    }

    #[test]
    fn test_embedded_in_dict() {
        let expected = Value::dict([("foo", Value::from(&*ANY_INT))]);
        assert_eq!(expected, Value::dict([("foo", 3)]));
        assert_eq!(Value::dict([("foo", 3)]), expected);
        let range = Matcher::from(CompareMatcher::ge(1)) & Matcher::from(CompareMatcher::lt(5));
        assert_eq!(Value::dict([("foo", range)]), Value::dict([("foo", 3)]));
    }

    #[test]
    fn test_matching_is_repeatable() {
        let matcher = Matcher::from(InstanceMatcher::new(Kind::Int));
        let value = Value::from(7);
        let results = (0..3).map(|_| matcher.is_match(&value)).collect::<Vec<_>>();
        assert_eq!(results, vec![true, true, true]);
    }
}
