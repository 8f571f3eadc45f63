//! Matchers that compare equal to whole families of values, for use in test assertions.
//!
//! A [`Matcher`] takes part in ordinary equality against a [`Value`], from either side, and keeps
//! working when nested inside lists, tuples and dicts. That lets a test state the shape of a
//! result without pinning down details like generated IDs or timestamps:
//!
//! ```
//! use anys::{Value, ANY_AWARE_DATETIME_STR, ANY_INT};
//!
//! let record = Value::dict([
//!     ("id", Value::from(7)),
//!     ("created_at", Value::from("2021-06-24T19:40:06Z")),
//!     ("kind", Value::from("status")),
//! ]);
//! assert_eq!(
//!     record,
//!     Value::dict([
//!         ("id", Value::from(&*ANY_INT)),
//!         ("created_at", Value::from(&*ANY_AWARE_DATETIME_STR)),
//!         ("kind", Value::from("status")),
//!     ])
//! );
//! ```
//!
//! Matchers combine with `&` and `|`, and can also be described in YAML or JSON through
//! [`MatcherPattern`].

mod config;
mod error;
mod matcher;
pub mod named;
mod pattern;
#[cfg(test)]
mod testing;
mod value;

pub use config::MatcherPattern;
pub use error::{MatchError, MatchResult};
pub use matcher::{
    AndMatcher, AttrsMatcher, CompareMatcher, CompareOp, ContainsMatcher, EntriesMatcher,
    FuncMatcher, InMatcher, InstanceMatcher, Match, Matcher, MatcherKind, MaybeMatcher,
    NotMatcher, OrMatcher, RegexMatcher, RegexMode, SubstrMatcher, TemporalMatcher,
};
pub use named::*;
pub use pattern::CompileMatcher;
pub use value::{Kind, KindSet, Value};
