//! Prebuilt matchers for common checks.
//!
//! These are process-wide and built on first use. Clone one to combine it with others; clones
//! share the same instance, so [`Matcher::ptr_eq`] can tell them apart from lookalikes.

use crate::matcher::{
    FuncMatcher, InstanceMatcher, Matcher, RegexMatcher, RegexMode, TemporalMatcher,
};
use crate::value::{Kind, KindSet};
use lazy_static::lazy_static;

/// Calendar date: a year of four or more digits, month 01 to 12, day 01 to 31.
pub const DATE_RGX: &str = r"[0-9]{4,}-(?:0[1-9]|1[012])-(?:0[1-9]|[12][0-9]|3[01])";
/// Time of day: hours and minutes, optionally seconds, optionally fractional seconds.
pub const TIME_RGX: &str = r"(?:[01][0-9]|2[0-3]):[0-5][0-9](?::[0-5][0-9](?:\.[0-9]+)?)?";
/// UTC offset: `Z`, or a signed hour with optional minutes.
pub const TZ_RGX: &str = r"(?:Z|[-+][0-9]{2}(?::?[0-9]{2})?)";

fn instance(kinds: impl Into<KindSet>, name: &str) -> Matcher {
    InstanceMatcher::new(kinds).named(name).into()
}

fn fullmatch(pattern: &str, name: &str) -> Matcher {
    RegexMatcher::new(pattern, RegexMode::Fullmatch)
        .expect("Couldn't compile built-in pattern")
        .named(name)
        .into()
}

lazy_static! {
    pub static ref ANY_BOOL: Matcher = instance(Kind::Bool, "ANY_BOOL");
    pub static ref ANY_BYTES: Matcher = instance(Kind::Bytes, "ANY_BYTES");
    pub static ref ANY_COMPLEX: Matcher = instance(Kind::Complex, "ANY_COMPLEX");
    pub static ref ANY_DATE: Matcher = instance(Kind::Date, "ANY_DATE");
    pub static ref ANY_DATETIME: Matcher = instance(Kind::DateTime, "ANY_DATETIME");
    pub static ref ANY_DICT: Matcher = instance(Kind::Dict, "ANY_DICT");
    pub static ref ANY_FLOAT: Matcher = instance(Kind::Float, "ANY_FLOAT");
    pub static ref ANY_INT: Matcher = instance(Kind::Int, "ANY_INT");
    pub static ref ANY_ITERABLE: Matcher = instance(Kind::Iterable, "ANY_ITERABLE");
    pub static ref ANY_ITERATOR: Matcher = instance(Kind::Iterator, "ANY_ITERATOR");
    pub static ref ANY_LIST: Matcher = instance(Kind::List, "ANY_LIST");
    pub static ref ANY_MAPPING: Matcher = instance(Kind::Mapping, "ANY_MAPPING");
    pub static ref ANY_NUMBER: Matcher = instance(Kind::Number, "ANY_NUMBER");
    pub static ref ANY_SEQUENCE: Matcher = instance(Kind::Sequence, "ANY_SEQUENCE");
    pub static ref ANY_SET: Matcher = instance(Kind::Set, "ANY_SET");
    pub static ref ANY_STR: Matcher = instance(Kind::Str, "ANY_STR");
    pub static ref ANY_TIME: Matcher = instance(Kind::Time, "ANY_TIME");
    pub static ref ANY_TUPLE: Matcher = instance(Kind::Tuple, "ANY_TUPLE");

    pub static ref ANY_STRICT_DATE: Matcher = TemporalMatcher::StrictDate.into();
    pub static ref ANY_AWARE_DATETIME: Matcher = TemporalMatcher::AwareDateTime.into();
    pub static ref ANY_NAIVE_DATETIME: Matcher = TemporalMatcher::NaiveDateTime.into();
    pub static ref ANY_AWARE_TIME: Matcher = TemporalMatcher::AwareTime.into();
    pub static ref ANY_NAIVE_TIME: Matcher = TemporalMatcher::NaiveTime.into();

    pub static ref ANY_TRUTHY: Matcher = FuncMatcher::new(|v| v.is_truthy())
        .named("ANY_TRUTHY")
        .into();
    pub static ref ANY_FALSY: Matcher = FuncMatcher::new(|v| !v.is_truthy())
        .named("ANY_FALSY")
        .into();

    pub static ref ANY_DATETIME_STR: Matcher = fullmatch(
        &format!("{DATE_RGX}[T ]{TIME_RGX}(?:{TZ_RGX})?"),
        "ANY_DATETIME_STR",
    );
    pub static ref ANY_AWARE_DATETIME_STR: Matcher = fullmatch(
        &format!("{DATE_RGX}[T ]{TIME_RGX}{TZ_RGX}"),
        "ANY_AWARE_DATETIME_STR",
    );
    pub static ref ANY_NAIVE_DATETIME_STR: Matcher = fullmatch(
        &format!("{DATE_RGX}[T ]{TIME_RGX}"),
        "ANY_NAIVE_DATETIME_STR",
    );
    pub static ref ANY_DATE_STR: Matcher = fullmatch(DATE_RGX, "ANY_DATE_STR");
    pub static ref ANY_TIME_STR: Matcher = fullmatch(
        &format!("{TIME_RGX}(?:{TZ_RGX})?"),
        "ANY_TIME_STR",
    );
    pub static ref ANY_AWARE_TIME_STR: Matcher = fullmatch(
        &format!("{TIME_RGX}{TZ_RGX}"),
        "ANY_AWARE_TIME_STR",
    );
    pub static ref ANY_NAIVE_TIME_STR: Matcher = fullmatch(TIME_RGX, "ANY_NAIVE_TIME_STR");
}

pub const NAMES: &[&str] = &[
    "ANY_BOOL",
    "ANY_BYTES",
    "ANY_COMPLEX",
    "ANY_DATE",
    "ANY_DATETIME",
    "ANY_DICT",
    "ANY_FLOAT",
    "ANY_INT",
    "ANY_ITERABLE",
    "ANY_ITERATOR",
    "ANY_LIST",
    "ANY_MAPPING",
    "ANY_NUMBER",
    "ANY_SEQUENCE",
    "ANY_SET",
    "ANY_STR",
    "ANY_TIME",
    "ANY_TUPLE",
    "ANY_STRICT_DATE",
    "ANY_AWARE_DATETIME",
    "ANY_NAIVE_DATETIME",
    "ANY_AWARE_TIME",
    "ANY_NAIVE_TIME",
    "ANY_TRUTHY",
    "ANY_FALSY",
    "ANY_DATETIME_STR",
    "ANY_AWARE_DATETIME_STR",
    "ANY_NAIVE_DATETIME_STR",
    "ANY_DATE_STR",
    "ANY_TIME_STR",
    "ANY_AWARE_TIME_STR",
    "ANY_NAIVE_TIME_STR",
];

pub fn by_name(name: &str) -> Option<Matcher> {
    let matcher: &Matcher = match name {
        "ANY_BOOL" => &*ANY_BOOL,
        "ANY_BYTES" => &*ANY_BYTES,
        "ANY_COMPLEX" => &*ANY_COMPLEX,
        "ANY_DATE" => &*ANY_DATE,
        "ANY_DATETIME" => &*ANY_DATETIME,
        "ANY_DICT" => &*ANY_DICT,
        "ANY_FLOAT" => &*ANY_FLOAT,
        "ANY_INT" => &*ANY_INT,
        "ANY_ITERABLE" => &*ANY_ITERABLE,
        "ANY_ITERATOR" => &*ANY_ITERATOR,
        "ANY_LIST" => &*ANY_LIST,
        "ANY_MAPPING" => &*ANY_MAPPING,
        "ANY_NUMBER" => &*ANY_NUMBER,
        "ANY_SEQUENCE" => &*ANY_SEQUENCE,
        "ANY_SET" => &*ANY_SET,
        "ANY_STR" => &*ANY_STR,
        "ANY_TIME" => &*ANY_TIME,
        "ANY_TUPLE" => &*ANY_TUPLE,
        "ANY_STRICT_DATE" => &*ANY_STRICT_DATE,
        "ANY_AWARE_DATETIME" => &*ANY_AWARE_DATETIME,
        "ANY_NAIVE_DATETIME" => &*ANY_NAIVE_DATETIME,
        "ANY_AWARE_TIME" => &*ANY_AWARE_TIME,
        "ANY_NAIVE_TIME" => &*ANY_NAIVE_TIME,
        "ANY_TRUTHY" => &*ANY_TRUTHY,
        "ANY_FALSY" => &*ANY_FALSY,
        "ANY_DATETIME_STR" => &*ANY_DATETIME_STR,
        "ANY_AWARE_DATETIME_STR" => &*ANY_AWARE_DATETIME_STR,
        "ANY_NAIVE_DATETIME_STR" => &*ANY_NAIVE_DATETIME_STR,
        "ANY_DATE_STR" => &*ANY_DATE_STR,
        "ANY_TIME_STR" => &*ANY_TIME_STR,
        "ANY_AWARE_TIME_STR" => &*ANY_AWARE_TIME_STR,
        "ANY_NAIVE_TIME_STR" => &*ANY_NAIVE_TIME_STR,
        _ => return None,
    };
    Some(matcher.clone())
}
