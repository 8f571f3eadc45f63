//! Dynamic values that matchers are compared against.
//!
//! [`Value`] plays the part of the host language's object model: it knows how to compare itself
//! for equality and ordering, how to test membership, and how to index and iterate. Matchers are
//! themselves values, so they can sit anywhere inside a list or dict and take part in that
//! container's equality.

mod kind;
mod ops;

pub use kind::{Kind, KindSet};

use crate::matcher::Matcher;
use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

#[derive(Clone, Debug)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex {
        re: f64,
        im: f64,
    },
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Unordered, without duplicates.
    Set(Vec<Value>),
    /// Unordered for comparison purposes; insertion order is kept for display.
    Dict(Vec<(Value, Value)>),
    Date(Date),
    DateTime {
        datetime: PrimitiveDateTime,
        offset: Option<UtcOffset>,
    },
    Time {
        time: Time,
        offset: Option<UtcOffset>,
    },
    Iterator(Vec<Value>),
    Object {
        type_name: String,
        attrs: BTreeMap<String, Value>,
    },
    Matcher(Matcher),
}

impl Value {
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Duplicate items (by literal equality) are dropped.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut unique: Vec<Value> = vec![];
        for item in items.into_iter().map(Into::into) {
            if !unique.iter().any(|existing| existing.literal_eq(&item)) {
                unique.push(item);
            }
        }
        Self::Set(unique)
    }

    /// Later entries replace earlier ones with a literally equal key.
    pub fn dict<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut pairs: Vec<(Value, Value)> = vec![];
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match pairs.iter_mut().find(|(existing, _)| existing.literal_eq(&key)) {
                Some(pair) => pair.1 = value,
                None => pairs.push((key, value)),
            }
        }
        Self::Dict(pairs)
    }

    pub fn bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::Bytes(bytes.as_ref().to_vec())
    }

    pub fn complex(re: f64, im: f64) -> Self {
        Self::Complex { re, im }
    }

    pub fn iter<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Iterator(items.into_iter().map(Into::into).collect())
    }

    pub fn object<I, K, V>(type_name: impl Into<String>, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Object {
            type_name: type_name.into(),
            attrs: attrs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Attribute bag built from the serialized fields of a struct.
    pub fn object_from<T: Serialize>(value: &T) -> Result<Self> {
        let full_name = std::any::type_name::<T>();
        let type_name = full_name.rsplit("::").next().unwrap_or(full_name);
        match serde_json::to_value(value)? {
            serde_json::Value::Object(fields) => Ok(Self::object(
                type_name,
                fields
                    .into_iter()
                    .map(|(name, field)| (name, Value::from(field))),
            )),
            other => bail!("{type_name} serialized to {other}, not a map of fields"),
        }
    }

    pub fn naive_time(time: Time) -> Self {
        Self::Time { time, offset: None }
    }

    pub fn aware_time(time: Time, offset: UtcOffset) -> Self {
        Self::Time {
            time,
            offset: Some(offset),
        }
    }

    pub fn as_matcher(&self) -> Option<&Matcher> {
        match self {
            Self::Matcher(matcher) => Some(matcher),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Int(i64::from(n))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::list(items)
    }
}

impl From<Date> for Value {
    fn from(date: Date) -> Self {
        Self::Date(date)
    }
}

impl From<PrimitiveDateTime> for Value {
    fn from(datetime: PrimitiveDateTime) -> Self {
        Self::DateTime {
            datetime,
            offset: None,
        }
    }
}

impl From<OffsetDateTime> for Value {
    fn from(datetime: OffsetDateTime) -> Self {
        Self::DateTime {
            datetime: PrimitiveDateTime::new(datetime.date(), datetime.time()),
            offset: Some(datetime.offset()),
        }
    }
}

impl From<Time> for Value {
    fn from(time: Time) -> Self {
        Self::naive_time(time)
    }
}

impl From<Matcher> for Value {
    fn from(matcher: Matcher) -> Self {
        Self::Matcher(matcher)
    }
}

impl From<&Matcher> for Value {
    fn from(matcher: &Matcher) -> Self {
        Self::Matcher(matcher.clone())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => Self::list(items),
            serde_json::Value::Object(fields) => Self::dict(fields),
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

pub(crate) fn write_pairs<'a, K: fmt::Display + 'a>(
    f: &mut fmt::Formatter<'_>,
    pairs: impl IntoIterator<Item = (&'a K, &'a Value)>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: {value}")?;
    }
    f.write_str("}")
}

fn write_clock(f: &mut fmt::Formatter<'_>, time: &Time, offset: &Option<UtcOffset>) -> fmt::Result {
    let clock = time
        .format(format_description!("[hour]:[minute]:[second]"))
        .map_err(|_| fmt::Error)?;
    f.write_str(&clock)?;
    if time.nanosecond() != 0 {
        let subsecond = time
            .format(format_description!("[subsecond digits:6]"))
            .map_err(|_| fmt::Error)?;
        write!(f, ".{subsecond}")?;
    }
    if let Some(offset) = offset {
        let offset = offset
            .format(format_description!(
                "[offset_hour sign:mandatory]:[offset_minute]"
            ))
            .map_err(|_| fmt::Error)?;
        f.write_str(&offset)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Complex { re, im } => write!(f, "complex({re:?}, {im:?})"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            Self::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::Set(items) if items.is_empty() => f.write_str("set()"),
            Self::Set(items) => {
                f.write_str("{")?;
                write_joined(f, items)?;
                f.write_str("}")
            }
            Self::Dict(pairs) => write_pairs(f, pairs.iter().map(|(k, v)| (k, v))),
            Self::Date(date) => write!(f, "{date}"),
            Self::DateTime { datetime, offset } => {
                write!(f, "{}T", datetime.date())?;
                write_clock(f, &datetime.time(), offset)
            }
            Self::Time { time, offset } => write_clock(f, time, offset),
            Self::Iterator(items) => {
                f.write_str("iter([")?;
                write_joined(f, items)?;
                f.write_str("])")
            }
            Self::Object { type_name, attrs } => {
                write!(f, "{type_name}(")?;
                for (i, (name, value)) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                f.write_str(")")
            }
            Self::Matcher(matcher) => write!(f, "{matcher}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use time::macros::{datetime, offset, time};

    #[test]
    fn test_display() {
        let value = Value::dict([
            ("list", Value::list([1, 2])),
            ("tuple", Value::tuple(["x"])),
            ("bytes", Value::bytes(b"ab\n")),
            ("none", Value::None),
            ("float", Value::from(3.0)),
        ]);
        assert_eq!(
            value.to_string(),
            r#"{"list": [1, 2], "tuple": ("x",), "bytes": b"ab\n", "none": None, "float": 3.0}"#
        );
        assert_eq!(Value::set(Vec::<Value>::new()).to_string(), "set()");
    }

    #[test]
    fn test_display_temporal() {
        assert_eq!(
            Value::from(datetime!(2021-06-24 19:40:06 UTC)).to_string(),
            "2021-06-24T19:40:06+00:00"
        );
        assert_eq!(
            Value::from(datetime!(2021-06-24 19:40:06.5)).to_string(),
            "2021-06-24T19:40:06.500000"
        );
        assert_eq!(
            Value::aware_time(time!(15:40:06), offset!(-4)).to_string(),
            "15:40:06-04:00"
        );
    }

    #[test]
    fn test_set_and_dict_dedupe() {
        match Value::set([1, 2, 1]) {
            Value::Set(items) => assert_eq!(items.len(), 2),
            other => panic!("Unexpected value {other}"),
        }
        assert_eq!(
            Value::dict([("a", 1), ("b", 2), ("a", 3)]).to_string(),
            r#"{"a": 3, "b": 2}"#
        );
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(serde_json::json!({"id": 7, "tags": ["a"], "score": 0.5, "gone": null}));
        assert_eq!(
            value.to_string(),
            r#"{"gone": None, "id": 7, "score": 0.5, "tags": ["a"]}"#
        );
    }

    #[derive(Serialize)]
    struct Account {
        username: String,
        followers: u32,
    }

    #[test]
    fn test_object_from_struct() {
        let value = Value::object_from(&Account {
            username: "thegx".to_string(),
            followers: 12,
        })
        .expect("Couldn't convert");
        assert_eq!(value.to_string(), r#"Account(followers=12, username="thegx")"#);
        assert!(Value::object_from(&42).is_err());
    }
}
