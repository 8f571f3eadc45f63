use crate::error::{MatchError, MatchResult};
use crate::matcher::CompareOp;
use crate::value::{Kind, Value};
use std::borrow::Cow;
use std::cmp::Ordering;
use time::{OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

#[derive(Clone, Copy, Debug)]
enum Number {
    Int(i64),
    Float(f64),
    Complex(f64, f64),
}

impl Number {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Int(i64::from(*b))),
            Value::Int(n) => Some(Self::Int(*n)),
            Value::Float(x) => Some(Self::Float(*x)),
            Value::Complex { re, im } => Some(Self::Complex(*re, *im)),
            _ => None,
        }
    }

    fn as_complex(self) -> (f64, f64) {
        match self {
            Self::Int(n) => (n as f64, 0.0),
            Self::Float(x) => (x, 0.0),
            Self::Complex(re, im) => (re, im),
        }
    }

    fn eq(self, other: Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Int(n), Self::Float(x)) | (Self::Float(x), Self::Int(n)) => {
                cmp_int_float(n, x) == Some(Ordering::Equal)
            }
            (Self::Float(a), Self::Float(b)) => a == b,
            (a, b) => a.as_complex() == b.as_complex(),
        }
    }

    /// `None` for unordered pairs such as NaN.
    fn partial_cmp(self, other: Self) -> Result<Option<Ordering>, MatchError> {
        match (self, other) {
            (Self::Complex(..), _) | (_, Self::Complex(..)) => Err(MatchError::type_mismatch(
                "complex numbers have no ordering",
            )),
            (Self::Int(a), Self::Int(b)) => Ok(Some(a.cmp(&b))),
            (Self::Int(n), Self::Float(x)) => Ok(cmp_int_float(n, x)),
            (Self::Float(x), Self::Int(n)) => Ok(cmp_int_float(n, x).map(Ordering::reverse)),
            (a, b) => Ok(a.as_complex().0.partial_cmp(&b.as_complex().0)),
        }
    }
}

/// Exact ordering of `n` against `x`, without rounding `n` to the nearest float.
fn cmp_int_float(n: i64, x: f64) -> Option<Ordering> {
    // 2^63: every float at or past this bound is outside the i64 range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if x.is_nan() {
        None
    } else if x >= LIMIT {
        Some(Ordering::Less)
    } else if x < -LIMIT {
        Some(Ordering::Greater)
    } else {
        let whole = x.trunc();
        Some(match n.cmp(&(whole as i64)) {
            Ordering::Equal if x > whole => Ordering::Less,
            Ordering::Equal if x < whole => Ordering::Greater,
            ordering => ordering,
        })
    }
}

fn aware_instant(datetime: &PrimitiveDateTime, offset: UtcOffset) -> OffsetDateTime {
    datetime.assume_offset(offset)
}

/// Nanoseconds since midnight UTC. Aware times may fall outside a single day.
fn aware_clock(time: &Time, offset: UtcOffset) -> i128 {
    let (h, m, s, ns) = time.as_hms_nano();
    let local = ((i128::from(h) * 60 + i128::from(m)) * 60 + i128::from(s)) * 1_000_000_000
        + i128::from(ns);
    local - i128::from(offset.whole_seconds()) * 1_000_000_000
}

fn unordered(op: CompareOp, a: &Value, b: &Value) -> MatchError {
    MatchError::type_mismatch(format!(
        "'{symbol}' not supported between instances of '{a}' and '{b}'",
        symbol = op.symbol(),
        a = a.type_name(),
        b = b.type_name(),
    ))
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Self::None => Kind::NoneType,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::Complex { .. } => Kind::Complex,
            Self::Str(_) => Kind::Str,
            Self::Bytes(_) => Kind::Bytes,
            Self::List(_) => Kind::List,
            Self::Tuple(_) => Kind::Tuple,
            Self::Set(_) => Kind::Set,
            Self::Dict(_) => Kind::Dict,
            Self::Date(_) => Kind::Date,
            Self::DateTime { .. } => Kind::DateTime,
            Self::Time { .. } => Kind::Time,
            Self::Iterator(_) => Kind::Iterator,
            Self::Object { .. } => Kind::Object,
            Self::Matcher(_) => Kind::Matcher,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Object { type_name, .. } => type_name,
            _ => self.kind().name(),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(x) => *x != 0.0,
            Self::Complex { re, im } => *re != 0.0 || *im != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Bytes(bytes) => !bytes.is_empty(),
            Self::List(items) | Self::Tuple(items) | Self::Set(items) => !items.is_empty(),
            Self::Dict(pairs) => !pairs.is_empty(),
            Self::Date(_)
            | Self::DateTime { .. }
            | Self::Time { .. }
            | Self::Iterator(_)
            | Self::Object { .. }
            | Self::Matcher(_) => true,
        }
    }

    pub fn as_int(&self) -> Result<i64, MatchError> {
        match self {
            Self::Bool(b) => Ok(i64::from(*b)),
            Self::Int(n) => Ok(*n),
            other => Err(MatchError::type_mismatch(format!(
                "expected an int, got '{}'",
                other.type_name()
            ))),
        }
    }

    pub fn as_float(&self) -> Result<f64, MatchError> {
        match Number::of(self) {
            Some(Number::Int(n)) => Ok(n as f64),
            Some(Number::Float(x)) => Ok(x),
            _ => Err(MatchError::type_mismatch(format!(
                "expected a real number, got '{}'",
                self.type_name()
            ))),
        }
    }

    pub fn as_str(&self) -> Result<&str, MatchError> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(MatchError::type_mismatch(format!(
                "expected a str, got '{}'",
                other.type_name()
            ))),
        }
    }

    pub fn len(&self) -> Result<usize, MatchError> {
        match self {
            Self::Str(s) => Ok(s.chars().count()),
            Self::Bytes(bytes) => Ok(bytes.len()),
            Self::List(items) | Self::Tuple(items) | Self::Set(items) => Ok(items.len()),
            Self::Dict(pairs) => Ok(pairs.len()),
            other => Err(MatchError::type_mismatch(format!(
                "object of type '{}' has no len()",
                other.type_name()
            ))),
        }
    }

    pub fn is_empty(&self) -> Result<bool, MatchError> {
        Ok(self.len()? == 0)
    }

    /// Equality as seen by an assertion: a matcher on either side decides the outcome.
    ///
    /// Errors come back only when a matcher raised something it isn't allowed to swallow.
    pub fn try_eq(&self, other: &Value) -> MatchResult {
        match (self, other) {
            (Self::Matcher(matcher), value) | (value, Self::Matcher(matcher)) => {
                matcher.try_eq(value)
            }
            _ => self.structural_eq(other, &Value::try_eq),
        }
    }

    /// Structural equality that never consults a matcher. Matchers are only equal to themselves.
    pub fn literal_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Matcher(a), Self::Matcher(b)) => a.ptr_eq(b),
            (Self::Matcher(_), _) | (_, Self::Matcher(_)) => false,
            _ => self
                .structural_eq(other, &|a: &Value, b: &Value| -> MatchResult {
                    Ok(a.literal_eq(b))
                })
                .unwrap_or(false),
        }
    }

    fn structural_eq(
        &self,
        other: &Value,
        item_eq: &dyn Fn(&Value, &Value) -> MatchResult,
    ) -> MatchResult {
        if let (Some(a), Some(b)) = (Number::of(self), Number::of(other)) {
            return Ok(a.eq(b));
        }
        match (self, other) {
            (Self::None, Self::None) => Ok(true),
            (Self::Str(a), Self::Str(b)) => Ok(a == b),
            (Self::Bytes(a), Self::Bytes(b)) => Ok(a == b),
            // Iterators have no identity to compare, so two of them are never equal.
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (x, y) in a.iter().zip(b) {
                    if !item_eq(x, y)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Self::Set(a), Self::Set(b)) => {
                Ok(a.len() == b.len() && is_subset(a, b, item_eq)?)
            }
            (Self::Dict(a), Self::Dict(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (key, value) in a {
                    match b.iter().find(|(other_key, _)| key.literal_eq(other_key)) {
                        Some((_, other_value)) => {
                            if !item_eq(value, other_value)? {
                                return Ok(false);
                            }
                        }
                        None => return Ok(false),
                    }
                }
                Ok(true)
            }
            (Self::Date(a), Self::Date(b)) => Ok(a == b),
            (
                Self::DateTime {
                    datetime: a,
                    offset: a_offset,
                },
                Self::DateTime {
                    datetime: b,
                    offset: b_offset,
                },
            ) => Ok(match (a_offset, b_offset) {
                (None, None) => a == b,
                (Some(a_offset), Some(b_offset)) => {
                    aware_instant(a, *a_offset) == aware_instant(b, *b_offset)
                }
                _ => false,
            }),
            (
                Self::Time {
                    time: a,
                    offset: a_offset,
                },
                Self::Time {
                    time: b,
                    offset: b_offset,
                },
            ) => Ok(match (a_offset, b_offset) {
                (None, None) => a == b,
                (Some(a_offset), Some(b_offset)) => {
                    aware_clock(a, *a_offset) == aware_clock(b, *b_offset)
                }
                _ => false,
            }),
            (
                Self::Object {
                    type_name: a_type,
                    attrs: a,
                },
                Self::Object {
                    type_name: b_type,
                    attrs: b,
                },
            ) => {
                if a_type != b_type || a.len() != b.len() {
                    return Ok(false);
                }
                for (name, value) in a {
                    match b.get(name) {
                        Some(other_value) => {
                            if !item_eq(value, other_value)? {
                                return Ok(false);
                            }
                        }
                        None => return Ok(false),
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn compare(&self, other: &Value, op: CompareOp) -> MatchResult {
        if let (Some(a), Some(b)) = (Number::of(self), Number::of(other)) {
            return match a.partial_cmp(b) {
                Ok(ordering) => Ok(ordering.map_or(false, |ordering| op.holds(ordering))),
                Err(_) => Err(unordered(op, self, other)),
            };
        }
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => Ok(op.holds(a.cmp(b))),
            (Self::Bytes(a), Self::Bytes(b)) => Ok(op.holds(a.cmp(b))),
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => {
                for (x, y) in a.iter().zip(b) {
                    if !x.try_eq(y)? {
                        return x.compare(y, op);
                    }
                }
                Ok(op.holds(a.len().cmp(&b.len())))
            }
            (Self::Set(a), Self::Set(b)) => Ok(match op {
                CompareOp::Le => is_subset(a, b, &Value::try_eq)?,
                CompareOp::Lt => a.len() < b.len() && is_subset(a, b, &Value::try_eq)?,
                CompareOp::Ge => is_subset(b, a, &Value::try_eq)?,
                CompareOp::Gt => a.len() > b.len() && is_subset(b, a, &Value::try_eq)?,
            }),
            (Self::Date(a), Self::Date(b)) => Ok(op.holds(a.cmp(b))),
            (
                Self::DateTime {
                    datetime: a,
                    offset: a_offset,
                },
                Self::DateTime {
                    datetime: b,
                    offset: b_offset,
                },
            ) => match (a_offset, b_offset) {
                (None, None) => Ok(op.holds(a.cmp(b))),
                (Some(a_offset), Some(b_offset)) => Ok(op.holds(
                    aware_instant(a, *a_offset).cmp(&aware_instant(b, *b_offset)),
                )),
                _ => Err(MatchError::type_mismatch(
                    "can't compare offset-naive and offset-aware datetimes",
                )),
            },
            (
                Self::Time {
                    time: a,
                    offset: a_offset,
                },
                Self::Time {
                    time: b,
                    offset: b_offset,
                },
            ) => match (a_offset, b_offset) {
                (None, None) => Ok(op.holds(a.cmp(b))),
                (Some(a_offset), Some(b_offset)) => Ok(op.holds(
                    aware_clock(a, *a_offset).cmp(&aware_clock(b, *b_offset)),
                )),
                _ => Err(MatchError::type_mismatch(
                    "can't compare offset-naive and offset-aware times",
                )),
            },
            _ => Err(unordered(op, self, other)),
        }
    }

    pub fn try_lt(&self, other: &Value) -> MatchResult {
        self.compare(other, CompareOp::Lt)
    }

    pub fn try_le(&self, other: &Value) -> MatchResult {
        self.compare(other, CompareOp::Le)
    }

    pub fn try_gt(&self, other: &Value) -> MatchResult {
        self.compare(other, CompareOp::Gt)
    }

    pub fn try_ge(&self, other: &Value) -> MatchResult {
        self.compare(other, CompareOp::Ge)
    }

    /// Strings look for substrings, bytes for byte subsequences or single byte values, and other
    /// containers for an equal element (or key, for dicts).
    pub fn contains(&self, item: &Value) -> MatchResult {
        match self {
            Self::Str(haystack) => match item {
                Self::Str(needle) => Ok(haystack.contains(needle.as_str())),
                other => Err(MatchError::type_mismatch(format!(
                    "'in <string>' requires string as left operand, not {}",
                    other.type_name()
                ))),
            },
            Self::Bytes(haystack) => match item {
                Self::Bytes(needle) => Ok(needle.is_empty()
                    || haystack
                        .windows(needle.len())
                        .any(|window| window == needle.as_slice())),
                Self::Bool(_) | Self::Int(_) => {
                    let byte = item.as_int()?;
                    match u8::try_from(byte) {
                        Ok(byte) => Ok(haystack.contains(&byte)),
                        Err(_) => Err(MatchError::invalid_value(format!(
                            "byte must be in range(0, 256), not {byte}"
                        ))),
                    }
                }
                other => Err(MatchError::type_mismatch(format!(
                    "a bytes-like object is required, not '{}'",
                    other.type_name()
                ))),
            },
            Self::List(items) | Self::Tuple(items) | Self::Iterator(items) => {
                for element in items {
                    if element.try_eq(item)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Set(items) => {
                let item = hashable(item)?;
                Ok(items.iter().any(|element| element.literal_eq(item)))
            }
            Self::Dict(pairs) => {
                let item = hashable(item)?;
                Ok(pairs.iter().any(|(key, _)| key.literal_eq(item)))
            }
            other => Err(MatchError::type_mismatch(format!(
                "argument of type '{}' is not iterable",
                other.type_name()
            ))),
        }
    }

    /// Items produced by iterating over `self`: characters, byte values, elements, or dict keys.
    pub fn items(&self) -> Result<Vec<Value>, MatchError> {
        match self {
            Self::Str(s) => Ok(s.chars().map(|c| Self::Str(c.to_string())).collect()),
            Self::Bytes(bytes) => Ok(bytes.iter().map(|b| Self::Int(i64::from(*b))).collect()),
            Self::List(items) | Self::Tuple(items) | Self::Set(items) | Self::Iterator(items) => {
                Ok(items.clone())
            }
            Self::Dict(pairs) => Ok(pairs.iter().map(|(key, _)| key.clone()).collect()),
            other => Err(MatchError::type_mismatch(format!(
                "'{}' object is not iterable",
                other.type_name()
            ))),
        }
    }

    /// Subscript: `self[key]`. Sequences accept negative indices counting from the end.
    pub fn get_item(&self, key: &Value) -> Result<Cow<'_, Value>, MatchError> {
        match self {
            Self::Dict(pairs) => {
                let key = hashable(key)?;
                pairs
                    .iter()
                    .find(|(existing, _)| existing.literal_eq(key))
                    .map(|(_, value)| Cow::Borrowed(value))
                    .ok_or_else(|| MatchError::Lookup(key.to_string()))
            }
            Self::List(items) | Self::Tuple(items) => {
                let index = sequence_index(self, key, items.len())?;
                Ok(Cow::Borrowed(&items[index]))
            }
            Self::Str(s) => {
                let chars = s.chars().collect::<Vec<_>>();
                let index = sequence_index(self, key, chars.len())?;
                Ok(Cow::Owned(Self::Str(chars[index].to_string())))
            }
            Self::Bytes(bytes) => {
                let index = sequence_index(self, key, bytes.len())?;
                Ok(Cow::Owned(Self::Int(i64::from(bytes[index]))))
            }
            other => Err(MatchError::type_mismatch(format!(
                "'{}' object is not subscriptable",
                other.type_name()
            ))),
        }
    }

    pub fn attr(&self, name: &str) -> Result<&Value, MatchError> {
        match self {
            Self::Object { type_name, attrs } => attrs.get(name).ok_or_else(|| {
                MatchError::Attribute(format!("'{type_name}' object has no attribute '{name}'"))
            }),
            other => Err(MatchError::Attribute(format!(
                "'{}' object has no attribute '{name}'",
                other.type_name()
            ))),
        }
    }
}

/// Matchers can't be used as set members or dict keys.
fn hashable(value: &Value) -> Result<&Value, MatchError> {
    match value {
        Value::Matcher(matcher) => Err(MatchError::type_mismatch(format!(
            "unhashable type: '{matcher}'"
        ))),
        Value::List(_) | Value::Set(_) | Value::Dict(_) => Err(MatchError::type_mismatch(
            format!("unhashable type: '{}'", value.type_name()),
        )),
        _ => Ok(value),
    }
}

fn sequence_index(sequence: &Value, key: &Value, len: usize) -> Result<usize, MatchError> {
    let index = match key {
        Value::Bool(_) | Value::Int(_) => key.as_int()?,
        other => {
            return Err(MatchError::type_mismatch(format!(
                "{} indices must be integers, not {}",
                sequence.type_name(),
                other.type_name()
            )))
        }
    };
    let resolved = if index < 0 {
        i64::try_from(len).ok().map(|len| len + index)
    } else {
        Some(index)
    };
    resolved
        .and_then(|index| usize::try_from(index).ok())
        .filter(|index| *index < len)
        .ok_or_else(|| MatchError::Lookup(format!("{} index out of range", sequence.type_name())))
}

fn is_subset(
    a: &[Value],
    b: &[Value],
    item_eq: &dyn Fn(&Value, &Value) -> MatchResult,
) -> MatchResult {
    for x in a {
        let mut found = false;
        for y in b {
            if item_eq(x, y)? {
                found = true;
                break;
            }
        }
        if !found {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Host-style `==`.
///
/// # Panics
///
/// If a matcher inside either value raises an error that isn't a type or value mismatch.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match self.try_eq(other) {
            Ok(equal) => equal,
            Err(e) => panic!("error while comparing {self} with {other}: {e}"),
        }
    }
}
