use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime kinds of [`Value`], plus the abstract kinds that group them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[serde(rename = "none")]
    NoneType,
    Bool,
    Int,
    Float,
    Complex,
    Str,
    Bytes,
    List,
    Tuple,
    Set,
    Dict,
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    Time,
    Iterator,
    Object,
    Matcher,
    /// Abstract: bool, int, float, complex.
    Number,
    /// Abstract: anything that can be iterated over.
    Iterable,
    /// Abstract: str, bytes, list, tuple.
    Sequence,
    Mapping,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoneType => "NoneType",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Complex => "complex",
            Self::Str => "str",
            Self::Bytes => "bytes",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Set => "set",
            Self::Dict => "dict",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Iterator => "Iterator",
            Self::Object => "object",
            Self::Matcher => "Matcher",
            Self::Number => "Number",
            Self::Iterable => "Iterable",
            Self::Sequence => "Sequence",
            Self::Mapping => "Mapping",
        }
    }

    /// `bool` counts as an `int`, and `datetime` counts as a `date`.
    pub fn includes(&self, value: &Value) -> bool {
        let actual = value.kind();
        match self {
            Self::Int => matches!(actual, Self::Int | Self::Bool),
            Self::Date => matches!(actual, Self::Date | Self::DateTime),
            Self::Number => matches!(
                actual,
                Self::Bool | Self::Int | Self::Float | Self::Complex
            ),
            Self::Iterable => matches!(
                actual,
                Self::Str
                    | Self::Bytes
                    | Self::List
                    | Self::Tuple
                    | Self::Set
                    | Self::Dict
                    | Self::Iterator
            ),
            Self::Sequence => matches!(
                actual,
                Self::Str | Self::Bytes | Self::List | Self::Tuple
            ),
            Self::Mapping => actual == Self::Dict,
            Self::Object => true,
            concrete => *concrete == actual,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One kind, or a tuple of kinds any of which will do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KindSet {
    One(Kind),
    Many(Vec<Kind>),
}

impl KindSet {
    pub fn includes(&self, value: &Value) -> bool {
        match self {
            Self::One(kind) => kind.includes(value),
            Self::Many(kinds) => kinds.iter().any(|kind| kind.includes(value)),
        }
    }
}

impl From<Kind> for KindSet {
    fn from(kind: Kind) -> Self {
        Self::One(kind)
    }
}

impl From<Vec<Kind>> for KindSet {
    fn from(kinds: Vec<Kind>) -> Self {
        Self::Many(kinds)
    }
}

impl<const N: usize> From<[Kind; N]> for KindSet {
    fn from(kinds: [Kind; N]) -> Self {
        Self::Many(kinds.to_vec())
    }
}

impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(kind) => write!(f, "{kind}"),
            Self::Many(kinds) => {
                let names = kinds.iter().map(Kind::name).collect::<Vec<_>>();
                match names.as_slice() {
                    [single] => write!(f, "({single},)"),
                    _ => write!(f, "({})", names.join(", ")),
                }
            }
        }
    }
}
