use crate::value::KindSet;
use anyhow::Result;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Declarative description of a matcher, as written in a YAML or JSON document.
///
/// Anything that isn't recognized as one of the keyed forms is taken as a literal value, which
/// must compare equal to the candidate. Use `equals` to match a literal map that happens to look
/// like a keyed form. A keyed form must be the only key in its map: `{gt: 1, lt: 5}` is an
/// error, spell it `all: [{gt: 1}, {lt: 5}]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
#[serde(rename_all = "snake_case")]
#[serde(untagged)]
pub enum MatcherPattern {
    Named { named: String },
    Instance { instance: KindSet },
    Match {
        #[serde(rename = "match")]
        regex: String,
    },
    Search { search: String },
    Fullmatch { fullmatch: String },
    Lt { lt: serde_json::Value },
    Le { le: serde_json::Value },
    Gt { gt: serde_json::Value },
    Ge { ge: serde_json::Value },
    In {
        #[serde(rename = "in")]
        candidates: Vec<MatcherPattern>,
    },
    Substr { substr: String },
    Contains { contains: Box<MatcherPattern> },
    Entries { entries: BTreeMap<String, MatcherPattern> },
    Attrs { attrs: BTreeMap<String, MatcherPattern> },
    Maybe { maybe: Box<MatcherPattern> },
    Not { not: Box<MatcherPattern> },
    Any { any: Vec<MatcherPattern> },
    All { all: Vec<MatcherPattern> },
    Equals { equals: serde_json::Value },
    Literal(serde_json::Value),
}

const KEYWORDS: &[&str] = &[
    "named",
    "instance",
    "match",
    "search",
    "fullmatch",
    "lt",
    "le",
    "gt",
    "ge",
    "in",
    "substr",
    "contains",
    "entries",
    "attrs",
    "maybe",
    "not",
    "any",
    "all",
    "equals",
];

impl<'de> Deserialize<'de> for MatcherPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let keyword = match &raw {
            serde_json::Value::Object(map) => {
                let keyword = map
                    .keys()
                    .find(|key| KEYWORDS.contains(&key.as_str()))
                    .cloned();
                match &keyword {
                    Some(keyword) if map.len() > 1 => {
                        let keys = map.keys().cloned().collect::<Vec<_>>().join(", ");
                        return Err(de::Error::custom(format!(
                            "`{keyword}` must be the only key in its map, found {keys}"
                        )));
                    }
                    _ => {}
                }
                keyword
            }
            _ => None,
        };
        let pattern = MatcherPattern::deserialize(raw).map_err(de::Error::custom)?;
        match (keyword, &pattern) {
            // A keyed form that didn't fit its variant would otherwise be taken as a literal.
            (Some(keyword), MatcherPattern::Literal(literal)) => Err(de::Error::custom(format!(
                "malformed `{keyword}` pattern: {literal}"
            ))),
            _ => Ok(pattern),
        }
    }
}

impl Serialize for MatcherPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatcherPattern::serialize(self, serializer)
    }
}

impl MatcherPattern {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a pattern from a YAML file. JSON files work too, since JSON is valid YAML.
    pub fn load(path: &Path) -> Result<Self> {
        load_from(path)
    }
}

fn load_from<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let data = serde_yaml::from_reader(file)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_keyed_forms() {
        let pattern = MatcherPattern::from_yaml_str(
            r#"
all:
  - named: ANY_INT
  - gt: 23
  - not:
      in: [30, 31]
"#,
        )
        .expect("Couldn't parse");
        assert_eq!(
            pattern,
            MatcherPattern::All {
                all: vec![
                    MatcherPattern::Named {
                        named: "ANY_INT".to_string()
                    },
                    MatcherPattern::Gt { gt: json!(23) },
                    MatcherPattern::Not {
                        not: Box::new(MatcherPattern::In {
                            candidates: vec![
                                MatcherPattern::Literal(json!(30)),
                                MatcherPattern::Literal(json!(31)),
                            ],
                        }),
                    },
                ],
            }
        );
    }

    #[test]
    fn test_parse_renamed_fields() {
        let pattern = MatcherPattern::from_json_str(r#"{"match": "\\d+"}"#).expect("Couldn't parse");
        assert_eq!(
            pattern,
            MatcherPattern::Match {
                regex: r"\d+".to_string()
            }
        );
        let pattern = MatcherPattern::from_yaml_str("instance: [str, none]").expect("Couldn't parse");
        assert_eq!(
            pattern,
            MatcherPattern::Instance {
                instance: KindSet::Many(vec![Kind::Str, Kind::NoneType])
            }
        );
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(
            MatcherPattern::from_yaml_str("42").expect("Couldn't parse"),
            MatcherPattern::Literal(json!(42))
        );
        assert_eq!(
            MatcherPattern::from_yaml_str("{id: 7}").expect("Couldn't parse"),
            MatcherPattern::Literal(json!({"id": 7}))
        );
        assert_eq!(
            MatcherPattern::from_yaml_str("equals: {lt: 5}").expect("Couldn't parse"),
            MatcherPattern::Equals {
                equals: json!({"lt": 5})
            }
        );
    }

    #[test]
    fn test_keyed_form_must_stand_alone() {
        for yaml in [
            "{gt: 1, lt: 5}",
            "{named: ANY_INT, not: 3}",
            "all: [{search: foo, id: 7}]",
            "entries: {id: {maybe: 1, extra: 2}}",
            "in: 5",
            "named: [ANY_INT]",
        ] {
            assert!(
                MatcherPattern::from_yaml_str(yaml).is_err(),
                "{yaml} should not parse"
            );
        }
        assert!(MatcherPattern::from_json_str(r#"{"gt": 1, "lt": 5}"#).is_err());
        assert_eq!(
            MatcherPattern::from_yaml_str("{id: 7, kind: status}").expect("Couldn't parse"),
            MatcherPattern::Literal(json!({"id": 7, "kind": "status"}))
        );
        assert_eq!(
            MatcherPattern::from_yaml_str("equals: {gt: 1, lt: 5}").expect("Couldn't parse"),
            MatcherPattern::Equals {
                equals: json!({"gt": 1, "lt": 5})
            }
        );
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("anys-pattern-{}.yaml", std::process::id()));
        {
            let mut file = File::create(&path).expect("Couldn't create");
            writeln!(file, "entries:\n  id:\n    named: ANY_INT").expect("Couldn't write");
        }
        let pattern = MatcherPattern::load(&path).expect("Couldn't load");
        std::fs::remove_file(&path).expect("Couldn't clean up");
        match pattern {
            MatcherPattern::Entries { entries } => {
                assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["id"]);
            }
            other => panic!("Unexpected pattern {other:?}"),
        }
        assert!(MatcherPattern::load(Path::new("/nonexistent/pattern.yaml")).is_err());
    }
}
