//! Building matchers from [`MatcherPattern`] documents.

mod compiler;

use crate::config::MatcherPattern;
use crate::matcher::{
    AndMatcher, AttrsMatcher, CompareMatcher, ContainsMatcher, EntriesMatcher, InMatcher,
    InstanceMatcher, Matcher, MaybeMatcher, NotMatcher, OrMatcher, RegexMatcher, RegexMode,
    SubstrMatcher,
};
use crate::named;
use crate::value::Value;
use anyhow::{anyhow, Result};
use compiler::PatternNode;
use std::rc::Rc;
use tracing::debug;

pub trait CompileMatcher<M> {
    fn compile(&self) -> Result<M>;
}

impl From<&MatcherPattern> for Rc<PatternNode<MatcherPattern>> {
    fn from(p: &MatcherPattern) -> Rc<PatternNode<MatcherPattern>> {
        Rc::new(match p {
            MatcherPattern::Any { any } => PatternNode::Any {
                children: any.iter().map(Self::from).collect(),
            },
            MatcherPattern::All { all } => PatternNode::All {
                children: all.iter().map(Self::from).collect(),
            },
            MatcherPattern::Not { not } => PatternNode::Not {
                child: Self::from(not.as_ref()),
            },
            leaf => PatternNode::Leaf { leaf: leaf.clone() },
        })
    }
}

impl MatcherPattern {
    /// Literal forms become plain values. Everything else becomes an embedded matcher.
    pub fn to_value(&self) -> Result<Value> {
        match self {
            Self::Literal(literal) | Self::Equals { equals: literal } => {
                Ok(Value::from(literal.clone()))
            }
            pattern => Ok(Value::Matcher(pattern.compile()?)),
        }
    }

    fn compile_leaf(&self) -> Result<Matcher> {
        Ok(match self {
            Self::Named { named } => named::by_name(named).ok_or_else(|| {
                anyhow!(
                    "Unknown matcher name {named}, expected one of {names}",
                    names = named::NAMES.join(", ")
                )
            })?,
            Self::Instance { instance } => InstanceMatcher::new(instance.clone()).into(),
            Self::Match { regex } => RegexMatcher::new(regex, RegexMode::Match)?.into(),
            Self::Search { search } => RegexMatcher::new(search, RegexMode::Search)?.into(),
            Self::Fullmatch { fullmatch } => {
                RegexMatcher::new(fullmatch, RegexMode::Fullmatch)?.into()
            }
            Self::Lt { lt } => CompareMatcher::lt(lt.clone()).into(),
            Self::Le { le } => CompareMatcher::le(le.clone()).into(),
            Self::Gt { gt } => CompareMatcher::gt(gt.clone()).into(),
            Self::Ge { ge } => CompareMatcher::ge(ge.clone()).into(),
            Self::In { candidates } => InMatcher::new(
                candidates
                    .iter()
                    .map(MatcherPattern::to_value)
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            Self::Substr { substr } => SubstrMatcher::new(substr.as_str()).into(),
            Self::Contains { contains } => ContainsMatcher::new(contains.to_value()?).into(),
            Self::Entries { entries } => EntriesMatcher::new(
                entries
                    .iter()
                    .map(|(key, expected)| -> Result<_> {
                        Ok((key.as_str(), expected.to_value()?))
                    })
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            Self::Attrs { attrs } => AttrsMatcher::new(
                attrs
                    .iter()
                    .map(|(name, expected)| -> Result<_> {
                        Ok((name.as_str(), expected.to_value()?))
                    })
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            Self::Maybe { maybe } => MaybeMatcher::new(maybe.to_value()?).into(),
            Self::Literal(literal) | Self::Equals { equals: literal } => {
                InMatcher::new([Value::from(literal.clone())]).into()
            }
            Self::Any { .. } | Self::All { .. } | Self::Not { .. } => self.compile()?,
        })
    }
}

fn build(node: &PatternNode<MatcherPattern>) -> Result<Matcher> {
    Ok(match node {
        PatternNode::Leaf { leaf } => leaf.compile_leaf()?,
        PatternNode::Any { children } => OrMatcher::new(
            children
                .iter()
                .map(|child| build(child))
                .collect::<Result<Vec<_>>>()?,
        )
        .into(),
        PatternNode::All { children } => AndMatcher::new(
            children
                .iter()
                .map(|child| build(child))
                .collect::<Result<Vec<_>>>()?,
        )
        .into(),
        PatternNode::Not { child } => match child.as_ref() {
            PatternNode::Leaf {
                leaf: MatcherPattern::Literal(literal) | MatcherPattern::Equals { equals: literal },
            } => NotMatcher::new(Value::from(literal.clone())).into(),
            _ => NotMatcher::new(build(child)?).into(),
        },
    })
}

impl CompileMatcher<Matcher> for MatcherPattern {
    fn compile(&self) -> Result<Matcher> {
        let root = compiler::optimize(Rc::<PatternNode<MatcherPattern>>::from(self))?;
        let matcher = build(&root)?;
        debug!("Compiled pattern to {matcher}");
        Ok(matcher)
    }
}
