use anyhow::{bail, Result};
use std::rc::Rc;

/// Boolean expression over leaf patterns, simplified before any matcher is built.
#[derive(Debug, Clone)]
pub enum PatternNode<L: Clone> {
    Leaf { leaf: L },
    Any { children: Vec<Rc<PatternNode<L>>> },
    All { children: Vec<Rc<PatternNode<L>>> },
    Not { child: Rc<PatternNode<L>> },
}

type Node<L> = Rc<PatternNode<L>>;

/// Fails if an empty `any` or `all` swallows the whole tree.
pub fn optimize<L: Clone>(root: Node<L>) -> Result<Node<L>> {
    match simplify(&root) {
        Some(simplified) => Ok(simplified),
        None => bail!("Reduced to nothingness"),
    }
}

/// Works bottom-up, so every child is already in simplest form when its parent is rebuilt.
/// `None` means nothing is left of `node`.
fn simplify<L: Clone>(node: &Node<L>) -> Option<Node<L>> {
    match node.as_ref() {
        PatternNode::Leaf { .. } => Some(node.clone()),
        PatternNode::Not { child } => {
            let child = simplify(child)?;
            match child.as_ref() {
                PatternNode::Not { child: inner } => Some(inner.clone()),
                _ => Some(Rc::new(PatternNode::Not { child })),
            }
        }
        PatternNode::Any { children } => rebuild(
            splice(children, |child| match child {
                PatternNode::Any { children } => Some(children),
                _ => None,
            }),
            |children| PatternNode::Any { children },
        ),
        PatternNode::All { children } => rebuild(
            splice(children, |child| match child {
                PatternNode::All { children } => Some(children),
                _ => None,
            }),
            |children| PatternNode::All { children },
        ),
    }
}

/// Simplified children, with empty ones dropped and same-kind ones replaced by their children.
fn splice<L: Clone>(
    children: &[Node<L>],
    same_kind: impl Fn(&PatternNode<L>) -> Option<&Vec<Node<L>>>,
) -> Vec<Node<L>> {
    let mut spliced = vec![];
    for child in children.iter().filter_map(simplify) {
        match same_kind(child.as_ref()) {
            Some(grandchildren) => spliced.extend(grandchildren.iter().cloned()),
            None => spliced.push(child),
        }
    }
    spliced
}

fn rebuild<L: Clone>(
    mut children: Vec<Node<L>>,
    combinator: impl FnOnce(Vec<Node<L>>) -> PatternNode<L>,
) -> Option<Node<L>> {
    match children.len() {
        0 => None,
        1 => children.pop(),
        _ => Some(Rc::new(combinator(children))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> Node<String> {
        Rc::new(PatternNode::Leaf {
            leaf: name.to_string(),
        })
    }

    fn any(children: Vec<Node<String>>) -> Node<String> {
        Rc::new(PatternNode::Any { children })
    }

    fn all(children: Vec<Node<String>>) -> Node<String> {
        Rc::new(PatternNode::All { children })
    }

    fn not(child: Node<String>) -> Node<String> {
        Rc::new(PatternNode::Not { child })
    }

    /// Compact rendering, so whole trees can be compared in one assertion.
    fn render(node: &PatternNode<String>) -> String {
        fn list(children: &[Node<String>]) -> String {
            children
                .iter()
                .map(|child| render(child))
                .collect::<Vec<_>>()
                .join(" ")
        }
        match node {
            PatternNode::Leaf { leaf } => leaf.clone(),
            PatternNode::Any { children } => format!("(any {})", list(children)),
            PatternNode::All { children } => format!("(all {})", list(children)),
            PatternNode::Not { child } => format!("(not {})", render(child)),
        }
    }

    fn optimized(root: Node<String>) -> String {
        render(&optimize(root).expect("Couldn't optimize"))
    }

    #[test]
    fn test_collapse_double_negative() {
        assert_eq!(optimized(not(not(leaf("a")))), "a");
        assert_eq!(optimized(not(not(not(leaf("a"))))), "(not a)");
    }

    #[test]
    fn test_flatten_nested_same_type() {
        let root = all(vec![
            all(vec![leaf("a"), leaf("b")]),
            any(vec![leaf("c"), any(vec![leaf("d"), leaf("e")])]),
            all(vec![leaf("f")]),
        ]);
        assert_eq!(optimized(root), "(all a b (any c d e) f)");
    }

    #[test]
    fn test_flatten_after_pulling_up() {
        let root = any(vec![leaf("a"), all(vec![any(vec![leaf("b"), leaf("c")])])]);
        assert_eq!(optimized(root), "(any a b c)");
    }

    #[test]
    fn test_deep_double_negative() {
        let root = any(vec![
            leaf("a"),
            all(vec![leaf("b"), not(not(leaf("c")))]),
        ]);
        assert_eq!(optimized(root), "(any a (all b c))");
    }

    #[test]
    fn test_empty_is_an_error() {
        assert!(optimize(not(any(vec![]))).is_err());
        assert!(optimize(all(vec![any(vec![]), all(vec![])])).is_err());
    }

    #[test]
    fn test_empty_child_is_dropped() {
        assert_eq!(optimized(all(vec![leaf("a"), any(vec![])])), "a");
        assert_eq!(optimized(any(vec![leaf("a"), not(all(vec![])), leaf("b")])), "(any a b)");
    }
}
