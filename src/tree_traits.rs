use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::domain::{BinaryTree, Node};

/// Drawn in place of a missing child whose sibling exists.
pub const GAP: &str = "·";

pub trait ToTermTree {
    fn to_termtree(&self) -> Tree<String>;
}

impl<T: Display> ToTermTree for BinaryTree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self) -> Tree<String> {
        match self.root() {
            Some(root) => build_tree(&root),
            None => Tree::new("(empty)".to_string()),
        }
    }
}

fn build_tree<T: Display>(node: &Node<T>) -> Tree<String> {
    let mut tree = Tree::new(node.with_data(|data| data.to_string()));
    let (left, right) = node.children();
    if left.is_none() && right.is_none() {
        return tree;
    }
    // both positions are drawn so left and right stay distinguishable
    for child in [left, right] {
        match child {
            Some(child) => tree.push(build_tree(&child)),
            None => tree.push(Tree::new(GAP.to_string())),
        };
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_sample_renders_every_node() {
        let rendered = fixtures::sample().to_termtree().to_string();

        assert_eq!(rendered.lines().next(), Some("5"));
        assert_eq!(rendered.lines().count(), 7);
        assert!(rendered.contains("-2"));
        assert!(!rendered.contains(GAP));
    }

    #[test]
    fn test_chain_renders_gaps() {
        let rendered = fixtures::left_chain().to_termtree().to_string();

        assert_eq!(rendered.lines().count(), 5);
        assert_eq!(rendered.matches(GAP).count(), 2);
    }

    #[test]
    fn test_empty_tree_renders_placeholder() {
        let tree: BinaryTree<i64> = BinaryTree::empty();
        assert_eq!(tree.to_termtree().to_string().trim(), "(empty)");
    }
}
