//! Named trees used by the CLI and by tests.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{BinaryTree, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Fixture {
    /// 5(2(1,4(8,-2)),6)
    #[default]
    Sample,
    /// A lone node holding 42
    Single,
    /// 1 -> 2 -> 3 through left children
    LeftChain,
    /// 1 -> 2 -> 3 through right children
    RightChain,
    /// 1(2(4,5),3(6,7))
    Complete,
}

impl Fixture {
    pub fn build(self) -> BinaryTree<i64> {
        match self {
            Fixture::Sample => sample(),
            Fixture::Single => single(),
            Fixture::LeftChain => left_chain(),
            Fixture::RightChain => right_chain(),
            Fixture::Complete => complete(),
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}

fn leaf(data: i64) -> Option<Node<i64>> {
    Some(Node::new(data))
}

//     5
//    / \
//   2   6
//  / \
// 1   4
//    / \
//   8   -2
pub fn sample() -> BinaryTree<i64> {
    let four = Node::with_children(4, leaf(8), leaf(-2));
    let two = Node::with_children(2, leaf(1), Some(four));
    BinaryTree::new(Node::with_children(5, Some(two), leaf(6)))
}

pub fn single() -> BinaryTree<i64> {
    BinaryTree::new(Node::new(42))
}

pub fn left_chain() -> BinaryTree<i64> {
    let two = Node::with_children(2, leaf(3), None);
    BinaryTree::new(Node::with_children(1, Some(two), None))
}

pub fn right_chain() -> BinaryTree<i64> {
    let two = Node::with_children(2, None, leaf(3));
    BinaryTree::new(Node::with_children(1, None, Some(two)))
}

//       1
//      / \
//     2   3
//    / \ / \
//   4  5 6  7
pub fn complete() -> BinaryTree<i64> {
    let two = Node::with_children(2, leaf(4), leaf(5));
    let three = Node::with_children(3, leaf(6), leaf(7));
    BinaryTree::new(Node::with_children(1, Some(two), Some(three)))
}

/// Left-only chain of `n` nodes: the root holds `n - 1`, the deepest node 0.
///
/// Built bottom-up, so no attach ever walks the ancestor chain.
pub fn deep_left_chain(n: usize) -> BinaryTree<i64> {
    let mut chain: Option<Node<i64>> = None;
    for value in 0..n as i64 {
        chain = Some(Node::with_children(value, chain, None));
    }
    chain.map(BinaryTree::new).unwrap_or_default()
}
