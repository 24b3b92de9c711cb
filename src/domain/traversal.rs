//! Eager traversals that collect payloads in a chosen order.

use std::collections::VecDeque;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::node::Node;
use crate::domain::tree::BinaryTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Node, left subtree, right subtree
    #[default]
    Pre,
    /// Left subtree, node, right subtree
    In,
    /// Left subtree, right subtree, node
    Post,
    /// Breadth-first, left to right
    Level,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::Pre => "pre",
            TraversalOrder::In => "in",
            TraversalOrder::Post => "post",
            TraversalOrder::Level => "level",
        };
        f.write_str(name)
    }
}

impl<T: Clone> BinaryTree<T> {
    #[instrument(level = "debug", skip(self))]
    pub fn collect(&self, order: TraversalOrder) -> Vec<T> {
        let nodes = match order {
            TraversalOrder::Pre => self.root().map(|root| root.pre_order()).unwrap_or_default(),
            TraversalOrder::In => in_order_nodes(self.root()),
            TraversalOrder::Post => post_order_nodes(self.root()),
            TraversalOrder::Level => level_order_nodes(self.root()),
        };
        nodes.iter().map(Node::data).collect()
    }

    pub fn pre_order(&self) -> Vec<T> {
        self.collect(TraversalOrder::Pre)
    }

    pub fn in_order(&self) -> Vec<T> {
        self.collect(TraversalOrder::In)
    }

    pub fn post_order(&self) -> Vec<T> {
        self.collect(TraversalOrder::Post)
    }

    pub fn level_order(&self) -> Vec<T> {
        self.collect(TraversalOrder::Level)
    }
}

fn in_order_nodes<T>(root: Option<Node<T>>) -> Vec<Node<T>> {
    let mut nodes = Vec::new();
    let mut stack = Vec::new();
    let mut current = root;
    loop {
        while let Some(node) = current {
            current = node.left_child();
            stack.push(node);
        }
        match stack.pop() {
            Some(node) => {
                current = node.right_child();
                nodes.push(node);
            }
            None => break,
        }
    }
    nodes
}

/// Reversed "node, right, left" pre-order, which is exactly post-order.
fn post_order_nodes<T>(root: Option<Node<T>>) -> Vec<Node<T>> {
    let mut nodes = Vec::new();
    let mut stack: Vec<Node<T>> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        let (left, right) = node.children();
        stack.extend(left);
        stack.extend(right);
        nodes.push(node);
    }
    nodes.reverse();
    nodes
}

fn level_order_nodes<T>(root: Option<Node<T>>) -> Vec<Node<T>> {
    let mut nodes = Vec::new();
    let mut queue: VecDeque<Node<T>> = root.into_iter().collect();
    while let Some(node) = queue.pop_front() {
        let (left, right) = node.children();
        queue.extend(left);
        queue.extend(right);
        nodes.push(node);
    }
    nodes
}
