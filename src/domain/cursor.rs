//! Externally driven pre-order cursor.
//!
//! The cursor keeps an explicit frontier of pending node handles instead of
//! relying on recursion. Children are read when their parent is popped, never
//! earlier, so children attached to a still-pending node are discovered, while
//! edits to nodes already produced have no effect on the rest of the walk.
//!
//! Frontier entries are shared handles: a cursor never dangles, even if the
//! tree it was created from is dropped mid-walk. It simply finishes the
//! subtrees it still has pending.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use tracing::{instrument, trace};

use crate::domain::frontier::Frontier;
use crate::domain::node::Node;
use crate::errors::{TreeError, TreeResult};

#[derive(Debug)]
pub struct PreOrderCursor<T, S = Vec<Node<T>>> {
    frontier: S,
    _payload: PhantomData<Node<T>>,
}

impl<T> PreOrderCursor<T> {
    pub fn new(root: Option<Node<T>>) -> Self {
        Self::with_frontier(root, Vec::new())
    }
}

impl<T, S: Frontier<Node<T>>> PreOrderCursor<T, S> {
    /// Seeds `frontier` with `root`. Entries already in `frontier` are walked
    /// after the root's subtree.
    #[instrument(level = "trace", skip_all)]
    pub fn with_frontier(root: Option<Node<T>>, mut frontier: S) -> Self {
        if let Some(root) = root {
            frontier.push(root);
        }
        Self {
            frontier,
            _payload: PhantomData,
        }
    }

    pub fn has_next(&self) -> bool {
        !self.frontier.is_empty()
    }

    /// The node the next step will produce.
    pub fn peek_node(&self) -> TreeResult<Node<T>> {
        self.frontier.peek().cloned().ok_or(TreeError::Exhausted)
    }

    pub fn peek(&self) -> TreeResult<T>
    where
        T: Clone,
    {
        self.peek_node().map(|node| node.data())
    }

    /// Produces the next node in pre-order.
    ///
    /// # Errors
    ///
    /// [`TreeError::Exhausted`] on every call once the walk is complete. The
    /// cursor is left unchanged.
    pub fn next_node(&mut self) -> TreeResult<Node<T>> {
        let node = self.frontier.pop().ok_or(TreeError::Exhausted)?;
        let (left, right) = node.children();
        // right first so that left is popped next
        if let Some(right) = right {
            self.frontier.push(right);
        }
        if let Some(left) = left {
            self.frontier.push(left);
        }
        trace!(pending = !self.frontier.is_empty(), "cursor advanced");
        Ok(node)
    }

    /// Produces the next payload in pre-order.
    ///
    /// # Errors
    ///
    /// [`TreeError::Exhausted`] once the walk is complete.
    pub fn try_next(&mut self) -> TreeResult<T>
    where
        T: Clone,
    {
        self.next_node().map(|node| node.data())
    }
}

impl<T: Clone, S: Frontier<Node<T>>> Iterator for PreOrderCursor<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }
}

// the frontier only grows while popping, so an empty frontier stays empty
impl<T: Clone, S: Frontier<Node<T>>> FusedIterator for PreOrderCursor<T, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::frontier::LinkedStack;
    use crate::domain::tree::BinaryTree;
    use crate::fixtures;

    #[test]
    fn test_empty_cursor_is_exhausted() {
        let mut cursor: PreOrderCursor<i32> = PreOrderCursor::new(None);

        assert!(!cursor.has_next());
        assert_eq!(cursor.try_next(), Err(TreeError::Exhausted));
        assert_eq!(cursor.peek(), Err(TreeError::Exhausted));
    }

    #[test]
    fn test_single_node_yields_once() {
        let tree = BinaryTree::new(Node::new(42));
        let mut cursor = tree.cursor();

        assert_eq!(cursor.peek(), Ok(42));
        assert_eq!(cursor.try_next(), Ok(42));
        assert!(!cursor.has_next());
        assert_eq!(cursor.try_next(), Err(TreeError::Exhausted));
        assert_eq!(cursor.try_next(), Err(TreeError::Exhausted));
    }

    #[test]
    fn test_has_next_does_not_advance() {
        let tree = fixtures::sample();
        let cursor = tree.cursor();

        for _ in 0..3 {
            assert!(cursor.has_next());
        }
        assert_eq!(cursor.peek(), Ok(5));
    }

    #[test]
    fn test_linked_stack_frontier_matches_vec() {
        let tree = fixtures::sample();

        let from_vec: Vec<i64> = tree.cursor().collect();
        let from_linked: Vec<i64> = tree.cursor_with(LinkedStack::new()).collect();

        assert_eq!(from_vec, from_linked);
        assert_eq!(from_vec, vec![5, 2, 1, 4, 8, -2, 6]);
    }

    #[test]
    fn test_next_node_exposes_live_handle() {
        let tree = fixtures::sample();
        let mut cursor = tree.cursor();

        let root = cursor.next_node().unwrap();

        assert!(root.ptr_eq(&tree.root().unwrap()));
    }
}
