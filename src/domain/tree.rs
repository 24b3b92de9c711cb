use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::domain::cursor::PreOrderCursor;
use crate::domain::frontier::Frontier;
use crate::domain::node::{Node, RootSlot};
use crate::errors::{TreeError, TreeResult};

/// Owner of a root [`Node`] and entry point for structural queries.
///
/// Queries never mutate the tree. Equality is structural: same shape and
/// equal payloads at every position, regardless of identity.
///
/// The root slot owns the root node the way a child slot owns a child:
/// attaching the root below some other node takes it out of the tree, which
/// is then empty. The root therefore never has a parent.
pub struct BinaryTree<T> {
    /// Root node, None for empty trees
    root: Rc<RootSlot<T>>,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> BinaryTree<T> {
    /// Creates a tree rooted at `root`, taking it from its previous owner
    /// (a parent node or another tree) so that the root never carries a
    /// parent link.
    pub fn new(root: Node<T>) -> Self {
        let slot = Rc::new(RefCell::new(None));
        if root.install_root(&slot) {
            debug!("took new root from its previous owner");
        }
        Self { root: slot }
    }

    pub fn empty() -> Self {
        Self {
            root: Rc::new(RefCell::new(None)),
        }
    }

    pub fn root(&self) -> Option<Node<T>> {
        self.root.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.root.borrow().is_none()
    }

    /// Number of nodes, 0 for an empty tree.
    #[instrument(level = "trace", skip(self))]
    pub fn size(&self) -> usize {
        self.root().map_or(0, |root| root.size())
    }

    /// Height of the root, None for an empty tree.
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self) -> Option<usize> {
        self.root().map(|root| root.height())
    }

    /// Counts the nodes without children. Returns 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn number_of_leaves(&self) -> usize {
        self.root().map_or(0, |root| root.leaf_count())
    }

    /// Counts the nodes at depth exactly `k`, the root being depth 0.
    ///
    /// Walks breadth-first one level at a time and stops as soon as level `k`
    /// is reached, so nodes below `k` are never visited. Returns 0 for an
    /// empty tree or when `k` exceeds the height.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidDepth`] if `k` is negative. The check happens
    /// before any traversal.
    #[instrument(level = "debug", skip(self))]
    pub fn count_depth_k(&self, k: i64) -> TreeResult<usize> {
        if k < 0 {
            return Err(TreeError::InvalidDepth(k));
        }
        let Some(root) = self.root() else {
            return Ok(0);
        };
        let target = usize::try_from(k).unwrap_or(usize::MAX);

        let mut level = VecDeque::from([root]);
        let mut depth = 0;
        while !level.is_empty() {
            if depth == target {
                return Ok(level.len());
            }
            for _ in 0..level.len() {
                if let Some(node) = level.pop_front() {
                    let (left, right) = node.children();
                    level.extend(left);
                    level.extend(right);
                }
            }
            depth += 1;
        }
        Ok(0)
    }

    /// Pre-order cursor over the live tree, backed by a `Vec` frontier.
    #[instrument(level = "trace", skip(self))]
    pub fn cursor(&self) -> PreOrderCursor<T> {
        PreOrderCursor::new(self.root())
    }

    /// Pre-order cursor using a caller-supplied frontier.
    pub fn cursor_with<S: Frontier<Node<T>>>(&self, frontier: S) -> PreOrderCursor<T, S> {
        PreOrderCursor::with_frontier(self.root(), frontier)
    }
}

impl<T: PartialEq> PartialEq for BinaryTree<T> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self.root(), other.root()) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => lhs.structurally_eq(&rhs),
            _ => false,
        }
    }
}

impl<T: Eq> Eq for BinaryTree<T> {}

impl<T: fmt::Debug> fmt::Debug for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTree")
            .field("size", &self.size())
            .field("root", &self.root())
            .finish()
    }
}
