//! Tree vertices.
//!
//! A [`Node`] is a cheap handle to a vertex stored behind `Rc<RefCell<..>>`.
//! Children are owned through strong links, the parent through a `Weak`
//! back-link, so ownership only ever runs parent → child and no reference
//! cycle can form through the parent pointer.
//!
//! Every vertex has at most one owner: a parent's child slot or the root slot
//! of a [`BinaryTree`](crate::domain::BinaryTree). Attaching a vertex anywhere
//! takes it away from its previous owner first.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{instrument, trace};

use crate::errors::{TreeError, TreeResult};

type Link<T> = Rc<RefCell<NodeInner<T>>>;

/// Root slot of a tree, shared with the root node through a `Weak` link.
pub(crate) type RootSlot<T> = RefCell<Option<Node<T>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

enum Owner<T> {
    None,
    Node(Weak<RefCell<NodeInner<T>>>),
    Tree(Weak<RootSlot<T>>),
}

struct NodeInner<T> {
    data: T,
    left: Option<Node<T>>,
    right: Option<Node<T>>,
    owner: Owner<T>,
}

impl<T> NodeInner<T> {
    fn slot_mut(&mut self, side: Side) -> &mut Option<Node<T>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl<T> Drop for NodeInner<T> {
    fn drop(&mut self) {
        // Unlink iteratively so that dropping a long chain does not recurse
        // once per level.
        let mut pending: Vec<Link<T>> = Vec::new();
        pending.extend(self.left.take().map(|node| node.0));
        pending.extend(self.right.take().map(|node| node.0));

        while let Some(link) = pending.pop() {
            // Subtrees still referenced from elsewhere (a cursor, a caller's
            // handle) stay alive; only the last owner tears them down.
            if let Ok(cell) = Rc::try_unwrap(link) {
                let mut inner = cell.into_inner();
                pending.extend(inner.left.take().map(|node| node.0));
                pending.extend(inner.right.take().map(|node| node.0));
            }
        }
    }
}

/// Handle to one vertex of a binary tree.
///
/// Cloning a `Node` clones the handle, never the vertex: every clone observes
/// and performs mutations on the same vertex.
pub struct Node<T>(Link<T>);

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Node(Rc::clone(&self.0))
    }
}

impl<T> Node<T> {
    pub fn new(data: T) -> Self {
        Node(Rc::new(RefCell::new(NodeInner {
            data,
            left: None,
            right: None,
            owner: Owner::None,
        })))
    }

    /// Creates a node and attaches the given children to it.
    ///
    /// Children are re-parented to the new node; a child still owned by
    /// another node is detached from that owner first.
    pub fn with_children(data: T, left: Option<Node<T>>, right: Option<Node<T>>) -> Self {
        let node = Self::new(data);
        // a fresh node has no ancestors, so neither child can close a cycle
        node.place(Side::Left, left);
        node.place(Side::Right, right);
        node
    }

    pub fn data(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().data.clone()
    }

    /// Runs `f` against the payload without cloning it.
    ///
    /// `f` must not mutate this same node.
    pub fn with_data<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().data)
    }

    /// Replaces the payload, returning the previous one.
    pub fn set_data(&self, data: T) -> T {
        std::mem::replace(&mut self.0.borrow_mut().data, data)
    }

    pub fn left_child(&self) -> Option<Node<T>> {
        self.0.borrow().left.clone()
    }

    pub fn right_child(&self) -> Option<Node<T>> {
        self.0.borrow().right.clone()
    }

    /// Both children, read under a single borrow.
    pub(crate) fn children(&self) -> (Option<Node<T>>, Option<Node<T>>) {
        let inner = self.0.borrow();
        (inner.left.clone(), inner.right.clone())
    }

    pub fn parent(&self) -> Option<Node<T>> {
        match &self.0.borrow().owner {
            Owner::Node(parent) => parent.upgrade().map(Node),
            Owner::Tree(_) | Owner::None => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        let inner = self.0.borrow();
        inner.left.is_none() && inner.right.is_none()
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Identity comparison: true if both handles point at the same vertex.
    pub fn ptr_eq(&self, other: &Node<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Replaces the left child slot and returns the subtree it held.
    ///
    /// The new child's parent link is set to `self`. If the new child is
    /// currently owned by another slot it is detached from there first. The
    /// returned subtree has its parent link cleared.
    ///
    /// # Errors
    ///
    /// [`TreeError::WouldCycle`] if `child` is `self` or one of its
    /// ancestors. Nothing is modified in that case.
    #[instrument(level = "trace", skip_all)]
    pub fn set_left_child(&self, child: Option<Node<T>>) -> TreeResult<Option<Node<T>>> {
        self.attach(Side::Left, child)
    }

    /// Right-hand counterpart of [`Node::set_left_child`].
    #[instrument(level = "trace", skip_all)]
    pub fn set_right_child(&self, child: Option<Node<T>>) -> TreeResult<Option<Node<T>>> {
        self.attach(Side::Right, child)
    }

    /// Removes this node from whatever owns it: a parent's child slot or a
    /// tree's root slot. A tree that loses its root becomes empty.
    ///
    /// Returns `false` if nothing owned the node.
    pub fn detach(&self) -> bool {
        let owner = std::mem::replace(&mut self.0.borrow_mut().owner, Owner::None);
        match owner {
            Owner::Node(parent) => {
                let Some(parent) = parent.upgrade() else {
                    return false;
                };
                let mut inner = parent.borrow_mut();
                if inner.left.as_ref().is_some_and(|n| n.ptr_eq(self)) {
                    inner.left = None;
                } else if inner.right.as_ref().is_some_and(|n| n.ptr_eq(self)) {
                    inner.right = None;
                }
                true
            }
            Owner::Tree(slot) => {
                let Some(slot) = slot.upgrade() else {
                    return false;
                };
                let mut root = slot.borrow_mut();
                if root.as_ref().is_some_and(|n| n.ptr_eq(self)) {
                    *root = None;
                    trace!("tree gave up its root");
                }
                true
            }
            Owner::None => false,
        }
    }

    /// Moves this node into `slot`, taking it from its previous owner.
    ///
    /// Returns `true` if the node had an owner before.
    pub(crate) fn install_root(&self, slot: &Rc<RootSlot<T>>) -> bool {
        let moved = self.detach();
        self.0.borrow_mut().owner = Owner::Tree(Rc::downgrade(slot));
        *slot.borrow_mut() = Some(self.clone());
        moved
    }

    fn attach(&self, side: Side, child: Option<Node<T>>) -> TreeResult<Option<Node<T>>> {
        if let Some(child) = &child {
            if self.is_within(child) {
                return Err(TreeError::WouldCycle);
            }
        }
        Ok(self.place(side, child))
    }

    /// True if `self` is `ancestor` or lies somewhere below it.
    fn is_within(&self, ancestor: &Node<T>) -> bool {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if node.ptr_eq(ancestor) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn place(&self, side: Side, child: Option<Node<T>>) -> Option<Node<T>> {
        if let Some(child) = &child {
            child.detach();
        }
        let previous = self.0.borrow_mut().slot_mut(side).take();
        if let Some(previous) = &previous {
            previous.0.borrow_mut().owner = Owner::None;
            trace!(?side, "detached previous child");
        }
        if let Some(child) = &child {
            child.0.borrow_mut().owner = Owner::Node(Rc::downgrade(&self.0));
        }
        *self.0.borrow_mut().slot_mut(side) = child;
        previous
    }

    /// Number of nodes in the subtree rooted here.
    #[instrument(level = "trace", skip_all)]
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            count += 1;
            let (left, right) = node.children();
            stack.extend(left);
            stack.extend(right);
        }
        count
    }

    /// Edges on the longest downward path; a leaf has height 0.
    #[instrument(level = "trace", skip_all)]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.clone(), 0usize)];
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            let (left, right) = node.children();
            for child in [left, right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    /// Height of a possibly absent subtree: −1 when absent, so that
    /// `1 + max(left, right)` gives 0 for a leaf.
    pub fn height_of(node: Option<&Node<T>>) -> i64 {
        node.map_or(-1, |node| node.height() as i64)
    }

    /// Number of childless nodes in the subtree rooted here.
    #[instrument(level = "trace", skip_all)]
    pub fn leaf_count(&self) -> usize {
        let mut leaves = 0;
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            match node.children() {
                (None, None) => leaves += 1,
                (left, right) => {
                    stack.extend(left);
                    stack.extend(right);
                }
            }
        }
        leaves
    }

    /// Handles of the subtree's nodes in pre-order.
    pub fn pre_order(&self) -> Vec<Node<T>> {
        let mut nodes = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            let (left, right) = node.children();
            stack.extend(right);
            stack.extend(left);
            nodes.push(node);
        }
        nodes
    }

    /// Same shape and equal payloads at every position. Parent links are
    /// not compared.
    pub fn structurally_eq(&self, other: &Node<T>) -> bool
    where
        T: PartialEq,
    {
        let mut pending = vec![(self.clone(), other.clone())];
        while let Some((lhs, rhs)) = pending.pop() {
            if lhs.ptr_eq(&rhs) {
                continue;
            }
            let l = lhs.0.borrow();
            let r = rhs.0.borrow();
            if l.data != r.data {
                return false;
            }
            for (a, b) in [(&l.left, &r.left), (&l.right, &r.right)] {
                match (a, b) {
                    (None, None) => {}
                    (Some(a), Some(b)) => pending.push((a.clone(), b.clone())),
                    _ => return false,
                }
            }
        }
        true
    }
}

/// Payload of a child, shown in place of the whole subtree.
struct ChildPayload<'a, T>(&'a Node<T>);

impl<T: fmt::Debug> fmt::Debug for ChildPayload<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 .0.try_borrow() {
            Ok(inner) => fmt::Debug::fmt(&inner.data, f),
            Err(_) => f.write_str("<borrowed>"),
        }
    }
}

/// Shows the payload and the payloads of the direct children only, so that
/// formatting never recurses into deep subtrees.
impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(inner) => f
                .debug_struct("Node")
                .field("data", &inner.data)
                .field("left", &inner.left.as_ref().map(ChildPayload))
                .field("right", &inner.right.as_ref().map(ChildPayload))
                .finish(),
            Err(_) => f.write_str("Node(<borrowed>)"),
        }
    }
}
