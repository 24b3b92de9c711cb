//! Last-in-first-out work lists for cursors.
//!
//! [`Frontier`] is the only contract a cursor needs from its pending-node
//! storage. `Vec` is the default implementation; [`LinkedStack`] is a
//! node-per-entry alternative with the same behaviour.

/// LIFO work list: the most recently pushed item is popped first.
pub trait Frontier<E> {
    fn push(&mut self, item: E);

    /// Removes the top item, `None` when empty.
    fn pop(&mut self) -> Option<E>;

    /// The top item without removing it, `None` when empty.
    fn peek(&self) -> Option<&E>;

    fn is_empty(&self) -> bool;
}

impl<E> Frontier<E> for Vec<E> {
    fn push(&mut self, item: E) {
        Vec::push(self, item);
    }

    fn pop(&mut self) -> Option<E> {
        Vec::pop(self)
    }

    fn peek(&self) -> Option<&E> {
        self.last()
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// Singly linked stack.
#[derive(Debug)]
pub struct LinkedStack<E> {
    head: Option<Box<Frame<E>>>,
}

#[derive(Debug)]
struct Frame<E> {
    item: E,
    below: Option<Box<Frame<E>>>,
}

impl<E> Default for LinkedStack<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> LinkedStack<E> {
    pub fn new() -> Self {
        Self { head: None }
    }
}

impl<E> Frontier<E> for LinkedStack<E> {
    fn push(&mut self, item: E) {
        let below = self.head.take();
        self.head = Some(Box::new(Frame { item, below }));
    }

    fn pop(&mut self) -> Option<E> {
        self.head.take().map(|frame| {
            let frame = *frame;
            self.head = frame.below;
            frame.item
        })
    }

    fn peek(&self) -> Option<&E> {
        self.head.as_deref().map(|frame| &frame.item)
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl<E> Drop for LinkedStack<E> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(mut frame) = current {
            current = frame.below.take();
        }
    }
}
