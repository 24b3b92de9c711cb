//! Domain layer: the binary tree core
//!
//! No I/O happens here: nodes, trees, cursors and traversals only.

pub mod cursor;
pub mod frontier;
pub mod node;
pub mod traversal;
pub mod tree;

pub use cursor::PreOrderCursor;
pub use frontier::{Frontier, LinkedStack};
pub use node::Node;
pub use traversal::TraversalOrder;
pub use tree::BinaryTree;
