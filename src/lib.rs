//! Binary tree with structural queries and a pre-order cursor that keeps
//! working while the caller edits nodes it has not reached yet.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod exitcode;
pub mod fixtures;
pub mod tree_traits;
pub mod util;

pub use domain::{BinaryTree, Frontier, LinkedStack, Node, PreOrderCursor, TraversalOrder};
pub use errors::{TreeError, TreeResult};
