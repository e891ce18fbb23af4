//! This crate provides a generic tree ([`Node`]) whose nodes own their children through a storage policy picked
//! when the tree type is named: [`Unique`] (each child has one owner, handles are moved) or [`Shared`] (handles are
//! reference counted and can be cloned).
//!
//! Child slots are [`Handle`]s, which are either present or explicitly [`Absent`](Handle::Absent), so a binary
//! tree can say "no left child" without shifting its right child into the left position.
//!
//! Trees can be walked [breadth-first](BreadthFirst), [depth-first](DepthFirst) or [in order](InOrder), and are torn
//! down without recursion (see [`Node::remove_children`]), so neither traversal nor destruction is limited by the
//! depth of the tree.
//!
//! # Example
//! ```
//! use policy_tree::{Handle, Node, Unique};
//!
//! // Build the tree bottom-up
//! let tree: Handle<i32, Unique> = Node::create(2, vec![
//!     Node::create(1, vec![]),
//!     Node::create(3, vec![Handle::absent(), Node::leaf(4)]),
//! ]);
//! let root = tree.get().unwrap();
//!
//! let bfs: Vec<i32> = root.breadth_first().map(|node| *node.value()).collect();
//! assert_eq!(bfs, [2, 1, 3, 4]);
//!
//! let dfs: Vec<i32> = root.depth_first().map(|node| *node.value()).collect();
//! assert_eq!(dfs, [2, 1, 3, 4]);
//!
//! let in_order: Vec<i32> = root.in_order().map(|node| *node.value()).collect();
//! assert_eq!(in_order, [1, 2, 3, 4]);
//!
//! // Tear it down iteratively
//! tree.destroy();
//! ```

#[macro_use]
extern crate derive_destructure;

mod core;
mod error;
mod extra;
mod iter;
mod lines;
mod outline;
mod policy;

pub use crate::core::*;
pub use crate::error::*;
pub use crate::extra::*;
pub use crate::iter::*;
pub use crate::lines::*;
pub use crate::outline::*;
pub use crate::policy::*;
