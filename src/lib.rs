//! This crate exposes an ordered set built on a plain, unbalanced Binary Search Tree (BST), along
//! with cursors that walk it in order.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). The [`Tree`] here makes no attempt to
//! keep its height near `O(lg N)`: keys inserted in sorted order produce a tree as
//! tall as it is big.
//!
//! ## In-order traversal
//!
//! Every `Node` also remembers its parent. That lets a [`Cursor`] step from a key to
//! the next larger one on its own: go right once and then all the way left, or, with
//! no right child, climb until we come up out of some `Node`'s left subtree.
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key);
//! }
//!
//! let mut keys = Vec::new();
//! let mut cursor = tree.begin();
//! while cursor != tree.end() {
//!     keys.push(*cursor.key(&tree).unwrap());
//!     cursor.advance(&tree).unwrap();
//! }
//! assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
//!
//! // Erasing a node with two children promotes its successor.
//! tree.erase(&5);
//! assert!(tree.iter().copied().eq([1, 3, 4, 7, 8, 9]));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
pub mod cursor;
pub mod error;
pub mod tree;


pub use cursor::{Cursor, Iter};
pub use error::{Error, Result};
pub use tree::Tree;
