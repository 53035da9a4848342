//! This crate is an AVL tree: a Binary Search Tree (BST) that rebalances
//! itself on every insert and delete, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a
//! BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` (where `height` is defined as the longest path
//! from the root `Node` to a leaf `Node`). BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the
//! right subtree.
//!
//! ## AVL
//!
//! Inserting keys in ascending order into a plain BST builds a linked list.
//! An AVL tree adds a third invariant:
//!
//! 3. For every `Node`, the heights of its two subtrees differ by at most one.
//!
//! After every insert or delete the tree walks back up the path it changed
//! and restores that invariant with rotations. The height of a tree with `n`
//! keys then never exceeds roughly `1.44 * lg(n + 2)`.
//!
//! ```
//! use avl::Tree;
//!
//! let tree: Tree<u32> = (0..1023).collect();
//!
//! assert_eq!(tree.len(), 1023);
//! assert_eq!(tree.height(), 10);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod display;
mod error;
pub mod traverse;
mod validate;

pub use crate::avl::{Node, Tree};
pub use crate::display::Sideways;
pub use crate::error::{TreeError, Violation};
pub use crate::traverse::Iter;
