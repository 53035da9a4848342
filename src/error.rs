use thiserror::Error;

/// Failures that can come out of a mutating [`Tree`](crate::Tree) operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The global allocator could not provide memory for a new node. The tree is left exactly as
    /// it was before the call.
    #[error("failed to allocate {bytes} bytes for a tree node")]
    AllocationFailed {
        /// Size of the node that couldn't be allocated.
        bytes: usize,
    },
}

/// A broken invariant found by [`Tree::validate`](crate::Tree::validate).
///
/// Positions are in-order indices, so `position: 0` is the smallest key in the tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The key at `position` is not strictly greater than the key before it.
    #[error("key at in-order position {position} is not greater than its predecessor")]
    Unordered {
        /// In-order index of the offending key.
        position: usize,
    },
    /// A node's stored height doesn't match the heights of its children.
    #[error("node at in-order position {position} stores height {stored} but should be {expected}")]
    HeightMismatch {
        /// In-order index of the offending node.
        position: usize,
        /// The height written on the node.
        stored: usize,
        /// `1 + max(left, right)`.
        expected: usize,
    },
    /// A node's subtrees differ in height by more than one.
    #[error("node at in-order position {position} has balance factor {balance}")]
    Unbalanced {
        /// In-order index of the offending node.
        position: usize,
        /// `height(left) - height(right)`.
        balance: isize,
    },
    /// The tree's key count disagrees with the number of nodes.
    #[error("tree reports {reported} keys but holds {counted} nodes")]
    LenMismatch {
        /// What `Tree::len` says.
        reported: usize,
        /// What a full walk found.
        counted: usize,
    },
}
