//! The AVL engine. Every node owns its children through a `Box`, so rotations are moves of owned
//! links and nothing ever points back up the tree.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! // Ascending inserts would make a plain BST a linked list. Here they trigger a rotation.
//! assert!(tree.insert(1));
//! assert!(tree.insert(2));
//! assert!(tree.insert(3));
//! assert_eq!(tree.root().map(|root| *root.key()), Some(2));
//! assert_eq!(tree.height(), 2);
//!
//! // Inserting a key that's already there does nothing.
//! assert!(!tree.insert(2));
//! assert_eq!(tree.len(), 3);
//!
//! // Deleting a key that isn't there does nothing either.
//! assert!(tree.delete(&2));
//! assert!(!tree.delete(&2));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
//! ```

use std::alloc::{self, Layout};
use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::display::Sideways;
use crate::error::TreeError;
use crate::traverse::Iter;

/// An owning, possibly empty, link to a subtree.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// Height of the subtree behind `link`. An absent subtree has a height of 0.
pub(crate) fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Balance factor of the subtree behind `link`. An absent subtree has a balance factor of 0.
pub(crate) fn balance_factor<K>(link: &Link<K>) -> isize {
    link.as_deref().map_or(0, Node::balance_factor)
}

/// A self-balancing Binary Search Tree (specifically, an AVL tree) of unique keys.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree. An empty tree has height 0 and a single key has height 1.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// A read-only view of the root node, if there is one.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [9, 5, 10, 0, 6, 11, -1, 1, 2].into_iter().collect();
    /// let keys: Vec<_> = tree.iter().copied().collect();
    ///
    /// assert_eq!(keys, vec![-1, 0, 1, 2, 5, 6, 9, 10, 11]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Renders the tree sideways: the right subtree above, the left subtree below, and each key
    /// indented four spaces per level followed by its balance factor.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.sideways().to_string(), "    3 (0)\n2 (0)\n    1 (0)\n");
    /// ```
    pub fn sideways(&self) -> Sideways<'_, K> {
        Sideways::new(self.root.as_deref())
    }

    /// Releases every node, children before their parent, and returns how many were released.
    pub fn clear(&mut self) -> usize {
        let released = teardown(self.root.take());
        self.len = 0;
        debug!(released, "tore down tree");
        released
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Whether `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        self.root.as_deref().map(|root| &root.min_value_node().key)
    }

    /// Inserts `key`, rebalancing on the way back up. Returns `false` (and leaves the tree as it
    /// was) if the key was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(3));
    /// assert!(tree.insert(1));
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    ///
    /// // The left-right case puts the middle key on top.
    /// assert_eq!(tree.root().map(|root| *root.key()), Some(2));
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.attach(Node::leaf(key));
        true
    }

    /// Like [`Tree::insert`] but reports allocation failure instead of aborting. The new node is
    /// allocated before any link in the tree is touched, so on error the tree is unchanged.
    pub fn try_insert(&mut self, key: K) -> Result<bool, TreeError> {
        if self.contains(&key) {
            return Ok(false);
        }
        let leaf = Node::try_leaf(key)?;
        self.attach(leaf);
        Ok(true)
    }

    /// Deletes `key` from the tree. Returns `false` if it wasn't there, in which case the tree is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree: Tree<_> = [9, 5, 10, 0, 6, 11, -1, 1, 2].into_iter().collect();
    ///
    /// assert!(tree.delete(&10));
    /// assert!(tree.delete(&2));
    /// assert!(tree.delete(&5));
    /// assert!(!tree.delete(&42));
    ///
    /// let keys: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(keys, vec![-1, 0, 1, 6, 9, 11]);
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        let Some(root) = self.root.take() else {
            return false;
        };
        let (root, removed) = root.delete(key);
        self.root = root;
        if removed {
            self.len -= 1;
            debug!(len = self.len, height = self.height(), "deleted key");
        }
        removed
    }

    /// Hangs an already allocated leaf in the tree. The caller guarantees its key is new.
    fn attach(&mut self, leaf: Box<Node<K>>) {
        self.root = Some(match self.root.take() {
            Some(root) => root.insert(leaf),
            None => leaf,
        });
        self.len += 1;
        debug!(len = self.len, height = self.height(), "inserted key");
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Post-order release of a subtree. Returns the number of nodes released.
fn teardown<K>(link: Link<K>) -> usize {
    match link {
        None => 0,
        Some(mut node) => {
            let released = teardown(node.left.take()) + teardown(node.right.take());
            drop(node);
            released + 1
        }
    }
}

/// A single key and the subtrees on either side of it.
#[derive(Clone, Debug)]
pub struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Same as [`Node::leaf`] but hands allocation failure back to the caller.
    fn try_leaf(key: K) -> Result<Box<Self>, TreeError> {
        let layout = Layout::new::<Self>();
        // SAFETY: `Node` always holds a `usize` so the layout has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) }.cast::<Self>();
        if ptr.is_null() {
            return Err(TreeError::AllocationFailed {
                bytes: layout.size(),
            });
        }
        // SAFETY: `ptr` is non-null and was just allocated by the global allocator with the
        // layout of `Self`, which is exactly what `Box` deallocates with. Writing initializes it
        // before the `Box` can ever read or drop it.
        unsafe {
            ptr.write(Self {
                key,
                left: None,
                right: None,
                height: 1,
            });
            Ok(Box::from_raw(ptr))
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Height of the subtree rooted here. A leaf has height 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The height of the left subtree minus the height of the right subtree. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Follows left children to the smallest key of this subtree.
    fn min_value_node(&self) -> &Self {
        let mut current = self;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        current
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// Rotate self to the right. This moves the left child up vertically and self down
    /// vertically. Without a left child there is nothing to rotate and `self` comes back as is.
    ///
    /// # Diagram
    ///
    /// ```text
    ///         y                  x
    ///        / \                / \
    ///       x   c   rotate ->  a   y
    ///      / \                    / \
    ///     a   b                  b   c
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.left.take() else {
            return self;
        };
        self.left = pivot.right.take();
        self.fix_height();
        pivot.right = Some(self);
        pivot.fix_height();
        pivot
    }

    /// Mirror image of [`Node::rotate_right`]: the right child moves up.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.right.take() else {
            return self;
        };
        self.right = pivot.left.take();
        self.fix_height();
        pivot.left = Some(self);
        pivot.fix_height();
        pivot
    }

    /// After rebalancing, the node handed back upward must be consistent and balanced.
    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            let left_height = height(&self.left);
            let right_height = height(&self.right);
            assert_eq!(self.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
    }
}

impl<K> Node<K>
where
    K: Ord,
{
    /// Inserts `leaf` into this subtree and returns the new root of the subtree. A leaf whose key
    /// is already present is dropped and the subtree comes back untouched.
    fn insert(mut self: Box<Self>, leaf: Box<Self>) -> Box<Self> {
        // Which side of each child the new key falls on. A child's key can only change through a
        // rotation further down, and such a rotation keeps this node balanced.
        let beside_left = self.left.as_ref().map(|left| leaf.key.cmp(&left.key));
        let beside_right = self.right.as_ref().map(|right| leaf.key.cmp(&right.key));

        match leaf.key.cmp(&self.key) {
            Ordering::Less => {
                self.left = Some(match self.left.take() {
                    Some(left) => left.insert(leaf),
                    None => leaf,
                });
            }
            Ordering::Equal => return self,
            Ordering::Greater => {
                self.right = Some(match self.right.take() {
                    Some(right) => right.insert(leaf),
                    None => leaf,
                });
            }
        }

        self.fix_height();
        self.rebalance_after_insert(beside_left, beside_right)
    }

    /// Insert-side rebalancing. The case is picked from where the new key went relative to the
    /// heavy child, not from the child's own balance factor.
    fn rebalance_after_insert(
        mut self: Box<Self>,
        beside_left: Option<Ordering>,
        beside_right: Option<Ordering>,
    ) -> Box<Self> {
        let balance = self.balance_factor();
        let root = if balance > 1 && beside_left == Some(Ordering::Less) {
            trace!("insert: left-left, rotating right");
            self.rotate_right()
        } else if balance < -1 && beside_right == Some(Ordering::Greater) {
            trace!("insert: right-right, rotating left");
            self.rotate_left()
        } else if balance > 1 && beside_left == Some(Ordering::Greater) {
            trace!("insert: left-right, rotating left then right");
            self.left = self.left.take().map(Self::rotate_left);
            self.rotate_right()
        } else if balance < -1 && beside_right == Some(Ordering::Less) {
            trace!("insert: right-left, rotating right then left");
            self.right = self.right.take().map(Self::rotate_right);
            self.rotate_left()
        } else {
            self
        };

        root.debug_check();
        root
    }

    /// Deletes `key` from this subtree. Returns the new root of the subtree (`None` if it's now
    /// empty) and whether a node was removed.
    fn delete(mut self: Box<Self>, key: &K) -> (Link<K>, bool) {
        let removed = match key.cmp(&self.key) {
            Ordering::Less => match self.left.take() {
                Some(left) => {
                    let (left, removed) = left.delete(key);
                    self.left = left;
                    removed
                }
                None => false,
            },
            Ordering::Greater => match self.right.take() {
                Some(right) => {
                    let (right, removed) = right.delete(key);
                    self.right = right;
                    removed
                }
                None => false,
            },
            Ordering::Equal => match (self.left.take(), self.right.take()) {
                (None, None) => return (None, true),
                // The only child is already a valid AVL subtree so it simply takes our place.
                (Some(child), None) | (None, Some(child)) => return (Some(child), true),
                (Some(left), Some(right)) => {
                    // Our key is replaced by the in-order successor's and the successor's node
                    // is the one that leaves the tree.
                    let (right, successor) = right.take_min();
                    self.key = successor;
                    self.left = Some(left);
                    self.right = right;
                    true
                }
            },
        };

        self.fix_height();
        (Some(self.rebalance_after_delete()), removed)
    }

    /// Removes the smallest node of this subtree, rebalancing every level on the way back up
    /// exactly as deleting its key would. Returns the new subtree root and the removed key.
    fn take_min(mut self: Box<Self>) -> (Link<K>, K) {
        match self.left.take() {
            None => {
                let Self { key, right, .. } = *self;
                (right, key)
            }
            Some(left) => {
                let (left, min) = left.take_min();
                self.left = left;
                self.fix_height();
                (Some(self.rebalance_after_delete()), min)
            }
        }
    }

    /// Delete-side rebalancing. Deletion can shrink either side, so the case is picked from the
    /// heavy child's own balance factor. Runs at every level the deletion passes through.
    fn rebalance_after_delete(mut self: Box<Self>) -> Box<Self> {
        let balance = self.balance_factor();
        let left_balance = balance_factor(&self.left);
        let right_balance = balance_factor(&self.right);

        let root = if balance > 1 && left_balance >= 0 {
            trace!("delete: left-left, rotating right");
            self.rotate_right()
        } else if balance < -1 && right_balance <= 0 {
            trace!("delete: right-right, rotating left");
            self.rotate_left()
        } else if balance > 1 && left_balance < 0 {
            trace!("delete: left-right, rotating left then right");
            self.left = self.left.take().map(Self::rotate_left);
            self.rotate_right()
        } else if balance < -1 && right_balance > 0 {
            trace!("delete: right-left, rotating right then left");
            self.right = self.right.take().map(Self::rotate_right);
            self.rotate_left()
        } else {
            self
        };

        root.debug_check();
        root
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a set, checking after every single operation
    /// that both agree and that the tree is still a valid AVL tree.
    fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K>, set: &mut BTreeSet<K>) -> bool
    where
        K: Ord + Clone,
    {
        ops.iter().all(|op| {
            let agrees = match op {
                Op::Insert(k) => tree.insert(k.clone()) == set.insert(k.clone()),
                Op::Delete(k) => tree.delete(k) == set.remove(k),
                Op::Iter => tree.iter().eq(set.iter()),
            };
            agrees && tree.len() == set.len() && tree.validate().is_ok()
        })
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set) && tree.iter().eq(set.iter())
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();

            xs.iter().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn insert_then_delete_restores_keys(xs: Vec<i16>, x: i16) -> bool {
            let mut tree: Tree<_> = xs.into_iter().collect();
            if tree.contains(&x) {
                return true;
            }
            let before: Vec<_> = tree.iter().copied().collect();

            tree.insert(x);
            tree.delete(&x);

            tree.iter().copied().eq(before) && tree.validate().is_ok()
        }
    }
}
