use crate::avl::{Node, Tree};
use crate::error::Violation;

impl<K> Tree<K>
where
    K: Ord,
{
    /// Walks the whole tree and checks that keys are strictly ascending in order, that every
    /// stored height is `1 + max(left, right)`, that no node's subtrees differ in height by more
    /// than one, and that [`Tree::len`] matches the number of nodes.
    ///
    /// Every public operation leaves the tree valid, so this only fails if something is badly
    /// wrong. It's meant for tests and debugging.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree: Tree<_> = (0..1000).collect();
    /// for key in (0..1000).step_by(3) {
    ///     tree.delete(&key);
    /// }
    ///
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), Violation> {
        let mut walk = Walk {
            position: 0,
            previous: None,
        };
        walk.visit(self.root())?;

        if walk.position != self.len() {
            return Err(Violation::LenMismatch {
                reported: self.len(),
                counted: walk.position,
            });
        }
        Ok(())
    }
}

/// State carried through an in-order walk.
struct Walk<'a, K> {
    /// In-order index of the next node visited.
    position: usize,
    previous: Option<&'a K>,
}

impl<'a, K> Walk<'a, K>
where
    K: Ord,
{
    /// Checks the subtree under `node` and returns its real height.
    fn visit(&mut self, node: Option<&'a Node<K>>) -> Result<usize, Violation> {
        let Some(node) = node else {
            return Ok(0);
        };

        let left = self.visit(node.left())?;

        let position = self.position;
        if self.previous.map_or(false, |previous| previous >= node.key()) {
            return Err(Violation::Unordered { position });
        }
        self.previous = Some(node.key());
        self.position += 1;

        let right = self.visit(node.right())?;

        let expected = left.max(right) + 1;
        if node.height() != expected {
            return Err(Violation::HeightMismatch {
                position,
                stored: node.height(),
                expected,
            });
        }
        let balance = left as isize - right as isize;
        if balance.abs() > 1 {
            return Err(Violation::Unbalanced { position, balance });
        }

        Ok(expected)
    }
}
