//! Sideways rendering of a tree for terminals. The right subtree is printed first and the left
//! subtree last, so tilting your head to the left shows the usual top-down picture.
//!
//! ```text
//!         11 (0)
//!     10 (-1)
//! 9 (1)
//!             6 (0)
//!         5 (0)
//!             2 (0)
//!     1 (0)
//!         0 (1)
//!             -1 (0)
//! ```

use std::fmt;

use crate::avl::Node;

/// Spaces of indentation per level of depth.
const INDENT: usize = 4;

/// A [`Display`](fmt::Display)able view of a [`Tree`](crate::Tree), created by
/// [`Tree::sideways`](crate::Tree::sideways). Each line is one key followed by its balance factor
/// in parentheses. An empty tree renders as an empty string.
#[derive(Debug)]
pub struct Sideways<'a, K> {
    root: Option<&'a Node<K>>,
}

impl<'a, K> Sideways<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self { root }
    }
}

impl<K> fmt::Display for Sideways<'_, K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_subtree(f, self.root, 0)
    }
}

fn write_subtree<K>(f: &mut fmt::Formatter<'_>, node: Option<&Node<K>>, level: usize) -> fmt::Result
where
    K: fmt::Display,
{
    let Some(node) = node else {
        return Ok(());
    };
    write_subtree(f, node.right(), level + 1)?;
    writeln!(
        f,
        "{:indent$}{} ({})",
        "",
        node.key(),
        node.balance_factor(),
        indent = level * INDENT
    )?;
    write_subtree(f, node.left(), level + 1)
}
