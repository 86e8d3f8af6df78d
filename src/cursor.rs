//! Ways of walking a [`Tree`] in ascending key order.
//!
//! [`Iter`] borrows the tree, so the borrow checker rules out erasing anything while it is alive.
//! [`Cursor`] is a detached position instead: it can be held across mutations, and every read or
//! move checks whether the node it names is still part of the tree.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
//!
//! let mut cursor = tree.begin();
//! assert_eq!(cursor.key(&tree), Ok(&1));
//!
//! cursor.advance(&tree).unwrap();
//! assert_eq!(cursor.key(&tree), Ok(&2));
//!
//! // Erasing the key under the cursor leaves the cursor stale, not dangling.
//! tree.erase(&2);
//! assert_eq!(cursor.key(&tree), Err(Error::Stale));
//! assert_eq!(cursor.advance(&tree), Err(Error::Stale));
//! ```

use std::iter::FusedIterator;

use log::trace;

use crate::arena::{Arena, Handle, Link};
use crate::error::{Error, Result};
use crate::tree::Tree;

/// A position in a [`Tree`]: either at one of its nodes or past the end.
///
/// A `Cursor` does not borrow the tree, so the tree may be mutated while a cursor is held. Inserts
/// and erases of *other* keys never disturb it. Once the key it points at is erased the cursor is
/// stale, and [`key`](Cursor::key) and [`advance`](Cursor::advance) report [`Error::Stale`].
///
/// Two cursors are equal when they point at the same node or are both past the end. A cursor is
/// only meaningful for the tree that produced it (or a clone of that tree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor(Position);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Position {
    At(Handle),
    End,
}

impl Cursor {
    pub(crate) const END: Self = Cursor(Position::End);

    pub(crate) fn at(handle: Handle) -> Self {
        Cursor(Position::At(handle))
    }

    pub(crate) fn from_link(link: Link) -> Self {
        link.0.map_or(Self::END, Self::at)
    }

    /// Whether this is the past-the-end sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<i32> = Tree::new();
    /// assert!(tree.begin().is_end());
    /// ```
    pub fn is_end(&self) -> bool {
        self.0 == Position::End
    }

    /// Reads the key this cursor points at.
    ///
    /// # Errors
    ///
    /// [`Error::PastTheEnd`] for the sentinel, [`Error::Stale`] if the key has been erased.
    pub fn key<'t, K>(&self, tree: &'t Tree<K>) -> Result<&'t K> {
        let handle = self.handle(tree.nodes())?;
        Ok(&tree.nodes()[handle].key)
    }

    /// Moves to the next larger key, or past the end if this was the largest.
    ///
    /// # Errors
    ///
    /// [`Error::PastTheEnd`] for the sentinel, [`Error::Stale`] if the key has been erased. The
    /// cursor does not move in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let tree: Tree<_> = [1].into_iter().collect();
    /// let mut cursor = tree.begin();
    ///
    /// assert_eq!(cursor.advance(&tree), Ok(()));
    /// assert_eq!(cursor, tree.end());
    /// assert_eq!(cursor.advance(&tree), Err(Error::PastTheEnd));
    /// ```
    pub fn advance<K>(&mut self, tree: &Tree<K>) -> Result<()> {
        let handle = self.handle(tree.nodes())?;
        *self = Self::from_link(tree.nodes().successor(handle));
        Ok(())
    }

    fn handle<K>(&self, nodes: &Arena<K>) -> Result<Handle> {
        match self.0 {
            Position::End => {
                trace!("cursor used past the end");
                Err(Error::PastTheEnd)
            }
            Position::At(handle) if nodes.get(handle).is_some() => Ok(handle),
            Position::At(handle) => {
                trace!("stale cursor used: {handle:?}");
                Err(Error::Stale)
            }
        }
    }
}

/// An iterator over the keys of a [`Tree`] in ascending order. Created by [`Tree::iter`].
pub struct Iter<'a, K> {
    nodes: &'a Arena<K>,
    next: Link,
    remaining: usize,
}

/// Manual implementation of `Clone` so `K` doesn't have to be `Clone`.
impl<'a, K> Clone for Iter<'a, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<K>, root: Link) -> Self {
        Self {
            nodes,
            next: root.0.map_or(Link::NONE, |root| Link::to(nodes.leftmost(root))),
            remaining: nodes.len(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next.0?;
        self.next = self.nodes.successor(handle);
        self.remaining -= 1;
        Some(&self.nodes[handle].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> ExactSizeIterator for Iter<'a, K> {}

impl<'a, K> FusedIterator for Iter<'a, K> {}
