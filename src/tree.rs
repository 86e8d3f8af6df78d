//! An unbalanced BST holding a set of keys. Nodes keep a link to their parent so that a
//! [`Cursor`] can find the next key without any help from the tree.
//!
//! No rebalancing is done, so inserting keys in sorted order builds a tree as tall as it has
//! keys. Every operation loops down (or up) the tree instead of recursing, so a tall tree costs
//! time but never stack.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Inserting a key that's already present does nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Erasing reports whether there was anything to erase.
//! assert!(tree.erase(&1));
//! assert!(!tree.erase(&1));
//! assert!(!tree.contains(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;

use log::trace;

use crate::arena::{Arena, Handle, Link, Node, Side};
use crate::cursor::{Cursor, Iter};

/// A set of keys stored in an unbalanced Binary Search Tree.
#[derive(Clone)]
pub struct Tree<K> {
    root: Link,
    nodes: Arena<K>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link::NONE,
            nodes: Arena::new(),
        }
    }

    /// Generates a new, empty `Tree` with room for `capacity` keys before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            root: Link::NONE,
            nodes: Arena::with_capacity(capacity),
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Removes every key. All cursors into the tree become stale.
    pub fn clear(&mut self) {
        self.root = Link::NONE;
        self.nodes.clear();
    }

    /// Inserts `key` into the tree. Returns `false`, leaving the tree untouched, if the key was
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(5));
    /// assert!(!tree.insert(5));
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let Some(mut current) = self.root.0 else {
            self.root = Link::to(self.nodes.alloc(Node::new(key, Link::NONE)));
            return true;
        };

        loop {
            let node = &self.nodes[current];
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return false,
                Ordering::Greater => Side::Right,
            };

            match node.child(side).0 {
                Some(child) => current = child,
                None => {
                    let new = self.nodes.alloc(Node::new(key, Link::to(current)));
                    *self.nodes[current].child_mut(side) = Link::to(new);

                    if cfg!(debug_assertions) {
                        self.assert_links(new);
                    }
                    return true;
                }
            }
        }
    }

    /// Whether `key` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find_handle(key).is_some()
    }

    /// A cursor pointing at `key`, or `None` if the tree doesn't contain it.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    ///
    /// let mut cursor = tree.find(&2).unwrap();
    /// cursor.advance(&tree).unwrap();
    /// assert_eq!(cursor.key(&tree), Ok(&3));
    ///
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<Cursor>
    where
        K: Ord,
    {
        self.find_handle(key).map(Cursor::at)
    }

    /// Erases `key` from the tree. Returns whether it was present; erasing a missing key does
    /// nothing.
    ///
    /// Only the node holding `key` is removed. Its subtrees are relinked in its place, so cursors
    /// to every other key stay valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.erase(&1));
    /// assert!(!tree.contains(&1));
    /// assert!(!tree.erase(&1));
    /// ```
    pub fn erase(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        self.take(key).is_some()
    }

    /// Erases `key` from the tree and hands back the stored key, or returns `None` if it wasn't
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(String::from("a"));
    ///
    /// assert_eq!(tree.take(&String::from("a")), Some(String::from("a")));
    /// assert_eq!(tree.take(&String::from("a")), None);
    /// ```
    pub fn take(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let erased = self.find_handle(key)?;
        let Node { left, right, .. } = self.nodes[erased];

        let replacement = match (left.0, right.0) {
            (None, None) => {
                trace!("erasing leaf {erased:?}");
                Link::NONE
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("erasing {erased:?}, promoting its only child {child:?}");
                Link::to(child)
            }
            (Some(_), Some(right_child)) => {
                // The in-order successor is the leftmost node of the right subtree. It has no left
                // child, so it can take over both of the erased node's subtrees.
                let successor = self.nodes.leftmost(right_child);
                trace!("erasing {erased:?}, splicing in its successor {successor:?}");

                if successor != right_child {
                    let successor_parent = self.nodes[successor]
                        .parent
                        .0
                        .expect("A node below the right child has a parent");
                    let orphan = self.nodes[successor].right;
                    self.nodes.attach(successor_parent, Side::Left, orphan);
                    self.nodes.attach(successor, Side::Right, right);
                }
                self.nodes.attach(successor, Side::Left, left);

                Link::to(successor)
            }
        };

        self.replace(erased, replacement);
        let node = self.nodes.free(erased);

        if cfg!(debug_assertions) {
            if let Some(replacement) = replacement.0 {
                self.assert_links(replacement);
            }
        }
        Some(node.key)
    }

    /// A cursor at the smallest key, or [`end`](Tree::end) if the tree is empty.
    pub fn begin(&self) -> Cursor {
        match self.root.0 {
            Some(root) => Cursor::at(self.nodes.leftmost(root)),
            None => Cursor::END,
        }
    }

    /// The past-the-end cursor. Advancing a cursor from the largest key lands here.
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// The smallest key in the tree.
    pub fn first(&self) -> Option<&K> {
        self.root
            .0
            .map(|root| &self.nodes[self.nodes.leftmost(root)].key)
    }

    /// The largest key in the tree.
    pub fn last(&self) -> Option<&K> {
        self.root
            .0
            .map(|root| &self.nodes[self.nodes.rightmost(root)].key)
    }

    /// The number of levels in the tree; 0 for an empty tree and 1 for a lone root.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// // Sorted input degenerates into a list.
    /// let tree: Tree<_> = (0..100).collect();
    /// assert_eq!(tree.height(), 100);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Handle, usize)> =
            self.root.0.map(|root| (root, 1)).into_iter().collect();
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[handle];
            for child in [node.left, node.right] {
                if let Some(child) = child.0 {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }

    /// An iterator over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    /// assert!(tree.iter().copied().eq([1, 3, 4, 5, 7, 8, 9]));
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.nodes, self.root)
    }

    pub(crate) fn nodes(&self) -> &Arena<K> {
        &self.nodes
    }

    fn find_handle(&self, key: &K) -> Option<Handle>
    where
        K: Ord,
    {
        let mut current = self.root.0;
        while let Some(handle) = current {
            let node = &self.nodes[handle];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.0,
                Ordering::Equal => return Some(handle),
                Ordering::Greater => node.right.0,
            };
        }
        None
    }

    /// Puts `new` in whichever slot holds `old`: one of its parent's child links or, for the root,
    /// the tree's own root link.
    fn replace(&mut self, old: Handle, new: Link) {
        match self.nodes.side_of(old) {
            Some(side) => {
                let parent = self.nodes[old].parent.0.expect("A non-root node has a parent");
                self.nodes.attach(parent, side, new);
            }
            None => {
                self.root = new;
                if let Some(new) = new.0 {
                    self.nodes[new].parent = Link::NONE;
                }
            }
        }
    }

    /// Checks that `handle` and its parent and children all agree on how they are linked, and
    /// that its children are ordered around it.
    fn assert_links(&self, handle: Handle)
    where
        K: Ord,
    {
        let node = &self.nodes[handle];
        if let Some(left) = node.left.0 {
            assert!(self.nodes[left].parent.is(handle));
            assert!(self.nodes[left].key < node.key);
        }
        if let Some(right) = node.right.0 {
            assert!(self.nodes[right].parent.is(handle));
            assert!(self.nodes[right].key > node.key);
        }
        match node.parent.0 {
            Some(parent) => {
                let parent = &self.nodes[parent];
                assert!(parent.left.is(handle) || parent.right.is(handle));
            }
            None => assert!(self.root.is(handle)),
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
