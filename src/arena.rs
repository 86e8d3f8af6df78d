//! The node store backing [`Tree`][crate::Tree].
//!
//! Every node lives in a slot of a single `Vec` owned by the tree. Children are referenced by
//! [`Handle`]s stored in their parent's `left`/`right` [`Link`]s, and each node keeps a `parent`
//! link pointing back up. Only the child links decide what is part of the tree; the parent link is
//! used to walk upwards and nothing else.
//!
//! A slot's generation is bumped whenever its node is released, so a [`Handle`] to a released node
//! never resolves again, even once the slot has been handed out to a new node. This is what lets
//! [`Cursor`][crate::Cursor] report a stale position instead of reading some other key.

use std::ops::{Index, IndexMut};

/// A reference to one occupancy of an arena slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    index: usize,
    generation: u32,
}

/// An optional edge between two nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Link(pub(crate) Option<Handle>);

impl Link {
    pub(crate) const NONE: Self = Link(None);

    pub(crate) fn to(handle: Handle) -> Self {
        Link(Some(handle))
    }

    pub(crate) fn is(self, handle: Handle) -> bool {
        self.0 == Some(handle)
    }
}

/// Which child slot of a parent a node hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K, parent: Link) -> Self {
        Self {
            key,
            left: Link::NONE,
            right: Link::NONE,
            parent,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot<K> {
    generation: u32,
    node: Option<Node<K>>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    /// Indices of slots whose node has been released.
    vacant: Vec<usize>,
    len: usize,
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            len: 0,
        }
    }

    /// The number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores `node`, reusing a vacant slot if there is one.
    pub(crate) fn alloc(&mut self, node: Node<K>) -> Handle {
        self.len += 1;
        match self.vacant.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                debug_assert!(slot.node.is_none(), "vacant slot {index} is occupied");
                slot.node = Some(node);
                Handle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                Handle {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Releases the node behind `handle`. Any copy of `handle` stops resolving.
    ///
    /// ## Panics
    ///
    /// When `handle` does not refer to a live node.
    pub(crate) fn free(&mut self, handle: Handle) -> Node<K> {
        let slot = &mut self.slots[handle.index];
        assert_eq!(slot.generation, handle.generation, "Freeing a stale handle");
        let node = slot.node.take().expect("Freeing a vacant slot");
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(handle.index);
        self.len -= 1;
        node
    }

    /// Resolves `handle`, or `None` if its node has been released.
    pub(crate) fn get(&self, handle: Handle) -> Option<&Node<K>> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, handle: Handle) -> Option<&mut Node<K>> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Releases every node. Existing handles all go stale.
    pub(crate) fn clear(&mut self) {
        self.vacant.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.vacant.push(index);
        }
        self.len = 0;
    }

    /// Hangs `child` from `parent`'s `side` slot and points `child` back at `parent`. Whatever
    /// `parent` held in that slot before is overwritten, so the caller must have relinked it.
    pub(crate) fn attach(&mut self, parent: Handle, side: Side, child: Link) {
        *self[parent].child_mut(side) = child;
        if let Some(child) = child.0 {
            self[child].parent = Link::to(parent);
        }
    }

    /// Which of its parent's slots `handle` hangs from, or `None` for a root.
    pub(crate) fn side_of(&self, handle: Handle) -> Option<Side> {
        let parent = self[handle].parent.0?;
        if self[parent].left.is(handle) {
            Some(Side::Left)
        } else {
            debug_assert!(self[parent].right.is(handle), "parent link is inconsistent");
            Some(Side::Right)
        }
    }

    /// The node holding the smallest key of the subtree rooted at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self[handle].left.0 {
            handle = left;
        }
        handle
    }

    /// The node holding the largest key of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self[handle].right.0 {
            handle = right;
        }
        handle
    }

    /// The in-order successor of `handle`, or [`Link::NONE`] if it holds the largest key.
    ///
    /// With a right subtree, the successor is that subtree's leftmost node. Otherwise we climb for
    /// as long as we are coming up from a right child; the first ancestor we reach from its left
    /// child is the successor. Only the shape of the tree is consulted, never the keys.
    pub(crate) fn successor(&self, handle: Handle) -> Link {
        if let Some(right) = self[handle].right.0 {
            return Link::to(self.leftmost(right));
        }

        let mut child = handle;
        while let Some(parent) = self[child].parent.0 {
            if self[parent].left.is(child) {
                return Link::to(parent);
            }
            child = parent;
        }
        Link::NONE
    }
}

impl<K> Default for Arena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Index<Handle> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, handle: Handle) -> &Node<K> {
        self.get(handle).expect("Tree links only point at live nodes")
    }
}

impl<K> IndexMut<Handle> for Arena<K> {
    fn index_mut(&mut self, handle: Handle) -> &mut Node<K> {
        self.get_mut(handle)
            .expect("Tree links only point at live nodes")
    }
}
