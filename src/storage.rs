//! Arena storage for heap nodes
//!
//! Nodes live in `slotmap` arenas and refer to each other by [`NodeId`]
//! (parent, child and ring neighbours are plain ids, never owning
//! references). The arena is the sole owner of every node, so tearing a heap
//! down never has to chase the cyclic sibling links to free memory.
//!
//! # Segments
//!
//! A heap owns one *primary* segment, where its own inserts go, plus any
//! segments it absorbed from heaps merged into it. A [`NodeId`] names the
//! segment and the slot inside it, so merging two heaps moves whole segments
//! and leaves every existing id (and therefore every handle) valid. Segment
//! ids are unique for the lifetime of the process, which also lets a heap
//! reject ids minted by an unrelated heap.

use std::mem;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

use index_ring::{CircularLink, RingLinks};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::rank::Rank;

new_key_type! {
    /// Slot key of a node inside one segment
    pub(crate) struct NodeKey;
}

/// Process-unique identifier of a storage segment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SegmentId(u64);

impl SegmentId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        SegmentId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable address of a node: segment plus slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId {
    segment: SegmentId,
    key: NodeKey,
}

/// One element of the heap and the root of its (possibly empty) subtree.
pub(crate) struct Node<T, P> {
    pub(crate) item: T,
    pub(crate) priority: P,
    /// Non-owning back link; `None` for roots
    pub(crate) parent: Option<NodeId>,
    /// Any member of the child ring
    pub(crate) child: Option<NodeId>,
    /// Sibling ring neighbours (`next` is "right", `prev` is "left")
    pub(crate) link: CircularLink<NodeId>,
    pub(crate) rank: Rank,
    pub(crate) marked: bool,
}

impl<T, P> Node<T, P> {
    /// A fresh root: no parent, no children, a ring of one.
    pub(crate) fn new(id: NodeId, priority: P, item: T) -> Self {
        Node {
            item,
            priority,
            parent: None,
            child: None,
            link: CircularLink::singleton(id),
            rank: 0,
            marked: false,
        }
    }
}

type Segment<T, P> = SlotMap<NodeKey, Node<T, P>>;

/// Segmented node arena owned by a single heap.
pub(crate) struct NodeStorage<T, P> {
    primary_id: SegmentId,
    primary: Segment<T, P>,
    /// Segments taken over from merged heaps; never empty
    absorbed: FxHashMap<SegmentId, Segment<T, P>>,
}

impl<T, P> Default for NodeStorage<T, P> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T, P> NodeStorage<T, P> {
    /// Empty storage whose primary segment holds `capacity` nodes without
    /// reallocating.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            primary_id: SegmentId::fresh(),
            primary: SlotMap::with_capacity_and_key(capacity),
            absorbed: FxHashMap::default(),
        }
    }

    /// Reserves room for `additional` more inserts in the primary segment.
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.primary.reserve(additional);
    }

    /// Inserts the primary segment can take before it reallocates.
    pub(crate) fn capacity(&self) -> usize {
        self.primary.capacity()
    }

    /// Stores a node built from its own id.
    pub(crate) fn insert_with(&mut self, make: impl FnOnce(NodeId) -> Node<T, P>) -> NodeId {
        let segment = self.primary_id;
        let key = self
            .primary
            .insert_with_key(|key| make(NodeId { segment, key }));
        NodeId { segment, key }
    }

    fn segment(&self, segment: SegmentId) -> Option<&Segment<T, P>> {
        if segment == self.primary_id {
            Some(&self.primary)
        } else {
            self.absorbed.get(&segment)
        }
    }

    fn segment_mut(&mut self, segment: SegmentId) -> Option<&mut Segment<T, P>> {
        if segment == self.primary_id {
            Some(&mut self.primary)
        } else {
            self.absorbed.get_mut(&segment)
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T, P>> {
        self.segment(id.segment)?.get(id.key)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T, P>> {
        self.segment_mut(id.segment)?.get_mut(id.key)
    }

    /// Takes a node out of the arena. Absorbed segments are dropped once
    /// their last node is gone.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node<T, P>> {
        if id.segment == self.primary_id {
            return self.primary.remove(id.key);
        }
        let segment = self.absorbed.get_mut(&id.segment)?;
        let node = segment.remove(id.key);
        if segment.is_empty() {
            self.absorbed.remove(&id.segment);
        }
        node
    }

    /// Takes ownership of every segment of `other`, leaving it empty with a
    /// fresh primary segment.
    pub(crate) fn absorb(&mut self, other: &mut Self) {
        let NodeStorage {
            primary_id,
            primary,
            absorbed,
        } = mem::take(other);
        if !primary.is_empty() {
            self.absorbed.insert(primary_id, primary);
        }
        self.absorbed.extend(absorbed);
    }

    /// Number of stored nodes. O(segments).
    pub(crate) fn len(&self) -> usize {
        self.primary.len() + self.absorbed.values().map(SlotMap::len).sum::<usize>()
    }

    #[cfg(test)]
    pub(crate) fn segment_count(&self) -> usize {
        1 + self.absorbed.len()
    }

    /// Drops every remaining node and absorbed segment.
    pub(crate) fn clear(&mut self) {
        self.primary.clear();
        self.absorbed.clear();
    }
}

impl<T, P> Index<NodeId> for NodeStorage<T, P> {
    type Output = Node<T, P>;

    fn index(&self, id: NodeId) -> &Node<T, P> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("{id:?} does not address a live node of this heap"),
        }
    }
}

impl<T, P> IndexMut<NodeId> for NodeStorage<T, P> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T, P> {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("{id:?} does not address a live node of this heap"),
        }
    }
}

impl<T, P> RingLinks<NodeId> for NodeStorage<T, P> {
    #[inline]
    fn next(&self, key: NodeId) -> NodeId {
        self[key].link.next
    }

    #[inline]
    fn prev(&self, key: NodeId) -> NodeId {
        self[key].link.prev
    }

    #[inline]
    fn set_next(&mut self, key: NodeId, next: NodeId) {
        self[key].link.next = next;
    }

    #[inline]
    fn set_prev(&mut self, key: NodeId, prev: NodeId) {
        self[key].link.prev = prev;
    }
}
