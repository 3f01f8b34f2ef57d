//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert, find-min and union
//! - O(1) amortized decrease-key
//! - O(log n) amortized extract-min and remove
//!
//! The structure consists of a collection of heap-ordered trees. Roots are
//! linked in a circular doubly linked ring and the heap caches the root with
//! the smallest priority. Extract-min pays for the laziness of the other
//! operations: it joins roots of equal rank until no two roots share a rank,
//! which bounds the number of roots by the maximum rank.
//!
//! Nodes are stored in an arena owned by the heap (see `storage`) and link
//! to each other by id, so the cyclic sibling rings never own anything.
//!
//! The cut policy type parameter selects the classic algorithm
//! ([`Cascading`], the default) or the experimental [`Naive`] variant that
//! never cascades; see [`crate::policy`].

use std::fmt;

use index_ring::RingOps;
use log::{debug, trace};

use crate::error::{HeapError, IntegrityError};
use crate::observer::{HeapObserver, NoopObserver, Operation};
use crate::policy::{Cascading, CutPolicy, Mode, Naive, ParentAction};
use crate::rank::{bucket_capacity, checked_increment, saturating_decrement};
use crate::storage::{Node, NodeId, NodeStorage};

const RING: RingOps = RingOps::new();

/// Handle to an element in a Fibonacci heap
///
/// A handle stays valid until its element is extracted or removed, including
/// after the heap it came from was merged into another one (use it with the
/// surviving heap). Handles of removed elements and handles of unrelated heaps
/// are rejected with [`HeapError::InvalidHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    node: NodeId,
}

/// Outcome of [`FibonacciHeap::decrease`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decrease {
    /// The new priority was not lower; nothing changed
    Ignored,
    /// The priority was lowered without restructuring any tree
    Updated,
    /// The node was cut to the root ring; `cuts` counts it together with
    /// every ancestor cut by cascading
    Cut {
        /// Total number of cuts performed
        cuts: usize,
    },
}

/// An element taken out of the heap
///
/// The handle is returned for bookkeeping only: it no longer resolves in
/// any heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T, P> {
    /// Handle the element had while it was in the heap
    pub handle: FibonacciHandle,
    /// Priority at the time of removal
    pub priority: P,
    /// The payload
    pub item: T,
}

impl<T, P> Extracted<T, P> {
    /// Splits into `(priority, item)`.
    pub fn into_parts(self) -> (P, T) {
        (self.priority, self.item)
    }
}

/// Read-only view of one element and its position in the forest
pub struct NodeRef<'a, T, P> {
    id: NodeId,
    node: &'a Node<T, P>,
}

impl<T, P> Clone for NodeRef<'_, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, P> Copy for NodeRef<'_, T, P> {}

impl<'a, T, P> NodeRef<'a, T, P> {
    /// Handle of this element
    pub fn handle(&self) -> FibonacciHandle {
        FibonacciHandle { node: self.id }
    }

    /// Current priority
    pub fn priority(&self) -> &'a P {
        &self.node.priority
    }

    /// Associated payload
    pub fn payload(&self) -> &'a T {
        &self.node.item
    }

    /// Handle of the parent, `None` for roots
    pub fn parent(&self) -> Option<FibonacciHandle> {
        self.node.parent.map(|node| FibonacciHandle { node })
    }

    /// Returns true if the element sits in the root ring
    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// Number of direct children
    pub fn rank(&self) -> usize {
        self.node.rank as usize
    }

    /// Returns true if the element lost a child since it last became a child
    pub fn is_marked(&self) -> bool {
        self.node.marked
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for NodeRef<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("priority", &self.node.priority)
            .field("payload", &self.node.item)
            .field("rank", &self.node.rank)
            .field("marked", &self.node.marked)
            .field("root", &self.is_root())
            .finish()
    }
}

/// Fibonacci Heap
///
/// # Type Parameters
/// - `T`: payload type
/// - `P`: priority type, smaller is extracted first
/// - `C`: cut policy, [`Cascading`] (classic) or [`Naive`]
/// - `O`: observer notified of every structural step
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::fibonacci::{Decrease, FibonacciHeap};
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.insert(3, "other");
/// assert_eq!(heap.decrease(handle, 1).unwrap(), Decrease::Updated);
/// assert_eq!(heap.peek(), Some((&1, &"item")));
/// assert_eq!(heap.pop().unwrap(), Some((1, "item")));
/// ```
pub struct FibonacciHeap<T, P, C = Cascading, O = NoopObserver> {
    storage: NodeStorage<T, P>,
    min: Option<NodeId>,
    len: usize,
    policy: C,
    observer: O,
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates an empty classic heap without instrumentation.
    pub fn new() -> Self {
        Self::with_parts(Cascading, NoopObserver)
    }
}

impl<T, P: Ord> FibonacciHeap<T, P, Naive> {
    /// Creates an empty heap that never performs cascading cuts.
    pub fn naive() -> Self {
        Self::with_parts(Naive, NoopObserver)
    }
}

impl<T, P: Ord, C: CutPolicy> FibonacciHeap<T, P, C> {
    /// Creates an empty heap using `policy`.
    pub fn with_policy(policy: C) -> Self {
        Self::with_parts(policy, NoopObserver)
    }

    /// Creates an empty heap that takes `capacity` inserts before its arena
    /// reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut heap = Self::with_policy(C::default());
        heap.storage = NodeStorage::with_capacity(capacity);
        heap
    }
}

impl<T, P: Ord, O: HeapObserver> FibonacciHeap<T, P, Cascading, O> {
    /// Creates an empty classic heap reporting to `observer`.
    pub fn with_observer(observer: O) -> Self {
        Self::with_parts(Cascading, observer)
    }
}

impl<T, P: Ord, O: HeapObserver> FibonacciHeap<T, P, Naive, O> {
    /// Creates an empty naive heap reporting to `observer`.
    pub fn naive_with_observer(observer: O) -> Self {
        Self::with_parts(Naive, observer)
    }
}

impl<T, P: Ord, C: CutPolicy, O: HeapObserver> FibonacciHeap<T, P, C, O> {
    /// Creates an empty heap from a cut policy and an observer.
    pub fn with_parts(policy: C, observer: O) -> Self {
        Self {
            storage: NodeStorage::default(),
            min: None,
            len: 0,
            policy,
            observer,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of inserts the heap can take without reallocating its arena
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Reserves arena room for at least `additional` more inserts.
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }

    /// Cut policy variant of this heap
    pub fn mode(&self) -> Mode {
        C::MODE
    }

    /// The cut policy
    pub fn policy(&self) -> &C {
        &self.policy
    }

    /// The observer
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the observer, e.g. to reset counters between runs
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the heap, dropping every element, and returns the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Inserts an element, returning a handle for later decrease/remove.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, priority: P, item: T) -> FibonacciHandle {
        let id = self
            .storage
            .insert_with(|id| Node::new(id, priority, item));
        self.push_root(id);
        self.len += 1;
        FibonacciHandle { node: id }
    }

    /// Returns the element with the smallest priority.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn find_min(&self) -> Option<NodeRef<'_, T, P>> {
        self.min.map(|id| self.node_ref(id))
    }

    /// Returns the smallest priority and its payload without removing them.
    pub fn peek(&self) -> Option<(&P, &T)> {
        self.find_min().map(|node| (node.priority(), node.payload()))
    }

    /// Looks up a live element.
    pub fn get(&self, handle: FibonacciHandle) -> Option<NodeRef<'_, T, P>> {
        self.storage
            .get(handle.node)
            .map(|node| NodeRef { id: handle.node, node })
    }

    /// Returns true if `handle` refers to an element of this heap.
    pub fn contains(&self, handle: FibonacciHandle) -> bool {
        self.storage.get(handle.node).is_some()
    }

    /// Removes and returns the element with the smallest priority.
    ///
    /// Returns `Ok(None)` on an empty heap. An `Err` means the heap found its
    /// own structure corrupt and aborted.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<Option<Extracted<T, P>>, HeapError> {
        let Some(min) = self.min.take() else {
            return Ok(None);
        };

        let rest = RING.remove(&mut self.storage, min);

        // Orphan the children: they become roots.
        let children = self.storage[min].child.take();
        if let Some(child) = children {
            let observer = &mut self.observer;
            RING.for_each(&mut self.storage, child, |storage, id| {
                let node = &mut storage[id];
                node.parent = None;
                node.marked = false;
                observer.on_step(Operation::ExtractMin, false);
            });
        }
        let roots = RING.splice(&mut self.storage, rest, children);

        let node = self
            .storage
            .remove(min)
            .ok_or(IntegrityError::StaleMinimum)?;
        self.len -= 1;

        if let Some(start) = roots {
            self.consolidate(start)?;
            self.scan_min()?;
        }
        self.observer.on_step(Operation::ExtractMin, true);

        Ok(Some(Extracted {
            handle: FibonacciHandle { node: min },
            priority: node.priority,
            item: node.item,
        }))
    }

    /// Removes and returns the smallest `(priority, item)` pair.
    pub fn pop(&mut self) -> Result<Option<(P, T)>, HeapError> {
        Ok(self.extract_min()?.map(Extracted::into_parts))
    }

    /// Lowers the priority of an element.
    ///
    /// A `new_priority` that is not lower than the current one is ignored
    /// and reported as [`Decrease::Ignored`].
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the element is no longer in this heap.
    ///
    /// # Time Complexity
    /// O(1) amortized with [`Cascading`]; O(depth) with [`Naive`]
    pub fn decrease(
        &mut self,
        handle: FibonacciHandle,
        new_priority: P,
    ) -> Result<Decrease, HeapError> {
        let id = handle.node;
        let node = self.storage.get_mut(id).ok_or(HeapError::InvalidHandle)?;
        if new_priority >= node.priority {
            return Ok(Decrease::Ignored);
        }
        node.priority = new_priority;
        let parent = node.parent;

        let outcome = match parent {
            Some(parent) if self.storage[id].priority < self.storage[parent].priority => {
                Decrease::Cut {
                    cuts: self.cut_and_cascade(id, parent),
                }
            }
            _ => Decrease::Updated,
        };
        self.update_min(id);
        self.observer.on_step(Operation::Decrease, true);
        Ok(outcome)
    }

    /// Moves every element of `other` into this heap, leaving `other` empty.
    ///
    /// Handles issued by `other` remain valid and now refer to elements of
    /// `self`.
    ///
    /// # Time Complexity
    /// O(1) (proportional to the number of heaps previously merged into
    /// `other`, independent of its size)
    pub fn union<O2: HeapObserver>(&mut self, other: &mut FibonacciHeap<T, P, C, O2>) {
        let Some(other_min) = other.min.take() else {
            return;
        };
        self.storage.absorb(&mut other.storage);
        self.len += std::mem::take(&mut other.len);

        match self.min {
            None => self.min = Some(other_min),
            Some(min) => {
                RING.splice(&mut self.storage, Some(min), Some(other_min));
                if self.storage[other_min].priority < self.storage[min].priority {
                    self.min = Some(other_min);
                }
            }
        }
    }

    /// Consuming form of [`union`](FibonacciHeap::union).
    pub fn merge<O2: HeapObserver>(&mut self, mut other: FibonacciHeap<T, P, C, O2>) {
        self.union(&mut other);
    }

    /// Removes an arbitrary element.
    ///
    /// Behaves as decreasing the element to a priority below every other one
    /// followed by [`extract_min`](FibonacciHeap::extract_min); no sentinel
    /// priority value is needed.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the element is no longer in this heap.
    pub fn remove_node(&mut self, handle: FibonacciHandle) -> Result<Extracted<T, P>, HeapError> {
        let id = handle.node;
        let parent = self
            .storage
            .get(id)
            .ok_or(HeapError::InvalidHandle)?
            .parent;
        if let Some(parent) = parent {
            self.cut_and_cascade(id, parent);
        }
        self.min = Some(id);
        self.observer.on_step(Operation::Decrease, true);

        self.extract_min()?
            .ok_or_else(|| IntegrityError::StaleMinimum.into())
    }

    /// Drops every element.
    ///
    /// Walks the forest with an explicit worklist of sibling rings, releasing
    /// each node exactly once.
    pub fn clear(&mut self) {
        let mut pending: Vec<NodeId> = self.min.take().into_iter().collect();
        let mut released = 0usize;
        while let Some(start) = pending.pop() {
            for id in RING.collect(&self.storage, start) {
                if let Some(node) = self.storage.remove(id) {
                    pending.extend(node.child);
                    released += 1;
                }
            }
        }
        debug_assert_eq!(released, self.len, "teardown missed nodes");
        self.len = 0;
        self.storage.clear();
    }

    /// Iterates over `(priority, item)` of every element, in no particular
    /// order.
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter {
            storage: &self.storage,
            pending: self.min.into_iter().collect(),
            ring: Default::default(),
            remaining: self.len,
        }
    }

    /// The roots of the forest, starting with the minimum.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_, T, P>> + '_ {
        self.min
            .map(|min| RING.collect(&self.storage, min))
            .unwrap_or_default()
            .into_iter()
            .map(move |id| self.node_ref(id))
    }

    /// The direct children of an element.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the element is no longer in this heap.
    pub fn children(
        &self,
        handle: FibonacciHandle,
    ) -> Result<impl Iterator<Item = NodeRef<'_, T, P>> + '_, HeapError> {
        let node = self.storage.get(handle.node).ok_or(HeapError::InvalidHandle)?;
        Ok(node
            .child
            .map(|child| RING.collect(&self.storage, child))
            .unwrap_or_default()
            .into_iter()
            .map(move |id| self.node_ref(id)))
    }

    /// Audits the whole structure.
    ///
    /// Verifies ring integrity, parent links, ranks, heap order, that roots
    /// are unmarked, that the cached minimum is minimal and that the element
    /// count matches. O(n); meant for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), HeapError> {
        let Some(min) = self.min else {
            let found = self.storage.len();
            if self.len != 0 || found != 0 {
                return Err(IntegrityError::CountMismatch {
                    expected: self.len,
                    found,
                }
                .into());
            }
            return Ok(());
        };
        let min_node = self.storage.get(min).ok_or(IntegrityError::StaleMinimum)?;

        let mut found = 0usize;
        let mut pending: Vec<(NodeId, Option<NodeId>)> = vec![(min, None)];
        while let Some((start, parent)) = pending.pop() {
            let ring_len = RING
                .check(&self.storage, start, self.len)
                .map_err(|_| IntegrityError::BrokenRing)?;
            if let Some(parent) = parent {
                let rank = self.storage[parent].rank as usize;
                if rank != ring_len {
                    return Err(IntegrityError::RankMismatch {
                        rank,
                        children: ring_len,
                    }
                    .into());
                }
            }

            for id in RING.collect(&self.storage, start) {
                let node = &self.storage[id];
                found += 1;
                if node.parent != parent {
                    return Err(IntegrityError::ParentMismatch.into());
                }
                match parent {
                    None if node.marked => return Err(IntegrityError::MarkedRoot.into()),
                    None if node.priority < min_node.priority => {
                        return Err(IntegrityError::StaleMinimum.into())
                    }
                    Some(parent) if node.priority < self.storage[parent].priority => {
                        return Err(IntegrityError::HeapOrder.into())
                    }
                    _ => {}
                }
                match node.child {
                    Some(child) => pending.push((child, Some(id))),
                    None if node.rank != 0 => {
                        return Err(IntegrityError::RankMismatch {
                            rank: node.rank as usize,
                            children: 0,
                        }
                        .into())
                    }
                    None => {}
                }
            }
        }

        let stored = self.storage.len();
        if found != self.len || stored != self.len {
            return Err(IntegrityError::CountMismatch {
                expected: self.len,
                found: found.max(stored),
            }
            .into());
        }
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn node_ref(&self, id: NodeId) -> NodeRef<'_, T, P> {
        NodeRef {
            id,
            node: &self.storage[id],
        }
    }

    /// Splices a root (or a detached tree) into the root ring and updates
    /// the cached minimum.
    fn push_root(&mut self, id: NodeId) {
        match self.min {
            None => self.min = Some(id),
            Some(min) => {
                RING.splice(&mut self.storage, Some(min), Some(id));
                if self.storage[id].priority < self.storage[min].priority {
                    self.min = Some(id);
                }
            }
        }
    }

    fn update_min(&mut self, id: NodeId) {
        if self.storage[id].parent.is_some() {
            return;
        }
        match self.min {
            Some(min) if self.storage[min].priority <= self.storage[id].priority => {}
            _ => self.min = Some(id),
        }
    }

    /// Joins the roots ring starting at `start` until all ranks differ,
    /// leaving the surviving trees in a new root ring.
    fn consolidate(&mut self, start: NodeId) -> Result<(), IntegrityError> {
        let roots = RING.collect(&self.storage, start);
        let mut buckets: Vec<Option<NodeId>> = vec![None; bucket_capacity(self.len)];
        let mut joins = 0usize;

        for root in &roots {
            RING.make_singleton(&mut self.storage, *root);
            let mut tree = *root;
            loop {
                let rank = self.storage[tree].rank as usize;
                if rank >= buckets.len() {
                    if rank >= self.len {
                        return Err(IntegrityError::RankOverflow {
                            rank,
                            len: self.len,
                        });
                    }
                    buckets.resize(rank + 1, None);
                }
                match buckets[rank].take() {
                    None => {
                        buckets[rank] = Some(tree);
                        break;
                    }
                    Some(other) => {
                        tree = self.join(tree, other)?;
                        joins += 1;
                        self.observer.on_step(Operation::ExtractMin, false);
                    }
                }
            }
        }

        let mut ring = None;
        for root in buckets.into_iter().flatten() {
            debug_assert!(self.storage[root].parent.is_none(), "root has a parent");
            debug_assert!(!self.storage[root].marked, "root is marked");
            ring = RING.splice(&mut self.storage, ring, Some(root));
        }
        self.min = ring;

        debug!(
            "consolidated {} roots into {} trees with {} joins ({} elements)",
            roots.len(),
            roots.len() - joins,
            joins,
            self.len
        );
        Ok(())
    }

    /// Links two roots of equal rank; the larger priority becomes a child
    /// of the other. Returns the surviving root.
    fn join(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, IntegrityError> {
        let (winner, loser) = if self.storage[b].priority < self.storage[a].priority {
            (b, a)
        } else {
            (a, b)
        };

        let node = &mut self.storage[loser];
        node.parent = Some(winner);
        node.marked = false;

        let child = self.storage[winner].child;
        let children = RING.splice(&mut self.storage, child, Some(loser));
        let len = self.len;
        let node = &mut self.storage[winner];
        node.child = children;
        node.rank = checked_increment(node.rank, len)?;
        trace!("joined {loser:?} under {winner:?}, rank now {}", node.rank);
        Ok(winner)
    }

    /// Linear scan of the root ring for the smallest priority.
    fn scan_min(&mut self) -> Result<(), IntegrityError> {
        let start = self.min.ok_or(IntegrityError::StaleMinimum)?;
        let mut best = start;
        for id in RING.collect(&self.storage, start) {
            self.observer.on_step(Operation::ExtractMin, false);
            if self.storage[id].priority < self.storage[best].priority {
                best = id;
            }
        }
        self.min = Some(best);
        Ok(())
    }

    /// Cuts `node` away from `parent` and keeps cutting upwards as long as
    /// the policy asks for it. Returns the number of cuts.
    fn cut_and_cascade(&mut self, mut node: NodeId, mut parent: NodeId) -> usize {
        let mut cuts = 0;
        loop {
            self.cut(node, parent);
            cuts += 1;
            self.observer.on_step(Operation::Decrease, false);

            let Some(grandparent) = self.storage[parent].parent else {
                break;
            };
            match self.policy.on_child_cut(self.storage[parent].marked) {
                ParentAction::Mark => {
                    self.storage[parent].marked = true;
                    break;
                }
                ParentAction::Cut => {
                    node = parent;
                    parent = grandparent;
                }
            }
        }
        if cuts > 1 {
            trace!("cascading cut: {cuts} cuts");
        }
        cuts
    }

    /// Detaches `node` with its subtree from `parent` and makes it a root.
    fn cut(&mut self, node: NodeId, parent: NodeId) {
        let remaining = RING.remove(&mut self.storage, node);
        debug_assert!(RING.is_singleton(&self.storage, node));
        let p = &mut self.storage[parent];
        if p.child == Some(node) {
            p.child = remaining;
        }
        p.rank = saturating_decrement(p.rank);
        debug_assert_eq!(p.child.is_none(), p.rank == 0, "rank out of sync with child ring");

        let n = &mut self.storage[node];
        n.parent = None;
        n.marked = false;

        // The heap is not empty while a node is being cut, so this only
        // splices; the caller decides about the minimum.
        if let Some(min) = self.min {
            RING.splice(&mut self.storage, Some(min), Some(node));
        }
    }
}

impl<T, P: Ord, C: CutPolicy, O: HeapObserver + Default> Default for FibonacciHeap<T, P, C, O> {
    fn default() -> Self {
        Self::with_parts(C::default(), O::default())
    }
}

impl<T, P, C: CutPolicy, O> fmt::Debug for FibonacciHeap<T, P, C, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("mode", &C::MODE)
            .finish_non_exhaustive()
    }
}

impl<T, P: Ord, C: CutPolicy, O: HeapObserver> Extend<(P, T)> for FibonacciHeap<T, P, C, O> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (priority, item) in iter {
            self.insert(priority, item);
        }
    }
}

impl<T, P: Ord, C: CutPolicy, O: HeapObserver + Default> FromIterator<(P, T)>
    for FibonacciHeap<T, P, C, O>
{
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}

/// Iterator over the elements of a [`FibonacciHeap`], see
/// [`FibonacciHeap::iter`]
pub struct Iter<'a, T, P> {
    storage: &'a NodeStorage<T, P>,
    /// Rings not visited yet
    pending: Vec<NodeId>,
    /// Members of the ring being visited
    ring: index_ring::RingSnapshot<NodeId>,
    remaining: usize,
}

impl<'a, T, P> Iterator for Iter<'a, T, P> {
    type Item = (&'a P, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.ring.pop() {
                let node = &self.storage[id];
                self.pending.extend(node.child);
                self.remaining -= 1;
                return Some((&node.priority, &node.item));
            }
            let start = self.pending.pop()?;
            self.ring = RING.collect(self.storage, start);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, P> ExactSizeIterator for Iter<'_, T, P> {}
