//! Per-kind scrap storage and the active window
//!
//! Two-level storage behind the recycle bin. Scrap bags are per-kind LIFO
//! stacks of detached views waiting for reuse. The active window is a
//! position-indexed snapshot of the views that were on screen when a
//! layout pass started, so a pass that keeps a position keeps its exact
//! view without touching scrap. The backing array for the active window
//! never shrinks between passes.

use flywheel_core::ViewId;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::row::RowKind;

/// Scrap bags keyed by kind plus the active-window snapshot
#[derive(Debug, Default)]
pub struct ViewKindSlots {
    /// Slot `i` holds the view snapshotted for position `first_active_position + i`
    active: Vec<Option<(ViewId, RowKind)>>,
    /// Count of live slots; `active` may be longer from earlier passes
    active_len: usize,
    first_active_position: usize,
    bags: Vec<SmallVec<[ViewId; 8]>>,
}

impl ViewKindSlots {
    pub fn new(kind_count: usize) -> Self {
        let mut slots = Self::default();
        slots.configure_kinds(kind_count);
        slots
    }

    /// Rebuild the bag array for `kind_count` kinds.
    ///
    /// Panics if `kind_count` is zero. Callers must drain or dispose
    /// existing scrap first; any held views are dropped untracked.
    pub fn configure_kinds(&mut self, kind_count: usize) {
        assert!(kind_count >= 1, "kind count must be at least 1");
        self.bags = vec![SmallVec::new(); kind_count];
    }

    pub fn kind_count(&self) -> usize {
        self.bags.len()
    }

    /// Load the on-screen views into the active window for a layout pass
    pub fn snapshot_active(&mut self, on_screen: &[(ViewId, RowKind)], first_position: usize) {
        debug_assert!(
            all_distinct(on_screen.iter().map(|&(view, _)| view)),
            "duplicate view handle in active snapshot"
        );
        if on_screen.len() > self.active.len() {
            self.active.resize(on_screen.len(), None);
        }
        for (slot, &entry) in self.active.iter_mut().zip(on_screen) {
            *slot = Some(entry);
        }
        for slot in self.active.iter_mut().skip(on_screen.len()) {
            *slot = None;
        }
        self.active_len = on_screen.len();
        self.first_active_position = first_position;
    }

    /// Claim the snapshotted view for an adapter position, if still unclaimed
    pub fn take_active(&mut self, position: usize) -> Option<ViewId> {
        let index = position.checked_sub(self.first_active_position)?;
        if index >= self.active_len {
            return None;
        }
        self.active[index].take().map(|(view, _)| view)
    }

    /// Length of the most recent active-window snapshot
    pub fn active_window_len(&self) -> usize {
        self.active_len
    }

    /// Pop the most recently scrapped view of a kind
    pub fn take_scrap(&mut self, bag: usize) -> Option<ViewId> {
        self.bags.get_mut(bag)?.pop()
    }

    /// Push a detached view into its kind's bag.
    ///
    /// Panics if `bag` is out of range; a kind the provider never declared
    /// is a programming error, not a recoverable condition.
    pub fn put_scrap(&mut self, view: ViewId, bag: usize) {
        assert!(
            bag < self.bags.len(),
            "scrap bag {bag} out of range for {} kinds",
            self.bags.len()
        );
        debug_assert!(
            !self.bags.iter().any(|b| b.contains(&view)),
            "view handle already in scrap"
        );
        self.bags[bag].push(view);
    }

    /// Total views currently held across all bags
    pub fn scrap_len(&self) -> usize {
        self.bags.iter().map(|bag| bag.len()).sum()
    }

    /// Remove every leftover active-window entry, oldest position first
    pub fn drain_leftovers(&mut self, mut each: impl FnMut(ViewId, RowKind)) {
        for slot in self.active.iter_mut().take(self.active_len) {
            if let Some((view, kind)) = slot.take() {
                each(view, kind);
            }
        }
    }

    /// Move every scrapped view into `sink`, emptying all bags
    pub fn drain_all_scrap_into(&mut self, sink: &mut Vec<ViewId>) {
        for bag in &mut self.bags {
            sink.extend(bag.drain(..));
        }
    }

    /// Dispose every scrapped view, emptying all bags
    pub fn clear_all_scrap(&mut self, disposer: &mut dyn FnMut(ViewId)) {
        for bag in &mut self.bags {
            for view in bag.drain(..) {
                disposer(view);
            }
        }
    }

    /// Evict the oldest entries of any bag holding more than `capacity`
    pub fn prune_to_capacity(&mut self, capacity: usize, disposer: &mut dyn FnMut(ViewId)) {
        for bag in &mut self.bags {
            if bag.len() > capacity {
                let excess = bag.len() - capacity;
                tracing::trace!(excess, capacity, "pruning scrap bag");
                for view in bag.drain(..excess) {
                    disposer(view);
                }
            }
        }
    }
}

fn all_distinct(views: impl Iterator<Item = ViewId>) -> bool {
    let mut seen = FxHashSet::default();
    views.into_iter().all(|view| seen.insert(view))
}
