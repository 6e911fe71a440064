//! The recycle bin
//!
//! Front door for view reuse. During a layout pass, views for positions
//! that stay on screen come back out of the active window with identity
//! preserved; everything else falls back to per-kind scrap. Between
//! passes, rows leaving the viewport are released into scrap so the rows
//! entering on the other side can reuse them.

use flywheel_core::ViewId;

use crate::row::RowKind;
use crate::slots::ViewKindSlots;

/// Where an obtained view came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Same position, same view; no rebind needed
    ActiveWindow,
    /// Detached view of the right kind; caller must rebind content
    ScrapBag,
}

/// What `release` did with the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    /// Entered scrap; available for reuse
    Scrapped,
    /// Not storable; caller must dispose of the view
    Discard,
}

/// Views left over when a layout pass closes
#[derive(Debug, Default)]
pub struct LayoutLeftovers {
    /// Entered scrap while still attached; the caller detaches them and
    /// fires its recycle notification
    pub scrapped: Vec<ViewId>,
    /// Evicted or unstorable; the caller destroys them
    pub disposed: Vec<ViewId>,
}

/// Scrap-backed view recycler for one list
#[derive(Debug)]
pub struct RecycleBin {
    slots: ViewKindSlots,
}

impl RecycleBin {
    pub fn new(kind_count: usize) -> Self {
        Self {
            slots: ViewKindSlots::new(kind_count),
        }
    }

    /// Reconfigure for a new kind count.
    ///
    /// Existing scrap is handed to `disposer` first; kind indices from the
    /// old configuration would be meaningless in the new one.
    pub fn configure_kinds(&mut self, kind_count: usize, disposer: &mut dyn FnMut(ViewId)) {
        self.slots.clear_all_scrap(disposer);
        self.slots.configure_kinds(kind_count);
    }

    pub fn kind_count(&self) -> usize {
        self.slots.kind_count()
    }

    /// Views waiting in scrap across all kinds
    pub fn scrap_len(&self) -> usize {
        self.slots.scrap_len()
    }

    /// Start a layout pass: snapshot the on-screen views into the active
    /// window, keyed from `first_position`
    pub fn begin_layout(&mut self, on_screen: &[(ViewId, RowKind)], first_position: usize) {
        tracing::trace!(
            count = on_screen.len(),
            first_position,
            "layout pass begin"
        );
        self.slots.snapshot_active(on_screen, first_position);
    }

    /// Get a view for `position`, preferring the active window.
    ///
    /// An active-window hit preserves identity regardless of `kind`; a
    /// scrap hit matches the kind's bag. `None` means the caller must
    /// build a fresh view.
    pub fn obtain(&mut self, position: usize, kind: RowKind) -> Option<(ViewId, Origin)> {
        if let Some(view) = self.slots.take_active(position) {
            return Some((view, Origin::ActiveWindow));
        }
        let bag = kind.bag()?;
        self.slots
            .take_scrap(bag)
            .map(|view| (view, Origin::ScrapBag))
    }

    /// Release a row leaving the screen.
    ///
    /// Reusable rows enter scrap and `notify` fires once for the
    /// active-to-scrap transition. Structural and transient rows are never
    /// stored; the caller disposes of them.
    pub fn release(
        &mut self,
        view: ViewId,
        kind: RowKind,
        notify: &mut dyn FnMut(ViewId),
    ) -> ReleaseAction {
        match kind.bag() {
            Some(bag) => {
                self.slots.put_scrap(view, bag);
                notify(view);
                ReleaseAction::Scrapped
            }
            None => ReleaseAction::Discard,
        }
    }

    /// Finish a layout pass.
    ///
    /// Active-window leftovers (positions no longer on screen) are moved
    /// into scrap when reusable, and scrap is pruned to the active window
    /// length. The returned lists tell the caller which views entered
    /// scrap (still attached; detach them) and which must be destroyed.
    pub fn end_layout(&mut self) -> LayoutLeftovers {
        let capacity = self.slots.active_window_len();
        let mut result = LayoutLeftovers::default();

        let mut leftovers: Vec<(ViewId, RowKind)> = Vec::new();
        self.slots.drain_leftovers(|view, kind| leftovers.push((view, kind)));
        for (view, kind) in leftovers {
            match kind.bag() {
                Some(bag) => {
                    self.slots.put_scrap(view, bag);
                    result.scrapped.push(view);
                }
                None => result.disposed.push(view),
            }
        }

        self.slots
            .prune_to_capacity(capacity, &mut |view| result.disposed.push(view));
        result
    }

    /// Dispose of everything held in scrap (content invalidated)
    pub fn clear_scrap(&mut self, disposer: &mut dyn FnMut(ViewId)) {
        self.slots.clear_all_scrap(disposer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flywheel_core::ViewId;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ViewId> {
        let mut arena: SlotMap<ViewId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn test_active_window_wins_over_scrap() {
        let views = ids(2);
        let mut bin = RecycleBin::new(1);
        bin.release(views[0], RowKind::Reusable(0), &mut |_| {});
        bin.begin_layout(&[(views[1], RowKind::Reusable(0))], 4);

        // Position 4 was snapshotted; scrap must not be consumed for it.
        assert_eq!(
            bin.obtain(4, RowKind::Reusable(0)),
            Some((views[1], Origin::ActiveWindow))
        );
        assert_eq!(
            bin.obtain(5, RowKind::Reusable(0)),
            Some((views[0], Origin::ScrapBag))
        );
        assert_eq!(bin.obtain(6, RowKind::Reusable(0)), None);
    }

    #[test]
    fn test_release_notifies_reusable_exactly_once() {
        let views = ids(1);
        let mut bin = RecycleBin::new(1);
        let mut notified = Vec::new();

        let action = bin.release(views[0], RowKind::Reusable(0), &mut |v| notified.push(v));
        assert_eq!(action, ReleaseAction::Scrapped);
        assert_eq!(notified, vec![views[0]]);
    }

    #[test]
    fn test_release_discards_structural_and_transient() {
        let views = ids(2);
        let mut bin = RecycleBin::new(1);
        let mut notified = Vec::new();

        let a = bin.release(views[0], RowKind::Structural, &mut |v| notified.push(v));
        let b = bin.release(views[1], RowKind::Transient, &mut |v| notified.push(v));
        assert_eq!(a, ReleaseAction::Discard);
        assert_eq!(b, ReleaseAction::Discard);
        assert!(notified.is_empty());
        assert_eq!(bin.scrap_len(), 0);
    }

    #[test]
    fn test_end_layout_scraps_leftovers() {
        let views = ids(3);
        let mut bin = RecycleBin::new(1);
        let snapshot: Vec<_> = views.iter().map(|&v| (v, RowKind::Reusable(0))).collect();
        bin.begin_layout(&snapshot, 0);

        // Only position 1 is reclaimed; 0 and 2 become leftovers.
        assert!(bin.obtain(1, RowKind::Reusable(0)).is_some());

        let leftovers = bin.end_layout();
        assert_eq!(leftovers.scrapped, vec![views[0], views[2]]);
        assert!(leftovers.disposed.is_empty());
        assert_eq!(bin.scrap_len(), 2);
    }

    #[test]
    fn test_end_layout_disposes_structural_leftovers() {
        let views = ids(2);
        let mut bin = RecycleBin::new(1);
        bin.begin_layout(
            &[
                (views[0], RowKind::Structural),
                (views[1], RowKind::Reusable(0)),
            ],
            0,
        );

        let leftovers = bin.end_layout();
        assert_eq!(leftovers.disposed, vec![views[0]]);
        assert_eq!(leftovers.scrapped, vec![views[1]]);
    }

    #[test]
    fn test_end_layout_prunes_scrap_to_window_length() {
        let views = ids(6);
        let mut bin = RecycleBin::new(1);
        for &view in &views[..4] {
            bin.release(view, RowKind::Reusable(0), &mut |_| {});
        }
        bin.begin_layout(
            &[
                (views[4], RowKind::Reusable(0)),
                (views[5], RowKind::Reusable(0)),
            ],
            0,
        );
        bin.obtain(0, RowKind::Reusable(0));
        bin.obtain(1, RowKind::Reusable(0));

        let leftovers = bin.end_layout();

        // Window length 2; the two oldest of four scrapped views go.
        assert_eq!(leftovers.disposed, vec![views[0], views[1]]);
        assert_eq!(bin.scrap_len(), 2);
    }

    #[test]
    fn test_configure_kinds_disposes_old_scrap() {
        let views = ids(2);
        let mut bin = RecycleBin::new(1);
        bin.release(views[0], RowKind::Reusable(0), &mut |_| {});
        bin.release(views[1], RowKind::Reusable(0), &mut |_| {});

        let mut disposed = Vec::new();
        bin.configure_kinds(3, &mut |v| disposed.push(v));
        assert_eq!(disposed.len(), 2);
        assert_eq!(bin.kind_count(), 3);
        assert_eq!(bin.scrap_len(), 0);
    }
}
