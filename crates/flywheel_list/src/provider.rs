//! Host-facing traits
//!
//! The engine is headless: row visuals, their measurement, and their
//! placement on an actual screen belong to the host. These traits are the
//! seam. `RowContentProvider` is the adapter, `RowHost` applies geometry,
//! `GapFiller` owns the concrete layout loop, and `ListCallbacks` carries
//! notifications back out.

use flywheel_core::ViewId;

use crate::recycler::RecycleBin;
use crate::row::{AttachedRow, Edge, FillDirection, ListState, RowKind};

/// A freshly built or rebound row visual
#[derive(Debug, Clone, Copy)]
pub struct BuiltRow {
    pub view: ViewId,
    pub height: i32,
}

/// Supplies row content on demand (the adapter)
pub trait RowContentProvider {
    fn row_count(&self) -> usize;

    /// Number of distinct reusable kinds. Must be at least 1 and stable
    /// until the engine is told otherwise.
    fn kind_count(&self) -> usize {
        1
    }

    fn kind_of(&mut self, position: usize) -> RowKind {
        let _ = position;
        RowKind::Reusable(0)
    }

    /// Build or rebind the visual for `position`.
    ///
    /// `reusable` is a detached view of the right kind when the bin had
    /// one; implementations rebind it instead of allocating.
    fn build(&mut self, position: usize, reusable: Option<ViewId>) -> BuiltRow;
}

/// Applies engine decisions to real visuals
pub trait RowHost {
    /// Place `view` on screen at `top` for `position`
    fn attach(&mut self, view: ViewId, position: usize, top: i32);

    /// Remove `view` from screen, keeping it alive for reuse
    fn detach(&mut self, view: ViewId);

    /// Offset every attached row by `delta` pixels in one batch
    fn shift(&mut self, delta: i32);

    /// Remove `view` from screen and destroy it
    fn discard(&mut self, view: ViewId);
}

/// Scroll activity as reported to `ListCallbacks`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedScrollState {
    Idle,
    TouchScroll,
    Fling,
}

/// Outbound notifications; every method defaults to a no-op
pub trait ListCallbacks {
    fn on_scroll_changed(&mut self, first: usize, visible: usize, total: usize) {
        let _ = (first, visible, total);
    }

    fn on_scroll_state_changed(&mut self, state: ReportedScrollState) {
        let _ = state;
    }

    /// A view moved from the screen into scrap
    fn on_recycled(&mut self, view: ViewId) {
        let _ = view;
    }

    fn on_row_click(&mut self, position: usize) {
        let _ = position;
    }

    fn on_row_long_press(&mut self, position: usize) {
        let _ = position;
    }

    /// Overscroll stretch while dragging; `distance` is the fraction of
    /// the viewport currently pulled past the edge
    fn on_edge_pull(&mut self, edge: Edge, distance: f32) {
        let _ = (edge, distance);
    }

    /// A fling ran into a content edge with `velocity` px/s remaining
    fn on_edge_absorb(&mut self, edge: Edge, velocity: f32) {
        let _ = (edge, velocity);
    }
}

/// No-op callbacks for hosts that do not observe the list
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCallbacks;

impl ListCallbacks for NullCallbacks {}

/// Borrowed engine internals handed to a `GapFiller`.
///
/// Scoped to one fill: the filler can read geometry and place rows, but
/// cannot scroll, so a fill can never re-enter the motion path.
pub struct LayoutFrame<'a> {
    pub state: &'a mut ListState,
    pub bin: &'a mut RecycleBin,
    pub provider: &'a mut dyn RowContentProvider,
    pub host: &'a mut dyn RowHost,
}

impl LayoutFrame<'_> {
    /// Attach the next row after the current run, bin-first.
    ///
    /// Returns the attached geometry, or None once content is exhausted.
    pub fn place_below(&mut self) -> Option<AttachedRow> {
        let position = self.state.end_position();
        if position >= self.provider.row_count() {
            return None;
        }
        let top = self
            .state
            .last_bottom()
            .unwrap_or(self.state.viewport.top);
        let row = self.build_row(position, top);
        self.host.attach(row.view, position, row.top);
        self.state.rows.push(row);
        Some(row)
    }

    /// Attach the row before the current run, bin-first.
    ///
    /// Returns the attached geometry, or None at the start of content.
    pub fn place_above(&mut self) -> Option<AttachedRow> {
        let position = self.state.first_position.checked_sub(1)?;
        let bottom = self
            .state
            .first_top()
            .unwrap_or(self.state.viewport.bottom());
        let mut row = self.build_row(position, 0);
        row.top = bottom - row.height;
        self.host.attach(row.view, position, row.top);
        self.state.rows.insert(0, row);
        self.state.first_position = position;
        Some(row)
    }

    fn build_row(&mut self, position: usize, top: i32) -> AttachedRow {
        let kind = self.provider.kind_of(position);
        let reusable = self.bin.obtain(position, kind).map(|(view, _)| view);
        let built = self.provider.build(position, reusable);
        AttachedRow {
            view: built.view,
            kind,
            top,
            height: built.height,
        }
    }
}

/// Fills content gaps after a scroll shift
pub trait GapFiller {
    /// Attach rows until the vacated space in `direction` is covered (or
    /// content runs out). Called after the shift and recycle steps of a
    /// scroll, before the frame is considered complete.
    fn fill_gap(&mut self, frame: &mut LayoutFrame<'_>, direction: FillDirection);
}

/// Plain vertical list filler: rows stack edge to edge with no spacing
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearFiller;

impl GapFiller for LinearFiller {
    fn fill_gap(&mut self, frame: &mut LayoutFrame<'_>, direction: FillDirection) {
        match direction {
            FillDirection::Down => {
                while frame
                    .state
                    .last_bottom()
                    .map_or(true, |bottom| bottom < frame.state.viewport.bottom())
                {
                    if frame.place_below().is_none() {
                        break;
                    }
                }
            }
            FillDirection::Up => {
                while frame
                    .state
                    .first_top()
                    .map_or(true, |top| top > frame.state.viewport.top)
                {
                    if frame.place_above().is_none() {
                        break;
                    }
                }
            }
        }
    }
}
