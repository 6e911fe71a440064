//! Flywheel List Engine
//!
//! A headless virtualized-list core: only the rows intersecting the
//! viewport exist as live visuals, rows leaving one edge are recycled
//! into the rows entering the other, and a touch state machine drives
//! scrolling, fling, and overscroll physics. The host owns the actual
//! visuals and talks to the engine through four traits:
//!
//! - [`RowContentProvider`] supplies row content and kinds (the adapter)
//! - [`RowHost`] applies attach/detach/shift decisions to real visuals
//! - [`GapFiller`] owns the concrete layout loop for vacated space
//! - [`ListCallbacks`] carries scroll, click, and recycle notifications
//!
//! Feed [`ListEngine`] pointer events and one `tick(now_ms)` per frame;
//! everything else follows.

pub mod config;
pub mod engine;
pub mod gesture;
pub mod motion;
pub mod provider;
pub mod recycler;
pub mod row;
pub mod slots;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ScrollConfig;
pub use engine::ListEngine;
pub use gesture::{touch_events, GestureState, TouchState};
pub use motion::{track_motion_scroll, ScrollOutcome};
pub use provider::{
    BuiltRow, GapFiller, LayoutFrame, LinearFiller, ListCallbacks, NullCallbacks,
    ReportedScrollState, RowContentProvider, RowHost,
};
pub use recycler::{LayoutLeftovers, Origin, RecycleBin, ReleaseAction};
pub use row::{AttachedRow, Edge, FillDirection, ListState, RowKind, Viewport};
pub use slots::ViewKindSlots;
