//! Incremental scroll application
//!
//! `track_motion_scroll` is the single place attached rows move. It
//! recycles the rows a shift would push off the leading edge, applies the
//! shift to the survivors in one batch, and reports whether the content
//! edge blocked the motion and whether a gap now needs filling. Recycling
//! happens before the shift so scrap is warm for the fill that follows.

use flywheel_core::ViewId;

use crate::recycler::{RecycleBin, ReleaseAction};
use crate::row::{FillDirection, ListState};
use crate::provider::RowHost;

/// What a scroll application did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// The content edge blocked some or all of the requested motion
    pub at_edge: bool,
    /// Attached rows actually moved
    pub moved: bool,
    /// Vacated space exceeds the buffered span on this side; a gap fill
    /// must run before the frame is complete
    pub needs_fill: Option<FillDirection>,
}

impl ScrollOutcome {
    fn no_op(at_edge: bool) -> Self {
        Self {
            at_edge,
            moved: false,
            needs_fill: None,
        }
    }
}

/// Shift the attached rows by `incremental` pixels, recycling rows that
/// leave through the leading edge.
///
/// `delta` is the total pointer travel for the gesture and `incremental`
/// the movement since the last application; both are clamped to one
/// viewport minus a pixel so a single call can never skip the entire
/// attached window. Negative values move content toward the top (the user
/// scrolls down). A run pinned against a content edge stays pinned while
/// `delta` keeps pointing into that edge, and an increment that reaches
/// an edge lands the run flush; the overshoot is overscroll displacement,
/// never row geometry. With no rows attached there is nothing to move and
/// the call reports an edge.
pub fn track_motion_scroll(
    state: &mut ListState,
    bin: &mut RecycleBin,
    host: &mut dyn RowHost,
    notify: &mut dyn FnMut(ViewId),
    delta: i32,
    incremental: i32,
) -> ScrollOutcome {
    if state.rows.is_empty() {
        return ScrollOutcome::no_op(true);
    }

    let viewport_top = state.viewport.top;
    let viewport_bottom = state.viewport.bottom();
    let max_step = (state.viewport.height - 1).max(1);
    let delta = delta.clamp(-max_step, max_step);
    let incremental = incremental.clamp(-max_step, max_step);

    // A zero incremental is a genuine no-op rather than an edge contact.
    if incremental == 0 {
        return ScrollOutcome::no_op(false);
    }

    let first_top = state.rows[0].top;
    let last_bottom = state.rows[state.rows.len() - 1].bottom();
    let space_above = viewport_top - first_top;
    let space_below = last_bottom - viewport_bottom;

    // Pinned against an edge: the run stays locked while the gesture's
    // total travel still points into that edge.
    let blocked_upward = state.at_content_start() && delta >= 0;
    let blocked_downward = state.at_content_end() && delta <= 0;
    if blocked_upward || blocked_downward {
        return ScrollOutcome::no_op(true);
    }

    // An increment that reaches a content edge lands the run flush, never
    // past it.
    let incremental = if incremental > 0 && state.first_position == 0 {
        incremental.min(space_above.max(0))
    } else if incremental < 0 && state.end_position() >= state.total_count {
        incremental.max(-space_below.max(0))
    } else {
        incremental
    };
    if incremental == 0 {
        return ScrollOutcome::no_op(true);
    }

    let down = incremental < 0;
    let mut recycled = 0usize;

    if down {
        // Rows whose bottom ends above the viewport top after the shift.
        let bound = viewport_top - incremental;
        while recycled < state.rows.len() - 1 && state.rows[recycled].bottom() <= bound {
            recycled += 1;
        }
        for row in state.rows.drain(..recycled) {
            match bin.release(row.view, row.kind, notify) {
                ReleaseAction::Scrapped => host.detach(row.view),
                ReleaseAction::Discard => host.discard(row.view),
            }
        }
        state.first_position += recycled;
    } else {
        // Rows whose top ends below the viewport bottom after the shift.
        let bound = viewport_bottom - incremental;
        while recycled < state.rows.len() - 1
            && state.rows[state.rows.len() - 1 - recycled].top >= bound
        {
            recycled += 1;
        }
        let keep = state.rows.len() - recycled;
        for row in state.rows.drain(keep..) {
            match bin.release(row.view, row.kind, notify) {
                ReleaseAction::Scrapped => host.detach(row.view),
                ReleaseAction::Discard => host.discard(row.view),
            }
        }
    }

    for row in &mut state.rows {
        row.top += incremental;
    }
    host.shift(incremental);
    state.direction = incremental.signum();

    if recycled > 0 {
        tracing::trace!(
            recycled,
            delta,
            incremental,
            first_position = state.first_position,
            "scroll recycled rows"
        );
    }

    update_distance_hints(state);
    rehome_selector(state);

    let exposed = incremental.abs();
    let needs_fill = if down && space_below < exposed {
        Some(FillDirection::Down)
    } else if !down && space_above < exposed {
        Some(FillDirection::Up)
    } else {
        None
    };

    // Motion happened; whether it also landed on the edge is checked
    // against the post-shift geometry.
    let at_edge = (down && state.at_content_end()) || (!down && state.at_content_start());

    ScrollOutcome {
        at_edge,
        moved: true,
        needs_fill,
    }
}

/// Refresh the rough before/after content extents used as scrollbar hints
fn update_distance_hints(state: &mut ListState) {
    if state.rows.is_empty() {
        state.distance_to_start = 0;
        state.distance_to_end = 0;
        return;
    }
    let attached: i32 = state.rows.iter().map(|row| row.height).sum();
    let average = attached / state.rows.len() as i32;

    let hidden_above = state.viewport.top - state.rows[0].top;
    let hidden_below = state.rows[state.rows.len() - 1].bottom() - state.viewport.bottom();
    let before = state.first_position as i32;
    let after = state.total_count.saturating_sub(state.end_position()) as i32;

    state.distance_to_start = (before * average + hidden_above).max(0);
    state.distance_to_end = (after * average + hidden_below).max(0);
}

/// Keep the selection highlight glued to its row while it stays attached
fn rehome_selector(state: &mut ListState) {
    let Some(selected) = state.selected_position else {
        return;
    };
    if selected >= state.first_position && selected < state.end_position() {
        let index = selected - state.first_position;
        state.selector_top = state.rows[index].top;
    }
}
