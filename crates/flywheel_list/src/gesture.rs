//! Touch interaction states and pointer handling
//!
//! The interaction lifecycle is a typed state machine: press
//! disambiguation (tap vs long press vs scroll), live dragging, fling,
//! and the two overscroll variants. The transition table lives on
//! `TouchState`; this module's `ListEngine` methods feed it pointer
//! events, drive the press timers, and translate pointer travel into
//! scroll and overscroll motion.

use flywheel_core::events::event_types::{
    POINTER_CANCEL, POINTER_DOWN, POINTER_MOVE, POINTER_UP, WINDOW_BLUR,
};
use flywheel_core::{PointerEvent, StateTransitions};

use crate::engine::ListEngine;
use crate::provider::ReportedScrollState;
use crate::row::Edge;

/// Events internal to the touch lifecycle, disjoint from pointer events
pub mod touch_events {
    use flywheel_core::EventType;

    /// Press held long enough to count as a deliberate tap
    pub const TAP_TIMER: EventType = 100;
    /// Tap held long enough to count as a long press
    pub const LONG_PRESS_TIMER: EventType = 101;
    /// Pointer travel exceeded the touch slop
    pub const MOVE_PAST_SLOP: EventType = 102;
    /// Release velocity cleared the fling threshold
    pub const FLING_START: EventType = 103;
    /// Motion ran into a content edge
    pub const HIT_EDGE: EventType = 104;
    /// Overscroll released without enough velocity to fling
    pub const SPRING_BACK: EventType = 105;
    /// Overscroll displacement returned through zero under the finger
    pub const ZERO_CROSS: EventType = 106;
    /// All motion decayed to rest
    pub const SETTLED: EventType = 107;
}

use touch_events::*;

/// Interaction state of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TouchState {
    /// No gesture in progress
    #[default]
    Rest,
    /// Pointer down, nature of the gesture still unknown
    Down,
    /// Held past the tap timeout; press feedback may show
    Tap,
    /// Held past the long-press timeout
    DoneWaiting,
    /// Finger-driven scrolling
    Scroll,
    /// Decaying free motion after release
    Fling,
    /// Finger-driven stretch past a content edge
    Overscroll,
    /// Free motion past a content edge, spring returning to zero
    Overfling,
}

impl StateTransitions for TouchState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use TouchState::*;
        match (self, event) {
            (Rest, POINTER_DOWN) => Some(Down),

            (Down, TAP_TIMER) => Some(Tap),
            (Down, MOVE_PAST_SLOP) => Some(Scroll),
            (Down, POINTER_UP) => Some(Rest),

            (Tap, LONG_PRESS_TIMER) => Some(DoneWaiting),
            (Tap, MOVE_PAST_SLOP) => Some(Scroll),
            (Tap, POINTER_UP) => Some(Rest),

            (DoneWaiting, MOVE_PAST_SLOP) => Some(Scroll),
            (DoneWaiting, POINTER_UP) => Some(Rest),

            (Scroll, POINTER_UP) => Some(Rest),
            (Scroll, FLING_START) => Some(Fling),
            (Scroll, HIT_EDGE) => Some(Overscroll),

            (Overscroll, ZERO_CROSS) => Some(Scroll),
            (Overscroll, FLING_START) => Some(Overfling),
            (Overscroll, SPRING_BACK) => Some(Overfling),

            (Fling, HIT_EDGE) => Some(Overfling),
            (Fling, SETTLED) => Some(Rest),

            (Overfling, SETTLED) => Some(Rest),

            _ => None,
        }
    }
}

/// Press timer payload kinds packed into scheduler tokens
const TOKEN_TAP: u64 = 1;
const TOKEN_LONG_PRESS: u64 = 2;

fn pack_token(generation: u64, kind: u64) -> u64 {
    (generation << 8) | kind
}

/// Per-gesture bookkeeping alongside the state machine
#[derive(Debug, Default)]
pub struct GestureState {
    /// Adapter position under the initial press
    pub motion_position: Option<usize>,
    /// Top edge of the pressed row at pointer-down; a click is only
    /// dispatched if the row has not moved since
    pub motion_original_top: i32,
    /// Press coordinates, the anchor all travel is measured from
    pub motion_x: f32,
    pub motion_y: f32,
    /// Pointer y at the last applied movement
    pub last_y: f32,
    /// Slop consumed before scrolling started, signed like the travel
    pub motion_correction: f32,
    /// Pointer owning the gesture; others are ignored
    pub active_pointer: Option<u32>,
    /// Content changed under this gesture; taps and presses are dropped
    pub data_changed: bool,
    /// Edge the current overscroll is stretched against
    pub overscroll_edge: Option<Edge>,
    /// Bumped per gesture so stale timer tokens are discarded
    pub generation: u64,
}

impl ListEngine {
    /// Feed a platform pointer event to the gesture controller
    pub fn pointer_event(&mut self, event: PointerEvent) {
        match event.event_type {
            POINTER_DOWN => self.pointer_down(event),
            POINTER_MOVE => self.pointer_move(event),
            POINTER_UP => self.pointer_up(event),
            POINTER_CANCEL => self.interrupt(POINTER_CANCEL),
            _ => {}
        }
    }

    /// The window lost focus; any gesture or motion is abandoned
    pub fn window_focus_lost(&mut self) {
        self.interrupt(WINDOW_BLUR);
    }

    fn pointer_down(&mut self, event: PointerEvent) {
        // A press catches in-flight motion and starts a fresh gesture.
        if !self.integrator.is_idle() {
            self.integrator.finish();
            self.state.scroll_offset = 0.0;
            self.machine.send(SETTLED);
        }
        if !self.machine.is_in(TouchState::Rest) {
            return;
        }

        self.gesture.generation += 1;
        self.gesture.data_changed = false;
        self.gesture.overscroll_edge = None;
        self.velocity.reset();
        self.velocity.add_sample(event.time_ms as i64, event.y);

        // A press outside any row still anchors a drag; it just cannot
        // become a tap or long press.
        let pressed = self.state.row_at(event.y);

        self.machine.send(POINTER_DOWN);
        self.gesture.active_pointer = Some(event.pointer_id);
        self.gesture.motion_position = pressed.map(|index| self.state.first_position + index);
        self.gesture.motion_original_top =
            pressed.map_or(0, |index| self.state.rows[index].top);
        self.gesture.motion_x = event.x;
        self.gesture.motion_y = event.y;
        self.gesture.last_y = event.y;
        self.gesture.motion_correction = 0.0;

        if pressed.is_some() {
            let token = pack_token(self.gesture.generation, TOKEN_TAP);
            self.scheduler
                .schedule(event.time_ms, self.config.tap_timeout_ms, token);
        }
    }

    fn pointer_move(&mut self, event: PointerEvent) {
        if self.gesture.active_pointer != Some(event.pointer_id) {
            return;
        }
        self.velocity.add_sample(event.time_ms as i64, event.y);

        match self.machine.current() {
            TouchState::Down | TouchState::Tap | TouchState::DoneWaiting => {
                let travel = event.y - self.gesture.motion_y;
                if travel.abs() > self.config.touch_slop {
                    self.scheduler.cancel_all();
                    self.machine.send(MOVE_PAST_SLOP);
                    self.gesture.motion_correction = self.config.touch_slop * travel.signum();
                    // Apply the travel beyond the slop immediately.
                    self.gesture.last_y = self.gesture.motion_y + self.gesture.motion_correction;
                    self.report_state(ReportedScrollState::TouchScroll);
                    self.scroll_pointer(event);
                }
            }
            TouchState::Scroll => self.scroll_pointer(event),
            TouchState::Overscroll => self.overscroll_pointer(event),
            _ => {}
        }
    }

    fn pointer_up(&mut self, event: PointerEvent) {
        if self.gesture.active_pointer != Some(event.pointer_id) {
            return;
        }
        self.scheduler.cancel_all();
        self.gesture.active_pointer = None;

        match self.machine.current() {
            TouchState::Down | TouchState::Tap | TouchState::DoneWaiting => {
                if !self.gesture.data_changed {
                    if let Some(position) = self.gesture.motion_position {
                        if self.pressed_row_is_stationary(position) {
                            self.callbacks.on_row_click(position);
                        }
                    }
                }
                self.machine.send(POINTER_UP);
                self.report_state(ReportedScrollState::Idle);
            }
            TouchState::Scroll => {
                let velocity = self
                    .velocity
                    .velocity_capped(self.config.max_fling_velocity);
                if velocity.abs() >= self.config.min_fling_velocity
                    && !self.fling_blocked(velocity)
                    && !self.state.rows.is_empty()
                {
                    self.machine.send(FLING_START);
                    self.integrator.fling(0.0, velocity);
                    self.fling_consumed = 0.0;
                    self.report_state(ReportedScrollState::Fling);
                } else {
                    self.machine.send(POINTER_UP);
                    self.report_state(ReportedScrollState::Idle);
                }
            }
            TouchState::Overscroll => {
                let velocity = self
                    .velocity
                    .velocity_capped(self.config.max_fling_velocity);
                if velocity.abs() >= self.config.min_fling_velocity {
                    self.machine.send(FLING_START);
                } else {
                    self.machine.send(SPRING_BACK);
                }
                self.integrator
                    .spring_back(self.state.scroll_offset, 0.0, velocity);
                self.report_state(ReportedScrollState::Fling);
            }
            _ => {}
        }
    }

    /// Pointer-cancel and focus-loss path: always lands in `Rest`
    fn interrupt(&mut self, event: u32) {
        self.scheduler.cancel_all();
        self.gesture.active_pointer = None;
        self.gesture.motion_position = None;
        self.gesture.overscroll_edge = None;
        self.integrator.finish();
        self.state.scroll_offset = 0.0;
        self.machine.force(event, TouchState::Rest);
        self.report_state(ReportedScrollState::Idle);
    }

    /// The pressed row is still attached at the top it was pressed at.
    /// A layout shift between down and up makes the click meaningless.
    fn pressed_row_is_stationary(&self, position: usize) -> bool {
        position >= self.state.first_position
            && position < self.state.end_position()
            && self.state.rows[position - self.state.first_position].top
                == self.gesture.motion_original_top
    }

    /// A fling in this direction could not move anything
    fn fling_blocked(&self, velocity: f32) -> bool {
        (velocity > 0.0 && self.state.at_content_start())
            || (velocity < 0.0 && self.state.at_content_end())
    }

    fn scroll_pointer(&mut self, event: PointerEvent) {
        let incremental = (event.y - self.gesture.last_y).round() as i32;
        let total =
            (event.y - self.gesture.motion_y - self.gesture.motion_correction).round() as i32;
        if incremental != 0 {
            let outcome = self.apply_scroll(total, incremental);
            if outcome.at_edge && self.config.overscroll_enabled {
                // The edge is identified by where the gesture is pushing,
                // not by the last increment, which may have reversed.
                self.gesture.overscroll_edge =
                    Some(if self.state.at_content_start() && total >= 0 {
                        Edge::Top
                    } else {
                        Edge::Bottom
                    });
                self.machine.send(HIT_EDGE);
            }
        }
        self.gesture.last_y = event.y;
    }

    fn overscroll_pointer(&mut self, event: PointerEvent) {
        let travel = event.y - self.gesture.last_y;
        self.gesture.last_y = event.y;
        if travel == 0.0 {
            return;
        }

        let max_overscroll = self.state.viewport.height as f32 * self.config.max_overscroll;
        let offset = self.state.scroll_offset;
        let edge = self.gesture.overscroll_edge.unwrap_or(if travel > 0.0 {
            Edge::Top
        } else {
            Edge::Bottom
        });

        let crossed = offset != 0.0 && (offset + travel) * offset <= 0.0;
        let leaving_edge = offset == 0.0
            && ((edge == Edge::Top && travel < 0.0) || (edge == Edge::Bottom && travel > 0.0));
        if crossed || leaving_edge {
            // The stretch came back through zero: hand the remainder of
            // the gesture back to normal scrolling, re-anchored here.
            self.state.scroll_offset = 0.0;
            self.gesture.overscroll_edge = None;
            self.machine.send(ZERO_CROSS);
            self.gesture.motion_y = event.y;
            self.gesture.motion_correction = 0.0;
            if let Some(index) = self.state.row_at(event.y) {
                self.gesture.motion_position = Some(self.state.first_position + index);
            }
            return;
        }

        if max_overscroll <= 0.0 {
            return;
        }
        let stretch = (offset.abs() / max_overscroll).min(1.0);
        let resistance = 0.55 - stretch * 0.45;
        let next = (offset + travel * resistance).clamp(-max_overscroll, max_overscroll);
        self.state.scroll_offset = next;

        let distance = next.abs() / self.state.viewport.height.max(1) as f32;
        self.callbacks.on_edge_pull(edge, distance);
    }

    /// Fire due press timers; stale generations are ignored
    pub(crate) fn advance_timers(&mut self, now_ms: u64) {
        let fired = self.scheduler.advance(now_ms);
        for token in fired {
            if token >> 8 != self.gesture.generation {
                continue;
            }
            if self.gesture.data_changed {
                continue;
            }
            match token & 0xff {
                TOKEN_TAP if self.machine.is_in(TouchState::Down) => {
                    self.machine.send(TAP_TIMER);
                    let token = pack_token(self.gesture.generation, TOKEN_LONG_PRESS);
                    self.scheduler
                        .schedule(now_ms, self.config.long_press_timeout_ms, token);
                }
                TOKEN_LONG_PRESS if self.machine.is_in(TouchState::Tap) => {
                    self.machine.send(LONG_PRESS_TIMER);
                    if let Some(position) = self.gesture.motion_position {
                        self.callbacks.on_row_long_press(position);
                    }
                }
                _ => {}
            }
        }
    }
}
