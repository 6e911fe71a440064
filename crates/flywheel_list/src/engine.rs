//! The list engine
//!
//! Owns everything: geometry, the recycle bin, the interaction machine,
//! physics, and the host-facing trait objects. Hosts feed it pointer
//! events and a `tick(now_ms)` per frame; it answers with `RowHost`
//! calls and `ListCallbacks` notifications. Single-threaded throughout.

use flywheel_core::{ConfigError, Machine, ViewId};
use flywheel_physics::{MotionIntegrator, TickScheduler, VelocityTracker};

use crate::config::ScrollConfig;
use crate::gesture::{touch_events, GestureState, TouchState};
use crate::motion::{self, ScrollOutcome};
use crate::provider::{
    GapFiller, LayoutFrame, ListCallbacks, ReportedScrollState, RowContentProvider, RowHost,
};
use crate::recycler::{Origin, RecycleBin, ReleaseAction};
use crate::row::{AttachedRow, Edge, FillDirection, ListState, Viewport};

/// Virtualized list engine: recycling, scrolling, and touch interaction
pub struct ListEngine {
    pub(crate) config: ScrollConfig,
    pub(crate) state: ListState,
    pub(crate) bin: RecycleBin,
    pub(crate) machine: Machine<TouchState>,
    pub(crate) gesture: GestureState,
    pub(crate) scheduler: TickScheduler,
    pub(crate) integrator: MotionIntegrator,
    pub(crate) velocity: VelocityTracker,
    pub(crate) provider: Box<dyn RowContentProvider>,
    pub(crate) host: Box<dyn RowHost>,
    pub(crate) filler: Box<dyn GapFiller>,
    pub(crate) callbacks: Box<dyn ListCallbacks>,
    /// Last scroll state handed to the callbacks, for deduplication
    reported: ReportedScrollState,
    /// Last (first, visible, total) triple handed to the callbacks
    last_notified: Option<(usize, usize, usize)>,
    /// Integer pixels of the current fling already applied to rows
    pub(crate) fling_consumed: f32,
    last_tick_ms: Option<u64>,
}

impl ListEngine {
    pub fn new(
        config: ScrollConfig,
        provider: Box<dyn RowContentProvider>,
        host: Box<dyn RowHost>,
        filler: Box<dyn GapFiller>,
        callbacks: Box<dyn ListCallbacks>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let kind_count = provider.kind_count().max(1);
        let integrator = MotionIntegrator::new(
            config.fling_deceleration,
            config.min_fling_velocity,
            config.spring,
        );
        let mut state = ListState::new();
        state.total_count = provider.row_count();

        Ok(Self {
            config,
            state,
            bin: RecycleBin::new(kind_count),
            machine: Machine::new(TouchState::Rest),
            gesture: GestureState::default(),
            scheduler: TickScheduler::new(),
            integrator,
            velocity: VelocityTracker::new(),
            provider,
            host,
            filler,
            callbacks,
            reported: ReportedScrollState::Idle,
            last_notified: None,
            fling_consumed: 0.0,
            last_tick_ms: None,
        })
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn touch_state(&self) -> TouchState {
        self.machine.current()
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Set the scrollable area and fill it from the current first position
    pub fn set_viewport(&mut self, top: i32, height: i32) {
        self.state.viewport = Viewport { top, height };
        self.fill(FillDirection::Down);
        self.notify_scroll_changed();
    }

    /// Run the gap filler in `direction` against the current geometry
    pub fn fill(&mut self, direction: FillDirection) {
        let Self {
            state,
            bin,
            provider,
            host,
            filler,
            ..
        } = self;
        let mut frame = LayoutFrame {
            state,
            bin,
            provider: provider.as_mut(),
            host: host.as_mut(),
        };
        filler.fill_gap(&mut frame, direction);
    }

    /// Programmatic scroll by `delta` pixels (negative moves content up)
    pub fn scroll_by(&mut self, delta: i32) -> ScrollOutcome {
        self.apply_scroll(delta, delta)
    }

    /// Get a view for `position`: active window first, then scrap with a
    /// rebind, then a fresh build. The flag is true when a view was
    /// reused either way.
    pub fn obtain_row_view(&mut self, position: usize) -> (ViewId, bool) {
        let kind = self.provider.kind_of(position);
        match self.bin.obtain(position, kind) {
            Some((view, Origin::ActiveWindow)) => (view, true),
            Some((view, Origin::ScrapBag)) => {
                let built = self.provider.build(position, Some(view));
                (built.view, true)
            }
            None => {
                let built = self.provider.build(position, None);
                (built.view, false)
            }
        }
    }

    /// The content behind the list changed: re-home the attached window
    /// against the new content, rebinding every surviving row.
    pub fn data_changed(&mut self) {
        self.gesture.data_changed = true;
        self.relayout(true);
        self.fill(FillDirection::Down);
        self.notify_scroll_changed();
    }

    /// Re-run the layout pass without touching content (geometry-only
    /// hosts call this after resizes)
    pub fn refresh_layout(&mut self) {
        self.relayout(false);
        self.notify_scroll_changed();
    }

    /// Replace the kind configuration. All scrap is disposed; old kind
    /// indices would be meaningless against the new bags.
    pub fn set_kind_count(&mut self, kind_count: usize) {
        let Self { bin, host, .. } = self;
        bin.configure_kinds(kind_count, &mut |view| host.discard(view));
    }

    pub fn set_selection(&mut self, position: Option<usize>) {
        self.state.selected_position = position;
        if let Some(selected) = position {
            if selected >= self.state.first_position && selected < self.state.end_position() {
                let index = selected - self.state.first_position;
                self.state.selector_top = self.state.rows[index].top;
            }
        }
    }

    /// Advance timers and any in-flight motion to `now_ms`
    pub fn tick(&mut self, now_ms: u64) {
        self.advance_timers(now_ms);

        let dt = match self.last_tick_ms {
            // Frame gaps are capped so a stalled host cannot teleport.
            Some(last) if now_ms > last => ((now_ms - last) as f32 / 1000.0).min(0.1),
            _ => 0.0,
        };
        self.last_tick_ms = Some(now_ms);

        match self.machine.current() {
            TouchState::Fling => self.tick_fling(dt),
            TouchState::Overfling => self.tick_overfling(dt),
            _ => {}
        }
    }

    fn tick_fling(&mut self, dt: f32) {
        if self.state.rows.is_empty() {
            self.integrator.finish();
            self.machine.send(touch_events::SETTLED);
            self.report_state(ReportedScrollState::Idle);
            return;
        }

        let moving = self.integrator.step(dt);
        let incremental = (self.integrator.position() - self.fling_consumed) as i32;
        if incremental != 0 {
            self.fling_consumed += incremental as f32;
            let outcome = self.apply_scroll(incremental, incremental);
            if outcome.at_edge {
                let velocity = self.integrator.velocity();
                let edge = if velocity > 0.0 { Edge::Top } else { Edge::Bottom };
                if self.config.overscroll_enabled
                    && velocity.abs() >= self.config.min_fling_velocity
                {
                    self.callbacks.on_edge_absorb(edge, velocity);
                    self.gesture.overscroll_edge = Some(edge);
                    self.machine.send(touch_events::HIT_EDGE);
                    self.integrator.spring_back(0.0, 0.0, velocity);
                } else {
                    self.integrator.finish();
                    self.machine.send(touch_events::SETTLED);
                    self.report_state(ReportedScrollState::Idle);
                }
                return;
            }
        }

        if !moving && self.machine.is_in(TouchState::Fling) {
            self.machine.send(touch_events::SETTLED);
            self.report_state(ReportedScrollState::Idle);
        }
    }

    fn tick_overfling(&mut self, dt: f32) {
        let moving = self.integrator.step(dt);
        let limit = self.state.viewport.height as f32 * self.config.max_overscroll;
        self.state.scroll_offset = self.integrator.position().clamp(-limit, limit);

        if !moving {
            self.state.scroll_offset = 0.0;
            self.gesture.overscroll_edge = None;
            self.machine.send(touch_events::SETTLED);
            self.report_state(ReportedScrollState::Idle);
        }
    }

    /// Apply a scroll step, then fill any resulting gap and notify
    pub(crate) fn apply_scroll(&mut self, delta: i32, incremental: i32) -> ScrollOutcome {
        let outcome = {
            let Self {
                state,
                bin,
                host,
                callbacks,
                ..
            } = self;
            let mut notify = |view: ViewId| callbacks.on_recycled(view);
            motion::track_motion_scroll(state, bin, host.as_mut(), &mut notify, delta, incremental)
        };
        if let Some(direction) = outcome.needs_fill {
            self.fill(direction);
        }
        if outcome.moved {
            self.notify_scroll_changed();
        }
        outcome
    }

    /// Full layout pass over the attached positions. With `rebind`, every
    /// surviving row is pushed back through the provider; without it,
    /// active-window hits keep their view untouched.
    fn relayout(&mut self, rebind: bool) {
        self.state.total_count = self.provider.row_count();
        let total = self.state.total_count;
        // A shrink can strand the window past the new end; land it on the
        // last row so remaining content stays visible.
        let first = self.state.first_position.min(total.saturating_sub(1));
        self.state.first_position = first;

        let snapshot = self.state.snapshot();
        self.bin.begin_layout(&snapshot, first);

        let old_rows = std::mem::take(&mut self.state.rows);
        let keep = old_rows.len().min(total - first);
        for (index, old) in old_rows.into_iter().enumerate().take(keep) {
            let position = first + index;
            let row = {
                let Self {
                    bin,
                    provider,
                    host,
                    callbacks,
                    ..
                } = self;
                let kind = provider.kind_of(position);
                match bin.obtain(position, kind) {
                    // A survivor whose kind changed cannot be offered for
                    // rebind; it leaves through scrap like any other row.
                    Some((view, Origin::ActiveWindow)) if kind != old.kind => {
                        match bin.release(view, old.kind, &mut |v| callbacks.on_recycled(v)) {
                            ReleaseAction::Scrapped => host.detach(view),
                            ReleaseAction::Discard => host.discard(view),
                        }
                        let reusable = bin.obtain(position, kind).map(|(v, _)| v);
                        let built = provider.build(position, reusable);
                        host.attach(built.view, position, old.top);
                        AttachedRow {
                            view: built.view,
                            kind,
                            top: old.top,
                            height: built.height,
                        }
                    }
                    Some((view, Origin::ActiveWindow)) if !rebind => AttachedRow {
                        view,
                        kind,
                        top: old.top,
                        height: old.height,
                    },
                    Some((view, _)) => {
                        let built = provider.build(position, Some(view));
                        host.attach(built.view, position, old.top);
                        AttachedRow {
                            view: built.view,
                            kind,
                            top: old.top,
                            height: built.height,
                        }
                    }
                    None => {
                        let built = provider.build(position, None);
                        host.attach(built.view, position, old.top);
                        AttachedRow {
                            view: built.view,
                            kind,
                            top: old.top,
                            height: built.height,
                        }
                    }
                }
            };
            self.state.rows.push(row);
        }

        let leftovers = self.bin.end_layout();
        for view in leftovers.scrapped {
            self.host.detach(view);
            self.callbacks.on_recycled(view);
        }
        for view in leftovers.disposed {
            self.host.discard(view);
        }
    }

    /// Hand a scroll state to the callbacks, skipping repeats
    pub(crate) fn report_state(&mut self, state: ReportedScrollState) {
        if self.reported != state {
            self.reported = state;
            self.callbacks.on_scroll_state_changed(state);
        }
    }

    /// Fire `on_scroll_changed` if the visible window moved
    pub(crate) fn notify_scroll_changed(&mut self) {
        let current = (
            self.state.first_position,
            self.state.rows.len(),
            self.state.total_count,
        );
        if self.last_notified != Some(current) {
            self.last_notified = Some(current);
            self.callbacks
                .on_scroll_changed(current.0, current.1, current.2);
        }
    }
}
