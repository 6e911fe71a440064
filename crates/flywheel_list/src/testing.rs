//! Shared test doubles
//!
//! A slotmap-backed provider that fabricates row visuals, a host that
//! records every call it receives, and callbacks that log notifications
//! behind an `Arc<Mutex>` so tests can keep a handle after handing the
//! box to the engine.

use std::sync::{Arc, Mutex};

use flywheel_core::ViewId;
use slotmap::SlotMap;

use crate::provider::{
    BuiltRow, ListCallbacks, ReportedScrollState, RowContentProvider, RowHost,
};
use crate::row::{Edge, RowKind};

/// Content provider over a fixed table of heights and kinds
pub(crate) struct MockProvider {
    arena: SlotMap<ViewId, usize>,
    pub heights: Vec<i32>,
    pub kinds: Vec<RowKind>,
    /// Fresh allocations
    pub built: usize,
    /// Rebinds of a reusable view
    pub rebound: usize,
}

impl MockProvider {
    pub fn uniform(count: usize, height: i32) -> Self {
        Self {
            arena: SlotMap::with_key(),
            heights: vec![height; count],
            kinds: vec![RowKind::Reusable(0); count],
            built: 0,
            rebound: 0,
        }
    }
}

impl RowContentProvider for MockProvider {
    fn row_count(&self) -> usize {
        self.heights.len()
    }

    fn kind_count(&self) -> usize {
        1 + self
            .kinds
            .iter()
            .filter_map(|kind| kind.bag())
            .max()
            .unwrap_or(0)
    }

    fn kind_of(&mut self, position: usize) -> RowKind {
        self.kinds[position]
    }

    fn build(&mut self, position: usize, reusable: Option<ViewId>) -> BuiltRow {
        let view = match reusable {
            Some(view) => {
                self.rebound += 1;
                self.arena[view] = position;
                view
            }
            None => {
                self.built += 1;
                self.arena.insert(position)
            }
        };
        BuiltRow {
            view,
            height: self.heights[position],
        }
    }
}

/// Shared handle over a `MockProvider` for when the engine owns the box
#[derive(Clone)]
pub(crate) struct SharedProvider(pub Arc<Mutex<MockProvider>>);

impl SharedProvider {
    pub fn uniform(count: usize, height: i32) -> Self {
        Self(Arc::new(Mutex::new(MockProvider::uniform(count, height))))
    }
}

impl RowContentProvider for SharedProvider {
    fn row_count(&self) -> usize {
        self.0.lock().unwrap().row_count()
    }

    fn kind_count(&self) -> usize {
        self.0.lock().unwrap().kind_count()
    }

    fn kind_of(&mut self, position: usize) -> RowKind {
        self.0.lock().unwrap().kind_of(position)
    }

    fn build(&mut self, position: usize, reusable: Option<ViewId>) -> BuiltRow {
        self.0.lock().unwrap().build(position, reusable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostEvent {
    Attach(ViewId, usize, i32),
    Detach(ViewId),
    Shift(i32),
    Discard(ViewId),
}

/// Host that records everything the engine asks of it
#[derive(Debug, Default)]
pub(crate) struct MockHost {
    pub events: Vec<HostEvent>,
    pub shifts: Vec<i32>,
    pub discarded: Vec<ViewId>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowHost for MockHost {
    fn attach(&mut self, view: ViewId, position: usize, top: i32) {
        self.events.push(HostEvent::Attach(view, position, top));
    }

    fn detach(&mut self, view: ViewId) {
        self.events.push(HostEvent::Detach(view));
    }

    fn shift(&mut self, delta: i32) {
        self.events.push(HostEvent::Shift(delta));
        self.shifts.push(delta);
    }

    fn discard(&mut self, view: ViewId) {
        self.events.push(HostEvent::Discard(view));
        self.discarded.push(view);
    }
}

/// Shared recording host for when the engine owns the box
#[derive(Debug, Default, Clone)]
pub(crate) struct SharedHost(pub Arc<Mutex<MockHost>>);

impl RowHost for SharedHost {
    fn attach(&mut self, view: ViewId, position: usize, top: i32) {
        self.0.lock().unwrap().attach(view, position, top);
    }

    fn detach(&mut self, view: ViewId) {
        self.0.lock().unwrap().detach(view);
    }

    fn shift(&mut self, delta: i32) {
        self.0.lock().unwrap().shift(delta);
    }

    fn discard(&mut self, view: ViewId) {
        self.0.lock().unwrap().discard(view);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Notification {
    ScrollChanged(usize, usize, usize),
    StateChanged(ReportedScrollState),
    Recycled(ViewId),
    Click(usize),
    LongPress(usize),
    EdgePull(Edge, f32),
    EdgeAbsorb(Edge, f32),
}

/// Callbacks that append every notification to a shared log
#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingCallbacks(pub Arc<Mutex<Vec<Notification>>>);

impl RecordingCallbacks {
    pub fn log(&self) -> Vec<Notification> {
        self.0.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<usize> {
        self.log()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Click(position) => Some(position),
                _ => None,
            })
            .collect()
    }

    pub fn states(&self) -> Vec<ReportedScrollState> {
        self.log()
            .into_iter()
            .filter_map(|n| match n {
                Notification::StateChanged(state) => Some(state),
                _ => None,
            })
            .collect()
    }
}

impl ListCallbacks for RecordingCallbacks {
    fn on_scroll_changed(&mut self, first: usize, visible: usize, total: usize) {
        self.0
            .lock()
            .unwrap()
            .push(Notification::ScrollChanged(first, visible, total));
    }

    fn on_scroll_state_changed(&mut self, state: ReportedScrollState) {
        self.0.lock().unwrap().push(Notification::StateChanged(state));
    }

    fn on_recycled(&mut self, view: ViewId) {
        self.0.lock().unwrap().push(Notification::Recycled(view));
    }

    fn on_row_click(&mut self, position: usize) {
        self.0.lock().unwrap().push(Notification::Click(position));
    }

    fn on_row_long_press(&mut self, position: usize) {
        self.0.lock().unwrap().push(Notification::LongPress(position));
    }

    fn on_edge_pull(&mut self, edge: Edge, distance: f32) {
        self.0
            .lock()
            .unwrap()
            .push(Notification::EdgePull(edge, distance));
    }

    fn on_edge_absorb(&mut self, edge: Edge, velocity: f32) {
        self.0
            .lock()
            .unwrap()
            .push(Notification::EdgeAbsorb(edge, velocity));
    }
}
