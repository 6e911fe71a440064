//! Event identifiers and payloads
//!
//! The viewport host translates platform input into these events before
//! feeding them to the engine. Identifiers are plain `u32`s so interaction
//! state machines can match on them directly.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Gesture aborted by the platform (palm rejection, grab by another view)
    pub const POINTER_CANCEL: EventType = 4;
    pub const SCROLL: EventType = 30;

    // Window lifecycle events
    pub const WINDOW_FOCUS: EventType = 50;
    pub const WINDOW_BLUR: EventType = 51;
}

/// A pointer event with viewport-local coordinates
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub event_type: EventType,
    /// Platform pointer identifier; gestures are tracked per pointer
    pub pointer_id: u32,
    pub x: f32,
    pub y: f32,
    /// Monotonic timestamp in milliseconds
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(event_type: EventType, pointer_id: u32, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            event_type,
            pointer_id,
            x,
            y,
            time_ms,
        }
    }

    /// Shorthand for a primary-pointer event
    pub fn primary(event_type: EventType, x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(event_type, 0, x, y, time_ms)
    }
}
