//! Typed interaction state machines
//!
//! Interaction states are closed sets known at compile time, so the
//! transition table lives in a trait implementation on the state enum
//! itself rather than a boxed-callback runtime. `Machine` wraps a state
//! with a transition history used by diagnostics and by tests asserting
//! that only legal edges are ever taken.

use std::hash::Hash;

/// Trait for state types that can handle event transitions
///
/// Implement this on a state enum to define how events cause transitions.
/// Returning `None` means the event does not transition out of the current
/// state (it is ignored, not an error).
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum ButtonState {
///     #[default]
///     Idle,
///     Pressed,
/// }
///
/// impl StateTransitions for ButtonState {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         use flywheel_core::events::event_types::*;
///         match (self, event) {
///             (ButtonState::Idle, POINTER_DOWN) => Some(ButtonState::Pressed),
///             (ButtonState::Pressed, POINTER_UP) => Some(ButtonState::Idle),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// A recorded transition: (from, event, to)
pub type TransitionRecord<S> = (S, u32, S);

/// A state machine instance over a `StateTransitions` type
#[derive(Debug, Clone)]
pub struct Machine<S: StateTransitions> {
    current: S,
    /// History of state transitions (for diagnostics and tests)
    history: Vec<TransitionRecord<S>>,
}

impl<S: StateTransitions> Machine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: u32) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, potentially triggering a transition.
    ///
    /// Returns the state after the event (unchanged if the event is not
    /// handled in the current state).
    pub fn send(&mut self, event: u32) -> S {
        if let Some(next) = self.current.on_event(event) {
            tracing::trace!(?self.current, event, ?next, "fsm transition");
            self.history.push((self.current, event, next));
            self.current = next;
        }
        self.current
    }

    /// Force a transition outside the table, recording it against `event`.
    ///
    /// Used for interrupts that must always win (pointer-cancel, window
    /// focus loss) regardless of the current state.
    pub fn force(&mut self, event: u32, state: S) {
        if self.current != state {
            tracing::trace!(?self.current, event, ?state, "fsm forced transition");
            self.history.push((self.current, event, state));
            self.current = state;
        }
    }

    /// Get transition history
    pub fn history(&self) -> &[TransitionRecord<S>] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for Machine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Press {
        #[default]
        Idle,
        Held,
    }

    impl StateTransitions for Press {
        fn on_event(&self, event: u32) -> Option<Self> {
            match (self, event) {
                (Press::Idle, POINTER_DOWN) => Some(Press::Held),
                (Press::Held, POINTER_UP) => Some(Press::Idle),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut machine = Machine::new(Press::Idle);
        assert_eq!(machine.current(), Press::Idle);

        machine.send(POINTER_DOWN);
        assert_eq!(machine.current(), Press::Held);

        machine.send(POINTER_UP);
        assert_eq!(machine.current(), Press::Idle);
    }

    #[test]
    fn test_unhandled_event_keeps_state() {
        let mut machine = Machine::new(Press::Idle);
        machine.send(POINTER_UP);
        assert_eq!(machine.current(), Press::Idle);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn test_can_send() {
        let machine = Machine::new(Press::Idle);
        assert!(machine.can_send(POINTER_DOWN));
        assert!(!machine.can_send(POINTER_UP));
    }

    #[test]
    fn test_history_records_edges() {
        let mut machine = Machine::new(Press::Idle);
        machine.send(POINTER_DOWN);
        machine.send(POINTER_UP);

        let history = machine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], (Press::Idle, POINTER_DOWN, Press::Held));
        assert_eq!(history[1], (Press::Held, POINTER_UP, Press::Idle));
    }

    #[test]
    fn test_force_records_and_overrides() {
        let mut machine = Machine::new(Press::Held);
        machine.force(POINTER_CANCEL, Press::Idle);
        assert_eq!(machine.current(), Press::Idle);
        assert_eq!(machine.history(), &[(Press::Held, POINTER_CANCEL, Press::Idle)]);

        // Forcing into the current state records nothing.
        machine.force(POINTER_CANCEL, Press::Idle);
        assert_eq!(machine.history().len(), 1);
    }
}
