//! Flywheel Core Primitives
//!
//! Foundational types shared by the Flywheel list engine:
//!
//! - **Event Types**: pointer/window event identifiers and payloads
//! - **State Machines**: typed transition tables for interaction states
//! - **View Handles**: opaque identity for row visuals owned by the host
//!
//! # Example
//!
//! ```rust
//! use flywheel_core::fsm::{Machine, StateTransitions};
//! use flywheel_core::events::event_types::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Press {
//!     #[default]
//!     Idle,
//!     Held,
//! }
//!
//! impl StateTransitions for Press {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Press::Idle, POINTER_DOWN) => Some(Press::Held),
//!             (Press::Held, POINTER_UP) => Some(Press::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut machine = Machine::new(Press::Idle);
//! machine.send(POINTER_DOWN);
//! assert_eq!(machine.current(), Press::Held);
//! ```

pub mod error;
pub mod events;
pub mod fsm;
pub mod handle;

pub use error::ConfigError;
pub use events::{EventType, PointerEvent};
pub use fsm::{Machine, StateTransitions};
pub use handle::ViewId;
