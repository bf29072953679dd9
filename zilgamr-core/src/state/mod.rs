//! Sweep state machine
//!
//! The controller cycles `Idle -> Sweeping -> Reporting -> Idle` forever.
//! Transitions are a pure function of the current phase and an event.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Phase;
