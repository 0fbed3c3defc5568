//! Panel lifecycle state
//!
//! The panel is either unpowered or fully initialized. Transitions are
//! idempotent: requesting the state the panel is already in changes
//! nothing.

pub mod lifecycle;

pub use lifecycle::{LifecycleState, Transition};
