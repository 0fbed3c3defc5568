//! Display pipeline traits
//!
//! These traits define what the panel driver needs from the display
//! pipeline it is registered with.

pub mod mode;

pub use mode::{ModeError, ModeRegistry, ModeType};
