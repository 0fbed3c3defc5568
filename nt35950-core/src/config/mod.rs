//! Configuration types
//!
//! Static per-model data and the board configuration handed to probe.

pub mod model;
pub mod panel;
pub mod rails;

pub use model::*;
pub use panel::*;
pub use rails::*;
