//! Board-agnostic definitions for the NT35950 panel driver
//!
//! This crate contains everything about the panel that does not touch
//! hardware:
//!
//! - Model descriptors and the compatible-string lookup table
//! - Mode timing for the single supported mode
//! - The supply rail set and its power-on sequence
//! - Panel configuration handed in at probe time
//! - Lifecycle state
//! - Error taxonomy
//! - The mode-registration trait implemented by the display pipeline

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod state;
pub mod traits;

pub use error::{ConfigError, Error, PowerError, ProtocolError, Step};
pub use state::{LifecycleState, Transition};
