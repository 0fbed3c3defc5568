//! Command encoding for the Novatek NT35950 driver IC
//!
//! Two command sets are spoken on the DSI command link:
//!
//! - [`dcs`] - MIPI Display Command Set operations with standard meaning
//!   (sleep, display on/off, tearing effect)
//! - [`mcs`] - Manufacturer Command Set, only valid after the matching
//!   CMD2 page has been selected
//!
//! Every builder returns a complete frame: op-code followed by parameters.
//! Frames are plain byte arrays so they can be handed straight to a link.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod dcs;
pub mod mcs;

pub use dcs::TearMode;
pub use mcs::{Cmd2Page, CompressionMode, SprMode};
