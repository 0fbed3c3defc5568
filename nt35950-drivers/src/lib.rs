//! Hardware sequencing for Novatek NT35950 panels
//!
//! This crate drives the panel through its collaborators:
//!
//! - `channel`: command channel over one or two DSI links
//! - `commands`: the NT35950 command vocabulary
//! - `rails`: power rail sequencing
//! - `reset`: reset line sequencing
//! - `panel`: the Prepare/Unprepare lifecycle
//!
//! Logging goes through `defmt` or `log` depending on the enabled feature.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod channel;
pub mod commands;
pub mod panel;
pub mod rails;
pub mod reset;

#[cfg(test)]
mod mock;

pub use channel::{CommandChannel, DualLink};
pub use panel::{Panel, PanelParts};
pub use rails::RailSequencer;
pub use reset::{GpioResetPin, ResetSequencer};
