//! NT35950 Hardware Abstraction Layer
//!
//! This crate defines the traits the panel driver needs from the platform:
//! a MIPI DSI command link, the regulator framework and the reset GPIO.
//! The driver crates only ever talk to hardware through these traits, so
//! the same sequencing code runs on a real DSI host or against mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nt35950-drivers (sequencing)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nt35950-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┼───────────┐
//!         ▼           ▼           ▼
//!    DSI host    regulators    reset GPIO
//! ```
//!
//! # Traits
//!
//! - [`dsi::DsiLink`] - One DSI command/video link to the driver IC
//! - [`regulator::RegulatorBulk`] - The panel supply rails as one bulk set
//! - [`gpio::ResetPin`] - The RESX line

#![no_std]
#![deny(unsafe_code)]

pub mod dsi;
pub mod gpio;
pub mod regulator;

// Re-export key traits at crate root for convenience
pub use dsi::{DsiLink, LinkSettings, LinkTarget, ModeFlags, PixelFormat, TransportError};
pub use gpio::{Level, ResetPin};
pub use regulator::{RegulatorBulk, RegulatorError};
