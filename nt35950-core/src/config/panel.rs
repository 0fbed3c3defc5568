//! Board-level panel configuration
//!
//! This is what the board hands to probe: which model is wired up and how
//! strictly the supply rails are checked.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::model::{self, ModelDescriptor};
use crate::error::ConfigError;

/// Maximum compatible string length
pub const MAX_COMPATIBLE_LEN: usize = 32;

/// Compatible string used when none is configured
pub const DEFAULT_COMPATIBLE: &str = "sharp,ls055d1sx04";

/// How rail voltage validation failures are treated at probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VoltageCheck {
    /// Log the unsupported rail and continue
    #[default]
    Advisory,
    /// Fail probe with [`ConfigError::UnsupportedVoltage`]
    Strict,
}

/// Panel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Compatible string selecting the model descriptor
    pub compatible: String<MAX_COMPATIBLE_LEN>,
    /// Rail voltage validation policy
    pub voltage_check: VoltageCheck,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let mut compatible = String::new();
        // Fits: DEFAULT_COMPATIBLE is shorter than MAX_COMPATIBLE_LEN
        let _ = compatible.push_str(DEFAULT_COMPATIBLE);
        Self {
            compatible,
            voltage_check: VoltageCheck::default(),
        }
    }
}

impl PanelConfig {
    /// Create a config for a compatible string
    ///
    /// Fails with [`ConfigError::CompatibleTooLong`] if the string does
    /// not fit.
    pub fn new(compatible: &str, voltage_check: VoltageCheck) -> Result<Self, ConfigError> {
        let mut s = String::new();
        s.push_str(compatible)
            .map_err(|_| ConfigError::CompatibleTooLong)?;
        Ok(Self {
            compatible: s,
            voltage_check,
        })
    }

    /// Resolve the model descriptor
    pub fn model(&self) -> Result<&'static ModelDescriptor, ConfigError> {
        model::lookup(&self.compatible).ok_or(ConfigError::UnknownModel)
    }
}
