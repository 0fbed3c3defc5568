//! Mode registration trait

use crate::config::ModeTiming;

/// Errors reported by the display pipeline when registering a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeError {
    /// No memory to duplicate the mode
    OutOfMemory,
}

impl core::fmt::Display for ModeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ModeError::OutOfMemory => write!(f, "out of memory"),
        }
    }
}

impl core::error::Error for ModeError {}

/// Mode type flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeType {
    /// Mode comes from the driver rather than EDID
    pub driver: bool,
    /// Mode should be chosen by default
    pub preferred: bool,
}

impl ModeType {
    /// Driver-provided preferred mode
    pub const DRIVER_PREFERRED: Self = Self {
        driver: true,
        preferred: true,
    };
}

/// Display pipeline side of mode probing
///
/// Called by the panel when the connector asks for its modes.
pub trait ModeRegistry {
    /// Add a probed mode to the connector
    ///
    /// The pixel clock is `timing.clock_khz()`.
    fn add_probed_mode(&mut self, timing: &ModeTiming, mode_type: ModeType)
        -> Result<(), ModeError>;

    /// Report the physical size of the active area
    fn set_physical_size(&mut self, width_mm: u16, height_mm: u16);
}
