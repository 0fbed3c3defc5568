//! Power rail sequencer
//!
//! Enables the six panel supplies in [`POWER_ON_SEQUENCE`] order with the
//! required settle delays, and disables them as one bulk set.

use embedded_hal::delay::DelayNs;
use nt35950_core::config::{RailId, POWER_ON_SEQUENCE, RAIL_SET};
use nt35950_core::{ConfigError, PowerError};
use nt35950_hal::RegulatorBulk;

/// Sequencer owning the panel supply set
pub struct RailSequencer<R> {
    supply: R,
}

impl<R: RegulatorBulk> RailSequencer<R> {
    pub fn new(supply: R) -> Self {
        Self { supply }
    }

    /// Check every rail can regulate inside its required window
    ///
    /// Returns the first rail that cannot. Nothing is enabled.
    pub fn validate_ranges(&mut self) -> Result<(), ConfigError> {
        for rail in RAIL_SET {
            let window = rail.required_window();
            if !self
                .supply
                .is_supported_voltage(rail.index(), window.min_uv, window.max_uv)
            {
                return Err(ConfigError::UnsupportedVoltage(rail));
            }
        }
        Ok(())
    }

    /// Enable every rail in power-on order
    ///
    /// Stops at the first rail that fails. Rails enabled before it stay
    /// on; the caller unwinds with [`disable_all`](Self::disable_all).
    pub fn enable_all<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PowerError> {
        for step in POWER_ON_SEQUENCE {
            self.enable(step.rail)?;
            if step.settle_us > 0 {
                delay.delay_us(step.settle_us);
            }
        }
        Ok(())
    }

    /// Disable the whole set, whatever state each rail is in
    pub fn disable_all(&mut self) {
        self.supply.disable_all();
    }

    fn enable(&mut self, rail: RailId) -> Result<(), PowerError> {
        self.supply
            .enable(rail.index())
            .map_err(|cause| PowerError { rail, cause })
    }

    /// Give the supply set back
    pub fn release(self) -> R {
        self.supply
    }
}
