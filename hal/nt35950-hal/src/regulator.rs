//! Regulator abstractions
//!
//! The panel supplies are handled as one bulk set, addressed by index.
//! Which index maps to which supply is decided by the driver.

/// Errors reported by the regulator framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegulatorError {
    /// No supply exists at this index
    NotFound,
    /// Supply reported a fault (overcurrent, undervoltage)
    Fault,
    /// Platform-specific failure code
    Host(i32),
}

impl core::fmt::Display for RegulatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegulatorError::NotFound => write!(f, "regulator not found"),
            RegulatorError::Fault => write!(f, "regulator fault"),
            RegulatorError::Host(code) => write!(f, "regulator error {code}"),
        }
    }
}

impl core::error::Error for RegulatorError {}

/// Bulk set of supply rails
pub trait RegulatorBulk {
    /// Enable the supply at `index`
    ///
    /// Blocks until the regulator reports the rail is up (ramp delay
    /// included), or fails.
    fn enable(&mut self, index: usize) -> Result<(), RegulatorError>;

    /// Disable every supply in the set
    ///
    /// Best-effort: supplies that are already off are skipped and no
    /// error is reported.
    fn disable_all(&mut self);

    /// Check whether the supply at `index` can regulate within
    /// `min_uv..=max_uv` microvolts
    ///
    /// Negative supplies are queried with their magnitude.
    fn is_supported_voltage(&mut self, index: usize, min_uv: u32, max_uv: u32) -> bool;
}
