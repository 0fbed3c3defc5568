//! Error types for the panel driver
//!
//! - [`ConfigError`] - Bad static configuration, fatal at probe
//! - [`PowerError`] - A supply rail failed to enable
//! - [`ProtocolError`] - A command frame could not be sent
//! - [`Error`] - Everything a panel operation can return
//!
//! Collaborator errors ([`TransportError`], [`RegulatorError`],
//! [`ModeError`]) are carried inside these unchanged.

use nt35950_hal::{LinkTarget, RegulatorError, TransportError};

use crate::config::RailId;
use crate::traits::ModeError;

/// Logical command step, used to report where a sequence failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// CMD2 page select (page number)
    SelectPage(u8),
    /// Sub-pixel rendering enable
    SprEnable,
    /// Sub-pixel rendering mode
    SprMode,
    /// Undocumented page 0 calibration write
    Calibration,
    /// Data compression mode
    DataCompression,
    /// Upscaler enable
    Scaler,
    /// Display output control
    OutputControl,
    /// Frame-rate timing table
    FrameRate,
    /// DCS set tear on
    TearOn,
    /// DCS set tear scanline
    TearScanline,
    /// Undocumented page 1 write
    Page1Setup,
    /// Black frame injection, 1-based sub-send (1 and 4 are the test
    /// command gate, 2 and 3 the black image frames)
    BlackFrame(u8),
    /// DCS exit sleep mode
    ExitSleep,
    /// DCS set display on
    DisplayOn,
    /// DCS set display off
    DisplayOff,
    /// DCS enter sleep mode
    EnterSleep,
}

/// Errors in static configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No model descriptor matches the compatible string
    UnknownModel,
    /// Compatible string does not fit the configuration buffer
    CompatibleTooLong,
    /// A rail cannot regulate inside its required window
    UnsupportedVoltage(RailId),
    /// Dual-link model probed without a secondary link
    MissingSecondaryLink,
    /// No frame-rate timing table for this refresh rate
    UnsupportedRefreshRate(u32),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::UnknownModel => write!(f, "no model matches the compatible string"),
            ConfigError::CompatibleTooLong => write!(f, "compatible string too long"),
            ConfigError::UnsupportedVoltage(rail) => {
                write!(f, "{} cannot regulate its required range", rail.supply_name())
            }
            ConfigError::MissingSecondaryLink => write!(f, "dual-link panel without secondary link"),
            ConfigError::UnsupportedRefreshRate(hz) => {
                write!(f, "no frame-rate table for {hz} Hz")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// A rail failed to enable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerError {
    pub rail: RailId,
    pub cause: RegulatorError,
}

impl core::fmt::Display for PowerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "failed to enable {}: {}", self.rail.supply_name(), self.cause)
    }
}

impl core::error::Error for PowerError {}

/// A command frame failed to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtocolError {
    /// Step that failed
    pub step: Step,
    /// Link the frame was sent on
    pub link: LinkTarget,
    /// Transport failure
    pub cause: TransportError,
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} failed on {:?} link: {}", self.step, self.link, self.cause)
    }
}

impl core::error::Error for ProtocolError {}

/// Errors returned by panel operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Config(ConfigError),
    Power(PowerError),
    Protocol(ProtocolError),
    /// A link could not be attached to its host
    Attach {
        link: LinkTarget,
        cause: TransportError,
    },
    /// The display pipeline rejected the mode
    Mode(ModeError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "configuration error: {e}"),
            Error::Power(e) => write!(f, "power error: {e}"),
            Error::Protocol(e) => write!(f, "protocol error: {e}"),
            Error::Attach { link, cause } => write!(f, "failed to attach {link:?} link: {cause}"),
            Error::Mode(e) => write!(f, "mode registration failed: {e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::Power(e) => Some(e),
            Error::Protocol(e) => Some(e),
            Error::Attach { cause, .. } => Some(cause),
            Error::Mode(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<PowerError> for Error {
    fn from(e: PowerError) -> Self {
        Error::Power(e)
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Error::Protocol(e)
    }
}

impl From<ModeError> for Error {
    fn from(e: ModeError) -> Self {
        Error::Mode(e)
    }
}
