//! MIPI DSI link abstractions
//!
//! A panel is reached through one or two DSI links. Each link carries
//! command frames (DCS and manufacturer commands) and, once attached,
//! the video stream.

use core::ops::BitOr;

/// Errors reported by a DSI host while transferring a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Transfer did not complete in time
    Timeout,
    /// Peripheral did not acknowledge the packet
    NoAck,
    /// Link is not attached to its host
    NotAttached,
    /// Host-specific failure code
    Host(i32),
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransportError::Timeout => write!(f, "DSI transfer timed out"),
            TransportError::NoAck => write!(f, "DSI peripheral did not acknowledge"),
            TransportError::NotAttached => write!(f, "DSI link not attached"),
            TransportError::Host(code) => write!(f, "DSI host error {code}"),
        }
    }
}

impl core::error::Error for TransportError {}

/// Which of the two physical links a frame or setting applies to
///
/// On dual-link panels the primary link drives the left half and the
/// secondary link the right half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkTarget {
    Primary,
    Secondary,
}

/// Pixel format on the video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    #[default]
    Rgb888,
    Rgb666,
    Rgb666Packed,
    Rgb565,
}

/// Link mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeFlags(u32);

impl ModeFlags {
    /// Video mode (otherwise command mode)
    pub const VIDEO: Self = Self(1 << 0);
    /// Send an EoT packet after each transmission
    pub const EOT_PACKET: Self = Self(1 << 1);
    /// Clock lane may stop between transfers
    pub const CLOCK_NON_CONTINUOUS: Self = Self(1 << 2);
    /// Send commands in low-power mode
    pub const LOW_POWER: Self = Self(1 << 3);

    /// No flags set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check if all flags in `other` are set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the flags in `other`
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the flags in `other`
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for ModeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Link parameters handed to the host at attach time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkSettings {
    /// Number of data lanes
    pub lanes: u8,
    /// Pixel format on the video stream
    pub format: PixelFormat,
    /// Initial mode flags
    pub mode_flags: ModeFlags,
}

/// One DSI link to the panel driver IC
///
/// Implementations wrap the platform DSI host. Writes are blocking: they
/// return once the frame has been transferred or the host gave up.
pub trait DsiLink {
    /// Write one raw command frame
    ///
    /// The first byte is the command op-code, the rest its parameters.
    /// Returns the number of bytes transferred.
    fn write_buffer(&mut self, frame: &[u8]) -> Result<usize, TransportError>;

    /// Select low-power signaling for subsequent command transfers
    ///
    /// This is a transport setting, nothing is sent on the wire.
    fn set_low_power(&mut self, enabled: bool);

    /// Attach the link to its host with the given settings
    fn attach(&mut self, settings: &LinkSettings) -> Result<(), TransportError>;

    /// Detach the link from its host
    fn detach(&mut self) -> Result<(), TransportError>;
}

impl<T: DsiLink + ?Sized> DsiLink for &mut T {
    fn write_buffer(&mut self, frame: &[u8]) -> Result<usize, TransportError> {
        T::write_buffer(self, frame)
    }

    fn set_low_power(&mut self, enabled: bool) {
        T::set_low_power(self, enabled)
    }

    fn attach(&mut self, settings: &LinkSettings) -> Result<(), TransportError> {
        T::attach(self, settings)
    }

    fn detach(&mut self) -> Result<(), TransportError> {
        T::detach(self)
    }
}
