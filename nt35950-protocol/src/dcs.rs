//! MIPI DCS standard commands

/// Enter sleep mode
pub const ENTER_SLEEP_MODE: u8 = 0x10;
/// Exit sleep mode
pub const EXIT_SLEEP_MODE: u8 = 0x11;
/// Blank the display output
pub const SET_DISPLAY_OFF: u8 = 0x28;
/// Show the frame memory
pub const SET_DISPLAY_ON: u8 = 0x29;
/// Enable the tearing effect output
pub const SET_TEAR_ON: u8 = 0x35;
/// Scanline at which the tearing effect signal fires
pub const SET_TEAR_SCANLINE: u8 = 0x44;

/// Tearing effect output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TearMode {
    /// Signal on V-blank only
    #[default]
    VBlank = 0x00,
    /// Signal on both V-blank and H-blank
    VHBlank = 0x01,
}

pub const fn enter_sleep_mode() -> [u8; 1] {
    [ENTER_SLEEP_MODE]
}

pub const fn exit_sleep_mode() -> [u8; 1] {
    [EXIT_SLEEP_MODE]
}

pub const fn set_display_off() -> [u8; 1] {
    [SET_DISPLAY_OFF]
}

pub const fn set_display_on() -> [u8; 1] {
    [SET_DISPLAY_ON]
}

pub const fn set_tear_on(mode: TearMode) -> [u8; 2] {
    [SET_TEAR_ON, mode as u8]
}

/// Tear scanline frame, line number big-endian
pub const fn set_tear_scanline(scanline: u16) -> [u8; 3] {
    [SET_TEAR_SCANLINE, (scanline >> 8) as u8, scanline as u8]
}
