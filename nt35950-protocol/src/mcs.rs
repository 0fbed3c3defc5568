//! Manufacturer Command Set (MCS)
//!
//! The NT35950 maps vendor registers into eight CMD2 pages. A page is
//! selected by writing the MAUCCTR unlock sequence followed by the page
//! number; every later MCS op-code is interpreted against that page until
//! another page is selected. Nothing checks this on the chip side, so the
//! caller is responsible for sending page frames in the right order.
//!
//! # Register map used by the driver
//!
//! | Page | Op-code | Name | Parameter |
//! |------|---------|------|-----------|
//! | 7 | 0xE3 | SPR_EN | 0x01 enables sub-pixel rendering |
//! | 7 | 0xEF | SPR_MODE | [`SprMode`] |
//! | 0 | 0x90 | DATA_COMPRESSION | [`CompressionMode`] |
//! | 0 | 0x58 | SCALER_FUNCTION | 0x01 enables upscaling |
//! | 0 | 0xB4 | DISP_OUTPUT_CTRL | SRAM_EN (bit 0), VIDEO_MODE (bit 4) |
//! | 0 | 0xBD | frame-rate timing | [`FRAME_RATE_60HZ`] |

/// Manufacturer command enable (CMD2 page select)
pub const MAUCCTR: u8 = 0xF0;

/// Unlock key written before the page number
pub const CMD2_UNLOCK_KEY: [u8; 4] = [0x55, 0xAA, 0x52, 0x08];

/// Resolution upscaling on/off
pub const SCALER_FUNCTION: u8 = 0x58;

/// Input data compression mode
pub const DATA_COMPRESSION: u8 = 0x90;

/// Display output control register
pub const DISP_OUTPUT_CTRL: u8 = 0xB4;
/// Display output control: frame SRAM enable
pub const DISP_OUT_SRAM_EN: u8 = 1 << 0;
/// Display output control: video mode input
pub const DISP_OUT_VIDEO_MODE: u8 = 1 << 4;

/// Sub-pixel rendering enable
pub const SPR_EN: u8 = 0xE3;
/// Sub-pixel rendering mode
pub const SPR_MODE: u8 = 0xEF;

/// Test command (CMD3) gate, last byte 0x80 opens it
pub const TEST_CMD_ENABLE: [u8; 5] = [0xFF, 0xAA, 0x55, 0xA5, 0x80];
/// Test command gate with the enable marker cleared
pub const TEST_CMD_DISABLE: [u8; 5] = [0xFF, 0xAA, 0x55, 0xA5, 0x00];

/// Black image injection, sent while the test command gate is open
pub const BLACK_IMAGE: [[u8; 2]; 2] = [[0x6F, 0x01], [0xF3, 0x10]];

/// Undocumented page 0 write issued by the vendor init sequence
pub const CALIBRATION: [u8; 2] = [0xC9, 0x01];

/// Frame-rate timing table for 60 Hz (page 0)
pub const FRAME_RATE_60HZ: [u8; 16] = [
    0xBD, 0x00, 0xAC, 0x0C, 0x0C, 0x00, 0x01, 0x56, 0x09, 0x09, 0x01, 0x01, 0x0C, 0x0C, 0x00,
    0xD9,
];

/// Undocumented page 1 write issued by the vendor init sequence
pub const PAGE1_SETUP: [u8; 3] = [0xD4, 0x88, 0x88];

/// CMD2 register page (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cmd2Page(u8);

impl Cmd2Page {
    /// Highest page number
    pub const MAX: u8 = 7;

    pub const PAGE0: Self = Self(0);
    pub const PAGE1: Self = Self(1);
    pub const PAGE7: Self = Self(7);

    /// Create a page, `None` if `page` is above [`Cmd2Page::MAX`]
    pub const fn new(page: u8) -> Option<Self> {
        if page > Self::MAX {
            None
        } else {
            Some(Self(page))
        }
    }

    /// Page number
    pub const fn number(self) -> u8 {
        self.0
    }
}

/// Data compression mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CompressionMode {
    /// Uncompressed input
    #[default]
    None = 0x00,
    /// Frame buffer compression
    Fbc = 0x02,
    /// VESA display stream compression
    Dsc = 0x03,
}

/// Sub-pixel rendering layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SprMode {
    /// YYG Rainbow-RGB
    #[default]
    YygRainbowRgb = 0x01,
}

/// Unlock and select a CMD2 page
pub const fn select_cmd2_page(page: Cmd2Page) -> [u8; 6] {
    let key = CMD2_UNLOCK_KEY;
    [MAUCCTR, key[0], key[1], key[2], key[3], page.number()]
}

pub const fn set_data_compression(mode: CompressionMode) -> [u8; 2] {
    [DATA_COMPRESSION, mode as u8]
}

pub const fn set_scaler(scale_up: bool) -> [u8; 2] {
    [SCALER_FUNCTION, scale_up as u8]
}

/// Display output control frame
///
/// Both flags share one parameter byte.
pub const fn set_display_output(video_mode: bool, sram_enable: bool) -> [u8; 2] {
    let mut flags = 0x00;
    if video_mode {
        flags |= DISP_OUT_VIDEO_MODE;
    }
    if sram_enable {
        flags |= DISP_OUT_SRAM_EN;
    }
    [DISP_OUTPUT_CTRL, flags]
}

pub const fn set_spr(enabled: bool) -> [u8; 2] {
    [SPR_EN, enabled as u8]
}

pub const fn set_spr_mode(mode: SprMode) -> [u8; 2] {
    [SPR_MODE, mode as u8]
}

/// Open or close the test command gate
pub const fn test_command(enabled: bool) -> [u8; 5] {
    if enabled {
        TEST_CMD_ENABLE
    } else {
        TEST_CMD_DISABLE
    }
}

/// Frame-rate timing table for a refresh rate
///
/// Only the 60 Hz table is known.
pub fn frame_rate_table(refresh_hz: u32) -> Option<&'static [u8; 16]> {
    match refresh_hz {
        60 => Some(&FRAME_RATE_60HZ),
        _ => None,
    }
}
