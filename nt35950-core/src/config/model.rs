//! Panel model descriptors
//!
//! Each supported panel variant is described by one immutable
//! [`ModelDescriptor`]. Descriptors are looked up once at probe time by
//! compatible string and never change afterwards.

use nt35950_hal::{LinkSettings, ModeFlags, PixelFormat};

/// Fixed display timing
///
/// Horizontal values are in pixels, vertical values in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeTiming {
    /// Mode name as reported to the display pipeline
    pub name: &'static str,
    /// Active pixels per line
    pub hdisplay: u16,
    pub h_front_porch: u16,
    pub h_sync: u16,
    pub h_back_porch: u16,
    /// Active lines per frame
    pub vdisplay: u16,
    pub v_front_porch: u16,
    pub v_sync: u16,
    pub v_back_porch: u16,
    /// Refresh rate in Hz
    pub refresh_hz: u32,
    /// Physical width of the active area in millimeters
    pub width_mm: u16,
    /// Physical height of the active area in millimeters
    pub height_mm: u16,
}

impl ModeTiming {
    pub const fn hsync_start(&self) -> u16 {
        self.hdisplay + self.h_front_porch
    }

    pub const fn hsync_end(&self) -> u16 {
        self.hsync_start() + self.h_sync
    }

    /// Total pixels per line including blanking
    pub const fn htotal(&self) -> u16 {
        self.hsync_end() + self.h_back_porch
    }

    pub const fn vsync_start(&self) -> u16 {
        self.vdisplay + self.v_front_porch
    }

    pub const fn vsync_end(&self) -> u16 {
        self.vsync_start() + self.v_sync
    }

    /// Total lines per frame including blanking
    pub const fn vtotal(&self) -> u16 {
        self.vsync_end() + self.v_back_porch
    }

    /// Pixel clock in kHz
    pub const fn clock_khz(&self) -> u32 {
        self.htotal() as u32 * self.vtotal() as u32 * self.refresh_hz / 1000
    }
}

/// Addressing of the secondary DSI device on dual-link panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SecondaryLinkInfo {
    /// Device type registered on the secondary host
    pub device_type: &'static str,
    /// DSI virtual channel
    pub channel: u8,
}

/// Static description of one panel model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModelDescriptor {
    /// Human-readable model name
    pub name: &'static str,
    /// Secondary link addressing (dual-link models only)
    pub secondary_link: Option<SecondaryLinkInfo>,
    /// Data lanes per link
    pub lanes: u8,
    /// The single supported mode
    pub mode: &'static ModeTiming,
    /// Enable the driver IC frame SRAM
    pub sram_enable: bool,
    /// Video mode (otherwise command mode)
    pub video_mode: bool,
    /// Panel is split over two DSI links
    pub dual_link: bool,
}

impl ModelDescriptor {
    /// Settings used to attach each link of this model
    pub fn link_settings(&self) -> LinkSettings {
        let mut mode_flags =
            ModeFlags::EOT_PACKET | ModeFlags::CLOCK_NON_CONTINUOUS | ModeFlags::LOW_POWER;
        if self.video_mode {
            mode_flags.insert(ModeFlags::VIDEO);
        }

        LinkSettings {
            lanes: self.lanes,
            format: PixelFormat::Rgb888,
            mode_flags,
        }
    }
}

// TODO: add the 2160x3840 mode once FBC/DSC input is brought up
pub static SHARP_LS055D1SX04_MODE: ModeTiming = ModeTiming {
    name: "1080x1920",
    hdisplay: 1080,
    h_front_porch: 400,
    h_sync: 40,
    h_back_porch: 300,
    vdisplay: 1920,
    v_front_porch: 12,
    v_sync: 2,
    v_back_porch: 10,
    refresh_hz: 60,
    width_mm: 68,
    height_mm: 121,
};

pub static SHARP_LS055D1SX04: ModelDescriptor = ModelDescriptor {
    name: "Sharp LS055D1SX04",
    secondary_link: Some(SecondaryLinkInfo {
        device_type: "LS055D1SX04",
        channel: 0,
    }),
    lanes: 4,
    mode: &SHARP_LS055D1SX04_MODE,
    sram_enable: true,
    video_mode: false,
    dual_link: true,
};

/// Compatible string to model table
pub static MODEL_TABLE: &[(&str, &ModelDescriptor)] =
    &[("sharp,ls055d1sx04", &SHARP_LS055D1SX04)];

/// Find the model descriptor for a compatible string
pub fn lookup(compatible: &str) -> Option<&'static ModelDescriptor> {
    MODEL_TABLE
        .iter()
        .find(|(name, _)| *name == compatible)
        .map(|(_, desc)| *desc)
}
