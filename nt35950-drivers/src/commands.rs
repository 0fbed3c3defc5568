//! NT35950 command vocabulary
//!
//! Typed operations on top of [`CommandChannel`]. Each operation writes
//! fixed frames to the primary link and reports the failing [`Step`].
//! Only the low-power flag is applied to both links.
//!
//! Manufacturer commands are only meaningful inside the CMD2 page they
//! belong to; sequencing pages is up to the caller.

use nt35950_core::{ProtocolError, Step};
use nt35950_hal::{DsiLink, LinkTarget};
use nt35950_protocol::{dcs, mcs, Cmd2Page, CompressionMode, SprMode, TearMode};

use crate::channel::CommandChannel;

impl<L: DsiLink> CommandChannel<L> {
    /// Unlock manufacturer commands and select a CMD2 page
    pub fn select_page(&mut self, page: Cmd2Page) -> Result<(), ProtocolError> {
        self.send_primary(&mcs::select_cmd2_page(page), Step::SelectPage(page.number()))?;
        Ok(())
    }

    /// Set input data compression (page 0)
    pub fn set_data_compression(&mut self, mode: CompressionMode) -> Result<(), ProtocolError> {
        self.send_primary(&mcs::set_data_compression(mode), Step::DataCompression)?;
        Ok(())
    }

    /// Enable or disable resolution upscaling (page 0)
    pub fn set_scaler(&mut self, scale_up: bool) -> Result<(), ProtocolError> {
        self.send_primary(&mcs::set_scaler(scale_up), Step::Scaler)?;
        Ok(())
    }

    /// Set display output control flags (page 0)
    pub fn set_output_control(&mut self, video_mode: bool, sram_enable: bool) -> Result<(), ProtocolError> {
        self.send_primary(
            &mcs::set_display_output(video_mode, sram_enable),
            Step::OutputControl,
        )?;
        Ok(())
    }

    /// Enable sub-pixel rendering with the given layout (page 7)
    pub fn enable_spr(&mut self, mode: SprMode) -> Result<(), ProtocolError> {
        self.send_primary(&mcs::set_spr(true), Step::SprEnable)?;
        self.send_primary(&mcs::set_spr_mode(mode), Step::SprMode)?;
        Ok(())
    }

    /// Write a black image through the test command gate
    ///
    /// Four writes: open the gate, two black image frames, close the gate.
    /// A failure after the first write leaves the gate open; the error
    /// names the failing sub-send.
    pub fn inject_black_frame(&mut self) -> Result<(), ProtocolError> {
        self.send_primary(&mcs::test_command(true), Step::BlackFrame(1))?;
        for (i, frame) in mcs::BLACK_IMAGE.iter().enumerate() {
            self.send_primary(frame, Step::BlackFrame(i as u8 + 2))?;
        }
        self.send_primary(&mcs::test_command(false), Step::BlackFrame(4))?;
        Ok(())
    }

    /// Enable the tearing effect signal at `scanline`
    pub fn set_tear_sync(&mut self, mode: TearMode, scanline: u16) -> Result<(), ProtocolError> {
        self.send_primary(&dcs::set_tear_on(mode), Step::TearOn)
            .inspect_err(|e| error!("Failed to set tear on: {:?}", e))?;
        self.send_primary(&dcs::set_tear_scanline(scanline), Step::TearScanline)
            .inspect_err(|e| error!("Failed to set tear scanline: {:?}", e))?;
        Ok(())
    }

    /// Write an opaque vendor frame verbatim
    pub fn write_opaque(&mut self, frame: &[u8], step: Step) -> Result<(), ProtocolError> {
        self.send_primary(frame, step)?;
        Ok(())
    }

    pub fn exit_sleep_mode(&mut self) -> Result<(), ProtocolError> {
        self.send_primary(&dcs::exit_sleep_mode(), Step::ExitSleep)?;
        Ok(())
    }

    pub fn enter_sleep_mode(&mut self) -> Result<(), ProtocolError> {
        self.send_primary(&dcs::enter_sleep_mode(), Step::EnterSleep)?;
        Ok(())
    }

    pub fn set_display_on(&mut self) -> Result<(), ProtocolError> {
        self.send_primary(&dcs::set_display_on(), Step::DisplayOn)?;
        Ok(())
    }

    pub fn set_display_off(&mut self) -> Result<(), ProtocolError> {
        self.send_primary(&dcs::set_display_off(), Step::DisplayOff)?;
        Ok(())
    }

    /// Set low-power signaling on one link
    pub fn set_low_power_mode(&mut self, target: LinkTarget, enabled: bool) {
        self.set_low_power(target, enabled);
    }

    /// Set low-power signaling on every present link, primary first
    pub fn set_low_power_mode_all(&mut self, enabled: bool) {
        self.set_low_power(LinkTarget::Primary, enabled);
        self.set_low_power(LinkTarget::Secondary, enabled);
    }
}
