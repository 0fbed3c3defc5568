//! NT35950 panel lifecycle
//!
//! [`Panel`] owns the links, supplies and reset line of one logical panel
//! and drives them through the Prepare and Unprepare transitions.
//!
//! Prepare is fail-fast: once rails are on, any failure powers them off
//! again before the error is returned. Unprepare always completes; command
//! failures on the way down are logged and kept in
//! [`Panel::shutdown_faults`].

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use nt35950_core::config::{ModelDescriptor, PanelConfig, VoltageCheck};
use nt35950_core::traits::{ModeRegistry, ModeType};
use nt35950_core::{ConfigError, Error, LifecycleState, ProtocolError, Step, Transition};
use nt35950_hal::{DsiLink, RegulatorBulk, ResetPin};
use nt35950_protocol::{mcs, Cmd2Page, CompressionMode, SprMode, TearMode};

use crate::channel::{CommandChannel, DualLink};
use crate::rails::RailSequencer;
use crate::reset::ResetSequencer;

/// Wait after exit sleep and after display on
pub const WAKE_DELAY_MS: u32 = 120;

/// Wait between display off and enter sleep
pub const DISPLAY_OFF_DELAY_US: u32 = 10_000;

/// Wait after enter sleep before power removal
pub const SLEEP_DELAY_MS: u32 = 150;

/// Scanline the tearing effect signal fires on
const TEAR_SCANLINE: u16 = 0;

/// Collaborators handed back by [`Panel::remove`]
pub struct PanelParts<L, R, P> {
    pub links: DualLink<L>,
    pub supply: R,
    pub reset: P,
}

/// One logical NT35950 panel
pub struct Panel<L, R, P> {
    channel: CommandChannel<L>,
    rails: RailSequencer<R>,
    reset: ResetSequencer<P>,
    model: &'static ModelDescriptor,
    frame_rate: &'static [u8; 16],
    state: LifecycleState,
    shutdown_faults: Vec<ProtocolError, 2>,
}

impl<L, R, P> Panel<L, R, P>
where
    L: DsiLink,
    R: RegulatorBulk,
    P: ResetPin,
{
    /// Bind a panel to its collaborators
    ///
    /// Validates the supplies, resolves the model, attaches the links and
    /// parks the reset line low. The panel starts unprepared.
    pub fn probe(
        config: &PanelConfig,
        primary: L,
        secondary: Option<L>,
        supply: R,
        reset: P,
    ) -> Result<Self, Error> {
        let mut rails = RailSequencer::new(supply);
        if let Err(e) = rails.validate_ranges() {
            match config.voltage_check {
                VoltageCheck::Strict => return Err(e.into()),
                VoltageCheck::Advisory => warn!("{:?}, continuing", e),
            }
        }

        let model = config.model()?;
        info!("Panel model: {}", model.name);

        let refresh_hz = model.mode.refresh_hz;
        let frame_rate = mcs::frame_rate_table(refresh_hz)
            .ok_or(ConfigError::UnsupportedRefreshRate(refresh_hz))?;

        let secondary = match (model.dual_link, secondary) {
            (true, None) => return Err(ConfigError::MissingSecondaryLink.into()),
            (true, secondary) => secondary,
            (false, Some(_)) => {
                warn!("{} is single-link, ignoring secondary link", model.name);
                None
            }
            (false, None) => None,
        };

        let mut channel = CommandChannel::new(DualLink::new(primary, secondary));
        channel
            .attach_all(&model.link_settings())
            .map_err(|(link, cause)| {
                error!("Failed to attach {:?} link: {:?}", link, cause);
                Error::Attach { link, cause }
            })?;

        let mut reset = ResetSequencer::new(reset);
        reset.idle_low();

        Ok(Self {
            channel,
            rails,
            reset,
            model,
            frame_rate,
            state: LifecycleState::Unprepared,
            shutdown_faults: Vec::new(),
        })
    }

    /// Power up and initialize the panel
    ///
    /// No-op when already prepared. On failure the rails are off and the
    /// panel stays unprepared.
    pub fn prepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        if !self.state.needs(Transition::Prepare) {
            return Ok(());
        }

        if let Err(e) = self.rails.enable_all(delay) {
            error!("Failed to enable {:?}: {:?}", e.rail, e.cause);
            self.rails.disable_all();
            return Err(e.into());
        }

        self.reset.pulse(delay);

        if let Err(e) = self.init_sequence(delay) {
            error!("Failed to initialize panel: {:?}", e);
            self.rails.disable_all();
            return Err(e.into());
        }

        self.state = self.state.transition(Transition::Prepare);
        debug!("Panel prepared");
        Ok(())
    }

    fn init_sequence<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), ProtocolError> {
        let channel = &mut self.channel;
        channel.set_low_power_mode_all(true);

        channel.select_page(Cmd2Page::PAGE7)?;
        channel.enable_spr(SprMode::YygRainbowRgb)?;

        channel.select_page(Cmd2Page::PAGE0)?;
        channel.write_opaque(&mcs::CALIBRATION, Step::Calibration)?;
        channel.set_data_compression(CompressionMode::None)?;
        channel.set_scaler(true)?;
        channel.set_output_control(self.model.video_mode, self.model.sram_enable)?;

        channel.write_opaque(self.frame_rate, Step::FrameRate)?;
        channel.set_tear_sync(TearMode::VBlank, TEAR_SCANLINE)?;

        channel.select_page(Cmd2Page::PAGE1)?;
        channel.write_opaque(&mcs::PAGE1_SETUP, Step::Page1Setup)?;

        channel.inject_black_frame()?;

        channel.exit_sleep_mode()?;
        delay.delay_ms(WAKE_DELAY_MS);

        channel.set_display_on()?;
        delay.delay_ms(WAKE_DELAY_MS);

        channel.set_low_power_mode_all(false);
        Ok(())
    }

    /// Shut the panel down and power it off
    ///
    /// Never fails. No-op when already unprepared. Command failures are
    /// logged and recorded in [`shutdown_faults`](Self::shutdown_faults);
    /// the rails are disabled regardless.
    pub fn unprepare<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        if !self.state.needs(Transition::Unprepare) {
            return Ok(());
        }

        self.shutdown_faults.clear();

        if let Err(e) = self.channel.set_display_off() {
            error!("Failed to set display off: {:?}", e);
            self.record_fault(e);
        }
        delay.delay_us(DISPLAY_OFF_DELAY_US);

        if let Err(e) = self.channel.enter_sleep_mode() {
            error!("Failed to enter sleep mode: {:?}", e);
            self.record_fault(e);
        }
        delay.delay_ms(SLEEP_DELAY_MS);

        self.channel.set_low_power_mode_all(true);
        self.reset.idle_low();
        self.rails.disable_all();

        self.state = self.state.transition(Transition::Unprepare);
        debug!("Panel unprepared");
        Ok(())
    }

    fn record_fault(&mut self, fault: ProtocolError) {
        // Two shutdown commands, two slots
        let _ = self.shutdown_faults.push(fault);
    }

    /// Register the panel's modes with the display pipeline
    ///
    /// Returns the number of modes added.
    pub fn get_modes<M: ModeRegistry>(&self, registry: &mut M) -> Result<usize, Error> {
        let mode = self.model.mode;
        registry.add_probed_mode(mode, ModeType::DRIVER_PREFERRED)?;
        registry.set_physical_size(mode.width_mm, mode.height_mm);
        Ok(1)
    }

    /// Detach the links and hand the collaborators back
    ///
    /// Does not power the panel down; call [`unprepare`](Self::unprepare)
    /// first.
    pub fn remove(mut self) -> PanelParts<L, R, P> {
        self.channel.detach_all();
        PanelParts {
            links: self.channel.release(),
            supply: self.rails.release(),
            reset: self.reset.release(),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_prepared(&self) -> bool {
        self.state.is_prepared()
    }

    pub fn model(&self) -> &'static ModelDescriptor {
        self.model
    }

    /// Command failures from the last Unprepare
    pub fn shutdown_faults(&self) -> &[ProtocolError] {
        &self.shutdown_faults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{frame, Event, MockDelay, MockLink, MockModes, MockReset, MockSupply, Trace};
    use nt35950_core::config::{RailId, SHARP_LS055D1SX04_MODE};
    use nt35950_hal::{Level, LinkTarget, RegulatorError, TransportError};

    type TestPanel<'a> = Panel<MockLink<'a>, MockSupply<'a>, MockReset<'a>>;

    fn probe_with<'a>(
        trace: &'a Trace,
        primary: MockLink<'a>,
        supply: MockSupply<'a>,
    ) -> TestPanel<'a> {
        let panel = Panel::probe(
            &PanelConfig::default(),
            primary,
            Some(MockLink::new(trace, LinkTarget::Secondary)),
            supply,
            MockReset::new(trace),
        )
        .unwrap();
        trace.clear();
        panel
    }

    fn probe(trace: &Trace) -> TestPanel<'_> {
        probe_with(
            trace,
            MockLink::new(trace, LinkTarget::Primary),
            MockSupply::new(trace),
        )
    }

    fn failing_primary<'a>(trace: &'a Trace, frame: &'static [u8]) -> MockLink<'a> {
        let mut link = MockLink::new(trace, LinkTarget::Primary);
        link.fail_on(frame);
        link
    }

    #[test]
    fn test_probe_attaches_and_parks_reset() {
        let trace = Trace::new();
        let panel = Panel::probe(
            &PanelConfig::default(),
            MockLink::new(&trace, LinkTarget::Primary),
            Some(MockLink::new(&trace, LinkTarget::Secondary)),
            MockSupply::new(&trace),
            MockReset::new(&trace),
        )
        .unwrap();

        assert_eq!(panel.state(), LifecycleState::Unprepared);
        assert_eq!(panel.model().name, "Sharp LS055D1SX04");
        assert_eq!(
            trace.events(),
            [
                Event::Attach(LinkTarget::Primary),
                Event::Attach(LinkTarget::Secondary),
                Event::Reset(Level::Low),
            ]
        );
    }

    #[test]
    fn test_probe_unknown_model() {
        let trace = Trace::new();
        let config = PanelConfig::new("sharp,ls060t1sx01", VoltageCheck::Advisory).unwrap();
        let result = Panel::probe(
            &config,
            MockLink::new(&trace, LinkTarget::Primary),
            None,
            MockSupply::new(&trace),
            MockReset::new(&trace),
        );

        assert_eq!(result.err(), Some(Error::Config(ConfigError::UnknownModel)));
        assert!(trace.is_empty());
    }

    #[test]
    fn test_probe_requires_secondary_link() {
        let trace = Trace::new();
        let result = Panel::probe(
            &PanelConfig::default(),
            MockLink::new(&trace, LinkTarget::Primary),
            None,
            MockSupply::new(&trace),
            MockReset::new(&trace),
        );

        assert_eq!(
            result.err(),
            Some(Error::Config(ConfigError::MissingSecondaryLink))
        );
    }

    #[test]
    fn test_probe_voltage_policy() {
        let trace = Trace::new();
        let mut supply = MockSupply::new(&trace);
        supply.unsupported(RailId::Avee.index());
        let advisory = Panel::probe(
            &PanelConfig::default(),
            MockLink::new(&trace, LinkTarget::Primary),
            Some(MockLink::new(&trace, LinkTarget::Secondary)),
            supply,
            MockReset::new(&trace),
        );
        assert!(advisory.is_ok());

        let trace = Trace::new();
        let mut supply = MockSupply::new(&trace);
        supply.unsupported(RailId::Avee.index());
        let config = PanelConfig::new("sharp,ls055d1sx04", VoltageCheck::Strict).unwrap();
        let strict = Panel::probe(
            &config,
            MockLink::new(&trace, LinkTarget::Primary),
            Some(MockLink::new(&trace, LinkTarget::Secondary)),
            supply,
            MockReset::new(&trace),
        );
        assert_eq!(
            strict.err(),
            Some(Error::Config(ConfigError::UnsupportedVoltage(RailId::Avee)))
        );
        assert!(trace.is_empty());
    }

    #[test]
    fn test_probe_attach_failure() {
        let trace = Trace::new();
        let mut secondary = MockLink::new(&trace, LinkTarget::Secondary);
        secondary.fail_attach();
        let result = Panel::probe(
            &PanelConfig::default(),
            MockLink::new(&trace, LinkTarget::Primary),
            Some(secondary),
            MockSupply::new(&trace),
            MockReset::new(&trace),
        );

        assert_eq!(
            result.err(),
            Some(Error::Attach {
                link: LinkTarget::Secondary,
                cause: TransportError::Host(-19),
            })
        );
        assert_eq!(
            trace.events(),
            [
                Event::Attach(LinkTarget::Primary),
                Event::Detach(LinkTarget::Primary),
            ]
        );
    }

    #[test]
    fn test_prepare_sequence() {
        let trace = Trace::new();
        let mut panel = probe(&trace);
        let mut delay = MockDelay::new(&trace);

        panel.prepare(&mut delay).unwrap();
        assert!(panel.is_prepared());

        // Rails first, then the reset pulse, then commands
        let last_rail = trace
            .position(&Event::RailEnable(RailId::TouchAvdd.index()))
            .unwrap();
        let first_reset = trace.position(&Event::Reset(Level::High)).unwrap();
        let first_lpm = trace
            .position(&Event::LowPower(LinkTarget::Primary, true))
            .unwrap();
        assert!(last_rail < first_reset);
        assert!(first_reset < first_lpm);

        assert_eq!(
            trace.writes(LinkTarget::Primary),
            [
                frame(&[0xF0, 0x55, 0xAA, 0x52, 0x08, 0x07]),
                frame(&[0xE3, 0x01]),
                frame(&[0xEF, 0x01]),
                frame(&[0xF0, 0x55, 0xAA, 0x52, 0x08, 0x00]),
                frame(&[0xC9, 0x01]),
                frame(&[0x90, 0x00]),
                frame(&[0x58, 0x01]),
                frame(&[0xB4, 0x01]),
                frame(&SHARP_FRAME_RATE),
                frame(&[0x35, 0x00]),
                frame(&[0x44, 0x00, 0x00]),
                frame(&[0xF0, 0x55, 0xAA, 0x52, 0x08, 0x01]),
                frame(&[0xD4, 0x88, 0x88]),
                frame(&[0xFF, 0xAA, 0x55, 0xA5, 0x80]),
                frame(&[0x6F, 0x01]),
                frame(&[0xF3, 0x10]),
                frame(&[0xFF, 0xAA, 0x55, 0xA5, 0x00]),
                frame(&[0x11]),
                frame(&[0x29]),
            ]
        );
        assert!(trace.writes(LinkTarget::Secondary).is_empty());
        assert_eq!(trace.count(&Event::RailDisableAll), 0);

        let exit_sleep = trace
            .position(&Event::Write(LinkTarget::Primary, frame(&[0x11])))
            .unwrap();
        assert_eq!(trace.events()[exit_sleep + 1], Event::DelayUs(120_000));
        let display_on = trace
            .position(&Event::Write(LinkTarget::Primary, frame(&[0x29])))
            .unwrap();
        assert_eq!(trace.events()[display_on + 1], Event::DelayUs(120_000));
    }

    const SHARP_FRAME_RATE: [u8; 16] = [
        0xBD, 0x00, 0xAC, 0x0C, 0x0C, 0x00, 0x01, 0x56, 0x09, 0x09, 0x01, 0x01, 0x0C, 0x0C,
        0x00, 0xD9,
    ];

    #[test]
    fn test_low_power_symmetric_across_links() {
        let trace = Trace::new();
        let mut panel = probe(&trace);
        let mut delay = MockDelay::new(&trace);

        panel.prepare(&mut delay).unwrap();
        for enabled in [true, false] {
            assert_eq!(trace.count(&Event::LowPower(LinkTarget::Primary, enabled)), 1);
            assert_eq!(trace.count(&Event::LowPower(LinkTarget::Secondary, enabled)), 1);
        }
        assert_eq!(
            trace.events().last(),
            Some(&Event::LowPower(LinkTarget::Secondary, false))
        );
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let trace = Trace::new();
        let mut panel = probe(&trace);
        let mut delay = MockDelay::new(&trace);

        panel.prepare(&mut delay).unwrap();
        trace.clear();
        panel.prepare(&mut delay).unwrap();

        assert!(panel.is_prepared());
        assert!(trace.is_empty());
    }

    #[test]
    fn test_unprepare_is_idempotent() {
        let trace = Trace::new();
        let mut panel = probe(&trace);
        let mut delay = MockDelay::new(&trace);

        panel.unprepare(&mut delay).unwrap();
        assert!(trace.is_empty());

        panel.prepare(&mut delay).unwrap();
        panel.unprepare(&mut delay).unwrap();
        trace.clear();
        panel.unprepare(&mut delay).unwrap();

        assert_eq!(panel.state(), LifecycleState::Unprepared);
        assert!(trace.is_empty());
    }

    #[test]
    fn test_rail_failure_unwinds() {
        let trace = Trace::new();
        let mut supply = MockSupply::new(&trace);
        supply.fail_enable(RailId::Avdd.index());
        let mut panel = probe_with(&trace, MockLink::new(&trace, LinkTarget::Primary), supply);
        let mut delay = MockDelay::new(&trace);

        let err = panel.prepare(&mut delay).unwrap_err();
        assert_eq!(
            err,
            Error::Power(nt35950_core::PowerError {
                rail: RailId::Avdd,
                cause: RegulatorError::Fault,
            })
        );
        assert_eq!(trace.count(&Event::RailDisableAll), 1);
        assert_eq!(panel.state(), LifecycleState::Unprepared);

        // No reset pulse or command after a rail failure
        assert_eq!(trace.position(&Event::Reset(Level::High)), None);
        assert!(trace.writes(LinkTarget::Primary).is_empty());
    }

    #[test]
    fn test_black_frame_failure_unwinds() {
        let trace = Trace::new();
        let mut panel = probe_with(
            &trace,
            failing_primary(&trace, &[0xF3, 0x10]),
            MockSupply::new(&trace),
        );
        let mut delay = MockDelay::new(&trace);

        let err = panel.prepare(&mut delay).unwrap_err();
        let Error::Protocol(err) = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(err.step, Step::BlackFrame(3));
        assert_eq!(err.link, LinkTarget::Primary);

        assert_eq!(trace.count(&Event::RailDisableAll), 1);
        assert_eq!(trace.events().last(), Some(&Event::RailDisableAll));
        assert_eq!(panel.state(), LifecycleState::Unprepared);

        // Sleep exit is never reached
        assert_eq!(
            trace.position(&Event::Write(LinkTarget::Primary, frame(&[0x11]))),
            None
        );
    }

    #[test]
    fn test_prepare_retry_after_failure() {
        let trace = Trace::new();
        let mut panel = probe_with(
            &trace,
            failing_primary(&trace, &[0x29]),
            MockSupply::new(&trace),
        );
        let mut delay = MockDelay::new(&trace);

        let err = panel.prepare(&mut delay).unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError {
                step: Step::DisplayOn,
                ..
            })
        ));

        // Still unprepared, so the next call runs the whole sequence again
        trace.clear();
        assert!(panel.prepare(&mut delay).is_err());
        assert_eq!(trace.count(&Event::RailEnable(RailId::Vddio.index())), 1);
    }

    #[test]
    fn test_unprepare_sequence() {
        let trace = Trace::new();
        let mut panel = probe(&trace);
        let mut delay = MockDelay::new(&trace);

        panel.prepare(&mut delay).unwrap();
        trace.clear();
        panel.unprepare(&mut delay).unwrap();

        assert_eq!(
            trace.events(),
            [
                Event::Write(LinkTarget::Primary, frame(&[0x28])),
                Event::DelayUs(10_000),
                Event::Write(LinkTarget::Primary, frame(&[0x10])),
                Event::DelayUs(150_000),
                Event::LowPower(LinkTarget::Primary, true),
                Event::LowPower(LinkTarget::Secondary, true),
                Event::Reset(Level::Low),
                Event::RailDisableAll,
            ]
        );
        assert!(panel.shutdown_faults().is_empty());
    }

    #[test]
    fn test_unprepare_continues_after_display_off_failure() {
        let trace = Trace::new();
        let mut panel = probe_with(
            &trace,
            failing_primary(&trace, &[0x28]),
            MockSupply::new(&trace),
        );
        let mut delay = MockDelay::new(&trace);

        panel.prepare(&mut delay).unwrap();
        trace.clear();
        assert_eq!(panel.unprepare(&mut delay), Ok(()));

        assert_eq!(trace.writes(LinkTarget::Primary), [frame(&[0x10])]);
        assert_eq!(trace.count(&Event::RailDisableAll), 1);
        assert_eq!(panel.state(), LifecycleState::Unprepared);

        assert_eq!(panel.shutdown_faults().len(), 1);
        assert_eq!(panel.shutdown_faults()[0].step, Step::DisplayOff);
        assert_eq!(panel.shutdown_faults()[0].cause, TransportError::NoAck);
    }

    #[test]
    fn test_unprepare_continues_after_sleep_failure() {
        let trace = Trace::new();
        let mut panel = probe_with(
            &trace,
            failing_primary(&trace, &[0x10]),
            MockSupply::new(&trace),
        );
        let mut delay = MockDelay::new(&trace);

        panel.prepare(&mut delay).unwrap();
        trace.clear();
        assert_eq!(panel.unprepare(&mut delay), Ok(()));

        assert_eq!(trace.count(&Event::RailDisableAll), 1);
        assert_eq!(trace.events().last(), Some(&Event::RailDisableAll));
        assert_eq!(panel.shutdown_faults()[0].step, Step::EnterSleep);

        // Each Unprepare starts a fresh record
        panel.prepare(&mut delay).unwrap();
        panel.unprepare(&mut delay).unwrap();
        assert_eq!(panel.shutdown_faults().len(), 1);
    }

    #[test]
    fn test_get_modes() {
        let trace = Trace::new();
        let panel = probe(&trace);
        let mut modes = MockModes::default();

        assert_eq!(panel.get_modes(&mut modes), Ok(1));
        assert_eq!(modes.modes.len(), 1);

        let (timing, mode_type) = modes.modes[0];
        assert_eq!(timing, SHARP_LS055D1SX04_MODE);
        assert_eq!((timing.hdisplay, timing.vdisplay), (1080, 1920));
        assert_eq!(mode_type, ModeType::DRIVER_PREFERRED);
        assert_eq!(modes.physical_size, Some((68, 121)));
    }

    #[test]
    fn test_get_modes_out_of_memory() {
        let trace = Trace::new();
        let panel = probe(&trace);
        let mut modes = MockModes {
            out_of_memory: true,
            ..Default::default()
        };

        assert_eq!(
            panel.get_modes(&mut modes),
            Err(Error::Mode(nt35950_core::traits::ModeError::OutOfMemory))
        );
        assert_eq!(modes.physical_size, None);
    }

    #[test]
    fn test_remove_detaches_links() {
        let trace = Trace::new();
        let panel = probe(&trace);

        let parts = panel.remove();
        assert!(parts.links.has_secondary());
        assert_eq!(
            trace.events(),
            [
                Event::Detach(LinkTarget::Primary),
                Event::Detach(LinkTarget::Secondary),
            ]
        );
    }
}
