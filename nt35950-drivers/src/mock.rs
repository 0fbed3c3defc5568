//! Mock collaborators for unit tests
//!
//! Every mock appends to one shared [`Trace`] so tests can check the order
//! of operations across rails, reset line, links and delays.

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use nt35950_core::config::ModeTiming;
use nt35950_core::traits::{ModeError, ModeRegistry, ModeType};
use nt35950_hal::{
    DsiLink, Level, LinkSettings, LinkTarget, RegulatorBulk, RegulatorError, ResetPin,
    TransportError,
};

pub type Frame = Vec<u8, 16>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RailEnable(usize),
    RailDisableAll,
    Reset(Level),
    Write(LinkTarget, Frame),
    LowPower(LinkTarget, bool),
    Attach(LinkTarget),
    Detach(LinkTarget),
    DelayUs(u32),
}

pub fn frame(bytes: &[u8]) -> Frame {
    Vec::from_slice(bytes).unwrap()
}

pub struct Trace {
    events: RefCell<Vec<Event, 128>>,
}

impl Trace {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push(event).expect("trace full");
    }

    pub fn events(&self) -> Vec<Event, 128> {
        self.events.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Frames written on `target`, in order
    pub fn writes(&self, target: LinkTarget) -> Vec<Frame, 64> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write(t, f) if *t == target => Some(f.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn position(&self, event: &Event) -> Option<usize> {
        self.events.borrow().iter().position(|e| e == event)
    }
}

pub struct MockLink<'a> {
    trace: &'a Trace,
    target: LinkTarget,
    fail_frame: Option<&'static [u8]>,
    fail_attach: bool,
    fail_detach: bool,
}

impl<'a> MockLink<'a> {
    pub fn new(trace: &'a Trace, target: LinkTarget) -> Self {
        Self {
            trace,
            target,
            fail_frame: None,
            fail_attach: false,
            fail_detach: false,
        }
    }

    /// Fail every write of exactly this frame
    pub fn fail_on(&mut self, frame: &'static [u8]) {
        self.fail_frame = Some(frame);
    }

    pub fn fail_attach(&mut self) {
        self.fail_attach = true;
    }

    pub fn fail_detach(&mut self) {
        self.fail_detach = true;
    }
}

impl DsiLink for MockLink<'_> {
    fn write_buffer(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        if self.fail_frame == Some(data) {
            return Err(TransportError::NoAck);
        }
        self.trace.push(Event::Write(self.target, frame(data)));
        Ok(data.len())
    }

    fn set_low_power(&mut self, enabled: bool) {
        self.trace.push(Event::LowPower(self.target, enabled));
    }

    fn attach(&mut self, _settings: &LinkSettings) -> Result<(), TransportError> {
        if self.fail_attach {
            return Err(TransportError::Host(-19));
        }
        self.trace.push(Event::Attach(self.target));
        Ok(())
    }

    fn detach(&mut self) -> Result<(), TransportError> {
        if self.fail_detach {
            return Err(TransportError::Host(-19));
        }
        self.trace.push(Event::Detach(self.target));
        Ok(())
    }
}

pub struct MockSupply<'a> {
    trace: &'a Trace,
    fail_index: Option<usize>,
    unsupported_index: Option<usize>,
}

impl<'a> MockSupply<'a> {
    pub fn new(trace: &'a Trace) -> Self {
        Self {
            trace,
            fail_index: None,
            unsupported_index: None,
        }
    }

    /// Fail enabling the regulator at `index`
    pub fn fail_enable(&mut self, index: usize) {
        self.fail_index = Some(index);
    }

    /// Report the regulator at `index` as unable to reach its window
    pub fn unsupported(&mut self, index: usize) {
        self.unsupported_index = Some(index);
    }
}

impl RegulatorBulk for MockSupply<'_> {
    fn enable(&mut self, index: usize) -> Result<(), RegulatorError> {
        if self.fail_index == Some(index) {
            return Err(RegulatorError::Fault);
        }
        self.trace.push(Event::RailEnable(index));
        Ok(())
    }

    fn disable_all(&mut self) {
        self.trace.push(Event::RailDisableAll);
    }

    fn is_supported_voltage(&mut self, index: usize, _min_uv: u32, _max_uv: u32) -> bool {
        self.unsupported_index != Some(index)
    }
}

pub struct MockReset<'a> {
    trace: &'a Trace,
}

impl<'a> MockReset<'a> {
    pub fn new(trace: &'a Trace) -> Self {
        Self { trace }
    }
}

impl ResetPin for MockReset<'_> {
    fn set_level(&mut self, level: Level) {
        self.trace.push(Event::Reset(level));
    }
}

pub struct MockDelay<'a> {
    trace: &'a Trace,
}

impl<'a> MockDelay<'a> {
    pub fn new(trace: &'a Trace) -> Self {
        Self { trace }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.push(Event::DelayUs(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.trace.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.push(Event::DelayUs(ms * 1_000));
    }
}

#[derive(Default)]
pub struct MockModes {
    pub modes: Vec<(ModeTiming, ModeType), 4>,
    pub physical_size: Option<(u16, u16)>,
    pub out_of_memory: bool,
}

impl ModeRegistry for MockModes {
    fn add_probed_mode(&mut self, timing: &ModeTiming, mode_type: ModeType) -> Result<(), ModeError> {
        if self.out_of_memory {
            return Err(ModeError::OutOfMemory);
        }
        self.modes
            .push((*timing, mode_type))
            .map_err(|_| ModeError::OutOfMemory)
    }

    fn set_physical_size(&mut self, width_mm: u16, height_mm: u16) {
        self.physical_size = Some((width_mm, height_mm));
    }
}
