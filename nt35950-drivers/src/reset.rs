//! Reset sequencer
//!
//! Drives the RESX line of the driver IC.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use nt35950_hal::{Level, ResetPin};

/// High hold before and after the reset pulse, in microseconds
pub const RESET_HOLD_US: u32 = 12_000;

/// Width of the low reset pulse, in microseconds
pub const RESET_PULSE_US: u32 = 300;

/// Sequencer owning the reset line
pub struct ResetSequencer<P> {
    pin: P,
}

impl<P: ResetPin> ResetSequencer<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Reset pulse train
    ///
    /// High for 12ms, low for 0.3ms, high again for 12ms.
    pub fn pulse<D: DelayNs>(&mut self, delay: &mut D) {
        self.pin.set_level(Level::High);
        delay.delay_us(RESET_HOLD_US);
        self.pin.set_level(Level::Low);
        delay.delay_us(RESET_PULSE_US);
        self.pin.set_level(Level::High);
        delay.delay_us(RESET_HOLD_US);
    }

    /// Drive the line low without waiting
    ///
    /// Keeps RESX from floating high into an unpowered chip.
    pub fn idle_low(&mut self) {
        self.pin.set_level(Level::Low);
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

/// [`ResetPin`] over an embedded-hal output pin
///
/// Pin errors are dropped: the reset line is treated as infallible.
pub struct GpioResetPin<P> {
    pin: P,
}

impl<P: OutputPin> GpioResetPin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> ResetPin for GpioResetPin<P> {
    fn set_level(&mut self, level: Level) {
        let _ = match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        };
    }
}
