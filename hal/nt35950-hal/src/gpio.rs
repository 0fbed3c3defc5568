//! Reset GPIO abstraction

/// Logical line level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Panel reset (RESX) line
///
/// Driving the line is assumed infallible; implementations that wrap a
/// fallible pin swallow the error.
pub trait ResetPin {
    /// Drive the line to `level`
    fn set_level(&mut self, level: Level);
}

impl<T: ResetPin + ?Sized> ResetPin for &mut T {
    fn set_level(&mut self, level: Level) {
        T::set_level(self, level)
    }
}
