//! Lifecycle state definition

/// Panel lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleState {
    /// Rails off, reset held low
    #[default]
    Unprepared,
    /// Rails on, driver IC initialized, display on
    Prepared,
}

/// Lifecycle transitions requested by the display pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Power up and initialize
    Prepare,
    /// Shut down and power off
    Unprepare,
}

impl LifecycleState {
    pub fn is_prepared(&self) -> bool {
        matches!(self, LifecycleState::Prepared)
    }

    /// Check if `transition` would change the state
    ///
    /// When this returns false the transition is a no-op.
    pub fn needs(&self, transition: Transition) -> bool {
        self.transition(transition) != *self
    }

    /// State after `transition` completed
    pub fn transition(self, transition: Transition) -> Self {
        match transition {
            Transition::Prepare => LifecycleState::Prepared,
            Transition::Unprepare => LifecycleState::Unprepared,
        }
    }
}
