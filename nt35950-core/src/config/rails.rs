//! Supply rail definitions
//!
//! The panel takes six supplies. They are requested from the regulator
//! framework as one bulk set, in [`RAIL_SET`] order, and switched on in the
//! different [`POWER_ON_SEQUENCE`] order with settle delays between groups.

/// Panel supply rails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RailId {
    /// I/O supply
    Vddio,
    /// Touch controller I/O supply
    TouchVddio,
    /// Touch controller analog supply
    TouchAvdd,
    /// Positive analog supply (VSP)
    Avdd,
    /// Negative analog supply (VSN)
    Avee,
    /// Digital core supply
    Dvdd,
}

/// Rails in bulk-set order; a rail's position is its regulator index
pub const RAIL_SET: [RailId; 6] = [
    RailId::Vddio,
    RailId::TouchVddio,
    RailId::TouchAvdd,
    RailId::Avdd,
    RailId::Avee,
    RailId::Dvdd,
];

/// Voltage polarity of a rail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    Positive,
    Negative,
}

/// Voltage window a rail must be able to regulate in
///
/// Bounds are magnitudes in microvolts; `polarity` gives the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VoltageWindow {
    pub min_uv: u32,
    pub max_uv: u32,
    pub polarity: Polarity,
}

impl VoltageWindow {
    const fn positive(min_uv: u32, max_uv: u32) -> Self {
        Self {
            min_uv,
            max_uv,
            polarity: Polarity::Positive,
        }
    }

    const fn negative(min_uv: u32, max_uv: u32) -> Self {
        Self {
            min_uv,
            max_uv,
            polarity: Polarity::Negative,
        }
    }
}

impl RailId {
    /// Regulator index in the bulk set
    pub const fn index(self) -> usize {
        match self {
            RailId::Vddio => 0,
            RailId::TouchVddio => 1,
            RailId::TouchAvdd => 2,
            RailId::Avdd => 3,
            RailId::Avee => 4,
            RailId::Dvdd => 5,
        }
    }

    /// Supply name used when requesting the regulator
    pub const fn supply_name(self) -> &'static str {
        match self {
            RailId::Vddio => "vddio",
            RailId::TouchVddio => "tvddio",
            RailId::TouchAvdd => "tavdd",
            RailId::Avdd => "avdd",
            RailId::Avee => "avee",
            RailId::Dvdd => "dvdd",
        }
    }

    /// Window the rail's regulator must support
    pub const fn required_window(self) -> VoltageWindow {
        match self {
            RailId::Vddio | RailId::TouchVddio => VoltageWindow::positive(1_750_000, 1_950_000),
            RailId::TouchAvdd => VoltageWindow::positive(2_800_000, 3_300_000),
            RailId::Avdd => VoltageWindow::positive(5_200_000, 5_900_000),
            // -5.90V to -5.20V
            RailId::Avee => VoltageWindow::negative(5_200_000, 5_900_000),
            RailId::Dvdd => VoltageWindow::positive(1_300_000, 1_400_000),
        }
    }
}

/// One step of the power-on sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerStep {
    /// Rail to enable
    pub rail: RailId,
    /// Minimum wait after enabling, in microseconds
    pub settle_us: u32,
}

/// Rail enable order with settle times
///
/// VSP/VSN and the touch supplies are enabled back to back and share one
/// settle delay per pair.
pub const POWER_ON_SEQUENCE: [PowerStep; 6] = [
    PowerStep {
        rail: RailId::Vddio,
        settle_us: 2_000,
    },
    PowerStep {
        rail: RailId::Dvdd,
        settle_us: 15_000,
    },
    PowerStep {
        rail: RailId::Avdd,
        settle_us: 0,
    },
    PowerStep {
        rail: RailId::Avee,
        settle_us: 12_000,
    },
    PowerStep {
        rail: RailId::TouchVddio,
        settle_us: 0,
    },
    PowerStep {
        rail: RailId::TouchAvdd,
        settle_us: 15_000,
    },
];
