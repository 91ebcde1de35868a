//! Pin and bus abstraction for the MicroMag3 protocol.

pub(crate) mod bus;
pub(crate) mod pins;

pub use bus::{FixedSpiBus, FixedSpiBusError, SerialBus};
pub use pins::PinBusInterface;

use embedded_hal::digital::PinState;
use embedded_hal::spi::{MODE_0, Mode};

use crate::error::Error;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Minimal pin/bus capability used by the device core.
///
/// Levels are physical: CHIP-SELECT is active-low, RESET and DATA-READY are
/// active-high.
pub trait Interface: sealed::Sealed {
    /// Reasserts the serial bus parameters.
    fn configure_bus(&mut self, config: BusConfig) -> Result<(), Error>;
    /// Drives the CHIP-SELECT output.
    fn set_chip_select(&mut self, state: PinState) -> Result<(), Error>;
    /// Drives the RESET output.
    fn set_reset(&mut self, state: PinState) -> Result<(), Error>;
    /// Samples the DATA-READY input; `true` means a result is available.
    fn data_ready(&mut self) -> Result<bool, Error>;
    /// Clocks one byte out and returns the byte clocked in.
    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Error>;
}

/// Serial clock divider relative to the host peripheral clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDivider {
    /// Peripheral clock / 2.
    Div2,
    /// Peripheral clock / 4.
    Div4,
    /// Peripheral clock / 8.
    Div8,
    /// Peripheral clock / 16.
    Div16,
    /// Peripheral clock / 32.
    Div32,
    /// Peripheral clock / 64.
    Div64,
    /// Peripheral clock / 128.
    Div128,
}

impl ClockDivider {
    /// Returns the divisor.
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div2 => 2,
            Self::Div4 => 4,
            Self::Div8 => 8,
            Self::Div16 => 16,
            Self::Div32 => 32,
            Self::Div64 => 64,
            Self::Div128 => 128,
        }
    }

    /// Returns the resulting serial clock for a peripheral clock of `source_hz`.
    pub const fn frequency_hz(self, source_hz: u32) -> u32 {
        source_hz / self.divisor()
    }
}

/// Bit order on the serial link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first (required by the MicroMag3).
    MsbFirst,
    /// Least significant bit first.
    LsbFirst,
}

/// Serial bus parameters reasserted before each full-sample pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Clock divider.
    pub clock_divider: ClockDivider,
    /// Clock polarity and phase.
    pub mode: Mode,
    /// Bit order.
    pub bit_order: BitOrder,
}

impl BusConfig {
    /// Divider 32, mode 0, MSB first.
    pub const DEFAULT: Self = Self {
        clock_divider: ClockDivider::Div32,
        mode: MODE_0,
        bit_order: BitOrder::MsbFirst,
    };

    /// Creates the default bus configuration.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the clock divider.
    #[must_use]
    pub const fn with_clock_divider(mut self, clock_divider: ClockDivider) -> Self {
        self.clock_divider = clock_divider;
        self
    }

    /// Sets the clock polarity and phase.
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the bit order.
    #[must_use]
    pub const fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
