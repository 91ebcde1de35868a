//! Configuration for the MicroMag3 driver.

pub(crate) mod period;

pub use period::{Period, resolve_timeout_us};

use crate::interface::BusConfig;

/// Default settling time after selecting the device for a sample pass.
pub(crate) const DEFAULT_SETTLE_DELAY_US: u32 = 2_000;
/// Shortest RESET pulse the part registers.
pub(crate) const MIN_RESET_PULSE_NS: u32 = 1_000;
/// Default RESET pulse width.
pub(crate) const DEFAULT_RESET_PULSE_NS: u32 = MIN_RESET_PULSE_NS;

/// MicroMag3 driver settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Bus parameters reasserted before every sample pass.
    pub bus: BusConfig,
    /// Period used by `init` and full-sample passes.
    ///
    /// A value other than [`Period::FASTEST`] also applies to the power-up
    /// conversion in `init`, which then takes as long as any other
    /// conversion at that period.
    pub period: Period,
    /// DATA-READY timeout in microseconds; zero uses the period's default.
    pub timeout_us: u32,
    /// Delay between selecting the device and the first axis of a pass.
    pub settle_delay_us: u32,
    /// Width of the RESET pulse preceding every command. Values below 1 us
    /// are raised to 1 us when the pulse is issued.
    pub reset_pulse_ns: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates the default configuration: fastest period, table timeout,
    /// 2 ms settle and 1 us reset pulse.
    pub const fn new() -> Self {
        Self {
            bus: BusConfig::DEFAULT,
            period: Period::FASTEST,
            timeout_us: 0,
            settle_delay_us: DEFAULT_SETTLE_DELAY_US,
            reset_pulse_ns: DEFAULT_RESET_PULSE_NS,
        }
    }

    /// Sets the bus parameters.
    #[must_use]
    pub const fn with_bus(mut self, bus: BusConfig) -> Self {
        self.bus = bus;
        self
    }

    /// Sets the measurement period for `init` and sample passes alike.
    #[must_use]
    pub const fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Sets an explicit DATA-READY timeout (zero restores the default).
    #[must_use]
    pub const fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Sets the settling delay used at the start of a sample pass.
    #[must_use]
    pub const fn with_settle_delay_us(mut self, settle_delay_us: u32) -> Self {
        self.settle_delay_us = settle_delay_us;
        self
    }

    /// Sets the RESET pulse width, clamped to at least 1 us.
    #[must_use]
    pub const fn with_reset_pulse_ns(mut self, reset_pulse_ns: u32) -> Self {
        self.reset_pulse_ns = if reset_pulse_ns < MIN_RESET_PULSE_NS {
            MIN_RESET_PULSE_NS
        } else {
            reset_pulse_ns
        };
        self
    }

    /// Returns the timeout actually applied to each conversion.
    pub const fn effective_timeout_us(self) -> u32 {
        if self.timeout_us == 0 {
            self.period.default_timeout_us()
        } else {
            self.timeout_us
        }
    }
}
