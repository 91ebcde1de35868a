//! MicroMag3 driver implementation.
//!
//! This module provides the public blocking driver for the MicroMag3.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::clock::MonotonicClock;
use crate::command::Axis;
use crate::config::Config;
use crate::data::Sample;
use crate::device::DeviceCore;
use crate::error::Error;
use crate::interface::{Interface, PinBusInterface, SerialBus};

/// MicroMag3 3-axis magnetometer driver.
///
/// Owns its pins, bus and clock exclusively. Every call runs to completion
/// on the calling thread; DATA-READY is busy-polled.
pub struct MicroMag3<I, CLK> {
    core: DeviceCore<I, CLK>,
    last: Sample,
}

/// Driver bound to physical pins and a [`SerialBus`].
pub type MicroMag3Spi<BUS, DRDY, RST, CS, CLK> =
    MicroMag3<PinBusInterface<BUS, DRDY, RST, CS>, CLK>;

impl<BUS, DRDY, RST, CS, CLK> MicroMag3<PinBusInterface<BUS, DRDY, RST, CS>, CLK>
where
    BUS: SerialBus,
    DRDY: InputPin,
    RST: OutputPin,
    CS: OutputPin,
    CLK: MonotonicClock,
{
    /// Creates a driver with default settings.
    ///
    /// Pin levels are not touched here. Call [`Self::init`] before any
    /// measurement, or construct with [`Self::bind`] to idle the outputs
    /// immediately.
    pub fn new(bus: BUS, data_ready: DRDY, reset: RST, chip_select: CS, clock: CLK) -> Self {
        Self::with_config(bus, data_ready, reset, chip_select, clock, Config::default())
    }

    /// Creates a driver with a custom configuration.
    ///
    /// As with [`Self::new`], [`Self::init`] must run before measuring.
    pub fn with_config(
        bus: BUS,
        data_ready: DRDY,
        reset: RST,
        chip_select: CS,
        clock: CLK,
        config: Config,
    ) -> Self {
        let interface = PinBusInterface::new(bus, data_ready, reset, chip_select);
        Self::from_interface(interface, clock, config)
    }

    /// Creates a driver with `config` and drives CHIP-SELECT high and RESET
    /// low right away.
    ///
    /// Fails with [`Error::Pin`] if either output cannot be set.
    pub fn bind(
        bus: BUS,
        data_ready: DRDY,
        reset: RST,
        chip_select: CS,
        clock: CLK,
        config: Config,
    ) -> Result<Self, Error> {
        let interface = PinBusInterface::bind(bus, data_ready, reset, chip_select)?;
        Ok(Self::from_interface(interface, clock, config))
    }

    /// Releases the bus, pins and clock, consuming the driver.
    pub fn release(self) -> (BUS, DRDY, RST, CS, CLK) {
        let (interface, clock) = self.core.release();
        let (bus, data_ready, reset, chip_select) = interface.release();
        (bus, data_ready, reset, chip_select, clock)
    }
}

impl<I, CLK> MicroMag3<I, CLK>
where
    I: Interface,
    CLK: MonotonicClock,
{
    fn from_interface(interface: I, clock: CLK, config: Config) -> Self {
        Self {
            core: DeviceCore::new(interface, clock, config),
            last: Sample::INVALID,
        }
    }

    /// Returns the current configuration.
    pub const fn config(&self) -> Config {
        self.core.config()
    }

    /// Updates the configuration used by `init`, `sample` and `update`.
    pub fn set_config(&mut self, config: Config) {
        self.core.set_config(config);
    }

    /// Configures the bus, idles the pins and performs one throwaway X-axis
    /// conversion to leave the power-up state.
    ///
    /// Succeeds iff that conversion completed; its value is discarded.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.core.init(delay)
    }

    /// Measures X, Y and Z into one sample.
    ///
    /// An axis that times out reads zero and marks the sample invalid; the
    /// remaining axes are still measured. Returns `Err` only for bus or pin
    /// faults.
    pub fn sample<D: DelayNs>(&mut self, delay: &mut D) -> Result<Sample, Error> {
        self.core.sample(delay)
    }

    /// Measures a sample and keeps it as [`Self::last_sample`].
    ///
    /// On a bus or pin fault the cached sample is marked invalid.
    pub fn update<D: DelayNs>(&mut self, delay: &mut D) -> Result<Sample, Error> {
        match self.core.sample(delay) {
            Ok(sample) => {
                self.last = sample;
                Ok(sample)
            }
            Err(err) => {
                self.last.valid = false;
                Err(err)
            }
        }
    }

    /// Returns the sample stored by the last [`Self::update`].
    pub const fn last_sample(&self) -> Sample {
        self.last
    }

    /// Selects the device, pulses RESET and sends the command for `axis`.
    ///
    /// Period `rank` above 7 fails with [`Error::InvalidPeriod`] without any
    /// bus traffic. CHIP-SELECT is left low.
    pub fn trigger_conversion<D: DelayNs>(
        &mut self,
        delay: &mut D,
        axis: Axis,
        rank: u8,
    ) -> Result<(), Error> {
        self.core.trigger_conversion(delay, axis, rank)
    }

    /// Busy-waits for DATA-READY; `timeout_us == 0` uses the period default.
    pub fn await_ready(&mut self, rank: u8, timeout_us: u32) -> Result<(), Error> {
        self.core.await_ready(rank, timeout_us)
    }

    /// Reads the two result bytes and deselects the device.
    ///
    /// The value is meaningless unless [`Self::await_ready`] succeeded.
    pub fn read_result(&mut self) -> Result<i16, Error> {
        self.core.read_result()
    }

    /// Triggers, waits for and reads a single axis conversion.
    pub fn read_axis<D: DelayNs>(
        &mut self,
        delay: &mut D,
        axis: Axis,
        rank: u8,
        timeout_us: u32,
    ) -> Result<i16, Error> {
        self.core.read_axis(delay, axis, rank, timeout_us)
    }
}
