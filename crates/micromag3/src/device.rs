//! Device core operations for the MicroMag3.
//!
//! One measurement follows the sequence from the datasheet timing diagrams:
//!
//! 1. CHIP-SELECT low.
//! 2. RESET pulsed high then low. Required before every command.
//! 3. Command byte clocked in; the part starts the conversion.
//! 4. DATA-READY goes high once the period counts are done.
//! 5. Two result bytes clocked out, high byte first.
//!
//! CHIP-SELECT may stay low to chain another measurement from step 2.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::clock::{MonotonicClock, elapsed_us};
use crate::command::{Axis, encode_command};
use crate::config::{Config, MIN_RESET_PULSE_NS, resolve_timeout_us};
use crate::data::{READ_FILLER, RESULT_LEN, Sample, compose_measurement};
use crate::error::Error;
use crate::interface::Interface;

pub(crate) struct DeviceCore<I, CLK> {
    interface: I,
    clock: CLK,
    config: Config,
}

impl<I, CLK> DeviceCore<I, CLK>
where
    I: Interface,
    CLK: MonotonicClock,
{
    pub(crate) const fn new(interface: I, clock: CLK, config: Config) -> Self {
        Self {
            interface,
            clock,
            config,
        }
    }

    pub(crate) const fn config(&self) -> Config {
        self.config
    }

    pub(crate) fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub(crate) fn release(self) -> (I, CLK) {
        (self.interface, self.clock)
    }

    /// Configures the bus, idles the pins and runs one throwaway conversion
    /// to take the part out of its power-up state.
    pub(crate) fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.interface.configure_bus(self.config.bus)?;
        self.interface.set_reset(PinState::Low)?;
        self.interface.set_chip_select(PinState::High)?;

        let rank = self.config.period.rank();
        match self.read_axis(delay, Axis::X, rank, self.config.timeout_us) {
            Ok(_) => Ok(()),
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("MicroMag3 power-up conversion failed: {}", err);
                Err(err)
            }
        }
    }

    /// Selects the device, pulses RESET and sends the command byte.
    ///
    /// Leaves CHIP-SELECT low. An invalid rank fails before any pin or bus
    /// activity.
    pub(crate) fn trigger_conversion<D: DelayNs>(
        &mut self,
        delay: &mut D,
        axis: Axis,
        rank: u8,
    ) -> Result<(), Error> {
        let command = encode_command(axis, rank)?;
        self.interface.set_chip_select(PinState::Low)?;
        self.pulse_reset(delay)?;
        self.interface.transfer_byte(command)?;
        Ok(())
    }

    /// Spins on DATA-READY until it is high or the deadline passes.
    ///
    /// A `timeout_us` of zero uses the default for `rank`. Blocks the caller
    /// for at most the resolved timeout plus one clock read.
    pub(crate) fn await_ready(&mut self, rank: u8, timeout_us: u32) -> Result<(), Error> {
        let timeout_us = resolve_timeout_us(rank, timeout_us)?;
        let start = self.clock.now_us();
        loop {
            if self.interface.data_ready()? {
                return Ok(());
            }
            if elapsed_us(start, self.clock.now_us()) > timeout_us {
                return Err(Error::Timeout);
            }
        }
    }

    /// Clocks out the two result bytes and deselects the device.
    ///
    /// Only meaningful after [`Self::await_ready`] succeeded; CHIP-SELECT is
    /// expected to still be low from the trigger.
    pub(crate) fn read_result(&mut self) -> Result<i16, Error> {
        let mut bytes = [0u8; RESULT_LEN];
        for byte in &mut bytes {
            *byte = self.interface.transfer_byte(READ_FILLER)?;
        }
        self.interface.set_chip_select(PinState::High)?;
        Ok(compose_measurement(bytes[0], bytes[1]))
    }

    /// Runs trigger, poll and read for one axis.
    ///
    /// No result bytes are consumed when the trigger or poll fails; CHIP-SELECT
    /// is then left low.
    pub(crate) fn read_axis<D: DelayNs>(
        &mut self,
        delay: &mut D,
        axis: Axis,
        rank: u8,
        timeout_us: u32,
    ) -> Result<i16, Error> {
        self.trigger_conversion(delay, axis, rank)?;
        self.await_ready(rank, timeout_us)?;
        self.read_result()
    }

    /// Reads X, Y and Z in order into one sample.
    ///
    /// Every axis is attempted. A timed-out or rejected axis reads zero and
    /// clears `valid` for the whole sample. Bus and pin faults abort the pass.
    pub(crate) fn sample<D: DelayNs>(&mut self, delay: &mut D) -> Result<Sample, Error> {
        let rank = self.config.period.rank();
        let timeout_us = self.config.timeout_us;
        let mut sample = Sample {
            valid: true,
            ..Sample::INVALID
        };

        self.interface.set_chip_select(PinState::Low)?;
        delay.delay_us(self.config.settle_delay_us);
        // Another bus user may have changed clock or mode since the last pass.
        self.interface.configure_bus(self.config.bus)?;

        for axis in Axis::ALL {
            match self.read_axis(delay, axis, rank, timeout_us) {
                Ok(value) => sample.set_axis(axis, value),
                Err(err) if err.is_recoverable() => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("MicroMag3 {} axis failed: {}", axis, err);
                    sample.set_axis(axis, 0);
                    sample.valid = false;
                }
                Err(err) => return Err(err),
            }
        }

        self.interface.set_chip_select(PinState::High)?;
        Ok(sample)
    }

    fn pulse_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.interface.set_reset(PinState::High)?;
        delay.delay_ns(self.config.reset_pulse_ns.max(MIN_RESET_PULSE_NS));
        self.interface.set_reset(PinState::Low)
    }
}
