//! Serial transfer capability.

use embedded_hal::spi::SpiBus;

use super::BusConfig;

/// Byte-oriented synchronous serial bus.
///
/// Implement this for a HAL peripheral that can be reconfigured at runtime
/// when the bus is shared with other devices. Chip select is not part of the
/// bus; the driver toggles it through its own pin.
pub trait SerialBus {
    /// HAL error type.
    type Error: core::fmt::Debug;

    /// Applies clock divider, mode and bit order.
    fn configure(&mut self, config: BusConfig) -> Result<(), Self::Error>;

    /// Shifts `byte` out and returns the byte shifted in.
    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error>;
}

/// Error from a [`FixedSpiBus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixedSpiBusError<E> {
    /// The underlying SPI bus failed.
    Spi(E),
    /// A configuration other than the one the HAL bus was built with was
    /// requested.
    ConfigMismatch,
}

/// [`SerialBus`] over an `embedded-hal` [`SpiBus`] configured at construction.
///
/// `embedded-hal` buses fix frequency and mode when the HAL builds them, so
/// the wrapper is told which [`BusConfig`] that was. [`SerialBus::configure`]
/// accepts only that configuration and fails with
/// [`FixedSpiBusError::ConfigMismatch`] for anything else.
pub struct FixedSpiBus<SPI> {
    spi: SPI,
    config: BusConfig,
}

impl<SPI> FixedSpiBus<SPI> {
    /// Wraps a bus the HAL already set up with `config`.
    pub const fn new(spi: SPI, config: BusConfig) -> Self {
        Self { spi, config }
    }

    /// Returns the configuration the bus was built with.
    pub const fn config(&self) -> BusConfig {
        self.config
    }

    /// Releases the underlying SPI bus.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> SerialBus for FixedSpiBus<SPI>
where
    SPI: SpiBus<u8>,
{
    type Error = FixedSpiBusError<SPI::Error>;

    fn configure(&mut self, config: BusConfig) -> Result<(), Self::Error> {
        if config == self.config {
            Ok(())
        } else {
            Err(FixedSpiBusError::ConfigMismatch)
        }
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        let mut buffer = [byte];
        self.spi
            .transfer_in_place(&mut buffer)
            .map_err(FixedSpiBusError::Spi)?;
        self.spi.flush().map_err(FixedSpiBusError::Spi)?;
        Ok(buffer[0])
    }
}
