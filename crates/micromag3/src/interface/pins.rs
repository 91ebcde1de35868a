//! Pin/bus adapter binding the three MicroMag3 control signals to a bus.

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use super::{BusConfig, Interface, SerialBus, sealed};
use crate::error::Error;

/// DATA-READY, RESET and CHIP-SELECT pins plus the serial bus.
///
/// Owns every signal for the lifetime of the driver. Pin direction is fixed by
/// the pin types: DATA-READY is an input, RESET and CHIP-SELECT are outputs.
pub struct PinBusInterface<BUS, DRDY, RST, CS> {
    bus: BUS,
    data_ready: DRDY,
    reset: RST,
    chip_select: CS,
}

impl<BUS, DRDY, RST, CS> PinBusInterface<BUS, DRDY, RST, CS> {
    /// Takes ownership of the pins and bus.
    ///
    /// Pin levels are left untouched until the driver's `init`, which pulls
    /// CHIP-SELECT high (deselected) and RESET low (inactive). Use
    /// [`Self::bind`] to drive those levels right away.
    pub const fn new(bus: BUS, data_ready: DRDY, reset: RST, chip_select: CS) -> Self {
        Self {
            bus,
            data_ready,
            reset,
            chip_select,
        }
    }

    /// Releases the bus and pins.
    pub fn release(self) -> (BUS, DRDY, RST, CS) {
        (self.bus, self.data_ready, self.reset, self.chip_select)
    }
}

impl<BUS, DRDY, RST, CS> PinBusInterface<BUS, DRDY, RST, CS>
where
    RST: OutputPin,
    CS: OutputPin,
{
    /// Takes ownership of the pins and bus and idles the outputs:
    /// CHIP-SELECT high, RESET low.
    pub fn bind(bus: BUS, data_ready: DRDY, reset: RST, chip_select: CS) -> Result<Self, Error> {
        let mut interface = Self::new(bus, data_ready, reset, chip_select);
        interface.chip_select.set_high().map_err(|_| Error::Pin)?;
        interface.reset.set_low().map_err(|_| Error::Pin)?;
        Ok(interface)
    }
}

impl<BUS, DRDY, RST, CS> Interface for PinBusInterface<BUS, DRDY, RST, CS>
where
    BUS: SerialBus,
    DRDY: InputPin,
    RST: OutputPin,
    CS: OutputPin,
{
    fn configure_bus(&mut self, config: BusConfig) -> Result<(), Error> {
        self.bus.configure(config).map_err(|_| Error::Bus)
    }

    fn set_chip_select(&mut self, state: PinState) -> Result<(), Error> {
        self.chip_select.set_state(state).map_err(|_| Error::Pin)
    }

    fn set_reset(&mut self, state: PinState) -> Result<(), Error> {
        self.reset.set_state(state).map_err(|_| Error::Pin)
    }

    fn data_ready(&mut self) -> Result<bool, Error> {
        self.data_ready.is_high().map_err(|_| Error::Pin)
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Error> {
        self.bus.transfer_byte(byte).map_err(|_| Error::Bus)
    }
}

impl<BUS, DRDY, RST, CS> sealed::Sealed for PinBusInterface<BUS, DRDY, RST, CS> {}
