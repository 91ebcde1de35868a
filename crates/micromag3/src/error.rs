//! Error type for the MicroMag3 driver.

/// Error type for MicroMag3 operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Serial bus transfer or configuration failed.
    Bus,
    /// A DATA-READY, RESET or CHIP-SELECT pin operation failed.
    Pin,
    /// Period rank outside 0..=7. Detected before any bus traffic.
    InvalidPeriod,
    /// DATA-READY was not observed before the conversion deadline.
    Timeout,
}

impl Error {
    /// Returns true for the per-axis conditions that only degrade a sample.
    ///
    /// `Bus` and `Pin` are hardware faults and abort a sampling pass.
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::InvalidPeriod | Self::Timeout)
    }
}
