//! MicroMag3 command byte encoding.
//!
//! A conversion is requested with a single byte clocked in MSB-first right
//! after the RESET pulse:
//!
//! ```text
//!  bit   7   6   5   4   3   2   1   0
//!      | 0 |  period  |   0   | axis  |
//! ```
//!
//! The axis select code lives in the low nibble (1 = X, 2 = Y, 3 = Z) and the
//! period rank in the high nibble.

use crate::config::Period;
use crate::error::Error;

/// Command byte bit layout.
pub(crate) mod cmd {
    /// Axis select code bits.
    pub const AXIS_MASK: u8 = 0b0000_1111;
    /// Period rank bits.
    pub const PERIOD_MASK: u8 = 0b1111_0000;
    /// Shift applied to the period rank.
    pub const PERIOD_SHIFT: u8 = 4;
}

/// Magnetometer sensing axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X sensor coil.
    X,
    /// Y sensor coil.
    Y,
    /// Z sensor coil.
    Z,
}

impl Axis {
    /// All axes in the order a full sample reads them.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Returns the 1-based select code placed in the command low nibble.
    pub const fn select_code(self) -> u8 {
        match self {
            Self::X => 1,
            Self::Y => 2,
            Self::Z => 3,
        }
    }

    /// Returns the zero-based axis index.
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Encodes the command byte for `axis` at period `rank`.
///
/// Fails with [`Error::InvalidPeriod`] when `rank` is above 7 instead of
/// truncating it into the axis bits.
pub const fn encode_command(axis: Axis, rank: u8) -> Result<u8, Error> {
    if rank > Period::MAX_RANK {
        return Err(Error::InvalidPeriod);
    }
    Ok((axis.select_code() & cmd::AXIS_MASK) | ((rank << cmd::PERIOD_SHIFT) & cmd::PERIOD_MASK))
}
