use crate::error::Error;

/// Measurement period selection.
///
/// Each step doubles the number of sensor oscillator cycles counted per bias
/// direction, trading conversion time for resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Period {
    /// 32 cycles (rank 0), fastest conversion.
    #[default]
    Cycles32,
    /// 64 cycles (rank 1).
    Cycles64,
    /// 128 cycles (rank 2).
    Cycles128,
    /// 256 cycles (rank 3).
    Cycles256,
    /// 512 cycles (rank 4).
    Cycles512,
    /// 1024 cycles (rank 5).
    Cycles1024,
    /// 2048 cycles (rank 6).
    Cycles2048,
    /// 4096 cycles (rank 7), slowest conversion.
    Cycles4096,
}

/// Worst-case conversion time per rank in microseconds, plus 1 us for timer jitter.
const DEFAULT_TIMEOUT_US: [u32; 8] = [501, 1001, 2001, 4001, 7501, 15_001, 35_501, 60_001];

impl Period {
    /// Highest valid period rank.
    pub const MAX_RANK: u8 = 7;

    /// Shortest period, used for power-up and full-sample passes by default.
    pub const FASTEST: Self = Self::Cycles32;

    /// Returns the period for `rank`, or [`Error::InvalidPeriod`] above 7.
    pub const fn from_rank(rank: u8) -> Result<Self, Error> {
        match rank {
            0 => Ok(Self::Cycles32),
            1 => Ok(Self::Cycles64),
            2 => Ok(Self::Cycles128),
            3 => Ok(Self::Cycles256),
            4 => Ok(Self::Cycles512),
            5 => Ok(Self::Cycles1024),
            6 => Ok(Self::Cycles2048),
            7 => Ok(Self::Cycles4096),
            _ => Err(Error::InvalidPeriod),
        }
    }

    /// Returns the rank (0..=7) encoded in the command high nibble.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Cycles32 => 0,
            Self::Cycles64 => 1,
            Self::Cycles128 => 2,
            Self::Cycles256 => 3,
            Self::Cycles512 => 4,
            Self::Cycles1024 => 5,
            Self::Cycles2048 => 6,
            Self::Cycles4096 => 7,
        }
    }

    /// Returns the number of oscillator cycles counted.
    pub const fn cycles(self) -> u16 {
        32 << self.rank()
    }

    /// Returns the default DATA-READY timeout in microseconds.
    pub const fn default_timeout_us(self) -> u32 {
        DEFAULT_TIMEOUT_US[self.rank() as usize]
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> Self {
        period.rank()
    }
}

impl TryFrom<u8> for Period {
    type Error = Error;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Self::from_rank(rank)
    }
}

/// Resolves the ready timeout for a raw period `rank`.
///
/// A `timeout_us` of zero selects the table default for the rank; any other
/// value is used as-is. Unknown ranks fail closed with [`Error::InvalidPeriod`].
pub const fn resolve_timeout_us(rank: u8, timeout_us: u32) -> Result<u32, Error> {
    match Period::from_rank(rank) {
        Ok(period) if timeout_us == 0 => Ok(period.default_timeout_us()),
        Ok(_) => Ok(timeout_us),
        Err(err) => Err(err),
    }
}
