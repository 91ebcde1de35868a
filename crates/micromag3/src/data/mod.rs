//! Measurement and sample types.

use crate::command::Axis;

/// Number of result bytes clocked out after DATA-READY.
pub(crate) const RESULT_LEN: usize = 2;

/// Placeholder byte shifted out while reading a result.
pub(crate) const READ_FILLER: u8 = 0x00;

/// Composes the two result bytes (high byte first) into a signed count.
pub const fn compose_measurement(high: u8, low: u8) -> i16 {
    let raw = ((high as u16) << 8) | (low as u16);
    raw as i16
}

/// Three-axis magnetometer sample.
///
/// `valid` is cleared when any axis failed during the pass that produced the
/// sample; a failed axis reads zero, the other axes keep their readings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// X-axis count.
    pub x: i16,
    /// Y-axis count.
    pub y: i16,
    /// Z-axis count.
    pub z: i16,
    /// Whether every axis read succeeded.
    pub valid: bool,
}

impl Sample {
    /// All-zero sample that has not been measured.
    pub const INVALID: Self = Self {
        x: 0,
        y: 0,
        z: 0,
        valid: false,
    };

    /// Returns the count for `axis`.
    pub const fn axis(self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub(crate) fn set_axis(&mut self, axis: Axis, value: i16) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    /// Returns the counts as `[x, y, z]` floats.
    pub fn to_f32(self) -> [f32; 3] {
        [f32::from(self.x), f32::from(self.y), f32::from(self.z)]
    }
}
