//! Monotonic time source for the DATA-READY deadline.

/// Free-running microsecond counter.
///
/// The counter may wrap; the driver only looks at wrapping differences
/// between two readings.
pub trait MonotonicClock {
    /// Returns the current time in microseconds.
    fn now_us(&mut self) -> u32;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &mut T {
    fn now_us(&mut self) -> u32 {
        (**self).now_us()
    }
}

/// Microseconds elapsed from `start` to `now`, tolerant of counter wrap.
pub(crate) const fn elapsed_us(start: u32, now: u32) -> u32 {
    now.wrapping_sub(start)
}
