//! Blocking `#![no_std]` driver for the MicroMag3 3-axis magneto-inductive
//! magnetometer from PNI Corporation.
//!
//! This crate provides a small, `embedded-hal` 1.0 based driver for the
//! MicroMag3's command/ready/read SPI protocol. It owns three control pins
//! (DATA-READY, RESET, CHIP-SELECT), a byte-oriented serial bus and a
//! microsecond clock, and turns three single-axis conversions into one
//! [`Sample`].
//!
//! # Quick start
//!
//! ```rust,no_run
//! use ph_micromag3::{BusConfig, FixedSpiBus, MicroMag3, MonotonicClock};
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::{InputPin, OutputPin};
//! # use embedded_hal::spi::SpiBus;
//! #
//! # fn example<SPI, DRDY, RST, CS, CLK, D>(
//! #     spi: SPI, drdy: DRDY, reset: RST, cs: CS, clock: CLK, delay: &mut D,
//! # ) -> Result<(), ph_micromag3::Error>
//! # where
//! #     SPI: SpiBus, DRDY: InputPin, RST: OutputPin, CS: OutputPin,
//! #     CLK: MonotonicClock, D: DelayNs,
//! # {
//! // The HAL bus was built with MODE 0, MSB first at the default divider.
//! let bus = FixedSpiBus::new(spi, BusConfig::DEFAULT);
//! let mut mag = MicroMag3::new(bus, drdy, reset, cs, clock);
//! mag.init(delay)?;
//!
//! let sample = mag.sample(delay)?;
//! if sample.valid {
//!     let [x, y, z] = sample.to_f32();
//! #   let _ = (x, y, z);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Protocol
//!
//! Each axis conversion selects the device, pulses RESET high for 1 us, sends
//! a command byte (`axis select code | period rank << 4`), busy-polls
//! DATA-READY against a period-dependent deadline and clocks out a big-endian
//! `i16`. See [`encode_command`] and [`Period::default_timeout_us`].
//!
//! # Timing
//!
//! DATA-READY is polled, never waited on through an interrupt. A call blocks
//! the caller until the part answers or the deadline passes: up to about
//! 0.5 ms per axis at [`Period::Cycles32`] and 60 ms at
//! [`Period::Cycles4096`]. There is no cancellation and no retry.
//!
//! # Failures inside a sample
//!
//! [`MicroMag3::sample`] reads X, Y and Z even if an earlier axis timed out.
//! A failed axis reads zero and clears [`Sample::valid`]. Only bus and pin
//! faults ([`Error::Bus`], [`Error::Pin`]) abort the pass.
//!
//! # Shared buses
//!
//! Bus parameters ([`BusConfig`]) are reasserted through
//! [`SerialBus::configure`] before each sample pass. Access is not
//! arbitrated; serialize other bus users externally.

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::items_after_statements
)]

mod clock;
mod command;
mod config;
mod data;
mod device;
mod driver;
mod error;
mod interface;

#[cfg(test)]
mod testing;

// Interface layer
pub use clock::MonotonicClock;
pub use interface::{BitOrder, BusConfig, ClockDivider};
pub use interface::{FixedSpiBus, FixedSpiBusError, Interface, PinBusInterface, SerialBus};

// Configuration
pub use config::{Config, Period, resolve_timeout_us};

// Driver
pub use driver::{MicroMag3, MicroMag3Spi};

// Protocol and data types
pub use command::{Axis, encode_command};
pub use data::{Sample, compose_measurement};

pub use error::Error;
