//! Testing infrastructure (mock interface, pins, clock, delays).

pub(crate) mod mock;

pub(crate) use mock::{
    Event, LoopbackSpi, MockClock, MockDelay, MockInterface, MockPin, Ready,
};
