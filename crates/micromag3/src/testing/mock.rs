extern crate std;

use core::cell::Cell;
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, InputPin, OutputPin, PinState};
use embedded_hal::spi::{self, SpiBus};

use crate::clock::MonotonicClock;
use crate::error::Error;
use crate::interface::{BusConfig, Interface, sealed};

/// Pin and bus activity recorded by [`MockInterface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Configure(BusConfig),
    ChipSelect(PinState),
    Reset(PinState),
    Transfer(u8),
}

/// When DATA-READY rises after a command byte is received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Ready {
    /// Goes high this many microseconds after the command.
    After(u32),
    /// Stays low.
    Never,
}

/// Simulated microsecond counter shared between clones.
///
/// Every `now_us` call returns the current time and then advances it by
/// `step_us`, so a busy-poll loop makes progress.
#[derive(Clone, Debug)]
pub(crate) struct MockClock {
    now: Rc<Cell<u32>>,
    step_us: u32,
}

impl MockClock {
    pub(crate) fn new(step_us: u32) -> Self {
        Self::starting_at(0, step_us)
    }

    pub(crate) fn starting_at(start_us: u32, step_us: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(start_us)),
            step_us,
        }
    }

    pub(crate) fn peek(&self) -> u32 {
        self.now.get()
    }

    pub(crate) fn advance(&self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }
}

impl MonotonicClock for MockClock {
    fn now_us(&mut self) -> u32 {
        let now = self.now.get();
        self.advance(self.step_us);
        now
    }
}

/// Scripted MicroMag3 stand-in.
///
/// The first transfer after a RESET high-to-low edge is taken as the command
/// byte and arms DATA-READY from the next [`Ready`] entry (default: ready
/// immediately). Other transfers shift out the queued result bytes (default 0).
#[derive(Debug)]
pub(crate) struct MockInterface {
    clock: MockClock,
    events: Vec<Event>,
    commands: Vec<u8>,
    results: VecDeque<u8>,
    ready: VecDeque<Ready>,
    reset_high: bool,
    armed: bool,
    ready_at: Option<u32>,
    polls: u32,
    fail_transfers: bool,
}

impl MockInterface {
    pub(crate) fn new(clock: MockClock) -> Self {
        Self {
            clock,
            events: Vec::new(),
            commands: Vec::new(),
            results: VecDeque::new(),
            ready: VecDeque::new(),
            reset_high: false,
            armed: false,
            ready_at: None,
            polls: 0,
            fail_transfers: false,
        }
    }

    /// Queues the two result bytes for the next conversion.
    pub(crate) fn with_result(mut self, value: i16) -> Self {
        self.results.extend(value.to_be_bytes());
        self
    }

    pub(crate) fn with_result_bytes(mut self, bytes: &[u8]) -> Self {
        self.results.extend(bytes.iter().copied());
        self
    }

    pub(crate) fn with_ready(mut self, ready: Ready) -> Self {
        self.ready.push_back(ready);
        self
    }

    pub(crate) fn with_failing_transfers(mut self) -> Self {
        self.fail_transfers = true;
        self
    }

    pub(crate) fn events(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn commands(&self) -> &[u8] {
        &self.commands
    }

    pub(crate) fn transfer_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Transfer(_)))
            .count()
    }

    pub(crate) fn polls(&self) -> u32 {
        self.polls
    }

    pub(crate) fn remaining_results(&self) -> usize {
        self.results.len()
    }

    pub(crate) fn chip_select_level(&self) -> Option<PinState> {
        self.events.iter().rev().find_map(|event| match event {
            Event::ChipSelect(state) => Some(*state),
            _ => None,
        })
    }
}

impl Interface for MockInterface {
    fn configure_bus(&mut self, config: BusConfig) -> Result<(), Error> {
        self.events.push(Event::Configure(config));
        Ok(())
    }

    fn set_chip_select(&mut self, state: PinState) -> Result<(), Error> {
        self.events.push(Event::ChipSelect(state));
        Ok(())
    }

    fn set_reset(&mut self, state: PinState) -> Result<(), Error> {
        self.events.push(Event::Reset(state));
        match state {
            PinState::High => self.reset_high = true,
            PinState::Low => {
                if self.reset_high {
                    self.armed = true;
                    self.ready_at = None;
                }
                self.reset_high = false;
            }
        }
        Ok(())
    }

    fn data_ready(&mut self) -> Result<bool, Error> {
        self.polls += 1;
        Ok(self.ready_at.is_some_and(|at| self.clock.peek() >= at))
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Error> {
        if self.fail_transfers {
            return Err(Error::Bus);
        }
        self.events.push(Event::Transfer(byte));
        if self.armed {
            self.armed = false;
            self.commands.push(byte);
            self.ready_at = match self.ready.pop_front().unwrap_or(Ready::After(0)) {
                Ready::After(us) => Some(self.clock.peek().wrapping_add(us)),
                Ready::Never => None,
            };
            return Ok(0);
        }
        Ok(self.results.pop_front().unwrap_or(0))
    }
}

impl sealed::Sealed for MockInterface {}

#[derive(Default, Debug)]
pub(crate) struct MockDelay {
    pub(crate) calls: u32,
    pub(crate) last_ns: Option<u32>,
    pub(crate) delays_ns: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.last_ns = Some(ns);
        self.delays_ns.push(ns);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Single GPIO usable as input or output.
#[derive(Debug)]
pub(crate) struct MockPin {
    state: PinState,
    fail_next: bool,
}

impl MockPin {
    pub(crate) fn new(state: PinState) -> Self {
        Self {
            state,
            fail_next: false,
        }
    }

    pub(crate) fn state(&self) -> PinState {
        self.state
    }

    pub(crate) fn set_input(&mut self, state: PinState) {
        self.state = state;
    }

    pub(crate) fn fail_next(&mut self) {
        self.fail_next = true;
    }

    fn check(&mut self) -> Result<(), MockPinError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(MockPinError);
        }
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = MockPinError;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.check()?;
        Ok(self.state == PinState::High)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.check()?;
        Ok(self.state == PinState::Low)
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.state = PinState::Low;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.state = PinState::High;
        Ok(())
    }
}

/// SPI bus that records sent bytes and replies from a queue (default 0).
#[derive(Default, Debug)]
pub(crate) struct LoopbackSpi {
    sent: Vec<u8>,
    replies: VecDeque<u8>,
}

impl LoopbackSpi {
    pub(crate) fn with_replies(replies: &[u8]) -> Self {
        Self {
            sent: Vec::new(),
            replies: replies.iter().copied().collect(),
        }
    }

    pub(crate) fn sent(&self) -> &[u8] {
        &self.sent
    }

    fn exchange(&mut self, byte: u8) -> u8 {
        self.sent.push(byte);
        self.replies.pop_front().unwrap_or(0)
    }
}

impl spi::ErrorType for LoopbackSpi {
    type Error = Infallible;
}

impl SpiBus<u8> for LoopbackSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            *word = self.exchange(0);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for &word in words {
            self.exchange(word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let len = read.len().max(write.len());
        for index in 0..len {
            let reply = self.exchange(write.get(index).copied().unwrap_or(0));
            if let Some(slot) = read.get_mut(index) {
                *slot = reply;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            *word = self.exchange(*word);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
