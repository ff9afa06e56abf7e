//! Shared test infrastructure for rgb-led-driver integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use rgb_led_driver::{
    LedDriver, MillisInstant, OutputChannel, Polarity, SerialPort, TimeDuration, TimeInstant,
    TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Sources
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

/// Wrapping 32-bit millisecond counter, for rollover tests
pub struct MockMillisClock {
    counter: Cell<u32>,
}

impl MockMillisClock {
    pub fn starting_at(millis: u32) -> Self {
        Self {
            counter: Cell::new(millis),
        }
    }

    pub fn advance(&self, millis: u32) {
        self.counter.set(self.counter.get().wrapping_add(millis));
    }

    pub fn millis(&self) -> u32 {
        self.counter.get()
    }
}

impl TimeSource<MillisInstant> for MockMillisClock {
    fn now(&self) -> MillisInstant {
        MillisInstant(self.counter.get())
    }
}

/// Clock that moves forward by a fixed step on every read, for busy-wait loops
pub struct TickingTimeSource {
    current_time: Cell<u64>,
    step: u64,
}

impl TickingTimeSource {
    pub fn new(step: u64) -> Self {
        Self {
            current_time: Cell::new(0),
            step,
        }
    }

    pub fn elapsed(&self) -> u64 {
        self.current_time.get()
    }
}

impl TimeSource<TestInstant> for TickingTimeSource {
    fn now(&self) -> TestInstant {
        let now = self.current_time.get();
        self.current_time.set(now + self.step);
        TestInstant(now)
    }
}

// ============================================================================
// Mock Channel
// ============================================================================

#[derive(Debug, Default)]
struct ChannelLog {
    levels: Vec<u8>,
    configure_calls: u32,
}

/// Channel that records every written level. Clones share the same log, so
/// a test can keep one clone while the driver owns the other.
#[derive(Debug, Clone, Default)]
pub struct MockChannel {
    log: Rc<RefCell<ChannelLog>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_level(&self) -> Option<u8> {
        self.log.borrow().levels.last().copied()
    }

    pub fn levels(&self) -> Vec<u8> {
        self.log.borrow().levels.clone()
    }

    pub fn write_count(&self) -> usize {
        self.log.borrow().levels.len()
    }

    pub fn configure_calls(&self) -> u32 {
        self.log.borrow().configure_calls
    }
}

impl OutputChannel for MockChannel {
    fn configure_output(&mut self) {
        self.log.borrow_mut().configure_calls += 1;
    }

    fn write_level(&mut self, level: u8) {
        self.log.borrow_mut().levels.push(level);
    }
}

/// Handles onto the three channels of a driver under test
#[derive(Clone)]
pub struct Probe {
    pub red: MockChannel,
    pub green: MockChannel,
    pub blue: MockChannel,
}

impl Probe {
    pub fn new() -> Self {
        Self {
            red: MockChannel::new(),
            green: MockChannel::new(),
            blue: MockChannel::new(),
        }
    }

    /// Last level written to each channel
    pub fn levels(&self) -> (Option<u8>, Option<u8>, Option<u8>) {
        (
            self.red.last_level(),
            self.green.last_level(),
            self.blue.last_level(),
        )
    }

    pub fn write_count(&self) -> usize {
        self.red.write_count()
    }
}

pub type TestDriver<'t> =
    LedDriver<'t, TestInstant, MockChannel, MockChannel, MockChannel, MockTimeSource>;

/// Common-cathode driver, so written levels equal intensities
pub fn cathode_driver(timer: &MockTimeSource) -> (TestDriver<'_>, Probe) {
    let probe = Probe::new();
    let driver = LedDriver::with_polarity(
        probe.red.clone(),
        probe.green.clone(),
        probe.blue.clone(),
        Polarity::CommonCathode,
        timer,
    );
    (driver, probe)
}

/// Driver built with the default (common-anode) constructor
pub fn anode_driver(timer: &MockTimeSource) -> (TestDriver<'_>, Probe) {
    let probe = Probe::new();
    let driver = LedDriver::new(
        probe.red.clone(),
        probe.green.clone(),
        probe.blue.clone(),
        timer,
    );
    (driver, probe)
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that records requested sleeps instead of sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    pub millis: Vec<u32>,
    /// Panic after this many `delay_ms` calls, to escape `-> !` loops
    pub panic_after: Option<usize>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panicking_after(calls: usize) -> Self {
        Self {
            millis: Vec::new(),
            panic_after: Some(calls),
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.millis.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.millis.push(ms);
        if let Some(limit) = self.panic_after {
            if self.millis.len() >= limit {
                panic!("mock delay limit reached");
            }
        }
    }
}

// ============================================================================
// Mock Serial
// ============================================================================

/// Serial port fed from a queue; records everything written
#[derive(Debug, Default)]
pub struct MockSerial {
    pub input: VecDeque<Option<u8>>,
    pub output: Vec<u8>,
}

impl MockSerial {
    /// Queues received bytes; `None` entries simulate polls with no data
    pub fn with_input(input: &[Option<u8>]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            input: bytes.iter().map(|&b| Some(b)).collect(),
            output: Vec::new(),
        }
    }
}

impl SerialPort for MockSerial {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front().flatten()
    }

    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }
}
