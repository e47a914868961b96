//! Shared test infrastructure for irq-buttons integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use irq_buttons::{ButtonHal, ButtonTracker, Edge, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
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
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    /// Starts the clock well past zero, as on a device that has been running
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(1000)),
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

// ============================================================================
// Simulated Board
// ============================================================================

pub const PIN_COUNT: usize = 8;

/// Electrical levels of the board's GPIO pins. Pins idle high (pull-up).
pub struct Board {
    levels: [Cell<bool>; PIN_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            levels: core::array::from_fn(|_| Cell::new(true)),
        }
    }

    /// Closes the switch on `pin`, pulling it low
    pub fn press(&self, pin: u8) {
        self.levels[pin as usize].set(false);
    }

    /// Opens the switch on `pin`, letting the pull-up take it high
    pub fn release(&self, pin: u8) {
        self.levels[pin as usize].set(true);
    }
}

/// Error returned by an input configured to fail its reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadFault;

impl embedded_hal::digital::Error for ReadFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Input pin reading from the simulated board
pub struct MockInput<'a> {
    pub pin: u8,
    level: &'a Cell<bool>,
    faulty: bool,
}

impl ErrorType for MockInput<'_> {
    type Error = ReadFault;
}

impl InputPin for MockInput<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.faulty {
            return Err(ReadFault);
        }
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ============================================================================
// Mock HAL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    NoSuchPin(u8),
    Rejected(u8),
}

/// Everything the tracker asked the hardware to do, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalEvent {
    Configured(u8),
    Bound(u8, Edge),
    Unbound(u8),
    Delayed(u32),
}

/// Shared log so the HAL and the delay provider record into one timeline
pub type EventLog = RefCell<Vec<HalEvent>>;

/// HAL mock that hands out board inputs and records interrupt bindings
pub struct MockHal<'a> {
    board: &'a Board,
    log: &'a EventLog,
    bound: Vec<u8>,
    pub fail_configure: Option<u8>,
    pub fail_bind: Option<u8>,
    /// Inputs handed out for this pin fail every read
    pub fail_read: Option<u8>,
    /// Runs after a pin is armed, standing in for an interrupt that fires
    /// as soon as binding completes
    pub on_bind: Option<&'a dyn Fn(u8)>,
}

impl<'a> MockHal<'a> {
    pub fn new(board: &'a Board, log: &'a EventLog) -> Self {
        Self {
            board,
            log,
            bound: Vec::new(),
            fail_configure: None,
            fail_bind: None,
            fail_read: None,
            on_bind: None,
        }
    }

    /// Pins whose interrupts are currently armed
    pub fn bound_pins(&self) -> &[u8] {
        &self.bound
    }
}

impl<'a> ButtonHal for MockHal<'a> {
    type PinId = u8;
    type Input = MockInput<'a>;
    type Error = MockError;

    fn configure_pin(&mut self, pin: u8) -> Result<MockInput<'a>, MockError> {
        if self.fail_configure == Some(pin) {
            return Err(MockError::Rejected(pin));
        }
        let level = self
            .board
            .levels
            .get(pin as usize)
            .ok_or(MockError::NoSuchPin(pin))?;
        self.log.borrow_mut().push(HalEvent::Configured(pin));
        Ok(MockInput {
            pin,
            level,
            faulty: self.fail_read == Some(pin),
        })
    }

    fn bind_interrupt(
        &mut self,
        pin: u8,
        input: &mut MockInput<'a>,
        edge: Edge,
    ) -> Result<(), MockError> {
        assert_eq!(input.pin, pin);
        if self.fail_bind == Some(pin) {
            return Err(MockError::Rejected(pin));
        }
        self.bound.push(pin);
        self.log.borrow_mut().push(HalEvent::Bound(pin, edge));
        if let Some(hook) = self.on_bind {
            hook(pin);
        }
        Ok(())
    }

    fn unbind_interrupt(&mut self, pin: u8, input: &mut MockInput<'a>) {
        assert_eq!(input.pin, pin);
        self.bound.retain(|&p| p != pin);
        self.log.borrow_mut().push(HalEvent::Unbound(pin));
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay provider that records requested delays instead of sleeping
pub struct MockDelay<'a> {
    log: &'a EventLog,
}

impl<'a> MockDelay<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self { log }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(HalEvent::Delayed(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(HalEvent::Delayed(ms));
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub type TestTracker<'a, const N: usize> =
    ButtonTracker<'a, MockHal<'a>, TestInstant, MockTimeSource, N>;

/// Applies a raw level change and delivers the edge interrupt
pub fn edge<const N: usize>(tracker: &TestTracker<'_, N>, board: &Board, pin: u8, pressed: bool) {
    if pressed {
        board.press(pin);
    } else {
        board.release(pin);
    }
    tracker.on_interrupt();
}
