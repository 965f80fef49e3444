//! Input latch and target letter tracking

use portable_atomic::{AtomicBool, Ordering};

use crate::types::TrainerInput;

/// Atomic input state shared between interrupt handlers and the tick task.
///
/// Edge interrupts store the current level; the tick task samples all three
/// inputs once per tick. Contacts are expected to be debounced upstream.
pub struct InputLatch {
    start: AtomicBool,
    key: AtomicBool,
    reset: AtomicBool,
}

impl InputLatch {
    pub const fn new() -> Self {
        Self {
            start: AtomicBool::new(false),
            key: AtomicBool::new(false),
            reset: AtomicBool::new(false),
        }
    }

    /// Update the start switch level (interrupt safe)
    pub fn set_start(&self, asserted: bool) {
        self.start.store(asserted, Ordering::Relaxed);
    }

    /// Update the Morse key level (interrupt safe)
    pub fn set_key(&self, pressed: bool) {
        self.key.store(pressed, Ordering::Relaxed);
    }

    /// Request a synchronous reset on the next tick
    pub fn request_reset(&self) {
        self.reset.store(true, Ordering::Relaxed);
    }

    pub fn start(&self) -> bool {
        self.start.load(Ordering::Relaxed)
    }

    pub fn key(&self) -> bool {
        self.key.load(Ordering::Relaxed)
    }

    /// Sample all inputs for one tick. A pending reset request is consumed.
    pub fn sample(&self) -> TrainerInput {
        TrainerInput {
            start: self.start(),
            key: self.key(),
            reset: self.reset.swap(false, Ordering::Relaxed),
        }
    }
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Current target letter. Cycles A..Z, advancing on each correct answer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TargetTracker {
    index: u8,
}

const TARGET_COUNT: u8 = 26;

impl TargetTracker {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Letter the trainee should key next
    pub const fn current(&self) -> char {
        (b'A' + self.index) as char
    }

    /// Check an answer; moves to the next letter if it matches
    pub fn check(&mut self, answer: char) -> bool {
        let matched = answer.to_ascii_uppercase() == self.current();
        if matched {
            self.advance();
        }
        matched
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % TARGET_COUNT;
    }

    pub fn restart(&mut self) {
        self.index = 0;
    }
}

impl Default for TargetTracker {
    fn default() -> Self {
        Self::new()
    }
}
