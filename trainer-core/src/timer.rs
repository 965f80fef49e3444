//! Press duration counter

use crate::types::ElapsedTicks;

/// Result of advancing the timer by one tick
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerEvent {
    /// Key released and no press in progress
    Idle,
    /// Key held, this many ticks so far
    Counting(ElapsedTicks),
    /// Key released after being held this many ticks
    Completed(ElapsedTicks),
    /// Key held until the counter saturated
    KeyTimeout,
}

/// Counts consecutive ticks the key is held.
///
/// The counter saturates at `max_ticks`; it never wraps.
#[derive(Debug)]
pub struct SymbolTimer {
    count: ElapsedTicks,
    max_ticks: ElapsedTicks,
}

impl SymbolTimer {
    /// Create a timer that times out after `max_ticks` held ticks
    pub const fn new(max_ticks: ElapsedTicks) -> Self {
        Self {
            count: 0,
            max_ticks,
        }
    }

    /// Advance by one tick with the sampled key level
    pub fn advance(&mut self, key_pressed: bool) -> TimerEvent {
        if key_pressed {
            if self.count >= self.max_ticks {
                return TimerEvent::KeyTimeout;
            }
            self.count += 1;
            if self.count >= self.max_ticks {
                TimerEvent::KeyTimeout
            } else {
                TimerEvent::Counting(self.count)
            }
        } else if self.count > 0 {
            let elapsed = self.count;
            self.count = 0;
            TimerEvent::Completed(elapsed)
        } else {
            TimerEvent::Idle
        }
    }

    /// Ticks held so far in the current press
    pub fn elapsed(&self) -> ElapsedTicks {
        self.count
    }

    /// True while a press is being timed
    pub fn is_counting(&self) -> bool {
        self.count > 0
    }

    /// Drop any press in progress
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Change the saturation point; a press in progress is dropped
    pub fn set_max_ticks(&mut self, max_ticks: ElapsedTicks) {
        self.max_ticks = max_ticks;
        self.count = 0;
    }
}
