//! Core data types for the Morse trainer

use crate::display::DisplayCode;

/// Tick count. All durations in the core are expressed in ticks.
pub type ElapsedTicks = u16;

/// Morse code symbols produced by the classifier
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Short press
    Dot,
    /// Long press
    Dash,
}

impl Symbol {
    /// Returns the conventional printable form of this symbol
    pub const fn as_char(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    /// Parse a single `.` or `-`
    pub const fn from_char(c: char) -> Option<Symbol> {
        match c {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }
}

/// Trainer FSM states
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrainerState {
    /// Not running. Entered on reset, on start deasserted, or on key timeout
    Idle,
    /// Session running, key released, waiting for a symbol or the character gap
    WaitingInput,
    /// Key held, accumulating a press duration
    Decoding,
}

impl TrainerState {
    /// Returns true if a training session is running
    pub const fn is_active(&self) -> bool {
        match self {
            TrainerState::Idle => false,
            TrainerState::WaitingInput | TrainerState::Decoding => true,
        }
    }
}

/// Recoverable conditions surfaced to the display layer.
///
/// None of these stop the trainer: a key timeout aborts the current
/// character and drops to Idle, an overflow drops the newest symbol.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrainerFault {
    /// Key held for `max_press_ticks` or longer
    KeyTimeout,
    /// More symbols than fit in one character
    BufferOverflow,
}

#[cfg(feature = "std")]
impl core::fmt::Display for TrainerFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TrainerFault::KeyTimeout => write!(f, "Key held too long"),
            TrainerFault::BufferOverflow => write!(f, "Too many symbols in one character"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TrainerFault {}

/// Result of one completed character window
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedCharacter {
    /// Decoded character, `None` when the sequence is not in the table
    pub character: Option<char>,
    /// True when the sequence matched a table entry
    pub valid: bool,
}

impl DecodedCharacter {
    /// A sequence that matched `c`
    pub const fn recognized(c: char) -> Self {
        Self {
            character: Some(c),
            valid: true,
        }
    }

    /// A sequence with no table entry
    pub const fn unrecognized() -> Self {
        Self {
            character: None,
            valid: false,
        }
    }
}

/// Inputs sampled once per tick
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrainerInput {
    /// Session enable switch
    pub start: bool,
    /// Morse key
    pub key: bool,
    /// Synchronous reset
    pub reset: bool,
}

impl TrainerInput {
    pub const fn new(start: bool, key: bool) -> Self {
        Self {
            start,
            key,
            reset: false,
        }
    }

    pub const fn reset() -> Self {
        Self {
            start: false,
            key: false,
            reset: true,
        }
    }
}

/// Outputs published once per tick
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrainerOutput {
    /// FSM state after this tick
    pub state: TrainerState,
    /// Status LED: session running
    pub ready: bool,
    /// 7-segment glyph to show
    pub display_value: DisplayCode,
    /// Last finalized character was recognized
    pub decode_valid: bool,
    /// Last finalized character, if any
    pub decoded: Option<DecodedCharacter>,
    /// A character window closed on this tick
    pub char_complete: bool,
    /// Letter the trainee is asked to key
    pub target: char,
    /// Last finalized character matched the target it was keyed against
    pub target_matched: bool,
    /// Latest fault of the current character window
    pub fault: Option<TrainerFault>,
}

impl TrainerOutput {
    /// Output port byte: segments in bits 6..0, ready in bit 7
    pub const fn port_value(&self) -> u8 {
        self.display_value.to_port(self.ready)
    }
}

/// Trainer timing configuration, in ticks
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrainerConfig {
    /// Nominal dot length
    pub dot_ticks: ElapsedTicks,
    /// Presses at least this long are dashes
    pub dash_ticks: ElapsedTicks,
    /// Release gap that closes a character
    pub char_ticks: ElapsedTicks,
    /// Presses reaching this length abort the character
    pub max_press_ticks: ElapsedTicks,
    /// Tick period in milliseconds (informational for the core)
    pub tick_period_ms: u32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            dot_ticks: 20,
            dash_ticks: 60,
            char_ticks: 40,
            max_press_ticks: 68,
            tick_period_ms: 10, // 100 Hz
        }
    }
}

impl TrainerConfig {
    /// Create a new configuration with validation
    pub fn new(
        dot_ticks: ElapsedTicks,
        dash_ticks: ElapsedTicks,
        char_ticks: ElapsedTicks,
        max_press_ticks: ElapsedTicks,
        tick_period_ms: u32,
    ) -> Result<Self, &'static str> {
        if dot_ticks == 0 {
            return Err("Dot time must be at least one tick");
        }
        if dash_ticks <= dot_ticks {
            return Err("Dash time must be longer than dot time");
        }
        if max_press_ticks <= dash_ticks {
            return Err("Max press time must be longer than dash time");
        }
        if char_ticks == 0 {
            return Err("Character gap must be at least one tick");
        }
        if tick_period_ms == 0 || tick_period_ms > 1000 {
            return Err("Tick period must be between 1 and 1000 ms");
        }

        Ok(Self {
            dot_ticks,
            dash_ticks,
            char_ticks,
            max_press_ticks,
            tick_period_ms,
        })
    }

    /// Nominal dot length in milliseconds
    pub fn dot_ms(&self) -> u32 {
        self.dot_ticks as u32 * self.tick_period_ms
    }

    /// Character gap in milliseconds
    pub fn char_gap_ms(&self) -> u32 {
        self.char_ticks as u32 * self.tick_period_ms
    }

    /// Approximate keying speed implied by the dot length (PARIS: dot = 1200 / WPM ms)
    pub fn wpm(&self) -> u32 {
        (1200 / self.dot_ms().max(1)).max(1)
    }
}
