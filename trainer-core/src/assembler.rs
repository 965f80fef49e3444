//! Character assembly from classified symbols

use heapless::Vec;

use crate::morse::{self, MAX_SYMBOLS};
use crate::types::{DecodedCharacter, ElapsedTicks, Symbol, TrainerFault};

/// Bounded symbol sequence for one character
pub type SymbolBuffer = Vec<Symbol, MAX_SYMBOLS>;

/// Collects symbols until the character gap elapses
#[derive(Debug)]
pub struct CharacterAssembler {
    buffer: SymbolBuffer,
    char_ticks: ElapsedTicks,
    overflowed: bool,
}

impl CharacterAssembler {
    pub const fn new(char_ticks: ElapsedTicks) -> Self {
        Self {
            buffer: Vec::new(),
            char_ticks,
            overflowed: false,
        }
    }

    /// Append a symbol to the current character.
    ///
    /// When the buffer is full the symbol is dropped and the overflow is
    /// remembered until the character is finalized or cleared.
    pub fn on_symbol(&mut self, symbol: Symbol) -> Result<(), TrainerFault> {
        if self.buffer.push(symbol).is_err() {
            self.overflowed = true;
            return Err(TrainerFault::BufferOverflow);
        }
        Ok(())
    }

    /// Report how many consecutive ticks the key has been released.
    ///
    /// Returns the decoded character once the gap reaches the character
    /// time with symbols pending; otherwise nothing happens.
    pub fn on_idle_ticks(&mut self, count: ElapsedTicks) -> Option<DecodedCharacter> {
        if count < self.char_ticks || self.buffer.is_empty() {
            return None;
        }

        let decoded = match morse::decode(&self.buffer) {
            Some(c) => DecodedCharacter::recognized(c),
            None => DecodedCharacter::unrecognized(),
        };
        self.clear();
        Some(decoded)
    }

    /// Discard the current character
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// A symbol was dropped from the current character
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn set_char_ticks(&mut self, char_ticks: ElapsedTicks) {
        self.char_ticks = char_ticks;
    }
}
