#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Trainer Core
//!
//! Morse trainer core logic library for embedded systems.
//! Classifies timed key presses into dots and dashes, assembles them into
//! characters and drives a 7-segment display, one decision per tick.

pub mod types;
pub mod timer;
pub mod classifier;
pub mod assembler;
pub mod morse;
pub mod display;
pub mod fsm;
pub mod controller;
pub mod hal;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use types::*;
pub use timer::{SymbolTimer, TimerEvent};
pub use classifier::SymbolClassifier;
pub use assembler::{CharacterAssembler, SymbolBuffer};
pub use display::DisplayCode;
pub use fsm::*;
pub use controller::*;
pub use hal::*;

/// Trainer library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration: 10 ms ticks, 200 ms dot, 600 ms dash threshold
pub fn default_config() -> TrainerConfig {
    TrainerConfig {
        dot_ticks: 20,
        dash_ticks: 60,
        char_ticks: 40,
        max_press_ticks: 68,
        tick_period_ms: 10,
    }
}
