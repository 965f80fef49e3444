//! Press duration to symbol classification

use crate::types::{ElapsedTicks, Symbol, TrainerConfig, TrainerFault};

/// Threshold classifier for completed presses
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SymbolClassifier {
    dash_ticks: ElapsedTicks,
    max_press_ticks: ElapsedTicks,
}

impl SymbolClassifier {
    pub const fn new(dash_ticks: ElapsedTicks, max_press_ticks: ElapsedTicks) -> Self {
        Self {
            dash_ticks,
            max_press_ticks,
        }
    }

    pub const fn from_config(config: &TrainerConfig) -> Self {
        Self::new(config.dash_ticks, config.max_press_ticks)
    }

    /// Classify a completed press.
    ///
    /// There is no lower bound: any press shorter than the dash threshold is a
    /// dot, contacts are assumed debounced upstream.
    pub fn classify(&self, elapsed: ElapsedTicks) -> Result<Symbol, TrainerFault> {
        if elapsed >= self.max_press_ticks {
            Err(TrainerFault::KeyTimeout)
        } else if elapsed >= self.dash_ticks {
            Ok(Symbol::Dash)
        } else {
            Ok(Symbol::Dot)
        }
    }
}
