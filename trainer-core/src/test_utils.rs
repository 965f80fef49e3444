//! Test utilities for trainer core functionality

#[cfg(feature = "test-utils")]
pub mod key_simulator {
    //! Scripted start/key input for deterministic tick-level testing

    use crate::morse;
    use crate::types::{ElapsedTicks, Symbol, TrainerConfig, TrainerInput};
    use std::vec::Vec;

    /// One scripted step: hold an input level for a number of ticks
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyStep {
        pub input: TrainerInput,
        pub ticks: u32,
    }

    /// A sequence of input levels, expanded to one input per tick
    #[derive(Debug, Clone, Default)]
    pub struct KeyScript {
        steps: Vec<KeyStep>,
    }

    impl KeyScript {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(mut self, input: TrainerInput, ticks: u32) -> Self {
            if ticks > 0 {
                self.steps.push(KeyStep { input, ticks });
            }
            self
        }

        /// Start asserted, key released
        pub fn start(self, ticks: u32) -> Self {
            self.push(TrainerInput::new(true, false), ticks)
        }

        /// Start asserted, key pressed
        pub fn press(self, ticks: u32) -> Self {
            self.push(TrainerInput::new(true, true), ticks)
        }

        /// Start asserted, key released (alias of `start` that reads better in sequences)
        pub fn release(self, ticks: u32) -> Self {
            self.start(ticks)
        }

        /// Start deasserted, key released
        pub fn stop(self, ticks: u32) -> Self {
            self.push(TrainerInput::new(false, false), ticks)
        }

        /// Start deasserted with the key held
        pub fn stop_pressed(self, ticks: u32) -> Self {
            self.push(TrainerInput::new(false, true), ticks)
        }

        /// One tick of synchronous reset
        pub fn reset(self) -> Self {
            self.push(TrainerInput::reset(), 1)
        }

        /// One press of `press` ticks followed by a `gap` tick release
        pub fn keyed(self, press: ElapsedTicks, gap: ElapsedTicks) -> Self {
            self.press(press as u32).release(gap as u32)
        }

        /// Key the canonical sequence for `c` using `config` timing, then wait
        /// out the character gap. Unknown characters add nothing.
        pub fn character(mut self, c: char, config: &TrainerConfig) -> Self {
            let Some(pattern) = morse::encode(c) else {
                return self;
            };
            let (dot, dash) = nominal_presses(config);
            // Shorter than the character gap, so symbols stay in one window
            let element_gap = (config.char_ticks / 4).max(1);

            for (i, symbol) in pattern.iter().enumerate() {
                let press = match symbol {
                    Symbol::Dot => dot,
                    Symbol::Dash => dash,
                };
                let gap = if i + 1 == pattern.len() {
                    config.char_ticks
                } else {
                    element_gap
                };
                self = self.keyed(press, gap);
            }
            self
        }

        pub fn steps(&self) -> &[KeyStep] {
            &self.steps
        }

        /// Total script length in ticks
        pub fn len_ticks(&self) -> u32 {
            self.steps.iter().map(|s| s.ticks).sum()
        }

        /// Expand to one input per tick
        pub fn inputs(&self) -> impl Iterator<Item = TrainerInput> + '_ {
            self.steps
                .iter()
                .flat_map(|s| core::iter::repeat(s.input).take(s.ticks as usize))
        }
    }

    /// Press lengths that classify as dot and dash under `config`
    pub fn nominal_presses(config: &TrainerConfig) -> (ElapsedTicks, ElapsedTicks) {
        let dot = config.dot_ticks.min(config.dash_ticks - 1);
        // Midway between the dash threshold and the timeout
        let dash = config.dash_ticks + (config.max_press_ticks - config.dash_ticks) / 2;
        (dot, dash)
    }
}

#[cfg(feature = "test-utils")]
pub mod output_capture {
    //! Output capture and analysis for testing

    use crate::fsm::TrainerFSM;
    use crate::types::{DecodedCharacter, TrainerFault, TrainerOutput, TrainerState};
    use std::string::String;
    use std::vec::Vec;

    use super::key_simulator::KeyScript;

    /// Per-tick output history
    #[derive(Debug, Default)]
    pub struct OutputCapture {
        outputs: Vec<TrainerOutput>,
    }

    impl OutputCapture {
        pub fn new() -> Self {
            Self::default()
        }

        /// Feed every tick of `script` to `fsm`, recording each output
        pub fn run(fsm: &mut TrainerFSM, script: &KeyScript) -> Self {
            let mut capture = Self::new();
            for input in script.inputs() {
                capture.record(fsm.tick(input));
            }
            capture
        }

        pub fn record(&mut self, output: TrainerOutput) {
            self.outputs.push(output);
        }

        pub fn outputs(&self) -> &[TrainerOutput] {
            &self.outputs
        }

        pub fn last(&self) -> Option<&TrainerOutput> {
            self.outputs.last()
        }

        /// Characters finalized during the capture, in order
        pub fn decoded(&self) -> Vec<DecodedCharacter> {
            self.outputs
                .iter()
                .filter(|o| o.char_complete)
                .filter_map(|o| o.decoded)
                .collect()
        }

        /// Tick indices at which a character window closed
        pub fn completion_ticks(&self) -> Vec<usize> {
            self.outputs
                .iter()
                .enumerate()
                .filter(|(_, o)| o.char_complete)
                .map(|(i, _)| i)
                .collect()
        }

        /// Decoded characters as text, `?` for unrecognized sequences
        pub fn decoded_text(&self) -> String {
            self.decoded()
                .iter()
                .map(|d| d.character.unwrap_or('?'))
                .collect()
        }

        /// Tick index of every state change
        pub fn transitions(&self) -> Vec<(usize, TrainerState)> {
            let mut result = Vec::new();
            let mut previous = None;
            for (i, out) in self.outputs.iter().enumerate() {
                if previous != Some(out.state) {
                    result.push((i, out.state));
                }
                previous = Some(out.state);
            }
            result
        }

        /// True if `ready` held on every tick in `range`
        pub fn ready_throughout(&self, range: core::ops::Range<usize>) -> bool {
            self.outputs[range].iter().all(|o| o.ready)
        }

        /// Faults in order of first appearance
        pub fn faults(&self) -> Vec<TrainerFault> {
            let mut result = Vec::new();
            let mut previous = None;
            for out in &self.outputs {
                if out.fault != previous {
                    if let Some(f) = out.fault {
                        result.push(f);
                    }
                }
                previous = out.fault;
            }
            result
        }
    }
}
