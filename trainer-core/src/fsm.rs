//! Finite State Machine implementation for the Morse trainer

use crate::assembler::CharacterAssembler;
use crate::classifier::SymbolClassifier;
use crate::controller::TargetTracker;
use crate::display::DisplayCode;
use crate::hal::TrainerHal;
use crate::timer::{SymbolTimer, TimerEvent};
use crate::types::{
    DecodedCharacter, ElapsedTicks, Symbol, TrainerConfig, TrainerFault, TrainerInput,
    TrainerOutput, TrainerState,
};

/// Main trainer FSM.
///
/// Owns every piece of mutable trainer state. [`TrainerFSM::tick`] is called
/// once per tick and performs, in order: timer advance, classification of a
/// completed press, assembly, state update, output.
#[derive(Debug)]
pub struct TrainerFSM {
    state: TrainerState,
    config: TrainerConfig,
    timer: SymbolTimer,
    classifier: SymbolClassifier,
    assembler: CharacterAssembler,
    target: TargetTracker,
    release_ticks: ElapsedTicks,
    key_lockout: bool,
    last_decoded: Option<DecodedCharacter>,
    char_complete: bool,
    target_matched: bool,
    fault: Option<TrainerFault>,
    display: DisplayCode,
}

impl TrainerFSM {
    /// Create new FSM with given configuration
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            state: TrainerState::Idle,
            config,
            timer: SymbolTimer::new(config.max_press_ticks),
            classifier: SymbolClassifier::from_config(&config),
            assembler: CharacterAssembler::new(config.char_ticks),
            target: TargetTracker::new(),
            release_ticks: 0,
            key_lockout: false,
            last_decoded: None,
            char_complete: false,
            target_matched: false,
            fault: None,
            display: DisplayCode::BLANK,
        }
    }

    /// Get current FSM state
    pub fn current_state(&self) -> TrainerState {
        self.state
    }

    /// Advance one tick
    pub fn tick(&mut self, input: TrainerInput) -> TrainerOutput {
        self.char_complete = false;

        if input.reset {
            self.reset();
            return self.output();
        }

        if !input.key {
            self.key_lockout = false;
        }

        if !input.start {
            self.stop();
            return self.output();
        }

        match self.state {
            TrainerState::Idle => self.handle_idle_state(),
            TrainerState::WaitingInput | TrainerState::Decoding => {
                let event = self.timer.advance(input.key);
                self.handle_timer_event(event);
            }
        }

        self.output()
    }

    /// Snapshot of the outputs as of the last tick
    pub fn output(&self) -> TrainerOutput {
        TrainerOutput {
            state: self.state,
            ready: self.state.is_active(),
            display_value: self.display,
            decode_valid: self.last_decoded.map_or(false, |d| d.valid),
            decoded: self.last_decoded,
            char_complete: self.char_complete,
            target: self.target.current(),
            target_matched: self.target_matched,
            fault: self.fault,
        }
    }

    /// Handle Idle state with start asserted
    fn handle_idle_state(&mut self) {
        // A key still held after a timeout keeps the trainer parked
        if self.key_lockout {
            return;
        }

        self.clear_session();
        self.state = TrainerState::WaitingInput;
        self.display = DisplayCode::for_char(self.target.current());

        #[cfg(feature = "defmt")]
        defmt::info!("Session started, target {}", self.target.current());
    }

    /// Handle timer output in WaitingInput and Decoding
    fn handle_timer_event(&mut self, event: TimerEvent) {
        match (self.state, event) {
            (_, TimerEvent::KeyTimeout) => self.abort(TrainerFault::KeyTimeout),
            (TrainerState::WaitingInput, TimerEvent::Counting(_)) => {
                self.state = TrainerState::Decoding;
                self.release_ticks = 0;
            }
            (_, TimerEvent::Counting(_elapsed)) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Key held {} ticks", _elapsed);
            }
            (_, TimerEvent::Completed(elapsed)) => self.handle_press_complete(elapsed),
            (_, TimerEvent::Idle) => self.handle_release_tick(),
        }
    }

    /// Key released after `elapsed` ticks
    fn handle_press_complete(&mut self, elapsed: ElapsedTicks) {
        match self.classifier.classify(elapsed) {
            Ok(symbol) => {
                self.accept_symbol(symbol);
                self.state = TrainerState::WaitingInput;
                // The release tick is the first tick of the gap
                self.handle_release_tick();
            }
            Err(fault) => self.abort(fault),
        }
    }

    fn accept_symbol(&mut self, symbol: Symbol) {
        if self.assembler.is_empty() {
            // New character window
            self.fault = None;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Symbol {}", symbol);

        if let Err(fault) = self.assembler.on_symbol(symbol) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Symbol buffer full, dropping {}", symbol);
            self.fault = Some(fault);
        }
    }

    fn handle_release_tick(&mut self) {
        self.release_ticks = self.release_ticks.saturating_add(1);
        if let Some(decoded) = self.assembler.on_idle_ticks(self.release_ticks) {
            self.publish(decoded);
        }
    }

    fn publish(&mut self, decoded: DecodedCharacter) {
        self.display = match decoded.character {
            Some(c) => DisplayCode::for_char(c),
            None => DisplayCode::ERROR,
        };
        self.target_matched = match decoded.character {
            Some(c) => self.target.check(c),
            None => false,
        };
        self.last_decoded = Some(decoded);
        self.char_complete = true;

        #[cfg(feature = "defmt")]
        defmt::info!("Decoded {}, target matched: {}", decoded, self.target_matched);
    }

    /// Abort the character in progress and drop to Idle
    fn abort(&mut self, fault: TrainerFault) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Aborting character: {}", fault);

        self.clear_session();
        self.state = TrainerState::Idle;
        self.display = DisplayCode::BLANK;
        self.fault = Some(fault);
        self.key_lockout = fault == TrainerFault::KeyTimeout;
    }

    /// Start deasserted: unconditional return to Idle
    fn stop(&mut self) {
        #[cfg(feature = "defmt")]
        if self.state.is_active() {
            defmt::info!("Session stopped");
        }

        self.clear_session();
        self.state = TrainerState::Idle;
        self.display = DisplayCode::BLANK;
        self.fault = None;
    }

    fn clear_session(&mut self) {
        self.timer.reset();
        self.assembler.clear();
        self.release_ticks = 0;
        self.last_decoded = None;
        self.target_matched = false;
    }

    /// Reset FSM to initial state
    pub fn reset(&mut self) {
        self.stop();
        self.key_lockout = false;
        self.target.restart();
    }

    /// Get current configuration
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Update configuration. Any session in progress is stopped.
    pub fn set_config(&mut self, config: TrainerConfig) {
        self.config = config;
        self.timer.set_max_ticks(config.max_press_ticks);
        self.classifier = SymbolClassifier::from_config(&config);
        self.assembler.set_char_ticks(config.char_ticks);
        self.stop();
    }

    /// Symbols collected for the current character
    pub fn symbols(&self) -> &[Symbol] {
        self.assembler.symbols()
    }

    /// Ticks the key has been held in the current press
    pub fn press_ticks(&self) -> ElapsedTicks {
        self.timer.elapsed()
    }

    /// Consecutive ticks the key has been released
    pub fn release_ticks(&self) -> ElapsedTicks {
        self.release_ticks
    }

    pub fn target(&self) -> char {
        self.target.current()
    }
}

/// Sample the hardware, advance the FSM by one tick and publish the result
pub fn run_tick<H: TrainerHal>(fsm: &mut TrainerFSM, hal: &mut H) -> Result<TrainerOutput, H::Error> {
    let input = hal.sample()?;
    let output = fsm.tick(input);
    hal.publish(&output)?;
    Ok(output)
}

/// Async task running the trainer at its configured tick rate.
///
/// Returns only if the HAL fails to initialize; per-tick HAL errors are
/// logged and the ticker keeps running.
#[cfg(feature = "embassy-time")]
pub async fn trainer_task<H: TrainerHal>(hal: &mut H, config: TrainerConfig) -> Result<(), H::Error> {
    use embassy_time::{Duration, Ticker};

    if let Err(e) = hal.initialize() {
        #[cfg(feature = "defmt")]
        defmt::error!("Trainer HAL initialization failed");
        return Err(e);
    }

    let mut fsm = TrainerFSM::new(config);
    let mut ticker = Ticker::every(Duration::from_millis(config.tick_period_ms as u64));

    #[cfg(feature = "defmt")]
    defmt::info!("Trainer task started, tick {} ms", config.tick_period_ms);

    loop {
        if run_tick(&mut fsm, hal).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("HAL error during tick, state {}", fsm.current_state());
        }

        ticker.next().await;
    }
}
