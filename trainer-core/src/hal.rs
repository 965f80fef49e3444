//! Hardware Abstraction Layer for the trainer

use embedded_hal::digital::{InputPin, OutputPin};

use crate::controller::InputLatch;
use crate::display::DisplayCode;
use crate::types::{TrainerInput, TrainerOutput};

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Hardware not initialized
    NotInitialized,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// A debounced two-level input (start switch, Morse key, reset button)
pub trait InputSwitch {
    type Error: From<HalError>;

    /// Check if the input is currently asserted
    fn is_asserted(&mut self) -> Result<bool, Self::Error>;
}

/// Consumer of the per-tick display state
pub trait DisplaySink {
    type Error: From<HalError>;

    /// Show a glyph and the ready LED
    fn show(&mut self, code: DisplayCode, ready: bool) -> Result<(), Self::Error>;

    /// Blank the display and the LED
    fn clear(&mut self) -> Result<(), Self::Error> {
        self.show(DisplayCode::BLANK, false)
    }
}

/// Complete trainer HAL interface
pub trait TrainerHal {
    type Error: From<HalError>;

    /// Initialize hardware
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Read the inputs for one tick
    fn sample(&mut self) -> Result<TrainerInput, Self::Error>;

    /// Publish the outputs of one tick
    fn publish(&mut self, output: &TrainerOutput) -> Result<(), Self::Error>;

    /// Shutdown hardware
    fn shutdown(&mut self) -> Result<(), Self::Error>;
}

/// Generic implementation for embedded-hal compatible input pins
pub struct EmbeddedHalSwitch<P> {
    pin: P,
    active_low: bool,
}

impl<P> EmbeddedHalSwitch<P>
where
    P: InputPin,
{
    /// Switch that reads low when asserted (pulled up, grounded when pressed)
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> InputSwitch for EmbeddedHalSwitch<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn is_asserted(&mut self) -> Result<bool, Self::Error> {
        let low = self.pin.is_low().map_err(|_| HalError::GpioError)?;
        Ok(low == self.active_low)
    }
}

/// Seven segments plus the ready LED on eight output pins.
///
/// Pin order follows the port layout: `pins[0]` is segment A, `pins[6]` is
/// segment G, `pins[7]` is the ready LED. Pins are only written when the
/// port value changes.
pub struct SegmentDisplay<P> {
    pins: [P; 8],
    last_port: Option<u8>,
}

impl<P> SegmentDisplay<P>
where
    P: OutputPin,
{
    pub fn new(pins: [P; 8]) -> Self {
        Self {
            pins,
            last_port: None,
        }
    }

    /// Last port value driven onto the pins
    pub fn port(&self) -> Option<u8> {
        self.last_port
    }

    pub fn release(self) -> [P; 8] {
        self.pins
    }
}

impl<P> DisplaySink for SegmentDisplay<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn show(&mut self, code: DisplayCode, ready: bool) -> Result<(), Self::Error> {
        let port = code.to_port(ready);
        if self.last_port == Some(port) {
            return Ok(());
        }

        for (bit, pin) in self.pins.iter_mut().enumerate() {
            let result = if port & (1 << bit) != 0 {
                pin.set_high()
            } else {
                pin.set_low()
            };
            result.map_err(|_| HalError::GpioError)?;
        }
        self.last_port = Some(port);
        Ok(())
    }
}

/// HAL built from three input switches and a display sink
pub struct PinTrainerHal<S, K, R, D> {
    start: S,
    key: K,
    reset: R,
    display: D,
    initialized: bool,
}

impl<S, K, R, D> PinTrainerHal<S, K, R, D>
where
    S: InputSwitch<Error = HalError>,
    K: InputSwitch<Error = HalError>,
    R: InputSwitch<Error = HalError>,
    D: DisplaySink<Error = HalError>,
{
    pub fn new(start: S, key: K, reset: R, display: D) -> Self {
        Self {
            start,
            key,
            reset,
            display,
            initialized: false,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

impl<S, K, R, D> TrainerHal for PinTrainerHal<S, K, R, D>
where
    S: InputSwitch<Error = HalError>,
    K: InputSwitch<Error = HalError>,
    R: InputSwitch<Error = HalError>,
    D: DisplaySink<Error = HalError>,
{
    type Error = HalError;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.display.clear()?;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("Trainer HAL initialized");

        Ok(())
    }

    fn sample(&mut self) -> Result<TrainerInput, Self::Error> {
        if !self.initialized {
            return Err(HalError::NotInitialized);
        }
        Ok(TrainerInput {
            start: self.start.is_asserted()?,
            key: self.key.is_asserted()?,
            reset: self.reset.is_asserted()?,
        })
    }

    fn publish(&mut self, output: &TrainerOutput) -> Result<(), Self::Error> {
        if !self.initialized {
            return Err(HalError::NotInitialized);
        }
        self.display.show(output.display_value, output.ready)
    }

    fn shutdown(&mut self) -> Result<(), Self::Error> {
        self.display.clear()?;
        self.initialized = false;

        #[cfg(feature = "defmt")]
        defmt::info!("Trainer HAL shutdown");

        Ok(())
    }
}

/// HAL whose inputs are written by interrupt handlers into an [`InputLatch`]
pub struct LatchedTrainerHal<'a, D> {
    latch: &'a InputLatch,
    display: D,
}

impl<'a, D> LatchedTrainerHal<'a, D>
where
    D: DisplaySink<Error = HalError>,
{
    pub fn new(latch: &'a InputLatch, display: D) -> Self {
        Self { latch, display }
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

impl<'a, D> TrainerHal for LatchedTrainerHal<'a, D>
where
    D: DisplaySink<Error = HalError>,
{
    type Error = HalError;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.display.clear()
    }

    fn sample(&mut self) -> Result<TrainerInput, Self::Error> {
        Ok(self.latch.sample())
    }

    fn publish(&mut self, output: &TrainerOutput) -> Result<(), Self::Error> {
        self.display.show(output.display_value, output.ready)
    }

    fn shutdown(&mut self) -> Result<(), Self::Error> {
        self.display.clear()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;

    #[derive(Default, Debug)]
    pub struct MockSwitch {
        asserted: bool,
        fail: bool,
    }

    impl MockSwitch {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set(&mut self, asserted: bool) {
            self.asserted = asserted;
        }

        /// Make every read fail with a GPIO error
        pub fn set_failing(&mut self, fail: bool) {
            self.fail = fail;
        }
    }

    impl InputSwitch for MockSwitch {
        type Error = HalError;

        fn is_asserted(&mut self) -> Result<bool, Self::Error> {
            if self.fail {
                return Err(HalError::GpioError);
            }
            Ok(self.asserted)
        }
    }

    #[derive(Default, Debug)]
    pub struct MockDisplay {
        code: DisplayCode,
        ready: bool,
        writes: usize,
    }

    impl MockDisplay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn code(&self) -> DisplayCode {
            self.code
        }

        pub fn is_ready(&self) -> bool {
            self.ready
        }

        /// Number of `show` calls so far
        pub fn writes(&self) -> usize {
            self.writes
        }
    }

    impl DisplaySink for MockDisplay {
        type Error = HalError;

        fn show(&mut self, code: DisplayCode, ready: bool) -> Result<(), Self::Error> {
            self.code = code;
            self.ready = ready;
            self.writes += 1;
            Ok(())
        }
    }

    /// Mock hardware collection
    pub type MockTrainerHal = PinTrainerHal<MockSwitch, MockSwitch, MockSwitch, MockDisplay>;

    impl MockTrainerHal {
        pub fn mock() -> Self {
            PinTrainerHal::new(
                MockSwitch::new(),
                MockSwitch::new(),
                MockSwitch::new(),
                MockDisplay::new(),
            )
        }

        pub fn start_switch(&mut self) -> &mut MockSwitch {
            &mut self.start
        }

        pub fn key_switch(&mut self) -> &mut MockSwitch {
            &mut self.key
        }

        pub fn reset_switch(&mut self) -> &mut MockSwitch {
            &mut self.reset
        }
    }
}
