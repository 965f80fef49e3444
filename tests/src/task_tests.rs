//! Embassy tick task driven by the mock time driver

#[cfg(test)]
mod tests {
    use core::future::Future;
    use core::pin::{pin, Pin};
    use core::task::{Context, Poll};

    use embassy_time::{Duration, MockDriver};
    use futures::task::noop_waker_ref;
    use trainer_core::hal::mock::MockDisplay;
    use trainer_core::*;

    /// Advance mock time by one tick period and poll the task once
    fn step<F: Future>(task: &mut Pin<&mut F>, config: &TrainerConfig) -> Poll<F::Output> {
        MockDriver::get().advance(Duration::from_millis(config.tick_period_ms as u64));
        task.as_mut().poll(&mut Context::from_waker(noop_waker_ref()))
    }

    #[test]
    fn test_task_ticks_and_publishes() {
        let config = TrainerConfig::default();
        let latch = InputLatch::new();
        let mut hal = LatchedTrainerHal::new(&latch, MockDisplay::new());

        {
            let mut task = pin!(trainer_task(&mut hal, config));
            let mut cx = Context::from_waker(noop_waker_ref());

            // First tick runs before the first ticker wait
            latch.set_start(true);
            assert!(task.as_mut().poll(&mut cx).is_pending());

            // 'E': one dot, then the character gap
            latch.set_key(true);
            for _ in 0..25 {
                assert!(step(&mut task, &config).is_pending());
            }
            latch.set_key(false);
            for _ in 0..40 {
                assert!(step(&mut task, &config).is_pending());
            }
        }

        let display = hal.display();
        assert!(display.is_ready());
        assert_eq!(display.code(), DisplayCode::for_char('E'));
        // Cleared once on initialize, then one publish per tick
        assert_eq!(display.writes(), 1 + 1 + 25 + 40);
    }

    struct BrokenHal;

    impl TrainerHal for BrokenHal {
        type Error = HalError;

        fn initialize(&mut self) -> Result<(), Self::Error> {
            Err(HalError::GpioError)
        }

        fn sample(&mut self) -> Result<TrainerInput, Self::Error> {
            Err(HalError::NotInitialized)
        }

        fn publish(&mut self, _output: &TrainerOutput) -> Result<(), Self::Error> {
            Err(HalError::NotInitialized)
        }

        fn shutdown(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_task_stops_when_initialization_fails() {
        let mut hal = BrokenHal;
        let mut task = pin!(trainer_task(&mut hal, TrainerConfig::default()));
        let result = task.as_mut().poll(&mut Context::from_waker(noop_waker_ref()));
        assert_eq!(result, Poll::Ready(Err(HalError::GpioError)));
    }
}
