//! embedded-hal pin adapter tests against mock GPIO

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::pin::{Mock as PinMock, State, Transaction as PinTransaction};
    use trainer_core::*;

    /// Eight output pins expecting the given sequence of port writes
    fn port_pins(ports: &[u8]) -> [PinMock; 8] {
        core::array::from_fn(|bit| {
            let expectations: Vec<PinTransaction> = ports
                .iter()
                .map(|port| {
                    let level = if port & (1 << bit) != 0 {
                        State::High
                    } else {
                        State::Low
                    };
                    PinTransaction::set(level)
                })
                .collect();
            PinMock::new(&expectations)
        })
    }

    fn finish(display: SegmentDisplay<PinMock>) {
        for mut pin in display.release() {
            pin.done();
        }
    }

    #[test]
    fn test_active_low_switch() {
        let expectations = [
            PinTransaction::get(State::High),
            PinTransaction::get(State::Low),
        ];
        let mut switch = EmbeddedHalSwitch::active_low(PinMock::new(&expectations));

        assert!(!switch.is_asserted().unwrap());
        assert!(switch.is_asserted().unwrap());
        switch.release().done();
    }

    #[test]
    fn test_active_high_switch() {
        let expectations = [
            PinTransaction::get(State::High),
            PinTransaction::get(State::Low),
        ];
        let mut switch = EmbeddedHalSwitch::active_high(PinMock::new(&expectations));

        assert!(switch.is_asserted().unwrap());
        assert!(!switch.is_asserted().unwrap());
        switch.release().done();
    }

    #[test]
    fn test_segment_display_writes_port() {
        let e_ready = DisplayCode::for_char('E').to_port(true);
        let mut display = SegmentDisplay::new(port_pins(&[e_ready, 0x00]));

        display.show(DisplayCode::for_char('E'), true).unwrap();
        assert_eq!(display.port(), Some(0xF9));

        // Unchanged value does not touch the pins
        display.show(DisplayCode::for_char('E'), true).unwrap();

        display.clear().unwrap();
        assert_eq!(display.port(), Some(0x00));
        finish(display);
    }

    #[test]
    fn test_pin_hal_runs_a_tick() {
        let start_pin = PinMock::new(&[PinTransaction::get(State::High)]);
        let key_pin = PinMock::new(&[PinTransaction::get(State::High)]);
        let reset_pin = PinMock::new(&[PinTransaction::get(State::Low)]);
        // Cleared on initialize, then target 'A' with ready
        let display_pins = port_pins(&[0x00, 0xF7]);

        let mut hal = PinTrainerHal::new(
            EmbeddedHalSwitch::active_high(start_pin.clone()),
            EmbeddedHalSwitch::active_low(key_pin.clone()),
            EmbeddedHalSwitch::active_high(reset_pin.clone()),
            SegmentDisplay::new(display_pins.clone()),
        );
        let mut fsm = TrainerFSM::new(TrainerConfig::default());

        hal.initialize().unwrap();
        let out = run_tick(&mut fsm, &mut hal).unwrap();
        assert_eq!(out.state, TrainerState::WaitingInput);
        assert_eq!(out.port_value(), 0xF7);
        assert_eq!(hal.display().port(), Some(0xF7));

        for mut pin in [start_pin, key_pin, reset_pin].into_iter().chain(display_pins) {
            pin.done();
        }
    }
}
