//! Press and gap boundary tests

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use trainer_core::test_utils::key_simulator::{nominal_presses, KeyScript};
    use trainer_core::test_utils::output_capture::OutputCapture;
    use trainer_core::*;

    /// Press for `ticks` inside a fresh session and release for one tick
    fn press_once(ticks: u32) -> TrainerFSM {
        let mut fsm = TrainerFSM::new(TrainerConfig::default());
        OutputCapture::run(&mut fsm, &KeyScript::new().start(1).press(ticks).release(1));
        fsm
    }

    #[rstest]
    #[case(1, Some(Symbol::Dot))]
    #[case(20, Some(Symbol::Dot))]
    #[case(25, Some(Symbol::Dot))]
    #[case(59, Some(Symbol::Dot))]
    #[case(60, Some(Symbol::Dash))]
    #[case(65, Some(Symbol::Dash))]
    #[case(67, Some(Symbol::Dash))]
    #[case(68, None)]
    #[case(70, None)]
    fn test_press_classification(#[case] ticks: u32, #[case] expected: Option<Symbol>) {
        let fsm = press_once(ticks);
        assert_eq!(fsm.symbols().first().copied(), expected);
        assert!(fsm.symbols().len() <= 1);
    }

    #[rstest]
    #[case(68)]
    #[case(69)]
    #[case(200)]
    fn test_timeout_boundary(#[case] ticks: u32) {
        let mut fsm = TrainerFSM::new(TrainerConfig::default());
        let capture = OutputCapture::run(&mut fsm, &KeyScript::new().start(1).press(ticks));
        assert_eq!(capture.faults(), vec![TrainerFault::KeyTimeout]);
        // Timeout lands on exactly the 68th held tick
        let timeout_tick = capture
            .outputs()
            .iter()
            .position(|o| o.state == TrainerState::Idle)
            .unwrap();
        assert_eq!(timeout_tick, 68);
    }

    #[rstest]
    #[case(5, "I")]
    #[case(12, "I")]
    #[case(39, "I")]
    #[case(40, "EE")]
    #[case(100, "EE")]
    fn test_character_gap(#[case] gap: u32, #[case] expected: &str) {
        let script = KeyScript::new()
            .start(1)
            .press(25)
            .release(gap)
            .press(25)
            .release(40);
        let mut fsm = TrainerFSM::new(TrainerConfig::default());
        let capture = OutputCapture::run(&mut fsm, &script);
        assert_eq!(capture.decoded_text(), expected);
    }

    #[test]
    fn test_character_completes_on_fortieth_release_tick() {
        let mut fsm = TrainerFSM::new(TrainerConfig::default());
        let capture = OutputCapture::run(&mut fsm, &KeyScript::new().start(1).press(25).release(40));
        // start tick, 25 held ticks, release ticks 1..=40
        assert_eq!(capture.completion_ticks(), vec![1 + 25 + 39]);
    }

    #[rstest]
    #[case(20, 60, 40, 68, 10, true)]
    #[case(2, 6, 4, 7, 100, true)]
    #[case(1, 2, 1, 3, 1, true)]
    #[case(0, 60, 40, 68, 10, false)]
    #[case(60, 60, 40, 68, 10, false)]
    #[case(20, 60, 40, 60, 10, false)]
    #[case(20, 60, 0, 68, 10, false)]
    #[case(20, 60, 40, 68, 0, false)]
    #[case(20, 60, 40, 68, 1001, false)]
    fn test_config_validation(
        #[case] dot: u16,
        #[case] dash: u16,
        #[case] gap: u16,
        #[case] max: u16,
        #[case] period: u32,
        #[case] valid: bool,
    ) {
        assert_eq!(TrainerConfig::new(dot, dash, gap, max, period).is_ok(), valid);
    }

    #[rstest]
    #[case(TrainerConfig::new(2, 6, 4, 7, 100).unwrap())]
    #[case(TrainerConfig::new(4, 12, 8, 16, 50).unwrap())]
    #[case(TrainerConfig::default())]
    fn test_scaled_timing_decodes(#[case] config: TrainerConfig) {
        let mut fsm = TrainerFSM::new(config);
        let script = "PARIS"
            .chars()
            .fold(KeyScript::new().start(1), |s, c| s.character(c, &config));
        let capture = OutputCapture::run(&mut fsm, &script);
        assert_eq!(capture.decoded_text(), "PARIS");

        let (dot, dash) = nominal_presses(&config);
        assert!(dot < config.dash_ticks);
        assert!(dash >= config.dash_ticks && dash < config.max_press_ticks);
    }
}
