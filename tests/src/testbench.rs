//! Reference keying session used by the scenario runner and the tests

use trainer_core::test_utils::key_simulator::KeyScript;

/// One named stretch of the reference session
pub struct Phase {
    pub name: &'static str,
    pub script: KeyScript,
}

fn phase(name: &'static str, script: KeyScript) -> Phase {
    Phase { name, script }
}

/// Reset, then a dot, a dash and "A" keyed in separate sessions, then a
/// press held past the timeout.
///
/// Start and key are asserted together at the top of the first session.
pub fn reference_session() -> Vec<Phase> {
    let reset = (0..10).fold(KeyScript::new(), |script, _| script.reset());

    vec![
        phase("Reset", reset),
        phase("Idle", KeyScript::new().stop(55)),
        phase("Single dot", KeyScript::new().press(25).release(45)),
        phase(
            "Single dash",
            KeyScript::new().stop(10).start(5).press(65).release(45),
        ),
        phase(
            "Dot then dash",
            KeyScript::new()
                .stop(10)
                .start(5)
                .press(25)
                .release(12)
                .press(65)
                .release(45),
        ),
        phase("Restart", KeyScript::new().stop(20).start(20)),
        phase("Held too long", KeyScript::new().press(70)),
        phase("Stop", KeyScript::new().stop(20)),
    ]
}
