// Replays the reference keying session and prints what the trainer shows

use trainer_core::test_utils::output_capture::OutputCapture;
use trainer_core::{TrainerConfig, TrainerFSM, TrainerOutput, VERSION};
use trainer_tests::testbench::reference_session;

fn main() {
    println!("📡 Morse Trainer Scenario Runner (trainer-core {})", VERSION);

    let config = TrainerConfig::default();
    println!(
        "⚙️ Dot {} ticks, dash from {} ticks, gap {} ticks, timeout {} ticks ({} ms/tick, ~{} WPM)",
        config.dot_ticks,
        config.dash_ticks,
        config.char_ticks,
        config.max_press_ticks,
        config.tick_period_ms,
        config.wpm()
    );
    println!();

    let mut fsm = TrainerFSM::new(config);
    let mut text = String::new();
    let mut tick = 0usize;

    for phase in reference_session() {
        let capture = OutputCapture::run(&mut fsm, &phase.script);
        println!("▶ {} ({} ticks from tick {})", phase.name, phase.script.len_ticks(), tick);

        for (offset, out) in capture.outputs().iter().enumerate() {
            if out.char_complete {
                report_character(tick + offset, out);
            }
        }
        if let Some(last) = capture.last() {
            report_state(last);
        }

        text.push_str(&capture.decoded_text());
        tick += capture.outputs().len();
    }

    println!();
    println!("✅ Decoded text: {:?}", text);
}

fn report_character(tick: usize, out: &TrainerOutput) {
    match out.decoded.and_then(|d| d.character) {
        Some(c) => println!(
            "  🔤 tick {}: decoded '{}'{}",
            tick,
            c,
            if out.target_matched { " (target matched)" } else { "" }
        ),
        None => println!("  ❌ tick {}: unrecognized sequence", tick),
    }
}

fn report_state(out: &TrainerOutput) {
    let fault = match out.fault {
        Some(fault) => format!(", fault: {}", fault),
        None => String::new(),
    };
    println!(
        "  {} {:?}, port 0x{:02X}, next target '{}'{}",
        if out.ready { "🟢" } else { "⚪" },
        out.state,
        out.port_value(),
        out.target,
        fault
    );
}
