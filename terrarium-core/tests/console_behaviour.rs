//! End-to-end console behaviour: bytes in, pin writes and serial lines out.

mod common;

use common::{CapturedSerial, CountingDelay, FixedInputs, RecordingOutputs};
use proptest::prelude::*;
use terrarium_core::{
    ActionTable, BoardConfig, Console, Device, Dispatched, Dispatcher, Hardware, Handled,
};
use terrarium_hal::Level;
use terrarium_protocol::ParsedReport;

type TestConsole<'t> = Console<'t, RecordingOutputs, FixedInputs, CountingDelay>;

fn console<'t>(table: &'t ActionTable, config: &BoardConfig) -> TestConsole<'t> {
    let hw = Hardware::new(
        RecordingOutputs::default(),
        FixedInputs {
            base: 400,
            ..Default::default()
        },
        CountingDelay::default(),
    );
    let mut console = Console::new(Dispatcher::new(table, config.settle_delay_ms()), hw);
    console.setup(config).unwrap();
    console
}

fn send(console: &mut TestConsole<'_>, tx: &mut CapturedSerial, input: &[u8]) -> Vec<Handled> {
    input
        .iter()
        .filter_map(|&b| console.feed(b, tx).unwrap())
        .collect()
}

#[test]
fn led_on_then_off() {
    let config = BoardConfig::default();
    let table = ActionTable::build(&config).unwrap();
    let mut console = console(&table, &config);
    let mut tx = CapturedSerial::default();

    send(&mut console, &mut tx, b"4\n");
    assert_eq!(console.hardware().outputs.levels[&2], Level::High);

    send(&mut console, &mut tx, b"40\n");
    assert_eq!(console.hardware().outputs.levels[&2], Level::Low);

    assert_eq!(tx.lines(), vec!["4", "40"]);
}

#[test]
fn general_input_report_format() {
    let config = BoardConfig::default();
    let table = ActionTable::build(&config).unwrap();
    let mut console = console(&table, &config);
    let mut tx = CapturedSerial::default();

    send(&mut console, &mut tx, b"23\n");

    let lines = tx.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "23");
    assert!(lines[1].starts_with("0 "));
    assert!(lines[1].ends_with(" 23"));
    assert_eq!(lines[1], "0 400 23");
    assert_eq!(console.hardware().delay.calls_ms, vec![100]);
}

#[test]
fn every_soil_sensor_reports_its_channel() {
    let config = BoardConfig::default();
    let table = ActionTable::build(&config).unwrap();
    let mut console = console(&table, &config);

    for (code, channel) in (24..=28).zip(1u8..) {
        let mut tx = CapturedSerial::default();
        console.hardware_mut().inputs.overrides.insert(channel, 300 + channel as u16);
        send(&mut console, &mut tx, format!("{}\n", code).as_bytes());

        let lines = tx.lines();
        let report = ParsedReport::parse(lines[1].as_bytes()).unwrap();
        assert_eq!(report.channel, channel);
        assert_eq!(report.reading, 300 + channel as u16);
        assert_eq!(report.request, code);
    }
}

#[test]
fn unknown_and_garbage_lines_only_echo() {
    let config = BoardConfig::default();
    let table = ActionTable::build(&config).unwrap();
    let mut console = console(&table, &config);
    let mut tx = CapturedSerial::default();
    let writes_after_setup = console.hardware().outputs.history.len();

    let handled = send(&mut console, &mut tx, b"999\nabc\n\n");

    let outcomes: Vec<_> = handled.iter().map(|h| h.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            Dispatched::Ignored { code: 999 },
            Dispatched::Ignored { code: 0 },
            Dispatched::Ignored { code: 0 },
        ]
    );
    assert_eq!(tx.lines(), vec!["999", "abc", ""]);
    assert_eq!(console.hardware().outputs.history.len(), writes_after_setup);
    assert!(console.hardware().inputs.reads.is_empty());
}

#[test]
fn pumps_and_rgb_switch_independently() {
    let config = BoardConfig::default();
    let table = ActionTable::build(&config).unwrap();
    let mut console = console(&table, &config);
    let mut tx = CapturedSerial::default();

    send(&mut console, &mut tx, b"18\n15\n17\n170\n");

    let levels = &console.hardware().outputs.levels;
    assert_eq!(levels[&12], Level::High); // pump 1
    assert_eq!(levels[&13], Level::Low); // pump 2
    assert_eq!(levels[&9], Level::High); // rgb blue
    assert_eq!(levels[&11], Level::Low); // rgb red
}

#[test]
fn report_request_text_is_echoed_raw() {
    let config = BoardConfig::default();
    let table = ActionTable::build(&config).unwrap();
    let mut console = console(&table, &config);
    let mut tx = CapturedSerial::default();

    send(&mut console, &mut tx, b"25xyz\n");

    assert_eq!(tx.lines(), vec!["25xyz", "2 402 25xyz"]);
}

#[test]
fn host_decodes_the_code_the_board_dispatched() {
    let config = BoardConfig::default();
    let table = ActionTable::build(&config).unwrap();
    let mut console = console(&table, &config);

    for request in ["25xyz", " 24", "+26", "27 now", "0028"] {
        let mut tx = CapturedSerial::default();
        let handled = send(&mut console, &mut tx, format!("{}\n", request).as_bytes());

        let Dispatched::Reported { code, channel, .. } = handled[0].outcome else {
            panic!("{:?} did not report: {:?}", request, handled[0].outcome);
        };
        let lines = tx.lines();
        let report = ParsedReport::parse(lines[1].as_bytes()).unwrap();
        assert_eq!(report.request, code, "request {:?}", request);
        assert_eq!(report.channel, channel);
    }
}

#[test]
fn device_lookup_matches_dispatch() {
    let config = BoardConfig::default();
    let table = ActionTable::build(&config).unwrap();
    let mut console = console(&table, &config);
    let mut tx = CapturedSerial::default();

    let pump = config.find_device(Device::Pump(2)).unwrap();
    let handled = send(&mut console, &mut tx, b"19\n");

    assert_eq!(
        handled[0].outcome,
        Dispatched::Wrote {
            code: 19,
            device: Device::Pump(2),
            pin: pump.pin,
            level: Level::High
        }
    );
}

fn output_command() -> impl Strategy<Value = (usize, bool)> {
    (0usize..12, any::<bool>())
}

proptest! {
    /// After any sequence of switch commands each output holds the level
    /// of the last command addressed to it.
    #[test]
    fn last_write_wins(commands in proptest::collection::vec(output_command(), 1..40)) {
        let config = BoardConfig::default();
        let table = ActionTable::build(&config).unwrap();
        let mut console = console(&table, &config);
        let mut tx = CapturedSerial::default();

        let mut expected = std::collections::HashMap::new();
        for (index, on) in commands {
            let binding = config.outputs()[index];
            let code = if on { binding.code } else { binding.code * 10 };
            send(&mut console, &mut tx, format!("{}\n", code).as_bytes());
            expected.insert(binding.pin, Level::from(on));
        }

        for (pin, level) in expected {
            prop_assert_eq!(console.hardware().outputs.levels[&pin], level);
        }
    }

    /// Codes with no binding never touch a pin or produce a report.
    #[test]
    fn unbound_codes_are_silent(code in any::<i32>()) {
        let config = BoardConfig::default();
        let table = ActionTable::build(&config).unwrap();
        prop_assume!(table.lookup(code).is_none());

        let mut console = console(&table, &config);
        let mut tx = CapturedSerial::default();
        let before = console.hardware().outputs.history.len();

        send(&mut console, &mut tx, format!("{}\n", code).as_bytes());

        prop_assert_eq!(console.hardware().outputs.history.len(), before);
        prop_assert_eq!(tx.lines(), vec![code.to_string()]);
    }
}
