//! Integration tests for the operator console.
//!
//! Bytes go in through the serial port, whole cycles run, and the exact
//! reply lines are checked.  Commands are only serviced at the top of a
//! cycle, so every scenario advances the controller with `tick`.

use super::mock_hw::{MockConsole, MockHardware, MockStore, RecordingSink};

use smokefan::app::events::AppEvent;
use smokefan::app::service::{BANNER_RULE, FanController, HELP_TEXT};
use smokefan::config::{ControllerConfig, ParamParsing};

struct Rig {
    ctl: FanController,
    hw: MockHardware,
    console: MockConsole,
    store: MockStore,
    sink: RecordingSink,
}

impl Rig {
    fn new(settings: ControllerConfig, store: MockStore, raw: u16) -> Self {
        let mut rig = Self {
            ctl: FanController::new(settings),
            hw: MockHardware::with_smoke(raw),
            console: MockConsole::new(),
            store,
            sink: RecordingSink::new(),
        };
        rig.ctl
            .start(&mut rig.hw, &mut rig.console, &rig.store, &mut rig.sink);
        rig
    }

    fn with_store(store: MockStore) -> Self {
        Self::new(ControllerConfig::default(), store, 0)
    }

    fn tick(&mut self) -> u8 {
        self.ctl.tick(
            &mut self.hw,
            &mut self.console,
            &mut self.store,
            &mut self.sink,
        )
    }

    /// Send `text`, run one cycle and return the replies.
    fn command(&mut self, text: &str) -> Vec<String> {
        self.console.drain();
        self.console.send(text);
        self.tick();
        self.console.drain()
    }
}

// ── Banner ────────────────────────────────────────────────────

#[test]
fn startup_prints_banner() {
    let mut rig = Rig::with_store(MockStore::erased());
    let banner = rig.console.drain();

    assert_eq!(
        banner,
        [
            format!("Exhaust Fan Controller v{}", env!("CARGO_PKG_VERSION")),
            BANNER_RULE.to_string(),
            "Type <h> for help...".to_string(),
        ]
    );
}

// ── Query commands ────────────────────────────────────────────

#[test]
fn help_prints_command_list() {
    let mut rig = Rig::with_store(MockStore::erased());
    assert_eq!(rig.command("h\n"), HELP_TEXT);
}

#[test]
fn show_memory_reads_both_slots() {
    let mut rig = Rig::with_store(MockStore::new(50, 200));
    assert_eq!(
        rig.command("n\n"),
        [
            "Minimal Exhaust Fan Speed Value: 50",
            "Maximum Exhaust Fan Speed Value: 200",
        ]
    );
}

#[test]
fn show_sensors_before_first_cycle_reports_startup_values() {
    let mut rig = Rig::new(ControllerConfig::default(), MockStore::new(50, 200), 800);

    // The command runs before this cycle's sensor read.
    assert_eq!(
        rig.command("s\n"),
        [
            "Smoke sensor: 0",
            "Exhaust Fan Ratio: 1.00",
            "Exhaust Fan Speed: 50",
        ]
    );
}

#[test]
fn show_sensors_reports_previous_cycle() {
    let mut rig = Rig::new(ControllerConfig::default(), MockStore::new(50, 200), 800);
    rig.tick();

    assert_eq!(
        rig.command("s\n"),
        [
            "Smoke sensor: 200",
            "Exhaust Fan Ratio: 0.78",
            "Exhaust Fan Speed: 156",
        ]
    );
}

// ── Set commands ──────────────────────────────────────────────

#[test]
fn set_min_then_show_memory() {
    let mut rig = Rig::with_store(MockStore::erased());

    assert_eq!(
        rig.command("i0100\n"),
        ["Old Minimal Speed Value: 255", "New Minimal Speed Value: 100"]
    );
    assert_eq!(
        rig.command("n\n"),
        [
            "Minimal Exhaust Fan Speed Value: 100",
            "Maximum Exhaust Fan Speed Value: 255",
        ]
    );
}

#[test]
fn set_max_with_space_separated_argument() {
    let mut rig = Rig::with_store(MockStore::new(0, 255));
    assert_eq!(
        rig.command("a 180\n"),
        ["Old Maximum Speed Value: 255", "New Maximum Speed Value: 180"]
    );
    assert_eq!(rig.store.cells, [0, 180]);
}

#[test]
fn out_of_range_values_keep_low_byte() {
    let mut rig = Rig::with_store(MockStore::new(0, 0));

    rig.command("a 300\n");
    assert_eq!(rig.store.cells[1], 44);

    rig.command("a -1\n");
    assert_eq!(rig.store.cells[1], 255);

    rig.command("i 256\n");
    assert_eq!(rig.store.cells[0], 0);
}

#[test]
fn set_without_argument_stores_zero() {
    let mut rig = Rig::with_store(MockStore::new(77, 255));
    assert_eq!(
        rig.command("i\n"),
        ["Old Minimal Speed Value: 77", "New Minimal Speed Value: 0"]
    );
}

#[test]
fn default_parsing_reads_fixed_window() {
    let mut rig = Rig::with_store(MockStore::new(0, 0));

    // Only bytes 2..6 ("1234") are parsed: 1234 keeps low byte 210.
    assert_eq!(
        rig.command("a 12345\n"),
        ["Old Maximum Speed Value: 0", "New Maximum Speed Value: 210"]
    );
    assert_eq!(rig.store.cells[1], 210);

    rig.command("a 1234567\n");
    assert_eq!(rig.store.cells[1], 210);
}

#[test]
fn default_parsing_ignores_separator_character() {
    let mut rig = Rig::with_store(MockStore::new(0, 0));

    // Byte 1 is never looked at, whatever it holds.
    rig.command("ix100\n");
    assert_eq!(rig.store.cells[0], 100);
}

#[test]
fn tokenized_parsing_reads_whole_number() {
    let settings = ControllerConfig {
        param_parsing: ParamParsing::Tokenized,
        ..Default::default()
    };
    let mut rig = Rig::new(settings, MockStore::new(0, 0), 0);

    // 1234567 = 0x12D687
    rig.command("a 1234567\n");
    assert_eq!(rig.store.cells[1], 0x87);

    // No separator: the token starts right after the command letter.
    rig.command("ix100\n");
    assert_eq!(rig.store.cells[0], 0);
}

// ── Unknown and malformed input ───────────────────────────────

#[test]
fn unknown_command_is_silent() {
    let mut rig = Rig::with_store(MockStore::new(1, 2));
    rig.sink.events.clear();

    assert!(rig.command("z\n").is_empty());
    assert!(
        rig.sink
            .non_telemetry()
            .iter()
            .any(|e| matches!(e, AppEvent::CommandIgnored(Some(b'z'))))
    );
    assert_eq!(rig.store.writes, 0);
}

#[test]
fn empty_line_is_silent() {
    let mut rig = Rig::with_store(MockStore::new(1, 2));
    rig.sink.events.clear();

    assert!(rig.command("\n").is_empty());
    assert!(
        rig.sink
            .non_telemetry()
            .iter()
            .any(|e| matches!(e, AppEvent::CommandIgnored(None)))
    );
}

#[test]
fn echo_mode_prefixes_every_line() {
    let settings = ControllerConfig {
        echo_commands: true,
        ..Default::default()
    };
    let mut rig = Rig::new(settings, MockStore::new(1, 2), 0);

    assert_eq!(rig.command("z\n"), ["console# z"]);
}

#[test]
fn overlong_line_is_truncated_not_rejected() {
    let mut rig = Rig::with_store(MockStore::new(5, 6));
    let line = format!("n{}\n", "x".repeat(60));

    assert_eq!(
        rig.command(&line),
        [
            "Minimal Exhaust Fan Speed Value: 5",
            "Maximum Exhaust Fan Speed Value: 6",
        ]
    );
}

// ── Pacing ────────────────────────────────────────────────────

#[test]
fn one_command_per_cycle() {
    let mut rig = Rig::with_store(MockStore::new(5, 6));
    rig.console.drain();

    rig.console.send("h\nn\n");
    rig.tick();
    assert_eq!(rig.console.drain(), HELP_TEXT, "first cycle runs only <h>");
    assert_eq!(rig.console.input.len(), 2, "second line still queued");

    rig.tick();
    assert_eq!(rig.console.drain().len(), 2, "second cycle runs <n>");
}

#[test]
fn partial_line_waits_for_newline() {
    let mut rig = Rig::with_store(MockStore::new(5, 6));
    rig.console.drain();

    rig.console.send("n");
    rig.tick();
    assert!(rig.console.drain().is_empty());
    assert!(!rig.ctl.line_pending());

    rig.console.send("\n");
    rig.tick();
    assert_eq!(rig.console.drain().len(), 2);
}
