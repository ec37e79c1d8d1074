//! Fan controller service — the hexagonal core.
//!
//! [`FanController`] owns every piece of mutable state in the firmware:
//! the cached speed limits, the console line buffer and the last control
//! snapshot.  The main loop drives it one cycle at a time and lends it the
//! adapters for the duration of each call.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  SerialPort ◀─▶ │      FanController        │
//! ActuatorPort ◀──│ LineReceiver · speed law  │ ◀─▶ ConfigStore
//!                 └──────────────────────────┘
//! ```
//!
//! One cycle is: service the console, read the sensor, compute and clamp
//! the speed, drive the fan, blink the heartbeat.  Console input is only
//! drained at the top of the cycle, so a command waits up to one full
//! cycle (about two seconds) before it runs.

use core::fmt::{self, Write as _};

use embedded_hal::delay::DelayNs;
use heapless::String;
use log::{debug, info, warn};

use crate::config::{ControllerConfig, FanConfig};
use crate::control::speed;

use super::commands::{Opcode, ParsedCommand, parse_command, truncate_to_byte};
use super::console::{CommandLine, LineReceiver};
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, ConfigStore, EventSink, SensorPort, SerialPort, Slot};

/// Longest console reply.  Fits the longest fixed prompt plus a number, and
/// an echoed 31-byte line with its prefix.
const REPLY_CAPACITY: usize = 64;

pub const BANNER_RULE: &str = "=====================================";

pub const HELP_TEXT: [&str; 5] = [
    "<s> show smoke sensor (0-1023) and fan (0-255)",
    "<n> show memory values",
    "<i speed> set minimal exhaust fan speed (0-255)",
    "<a speed> set maximum exhaust fan speed (0-255)",
    "<h> for available commands",
];

// ───────────────────────────────────────────────────────────────
// FanController
// ───────────────────────────────────────────────────────────────

pub struct FanController {
    settings: ControllerConfig,
    /// Limits in force, refreshed from the store after every set command.
    config: FanConfig,
    receiver: LineReceiver,
    raw_sensor: u16,
    sensor: u8,
    ratio: f32,
    speed: u8,
    cycle_count: u64,
}

impl FanController {
    /// Construct the controller.  Limits read as the erased value until
    /// [`start`](Self::start) loads them from the store.
    pub fn new(settings: ControllerConfig) -> Self {
        let config = FanConfig::cold_start(settings.erased_value);
        Self {
            settings,
            config,
            receiver: LineReceiver::new(),
            raw_sensor: 0,
            sensor: 0,
            ratio: 1.0,
            speed: config.min_speed,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Print the banner, enable the H-bridge and load the speed limits.
    pub fn start(
        &mut self,
        hw: &mut impl ActuatorPort,
        serial: &mut impl SerialPort,
        store: &impl ConfigStore,
        sink: &mut impl EventSink,
    ) {
        reply(
            serial,
            format_args!("Exhaust Fan Controller v{}", env!("CARGO_PKG_VERSION")),
        );
        serial.write_line(BANNER_RULE);
        serial.write_line("Type <h> for help...");

        hw.enable_fan();

        self.config = FanConfig {
            min_speed: self.load_slot(store, Slot::MinSpeed, sink),
            max_speed: self.load_slot(store, Slot::MaxSpeed, sink),
        };
        self.speed = self.config.min_speed;

        sink.emit(&AppEvent::Started {
            min_speed: self.config.min_speed,
            max_speed: self.config.max_speed,
        });
        info!(
            "FanController started (min={}, max={})",
            self.config.min_speed, self.config.max_speed
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one control cycle without the heartbeat delays.
    ///
    /// Returns the duty commanded to the fan.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        serial: &mut impl SerialPort,
        store: &mut impl ConfigStore,
        sink: &mut impl EventSink,
    ) -> u8 {
        self.cycle_count += 1;

        // 1. Console: at most one line per cycle
        self.receiver.poll(serial);
        if let Some(line) = self.receiver.consume() {
            self.handle_line(&line, serial, store, sink);
        }

        // 2–5. Control law on the limits currently in force
        let raw = hw.read_smoke_raw();
        let cmd = speed::compute(raw, &self.config);
        self.raw_sensor = raw;
        self.sensor = cmd.sensor;
        self.ratio = cmd.ratio;
        self.speed = cmd.speed;

        // 6. Actuate
        hw.drive_forward(cmd.speed);

        sink.emit(&AppEvent::Telemetry(self.telemetry()));
        cmd.speed
    }

    /// Blink the heartbeat LED, blocking for the configured on/off times.
    pub fn heartbeat(&self, hw: &mut impl ActuatorPort, delay: &mut impl DelayNs) {
        hw.set_heartbeat(true);
        delay.delay_ms(self.settings.heartbeat_on_ms);
        hw.set_heartbeat(false);
        delay.delay_ms(self.settings.heartbeat_off_ms);
    }

    /// One full loop iteration: [`tick`](Self::tick) then
    /// [`heartbeat`](Self::heartbeat).
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        serial: &mut impl SerialPort,
        store: &mut impl ConfigStore,
        sink: &mut impl EventSink,
        delay: &mut impl DelayNs,
    ) {
        self.tick(hw, serial, store, sink);
        self.heartbeat(hw, delay);
    }

    // ── Command handling ──────────────────────────────────────

    /// Interpret one console line.  Unknown commands produce no reply.
    pub fn handle_line(
        &mut self,
        line: &CommandLine,
        serial: &mut impl SerialPort,
        store: &mut impl ConfigStore,
        sink: &mut impl EventSink,
    ) {
        if self.settings.echo_commands {
            reply(serial, format_args!("console# {}", line.text()));
        }

        match parse_command(line, self.settings.param_parsing) {
            Some(cmd) => {
                self.execute(cmd, serial, store, sink);
                sink.emit(&AppEvent::CommandExecuted(cmd.opcode));
            }
            None => sink.emit(&AppEvent::CommandIgnored(line.first_byte())),
        }
    }

    fn execute(
        &mut self,
        cmd: ParsedCommand,
        serial: &mut impl SerialPort,
        store: &mut impl ConfigStore,
        sink: &mut impl EventSink,
    ) {
        match cmd.opcode {
            Opcode::Help => {
                for line in HELP_TEXT {
                    serial.write_line(line);
                }
            }
            Opcode::ShowSensors => {
                reply(serial, format_args!("Smoke sensor: {}", self.sensor));
                reply(serial, format_args!("Exhaust Fan Ratio: {:.2}", self.ratio));
                reply(serial, format_args!("Exhaust Fan Speed: {}", self.speed));
            }
            Opcode::ShowMemory => {
                let min = self.load_slot(store, Slot::MinSpeed, sink);
                let max = self.load_slot(store, Slot::MaxSpeed, sink);
                reply(serial, format_args!("Minimal Exhaust Fan Speed Value: {}", min));
                reply(serial, format_args!("Maximum Exhaust Fan Speed Value: {}", max));
            }
            Opcode::SetMin => self.set_limit(Slot::MinSpeed, cmd.value(), serial, store, sink),
            Opcode::SetMax => self.set_limit(Slot::MaxSpeed, cmd.value(), serial, store, sink),
        }
    }

    /// Replace one stored limit and report old/new as read from the store.
    fn set_limit(
        &mut self,
        slot: Slot,
        value: i32,
        serial: &mut impl SerialPort,
        store: &mut impl ConfigStore,
        sink: &mut impl EventSink,
    ) {
        let label = match slot {
            Slot::MinSpeed => "Minimal",
            Slot::MaxSpeed => "Maximum",
        };

        let old = self.load_slot(store, slot, sink);
        reply(serial, format_args!("Old {} Speed Value: {}", label, old));

        if let Err(error) = store.write(slot, truncate_to_byte(value)) {
            warn!("Config store write failed for {:?}: {}", slot, error);
            sink.emit(&AppEvent::StorageFault { slot, error });
        }

        let new = self.load_slot(store, slot, sink);
        reply(serial, format_args!("New {} Speed Value: {}", label, new));

        match slot {
            Slot::MinSpeed => self.config.min_speed = new,
            Slot::MaxSpeed => self.config.max_speed = new,
        }
        sink.emit(&AppEvent::LimitChanged { slot, old, new });
    }

    /// Read a slot, substituting the erased value if the store fails.
    fn load_slot(&self, store: &impl ConfigStore, slot: Slot, sink: &mut impl EventSink) -> u8 {
        match store.read(slot) {
            Ok(value) => value,
            Err(error) => {
                warn!("Config store read failed for {:?}: {}", slot, error);
                sink.emit(&AppEvent::StorageFault { slot, error });
                self.settings.erased_value
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the most recent control cycle.
    pub fn telemetry(&self) -> TelemetryData {
        TelemetryData {
            cycle: self.cycle_count,
            raw_sensor: self.raw_sensor,
            sensor: self.sensor,
            ratio: self.ratio,
            speed: self.speed,
        }
    }

    /// Speed limits currently in force.
    pub fn config(&self) -> FanConfig {
        self.config
    }

    pub fn settings(&self) -> &ControllerConfig {
        &self.settings
    }

    /// Last scaled sensor value (0–255).
    pub fn sensor(&self) -> u8 {
        self.sensor
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Last commanded duty (0–255).
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Whether a complete console line is waiting for the next cycle.
    pub fn line_pending(&self) -> bool {
        self.receiver.is_ready()
    }
}

/// Format one reply line into a fixed buffer and send it.
fn reply(serial: &mut impl SerialPort, args: fmt::Arguments<'_>) {
    let mut line: String<REPLY_CAPACITY> = String::new();
    if line.write_fmt(args).is_err() {
        debug!("console reply truncated to {} bytes", line.len());
    }
    serial.write_line(&line);
}
