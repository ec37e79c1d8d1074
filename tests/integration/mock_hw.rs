//! Mock adapters for integration tests.
//!
//! Records every actuator call and console line so tests can assert on the
//! full history without touching real GPIO/PWM/UART registers.

use smokefan::app::events::AppEvent;
use smokefan::app::ports::{
    ActuatorPort, ConfigStore, EventSink, SensorPort, SerialPort, Slot, StorageError,
};
use std::collections::VecDeque;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    EnableFan,
    DriveForward(u8),
    Heartbeat(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    /// Raw reading returned by the next sensor reads.
    pub smoke_raw: u16,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            smoke_raw: 0,
        }
    }

    pub fn with_smoke(raw: u16) -> Self {
        Self {
            smoke_raw: raw,
            ..Self::new()
        }
    }

    /// Duty of the most recent forward drive, if any.
    pub fn last_duty(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::DriveForward(duty) => Some(*duty),
            _ => None,
        })
    }

    pub fn fan_enabled(&self) -> bool {
        self.calls.contains(&ActuatorCall::EnableFan)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_smoke_raw(&mut self) -> u16 {
        self.smoke_raw
    }
}

impl ActuatorPort for MockHardware {
    fn enable_fan(&mut self) {
        self.calls.push(ActuatorCall::EnableFan);
    }

    fn drive_forward(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::DriveForward(duty));
    }

    fn set_heartbeat(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Heartbeat(on));
    }
}

// ── MockConsole ───────────────────────────────────────────────

pub struct MockConsole {
    pub input: VecDeque<u8>,
    pub lines: Vec<String>,
}

#[allow(dead_code)]
impl MockConsole {
    pub fn new() -> Self {
        Self {
            input: VecDeque::new(),
            lines: Vec::new(),
        }
    }

    pub fn send(&mut self, text: &str) {
        self.input.extend(text.bytes());
    }

    /// Output lines since the last call.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl Default for MockConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialPort for MockConsole {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

// ── MockStore ─────────────────────────────────────────────────

/// Two-byte store with optional failure injection.
pub struct MockStore {
    pub cells: [u8; 2],
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub writes: usize,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new(min: u8, max: u8) -> Self {
        Self {
            cells: [min, max],
            fail_reads: false,
            fail_writes: false,
            writes: 0,
        }
    }

    pub fn erased() -> Self {
        Self::new(0xFF, 0xFF)
    }
}

impl ConfigStore for MockStore {
    fn read(&self, slot: Slot) -> Result<u8, StorageError> {
        if self.fail_reads {
            return Err(StorageError::IoError);
        }
        Ok(self.cells[slot.address() as usize])
    }

    fn write(&mut self, slot: Slot, value: u8) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Full);
        }
        self.writes += 1;
        self.cells[slot.address() as usize] = value;
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events other than per-cycle telemetry.
    pub fn non_telemetry(&self) -> Vec<&AppEvent> {
        self.events
            .iter()
            .filter(|e| !matches!(e, AppEvent::Telemetry(_)))
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Accumulates requested delay instead of sleeping.
pub struct MockDelay {
    pub total_ns: u64,
}

#[allow(dead_code)]
impl MockDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
