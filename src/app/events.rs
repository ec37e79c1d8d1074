//! Outbound application events.
//!
//! The [`FanController`](super::service::FanController) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  They are diagnostics for
//! the firmware log and are separate from the console replies the operator
//! sees.

use super::commands::Opcode;
use super::ports::{Slot, StorageError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Controller started with the limits loaded from storage.
    Started { min_speed: u8, max_speed: u8 },

    /// A console command was recognised and executed.
    CommandExecuted(Opcode),

    /// A console line did not start with a known command character.
    /// Carries the first byte, `None` for an empty line.
    CommandIgnored(Option<u8>),

    /// A speed limit was rewritten from the console.
    LimitChanged { slot: Slot, old: u8, new: u8 },

    /// The config store failed; the controller carried on.
    StorageFault { slot: Slot, error: StorageError },

    /// Per-cycle control snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time control snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub cycle: u64,
    /// Raw ADC value (0–1023)
    pub raw_sensor: u16,
    /// Sensor value on the 0–255 scale
    pub sensor: u8,
    pub ratio: f32,
    /// Duty commanded to the fan after clamping
    pub speed: u8,
}
