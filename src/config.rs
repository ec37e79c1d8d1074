//! Controller configuration
//!
//! Two layers:
//! - [`FanConfig`] — the min/max fan speed pair persisted in the
//!   config store and editable from the serial console.
//! - [`ControllerConfig`] — build-time settings for loop timing, the
//!   console and the store's cold-start behaviour.

use serde::{Deserialize, Serialize};

/// Value an unwritten storage cell reads as. Matches an erased EEPROM
/// byte, so a fresh board runs the fan at full speed until configured.
pub const ERASED_CELL_VALUE: u8 = 0xFF;

/// Persisted fan speed limits (0-255 duty scale).
///
/// No ordering is enforced between the two values. When `min_speed`
/// exceeds `max_speed` the control law resolves to `max_speed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanConfig {
    /// Floor applied to the proportional speed
    pub min_speed: u8,
    /// Ceiling applied to the proportional speed; also sets the ratio
    pub max_speed: u8,
}

impl FanConfig {
    /// Config as read from a store that has never been written.
    pub const fn cold_start(erased: u8) -> Self {
        Self {
            min_speed: erased,
            max_speed: erased,
        }
    }
}

impl Default for FanConfig {
    fn default() -> Self {
        Self::cold_start(ERASED_CELL_VALUE)
    }
}

/// How the numeric argument of `i` / `a` console commands is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamParsing {
    /// Fixed byte window `[2, 6)` of the line, the console's wire format.
    /// `i 1234`, `i0100` and `ix100` all work; `i 12345` is cut to 1234.
    Legacy,
    /// Skip the command character and any separator whitespace, then take
    /// the next whitespace-delimited token.  Opt-in.
    Tokenized,
}

/// Build-time controller settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Loop timing ---
    /// Heartbeat LED on-time at the end of each cycle (milliseconds)
    pub heartbeat_on_ms: u32,
    /// Heartbeat LED off-time at the end of each cycle (milliseconds)
    pub heartbeat_off_ms: u32,

    // --- Console ---
    /// UART baud rate
    pub serial_baud: u32,
    /// Parameter extraction for set commands
    pub param_parsing: ParamParsing,
    /// Echo each received line as `console# <line>` before dispatch
    pub echo_commands: bool,

    // --- Storage ---
    /// Value reported for slots that were never written
    pub erased_value: u8,
}

impl ControllerConfig {
    /// Total blocking time of one control cycle.
    pub fn cycle_ms(&self) -> u32 {
        self.heartbeat_on_ms.saturating_add(self.heartbeat_off_ms)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // ~2 s cadence, one blink per cycle
            heartbeat_on_ms: 1000,
            heartbeat_off_ms: 1000,

            serial_baud: 9600,
            param_parsing: ParamParsing::Legacy,
            echo_commands: false,

            erased_value: ERASED_CELL_VALUE,
        }
    }
}
