//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the smoke sensor, the H-bridge and the heartbeat LED, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::h_bridge::HBridge;
use crate::drivers::heartbeat::HeartbeatLed;
use crate::sensors::smoke::SmokeSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    smoke: SmokeSensor,
    fan: HBridge,
    heartbeat: HeartbeatLed,
}

impl HardwareAdapter {
    pub fn new(smoke: SmokeSensor, fan: HBridge, heartbeat: HeartbeatLed) -> Self {
        Self {
            smoke,
            fan,
            heartbeat,
        }
    }

    pub fn fan(&self) -> &HBridge {
        &self.fan
    }

    pub fn heartbeat(&self) -> &HeartbeatLed {
        &self.heartbeat
    }

    /// Stop and disable the fan, LED off.
    pub fn all_off(&mut self) {
        self.fan.disable();
        self.heartbeat.set(false);
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_smoke_raw(&mut self) -> u16 {
        self.smoke.read_raw()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn enable_fan(&mut self) {
        self.fan.enable();
    }

    fn drive_forward(&mut self, duty: u8) {
        self.fan.drive_forward(duty);
    }

    fn set_heartbeat(&mut self, on: bool) {
        self.heartbeat.set(on);
    }
}
