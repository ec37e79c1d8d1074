//! Heartbeat LED on a single GPIO.
//!
//! On host/test the hw_init helper is a no-op and only the state is kept.

use crate::drivers::hw_init;
use crate::pins;

pub struct HeartbeatLed {
    on: bool,
}

impl HeartbeatLed {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::HEARTBEAT_LED_GPIO, on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Default for HeartbeatLed {
    fn default() -> Self {
        Self::new()
    }
}
