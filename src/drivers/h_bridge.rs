//! Exhaust fan motor driver (BTS7960 dual half-bridge).
//!
//! Two enable GPIOs gate the half-bridges; two LEDC PWM channels (8-bit)
//! set the drive strength of each side.  The fan only ever turns one way:
//! forward drive puts the duty on the left PWM and holds the right at 0.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO and LEDC PWM via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Enables low; the motor coasts regardless of PWM.
    Disabled,
    /// Enabled with both PWM channels at 0.
    Stopped,
    Forward { duty: u8 },
}

pub struct HBridge {
    state: BridgeState,
}

impl HBridge {
    pub fn new() -> Self {
        Self {
            state: BridgeState::Disabled,
        }
    }

    /// Raise both half-bridge enables.  PWM stays at 0 until driven.
    pub fn enable(&mut self) {
        self.set_pwm_hw(0, 0);
        hw_init::gpio_write(pins::FAN_L_EN_GPIO, true);
        hw_init::gpio_write(pins::FAN_R_EN_GPIO, true);
        self.state = BridgeState::Stopped;
    }

    pub fn disable(&mut self) {
        self.set_pwm_hw(0, 0);
        hw_init::gpio_write(pins::FAN_L_EN_GPIO, false);
        hw_init::gpio_write(pins::FAN_R_EN_GPIO, false);
        self.state = BridgeState::Disabled;
    }

    /// Drive forward at `duty` (0–255).  Ignored while disabled, since the
    /// enables gate the output anyway.
    pub fn drive_forward(&mut self, duty: u8) {
        if self.state == BridgeState::Disabled {
            return;
        }
        self.set_pwm_hw(duty, 0);
        self.state = if duty == 0 {
            BridgeState::Stopped
        } else {
            BridgeState::Forward { duty }
        };
    }

    pub fn stop(&mut self) {
        self.drive_forward(0);
    }

    fn set_pwm_hw(&self, left: u8, right: u8) {
        // Zero the opposing side first so both never conduct together.
        if left > 0 {
            hw_init::ledc_set(hw_init::LEDC_CH_FAN_R, right);
            hw_init::ledc_set(hw_init::LEDC_CH_FAN_L, left);
        } else {
            hw_init::ledc_set(hw_init::LEDC_CH_FAN_L, left);
            hw_init::ledc_set(hw_init::LEDC_CH_FAN_R, right);
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state != BridgeState::Disabled
    }

    pub fn current_duty(&self) -> u8 {
        match self.state {
            BridgeState::Forward { duty } => duty,
            _ => 0,
        }
    }
}

impl Default for HBridge {
    fn default() -> Self {
        Self::new()
    }
}
