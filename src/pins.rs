//! GPIO / peripheral pin assignments for the exhaust fan controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Fan motor driver (BTS7960 dual half-bridge)
// ---------------------------------------------------------------------------

/// Digital output: left half-bridge enable (active HIGH).
pub const FAN_L_EN_GPIO: i32 = 7;
/// Digital output: right half-bridge enable (active HIGH).
pub const FAN_R_EN_GPIO: i32 = 8;
/// LEDC PWM output driving the left half-bridge (forward rotation).
pub const FAN_L_PWM_GPIO: i32 = 9;
/// LEDC PWM output driving the right half-bridge (reverse rotation).
pub const FAN_R_PWM_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// MQ-2 smoke sensor — analog output via resistive divider.
/// ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const SMOKE_ADC_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Heartbeat LED
// ---------------------------------------------------------------------------

pub const HEARTBEAT_LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// UART console (UART0, routed to the USB-serial bridge)
// ---------------------------------------------------------------------------

pub const UART_PORT: i32 = 0;
pub const UART_TX_GPIO: i32 = 43;
pub const UART_RX_GPIO: i32 = 44;
/// Driver RX ring buffer. Must exceed one console line with headroom
/// for input that arrives during the loop's blocking delays.
pub const UART_RX_BUF_BYTES: i32 = 256;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the fan motor (20 kHz — inaudible).
pub const FAN_PWM_FREQ_HZ: u32 = 20_000;
