//! One-shot hardware peripheral initialization.
//!
//! Configures the smoke sensor ADC channel, the H-bridge enable and
//! heartbeat GPIOs, the LEDC timer/channels for the fan PWM, and the UART
//! console driver using raw ESP-IDF sys calls.  Called once from `main()`
//! before the control loop starts.  Host builds get no-op stand-ins so
//! the drivers above stay testable.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed,
    UartInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)     => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc)  => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed        => write!(f, "LEDC timer/channel config failed"),
            Self::UartInstallFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

pub const LEDC_CH_FAN_L: u32 = 0;
pub const LEDC_CH_FAN_R: u32 = 1;
pub const ADC1_CH_SMOKE: u32 = 4;

#[cfg(target_os = "espidf")]
pub fn init_peripherals(baud: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_ledc()?;
        init_uart(baud)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped (console {} baud)", baud);
    Ok(())
}

/// Map an ESP-IDF return code onto `err` unless it is `ESP_OK`.
#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t, err: fn(i32) -> HwInitError) -> Result<(), HwInitError> {
    if ret == ESP_OK as esp_err_t { Ok(()) } else { Err(err(ret)) }
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut SMOKE_ADC_UNIT: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: the handle is written once by `init_adc()` before the control
/// loop starts and only read afterwards, all from the main task.
#[cfg(target_os = "espidf")]
unsafe fn smoke_adc_unit() -> adc_oneshot_unit_handle_t {
    unsafe { SMOKE_ADC_UNIT }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let unit_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: SMOKE_ADC_UNIT is written only here, once at boot.
    check(
        unsafe { adc_oneshot_new_unit(&unit_cfg, &raw mut SMOKE_ADC_UNIT) },
        HwInitError::AdcInitFailed,
    )?;

    // Full-scale 12 dB attenuation so the MQ-2 divider output spans the range.
    let smoke_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    check(
        unsafe { adc_oneshot_config_channel(smoke_adc_unit(), ADC1_CH_SMOKE, &smoke_cfg) },
        HwInitError::AdcInitFailed,
    )?;

    info!("hw_init: ADC1 CH{} ready for smoke sensor", ADC1_CH_SMOKE);
    Ok(())
}

/// 12-bit oneshot read.  A failed conversion reads as 0.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: see `smoke_adc_unit`; reads happen on the main task only.
    let ret = unsafe { adc_oneshot_read(smoke_adc_unit(), channel, &mut raw) };
    if ret != ESP_OK as esp_err_t {
        return 0;
    }
    raw.clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const OUTPUT_PINS: [i32; 3] = [
    pins::FAN_L_EN_GPIO,
    pins::FAN_R_EN_GPIO,
    pins::HEARTBEAT_LED_GPIO,
];

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let mask = OUTPUT_PINS.iter().fold(0u64, |acc, &pin| acc | (1u64 << pin));
    let cfg = gpio_config_t {
        pin_bit_mask: mask,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    check(unsafe { gpio_config(&cfg) }, HwInitError::GpioConfigFailed)?;

    // Bridge disabled and LED dark until the controller starts.
    for pin in OUTPUT_PINS {
        check(unsafe { gpio_set_level(pin, 0) }, HwInitError::GpioConfigFailed)?;
    }

    info!("hw_init: GPIO outputs low (fan enables, heartbeat)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: `pin` is one of OUTPUT_PINS, configured during init.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── LEDC PWM (fan) ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    let fan_timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: pins::PWM_RESOLUTION_BITS,
        freq_hz: pins::FAN_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    check(unsafe { ledc_timer_config(&fan_timer) }, |_| HwInitError::LedcInitFailed)?;

    for (channel, gpio_num) in [
        (LEDC_CH_FAN_L, pins::FAN_L_PWM_GPIO),
        (LEDC_CH_FAN_R, pins::FAN_R_PWM_GPIO),
    ] {
        let cfg = ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        check(unsafe { ledc_channel_config(&cfg) }, |_| HwInitError::LedcInitFailed)?;
    }

    info!(
        "hw_init: fan PWM at {} Hz on CH{}/CH{}",
        pins::FAN_PWM_FREQ_HZ,
        LEDC_CH_FAN_L,
        LEDC_CH_FAN_R
    );
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: channel was configured in init_ledc(); only the main task
    // writes duty registers.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) {}

// ── UART console ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud: u32) -> Result<(), HwInitError> {
    let port = pins::UART_PORT;
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    check(unsafe { uart_param_config(port, &cfg) }, HwInitError::UartInstallFailed)?;
    check(
        unsafe { uart_set_pin(port, pins::UART_TX_GPIO, pins::UART_RX_GPIO, -1, -1) },
        HwInitError::UartInstallFailed,
    )?;
    // RX ring only; writes block until queued in the hardware FIFO.
    check(
        unsafe {
            uart_driver_install(port, pins::UART_RX_BUF_BYTES, 0, 0, core::ptr::null_mut(), 0)
        },
        HwInitError::UartInstallFailed,
    )?;

    info!("hw_init: UART{} console at {} baud, 8N1", port, baud);
    Ok(())
}
