//! MQ-2 smoke sensor driver.
//!
//! Reads the sensor's analog output through an ESP32-S3 ADC channel and
//! reports it on a 10-bit scale (0–1023), which the control law expects.
//! The S3 converts at 12 bits, so the reading is shifted down by two.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH4 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_SMOKE_ADC: AtomicU16 = AtomicU16::new(0);

/// Set the value the host-side driver reads, already on the 10-bit scale.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_smoke_adc(raw: u16) {
    SIM_SMOKE_ADC.store(raw, Ordering::Relaxed);
}

/// Bits dropped to go from the 12-bit converter to the 10-bit scale.
#[cfg(target_os = "espidf")]
const ADC_SHIFT: u32 = 2;

pub struct SmokeSensor {
    last_raw: u16,
    total_reads: u32,
    _adc_gpio: i32,
}

impl SmokeSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            last_raw: 0,
            total_reads: 0,
            _adc_gpio: adc_gpio,
        }
    }

    /// One reading on the 10-bit scale.  Not range-checked.
    pub fn read_raw(&mut self) -> u16 {
        self.total_reads = self.total_reads.saturating_add(1);
        self.last_raw = self.read_adc();
        self.last_raw
    }

    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_SMOKE) >> ADC_SHIFT
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_SMOKE_ADC.load(Ordering::Relaxed)
    }
}
