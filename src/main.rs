//! Smokefan Firmware — Main Entry Point
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                   │
//! │                                                           │
//! │  HardwareAdapter   UartConsole   NvsAdapter  LogEventSink │
//! │  (Sensor+Actuator) (SerialPort)  (Config)    (EventSink)  │
//! │                                                           │
//! │  ─────────────── Port Trait Boundary ──────────────────   │
//! │                                                           │
//! │  ┌────────────────────────────────────────────────────┐   │
//! │  │            FanController (pure logic)              │   │
//! │  │  LineReceiver · Commands · speed law               │   │
//! │  └────────────────────────────────────────────────────┘   │
//! └───────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use smokefan::adapters::hardware::HardwareAdapter;
use smokefan::adapters::log_sink::LogEventSink;
use smokefan::adapters::nvs::NvsAdapter;
use smokefan::adapters::serial::UartConsole;
use smokefan::app::service::FanController;
use smokefan::config::ControllerConfig;
use smokefan::drivers::h_bridge::HBridge;
use smokefan::drivers::heartbeat::HeartbeatLed;
use smokefan::drivers::hw_init;
use smokefan::error::Error;
use smokefan::pins;
use smokefan::sensors::smoke::SmokeSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Smokefan v{} booting", env!("CARGO_PKG_VERSION"));

    let settings = ControllerConfig::default();

    // ── 2. Peripherals and adapters ───────────────────────────
    hw_init::init_peripherals(settings.serial_baud).map_err(Error::from)?;

    let mut store = NvsAdapter::new(settings.erased_value).map_err(Error::from)?;
    let mut serial = UartConsole::new();
    let mut hw = HardwareAdapter::new(
        SmokeSensor::new(pins::SMOKE_ADC_GPIO),
        HBridge::new(),
        HeartbeatLed::new(),
    );
    let mut sink = LogEventSink::new();
    let mut delay = FreeRtos;

    // ── 3. Controller ─────────────────────────────────────────
    let mut controller = FanController::new(settings);
    controller.start(&mut hw, &mut serial, &store, &mut sink);

    info!(
        "Entering control loop ({} ms cycle)",
        controller.settings().cycle_ms()
    );

    // ── 4. Control loop ───────────────────────────────────────
    loop {
        controller.run_cycle(&mut hw, &mut serial, &mut store, &mut sink, &mut delay);
    }
}
