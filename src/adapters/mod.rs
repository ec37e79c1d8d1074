//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements         | Connects to               |
//! |-------------|--------------------|---------------------------|
//! | `hardware`  | SensorPort         | ESP32 ADC                 |
//! |             | ActuatorPort       | ESP32 LEDC PWM, GPIO      |
//! | `log_sink`  | EventSink          | `log` facade              |
//! | `nvs`       | ConfigStore        | NVS / in-memory store     |
//! | `serial`    | SerialPort         | UART0 / in-memory loopback|

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod serial;
