//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FanController (domain)
//! ```
//!
//! Driven adapters (smoke sensor, H-bridge, UART console, NVS store, event
//! sinks) implement these traits.  The
//! [`FanController`](super::service::FanController) consumes them via
//! generics, so the domain core never touches hardware directly.

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per control cycle.
pub trait SensorPort {
    /// Raw smoke sensor reading on the 10-bit scale (0–1023).
    ///
    /// Values above 1023 are not expected; the control law saturates
    /// them rather than checking.
    fn read_smoke_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the fan and LED.
pub trait ActuatorPort {
    /// Energise the H-bridge enables.  Called once at startup.
    fn enable_fan(&mut self);

    /// Drive the fan forward at `duty` (0–255).
    fn drive_forward(&mut self, duty: u8);

    /// Switch the heartbeat LED.
    fn set_heartbeat(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Serial console port (driven adapter: domain ↔ UART)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented console transport.
pub trait SerialPort {
    /// Next pending input byte, or `None` when the receive buffer is empty.
    /// Never blocks.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write one line of output.  The adapter appends the line terminator.
    fn write_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Config store port (driven adapter: domain ↔ non-volatile memory)
// ───────────────────────────────────────────────────────────────

/// Byte cell in the persistent config store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Minimum fan speed, address 0.
    MinSpeed,
    /// Maximum fan speed, address 1.
    MaxSpeed,
}

impl Slot {
    /// Every slot, in address order.
    pub const ALL: [Slot; 2] = [Slot::MinSpeed, Slot::MaxSpeed];

    /// Fixed byte address of the slot in the storage layout.
    pub const fn address(self) -> u8 {
        match self {
            Self::MinSpeed => 0,
            Self::MaxSpeed => 1,
        }
    }
}

/// Byte-addressable persistent storage.
///
/// Writes are durable once `write` returns.  Only single-byte atomicity
/// is assumed.  A slot that was never written reads back as the store's
/// erased value, not as an error.
pub trait ConfigStore {
    /// Read the byte stored at `slot`.
    fn read(&self, slot: Slot) -> Result<u8, StorageError>;

    /// Persist `value` at `slot`.
    fn write(&mut self, slot: Slot, value: u8) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The storage partition could not be initialised.
    InitFailed,
    /// Storage partition is full.
    Full,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InitFailed => write!(f, "storage init failed"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for StorageError {}
