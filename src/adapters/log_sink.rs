//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (ESP-IDF logger on target).  Per-cycle telemetry goes
//! out at debug level so the console stays readable at the default filter.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                min_speed,
                max_speed,
            } => {
                info!("START | min={} max={}", min_speed, max_speed);
            }
            AppEvent::CommandExecuted(opcode) => {
                info!("CMD   | {:?}", opcode);
            }
            AppEvent::CommandIgnored(first) => match first {
                Some(byte) => debug!("CMD   | ignored 0x{:02x}", byte),
                None => debug!("CMD   | ignored empty line"),
            },
            AppEvent::LimitChanged { slot, old, new } => {
                info!("LIMIT | {:?} {} -> {}", slot, old, new);
            }
            AppEvent::StorageFault { slot, error } => {
                warn!("STORE | {:?}: {}", slot, error);
            }
            AppEvent::Telemetry(t) => {
                debug!(
                    "TELEM | #{} | raw={} smoke={} | ratio={:.3} | speed={}",
                    t.cycle, t.raw_sensor, t.sensor, t.ratio, t.speed,
                );
            }
        }
    }
}
