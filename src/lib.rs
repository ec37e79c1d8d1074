//! Smoke-driven exhaust fan controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

// The ESP-IDF code paths below are selected by target_os but link against
// the platform crates, which only the `espidf` feature pulls in.
#[cfg(all(target_os = "espidf", not(feature = "espidf")))]
compile_error!("building for target_os = \"espidf\" requires `--features espidf`");

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;

// Hardware-facing modules. On host targets these compile against
// in-memory simulation backends.
pub mod adapters;
pub mod drivers;
pub mod sensors;
