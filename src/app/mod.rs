//! Application core — pure domain logic, zero I/O.
//!
//! The console line receiver, the command interpreter and the controller
//! service that ties them to the control law.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod commands;
pub mod console;
pub mod events;
pub mod ports;
pub mod service;
