//! Actuator drivers and hardware initialisation.

pub mod h_bridge;
pub mod heartbeat;
pub mod hw_init;
