//! Sensor drivers.

pub mod smoke;
