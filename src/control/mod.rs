//! Control law mapping smoke readings to fan duty.

pub mod speed;
