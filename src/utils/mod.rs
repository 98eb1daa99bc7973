//! Shared helpers: lamport conversion, rounding, time and clocks

pub mod currency;
pub mod math;
pub mod time;
