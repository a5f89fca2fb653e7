//! Board-agnostic core for Sensekit drivers
//!
//! This crate contains everything a register-mapped driver needs that does
//! not depend on a particular device:
//!
//! - Decoding of little-endian, two's-complement register payloads
//! - Physical quantity types (temperature, pressure, humidity)
//! - Sensor traits implemented by the drivers
//! - Error taxonomy and the bus lifecycle guard
//! - Weather helpers derived from readings (altitude, dew point)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod decode;
pub mod error;
pub mod guard;
pub mod traits;
pub mod units;
pub mod weather;

pub use error::Error;
pub use guard::BusGuard;
pub use units::{Pressure, RelativeHumidity, Temperature};
