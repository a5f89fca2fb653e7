//! Register-mapped peripheral drivers
//!
//! This crate provides concrete drivers built on the bus primitives in
//! sensekit-hal and the decoding helpers in sensekit-core:
//!
//! - Register access layer shared by every driver
//! - Pressure sensors (LPS25H)
//! - Humidity sensors (HTS221)
//! - Segment displays (HT16K33 backpack)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod display;
pub mod humidity;
pub mod pressure;
pub mod register;

#[cfg(test)]
pub(crate) mod mock;

pub use register::{AddressMode, RegisterAccess};
