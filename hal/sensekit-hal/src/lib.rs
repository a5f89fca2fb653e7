//! Sensekit Hardware Abstraction Layer
//!
//! This crate defines the bus primitives that every Sensekit driver is
//! written against, plus adapters that lift `embedded-hal` 1.0 bus handles
//! into them. Drivers never talk to a chip-specific HAL directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sensekit-drivers (LPS25H, HTS221, ...) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sensekit-hal (this crate - BusDevice)  │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  I2cDevice    │       │  SpiDevice    │
//! │ (embedded-hal)│       │ (embedded-hal)│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::BusDevice`] - the four primitives: write byte, write, read byte, read

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod i2c;
pub mod spi;

// Re-export key types at crate root for convenience
pub use bus::BusDevice;
pub use i2c::I2cDevice;
pub use spi::SpiDevice;
