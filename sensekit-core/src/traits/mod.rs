//! Sensor traits
//!
//! These traits define the interface between application code and the
//! device drivers, so a caller can hold "a barometer" without naming the
//! part on the board.

pub mod sensor;

pub use sensor::{HumiditySensor, PressureSensor, TemperatureSensor};
