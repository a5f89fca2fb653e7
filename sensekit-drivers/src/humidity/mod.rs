//! Relative humidity sensor drivers

pub mod hts221;

pub use hts221::{Hts221, Hts221Config};
