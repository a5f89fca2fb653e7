//! Display drivers
//!
//! Segment layouts are bit-flag sets; the controller multiplexes the
//! digits in hardware, so drivers only write display RAM.

pub mod ht16k33;
pub mod segment;

pub use ht16k33::{Blink, Ht16k33, Ht16k33Config};
pub use segment::Segments;
