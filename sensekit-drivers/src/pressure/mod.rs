//! Barometric pressure sensor drivers

pub mod lps25h;

pub use lps25h::{Lps25h, Lps25hConfig};
