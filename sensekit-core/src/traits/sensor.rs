//! Environmental sensor traits
//!
//! Every method performs a fresh bus transaction. Implementations must not
//! cache readings: two calls may observe two different device states.

use crate::units::{Pressure, RelativeHumidity, Temperature};

/// Trait for sensors reporting air or die temperature
///
/// Takes `&mut self` because each reading is a bus transaction.
pub trait TemperatureSensor {
    /// Error type for a failed reading
    type Error;

    /// Read the current temperature
    fn temperature(&mut self) -> Result<Temperature, Self::Error>;
}

/// Trait for barometric pressure sensors
pub trait PressureSensor {
    /// Error type for a failed reading
    type Error;

    /// Read the current absolute pressure
    fn pressure(&mut self) -> Result<Pressure, Self::Error>;

    /// Altitude above the level where pressure equals `sea_level`, in meters
    fn altitude(&mut self, sea_level: Pressure) -> Result<f32, Self::Error> {
        self.pressure().map(|p| crate::weather::altitude(p, sea_level))
    }
}

/// Trait for relative humidity sensors
pub trait HumiditySensor {
    /// Error type for a failed reading
    type Error;

    /// Read the current relative humidity
    fn humidity(&mut self) -> Result<RelativeHumidity, Self::Error>;
}
