//! Physical quantity types
//!
//! Each quantity stores one canonical unit and converts on access. Values
//! are produced fresh from a bus read every time; nothing here is cached.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Offset between the Celsius and Kelvin scales
const KELVIN_OFFSET: f32 = 273.15;

/// Pascals per inch of mercury at 0°C
const PA_PER_INHG: f32 = 3386.389;

/// A temperature, stored in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Temperature(f32);

impl Temperature {
    /// Create from degrees Celsius
    pub const fn from_celsius(celsius: f32) -> Self {
        Self(celsius)
    }

    /// Create from degrees Fahrenheit
    pub fn from_fahrenheit(fahrenheit: f32) -> Self {
        Self((fahrenheit - 32.0) * 5.0 / 9.0)
    }

    /// Create from kelvins
    pub fn from_kelvin(kelvin: f32) -> Self {
        Self(kelvin - KELVIN_OFFSET)
    }

    /// Degrees Celsius
    pub const fn celsius(self) -> f32 {
        self.0
    }

    /// Degrees Fahrenheit
    pub fn fahrenheit(self) -> f32 {
        self.0 * 9.0 / 5.0 + 32.0
    }

    /// Kelvins
    pub fn kelvin(self) -> f32 {
        self.0 + KELVIN_OFFSET
    }
}

/// A pressure, stored in hectopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pressure(f32);

impl Pressure {
    /// Standard atmosphere at mean sea level
    pub const MEAN_SEA_LEVEL: Self = Self(1013.25);

    /// Create from hectopascals (identical to millibars)
    pub const fn from_hectopascals(hpa: f32) -> Self {
        Self(hpa)
    }

    /// Create from pascals
    pub fn from_pascals(pa: f32) -> Self {
        Self(pa / 100.0)
    }

    /// Create from inches of mercury
    pub fn from_inches_of_mercury(inhg: f32) -> Self {
        Self::from_pascals(inhg * PA_PER_INHG)
    }

    /// Hectopascals
    pub const fn hectopascals(self) -> f32 {
        self.0
    }

    /// Millibars
    pub const fn millibars(self) -> f32 {
        self.0
    }

    /// Pascals
    pub fn pascals(self) -> f32 {
        self.0 * 100.0
    }

    /// Kilopascals
    pub fn kilopascals(self) -> f32 {
        self.0 / 10.0
    }

    /// Inches of mercury
    pub fn inches_of_mercury(self) -> f32 {
        self.pascals() / PA_PER_INHG
    }
}

/// Relative humidity in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelativeHumidity(f32);

impl RelativeHumidity {
    /// Create from a percentage, clamped to 0-100
    pub fn from_percent(percent: f32) -> Self {
        Self(percent.clamp(0.0, 100.0))
    }

    /// Percent relative humidity
    pub const fn percent(self) -> f32 {
        self.0
    }

    /// Fraction in 0.0-1.0
    pub fn fraction(self) -> f32 {
        self.0 / 100.0
    }
}
