//! Weather calculations derived from sensor readings
//!
//! Altitude uses the international barometric formula for the troposphere;
//! dew point uses the Magnus approximation (valid from -45°C to 60°C).

// Host test builds link std, whose inherent float methods take precedence.
#[cfg(not(test))]
use micromath::F32Ext;

use crate::units::{Pressure, RelativeHumidity, Temperature};

/// Barometric exponent `R * L / (g * M)` inverted
const BAROMETRIC_EXPONENT: f32 = 1.0 / 5.255;

/// Height scale of the standard atmosphere in meters (`T0 / L`)
const HEIGHT_SCALE_M: f32 = 44_330.0;

/// Magnus coefficients over water
const MAGNUS_B: f32 = 17.62;
const MAGNUS_C: f32 = 243.12;

/// Altitude above the reference level, in meters
///
/// `sea_level` is the current pressure at mean sea level for the location;
/// use [`Pressure::MEAN_SEA_LEVEL`] when it is unknown.
pub fn altitude(pressure: Pressure, sea_level: Pressure) -> f32 {
    let ratio = pressure.hectopascals() / sea_level.hectopascals();
    HEIGHT_SCALE_M * (1.0 - ratio.powf(BAROMETRIC_EXPONENT))
}

/// Pressure reduced to sea level from a reading taken at `altitude_m`
pub fn sea_level_pressure(pressure: Pressure, altitude_m: f32) -> Pressure {
    let factor = (1.0 - altitude_m / HEIGHT_SCALE_M).powf(5.255);
    Pressure::from_hectopascals(pressure.hectopascals() / factor)
}

/// Dew point for the given air temperature and relative humidity
pub fn dew_point(temperature: Temperature, humidity: RelativeHumidity) -> Temperature {
    let t = temperature.celsius();
    // ln(0) is undefined; 0% RH has no dew point, clamp to the driest reading.
    let rh = humidity.fraction().max(1e-4);
    let gamma = rh.ln() + MAGNUS_B * t / (MAGNUS_C + t);
    Temperature::from_celsius(MAGNUS_C * gamma / (MAGNUS_B - gamma))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_at_reference_is_zero() {
        let alt = altitude(Pressure::MEAN_SEA_LEVEL, Pressure::MEAN_SEA_LEVEL);
        assert!(alt.abs() < 0.5);
    }

    #[test]
    fn test_altitude_standard_atmosphere() {
        // ISA: ~898.7 hPa at 1000 m
        let alt = altitude(Pressure::from_hectopascals(898.75), Pressure::MEAN_SEA_LEVEL);
        assert!((alt - 1000.0).abs() < 10.0, "altitude was {}", alt);
    }

    #[test]
    fn test_sea_level_inverts_altitude() {
        let reduced = sea_level_pressure(Pressure::from_hectopascals(898.75), 1000.0);
        assert!((reduced.hectopascals() - 1013.25).abs() < 2.0);
    }

    #[test]
    fn test_dew_point_saturated_air() {
        let dp = dew_point(
            Temperature::from_celsius(20.0),
            RelativeHumidity::from_percent(100.0),
        );
        assert!((dp.celsius() - 20.0).abs() < 0.2);
    }

    #[test]
    fn test_dew_point_half_humidity() {
        // 20°C at 50% RH has a dew point of about 9.3°C
        let dp = dew_point(
            Temperature::from_celsius(20.0),
            RelativeHumidity::from_percent(50.0),
        );
        assert!((dp.celsius() - 9.3).abs() < 0.5, "dew point was {}", dp.celsius());
    }
}
