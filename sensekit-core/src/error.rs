//! Driver error taxonomy

use core::fmt;

/// Errors returned by every Sensekit driver
///
/// `E` is the bus error type. Transport failures are passed through
/// untouched; drivers never retry and never substitute a default reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error<E> {
    /// No bus handle was supplied at construction
    MissingBus,
    /// The bus transaction failed
    Transport(E),
    /// The driver was used after its bus handle was released
    Disposed,
    /// A caller-supplied value is outside the device's range
    InvalidArgument,
    /// Factory calibration read from the device cannot be used
    InvalidCalibration,
}

impl<E> Error<E> {
    /// The transport error, if this is one
    pub fn transport(&self) -> Option<&E> {
        match self {
            Error::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingBus => f.write_str("no bus handle supplied"),
            Error::Transport(e) => write!(f, "bus transaction failed: {:?}", e),
            Error::Disposed => f.write_str("driver used after dispose"),
            Error::InvalidArgument => f.write_str("argument out of range"),
            Error::InvalidCalibration => f.write_str("device calibration unusable"),
        }
    }
}
