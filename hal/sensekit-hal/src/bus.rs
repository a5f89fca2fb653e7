//! Bus primitive abstraction
//!
//! A [`BusDevice`] is a channel to exactly one peripheral: the device
//! address (I2C) or chip select (SPI) is bound when the handle is created,
//! so drivers only deal in bytes.

/// A handle to a single device on a shared bus
///
/// Every call is one blocking bus transaction. Bytes within a call are
/// delivered in order; failures surface as [`BusDevice::Error`] and are
/// never retried at this layer.
pub trait BusDevice {
    /// Error type for bus operations
    type Error;

    /// Write a single byte
    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Write a sequence of bytes as one transaction
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Read a single byte
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Fill `buf` from the device
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: BusDevice + ?Sized> BusDevice for &mut T {
    type Error = T::Error;

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        T::write_byte(self, value)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, data)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        T::read_byte(self)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, buf)
    }
}
