//! I2C bus adapter
//!
//! Binds an `embedded-hal` I2C master to one 7-bit device address.

use embedded_hal::i2c::I2c;

use crate::bus::BusDevice;

/// A single I2C peripheral reachable through an `embedded-hal` bus
///
/// The register pointer set by a preceding write survives the STOP
/// condition on the sensors this crate targets, so an address write
/// followed by a separate read addresses the same register.
#[derive(Debug)]
pub struct I2cDevice<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cDevice<I2C> {
    /// Create a device handle
    ///
    /// # Arguments
    /// * `i2c` - Bus master (or a shared-bus proxy)
    /// * `address` - 7-bit I2C address
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit address this handle talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> BusDevice for I2cDevice<I2C> {
    type Error = I2C::Error;

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[value])
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(self.address, data)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.i2c.read(self.address, &mut buf)?;
        Ok(buf[0])
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(self.address, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Records the address of every operation and echoes a fixed byte on reads
    struct FakeI2c {
        last_address: u8,
        written: [u8; 4],
        written_len: usize,
    }

    #[derive(Debug)]
    struct FakeError;

    impl embedded_hal::i2c::Error for FakeError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for FakeI2c {
        type Error = FakeError;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.last_address = address;
            for op in operations {
                match op {
                    Operation::Write(data) => {
                        self.written[..data.len()].copy_from_slice(data);
                        self.written_len = data.len();
                    }
                    Operation::Read(buf) => buf.fill(0xA5),
                }
            }
            Ok(())
        }
    }

    fn fake() -> FakeI2c {
        FakeI2c {
            last_address: 0,
            written: [0; 4],
            written_len: 0,
        }
    }

    #[test]
    fn test_write_targets_bound_address() {
        let mut dev = I2cDevice::new(fake(), 0x5C);
        dev.write(&[0x20, 0xC0]).unwrap();

        let bus = dev.release();
        assert_eq!(bus.last_address, 0x5C);
        assert_eq!(&bus.written[..bus.written_len], &[0x20, 0xC0]);
    }

    #[test]
    fn test_read_byte() {
        let mut dev = I2cDevice::new(fake(), 0x5F);
        assert_eq!(dev.read_byte().unwrap(), 0xA5);
        assert_eq!(dev.address(), 0x5F);
    }
}
