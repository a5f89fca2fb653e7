//! SPI bus adapter
//!
//! Wraps an `embedded-hal` [`SpiDevice`](embedded_hal::spi::SpiDevice),
//! which owns chip-select handling for the peripheral.
//!
//! Register-addressed SPI parts expect the address byte and the data phase
//! inside one chip-select frame. A lone [`BusDevice::write_byte`] is
//! therefore held as a pending register select and clocked out together
//! with the next read or write.

use embedded_hal::spi::{Operation, SpiDevice as HalSpiDevice};

use crate::bus::BusDevice;

/// A single SPI peripheral reachable through an `embedded-hal` device
#[derive(Debug)]
pub struct SpiDevice<SPI> {
    spi: SPI,
    /// Register select waiting for its data phase
    pending: Option<u8>,
}

impl<SPI: HalSpiDevice> SpiDevice<SPI> {
    /// Create a device handle
    pub fn new(spi: SPI) -> Self {
        Self { spi, pending: None }
    }

    /// Register select still waiting for its data phase
    pub fn pending_select(&self) -> Option<u8> {
        self.pending
    }

    /// Clock out a held register select as a frame of its own
    pub fn flush(&mut self) -> Result<(), SPI::Error> {
        match self.pending.take() {
            Some(select) => self.spi.write(&[select]),
            None => Ok(()),
        }
    }

    /// Give the underlying device back
    ///
    /// Also returns a register select that never saw its data phase; call
    /// [`SpiDevice::flush`] first to send it instead.
    pub fn release(self) -> (SPI, Option<u8>) {
        (self.spi, self.pending)
    }
}

/// On SPI, `write_byte` is a held register select: it returns once the byte
/// is queued, and the byte goes out with the next read or write in the same
/// chip-select frame. A second `write_byte` first sends the held byte as a
/// frame of its own, so consecutive single-byte commands stay separate.
impl<SPI: HalSpiDevice> BusDevice for SpiDevice<SPI> {
    type Error = SPI::Error;

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        self.flush()?;
        self.pending = Some(value);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        match self.pending.take() {
            Some(select) => self
                .spi
                .transaction(&mut [Operation::Write(&[select]), Operation::Write(data)]),
            None => self.spi.write(data),
        }
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read(&mut buf)?;
        Ok(buf[0])
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        match self.pending.take() {
            Some(select) => self
                .spi
                .transaction(&mut [Operation::Write(&[select]), Operation::Read(buf)]),
            None => self.spi.read(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{ErrorKind, ErrorType};

    const MAX_FRAMES: usize = 4;

    /// Records the bytes written in each chip-select frame
    struct FakeSpi {
        frames: [[u8; 8]; MAX_FRAMES],
        lens: [usize; MAX_FRAMES],
        count: usize,
        fail_next: bool,
    }

    #[derive(Debug, PartialEq)]
    struct FakeError;

    impl embedded_hal::spi::Error for FakeError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for FakeSpi {
        type Error = FakeError;
    }

    impl HalSpiDevice for FakeSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), FakeError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(FakeError);
            }
            let frame = self.count;
            self.count += 1;
            for op in operations {
                match op {
                    Operation::Write(data) => {
                        for &b in data.iter() {
                            self.frames[frame][self.lens[frame]] = b;
                            self.lens[frame] += 1;
                        }
                    }
                    Operation::Read(buf) => {
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = 0x10 + i as u8;
                        }
                    }
                    _ => {}
                }
            }
            Ok(())
        }
    }

    impl FakeSpi {
        fn frame(&self, n: usize) -> &[u8] {
            &self.frames[n][..self.lens[n]]
        }
    }

    fn fake() -> FakeSpi {
        FakeSpi {
            frames: [[0; 8]; MAX_FRAMES],
            lens: [0; MAX_FRAMES],
            count: 0,
            fail_next: false,
        }
    }

    #[test]
    fn test_select_and_read_share_one_frame() {
        let mut dev = SpiDevice::new(fake());
        dev.write_byte(0xE8).unwrap();
        let mut buf = [0u8; 3];
        dev.read(&mut buf).unwrap();

        assert_eq!(buf, [0x10, 0x11, 0x12]);
        let (spi, pending) = dev.release();
        assert_eq!(pending, None);
        assert_eq!(spi.count, 1);
        assert_eq!(spi.frame(0), &[0xE8]);
    }

    #[test]
    fn test_plain_write_is_one_frame() {
        let mut dev = SpiDevice::new(fake());
        dev.write(&[0x20, 0xC0]).unwrap();

        let (spi, _) = dev.release();
        assert_eq!(spi.count, 1);
        assert_eq!(spi.frame(0), &[0x20, 0xC0]);
    }

    #[test]
    fn test_single_byte_commands_stay_separate() {
        let mut dev = SpiDevice::new(fake());
        dev.write_byte(0x21).unwrap();
        dev.write_byte(0x81).unwrap();
        dev.write_byte(0xEF).unwrap();
        assert_eq!(dev.pending_select(), Some(0xEF));

        dev.flush().unwrap();
        let (spi, pending) = dev.release();
        assert_eq!(pending, None);
        assert_eq!(spi.count, 3);
        assert_eq!(spi.frame(0), &[0x21]);
        assert_eq!(spi.frame(1), &[0x81]);
        assert_eq!(spi.frame(2), &[0xEF]);
    }

    #[test]
    fn test_release_reports_unsent_select() {
        let mut dev = SpiDevice::new(fake());
        dev.write_byte(0x21).unwrap();

        let (spi, pending) = dev.release();
        assert_eq!(pending, Some(0x21));
        assert_eq!(spi.count, 0);
    }

    #[test]
    fn test_error_in_held_select_frame_propagates() {
        let mut dev = SpiDevice::new(fake());
        dev.write_byte(0xE8).unwrap();
        dev.spi.fail_next = true;

        let mut buf = [0u8; 2];
        assert_eq!(dev.read(&mut buf), Err(FakeError));
        // The select was consumed by the failed frame, not replayed.
        assert_eq!(dev.pending_select(), None);

        dev.read(&mut buf).unwrap();
        let (spi, _) = dev.release();
        assert_eq!(spi.count, 1);
        assert_eq!(spi.frame(0), &[] as &[u8]);
    }

    #[test]
    fn test_error_flushing_held_select_propagates() {
        let mut dev = SpiDevice::new(fake());
        dev.write_byte(0x21).unwrap();
        dev.spi.fail_next = true;

        assert_eq!(dev.write_byte(0x81), Err(FakeError));
        assert_eq!(dev.pending_select(), None);
    }
}
