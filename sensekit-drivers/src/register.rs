//! Register access layer
//!
//! Translates a named register into the bus primitives the device expects.
//! Reads select the register with a single address byte carrying the
//! device's read-mode flag, then read the payload; the device advances its
//! register pointer on each byte so a multi-byte quantity arrives in one
//! read. Writes send address and value as one two-byte transaction.
//!
//! Register addresses are OR'd with the flag and never validated: a driver's
//! `Register` enum is the only source of addresses.

use core::marker::PhantomData;

use sensekit_core::{BusGuard, Error};
use sensekit_hal::BusDevice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Address byte convention of the bus the device is wired to
///
/// ST sensors use the top of the sub-address byte as flags: on I2C bit 7
/// enables auto-increment, on SPI bit 7 selects read and bit 6
/// auto-increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AddressMode {
    #[default]
    I2c,
    Spi,
}

impl AddressMode {
    /// Flag bits OR'd into the address byte of a read
    pub const fn read_mask(self) -> u8 {
        match self {
            AddressMode::I2c => 0x80,
            AddressMode::Spi => 0xC0,
        }
    }
}

/// Register-level view of one device
///
/// `R` is the device's register enum; only its variants can be addressed.
#[derive(Debug)]
pub struct RegisterAccess<B, R> {
    guard: BusGuard<B>,
    read_mask: u8,
    _registers: PhantomData<R>,
}

impl<B, R> RegisterAccess<B, R>
where
    B: BusDevice,
    R: Copy + Into<u8>,
{
    /// Wrap an owned bus handle
    pub fn new(bus: B, mode: AddressMode) -> Self {
        Self::from_guard(BusGuard::new(bus), mode)
    }

    /// Wrap a guard produced elsewhere (e.g. from an optional handle)
    pub fn from_guard(guard: BusGuard<B>, mode: AddressMode) -> Self {
        Self {
            guard,
            read_mask: mode.read_mask(),
            _registers: PhantomData,
        }
    }

    /// Read one register
    pub fn read_byte(&mut self, reg: R) -> Result<u8, Error<B::Error>> {
        let address = reg.into() | self.read_mask;
        let bus = self.guard.bus::<B::Error>()?;
        bus.write_byte(address).map_err(Error::Transport)?;
        bus.read_byte().map_err(Error::Transport)
    }

    /// Read consecutive registers starting at `reg` into `buf`
    pub fn read_buffer(&mut self, reg: R, buf: &mut [u8]) -> Result<(), Error<B::Error>> {
        let address = reg.into() | self.read_mask;
        let bus = self.guard.bus::<B::Error>()?;
        bus.write_byte(address).map_err(Error::Transport)?;
        bus.read(buf).map_err(Error::Transport)
    }

    /// Read `N` consecutive registers starting at `reg`
    pub fn read_array<const N: usize>(&mut self, reg: R) -> Result<[u8; N], Error<B::Error>> {
        let mut buf = [0u8; N];
        self.read_buffer(reg, &mut buf)?;
        Ok(buf)
    }

    /// Write one register as a single `[address, value]` transaction
    pub fn write_byte(&mut self, reg: R, value: u8) -> Result<(), Error<B::Error>> {
        let bus = self.guard.bus::<B::Error>()?;
        bus.write(&[reg.into(), value]).map_err(Error::Transport)
    }

    /// Read a register, transform it, and write the result back
    pub fn modify_byte<F>(&mut self, reg: R, f: F) -> Result<u8, Error<B::Error>>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = f(self.read_byte(reg)?);
        self.write_byte(reg, value)?;
        Ok(value)
    }

    /// Whether the bus has been released
    pub fn is_disposed(&self) -> bool {
        self.guard.is_disposed()
    }

    /// Release the bus; `None` once already released
    pub fn dispose(&mut self) -> Option<B> {
        self.guard.dispose()
    }

    /// Consume the accessor, returning the bus if still held
    pub fn into_inner(self) -> Option<B> {
        self.guard.into_inner()
    }
}
