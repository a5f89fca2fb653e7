//! HT16K33 LED matrix / segment display controller (I2C)
//!
//! Holtek controller used on common 4- and 8-digit seven-segment
//! backpacks. It scans the LEDs itself; the host only writes display RAM
//! and a few single-byte commands.
//!
//! # Display RAM
//!
//! 16 bytes at address 0x00, two per row. A seven-segment backpack wires
//! digit `n` to the low byte of row `n`, so digit `n` lives at RAM address
//! `2 * n`.

use heapless::Vec;
use sensekit_core::{BusGuard, Error};
use sensekit_hal::BusDevice;

use super::segment::Segments;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// I2C address with A0-A2 unstrapped
pub const I2C_ADDRESS: u8 = 0x70;
/// Highest dimming step
pub const MAX_BRIGHTNESS: u8 = 15;
/// Rows of display RAM
pub const MAX_DIGITS: usize = 8;

/// Command bytes
mod cmd {
    pub const SYSTEM_SETUP: u8 = 0x20;
    pub const OSCILLATOR_ON: u8 = 0x01;
    pub const DISPLAY_SETUP: u8 = 0x80;
    pub const DISPLAY_ON: u8 = 0x01;
    pub const DIMMING: u8 = 0xE0;
    pub const RAM_START: u8 = 0x00;
}

/// Hardware blink rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Blink {
    #[default]
    Off,
    Hz2,
    Hz1,
    HalfHz,
}

/// HT16K33 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ht16k33Config {
    /// Dimming step, 0-15
    pub brightness: u8,
    pub blink: Blink,
}

impl Default for Ht16k33Config {
    fn default() -> Self {
        Self {
            brightness: MAX_BRIGHTNESS,
            blink: Blink::Off,
        }
    }
}

fn display_setup(blink: Blink) -> u8 {
    cmd::DISPLAY_SETUP | ((blink as u8) << 1) | cmd::DISPLAY_ON
}

/// HT16K33 seven-segment driver
#[derive(Debug)]
pub struct Ht16k33<B> {
    guard: BusGuard<B>,
}

impl<B: BusDevice> Ht16k33<B> {
    /// Start the oscillator and switch the display on with defaults
    pub fn new(bus: B) -> Result<Self, Error<B::Error>> {
        Self::with_config(bus, Ht16k33Config::default())
    }

    /// Start the oscillator and apply `config`
    ///
    /// An out-of-range brightness is rejected before any bus traffic.
    pub fn with_config(bus: B, config: Ht16k33Config) -> Result<Self, Error<B::Error>> {
        Self::configure(BusGuard::new(bus), config)
    }

    /// Create a driver from a bus handle that may be absent
    ///
    /// Fails with [`Error::MissingBus`] before any bus traffic.
    pub fn from_optional(bus: Option<B>, config: Ht16k33Config) -> Result<Self, Error<B::Error>> {
        Self::configure(BusGuard::from_optional::<B::Error>(bus)?, config)
    }

    fn configure(guard: BusGuard<B>, config: Ht16k33Config) -> Result<Self, Error<B::Error>> {
        if config.brightness > MAX_BRIGHTNESS {
            return Err(Error::InvalidArgument);
        }

        let mut display = Self { guard };
        display.command(cmd::SYSTEM_SETUP | cmd::OSCILLATOR_ON)?;
        display.command(display_setup(config.blink))?;
        display.command(cmd::DIMMING | config.brightness)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("HT16K33 configured: {}", config);

        Ok(display)
    }

    fn command(&mut self, byte: u8) -> Result<(), Error<B::Error>> {
        self.guard
            .bus::<B::Error>()?
            .write_byte(byte)
            .map_err(Error::Transport)
    }

    /// Set the dimming step (0-15)
    pub fn set_brightness(&mut self, brightness: u8) -> Result<(), Error<B::Error>> {
        if brightness > MAX_BRIGHTNESS {
            return Err(Error::InvalidArgument);
        }
        self.command(cmd::DIMMING | brightness)
    }

    /// Set the hardware blink rate
    pub fn set_blink(&mut self, blink: Blink) -> Result<(), Error<B::Error>> {
        self.command(display_setup(blink))
    }

    /// Write digits starting at the leftmost position
    ///
    /// All digits go out in one RAM write. Positions past `digits.len()`
    /// are left untouched.
    pub fn write_digits(&mut self, digits: &[Segments]) -> Result<(), Error<B::Error>> {
        if digits.len() > MAX_DIGITS {
            return Err(Error::InvalidArgument);
        }

        // RAM address, then low/high byte per row; high bytes stay blank.
        let mut frame = [0u8; 1 + 2 * MAX_DIGITS];
        frame[0] = cmd::RAM_START;
        for (row, digit) in frame[1..].chunks_exact_mut(2).zip(digits) {
            row[0] = digit.bits();
        }

        self.guard
            .bus::<B::Error>()?
            .write(&frame[..1 + 2 * digits.len()])
            .map_err(Error::Transport)
    }

    /// Render text, folding each `.` into the preceding digit's point
    ///
    /// Fails with [`Error::InvalidArgument`] if a character has no
    /// seven-segment form or the text needs more than [`MAX_DIGITS`].
    pub fn write_str(&mut self, text: &str) -> Result<(), Error<B::Error>> {
        let digits = layout(text).ok_or(Error::InvalidArgument)?;
        self.write_digits(&digits)
    }

    /// Blank every digit
    pub fn clear(&mut self) -> Result<(), Error<B::Error>> {
        self.write_digits(&[Segments::NONE; MAX_DIGITS])
    }

    /// Whether the bus has been released
    pub fn is_disposed(&self) -> bool {
        self.guard.is_disposed()
    }

    /// Release the bus handle; `None` once already released
    pub fn dispose(&mut self) -> Option<B> {
        let bus = self.guard.dispose();

        #[cfg(feature = "defmt")]
        defmt::debug!("HT16K33 dispose (bus held: {})", bus.is_some());

        bus
    }

    /// Consume the driver, returning the bus handle if still held
    pub fn release(self) -> Option<B> {
        self.guard.into_inner()
    }
}

/// Map text onto digit layouts
fn layout(text: &str) -> Option<Vec<Segments, MAX_DIGITS>> {
    let mut digits: Vec<Segments, MAX_DIGITS> = Vec::new();
    for c in text.chars() {
        if c == '.' {
            let needs_blank = digits.last().map_or(true, |d| d.contains(Segments::DP));
            if needs_blank {
                digits.push(Segments::DP).ok()?;
            } else if let Some(last) = digits.last_mut() {
                last.insert(Segments::DP);
            }
            continue;
        }
        digits.push(Segments::for_char(c)?).ok()?;
    }
    Some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBus, Op};

    fn init_ops() -> std::vec::Vec<Op> {
        std::vec![Op::WriteByte(0x21), Op::WriteByte(0x81), Op::WriteByte(0xEF)]
    }

    #[test]
    fn test_init_sequence() {
        let mut bus = MockBus::new();
        let display = Ht16k33::new(&mut bus).unwrap();
        drop(display);
        assert_eq!(bus.ops, init_ops());
    }

    #[test]
    fn test_invalid_brightness_has_no_traffic() {
        let mut bus = MockBus::new();
        let config = Ht16k33Config {
            brightness: 16,
            ..Default::default()
        };
        let result = Ht16k33::with_config(&mut bus, config);
        assert!(matches!(result, Err(Error::InvalidArgument)));
        drop(result);
        assert!(bus.ops.is_empty());
    }

    #[test]
    fn test_missing_bus_fails_without_traffic() {
        let result = Ht16k33::<MockBus>::from_optional(None, Ht16k33Config::default());
        assert!(matches!(result, Err(Error::MissingBus)));

        let mut bus = MockBus::new();
        let display = Ht16k33::from_optional(Some(&mut bus), Ht16k33Config::default()).unwrap();
        drop(display);
        assert_eq!(bus.ops, init_ops());
    }

    #[test]
    fn test_blink_and_brightness_commands() {
        let mut bus = MockBus::new();
        let mut display = Ht16k33::new(&mut bus).unwrap();
        display.set_blink(Blink::Hz1).unwrap();
        display.set_brightness(3).unwrap();
        assert_eq!(display.set_brightness(20), Err(Error::InvalidArgument));
        drop(display);

        assert_eq!(&bus.ops[3..], &[Op::WriteByte(0x85), Op::WriteByte(0xE3)]);
    }

    #[test]
    fn test_write_digits_single_transaction() {
        let mut bus = MockBus::new();
        let mut display = Ht16k33::new(&mut bus).unwrap();
        display
            .write_digits(&[Segments::for_digit(1).unwrap(), Segments::G])
            .unwrap();
        drop(display);

        assert_eq!(
            bus.ops.last(),
            Some(&Op::Write(std::vec![0x00, 0x06, 0x00, 0x40, 0x00]))
        );
    }

    #[test]
    fn test_write_str_folds_points() {
        let digits = layout("12.5").unwrap();
        assert_eq!(digits.len(), 3);
        assert_eq!(digits[1], Segments::for_digit(2).unwrap() | Segments::DP);

        let leading = layout(".5").unwrap();
        assert_eq!(leading[0], Segments::DP);

        let doubled = layout("1..").unwrap();
        assert_eq!(doubled.len(), 2);

        assert!(layout("123456789").is_none());
        assert!(layout("1%").is_none());
    }

    #[test]
    fn test_write_str_rejects_unknown_chars() {
        let mut bus = MockBus::new();
        let mut display = Ht16k33::new(&mut bus).unwrap();
        assert_eq!(display.write_str("1%"), Err(Error::InvalidArgument));
        display.write_str("-4.2").unwrap();
        drop(display);

        assert_eq!(bus.ops.len(), 4);
        assert_eq!(
            bus.ops[3],
            Op::Write(std::vec![0x00, 0x40, 0x00, 0xE6, 0x00, 0x5B, 0x00])
        );
    }

    #[test]
    fn test_clear_and_dispose() {
        let mut display = Ht16k33::new(MockBus::new()).unwrap();
        display.clear().unwrap();
        let bus = display.dispose().unwrap();
        assert_eq!(bus.ops.last(), Some(&Op::Write(std::vec![0u8; 17])));

        assert!(display.dispose().is_none());
        assert_eq!(display.clear(), Err(Error::Disposed));
    }
}
