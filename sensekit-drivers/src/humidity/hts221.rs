//! HTS221 humidity and temperature sensor
//!
//! ST capacitive humidity sensor, companion of the LPS25H on the Sense HAT.
//!
//! Raw outputs are 16-bit two's complement counts with no fixed scale.
//! Each part carries two factory calibration points per quantity in
//! registers 0x30-0x3F; readings are linearly interpolated between them.
//!
//! # Calibration block
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0x30 | H0_rH_x2 |
//! | 0x31 | H1_rH_x2 |
//! | 0x32 | T0_degC_x8 (low 8 bits) |
//! | 0x33 | T1_degC_x8 (low 8 bits) |
//! | 0x35 | T1/T0 bits 9:8 |
//! | 0x36 | H0_T0_OUT (i16) |
//! | 0x3A | H1_T0_OUT (i16) |
//! | 0x3C | T0_OUT (i16) |
//! | 0x3E | T1_OUT (i16) |

use sensekit_core::decode::i16_le;
use sensekit_core::traits::{HumiditySensor, TemperatureSensor};
use sensekit_core::{weather, BusGuard, Error, RelativeHumidity, Temperature};
use sensekit_hal::BusDevice;

use crate::register::{AddressMode, RegisterAccess};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed I2C address
pub const I2C_ADDRESS: u8 = 0x5F;
/// `WHO_AM_I` contents
pub const DEVICE_ID: u8 = 0xBC;

/// Size of the calibration block
const CALIBRATION_LEN: usize = 16;

/// CTRL_REG1 bits
mod ctrl1 {
    /// Active mode (clear = power-down)
    pub const PD: u8 = 1 << 7;
    /// Block data update until both halves are read
    pub const BDU: u8 = 1 << 2;
}

/// HTS221 register map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    WhoAmI = 0x0F,
    /// Averaging configuration
    AvConf = 0x10,
    CtrlReg1 = 0x20,
    Status = 0x27,
    HumidityOutL = 0x28,
    TempOutL = 0x2A,
    /// First byte of the calibration block
    Calibration = 0x30,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

/// Output data rate (CTRL_REG1 bits 1:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataRate {
    OneShot,
    #[default]
    Hz1,
    Hz7,
    Hz12_5,
}

/// Number of internal samples averaged per output
///
/// Humidity and temperature use different sample counts for the same
/// 3-bit code; the variants name the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Averaging {
    Code0,
    Code1,
    Code2,
    #[default]
    Code3,
    Code4,
    Code5,
    Code6,
    Code7,
}

/// HTS221 configuration
///
/// The default matches the power-on averaging (32 humidity, 16
/// temperature samples) with block data update at 1 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hts221Config {
    /// Bus the sensor is wired to
    pub mode: AddressMode,
    pub data_rate: DataRate,
    pub humidity_averaging: Averaging,
    pub temperature_averaging: Averaging,
}

impl Hts221Config {
    /// AV_CONF register value
    pub fn av_conf(&self) -> u8 {
        ((self.temperature_averaging as u8) << 3) | self.humidity_averaging as u8
    }

    /// CTRL_REG1 register value
    pub fn ctrl_reg1(&self) -> u8 {
        ctrl1::PD | ctrl1::BDU | self.data_rate as u8
    }
}

/// Factory calibration points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    h0_rh: f32,
    h1_rh: f32,
    t0_c: f32,
    t1_c: f32,
    h0_out: i16,
    h1_out: i16,
    t0_out: i16,
    t1_out: i16,
}

impl Calibration {
    /// Parse the 16-byte block starting at register 0x30
    ///
    /// Returns `None` if either pair of raw points coincides, which would
    /// make interpolation divide by zero.
    pub fn from_registers(raw: &[u8; CALIBRATION_LEN]) -> Option<Self> {
        let msb = raw[5];
        let t0_x8 = (u16::from(msb & 0x03) << 8) | u16::from(raw[2]);
        let t1_x8 = (u16::from((msb >> 2) & 0x03) << 8) | u16::from(raw[3]);

        let cal = Self {
            h0_rh: f32::from(raw[0]) / 2.0,
            h1_rh: f32::from(raw[1]) / 2.0,
            t0_c: f32::from(t0_x8) / 8.0,
            t1_c: f32::from(t1_x8) / 8.0,
            h0_out: i16_le([raw[6], raw[7]]),
            h1_out: i16_le([raw[10], raw[11]]),
            t0_out: i16_le([raw[12], raw[13]]),
            t1_out: i16_le([raw[14], raw[15]]),
        };

        if cal.h0_out == cal.h1_out || cal.t0_out == cal.t1_out {
            return None;
        }
        Some(cal)
    }

    /// Relative humidity for a raw H_OUT count
    pub fn humidity(&self, raw: i16) -> RelativeHumidity {
        let percent = interpolate(raw, self.h0_out, self.h1_out, self.h0_rh, self.h1_rh);
        RelativeHumidity::from_percent(percent)
    }

    /// Temperature for a raw T_OUT count
    pub fn temperature(&self, raw: i16) -> Temperature {
        let celsius = interpolate(raw, self.t0_out, self.t1_out, self.t0_c, self.t1_c);
        Temperature::from_celsius(celsius)
    }
}

/// Straight line through `(x0, y0)` and `(x1, y1)`, evaluated at `x`
fn interpolate(x: i16, x0: i16, x1: i16, y0: f32, y1: f32) -> f32 {
    let dx = i32::from(x1) - i32::from(x0);
    y0 + (i32::from(x) - i32::from(x0)) as f32 * (y1 - y0) / dx as f32
}

/// STATUS_REG flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// New temperature sample available
    pub temperature_available: bool,
    /// New humidity sample available
    pub humidity_available: bool,
}

impl Status {
    /// Parse from raw STATUS_REG value
    pub fn from_register(value: u8) -> Self {
        Self {
            temperature_available: value & (1 << 0) != 0,
            humidity_available: value & (1 << 1) != 0,
        }
    }
}

/// HTS221 driver
///
/// Calibration is read once at construction; every measurement accessor
/// reads the output registers again.
#[derive(Debug)]
pub struct Hts221<B> {
    regs: RegisterAccess<B, Register>,
    calibration: Calibration,
}

impl<B: BusDevice> Hts221<B> {
    /// Create a driver with the default configuration
    pub fn new(bus: B) -> Result<Self, Error<B::Error>> {
        Self::with_config(bus, Hts221Config::default())
    }

    /// Create a driver, configure the device and load its calibration
    pub fn with_config(bus: B, config: Hts221Config) -> Result<Self, Error<B::Error>> {
        Self::configure(BusGuard::new(bus), config)
    }

    /// Create a driver from a bus handle that may be absent
    pub fn from_optional(bus: Option<B>, config: Hts221Config) -> Result<Self, Error<B::Error>> {
        Self::configure(BusGuard::from_optional::<B::Error>(bus)?, config)
    }

    fn configure(guard: BusGuard<B>, config: Hts221Config) -> Result<Self, Error<B::Error>> {
        let mut regs = RegisterAccess::from_guard(guard, config.mode);
        regs.write_byte(Register::AvConf, config.av_conf())?;
        regs.write_byte(Register::CtrlReg1, config.ctrl_reg1())?;

        let raw: [u8; CALIBRATION_LEN] = regs.read_array(Register::Calibration)?;
        let calibration = Calibration::from_registers(&raw).ok_or(Error::InvalidCalibration)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("HTS221 configured: {}, {}", config, calibration);

        Ok(Self { regs, calibration })
    }

    /// Factory calibration loaded at construction
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Current relative humidity
    pub fn humidity(&mut self) -> Result<RelativeHumidity, Error<B::Error>> {
        let raw = i16_le(self.regs.read_array(Register::HumidityOutL)?);
        Ok(self.calibration.humidity(raw))
    }

    /// Current temperature
    pub fn temperature(&mut self) -> Result<Temperature, Error<B::Error>> {
        let raw = i16_le(self.regs.read_array(Register::TempOutL)?);
        Ok(self.calibration.temperature(raw))
    }

    /// Dew point from a fresh temperature and humidity reading
    pub fn dew_point(&mut self) -> Result<Temperature, Error<B::Error>> {
        let temperature = self.temperature()?;
        let humidity = self.humidity()?;
        Ok(weather::dew_point(temperature, humidity))
    }

    /// Contents of `WHO_AM_I`; [`DEVICE_ID`] on a genuine part
    pub fn who_am_i(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_byte(Register::WhoAmI)
    }

    /// Data-ready flags
    pub fn status(&mut self) -> Result<Status, Error<B::Error>> {
        self.regs.read_byte(Register::Status).map(Status::from_register)
    }

    /// Put the sensor into power-down mode
    pub fn power_down(&mut self) -> Result<(), Error<B::Error>> {
        self.regs
            .modify_byte(Register::CtrlReg1, |v| v & !ctrl1::PD)
            .map(|_| ())
    }

    /// Whether the bus has been released
    pub fn is_disposed(&self) -> bool {
        self.regs.is_disposed()
    }

    /// Release the bus handle; `None` once already released
    pub fn dispose(&mut self) -> Option<B> {
        let bus = self.regs.dispose();

        #[cfg(feature = "defmt")]
        defmt::debug!("HTS221 dispose (bus held: {})", bus.is_some());

        bus
    }

    /// Consume the driver, returning the bus handle if still held
    pub fn release(self) -> Option<B> {
        self.regs.into_inner()
    }
}

impl<B: BusDevice> TemperatureSensor for Hts221<B> {
    type Error = Error<B::Error>;

    fn temperature(&mut self) -> Result<Temperature, Self::Error> {
        Hts221::temperature(self)
    }
}

impl<B: BusDevice> HumiditySensor for Hts221<B> {
    type Error = Error<B::Error>;

    fn humidity(&mut self) -> Result<RelativeHumidity, Self::Error> {
        Hts221::humidity(self)
    }
}
