//! LPS25H pressure and temperature sensor
//!
//! ST MEMS barometer, 260-1260 hPa, found on the Raspberry Pi Sense HAT.
//!
//! # Output format
//!
//! - Pressure: 24-bit two's complement, `PRESS_OUT_XL..PRESS_OUT_H`,
//!   1 LSB = 1/4096 hPa
//! - Temperature: 16-bit two's complement, `TEMP_OUT_L..TEMP_OUT_H`,
//!   `T(°C) = 42.5 + raw / 480`
//!
//! Multi-byte outputs are read in one transaction with the sub-address
//! auto-increment flag set.

use sensekit_core::decode::{i16_le, i24_le};
use sensekit_core::traits::{PressureSensor, TemperatureSensor};
use sensekit_core::{BusGuard, Error, Pressure, Temperature};
use sensekit_hal::BusDevice;

use crate::register::{AddressMode, RegisterAccess};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// I2C address with SA0 tied low
pub const I2C_ADDRESS: u8 = 0x5C;
/// I2C address with SA0 tied high
pub const I2C_ADDRESS_ALT: u8 = 0x5D;
/// `WHO_AM_I` contents
pub const DEVICE_ID: u8 = 0xBD;

/// Pressure counts per hPa
const PRESSURE_LSB_PER_HPA: f32 = 4096.0;
/// Temperature counts per °C
const TEMPERATURE_LSB_PER_C: f32 = 480.0;
/// Temperature at raw reading zero
const TEMPERATURE_OFFSET_C: f32 = 42.5;

/// CTRL_REG1 bits
mod ctrl1 {
    /// Active mode (clear = power-down)
    pub const PD: u8 = 1 << 7;
    /// Output data rate field shift (bits 6:4)
    pub const ODR_SHIFT: u8 = 4;
    /// Block data update until both halves are read
    pub const BDU: u8 = 1 << 2;
}

/// CTRL_REG2 bits
mod ctrl2 {
    /// Start a single conversion
    pub const ONE_SHOT: u8 = 1 << 0;
}

/// LPS25H register map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Reference pressure, low byte of 24
    RefPXl = 0x08,
    WhoAmI = 0x0F,
    /// Averaging configuration
    ResConf = 0x10,
    CtrlReg1 = 0x20,
    CtrlReg2 = 0x21,
    Status = 0x27,
    /// Pressure output, low byte of 24
    PressOutXl = 0x28,
    /// Temperature output, low byte of 16
    TempOutL = 0x2B,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

/// Output data rate for continuous conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataRate {
    /// Convert only on [`Lps25h::trigger_one_shot`]
    OneShot,
    Hz1,
    Hz7,
    Hz12_5,
    #[default]
    Hz25,
}

impl DataRate {
    fn bits(self) -> u8 {
        match self {
            DataRate::OneShot => 0b000,
            DataRate::Hz1 => 0b001,
            DataRate::Hz7 => 0b010,
            DataRate::Hz12_5 => 0b011,
            DataRate::Hz25 => 0b100,
        }
    }
}

/// Internal temperature averaging (RES_CONF bits 1:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TemperatureAveraging {
    Avg8,
    Avg16,
    Avg32,
    #[default]
    Avg64,
}

/// Internal pressure averaging (RES_CONF bits 3:2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PressureAveraging {
    Avg8,
    Avg32,
    Avg128,
    #[default]
    Avg512,
}

/// LPS25H configuration
///
/// The default selects maximum resolution and 25 Hz continuous conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lps25hConfig {
    /// Bus the sensor is wired to
    pub mode: AddressMode,
    pub data_rate: DataRate,
    pub temperature_averaging: TemperatureAveraging,
    pub pressure_averaging: PressureAveraging,
    /// Hold output registers until both halves of a sample are read
    pub block_data_update: bool,
}

impl Lps25hConfig {
    /// RES_CONF register value
    pub fn res_conf(&self) -> u8 {
        ((self.pressure_averaging as u8) << 2) | self.temperature_averaging as u8
    }

    /// CTRL_REG1 register value
    pub fn ctrl_reg1(&self) -> u8 {
        let mut value = ctrl1::PD | (self.data_rate.bits() << ctrl1::ODR_SHIFT);
        if self.block_data_update {
            value |= ctrl1::BDU;
        }
        value
    }
}

/// STATUS_REG flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// New temperature sample available
    pub temperature_available: bool,
    /// New pressure sample available
    pub pressure_available: bool,
    /// Temperature sample overwritten before it was read
    pub temperature_overrun: bool,
    /// Pressure sample overwritten before it was read
    pub pressure_overrun: bool,
}

impl Status {
    /// Parse from raw STATUS_REG value
    pub fn from_register(value: u8) -> Self {
        Self {
            temperature_available: value & (1 << 0) != 0,
            pressure_available: value & (1 << 1) != 0,
            temperature_overrun: value & (1 << 4) != 0,
            pressure_overrun: value & (1 << 5) != 0,
        }
    }
}

/// Convert a raw TEMP_OUT reading
pub fn temperature_from_raw(raw: i16) -> Temperature {
    Temperature::from_celsius(TEMPERATURE_OFFSET_C + raw as f32 / TEMPERATURE_LSB_PER_C)
}

/// Convert a raw PRESS_OUT (or REF_P) reading
pub fn pressure_from_raw(raw: i32) -> Pressure {
    Pressure::from_hectopascals(raw as f32 / PRESSURE_LSB_PER_HPA)
}

/// LPS25H driver
///
/// Every accessor reads the device; nothing is cached.
#[derive(Debug)]
pub struct Lps25h<B> {
    regs: RegisterAccess<B, Register>,
}

impl<B: BusDevice> Lps25h<B> {
    /// Create a driver with the default configuration
    pub fn new(bus: B) -> Result<Self, Error<B::Error>> {
        Self::with_config(bus, Lps25hConfig::default())
    }

    /// Create a driver and write `config` to the device
    pub fn with_config(bus: B, config: Lps25hConfig) -> Result<Self, Error<B::Error>> {
        Self::configure(BusGuard::new(bus), config)
    }

    /// Create a driver from a bus handle that may be absent
    ///
    /// Fails with [`Error::MissingBus`] before any bus traffic.
    pub fn from_optional(bus: Option<B>, config: Lps25hConfig) -> Result<Self, Error<B::Error>> {
        Self::configure(BusGuard::from_optional::<B::Error>(bus)?, config)
    }

    fn configure(guard: BusGuard<B>, config: Lps25hConfig) -> Result<Self, Error<B::Error>> {
        let mut regs = RegisterAccess::from_guard(guard, config.mode);
        regs.write_byte(Register::ResConf, config.res_conf())?;
        regs.write_byte(Register::CtrlReg1, config.ctrl_reg1())?;

        #[cfg(feature = "defmt")]
        defmt::debug!("LPS25H configured: {}", config);

        Ok(Self { regs })
    }

    /// Current temperature
    pub fn temperature(&mut self) -> Result<Temperature, Error<B::Error>> {
        let raw = i16_le(self.regs.read_array(Register::TempOutL)?);
        Ok(temperature_from_raw(raw))
    }

    /// Current absolute pressure
    pub fn pressure(&mut self) -> Result<Pressure, Error<B::Error>> {
        let raw = i24_le(self.regs.read_array(Register::PressOutXl)?);
        Ok(pressure_from_raw(raw))
    }

    /// Reference pressure subtracted in differential mode
    pub fn reference_pressure(&mut self) -> Result<Pressure, Error<B::Error>> {
        let raw = i24_le(self.regs.read_array(Register::RefPXl)?);
        Ok(pressure_from_raw(raw))
    }

    /// Contents of `WHO_AM_I`; [`DEVICE_ID`] on a genuine part
    pub fn who_am_i(&mut self) -> Result<u8, Error<B::Error>> {
        self.regs.read_byte(Register::WhoAmI)
    }

    /// Data-ready and overrun flags
    pub fn status(&mut self) -> Result<Status, Error<B::Error>> {
        self.regs.read_byte(Register::Status).map(Status::from_register)
    }

    /// Start a single conversion (with [`DataRate::OneShot`])
    pub fn trigger_one_shot(&mut self) -> Result<(), Error<B::Error>> {
        self.regs
            .modify_byte(Register::CtrlReg2, |v| v | ctrl2::ONE_SHOT)
            .map(|_| ())
    }

    /// Put the sensor into power-down mode
    ///
    /// The bus stays held; use [`Lps25h::dispose`] to give it up.
    pub fn power_down(&mut self) -> Result<(), Error<B::Error>> {
        self.regs
            .modify_byte(Register::CtrlReg1, |v| v & !ctrl1::PD)
            .map(|_| ())
    }

    /// Whether the bus has been released
    pub fn is_disposed(&self) -> bool {
        self.regs.is_disposed()
    }

    /// Release the bus handle
    ///
    /// Returns the handle on the first call and `None` afterwards. Every
    /// accessor fails with [`Error::Disposed`] from here on.
    pub fn dispose(&mut self) -> Option<B> {
        let bus = self.regs.dispose();

        #[cfg(feature = "defmt")]
        defmt::debug!("LPS25H dispose (bus held: {})", bus.is_some());

        bus
    }

    /// Consume the driver, returning the bus handle if still held
    pub fn release(self) -> Option<B> {
        self.regs.into_inner()
    }
}

impl<B: BusDevice> TemperatureSensor for Lps25h<B> {
    type Error = Error<B::Error>;

    fn temperature(&mut self) -> Result<Temperature, Self::Error> {
        Lps25h::temperature(self)
    }
}

impl<B: BusDevice> PressureSensor for Lps25h<B> {
    type Error = Error<B::Error>;

    fn pressure(&mut self) -> Result<Pressure, Self::Error> {
        Lps25h::pressure(self)
    }
}
