//! LIS2DH12 accelerometer (I2C)
//!
//! The LIS2DH12 is a three-axis MEMS accelerometer with a built-in click
//! detector. The driver runs it in high-resolution mode at ±4 g, where one
//! LSB of the left-justified 12-bit output equals 2 mg, so samples come out
//! directly in milli-g.
//!
//! # Tap detection
//!
//! Single-click detection is enabled on all three axes and routed to INT1.
//! The click source register is latched until read; [`Lis2dh12::read_tap`]
//! reads (and thereby clears) it and decodes the axis and sign.

use embedded_hal_async::i2c::I2c;
use levelwatch_core::traits::Accelerometer;
use levelwatch_core::{RawSample, SamplingRate, TapAxis, TapDirection, TapEvent};

/// Default I2C address (SA0 pulled high)
pub const DEFAULT_ADDRESS: u8 = 0x19;

/// Expected WHO_AM_I value
pub const WHO_AM_I_VALUE: u8 = 0x33;

/// LIS2DH12 register addresses
pub mod reg {
    pub const WHO_AM_I: u8 = 0x0F;
    pub const CTRL_REG1: u8 = 0x20;
    pub const CTRL_REG2: u8 = 0x21;
    pub const CTRL_REG3: u8 = 0x22;
    pub const CTRL_REG4: u8 = 0x23;
    pub const CTRL_REG5: u8 = 0x24;
    pub const OUT_X_L: u8 = 0x28;
    pub const CLICK_CFG: u8 = 0x38;
    pub const CLICK_SRC: u8 = 0x39;
    pub const CLICK_THS: u8 = 0x3A;
    pub const TIME_LIMIT: u8 = 0x3B;
    pub const TIME_LATENCY: u8 = 0x3C;
    pub const TIME_WINDOW: u8 = 0x3D;

    /// Sub-address flag for multi-byte access
    pub const AUTO_INCREMENT: u8 = 0x80;
}

/// Register bit fields
pub mod bits {
    /// CTRL_REG1: X, Y and Z enabled
    pub const XYZ_EN: u8 = 0x07;
    /// CTRL_REG2: high-pass filter on the click path
    pub const HPCLICK: u8 = 0x04;
    /// CTRL_REG3: click interrupt on INT1
    pub const I1_CLICK: u8 = 0x80;
    /// CTRL_REG4: block data update
    pub const BDU: u8 = 0x80;
    /// CTRL_REG4: full scale ±4 g
    pub const FS_4G: u8 = 0b01 << 4;
    /// CTRL_REG4: high-resolution mode
    pub const HR: u8 = 0x08;
    /// CLICK_CFG: single click on X, Y and Z
    pub const SINGLE_CLICK_XYZ: u8 = 0x15;
    /// CLICK_THS: latch the click interrupt until CLICK_SRC is read
    pub const LIR_CLICK: u8 = 0x80;

    /// CLICK_SRC: interrupt active
    pub const CLICK_IA: u8 = 0x40;
    /// CLICK_SRC: single click detected
    pub const CLICK_SINGLE: u8 = 0x10;
    /// CLICK_SRC: click sign, set when negative
    pub const CLICK_SIGN: u8 = 0x08;
    pub const CLICK_Z: u8 = 0x04;
    pub const CLICK_Y: u8 = 0x02;
    pub const CLICK_X: u8 = 0x01;
}

/// Milli-g per LSB of the 12-bit output at ±4 g high resolution
const MG_PER_LSB: i16 = 2;

/// Output data rate field for CTRL_REG1
fn odr_bits(rate: SamplingRate) -> u8 {
    let odr = match rate {
        SamplingRate::Hz10 => 0b0010,
        SamplingRate::Hz25 => 0b0011,
        SamplingRate::Hz50 => 0b0100,
        SamplingRate::Hz100 => 0b0101,
    };
    odr << 4
}

/// Convert a left-justified 16-bit output register pair to milli-g
fn to_milli_g(low: u8, high: u8) -> i16 {
    (i16::from_le_bytes([low, high]) >> 4) * MG_PER_LSB
}

/// Decode a CLICK_SRC value
///
/// Returns `None` unless a single click is flagged. When several axes are
/// flagged the face (Z) wins over the edges.
pub fn decode_click(src: u8) -> Option<TapEvent> {
    if src & bits::CLICK_IA == 0 || src & bits::CLICK_SINGLE == 0 {
        return None;
    }

    let axis = if src & bits::CLICK_Z != 0 {
        TapAxis::Z
    } else if src & bits::CLICK_X != 0 {
        TapAxis::X
    } else if src & bits::CLICK_Y != 0 {
        TapAxis::Y
    } else {
        return None;
    };

    let direction = if src & bits::CLICK_SIGN != 0 {
        TapDirection::Negative
    } else {
        TapDirection::Positive
    };

    Some(TapEvent::new(axis, direction))
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<E> {
    /// I2C transfer failed
    Bus(E),
    /// WHO_AM_I returned an unexpected value
    WrongDevice(u8),
}

/// Click detector tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lis2dh12Config {
    /// I2C address (0x18 with SA0 low, 0x19 with SA0 high)
    pub address: u8,
    /// Click threshold, 7 bits, 32 mg/LSB at ±4 g
    pub click_threshold: u8,
    /// Maximum click duration in ODR cycles
    pub time_limit: u8,
    /// Dead time after a click in ODR cycles
    pub time_latency: u8,
}

impl Default for Lis2dh12Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            // 1.5 g
            click_threshold: 48,
            time_limit: 4,
            time_latency: 10,
        }
    }
}

/// LIS2DH12 driver
pub struct Lis2dh12<I2C> {
    i2c: I2C,
    config: Lis2dh12Config,
    rate: SamplingRate,
}

impl<I2C: I2c> Lis2dh12<I2C> {
    pub fn new(i2c: I2C, config: Lis2dh12Config) -> Self {
        Self {
            i2c,
            config,
            rate: SamplingRate::default(),
        }
    }

    /// Verify the device and configure measurement and click detection
    pub async fn init(&mut self, rate: SamplingRate) -> Result<(), DriverError<I2C::Error>> {
        let id = self.read_register(reg::WHO_AM_I).await?;
        if id != WHO_AM_I_VALUE {
            return Err(DriverError::WrongDevice(id));
        }

        self.write_register(reg::CTRL_REG1, odr_bits(rate) | bits::XYZ_EN)
            .await?;
        self.write_register(reg::CTRL_REG2, bits::HPCLICK).await?;
        self.write_register(reg::CTRL_REG3, bits::I1_CLICK).await?;
        self.write_register(reg::CTRL_REG4, bits::BDU | bits::FS_4G | bits::HR)
            .await?;
        self.write_register(reg::CTRL_REG5, 0).await?;

        self.write_register(reg::CLICK_CFG, bits::SINGLE_CLICK_XYZ)
            .await?;
        self.write_register(
            reg::CLICK_THS,
            bits::LIR_CLICK | (self.config.click_threshold & 0x7F),
        )
        .await?;
        self.write_register(reg::TIME_LIMIT, self.config.time_limit & 0x7F)
            .await?;
        self.write_register(reg::TIME_LATENCY, self.config.time_latency)
            .await?;
        self.write_register(reg::TIME_WINDOW, 0).await?;

        self.rate = rate;
        Ok(())
    }

    /// Current output data rate
    pub fn rate(&self) -> SamplingRate {
        self.rate
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn read_register(&mut self, register: u8) -> Result<u8, DriverError<I2C::Error>> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(self.config.address, &[register], &mut value)
            .await
            .map_err(DriverError::Bus)?;
        Ok(value[0])
    }

    async fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), DriverError<I2C::Error>> {
        self.i2c
            .write(self.config.address, &[register, value])
            .await
            .map_err(DriverError::Bus)
    }
}

impl<I2C: I2c> Accelerometer for Lis2dh12<I2C> {
    type Error = DriverError<I2C::Error>;

    async fn read_sample(&mut self) -> Result<RawSample, Self::Error> {
        let mut out = [0u8; 6];
        self.i2c
            .write_read(
                self.config.address,
                &[reg::OUT_X_L | reg::AUTO_INCREMENT],
                &mut out,
            )
            .await
            .map_err(DriverError::Bus)?;

        Ok(RawSample::new(
            to_milli_g(out[0], out[1]),
            to_milli_g(out[2], out[3]),
            to_milli_g(out[4], out[5]),
        ))
    }

    async fn set_sampling_rate(&mut self, rate: SamplingRate) -> Result<(), Self::Error> {
        self.write_register(reg::CTRL_REG1, odr_bits(rate) | bits::XYZ_EN)
            .await?;
        self.rate = rate;
        Ok(())
    }

    async fn read_tap(&mut self) -> Result<Option<TapEvent>, Self::Error> {
        let src = self.read_register(reg::CLICK_SRC).await?;
        Ok(decode_click(src))
    }
}
