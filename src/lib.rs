//! Driver for the [MAX31855] cold-junction compensated thermocouple-to-digital
//! converter, built on the `embedded-hal` blocking traits.
//!
//! [MAX31855]: https://www.analog.com/media/en/technical-documentation/data-sheets/MAX31855.pdf
//!
//! The chip is read-only over the bus: every transaction clocks out the same
//! 32-bit word carrying the thermocouple temperature, the internal reference
//! junction temperature and three fault flags. A read is one chip-select
//! low/high bracket around a 4-byte full-duplex transfer of don't-care
//! bytes; [`Reading::from_register`] then decodes the word and is a pure
//! function that can be exercised without any bus at all.
//!
//! Fault conditions reported by the chip (open thermocouple, shorts to VCC
//! or GND) are data, not errors: they come back as flags on [`Reading`] and
//! interpreting them is up to the caller.
//!
//! ## Example
//! ```ignore
//! use max31855::{Max31855, MODE};
//!
//! // Configure the SPI peripheral with the mode and rate the chip expects.
//! let spi = spi.init(
//!     &mut pac.RESETS,
//!     clocks.peripheral_clock.freq(),
//!     5.MHz(),
//!     MODE,
//! );
//! let cs = pins.gpio5.into_push_pull_output();
//!
//! let mut sensor = Max31855::new(spi, cs, 5_000_000)?;
//! loop {
//!     let reading = sensor.read()?;
//!     println!("T = {:.2} ℃", reading.thermocouple_c);
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod registers;

use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi::{Mode, Phase, Polarity};

use crate::registers::*;

/// Highest SPI clock rate the MAX31855 supports, in Hz.
pub const MAX_CLOCK_RATE_HZ: u32 = 5_000_000;

/// SPI mode the MAX31855 talks in (mode 0, MSB first).
pub const MODE: Mode = Mode {
    polarity: Polarity::IdleLow,
    phase: Phase::CaptureOnFirstTransition,
};

/// Errors returned by this driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<SpiE, CsE> {
    /// Requested bus clock rate is above [`MAX_CLOCK_RATE_HZ`].
    InvalidClockRate(u32),
    /// The bus transfer failed.
    Spi(SpiE),
    /// The chip-select line could not be driven.
    ChipSelect(CsE),
}

/// Transaction parameters recorded at setup time.
///
/// The driver does not program the bus clock itself. Firmware configures
/// the SPI peripheral, hands the rate in use to [`Max31855::new`] for
/// validation against the chip's ceiling, and can read the descriptor back
/// through [`Max31855::settings`].
#[derive(Clone, Copy)]
pub struct SpiSettings {
    /// Bus clock rate in Hz, at most [`MAX_CLOCK_RATE_HZ`].
    pub clock_rate_hz: u32,
    /// Clock polarity and phase, always [`MODE`].
    pub mode: Mode,
}

impl core::fmt::Debug for SpiSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let polarity = match self.mode.polarity {
            Polarity::IdleLow => "IdleLow",
            Polarity::IdleHigh => "IdleHigh",
        };
        let phase = match self.mode.phase {
            Phase::CaptureOnFirstTransition => "CaptureOnFirstTransition",
            Phase::CaptureOnSecondTransition => "CaptureOnSecondTransition",
        };
        f.debug_struct("SpiSettings")
            .field("clock_rate_hz", &self.clock_rate_hz)
            .field("mode_polarity", &polarity)
            .field("mode_phase", &phase)
            .finish()
    }
}

/// One decoded measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Thermocouple temperature in °C, 0.25 °C resolution.
    pub thermocouple_c: f32,
    /// Internal reference junction temperature in °C, 0.0625 °C resolution.
    pub internal_c: f32,
    /// Thermocouple shorted to VCC.
    pub shorted_vcc: bool,
    /// Thermocouple shorted to GND.
    pub shorted_gnd: bool,
    /// Thermocouple circuit is open.
    pub open_circuit: bool,
}

impl Reading {
    /// Decodes the 32-bit word the chip clocks out on every transaction.
    ///
    /// Sign and magnitude are independent fields in the word: the magnitude
    /// bits are taken unsigned and multiplied by the signed resolution, with
    /// no two's-complement sign extension.
    pub fn from_register(reg: u32) -> Self {
        let tc_sign = if reg & TC_SIGN != 0 { -1.0 } else { 1.0 };
        let cj_sign = if reg & CJ_SIGN != 0 { -1.0 } else { 1.0 };
        Self {
            thermocouple_c: tc_sign * TC_RESOLUTION_C * ((reg >> TC_SHIFT) & TC_MASK) as f32,
            internal_c: cj_sign * CJ_RESOLUTION_C * ((reg >> CJ_SHIFT) & CJ_MASK) as f32,
            shorted_vcc: reg & FAULT_SCV != 0,
            shorted_gnd: reg & FAULT_SCG != 0,
            open_circuit: reg & FAULT_OC != 0,
        }
    }

    /// True when any of the three fault flags is set.
    pub fn has_fault(&self) -> bool {
        self.shorted_vcc || self.shorted_gnd || self.open_circuit
    }
}

/// MAX31855 driver owning the bus handle and the chip-select pin.
///
/// Reads take `&mut self`, so one instance cannot be mid-transaction twice.
/// To share the underlying bus between devices, instantiate `SPI` with a
/// bus-proxy type that arbitrates access.
pub struct Max31855<SPI, CS> {
    spi: SPI,
    cs: CS,
    settings: SpiSettings,
}

impl<SPI, CS, SpiE, CsE> Max31855<SPI, CS>
where
    SPI: Transfer<u8, Error = SpiE>,
    CS: OutputPin<Error = CsE>,
{
    /// Stores the bus handle and transaction parameters and deselects the
    /// chip.
    ///
    /// `cs` must already be configured as a push-pull output; it is driven
    /// high (inactive) here and the driver keeps exclusive ownership of it
    /// from then on. `clock_rate_hz` may not exceed [`MAX_CLOCK_RATE_HZ`];
    /// no lower bound is imposed. Nothing is driven when validation fails.
    pub fn new(spi: SPI, mut cs: CS, clock_rate_hz: u32) -> Result<Self, Error<SpiE, CsE>> {
        if clock_rate_hz > MAX_CLOCK_RATE_HZ {
            return Err(Error::InvalidClockRate(clock_rate_hz));
        }
        cs.set_high().map_err(Error::ChipSelect)?;
        Ok(Self {
            spi,
            cs,
            settings: SpiSettings {
                clock_rate_hz,
                mode: MODE,
            },
        })
    }

    /// Transaction parameters recorded at construction.
    pub fn settings(&self) -> SpiSettings {
        self.settings
    }

    /// Selects the chip, clocks out its 32-bit word with four don't-care
    /// bytes and decodes it.
    ///
    /// The chip-select line is released again even when the transfer fails.
    pub fn read(&mut self) -> Result<Reading, Error<SpiE, CsE>> {
        let mut buf = [0u8; 4];

        self.cs.set_low().map_err(Error::ChipSelect)?;
        let transferred = self.spi.transfer(&mut buf).map(|_| ()).map_err(Error::Spi);
        self.cs.set_high().map_err(Error::ChipSelect)?;
        transferred?;

        // First byte received is the most significant one.
        let reg = (buf[0] as u32) << 24
            | (buf[1] as u32) << 16
            | (buf[2] as u32) << 8
            | buf[3] as u32;

        Ok(Reading::from_register(reg))
    }

    /// Releases the bus handle and the chip-select pin.
    pub fn free(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}
