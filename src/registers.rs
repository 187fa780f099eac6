//! Bit layout of the 32-bit word the MAX31855 clocks out, MSB first.

pub const TC_SIGN: u32 = 1 << 31; // Thermocouple temperature sign, 1 = negative (D31)
pub const TC_SHIFT: u32 = 18; // Thermocouple magnitude starts at D18
pub const TC_MASK: u32 = 0x3FFF; // 14-bit thermocouple magnitude (D30..D18)
pub const TC_RESOLUTION_C: f32 = 0.25; // Thermocouple resolution, °C per count

pub const FAULT: u32 = 1 << 16; // Summary flag, set with any of D2..D0 (D16)

pub const CJ_SIGN: u32 = 1 << 15; // Internal junction temperature sign, 1 = negative (D15)
pub const CJ_SHIFT: u32 = 4; // Internal junction magnitude starts at D4
pub const CJ_MASK: u32 = 0x7FF; // 11-bit internal junction magnitude (D14..D4)
pub const CJ_RESOLUTION_C: f32 = 0.0625; // Internal junction resolution, °C per count

pub const FAULT_SCV: u32 = 1 << 2; // Thermocouple shorted to VCC (D2)
pub const FAULT_SCG: u32 = 1 << 1; // Thermocouple shorted to GND (D1)
pub const FAULT_OC: u32 = 1 << 0; // Thermocouple open circuit (D0)
