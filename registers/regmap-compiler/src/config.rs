// Licensed under the Apache-2.0 license

//! Configuration for register map compilation.
//!
//! [`CompilerConfig`] holds the values the text format itself does not carry:
//! the register byte width and the alignment used to derive the block base
//! address from the first declared register. It can be built in code or read
//! from a small TOML file.

use crate::error::ConfigError;
use serde::Deserialize;

/// Default register width in bytes.
pub const DEFAULT_BYTE_WIDTH: u8 = 2;

/// Default alignment of the block base address.
pub const DEFAULT_BASE_ALIGNMENT: u64 = 0x1000;

/// Layout parameters for a register map.
///
/// # Example
///
/// ```
/// use mcu_regmap_compiler::config::CompilerConfig;
///
/// // 16-bit registers in a 4 KiB aligned block
/// let config = CompilerConfig::with_defaults();
/// assert_eq!(config.register_byte_width, 2);
/// assert_eq!(config.base_address_for(0x5000_1002), 0x5000_1000);
///
/// // Base address taken verbatim from the first register
/// let config = CompilerConfig::with_defaults().base_alignment(1);
/// assert_eq!(config.base_address_for(0x5000_1002), 0x5000_1002);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Width of every register in bytes (1 or 2).
    pub register_byte_width: u8,

    /// The first register's address is rounded down to a multiple of this
    /// value to obtain the block base address. Must be a power of two.
    pub base_alignment: u64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CompilerConfig {
    /// 2-byte registers, base address aligned down to 0x1000.
    pub fn with_defaults() -> Self {
        Self {
            register_byte_width: DEFAULT_BYTE_WIDTH,
            base_alignment: DEFAULT_BASE_ALIGNMENT,
        }
    }

    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the register byte width.
    pub fn register_byte_width(mut self, width: u8) -> Self {
        self.register_byte_width = width;
        self
    }

    /// Set the base address alignment.
    pub fn base_alignment(mut self, alignment: u64) -> Self {
        self.base_alignment = alignment;
        self
    }

    /// Check that the configured values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.register_byte_width, 1 | 2) {
            return Err(ConfigError::UnsupportedByteWidth(self.register_byte_width));
        }
        if !self.base_alignment.is_power_of_two() {
            return Err(ConfigError::InvalidBaseAlignment(self.base_alignment));
        }
        Ok(())
    }

    /// Register width in bits.
    pub fn register_bits(&self) -> u32 {
        u32::from(self.register_byte_width) * 8
    }

    /// Base address of a block whose first register sits at `first_address`.
    pub fn base_address_for(&self, first_address: u64) -> u64 {
        first_address & !(self.base_alignment - 1)
    }
}
