// Licensed under the Apache-2.0 license

//! Reset word synthesis.
//!
//! A register's reset word is the OR of each field's reset value shifted to
//! its low bit. Bits not covered by any field are 0.

use crate::config::CompilerConfig;
use crate::error::{RegMapError, RegMapResult};
use crate::types::Register;

/// Fold the fields of `register` into its reset word.
///
/// Overlapping fields are rejected rather than merged. The result is not
/// masked: a word wider than the configured register width is an error.
pub fn synthesize_reset_word(register: &Register, config: &CompilerConfig) -> RegMapResult<u64> {
    for (i, field) in register.fields.iter().enumerate() {
        if let Some(other) = register.fields[..i]
            .iter()
            .find(|other| other.bit_range.overlaps(&field.bit_range))
        {
            return Err(RegMapError::OverlappingFields {
                line: field.line,
                register: register.name.clone(),
                field: field.name.clone(),
                other: other.name.clone(),
                other_line: other.line,
            });
        }
    }

    let mut reset_word: u64 = 0;
    for field in &register.fields {
        if field.reset_value > field.bit_range.max_value() {
            return Err(RegMapError::ResetValueTooWide {
                line: field.line,
                register: register.name.clone(),
                field: field.name.clone(),
                value: field.reset_value,
                bits: field.bit_range.width(),
            });
        }
        let shifted = field
            .reset_value
            .checked_shl(field.bit_range.low)
            .filter(|v| v >> field.bit_range.low == field.reset_value)
            .ok_or_else(|| too_wide(register, u64::MAX, config))?;
        reset_word |= shifted;
    }

    let register_bits = config.register_bits();
    if register_bits < 64 && reset_word >> register_bits != 0 {
        return Err(too_wide(register, reset_word, config));
    }
    Ok(reset_word)
}

fn too_wide(register: &Register, reset_word: u64, config: &CompilerConfig) -> RegMapError {
    RegMapError::ResetWordTooWide {
        line: register.line,
        register: register.name.clone(),
        reset_word,
        register_bits: config.register_bits(),
    }
}
