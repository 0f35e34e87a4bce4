// Licensed under the Apache-2.0 license

//! Layout calculation: base address, register offsets and block size.
//!
//! The base address comes from the first declared register, not the numeric
//! minimum, so declaration order must already be address order.

use crate::config::CompilerConfig;
use crate::error::{RegMapError, RegMapResult};
use crate::types::Register;

/// Result of laying out a register sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Layout {
    pub base_address: u64,
    /// One offset per register, in declaration order.
    pub offsets: Vec<u64>,
    pub max_offset: u64,
}

impl Layout {
    /// Compute the layout of `registers`.
    ///
    /// Addresses must be strictly increasing, at least one register width
    /// apart, and every offset must be a multiple of the register width that
    /// fits in 32 bits.
    pub fn compute(registers: &[Register], config: &CompilerConfig) -> RegMapResult<Layout> {
        let first = registers.first().ok_or(RegMapError::NoRegisters)?;
        let base_address = config.base_address_for(first.address);
        let byte_width = config.register_byte_width;

        let mut offsets = Vec::with_capacity(registers.len());
        let mut previous: Option<&Register> = None;
        for register in registers {
            if let Some(prev) = previous {
                let next_free = prev.address.saturating_add(u64::from(byte_width));
                if register.address < next_free {
                    return Err(RegMapError::AddressOrder {
                        line: register.line,
                        register: register.name.clone(),
                        address: register.address,
                        previous: prev.name.clone(),
                        previous_address: prev.address,
                        byte_width,
                    });
                }
            }

            // base <= first address <= this address, by the ordering check above
            let offset = register.address - base_address;
            if offset > u64::from(u32::MAX) {
                return Err(RegMapError::OffsetTooLarge {
                    line: register.line,
                    register: register.name.clone(),
                    offset,
                });
            }
            if offset % u64::from(byte_width) != 0 {
                return Err(RegMapError::MisalignedAddress {
                    line: register.line,
                    register: register.name.clone(),
                    offset,
                    byte_width,
                });
            }

            offsets.push(offset);
            previous = Some(register);
        }

        let max_offset = offsets.iter().copied().max().unwrap_or(0);
        Ok(Layout {
            base_address,
            offsets,
            max_offset,
        })
    }
}
