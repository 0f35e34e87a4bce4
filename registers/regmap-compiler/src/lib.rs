// Licensed under the Apache-2.0 license

//! Register map compiler.
//!
//! Compiles a line-oriented register block description into a validated
//! [`RegisterMap`] and renders it as a C++ component source and a golden
//! reset-values header.
//!
//! ## Usage
//!
//! ```
//! use mcu_regmap_compiler::{compile, CompilerConfig};
//!
//! let src = "\
//! SYS_CTRL_1 0x50001002 EN RW [0:0] 0x1
//!   MODE RW [7:4] 0x5
//! DEV_ID 0x500010a4 LO RO [7:0] 0xA2
//!   HI RO [15:8] 0x01
//! ";
//! let map = compile(src, &CompilerConfig::with_defaults()).unwrap();
//! assert_eq!(map.base_address, 0x5000_1000);
//! assert_eq!(map.registers[0].reset_word, 0x51);
//! assert_eq!(map.registers[1].offset, 0xa4);
//!
//! let cpp = map.generate_cpp("SysCtrl");
//! let golden = map.generate_golden();
//! assert!(cpp.contains("constexpr size_t DEV_ID = 0x0a4;"));
//! assert!(golden.contains("{0x00a4, 0x01a2}, // DEV_ID"));
//! ```
//!
//! ## Module Organization
//!
//! - [`lexer`]: line classification and token grammars
//! - [`parse`]: line-by-line parser producing registers and fields
//! - [`layout`]: base address, offsets and block size
//! - [`reset`]: reset word synthesis
//! - [`output`]: C++ source and golden header generation
//! - [`config`]: compiler configuration ([`CompilerConfig`])
//! - [`util`]: naming helpers for generated identifiers and files

pub mod config;
pub mod error;
pub mod layout;
pub mod lexer;
pub mod output;
pub mod parse;
pub mod reset;
pub mod types;
pub mod util;

pub use config::CompilerConfig;
pub use error::{ConfigError, ErrorKind, RegMapError, RegMapResult};
pub use layout::Layout;
pub use output::GoldenEntry;
pub use types::{Access, BitRange, Field, Register, RegisterMap};
pub use util::OutputNames;

use log::info;

/// Compile register map source text.
///
/// Runs the parser, the layout calculator and the reset synthesizer in turn;
/// the first error aborts the compile.
pub fn compile(src: &str, config: &CompilerConfig) -> RegMapResult<RegisterMap> {
    config.validate()?;
    let mut registers = parse::parse_registers(src, config)?;
    let layout = Layout::compute(&registers, config)?;

    for (register, offset) in registers.iter_mut().zip(&layout.offsets) {
        register.offset = *offset;
        register.reset_word = reset::synthesize_reset_word(register, config)?;
    }

    let map = RegisterMap {
        base_address: layout.base_address,
        registers,
        register_byte_width: config.register_byte_width,
        max_offset: layout.max_offset,
    };
    info!(
        "compiled {} register(s), base address {:#x}, CNT_REG_END {}",
        map.registers.len(),
        map.base_address,
        map.cnt_reg_end()
    );
    Ok(map)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
