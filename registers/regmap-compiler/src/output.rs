// Licensed under the Apache-2.0 license

//! Code generation for a compiled [`RegisterMap`].
//!
//! Two artifacts are rendered from the same model:
//!
//! ```text
//! RegisterMap ─┬─ generate_cpp()    → <stem>.cpp        offsets, storage class, reset()
//!              └─ generate_golden() → <stem>_golden.h   {offset, expected} per register
//! ```
//!
//! Both renderings are pure functions of the map, so compiling the same input
//! twice yields byte-identical files.

use crate::types::RegisterMap;
use crate::util::hex_padded;
use std::fmt::Write;

/// Minimum hex digits of an offset constant in the generated source.
const SOURCE_OFFSET_DIGITS: usize = 3;

/// Hex digits of each value in the golden table.
const GOLDEN_DIGITS: usize = 4;

/// One row of the golden-values table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoldenEntry {
    pub offset: u64,
    pub reset_word: u64,
    /// Register the row was generated from.
    pub name: String,
}

impl RegisterMap {
    /// Expected post-reset contents, one entry per register in declaration order.
    pub fn golden_entries(&self) -> Vec<GoldenEntry> {
        self.registers
            .iter()
            .map(|r| GoldenEntry {
                offset: r.offset,
                reset_word: r.reset_word,
                name: r.name.clone(),
            })
            .collect()
    }

    /// Storage cell type matching the register width.
    fn cell_type(&self) -> &'static str {
        match self.register_byte_width {
            1 => "uint8_t",
            _ => "uint16_t",
        }
    }

    /// Generate the C++ component source for this map.
    ///
    /// The output declares `CNT_REG_END`, `REG_BYTE_WIDTH` and one offset
    /// constant per register, a `class_name` component holding the register
    /// array, and a `reset(bool active)` method that loads every reset word
    /// when `active` is set.
    pub fn generate_cpp(&self, class_name: &str) -> String {
        let mut output = String::new();

        let class_upper = class_name.to_uppercase();
        writeln!(
            output,
            "// {class_upper}_APB_S BaseAddress : {:#x}",
            self.base_address
        )
        .unwrap();
        writeln!(output, "constexpr size_t CNT_REG_END = {};", self.cnt_reg_end()).unwrap();
        writeln!(
            output,
            "constexpr size_t REG_BYTE_WIDTH = {:#x};",
            self.register_byte_width
        )
        .unwrap();
        writeln!(output).unwrap();

        for reg in &self.registers {
            let name = reg.name.to_uppercase();
            let offset = hex_padded(reg.offset, SOURCE_OFFSET_DIGITS);
            writeln!(output, "constexpr size_t {name} = {offset};").unwrap();
        }
        writeln!(output).unwrap();

        writeln!(output, "class {class_name}: public vp::Component {{").unwrap();
        writeln!(output, "  public:").unwrap();
        writeln!(output, "    {class_name}(const Config& conf);").unwrap();
        writeln!(output, "    ~{class_name}() override = default;").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "    void reset(bool active);").unwrap();
        writeln!(output, "  private:").unwrap();
        writeln!(
            output,
            "    {} reg[CNT_REG_END / REG_BYTE_WIDTH + 1];",
            self.cell_type()
        )
        .unwrap();
        writeln!(output, "}};").unwrap();
        writeln!(output).unwrap();

        writeln!(output, "void {class_name}::reset(bool active) {{").unwrap();
        writeln!(output, "  if (active) {{").unwrap();
        for reg in &self.registers {
            let name = reg.name.to_uppercase();
            writeln!(
                output,
                "    reg[{name} / REG_BYTE_WIDTH] = {:#x};",
                reg.reset_word
            )
            .unwrap();
        }
        writeln!(output, "  }}").unwrap();
        writeln!(output, "}}").unwrap();

        output
    }

    /// Generate the golden-values header for this map.
    pub fn generate_golden(&self) -> String {
        let mut output = String::new();
        writeln!(output, "#pragma once").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "#include <cstdint>").unwrap();
        writeln!(output, "#include <vector>").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "struct RegInfo {{").unwrap();
        writeln!(output, "  uint32_t offset;").unwrap();
        writeln!(output, "  uint16_t expected_value;").unwrap();
        writeln!(output, "}};").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "std::vector<RegInfo> golden_regs = {{").unwrap();
        for entry in self.golden_entries() {
            writeln!(
                output,
                "  {{{}, {}}}, // {}",
                hex_padded(entry.offset, GOLDEN_DIGITS),
                hex_padded(entry.reset_word, GOLDEN_DIGITS),
                entry.name
            )
            .unwrap();
        }
        writeln!(output, "}};").unwrap();
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Register;

    fn map() -> RegisterMap {
        let mut ctrl = Register::new("ctrl", 0x4000_7002, 1);
        ctrl.offset = 0x2;
        ctrl.reset_word = 0x51;
        let mut id = Register::new("ID", 0x4000_7010, 2);
        id.offset = 0x10;
        id.reset_word = 0x1a2;
        RegisterMap {
            base_address: 0x4000_7000,
            registers: vec![ctrl, id],
            register_byte_width: 2,
            max_offset: 0x10,
        }
    }

    #[test]
    fn test_cpp_layout() {
        let code = map().generate_cpp("Uart");
        let expected = "\
// UART_APB_S BaseAddress : 0x40007000
constexpr size_t CNT_REG_END = 0x10;
constexpr size_t REG_BYTE_WIDTH = 0x2;

constexpr size_t CTRL = 0x002;
constexpr size_t ID = 0x010;

class Uart: public vp::Component {
  public:
    Uart(const Config& conf);
    ~Uart() override = default;

    void reset(bool active);
  private:
    uint16_t reg[CNT_REG_END / REG_BYTE_WIDTH + 1];
};

void Uart::reset(bool active) {
  if (active) {
    reg[CTRL / REG_BYTE_WIDTH] = 0x51;
    reg[ID / REG_BYTE_WIDTH] = 0x1a2;
  }
}
";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_cpp_byte_registers() {
        let mut map = map();
        map.register_byte_width = 1;
        let code = map.generate_cpp("Uart");
        assert!(code.contains("constexpr size_t REG_BYTE_WIDTH = 0x1;"));
        assert!(code.contains("    uint8_t reg[CNT_REG_END / REG_BYTE_WIDTH + 1];"));
    }

    #[test]
    fn test_golden_layout() {
        let golden = map().generate_golden();
        let expected = "\
#pragma once

#include <cstdint>
#include <vector>

struct RegInfo {
  uint32_t offset;
  uint16_t expected_value;
};

std::vector<RegInfo> golden_regs = {
  {0x0002, 0x0051}, // ctrl
  {0x0010, 0x01a2}, // ID
};
";
        assert_eq!(golden, expected);
    }

    #[test]
    fn test_golden_entries() {
        let entries = map().golden_entries();
        assert_eq!(
            entries[1],
            GoldenEntry {
                offset: 0x10,
                reset_word: 0x1a2,
                name: "ID".into()
            }
        );
    }
}
