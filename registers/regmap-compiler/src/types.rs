// Licensed under the Apache-2.0 license

//! Data model of a compiled register map.
//!
//! ```text
//! RegisterMap
//! ├── base_address, register_byte_width, max_offset
//! └── registers: Vec<Register>        # declaration order
//!     ├── address, offset, reset_word
//!     └── fields: Vec<Field>          # declaration order
//!         └── access, bit_range, reset_value
//! ```
//!
//! The parser produces [`Register`]s with `offset` and `reset_word` still
//! unset; [`crate::compile`] fills them in and returns an immutable
//! [`RegisterMap`].

use std::fmt;

/// Software access policy of a field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Access {
    ReadWrite,
    ReadOnly,
    WriteOnly,
    /// Any other tag, kept verbatim.
    Other(String),
}

impl Access {
    /// Interpret an access tag token. Unknown tags are preserved.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "RW" | "R/W" => Access::ReadWrite,
            "RO" | "R" => Access::ReadOnly,
            "WO" | "W" => Access::WriteOnly,
            _ => Access::Other(tag.to_string()),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::ReadWrite => write!(f, "RW"),
            Access::ReadOnly => write!(f, "RO"),
            Access::WriteOnly => write!(f, "WO"),
            Access::Other(tag) => write!(f, "{tag}"),
        }
    }
}

/// Inclusive bit range `[high:low]` within a register.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BitRange {
    pub high: u32,
    pub low: u32,
}

impl BitRange {
    pub fn new(high: u32, low: u32) -> Self {
        Self { high, low }
    }

    /// Number of bits covered. Assumes `high >= low`.
    pub fn width(&self) -> u32 {
        self.high - self.low + 1
    }

    /// Largest value that fits in this range.
    pub fn max_value(&self) -> u64 {
        match self.width() {
            w if w >= 64 => u64::MAX,
            w => (1u64 << w) - 1,
        }
    }

    /// Whether two ranges share at least one bit.
    pub fn overlaps(&self, other: &BitRange) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.high, self.low)
    }
}

/// A named bit field within a register.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    pub access: Access,
    pub bit_range: BitRange,
    pub reset_value: u64,
    /// 1-based source line of the declaration.
    pub line: usize,
}

/// One addressable register.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Register {
    pub name: String,
    /// Absolute address as written in the input.
    pub address: u64,
    /// Byte offset from the block base address.
    pub offset: u64,
    pub fields: Vec<Field>,
    /// Value held immediately after reset, folded from the fields.
    pub reset_word: u64,
    /// 1-based source line of the declaration.
    pub line: usize,
}

impl Register {
    /// A register with no fields yet. Offset and reset word are filled in by
    /// layout and reset synthesis.
    pub fn new(name: &str, address: u64, line: usize) -> Self {
        Self {
            name: name.to_string(),
            address,
            offset: 0,
            fields: Vec::new(),
            reset_word: 0,
            line,
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A fully compiled register block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterMap {
    /// Address all offsets are relative to.
    pub base_address: u64,
    /// Registers in declaration order.
    pub registers: Vec<Register>,
    /// Width of every register in bytes.
    pub register_byte_width: u8,
    /// Largest register offset.
    pub max_offset: u64,
}

impl RegisterMap {
    /// Look up a register by name (case-insensitive).
    pub fn register(&self, name: &str) -> Option<&Register> {
        self.registers
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Number of cells in the generated storage array.
    pub fn storage_cells(&self) -> u64 {
        self.max_offset / u64::from(self.register_byte_width) + 1
    }

    /// `CNT_REG_END` as it appears in generated code.
    pub fn cnt_reg_end(&self) -> String {
        format!("0x{:x}", self.max_offset)
    }
}
