// Licensed under the Apache-2.0 license

//! Error types for register map compilation.
//!
//! Every failure aborts the whole compile. Each variant carries the source
//! line and/or the register and field names needed to fix the input, and
//! maps onto one of the three [`ErrorKind`] categories.

use thiserror::Error;

/// Broad category of a compile failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The input is not shaped like a register map at all.
    Structural,
    /// A token or line does not match its grammar.
    Syntax,
    /// A value is well formed but violates a layout or width constraint.
    Range,
    /// The compiler was handed an unusable configuration.
    Config,
}

/// Errors produced while parsing, laying out or synthesizing a register map.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RegMapError {
    #[error("line {line}: field declared before any register")]
    FieldBeforeRegister { line: usize },

    #[error("input declares no registers")]
    NoRegisters,

    #[error("line {line}: invalid integer literal `{token}`")]
    InvalidInteger { line: usize, token: String },

    #[error("line {line}: `{token}` is not a valid identifier")]
    InvalidIdentifier { line: usize, token: String },

    #[error("line {line}: invalid bit range `{token}`, expected `[<high>:<low>]`")]
    InvalidBitRange { line: usize, token: String },

    #[error("line {line}: malformed {what} line, expected {expected} but found {found} token(s)")]
    MalformedLine {
        line: usize,
        what: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("line {line}: field `{field}` has bit range [{high}:{low}] with high < low")]
    InvertedBitRange {
        line: usize,
        field: String,
        high: u32,
        low: u32,
    },

    #[error("line {line}: reset value {value:#x} of field `{register}.{field}` does not fit in {bits} bit(s)")]
    ResetValueTooWide {
        line: usize,
        register: String,
        field: String,
        value: u64,
        bits: u32,
    },

    #[error("line {line}: field `{register}.{field}` bit {high} is outside the {register_bits}-bit register")]
    FieldOutsideRegister {
        line: usize,
        register: String,
        field: String,
        high: u32,
        register_bits: u32,
    },

    #[error("line {line}: field `{register}.{field}` overlaps field `{other}` declared on line {other_line}")]
    OverlappingFields {
        line: usize,
        register: String,
        field: String,
        other: String,
        other_line: usize,
    },

    #[error("line {line}: duplicate field `{register}.{field}` (first declared on line {first_line})")]
    DuplicateField {
        line: usize,
        register: String,
        field: String,
        first_line: usize,
    },

    #[error("line {line}: duplicate register `{register}` (first declared on line {first_line})")]
    DuplicateRegister {
        line: usize,
        register: String,
        first_line: usize,
    },

    #[error("line {line}: register name `{register}` collides with a generated constant")]
    ReservedRegisterName { line: usize, register: String },

    #[error("line {line}: register `{register}` offset {offset:#x} does not fit in 32 bits")]
    OffsetTooLarge {
        line: usize,
        register: String,
        offset: u64,
    },

    #[error("line {line}: register `{register}` at {address:#x} does not follow `{previous}` at {previous_address:#x} (addresses must increase by at least {byte_width} byte(s))")]
    AddressOrder {
        line: usize,
        register: String,
        address: u64,
        previous: String,
        previous_address: u64,
        byte_width: u8,
    },

    #[error("line {line}: register `{register}` offset {offset:#x} is not a multiple of the {byte_width}-byte register width")]
    MisalignedAddress {
        line: usize,
        register: String,
        offset: u64,
        byte_width: u8,
    },

    #[error("line {line}: reset word {reset_word:#x} of register `{register}` does not fit in {register_bits} bit(s)")]
    ResetWordTooWide {
        line: usize,
        register: String,
        reset_word: u64,
        register_bits: u32,
    },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl RegMapError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegMapError::FieldBeforeRegister { .. } | RegMapError::NoRegisters => {
                ErrorKind::Structural
            }
            RegMapError::InvalidInteger { .. }
            | RegMapError::InvalidIdentifier { .. }
            | RegMapError::InvalidBitRange { .. }
            | RegMapError::MalformedLine { .. } => ErrorKind::Syntax,
            RegMapError::InvertedBitRange { .. }
            | RegMapError::ResetValueTooWide { .. }
            | RegMapError::FieldOutsideRegister { .. }
            | RegMapError::OverlappingFields { .. }
            | RegMapError::DuplicateField { .. }
            | RegMapError::DuplicateRegister { .. }
            | RegMapError::ReservedRegisterName { .. }
            | RegMapError::OffsetTooLarge { .. }
            | RegMapError::AddressOrder { .. }
            | RegMapError::MisalignedAddress { .. }
            | RegMapError::ResetWordTooWide { .. } => ErrorKind::Range,
            RegMapError::InvalidConfig(_) => ErrorKind::Config,
        }
    }

    /// The 1-based source line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            RegMapError::NoRegisters | RegMapError::InvalidConfig(_) => None,
            RegMapError::FieldBeforeRegister { line }
            | RegMapError::InvalidInteger { line, .. }
            | RegMapError::InvalidIdentifier { line, .. }
            | RegMapError::InvalidBitRange { line, .. }
            | RegMapError::MalformedLine { line, .. }
            | RegMapError::InvertedBitRange { line, .. }
            | RegMapError::ResetValueTooWide { line, .. }
            | RegMapError::FieldOutsideRegister { line, .. }
            | RegMapError::OverlappingFields { line, .. }
            | RegMapError::DuplicateField { line, .. }
            | RegMapError::DuplicateRegister { line, .. }
            | RegMapError::ReservedRegisterName { line, .. }
            | RegMapError::OffsetTooLarge { line, .. }
            | RegMapError::AddressOrder { line, .. }
            | RegMapError::MisalignedAddress { line, .. }
            | RegMapError::ResetWordTooWide { line, .. } => Some(*line),
        }
    }
}

/// Invalid [`CompilerConfig`](crate::config::CompilerConfig) values.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("register byte width must be 1 or 2, got {0}")]
    UnsupportedByteWidth(u8),

    #[error("base alignment must be a non-zero power of two, got {0:#x}")]
    InvalidBaseAlignment(u64),

    #[error("invalid configuration file: {0}")]
    Toml(String),
}

/// Result type for register map compilation.
pub type RegMapResult<T> = std::result::Result<T, RegMapError>;
