// Licensed under the Apache-2.0 license

//! Line classification and token grammars for the register map text format.
//!
//! ```text
//! <name> <address> <field> <access> [<high>:<low>] <reset>
//!   <field> <access> [<high>:<low>] <reset>    # continuation
//! ```
//!
//! Indentation alone separates a new register from a continuation field line;
//! its width does not matter.

use crate::error::{RegMapError, RegMapResult};
use crate::types::BitRange;
use winnow::ascii::{digit1, hex_digit1};
use winnow::combinator::{alt, delimited, preceded, separated_pair};
use winnow::prelude::*;
use winnow::ModalResult;

/// Classification of one raw input line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineKind {
    Blank,
    Comment,
    /// Non-indented line opening a new register.
    RegisterStart,
    /// Indented line adding a field to the open register.
    FieldContinuation,
}

/// Classify a raw line, leading whitespace included.
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with('#') {
        LineKind::Comment
    } else if trimmed.len() != line.len() {
        LineKind::FieldContinuation
    } else {
        LineKind::RegisterStart
    }
}

/// Split a line into whitespace-separated tokens, dropping any trailing
/// `#` comment.
pub fn tokenize(line: &str) -> Vec<&str> {
    let code = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    code.split_whitespace().collect()
}

fn hex_literal(input: &mut &str) -> ModalResult<u64> {
    preceded(alt(("0x", "0X")), hex_digit1)
        .try_map(|digits: &str| u64::from_str_radix(digits, 16))
        .parse_next(input)
}

fn dec_literal(input: &mut &str) -> ModalResult<u64> {
    digit1.try_map(str::parse::<u64>).parse_next(input)
}

fn int_literal(input: &mut &str) -> ModalResult<u64> {
    alt((hex_literal, dec_literal)).parse_next(input)
}

fn bit_index(input: &mut &str) -> ModalResult<u32> {
    digit1.try_map(str::parse::<u32>).parse_next(input)
}

fn bit_range(input: &mut &str) -> ModalResult<(u32, u32)> {
    delimited('[', separated_pair(bit_index, ':', bit_index), ']').parse_next(input)
}

/// Parse a decimal or `0x`-prefixed hexadecimal integer token.
pub fn parse_int(token: &str, line: usize) -> RegMapResult<u64> {
    int_literal
        .parse(token)
        .map_err(|_| RegMapError::InvalidInteger {
            line,
            token: token.to_string(),
        })
}

/// Parse a `[<high>:<low>]` token. Ordering of the bounds is not checked here.
pub fn parse_bit_range(token: &str, line: usize) -> RegMapResult<BitRange> {
    bit_range
        .parse(token)
        .map(|(high, low)| BitRange::new(high, low))
        .map_err(|_| RegMapError::InvalidBitRange {
            line,
            token: token.to_string(),
        })
}
