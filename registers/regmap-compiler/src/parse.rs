// Licensed under the Apache-2.0 license

//! Register map parser.
//!
//! Folds the classified input lines through a two-state machine: before the
//! first register no field may appear; afterwards every continuation line
//! adds a field to the register opened most recently. Declaration order of
//! registers and fields is preserved exactly.

use crate::config::CompilerConfig;
use crate::error::{RegMapError, RegMapResult};
use crate::lexer::{classify, parse_bit_range, parse_int, tokenize, LineKind};
use crate::types::{Access, Field, Register};
use log::{debug, warn};

/// Constants every generated source defines alongside the register offsets.
pub const RESERVED_NAMES: [&str; 2] = ["CNT_REG_END", "REG_BYTE_WIDTH"];

/// Parser state carried from one line to the next.
#[derive(Debug)]
enum State {
    NoRegister,
    InRegister(Register),
}

/// Parse register map source text into registers in declaration order.
///
/// Field-level constraints (bit ordering, register width, reset value width,
/// unique names) are checked here. Offsets and reset words are left for
/// [`crate::layout`] and [`crate::reset`].
pub fn parse_registers(src: &str, config: &CompilerConfig) -> RegMapResult<Vec<Register>> {
    let mut registers = Vec::new();
    let state = src
        .lines()
        .enumerate()
        .try_fold(State::NoRegister, |state, (idx, text)| {
            step(state, idx + 1, text, config, &mut registers)
        })?;
    if let State::InRegister(register) = state {
        close_register(register, &mut registers);
    }
    if registers.is_empty() {
        return Err(RegMapError::NoRegisters);
    }
    Ok(registers)
}

fn step(
    state: State,
    line: usize,
    text: &str,
    config: &CompilerConfig,
    registers: &mut Vec<Register>,
) -> RegMapResult<State> {
    match (classify(text), state) {
        (LineKind::Blank | LineKind::Comment, state) => Ok(state),
        (LineKind::FieldContinuation, State::NoRegister) => {
            Err(RegMapError::FieldBeforeRegister { line })
        }
        (LineKind::FieldContinuation, State::InRegister(mut register)) => {
            let tokens = tokenize(text);
            if tokens.len() != 4 {
                return Err(RegMapError::MalformedLine {
                    line,
                    what: "field",
                    expected: "4 tokens",
                    found: tokens.len(),
                });
            }
            add_field(&mut register, &tokens, line, config)?;
            Ok(State::InRegister(register))
        }
        (LineKind::RegisterStart, state) => {
            if let State::InRegister(previous) = state {
                close_register(previous, registers);
            }
            let register = open_register(text, line, config, registers)?;
            Ok(State::InRegister(register))
        }
    }
}

fn open_register(
    text: &str,
    line: usize,
    config: &CompilerConfig,
    registers: &[Register],
) -> RegMapResult<Register> {
    let tokens = tokenize(text);
    if tokens.len() != 2 && tokens.len() != 6 {
        return Err(RegMapError::MalformedLine {
            line,
            what: "register",
            expected: "2 or 6 tokens",
            found: tokens.len(),
        });
    }

    let name = identifier(tokens[0], line)?;
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
    {
        return Err(RegMapError::ReservedRegisterName {
            line,
            register: name.to_string(),
        });
    }
    if let Some(first) = registers
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(name))
    {
        return Err(RegMapError::DuplicateRegister {
            line,
            register: name.to_string(),
            first_line: first.line,
        });
    }
    let address = parse_int(tokens[1], line)?;
    debug!("line {line}: register {name} at {address:#x}");

    let mut register = Register::new(name, address, line);
    if tokens.len() == 6 {
        add_field(&mut register, &tokens[2..], line, config)?;
    }
    Ok(register)
}

fn close_register(register: Register, registers: &mut Vec<Register>) {
    if register.fields.is_empty() {
        warn!(
            "line {}: register {} declares no fields, its reset word is 0",
            register.line, register.name
        );
    }
    registers.push(register);
}

/// Parse one `<name> <access> [<high>:<low>] <reset>` declaration into `register`.
fn add_field(
    register: &mut Register,
    tokens: &[&str],
    line: usize,
    config: &CompilerConfig,
) -> RegMapResult<()> {
    let name = identifier(tokens[0], line)?;
    let access = Access::from_tag(tokens[1]);
    let bit_range = parse_bit_range(tokens[2], line)?;
    let reset_value = parse_int(tokens[3], line)?;

    if bit_range.high < bit_range.low {
        return Err(RegMapError::InvertedBitRange {
            line,
            field: name.to_string(),
            high: bit_range.high,
            low: bit_range.low,
        });
    }
    if bit_range.high >= config.register_bits() {
        return Err(RegMapError::FieldOutsideRegister {
            line,
            register: register.name.clone(),
            field: name.to_string(),
            high: bit_range.high,
            register_bits: config.register_bits(),
        });
    }
    if reset_value > bit_range.max_value() {
        return Err(RegMapError::ResetValueTooWide {
            line,
            register: register.name.clone(),
            field: name.to_string(),
            value: reset_value,
            bits: bit_range.width(),
        });
    }
    if let Some(first) = register.field(name) {
        return Err(RegMapError::DuplicateField {
            line,
            register: register.name.clone(),
            field: name.to_string(),
            first_line: first.line,
        });
    }

    debug!(
        "line {line}: field {}.{name} {access} {bit_range} = {reset_value:#x}",
        register.name
    );
    register.fields.push(Field {
        name: name.to_string(),
        access,
        bit_range,
        reset_value,
        line,
    });
    Ok(())
}

fn identifier(token: &str, line: usize) -> RegMapResult<&str> {
    let mut chars = token.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(token)
    } else {
        Err(RegMapError::InvalidIdentifier {
            line,
            token: token.to_string(),
        })
    }
}
