//! Console command parsing.
//!
//! A command is one character, optionally followed by a numeric argument:
//!
//! | char | opcode        | argument |
//! |------|---------------|----------|
//! | `h`  | Help          | —        |
//! | `s`  | ShowSensors   | —        |
//! | `n`  | ShowMemory    | —        |
//! | `i`  | SetMin        | speed    |
//! | `a`  | SetMax        | speed    |
//!
//! Anything else is not a command and is dropped without a reply.
//! Arguments are parsed permissively: garbage reads as 0, and the value
//! is only narrowed to a byte by [`truncate_to_byte`] at the store.

use crate::config::ParamParsing;

use super::console::CommandLine;

/// Byte window used by [`ParamParsing::Legacy`].
const LEGACY_PARAM_WINDOW: core::ops::Range<usize> = 2..6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Help,
    ShowSensors,
    ShowMemory,
    SetMin,
    SetMax,
}

impl Opcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'h' => Some(Self::Help),
            b's' => Some(Self::ShowSensors),
            b'n' => Some(Self::ShowMemory),
            b'i' => Some(Self::SetMin),
            b'a' => Some(Self::SetMax),
            _ => None,
        }
    }

    /// Whether the opcode consumes a numeric argument.
    pub fn takes_parameter(self) -> bool {
        matches!(self, Self::SetMin | Self::SetMax)
    }
}

/// A recognised console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommand {
    pub opcode: Opcode,
    /// Numeric argument, `None` when the line carried no argument text.
    /// Always `None` for opcodes that take no argument.
    pub parameter: Option<i32>,
}

impl ParsedCommand {
    /// Argument value with a missing argument read as 0.
    pub fn value(&self) -> i32 {
        self.parameter.unwrap_or(0)
    }
}

/// Parse one console line.  Returns `None` for empty lines and unknown
/// command characters.
pub fn parse_command(line: &CommandLine, mode: ParamParsing) -> Option<ParsedCommand> {
    let opcode = Opcode::from_byte(line.first_byte()?)?;
    let parameter = if opcode.takes_parameter() {
        let text = match mode {
            ParamParsing::Legacy => legacy_window(line.as_bytes()),
            ParamParsing::Tokenized => first_token(line.as_bytes()),
        };
        (!text.is_empty()).then(|| parse_leading_int(text))
    } else {
        None
    };
    Some(ParsedCommand { opcode, parameter })
}

/// Bytes `[2, 6)` of the line, clipped to its length.
fn legacy_window(bytes: &[u8]) -> &[u8] {
    let end = LEGACY_PARAM_WINDOW.end.min(bytes.len());
    let start = LEGACY_PARAM_WINDOW.start.min(end);
    &bytes[start..end]
}

/// First whitespace-delimited token after the command character.
fn first_token(bytes: &[u8]) -> &[u8] {
    let rest = bytes.get(1..).unwrap_or_default();
    let start = rest
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(rest.len());
    let rest = &rest[start..];
    let end = rest
        .iter()
        .position(u8::is_ascii_whitespace)
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Parse a leading decimal integer the way C `atol` does.
///
/// Leading whitespace and one sign character are accepted; parsing stops at
/// the first non-digit.  No digits at all yields 0.  Magnitudes beyond
/// `i32` saturate.
pub fn parse_leading_int(bytes: &[u8]) -> i32 {
    let mut iter = bytes
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();

    let negative = match iter.peek() {
        Some(b'-') => {
            iter.next();
            true
        }
        Some(b'+') => {
            iter.next();
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    for byte in iter.take_while(u8::is_ascii_digit) {
        let digit = i32::from(byte - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Narrow a console argument to a storage byte, keeping the low 8 bits.
///
/// This is the single place where out-of-range speeds are resolved:
/// 256 stores as 0, 300 as 44, -1 as 255.
pub fn truncate_to_byte(value: i32) -> u8 {
    value.rem_euclid(256) as u8
}
