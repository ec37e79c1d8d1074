//! Serial line receiver.
//!
//! Assembles console input into one bounded line at a time.  The receiver
//! holds at most one completed line; while that line is waiting to be
//! consumed, no further input is read from the port, so bytes stay queued
//! in the UART driver until the next control cycle.
//!
//! Overlong input never errors.  Once the buffer is full the cursor sticks
//! at the last slot and each further byte overwrites it until a newline
//! arrives, which leaves the first 31 bytes as the line.

use heapless::Vec;

use super::ports::SerialPort;

/// Receive buffer size, including the terminator slot.
pub const LINE_CAPACITY: usize = 32;

/// Longest line handed to the command interpreter.
pub const MAX_LINE_LEN: usize = LINE_CAPACITY - 1;

const END_MARKER: u8 = b'\n';

/// One completed console line, without its newline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine {
    bytes: Vec<u8, MAX_LINE_LEN>,
}

impl CommandLine {
    /// Build a line from raw bytes, keeping at most [`MAX_LINE_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len().min(MAX_LINE_LEN);
        let mut line = Vec::new();
        // Cannot fail: `len` is bounded by the vector's capacity.
        let _ = line.extend_from_slice(&bytes[..len]);
        Self { bytes: line }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The command character, if the line has one.
    pub fn first_byte(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Longest valid UTF-8 prefix of the line, for echo and logging.
    pub fn text(&self) -> &str {
        match core::str::from_utf8(&self.bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&self.bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }
}

/// Accumulates bytes until a newline, then signals "line ready".
pub struct LineReceiver {
    buf: [u8; LINE_CAPACITY],
    cursor: usize,
    line_len: usize,
    ready: bool,
}

impl LineReceiver {
    pub fn new() -> Self {
        Self {
            buf: [0; LINE_CAPACITY],
            cursor: 0,
            line_len: 0,
            ready: false,
        }
    }

    /// Drain bytes from `port` until a line completes or input runs out.
    ///
    /// Returns the ready flag.  Reads nothing while a line is pending.
    pub fn poll(&mut self, port: &mut impl SerialPort) -> bool {
        while !self.ready {
            let Some(byte) = port.read_byte() else {
                break;
            };
            self.accept(byte);
        }
        self.ready
    }

    /// Feed bytes from a slice with the same rules as [`poll`](Self::poll).
    ///
    /// Returns how many bytes were taken; the rest were refused because a
    /// line became ready.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let mut taken = 0;
        for &byte in bytes {
            if self.ready {
                break;
            }
            self.accept(byte);
            taken += 1;
        }
        taken
    }

    /// Hand over the pending line and clear the ready flag.
    pub fn consume(&mut self) -> Option<CommandLine> {
        if !self.ready {
            return None;
        }
        self.ready = false;
        Some(CommandLine::from_bytes(&self.buf[..self.line_len]))
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Write position for the next non-newline byte.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Raw receive buffer, including stale bytes past the cursor.
    pub fn buffer(&self) -> &[u8; LINE_CAPACITY] {
        &self.buf
    }

    fn accept(&mut self, byte: u8) {
        if byte == END_MARKER {
            self.buf[self.cursor] = 0;
            self.line_len = self.cursor;
            self.cursor = 0;
            self.ready = true;
            return;
        }

        self.buf[self.cursor] = byte;
        self.cursor += 1;
        if self.cursor >= LINE_CAPACITY {
            self.cursor = LINE_CAPACITY - 1;
        }
    }
}

impl Default for LineReceiver {
    fn default() -> Self {
        Self::new()
    }
}
