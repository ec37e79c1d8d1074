//! UART console adapter.
//!
//! Implements [`SerialPort`] on UART0 (installed by `hw_init`).  Reads are
//! non-blocking single-byte pulls from the driver's RX ring buffer; writes
//! block until the line is queued for transmit.  Lines go out with `\r\n`
//! so plain serial terminals render them correctly.
//!
//! On non-espidf targets the console is an in-memory loopback: tests push
//! input bytes and collect output lines.

use crate::app::ports::SerialPort;

#[cfg(not(target_os = "espidf"))]
use std::collections::VecDeque;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::pins;

const LINE_END: &[u8] = b"\r\n";

pub struct UartConsole {
    #[cfg(not(target_os = "espidf"))]
    input: VecDeque<u8>,
    #[cfg(not(target_os = "espidf"))]
    output: Vec<u8>,
}

impl UartConsole {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            input: VecDeque::new(),
            #[cfg(not(target_os = "espidf"))]
            output: Vec::new(),
        }
    }

    #[cfg(target_os = "espidf")]
    fn write_bytes(&mut self, bytes: &[u8]) {
        // SAFETY: the UART driver was installed by hw_init before the
        // console is used; uart_write_bytes copies out of `bytes`.
        let written = unsafe {
            uart_write_bytes(pins::UART_PORT, bytes.as_ptr() as *const _, bytes.len())
        };
        if written < 0 {
            log::warn!("UartConsole: write failed ({})", written);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    /// Queue bytes as if they had arrived on the wire.
    #[cfg(not(target_os = "espidf"))]
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    /// Bytes not yet read by the controller.
    #[cfg(not(target_os = "espidf"))]
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Everything written so far, as text.  Clears the capture.
    #[cfg(not(target_os = "espidf"))]
    pub fn take_output(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.output).into_owned();
        self.output.clear();
        text
    }
}

impl Default for UartConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialPort for UartConsole {
    #[cfg(target_os = "espidf")]
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte: u8 = 0;
        // SAFETY: single-byte read into a stack buffer with zero ticks to
        // wait, so this never blocks the control loop.
        let n = unsafe {
            uart_read_bytes(pins::UART_PORT, (&mut byte as *mut u8).cast(), 1, 0)
        };
        (n == 1).then_some(byte)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_line(&mut self, line: &str) {
        self.write_bytes(line.as_bytes());
        self.write_bytes(LINE_END);
    }
}
