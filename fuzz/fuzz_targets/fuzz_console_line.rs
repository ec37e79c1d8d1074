//! Fuzz target: `LineReceiver::feed` → `parse_command`
//!
//! Drives arbitrary byte streams through the console line receiver and
//! parses every completed line in both parameter modes.  Asserts the
//! receiver never overruns its buffer and that every parsed argument
//! narrows to a storage byte without panicking.
//!
//! cargo fuzz run fuzz_console_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use smokefan::app::commands::{parse_command, truncate_to_byte};
use smokefan::app::console::{LINE_CAPACITY, LineReceiver, MAX_LINE_LEN};
use smokefan::config::ParamParsing;

fuzz_target!(|data: &[u8]| {
    let mut receiver = LineReceiver::new();
    let mut rest = data;

    loop {
        let taken = receiver.feed(rest);
        assert!(receiver.cursor() < LINE_CAPACITY, "cursor overran buffer");
        rest = &rest[taken..];

        let Some(line) = receiver.consume() else {
            break;
        };
        assert!(line.len() <= MAX_LINE_LEN, "line exceeds capacity");

        for mode in [ParamParsing::Legacy, ParamParsing::Tokenized] {
            if let Some(cmd) = parse_command(&line, mode) {
                let _ = truncate_to_byte(cmd.value());
            }
        }
    }
});
