//! Report stream serialization
//!
//! Formats monitor events as the single-line records the transition test
//! prints on its serial port. Generic over [`core::fmt::Write`] so the
//! firmware's UART sink and host tests share the same formatting code.
//! Line formats are fixed; downstream tooling greps for them.

use core::fmt::{self, Write};

use crate::monitor::MonitorEvent;

/// Startup banner, printed once after the post-init settle pause
pub const BANNER: &str = "\nOH137 Transition Test\n--------------------\n";

/// Writes the startup banner
pub fn write_banner<W: Write>(out: &mut W) -> fmt::Result {
    out.write_str(BANNER)
}

/// Writes the single-line record for one event
pub fn write_event<W: Write>(out: &mut W, event: &MonitorEvent) -> fmt::Result {
    match *event {
        MonitorEvent::Transition {
            sequence,
            timestamp_ms,
            level,
        } => write!(
            out,
            "Transition #{} at {}ms - State changed to: {}\n",
            sequence,
            timestamp_ms,
            level.as_bit()
        ),
        // The heartbeat line does not carry the timestamp; the event does,
        // for the debug log and for tests.
        MonitorEvent::Heartbeat { level, .. } => write!(
            out,
            "No changes in 5s. Current state: {}\n",
            level.as_bit()
        ),
    }
}
