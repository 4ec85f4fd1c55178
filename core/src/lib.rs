//! Hardware-independent logic for the OH137 transition test.
//!
//! The firmware crate owns the pins and the UART; everything that can be
//! exercised without hardware lives here so the tick state machine and the
//! report line formats can be unit tested on the host.
#![cfg_attr(not(test), no_std)]

pub mod monitor;
pub mod report;
