//! OH137 transition test firmware entry point
//!
//! Initializes the RP2350 and spawns the sensor monitor task.

#![no_std]
#![no_main]

use crate::task::monitor_transitions::monitor_transitions;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{AssignedResources, SensorMonitorResources};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    let r = split_resources!(p);

    // The monitor owns all of its resources and runs until power-off; there
    // is nothing else to spawn.
    spawner.spawn(monitor_transitions(r.sensor_monitor)).unwrap();
}
