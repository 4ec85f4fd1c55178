//! Hardware Resource Management
//!
//! Assigns pins and peripherals to the monitor task. Pin numbers follow the
//! reference wiring: sensor on GPIO 23, indicator LED on GPIO 2, report
//! serial port on UART0.

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// OH137 sensor input, indicator LED and report UART
    sensor_monitor: SensorMonitorResources {
        sensor_pin: PIN_23, // Digital input, pulled up so an open sensor reads high
        indicator_pin: PIN_2, // LED, driven to the inverse of the sensor level
        uart: UART0,
        uart_tx_pin: PIN_0,
        uart_rx_pin: PIN_1,
    },
}
