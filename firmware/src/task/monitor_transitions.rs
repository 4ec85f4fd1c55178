//! Sensor transition monitoring
//!
//! Samples the OH137 sensor at a fixed cadence and reports every level
//! transition on the serial report stream, plus a heartbeat line when the
//! level has not changed for 5 seconds.
//!
//! # Operation
//! - Sensor input uses a pull-up, so an open or unconnected sensor reads high
//! - The fixed 10ms inter-sample delay is the entire debounce; the OH137
//!   produces clean logic levels once past its own internal hysteresis
//! - The indicator LED is driven to the inverse of the sensor level on every
//!   transition
//! - Report lines go out over UART0 at 230400 baud; defmt carries the same
//!   events on the debug channel

use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::{Duration, Instant, Timer};
use oh137_monitor_core::monitor::{
    Monitor, MonitorConfig, MonitorEvent, SensorLevel, TICK_INTERVAL_MS,
};
use oh137_monitor_core::report;

use crate::system::resources::SensorMonitorResources;

/// Time between sensor samples; also the debounce
const TICK_INTERVAL: Duration = Duration::from_millis(TICK_INTERVAL_MS);

/// Settle pause between peripheral init and the banner (lets the host side
/// open the port before the first line)
const STARTUP_SETTLE: Duration = Duration::from_millis(1000);

/// Report stream baud rate
const REPORT_BAUDRATE: u32 = 230_400;

/// Write adapter from the formatted report lines onto the blocking UART.
///
/// A failed serial write cannot be acted on at this layer; the monitor keeps
/// sampling regardless, so errors are swallowed here.
struct ReportSink<T: embedded_io::Write> {
    port: T,
}

impl<T: embedded_io::Write> core::fmt::Write for ReportSink<T> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let _ = self.port.write_all(s.as_bytes());
        Ok(())
    }
}

fn gpio_level(level: SensorLevel) -> Level {
    match level {
        SensorLevel::Low => Level::Low,
        SensorLevel::High => Level::High,
    }
}

/// Main monitor task: sample, classify, report, forever
#[embassy_executor::task]
pub async fn monitor_transitions(r: SensorMonitorResources) {
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = REPORT_BAUDRATE;
    let uart = Uart::new_blocking(r.uart, r.uart_tx_pin, r.uart_rx_pin, uart_config);
    let mut sink = ReportSink { port: uart };

    let sensor = Input::new(r.sensor_pin, Pull::Up);
    // Initial indicator level is arbitrary; the first tick always reports a
    // transition and drives it to the inverse of the sampled level.
    let mut indicator = Output::new(r.indicator_pin, Level::Low);

    Timer::after(STARTUP_SETTLE).await;
    let _ = report::write_banner(&mut sink);
    defmt::info!("OH137 transition test started");

    let mut monitor = Monitor::new(MonitorConfig::default());

    loop {
        let now_ms = Instant::now().as_millis();
        let level = SensorLevel::from(sensor.is_high());

        match monitor.tick(now_ms, level) {
            Some(event @ MonitorEvent::Transition { sequence, level, .. }) => {
                indicator.set_level(gpio_level(level.inverse()));
                defmt::info!("transition #{} to {}", sequence, level);
                let _ = report::write_event(&mut sink, &event);
            }
            Some(event @ MonitorEvent::Heartbeat { level, .. }) => {
                defmt::info!("idle, level held at {}", level);
                let _ = report::write_event(&mut sink, &event);
            }
            None => {}
        }

        Timer::after(TICK_INTERVAL).await;
    }
}
