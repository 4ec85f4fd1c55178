//! Sensor transition monitor
//!
//! Turns a stream of raw digital samples into timestamped transition events
//! plus idle heartbeats.
//!
//! # Operation
//! - Caller samples the sensor pin at a fixed cadence and feeds each sample
//!   to [`Monitor::tick`] together with a monotonic millisecond timestamp
//! - A sample differing from the last known level produces a transition event
//! - With no change for [`IDLE_THRESHOLD_MS`], a heartbeat event is produced
//!   and the idle window restarts, so heartbeats repeat while idle
//!
//! Debounce is purely the sampling cadence ([`TICK_INTERVAL_MS`]); the OH137
//! produces clean logic levels, so no voting or hysteresis is applied.

use defmt::Format;

/// Time between samples (ms). The inter-tick delay is also the debounce.
pub const TICK_INTERVAL_MS: u64 = 10;

/// Idle time after which a heartbeat is emitted (ms)
pub const IDLE_THRESHOLD_MS: u64 = 5000;

/// Logic level sampled from the sensor pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum SensorLevel {
    Low,
    High,
}

impl SensorLevel {
    /// Level as the 0/1 digit used in report lines
    pub fn as_bit(self) -> u8 {
        match self {
            SensorLevel::Low => 0,
            SensorLevel::High => 1,
        }
    }

    /// Opposite level. The indicator LED is driven to the inverse of the
    /// sensor level; the polarity is wiring-dependent, so the contract is
    /// strictly "indicator = NOT sensor", nothing more.
    pub fn inverse(self) -> SensorLevel {
        match self {
            SensorLevel::Low => SensorLevel::High,
            SensorLevel::High => SensorLevel::Low,
        }
    }
}

impl From<bool> for SensorLevel {
    fn from(is_high: bool) -> Self {
        if is_high {
            SensorLevel::High
        } else {
            SensorLevel::Low
        }
    }
}

/// Events produced by the monitor, one per tick at most
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum MonitorEvent {
    /// Level changed between two consecutive samples
    Transition {
        /// Running transition number, starting at 1
        sequence: u32,
        /// Monotonic time of the sample that observed the change
        timestamp_ms: u64,
        /// Level the sensor changed to
        level: SensorLevel,
    },
    /// No change for the idle threshold
    Heartbeat {
        /// Monotonic time of the sample that noticed the idle window expired
        timestamp_ms: u64,
        /// Level the sensor has been holding
        level: SensorLevel,
    },
}

/// Monitor configuration with defaults matching the reference firmware
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Idle time before a heartbeat (ms), default [`IDLE_THRESHOLD_MS`]
    pub idle_threshold_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            idle_threshold_ms: IDLE_THRESHOLD_MS,
        }
    }
}

/// State carried across ticks
///
/// `last_level` starts as `None` so the very first sample always reports a
/// transition, whatever the level.
pub struct Monitor {
    config: MonitorConfig,
    last_level: Option<SensorLevel>,
    last_activity_ms: u64,
    transitions: u32,
}

impl Monitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            last_level: None,
            last_activity_ms: 0,
            transitions: 0,
        }
    }

    /// Total transitions observed since start. Wraps at `u32::MAX`.
    pub fn transition_count(&self) -> u32 {
        self.transitions
    }

    /// Classifies one sample. Returns at most one event.
    ///
    /// `now_ms` must come from a monotonic clock; the idle-window arithmetic
    /// uses wrapping subtraction so counter rollover is tolerated. Never
    /// fails and has no side effects beyond the monitor's own state; driving
    /// the indicator from a returned transition is the caller's job.
    pub fn tick(&mut self, now_ms: u64, level: SensorLevel) -> Option<MonitorEvent> {
        if self.last_level != Some(level) {
            self.transitions = self.transitions.wrapping_add(1);
            self.last_level = Some(level);
            self.last_activity_ms = now_ms;
            return Some(MonitorEvent::Transition {
                sequence: self.transitions,
                timestamp_ms: now_ms,
                level,
            });
        }

        if now_ms.wrapping_sub(self.last_activity_ms) >= self.config.idle_threshold_ms {
            self.last_activity_ms = now_ms;
            return Some(MonitorEvent::Heartbeat {
                timestamp_ms: now_ms,
                level,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SensorLevel::{High, Low};

    fn monitor() -> Monitor {
        Monitor::new(MonitorConfig::default())
    }

    /// Feeds samples at 10ms cadence and collects emitted events
    fn run(monitor: &mut Monitor, samples: &[(u64, SensorLevel)]) -> Vec<MonitorEvent> {
        samples
            .iter()
            .filter_map(|&(now_ms, level)| monitor.tick(now_ms, level))
            .collect()
    }

    #[test]
    fn first_sample_always_reports_a_transition() {
        for initial in [Low, High] {
            let mut m = monitor();
            let event = m.tick(0, initial);
            assert_eq!(
                event,
                Some(MonitorEvent::Transition {
                    sequence: 1,
                    timestamp_ms: 0,
                    level: initial,
                })
            );
        }
    }

    #[test]
    fn unchanged_level_emits_nothing_before_the_idle_threshold() {
        let mut m = monitor();
        m.tick(0, High);
        for t in (10..5000).step_by(10) {
            assert_eq!(m.tick(t, High), None);
        }
        assert_eq!(m.transition_count(), 1);
    }

    #[test]
    fn transition_count_matches_number_of_level_changes() {
        let mut m = monitor();
        let levels = [High, High, Low, High, High, High, Low, Low];
        for (i, &level) in levels.iter().enumerate() {
            m.tick(i as u64 * 10, level);
        }
        // first sample counts, then every change from the previous sample
        assert_eq!(m.transition_count(), 4);
    }

    #[test]
    fn transition_events_carry_sequence_timestamp_and_new_level() {
        let mut m = monitor();
        m.tick(0, Low);
        let event = m.tick(10, High);
        assert_eq!(
            event,
            Some(MonitorEvent::Transition {
                sequence: 2,
                timestamp_ms: 10,
                level: High,
            })
        );
    }

    #[test]
    fn indicator_level_is_the_inverse_of_the_sensor_level() {
        assert_eq!(High.inverse(), Low);
        assert_eq!(Low.inverse(), High);
    }

    #[test]
    fn heartbeat_fires_exactly_at_the_idle_threshold() {
        let mut m = monitor();
        m.tick(20, Low);
        assert_eq!(m.tick(5010, Low), None);
        assert_eq!(
            m.tick(5020, Low),
            Some(MonitorEvent::Heartbeat {
                timestamp_ms: 5020,
                level: Low,
            })
        );
    }

    #[test]
    fn no_heartbeat_within_the_threshold_of_a_transition() {
        let mut m = monitor();
        m.tick(0, High);
        // transition at 4990 restarts the idle window
        m.tick(4990, Low);
        for t in (5000..9990).step_by(10) {
            assert_eq!(m.tick(t, Low), None);
        }
        assert!(matches!(
            m.tick(9990, Low),
            Some(MonitorEvent::Heartbeat { .. })
        ));
    }

    #[test]
    fn heartbeats_repeat_every_threshold_while_idle() {
        // spec scenario: constant level for 12 seconds
        let mut m = monitor();
        let mut heartbeats = Vec::new();
        for t in (0..=12_000).step_by(10) {
            match m.tick(t, High) {
                Some(MonitorEvent::Heartbeat { timestamp_ms, level }) => {
                    heartbeats.push((timestamp_ms, level));
                }
                Some(MonitorEvent::Transition { timestamp_ms, .. }) => {
                    assert_eq!(timestamp_ms, 0);
                }
                None => {}
            }
        }
        assert_eq!(m.transition_count(), 1);
        assert_eq!(heartbeats, vec![(5000, High), (10_000, High)]);
    }

    #[test]
    fn heartbeat_does_not_touch_the_transition_count() {
        let mut m = monitor();
        m.tick(0, Low);
        m.tick(5000, Low);
        m.tick(10_000, Low);
        assert_eq!(m.transition_count(), 1);
    }

    #[test]
    fn mixed_sequence_from_reference_trace() {
        // [HIGH, HIGH, LOW, LOW, LOW] at [0, 10, 20, 30, 5020]
        let mut m = monitor();
        let events = run(
            &mut m,
            &[(0, High), (10, High), (20, Low), (30, Low), (5020, Low)],
        );
        assert_eq!(
            events,
            vec![
                MonitorEvent::Transition {
                    sequence: 1,
                    timestamp_ms: 0,
                    level: High,
                },
                MonitorEvent::Transition {
                    sequence: 2,
                    timestamp_ms: 20,
                    level: Low,
                },
                MonitorEvent::Heartbeat {
                    timestamp_ms: 5020,
                    level: Low,
                },
            ]
        );
    }

    #[test]
    fn idle_window_arithmetic_survives_clock_rollover() {
        let mut m = monitor();
        m.tick(u64::MAX - 1000, High);
        // 4000ms past rollover, 5001ms since the transition
        assert!(matches!(
            m.tick(4000, High),
            Some(MonitorEvent::Heartbeat { .. })
        ));
    }

    #[test]
    fn custom_idle_threshold_is_honored() {
        let mut m = Monitor::new(MonitorConfig {
            idle_threshold_ms: 100,
        });
        m.tick(0, Low);
        assert_eq!(m.tick(90, Low), None);
        assert!(matches!(
            m.tick(100, Low),
            Some(MonitorEvent::Heartbeat { .. })
        ));
    }
}
