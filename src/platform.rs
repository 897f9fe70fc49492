//! Capabilities the host hands to the core.
//!
//! The core never reaches for a global: the time source, the step counter,
//! the battery gauge, the button lines and the screen actions all come in
//! through these traits. The `std` implementations here back the host
//! simulator binary.

use crate::input::Button;
use crate::navigation::Action;
use crate::ClockReading;
use chrono::{Datelike, Local, Timelike};
use std::time::Instant;

/// Real-time clock snapshot provider.
pub trait TimeSource {
    fn read(&mut self) -> ClockReading;
}

/// Monotonic millisecond counter used to time the fast-repeat loop.
pub trait Millis {
    fn now_ms(&mut self) -> u64;
}

/// Raw button line levels, sampled without debouncing.
pub trait ButtonLevels {
    /// True while the button's line reads high (pressed).
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Step counter owned by the accelerometer.
pub trait StepCounter {
    fn steps(&mut self) -> u32;
    fn reset(&mut self);
}

/// Battery gauge.
pub trait BatteryMonitor {
    fn voltage(&mut self) -> f32;
}

/// Receives the screen changes and app launches the state machine decides on.
///
/// Firmware updates and network setup are fire-and-forget from the core's
/// side; their outcome never feeds back into navigation.
pub trait ActionSink {
    fn perform(&mut self, action: Action);
}

impl ActionSink for Vec<Action> {
    fn perform(&mut self, action: Action) {
        self.push(action);
    }
}

/// Host clock backed by `chrono::Local`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn read(&mut self) -> ClockReading {
        let now = Local::now();
        ClockReading::new(
            now.year(),
            now.month() as u8,
            now.day() as u8,
            now.hour() as u8,
            now.minute() as u8,
            now.weekday().num_days_from_sunday() as u8,
        )
    }
}

/// Milliseconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemMillis {
    start: Instant,
}

impl SystemMillis {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemMillis {
    fn default() -> Self {
        Self::new()
    }
}

impl Millis for SystemMillis {
    fn now_ms(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Button lines with nothing attached; every read is released.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoButtons;

impl ButtonLevels for NoButtons {
    fn is_pressed(&mut self, _button: Button) -> bool {
        false
    }
}

/// Fixed readings for running the face without sensors.
#[derive(Debug, Clone, Copy)]
pub struct FixedSensors {
    pub steps: u32,
    pub voltage: f32,
}

impl StepCounter for FixedSensors {
    fn steps(&mut self) -> u32 {
        self.steps
    }

    fn reset(&mut self) {
        self.steps = 0;
    }
}

impl BatteryMonitor for FixedSensors {
    fn voltage(&mut self) -> f32 {
        self.voltage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut sink = Vec::new();
        sink.perform(Action::BeginFirmwareUpdate);
        sink.perform(Action::SelectListEntry { index: 2 });
        assert_eq!(
            sink,
            vec![
                Action::BeginFirmwareUpdate,
                Action::SelectListEntry { index: 2 }
            ]
        );
    }

    #[test]
    fn test_local_time_in_range() {
        let reading = LocalTime.read();
        assert!((1..=12).contains(&reading.month));
        assert!(reading.hour < 24);
        assert!(reading.weekday < 7);
    }

    #[test]
    fn test_system_millis_is_monotonic() {
        let mut millis = SystemMillis::new();
        let a = millis.now_ms();
        let b = millis.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_fixed_sensors_reset() {
        let mut sensors = FixedSensors {
            steps: 1200,
            voltage: 4.0,
        };
        sensors.reset();
        assert_eq!(sensors.steps(), 0);
        assert_eq!(sensors.voltage(), 4.0);
    }
}
