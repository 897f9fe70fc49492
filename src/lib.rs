//! # Chronometer Watch Face Core Library
//!
//! This library holds the logic behind a circular sun/moon dial watch face for a
//! 200×200 e-paper watch. The display, real-time clock, step counter and firmware
//! update machinery belong to the host; this crate decides *what* to draw and
//! *where*, and *which screen* a button press leads to.
//!
//! ## Subsystems
//!
//! ### Celestial Position Engine
//! - **Day/night arc**: a per-day-of-year lookup table ([`lookups`]) gives two
//!   concentric circles whose difference paints the day/night boundary
//! - **Sun/moon marker**: the marker rides a 24-hour track, angle 0 at 06:00,
//!   placed with [`celestial::marker_position`]
//! - **Moon phase**: eight buckets counted from a datum new moon ([`lunar`])
//!
//! ### Navigation State Machine
//! - **Wake events**: one button per wake, decoded from the wakeup bitmask ([`input`])
//! - **Transitions**: watch face, main menu, list, app and firmware update
//!   screens ([`navigation`])
//! - **Fast repeat**: a bounded polling loop that keeps scrolling responsive
//!   without a sleep/wake cycle per press
//!
//! ## Data Flow
//! 1. Host wakes and hands the wakeup mask to [`navigation::Navigator`]
//! 2. The resulting [`navigation::Action`] goes to the host's [`platform::ActionSink`]
//! 3. When the watch face is redrawn, [`celestial::compute`] turns a [`ClockReading`]
//!    into a [`CelestialState`] and [`face::draw_watch_face`] paints it
//! 4. [`navigation::UiState`] is written back through a [`storage::StateStore`]

use serde::{Deserialize, Serialize};

pub mod celestial;
pub mod config;
pub mod face;
pub mod framebuffer;
pub mod input;
pub mod lookups;
pub mod lunar;
pub mod navigation;
pub mod platform;
pub mod storage;

/// Snapshot of the real-time clock.
///
/// Owned by the host's time source and handed to the core by value; the core
/// never assumes it is live. `year` is the full calendar year (e.g. 2024),
/// `weekday` counts from Sunday = 0.
///
/// # Example
/// ```
/// use chronometer_lib::ClockReading;
///
/// let reading = ClockReading::new(2024, 7, 6, 18, 30, 6);
/// assert_eq!(reading.minute_of_day(), 1110);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockReading {
    pub year: i32,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    /// 0..=6, Sunday first
    pub weekday: u8,
}

impl ClockReading {
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, weekday: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            weekday,
        }
    }

    /// Minutes since local midnight (0..1440).
    pub fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// True exactly at 00:00, when the step counter rolls over.
    pub fn is_midnight(&self) -> bool {
        self.hour == 0 && self.minute == 0
    }
}

/// One row of the day/night lookup table.
///
/// `center` and `radius` describe the boundary circle in screen pixels: the
/// circle is centred on the vertical axis at `y = center` (which can be far
/// outside the display or negative). `sunrise_minute` and `sunset_minute`
/// are local minutes since midnight, with `sunrise_minute < sunset_minute`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub center: i32,
    pub radius: i32,
    pub sunrise_minute: u16,
    pub sunset_minute: u16,
}

impl DayRecord {
    pub const fn new(center: i32, radius: i32, sunrise_minute: u16, sunset_minute: u16) -> Self {
        Self {
            center,
            radius,
            sunrise_minute,
            sunset_minute,
        }
    }

    /// Length of daylight in minutes.
    pub fn day_length(&self) -> u16 {
        self.sunset_minute - self.sunrise_minute
    }
}

/// Everything the renderer needs to place the sun/moon art for one frame.
///
/// Recomputed on every watch-face draw and never persisted.
///
/// - `marker_x`/`marker_y`: top-left corner of the sun-sized frame on the track
/// - `moon_x`/`moon_y`: top-left corner of the smaller moon art on the same angle
/// - `moon_phase_index`: 0 = new, 4 = full, 1..=3 waxing, 5..=7 waning
/// - `moon_image_index`: animation frame for the rotated moon art
///
/// The moon fields are filled in regardless of `is_daytime`; the renderer only
/// reads them at night.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CelestialState {
    pub day_of_year: u16,
    pub is_daytime: bool,
    pub marker_angle_rad: f32,
    pub marker_x: i32,
    pub marker_y: i32,
    pub moon_x: i32,
    pub moon_y: i32,
    pub moon_phase_index: u8,
    pub moon_image_index: u16,
}
