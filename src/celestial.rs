//! # Celestial Position Engine
//!
//! Maps wall-clock time and day-of-year onto the dial:
//!
//! - **Day/night arc**: two same-radius circles from the lookup table whose
//!   difference paints a thin ring segment along the day/night boundary
//! - **Marker track**: a 24-hour circle just inside the border, angle 0 at
//!   06:00, advancing as the minutes advance
//! - **Day or night**: a half-open sunrise/sunset interval
//!
//! Screen Y grows downward, so the sine term is subtracted when projecting
//! onto the display. None of these functions allocate or perform I/O.

use crate::config::Config;
use crate::lookups::{self, MONTH_START_DAY, MONTH_START_DAY_LEAP_YEAR};
use crate::{lunar, CelestialState, ClockReading, DayRecord};
use core::f32::consts::TAU;
use serde::{Deserialize, Serialize};

/// Minutes in a day, as a float for the angle maths.
pub const MINUTES_PER_DAY: f32 = 1440.0;

/// Fixed dial dimensions, in pixels unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceGeometry {
    pub width: i32,
    pub height: i32,
    /// Width of the outer ring the marker rides on
    pub border_thickness: i32,
    /// Width of the day/night boundary ring segment
    pub day_night_thickness: i32,
    /// Square sun art, also the frame the moon border is drawn in
    pub sun_icon_size: i32,
    /// Square moon art
    pub moon_icon_size: i32,
    /// Minute of day that maps to angle 0 (06:00)
    pub zero_minute: u16,
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            border_thickness: 4,
            day_night_thickness: 3,
            sun_icon_size: 65,
            moon_icon_size: 32,
            zero_minute: 360,
        }
    }
}

impl FaceGeometry {
    pub fn center_x(&self) -> i32 {
        self.width / 2
    }

    pub fn center_y(&self) -> i32 {
        self.height / 2
    }

    /// Radius of the marker track: the middle of the border ring.
    pub fn border_radius(&self) -> i32 {
        self.height / 2 - self.border_thickness / 2
    }
}

/// Circle parameters for the day/night boundary.
///
/// The renderer fills a circle at (`center_x`, `center`) in the foreground
/// colour, then a circle at (`center_x`, `mask_center`) of the same radius
/// in the background colour. What survives is the boundary arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayNightArc {
    pub center: i32,
    pub radius: i32,
    pub mask_center: i32,
}

/// Where the marker sits on the track for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPosition {
    pub angle_rad: f32,
    pub x: i32,
    pub y: i32,
}

/// 1-based day-of-year using the month-start tables.
///
/// Leap years are every fourth year with no century correction, which is
/// exact from 1901 to 2099. The date must be valid; the result is
/// unspecified otherwise.
pub fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    let table = if year % 4 == 0 {
        &MONTH_START_DAY_LEAP_YEAR
    } else {
        &MONTH_START_DAY
    };
    table[month as usize] + day as u16
}

/// Boundary circles for a day-of-year.
///
/// The mask circle is pushed away from the display on the side the circle
/// centre already lies, so it always erases the interior and leaves the arc
/// facing the dial centre.
pub fn day_night_arc(day_of_year: u16, thickness: i32) -> DayNightArc {
    let record = lookups::day_record(day_of_year);
    let mask_center = if record.center > 0 {
        record.center + thickness
    } else {
        record.center - thickness
    };
    DayNightArc {
        center: record.center,
        radius: record.radius,
        mask_center,
    }
}

/// Project the time of day onto the marker track.
///
/// `icon_size` is the side of the square art being placed; the returned
/// coordinates are its top-left corner, rounded to the nearest pixel.
pub fn marker_position(clock: &ClockReading, geometry: &FaceGeometry, icon_size: i32) -> MarkerPosition {
    let angle = track_angle(clock.minute_of_day(), geometry.zero_minute);
    let radius = geometry.border_radius() as f32;
    let x = geometry.center_x() as f32 + radius * angle.cos() - (icon_size / 2) as f32;
    let y = geometry.center_y() as f32 - radius * angle.sin() - (icon_size / 2) as f32;
    MarkerPosition {
        angle_rad: angle,
        x: x.round() as i32,
        y: y.round() as i32,
    }
}

/// Angle in radians of a minute-of-day on the 24-hour track.
pub fn track_angle(minute_of_day: u16, zero_minute: u16) -> f32 {
    (minute_of_day as f32 - zero_minute as f32) / MINUTES_PER_DAY * TAU
}

/// Daylight is `sunrise <= now < sunset`; the sunset minute itself is night.
pub fn is_daytime(current_minute: u16, sunrise_minute: u16, sunset_minute: u16) -> bool {
    current_minute >= sunrise_minute && current_minute < sunset_minute
}

/// Full celestial state for one watch-face draw.
pub fn compute(clock: &ClockReading, config: &Config) -> CelestialState {
    let geometry = &config.face;
    let day_of_year = day_of_year(clock.year, clock.month, clock.day);
    let record: &DayRecord = lookups::day_record(day_of_year);

    let sun = marker_position(clock, geometry, geometry.sun_icon_size);
    let moon = marker_position(clock, geometry, geometry.moon_icon_size);

    CelestialState {
        day_of_year,
        is_daytime: is_daytime(clock.minute_of_day(), record.sunrise_minute, record.sunset_minute),
        marker_angle_rad: sun.angle_rad,
        marker_x: sun.x,
        marker_y: sun.y,
        moon_x: moon.x,
        moon_y: moon.y,
        moon_phase_index: lunar::moon_phase_index(clock, day_of_year, &config.moon),
        moon_image_index: lunar::moon_image_index(clock, &config.moon),
    }
}
