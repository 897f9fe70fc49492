//! Moon phase and moon-art frame selection.
//!
//! The dial counts whole days since a datum new moon and folds them onto a
//! 29.53-day cycle split into eight buckets. Everything is scaled by 100 so
//! the fold is an integer modulo. The count uses 365-day years, so it slips
//! by roughly one day every four years; [`phase_drift`] measures that slip
//! against Schaefer's low-precision ephemeris (Sky & Telescope, 1985/1994).
//!
//! Phase 0 = new, 4 = full, 1..=3 waxing, 5..=7 waning.

use crate::ClockReading;
use serde::{Deserialize, Serialize};

/// Number of phase buckets.
pub const PHASE_COUNT: u8 = 8;
/// Mean synodic month length in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_2;

/// Constants for the datum-based phase count and the moon-art animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonConfig {
    /// Day-of-year of the datum new moon (leap-year table for leap years)
    pub datum_day_of_year: u16,
    pub datum_year: i32,
    /// Lunar cycle in hundredths of a day
    pub cycle_scaled: u32,
    /// Hundredths of a day per phase bucket
    pub phase_divisor: f32,
    /// Hour of day shown by animation frame 0
    pub first_frame_hour: u8,
    pub minutes_per_frame: u16,
    pub max_frame: u16,
}

impl Default for MoonConfig {
    fn default() -> Self {
        // New moon of 6 July 2024 (Perth Observatory tables): 182 + 6
        Self {
            datum_day_of_year: 188,
            datum_year: 2024,
            cycle_scaled: 2953,
            phase_divisor: 368.8,
            first_frame_hour: 17,
            minutes_per_frame: 12,
            max_frame: 75,
        }
    }
}

/// Named phase buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub fn from_index(index: u8) -> Self {
        match index % PHASE_COUNT {
            0 => MoonPhase::New,
            1 => MoonPhase::WaxingCrescent,
            2 => MoonPhase::FirstQuarter,
            3 => MoonPhase::WaxingGibbous,
            4 => MoonPhase::Full,
            5 => MoonPhase::WaningGibbous,
            6 => MoonPhase::LastQuarter,
            _ => MoonPhase::WaningCrescent,
        }
    }

    /// New and full moons are drawn as plain discs; the rest use rotated art.
    pub fn has_frames(&self) -> bool {
        !matches!(self, MoonPhase::New | MoonPhase::Full)
    }

    pub fn is_waxing(&self) -> bool {
        matches!(
            self,
            MoonPhase::WaxingCrescent | MoonPhase::FirstQuarter | MoonPhase::WaxingGibbous
        )
    }
}

/// Whole days from the datum new moon to `day_of_year` in `year`.
///
/// Years count as 365 days. Negative when the clock is before the datum.
pub fn days_since_datum(year: i32, day_of_year: u16, moon: &MoonConfig) -> i64 {
    let year_diff = (year - moon.datum_year) as i64;
    if day_of_year >= moon.datum_day_of_year {
        (day_of_year - moon.datum_day_of_year) as i64 + 365 * year_diff
    } else {
        // Wrapped past the end of the datum's year
        (365 - moon.datum_day_of_year as i64) + day_of_year as i64 + 365 * (year_diff - 1)
    }
}

/// Phase bucket 0..=7 for the clock's date.
///
/// The last day or so of a cycle rounds up to bucket 8 and is held at 7
/// rather than wrapping to new moon.
pub fn moon_phase_index(clock: &ClockReading, day_of_year: u16, moon: &MoonConfig) -> u8 {
    let days = days_since_datum(clock.year, day_of_year, moon);
    let scaled = (days * 100).rem_euclid(moon.cycle_scaled as i64);
    let bucket = (scaled as f32 / moon.phase_divisor).round();
    bucket.clamp(0.0, (PHASE_COUNT - 1) as f32) as u8
}

/// Animation frame for the rotated moon art.
///
/// Frame 0 is shown at `first_frame_hour`; the index advances every
/// `minutes_per_frame`, rounded to the nearest frame, wraps through midnight
/// and is held at `max_frame` once the night's frames run out.
pub fn moon_image_index(clock: &ClockReading, moon: &MoonConfig) -> u16 {
    let minute_of_day = clock.minute_of_day();
    let first_frame_minute = moon.first_frame_hour as u16 * 60;
    let minutes_since_first = if clock.hour >= moon.first_frame_hour {
        minute_of_day - first_frame_minute
    } else {
        (24 * 60 - first_frame_minute) + minute_of_day
    };
    let index = (minutes_since_first + moon.minutes_per_frame / 2) / moon.minutes_per_frame;
    index.min(moon.max_frame)
}

/// Phase index from Schaefer's algorithm for a proleptic-Gregorian date.
///
/// `day` can be fractional (local noon = `day + 0.5`). Accurate to about a
/// day, which is enough to judge the datum count.
pub fn ephemeris_phase_index(year: i32, month: u8, day: f64) -> u8 {
    // Jan/Feb count as months 13/14 of the previous year, then shift so Mar = 4
    let (mut y, mut m) = (year, month as i32);
    if m < 3 {
        y -= 1;
        m += 12;
    }
    m += 1;

    // Days from the 1900-01-00 12 UT new moon
    let days = (365.25 * y as f64).floor() + (30.6 * m as f64).floor() + day - 694_039.09;

    let mut cycles = days / SYNODIC_MONTH_DAYS;
    cycles -= cycles.floor();
    ((cycles * PHASE_COUNT as f64) + 0.5).floor() as u8 & (PHASE_COUNT - 1)
}

/// Datum phase against the ephemeris phase for the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDrift {
    pub datum_index: u8,
    pub ephemeris_index: u8,
    /// Circular distance between the two, 0..=4
    pub buckets: u8,
}

impl PhaseDrift {
    /// One bucket either way is within the approximation's tolerance.
    pub fn within_tolerance(&self) -> bool {
        self.buckets <= 1
    }
}

/// Compare the datum count with the ephemeris for the clock's date.
pub fn phase_drift(clock: &ClockReading, day_of_year: u16, moon: &MoonConfig) -> PhaseDrift {
    let datum_index = moon_phase_index(clock, day_of_year, moon);
    let ephemeris_index = ephemeris_phase_index(clock.year, clock.month, clock.day as f64 + 0.5);
    let forward = (datum_index + PHASE_COUNT - ephemeris_index) % PHASE_COUNT;
    PhaseDrift {
        datum_index,
        ephemeris_index,
        buckets: forward.min(PHASE_COUNT - forward),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celestial::day_of_year;
    use chrono::{Datelike, Duration, NaiveDate};

    fn clock_on(date: NaiveDate, hour: u8, minute: u8) -> ClockReading {
        ClockReading::new(
            date.year(),
            date.month() as u8,
            date.day() as u8,
            hour,
            minute,
            date.weekday().num_days_from_sunday() as u8,
        )
    }

    fn phase_on(date: NaiveDate) -> u8 {
        let clock = clock_on(date, 21, 0);
        let doy = day_of_year(clock.year, clock.month, clock.day);
        moon_phase_index(&clock, doy, &MoonConfig::default())
    }

    #[test]
    fn test_datum_is_new_moon() {
        let datum = NaiveDate::from_ymd_opt(2024, 7, 6).unwrap();
        assert_eq!(phase_on(datum), 0);
    }

    #[test]
    fn test_phase_by_elapsed_days() {
        let datum = NaiveDate::from_ymd_opt(2024, 7, 6).unwrap();
        let cases = [(1, 0), (3, 1), (15, 4), (22, 6), (29, 7), (30, 0)];
        for (days, expected) in cases {
            assert_eq!(
                phase_on(datum + Duration::days(days)),
                expected,
                "{days} days after datum"
            );
        }
    }

    #[test]
    fn test_phase_never_decreases_within_a_cycle() {
        let datum = NaiveDate::from_ymd_opt(2024, 7, 6).unwrap();
        let mut previous = 0;
        for days in 0..29 {
            let phase = phase_on(datum + Duration::days(days));
            assert!(phase >= previous, "phase went backwards on day {days}");
            assert!(phase < PHASE_COUNT);
            previous = phase;
        }
        assert_eq!(previous, 7);
    }

    #[test]
    fn test_wraparound_branch_matches_linear_count() {
        let moon = MoonConfig::default();
        // 1 Jan 2025 is 178 days on in 365-day years
        assert_eq!(days_since_datum(2025, 1, &moon), 178);
        assert_eq!(days_since_datum(2025, 188, &moon), 365);
        assert_eq!(days_since_datum(2026, 10, &moon), 365 + 187);
    }

    #[test]
    fn test_dates_before_datum_stay_in_range() {
        let moon = MoonConfig::default();
        assert_eq!(days_since_datum(2024, 180, &moon), -8);
        let clock = ClockReading::new(2024, 6, 28, 22, 0, 5);
        assert_eq!(moon_phase_index(&clock, 180, &moon), 6);

        let old = ClockReading::new(2019, 2, 1, 22, 0, 5);
        assert!(moon_phase_index(&old, 32, &moon) < PHASE_COUNT);
    }

    #[test]
    fn test_image_index_cadence() {
        let moon = MoonConfig::default();
        let frame = |hour, minute| moon_image_index(&ClockReading::new(2024, 1, 1, hour, minute, 1), &moon);
        assert_eq!(frame(17, 0), 0);
        assert_eq!(frame(17, 5), 0);
        assert_eq!(frame(17, 6), 1);
        assert_eq!(frame(23, 59), 35);
        assert_eq!(frame(0, 0), 35);
        assert_eq!(frame(8, 0), 75);
        // Past the last frame the index holds
        assert_eq!(frame(12, 0), 75);
        assert_eq!(frame(16, 59), 75);
    }

    #[test]
    fn test_named_phases() {
        assert_eq!(MoonPhase::from_index(0), MoonPhase::New);
        assert_eq!(MoonPhase::from_index(4), MoonPhase::Full);
        assert!(!MoonPhase::New.has_frames());
        assert!(!MoonPhase::Full.has_frames());
        assert!(MoonPhase::from_index(2).has_frames());
        assert!(MoonPhase::from_index(3).is_waxing());
        assert!(!MoonPhase::from_index(6).is_waxing());
    }

    #[test]
    fn test_ephemeris_agrees_on_datum() {
        assert_eq!(ephemeris_phase_index(2024, 7, 6.5), 0);
    }

    #[test]
    fn test_drift_within_one_bucket_for_two_years() {
        let moon = MoonConfig::default();
        let start = NaiveDate::from_ymd_opt(2024, 7, 6).unwrap();
        for days in 0..=730 {
            let clock = clock_on(start + Duration::days(days), 22, 0);
            let doy = day_of_year(clock.year, clock.month, clock.day);
            let drift = phase_drift(&clock, doy, &moon);
            assert!(
                drift.within_tolerance(),
                "{:?}: datum {} vs ephemeris {}",
                start + Duration::days(days),
                drift.datum_index,
                drift.ephemeris_index
            );
        }
    }
}
