//! # Watch Face Rendering
//!
//! Paints one watch-face frame from a [`CelestialState`] and the persisted
//! [`UiState`] flags onto any `embedded-graphics` target, plus an ASCII
//! preview of a [`FrameBuffer`] for running on a desktop.
//!
//! Draw order matters on the 1-bit panel:
//! 1. Background fill in the theme's background colour
//! 2. Day/night boundary arc and the sun or moon marker (analogue mode only)
//! 3. Corner mask and the border ring the marker rides on
//! 4. Digital time and date (digital mode only)
//! 5. Step count and battery segments (when stats are shown)
//!
//! The default theme is light art on a black face; dark mode inverts it.
//! Sun, moon and icon bitmaps belong to the firmware image, so simple
//! primitives of the same size stand in for them here.

use crate::celestial::{self, FaceGeometry};
use crate::config::Config;
use crate::framebuffer::FrameBuffer;
use crate::lunar::MoonPhase;
use crate::navigation::UiState;
use crate::platform::{BatteryMonitor, StepCounter};
use crate::{CelestialState, ClockReading};
use core::f32::consts::FRAC_PI_2;
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{
        Circle, PointsIter, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
    },
    text::{Alignment, Text},
};

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Battery icon layout
const BATTERY_WIDTH: i32 = 37;
const BATTERY_HEIGHT: i32 = 21;
const BATTERY_TOP: i32 = 20;
const SEGMENT_WIDTH: u32 = 7;
const SEGMENT_HEIGHT: u32 = 11;
const SEGMENT_SPACING: i32 = 9;

// Step icon layout
const STEP_ICON_WIDTH: i32 = 19;
const STEP_ICON_HEIGHT: i32 = 23;
const STEP_TOP: i32 = 50;

/// Map battery voltage to the number of filled segments (0..=3).
pub fn battery_level(volts: f32) -> u8 {
    if volts > 4.10 {
        3
    } else if volts > 3.95 {
        2
    } else if volts > 3.80 {
        1
    } else {
        0
    }
}

/// Foreground and background colours for the theme.
///
/// `On` is black ink on the panel.
pub fn palette(dark_mode: bool) -> (BinaryColor, BinaryColor) {
    if dark_mode {
        (BinaryColor::On, BinaryColor::Off)
    } else {
        (BinaryColor::Off, BinaryColor::On)
    }
}

/// Render the watch face.
///
/// The step counter is reset before it is read when the clock shows
/// exactly midnight, whether or not stats are on screen.
pub fn draw_watch_face<D, S>(
    display: &mut D,
    clock: &ClockReading,
    celestial_state: &CelestialState,
    ui: &UiState,
    config: &Config,
    sensors: &mut S,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
    S: StepCounter + BatteryMonitor,
{
    let geometry = &config.face;
    let (fg, bg) = palette(ui.dark_mode);

    if clock.is_midnight() {
        sensors.reset();
    }

    display.clear(bg)?;

    if !ui.show_digital_time {
        draw_day_night_arc(display, celestial_state.day_of_year, geometry, fg)?;
        draw_marker(display, celestial_state, config, fg)?;
    }

    draw_masks(display, geometry, fg, bg)?;

    if ui.show_digital_time {
        draw_digital_time(display, clock, geometry, fg)?;
        draw_date(display, clock, geometry, fg)?;
    }

    if ui.show_stats {
        let steps = sensors.steps();
        draw_steps(display, steps, geometry, fg)?;
        draw_battery(display, battery_level(sensors.voltage()), geometry, fg, bg)?;
    }

    Ok(())
}

/// Fill the boundary circle minus its shifted mask; only the thin arc
/// between them ends up in the foreground colour.
fn draw_day_night_arc<D>(
    display: &mut D,
    day_of_year: u16,
    geometry: &FaceGeometry,
    fg: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let arc = celestial::day_night_arc(day_of_year, geometry.day_night_thickness);
    let cx = geometry.center_x() as i64;
    let r2 = arc.radius as i64 * arc.radius as i64;
    let inside = |p: Point, cy: i32| {
        let dx = p.x as i64 - cx;
        let dy = p.y as i64 - cy as i64;
        dx * dx + dy * dy <= r2
    };

    // The circles can be thousands of pixels wide; walk the screen instead
    let area = Rectangle::new(Point::zero(), Size::new(geometry.width as u32, geometry.height as u32));
    let pixels = area
        .points()
        .filter(|&p| inside(p, arc.center) && !inside(p, arc.mask_center))
        .map(|p| Pixel(p, fg));
    display.draw_iter(pixels)
}

fn draw_marker<D>(
    display: &mut D,
    state: &CelestialState,
    config: &Config,
    fg: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let geometry = &config.face;
    let sun_size = geometry.sun_icon_size as u32;
    let frame = Circle::new(Point::new(state.marker_x, state.marker_y), sun_size);
    let border = PrimitiveStyleBuilder::new()
        .stroke_color(fg)
        .stroke_width(2)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();

    if state.is_daytime {
        frame.into_styled(PrimitiveStyle::with_fill(fg)).draw(display)?;
        return frame.into_styled(border).draw(display);
    }

    // Moon fill is always white on black; only the border follows the theme
    let phase = MoonPhase::from_index(state.moon_phase_index);
    match phase {
        MoonPhase::New => {
            frame
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(display)?;
        }
        MoonPhase::Full => {
            frame
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
                .draw(display)?;
        }
        _ => {
            frame
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(display)?;
            draw_moon_art(display, state, config, phase)?;
        }
    }
    frame.into_styled(border).draw(display)
}

/// Lit disc with a shadow disc laid over it; the shadow offset follows the
/// phase and tilts with the animation frame as the moon crosses the sky.
fn draw_moon_art<D>(
    display: &mut D,
    state: &CelestialState,
    config: &Config,
    phase: MoonPhase,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let size = config.face.moon_icon_size;
    let lit = Circle::new(Point::new(state.moon_x, state.moon_y), size as u32);
    lit.into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(display)?;

    let index = state.moon_phase_index as i32;
    let shift = if phase.is_waxing() {
        -(size * index) / 4
    } else {
        size * (8 - index) / 4
    };
    let shift = shift as f32;
    let progress = state.moon_image_index as f32 / config.moon.max_frame.max(1) as f32;
    let tilt = (progress - 0.5) * FRAC_PI_2;
    let offset = Point::new(
        (shift * tilt.cos()).round() as i32,
        (shift * tilt.sin()).round() as i32,
    );

    lit.translate(offset)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(&mut display.clipped(&lit.bounding_box()))
}

/// Clear everything outside the dial and draw the ring.
fn draw_masks<D>(
    display: &mut D,
    geometry: &FaceGeometry,
    fg: BinaryColor,
    bg: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let center = Point::new(geometry.center_x(), geometry.center_y());
    let radius = geometry.width.min(geometry.height) / 2;
    let area = Rectangle::new(Point::zero(), Size::new(geometry.width as u32, geometry.height as u32));
    let outside = area
        .points()
        .filter(|&p| {
            let d = p - center;
            d.x * d.x + d.y * d.y > radius * radius
        })
        .map(|p| Pixel(p, bg));
    display.draw_iter(outside)?;

    let ring = PrimitiveStyleBuilder::new()
        .stroke_color(fg)
        .stroke_width(geometry.border_thickness as u32)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    Circle::with_center(center, (radius * 2) as u32)
        .into_styled(ring)
        .draw(display)?;
    Ok(())
}

fn draw_digital_time<D>(
    display: &mut D,
    clock: &ClockReading,
    geometry: &FaceGeometry,
    fg: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_10X20, fg);
    let time = format!("{}:{:02}", clock.hour, clock.minute);
    Text::with_alignment(
        &time,
        Point::new(geometry.center_x(), geometry.center_y() + 25),
        style,
        Alignment::Center,
    )
    .draw(display)?;
    Ok(())
}

fn draw_date<D>(
    display: &mut D,
    clock: &ClockReading,
    geometry: &FaceGeometry,
    fg: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, fg);
    let weekday_y = geometry.center_y() + 50;
    Text::with_alignment(
        weekday_name(clock.weekday),
        Point::new(geometry.center_x(), weekday_y),
        style,
        Alignment::Center,
    )
    .draw(display)?;
    Text::with_alignment(
        &format_date(clock),
        Point::new(geometry.center_x(), weekday_y + 20),
        style,
        Alignment::Center,
    )
    .draw(display)?;
    Ok(())
}

fn draw_steps<D>(
    display: &mut D,
    steps: u32,
    geometry: &FaceGeometry,
    fg: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let icon_x = geometry.center_x() - STEP_ICON_WIDTH - 5;
    // Two footprints
    Circle::new(Point::new(icon_x, STEP_TOP), 9)
        .into_styled(PrimitiveStyle::with_fill(fg))
        .draw(display)?;
    Circle::new(Point::new(icon_x + 10, STEP_TOP + 12), 9)
        .into_styled(PrimitiveStyle::with_fill(fg))
        .draw(display)?;

    let style = MonoTextStyle::new(&FONT_10X20, fg);
    Text::new(
        &steps.to_string(),
        Point::new(geometry.center_x() + 5, STEP_TOP + STEP_ICON_HEIGHT - 5),
        style,
    )
    .draw(display)?;
    Ok(())
}

fn draw_battery<D>(
    display: &mut D,
    level: u8,
    geometry: &FaceGeometry,
    fg: BinaryColor,
    bg: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let left = geometry.center_x() - BATTERY_WIDTH / 2;
    Rectangle::new(
        Point::new(left, BATTERY_TOP),
        Size::new(BATTERY_WIDTH as u32 - 4, BATTERY_HEIGHT as u32),
    )
    .into_styled(PrimitiveStyle::with_stroke(fg, 2))
    .draw(display)?;
    // Terminal nub
    Rectangle::new(
        Point::new(left + BATTERY_WIDTH - 4, BATTERY_TOP + 6),
        Size::new(4, 9),
    )
    .into_styled(PrimitiveStyle::with_fill(fg))
    .draw(display)?;

    Rectangle::new(
        Point::new(left + 5, BATTERY_TOP + 5),
        Size::new(3 * SEGMENT_SPACING as u32, SEGMENT_HEIGHT),
    )
    .into_styled(PrimitiveStyle::with_fill(bg))
    .draw(display)?;

    for segment in 0..level as i32 {
        Rectangle::new(
            Point::new(left + 5 + segment * SEGMENT_SPACING, BATTERY_TOP + 5),
            Size::new(SEGMENT_WIDTH, SEGMENT_HEIGHT),
        )
        .into_styled(PrimitiveStyle::with_fill(fg))
        .draw(display)?;
    }
    Ok(())
}

fn weekday_name(weekday: u8) -> &'static str {
    WEEKDAYS[weekday as usize % WEEKDAYS.len()]
}

/// "Jul 06 2024"
fn format_date(clock: &ClockReading) -> String {
    let month = MONTHS[(clock.month.clamp(1, 12) - 1) as usize];
    format!("{} {:02} {}", month, clock.day, clock.year)
}

/// Downsampled text preview of a frame: one character per 2×4 pixel cell,
/// denser glyphs for more black pixels.
pub fn render_ascii(frame: &FrameBuffer) -> String {
    const CELL_W: u32 = 2;
    const CELL_H: u32 = 4;
    const SHADES: [char; 4] = [' ', '.', ':', '#'];

    let size = frame.size();
    let mut out = String::new();
    for row in 0..size.height.div_ceil(CELL_H) {
        for column in 0..size.width.div_ceil(CELL_W) {
            let mut on = 0;
            for dy in 0..CELL_H {
                for dx in 0..CELL_W {
                    let x = column * CELL_W + dx;
                    let y = row * CELL_H + dy;
                    if frame.pixel(x, y) == Some(BinaryColor::On) {
                        on += 1;
                    }
                }
            }
            let shade = (on * (SHADES.len() as u32 - 1)).div_ceil(CELL_W * CELL_H);
            out.push(SHADES[shade as usize]);
        }
        out.push('\n');
    }
    out
}
