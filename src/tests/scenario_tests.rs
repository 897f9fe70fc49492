//! Wake-cycle scenarios across navigation, storage and the celestial engine.

use chronometer_lib::celestial::{self, is_daytime, track_angle};
use chronometer_lib::config::Config;
use chronometer_lib::face::draw_watch_face;
use chronometer_lib::framebuffer::FrameBuffer;
use chronometer_lib::input::{Button, FastRepeat};
use chronometer_lib::navigation::{Action, GuiState, Mode, Navigator, Refresh, UiState};
use chronometer_lib::platform::{ButtonLevels, FixedSensors, Millis};
use chronometer_lib::storage::{JsonFileStore, MemoryStore, StateStore};
use chronometer_lib::lookups::day_record;
use chronometer_lib::ClockReading;
use embedded_graphics::pixelcolor::BinaryColor;
use tempfile::tempdir;

fn navigator(state: UiState) -> Navigator {
    let config = Config::default();
    Navigator::new(
        state,
        config.list.items.len(),
        config.navigation.list_page_size,
    )
}

/// Wake with the button encoded as the hardware would report it.
fn wake(navigator: &mut Navigator, button: Button) -> Option<Action> {
    let pins = Config::default().buttons;
    let decoded = pins.decode_wakeup(pins.mask(button)).unwrap();
    navigator.apply(decoded, Mode::Wake).action
}

#[test]
fn sunrise_minute_is_day_and_sunset_minute_is_night() {
    // Sunrise 06:00, sunset 18:00
    let (sunrise, sunset) = (360, 1080);
    assert!(is_daytime(360, sunrise, sunset));
    assert_eq!(track_angle(360, 360), 0.0);
    assert!(!is_daytime(1080, sunrise, sunset));
    assert!(!is_daytime(0, sunrise, sunset));
}

/// Pixel 20 px inward from the centre of the sun-sized marker frame,
/// clear of the border ring.
fn marker_interior(state: &chronometer_lib::CelestialState, config: &Config) -> (u32, u32) {
    let half = (config.face.sun_icon_size / 2) as f32;
    let (cx, cy) = (state.marker_x as f32 + half, state.marker_y as f32 + half);
    let (dx, dy) = (
        config.face.center_x() as f32 - cx,
        config.face.center_y() as f32 - cy,
    );
    let len = (dx * dx + dy * dy).sqrt();
    (
        (cx + dx * 20.0 / len).round() as u32,
        (cy + dy * 20.0 / len).round() as u32,
    )
}

#[test]
fn sunset_minute_draws_the_moon() {
    // 2024-07-21 is a full moon; the full disc is white even in dark mode,
    // where the sun would be black
    let config = Config::default();
    let record = day_record(203);
    let sunset = record.sunset_minute;
    let at = |minute: u16| {
        ClockReading::new(2024, 7, 21, (minute / 60) as u8, (minute % 60) as u8, 0)
    };
    let ui = UiState {
        dark_mode: true,
        ..UiState::default()
    };
    let mut sensors = FixedSensors {
        steps: 0,
        voltage: 4.0,
    };

    let dusk = at(sunset);
    let state = celestial::compute(&dusk, &config);
    assert_eq!(state.day_of_year, 203);
    assert!(!state.is_daytime);
    assert_eq!(state.moon_phase_index, 4);
    let mut frame = FrameBuffer::new(200, 200);
    draw_watch_face(&mut frame, &dusk, &state, &ui, &config, &mut sensors).unwrap();
    let (x, y) = marker_interior(&state, &config);
    assert_eq!(frame.pixel(x, y), Some(BinaryColor::Off));

    // One minute earlier the sun is still up
    let late_afternoon = at(sunset - 1);
    let state = celestial::compute(&late_afternoon, &config);
    assert!(state.is_daytime);
    let mut frame = FrameBuffer::new(200, 200);
    draw_watch_face(&mut frame, &late_afternoon, &state, &ui, &config, &mut sensors).unwrap();
    let (x, y) = marker_interior(&state, &config);
    assert_eq!(frame.pixel(x, y), Some(BinaryColor::On));
}

#[test]
fn back_toggles_dark_mode_then_menu_opens_at_same_index() {
    let mut nav = navigator(UiState {
        menu_index: 3,
        ..UiState::default()
    });

    let action = wake(&mut nav, Button::Back);
    assert!(nav.state().dark_mode);
    assert_eq!(nav.state().gui_state, GuiState::WatchFace);
    assert_eq!(
        action,
        Some(Action::ShowWatchFace {
            refresh: Refresh::Partial
        })
    );

    let action = wake(&mut nav, Button::Menu);
    assert_eq!(nav.state().gui_state, GuiState::MainMenu);
    assert_eq!(nav.state().menu_index, 3);
    assert_eq!(
        action,
        Some(Action::ShowMenu {
            index: 3,
            refresh: Refresh::Full
        })
    );
}

#[test]
fn menu_up_from_first_item_wraps_to_last() {
    let mut nav = navigator(UiState {
        gui_state: GuiState::MainMenu,
        ..UiState::default()
    });
    wake(&mut nav, Button::Up);
    assert_eq!(nav.state().menu_index, 6);
}

#[test]
fn state_survives_a_sleep_cycle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ui.json");

    let mut nav = navigator(UiState::default());
    wake(&mut nav, Button::Down);
    wake(&mut nav, Button::Menu);
    wake(&mut nav, Button::Down);
    JsonFileStore::new(&path).save(nav.state()).unwrap();

    let restored = JsonFileStore::new(&path).load().unwrap();
    assert!(restored.show_digital_time);
    assert_eq!(restored.gui_state, GuiState::MainMenu);
    assert_eq!(restored.menu_index, 1);

    // Next wake picks up where the last one left off
    let mut nav = navigator(restored);
    wake(&mut nav, Button::Back);
    assert_eq!(nav.state().gui_state, GuiState::WatchFace);
    assert!(nav.state().show_digital_time);
}

struct FakeMillis(u64);

impl Millis for FakeMillis {
    fn now_ms(&mut self) -> u64 {
        self.0 += 5;
        self.0
    }
}

/// Holds DOWN for the first `held` samples.
struct HeldDown {
    held: usize,
}

impl ButtonLevels for HeldDown {
    fn is_pressed(&mut self, button: Button) -> bool {
        if button == Button::Menu {
            self.held = self.held.saturating_sub(1);
            return false;
        }
        button == Button::Down && self.held > 0
    }
}

#[test]
fn holding_down_scrolls_the_menu_then_times_out() {
    let config = Config::default();
    let mut store = MemoryStore::new();
    let mut nav = navigator(store.load().unwrap());
    let mut actions = Vec::new();

    if let Some(action) = wake(&mut nav, Button::Menu) {
        actions.push(action);
    }

    // 100 samples at 5 ms: a press at 0 ms then repeats every 150 ms
    let report = FastRepeat::new(
        config.navigation.fast_repeat_timeout_ms,
        config.navigation.repeat_interval_ms,
    )
    .run(
        &mut nav,
        Some(Button::Menu),
        &mut FakeMillis(0),
        &mut HeldDown { held: 101 },
        &mut actions,
    );

    assert_eq!(report.presses, 4);
    assert_eq!(nav.state().menu_index, 4);
    assert!(actions[1..].iter().all(|a| matches!(
        a,
        Action::ShowMenu {
            refresh: Refresh::Fast,
            ..
        }
    )));

    store.save(nav.state()).unwrap();
    assert_eq!(store.load().unwrap().menu_index, 4);
}

#[test]
fn day_rollover_is_reported_once() {
    let mut state = UiState::default();
    assert!(state.note_day(6));
    assert!(!state.note_day(6));
    assert!(state.note_day(7));
}

#[test]
fn watch_face_renders_for_every_hour_of_a_leap_day() {
    let config = Config::default();
    let mut sensors = FixedSensors {
        steps: 10,
        voltage: 3.9,
    };
    let ui = UiState {
        show_stats: true,
        ..UiState::default()
    };
    for hour in 0..24 {
        let clock = ClockReading::new(2024, 2, 29, hour, 30, 4);
        let state = celestial::compute(&clock, &config);
        assert_eq!(state.day_of_year, 60);

        let mut frame = FrameBuffer::new(200, 200);
        draw_watch_face(&mut frame, &clock, &state, &ui, &config, &mut sensors).unwrap();
        assert!(frame.count_on() > 0);
    }
}
