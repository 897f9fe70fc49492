//! # Chronometer Simulator Entry Point
//!
//! Runs one wake cycle of the watch on a desktop: load configuration and the
//! retained UI state, apply the button that woke the device, run the
//! fast-repeat loop, persist the state, then redraw the watch face from the
//! local clock. `--stdout` prints an ASCII preview of the frame.
//!
//! ```text
//! chronometer [--config PATH] [--state PATH] [--button menu|back|up|down] [--no-repeat] [--stdout]
//! ```

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use chronometer_lib::config::Config;
use chronometer_lib::face::{draw_watch_face, render_ascii};
use chronometer_lib::framebuffer::FrameBuffer;
use chronometer_lib::input::{Button, FastRepeat};
use chronometer_lib::navigation::{Action, GuiState, Mode, Navigator, Refresh, UiState};
use chronometer_lib::platform::{
    ActionSink, ButtonLevels, FixedSensors, LocalTime, NoButtons, SystemMillis, TimeSource,
};
use chronometer_lib::storage::{JsonFileStore, StateStore, StorageError};
use chronometer_lib::{celestial, lunar};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command line options.
#[derive(Debug, Default)]
struct Options {
    config_path: Option<String>,
    state_path: Option<String>,
    button: Option<Button>,
    no_repeat: bool,
    stdout: bool,
}

fn parse_button(name: &str) -> anyhow::Result<Button> {
    match name.to_ascii_lowercase().as_str() {
        "menu" => Ok(Button::Menu),
        "back" => Ok(Button::Back),
        "up" => Ok(Button::Up),
        "down" => Ok(Button::Down),
        other => bail!("unknown button '{}' (expected menu, back, up or down)", other),
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => options.config_path = Some(args.next().context("--config needs a path")?),
            "--state" => options.state_path = Some(args.next().context("--state needs a path")?),
            "--button" => {
                let name = args.next().context("--button needs a name")?;
                options.button = Some(parse_button(&name)?);
            }
            "--no-repeat" => options.no_repeat = true,
            "--stdout" => options.stdout = true,
            other => bail!("unrecognised argument '{}'", other),
        }
    }
    Ok(options)
}

/// Logs every action and remembers the last one.
#[derive(Debug, Default)]
struct LoggingSink {
    last: Option<Action>,
}

impl ActionSink for LoggingSink {
    fn perform(&mut self, action: Action) {
        info!(?action, "action");
        self.last = Some(action);
    }
}

/// Released lines, sampled about once a millisecond so the idle loop
/// does not spin a core.
struct PacedButtons(NoButtons);

impl ButtonLevels for PacedButtons {
    fn is_pressed(&mut self, button: Button) -> bool {
        if button == Button::Menu {
            std::thread::sleep(Duration::from_millis(1));
        }
        self.0.is_pressed(button)
    }
}

fn load_state(store: &mut JsonFileStore) -> anyhow::Result<UiState> {
    match store.load() {
        Ok(state) => Ok(state),
        Err(StorageError::Codec(e)) => {
            warn!(error = %e, path = %store.path().display(), "stored UI state unreadable, starting fresh");
            Ok(UiState::default())
        }
        Err(e) => Err(e).with_context(|| format!("loading UI state from {}", store.path().display())),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let options = parse_args(env::args().skip(1))?;

    let config = match &options.config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    let state_path = options
        .state_path
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.storage.state_path.clone());
    let mut store = JsonFileStore::new(state_path);
    let state = load_state(&mut store)?;

    let mut navigator = Navigator::new(
        state,
        config.list.items.len(),
        config.navigation.list_page_size,
    );
    let mut sink = LoggingSink::default();

    // Timer wakes carry no button and just redraw the face
    if let Some(button) = options.button {
        let wakeup_bits = config.buttons.mask(button);
        let wake = config.buttons.decode_wakeup(wakeup_bits);
        if let Some(button) = wake {
            let outcome = navigator.apply(button, Mode::Wake);
            if let Some(action) = outcome.action {
                sink.perform(action);
            }
        }

        if !options.no_repeat {
            let fast_repeat = FastRepeat::new(
                config.navigation.fast_repeat_timeout_ms,
                config.navigation.repeat_interval_ms,
            );
            fast_repeat.run(
                &mut navigator,
                wake,
                &mut SystemMillis::new(),
                &mut PacedButtons(NoButtons),
                &mut sink,
            );
        }
    }

    let clock = LocalTime.read();
    let on_watch_face = navigator.state().gui_state == GuiState::WatchFace;
    let rollover = on_watch_face && navigator.state_mut().note_day(clock.day);

    store
        .save(navigator.state())
        .with_context(|| format!("saving UI state to {}", store.path().display()))?;

    if !on_watch_face {
        info!(state = ?navigator.state().gui_state, last_action = ?sink.last, "watch face not shown");
        return Ok(());
    }

    let celestial_state = celestial::compute(&clock, &config);
    let drift = lunar::phase_drift(&clock, celestial_state.day_of_year, &config.moon);
    if !drift.within_tolerance() {
        warn!(
            datum = drift.datum_index,
            ephemeris = drift.ephemeris_index,
            buckets = drift.buckets,
            "moon phase has drifted from the ephemeris; update the datum new moon"
        );
    }

    let refresh = match sink.last {
        _ if rollover => Refresh::Full,
        Some(Action::ShowWatchFace { refresh }) => refresh,
        _ => Refresh::Partial,
    };

    let mut frame = FrameBuffer::new(config.face.width as u32, config.face.height as u32);
    let mut sensors = FixedSensors {
        steps: 0,
        voltage: 4.0,
    };
    let ui = navigator.into_state();
    draw_watch_face(&mut frame, &clock, &celestial_state, &ui, &config, &mut sensors)
        .unwrap_or_else(|never| match never {});

    info!(
        ?refresh,
        daytime = celestial_state.is_daytime,
        moon_phase = celestial_state.moon_phase_index,
        black_pixels = frame.count_on(),
        "watch face rendered"
    );

    if options.stdout {
        print!("{}", render_ascii(&frame));
    }

    Ok(())
}
