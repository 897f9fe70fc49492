//! Button decoding and the fast-repeat loop.
//!
//! A wake from deep sleep reports which line fired as a bitmask, one bit per
//! GPIO. After that first press is handled, [`FastRepeat::run`] keeps
//! sampling the raw lines so a user can scroll through a menu without paying
//! for a sleep/wake cycle per press. The loop blocks until the buttons have
//! been idle for the configured timeout or a transition asks it to stop.

use crate::navigation::{Mode, Navigator};
use crate::platform::{ActionSink, ButtonLevels, Millis};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Physical buttons, in wake-decoding priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Menu,
    Back,
    Up,
    Down,
}

impl Button {
    /// Priority order used when more than one line reads pressed.
    pub const PRIORITY: [Button; 4] = [Button::Menu, Button::Back, Button::Up, Button::Down];
}

/// GPIO numbers of the four button lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPins {
    pub menu: u8,
    pub back: u8,
    pub up: u8,
    pub down: u8,
}

impl Default for ButtonPins {
    fn default() -> Self {
        // Watchy v1 wiring
        Self {
            menu: 26,
            back: 25,
            up: 32,
            down: 4,
        }
    }
}

impl ButtonPins {
    pub fn pin(&self, button: Button) -> u8 {
        match button {
            Button::Menu => self.menu,
            Button::Back => self.back,
            Button::Up => self.up,
            Button::Down => self.down,
        }
    }

    /// Wakeup-status bit for a button.
    pub fn mask(&self, button: Button) -> u64 {
        1u64 << self.pin(button)
    }

    /// Decode a wakeup-status bitmask into the single button to honour.
    ///
    /// Only one line is expected per wake; if several bits are set the
    /// first in [`Button::PRIORITY`] wins. Masks with no known bit yield
    /// `None` and are ignored by the caller.
    pub fn decode_wakeup(&self, wakeup_bits: u64) -> Option<Button> {
        Button::PRIORITY
            .into_iter()
            .find(|&button| wakeup_bits & self.mask(button) != 0)
    }
}

/// Edge detector with hold-to-repeat over raw button levels.
///
/// A button fires when its line goes from released to pressed, and again
/// every `repeat_interval_ms` while it stays held.
#[derive(Debug, Clone)]
pub struct Debouncer {
    repeat_interval_ms: u64,
    held: Option<Button>,
    last_fire_ms: u64,
    /// Held press was already handled elsewhere; stay quiet until release
    latched: bool,
}

impl Debouncer {
    pub fn new(repeat_interval_ms: u64) -> Self {
        Self {
            repeat_interval_ms,
            held: None,
            last_fire_ms: 0,
            latched: false,
        }
    }

    /// Start with `button` already down and consumed, as after a wake.
    ///
    /// The button does not fire or repeat until it has been released.
    pub fn holding(repeat_interval_ms: u64, button: Button, now_ms: u64) -> Self {
        Self {
            repeat_interval_ms,
            held: Some(button),
            last_fire_ms: now_ms,
            latched: true,
        }
    }

    /// True while the last sample read any line pressed.
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Sample the lines and report a press to act on, if any.
    pub fn poll<L: ButtonLevels>(&mut self, levels: &mut L, now_ms: u64) -> Option<Button> {
        let pressed = Button::PRIORITY
            .into_iter()
            .find(|&button| levels.is_pressed(button));

        match (pressed, self.held) {
            (None, _) => {
                self.held = None;
                self.latched = false;
                None
            }
            (Some(button), Some(held)) if button == held => {
                if self.latched {
                    None
                } else if now_ms.saturating_sub(self.last_fire_ms) >= self.repeat_interval_ms {
                    self.last_fire_ms = now_ms;
                    Some(button)
                } else {
                    None
                }
            }
            (Some(button), _) => {
                self.held = Some(button);
                self.latched = false;
                self.last_fire_ms = now_ms;
                Some(button)
            }
        }
    }
}

/// Why the fast-repeat loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// No press for the whole timeout
    Idle,
    /// A transition asked to leave (e.g. BACK on the watch face)
    Requested,
}

/// Summary of one fast-repeat run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub exit: LoopExit,
    pub presses: u32,
    pub elapsed_ms: u64,
}

/// Bounded polling loop run after each wake event.
#[derive(Debug, Clone)]
pub struct FastRepeat {
    timeout_ms: u64,
    repeat_interval_ms: u64,
}

impl FastRepeat {
    pub fn new(timeout_ms: u64, repeat_interval_ms: u64) -> Self {
        Self {
            timeout_ms,
            repeat_interval_ms,
        }
    }

    /// Poll until idle for `timeout_ms` or until a transition requests exit.
    ///
    /// `wake` is the button that woke the device, already applied by the
    /// caller. If it is still down it is ignored until released. Any sample
    /// with a line pressed restarts the idle timer; each debounced press is
    /// fed through `navigator` in [`Mode::FastRepeat`] and resulting actions
    /// go straight to `sink`. This blocks the caller for the whole run.
    pub fn run<C, L, S>(
        &self,
        navigator: &mut Navigator,
        wake: Option<Button>,
        clock: &mut C,
        levels: &mut L,
        sink: &mut S,
    ) -> LoopReport
    where
        C: Millis,
        L: ButtonLevels,
        S: ActionSink,
    {
        let started = clock.now_ms();
        let mut last_press = started;
        let mut presses = 0;
        let mut debouncer = match wake {
            Some(button) => Debouncer::holding(self.repeat_interval_ms, button, started),
            None => Debouncer::new(self.repeat_interval_ms),
        };

        debug!(timeout_ms = self.timeout_ms, ?wake, "fast-repeat loop entered");

        let exit = loop {
            let now = clock.now_ms();
            if now.saturating_sub(last_press) >= self.timeout_ms {
                break LoopExit::Idle;
            }

            let fired = debouncer.poll(levels, now);
            if debouncer.is_holding() {
                last_press = now;
            }
            let Some(button) = fired else {
                continue;
            };
            presses += 1;

            let outcome = navigator.apply(button, Mode::FastRepeat);
            if let Some(action) = outcome.action {
                sink.perform(action);
            }
            if outcome.exit {
                break LoopExit::Requested;
            }
        };

        let report = LoopReport {
            exit,
            presses,
            elapsed_ms: clock.now_ms().saturating_sub(started),
        };
        info!(
            exit = ?report.exit,
            presses = report.presses,
            elapsed_ms = report.elapsed_ms,
            "fast-repeat loop finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{Action, GuiState, Refresh, UiState};
    use std::collections::VecDeque;

    /// Advances a fixed step on every read.
    struct SteppingClock {
        now: u64,
        step: u64,
    }

    impl Millis for SteppingClock {
        fn now_ms(&mut self) -> u64 {
            let now = self.now;
            self.now += self.step;
            now
        }
    }

    /// Replays one set of held buttons per sample, then reads released.
    struct Script {
        samples: VecDeque<Option<Button>>,
        current: Option<Button>,
        reads: usize,
    }

    impl Script {
        fn new(samples: &[Option<Button>]) -> Self {
            Self {
                samples: samples.iter().copied().collect(),
                current: None,
                reads: 0,
            }
        }
    }

    impl ButtonLevels for Script {
        fn is_pressed(&mut self, button: Button) -> bool {
            // Button::Menu is read first on every sample
            if button == Button::Menu {
                self.current = self.samples.pop_front().flatten();
                self.reads += 1;
            }
            self.current == Some(button)
        }
    }

    fn menu_navigator() -> Navigator {
        Navigator::new(
            UiState {
                gui_state: GuiState::MainMenu,
                ..UiState::default()
            },
            4,
            5,
        )
    }

    #[test]
    fn test_decode_priority() {
        let pins = ButtonPins::default();
        let all = pins.mask(Button::Menu)
            | pins.mask(Button::Back)
            | pins.mask(Button::Up)
            | pins.mask(Button::Down);
        assert_eq!(pins.decode_wakeup(all), Some(Button::Menu));
        assert_eq!(
            pins.decode_wakeup(pins.mask(Button::Up) | pins.mask(Button::Down)),
            Some(Button::Up)
        );
        assert_eq!(pins.decode_wakeup(1 << 26), Some(Button::Menu));
        assert_eq!(pins.decode_wakeup(1 << 32), Some(Button::Up));
        assert_eq!(pins.decode_wakeup(1 << 4), Some(Button::Down));
    }

    #[test]
    fn test_decode_unknown_mask_is_ignored() {
        let pins = ButtonPins::default();
        assert_eq!(pins.decode_wakeup(0), None);
        assert_eq!(pins.decode_wakeup(1 << 13), None);
    }

    #[test]
    fn test_debouncer_fires_on_edge_then_repeats() {
        let mut debouncer = Debouncer::new(100);
        let mut held = Script::new(&[Some(Button::Down); 6]);
        assert_eq!(debouncer.poll(&mut held, 0), Some(Button::Down));
        assert_eq!(debouncer.poll(&mut held, 50), None);
        assert_eq!(debouncer.poll(&mut held, 99), None);
        assert_eq!(debouncer.poll(&mut held, 100), Some(Button::Down));
        assert_eq!(debouncer.poll(&mut held, 150), None);
        assert_eq!(debouncer.poll(&mut held, 200), Some(Button::Down));
    }

    #[test]
    fn test_debouncer_release_rearms() {
        let mut debouncer = Debouncer::new(1000);
        let mut taps = Script::new(&[Some(Button::Up), None, Some(Button::Up)]);
        assert_eq!(debouncer.poll(&mut taps, 0), Some(Button::Up));
        assert_eq!(debouncer.poll(&mut taps, 1), None);
        assert_eq!(debouncer.poll(&mut taps, 2), Some(Button::Up));
    }

    #[test]
    fn test_idle_loop_times_out() {
        let mut nav = menu_navigator();
        let mut clock = SteppingClock { now: 0, step: 10 };
        let mut sink: Vec<Action> = Vec::new();
        let report = FastRepeat::new(5000, 150).run(&mut nav, None, &mut clock, &mut Script::new(&[]), &mut sink);

        assert_eq!(report.exit, LoopExit::Idle);
        assert_eq!(report.presses, 0);
        assert!(report.elapsed_ms >= 5000);
        assert!(report.elapsed_ms <= 5000 + 20);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_timeout_counts_from_last_press() {
        let mut nav = menu_navigator();
        let mut clock = SteppingClock { now: 0, step: 10 };
        let mut sink: Vec<Action> = Vec::new();
        // Press DOWN on the 100th sample (1 s in), then release
        let mut samples = vec![None; 99];
        samples.push(Some(Button::Down));
        let mut script = Script::new(&samples);

        let report = FastRepeat::new(5000, 150).run(&mut nav, None, &mut clock, &mut script, &mut sink);

        assert_eq!(report.exit, LoopExit::Idle);
        assert_eq!(report.presses, 1);
        assert!(report.elapsed_ms >= 6000, "elapsed {}", report.elapsed_ms);
        assert!(report.elapsed_ms <= 6000 + 20, "elapsed {}", report.elapsed_ms);
        assert_eq!(
            sink,
            vec![Action::ShowMenu {
                index: 1,
                refresh: Refresh::Fast
            }]
        );
    }

    #[test]
    fn test_taps_scroll_the_menu_quickly() {
        let mut nav = menu_navigator();
        let mut clock = SteppingClock { now: 0, step: 10 };
        let mut sink: Vec<Action> = Vec::new();
        let mut script = Script::new(&[
            Some(Button::Up),
            None,
            Some(Button::Up),
            None,
            Some(Button::Up),
        ]);

        let report = FastRepeat::new(5000, 150).run(&mut nav, None, &mut clock, &mut script, &mut sink);

        assert_eq!(report.presses, 3);
        assert_eq!(nav.state().menu_index, 4);
        assert!(sink.iter().all(|action| matches!(
            action,
            Action::ShowMenu {
                refresh: Refresh::Fast,
                ..
            }
        )));
    }

    #[test]
    fn test_back_from_menu_leaves_loop() {
        let mut nav = menu_navigator();
        let mut clock = SteppingClock { now: 0, step: 10 };
        let mut sink: Vec<Action> = Vec::new();
        let mut script = Script::new(&[None, Some(Button::Back), Some(Button::Down)]);

        let report = FastRepeat::new(5000, 150).run(&mut nav, None, &mut clock, &mut script, &mut sink);

        assert_eq!(report.exit, LoopExit::Requested);
        assert_eq!(nav.state().gui_state, GuiState::WatchFace);
        assert_eq!(
            sink,
            vec![Action::ShowWatchFace {
                refresh: Refresh::Full
            }]
        );
        // The DOWN sample after the exit was never read
        assert_eq!(script.reads, 2);
    }

    #[test]
    fn test_watch_face_press_leaves_loop_without_toggling() {
        let mut nav = Navigator::new(UiState::default(), 0, 5);
        let mut clock = SteppingClock { now: 0, step: 10 };
        let mut sink: Vec<Action> = Vec::new();
        let mut script = Script::new(&[Some(Button::Up)]);

        let report = FastRepeat::new(5000, 150).run(&mut nav, None, &mut clock, &mut script, &mut sink);

        assert_eq!(report.exit, LoopExit::Requested);
        assert!(!nav.state().show_stats);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_debouncer_ignores_consumed_hold_until_release() {
        let mut debouncer = Debouncer::holding(100, Button::Menu, 0);
        let mut script = Script::new(&[
            Some(Button::Menu),
            Some(Button::Menu),
            None,
            Some(Button::Menu),
        ]);
        assert_eq!(debouncer.poll(&mut script, 10), None);
        assert_eq!(debouncer.poll(&mut script, 500), None);
        assert!(debouncer.is_holding());
        assert_eq!(debouncer.poll(&mut script, 510), None);
        assert!(!debouncer.is_holding());
        assert_eq!(debouncer.poll(&mut script, 520), Some(Button::Menu));
    }

    #[test]
    fn test_held_wake_button_scrolls_once() {
        let mut nav = Navigator::new(
            UiState {
                gui_state: GuiState::MainMenu,
                menu_index: 3,
                ..UiState::default()
            },
            4,
            5,
        );
        let mut sink: Vec<Action> = Vec::new();
        assert!(nav.apply(Button::Up, Mode::Wake).action.is_some());
        assert_eq!(nav.state().menu_index, 2);

        // UP still down for the first 50 ms of the loop
        let mut clock = SteppingClock { now: 0, step: 10 };
        let mut script = Script::new(&[Some(Button::Up); 5]);
        let report = FastRepeat::new(5000, 150).run(
            &mut nav,
            Some(Button::Up),
            &mut clock,
            &mut script,
            &mut sink,
        );

        assert_eq!(report.presses, 0);
        assert_eq!(nav.state().menu_index, 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_opening_firmware_update_waits_for_confirm() {
        let mut nav = Navigator::new(
            UiState {
                gui_state: GuiState::MainMenu,
                menu_index: 5,
                ..UiState::default()
            },
            4,
            5,
        );
        let mut sink: Vec<Action> = Vec::new();
        if let Some(action) = nav.apply(Button::Menu, Mode::Wake).action {
            sink.push(action);
        }
        assert_eq!(nav.state().gui_state, GuiState::FwUpdate);

        // MENU still down from the wake for 400 ms, released, then pressed to confirm
        let mut samples = vec![Some(Button::Menu); 40];
        samples.push(None);
        samples.push(Some(Button::Menu));
        let mut clock = SteppingClock { now: 0, step: 10 };
        let mut script = Script::new(&samples);
        let report = FastRepeat::new(5000, 150).run(
            &mut nav,
            Some(Button::Menu),
            &mut clock,
            &mut script,
            &mut sink,
        );

        assert_eq!(report.presses, 1);
        assert_eq!(
            sink,
            vec![Action::ShowFirmwareUpdate, Action::BeginFirmwareUpdate]
        );
    }

    #[test]
    fn test_long_hold_keeps_loop_alive() {
        // Repeat interval longer than the timeout: the hold itself is activity
        let mut nav = menu_navigator();
        let mut clock = SteppingClock { now: 0, step: 10 };
        let mut sink: Vec<Action> = Vec::new();
        let mut script = Script::new(&[Some(Button::Down); 700]);

        let report = FastRepeat::new(5000, 10_000).run(&mut nav, None, &mut clock, &mut script, &mut sink);

        assert_eq!(report.exit, LoopExit::Idle);
        assert_eq!(report.presses, 1);
        // Held for 7 s, idle timer starts at release
        assert!(report.elapsed_ms >= 7000 + 5000, "elapsed {}", report.elapsed_ms);
    }
}
