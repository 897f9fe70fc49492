//! # Navigation State Machine
//!
//! Every screen change is a function of the current [`UiState`] and one
//! [`Button`]. The machine is total: pairs with no entry in the table leave
//! the state untouched and produce no action.
//!
//! | State | MENU | BACK | UP | DOWN |
//! |---|---|---|---|---|
//! | WatchFace | open menu | toggle dark mode | toggle stats | toggle digital time |
//! | MainMenu | open item | watch face | previous item | next item |
//! | List | select entry | menu | previous entry | next entry |
//! | FwUpdate | begin update | menu | - | - |
//! | App | - | menu | - | - |
//!
//! The same table drives both the wake event and the fast-repeat loop; the
//! loop only changes the refresh mode and adds exit conditions (see
//! [`Mode::FastRepeat`]).

use crate::input::Button;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which screen owns the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GuiState {
    #[default]
    WatchFace,
    MainMenu,
    List,
    App,
    FwUpdate,
}

/// Main menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    About,
    ShoppingList,
    Accelerometer,
    SetTime,
    SetupWifi,
    UpdateFirmware,
    SyncNtp,
}

impl MenuItem {
    pub const ALL: [MenuItem; 7] = [
        MenuItem::About,
        MenuItem::ShoppingList,
        MenuItem::Accelerometer,
        MenuItem::SetTime,
        MenuItem::SetupWifi,
        MenuItem::UpdateFirmware,
        MenuItem::SyncNtp,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::About => "About Watchy",
            MenuItem::ShoppingList => "Shopping List",
            MenuItem::Accelerometer => "Show Accelerometer",
            MenuItem::SetTime => "Set Time",
            MenuItem::SetupWifi => "Setup WiFi",
            MenuItem::UpdateFirmware => "Update Firmware",
            MenuItem::SyncNtp => "Sync NTP",
        }
    }

    /// Screen the watch is on once the item has been opened.
    fn target_state(&self) -> GuiState {
        match self {
            MenuItem::ShoppingList => GuiState::List,
            MenuItem::UpdateFirmware => GuiState::FwUpdate,
            _ => GuiState::App,
        }
    }
}

/// Number of main menu entries.
pub const MENU_LENGTH: usize = MenuItem::ALL.len();

/// Display refresh mode requested with a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Refresh {
    /// Whole panel, clears ghosting
    Full,
    /// Partial update after a single press
    Partial,
    /// Quickest partial update, used while the fast-repeat loop scrolls
    Fast,
}

/// Side effect the host performs after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    ShowWatchFace { refresh: Refresh },
    ShowMenu { index: usize, refresh: Refresh },
    ShowList { index: usize, page_start: usize, refresh: Refresh },
    /// Hand the screen to an external app (about, set time, wifi, ...)
    OpenApp(MenuItem),
    /// Screen that offers the update; nothing is flashed until confirmed
    ShowFirmwareUpdate,
    BeginFirmwareUpdate,
    /// Context action on the highlighted list entry
    SelectListEntry { index: usize },
}

/// Where a transition is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The button that woke the device
    Wake,
    /// A press sampled inside the fast-repeat loop. Menu scrolling uses
    /// [`Refresh::Fast`]; BACK/UP/DOWN on the watch face end the loop
    /// instead of toggling, and BACK from the menu ends it after
    /// showing the watch face.
    FastRepeat,
}

/// Result of feeding one button into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub action: Option<Action>,
    /// Leave the fast-repeat loop now
    pub exit: bool,
}

impl Outcome {
    fn none() -> Self {
        Self::default()
    }

    fn act(action: Action) -> Self {
        Self {
            action: Some(action),
            exit: false,
        }
    }

    fn exit() -> Self {
        Self {
            action: None,
            exit: true,
        }
    }
}

/// UI state that survives deep sleep.
///
/// Mutated only by [`Navigator`]; persisted through a
/// [`crate::storage::StateStore`] between wakes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiState {
    pub gui_state: GuiState,
    pub menu_index: usize,
    pub list_index: usize,
    pub show_digital_time: bool,
    pub show_stats: bool,
    pub dark_mode: bool,
    /// Day of month of the last watch-face draw
    pub prev_day: u8,
}

impl UiState {
    /// Record the day being drawn; true when it differs from the last one.
    pub fn note_day(&mut self, day: u8) -> bool {
        let changed = self.prev_day != day;
        self.prev_day = day;
        changed
    }
}

/// Step back one entry, wrapping from 0 to `len - 1`.
pub fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if index == 0 || index >= len {
        len - 1
    } else {
        index - 1
    }
}

/// Step forward one entry, wrapping from `len - 1` to 0.
pub fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index + 1) % len
}

/// First entry of the page holding `index`.
pub fn page_start(index: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (index / page_size) * page_size
}

/// Owns the UI state and applies the transition table.
#[derive(Debug, Clone)]
pub struct Navigator {
    state: UiState,
    list_len: usize,
    page_size: usize,
}

impl Navigator {
    pub fn new(mut state: UiState, list_len: usize, page_size: usize) -> Self {
        // A shorter list or menu than last time must not leave a dangling index
        if state.menu_index >= MENU_LENGTH {
            state.menu_index = 0;
        }
        if state.list_index >= list_len {
            state.list_index = 0;
        }
        Self {
            state,
            list_len,
            page_size,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut UiState {
        &mut self.state
    }

    pub fn into_state(self) -> UiState {
        self.state
    }

    /// Apply one button press.
    pub fn apply(&mut self, button: Button, mode: Mode) -> Outcome {
        let before = self.state.gui_state;
        let outcome = match self.state.gui_state {
            GuiState::WatchFace => self.on_watch_face(button, mode),
            GuiState::MainMenu => self.on_main_menu(button, mode),
            GuiState::List => self.on_list(button, mode),
            GuiState::FwUpdate => self.on_firmware_update(button),
            GuiState::App => self.on_app(button),
        };
        debug!(
            ?button,
            ?mode,
            from = ?before,
            to = ?self.state.gui_state,
            action = ?outcome.action,
            exit = outcome.exit,
            "navigation transition"
        );
        outcome
    }

    fn on_watch_face(&mut self, button: Button, mode: Mode) -> Outcome {
        match (button, mode) {
            (Button::Menu, _) => self.enter_menu(Refresh::Full),
            (_, Mode::FastRepeat) => Outcome::exit(),
            (Button::Back, Mode::Wake) => {
                self.state.dark_mode = !self.state.dark_mode;
                Outcome::act(Action::ShowWatchFace {
                    refresh: Refresh::Partial,
                })
            }
            (Button::Up, Mode::Wake) => {
                self.state.show_stats = !self.state.show_stats;
                Outcome::act(Action::ShowWatchFace {
                    refresh: Refresh::Partial,
                })
            }
            (Button::Down, Mode::Wake) => {
                self.state.show_digital_time = !self.state.show_digital_time;
                Outcome::act(Action::ShowWatchFace {
                    refresh: Refresh::Partial,
                })
            }
        }
    }

    fn on_main_menu(&mut self, button: Button, mode: Mode) -> Outcome {
        let scroll_refresh = match mode {
            Mode::Wake => Refresh::Partial,
            Mode::FastRepeat => Refresh::Fast,
        };
        match button {
            Button::Menu => self.open_item(),
            Button::Back => {
                self.state.gui_state = GuiState::WatchFace;
                Outcome {
                    action: Some(Action::ShowWatchFace {
                        refresh: Refresh::Full,
                    }),
                    exit: mode == Mode::FastRepeat,
                }
            }
            Button::Up => {
                self.state.menu_index = wrap_decrement(self.state.menu_index, MENU_LENGTH);
                self.enter_menu(scroll_refresh)
            }
            Button::Down => {
                self.state.menu_index = wrap_increment(self.state.menu_index, MENU_LENGTH);
                self.enter_menu(scroll_refresh)
            }
        }
    }

    fn on_list(&mut self, button: Button, mode: Mode) -> Outcome {
        match button {
            Button::Menu if self.list_len > 0 => Outcome::act(Action::SelectListEntry {
                index: self.state.list_index,
            }),
            Button::Menu => Outcome::none(),
            Button::Back => self.enter_menu(Refresh::Full),
            Button::Up => {
                let next = wrap_decrement(self.state.list_index, self.list_len);
                self.move_list_cursor(next, mode)
            }
            Button::Down => {
                let next = wrap_increment(self.state.list_index, self.list_len);
                self.move_list_cursor(next, mode)
            }
        }
    }

    fn on_firmware_update(&mut self, button: Button) -> Outcome {
        match button {
            Button::Menu => Outcome::act(Action::BeginFirmwareUpdate),
            Button::Back => self.enter_menu(Refresh::Full),
            Button::Up | Button::Down => Outcome::none(),
        }
    }

    fn on_app(&mut self, button: Button) -> Outcome {
        match button {
            Button::Back => self.enter_menu(Refresh::Full),
            _ => Outcome::none(),
        }
    }

    fn enter_menu(&mut self, refresh: Refresh) -> Outcome {
        self.state.gui_state = GuiState::MainMenu;
        Outcome::act(Action::ShowMenu {
            index: self.state.menu_index,
            refresh,
        })
    }

    fn open_item(&mut self) -> Outcome {
        let Some(item) = MenuItem::from_index(self.state.menu_index) else {
            return Outcome::none();
        };
        self.state.gui_state = item.target_state();
        let action = match item {
            MenuItem::ShoppingList => Action::ShowList {
                index: self.state.list_index,
                page_start: page_start(self.state.list_index, self.page_size),
                refresh: Refresh::Full,
            },
            MenuItem::UpdateFirmware => Action::ShowFirmwareUpdate,
            other => Action::OpenApp(other),
        };
        Outcome::act(action)
    }

    fn move_list_cursor(&mut self, next: usize, mode: Mode) -> Outcome {
        if self.list_len == 0 {
            return Outcome::none();
        }
        let old_page = page_start(self.state.list_index, self.page_size);
        let new_page = page_start(next, self.page_size);
        self.state.list_index = next;

        // A new page repaints everything; within a page only the cursor moves
        let refresh = if old_page != new_page {
            Refresh::Full
        } else if mode == Mode::FastRepeat {
            Refresh::Fast
        } else {
            Refresh::Partial
        };
        Outcome::act(Action::ShowList {
            index: next,
            page_start: new_page,
            refresh,
        })
    }
}
