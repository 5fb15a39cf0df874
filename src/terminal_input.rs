use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;

use crate::input::{Buttons, InputSource};

/// What a single key press means to the terminal front-end.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyAction {
    Press(Buttons),
    Quit,
    Ignore,
}

/// Maps a terminal key to a gamepad button.
#[must_use]
pub fn key_action(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => KeyAction::Press(Buttons::UP),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => KeyAction::Press(Buttons::DOWN),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => KeyAction::Press(Buttons::LEFT),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => KeyAction::Press(Buttons::RIGHT),
        KeyCode::Char('x' | 'X' | 'z' | 'Z') => KeyAction::Press(Buttons::BUTTON_1),
        KeyCode::Enter | KeyCode::Char(' ' | 'p' | 'P') => KeyAction::Press(Buttons::BUTTON_2),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// What the terminal tells us about key state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyReporting {
    /// Press, repeat and release events are distinguished.
    EventTypes,
    /// Every key event, autorepeat included, arrives as a press.
    PressOnly,
}

/// Frames a button stays held after its last press when releases are not
/// reported. Longer than a typical autorepeat interval (30-40 ms), so a held
/// key keeps its bit set between repeats.
pub const PRESS_LATCH_FRAMES: u8 = 8;

/// Button mask that persists across frames, built from key events.
#[derive(Debug, Clone)]
pub struct HeldButtons {
    reporting: KeyReporting,
    held: Buttons,
    latches: [u8; Buttons::ALL.len()],
}

impl HeldButtons {
    #[must_use]
    pub fn new(reporting: KeyReporting) -> Self {
        Self {
            reporting,
            held: Buttons::NONE,
            latches: [0; Buttons::ALL.len()],
        }
    }

    /// Folds one key event for `buttons` into the mask.
    pub fn apply(&mut self, kind: KeyEventKind, buttons: Buttons) {
        match (self.reporting, kind) {
            (KeyReporting::EventTypes, KeyEventKind::Press) => self.held = self.held | buttons,
            (KeyReporting::EventTypes, KeyEventKind::Release) => {
                self.held = self.held.without(buttons);
            }
            (KeyReporting::EventTypes, KeyEventKind::Repeat)
            | (KeyReporting::PressOnly, KeyEventKind::Release) => {}
            (KeyReporting::PressOnly, KeyEventKind::Press | KeyEventKind::Repeat) => {
                for (button, frames) in Buttons::ALL.into_iter().zip(&mut self.latches) {
                    if buttons.contains(button) {
                        *frames = PRESS_LATCH_FRAMES;
                    }
                }
            }
        }
    }

    /// Returns the buttons held this frame and ages press latches by one.
    pub fn next_frame(&mut self) -> Buttons {
        match self.reporting {
            KeyReporting::EventTypes => self.held,
            KeyReporting::PressOnly => {
                let mut held = Buttons::NONE;
                for (button, frames) in Buttons::ALL.into_iter().zip(&mut self.latches) {
                    if *frames > 0 {
                        held = held | button;
                        *frames -= 1;
                    }
                }
                held
            }
        }
    }
}

/// Keyboard-backed [`InputSource`].
#[derive(Debug)]
pub struct TerminalInput {
    held: HeldButtons,
    quit_requested: bool,
}

impl TerminalInput {
    #[must_use]
    pub fn new(reporting: KeyReporting) -> Self {
        Self {
            held: HeldButtons::new(reporting),
            quit_requested: false,
        }
    }

    /// True once a quit key has been seen.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn drain_events(&mut self) -> std::io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };

            match key_action(key) {
                KeyAction::Press(buttons) => self.held.apply(key.kind, buttons),
                KeyAction::Quit if key.kind == KeyEventKind::Press => self.quit_requested = true,
                KeyAction::Quit | KeyAction::Ignore => {}
            }
        }

        Ok(())
    }
}

impl InputSource for TerminalInput {
    fn read_buttons(&mut self) -> Buttons {
        if let Err(error) = self.drain_events() {
            warn!("failed to read terminal events: {error}");
        }
        self.held.next_frame()
    }
}
