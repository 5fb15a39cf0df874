use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use log::{debug, error, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Theme;
use crate::feedback::{Feedback, Tone};
use crate::game::GameState;
use crate::renderer;
use crate::terminal_input::KeyReporting;

/// Set while keyboard enhancement flags are pushed, so restoring the terminal
/// from the panic hook knows whether to pop them.
static KEYBOARD_ENHANCED: AtomicBool = AtomicBool::new(false);

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one game session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
    key_reporting: KeyReporting,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let key_reporting = enable_key_release_events(&mut stdout);

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self {
                terminal,
                key_reporting,
            }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }

    /// Whether key releases are reported in this session.
    #[must_use]
    pub fn key_reporting(&self) -> KeyReporting {
        self.key_reporting
    }
}

/// Asks the terminal for press/repeat/release events when it supports the
/// keyboard enhancement protocol.
fn enable_key_release_events(stdout: &mut io::Stdout) -> KeyReporting {
    match supports_keyboard_enhancement() {
        Ok(true) => {}
        Ok(false) => {
            info!("keyboard enhancement unsupported, latching key presses");
            return KeyReporting::PressOnly;
        }
        Err(error) => {
            debug!("keyboard enhancement query failed: {error}");
            return KeyReporting::PressOnly;
        }
    }

    let flags = KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
    match execute!(stdout, PushKeyboardEnhancementFlags(flags)) {
        Ok(()) => {
            KEYBOARD_ENHANCED.store(true, Ordering::SeqCst);
            KeyReporting::EventTypes
        }
        Err(error) => {
            debug!("failed to enable key release events: {error}");
            KeyReporting::PressOnly
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen; safe to call more than once.
pub fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    if KEYBOARD_ENHANCED.swap(false, Ordering::SeqCst) {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    execute!(stdout, Show, LeaveAlternateScreen)
}

/// [`Feedback`] that draws into the terminal session.
///
/// There is no audio device behind a terminal, so tones only reach the log.
/// A failed draw is kept for the run loop to pick up, since the engine never
/// sees presentation errors.
pub struct TerminalFeedback {
    session: TerminalSession,
    theme: &'static Theme,
    draw_error: Option<io::Error>,
}

impl TerminalFeedback {
    #[must_use]
    pub fn new(session: TerminalSession, theme: &'static Theme) -> Self {
        Self {
            session,
            theme,
            draw_error: None,
        }
    }

    /// Returns the first draw error since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.draw_error.take()
    }
}

impl Feedback for TerminalFeedback {
    fn play_tone(&mut self, tone: Tone) {
        debug!(
            "tone freq={:#x} env={:#x} vol={} channel={:#x}",
            tone.frequency, tone.envelope, tone.volume, tone.channel
        );
    }

    fn draw_frame(&mut self, state: &GameState) {
        if self.draw_error.is_some() {
            return;
        }

        let theme = self.theme;
        let result = self
            .session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, state, theme));
        if let Err(draw_error) = result {
            error!("failed to draw frame: {draw_error}");
            self.draw_error = Some(draw_error);
        }
    }
}
