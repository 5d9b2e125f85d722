//! Event handling for the deeptime TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// A tick event for playback and clock updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling is blocking, so it gets its own thread
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Some(Event::Key(key)),
                            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(e) = event {
                            if tx_clone.send(e).is_err() {
                                break;
                            }
                        }
                    }
                } else if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    Back,
    StepBackward,
    StepForward,
    Finer,
    Coarser,
    TogglePlayback,
    Faster,
    Slower,
    ToggleEarthView,
    ZoomToSelection,
    EditStart,
    EditEnd,
    None,
}

/// Convert a key event to a timeline action.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Esc => Action::Back,
        KeyCode::Left | KeyCode::Char('h') => Action::StepBackward,
        KeyCode::Right | KeyCode::Char('l') => Action::StepForward,
        KeyCode::Char('[' | '-') => Action::Finer,
        KeyCode::Char(']' | '+' | '=') => Action::Coarser,
        KeyCode::Char(' ') => Action::TogglePlayback,
        KeyCode::Char('>' | '.') => Action::Faster,
        KeyCode::Char('<' | ',') => Action::Slower,
        KeyCode::Char('v') => Action::ToggleEarthView,
        KeyCode::Char('z') => Action::ZoomToSelection,
        KeyCode::Char('s') => Action::EditStart,
        KeyCode::Char('e') => Action::EditEnd,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(event), Action::Quit);
    }

    #[test]
    fn test_timeline_keys() {
        assert_eq!(key_to_action(key(KeyCode::Left)), Action::StepBackward);
        assert_eq!(key_to_action(key(KeyCode::Char('l'))), Action::StepForward);
        assert_eq!(key_to_action(key(KeyCode::Char('['))), Action::Finer);
        assert_eq!(key_to_action(key(KeyCode::Char(']'))), Action::Coarser);
        assert_eq!(key_to_action(key(KeyCode::Char(' '))), Action::TogglePlayback);
        assert_eq!(key_to_action(key(KeyCode::Char('>'))), Action::Faster);
        assert_eq!(key_to_action(key(KeyCode::Char(','))), Action::Slower);
        assert_eq!(key_to_action(key(KeyCode::Char('v'))), Action::ToggleEarthView);
        assert_eq!(key_to_action(key(KeyCode::Char('s'))), Action::EditStart);
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::None);
        assert_eq!(key_to_action(key(KeyCode::F(5))), Action::None);
    }
}
