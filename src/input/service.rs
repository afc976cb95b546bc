//! High-level input service.
//!
//! Turns raw terminal events into focus-independent `InputAction`s. What an action means
//! (typing into a field, a list shortcut, confirming a dialog) is decided by the controller,
//! which knows where focus currently is.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent, ScrollDirection};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// High-level input actions emitted by the input service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// A printable character (also used for list shortcuts)
    Insert(char),
    /// Pasted text, inserted into the focused field
    Paste(String),
    DeleteBackward,
    /// Enter
    Submit,
    /// Esc
    Cancel,
    /// Tab
    FocusNext,
    /// Shift-Tab
    FocusPrevious,
    Scroll {
        direction: ScrollDirection,
        rows: u64,
    },
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    /// Ctrl-C, honored regardless of focus
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
}

/// Translate a key event into an action.
pub fn translate_key(key_event: KeyEvent) -> InputAction {
    if key_event.kind != KeyEventKind::Press {
        return InputAction::NoAction;
    }

    match (key_event.code, key_event.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
        (KeyCode::Char(ch), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            InputAction::Insert(ch)
        }
        (KeyCode::Backspace, _) => InputAction::DeleteBackward,
        (KeyCode::Enter, _) => InputAction::Submit,
        (KeyCode::Esc, _) => InputAction::Cancel,
        (KeyCode::BackTab, _) => InputAction::FocusPrevious,
        (KeyCode::Tab, modifiers) if modifiers.contains(KeyModifiers::SHIFT) => {
            InputAction::FocusPrevious
        }
        (KeyCode::Tab, _) => InputAction::FocusNext,
        (KeyCode::Up, _) => InputAction::Scroll {
            direction: ScrollDirection::Up,
            rows: 1,
        },
        (KeyCode::Down, _) => InputAction::Scroll {
            direction: ScrollDirection::Down,
            rows: 1,
        },
        (KeyCode::PageUp, _) => InputAction::PageUp,
        (KeyCode::PageDown, _) => InputAction::PageDown,
        (KeyCode::Home, _) => InputAction::GoToStart,
        (KeyCode::End, _) => InputAction::GoToEnd,
        _ => InputAction::NoAction,
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            raw_input: RawInputCollector::new(),
        }
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(Self::process_raw_event(raw_event));
            while let Some(extra_event) = self.raw_input.try_flush() {
                actions.extend(Self::process_raw_event(extra_event));
            }
        }

        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        self.raw_input.process_event(event);
        let mut actions = Vec::new();
        while let Some(raw_event) = self.raw_input.try_flush() {
            actions.extend(Self::process_raw_event(raw_event));
        }
        actions
    }

    fn process_raw_event(event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => translate_key(key_event),
            RawInputEvent::Paste(text) => InputAction::Paste(text),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Scroll { direction, rows } => InputAction::Scroll { direction, rows },
        };

        match action {
            InputAction::NoAction => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the event loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    log::error!("input thread error: {}", err);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn printable_keys_become_inserts() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(key(KeyCode::Char('u'))),
            vec![InputAction::Insert('u')]
        );
        assert_eq!(
            service.process_event(Event::Key(KeyEvent::new(
                KeyCode::Char('G'),
                KeyModifiers::SHIFT
            ))),
            vec![InputAction::Insert('G')]
        );
    }

    #[test]
    fn control_c_quits_and_other_chords_are_dropped() {
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            InputAction::NoAction
        );
    }

    #[test]
    fn editing_and_focus_keys() {
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            InputAction::Submit
        );
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            InputAction::Cancel
        );
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            InputAction::FocusNext
        );
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            InputAction::FocusPrevious
        );
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)),
            InputAction::DeleteBackward
        );
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate_key(release), InputAction::NoAction);
    }

    #[test]
    fn wheel_then_key_preserves_order() {
        let mut service = InputService::new();
        assert!(service
            .process_event(Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            }))
            .is_empty());

        let actions = service.process_event(key(KeyCode::Char('d')));
        assert_eq!(
            actions,
            vec![
                InputAction::Scroll {
                    direction: ScrollDirection::Down,
                    rows: 1,
                },
                InputAction::Insert('d'),
            ]
        );
    }

    #[test]
    fn paste_and_resize_pass_through() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(Event::Paste("12.50".to_string())),
            vec![InputAction::Paste("12.50".to_string())]
        );
        assert_eq!(
            service.process_event(Event::Resize(100, 30)),
            vec![InputAction::Resize {
                width: 100,
                height: 30
            }]
        );
    }
}
