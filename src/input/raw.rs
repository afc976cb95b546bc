//! Low-level input collection: crossterm polling, mouse wheel coalescing, and translation
//! into primitive events that the higher-level input service can consume.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default coalescing window in milliseconds for wheel events.
const DEFAULT_COALESCE_WINDOW_MS: u64 = 12;
/// Rows moved by a single mouse wheel tick.
const MOUSE_SCROLL_ROWS: u64 = 1;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Direction of a list scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Paste(String),
    Resize {
        width: u16,
        height: u16,
    },
    Scroll {
        direction: ScrollDirection,
        rows: u64,
    },
}

/// Folds bursts of wheel ticks in one direction into a single scroll.
#[derive(Debug, Clone)]
pub struct InputCoalescer {
    window: Duration,
    pending: Option<PendingScroll>,
}

#[derive(Debug, Clone)]
struct PendingScroll {
    direction: ScrollDirection,
    rows: u64,
    last_event: Instant,
}

impl InputCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn with_default_window() -> Self {
        Self::new(Duration::from_millis(DEFAULT_COALESCE_WINDOW_MS))
    }

    /// Register a wheel tick; returns the previous burst if the direction flipped.
    pub fn push(
        &mut self,
        direction: ScrollDirection,
        rows: u64,
        now: Instant,
    ) -> Option<(ScrollDirection, u64)> {
        match self.pending {
            Some(ref mut pending) if pending.direction == direction => {
                pending.rows = pending.rows.saturating_add(rows);
                pending.last_event = now;
                None
            }
            _ => {
                let flushed = self.flush();
                self.pending = Some(PendingScroll {
                    direction,
                    rows,
                    last_event: now,
                });
                flushed
            }
        }
    }

    /// Flush the pending burst once the window has passed without new ticks.
    pub fn flush_if_stale(&mut self, now: Instant) -> Option<(ScrollDirection, u64)> {
        match &self.pending {
            Some(pending) if now.duration_since(pending.last_event) >= self.window => self.flush(),
            _ => None,
        }
    }

    pub fn flush(&mut self) -> Option<(ScrollDirection, u64)> {
        self.pending
            .take()
            .map(|pending| (pending.direction, pending.rows))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Collector that polls crossterm for events and applies wheel coalescing.
#[derive(Debug)]
pub struct RawInputCollector {
    coalescer: InputCoalescer,
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::with_coalescer(InputCoalescer::with_default_window())
    }

    /// Custom coalescing window (tests use short ones).
    pub fn with_window(window: Duration) -> Self {
        Self::with_coalescer(InputCoalescer::new(window))
    }

    fn with_coalescer(coalescer: InputCoalescer) -> Self {
        Self {
            coalescer,
            pending_events: VecDeque::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending_events.is_empty() && self.coalescer.is_empty()
    }

    /// Feed a synthetic event, as if crossterm had produced it.
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Next queued event without blocking. Queued events come first so a key pressed after
    /// a wheel burst still waits for the burst to be flushed ahead of it.
    pub fn try_flush(&mut self) -> Option<RawInputEvent> {
        self.pop_pending().or_else(|| {
            self.coalescer
                .flush_if_stale(Instant::now())
                .map(|(direction, rows)| RawInputEvent::Scroll { direction, rows })
        })
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_flush() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(poll_timeout)? {
            return Ok(self.try_flush());
        }

        let event = event::read()?;
        self.enqueue_event(event);
        Ok(self.pop_pending())
    }

    fn enqueue_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                self.flush_pending_scroll();
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Paste(text) => {
                self.flush_pending_scroll();
                self.pending_events.push_back(RawInputEvent::Paste(text));
            }
            Event::Resize(width, height) => {
                self.flush_pending_scroll();
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let direction = match mouse_event.kind {
            MouseEventKind::ScrollUp => ScrollDirection::Up,
            MouseEventKind::ScrollDown => ScrollDirection::Down,
            _ => return,
        };

        if let Some((flushed, rows)) =
            self.coalescer
                .push(direction, MOUSE_SCROLL_ROWS, Instant::now())
        {
            self.pending_events.push_back(RawInputEvent::Scroll {
                direction: flushed,
                rows,
            });
        }
    }

    fn flush_pending_scroll(&mut self) {
        if let Some((direction, rows)) = self.coalescer.flush() {
            self.pending_events
                .push_back(RawInputEvent::Scroll { direction, rows });
        }
    }

    fn pop_pending(&mut self) -> Option<RawInputEvent> {
        self.pending_events.pop_front()
    }
}

impl Default for RawInputCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn wheel(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn accumulates_same_direction_within_window() {
        let mut collector = RawInputCollector::with_window(Duration::from_millis(10));
        collector.process_event(wheel(MouseEventKind::ScrollDown));
        collector.process_event(wheel(MouseEventKind::ScrollDown));
        collector.process_event(wheel(MouseEventKind::ScrollDown));
        assert!(collector.try_flush().is_none());

        std::thread::sleep(Duration::from_millis(11));
        assert_eq!(
            collector.try_flush(),
            Some(RawInputEvent::Scroll {
                direction: ScrollDirection::Down,
                rows: 3
            })
        );
        assert!(collector.is_idle());
    }

    #[test]
    fn flushes_on_direction_change() {
        let mut coalescer = InputCoalescer::new(Duration::from_millis(10));
        let now = Instant::now();

        assert!(coalescer.push(ScrollDirection::Up, 1, now).is_none());
        let flushed = coalescer
            .push(ScrollDirection::Down, 1, now + Duration::from_millis(3))
            .unwrap();
        assert_eq!(flushed, (ScrollDirection::Up, 1));
        assert_eq!(coalescer.flush(), Some((ScrollDirection::Down, 1)));
    }

    #[test]
    fn key_press_flushes_pending_scroll_first() {
        let mut collector = RawInputCollector::new();
        collector.process_event(wheel(MouseEventKind::ScrollUp));
        collector.process_event(Event::Key(KeyEvent::new(
            KeyCode::Char('d'),
            KeyModifiers::NONE,
        )));

        assert!(matches!(
            collector.try_flush(),
            Some(RawInputEvent::Scroll {
                direction: ScrollDirection::Up,
                rows: 1
            })
        ));
        match collector.try_flush() {
            Some(RawInputEvent::Key(key)) => assert_eq!(key.code, KeyCode::Char('d')),
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn handles_resize_after_scroll() {
        let mut collector = RawInputCollector::new();
        collector.process_event(wheel(MouseEventKind::ScrollDown));
        collector.process_event(Event::Resize(80, 40));

        assert!(matches!(
            collector.try_flush(),
            Some(RawInputEvent::Scroll { .. })
        ));
        assert_eq!(
            collector.try_flush(),
            Some(RawInputEvent::Resize {
                width: 80,
                height: 40
            })
        );
    }

    #[test]
    fn non_wheel_mouse_events_are_ignored() {
        let mut collector = RawInputCollector::new();
        collector.process_event(wheel(MouseEventKind::Moved));
        assert!(collector.is_idle());
    }
}
