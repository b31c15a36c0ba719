//! Long-press gesture detection.
//!
//! One explicit state machine (`Idle → Pending → Triggered/Cancelled`)
//! serves pointer-style and touch-style inputs alike: the platform input
//! adapters translate into press-started, press-ended (release), and
//! [`cancel`](LongPressDetector::cancel) for a pointer leaving the element,
//! plus a timer poll. A short interaction selects the entry; a sustained
//! one opens its editor; a press abandoned by leaving resolves to nothing.

use std::time::{Duration, Instant};

use crate::menu::MenuId;

/// Reference long-press threshold.
pub const DEFAULT_LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(500);

/// What a completed interaction turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Released before the threshold: a selection.
    ShortPress(MenuId),
    /// Held to the threshold or beyond: open the editor.
    LongPress(MenuId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectorState {
    Idle,
    Pending { target: MenuId, pressed_at: Instant },
}

/// Timer-driven detector distinguishing "select" from "edit".
///
/// The caller feeds abstract start/end events and polls the armed timer;
/// the detector never spawns anything itself, which keeps it headless and
/// the timer trivially cancellable.
#[derive(Debug)]
pub struct LongPressDetector {
    threshold: Duration,
    state: DetectorState,
}

impl Default for LongPressDetector {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_PRESS_THRESHOLD)
    }
}

impl LongPressDetector {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            state: DetectorState::Idle,
        }
    }

    /// Whether an interaction is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, DetectorState::Pending { .. })
    }

    /// Interaction started over `target` (mouse down or touch start).
    ///
    /// Starting a new press while one is pending re-arms on the new target.
    pub fn press_started(&mut self, target: MenuId, at: Instant) {
        self.state = DetectorState::Pending {
            target,
            pressed_at: at,
        };
    }

    /// Interaction released (mouse up or touch end).
    ///
    /// Returns the gesture the interaction resolved to, or `None` when no
    /// press was pending (e.g. the timer already fired). The timer is
    /// disarmed either way. A pointer leaving the element is not a
    /// release; route that to [`cancel`](Self::cancel) instead.
    pub fn press_ended(&mut self, at: Instant) -> Option<Gesture> {
        let DetectorState::Pending { target, pressed_at } = self.state else {
            return None;
        };
        self.state = DetectorState::Idle;

        if at.duration_since(pressed_at) >= self.threshold {
            Some(Gesture::LongPress(target))
        } else {
            Some(Gesture::ShortPress(target))
        }
    }

    /// Timer poll. Fires [`Gesture::LongPress`] once the press has been
    /// held to the threshold without release, returning to `Idle`.
    pub fn poll(&mut self, now: Instant) -> Option<MenuId> {
        let DetectorState::Pending { target, pressed_at } = self.state else {
            return None;
        };
        if now.duration_since(pressed_at) < self.threshold {
            return None;
        }

        self.state = DetectorState::Idle;
        tracing::debug!("long press triggered for entry {target}");
        Some(target)
    }

    /// Disarms any pending press without resolving it (pointer left the
    /// element, or the interaction was superseded).
    pub fn cancel(&mut self) {
        self.state = DetectorState::Idle;
    }
}
