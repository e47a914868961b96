//! Per-button debounce state.

use crate::time::TimeInstant;

/// Debounced state of a single button.
///
/// Written by the interrupt-time update ([`observe`](Self::observe)); queries
/// only read the state and clear the change flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRecord<I> {
    pressed: bool,
    changed: bool,
    last_change: Option<I>,
}

impl<I: TimeInstant> ButtonRecord<I> {
    /// Creates a released, unchanged record with no transition history.
    ///
    /// With no previous transition there is nothing to debounce against, so
    /// the first edge after creation is accepted immediately, however soon
    /// after boot it arrives.
    pub const fn new() -> Self {
        Self {
            pressed: false,
            changed: false,
            last_change: None,
        }
    }

    /// Returns the debounced state, `true` when pressed.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Returns whether an accepted transition is still unconsumed.
    #[inline]
    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// Instant of the most recent raw transition, if any was observed.
    #[inline]
    pub fn last_change(&self) -> Option<I> {
        self.last_change
    }

    /// Returns the change flag, clearing it when `clear` is set.
    pub fn take_change(&mut self, clear: bool) -> bool {
        let changed = self.changed;
        if clear {
            self.changed = false;
        }
        changed
    }

    /// Clears the change flag without touching the debounced state.
    #[inline]
    pub fn clear_change(&mut self) {
        self.changed = false;
    }

    /// Feeds a raw reading taken at `now` into the quiet-period debounce.
    ///
    /// A reading that differs from the debounced state is accepted only if
    /// more than `window` has passed since the previous raw transition. The
    /// transition time is refreshed whether or not the reading was accepted,
    /// so every bounce restarts the quiet period.
    ///
    /// Returns `true` if the debounced state changed.
    pub fn observe(&mut self, pressed: bool, now: I, window: I::Duration) -> bool {
        if pressed == self.pressed {
            return false;
        }

        let quiet = match self.last_change {
            None => true,
            Some(last) => now.duration_since(last) > window,
        };

        if quiet {
            self.pressed = pressed;
            self.changed = true;
        }

        self.last_change = Some(now);
        quiet
    }
}

impl<I: TimeInstant> Default for ButtonRecord<I> {
    fn default() -> Self {
        Self::new()
    }
}
