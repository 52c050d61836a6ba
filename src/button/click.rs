//! Multi-click classification.
//!
//! Turns confirmed presses into press / double-click / triple-click
//! events. The classifier is pure bookkeeping: it returns the events to
//! fire and leaves calling the callbacks to the state machine.
//!
//! The click count is the total number of confirmed presses in the current
//! sequence, so 1 is a single press, 2 a double click and 3 a triple click.

use super::ButtonEvent;
use crate::config::MAX_CLICKS;
use crate::tick::Tick;

/// Multi-click policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickMode {
    /// Every confirmed press fires the press event, nothing else.
    #[default]
    Off,
    /// Press fires immediately; double/triple click fire on top of it.
    Normal,
    /// Classification is deferred until the sequence is known to be over;
    /// exactly one of press / double / triple fires per sequence.
    Combined,
}

/// What combined mode does with a fourth click inside the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickOverflow {
    /// Abandon the sequence; nothing fires for it.
    Reset,
    /// Keep counting as a triple click.
    #[default]
    ClampToTriple,
}

/// Events produced by one classifier step (at most two).
pub(crate) type Fired = [Option<ButtonEvent>; 2];

const NONE: Fired = [None, None];

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ClickCounter {
    pub(crate) mode: ClickMode,
    pub(crate) overflow: ClickOverflow,
    count: u8,
    last_click: Tick,
    /// Set once the current debounce cycle has been counted.
    cycle_counted: bool,
    /// Set once the current repeat session has fired its press.
    repeat_reported: bool,
}

impl ClickCounter {
    pub(crate) fn count(&self) -> u8 {
        self.count
    }

    /// Forget any sequence in progress.
    pub(crate) fn clear(&mut self) {
        self.count = 0;
        self.cycle_counted = false;
        self.repeat_reported = false;
    }

    /// A press has just been confirmed by the debounce.
    pub(crate) fn on_press(&mut self, now: Tick, window: Tick) -> Fired {
        let within = now.wrapping_sub(self.last_click) <= window;
        let fired = match self.mode {
            ClickMode::Off => [Some(ButtonEvent::Press), None],
            ClickMode::Normal => self.count_normal(within),
            ClickMode::Combined => self.count_combined(within),
        };
        self.last_click = now;
        fired
    }

    fn count_normal(&mut self, within: bool) -> Fired {
        self.count = if self.count > 0 && within {
            self.count + 1
        } else {
            1
        };

        let multi = match self.count {
            2 => Some(ButtonEvent::DoubleClick),
            3 => Some(ButtonEvent::TripleClick),
            1 => None,
            _ => {
                self.count = 0;
                None
            }
        };
        [Some(ButtonEvent::Press), multi]
    }

    fn count_combined(&mut self, within: bool) -> Fired {
        if self.cycle_counted {
            return NONE;
        }
        self.cycle_counted = true;

        // A stale sequence that was never resolved in Idle ends here.
        let stale = if self.count > 0 && !within {
            let event = Self::classify(self.count);
            self.count = 0;
            event
        } else {
            None
        };

        self.count += 1;
        if self.count > MAX_CLICKS {
            self.count = match self.overflow {
                ClickOverflow::Reset => 0,
                ClickOverflow::ClampToTriple => MAX_CLICKS,
            };
        }
        [stale, None]
    }

    /// The button was released after reaching `Repeat`.
    ///
    /// In combined mode a held press still reports as a press, once per
    /// repeat session, and consumes the pending sequence.
    pub(crate) fn on_repeat_release(&mut self) -> Option<ButtonEvent> {
        if self.mode != ClickMode::Combined || self.repeat_reported {
            return None;
        }
        self.repeat_reported = true;
        self.count = 0;
        Some(ButtonEvent::Press)
    }

    /// Runs on every poll spent in `Idle`.
    pub(crate) fn on_idle(&mut self, now: Tick, window: Tick) -> Option<ButtonEvent> {
        self.cycle_counted = false;
        self.repeat_reported = false;

        if self.mode != ClickMode::Combined || self.count == 0 {
            return None;
        }
        if now.wrapping_sub(self.last_click) <= window {
            return None;
        }

        let event = Self::classify(self.count);
        self.count = 0;
        event
    }

    fn classify(count: u8) -> Option<ButtonEvent> {
        match count {
            1 => Some(ButtonEvent::Press),
            2 => Some(ButtonEvent::DoubleClick),
            3 => Some(ButtonEvent::TripleClick),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(mode: ClickMode) -> ClickCounter {
        ClickCounter {
            mode,
            ..ClickCounter::default()
        }
    }

    #[test]
    fn off_mode_only_reports_press() {
        let mut clicks = counter(ClickMode::Off);
        assert_eq!(clicks.on_press(100, 300), [Some(ButtonEvent::Press), None]);
        assert_eq!(clicks.on_press(150, 300), [Some(ButtonEvent::Press), None]);
        assert_eq!(clicks.count(), 0);
        assert_eq!(clicks.on_idle(1000, 300), None);
    }

    #[test]
    fn normal_mode_counts_total_clicks() {
        let mut clicks = counter(ClickMode::Normal);
        assert_eq!(clicks.on_press(100, 300), [Some(ButtonEvent::Press), None]);
        assert_eq!(clicks.count(), 1);
        assert_eq!(
            clicks.on_press(200, 300),
            [Some(ButtonEvent::Press), Some(ButtonEvent::DoubleClick)]
        );
        assert_eq!(
            clicks.on_press(300, 300),
            [Some(ButtonEvent::Press), Some(ButtonEvent::TripleClick)]
        );
        assert_eq!(clicks.on_press(400, 300), [Some(ButtonEvent::Press), None]);
        assert_eq!(clicks.count(), 0);
    }

    #[test]
    fn normal_mode_gap_restarts_sequence() {
        let mut clicks = counter(ClickMode::Normal);
        clicks.on_press(100, 300);
        assert_eq!(clicks.on_press(401, 300), [Some(ButtonEvent::Press), None]);
        assert_eq!(clicks.count(), 1);
    }

    #[test]
    fn normal_mode_window_is_inclusive() {
        let mut clicks = counter(ClickMode::Normal);
        clicks.on_press(100, 300);
        assert_eq!(
            clicks.on_press(400, 300),
            [Some(ButtonEvent::Press), Some(ButtonEvent::DoubleClick)]
        );
    }

    #[test]
    fn combined_mode_counts_once_per_cycle() {
        let mut clicks = counter(ClickMode::Combined);
        assert_eq!(clicks.on_press(100, 300), NONE);
        assert_eq!(clicks.on_press(120, 300), NONE);
        assert_eq!(clicks.count(), 1);
    }

    #[test]
    fn combined_mode_resolves_after_quiet_window() {
        let mut clicks = counter(ClickMode::Combined);
        clicks.on_press(100, 300);
        assert_eq!(clicks.on_idle(150, 300), None);
        clicks.on_press(200, 300);
        assert_eq!(clicks.on_idle(500, 300), None);
        assert_eq!(clicks.on_idle(501, 300), Some(ButtonEvent::DoubleClick));
        assert_eq!(clicks.count(), 0);
        assert_eq!(clicks.on_idle(900, 300), None);
    }

    #[test]
    fn combined_overflow_policies() {
        let mut reset = counter(ClickMode::Combined);
        reset.overflow = ClickOverflow::Reset;
        let mut clamp = counter(ClickMode::Combined);

        for t in [100, 200, 300, 400] {
            reset.on_press(t, 300);
            reset.on_idle(t + 50, 300);
            clamp.on_press(t, 300);
            clamp.on_idle(t + 50, 300);
        }
        assert_eq!(reset.count(), 0);
        assert_eq!(clamp.count(), 3);
        assert_eq!(reset.on_idle(1000, 300), None);
        assert_eq!(clamp.on_idle(1000, 300), Some(ButtonEvent::TripleClick));
    }

    #[test]
    fn combined_stale_sequence_resolves_on_next_press() {
        let mut clicks = counter(ClickMode::Combined);
        clicks.on_press(100, 300);
        clicks.on_idle(150, 300);
        assert_eq!(clicks.on_press(1000, 300), [Some(ButtonEvent::Press), None]);
        assert_eq!(clicks.count(), 1);
    }

    #[test]
    fn combined_repeat_release_reports_once() {
        let mut clicks = counter(ClickMode::Combined);
        clicks.on_press(100, 300);
        assert_eq!(clicks.on_repeat_release(), Some(ButtonEvent::Press));
        assert_eq!(clicks.on_repeat_release(), None);
        assert_eq!(clicks.count(), 0);

        // Idle re-arms the session latch.
        assert_eq!(clicks.on_idle(2000, 300), None);
        assert_eq!(clicks.on_repeat_release(), Some(ButtonEvent::Press));
    }

    #[test]
    fn repeat_release_ignored_outside_combined_mode() {
        let mut clicks = counter(ClickMode::Normal);
        clicks.on_press(100, 300);
        assert_eq!(clicks.on_repeat_release(), None);
    }
}
