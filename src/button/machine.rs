//! Debounce state machine.
//!
//! One call to [`Button::step`] evaluates the rules of the current state
//! exactly once and returns. Nothing blocks: every timer is an elapsed-time
//! check against the tick captured at the start of the poll.

use super::{Button, ButtonEvent, State};
use crate::error::Error;
use crate::pin::PinReader;
use crate::tick::{Clock, Tick};

impl<P: PinReader> Button<P> {
    /// Poll the button once.
    ///
    /// Call this for every button on every scheduler tick. Callbacks run
    /// synchronously from inside this call.
    ///
    /// Fails with [`Error::InvalidArgument`] only if `clock` has no tick
    /// source; the button is left untouched in that case.
    pub fn step<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<(), Error> {
        let now = clock.now()?;
        let active = self.pin.is_active();

        // Timers count from the first poll, not from tick 0.
        if !self.started {
            self.started = true;
            self.last_tick = now;
        }

        match self.state {
            State::Idle => self.idle(now, active),
            State::Debounce => self.debounce(now, active),
            State::Pressed => self.pressed(now, active),
            State::Repeat => self.repeat(now, active),
            State::DebounceRelease => self.debounce_release(now, active),
            State::Release => {
                self.fire(ButtonEvent::Release);
                self.enter(State::Idle);
            }
            State::ReleaseAfterRepeat => {
                self.fire(ButtonEvent::ReleaseAfterRepeat);
                self.enter(State::Idle);
            }
        }
        Ok(())
    }

    fn idle(&mut self, now: Tick, active: bool) {
        if let Some(event) = self.clicks.on_idle(now, self.timing.click_window) {
            self.fire(event);
        }

        if active {
            self.last_tick = now;
            self.enter(State::Debounce);
        } else if self.timing.idle_timeout > 0
            && now.wrapping_sub(self.last_tick) >= self.timing.idle_timeout
        {
            self.last_tick = now;
            self.fire(ButtonEvent::Idle);
        }
    }

    fn debounce(&mut self, now: Tick, active: bool) {
        if now.wrapping_sub(self.last_tick) < self.timing.debounce {
            return;
        }

        if active {
            self.last_tick = now;
            self.enter(State::Pressed);
            for event in self
                .clicks
                .on_press(now, self.timing.click_window)
                .into_iter()
                .flatten()
            {
                self.fire(event);
            }
        } else {
            // Bounce, not a press.
            self.enter(State::Idle);
        }
    }

    fn pressed(&mut self, now: Tick, active: bool) {
        if !active {
            self.begin_release(now, State::Pressed);
        } else if now.wrapping_sub(self.last_tick) >= self.timing.long_press {
            self.last_tick = now;
            self.enter(State::Repeat);
            self.fire(ButtonEvent::LongPress);
        }
    }

    fn repeat(&mut self, now: Tick, active: bool) {
        if !active {
            if let Some(event) = self.clicks.on_repeat_release() {
                self.fire(event);
            }
            self.begin_release(now, State::Repeat);
        } else if now.wrapping_sub(self.last_tick) >= self.timing.repeat {
            self.last_tick = now;
            self.fire(ButtonEvent::Repeat);
        }
    }

    fn debounce_release(&mut self, now: Tick, active: bool) {
        if now.wrapping_sub(self.release_tick) < self.timing.release_debounce {
            return;
        }

        if active {
            // Release was contact chatter; the held timers keep running.
            self.enter(self.resume);
        } else {
            self.enter(self.release_state(self.resume));
        }
    }

    /// Pin went inactive while held in `from`.
    fn begin_release(&mut self, now: Tick, from: State) {
        if self.timing.release_debounce > 0 {
            self.resume = from;
            self.release_tick = now;
            self.enter(State::DebounceRelease);
        } else {
            self.enter(self.release_state(from));
        }
    }

    fn release_state(&self, from: State) -> State {
        if from == State::Repeat && self.release_after_repeat {
            State::ReleaseAfterRepeat
        } else {
            State::Release
        }
    }

    fn enter(&mut self, next: State) {
        trace!("button {}: {} -> {}", self.id, self.state, next);
        self.state = next;
    }
}
