//! Button instance - configuration, callbacks and state.
//!
//! A [`Button`] owns its input ([`PinReader`]) and everything the state
//! machine needs between polls. The application owns the buttons and
//! calls [`Button::step`] on each of them once per scheduler tick.
//!
//! ```text
//! Idle → Debounce → Pressed → Repeat (re-armed every repeat period)
//!           ↓          ↓         ↓
//!          Idle     [DebounceRelease]
//!                      ↓         ↓
//!                   Release   ReleaseAfterRepeat → Idle
//! ```

mod click;
mod machine;


pub use click::{ClickMode, ClickOverflow};

use crate::config::{
    DEFAULT_CLICK_WINDOW_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_IDLE_TIMEOUT_MS, DEFAULT_LONG_PRESS_MS,
    DEFAULT_RELEASE_DEBOUNCE_MS, DEFAULT_REPEAT_MS,
};
use crate::pin::PinReader;
use crate::tick::Tick;
use click::ClickCounter;

/// Numeric button identity, handed to every callback.
pub type ButtonId = u16;

/// Event callback. Receives the id of the button that fired it.
pub type Callback = fn(ButtonId);

/// States of the debounce state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Released and settled.
    Idle,
    /// Pin went active; waiting for the debounce time to confirm it.
    Debounce,
    /// Confirmed press, waiting for release or the long-press threshold.
    Pressed,
    /// Held past the long-press threshold; repeat events are firing.
    Repeat,
    /// Released; the release event fires on the next poll.
    Release,
    /// Pin went inactive; waiting for the release debounce to confirm it.
    DebounceRelease,
    /// Released from `Repeat`; the release-after-repeat event fires next poll.
    ReleaseAfterRepeat,
}

/// Events a button can report, one callback slot each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum ButtonEvent {
    /// Press confirmed after the debounce time.
    Press,
    /// Held for the long-press time.
    LongPress,
    /// Still held, once per repeat period after the long press.
    Repeat,
    /// Released.
    Release,
    /// Released after at least one repeat, if enabled.
    ReleaseAfterRepeat,
    /// Second click within the click window.
    DoubleClick,
    /// Third click within the click window.
    TripleClick,
    /// Idle ("not used") timeout elapsed.
    Idle,
}

impl ButtonEvent {
    /// Number of events, and so of callback slots per button.
    pub const COUNT: usize = ButtonEvent::Idle as usize + 1;

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Durations driving the state machine, all in ticks (ms).
///
/// A zero `release_debounce` or `idle_timeout` disables that capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub debounce: Tick,
    pub long_press: Tick,
    pub repeat: Tick,
    pub release_debounce: Tick,
    pub click_window: Tick,
    pub idle_timeout: Tick,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE_MS,
            long_press: DEFAULT_LONG_PRESS_MS,
            repeat: DEFAULT_REPEAT_MS,
            release_debounce: DEFAULT_RELEASE_DEBOUNCE_MS,
            click_window: DEFAULT_CLICK_WINDOW_MS,
            idle_timeout: DEFAULT_IDLE_TIMEOUT_MS,
        }
    }
}

/// One debounced push button.
pub struct Button<P> {
    pin: P,
    id: ButtonId,
    state: State,
    /// Reference point of the running timer (debounce, long press, repeat, idle).
    last_tick: Tick,
    /// `last_tick` has been set from the clock at least once.
    started: bool,
    /// Start of the release debounce.
    release_tick: Tick,
    /// State to resume if the release turns out to be noise.
    resume: State,
    timing: Timing,
    release_after_repeat: bool,
    clicks: ClickCounter,
    callbacks: [Option<Callback>; ButtonEvent::COUNT],
}

impl<P: PinReader> Button<P> {
    /// Create a button with explicit press timers.
    ///
    /// Release debounce, idle timeout and multi-click start disabled.
    pub fn new(pin: P, debounce: Tick, long_press: Tick, repeat: Tick, id: ButtonId) -> Self {
        Self {
            pin,
            id,
            state: State::Idle,
            last_tick: 0,
            started: false,
            release_tick: 0,
            resume: State::Pressed,
            timing: Timing {
                debounce,
                long_press,
                repeat,
                ..Timing::default()
            },
            release_after_repeat: false,
            clicks: ClickCounter::default(),
            callbacks: [None; ButtonEvent::COUNT],
        }
    }

    /// Create a button with the default 50 / 500 / 300 ms timers.
    pub fn with_defaults(pin: P, id: ButtonId) -> Self {
        Self::new(
            pin,
            DEFAULT_DEBOUNCE_MS,
            DEFAULT_LONG_PRESS_MS,
            DEFAULT_REPEAT_MS,
            id,
        )
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn click_mode(&self) -> ClickMode {
        self.clicks.mode
    }

    /// Clicks counted in the sequence currently in progress (0..=3).
    pub fn click_count(&self) -> u8 {
        self.clicks.count()
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Consume the button and give back its input.
    pub fn into_pin(self) -> P {
        self.pin
    }

    /// Abort whatever press sequence is in progress and go back to `Idle`.
    ///
    /// Configuration and callbacks are kept. No event fires. The idle
    /// timeout restarts from the next poll.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.started = false;
        self.resume = State::Pressed;
        self.clicks.clear();
    }

    // Timers

    pub fn set_debounce_time(&mut self, ms: Tick) {
        self.timing.debounce = ms;
    }

    /// Second debounce applied on release; 0 disables it.
    pub fn set_release_debounce_time(&mut self, ms: Tick) {
        self.timing.release_debounce = ms;
    }

    pub fn set_long_press_time(&mut self, ms: Tick) {
        self.timing.long_press = ms;
    }

    pub fn set_repeat_time(&mut self, ms: Tick) {
        self.timing.repeat = ms;
    }

    pub fn set_click_window(&mut self, ms: Tick) {
        self.timing.click_window = ms;
    }

    // Capabilities

    /// Select the multi-click policy and its inter-click window.
    ///
    /// Any sequence in progress is dropped.
    pub fn set_multi_click_mode(&mut self, mode: ClickMode, window: Tick) {
        self.clicks.clear();
        self.clicks.mode = mode;
        self.timing.click_window = window;
    }

    /// What a fourth click does in [`ClickMode::Combined`].
    pub fn set_click_overflow(&mut self, overflow: ClickOverflow) {
        self.clicks.overflow = overflow;
    }

    /// Fire `callback` after `ms` of inactivity in `Idle`; 0 disables.
    pub fn set_idle_timeout(&mut self, ms: Tick, callback: Option<Callback>) {
        self.timing.idle_timeout = ms;
        self.register(ButtonEvent::Idle, callback);
    }

    /// Report releases from `Repeat` as [`ButtonEvent::ReleaseAfterRepeat`]
    /// instead of [`ButtonEvent::Release`].
    pub fn set_release_after_repeat(&mut self, enabled: bool) {
        self.release_after_repeat = enabled;
    }

    // Callbacks

    /// Install (or with `None`, remove) the callback for one event.
    pub fn register(&mut self, event: ButtonEvent, callback: Option<Callback>) {
        self.callbacks[event.slot()] = callback;
    }

    pub fn on_press(&mut self, callback: Callback) {
        self.register(ButtonEvent::Press, Some(callback));
    }

    pub fn on_long_press(&mut self, callback: Callback) {
        self.register(ButtonEvent::LongPress, Some(callback));
    }

    pub fn on_repeat(&mut self, callback: Callback) {
        self.register(ButtonEvent::Repeat, Some(callback));
    }

    pub fn on_release(&mut self, callback: Callback) {
        self.register(ButtonEvent::Release, Some(callback));
    }

    pub fn on_release_after_repeat(&mut self, callback: Callback) {
        self.register(ButtonEvent::ReleaseAfterRepeat, Some(callback));
    }

    pub fn on_double_click(&mut self, callback: Callback) {
        self.register(ButtonEvent::DoubleClick, Some(callback));
    }

    pub fn on_triple_click(&mut self, callback: Callback) {
        self.register(ButtonEvent::TripleClick, Some(callback));
    }

    pub fn on_idle(&mut self, callback: Callback) {
        self.register(ButtonEvent::Idle, Some(callback));
    }

    fn fire(&self, event: ButtonEvent) {
        debug!("button {}: {}", self.id, event);
        if let Some(callback) = self.callbacks[event.slot()] {
            callback(self.id);
        }
    }
}
