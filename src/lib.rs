//! Debounced push-button state machine for bare-metal targets.
//!
//! Turns a noisy GPIO level into press, long-press, repeat, release,
//! release-after-repeat, double-click, triple-click and idle-timeout
//! events. Buttons are polled cooperatively: no interrupts, no allocation,
//! no blocking.
//!
//! ```ignore
//! let mut ticks = TickSource::new();
//! ticks.register_function(Some(millis))?;
//!
//! let mut button = Button::with_defaults(GpioPin::new(pin, Polarity::ActiveLow), 1);
//! button.on_press(|id| { /* ... */ });
//! button.set_multi_click_mode(ClickMode::Normal, 300);
//!
//! loop {
//!     button.step(&ticks)?;
//!     wait_one_tick();
//! }
//! ```
//!
//! Usage on the host: `cargo test`
//!
//! Note: The embedded demo uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod button;
pub mod config;
pub mod error;
pub mod pin;
pub mod tick;

pub use button::{
    Button, ButtonEvent, ButtonId, Callback, ClickMode, ClickOverflow, State, Timing,
};
pub use error::Error;
pub use pin::{GpioPin, PinReader, Polarity, ReadFn};
#[cfg(feature = "embedded")]
pub use tick::EmbassyClock;
pub use tick::{Clock, Tick, TickSource};
