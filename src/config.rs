//! Library-wide constants and compile-time defaults.
//!
//! All timing defaults live here so they can be tuned in one place.
//! Every value is in milliseconds of the tick source.

use crate::tick::Tick;

// Press detection

/// Debounce time used by `Button::with_defaults`.
pub const DEFAULT_DEBOUNCE_MS: Tick = 50;

/// Hold time before the long-press event fires.
pub const DEFAULT_LONG_PRESS_MS: Tick = 500;

/// Period of the repeat event while the button stays held after a long press.
pub const DEFAULT_REPEAT_MS: Tick = 300;

// Optional capabilities (0 disables)

/// Second debounce applied on release. Disabled by default.
pub const DEFAULT_RELEASE_DEBOUNCE_MS: Tick = 0;

/// Idle ("not used") timeout. Disabled by default.
pub const DEFAULT_IDLE_TIMEOUT_MS: Tick = 0;

// Multi-click

/// Maximum gap between two confirmed presses of one click sequence.
pub const DEFAULT_CLICK_WINDOW_MS: Tick = 300;

/// Highest click count that is classified (triple click).
pub const MAX_CLICKS: u8 = 3;
