//! Unified error type for button-fsm.
//!
//! We avoid `alloc` - the error carries no data.
//! Implements `defmt::Format` (feature `defmt`) for on-target logging.

/// Error returned by registration and polling operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A required handle was absent: a `None` tick function or counter at
    /// registration, or a tick source that was never registered at poll time.
    InvalidArgument,
}
