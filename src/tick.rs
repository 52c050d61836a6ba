//! Millisecond tick sources.
//!
//! The state machine never reads a global clock. Whoever drives
//! [`Button::step`](crate::Button::step) hands it a [`Clock`], usually a
//! [`TickSource`] registered once at start-up.
//!
//! All timing comparisons are done as `now.wrapping_sub(then)`, so the
//! counter may wrap freely as long as no single measured interval exceeds
//! `Tick::MAX` milliseconds (about 49 days).

use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::Error;

/// Monotonic, wrapping millisecond counter.
pub type Tick = u32;

/// Anything that can report the current tick.
pub trait Clock {
    /// Current tick, or [`Error::InvalidArgument`] if no source is available.
    fn now(&self) -> Result<Tick, Error>;
}

/// Tick source registered by the application.
///
/// Either a zero-argument accessor function or an externally updated
/// counter (typically incremented from a SysTick handler).
#[derive(Clone, Copy, Debug, Default)]
pub enum TickSource<'a> {
    /// Nothing registered yet; every read fails.
    #[default]
    Unregistered,
    /// Accessor function returning the current tick.
    Function(fn() -> Tick),
    /// Counter written by someone else and polled here.
    Counter(&'a AtomicU32),
}

impl<'a> TickSource<'a> {
    /// Create an unregistered source.
    pub const fn new() -> Self {
        Self::Unregistered
    }

    /// Register an accessor function, replacing any previous registration.
    pub fn register_function(&mut self, func: Option<fn() -> Tick>) -> Result<(), Error> {
        let func = func.ok_or(Error::InvalidArgument)?;
        *self = Self::Function(func);
        Ok(())
    }

    /// Register an external counter, replacing any previous registration.
    pub fn register_counter(&mut self, counter: Option<&'a AtomicU32>) -> Result<(), Error> {
        let counter = counter.ok_or(Error::InvalidArgument)?;
        *self = Self::Counter(counter);
        Ok(())
    }

    /// Whether a function or counter has been registered.
    pub fn is_registered(&self) -> bool {
        !matches!(self, Self::Unregistered)
    }
}

impl Clock for TickSource<'_> {
    fn now(&self) -> Result<Tick, Error> {
        match self {
            Self::Unregistered => Err(Error::InvalidArgument),
            Self::Function(func) => Ok(func()),
            Self::Counter(counter) => Ok(counter.load(Ordering::Relaxed)),
        }
    }
}

/// Tick source backed by the embassy time driver.
///
/// The 64-bit instant is truncated, which is exactly a wrapping 32-bit
/// millisecond counter.
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embedded")]
impl Clock for EmbassyClock {
    fn now(&self) -> Result<Tick, Error> {
        Ok(embassy_time::Instant::now().as_millis() as Tick)
    }
}
