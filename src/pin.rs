//! Polarity-normalized pin reading.
//!
//! The state machine only ever asks "is the button active?". Translating
//! electrical levels into that answer is the job of a [`PinReader`].

use embedded_hal::digital::InputPin;

/// Mapping from electrical level to logical "pressed".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pressed pulls the line low (pull-up wiring). The usual case.
    #[default]
    ActiveLow,
    /// Pressed drives the line high (pull-down wiring).
    ActiveHigh,
}

impl Polarity {
    /// Logical level for a raw electrical reading.
    pub const fn is_active(self, is_high: bool) -> bool {
        match self {
            Polarity::ActiveLow => !is_high,
            Polarity::ActiveHigh => is_high,
        }
    }
}

/// Reads the logical (active / inactive) level of one button input.
pub trait PinReader {
    /// `true` while the button is held.
    fn is_active(&mut self) -> bool;
}

/// An `embedded-hal` input pin plus its polarity.
#[derive(Debug)]
pub struct GpioPin<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: InputPin> GpioPin<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Give back the underlying HAL pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> PinReader for GpioPin<P> {
    fn is_active(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => self.polarity.is_active(high),
            Err(_) => {
                // Treat an unreadable pin as released; the button settles in Idle.
                warn!("button pin read failed, reporting inactive");
                false
            }
        }
    }
}

/// User-supplied read routine for inputs that are not a HAL pin
/// (port expanders, shift registers, matrix scans, ...).
///
/// The closure must already return the logical level.
pub struct ReadFn<F>(pub F);

impl<F: FnMut() -> bool> PinReader for ReadFn<F> {
    fn is_active(&mut self) -> bool {
        (self.0)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct LevelPin<'a>(&'a Cell<bool>);

    impl ErrorType for LevelPin<'_> {
        type Error = Infallible;
    }

    impl InputPin for LevelPin<'_> {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0.get())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0.get())
        }
    }

    struct BrokenPin;

    #[derive(Debug)]
    struct ReadError;

    impl embedded_hal::digital::Error for ReadError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for BrokenPin {
        type Error = ReadError;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, ReadError> {
            Err(ReadError)
        }

        fn is_low(&mut self) -> Result<bool, ReadError> {
            Err(ReadError)
        }
    }

    #[test]
    fn active_low_inverts_level() {
        let level = Cell::new(true);
        let mut pin = GpioPin::new(LevelPin(&level), Polarity::ActiveLow);
        assert!(!pin.is_active());
        level.set(false);
        assert!(pin.is_active());
    }

    #[test]
    fn active_high_follows_level() {
        let level = Cell::new(true);
        let mut pin = GpioPin::new(LevelPin(&level), Polarity::ActiveHigh);
        assert!(pin.is_active());
        level.set(false);
        assert!(!pin.is_active());
    }

    #[test]
    fn read_error_reports_inactive() {
        let mut low = GpioPin::new(BrokenPin, Polarity::ActiveLow);
        let mut high = GpioPin::new(BrokenPin, Polarity::ActiveHigh);
        assert!(!low.is_active());
        assert!(!high.is_active());
    }

    #[test]
    fn read_fn_calls_routine() {
        let level = Cell::new(false);
        let mut pin = ReadFn(|| level.get());
        assert!(!pin.is_active());
        level.set(true);
        assert!(pin.is_active());
    }

    #[test]
    fn default_polarity_is_active_low() {
        assert_eq!(Polarity::default(), Polarity::ActiveLow);
        assert!(Polarity::ActiveLow.is_active(false));
        assert!(Polarity::ActiveHigh.is_active(true));
    }
}
