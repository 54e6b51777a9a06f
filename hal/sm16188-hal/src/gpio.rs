//! GPIO pin abstractions
//!
//! Provides the data-line traits the transfer protocol drives. Only the
//! capability to assert a line high or low is required; releasing a line
//! to high impedance is a separate, optional capability used at teardown.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. Both methods sit on the bit-cell timing path and
/// must not block.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Output pin that can be released to a high-impedance state
pub trait TristatePin: OutputPin {
    /// Stop driving the pin (input / high impedance)
    fn release(&mut self);
}

/// Adapter for any `embedded-hal` 1.0 output pin
///
/// Pin errors are dropped: the transfer protocol has no error path and a
/// failing GPIO write cannot be retried without breaking bit-cell timing.
pub struct HalPin<P> {
    pin: P,
}

impl<P> HalPin<P> {
    /// Wrap an `embedded-hal` pin
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Return the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: embedded_hal::digital::OutputPin> OutputPin for HalPin<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Mock embedded-hal pin for testing
    struct MockPin {
        high: bool,
        writes: u8,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl embedded_hal::digital::OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_hal_pin_forwards_levels() {
        let mut pin = HalPin::new(MockPin {
            high: false,
            writes: 0,
        });

        pin.set_high();
        assert!(pin.pin.high);

        pin.set_state(false);
        assert!(!pin.pin.high);

        pin.set_state(true);
        let inner = pin.into_inner();
        assert!(inner.high);
        assert_eq!(inner.writes, 3);
    }
}
