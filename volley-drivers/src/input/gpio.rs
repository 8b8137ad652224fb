//! GPIO-backed input sampler
//!
//! One input pin per channel, in [`Channel::index`] order. Levels are
//! passed through raw; polarity and debouncing happen in the core.

use embedded_hal::digital::InputPin;
use volley_core::input::{Channel, CHANNEL_COUNT};
use volley_core::traits::InputSampler;

/// Input sampler over one GPIO pin per channel
pub struct GpioInputs<P: InputPin> {
    pins: [P; CHANNEL_COUNT],
    /// Failed pin reads since start
    read_errors: u32,
}

impl<P: InputPin> GpioInputs<P> {
    /// Create a sampler from pins indexed by [`Channel::index`]
    pub fn new(pins: [P; CHANNEL_COUNT]) -> Self {
        Self {
            pins,
            read_errors: 0,
        }
    }

    /// Number of failed pin reads
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }
}

impl<P: InputPin> InputSampler for GpioInputs<P> {
    fn sample(&mut self, channel: Channel) -> bool {
        match self.pins[channel.index()].is_high() {
            Ok(high) => high,
            Err(_) => {
                // Report an open contact so the interlock fails safe
                self.read_errors = self.read_errors.saturating_add(1);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    #[derive(Debug)]
    struct ReadFault;

    impl Error for ReadFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[derive(Clone, Copy)]
    enum MockPin {
        Level(bool),
        Broken,
    }

    impl ErrorType for MockPin {
        type Error = ReadFault;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            match self {
                MockPin::Level(level) => Ok(*level),
                MockPin::Broken => Err(ReadFault),
            }
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    #[test]
    fn test_samples_pin_per_channel() {
        let mut pins = [MockPin::Level(true); CHANNEL_COUNT];
        pins[Channel::Magazine.index()] = MockPin::Level(false);
        let mut inputs = GpioInputs::new(pins);

        assert!(!inputs.sample(Channel::Magazine));
        assert!(inputs.sample(Channel::Trigger));
        assert_eq!(inputs.read_errors(), 0);
    }

    #[test]
    fn test_read_error_reports_open_contact() {
        let mut pins = [MockPin::Level(false); CHANNEL_COUNT];
        pins[Channel::Eject.index()] = MockPin::Broken;
        let mut inputs = GpioInputs::new(pins);

        assert!(inputs.sample(Channel::Eject));
        assert!(inputs.sample(Channel::Eject));
        assert_eq!(inputs.read_errors(), 2);
    }
}
