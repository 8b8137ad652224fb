//! ESC output driven by PWM pulse width
//!
//! This driver provides:
//! - Mapping from [`MotorCommand`] to a normalized throttle per actuator
//! - Throttle to pulse-width conversion for uni- and bidirectional ESCs
//! - Pulse width written to the PWM channel as a fraction of the frame
//!
//! # Usage
//!
//! ```ignore
//! let mut esc = Esc::new(Actuator::Flywheel, pwm, EscConfig::UNIDIRECTIONAL, EscProfile::FLYWHEEL)?;
//! esc.arm()?;
//!
//! // Every control tick:
//! esc.apply(MotorCommand::Run)?;
//! ```

use embedded_hal::pwm::SetDutyCycle;
use volley_core::traits::{Actuator, MotorCommand, MotorError};

/// ESC pulse timing (all values in microseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EscConfig {
    /// Pulse for full reverse (or off, on a unidirectional ESC)
    pub min_pulse_us: u16,
    /// Pulse for zero throttle
    pub neutral_pulse_us: u16,
    /// Pulse for full forward
    pub max_pulse_us: u16,
    /// PWM frame period
    pub frame_us: u16,
}

impl EscConfig {
    /// Forward-only ESC: neutral is the minimum pulse
    pub const UNIDIRECTIONAL: Self = Self {
        min_pulse_us: 1000,
        neutral_pulse_us: 1000,
        max_pulse_us: 2000,
        frame_us: 20_000,
    };

    /// Reversible ESC with centered neutral
    pub const BIDIRECTIONAL: Self = Self {
        min_pulse_us: 1000,
        neutral_pulse_us: 1500,
        max_pulse_us: 2000,
        frame_us: 20_000,
    };

    /// Check pulse ordering: min <= neutral <= max <= frame
    pub fn is_valid(&self) -> bool {
        self.min_pulse_us <= self.neutral_pulse_us
            && self.neutral_pulse_us <= self.max_pulse_us
            && self.max_pulse_us <= self.frame_us
            && self.frame_us > 0
    }

    /// Convert a throttle percentage (-100..=100) to a pulse width
    ///
    /// Positive throttle scales from neutral to max, negative from neutral
    /// to min. Out-of-range throttle is clamped.
    pub fn pulse_us(&self, throttle: i8) -> u16 {
        let throttle = throttle.clamp(-100, 100) as i32;
        let neutral = self.neutral_pulse_us as i32;

        let pulse = if throttle >= 0 {
            let span = self.max_pulse_us as i32 - neutral;
            neutral + span * throttle / 100
        } else {
            let span = neutral - self.min_pulse_us as i32;
            neutral + span * throttle / 100
        };

        pulse as u16
    }
}

/// Throttle per motor command for one actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EscProfile {
    /// Throttle for [`MotorCommand::Run`]
    pub run: i8,
    /// Throttle for [`MotorCommand::Return`]
    pub ret: i8,
    /// Throttle for [`MotorCommand::Stop`]
    pub stop: i8,
}

impl EscProfile {
    /// Flywheel: full throttle or off (it is never sent Return)
    pub const FLYWHEEL: Self = Self {
        run: 100,
        ret: 0,
        stop: 0,
    };

    /// Pusher: full stroke, gentle seat, neutral brake
    pub const PUSHER: Self = Self {
        run: 100,
        ret: 25,
        stop: 0,
    };

    /// Throttle for `command`
    pub fn throttle(&self, command: MotorCommand) -> i8 {
        match command {
            MotorCommand::Run => self.run,
            MotorCommand::Return => self.ret,
            MotorCommand::Stop => self.stop,
        }
    }
}

/// ESC on one PWM channel
pub struct Esc<P: SetDutyCycle> {
    actuator: Actuator,
    pwm: P,
    config: EscConfig,
    profile: EscProfile,
    /// Last command successfully written
    last: Option<MotorCommand>,
}

impl<P: SetDutyCycle> Esc<P> {
    /// Create an ESC output
    ///
    /// Nothing is written until [`arm`](Self::arm) or
    /// [`apply`](Self::apply) is called.
    pub fn new(
        actuator: Actuator,
        pwm: P,
        config: EscConfig,
        profile: EscProfile,
    ) -> Result<Self, MotorError> {
        if !config.is_valid() {
            return Err(MotorError::InvalidSetpoint(actuator));
        }

        Ok(Self {
            actuator,
            pwm,
            config,
            profile,
            last: None,
        })
    }

    /// Hold the Stop pulse so the ESC completes its arming sequence
    pub fn arm(&mut self) -> Result<(), MotorError> {
        self.apply(MotorCommand::Stop)
    }

    /// Write the pulse for `command`
    pub fn apply(&mut self, command: MotorCommand) -> Result<(), MotorError> {
        let pulse = self.config.pulse_us(self.profile.throttle(command));
        self.pwm
            .set_duty_cycle_fraction(pulse, self.config.frame_us)
            .map_err(|_| MotorError::Output(self.actuator))?;
        self.last = Some(command);
        Ok(())
    }

    /// Actuator this ESC drives
    pub fn actuator(&self) -> Actuator {
        self.actuator
    }

    /// Last command written, `None` before the first write
    pub fn last_command(&self) -> Option<MotorCommand> {
        self.last
    }

    /// Pulse width for the last written command
    pub fn last_pulse_us(&self) -> Option<u16> {
        self.last
            .map(|cmd| self.config.pulse_us(self.profile.throttle(cmd)))
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockPwm;
    use super::*;

    #[test]
    fn test_unidirectional_pulses() {
        let esc = EscConfig::UNIDIRECTIONAL;
        assert_eq!(esc.pulse_us(0), 1000);
        assert_eq!(esc.pulse_us(50), 1500);
        assert_eq!(esc.pulse_us(100), 2000);
        // Reverse has no span on a forward-only ESC
        assert_eq!(esc.pulse_us(-100), 1000);
    }

    #[test]
    fn test_bidirectional_pulses() {
        let esc = EscConfig::BIDIRECTIONAL;
        assert_eq!(esc.pulse_us(0), 1500);
        assert_eq!(esc.pulse_us(100), 2000);
        assert_eq!(esc.pulse_us(-100), 1000);
        assert_eq!(esc.pulse_us(25), 1625);
        // Clamped
        assert_eq!(esc.pulse_us(127), 2000);
        assert_eq!(esc.pulse_us(-128), 1000);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad = EscConfig {
            neutral_pulse_us: 2500,
            ..EscConfig::BIDIRECTIONAL
        };
        assert!(!bad.is_valid());
        assert!(matches!(
            Esc::new(Actuator::Pusher, MockPwm::new(1000), bad, EscProfile::PUSHER),
            Err(MotorError::InvalidSetpoint(Actuator::Pusher))
        ));
    }

    #[test]
    fn test_apply_writes_duty_fraction() {
        // 20000 counts per frame: one count per microsecond
        let mut esc = Esc::new(
            Actuator::Pusher,
            MockPwm::new(20_000),
            EscConfig::BIDIRECTIONAL,
            EscProfile::PUSHER,
        )
        .unwrap();
        assert_eq!(esc.last_command(), None);

        esc.apply(MotorCommand::Run).unwrap();
        assert_eq!(esc.pwm.duty, Some(2000));

        esc.apply(MotorCommand::Return).unwrap();
        assert_eq!(esc.pwm.duty, Some(1625));

        esc.arm().unwrap();
        assert_eq!(esc.pwm.duty, Some(1500));
        assert_eq!(esc.last_command(), Some(MotorCommand::Stop));
        assert_eq!(esc.last_pulse_us(), Some(1500));
    }

    #[test]
    fn test_pwm_error_maps_to_motor_error() {
        let mut pwm = MockPwm::new(20_000);
        pwm.fail = true;
        let mut esc = Esc::new(
            Actuator::Flywheel,
            pwm,
            EscConfig::UNIDIRECTIONAL,
            EscProfile::FLYWHEEL,
        )
        .unwrap();

        assert_eq!(
            esc.apply(MotorCommand::Run),
            Err(MotorError::Output(Actuator::Flywheel))
        );
        assert_eq!(esc.last_command(), None);
    }
}
