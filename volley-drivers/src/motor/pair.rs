//! Flywheel + pusher motor sink

use embedded_hal::pwm::SetDutyCycle;
use volley_core::traits::{Actuator, MotorCommand, MotorError, MotorSink};

use super::esc::Esc;

/// Both ESC outputs behind one [`MotorSink`]
pub struct EscPair<F: SetDutyCycle, P: SetDutyCycle> {
    flywheel: Esc<F>,
    pusher: Esc<P>,
}

impl<F: SetDutyCycle, P: SetDutyCycle> EscPair<F, P> {
    pub fn new(flywheel: Esc<F>, pusher: Esc<P>) -> Self {
        Self { flywheel, pusher }
    }

    /// Arm both ESCs; both are attempted, the first error is returned
    pub fn arm(&mut self) -> Result<(), MotorError> {
        let flywheel = self.flywheel.arm();
        let pusher = self.pusher.arm();
        flywheel.and(pusher)
    }

    pub fn flywheel(&self) -> &Esc<F> {
        &self.flywheel
    }

    pub fn pusher(&self) -> &Esc<P> {
        &self.pusher
    }
}

impl<F: SetDutyCycle, P: SetDutyCycle> MotorSink for EscPair<F, P> {
    fn apply(&mut self, actuator: Actuator, command: MotorCommand) -> Result<(), MotorError> {
        match actuator {
            Actuator::Flywheel => self.flywheel.apply(command),
            Actuator::Pusher => self.pusher.apply(command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::esc::mock::MockPwm;
    use crate::motor::{EscConfig, EscProfile};

    fn pair(fail_flywheel: bool) -> EscPair<MockPwm, MockPwm> {
        let mut fly_pwm = MockPwm::new(20_000);
        fly_pwm.fail = fail_flywheel;
        let flywheel = Esc::new(
            Actuator::Flywheel,
            fly_pwm,
            EscConfig::UNIDIRECTIONAL,
            EscProfile::FLYWHEEL,
        )
        .unwrap();
        let pusher = Esc::new(
            Actuator::Pusher,
            MockPwm::new(20_000),
            EscConfig::BIDIRECTIONAL,
            EscProfile::PUSHER,
        )
        .unwrap();
        EscPair::new(flywheel, pusher)
    }

    #[test]
    fn test_routes_by_actuator() {
        let mut motors = pair(false);
        motors.apply(Actuator::Flywheel, MotorCommand::Run).unwrap();
        motors.apply(Actuator::Pusher, MotorCommand::Return).unwrap();

        assert_eq!(motors.flywheel().last_pulse_us(), Some(2000));
        assert_eq!(motors.pusher().last_pulse_us(), Some(1625));
    }

    #[test]
    fn test_arm_writes_stop_to_both() {
        let mut motors = pair(false);
        motors.arm().unwrap();
        assert_eq!(motors.flywheel().last_command(), Some(MotorCommand::Stop));
        assert_eq!(motors.pusher().last_command(), Some(MotorCommand::Stop));
    }

    #[test]
    fn test_arm_continues_past_failure() {
        let mut motors = pair(true);
        assert_eq!(motors.arm(), Err(MotorError::Output(Actuator::Flywheel)));
        assert_eq!(motors.pusher().last_command(), Some(MotorCommand::Stop));
    }
}
