//! Motor command types and the actuator output seam
//!
//! The core never deals in pulse widths or duty cycles. Controllers decide
//! a [`MotorCommand`] per [`Actuator`], and a [`MotorSink`] implementation
//! translates it into an actuator-specific setpoint.

/// The two driven actuators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Actuator {
    /// Flywheel pair that accelerates the dart
    Flywheel,
    /// Pusher that strokes the dart into the flywheels
    Pusher,
}

/// Command for a single actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorCommand {
    /// Drive at full setpoint
    Run,
    /// Reduced drive: seat the pusher at home, or decelerate before the
    /// end of a burst
    Return,
    /// Brake / neutral
    #[default]
    Stop,
}

/// Outcome of a controller's per-tick decision
///
/// `Hold` is an explicit "retain previous command" result, not the absence
/// of a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    /// Emit this command
    Set(MotorCommand),
    /// Keep whatever was commanded on the previous tick
    Hold,
}

impl Decision {
    /// Resolve against the previously emitted command
    pub fn resolve(self, previous: MotorCommand) -> MotorCommand {
        match self {
            Decision::Set(cmd) => cmd,
            Decision::Hold => previous,
        }
    }
}

/// Errors reported by a motor output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// The output peripheral rejected the setpoint
    Output(Actuator),
    /// Setpoint outside the configured pulse range
    InvalidSetpoint(Actuator),
}

/// Sink for per-tick motor commands
pub trait MotorSink {
    /// Apply `command` to `actuator`
    ///
    /// Called for both actuators on every tick, whether or not the command
    /// changed.
    fn apply(&mut self, actuator: Actuator, command: MotorCommand) -> Result<(), MotorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stop() {
        assert_eq!(MotorCommand::default(), MotorCommand::Stop);
    }

    #[test]
    fn test_decision_resolve() {
        assert_eq!(
            Decision::Set(MotorCommand::Run).resolve(MotorCommand::Stop),
            MotorCommand::Run
        );
        assert_eq!(
            Decision::Hold.resolve(MotorCommand::Return),
            MotorCommand::Return
        );
    }
}
