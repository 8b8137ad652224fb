//! Pusher stroke controller
//!
//! Sequences a stroke (leave home, push the chambered dart into the
//! flywheels, return home) using only the home sensor, the two chamber
//! sensors and the flywheel's spool state.
//!
//! The spool state and remaining shot count are the values from the
//! previous tick: the pusher is evaluated before the flywheel and the fire
//! queue update.
//!
//! Known limitations, kept as-is:
//! - The chamber-clear brake has no settle delay.
//! - The final-shot back-off is gated on the selected mode index, not on
//!   whether the mode is actually a burst.

use crate::config::{ChamberClearRule, ShotCount, SINGLE_MODE_INDEX};
use crate::traits::{Decision, MotorCommand};

/// Per-tick inputs to the pusher decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PusherInputs {
    /// Magazine seated and eject door closed
    pub interlock_closed: bool,
    /// Pusher at its home position
    pub home: bool,
    /// Left chamber sensor reports a dart
    pub chamber_left: bool,
    /// Right chamber sensor reports a dart
    pub chamber_right: bool,
    /// Shots remaining in the fire queue
    pub remaining: ShotCount,
    /// Selected burst mode index
    pub selected_mode: u8,
    /// Flywheel has spun for at least the spool time
    pub spooled: bool,
}

impl PusherInputs {
    fn chambered(&self) -> bool {
        self.chamber_left && self.chamber_right
    }

    /// Last shot of a burst: back off early to reduce overtravel
    fn is_final_shot(&self) -> bool {
        self.remaining.is_last() && self.selected_mode != SINGLE_MODE_INDEX
    }
}

/// Pusher controller state
#[derive(Debug, Clone)]
pub struct PusherController {
    command: MotorCommand,
    chamber_clear: ChamberClearRule,
}

impl PusherController {
    /// Create a stopped pusher controller
    pub fn new(chamber_clear: ChamberClearRule) -> Self {
        Self {
            command: MotorCommand::Stop,
            chamber_clear,
        }
    }

    /// Decide this tick's pusher command
    pub fn decide(&self, inputs: &PusherInputs) -> Decision {
        if !inputs.interlock_closed {
            return Decision::Set(MotorCommand::Stop);
        }

        if inputs.home {
            return if inputs.remaining.is_empty() {
                // Seat at home without full drive
                Decision::Set(MotorCommand::Return)
            } else if inputs.chambered() && inputs.spooled {
                Decision::Set(MotorCommand::Run)
            } else {
                // Wait at rest for a dart or for the flywheel to spool
                Decision::Hold
            };
        }

        // Mid-stroke
        if inputs.remaining.is_empty() {
            return Decision::Set(MotorCommand::Stop);
        }

        let mut decision = Decision::Hold;
        if inputs.spooled {
            decision = if inputs.is_final_shot() {
                Decision::Set(MotorCommand::Return)
            } else {
                Decision::Set(MotorCommand::Run)
            };
        }

        if self
            .chamber_clear
            .is_clear(inputs.chamber_left, inputs.chamber_right)
        {
            decision = Decision::Set(MotorCommand::Stop);
        }

        decision
    }

    /// Decide and record this tick's command
    pub fn update(&mut self, inputs: &PusherInputs) -> MotorCommand {
        self.command = self.decide(inputs).resolve(self.command);
        self.command
    }

    /// Command emitted on the last update
    pub fn command(&self) -> MotorCommand {
        self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_at_home() -> PusherInputs {
        PusherInputs {
            interlock_closed: true,
            home: true,
            chamber_left: true,
            chamber_right: true,
            remaining: ShotCount::Finite(3),
            selected_mode: 1,
            spooled: true,
        }
    }

    fn mid_stroke() -> PusherInputs {
        PusherInputs {
            home: false,
            ..ready_at_home()
        }
    }

    #[test]
    fn test_interlock_forces_stop_in_every_phase() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);
        for base in [ready_at_home(), mid_stroke()] {
            let inputs = PusherInputs {
                interlock_closed: false,
                ..base
            };
            assert_eq!(pusher.decide(&inputs), Decision::Set(MotorCommand::Stop));
        }
    }

    #[test]
    fn test_starts_stroke_when_ready() {
        let mut pusher = PusherController::new(ChamberClearRule::BothClear);
        assert_eq!(pusher.update(&ready_at_home()), MotorCommand::Run);
    }

    #[test]
    fn test_returns_at_home_when_queue_empty() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);
        let inputs = PusherInputs {
            remaining: ShotCount::EMPTY,
            ..ready_at_home()
        };
        assert_eq!(pusher.decide(&inputs), Decision::Set(MotorCommand::Return));
    }

    #[test]
    fn test_waits_at_home_for_dart_and_spool() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);

        let one_sensor = PusherInputs {
            chamber_right: false,
            ..ready_at_home()
        };
        assert_eq!(pusher.decide(&one_sensor), Decision::Hold);

        let not_spooled = PusherInputs {
            spooled: false,
            ..ready_at_home()
        };
        assert_eq!(pusher.decide(&not_spooled), Decision::Hold);
    }

    #[test]
    fn test_hold_keeps_previous_command() {
        let mut pusher = PusherController::new(ChamberClearRule::BothClear);
        let empty_home = PusherInputs {
            remaining: ShotCount::EMPTY,
            ..ready_at_home()
        };
        assert_eq!(pusher.update(&empty_home), MotorCommand::Return);

        let not_spooled = PusherInputs {
            spooled: false,
            ..ready_at_home()
        };
        assert_eq!(pusher.update(&not_spooled), MotorCommand::Return);
    }

    #[test]
    fn test_mid_stroke_runs() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);
        assert_eq!(
            pusher.decide(&mid_stroke()),
            Decision::Set(MotorCommand::Run)
        );
    }

    #[test]
    fn test_final_shot_backs_off() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);
        let last = PusherInputs {
            remaining: ShotCount::Finite(1),
            ..mid_stroke()
        };
        assert_eq!(pusher.decide(&last), Decision::Set(MotorCommand::Return));
    }

    #[test]
    fn test_final_shot_in_single_mode_runs() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);
        let single = PusherInputs {
            remaining: ShotCount::Finite(1),
            selected_mode: SINGLE_MODE_INDEX,
            ..mid_stroke()
        };
        assert_eq!(pusher.decide(&single), Decision::Set(MotorCommand::Run));
    }

    #[test]
    fn test_unbounded_never_backs_off() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);
        let auto = PusherInputs {
            remaining: ShotCount::Unbounded,
            selected_mode: 2,
            ..mid_stroke()
        };
        assert_eq!(pusher.decide(&auto), Decision::Set(MotorCommand::Run));
    }

    #[test]
    fn test_chamber_clear_brakes_with_both_sensors() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);

        let one_clear = PusherInputs {
            chamber_left: false,
            ..mid_stroke()
        };
        assert_eq!(pusher.decide(&one_clear), Decision::Set(MotorCommand::Run));

        let both_clear = PusherInputs {
            chamber_left: false,
            chamber_right: false,
            ..mid_stroke()
        };
        assert_eq!(pusher.decide(&both_clear), Decision::Set(MotorCommand::Stop));
    }

    #[test]
    fn test_chamber_clear_either_rule() {
        let pusher = PusherController::new(ChamberClearRule::EitherClear);
        let one_clear = PusherInputs {
            chamber_left: false,
            ..mid_stroke()
        };
        assert_eq!(pusher.decide(&one_clear), Decision::Set(MotorCommand::Stop));
    }

    #[test]
    fn test_mid_stroke_not_spooled_holds() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);
        let inputs = PusherInputs {
            spooled: false,
            ..mid_stroke()
        };
        assert_eq!(pusher.decide(&inputs), Decision::Hold);
    }

    #[test]
    fn test_mid_stroke_empty_queue_stops() {
        let pusher = PusherController::new(ChamberClearRule::BothClear);
        let inputs = PusherInputs {
            remaining: ShotCount::EMPTY,
            ..mid_stroke()
        };
        assert_eq!(pusher.decide(&inputs), Decision::Set(MotorCommand::Stop));
    }
}
