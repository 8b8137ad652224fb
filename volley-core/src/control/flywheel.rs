//! Flywheel spool/run controller
//!
//! The flywheel runs whenever there is demand (shots queued or the ready
//! switch held) and the interlock is closed. Once demand goes away it keeps
//! running for the minimum run time so brief ready-switch gaps inside a
//! burst do not stop and restart it.
//!
//! Activate is evaluated first and Deactivate second, unconditionally, so an
//! open interlock always wins over concurrent demand on the same tick.

use crate::time::has_elapsed;
use crate::traits::{Decision, MotorCommand};

/// Flywheel spin-up and dead-man timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlywheelTiming {
    /// Start of the current spin-up episode, `None` while stopped
    spin_up_ms: Option<u32>,
    /// Last tick on which there was demand
    last_active_ms: u32,
}

impl FlywheelTiming {
    /// Start of the current spin-up episode
    pub fn spin_up_ms(&self) -> Option<u32> {
        self.spin_up_ms
    }

    /// Last tick on which the flywheel was actively demanded
    pub fn last_active_ms(&self) -> u32 {
        self.last_active_ms
    }

    /// Check if the flywheel has been spinning for at least `spool_ms`
    ///
    /// Valid within one clock wrap of the spin-up timestamp. After running
    /// continuously for a full wrap this briefly reports `false` again (see
    /// [`crate::time`]).
    pub fn is_spooled(&self, now_ms: u32, spool_ms: u32) -> bool {
        self.spin_up_ms
            .is_some_and(|start| has_elapsed(now_ms, start, spool_ms))
    }
}

/// Flywheel controller state
#[derive(Debug, Clone, Default)]
pub struct FlywheelController {
    timing: FlywheelTiming,
    command: MotorCommand,
}

impl FlywheelController {
    /// Create a stopped flywheel controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this tick's flywheel command
    ///
    /// # Arguments
    /// - `demand`: fire queue non-empty or ready switch held
    /// - `interlock_closed`: magazine seated and eject door closed
    /// - `now_ms`: wrapping millisecond timestamp
    /// - `min_run_ms`: time to keep running after demand was last seen
    pub fn decide(
        &mut self,
        demand: bool,
        interlock_closed: bool,
        now_ms: u32,
        min_run_ms: u32,
    ) -> Decision {
        let mut decision = Decision::Hold;

        // Activate
        if demand && interlock_closed {
            if self.timing.spin_up_ms.is_none() {
                self.timing.spin_up_ms = Some(now_ms);
            }
            self.timing.last_active_ms = now_ms;
            decision = Decision::Set(MotorCommand::Run);
        }

        // Deactivate, overriding Activate
        if has_elapsed(now_ms, self.timing.last_active_ms, min_run_ms) || !interlock_closed {
            self.timing.spin_up_ms = None;
            decision = Decision::Set(MotorCommand::Stop);
        }

        decision
    }

    /// Decide and record this tick's command
    pub fn update(
        &mut self,
        demand: bool,
        interlock_closed: bool,
        now_ms: u32,
        min_run_ms: u32,
    ) -> MotorCommand {
        let decision = self.decide(demand, interlock_closed, now_ms, min_run_ms);
        self.command = decision.resolve(self.command);
        self.command
    }

    /// Timing state as of the last update
    pub fn timing(&self) -> &FlywheelTiming {
        &self.timing
    }

    /// Command emitted on the last update
    pub fn command(&self) -> MotorCommand {
        self.command
    }
}
