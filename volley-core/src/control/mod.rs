//! Fire-control tick
//!
//! [`FireControl`] owns every piece of control state and runs one tick in a
//! fixed order:
//!
//! 1. Sample and debounce all input channels
//! 2. Pusher controller
//! 3. Flywheel controller
//! 4. Fire queue bookkeeping
//! 5. Emit both motor commands
//!
//! The order is load-bearing. The pusher sees the flywheel timing and the
//! remaining shot count as they were at the end of the previous tick, so a
//! stroke can never start on the same tick the flywheel first spins up.

pub mod flywheel;
pub mod pusher;
pub mod queue;

pub use flywheel::{FlywheelController, FlywheelTiming};
pub use pusher::{PusherController, PusherInputs};
pub use queue::FireQueue;

use crate::config::{ConfigError, FireConfig, ShotCount};
use crate::input::{Channel, Debouncer, Inputs};
use crate::safety::{InterlockFault, InterlockStatus};
use crate::traits::{Actuator, InputSampler, MotorCommand, MotorError, MotorSink};

/// Result of one control tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutput {
    /// Flywheel command
    pub flywheel: MotorCommand,
    /// Pusher command
    pub pusher: MotorCommand,
    /// Diagnostic indicator: raw (undebounced) home position
    pub indicator: bool,
    /// Interlock status used for this tick
    pub interlock: InterlockStatus,
    /// Shots remaining after the fire queue update
    pub remaining: ShotCount,
}

impl Default for TickOutput {
    /// Power-on state: both motors stopped, interlock open
    fn default() -> Self {
        Self {
            flywheel: MotorCommand::Stop,
            pusher: MotorCommand::Stop,
            indicator: false,
            interlock: InterlockStatus::Open(InterlockFault::MagazineRemoved),
            remaining: ShotCount::EMPTY,
        }
    }
}

/// Top-level fire-control context
#[derive(Debug, Clone)]
pub struct FireControl {
    config: FireConfig,
    debouncer: Debouncer,
    flywheel: FlywheelController,
    pusher: PusherController,
    queue: FireQueue,
    /// Output of the most recent tick
    last: TickOutput,
}

impl FireControl {
    /// Create a controller with all channels wired active-low
    pub fn new(config: FireConfig) -> Result<Self, ConfigError> {
        let debouncer = Debouncer::new(config.timing.debounce_ms);
        Self::with_debouncer(config, debouncer)
    }

    /// Create a controller with a preconfigured debouncer
    pub fn with_debouncer(config: FireConfig, debouncer: Debouncer) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            debouncer,
            flywheel: FlywheelController::new(),
            pusher: PusherController::new(config.chamber_clear),
            queue: FireQueue::new(config.initial_mode),
            last: TickOutput::default(),
            config,
        })
    }

    /// Run one control tick against raw input levels
    pub fn tick<S: InputSampler>(&mut self, sampler: &mut S, now_ms: u32) -> TickOutput {
        let (inputs, raw) = self.debouncer.sample(sampler, now_ms);
        let indicator = self
            .debouncer
            .live(Channel::Home, raw[Channel::Home.index()]);

        self.last = self.evaluate(&inputs, indicator, now_ms);
        self.last
    }

    /// Run one control tick and apply both commands to `sink`
    ///
    /// Both actuators are written even if the first write fails; the first
    /// error is returned.
    pub fn step<S: InputSampler, M: MotorSink>(
        &mut self,
        sampler: &mut S,
        sink: &mut M,
        now_ms: u32,
    ) -> Result<TickOutput, MotorError> {
        let output = self.tick(sampler, now_ms);

        let flywheel = sink.apply(Actuator::Flywheel, output.flywheel);
        let pusher = sink.apply(Actuator::Pusher, output.pusher);
        flywheel.and(pusher)?;

        Ok(output)
    }

    /// Controller stages for one tick of already-debounced inputs
    fn evaluate(&mut self, inputs: &Inputs, indicator: bool, now_ms: u32) -> TickOutput {
        let interlock = InterlockStatus::from_inputs(inputs);
        let closed = interlock.is_closed();
        let timing = self.config.timing;

        // Previous tick's flywheel timing and queue
        let pusher = self.pusher.update(&PusherInputs {
            interlock_closed: closed,
            home: inputs.home,
            chamber_left: inputs.chamber_left,
            chamber_right: inputs.chamber_right,
            remaining: self.queue.remaining(),
            selected_mode: self.queue.selected_mode(),
            spooled: self.flywheel.timing().is_spooled(now_ms, timing.spool_ms),
        });

        let demand = !self.queue.remaining().is_empty() || inputs.ready;
        let flywheel = self
            .flywheel
            .update(demand, closed, now_ms, timing.min_run_ms);

        let remaining = self
            .queue
            .update(inputs.trigger, inputs.home, closed, &self.config);

        TickOutput {
            flywheel,
            pusher,
            indicator,
            interlock,
            remaining,
        }
    }

    /// Select burst mode `index` for the next trigger pull
    pub fn select_mode(&mut self, index: u8) -> Result<(), ConfigError> {
        self.queue.select_mode(index, &self.config)
    }

    /// Advance to the next burst mode
    pub fn cycle_mode(&mut self) -> u8 {
        self.queue.cycle_mode(&self.config)
    }

    /// Output of the most recent tick, including one whose sink write failed
    pub fn last_output(&self) -> &TickOutput {
        &self.last
    }

    /// Active configuration
    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    /// Fire queue state
    pub fn queue(&self) -> &FireQueue {
        &self.queue
    }

    /// Flywheel controller state
    pub fn flywheel(&self) -> &FlywheelController {
        &self.flywheel
    }

    /// Pusher controller state
    pub fn pusher(&self) -> &PusherController {
        &self.pusher
    }
}
