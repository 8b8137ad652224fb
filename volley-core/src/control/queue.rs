//! Fire queue bookkeeping
//!
//! A trigger pull loads the shot count of the selected burst mode. Each
//! return of the pusher to home counts one completed stroke. Releasing the
//! trigger or opening the interlock empties the queue immediately, aborting
//! any burst in flight.
//!
//! Edge detection uses the trigger and home values stored on the previous
//! tick.

use crate::config::{ConfigError, FireConfig, ShotCount};

/// Remaining-shot counter and burst-mode selector
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FireQueue {
    remaining: ShotCount,
    selected_mode: u8,
    prev_trigger: bool,
    prev_home: bool,
}

impl FireQueue {
    /// Create an empty queue with `initial_mode` selected
    pub fn new(initial_mode: u8) -> Self {
        Self {
            remaining: ShotCount::EMPTY,
            selected_mode: initial_mode,
            prev_trigger: false,
            prev_home: false,
        }
    }

    /// Run one tick of queue bookkeeping
    ///
    /// Returns the remaining shot count after this tick.
    pub fn update(
        &mut self,
        trigger: bool,
        home: bool,
        interlock_closed: bool,
        config: &FireConfig,
    ) -> ShotCount {
        // Trigger pulled: load the burst
        if trigger && !self.prev_trigger && interlock_closed {
            self.remaining = config
                .burst_shots(self.selected_mode)
                .unwrap_or(ShotCount::EMPTY);
        }

        // Pusher came home: one stroke done
        if home && !self.prev_home && !self.remaining.is_empty() {
            self.remaining = self.remaining.decrement();
        }

        if !trigger || !interlock_closed {
            self.remaining = ShotCount::EMPTY;
        }

        self.prev_trigger = trigger;
        self.prev_home = home;

        self.remaining
    }

    /// Select burst mode `index`
    ///
    /// Takes effect on the next trigger pull; a burst in flight keeps its
    /// remaining count.
    pub fn select_mode(&mut self, index: u8, config: &FireConfig) -> Result<(), ConfigError> {
        if config.burst_shots(index).is_none() {
            return Err(ConfigError::ModeOutOfRange);
        }
        self.selected_mode = index;
        Ok(())
    }

    /// Advance to the next burst mode, wrapping to the first
    pub fn cycle_mode(&mut self, config: &FireConfig) -> u8 {
        let count = config.mode_count().max(1);
        self.selected_mode = (self.selected_mode + 1) % count;
        self.selected_mode
    }

    /// Shots remaining
    pub fn remaining(&self) -> ShotCount {
        self.remaining
    }

    /// Selected burst mode index
    pub fn selected_mode(&self) -> u8 {
        self.selected_mode
    }
}
