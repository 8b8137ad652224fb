//! Time-window input debouncing
//!
//! A channel's committed value only changes once its live (inverted) value
//! has been continuously stable for the debounce window. While the input
//! chatters the previous committed value is held, so the controllers never
//! see a glitch.
//!
//! The filter is time-based rather than sample-count based, so it tolerates
//! being polled at irregular intervals.

use super::channel::{Channel, Inputs, CHANNEL_COUNT};
use crate::time::has_elapsed;
use crate::traits::InputSampler;

/// Debounce state for one input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceFilter {
    /// Raw low means logically active (pull-up wiring)
    active_low: bool,
    /// Timestamp of the last live-value change
    stable_since_ms: u32,
    /// Live value seen on the previous sample
    last_seen: bool,
    /// Debounced output
    committed: bool,
}

impl DebounceFilter {
    /// Create an idle (inactive) filter
    pub const fn new(active_low: bool) -> Self {
        Self {
            active_low,
            stable_since_ms: 0,
            last_seen: false,
            committed: false,
        }
    }

    /// Feed one raw sample and return the committed value
    ///
    /// # Arguments
    /// - `raw_high`: electrical level as read from the pin
    /// - `now_ms`: wrapping millisecond timestamp
    /// - `window_ms`: required stable duration
    pub fn update(&mut self, raw_high: bool, now_ms: u32, window_ms: u32) -> bool {
        let live = raw_high != self.active_low;

        if live != self.last_seen {
            self.last_seen = live;
            self.stable_since_ms = now_ms;
        }

        if has_elapsed(now_ms, self.stable_since_ms, window_ms) {
            self.committed = self.last_seen;
        }

        self.committed
    }

    /// Last committed value
    pub fn committed(&self) -> bool {
        self.committed
    }

    /// Check if the channel is wired active-low
    pub fn is_active_low(&self) -> bool {
        self.active_low
    }
}

/// Filter table for every input channel
#[derive(Debug, Clone)]
pub struct Debouncer {
    filters: [DebounceFilter; CHANNEL_COUNT],
    window_ms: u32,
}

impl Debouncer {
    /// Create a debouncer with every channel wired active-low
    pub fn new(window_ms: u32) -> Self {
        Self::with_polarity(window_ms, [true; CHANNEL_COUNT])
    }

    /// Create a debouncer with explicit per-channel polarity
    ///
    /// `active_low` is indexed by [`Channel::index`].
    pub fn with_polarity(window_ms: u32, active_low: [bool; CHANNEL_COUNT]) -> Self {
        Self {
            filters: active_low.map(DebounceFilter::new),
            window_ms,
        }
    }

    /// Debounce one raw sample for `channel`
    pub fn read(&mut self, channel: Channel, raw_high: bool, now_ms: u32) -> bool {
        self.filters[channel.index()].update(raw_high, now_ms, self.window_ms)
    }

    /// Debounce one raw level per channel, indexed by [`Channel::index`]
    pub fn debounce(&mut self, raw_high: &[bool; CHANNEL_COUNT], now_ms: u32) -> Inputs {
        let mut inputs = Inputs::default();
        for channel in Channel::ALL {
            inputs.set(channel, self.read(channel, raw_high[channel.index()], now_ms));
        }
        inputs
    }

    /// Sample and debounce every channel once
    ///
    /// Returns the committed snapshot together with the raw levels read,
    /// indexed by [`Channel::index`].
    pub fn sample<S: InputSampler>(
        &mut self,
        sampler: &mut S,
        now_ms: u32,
    ) -> (Inputs, [bool; CHANNEL_COUNT]) {
        let raw = Channel::ALL.map(|channel| sampler.sample(channel));
        (self.debounce(&raw, now_ms), raw)
    }

    /// Apply `channel`'s polarity to a raw level without filtering
    pub fn live(&self, channel: Channel, raw_high: bool) -> bool {
        raw_high != self.filters[channel.index()].is_active_low()
    }

    /// Committed value of `channel` without sampling
    pub fn committed(&self, channel: Channel) -> bool {
        self.filters[channel.index()].committed()
    }
}
