//! Raw input sampling

use crate::input::Channel;

/// Source of raw electrical levels for each input channel
///
/// Implementations return the pin level as read (`true` = high). Polarity
/// inversion and debouncing are applied by the core, not here.
pub trait InputSampler {
    /// Sample the raw level of `channel`
    ///
    /// A pin that cannot be read should report `true` (high). With the
    /// default pull-up, active-low wiring that reads as an open contact, so
    /// the interlock opens instead of staying closed on a read failure.
    fn sample(&mut self, channel: Channel) -> bool;
}
