//! Input channels and debouncing
//!
//! Raw pin levels are sampled once per tick, inverted per channel polarity
//! and low-pass filtered into committed logical values.

pub mod channel;
pub mod debounce;

pub use channel::{Channel, Inputs, CHANNEL_COUNT};
pub use debounce::{DebounceFilter, Debouncer};
