//! Blaster configuration
//!
//! blaster.toml is parsed and validated by build.rs and compiled in as
//! constants; this module turns them back into a [`FireConfig`].

use volley_core::config::{ChamberClearRule, ConfigError, FireConfig, ShotCount, TimingConfig};
use volley_drivers::motor::{EscConfig, EscProfile};

include!(concat!(env!("OUT_DIR"), "/blaster_config.rs"));

/// Flywheel ESC pulse timing
pub const FLYWHEEL_ESC: EscConfig = EscConfig::UNIDIRECTIONAL;
/// Pusher ESC pulse timing
pub const PUSHER_ESC: EscConfig = EscConfig::BIDIRECTIONAL;

/// Flywheel throttle per command
pub const FLYWHEEL_PROFILE: EscProfile = EscProfile::FLYWHEEL;
/// Pusher throttle per command
pub const PUSHER_PROFILE: EscProfile = EscProfile::PUSHER;

/// PWM clock divider: 125 MHz / 64 = 1.953125 MHz
pub const PWM_DIVIDER: u8 = 64;
/// PWM wrap value for a 50 Hz (20 ms) ESC frame
pub const PWM_TOP: u16 = 39_062;

/// Build the runtime configuration from the compiled-in values
pub fn fire_config() -> Result<FireConfig, ConfigError> {
    FireConfig::new(
        TimingConfig {
            debounce_ms: DEBOUNCE_MS,
            spool_ms: SPOOL_MS,
            min_run_ms: MIN_RUN_MS,
        },
        BURST_MODES,
        INITIAL_MODE,
        CHAMBER_CLEAR,
    )
}
