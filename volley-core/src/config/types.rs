//! Configuration type definitions

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum burst modes per config
pub const MAX_BURST_MODES: usize = 4;

/// Index of the single-shot mode in the burst table
///
/// The final-shot back-off in the pusher is skipped when this mode is
/// selected.
pub const SINGLE_MODE_INDEX: u8 = 0;

/// Number of shots loaded into, or remaining in, the fire queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShotCount {
    /// A fixed number of strokes
    Finite(u8),
    /// Full auto: never exhausted by strokes, only by trigger release
    Unbounded,
}

impl ShotCount {
    /// Empty queue
    pub const EMPTY: Self = ShotCount::Finite(0);

    /// Check if no shots remain
    pub fn is_empty(&self) -> bool {
        matches!(self, ShotCount::Finite(0))
    }

    /// Check if exactly one finite shot remains
    pub fn is_last(&self) -> bool {
        matches!(self, ShotCount::Finite(1))
    }

    /// Count one completed stroke
    ///
    /// `Unbounded` is returned unchanged and an empty count stays empty.
    pub fn decrement(self) -> Self {
        match self {
            ShotCount::Finite(n) => ShotCount::Finite(n.saturating_sub(1)),
            ShotCount::Unbounded => ShotCount::Unbounded,
        }
    }
}

impl Default for ShotCount {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// How the two chamber sensors are combined to detect a cleared chamber
///
/// Neither rule applies a settle delay before the pusher brakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChamberClearRule {
    /// Both sensors must read empty (AND)
    #[default]
    BothClear,
    /// Either sensor reading empty is enough (OR)
    EitherClear,
}

impl ChamberClearRule {
    /// Apply the rule to the two chamber sensors (`true` = dart present)
    pub fn is_clear(&self, left_present: bool, right_present: bool) -> bool {
        match self {
            ChamberClearRule::BothClear => !left_present && !right_present,
            ChamberClearRule::EitherClear => !left_present || !right_present,
        }
    }
}

/// Timing configuration (all values in milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Time a raw input must stay stable before it is committed
    pub debounce_ms: u32,
    /// Minimum flywheel spin-up before the pusher may start a stroke
    pub spool_ms: u32,
    /// Time the flywheel keeps running after demand was last seen
    pub min_run_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 5,
            spool_ms: 200,
            min_run_ms: 1000,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Burst table has no entries
    EmptyBurstTable,
    /// Burst table exceeds [`MAX_BURST_MODES`]
    TooManyBurstModes,
    /// A burst mode loads zero shots
    ZeroShotMode,
    /// Selected mode index is not in the burst table
    ModeOutOfRange,
    /// Flywheel minimum run time must be non-zero
    ZeroMinRun,
}

/// Complete fire-control configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FireConfig {
    /// Debounce, spool and run timing
    pub timing: TimingConfig,
    /// Shots loaded per trigger pull, indexed by burst mode
    pub burst_modes: Vec<ShotCount, MAX_BURST_MODES>,
    /// Burst mode selected at cold start
    pub initial_mode: u8,
    /// Chamber-clear detection rule for the pusher brake
    pub chamber_clear: ChamberClearRule,
}

impl Default for FireConfig {
    fn default() -> Self {
        let mut burst_modes = Vec::new();
        // Capacity is MAX_BURST_MODES, so three entries always fit
        let _ = burst_modes.push(ShotCount::Finite(1));
        let _ = burst_modes.push(ShotCount::Finite(3));
        let _ = burst_modes.push(ShotCount::Unbounded);

        Self {
            timing: TimingConfig::default(),
            burst_modes,
            initial_mode: 1,
            chamber_clear: ChamberClearRule::BothClear,
        }
    }
}

impl FireConfig {
    /// Build and validate a configuration
    pub fn new(
        timing: TimingConfig,
        modes: &[ShotCount],
        initial_mode: u8,
        chamber_clear: ChamberClearRule,
    ) -> Result<Self, ConfigError> {
        let burst_modes =
            Vec::from_slice(modes).map_err(|_| ConfigError::TooManyBurstModes)?;

        let config = Self {
            timing,
            burst_modes,
            initial_mode,
            chamber_clear,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the controllers cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burst_modes.is_empty() {
            return Err(ConfigError::EmptyBurstTable);
        }
        if self.burst_modes.iter().any(ShotCount::is_empty) {
            return Err(ConfigError::ZeroShotMode);
        }
        if self.burst_shots(self.initial_mode).is_none() {
            return Err(ConfigError::ModeOutOfRange);
        }
        // With a zero run time the deactivate rule would cancel every Run
        if self.timing.min_run_ms == 0 {
            return Err(ConfigError::ZeroMinRun);
        }
        Ok(())
    }

    /// Shots loaded by burst mode `index`
    pub fn burst_shots(&self, index: u8) -> Option<ShotCount> {
        self.burst_modes.get(index as usize).copied()
    }

    /// Number of configured burst modes
    pub fn mode_count(&self) -> u8 {
        self.burst_modes.len() as u8
    }
}
