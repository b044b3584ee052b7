//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the constructor input for a
//! [`World`](crate::World). [`validate()`](WorldConfig::validate) checks
//! structural invariants at startup so that a bad configuration fails
//! fast instead of misbehaving ticks later.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use cairn_core::{StackingRule, VanillaStackingRule};

/// Constructor input for a simulation world.
pub struct WorldConfig {
    /// Pairwise stacking capability consulted by every merge scan.
    pub stacking_rule: Box<dyn StackingRule>,
    /// Initial shared merge cooldown; `None` scans every tick. The
    /// world's [`MergeCooldown`](crate::MergeCooldown) cell can be
    /// retuned at any time after construction.
    pub merge_cooldown: Option<Duration>,
    /// Age at which an item entity despawns; `None` disables ageing.
    pub despawn_age: Option<Duration>,
}

impl Default for WorldConfig {
    /// Vanilla stacking (64-item cap), a 500 ms merge cooldown, and a
    /// five-minute despawn age.
    fn default() -> Self {
        Self {
            stacking_rule: Box::new(VanillaStackingRule::default()),
            merge_cooldown: Some(Duration::from_millis(500)),
            despawn_age: Some(Duration::from_secs(300)),
        }
    }
}

impl WorldConfig {
    /// Check structural invariants.
    ///
    /// A zero despawn age would delete every item on the tick it
    /// spawned; disable ageing with `None` instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.despawn_age == Some(Duration::ZERO) {
            return Err(ConfigError::DespawnAgeZero);
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`WorldConfig::validate()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `despawn_age` is zero; use `None` to disable ageing.
    DespawnAgeZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DespawnAgeZero => {
                write!(f, "despawn age must be nonzero; use None to disable ageing")
            }
        }
    }
}

impl Error for ConfigError {}
