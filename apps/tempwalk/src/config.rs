//! # Configuration
//!
//! Optional TOML configuration for the tempwalk binary.
//!
//! ```toml
//! [walk]
//! distribution = "exp"   # "unif" or "exp"
//! delta = 0
//! seed = 42              # omit for an entropy-seeded run
//!
//! [sampling]
//! attempts = 100         # engine calls per requested walk
//! ```
//!
//! Every key is optional. CLI flags override file values.

use serde::Deserialize;
use std::path::Path;
use tempwalk_core::primitives::DEFAULT_DELTA;
use tempwalk_core::{DistributionConfig, TransitionDistribution, WalkError};

/// Default number of engine calls per requested walk.
pub const DEFAULT_ATTEMPTS: usize = 100;

/// `[walk]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkSettings {
    pub distribution: TransitionDistribution,
    pub delta: i64,
    pub seed: Option<u64>,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            distribution: TransitionDistribution::default(),
            delta: DEFAULT_DELTA,
            seed: None,
        }
    }
}

impl WalkSettings {
    /// The engine configuration these settings describe.
    #[must_use]
    pub fn distribution_config(&self) -> DistributionConfig {
        DistributionConfig::new(self.distribution, self.delta)
    }
}

/// `[sampling]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingSettings {
    pub attempts: usize,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

/// Values given on the command line, applied over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub distribution: Option<TransitionDistribution>,
    pub delta: Option<i64>,
    pub seed: Option<u64>,
    pub attempts: Option<usize>,
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub walk: WalkSettings,
    pub sampling: SamplingSettings,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, WalkError> {
        let config: Self =
            toml::from_str(text).map_err(|e| WalkError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration file, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, WalkError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|e| {
            WalkError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded configuration from {:?}", path);
        Self::from_toml(&text)
    }

    /// Apply command-line overrides.
    pub fn apply(mut self, overrides: &Overrides) -> Result<Self, WalkError> {
        if let Some(distribution) = overrides.distribution {
            self.walk.distribution = distribution;
        }
        if let Some(delta) = overrides.delta {
            self.walk.delta = delta;
        }
        if let Some(seed) = overrides.seed {
            self.walk.seed = Some(seed);
        }
        if let Some(attempts) = overrides.attempts {
            self.sampling.attempts = attempts;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), WalkError> {
        if self.sampling.attempts == 0 {
            return Err(WalkError::ConfigError(
                "sampling.attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
