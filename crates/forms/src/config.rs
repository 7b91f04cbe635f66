//! Simulation configuration
//!
//! Tunes the simulated backend: base latency, jitter, and a failure rate
//! for demonstrating the Failed path. Loaded from an optional TOML file
//! with defaults when the file is absent.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::gateway::Latency;

/// Configuration for the simulated submission backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Base latency applied to every gateway call, in milliseconds
    pub latency_ms: u64,

    /// Random extra latency drawn per call, in milliseconds
    #[serde(default)]
    pub jitter_ms: u64,

    /// Probability (0.0 - 1.0) that a simulated submission fails with a
    /// server error
    #[serde(default)]
    pub fail_rate: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // The site simulates its API calls with a one second timeout.
            latency_ms: 1000,
            jitter_ms: 0,
            fail_rate: 0.0,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from file, falling back to defaults if absent
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The latency model this configuration describes
    pub fn latency(&self) -> Latency {
        Latency::from_millis(self.latency_ms, self.jitter_ms)
    }
}
