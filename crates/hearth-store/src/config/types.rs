//! Configuration types

use hearth_core::prelude::*;
use serde::{Deserialize, Serialize};

/// Lower bound for `effects.timeout_ms`
pub const MIN_EFFECT_TIMEOUT_MS: u64 = 100;

/// Store settings from `.hearth/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub effects: EffectSettings,

    #[serde(default)]
    pub devtools: DevToolsSettings,
}

impl Settings {
    /// Clamp out-of-range values to something the store can run with
    pub fn validate(mut self) -> Self {
        if self.effects.timeout_ms < MIN_EFFECT_TIMEOUT_MS {
            warn!(
                "effects.timeout_ms = {} is too low, using {}",
                self.effects.timeout_ms,
                MIN_EFFECT_TIMEOUT_MS
            );
            self.effects.timeout_ms = MIN_EFFECT_TIMEOUT_MS;
        }
        if self.devtools.max_age == 0 {
            self.devtools.max_age = 1;
        }
        self
    }
}

/// Effect execution settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EffectSettings {
    /// An effect that has not settled after this long produces its failure action
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Dispatched-action history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DevToolsSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Number of actions kept
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for DevToolsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_age: default_max_age(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_age() -> usize {
    25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.effects.timeout_ms, 30_000);
        assert!(settings.devtools.enabled);
        assert_eq!(settings.devtools.max_age, 25);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("[devtools]\nmax_age = 5\n").unwrap();
        assert_eq!(settings.devtools.max_age, 5);
        assert!(settings.devtools.enabled);
        assert_eq!(settings.effects.timeout_ms, 30_000);
    }

    #[test]
    fn test_validate_clamps() {
        let mut settings = Settings::default();
        settings.effects.timeout_ms = 1;
        settings.devtools.max_age = 0;

        let settings = settings.validate();

        assert_eq!(settings.effects.timeout_ms, MIN_EFFECT_TIMEOUT_MS);
        assert_eq!(settings.devtools.max_age, 1);
    }
}
