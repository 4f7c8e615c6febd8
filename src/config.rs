use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Janus configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JanusConfig {
    /// RNG seed for synthetic data.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Forecast horizon in steps.
    #[serde(default)]
    pub horizon: Option<usize>,

    /// Model orders.
    #[serde(default)]
    pub model: ModelToml,

    /// Fitting options.
    #[serde(default)]
    pub fit: FitToml,

    /// Synthetic series settings.
    #[serde(default)]
    pub synth: SynthToml,
}

/// `[model]` section: SARIMA orders.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    #[serde(default = "default_one")]
    pub p: usize,
    #[serde(default = "default_one")]
    pub d: usize,
    #[serde(default = "default_one")]
    pub q: usize,
    #[serde(default = "default_one")]
    pub seasonal_p: usize,
    #[serde(default = "default_one")]
    pub seasonal_d: usize,
    #[serde(default = "default_one")]
    pub seasonal_q: usize,
    #[serde(default = "default_period")]
    pub period: usize,
}

/// `[fit]` section: optimizer options.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitToml {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
    #[serde(default = "default_tolerance")]
    pub convergence_tolerance: f64,
    #[serde(default)]
    pub random_restarts: usize,
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
}

/// `[synth]` section: synthetic series settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthToml {
    #[serde(default = "default_days")]
    pub days: usize,
    #[serde(default = "default_start")]
    pub start: String,
}

fn default_one() -> usize {
    1
}
fn default_period() -> usize {
    7
}
fn default_max_iterations() -> u64 {
    500
}
fn default_tolerance() -> f64 {
    1e-8
}
fn default_confidence_level() -> f64 {
    0.95
}
fn default_days() -> usize {
    393
}
fn default_start() -> String {
    "2021-06-01".to_string()
}

impl Default for ModelToml {
    fn default() -> Self {
        toml::from_str("").expect("empty model section deserializes")
    }
}

impl Default for FitToml {
    fn default() -> Self {
        toml::from_str("").expect("empty fit section deserializes")
    }
}

impl Default for SynthToml {
    fn default() -> Self {
        toml::from_str("").expect("empty synth section deserializes")
    }
}

impl JanusConfig {
    /// Loads the configuration file, or returns defaults when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_orders() {
        let cfg = JanusConfig::default();
        assert_eq!(cfg.model.p, 1);
        assert_eq!(cfg.model.d, 1);
        assert_eq!(cfg.model.q, 1);
        assert_eq!(cfg.model.period, 7);
        assert_eq!(cfg.fit.max_iterations, 500);
        assert_eq!(cfg.synth.days, 393);
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: JanusConfig = toml::from_str(
            r#"
            horizon = 30

            [model]
            p = 2
            period = 12
            "#,
        )
        .unwrap();
        assert_eq!(cfg.horizon, Some(30));
        assert_eq!(cfg.model.p, 2);
        assert_eq!(cfg.model.period, 12);
        // Unspecified fields fall back to defaults.
        assert_eq!(cfg.model.d, 1);
        assert!((cfg.fit.confidence_level - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: std::result::Result<JanusConfig, _> =
            toml::from_str("unknown_field = 1");
        assert!(result.is_err());
    }
}
