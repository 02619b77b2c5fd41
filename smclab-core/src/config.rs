//! Detector configuration.
//!
//! An immutable parameter set passed into every call. Every field has a
//! default, so a TOML file only needs to name what it overrides:
//!
//! ```toml
//! swing_length = 7
//! max_order_blocks = 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating a [`DetectorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Parameters for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Pivot confirmation window for the swing structure pass.
    pub swing_length: usize,
    /// Pivot confirmation window for the internal (finer) structure pass.
    pub internal_length: usize,
    /// Cap on order blocks kept per direction.
    pub max_order_blocks: usize,
    pub atr_period: usize,
    /// Reserved for consumer-side filtering; the engine carries it untouched.
    pub volatility_threshold: f64,
    /// How far back from a CHOCH the extractor looks for the opposing candle.
    pub lookback_candles: usize,
    /// Shorter inputs produce an insufficient-data result.
    pub min_candles: usize,
    /// Order-block candle body must be at least this many ATRs.
    pub ob_body_atr_multiple: f64,
    /// Fair value gaps smaller than this many ATRs are dropped.
    pub fvg_atr_multiple: f64,
    /// Adjacent pivots closer than this many ATRs form an equal level.
    pub equal_level_atr_multiple: f64,
    /// Forward bound for the mitigation scan. `None` scans to the end.
    pub mitigation_lookahead: Option<usize>,
    /// Run the separate gap fill pass after detection.
    pub track_gap_fills: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            swing_length: 5,
            internal_length: 3,
            max_order_blocks: 10,
            atr_period: 14,
            volatility_threshold: 2.0,
            lookback_candles: 20,
            min_candles: 50,
            ob_body_atr_multiple: 0.5,
            fvg_atr_multiple: 0.5,
            equal_level_atr_multiple: 0.1,
            mitigation_lookahead: None,
            track_gap_fills: false,
        }
    }
}

impl DetectorConfig {
    /// Parse from a TOML string. Missing keys take their defaults.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: DetectorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject parameter sets the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("swing_length", self.swing_length),
            ("internal_length", self.internal_length),
            ("atr_period", self.atr_period),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be >= 1".into(),
                });
            }
        }

        for (field, value) in [
            ("ob_body_atr_multiple", self.ob_body_atr_multiple),
            ("fvg_atr_multiple", self.fvg_atr_multiple),
            ("equal_level_atr_multiple", self.equal_level_atr_multiple),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a finite number >= 0, got {value}"),
                });
            }
        }

        if !self.volatility_threshold.is_finite() {
            return Err(ConfigError::Invalid {
                field: "volatility_threshold",
                reason: "must be finite".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = DetectorConfig::default();
        assert_eq!(c.swing_length, 5);
        assert_eq!(c.internal_length, 3);
        assert_eq!(c.max_order_blocks, 10);
        assert_eq!(c.atr_period, 14);
        assert_eq!(c.volatility_threshold, 2.0);
        assert_eq!(c.lookback_candles, 20);
        assert_eq!(c.min_candles, 50);
        assert_eq!(c.mitigation_lookahead, None);
        assert!(!c.track_gap_fills);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c = DetectorConfig::from_toml("swing_length = 7\nmax_order_blocks = 8\n").unwrap();
        assert_eq!(c.swing_length, 7);
        assert_eq!(c.max_order_blocks, 8);
        assert_eq!(c.atr_period, 14);
    }

    #[test]
    fn mitigation_lookahead_parses() {
        let c = DetectorConfig::from_toml("mitigation_lookahead = 50").unwrap();
        assert_eq!(c.mitigation_lookahead, Some(50));
    }

    #[test]
    fn rejects_zero_window() {
        let err = DetectorConfig::from_toml("swing_length = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "swing_length",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_multiple() {
        let c = DetectorConfig {
            fvg_atr_multiple: -0.5,
            ..DetectorConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid {
                field: "fvg_atr_multiple",
                ..
            })
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = DetectorConfig::from_toml("swing_length = \"five\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DetectorConfig::from_file(Path::new("/nonexistent/smclab.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn toml_roundtrip() {
        let c = DetectorConfig {
            mitigation_lookahead: Some(50),
            track_gap_fills: true,
            ..DetectorConfig::default()
        };
        let s = c.to_toml().unwrap();
        let back = DetectorConfig::from_toml(&s).unwrap();
        assert_eq!(c, back);
    }
}
