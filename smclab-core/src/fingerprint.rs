//! Input fingerprinting: a stable key for `(candles, config)`.
//!
//! The engine keeps no cache of its own. Hosts that want to memoize results
//! can key on [`InputFingerprint`]: identical inputs hash identically across
//! runs and platforms, and any change to a candle or a parameter changes it.
//!
//! Inputs are validated first. JSON has no encoding for NaN or infinity, so
//! non-finite values are rejected instead of being hashed as `null`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DetectorConfig;
use crate::domain::{validate_series, Candle};
use crate::error::AnalysisError;

/// BLAKE3 hex digest of the canonical JSON of config + candles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFingerprint(pub String);

#[derive(Serialize)]
struct Canonical<'a> {
    config: &'a DetectorConfig,
    candles: &'a [Candle],
}

impl InputFingerprint {
    /// Hash a validated input pair.
    ///
    /// Fails with the same errors as [`analyze`](crate::engine::analyze) on an
    /// invalid config or a malformed candle.
    pub fn compute(candles: &[Candle], config: &DetectorConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        validate_series(candles)?;

        let mut hasher = blake3::Hasher::new();
        // Fields serialize in declaration order.
        serde_json::to_writer(&mut hasher, &Canonical { config, candles })?;
        Ok(Self(hasher.finalize().to_hex().to_string()))
    }

    /// First 12 hex digits, for log lines and summaries.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl fmt::Display for InputFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
