//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! [search]
//! depth = 4
//! quiescence_depth = 4
//!
//! [weights]
//! mobility = 0.05
//! ```
//!
//! Every field is optional; missing ones keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("search depth must be at least 1")]
    ZeroDepth,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub weights: EvalWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched before quiescence takes over.
    pub depth: u8,
    /// Extra plies of captures and promotions past `depth`.
    pub quiescence_depth: u8,
    /// Maximum number of transposition table entries.
    pub tt_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            quiescence_depth: 4,
            tt_capacity: 1 << 20,
        }
    }
}

/// Weights of the evaluation terms, in pawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Per legal destination square.
    pub mobility: f32,
    /// Per piece on d4, e4, d5 or e5.
    pub center: f32,
    /// Bonus for a sheltered king, penalty otherwise.
    pub king_safety: f32,
    /// Penalty for the side in check.
    pub check_penalty: f32,
    /// Multiplier for piece-square table entries (tables are in centipawns).
    pub piece_square: f32,
    pub isolated_pawn: f32,
    pub doubled_pawn: f32,
    pub passed_pawn: f32,
    pub near_promotion: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            mobility: 0.05,
            center: 0.3,
            king_safety: 1.5,
            check_penalty: 2.0,
            piece_square: 0.01,
            isolated_pawn: 0.5,
            doubled_pawn: 0.25,
            passed_pawn: 0.5,
            near_promotion: 0.5,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.search.depth, 4);
        assert_eq!(config.search.quiescence_depth, 4);
        assert_eq!(config.weights.mobility, 0.05);
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            [search]
            depth = 6

            [weights]
            center = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.search.depth, 6);
        assert_eq!(config.search.quiescence_depth, 4);
        assert_eq!(config.weights.center, 0.5);
        assert_eq!(config.weights.king_safety, 1.5);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            EngineConfig::from_toml_str("[search]\ndepth = 0"),
            Err(ConfigError::ZeroDepth)
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[search]\ndepth = \"deep\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::load("/nonexistent/engine.toml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}
