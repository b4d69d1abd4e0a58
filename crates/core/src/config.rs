//! Evaluator configuration
//!
//! ```rust
//! use deleg::EvalConfig;
//!
//! let config = EvalConfig::new().with_max_depth(64);
//! assert_eq!(config.max_depth, 64);
//!
//! let config = EvalConfig::from_toml("max_depth = 256").unwrap();
//! assert_eq!(config.max_depth, 256);
//! ```

use serde::Deserialize;

/// Default limit on nested named-quotation expansion
pub const DEFAULT_MAX_DEPTH: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// How deep named quotations may nest before evaluation fails with
    /// `EvaluationDepthExceeded`. Self-referential definitions hit this.
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse from TOML; missing keys take their defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse evaluator config: {}", e))
    }
}
