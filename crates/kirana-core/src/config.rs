//! Engine configuration
//!
//! All insight rule thresholds live here so the engine can be tuned per
//! deployment without touching rule code. Defaults match the shipped rule
//! set; a TOML file can override any subset:
//!
//! ```toml
//! margin_ratio_threshold = 0.25
//! min_expense_sample = 10
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Thresholds for the insight rules
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Margin ratio above which a product counts as a profit champion
    pub margin_ratio_threshold: f64,
    /// Expenses-to-revenue ratio that triggers the expense alert
    pub expense_ratio_threshold: f64,
    /// Share of total expenses that makes a category dominant
    pub dominant_category_share: f64,
    /// Fraction of the top category considered recoverable
    pub savings_cut: f64,
    /// Minimum recoverable amount worth surfacing (absolute currency)
    pub savings_floor: f64,
    /// Minimum number of expense records before expense rules run
    pub min_expense_sample: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            margin_ratio_threshold: 0.30,
            expense_ratio_threshold: 0.70,
            dominant_category_share: 0.50,
            savings_cut: 0.10,
            savings_floor: 100.0,
            min_expense_sample: 7,
        }
    }
}

impl EngineConfig {
    /// Load config from a TOML file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from a file if it exists, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::from_file(p),
            Some(p) => Err(Error::Config(format!(
                "Config file not found: {}",
                p.display()
            ))),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_rule_set() {
        let config = EngineConfig::default();
        assert_eq!(config.margin_ratio_threshold, 0.30);
        assert_eq!(config.expense_ratio_threshold, 0.70);
        assert_eq!(config.min_expense_sample, 7);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "margin_ratio_threshold = 0.25").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.margin_ratio_threshold, 0.25);
        // Untouched keys keep their defaults
        assert_eq!(config.expense_ratio_threshold, 0.70);
        assert_eq!(config.savings_floor, 100.0);
    }

    #[test]
    fn test_missing_explicit_path_errors() {
        let path = Path::new("/nonexistent/kirana.toml");
        assert!(EngineConfig::load_or_default(Some(path)).is_err());
        assert!(EngineConfig::load_or_default(None).is_ok());
    }
}
