//! Tunable analysis parameters.
//!
//! Every field has a default, so a configuration file only needs the values
//! it changes:
//!
//! ```toml
//! [tests]
//! alpha = 0.01
//! min_expected_count = 5.0
//!
//! [risk]
//! threshold = 70
//!
//! [survival]
//! max_tenure = 20
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    association::TestConfig,
    risk::{DEFAULT_THRESHOLD, RiskScorer},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub tests: TestConfig,
    pub risk: RiskConfig,
    pub survival: SurvivalConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    /// Minimum score of a high-risk employee.
    pub threshold: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl RiskConfig {
    #[must_use]
    pub fn scorer(&self) -> RiskScorer {
        RiskScorer::new(self.threshold)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurvivalConfig {
    /// Largest tenure listed in the survival curve.
    pub max_tenure: u32,
    /// Number of critical retention windows to report.
    pub critical_windows: usize,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            max_tenure: 15,
            critical_windows: 3,
        }
    }
}
