use serde::{Deserialize, Serialize};

/// Numeric policy shared by mesh construction, classification and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Distance under which two vertices are welded into one.
    pub merge_tolerance: f64,
    /// Signed plane distance under which a point counts as lying on a face.
    pub planarity_tolerance: f64,
    /// Relative tolerance for comparing scale-invariant shape measures.
    pub comparison_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            merge_tolerance: 1e-6,
            planarity_tolerance: 1e-6,
            comparison_tolerance: 1e-3,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = EngineConfig::default();
        assert!(config.merge_tolerance < config.comparison_tolerance);
        assert!(config.planarity_tolerance > 0.0);
    }

    #[test]
    fn json_round_trip() {
        let config = EngineConfig {
            comparison_tolerance: 1e-4,
            ..EngineConfig::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
