//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::spatial::OctreeConfig;

/// Tunable parameters of the flux simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Half-size of the cubic world region the spatial index covers
    pub world_extent: f64,

    /// Beer-Lambert coefficient for light passing through flux volumes
    pub attenuation_coefficient: f64,

    /// Spatial index behavior
    pub octree: OctreeConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_extent: 1000.0,
            attenuation_coefficient: 0.2,
            octree: OctreeConfig::default(),
        }
    }
}

impl Config for SimulationConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_relative_eq!(config.world_extent, 1000.0);
        assert_relative_eq!(config.attenuation_coefficient, 0.2);
        assert_eq!(config.octree.max_objects_per_leaf, 8);
        assert_eq!(config.octree.max_depth, 5);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: SimulationConfig =
            toml::from_str("attenuation_coefficient = 0.5").unwrap();
        assert_relative_eq!(config.attenuation_coefficient, 0.5);
        assert_relative_eq!(config.world_extent, 1000.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = SimulationConfig::default();
        config.octree.max_depth = 3;
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SimulationConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_and_load_toml_file() {
        let path = std::env::temp_dir().join("flux_sim_config_roundtrip.toml");
        let mut config = SimulationConfig::default();
        config.world_extent = 250.0;
        config.octree.max_objects_per_leaf = 4;

        config.save_to_file(&path).unwrap();
        let loaded = SimulationConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_and_load_ron_file() {
        let path = std::env::temp_dir().join("flux_sim_config_roundtrip.ron");
        let mut config = SimulationConfig::default();
        config.attenuation_coefficient = 0.35;

        config.save_to_file(&path).unwrap();
        let loaded = SimulationConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_extension_is_rejected_before_writing() {
        let path = std::env::temp_dir().join("flux_sim_config.json");
        let err = SimulationConfig::default().save_to_file(&path).unwrap_err();
        assert!(matches!(err, crate::config::ConfigError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }
}
