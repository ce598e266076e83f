use serde::{Deserialize, Serialize};

use crate::animals::PlacementParams;
use crate::sky::ConstellationParams;
use crate::systems::effects::EffectsConfig;

/// How constellations are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstellationMode {
    /// One at a time, each line drawn out over its slot.
    #[default]
    Cycle,
    /// Every chain, fully drawn.
    All,
}

/// How animal figures are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalMode {
    /// One centered figure at a time, rotating through the library.
    #[default]
    Cycle,
    /// Several figures scattered around the center.
    Placed,
}

/// Configuration for the sky, provided by the host.
/// Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Stars in the virtual sky (default: 600).
    pub star_count: usize,
    pub constellations: ConstellationParams,
    pub constellation_mode: ConstellationMode,
    /// Milliseconds each constellation stays up in `Cycle` mode (default: 6000).
    pub constellation_period_ms: f64,
    pub placement: PlacementParams,
    pub animal_mode: AnimalMode,
    /// Milliseconds each animal stays up in `Cycle` mode (default: 7000).
    pub animal_period_ms: f64,
    /// Upper bound for one frame's delta in seconds (default: 0.033).
    pub max_frame_dt: f32,
    pub effects: EffectsConfig,
    pub show_lines: bool,
    pub show_animals: bool,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            star_count: 600,
            constellations: ConstellationParams::default(),
            constellation_mode: ConstellationMode::Cycle,
            constellation_period_ms: 6000.0,
            placement: PlacementParams::default(),
            animal_mode: AnimalMode::Cycle,
            animal_period_ms: 7000.0,
            max_frame_dt: 0.033,
            effects: EffectsConfig::default(),
            show_lines: true,
            show_animals: true,
        }
    }
}

impl SkyConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = SkyConfig::from_json("{}").unwrap();
        assert_eq!(config, SkyConfig::default());
    }

    #[test]
    fn parse_modes_and_nested_params() {
        let json = r#"{
            "star_count": 300,
            "constellation_mode": "all",
            "animal_mode": "placed",
            "constellations": { "groups": 3 },
            "placement": { "region": { "min": [0.2, 0.2], "max": [0.8, 0.8] } },
            "effects": { "comets": { "interval": 4.0 } },
            "show_lines": false
        }"#;
        let config = SkyConfig::from_json(json).unwrap();
        assert_eq!(config.star_count, 300);
        assert_eq!(config.constellation_mode, ConstellationMode::All);
        assert_eq!(config.animal_mode, AnimalMode::Placed);
        assert_eq!(config.constellations.groups, 3);
        assert_eq!(config.constellations.max_len, 6);
        assert_eq!(config.placement.region.max.x, 0.8);
        assert_eq!(config.placement.min_distance, 0.18);
        assert_eq!(config.effects.comets.interval, 4.0);
        assert!(!config.show_lines);
        assert!(config.show_animals);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SkyConfig::from_json("{ star_count: }").is_err());
        assert!(SkyConfig::from_json(r#"{ "animal_mode": "zoo" }"#).is_err());
    }
}
