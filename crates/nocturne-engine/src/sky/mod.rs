pub mod constellation;
pub mod star;

pub use constellation::{build_constellations, Constellation, ConstellationParams, CONSTELLATION_NAMES};
pub use star::{create_stars, Star};

use crate::api::config::SkyConfig;
use crate::core::rng::Rng;

/// The generated star field and its constellations. Immutable after generation.
#[derive(Debug, Clone)]
pub struct Sky {
    stars: Vec<Star>,
    constellations: Vec<Constellation>,
}

impl Sky {
    /// Stars first, then constellations, from the same stream.
    pub fn generate(config: &SkyConfig, rng: &mut Rng) -> Self {
        let stars = create_stars(config.star_count, rng);
        let constellations = build_constellations(&stars, &config.constellations, rng);
        log::info!(
            "Sky generated: {} stars, {} constellations",
            stars.len(),
            constellations.len()
        );
        Self { stars, constellations }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    /// Resolve a constellation's indices to its stars.
    pub fn chain_stars<'a>(&'a self, constellation: &'a Constellation) -> impl Iterator<Item = &'a Star> + 'a {
        constellation.stars.iter().filter_map(move |&i| self.stars.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_deterministic() {
        let config = SkyConfig::default();
        let a = Sky::generate(&config, &mut Rng::new(12345));
        let b = Sky::generate(&config, &mut Rng::new(12345));
        assert_eq!(a.stars(), b.stars());
        assert_eq!(a.constellations(), b.constellations());
        assert_eq!(a.stars().len(), config.star_count);
    }

    #[test]
    fn chain_stars_resolve_indices() {
        let sky = Sky::generate(&SkyConfig::default(), &mut Rng::new(7));
        let first = &sky.constellations()[0];
        let resolved: Vec<&Star> = sky.chain_stars(first).collect();
        assert_eq!(resolved.len(), first.len());
        assert_eq!(*resolved[0], sky.stars()[first.stars[0]]);
    }

    #[test]
    fn empty_config_generates_empty_sky() {
        let config = SkyConfig {
            star_count: 0,
            ..SkyConfig::default()
        };
        let sky = Sky::generate(&config, &mut Rng::new(1));
        assert!(sky.stars().is_empty());
        assert!(sky.constellations().is_empty());
    }
}
