use serde::{Deserialize, Serialize};

use super::star::Star;
use crate::core::rng::Rng;

/// Names handed out to generated chains. Repeats are allowed.
pub const CONSTELLATION_NAMES: [&str; 10] = [
    "Orión",
    "Andrómeda",
    "Cisne",
    "Fénix",
    "Lyra",
    "Delfín",
    "Pegaso",
    "Canopus",
    "Corona",
    "Apus",
];

/// A named chain of stars, stored as indices into the sky's star list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constellation {
    pub name: &'static str,
    pub stars: Vec<usize>,
}

impl Constellation {
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Index of the star used to anchor the label when `segments` are shown.
    pub fn label_star(&self, segments: usize) -> Option<usize> {
        let last = self.stars.len().checked_sub(1)?;
        self.stars.get((segments / 2).min(last)).copied()
    }
}

/// Tuning for [`build_constellations`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConstellationParams {
    /// Number of chains to build.
    pub groups: usize,
    /// Chains start from every `stride`-th star.
    pub stride: usize,
    /// Maximum stars per chain, including the seed.
    pub max_len: usize,
    /// Squared-distance window (exclusive) for the next link.
    pub min_d2: f32,
    pub max_d2: f32,
}

impl Default for ConstellationParams {
    fn default() -> Self {
        Self {
            groups: 7,
            stride: 4,
            max_len: 6,
            min_d2: 0.0005,
            max_d2: 0.05,
        }
    }
}

/// Build `params.groups` chains by greedy nearest-neighbour extension.
///
/// Per chain the stream is consumed as: seed pick, then name pick.
pub fn build_constellations(stars: &[Star], params: &ConstellationParams, rng: &mut Rng) -> Vec<Constellation> {
    let stride = params.stride.max(1);
    let seeds: Vec<usize> = (0..stars.len()).step_by(stride).collect();
    if seeds.is_empty() {
        return Vec::new();
    }

    let max_len = params.max_len.max(1);
    (0..params.groups)
        .map(|_| {
            let mut chain = vec![seeds[rng.index(seeds.len())]];
            while chain.len() < max_len {
                match nearest_link(stars, &chain, params) {
                    Some(next) => chain.push(next),
                    None => break,
                }
            }
            let name = CONSTELLATION_NAMES[rng.index(CONSTELLATION_NAMES.len())];
            Constellation { name, stars: chain }
        })
        .collect()
}

/// Closest star to the chain's tail inside the distance window, skipping
/// stars the chain already holds.
fn nearest_link(stars: &[Star], chain: &[usize], params: &ConstellationParams) -> Option<usize> {
    let tail = stars[*chain.last()?].pos;
    let mut best: Option<(usize, f32)> = None;
    for (j, star) in stars.iter().enumerate() {
        if chain.contains(&j) {
            continue;
        }
        let d2 = star.pos.distance_squared(tail);
        if d2 <= params.min_d2 || d2 >= params.max_d2 {
            continue;
        }
        if best.map_or(true, |(_, bd)| d2 < bd) {
            best = Some((j, d2));
        }
    }
    best.map(|(j, _)| j)
}
