//! Walk Engine (Deep Fried Edition)
//!
//! Advances every query point through a sequence of maximal-sphere jumps
//! toward the boundary surface.
//!
//! # Deep Fried Optimizations
//! - **Parallel Walks**: `walk_parallel` fans the per-point walks out on the
//!   Rayon pool; points never couple, so no synchronization is needed.
//! - **Derived Generators**: one `SmallRng` per point, derived from the base
//!   seed and the point index, so sequential and parallel execution produce
//!   identical output for the same seed.
//!
//! Author: Moroya Sakamoto

use crate::bvh::SurfaceBvh;
use crate::sampler::{sample_on_sphere, SphereSampling};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Round cap of the legacy estimator
pub const LEGACY_ROUND_CAP: usize = 5;

/// Configuration for the walk loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Maximum number of rounds before a walk stops unconditionally
    pub max_rounds: usize,
    /// Stop a point's walk once its squared distance to the surface drops
    /// below `tolerance²`. Zero disables the check: every point then runs
    /// exactly `max_rounds` rounds, the legacy behavior.
    pub tolerance: f32,
    /// How step directions are drawn
    pub sampling: SphereSampling,
    /// Base seed for the per-point generators. `None` draws one from
    /// thread-local entropy, making each run independent.
    pub seed: Option<u64>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        WalkConfig {
            max_rounds: LEGACY_ROUND_CAP,
            tolerance: 0.0,
            sampling: SphereSampling::Planar,
            seed: None,
        }
    }
}

impl WalkConfig {
    /// Corrected mode: uniform sphere sampling plus an early-exit tolerance
    pub fn accurate() -> Self {
        WalkConfig {
            tolerance: 1e-4,
            sampling: SphereSampling::Uniform,
            ..Default::default()
        }
    }

    /// Same configuration with a fixed seed for reproducible walks
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Derive the generator seed for one point from the base seed
#[inline]
fn point_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[inline]
fn resolve_base_seed(config: &WalkConfig) -> u64 {
    config.seed.unwrap_or_else(|| rand::thread_rng().gen())
}

/// Walk every query point toward the surface
///
/// Pure over its inputs apart from the randomness: the walk state starts as
/// a copy of `query_points` and is advanced in place, round by round. Each
/// round batch-queries the distance oracle once, then independently
/// replaces every point with a sample on the sphere whose radius is that
/// point's current distance to the surface. Rounds are strictly sequential;
/// a point already on the surface has radius zero and never moves.
pub fn walk(bvh: &SurfaceBvh, query_points: &[Vec3], config: &WalkConfig) -> Vec<Vec3> {
    let base = resolve_base_seed(config);
    let mut rngs: Vec<SmallRng> = (0..query_points.len())
        .map(|i| SmallRng::seed_from_u64(point_seed(base, i)))
        .collect();

    let tolerance_sq = config.tolerance * config.tolerance;
    let mut positions = query_points.to_vec();

    for _ in 0..config.max_rounds {
        let hits = bvh.closest_point_batch(&positions);

        for (i, hit) in hits.iter().enumerate() {
            if hit.distance_squared < tolerance_sq {
                continue;
            }
            let radius = hit.distance_squared.sqrt();
            positions[i] = sample_on_sphere(positions[i], radius, config.sampling, &mut rngs[i]);
        }
    }

    positions
}

/// Parallel variant of [`walk`]
///
/// Each point runs its full walk on a Rayon worker with its own derived
/// generator. Output is identical to [`walk`] for the same seed.
pub fn walk_parallel(bvh: &SurfaceBvh, query_points: &[Vec3], config: &WalkConfig) -> Vec<Vec3> {
    let base = resolve_base_seed(config);
    let tolerance_sq = config.tolerance * config.tolerance;

    query_points
        .par_iter()
        .enumerate()
        .map(|(i, &start)| {
            let mut rng = SmallRng::seed_from_u64(point_seed(base, i));
            let mut position = start;

            for _ in 0..config.max_rounds {
                let hit = bvh.closest_point(position);
                if hit.distance_squared < tolerance_sq {
                    break;
                }
                let radius = hit.distance_squared.sqrt();
                position = sample_on_sphere(position, radius, config.sampling, &mut rng);
            }

            position
        })
        .collect()
}
