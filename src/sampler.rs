//! Sphere sampling for walk steps
//!
//! Draws the random point that advances a walk: one sample at a given
//! radius around the current position. The generator is owned by the
//! caller's execution context and passed in, one per walked point.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// How step directions are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SphereSampling {
    /// Sample on the circle of the given radius in the plane z = center.z
    ///
    /// Legacy behavior: the step direction never leaves the center's
    /// z-plane even though the surface is 3D.
    Planar,
    /// Sample uniformly over the full sphere surface
    Uniform,
}

impl Default for SphereSampling {
    fn default() -> Self {
        SphereSampling::Planar
    }
}

/// Draw one point at distance `radius` from `center`
///
/// A zero radius returns `center` unchanged, so a point that has already
/// reached the surface never moves again.
#[inline]
pub fn sample_on_sphere(
    center: Vec3,
    radius: f32,
    mode: SphereSampling,
    rng: &mut impl Rng,
) -> Vec3 {
    if radius <= 0.0 {
        return center;
    }

    match mode {
        SphereSampling::Planar => {
            let theta = rng.gen_range(0.0..TAU);
            center + radius * Vec3::new(theta.cos(), theta.sin(), 0.0)
        }
        SphereSampling::Uniform => {
            // z uniform in [-1, 1] with theta uniform in [0, tau) gives a
            // uniform density over the sphere surface
            let theta = rng.gen_range(0.0..TAU);
            let z: f32 = rng.gen_range(-1.0..=1.0);
            let r = (1.0 - z * z).max(0.0).sqrt();
            center + radius * Vec3::new(r * theta.cos(), r * theta.sin(), z)
        }
    }
}
