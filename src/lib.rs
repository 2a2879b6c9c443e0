//! # walk-on-spheres
//!
//! Monte Carlo estimation of harmonic functions on triangle meshes using
//! the Walk on Spheres method.
//!
//! Given a closed triangulated surface, one Dirichlet boundary value per
//! vertex, and a set of evaluation points, [`solve`] estimates the harmonic
//! function at each point: every point repeatedly jumps to a random
//! location on the maximal sphere inscribed at its current distance to the
//! surface, and once the walk terminates the estimate is read off the
//! boundary values of the triangle it landed on.
//!
//! ## Features
//!
//! - **Distance Oracle**: BVH-accelerated nearest-point-on-surface queries
//! - **Legacy parity**: planar sphere sampling and two-vertex boundary
//!   resolution matching the legacy estimator exactly
//! - **Corrected modes**: uniform sphere sampling, three-vertex resolution,
//!   and a tolerance-based stopping policy
//! - **Deterministic seeding**: identical output from sequential and
//!   parallel execution for a fixed seed
//! - **Parallel batches**: Rayon-powered walks and distance queries
//!
//! ## Example
//!
//! ```rust
//! use walk_on_spheres::prelude::*;
//!
//! // Unit quad in the z=0 plane, split into two triangles.
//! let surface = Surface::new(
//!     vec![
//!         Vec3::new(-1.0, -1.0, 0.0),
//!         Vec3::new(1.0, -1.0, 0.0),
//!         Vec3::new(1.0, 1.0, 0.0),
//!         Vec3::new(-1.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2], [0, 2, 3]],
//! );
//!
//! // Uniform boundary value: every estimate must equal it exactly.
//! let boundary = vec![0.5; surface.vertex_count()];
//! let queries = vec![Vec3::new(0.2, 0.1, 0.3)];
//!
//! let estimates = solve(&surface, &boundary, &queries, &SolveConfig::default()).unwrap();
//! assert_eq!(estimates, vec![0.5]);
//! ```
//!
//! ## Author
//!
//! Moroya Sakamoto

#![warn(missing_docs)]

pub mod bvh;
pub mod resolve;
pub mod sampler;
pub mod solver;
pub mod types;
pub mod walk;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::bvh::{Aabb, BvhTriangle, SurfaceBvh, SurfaceHit};
    pub use crate::resolve::{resolve_boundary_values, VertexSelection};
    pub use crate::sampler::{sample_on_sphere, SphereSampling};
    pub use crate::solver::{solve, SolveConfig, SolveError, DEFAULT_MAX_TRIANGLES_PER_LEAF};
    pub use crate::types::Surface;
    pub use crate::walk::{walk, walk_parallel, WalkConfig, LEGACY_ROUND_CAP};
    pub use glam::Vec3;
}

// Re-exports for convenience
pub use solver::{solve, SolveConfig, SolveError};
pub use types::Surface;
