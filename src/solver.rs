//! Solver entry point
//!
//! Validates the problem inputs once, builds the distance oracle, runs the
//! walk, and resolves boundary values into estimates. All error conditions
//! are precondition violations on the inputs; the whole call fails rather
//! than partially compute.
//!
//! Author: Moroya Sakamoto

use crate::bvh::SurfaceBvh;
use crate::resolve::{resolve_boundary_values, VertexSelection};
use crate::types::Surface;
use crate::walk::{walk, walk_parallel, WalkConfig};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Precondition violations rejected before any computation starts
#[derive(Error, Debug)]
pub enum SolveError {
    /// The surface has no vertices or no triangles
    #[error("surface is empty")]
    EmptySurface,
    /// A triangle references a vertex index outside the vertex list
    #[error("triangle {triangle} references vertex {index}, but the surface has {vertex_count} vertices")]
    TriangleIndexOutOfRange {
        /// Index of the offending triangle
        triangle: usize,
        /// Out-of-range vertex index
        index: u32,
        /// Number of vertices in the surface
        vertex_count: usize,
    },
    /// Boundary value count does not match the vertex count
    #[error("{values} boundary values for {vertices} vertices")]
    BoundaryValueMismatch {
        /// Number of boundary values supplied
        values: usize,
        /// Number of surface vertices
        vertices: usize,
    },
}

/// Default leaf size of the distance oracle's BVH
pub const DEFAULT_MAX_TRIANGLES_PER_LEAF: usize = 4;

/// Configuration for a full solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveConfig {
    /// Walk loop configuration
    pub walk: WalkConfig,
    /// Vertex selection policy of the boundary value resolver
    pub selection: VertexSelection,
    /// Maximum triangles per BVH leaf
    pub max_triangles_per_leaf: usize,
    /// Run the per-point walks on the Rayon pool
    pub parallel: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            walk: WalkConfig::default(),
            selection: VertexSelection::FirstTwo,
            max_triangles_per_leaf: DEFAULT_MAX_TRIANGLES_PER_LEAF,
            parallel: true,
        }
    }
}

impl SolveConfig {
    /// Corrected mode: uniform sphere sampling, three-vertex resolution,
    /// early-exit tolerance
    pub fn accurate() -> Self {
        SolveConfig {
            walk: WalkConfig::accurate(),
            selection: VertexSelection::AllThree,
            ..Default::default()
        }
    }

    /// Same configuration with a fixed seed for reproducible estimates
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.walk.seed = Some(seed);
        self
    }
}

/// Estimate the harmonic function at each query point
///
/// Runs the Walk on Spheres estimator: every query point walks toward the
/// surface through [`SolveConfig::walk`] rounds of maximal-sphere jumps,
/// then the boundary value resolver reads one estimate per point off the
/// triangle the walk terminated on.
///
/// # Arguments
/// * `surface` - Closed triangulated boundary surface
/// * `boundary_values` - One Dirichlet value per surface vertex
/// * `query_points` - Evaluation points; output order matches input order
/// * `config` - Walk, resolution, and execution options
///
/// # Returns
/// One estimate per query point. Every estimate is an entry of
/// `boundary_values`.
///
/// # Errors
/// [`SolveError`] if the surface is empty, a triangle index is out of
/// range, or the boundary value count does not match the vertex count.
pub fn solve(
    surface: &Surface,
    boundary_values: &[f32],
    query_points: &[Vec3],
    config: &SolveConfig,
) -> Result<Vec<f32>, SolveError> {
    validate(surface, boundary_values)?;

    if query_points.is_empty() {
        return Ok(Vec::new());
    }

    let bvh = SurfaceBvh::build(surface, config.max_triangles_per_leaf);

    let walked = if config.parallel {
        walk_parallel(&bvh, query_points, &config.walk)
    } else {
        walk(&bvh, query_points, &config.walk)
    };

    Ok(resolve_boundary_values(
        &bvh,
        surface,
        boundary_values,
        query_points,
        &walked,
        config.selection,
    ))
}

/// Check the oracle and resolver preconditions once, before any query
fn validate(surface: &Surface, boundary_values: &[f32]) -> Result<(), SolveError> {
    if surface.is_empty() || surface.vertex_count() == 0 {
        return Err(SolveError::EmptySurface);
    }

    let vertex_count = surface.vertex_count();
    for (triangle, indices) in surface.triangles().iter().enumerate() {
        for &index in indices {
            if index as usize >= vertex_count {
                return Err(SolveError::TriangleIndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
    }

    if boundary_values.len() != vertex_count {
        return Err(SolveError::BoundaryValueMismatch {
            values: boundary_values.len(),
            vertices: vertex_count,
        });
    }

    Ok(())
}
