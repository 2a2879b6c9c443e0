//! Boundary value resolution
//!
//! Reads an estimate off the boundary once a walk has terminated: find the
//! triangle the walked point landed nearest to, pick one of that triangle's
//! vertices, and return the boundary value stored at it. The estimator only
//! ever selects existing values; nothing is interpolated.
//!
//! Author: Moroya Sakamoto

use crate::bvh::SurfaceBvh;
use crate::types::Surface;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which vertices of the terminating triangle compete for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexSelection {
    /// Compare only the triangle's first and second vertex
    ///
    /// Legacy behavior: the third vertex is left out of the comparison.
    FirstTwo,
    /// Compare all three vertices
    AllThree,
}

impl Default for VertexSelection {
    fn default() -> Self {
        VertexSelection::FirstTwo
    }
}

impl VertexSelection {
    /// Number of candidate vertices
    #[inline]
    fn candidate_count(self) -> usize {
        match self {
            VertexSelection::FirstTwo => 2,
            VertexSelection::AllThree => 3,
        }
    }
}

/// Resolve one boundary value per walked point
///
/// Batch-queries the oracle once more to find each walked point's
/// terminating triangle, then selects the candidate vertex nearest (by
/// squared Euclidean distance) to the *original* query point, not the
/// walked point, and returns the boundary value at that vertex's index.
///
/// Output length equals the query point count, and every output is an
/// entry of `boundary_values`.
pub fn resolve_boundary_values(
    bvh: &SurfaceBvh,
    surface: &Surface,
    boundary_values: &[f32],
    query_points: &[Vec3],
    walked_points: &[Vec3],
    selection: VertexSelection,
) -> Vec<f32> {
    debug_assert_eq!(query_points.len(), walked_points.len());
    debug_assert_eq!(boundary_values.len(), surface.vertex_count());

    let hits = bvh.closest_point_batch(walked_points);
    let vertices = surface.vertices();

    hits.iter()
        .zip(query_points)
        .map(|(hit, &origin)| {
            let triangle = surface.triangles()[hit.triangle as usize];

            let mut closest_index = triangle[0];
            let mut closest_dist = vertices[closest_index as usize].distance_squared(origin);

            for &index in &triangle[1..selection.candidate_count()] {
                let dist = vertices[index as usize].distance_squared(origin);
                if dist < closest_dist {
                    closest_index = index;
                    closest_dist = dist;
                }
            }

            boundary_values[closest_index as usize]
        })
        .collect()
}
