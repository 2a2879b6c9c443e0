//! BVH (Bounding Volume Hierarchy) for nearest-surface queries
//!
//! Provides O(log n) closest-point queries for triangle surfaces: each
//! query returns the squared distance to the surface, the triangle that
//! realizes it, and the nearest point itself. Built once per surface and
//! read-only afterwards, so batch queries share it freely across threads.
//!
//! Author: Moroya Sakamoto

use crate::types::Surface;
use glam::Vec3;
use rayon::prelude::*;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create an empty (inverted) AABB
    #[inline]
    pub fn empty() -> Self {
        Aabb {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Create AABB from min/max
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Expand AABB to include a point
    #[inline]
    pub fn expand_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Expand AABB to include another AABB
    #[inline]
    pub fn expand_aabb(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Get center of AABB
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get longest axis (0=X, 1=Y, 2=Z)
    #[inline]
    pub fn longest_axis(&self) -> usize {
        let d = self.max - self.min;
        if d.x > d.y && d.x > d.z {
            0
        } else if d.y > d.z {
            1
        } else {
            2
        }
    }

    /// Squared distance from a point to the AABB (zero inside)
    ///
    /// Lower bound for every triangle inside the box, used to prune
    /// subtrees during closest-point traversal.
    #[inline]
    pub fn distance_squared(&self, point: Vec3) -> f32 {
        let d = (self.min - point).max(point - self.max).max(Vec3::ZERO);
        d.length_squared()
    }
}

/// Triangle with precomputed data for fast closest-point queries
#[derive(Debug, Clone, Copy)]
pub struct BvhTriangle {
    /// First corner
    pub v0: Vec3,
    /// Second corner
    pub v1: Vec3,
    /// Third corner
    pub v2: Vec3,
    /// Bounding box of the three corners
    pub aabb: Aabb,
}

impl BvhTriangle {
    /// Create triangle from corner positions
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let mut aabb = Aabb::empty();
        aabb.expand_point(v0);
        aabb.expand_point(v1);
        aabb.expand_point(v2);

        BvhTriangle { v0, v1, v2, aabb }
    }

    /// Closest point on the triangle to `point`
    ///
    /// Walks the barycentric regions: checks the three vertex regions, the
    /// three edge regions, and finally projects into the face. Exact for
    /// non-degenerate triangles.
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let ab = self.v1 - self.v0;
        let ac = self.v2 - self.v0;
        let ap = point - self.v0;

        // Vertex region v0
        let d1 = ab.dot(ap);
        let d2 = ac.dot(ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return self.v0;
        }

        // Vertex region v1
        let bp = point - self.v1;
        let d3 = ab.dot(bp);
        let d4 = ac.dot(bp);
        if d3 >= 0.0 && d4 <= d3 {
            return self.v1;
        }

        // Edge region v0-v1
        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3).max(1e-10);
            return self.v0 + ab * v;
        }

        // Vertex region v2
        let cp = point - self.v2;
        let d5 = ab.dot(cp);
        let d6 = ac.dot(cp);
        if d6 >= 0.0 && d5 <= d6 {
            return self.v2;
        }

        // Edge region v0-v2
        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6).max(1e-10);
            return self.v0 + ac * w;
        }

        // Edge region v1-v2
        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6)).max(1e-10);
            return self.v1 + (self.v2 - self.v1) * w;
        }

        // Face region
        let denom = 1.0 / (va + vb + vc).max(1e-10);
        let v = vb * denom;
        let w = vc * denom;
        self.v0 + ab * v + ac * w
    }

    /// Squared distance from `point` to the triangle
    #[inline]
    pub fn distance_squared(&self, point: Vec3) -> f32 {
        point.distance_squared(self.closest_point(point))
    }
}

/// Result of a nearest-surface query for one point
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    /// Squared Euclidean distance to the nearest point on the surface
    pub distance_squared: f32,
    /// Index of the triangle realizing the minimum, into the surface's
    /// triangle list. Ties go to the triangle found first, which is
    /// deterministic for a fixed surface.
    pub triangle: u32,
    /// Nearest point on the surface
    pub point: Vec3,
}

/// BVH Node
#[derive(Debug)]
pub enum BvhNode {
    /// Leaf node containing triangle indices
    Leaf {
        /// Bounds of the contained triangles
        aabb: Aabb,
        /// Indices into the BVH's triangle list
        triangles: Vec<usize>,
    },
    /// Internal node with two children
    Internal {
        /// Combined bounds of both children
        aabb: Aabb,
        /// Left subtree
        left: Box<BvhNode>,
        /// Right subtree
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    /// Get AABB of this node
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { aabb, .. } => aabb,
            BvhNode::Internal { aabb, .. } => aabb,
        }
    }
}

/// BVH over a triangulated surface: the distance oracle
///
/// Triangles are stored in the same order as the surface's triangle list,
/// so the `triangle` field of a [`SurfaceHit`] indexes directly into
/// [`Surface::triangles`].
pub struct SurfaceBvh {
    triangles: Vec<BvhTriangle>,
    root: Option<BvhNode>,
}

impl SurfaceBvh {
    /// Build the BVH from a surface
    ///
    /// Median split along the longest axis. `max_triangles_per_leaf`
    /// bounds the leaf size; 4 is a good default.
    pub fn build(surface: &Surface, max_triangles_per_leaf: usize) -> Self {
        let triangles: Vec<BvhTriangle> = (0..surface.triangle_count())
            .map(|i| {
                let [v0, v1, v2] = surface.triangle_vertices(i);
                BvhTriangle::new(v0, v1, v2)
            })
            .collect();

        if triangles.is_empty() {
            return SurfaceBvh {
                triangles,
                root: None,
            };
        }

        let indices: Vec<usize> = (0..triangles.len()).collect();
        let root = Self::build_node(&triangles, indices, max_triangles_per_leaf.max(1));

        SurfaceBvh {
            triangles,
            root: Some(root),
        }
    }

    /// Recursively build BVH nodes
    fn build_node(triangles: &[BvhTriangle], indices: Vec<usize>, max_per_leaf: usize) -> BvhNode {
        let mut aabb = Aabb::empty();
        for &idx in &indices {
            aabb.expand_aabb(&triangles[idx].aabb);
        }

        if indices.len() <= max_per_leaf {
            return BvhNode::Leaf {
                aabb,
                triangles: indices,
            };
        }

        // Split along longest axis using median
        let axis = aabb.longest_axis();
        let mut sorted_indices = indices;
        sorted_indices.sort_by(|&a, &b| {
            let ca = triangles[a].aabb.center();
            let cb = triangles[b].aabb.center();
            let va = match axis {
                0 => ca.x,
                1 => ca.y,
                _ => ca.z,
            };
            let vb = match axis {
                0 => cb.x,
                1 => cb.y,
                _ => cb.z,
            };
            va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = sorted_indices.len() / 2;
        let (left_indices, right_indices) = sorted_indices.split_at(mid);

        let left = Self::build_node(triangles, left_indices.to_vec(), max_per_leaf);
        let right = Self::build_node(triangles, right_indices.to_vec(), max_per_leaf);

        BvhNode::Internal {
            aabb,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Nearest point on the surface to `point`
    ///
    /// For an empty surface the hit carries an infinite distance and a
    /// meaningless triangle index; [`solve`](crate::solve) rejects empty
    /// surfaces before any query runs.
    pub fn closest_point(&self, point: Vec3) -> SurfaceHit {
        let mut best = SurfaceHit {
            distance_squared: f32::INFINITY,
            triangle: 0,
            point,
        };
        if let Some(root) = &self.root {
            self.closest_recursive(root, point, &mut best);
        }
        best
    }

    /// Recursive closest-point query with subtree pruning
    fn closest_recursive(&self, node: &BvhNode, point: Vec3, best: &mut SurfaceHit) {
        match node {
            BvhNode::Leaf { triangles, .. } => {
                for &idx in triangles {
                    let candidate = self.triangles[idx].closest_point(point);
                    let d = point.distance_squared(candidate);
                    if d < best.distance_squared {
                        best.distance_squared = d;
                        best.triangle = idx as u32;
                        best.point = candidate;
                    }
                }
            }
            BvhNode::Internal { left, right, .. } => {
                let left_dist = left.aabb().distance_squared(point);
                let right_dist = right.aabb().distance_squared(point);

                // Visit the nearer child first; a subtree whose box cannot
                // beat the current best is skipped entirely
                let (first, first_dist, second, second_dist) = if left_dist <= right_dist {
                    (left, left_dist, right, right_dist)
                } else {
                    (right, right_dist, left, left_dist)
                };

                if first_dist < best.distance_squared {
                    self.closest_recursive(first, point, best);
                }
                if second_dist < best.distance_squared {
                    self.closest_recursive(second, point, best);
                }
            }
        }
    }

    /// Batch closest-point query (parallel)
    ///
    /// The structure is read-only during queries, so points are processed
    /// on the Rayon pool without synchronization. Results are recomputed
    /// fresh on every call.
    pub fn closest_point_batch(&self, points: &[Vec3]) -> Vec<SurfaceHit> {
        points.par_iter().map(|&p| self.closest_point(p)).collect()
    }

    /// Get total triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get surface bounds
    pub fn bounds(&self) -> Option<Aabb> {
        self.root.as_ref().map(|r| *r.aabb())
    }
}
