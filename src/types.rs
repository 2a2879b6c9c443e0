//! Core types for the Walk on Spheres estimator
//!
//! Defines the triangulated boundary surface the walk terminates against.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Immutable triangulated boundary surface
///
/// An ordered list of vertex positions plus an ordered list of triangle
/// index triples into that list. The mesh is assumed closed and
/// non-self-intersecting; distance queries are meaningless otherwise.
/// Constructed once from external input and read-only for the entire run.
/// The distance oracle only borrows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl Surface {
    /// Create a surface from vertex positions and triangle index triples
    ///
    /// Index validity is checked by [`solve`](crate::solve) before any
    /// query runs; see [`SolveError`](crate::SolveError).
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Surface {
            vertices,
            triangles,
        }
    }

    /// Vertex positions
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Triangle index triples
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True if the surface has no triangles
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of triangle `index`
    #[inline]
    pub fn triangle_vertices(&self, index: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_surface() -> Surface {
        Surface::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.5, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_counts() {
        let surface = test_surface();
        assert_eq!(surface.vertex_count(), 3);
        assert_eq!(surface.triangle_count(), 1);
        assert!(!surface.is_empty());
    }

    #[test]
    fn test_triangle_vertices() {
        let surface = test_surface();
        let [a, b, c] = surface.triangle_vertices(0);
        assert_eq!(a, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(b, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(c, Vec3::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn test_empty_surface() {
        let surface = Surface::new(Vec::new(), Vec::new());
        assert!(surface.is_empty());
        assert_eq!(surface.vertex_count(), 0);
    }
}
