//! Common test helpers for walk-on-spheres integration tests
//!
//! Author: Moroya Sakamoto

use walk_on_spheres::prelude::*;

// ============================================================================
// Standard test surfaces
// ============================================================================

/// Unit quad in the z=0 plane, two triangles
pub fn quad_surface() -> Surface {
    Surface::new(
        vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
}

/// Closed axis-aligned cube spanning [-1, 1]^3, 12 triangles
///
/// Vertices 0..4 sit on the x = -1 face, vertices 4..8 on x = +1.
pub fn cube_surface() -> Surface {
    let vertices = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
    ];
    let triangles = vec![
        // -x face
        [0, 1, 2],
        [0, 2, 3],
        // +x face
        [4, 6, 5],
        [4, 7, 6],
        // -y face
        [0, 3, 7],
        [0, 7, 4],
        // +y face
        [1, 5, 6],
        [1, 6, 2],
        // -z face
        [0, 4, 5],
        [0, 5, 1],
        // +z face
        [3, 2, 6],
        [3, 6, 7],
    ];
    Surface::new(vertices, triangles)
}

// ============================================================================
// Standard boundary values
// ============================================================================

/// One distinct value per cube vertex: 10, 11, .., 17
pub fn cube_distinct_boundary() -> Vec<f32> {
    (0..8).map(|i| 10.0 + i as f32).collect()
}

/// 0 on the x = -1 vertices of the cube, 1 on the x = +1 vertices
pub fn cube_two_value_boundary() -> Vec<f32> {
    vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]
}

// ============================================================================
// Standard query sets
// ============================================================================

/// `n`³ interior grid points inside the unit cube
pub fn interior_grid(n: usize) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(n * n * n);
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                // Offset by half a cell so every point is strictly interior
                let to_coord = |i: usize| (i as f32 + 0.5) / n as f32 * 1.6 - 0.8;
                points.push(Vec3::new(to_coord(x), to_coord(y), to_coord(z)));
            }
        }
    }
    points
}
