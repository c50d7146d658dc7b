//! 2D polygon math shared by the collision resolver and shape setup.
//!
//! Polygons are ordered vertex lists (counter-clockwise, +Y up). All
//! functions here are pure; degenerate inputs (zero-length edges, empty
//! vertex lists) degrade to zero vectors instead of failing.

use glam::Vec2;

/// Scalar interval produced by projecting a polygon onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Project every vertex onto `axis` and keep the extremes.
    pub fn project(axis: Vec2, vertices: &[Vec2]) -> Self {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for v in vertices {
            let d = axis.dot(*v);
            min = min.min(d);
            max = max.max(d);
        }
        Self { min, max }
    }

    /// Signed separation between two intervals.
    ///
    /// Positive means the intervals are disjoint by that amount;
    /// non-positive means they overlap and the value is the (negative)
    /// penetration depth.
    pub fn separation(a: Self, b: Self) -> f32 {
        (a.min - b.max).max(b.min - a.max)
    }
}

/// Arithmetic mean of the vertices. Zero for an empty polygon.
pub fn centroid(vertices: &[Vec2]) -> Vec2 {
    if vertices.is_empty() {
        return Vec2::ZERO;
    }
    let sum: Vec2 = vertices.iter().copied().sum();
    sum / vertices.len() as f32
}

/// Translate every vertex by `by`.
pub fn offset_polygon(vertices: &mut [Vec2], by: Vec2) {
    for v in vertices.iter_mut() {
        *v += by;
    }
}

/// Rotate every vertex around the local origin by `radians`.
pub fn rotate_polygon(vertices: &mut [Vec2], radians: f32) {
    let (s, c) = radians.sin_cos();
    for v in vertices.iter_mut() {
        *v = Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c);
    }
}

/// Scale every vertex relative to the local origin.
pub fn scale_polygon(vertices: &mut [Vec2], scale: f32) {
    for v in vertices.iter_mut() {
        *v *= scale;
    }
}

/// Raise every vertex to at least `bound`, component-wise.
pub fn clamp_min_polygon(vertices: &mut [Vec2], bound: Vec2) {
    for v in vertices.iter_mut() {
        *v = v.max(bound);
    }
}

/// Lower every vertex to at most `bound`, component-wise.
pub fn clamp_max_polygon(vertices: &mut [Vec2], bound: Vec2) {
    for v in vertices.iter_mut() {
        *v = v.min(bound);
    }
}

/// Outward unit normal of the edge `from -> to`.
///
/// For a counter-clockwise winding this points away from the polygon
/// interior. A zero-length edge yields the zero vector.
pub fn edge_normal(from: Vec2, to: Vec2) -> Vec2 {
    let edge = to - from;
    Vec2::new(edge.y, -edge.x).normalize_or_zero()
}

/// One outward unit normal per edge, `normals[i]` belonging to the edge
/// `vertices[i] -> vertices[(i + 1) % n]`.
pub fn edge_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    let n = vertices.len();
    (0..n)
        .map(|i| edge_normal(vertices[i], vertices[(i + 1) % n]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(-0.5, 0.5),
        ]
    }

    #[test]
    fn normalize_zero_vector_is_zero() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn normalize_nonzero_is_unit_length() {
        let v = Vec2::new(3.0, -4.0).normalize_or_zero();
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn projection_of_square_on_x() {
        let interval = Interval::project(Vec2::X, &unit_square());
        assert_eq!(interval.min, -0.5);
        assert_eq!(interval.max, 0.5);
    }

    #[test]
    fn separation_signs() {
        let a = Interval { min: 0.0, max: 1.0 };
        let b = Interval { min: 2.0, max: 3.0 };
        assert_eq!(Interval::separation(a, b), 1.0);

        let c = Interval { min: 0.5, max: 1.5 };
        assert_eq!(Interval::separation(a, c), -0.5);
        // Symmetric in its arguments.
        assert_eq!(Interval::separation(c, a), -0.5);
    }

    #[test]
    fn separation_touching_is_zero() {
        let a = Interval { min: 0.0, max: 1.0 };
        let b = Interval { min: 1.0, max: 2.0 };
        assert_eq!(Interval::separation(a, b), 0.0);
    }

    #[test]
    fn centroid_of_square_is_origin() {
        assert_eq!(centroid(&unit_square()), Vec2::ZERO);
    }

    #[test]
    fn square_normals_point_outward() {
        let verts = unit_square();
        let normals = edge_normals(&verts);
        assert_eq!(normals.len(), verts.len());
        assert_eq!(normals[0], Vec2::new(0.0, -1.0)); // bottom edge
        assert_eq!(normals[1], Vec2::new(1.0, 0.0)); // right edge
        assert_eq!(normals[2], Vec2::new(0.0, 1.0)); // top edge
        assert_eq!(normals[3], Vec2::new(-1.0, 0.0)); // left edge
    }

    #[test]
    fn clamps_act_per_component() {
        let mut verts = unit_square();
        clamp_max_polygon(&mut verts, Vec2::new(0.25, f32::MAX));
        assert_eq!(verts[1], Vec2::new(0.25, -0.5));
        assert_eq!(verts[2], Vec2::new(0.25, 0.5));
        // y untouched by the x-only bound.
        assert_eq!(verts[0], Vec2::new(-0.5, -0.5));

        clamp_min_polygon(&mut verts, Vec2::ZERO);
        assert_eq!(verts[0], Vec2::ZERO);
        assert_eq!(verts[2], Vec2::new(0.25, 0.5));
    }

    #[test]
    fn rotate_quarter_turn() {
        let mut verts = vec![Vec2::new(1.0, 0.0)];
        rotate_polygon(&mut verts, std::f32::consts::FRAC_PI_2);
        assert!((verts[0] - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }
}
