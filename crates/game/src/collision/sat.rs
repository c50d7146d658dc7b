use glam::Vec2;

use crate::geometry::Interval;

/// Deepest non-separating axis between two overlapping polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Signed separation along the winning axis. Zero means the
    /// polygons touch exactly; negative is the penetration depth.
    pub separation: f32,
    /// Unit direction that moves the first polygon out of the second.
    pub push: Vec2,
}

/// Separating-axis test over the union of both polygons' edge normals.
///
/// Returns `None` as soon as any axis shows positive separation (the
/// polygons are disjoint). Otherwise returns the axis of shallowest
/// penetration among the normals that point roughly toward the
/// obstacle; back-facing normals are rejected up front.
///
/// Candidate normals survive the filter only when they point toward the
/// obstacle, so the push-out direction is the reverse of the winning
/// normal regardless of which polygon contributed it.
pub fn polygon_contact(
    mover_verts: &[Vec2],
    mover_centroid: Vec2,
    mover_normals: &[Vec2],
    obstacle_verts: &[Vec2],
    obstacle_centroid: Vec2,
    obstacle_normals: &[Vec2],
) -> Option<Contact> {
    let obstacle_dir = obstacle_centroid - mover_centroid;

    let mut best: Option<(f32, Vec2)> = None;
    // Two passes: the mover's edge normals, then the obstacle's.
    for normals in [mover_normals, obstacle_normals] {
        for &normal in normals {
            if normal.dot(obstacle_dir) < 0.0 {
                continue;
            }

            let a = Interval::project(normal, mover_verts);
            let b = Interval::project(normal, obstacle_verts);
            let separation = Interval::separation(a, b);
            if separation > 0.0 {
                // True separating axis; no need to look further.
                return None;
            }

            if best.is_none_or(|(s, _)| separation > s) {
                best = Some((separation, normal));
            }
        }
    }

    // All candidate axes rejected as back-facing: degenerate geometry,
    // treated as no contact.
    let (separation, normal) = best?;
    Some(Contact {
        separation,
        push: -normal,
    })
}
