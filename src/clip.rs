//! Triangle clipping against a single plane, Sutherland–Hodgman style. The
//! transform pipeline runs every triangle through a sequence of these calls:
//! near, far, then the four screen edges.

use crate::{
    math::Vec3,
    meshes::{MeshVertex, Triangle},
};

/// Result of clipping one triangle against one plane: zero, one or two
/// triangles. Only the first `num` slots hold valid data.
#[derive(Clone, Copy, Debug)]
pub struct ClippedTriangle<V: MeshVertex> {
    pub num: u32,
    pub triangles: [Triangle<V>; 2],
}

/// Parameter along the segment start→end at which it crosses the plane.
/// `plane_n` must be normalized.
fn intersect_plane(plane_p: Vec3, plane_n: Vec3, line_start: Vec3, line_end: Vec3) -> f32 {
    let plane_d = -plane_n.dot(plane_p);
    let ad = line_start.dot(plane_n);
    let bd = line_end.dot(plane_n);

    (-plane_d - ad) / (bd - ad)
}

/// Clip `tri` against the plane through `plane_p` with unit normal `plane_n`,
/// keeping the halfspace the normal points into (signed distance ≥ 0).
/// Vertices introduced on the plane get their attributes from the vertex
/// type's own interpolation. Back-face culling must already have happened;
/// the split cases do not guarantee the input winding.
pub fn clip_against_plane<V: MeshVertex>(
    plane_p: Vec3,
    plane_n: Vec3,
    tri: &Triangle<V>,
) -> ClippedTriangle<V> {
    let dist = |p: Vec3| plane_n.x * p.x + plane_n.y * p.y + plane_n.z * p.z - plane_n.dot(plane_p);

    // Partition the corners by side, keeping the original a, b, c order
    // within each group.
    let mut inside: [&V; 3] = [&tri.a; 3];
    let mut outside: [&V; 3] = [&tri.a; 3];
    let mut inside_count = 0;
    let mut outside_count = 0;

    for vertex in [&tri.a, &tri.b, &tri.c] {
        if dist(vertex.position()) >= 0.0 {
            inside[inside_count] = vertex;
            inside_count += 1;
        } else {
            outside[outside_count] = vertex;
            outside_count += 1;
        }
    }

    match inside_count {
        // Fully outside; the triangle ceases to exist.
        0 => ClippedTriangle {
            num: 0,
            triangles: [*tri; 2],
        },

        // Fully inside; passes through untouched.
        3 => ClippedTriangle {
            num: 1,
            triangles: [*tri; 2],
        },

        // One corner survives: the clipped shape is a smaller triangle whose
        // two new corners sit on the plane.
        1 => {
            let a = *inside[0];

            let t = intersect_plane(plane_p, plane_n, inside[0].position(), outside[0].position());
            let b = inside[0].lerp(outside[0], t);

            let t = intersect_plane(plane_p, plane_n, inside[0].position(), outside[1].position());
            let c = inside[0].lerp(outside[1], t);

            ClippedTriangle {
                num: 1,
                triangles: [Triangle::new(a, b, c), *tri],
            }
        }

        // Two corners survive: the clipped shape is a quad, returned as two
        // triangles sharing the first intersection point.
        _ => {
            let t = intersect_plane(plane_p, plane_n, inside[0].position(), outside[0].position());
            let first = Triangle::new(*inside[0], *inside[1], inside[0].lerp(outside[0], t));

            let t = intersect_plane(plane_p, plane_n, inside[1].position(), outside[0].position());
            let second = Triangle::new(*inside[1], first.c, inside[1].lerp(outside[0], t));

            ClippedTriangle {
                num: 2,
                triangles: [first, second],
            }
        }
    }
}
