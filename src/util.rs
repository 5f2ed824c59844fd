use crate::{
    camera::Camera,
    math::{Mat4, Vec3, Vec4},
};

/// Convert a screen position (x, y in pixels) to a 3D ray in world space,
/// returned as points on the near and far planes.
///
/// The canonical use case is finding which object a user is pointing at with
/// the cursor: walk the returned segment and test against object bounds.
/// `update_view_matrix` must have run on the camera this frame.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    canvas_dims: (usize, usize),
    cam: &Camera,
) -> (Vec3, Vec3) {
    let proj = Mat4::projection(
        canvas_dims.0,
        canvas_dims.1,
        cam.projection.fov_deg,
        cam.projection.near,
        cam.projection.far,
    );

    // Vectors are post-multiplied view-then-projection, so the combined
    // forward transform composes in that order.
    let view_proj = cam.last_camera_matrix * proj;
    let inverse = view_proj.inverse();

    // Normalize to clip space; flip Y so 0 is the top row.
    let sx = screen_pos.0 / canvas_dims.0 as f32;
    let sy = screen_pos.1 / canvas_dims.1 as f32;

    let clip_x = 2.0 * sx - 1.0;
    let clip_y = 1.0 - 2.0 * sy;

    // Depth 0 is the near plane, 1 the far plane. The perspective divide
    // happens inside the Vec4 multiply.
    let near_world = inverse * Vec4::new(clip_x, clip_y, 0.0, 1.0);
    let far_world = inverse * Vec4::new(clip_x, clip_y, 1.0, 1.0);

    (near_world.xyz(), far_world.xyz())
}
