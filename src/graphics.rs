//! The engine state handed to user callbacks, and the object-to-screen
//! pipeline: world transform, back-face cull, near/far and screen-edge
//! clipping, then triangle dispatch to the rasterizer.

use log::error;

use crate::{
    camera::Camera,
    clip::clip_against_plane,
    color::Color,
    error::RenderError,
    framebuffer::FrameBuffers,
    input::{InputState, InputsCommanded},
    math::{Mat4, Vec2, Vec3, srt},
    meshes::{MeshVertex, Object3D, Triangle},
    texture::Image,
};

/// Upper bound on triangles produced while clipping one input triangle
/// against the four screen edges: at most four enter the loop (near and far
/// clips can each split), and each edge can at most double the set.
const CLIP_SCRATCH: usize = 64;

/// Everything a frame needs: the buffer set, cached viewport transform,
/// frame metering and per-frame input. User callbacks receive `&mut Renderer`
/// and draw through it.
pub struct Renderer {
    buffers: FrameBuffers,
    viewport: Mat4,

    pub(crate) fps: usize,
    pub(crate) frame_index: usize,
    pub(crate) clear_screen: bool,
    pub(crate) invert_y: bool,
    pub(crate) pending_title: Option<String>,
    pub(crate) input: InputState,
    pub(crate) inputs_commanded: InputsCommanded,
}

impl Renderer {
    /// Buffers are allocated here, once, and live for the renderer's
    /// lifetime. Dimensions are expected pre-clamped (see `EngineSettings`).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffers: FrameBuffers::new(width, height),
            viewport: Mat4::viewport(width, height),
            fps: 0,
            frame_index: 1,
            clear_screen: true,
            invert_y: false,
            pending_title: None,
            input: InputState::default(),
            inputs_commanded: InputsCommanded::default(),
        }
    }

    pub fn canvas_width(&self) -> usize {
        self.buffers.width()
    }

    pub fn canvas_height(&self) -> usize {
        self.buffers.height()
    }

    /// Frames per second, re-measured every quarter second.
    pub fn fps(&self) -> usize {
        self.fps
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Keyboard/mouse state as of the start of this frame.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Movement/look commands distilled from device events, for the
    /// camera-adjust helpers.
    pub fn inputs_commanded(&self) -> &InputsCommanded {
        &self.inputs_commanded
    }

    /// Change the window title; applied at the next event-loop turn. The
    /// canvas dimensions are fixed for the lifetime of the window, the title
    /// is not.
    pub fn set_window_title(&mut self, title: impl Into<String>) {
        self.pending_title = Some(title.into());
    }

    /// Enable or disable the per-frame clear. Disabling it leaves the
    /// previous frame's pixels in place, which progressive renderers rely on.
    pub fn clear_screen_toggle(&mut self, value: bool) {
        self.clear_screen = value;
    }

    /// Flip the presented image vertically: origin at the bottom left
    /// instead of the top left.
    pub fn invert_y_axis(&mut self, value: bool) {
        self.invert_y = value;
    }

    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    /// Reset the present back buffer and depth plane. Called by the frame
    /// loop when clearing is enabled; exposed for headless rendering.
    pub fn clear_frame(&mut self) {
        self.buffers.clear();
    }

    /// Post-present bookkeeping: rotate to the other back buffer, bump the
    /// frame index, flush per-frame input deltas.
    pub(crate) fn end_frame(&mut self) {
        self.buffers.rotate();
        self.frame_index += 1;
        self.input.wheel_delta = 0.0;
        self.inputs_commanded.clear_deltas();
    }

    // Drawing primitives, delegated to the buffer set.

    pub fn draw_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.buffers.draw_pixel(x, y, color);
    }

    /// Pixel write participating in progressive accumulation; `sample` is
    /// the 1-based sample index for the pixel.
    pub fn draw_pixel_sampled(&mut self, x: usize, y: usize, color: Color, sample: usize) {
        self.buffers.draw_pixel_sampled(x, y, color, sample);
    }

    pub fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color) {
        self.buffers.draw_line(p0, p1, color);
    }

    pub fn draw_image(
        &mut self,
        x: usize,
        y: usize,
        img: &Image,
        x_scale: f32,
        y_scale: f32,
        invert_x: bool,
        invert_y: bool,
    ) {
        self.buffers
            .draw_image(x, y, img, x_scale, y_scale, invert_x, invert_y);
    }

    pub fn draw_with_shader(&mut self, shader: impl FnMut(u16, u16) -> Color) {
        self.buffers.draw_with_shader(shader);
    }

    /// Render one object through the full pipeline. `camera` must have had
    /// `update_view_matrix` called this frame; the cull step uses the
    /// world-space triangle while the clipper receives the view-space one.
    pub fn draw_object<V: MeshVertex>(
        &mut self,
        object: &Object3D<V>,
        camera: &Camera,
        wireframe: bool,
    ) -> Result<(), RenderError> {
        debug_assert!(
            camera.view_ready(),
            "Camera::update_view_matrix must run before draw_object"
        );

        let world = srt(
            Mat4::scaler(object.scale.x, object.scale.y, object.scale.z),
            Mat4::rotation(object.rotation.z, object.rotation.y, object.rotation.x),
            Mat4::translation(object.position.x, object.position.y, object.position.z),
        );

        let proj = Mat4::projection(
            self.canvas_width(),
            self.canvas_height(),
            camera.projection.fov_deg,
            camera.projection.near,
            camera.projection.far,
        );
        let proj_viewport = proj * self.viewport;

        let canvas_w = (self.canvas_width() - 1) as f32;
        let canvas_h = (self.canvas_height() - 1) as f32;

        let screen_planes = [
            (Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(0.0, canvas_h, 0.0), Vec3::new(0.0, -1.0, 0.0)),
            (Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)),
            (Vec3::new(canvas_w, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
        ];

        for (mesh, texture) in object.meshes.iter().zip(&object.diffuse_textures) {
            for corner in mesh.indices.chunks_exact(3) {
                let to_world = Triangle::new(
                    mesh.vertices[corner[0] as usize],
                    mesh.vertices[corner[1] as usize],
                    mesh.vertices[corner[2] as usize],
                )
                .transformed(&world);

                // Only triangles whose geometric normal faces the camera
                // survive. The test runs in world space, before the view
                // transform touches the positions.
                let normal = to_world.normal();
                if normal.dot(to_world.a.position() - camera.position) >= 0.0 {
                    continue;
                }

                let to_view = to_world.transformed(&camera.last_camera_matrix);

                // Near plane first, far plane on each survivor, then project
                // into pixel space.
                let mut front = [to_view; CLIP_SCRATCH];
                let mut front_count = 0;

                let near_clipped = clip_against_plane(
                    Vec3::new(0.0, 0.0, camera.projection.near),
                    Vec3::new(0.0, 0.0, 1.0),
                    &to_view,
                );

                for tri in &near_clipped.triangles[..near_clipped.num as usize] {
                    let far_clipped = clip_against_plane(
                        Vec3::new(0.0, 0.0, camera.projection.far),
                        Vec3::new(0.0, 0.0, -1.0),
                        tri,
                    );

                    for tri in &far_clipped.triangles[..far_clipped.num as usize] {
                        front[front_count] = tri.transformed(&proj_viewport);
                        front_count += 1;
                    }
                }

                // Sutherland–Hodgman sweep over the four screen edges. Each
                // plane reads the previous set and writes a fresh one.
                let mut back = front;
                for (plane_p, plane_n) in screen_planes {
                    let mut back_count = 0;

                    for tri in &front[..front_count] {
                        let clipped = clip_against_plane(plane_p, plane_n, tri);

                        for tri in &clipped.triangles[..clipped.num as usize] {
                            if back_count == CLIP_SCRATCH {
                                error!("clip scratch overflow at {back_count} triangles");
                                return Err(RenderError::ClipOverflow);
                            }
                            back[back_count] = *tri;
                            back_count += 1;
                        }
                    }

                    front = back;
                    front_count = back_count;
                }

                for tri in &front[..front_count] {
                    if wireframe {
                        self.buffers.draw_wire_triangle(tri);
                    } else {
                        self.buffers.draw_textured_triangle(tri, texture);
                    }
                }
            }
        }

        Ok(())
    }
}
