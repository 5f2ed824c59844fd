mod camera;
mod clip;
mod color;
mod error;
mod framebuffer;
mod graphics;
mod input;
mod lighting;
pub mod math;
mod meshes;
mod raster;
mod system;
mod texture;
mod trig;
mod types;
mod util;
mod window;

pub use camera::{Camera, Projection};
pub use clip::{ClippedTriangle, clip_against_plane};
pub use color::Color;
pub use error::RenderError;
pub use framebuffer::{BACK_BUFFER_COUNT, FrameBuffers};
pub use graphics::Renderer;
pub use input::{InputState, InputsCommanded, adjust_camera_free};
pub use lighting::{Light, LightType};
pub use math::{Mat4, Quaternion, Vec2, Vec3, Vec4};
pub use meshes::{Aabb, Mesh, MeshVertex, Object3D, Triangle, Vertex};
pub use system::run;
pub use texture::Image;
pub use trig::{lookup_cosine, lookup_sine};
pub use types::{EngineSettings, InputSettings, mb};
pub use util::screen_to_ray;
// Re-export winit key codes for use in the API; this prevents the calling
// app from needing winit as a direct dependency.
pub use winit::{self, keyboard::KeyCode};
