//! Code to manage the camera.
//!
//! The camera holds Euler angles in degrees (x pitch, y yaw, z roll) and two
//! cached matrices refreshed by [`Camera::update_view_matrix`]. The draw
//! entry points read those caches, so call it once per frame before drawing.

use crate::math::{Mat4, Quaternion, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct Projection {
    /// Field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_deg: 90.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    /// Degrees; x is pitch, y is yaw, z is roll.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub projection: Projection,

    /// World position to keep looking at, if any. A snapshot, not a live
    /// reference: refresh it when the tracked object moves.
    target: Option<Vec3>,

    /// View matrix produced by the most recent `update_view_matrix`.
    pub(crate) last_camera_matrix: Mat4,
    /// Rotation-only matrix from the same update; feeds the basis helpers.
    rotation_cached: Mat4,
    view_ready: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(1.0),
            projection: Projection::default(),
            target: None,
            last_camera_matrix: Mat4::IDENTITY,
            rotation_cached: Mat4::IDENTITY,
            view_ready: false,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn set_target(&mut self, target: Option<Vec3>) {
        self.target = target;
    }

    /// Rebuild and cache the view matrix from the current position and
    /// rotation (or the target, when one is set). Pitch is clamped short of
    /// the poles; yaw and roll wrap.
    pub fn update_view_matrix(&mut self) -> Mat4 {
        let mut looking_at = Vec3::new(0.0, 0.0, 1.0);

        if let Some(target) = self.target {
            looking_at = (target - self.position).normalized();
        }

        self.rotation.x = self.rotation.x.clamp(-89.9, 89.9);
        self.rotation.y %= 360.0;
        self.rotation.z %= 360.0;

        let q = Quaternion::from_euler(self.rotation.x, self.rotation.y, self.rotation.z);
        self.rotation_cached = q.to_mat4();

        looking_at = self.rotation_cached * looking_at;
        looking_at += self.position;

        self.last_camera_matrix =
            Mat4::point_at(self.position, looking_at, Vec3::new(0.0, 1.0, 0.0)).inverse();
        self.view_ready = true;

        self.last_camera_matrix
    }

    /// Whether the view matrix has ever been computed; draw entry points
    /// assert this in debug builds.
    pub(crate) fn view_ready(&self) -> bool {
        self.view_ready
    }

    /// Direction toward `location`, rotated into the camera's frame.
    pub fn towards(&self, location: Vec3) -> Vec3 {
        self.rotation_cached * location.normalized()
    }

    pub fn forward(&self) -> Vec3 {
        match self.target {
            Some(target) => self.rotation_cached * (target - self.position).normalized(),
            None => self.rotation_cached * Vec3::new(0.0, 0.0, 1.0),
        }
    }

    pub fn up(&self) -> Vec3 {
        self.rotation_cached * Vec3::new(0.0, 1.0, 0.0)
    }

    pub fn left(&self) -> Vec3 {
        match self.target {
            Some(target) => self.up().cross((target - self.position).normalized()),
            None => self.rotation_cached * Vec3::new(-1.0, 0.0, 0.0),
        }
    }
}
