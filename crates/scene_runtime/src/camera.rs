//! # Camera controller
//!
//! Holds the single shared camera pose scripts steer. Writes are applied
//! immediately and the last write in a tick is what the snapshot sees; there
//! is no interpolation and no queuing.
//!
//! Orientation convention: `rotation` maps camera space to world space and
//! the camera looks down its local -Z axis with +Y up.

use nalgebra::{Isometry3, Translation3};

use crate::core::CameraConfig;
use crate::foundation::math::{Mat4, Quat, Vec3};

/// Read-only camera pose handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// World-space position
    pub position: Vec3,
    /// Camera-to-world rotation
    pub rotation: Quat,
}

impl CameraState {
    /// World-to-view matrix for this pose
    pub fn view_matrix(&self) -> Mat4 {
        Isometry3::from_parts(Translation3::from(self.position), self.rotation)
            .inverse()
            .to_homogeneous()
    }
}

/// Mutable camera pose, last write wins
#[derive(Debug, Clone)]
pub struct CameraController {
    position: Vec3,
    rotation: Quat,
}

impl CameraController {
    /// Camera at the origin looking down -Z
    pub fn new() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }

    /// Camera at the pose described by `config`
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            rotation: config.rotation(),
        }
    }

    /// Move the camera
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Orient the camera
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Move the camera by `offset` in world space
    pub fn translate(&mut self, offset: Vec3) {
        self.set_position(self.position + offset);
    }

    /// Orient the camera towards `target`, keeping `up` as close to +Y of the
    /// view as possible. Does nothing when `target` is the camera position.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let direction = target - self.position;
        if direction.norm_squared() <= f32::EPSILON {
            log::trace!("look_at target coincides with camera position, ignored");
            return;
        }

        let up = if direction.cross(&up).norm_squared() <= f32::EPSILON {
            // Looking straight along `up`: any perpendicular axis will do
            Vec3::z()
        } else {
            up
        };
        self.rotation = Quat::face_towards(&-direction, &up);
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current rotation
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Direction the camera looks in, world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::z()
    }

    /// Snapshot of the current pose
    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            rotation: self.rotation,
        }
    }

    /// World-to-view matrix for the current pose
    pub fn view_matrix(&self) -> Mat4 {
        self.state().view_matrix()
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}
