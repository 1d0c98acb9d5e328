//! First-person camera math shared by aim assist and the projectile spawner.
//!
//! The host loop rebuilds a `CameraView` each frame from wherever its camera
//! state lives; nothing in the core holds onto one between frames.

use bevy::prelude::*;

/// Vertical field of view used when the host doesn't specify one
pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

/// Snapshot of the player camera for one frame
#[derive(Clone, Debug)]
pub struct CameraView {
    pub position: Vec3,
    pub forward: Vec3,
    /// Viewport size in pixels
    pub viewport: Vec2,
    view_proj: Mat4,
    inv_view_proj: Mat4,
}

impl CameraView {
    pub fn new(position: Vec3, forward: Vec3, viewport: Vec2, fov_y: f32) -> Self {
        let forward = forward.normalize();
        let aspect = viewport.x / viewport.y;
        let view = Mat4::look_to_rh(position, forward, Vec3::Y);
        let proj = Mat4::perspective_rh(fov_y, aspect, NEAR_PLANE, FAR_PLANE);
        let view_proj = proj * view;
        Self {
            position,
            forward,
            viewport,
            view_proj,
            inv_view_proj: view_proj.inverse(),
        }
    }

    /// Project a world point to screen pixels plus its NDC depth.
    /// Depth outside (0, 1) means the point is not usefully on screen.
    pub fn world_to_screen(&self, world: Vec3) -> (Vec2, f32) {
        let ndc = self.view_proj.project_point3(world);
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        );
        (screen, ndc.z)
    }

    /// World-space ray direction through a screen pixel
    pub fn screen_ray(&self, screen: Vec2) -> Vec3 {
        let ndc = Vec3::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
            0.5,
        );
        let world = self.inv_view_proj.project_point3(ndc);
        (world - self.position).normalize()
    }

    /// Distance to a point along the view axis (negative = behind)
    pub fn forward_distance(&self, world: Vec3) -> f32 {
        (world - self.position).dot(self.forward)
    }
}
