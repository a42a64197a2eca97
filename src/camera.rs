// src/camera.rs
// 2D orthographic camera with dampened (smoothed) motion.
use glam::Vec4Swizzles;
use glam::{Mat4, Vec2, Vec3, Vec4};
use bytemuck::{Pod, Zeroable};

/// Camera data in the layout the renderer uploads as a uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera2D) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
        }
    }
}

/// A plain 2D camera: no smoothing, just the values used to build the view-projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// Translation applied to the world before projection.
    pub position: Vec2,
    /// Number of world units visible from the bottom to the top of the viewport.
    pub vertical_size: f32,
    /// Rotation around the view axis, in radians.
    pub rotation: f32,
    /// Viewport width / height.
    pub aspect_ratio: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            vertical_size: 1.0,
            rotation: 0.0,
            aspect_ratio: 1.0,
        }
    }
}

impl Camera2D {
    /// Aspect ratio safe to divide by. Falls back to 1.0 for unset or degenerate viewports.
    pub fn effective_aspect_ratio(&self) -> f32 {
        if self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0 {
            self.aspect_ratio
        } else {
            1.0
        }
    }

    /// Update the aspect ratio from the viewport pixel size. Zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// "Zooms in" by a percentage of the current vertical size.
    /// 1.0 = 1%, 100.0 = 100%. Negative values zoom the other way.
    pub fn zoom_in(&mut self, percent: f32) {
        self.vertical_size += percent * self.vertical_size / 100.0;
    }

    /// Build the view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        let half_height = self.vertical_size * 0.5;
        let half_width = half_height * self.effective_aspect_ratio();

        // near/far are arbitrary for 2D, they only leave room for draw ordering
        let proj_matrix = Mat4::orthographic_rh(
            -half_width,
            half_width,
            -half_height,
            half_height,
            -100.0,
            100.0,
        );

        let view_matrix = Mat4::from_rotation_z(self.rotation)
            * Mat4::from_translation(Vec3::new(self.position.x, self.position.y, 0.0));

        proj_matrix * view_matrix
    }

    /// Convert a view-space point (top-left (0,0), bottom-right (1,1)) into world coordinates.
    pub fn view_to_world(&self, view_point: Vec2) -> Vec2 {
        unproject(self.view_projection(), view_point)
    }

    /// Convert a world point into view space (top-left (0,0), bottom-right (1,1)).
    pub fn world_to_view(&self, world_point: Vec2) -> Vec2 {
        let clip = self.view_projection() * Vec4::new(world_point.x, world_point.y, 0.0, 1.0);
        let ndc = clip.xy() / clip.w;
        Vec2::new(ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5)
    }
}

/// Map a view-space point through the inverse of `view_proj`.
pub(crate) fn unproject(view_proj: Mat4, view_point: Vec2) -> Vec2 {
    // view space y grows downwards, NDC y grows upwards
    let ndc_x = view_point.x * 2.0 - 1.0;
    let ndc_y = 1.0 - view_point.y * 2.0;

    let world = view_proj.inverse() * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    world.xy() / world.w
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn blend_factor(time_delta: f32, dampening: f32) -> f32 {
    if dampening <= 0.0 {
        return 1.0;
    }
    (time_delta / dampening).clamp(0.0, 1.0)
}

/// As [`Camera2D`], but position, rotation and vertical size follow a target over time.
#[derive(Debug, Clone)]
pub struct DampenedCamera2D {
    /// Less dampening means faster motion; more dampening is smoother but slower.
    pub vertical_size_dampening: f32,
    pub position_dampening: f32,
    pub rotation_dampening: f32,

    /// The values used for display. Only set these for immediate changes.
    pub current: Camera2D,
    /// The values the camera moves toward. This is what input handling should modify.
    pub target: Camera2D,
}

impl Default for DampenedCamera2D {
    fn default() -> Self {
        Self {
            vertical_size_dampening: 0.25,
            position_dampening: 0.25,
            rotation_dampening: 0.25,
            current: Camera2D::default(),
            target: Camera2D::default(),
        }
    }
}

impl DampenedCamera2D {
    /// A camera already resting at the given vertical size.
    pub fn with_vertical_size(vertical_size: f32) -> Self {
        let mut camera = Self::default();
        camera.target.vertical_size = vertical_size;
        camera.current.vertical_size = vertical_size;
        camera.snap();
        camera
    }

    /// Immediately snap every dampened value to the target.
    pub fn snap(&mut self) {
        self.current.position = self.target.position;
        self.current.rotation = self.target.rotation;
        self.current.vertical_size = self.target.vertical_size;
    }

    /// Blend the current values toward the target.
    pub fn update(&mut self, time_delta: f32) {
        let t_pos = blend_factor(time_delta, self.position_dampening);
        self.current.position = self.current.position.lerp(self.target.position, t_pos);

        let t_rot = blend_factor(time_delta, self.rotation_dampening);
        self.current.rotation = lerp(self.current.rotation, self.target.rotation, t_rot);

        let t_size = blend_factor(time_delta, self.vertical_size_dampening);
        self.current.vertical_size =
            lerp(self.current.vertical_size, self.target.vertical_size, t_size);
    }

    /// Viewport changes apply to both cameras at once; the aspect ratio is never dampened.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.current.set_viewport(width, height);
        self.target.set_viewport(width, height);
    }

    /// Move the target by a mouse drag given in pixels (screen y pointing down).
    pub fn pan_by_pixels(&mut self, pixel_delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let delta = Vec2::new(pixel_delta.x, -pixel_delta.y);
        self.target.position += delta / viewport_height * self.target.vertical_size;
    }
}
