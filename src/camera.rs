use crate::util::math::degree_to_radian;

/// Source of primary rays for a frame.
pub trait CameraRays {
    fn position(&self) -> glam::Vec3;
    /// One direction per pixel, indexed `x + y * width`.
    fn ray_directions(&self) -> &[glam::Vec3];
}

/// Perspective camera that caches one ray direction per viewport pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    fov_y: f32,
    z_near: f32,
    z_far: f32,

    position: glam::Vec3,
    forward: glam::Vec3,

    inverse_projection: glam::Mat4,
    inverse_view: glam::Mat4,

    ray_directions: Vec<glam::Vec3>,
    viewport_width: u32,
    viewport_height: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(45.0, 0.1, 100.0)
    }
}

impl Camera {
    pub const UP: glam::Vec3 = glam::Vec3::Y;

    /// `fov_y` is the vertical field of view in degrees.
    pub fn new(fov_y: f32, z_near: f32, z_far: f32) -> Self {
        let mut camera = Self {
            fov_y,
            z_near,
            z_far,
            position: glam::Vec3::new(0.0, 0.0, 6.0),
            forward: glam::Vec3::NEG_Z,
            inverse_projection: glam::Mat4::IDENTITY,
            inverse_view: glam::Mat4::IDENTITY,
            ray_directions: Vec::new(),
            viewport_width: 0,
            viewport_height: 0,
        };
        camera.recalculate_view();
        camera
    }

    pub fn forward(&self) -> glam::Vec3 {
        self.forward
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == self.viewport_width && height == self.viewport_height {
            return;
        }

        self.viewport_width = width;
        self.viewport_height = height;

        self.recalculate_projection();
        self.recalculate_ray_directions();
    }

    /// Move the camera without changing where it looks.
    pub fn set_position(&mut self, position: glam::Vec3) {
        self.position = position;
        self.recalculate_view();
    }

    /// Turn the camera towards `target`.
    ///
    /// A target at the camera position, or straight above or below it, has no
    /// usable view basis; the previous forward direction is kept.
    pub fn look_at(&mut self, target: glam::Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward.cross(Self::UP).length_squared() <= f32::EPSILON {
            tracing::warn!("ignoring degenerate look_at target {:?}", target);
            return;
        }

        self.forward = forward;
        self.recalculate_view();
        self.recalculate_ray_directions();
    }

    fn recalculate_projection(&mut self) {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return;
        }

        let aspect = self.viewport_width as f32 / self.viewport_height as f32;
        let projection = glam::Mat4::perspective_rh(
            degree_to_radian(self.fov_y),
            aspect,
            self.z_near,
            self.z_far,
        );
        self.inverse_projection = projection.inverse();
    }

    fn recalculate_view(&mut self) {
        let view = glam::Mat4::look_at_rh(self.position, self.position + self.forward, Self::UP);
        self.inverse_view = view.inverse();
    }

    fn recalculate_ray_directions(&mut self) {
        let (width, height) = (self.viewport_width, self.viewport_height);
        let inverse_projection = self.inverse_projection;
        let inverse_view = self.inverse_view;

        self.ray_directions = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    let coord =
                        glam::Vec2::new(x as f32 / width as f32, y as f32 / height as f32) * 2.0
                            - 1.0;
                    // Row 0 is the top of the image.
                    let target = inverse_projection * glam::Vec4::new(coord.x, -coord.y, 1.0, 1.0);
                    let direction = (target.truncate() / target.w).normalize();
                    inverse_view.transform_vector3(direction)
                })
            })
            .collect();
    }
}

impl CameraRays for Camera {
    fn position(&self) -> glam::Vec3 {
        self.position
    }

    fn ray_directions(&self) -> &[glam::Vec3] {
        &self.ray_directions
    }
}
