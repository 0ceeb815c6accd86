use crate::{ray::Ray, scene::Sphere};

/// Colour written when a ray hits nothing.
pub const BACKGROUND_COLOR: glam::Vec4 = glam::Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Single distant light shining along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    direction: glam::Vec3,
}

impl DirectionalLight {
    /// `direction` is normalized; a zero vector leaves every surface unlit.
    pub fn new(direction: glam::Vec3) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn direction(&self) -> glam::Vec3 {
        self.direction
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(glam::Vec3::new(-1.0, -1.0, -1.0))
    }
}

/// Lambertian shading of `sphere` at `distance` along `ray`. Alpha is always 1.
pub fn shade(ray: &Ray, sphere: &Sphere, distance: f32, light: &DirectionalLight) -> glam::Vec4 {
    let hit_point = ray.at(distance);
    let normal = (hit_point - sphere.position).normalize();

    let intensity = normal.dot(-light.direction()).max(0.0); // == cos(angle)

    let color = sphere.albedo * intensity;
    color.extend(1.0)
}
