use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub spheres: Vec<Sphere>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sphere {
    pub position: glam::Vec3,
    /// Not validated. Only `radius * radius` is used, so the sign is ignored and
    /// a zero radius registers only along rays through the center.
    pub radius: f32,

    pub albedo: glam::Vec3,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: glam::Vec3::ZERO,
            radius: 1.0,
            albedo: glam::Vec3::ONE,
        }
    }
}

impl Sphere {
    pub fn new(position: glam::Vec3, radius: f32, albedo: glam::Vec3) -> Self {
        Self {
            position,
            radius,
            albedo,
        }
    }
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>) -> Self {
        Self { spheres }
    }

    /// Magenta unit sphere at the origin resting on a large blue sphere.
    pub fn demo() -> Self {
        Self::new(vec![
            Sphere::new(glam::Vec3::ZERO, 1.0, glam::Vec3::new(1.0, 0.0, 1.0)),
            Sphere::new(
                glam::Vec3::new(0.0, -101.0, 0.0),
                100.0,
                glam::Vec3::new(0.2, 0.3, 1.0),
            ),
        ])
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn remove_sphere(&mut self, index: usize) -> Option<Sphere> {
        (index < self.spheres.len()).then(|| self.spheres.remove(index))
    }

    pub fn clear(&mut self) {
        self.spheres.clear();
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn from_ron_str(source: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(source)?)
    }

    /// Load a scene description from a RON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_ron_str(&content)?;
        tracing::debug!("loaded {} spheres from {}", scene.len(), path.display());
        Ok(scene)
    }
}
