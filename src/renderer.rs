use std::path::Path;

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::{
    camera::CameraRays,
    error::{OutputError, RenderError},
    hit::find_closest_hit,
    ray::Ray,
    scene::Scene,
    shading::{self, DirectionalLight, BACKGROUND_COLOR},
    util::color,
};

/// Display resource that receives finished frames.
pub trait Surface: Sized {
    fn create(width: u32, height: u32) -> Self;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn resize(&mut self, width: u32, height: u32);
    /// Upload a full frame of packed `0xAARRGGBB` pixels. Never read back.
    fn set_data(&mut self, data: &[u32]);
}

/// Surface backed by an RGBA8 image, suitable for writing to disk.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), OutputError> {
        self.image.save(path.as_ref())?;
        tracing::info!("image saved as {}", path.as_ref().display());
        Ok(())
    }
}

impl Surface for ImageSurface {
    fn create(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    fn set_data(&mut self, data: &[u32]) {
        for (pixel, packed) in self.image.pixels_mut().zip(data) {
            *pixel = Rgba(color::unpack_argb(*packed));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Render scanlines on the rayon thread pool.
    pub multithreaded: bool,
    pub light: DirectionalLight,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            multithreaded: true,
            light: DirectionalLight::default(),
        }
    }
}

/// CPU frame renderer.
///
/// Starts without a frame buffer; the first [`Renderer::resize`] creates the
/// surface and the pixel buffer. Rendering borrows the scene and camera only for
/// the duration of the call.
pub struct Renderer<S: Surface = ImageSurface> {
    final_image: Option<S>,
    image_data: Vec<u32>,
    /// The surface holds a frame published at its current size.
    has_frame: bool,
    settings: Settings,
}

impl<S: Surface> Default for Renderer<S> {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl<S: Surface> Renderer<S> {
    pub fn new(settings: Settings) -> Self {
        Self {
            final_image: None,
            image_data: Vec::new(),
            has_frame: false,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Current viewport size, `None` until the first resize.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.final_image
            .as_ref()
            .map(|image| (image.width(), image.height()))
    }

    pub fn width(&self) -> u32 {
        self.size().map_or(0, |(width, _)| width)
    }

    pub fn height(&self) -> u32 {
        self.size().map_or(0, |(_, height)| height)
    }

    /// True once a frame has been published at the current size.
    pub fn has_frame(&self) -> bool {
        self.has_frame
    }

    pub fn final_image(&self) -> Option<&S> {
        self.final_image.as_ref()
    }

    /// Packed pixels of the last frame, row-major.
    pub fn image_data(&self) -> Option<&[u32]> {
        self.final_image.as_ref().map(|_| self.image_data.as_slice())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        match self.final_image.as_mut() {
            Some(image) => {
                if image.width() == width && image.height() == height {
                    return;
                }
                image.resize(width, height);
            }
            None => self.final_image = Some(S::create(width, height)),
        }

        // Free the old frame before allocating the new one.
        drop(std::mem::take(&mut self.image_data));
        self.image_data = vec![0; width as usize * height as usize];
        self.has_frame = false;
        tracing::debug!("frame buffer resized to {}x{}", width, height);
    }

    pub fn render<C>(&mut self, scene: &Scene, camera: &C) -> Result<(), RenderError>
    where
        C: CameraRays + ?Sized,
    {
        let final_image = self
            .final_image
            .as_mut()
            .ok_or(RenderError::NotInitialized)?;
        let width = final_image.width() as usize;

        let ray_directions = camera.ray_directions();
        if ray_directions.len() != self.image_data.len() {
            return Err(RenderError::RayCountMismatch {
                expected: self.image_data.len(),
                actual: ray_directions.len(),
            });
        }

        let origin = camera.position();
        let light = self.settings.light;
        let render_row = |(y, row): (usize, &mut [u32])| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let ray = Ray::new(origin, ray_directions[x + y * width]);
                let color = color::clamp(trace_ray(&ray, scene, &light));
                *pixel = color::pack_argb(color);
            }
        };

        // chunks of zero length are not allowed
        if width > 0 {
            if self.settings.multithreaded {
                self.image_data
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(render_row);
            } else {
                self.image_data
                    .chunks_mut(width)
                    .enumerate()
                    .for_each(render_row);
            }
        }

        final_image.set_data(&self.image_data);
        self.has_frame = true;
        Ok(())
    }
}

fn trace_ray(ray: &Ray, scene: &Scene, light: &DirectionalLight) -> glam::Vec4 {
    match find_closest_hit(ray, scene) {
        Some(hit) => shading::shade(ray, &scene.spheres[hit.sphere_index], hit.distance, light),
        None => BACKGROUND_COLOR,
    }
}
