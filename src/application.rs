use std::{
    path::Path,
    time::{Duration, Instant},
};

use crate::{
    camera::Camera,
    error::{OutputError, RenderError},
    renderer::{Renderer, Settings},
    scene::Scene,
};

#[derive(Debug, Default)]
pub struct AppState {
    last_frame_time: Duration,
    total_frame_time: Duration,
    frame_count: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, frame_time: Duration) {
        self.last_frame_time = frame_time;
        self.total_frame_time += frame_time;
        self.frame_count += 1;
    }

    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn average_frame_time(&self) -> Option<Duration> {
        let frames = u32::try_from(self.frame_count).ok().filter(|&n| n > 0)?;
        Some(self.total_frame_time / frames)
    }
}

/// Headless host: owns the scene and camera and drives the renderer.
pub struct Application {
    scene: Scene,
    camera: Camera,
    renderer: Renderer,
    state: AppState,
}

impl Application {
    pub fn new(scene: Scene, camera: Camera, settings: Settings) -> Self {
        Self {
            scene,
            camera,
            renderer: Renderer::new(settings),
            state: AppState::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Edits take effect on the next frame.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Resize the viewport. Zero-sized requests are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.on_resize(width, height);
            self.renderer.resize(width, height);
        }
    }

    pub fn frame(&mut self) -> Result<(), RenderError> {
        let start = Instant::now();
        self.renderer.render(&self.scene, &self.camera)?;
        let frame_time = start.elapsed();

        self.state.record_frame(frame_time);
        tracing::debug!(
            "frame {} rendered in {:.2?}",
            self.state.frame_count(),
            frame_time
        );
        Ok(())
    }

    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> Result<(), OutputError> {
        if !self.renderer.has_frame() {
            return Err(OutputError::NoImage);
        }
        self.renderer
            .final_image()
            .ok_or(OutputError::NoImage)?
            .save(path)
    }

    pub fn shutdown(&self) {
        match self.state.average_frame_time() {
            Some(average) => tracing::info!(
                "exiting after {} frames, average {:.2?}",
                self.state.frame_count(),
                average
            ),
            None => tracing::info!("exiting"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_frame_time() {
        let mut state = AppState::new();
        assert_eq!(state.average_frame_time(), None);

        state.record_frame(Duration::from_millis(10));
        state.record_frame(Duration::from_millis(30));

        assert_eq!(state.frame_count(), 2);
        assert_eq!(state.last_frame_time(), Duration::from_millis(30));
        assert_eq!(state.average_frame_time(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut app = Application::new(Scene::demo(), Camera::default(), Settings::default());
        app.resize(0, 10);
        assert_eq!(app.renderer().size(), None);
        assert_eq!(app.frame(), Err(RenderError::NotInitialized));
    }

    #[test]
    fn frames_are_counted() {
        let mut app = Application::new(Scene::demo(), Camera::default(), Settings::default());
        app.resize(12, 8);
        app.frame().unwrap();
        app.frame().unwrap();
        assert_eq!(app.state().frame_count(), 2);
    }

    #[test]
    fn saving_after_resize_requires_a_new_frame() {
        let mut app = Application::new(Scene::demo(), Camera::default(), Settings::default());
        app.resize(4, 4);
        app.frame().unwrap();
        app.resize(8, 8);

        assert!(matches!(app.save_image("unused.png"), Err(OutputError::NoImage)));
    }

    #[test]
    fn saving_requires_a_frame() {
        let mut app = Application::new(Scene::demo(), Camera::default(), Settings::default());
        app.resize(4, 4);
        assert!(matches!(app.save_image("unused.png"), Err(OutputError::NoImage)));
    }
}
