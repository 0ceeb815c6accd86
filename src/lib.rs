pub mod application;
pub mod camera;
pub mod error;
pub mod hit;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod shading;
pub mod util;

pub use camera::{Camera, CameraRays};
pub use error::{OutputError, RenderError, SceneError};
pub use renderer::{ImageSurface, Renderer, Settings, Surface};
pub use scene::{Scene, Sphere};
