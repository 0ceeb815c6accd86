use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use ray_tracing_lib::{application::Application, Camera, Scene, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ray_tracing")]
#[command(about = "CPU sphere ray tracer")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// RON scene description; the built-in demo scene is used when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Number of frames to render before saving the last one
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Render on the calling thread only
    #[arg(long)]
    single_threaded: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let scene = match &args.scene {
        Some(path) => match Scene::load_from_file(path) {
            Ok(scene) => scene,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Scene::demo(),
    };
    tracing::info!(
        "rendering {} spheres at {}x{}",
        scene.len(),
        args.width,
        args.height
    );

    let settings = Settings {
        multithreaded: !args.single_threaded,
        ..Settings::default()
    };
    let mut application = Application::new(scene, Camera::default(), settings);
    application.resize(args.width, args.height);

    for _ in 0..args.frames.max(1) {
        if let Err(e) = application.frame() {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }
    tracing::info!(
        "last frame took {:.2?}",
        application.state().last_frame_time()
    );

    let result = application.save_image(&args.output);
    application.shutdown();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
