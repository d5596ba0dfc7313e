use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use flycam::prelude::*;

#[derive(Parser)]
#[command(name = "flycam", about = "Fly a camera around a wireframe cube")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the render mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Override the projection policy
    #[arg(long, value_enum)]
    projection: Option<ProjectionArg>,

    /// Add the flat terrain under the cube
    #[arg(long)]
    terrain: bool,

    /// Render one frame from the start pose to this PNG file and exit
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Wireframe,
    Filled,
    FilledWireframe,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Wireframe => RenderMode::Wireframe,
            ModeArg::Filled => RenderMode::Filled,
            ModeArg::FilledWireframe => RenderMode::FilledWireframe,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProjectionArg {
    Pinhole,
    Perspective,
}

impl From<ProjectionArg> for ProjectionPolicy {
    fn from(projection: ProjectionArg) -> Self {
        match projection {
            ProjectionArg::Pinhole => ProjectionPolicy::Pinhole,
            ProjectionArg::Perspective => ProjectionPolicy::Perspective,
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(mode) = cli.mode {
        config.render.mode = mode.into();
    }
    if let Some(projection) = cli.projection {
        config.projection.kind = projection.into();
    }
    if cli.terrain {
        config.terrain.enabled = true;
    }
    config.validate()?;
    Ok(config)
}

fn snapshot(config: &Config, scene: &Scene, path: &Path) -> Result<()> {
    let engine = config.engine();
    let mut camera = config.camera();
    let frame = engine.frame(&mut camera, scene, 0.0, &InputIntent::IDLE);

    let mut renderer = Renderer::new(config.window.width, config.window.height);
    renderer.set_background(config.render.background);
    renderer.draw(&frame);
    renderer
        .save_png(path)
        .with_context(|| format!("writing {}", path.display()))?;

    info!(
        path = %path.display(),
        polygons = frame.stats.polygons,
        lines = frame.stats.lines,
        "snapshot written"
    );
    Ok(())
}

fn run(config: &Config, scene: &Scene) -> Result<()> {
    let (width, height) = (config.window.width, config.window.height);
    let title = format!("{} | {CONTROLS}", config.window.title);
    let mut window = Window::new(&title, width, height).map_err(anyhow::Error::msg)?;
    let mut renderer = Renderer::new(width, height);
    renderer.set_background(config.render.background);
    let mut engine = config.engine();
    let mut camera = config.camera();

    let mut limiter = FrameLimiter::new(&window, config.window.fps_cap);
    let mut fps = FpsCounter::new(window.timer().ticks64());

    info!("{CONTROLS}");

    loop {
        let events = window.poll_events();
        if let Some((w, h)) = events.resized {
            window.resize(w, h).map_err(anyhow::Error::msg)?;
            renderer.resize(w, h);
            engine.resize(w, h);
        }

        let input = window.input_intent(&events);
        let dt = limiter.wait_and_get_delta(&window);

        let frame = engine.frame(&mut camera, scene, dt, &input);
        renderer.draw(&frame);
        window
            .present(renderer.as_bytes(), renderer.pitch())
            .map_err(anyhow::Error::msg)?;

        if let Some(rate) = fps.tick(window.timer().ticks64()) {
            window
                .set_title(&FpsCounter::status_title(rate))
                .map_err(anyhow::Error::msg)?;
            debug!(fps = rate, "frame rate");
        }

        if input.quit {
            break;
        }
    }

    info!("shutting down");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = load_config(&cli)?;
    let scene = config.scene()?;
    info!(
        mode = ?config.render.mode,
        projection = ?config.projection.kind,
        terrain = config.terrain.enabled,
        "flycam starting"
    );

    match &cli.snapshot {
        Some(path) => snapshot(&config, &scene, path),
        None => run(&config, &scene),
    }
}
