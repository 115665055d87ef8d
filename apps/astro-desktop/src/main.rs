mod app;

use anyhow::{Context, Result};
use app::{App, AppConfig, Scene};
use astro_mesh::{light_cube_mesh, ship_mesh};
use astro_render_wgpu::ShaderLibrary;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

/// Exit status when the window or GPU cannot be brought up (`-1` as a byte).
const INIT_FAILURE: u8 = 255;

#[derive(Parser)]
#[command(name = "astro-desktop", about = "Astro Astro: steer with WASD or the arrow keys")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window width in pixels
    #[arg(long, default_value = "480")]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "360")]
    height: u32,

    /// Target frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Directory containing ship.wgsl and light.wgsl (built-in shaders otherwise)
    #[arg(long)]
    shader_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("astro-desktop starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::from(INIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let scene = Scene {
        shaders: load_shaders(cli.shader_dir.as_deref()),
        ship: ship_mesh().context("failed to build ship mesh")?,
        light: light_cube_mesh(),
    };
    let config = AppConfig {
        title: "Astro Astro".into(),
        width: cli.width,
        height: cli.height,
        fps: cli.fps,
    };

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config, scene);
    event_loop.run_app(&mut app)?;
    app.finish()?;

    tracing::info!("astro-desktop exiting");
    Ok(())
}

/// Shaders from `dir` if given and readable, otherwise the built-in copies.
fn load_shaders(dir: Option<&Path>) -> ShaderLibrary {
    let Some(dir) = dir else {
        return ShaderLibrary::embedded();
    };
    match ShaderLibrary::load(dir) {
        Ok(shaders) => shaders,
        Err(err) => {
            tracing::warn!("{err}; falling back to built-in shaders");
            ShaderLibrary::embedded()
        }
    }
}
