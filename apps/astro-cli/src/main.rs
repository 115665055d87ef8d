use anyhow::Context;
use astro_input::{Direction, InputFlags};
use astro_kernel::{FrameClock, GameState, PoseState};
use astro_mesh::{Vertex, light_cube_mesh, ship_mesh};
use astro_render::{DebugTextRenderer, Projection, Renderer};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "astro-cli", about = "Headless tools for the Astro Astro demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and mesh statistics
    Info,
    /// Run the pose loop without a window
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Directions held, comma separated (left,right,up,down)
        #[arg(short, long, value_delimiter = ',')]
        input: Vec<Direction>,
        /// Release the input after this many frames
        #[arg(long)]
        hold: Option<u64>,
        /// Milliseconds per frame
        #[arg(long, default_value_t = FrameClock::budget_for(astro_kernel::DEFAULT_FPS).as_millis() as u64)]
        tick_ms: u64,
        /// Emit one JSON line per frame instead of the final frame summary
        #[arg(long)]
        json: bool,
    },
    /// Print the flat face normal of every ship triangle
    Normals,
}

/// Input and resulting pose of one simulated frame.
#[derive(Debug, Clone, Copy, Serialize)]
struct FrameRecord {
    frame: u64,
    ticks: u64,
    input: InputFlags,
    pose: PoseState,
}

/// Run the pose loop for `frames` frames, holding `input` for the first
/// `hold` frames (all of them when `None`).
fn simulate(
    input: &[Direction],
    frames: u64,
    hold: Option<u64>,
    tick_ms: u64,
) -> Vec<FrameRecord> {
    let hold = hold.unwrap_or(frames);
    let mut state = GameState::new();
    state.input = InputFlags::holding(input);

    let mut records = Vec::new();
    for frame in 0..frames {
        if frame == hold {
            state.input = InputFlags::new();
            tracing::debug!(frame, "input released");
        }
        let ticks = frame.saturating_mul(tick_ms);
        state.step(ticks);
        records.push(FrameRecord {
            frame,
            ticks,
            input: state.input,
            pose: state.pose,
        });
    }
    records
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            let ship = ship_mesh()?;
            let light = light_cube_mesh();
            println!("astro-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("mesh: {}", astro_mesh::crate_info());
            println!("input: {}", astro_input::crate_info());
            println!("kernel: {}", astro_kernel::crate_info());
            println!("render: {}", astro_render::crate_info());
            println!(
                "{}: {} vertices, {} triangles, indexed={}",
                ship.name(),
                ship.vertex_count(),
                ship.triangle_count(),
                ship.is_indexed()
            );
            println!(
                "{}: {} vertices, {} indices, indexed={}",
                light.name(),
                light.vertex_count(),
                light.index_count(),
                light.is_indexed()
            );
        }
        Commands::Simulate {
            frames,
            input,
            hold,
            tick_ms,
            json,
        } => {
            let records = simulate(&input, frames, hold, tick_ms);

            if json {
                for record in &records {
                    println!(
                        "{}",
                        serde_json::to_string(record).context("failed to encode frame")?
                    );
                }
            } else {
                let pose = records.last().map_or_else(PoseState::default, |r| r.pose);
                let ship = ship_mesh()?;
                let light = light_cube_mesh();
                let renderer = DebugTextRenderer::new(ship.vertex_count(), light.index_count());
                println!("Simulated {frames} frames holding {}", describe(&input));
                print!("{}", renderer.render(&pose, &Projection::default()));
            }
        }
        Commands::Normals => {
            let ship = ship_mesh()?;
            for (i, tri) in ship.vertices().chunks_exact(3).enumerate() {
                print_triangle(i, tri);
            }
        }
    }

    Ok(())
}

fn describe(input: &[Direction]) -> String {
    if input.is_empty() {
        return "nothing".into();
    }
    input
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("+")
}

fn print_triangle(index: usize, tri: &[Vertex]) {
    let n = tri[0].normal();
    let p = tri.iter().map(|v| v.position).collect::<Vec<_>>();
    println!(
        "#{index:<2} normal=({:7.3}, {:7.3}, {:7.3}) |n|={:6.3}  corners={:?}",
        n.x,
        n.y,
        n.z,
        n.length(),
        p
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn held_input_moves_for_hold_frames_then_relaxes() {
        let records = simulate(&[Direction::Left], 40, Some(5), 16);
        assert_eq!(records.len(), 40);

        for r in &records[..5] {
            assert!(r.input.left);
        }
        for r in &records[5..] {
            assert!(!r.input.left);
        }

        assert!((records[4].pose.offset_x + 0.5).abs() < EPS);
        for r in &records[5..] {
            assert_eq!(r.pose.offset_x, records[4].pose.offset_x);
        }

        assert!(records[4].pose.tilt_x > 0.0);
        assert_eq!(records.last().unwrap().pose.tilt_x, 0.0);
    }

    #[test]
    fn ticks_advance_by_tick_ms() {
        let records = simulate(&[], 3, None, 16);
        let ticks: Vec<u64> = records.iter().map(|r| r.ticks).collect();
        assert_eq!(ticks, vec![0, 16, 32]);
    }

    #[test]
    fn huge_tick_ms_saturates() {
        let records = simulate(&[], 3, None, u64::MAX);
        assert_eq!(records[2].ticks, u64::MAX);
    }

    #[test]
    fn zero_frames_yields_no_records() {
        assert!(simulate(&[Direction::Up], 0, None, 16).is_empty());
    }

    #[test]
    fn json_record_carries_pose_and_input() {
        let records = simulate(&[Direction::Left], 1, None, 16);
        let value = serde_json::to_value(records[0]).unwrap();
        assert_eq!(value["frame"], 0);
        assert_eq!(value["input"]["left"], true);
        assert_eq!(value["input"]["right"], false);
        let offset = value["pose"]["offset_x"].as_f64().unwrap();
        assert!((offset + 0.1).abs() < 1e-6);
    }
}
