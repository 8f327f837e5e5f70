use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flock_cli::{FrameDriver, DEFAULT_FRAME_RATE};
use flock_shared::SimulationSettings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boids flocking simulation", long_about = None)]
struct Args {
    /// JSON settings file using the web form's field names (maxVelocity, boidAmount, ...)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Number of boids
    #[arg(short = 'n', long)]
    population: Option<usize>,

    #[arg(long)]
    max_velocity: Option<f32>,

    #[arg(long)]
    max_force: Option<f32>,

    #[arg(long)]
    perception_radius: Option<f32>,

    /// Field of view in degrees (360 sees all around)
    #[arg(long)]
    fov: Option<f32>,

    /// Canvas width
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Canvas height
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Hold this frame rate instead of running flat out (0 = unpaced)
    #[arg(long, default_value_t = 0)]
    fps: u32,

    /// Seed for spawning boids
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Toggle pause every N frames
    #[arg(long)]
    pause_every: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn load_settings(&self) -> Result<SimulationSettings> {
        let mut settings = match &self.settings {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings file {}", path.display()))?;
                SimulationSettings::from_json(&json)
                    .with_context(|| format!("Failed to parse settings file {}", path.display()))?
            }
            None => SimulationSettings::default(),
        };

        if let Some(population) = self.population {
            settings.population = population;
        }
        if let Some(max_velocity) = self.max_velocity {
            settings.max_velocity = max_velocity;
        }
        if let Some(max_force) = self.max_force {
            settings.max_force = max_force;
        }
        if let Some(radius) = self.perception_radius {
            settings.perception_radius = radius;
        }
        if let Some(fov) = self.fov {
            settings.perception_fov = Some(fov);
        }

        Ok(settings)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = args.load_settings()?;
    log::debug!("Settings: {:?}", settings);

    let mut driver = FrameDriver::new(settings, args.width, args.height, args.seed)
        .context("Invalid simulation settings")?;

    let report_every = u64::from(DEFAULT_FRAME_RATE);
    let pace = (args.fps > 0).then_some(args.fps);
    let pause_every = args.pause_every.filter(|n| *n > 0);

    driver.run(args.frames, pace, |driver| {
        let frame = driver.frame();

        if frame % report_every == 0 {
            let flock = driver.flock();
            log::debug!(
                "frame {}: average speed {:.3}, centroid {:?}",
                frame,
                flock.average_speed(),
                flock.centroid()
            );
        }

        if let Some(n) = pause_every {
            if frame % n == 0 {
                driver.toggle_pause();
            }
        }
    });

    let status = serde_json::to_string_pretty(&driver.status())
        .context("Failed to serialize final status")?;
    println!("{}", status);

    Ok(())
}
