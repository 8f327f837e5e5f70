//! Headless frame driver for the flocking simulation.
//!
//! [`FrameDriver`] plays the role the browser's animation loop plays for the
//! web front-end: it owns the current [`Flock`], feeds it the pause flag every
//! frame and swaps the whole flock out when new settings arrive.

use std::time::{Duration, Instant};

use flock_core::Flock;
use flock_shared::{FlockStatus, SettingsError, SimulationSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Reference cadence of the simulation
pub const DEFAULT_FRAME_RATE: u32 = 60;

pub struct FrameDriver {
    flock: Flock,
    settings: SimulationSettings,
    rng: StdRng,
    frame: u64,
    paused: bool,
}

impl FrameDriver {
    /// Validates `settings` and spawns the first flock
    pub fn new(
        settings: SimulationSettings,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let flock = Flock::with_rng(settings.to_config(), settings.population, width, height, &mut rng);
        log::info!(
            "Spawned {} boids on a {}x{} canvas (seed {})",
            settings.population,
            width,
            height,
            seed
        );

        Ok(Self {
            flock,
            settings,
            rng,
            frame: 0,
            paused: false,
        })
    }

    /// Advances one frame. While paused the flock is left untouched but the
    /// frame still counts as rendered.
    pub fn tick(&mut self) -> &Flock {
        self.flock.step(self.paused);
        self.frame += 1;
        &self.flock
    }

    /// Runs `frames` ticks, optionally sleeping to hold `frame_rate`, and
    /// calls `on_frame` after each one
    pub fn run<F>(&mut self, frames: u64, frame_rate: Option<u32>, mut on_frame: F)
    where
        F: FnMut(&mut Self),
    {
        let frame_time = frame_rate
            .filter(|rate| *rate > 0)
            .map(|rate| Duration::from_secs_f64(1.0 / rate as f64));

        for _ in 0..frames {
            let started = Instant::now();
            self.tick();
            on_frame(self);

            if let Some(frame_time) = frame_time {
                if let Some(remaining) = frame_time.checked_sub(started.elapsed()) {
                    std::thread::sleep(remaining);
                }
            }
        }
    }

    /// Replaces the flock with a fresh one built from `settings`. Invalid
    /// settings leave the running flock as it was.
    pub fn reconfigure(&mut self, settings: SimulationSettings) -> Result<(), SettingsError> {
        settings.validate()?;

        let (width, height) = (self.flock.width(), self.flock.height());
        self.flock = Flock::with_rng(
            settings.to_config(),
            settings.population,
            width,
            height,
            &mut self.rng,
        );
        log::info!("Reconfigured simulation with {} boids", settings.population);
        self.settings = settings;
        Ok(())
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.flock.resize(width, height);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn status(&self) -> FlockStatus {
        FlockStatus::from_flock(&self.flock, self.frame, self.paused)
    }
}
