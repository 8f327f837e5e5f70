use alloc::sync::Arc;
use alloc::vec::Vec;

use log::{debug, trace};
use rand::Rng;

use crate::{Agent, AgentSnapshot, SimulationConfig, Vector2D};

/// A population of agents sharing one configuration and one toroidal canvas.
///
/// Changing the configuration or the population means building a new flock;
/// only the canvas size can change in place.
#[derive(Debug, Clone)]
pub struct Flock {
    agents: Vec<Agent>,
    config: Arc<SimulationConfig>,
    width: f32,
    height: f32,
    /// Per-frame steering forces, reused across steps
    forces: Vec<Vector2D>,
}

impl Flock {
    /// An empty flock; populate it with [`Flock::add_agent`].
    pub fn empty(config: SimulationConfig, width: f32, height: f32) -> Self {
        Self {
            agents: Vec::new(),
            config: Arc::new(config),
            width,
            height,
            forces: Vec::new(),
        }
    }

    /// A flock of `population` agents placed and launched at random
    #[cfg(feature = "std")]
    pub fn new(config: SimulationConfig, population: usize, width: f32, height: f32) -> Self {
        Self::with_rng(config, population, width, height, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        config: SimulationConfig,
        population: usize,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Self {
        let config = Arc::new(config);
        let agents = (0..population)
            .map(|id| Agent::random(id, &mut *rng, width, height, config.clone()))
            .collect();

        debug!(
            "Created flock of {} agents on a {}x{} canvas",
            population, width, height
        );

        Self {
            agents,
            config,
            width,
            height,
            forces: Vec::with_capacity(population),
        }
    }

    /// Adds an agent with the flock's configuration and returns its id
    pub fn add_agent(&mut self, position: Vector2D, velocity: Vector2D) -> usize {
        let id = self.agents.last().map_or(0, |agent| agent.id() + 1);
        self.agents
            .push(Agent::new(id, position, velocity, self.config.clone()));
        id
    }

    /// Advances every agent by one frame unless `paused`.
    ///
    /// Steering forces are all computed against the frame-start state before
    /// any agent integrates, so the result does not depend on agent order.
    pub fn step(&mut self, paused: bool) {
        if paused {
            return;
        }

        for agent in self.agents.iter_mut() {
            agent.wrap_edges(self.width, self.height);
        }

        let agents = &self.agents;
        self.forces.clear();
        self.forces
            .extend(agents.iter().map(|agent| agent.flocking_force(agents)));

        for (agent, force) in self.agents.iter_mut().zip(self.forces.iter()) {
            agent.apply_force(*force);
            agent.integrate();
        }

        trace!("Stepped {} agents", self.agents.len());
    }

    /// Render state for every agent, in agent order
    pub fn snapshots(&self) -> impl Iterator<Item = AgentSnapshot> + '_ {
        self.agents.iter().map(Agent::snapshot)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        debug!("Resizing flock canvas to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Mean speed across the flock, zero when empty
    pub fn average_speed(&self) -> f32 {
        if self.agents.is_empty() {
            return 0.0;
        }
        let total: f32 = self.agents.iter().map(|a| a.velocity.magnitude()).sum();
        total / self.agents.len() as f32
    }

    /// Mean position, ignoring wrap-around. `None` when empty.
    pub fn centroid(&self) -> Option<Vector2D> {
        if self.agents.is_empty() {
            return None;
        }
        let sum: Vector2D = self.agents.iter().map(|a| a.position).sum();
        Some(sum / self.agents.len() as f32)
    }
}
