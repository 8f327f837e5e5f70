use alloc::sync::Arc;

use rand::Rng;

use crate::{AgentSnapshot, FieldOfView, SimulationConfig, Vector2D};

/// Squared distance under which two agents count as overlapping. Separation
/// skips overlapping neighbors since their repulsion has no direction.
const OVERLAP_EPSILON: f32 = f32::EPSILON;

/// A single flocking agent
#[derive(Debug, Clone)]
pub struct Agent {
    id: usize,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    config: Arc<SimulationConfig>,
}

impl Agent {
    pub fn new(
        id: usize,
        position: Vector2D,
        velocity: Vector2D,
        config: Arc<SimulationConfig>,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: Vector2D::zero(),
            config,
        }
    }

    /// Spawns an agent somewhere inside the canvas with a velocity drawn
    /// uniformly from `[-max_velocity, max_velocity]` on each axis.
    pub fn random<R: Rng + ?Sized>(
        id: usize,
        rng: &mut R,
        width: f32,
        height: f32,
        config: Arc<SimulationConfig>,
    ) -> Self {
        let max_velocity = config.max_velocity;
        let position = Vector2D::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height);
        let velocity = Vector2D::new(
            (rng.gen::<f32>() * 2.0 - 1.0) * max_velocity,
            (rng.gen::<f32>() * 2.0 - 1.0) * max_velocity,
        );
        Self::new(id, position, velocity, config)
    }

    /// Identifier, unique within the owning flock
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Direction of travel in radians
    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }

    /// Moves the agent to the opposite edge once it leaves the canvas
    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        if self.position.x > width {
            self.position.x = 0.0;
        } else if self.position.x < 0.0 {
            self.position.x = width;
        }

        if self.position.y > height {
            self.position.y = 0.0;
        } else if self.position.y < 0.0 {
            self.position.y = height;
        }
    }

    /// Every other agent closer than `radius` and inside `fov`.
    ///
    /// Agents are told apart by id, so a copy of `self` taken from a frame
    /// snapshot is skipped while a different agent at the same position is not.
    pub fn perceive<'a>(
        &'a self,
        agents: &'a [Agent],
        radius: f32,
        fov: FieldOfView,
    ) -> impl Iterator<Item = &'a Agent> + 'a {
        agents.iter().filter(move |other| {
            if other.id == self.id {
                return false;
            }
            let offset = other.position - self.position;
            offset.magnitude() < radius && fov.contains(&self.velocity, &offset)
        })
    }

    /// Steers towards the average velocity of local flockmates
    pub fn align(&self, agents: &[Agent]) -> Vector2D {
        let (sum, count) = self
            .perceive(agents, self.config.perception_radius, self.config.field_of_view)
            .fold((Vector2D::zero(), 0usize), |(sum, count), other| {
                (sum + other.velocity, count + 1)
            });

        if count == 0 {
            return Vector2D::zero();
        }
        self.steer(sum / count as f32)
    }

    /// Steers towards the average position of local flockmates
    pub fn cohesion(&self, agents: &[Agent]) -> Vector2D {
        let (sum, count) = self
            .perceive(agents, self.config.perception_radius, self.config.field_of_view)
            .fold((Vector2D::zero(), 0usize), |(sum, count), other| {
                (sum + other.position, count + 1)
            });

        if count == 0 {
            return Vector2D::zero();
        }
        self.steer(sum / count as f32 - self.position)
    }

    /// Steers away from flockmates inside half the perception radius, with a
    /// repulsion that grows with the inverse square of the distance
    pub fn separation(&self, agents: &[Agent]) -> Vector2D {
        let mut sum = Vector2D::zero();
        let mut count = 0usize;

        for other in self.perceive(agents, self.config.separation_radius(), self.config.field_of_view)
        {
            let away = self.position - other.position;
            let distance_sq = away.magnitude_squared();
            if distance_sq > OVERLAP_EPSILON {
                sum += away / distance_sq;
                count += 1;
            }
        }

        if count == 0 {
            return Vector2D::zero();
        }
        self.steer(sum / count as f32)
    }

    /// Reynolds steering: desired direction at full speed, minus current
    /// velocity, capped at `max_force`
    fn steer(&self, desired: Vector2D) -> Vector2D {
        (desired.set_magnitude(self.config.max_velocity) - self.velocity).limit(self.config.max_force)
    }

    /// Weighted sum of alignment, cohesion and separation against `agents`
    pub fn flocking_force(&self, agents: &[Agent]) -> Vector2D {
        self.align(agents) * self.config.alignment_multiplier
            + self.cohesion(agents) * self.config.cohesion_multiplier
            + self.separation(agents) * self.config.separation_multiplier
    }

    /// Accumulates the flocking force into `acceleration`
    pub fn flock(&mut self, agents: &[Agent]) {
        let force = self.flocking_force(agents);
        self.apply_force(force);
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Advances one frame. Position moves with last frame's velocity before
    /// this frame's acceleration is applied.
    pub fn integrate(&mut self) {
        self.position += self.velocity;
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(self.config.max_velocity);
        self.acceleration = Vector2D::zero();
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot::new(self.position, self.heading(), &self.config)
    }
}
