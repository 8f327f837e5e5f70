use core::f32::consts::{FRAC_PI_2, PI};

use crate::{SimulationConfig, Vector2D};

/// Triangle outline in agent-local coordinates, tip pointing up (-y)
const GLYPH: [Vector2D; 3] = [
    Vector2D::new(0.0, -6.0),
    Vector2D::new(-4.0, 6.0),
    Vector2D::new(4.0, 6.0),
];

/// Everything a renderer needs to draw one agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshot {
    pub position: Vector2D,
    /// Direction of travel in radians from the positive x-axis
    pub heading: f32,
    /// Debug perception cone, present when `draw_fov_lines` is enabled
    pub fov: Option<FovGeometry>,
}

impl AgentSnapshot {
    pub fn new(position: Vector2D, heading: f32, config: &SimulationConfig) -> Self {
        let fov = config
            .draw_fov_lines
            .then(|| FovGeometry::new(position, heading, config));
        Self {
            position,
            heading,
            fov,
        }
    }

    /// Triangle vertices in canvas coordinates, tip along the heading
    pub fn glyph(&self) -> [Vector2D; 3] {
        let rotation = self.heading + FRAC_PI_2;
        GLYPH.map(|vertex| self.position + vertex.rotate(rotation))
    }
}

/// Perception cone outline: an arc of `radius` around `origin` spanning
/// `[arc_start, arc_end]`, plus the two boundary rays unless the cone is a
/// full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovGeometry {
    pub origin: Vector2D,
    pub radius: f32,
    pub arc_start: f32,
    pub arc_end: f32,
    /// End points of the left and right boundary rays
    pub rays: Option<[Vector2D; 2]>,
}

impl FovGeometry {
    pub fn new(origin: Vector2D, heading: f32, config: &SimulationConfig) -> Self {
        let radius = config.perception_radius;
        let fov = config.field_of_view;

        if fov.is_omnidirectional() {
            return Self {
                origin,
                radius,
                arc_start: heading - PI,
                arc_end: heading + PI,
                rays: None,
            };
        }

        let half = fov.half_angle();
        let start = heading - half;
        let end = heading + half;
        Self {
            origin,
            radius,
            arc_start: start,
            arc_end: end,
            rays: Some([
                origin + Vector2D::from_angle(start) * radius,
                origin + Vector2D::from_angle(end) * radius,
            ]),
        }
    }

    pub fn is_full_circle(&self) -> bool {
        self.rays.is_none()
    }
}
