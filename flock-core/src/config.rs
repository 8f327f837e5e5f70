use core::f32::consts::PI;

use crate::{math, Vector2D};

/// Perception cone around an agent's heading, stored as a half-angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOfView {
    half_angle: f32,
}

impl FieldOfView {
    pub const fn omnidirectional() -> Self {
        Self { half_angle: PI }
    }

    /// Builds a field of view from a full cone angle in degrees. Anything at or
    /// above 360 degrees sees all around.
    pub fn from_degrees(full_angle: f32) -> Self {
        if full_angle >= 360.0 {
            Self::omnidirectional()
        } else {
            Self {
                half_angle: (full_angle / 2.0).to_radians(),
            }
        }
    }

    /// `None` means the field of view was never set.
    pub fn from_optional_degrees(full_angle: Option<f32>) -> Self {
        full_angle.map_or_else(Self::omnidirectional, Self::from_degrees)
    }

    pub fn half_angle(&self) -> f32 {
        self.half_angle
    }

    pub fn full_degrees(&self) -> f32 {
        (self.half_angle * 2.0).to_degrees()
    }

    pub fn is_omnidirectional(&self) -> bool {
        self.half_angle >= PI
    }

    /// Whether `offset` (target position minus observer position) lies inside
    /// the cone centred on `heading`.
    ///
    /// A zero heading has no direction, so the observer sees all around.
    pub fn contains(&self, heading: &Vector2D, offset: &Vector2D) -> bool {
        if self.is_omnidirectional() || heading.is_zero() {
            return true;
        }
        math::abs(heading.angle_between(offset)) < self.half_angle
    }
}

impl Default for FieldOfView {
    fn default() -> Self {
        Self::omnidirectional()
    }
}

/// Parameters shared read-only by every agent of a flock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub max_velocity: f32,
    pub max_force: f32,
    pub alignment_multiplier: f32,
    pub cohesion_multiplier: f32,
    pub separation_multiplier: f32,
    pub perception_radius: f32,
    pub field_of_view: FieldOfView,
    pub draw_fov_lines: bool,
}

impl SimulationConfig {
    /// Separation only reacts to crowding inside half the perception radius
    pub fn separation_radius(&self) -> f32 {
        self.perception_radius / 2.0
    }

    /// Upper bound of the per-frame velocity change from flocking alone
    pub fn max_steering(&self) -> f32 {
        self.max_force
            * (self.alignment_multiplier + self.cohesion_multiplier + self.separation_multiplier)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_velocity: 2.0,
            max_force: 0.2,
            alignment_multiplier: 1.0,
            cohesion_multiplier: 1.0,
            separation_multiplier: 1.5,
            perception_radius: 50.0,
            field_of_view: FieldOfView::omnidirectional(),
            draw_fov_lines: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn test_fov_from_degrees_stores_half_angle() {
        let fov = FieldOfView::from_degrees(180.0);
        assert!((fov.half_angle() - FRAC_PI_2).abs() < 1e-6);
        assert!(!fov.is_omnidirectional());
        assert!((fov.full_degrees() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_fov_full_circle_and_unset_are_omnidirectional() {
        assert!(FieldOfView::from_degrees(360.0).is_omnidirectional());
        assert!(FieldOfView::from_degrees(720.0).is_omnidirectional());
        assert!(FieldOfView::from_optional_degrees(None).is_omnidirectional());
        assert!(!FieldOfView::from_optional_degrees(Some(300.0)).is_omnidirectional());
    }

    #[test]
    fn test_fov_contains() {
        let fov = FieldOfView::from_degrees(90.0);
        let heading = Vector2D::new(1.0, 0.0);

        assert!(fov.contains(&heading, &Vector2D::new(10.0, 1.0)));
        assert!(!fov.contains(&heading, &Vector2D::new(-10.0, 0.0)));
        assert!(!fov.contains(&heading, &Vector2D::new(0.0, 10.0)));
    }

    #[test]
    fn test_fov_zero_heading_sees_everything() {
        let fov = FieldOfView::from_degrees(10.0);
        assert!(fov.contains(&Vector2D::zero(), &Vector2D::new(-5.0, 0.0)));
    }

    #[test]
    fn test_omnidirectional_sees_directly_behind() {
        let fov = FieldOfView::omnidirectional();
        assert!(fov.contains(&Vector2D::new(1.0, 0.0), &Vector2D::new(-5.0, 0.0)));
    }

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.max_velocity, 2.0);
        assert_eq!(config.max_force, 0.2);
        assert_eq!(config.separation_radius(), 25.0);
        assert!((config.max_steering() - 0.7).abs() < 1e-6);
        assert!(config.field_of_view.is_omnidirectional());
    }
}
