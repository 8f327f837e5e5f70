//! Settings and status records exchanged between the simulation and its
//! front-ends (web form, command line).

use core::ops::RangeInclusive;

use flock_core::{FieldOfView, Flock, SimulationConfig};
use serde::{Deserialize, Serialize};

mod error;

pub use error::SettingsError;

/// Accepted input ranges, mirroring the configuration form
pub mod limits {
    use super::RangeInclusive;

    pub const MAX_VELOCITY: RangeInclusive<f32> = 1.0..=10.0;
    pub const MAX_FORCE: RangeInclusive<f32> = 0.1..=2.0;
    pub const MULTIPLIER: RangeInclusive<f32> = 0.2..=10.0;
    pub const PERCEPTION_RADIUS: RangeInclusive<f32> = 30.0..=100.0;
    pub const PERCEPTION_FOV: RangeInclusive<f32> = 1.0..=360.0;
    pub const POPULATION: RangeInclusive<usize> = 50..=500;
}

/// Simulation configuration as submitted by the user.
///
/// Field names match the web form's JSON (`maxVelocity`, `boidAmount`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationSettings {
    pub max_velocity: f32,
    pub max_force: f32,
    pub alignment_multiplier: f32,
    pub cohesion_multiplier: f32,
    pub separation_multiplier: f32,
    pub perception_radius: f32,
    /// Full field-of-view angle in degrees; absent means all around
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perception_fov: Option<f32>,
    pub draw_fov_lines: bool,
    #[serde(rename = "boidAmount")]
    pub population: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        let config = SimulationConfig::default();
        Self {
            max_velocity: config.max_velocity,
            max_force: config.max_force,
            alignment_multiplier: config.alignment_multiplier,
            cohesion_multiplier: config.cohesion_multiplier,
            separation_multiplier: config.separation_multiplier,
            perception_radius: config.perception_radius,
            perception_fov: None,
            draw_fov_lines: config.draw_fov_lines,
            population: 100,
        }
    }
}

impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks every field against [`limits`]
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("maxVelocity", self.max_velocity, limits::MAX_VELOCITY)?;
        check("maxForce", self.max_force, limits::MAX_FORCE)?;
        check(
            "alignmentMultiplier",
            self.alignment_multiplier,
            limits::MULTIPLIER,
        )?;
        check(
            "cohesionMultiplier",
            self.cohesion_multiplier,
            limits::MULTIPLIER,
        )?;
        check(
            "separationMultiplier",
            self.separation_multiplier,
            limits::MULTIPLIER,
        )?;
        check(
            "perceptionRadius",
            self.perception_radius,
            limits::PERCEPTION_RADIUS,
        )?;
        if let Some(fov) = self.perception_fov {
            check("perceptionFov", fov, limits::PERCEPTION_FOV)?;
        }

        if !limits::POPULATION.contains(&self.population) {
            return Err(SettingsError::Population {
                value: self.population,
                min: *limits::POPULATION.start(),
                max: *limits::POPULATION.end(),
            });
        }

        Ok(())
    }

    pub fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            max_velocity: self.max_velocity,
            max_force: self.max_force,
            alignment_multiplier: self.alignment_multiplier,
            cohesion_multiplier: self.cohesion_multiplier,
            separation_multiplier: self.separation_multiplier,
            perception_radius: self.perception_radius,
            field_of_view: FieldOfView::from_optional_degrees(self.perception_fov),
            draw_fov_lines: self.draw_fov_lines,
        }
    }
}

impl From<&SimulationSettings> for SimulationConfig {
    fn from(settings: &SimulationSettings) -> Self {
        settings.to_config()
    }
}

fn check(field: &'static str, value: f32, range: RangeInclusive<f32>) -> Result<(), SettingsError> {
    if !value.is_finite() {
        return Err(SettingsError::NotFinite { field, value });
    }
    if !range.contains(&value) {
        return Err(SettingsError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

/// Snapshot of a running simulation, reported by front-ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlockStatus {
    pub boid_count: usize,
    pub frame: u64,
    pub paused: bool,
    pub average_speed: f32,
}

impl FlockStatus {
    pub fn from_flock(flock: &Flock, frame: u64, paused: bool) -> Self {
        Self {
            boid_count: flock.len(),
            frame,
            paused,
            average_speed: flock.average_speed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SimulationSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.population, 100);
        assert_eq!(settings.to_config(), SimulationConfig::default());
    }

    #[test]
    fn test_parse_form_json() {
        let json = r#"{
            "maxVelocity": 4,
            "maxForce": 0.5,
            "alignmentMultiplier": 1,
            "cohesionMultiplier": 2,
            "separationMultiplier": 1.5,
            "perceptionRadius": 80,
            "perceptionFov": 270,
            "drawFovLines": true,
            "boidAmount": 250
        }"#;

        let settings = SimulationSettings::from_json(json).unwrap();
        assert_eq!(settings.max_velocity, 4.0);
        assert_eq!(settings.cohesion_multiplier, 2.0);
        assert_eq!(settings.perception_fov, Some(270.0));
        assert_eq!(settings.population, 250);
        assert!(settings.validate().is_ok());

        let config = settings.to_config();
        assert!(!config.field_of_view.is_omnidirectional());
        assert!((config.field_of_view.full_degrees() - 270.0).abs() < 1e-3);
        assert!(config.draw_fov_lines);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings = SimulationSettings::from_json(r#"{"boidAmount": 60}"#).unwrap();
        assert_eq!(settings.population, 60);
        assert_eq!(settings.max_velocity, 2.0);
        assert_eq!(settings.perception_fov, None);
        assert!(settings.to_config().field_of_view.is_omnidirectional());
    }

    #[test]
    fn test_json_round_trip_uses_form_names() {
        let json = SimulationSettings::default().to_json().unwrap();
        assert!(json.contains("\"maxVelocity\""));
        assert!(json.contains("\"boidAmount\":100"));
        assert!(!json.contains("perceptionFov"));
    }

    #[test]
    fn test_rejects_out_of_range_field() {
        let settings = SimulationSettings {
            perception_radius: 150.0,
            ..SimulationSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::OutOfRange {
                field: "perceptionRadius",
                value: 150.0,
                min: 30.0,
                max: 100.0,
            })
        );
    }

    #[test]
    fn test_rejects_non_finite_field() {
        let settings = SimulationSettings {
            max_force: f32::NAN,
            ..SimulationSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotFinite { field: "maxForce", .. })
        ));
    }

    #[test]
    fn test_rejects_population_outside_form_range() {
        let settings = SimulationSettings {
            population: 10,
            ..SimulationSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.to_string(), "population must be between 50 and 500, got 10");
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = SimulationSettings::from_json("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_status_from_flock() {
        let mut flock = Flock::empty(SimulationConfig::default(), 100.0, 100.0);
        flock.add_agent(flock_core::Vector2D::new(1.0, 1.0), flock_core::Vector2D::new(0.0, 2.0));

        let status = FlockStatus::from_flock(&flock, 12, true);
        assert_eq!(status.boid_count, 1);
        assert_eq!(status.frame, 12);
        assert!(status.paused);
        assert_eq!(status.average_speed, 2.0);

        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"boidCount\":1"));
    }
}
