//! Flocking ("boids") simulation core.
//!
//! A [`Flock`] owns a population of [`Agent`]s that steer by alignment,
//! cohesion and separation against every other agent they can perceive. An
//! external driver calls [`Flock::step`] once per frame and draws the
//! [`AgentSnapshot`]s it reads back; this crate does no drawing itself.
//!
//! Configuration values are not validated here. Out-of-range input (negative
//! radii, zero speeds) is the caller's responsibility.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod agent;
mod config;
mod flock;
mod math;
mod snapshot;
mod vector;

pub use agent::Agent;
pub use config::{FieldOfView, SimulationConfig};
pub use flock::Flock;
pub use snapshot::{AgentSnapshot, FovGeometry};
pub use vector::Vector2D;
