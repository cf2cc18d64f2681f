//! Core type definitions for DRR planning
//!
//! This module provides the fundamental types used throughout the snsim library:
//! - [`ProjectionMode`]: Preset or tracked projection selection
//! - [`ProjectionRequest`]: One "generate projection" action
//! - [`RigidTransform`]: Translation plus Euler rotation handed to the ray caster
//! - [`ProjectionParameters`]: Complete parameter set for one DRR
//! - [`SimulationConfig`]: Session settings and DRR controls
//! - [`VolumeGeometry`]: Physical layout of the CT volume
//! - [`TargetForamen`] and [`TargetArea`]: Needle target and check outcome

mod config;
mod enums;
mod params;
mod request;
mod transform;
mod volume;

pub use config::{SimulationConfig, DEFAULT_SECONDS_PER_PROJECTION};
pub use enums::{ProjectionMode, TargetArea, TargetForamen};
pub use params::{ProjectionParameters, INTENSITY_CLAMP_MAX, INTENSITY_CLAMP_MIN, TRANSFER_BETA};
pub use request::{
    ProjectionRequest, DEFAULT_FOCAL_DISTANCE, DEFAULT_OUTPUT_SIZE, DEFAULT_THRESHOLD,
};
pub use transform::RigidTransform;
pub use volume::{parse_triplet, VolumeGeometry};
pub(crate) use volume::parse_numbers;
