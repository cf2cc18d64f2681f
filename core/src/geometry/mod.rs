//! Projection geometry
//!
//! Turns a [`ProjectionRequest`](crate::ProjectionRequest) into the
//! [`ProjectionParameters`](crate::ProjectionParameters) consumed by the
//! external ray-cast pipeline.

mod builder;
pub mod euler;
pub mod matrix_io;
mod tracking;

pub use builder::{
    build_parameters, compose_tracked, focal_offset_matrix, preset_transform,
    volume_center_matrix,
};
pub use matrix_io::{format_matrix4, parse_matrix4, read_matrix4, write_matrix4};
pub use tracking::{Calibration, SharedTracking, TrackingSource};
