//! DRR pipeline inputs
//!
//! Parameter preparation for the external ray-cast and resample filters.
//! No projection is computed here.

mod geometry;
mod transfer;

pub use geometry::DrrGeometry;
pub use transfer::{burn_label, XRayTransfer, NEEDLE_CT_VALUE};
