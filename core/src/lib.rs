pub mod api;
pub mod cli;
pub mod drr;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod session;
pub mod types;

pub use api::{ProjectionPlan, ProjectionPlanner};
pub use cli::report::TextReport;
pub use drr::DrrGeometry;
pub use error::{Result, SnsimError};
pub use geometry::{build_parameters, Calibration, SharedTracking, TrackingSource};
pub use scene::{InMemoryScene, SceneRepository};
pub use types::*;
