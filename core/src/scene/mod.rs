//! Scene graph of named nodes
//!
//! Transforms, volumes and models are looked up by name. Transforms form a
//! tree whose world matrices feed the tracked projection mode and the
//! target checks.

mod breach;
mod repository;
mod tree;
mod watchdog;

pub use breach::{
    classify_target, BoxZone, BreachWarningConfig, SphereZone, TargetZone, TipInZone,
    ZoneAtTip, WARNING_COLOR,
};
pub use repository::{InMemoryScene, NodeKind, SceneNode, SceneRepository};
pub use tree::{
    build_transform_tree, needle_tip_position, SceneTracking, TransformCache, NEEDLE_TIP_TO_NEEDLE,
    NEEDLE_TO_TRACKER, PHANTOM_VOLUME, REFERENCE_TO_RAS, STYLUS_TIP_TO_STYLUS, STYLUS_TO_TRACKER,
    TRACKER_TO_REFERENCE, XRAY_TUBE_TO_REFERENCE,
};
pub use watchdog::{
    Watchdog, WatchedNode, TRACKER_TO_NEEDLE, TRACKER_TO_STYLUS, UPDATE_TOLERANCE,
};
