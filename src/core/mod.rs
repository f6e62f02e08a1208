pub mod geometry;
pub mod scale;
pub mod types;

pub use geometry::{Transform2D, WorldBounds, car_footprint, heading_arrow, heading_tip};
pub use scale::PlotProjection;
pub use types::{
    CaseIdentity, CaseResult, ParkingLot, Point, Pose, SkipReason, Track, TrajectoryRecord,
    Viewport,
};
