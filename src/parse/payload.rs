use serde::Deserialize;
use serde_json::Value;

use crate::core::{ParkingLot, Point, Pose, Track};
use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawPoint {
    x: f64,
    y: f64,
}

impl From<RawPoint> for Point {
    fn from(raw: RawPoint) -> Self {
        Point::new(raw.x, raw.y)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawPose {
    x: f64,
    y: f64,
    theta: f64,
}

impl RawPose {
    pub(crate) fn into_pose(self, direction: f64, speed: f64) -> Pose {
        Pose::new(self.x, self.y, self.theta, direction, speed)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawParkingSpace {
    p0: RawPoint,
    p1: RawPoint,
    p2: RawPoint,
    p3: RawPoint,
}

impl From<RawParkingSpace> for ParkingLot {
    fn from(raw: RawParkingSpace) -> Self {
        ParkingLot::new(raw.p0.into(), raw.p1.into(), raw.p2.into(), raw.p3.into())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawWaypoint {
    direction: f64,
    speed: f64,
    pose: RawPose,
}

/// One decoded `{"waypoints": [...]}` message.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackPayload {
    waypoints: Vec<RawWaypoint>,
}

impl TrackPayload {
    pub fn from_value(value: &Value) -> PlotResult<Self> {
        Self::deserialize(value)
            .map_err(|err| PlotError::SchemaViolation(format!("track message: {err}")))
    }

    #[must_use]
    pub fn into_track(self) -> Track {
        self.waypoints
            .into_iter()
            .map(|waypoint| waypoint.pose.into_pose(waypoint.direction, waypoint.speed))
            .collect()
    }
}

/// The expect block holds either one track message or an array of them.
///
/// The shape is resolved once while decoding so consumers only ever see a
/// list of tracks.
#[derive(Debug, Clone)]
pub enum ExpectedPayload {
    SingleTrack(TrackPayload),
    MultipleTracks(Vec<TrackPayload>),
}

impl ExpectedPayload {
    pub fn from_value(value: &Value) -> PlotResult<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(TrackPayload::from_value)
                .collect::<PlotResult<Vec<_>>>()
                .map(Self::MultipleTracks),
            other => TrackPayload::from_value(other).map(Self::SingleTrack),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::SingleTrack(_) => 1,
            Self::MultipleTracks(tracks) => tracks.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn into_tracks(self) -> Vec<Track> {
        match self {
            Self::SingleTrack(payload) => vec![payload.into_track()],
            Self::MultipleTracks(payloads) => {
                payloads.into_iter().map(TrackPayload::into_track).collect()
            }
        }
    }
}
