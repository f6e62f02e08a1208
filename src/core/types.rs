use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Planar coordinate in world (map) units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Vehicle or waypoint state.
///
/// `theta` is the heading in radians. `direction` and `speed` are carried for
/// display only and never enter geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub direction: f64,
    pub speed: f64,
}

impl Pose {
    #[must_use]
    pub const fn new(x: f64, y: f64, theta: f64, direction: f64, speed: f64) -> Self {
        Self {
            x,
            y,
            theta,
            direction,
            speed,
        }
    }

    /// Pose without motion attributes, as used for the car location.
    #[must_use]
    pub const fn at(x: f64, y: f64, theta: f64) -> Self {
        Self::new(x, y, theta, 0.0, 0.0)
    }

    #[must_use]
    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Parking-space outline. Corner order is the drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParkingLot {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl ParkingLot {
    #[must_use]
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }
}

/// Ordered waypoints; index order is travel order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track(Vec<Pose>);

impl Track {
    #[must_use]
    pub fn new(poses: Vec<Pose>) -> Self {
        Self(poses)
    }

    #[must_use]
    pub fn poses(&self) -> &[Pose] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().map(|pose| pose.position())
    }
}

impl FromIterator<Pose> for Track {
    fn from_iter<I: IntoIterator<Item = Pose>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything needed to draw the diagrams of one failing test case.
///
/// `failure_reasons[i]` labels `expected_tracks[i]` compared against the single
/// actual track; the two sequences always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryRecord {
    failure_reasons: Vec<Vec<String>>,
    car_location: Pose,
    parking_lot: ParkingLot,
    expected_tracks: Vec<Track>,
    actual_track: Track,
}

impl TrajectoryRecord {
    pub fn new(
        failure_reasons: Vec<Vec<String>>,
        car_location: Pose,
        parking_lot: ParkingLot,
        expected_tracks: Vec<Track>,
        actual_track: Track,
    ) -> PlotResult<Self> {
        if failure_reasons.len() != expected_tracks.len() {
            return Err(PlotError::SchemaViolation(format!(
                "{} failure reason set(s) for {} expected track(s)",
                failure_reasons.len(),
                expected_tracks.len()
            )));
        }

        Ok(Self {
            failure_reasons,
            car_location,
            parking_lot,
            expected_tracks,
            actual_track,
        })
    }

    #[must_use]
    pub fn failure_reasons(&self) -> &[Vec<String>] {
        &self.failure_reasons
    }

    #[must_use]
    pub fn car_location(&self) -> Pose {
        self.car_location
    }

    #[must_use]
    pub fn parking_lot(&self) -> ParkingLot {
        self.parking_lot
    }

    #[must_use]
    pub fn expected_tracks(&self) -> &[Track] {
        &self.expected_tracks
    }

    #[must_use]
    pub fn actual_track(&self) -> &Track {
        &self.actual_track
    }

    /// Failure reasons of expected track `index` joined with `", "`.
    ///
    /// An empty reason set yields an empty string.
    #[must_use]
    pub fn joined_reasons(&self, index: usize) -> String {
        self.failure_reasons
            .get(index)
            .map(|reasons| reasons.join(", "))
            .unwrap_or_default()
    }
}

/// Identity of a test case, used to name its images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseIdentity {
    pub case_id: String,
    pub description: String,
}

impl CaseIdentity {
    #[must_use]
    pub fn new(case_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            description: description.into(),
        }
    }

    /// File name of the image for expected track `index`.
    ///
    /// `/` in the description becomes `\` so the name never nests directories.
    #[must_use]
    pub fn image_file_name(&self, index: usize) -> String {
        let description = self.description.replace('/', "\\");
        format!("{}_{}_{}.png", self.case_id, description, index)
    }
}

/// Why a test case produced no trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The case passed; diagrams are only drawn for failures.
    Passed,
    /// No channel carries the trajectory topic.
    NoTrajectoryChannel,
    /// The trajectory channel exists but the run produced no result messages.
    NoActualData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseResult {
    Skipped(SkipReason),
    Found(CaseIdentity, TrajectoryRecord),
}

impl CaseResult {
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}
