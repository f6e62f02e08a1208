use smallvec::SmallVec;

use crate::core::types::{Point, Pose};

/// Planar affine transform in world space.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    #[must_use]
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::identity()
        }
    }

    /// Counter-clockwise rotation by `degrees` about `pivot`.
    #[must_use]
    pub fn rotation_deg(degrees: f64, pivot: Point) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rotate = Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        };
        Self::translation(-pivot.x, -pivot.y)
            .then(rotate)
            .then(Self::translation(pivot.x, pivot.y))
    }

    /// Composes `self` followed by `next`.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    #[must_use]
    pub fn apply(self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }
}

/// Outline of the car body: a `length` x `width` rectangle centered on the
/// pose and rotated by its heading.
///
/// Corners are returned rear-right, front-right, front-left, rear-left.
#[must_use]
pub fn car_footprint(pose: Pose, length: f64, width: f64) -> [Point; 4] {
    let half_l = length / 2.0;
    let half_w = width / 2.0;
    let transform = Transform2D::rotation_deg(pose.theta.to_degrees(), pose.position());
    [
        Point::new(pose.x - half_l, pose.y - half_w),
        Point::new(pose.x + half_l, pose.y - half_w),
        Point::new(pose.x + half_l, pose.y + half_w),
        Point::new(pose.x - half_l, pose.y + half_w),
    ]
    .map(|corner| transform.apply(corner))
}

/// Closed polygon of an arrow starting at the pose and pointing along its
/// heading.
///
/// The head takes a third of `length` and is three times as wide as the shaft.
#[must_use]
pub fn heading_arrow(pose: Pose, length: f64, shaft_width: f64) -> SmallVec<[Point; 8]> {
    let head_length = length / 3.0;
    let shaft_end = pose.x + length - head_length;
    let half_shaft = shaft_width / 2.0;
    let half_head = shaft_width * 1.5;
    let transform = Transform2D::rotation_deg(pose.theta.to_degrees(), pose.position());

    [
        Point::new(pose.x, pose.y - half_shaft),
        Point::new(shaft_end, pose.y - half_shaft),
        Point::new(shaft_end, pose.y - half_head),
        Point::new(pose.x + length, pose.y),
        Point::new(shaft_end, pose.y + half_head),
        Point::new(shaft_end, pose.y + half_shaft),
        Point::new(pose.x, pose.y + half_shaft),
    ]
    .into_iter()
    .map(|point| transform.apply(point))
    .collect()
}

/// End point of a heading tick of `length` drawn from the pose.
#[must_use]
pub fn heading_tip(pose: Pose, length: f64) -> Point {
    let (sin, cos) = pose.theta.sin_cos();
    Point::new(pose.x + length * cos, pose.y + length * sin)
}

/// Axis-aligned extent of a set of world points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl WorldBounds {
    /// Returns `None` when no finite point is provided.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for point in points.into_iter().filter(|point| point.is_finite()) {
            bounds = Some(match bounds {
                None => Self {
                    min_x: point.x,
                    min_y: point.y,
                    max_x: point.x,
                    max_y: point.y,
                },
                Some(current) => current.including(point),
            });
        }
        bounds
    }

    #[must_use]
    pub fn including(self, point: Point) -> Self {
        Self {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grows each axis symmetrically to at least `min_extent`.
    #[must_use]
    pub fn with_min_extent(self, min_extent: f64) -> Self {
        let center = self.center();
        let half_w = self.width().max(min_extent) / 2.0;
        let half_h = self.height().max(min_extent) / 2.0;
        Self {
            min_x: center.x - half_w,
            min_y: center.y - half_h,
            max_x: center.x + half_w,
            max_y: center.y + half_h,
        }
    }

    /// Adds `ratio` of the larger extent as padding on every side.
    #[must_use]
    pub fn padded(self, ratio: f64) -> Self {
        let pad = self.width().max(self.height()) * ratio;
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }
}
