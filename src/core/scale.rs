use crate::core::geometry::WorldBounds;
use crate::core::types::{Point, Viewport};
use crate::error::{PlotError, PlotResult};

/// Uniform world-to-pixel mapping for one diagram.
///
/// Both axes share one scale so rotated shapes keep their proportions. World
/// `y` grows upwards, pixel `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotProjection {
    viewport: Viewport,
    bounds: WorldBounds,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl PlotProjection {
    pub fn new(bounds: WorldBounds, viewport: Viewport, margin_px: f64) -> PlotResult<Self> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !margin_px.is_finite() || margin_px < 0.0 {
            return Err(PlotError::InvalidData(
                "plot margin must be finite and >= 0".to_owned(),
            ));
        }

        let usable_w = f64::from(viewport.width) - 2.0 * margin_px;
        let usable_h = f64::from(viewport.height) - 2.0 * margin_px;
        if usable_w <= 0.0 || usable_h <= 0.0 {
            return Err(PlotError::InvalidData(format!(
                "plot margin {margin_px}px leaves no drawable area"
            )));
        }

        let world_w = bounds.width();
        let world_h = bounds.height();
        if !(world_w.is_finite() && world_h.is_finite()) || world_w <= 0.0 || world_h <= 0.0 {
            return Err(PlotError::InvalidData(
                "world bounds must be finite with non-zero extent".to_owned(),
            ));
        }

        let scale = (usable_w / world_w).min(usable_h / world_h);
        let offset_x = margin_px + (usable_w - world_w * scale) / 2.0;
        let offset_y = margin_px + (usable_h - world_h * scale) / 2.0;

        Ok(Self {
            viewport,
            bounds,
            scale,
            offset_x,
            offset_y,
        })
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn bounds(self) -> WorldBounds {
        self.bounds
    }

    /// Pixels per world unit.
    #[must_use]
    pub fn scale(self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn to_pixel(self, point: Point) -> (f64, f64) {
        (
            self.offset_x + (point.x - self.bounds.min_x) * self.scale,
            self.offset_y + (self.bounds.max_y - point.y) * self.scale,
        )
    }

    #[must_use]
    pub fn to_world(self, x_px: f64, y_px: f64) -> Point {
        Point::new(
            self.bounds.min_x + (x_px - self.offset_x) / self.scale,
            self.bounds.max_y - (y_px - self.offset_y) / self.scale,
        )
    }

    /// Pixel rectangle `(left, top, right, bottom)` covered by the world bounds.
    #[must_use]
    pub fn plot_area(self) -> (f64, f64, f64, f64) {
        let (left, top) = self.to_pixel(Point::new(self.bounds.min_x, self.bounds.max_y));
        let (right, bottom) = self.to_pixel(Point::new(self.bounds.max_x, self.bounds.min_y));
        (left, top, right, bottom)
    }
}
