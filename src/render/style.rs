use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Visual configuration for trajectory diagrams.
///
/// Serializable so a style can be loaded from a JSON file; every field falls
/// back to its default when missing. Lengths suffixed `_px` are pixels, the
/// car and arrow dimensions are world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub viewport: Viewport,
    pub margin_px: f64,
    pub background_color: Color,

    pub expected_line_color: Color,
    pub actual_line_color: Color,
    pub track_line_width_px: f64,
    pub expected_marker_color: Color,
    pub actual_marker_color: Color,
    pub waypoint_marker_radius_px: f64,
    pub marker_border_width_px: f64,

    pub car_marker_color: Color,
    pub car_marker_radius_px: f64,
    pub car_arrow_color: Color,
    pub car_arrow_length: f64,
    pub car_arrow_width: f64,
    pub car_body_color: Color,
    pub car_body_line_width_px: f64,
    pub car_length: f64,
    pub car_width: f64,

    pub parking_lot_color: Color,
    pub parking_lot_line_width_px: f64,

    pub legend_font_size_px: f64,
    pub legend_text_color: Color,
    pub legend_box_color: Color,

    pub show_grid: bool,
    pub grid_color: Color,
    pub grid_label_font_size_px: f64,

    /// Draws a short heading tick at every waypoint. Off by default since it
    /// clutters dense tracks.
    pub show_waypoint_headings: bool,
    pub heading_tick_length: f64,
    pub heading_tick_width_px: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            // 14in x 14in at 80 dpi.
            viewport: Viewport::new(1120, 1120),
            margin_px: 64.0,
            background_color: Color::WHITE,

            expected_line_color: Color::GREEN,
            actual_line_color: Color::RED,
            track_line_width_px: 2.0,
            expected_marker_color: Color::RED,
            actual_marker_color: Color::BLACK,
            waypoint_marker_radius_px: 5.0,
            marker_border_width_px: 1.0,

            car_marker_color: Color::RED,
            car_marker_radius_px: 7.5,
            car_arrow_color: Color::GREEN,
            car_arrow_length: 1.5,
            car_arrow_width: 0.1,
            car_body_color: Color::BLUE,
            car_body_line_width_px: 1.0,
            car_length: 4.765,
            car_width: 1.845,

            parking_lot_color: Color::GREEN,
            parking_lot_line_width_px: 3.0,

            legend_font_size_px: 13.0,
            legend_text_color: Color::BLACK,
            legend_box_color: Color::rgba(1.0, 1.0, 1.0, 0.85),

            show_grid: true,
            grid_color: Color::rgb(0.85, 0.85, 0.85),
            grid_label_font_size_px: 11.0,

            show_waypoint_headings: false,
            heading_tick_length: 1.5,
            heading_tick_width_px: 0.5,
        }
    }
}

impl PlotStyle {
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_car_dimensions(mut self, length: f64, width: f64) -> Self {
        self.car_length = length;
        self.car_width = width;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    #[must_use]
    pub fn with_waypoint_headings(mut self, show: bool) -> Self {
        self.show_waypoint_headings = show;
        self
    }

    /// Parses a style from JSON; absent fields keep their defaults.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let style: Self = serde_json::from_str(input)
            .map_err(|err| PlotError::InvalidData(format!("failed to parse plot style: {err}")))?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for color in [
            self.background_color,
            self.expected_line_color,
            self.actual_line_color,
            self.expected_marker_color,
            self.actual_marker_color,
            self.car_marker_color,
            self.car_arrow_color,
            self.car_body_color,
            self.parking_lot_color,
            self.legend_text_color,
            self.legend_box_color,
            self.grid_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("track_line_width_px", self.track_line_width_px),
            ("waypoint_marker_radius_px", self.waypoint_marker_radius_px),
            ("marker_border_width_px", self.marker_border_width_px),
            ("car_marker_radius_px", self.car_marker_radius_px),
            ("car_arrow_length", self.car_arrow_length),
            ("car_arrow_width", self.car_arrow_width),
            ("car_body_line_width_px", self.car_body_line_width_px),
            ("car_length", self.car_length),
            ("car_width", self.car_width),
            ("parking_lot_line_width_px", self.parking_lot_line_width_px),
            ("legend_font_size_px", self.legend_font_size_px),
            ("grid_label_font_size_px", self.grid_label_font_size_px),
            ("heading_tick_length", self.heading_tick_length),
            ("heading_tick_width_px", self.heading_tick_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "style field `{name}` must be finite and > 0"
                )));
            }
        }

        if !self.margin_px.is_finite() || self.margin_px < 0.0 {
            return Err(PlotError::InvalidData(
                "style field `margin_px` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}
