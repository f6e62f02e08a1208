use std::path::{Path, PathBuf};

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::{
    CaseIdentity, PlotProjection, Point, Pose, Track, TrajectoryRecord, WorldBounds,
    car_footprint, heading_arrow, heading_tip,
};
use crate::error::{PlotError, PlotResult};
use crate::render::ticks::{
    GRID_TARGET_SPACING_PX, grid_tick_target_count, nice_step, precision_for_step, ticks_in_range,
};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PlotLayerKind, PlotStyle,
    PolygonPrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

const MIN_WORLD_EXTENT: f64 = 1.0;
const WORLD_PADDING_RATIO: f64 = 0.05;
const LEGEND_INSET_PX: f64 = 10.0;
const LEGEND_PADDING_PX: f64 = 8.0;
const LEGEND_SWATCH_PX: f64 = 28.0;
const LEGEND_ROW_SCALE: f64 = 1.6;

/// Marker drawn in front of a legend label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendSwatch {
    Line { color: Color, width: f64 },
    Marker { color: Color },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub swatch: LegendSwatch,
    pub label: String,
}

/// Legend label for one track: `"<prefix>: <reasons>"`. With no reasons the
/// label ends right after the colon.
#[must_use]
pub fn track_label(prefix: &str, joined_reasons: &str) -> String {
    format!("{prefix}: {joined_reasons}").trim_end().to_owned()
}

#[must_use]
pub fn car_label(car: Pose) -> String {
    format!("car loc: x: {}, y: {}, theta: {}", car.x, car.y, car.theta)
}

/// Draws the diagrams of one test case, one image per expected track.
#[derive(Debug)]
pub struct TrajectoryRenderer<R: Renderer> {
    renderer: R,
    style: PlotStyle,
}

impl<R: Renderer> TrajectoryRenderer<R> {
    pub fn new(renderer: R, style: PlotStyle) -> PlotResult<Self> {
        style.validate()?;
        Ok(Self { renderer, style })
    }

    #[must_use]
    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Writes `<case_id>_<description>_<i>.png` into `out_dir` for every
    /// expected track `i` and returns the paths in track order.
    ///
    /// `out_dir` must exist. Existing files are overwritten. The first failing
    /// write aborts the case.
    pub fn render_case(
        &mut self,
        identity: &CaseIdentity,
        record: &TrajectoryRecord,
        out_dir: &Path,
    ) -> PlotResult<Vec<PathBuf>> {
        let count = record.expected_tracks().len();
        let mut paths = Vec::with_capacity(count);
        for index in 0..count {
            let frame = self.build_frame(record, index)?;
            let path = out_dir.join(identity.image_file_name(index));
            self.renderer.render_png(&frame, &path)?;
            debug!(case_id = %identity.case_id, index, path = %path.display(), "rendered track");
            paths.push(path);
        }
        info!(
            case_id = %identity.case_id,
            images = paths.len(),
            "rendered trajectory diagrams"
        );
        Ok(paths)
    }

    /// Lays out the diagram for expected track `index` against the actual track.
    pub fn build_frame(&self, record: &TrajectoryRecord, index: usize) -> PlotResult<RenderFrame> {
        let expected = record.expected_tracks().get(index).ok_or_else(|| {
            PlotError::InvalidData(format!(
                "expected track index {index} out of range (len {})",
                record.expected_tracks().len()
            ))
        })?;
        let actual = record.actual_track();
        let style = &self.style;
        let car = record.car_location();

        let footprint = car_footprint(car, style.car_length, style.car_width);
        let arrow = heading_arrow(car, style.car_arrow_length, style.car_arrow_width);

        let projection = self.projection_for(record, expected, &footprint, &arrow)?;
        let mut frame = RenderFrame::new(style.viewport).with_background(style.background_color);

        if style.show_grid {
            push_grid(&mut frame, projection, style);
        }

        let lot = record.parking_lot().corners().map(|corner| projection.to_pixel(corner));
        frame.push_polyline(
            PlotLayerKind::ParkingLot,
            PolylinePrimitive::new(
                lot.to_vec(),
                style.parking_lot_line_width_px,
                style.parking_lot_color,
            ),
        );

        push_track_line(
            &mut frame,
            projection,
            expected,
            style.expected_line_color,
            style.track_line_width_px,
        );
        push_track_line(
            &mut frame,
            projection,
            actual,
            style.actual_line_color,
            style.track_line_width_px,
        );

        push_waypoint_markers(&mut frame, projection, expected, style.expected_marker_color, style);
        push_waypoint_markers(&mut frame, projection, actual, style.actual_marker_color, style);
        if style.show_waypoint_headings {
            push_heading_ticks(&mut frame, projection, expected, style.expected_line_color, style);
            push_heading_ticks(&mut frame, projection, actual, style.actual_line_color, style);
        }

        let (car_x, car_y) = projection.to_pixel(car.position());
        frame.push_circle(
            PlotLayerKind::Car,
            CirclePrimitive::filled(car_x, car_y, style.car_marker_radius_px, style.car_marker_color),
        );
        frame.push_polygon(
            PlotLayerKind::Car,
            PolygonPrimitive::filled(to_pixels(projection, arrow), style.car_arrow_color),
        );
        frame.push_polygon(
            PlotLayerKind::Car,
            PolygonPrimitive::outline(
                to_pixels(projection, footprint),
                style.car_body_line_width_px,
                style.car_body_color,
            ),
        );

        let reasons = record.joined_reasons(index);
        let entries = [
            LegendEntry {
                swatch: LegendSwatch::Line {
                    color: style.expected_line_color,
                    width: style.track_line_width_px,
                },
                label: track_label("expect tracks", &reasons),
            },
            LegendEntry {
                swatch: LegendSwatch::Line {
                    color: style.actual_line_color,
                    width: style.track_line_width_px,
                },
                label: track_label("actual tracks", &reasons),
            },
            LegendEntry {
                swatch: LegendSwatch::Marker {
                    color: style.car_marker_color,
                },
                label: car_label(car),
            },
        ];
        push_legend(&mut frame, projection, &entries, style);

        Ok(frame)
    }

    fn projection_for(
        &self,
        record: &TrajectoryRecord,
        expected: &Track,
        footprint: &[Point; 4],
        arrow: &[Point],
    ) -> PlotResult<PlotProjection> {
        let style = &self.style;
        let heading_tips = style
            .show_waypoint_headings
            .then(|| {
                expected
                    .poses()
                    .iter()
                    .chain(record.actual_track().poses())
                    .map(|pose| heading_tip(*pose, style.heading_tick_length))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let points = expected
            .positions()
            .chain(record.actual_track().positions())
            .chain(footprint.iter().copied())
            .chain(arrow.iter().copied())
            .chain(record.parking_lot().corners())
            .chain(heading_tips);

        let bounds = WorldBounds::from_points(points)
            .ok_or_else(|| {
                PlotError::UndrawableGeometry("diagram has no finite coordinates".to_owned())
            })?
            .with_min_extent(MIN_WORLD_EXTENT)
            .padded(WORLD_PADDING_RATIO);
        let (width, height) = (bounds.width(), bounds.height());
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(PlotError::UndrawableGeometry(format!(
                "world extent {width} x {height} cannot be projected"
            )));
        }
        PlotProjection::new(bounds, style.viewport, style.margin_px)
    }
}

fn to_pixels(
    projection: PlotProjection,
    points: impl IntoIterator<Item = Point>,
) -> SmallVec<[(f64, f64); 8]> {
    points
        .into_iter()
        .map(|point| projection.to_pixel(point))
        .collect()
}

fn push_track_line(
    frame: &mut RenderFrame,
    projection: PlotProjection,
    track: &Track,
    color: Color,
    width: f64,
) {
    if track.len() < 2 {
        return;
    }
    let points = track
        .positions()
        .map(|point| projection.to_pixel(point))
        .collect();
    frame.push_polyline(
        PlotLayerKind::Tracks,
        PolylinePrimitive::new(points, width, color),
    );
}

fn push_waypoint_markers(
    frame: &mut RenderFrame,
    projection: PlotProjection,
    track: &Track,
    color: Color,
    style: &PlotStyle,
) {
    for point in track.positions() {
        let (x, y) = projection.to_pixel(point);
        frame.push_circle(
            PlotLayerKind::Waypoints,
            CirclePrimitive::open(
                x,
                y,
                style.waypoint_marker_radius_px,
                style.marker_border_width_px,
                color,
            ),
        );
    }
}

fn push_heading_ticks(
    frame: &mut RenderFrame,
    projection: PlotProjection,
    track: &Track,
    color: Color,
    style: &PlotStyle,
) {
    for pose in track.poses() {
        let (x1, y1) = projection.to_pixel(pose.position());
        let (x2, y2) = projection.to_pixel(heading_tip(*pose, style.heading_tick_length));
        frame.push_line(
            PlotLayerKind::Waypoints,
            LinePrimitive::new(x1, y1, x2, y2, style.heading_tick_width_px, color),
        );
    }
}

fn push_grid(frame: &mut RenderFrame, projection: PlotProjection, style: &PlotStyle) {
    let bounds = projection.bounds();
    let (left, top, right, bottom) = projection.plot_area();
    let span_px = (right - left).max(bottom - top);
    let count = grid_tick_target_count(span_px, GRID_TARGET_SPACING_PX);
    let step = nice_step(bounds.width().max(bounds.height()) / count as f64);
    let precision = precision_for_step(step);
    let font = style.grid_label_font_size_px;

    for x in ticks_in_range(bounds.min_x, bounds.max_x, step) {
        let (px, _) = projection.to_pixel(Point::new(x, bounds.min_y));
        frame.push_line(
            PlotLayerKind::Grid,
            LinePrimitive::new(px, top, px, bottom, 1.0, style.grid_color)
                .with_stroke_style(LineStrokeStyle::Dashed),
        );
        frame.push_text(
            PlotLayerKind::Grid,
            TextPrimitive::new(
                format!("{x:.precision$}"),
                px,
                bottom + 4.0,
                font,
                style.legend_text_color,
                TextHAlign::Center,
            ),
        );
    }
    for y in ticks_in_range(bounds.min_y, bounds.max_y, step) {
        let (_, py) = projection.to_pixel(Point::new(bounds.min_x, y));
        frame.push_line(
            PlotLayerKind::Grid,
            LinePrimitive::new(left, py, right, py, 1.0, style.grid_color)
                .with_stroke_style(LineStrokeStyle::Dashed),
        );
        frame.push_text(
            PlotLayerKind::Grid,
            TextPrimitive::new(
                format!("{y:.precision$}"),
                left - 4.0,
                py - font / 2.0,
                font,
                style.legend_text_color,
                TextHAlign::Right,
            ),
        );
    }

    frame.push_rect(
        PlotLayerKind::Grid,
        RectPrimitive::new(left, top, right - left, bottom - top, Color::rgba(0.0, 0.0, 0.0, 0.0))
            .with_border(1.0, Color::BLACK),
    );
}

fn push_legend(
    frame: &mut RenderFrame,
    projection: PlotProjection,
    entries: &[LegendEntry],
    style: &PlotStyle,
) {
    let (left, top, _, _) = projection.plot_area();
    let font = style.legend_font_size_px;
    let row_height = font * LEGEND_ROW_SCALE;
    let text_width = entries
        .iter()
        .map(|entry| estimate_text_width_px(&entry.label, font))
        .fold(0.0, f64::max);

    let x0 = left + LEGEND_INSET_PX;
    let y0 = top + LEGEND_INSET_PX;
    let width = 2.0 * LEGEND_PADDING_PX + LEGEND_SWATCH_PX + LEGEND_PADDING_PX + text_width;
    let height = 2.0 * LEGEND_PADDING_PX + row_height * entries.len() as f64;
    frame.push_rect(
        PlotLayerKind::Legend,
        RectPrimitive::new(x0, y0, width, height, style.legend_box_color)
            .with_border(1.0, style.grid_color),
    );

    for (row, entry) in entries.iter().enumerate() {
        let row_top = y0 + LEGEND_PADDING_PX + row_height * row as f64;
        let center_y = row_top + row_height / 2.0;
        let swatch_x = x0 + LEGEND_PADDING_PX;
        match entry.swatch {
            LegendSwatch::Line { color, width } => frame.push_line(
                PlotLayerKind::Legend,
                LinePrimitive::new(
                    swatch_x,
                    center_y,
                    swatch_x + LEGEND_SWATCH_PX,
                    center_y,
                    width,
                    color,
                ),
            ),
            LegendSwatch::Marker { color } => frame.push_circle(
                PlotLayerKind::Legend,
                CirclePrimitive::filled(
                    swatch_x + LEGEND_SWATCH_PX / 2.0,
                    center_y,
                    style.car_marker_radius_px.min(row_height / 2.0),
                    color,
                ),
            ),
        }
        frame.push_text(
            PlotLayerKind::Legend,
            TextPrimitive::new(
                entry.label.clone(),
                swatch_x + LEGEND_SWATCH_PX + LEGEND_PADDING_PX,
                center_y - font / 2.0,
                font,
                style.legend_text_color,
                TextHAlign::Left,
            ),
        );
    }
}

fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_label_joins_reasons() {
        assert_eq!(
            track_label("expect tracks", "TypeValidationFailure, TurnCountDiffFailure"),
            "expect tracks: TypeValidationFailure, TurnCountDiffFailure"
        );
    }

    #[test]
    fn track_label_without_reasons_ends_at_colon() {
        assert_eq!(track_label("actual tracks", ""), "actual tracks:");
    }

    #[test]
    fn car_label_prints_pose() {
        assert_eq!(
            car_label(Pose::at(1.5, -2.0, 0.25)),
            "car loc: x: 1.5, y: -2, theta: 0.25"
        );
    }
}
