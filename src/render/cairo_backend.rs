use std::f64::consts::TAU;
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::debug;

use crate::error::{PlotError, PlotResult};
use crate::render::{
    CirclePrimitive, Color, LayerPrimitives, PolygonPrimitive, RenderFrame, Renderer, TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub shapes_drawn: usize,
    pub markers_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Every image gets its own `ImageSurface` and `Context`. Both are dropped
/// before `render_png` returns, on success and on failure alike, so no drawing
/// state leaks from one image into the next.
#[derive(Debug, Default)]
pub struct CairoRenderer {
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Draws `frame` onto a fresh offscreen surface.
    pub fn render_surface(&mut self, frame: &RenderFrame) -> PlotResult<ImageSurface> {
        frame.validate()?;
        let width = i32::try_from(frame.viewport.width)
            .map_err(|_| PlotError::InvalidData("viewport width overflows i32".to_owned()))?;
        let height = i32::try_from(frame.viewport.height)
            .map_err(|_| PlotError::InvalidData("viewport height overflows i32".to_owned()))?;

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        {
            let context = Context::new(&surface)
                .map_err(|err| map_backend_error("failed to create cairo context", err))?;
            self.last_stats = draw_frame(&context, frame)?;
        }
        surface.flush();
        Ok(surface)
    }
}

impl Renderer for CairoRenderer {
    fn render_png(&mut self, frame: &RenderFrame, path: &Path) -> PlotResult<()> {
        let surface = self.render_surface(frame)?;
        let mut file = File::create(path).map_err(|err| PlotError::io(path, err))?;
        surface.write_to_png(&mut file).map_err(|err| {
            let source = match err {
                cairo::IoError::Io(io) => io,
                cairo::IoError::Cairo(status) => std::io::Error::other(status.to_string()),
            };
            PlotError::io(path, source)
        })?;
        debug!(path = %path.display(), stats = ?self.last_stats, "wrote png");
        Ok(())
    }
}

fn draw_frame(context: &Context, frame: &RenderFrame) -> PlotResult<CairoRenderStats> {
    apply_color(context, frame.background);
    context
        .paint()
        .map_err(|err| map_backend_error("failed to clear surface", err))?;

    let mut stats = CairoRenderStats::default();
    for layer in &frame.layers {
        draw_layer(context, layer, &mut stats)?;
    }
    Ok(stats)
}

fn draw_layer(
    context: &Context,
    layer: &LayerPrimitives,
    stats: &mut CairoRenderStats,
) -> PlotResult<()> {
    for rect in &layer.rects {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        apply_color(context, rect.fill_color);
        if rect.border_width > 0.0 {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            apply_color(context, rect.border_color);
            context.set_line_width(rect.border_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
        } else {
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        }
        stats.shapes_drawn += 1;
    }

    for polygon in &layer.polygons {
        draw_polygon(context, polygon)?;
        stats.shapes_drawn += 1;
    }

    for line in &layer.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        context.set_dash(line.stroke_style.dash_pattern(), 0.0);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }
    context.set_dash(&[], 0.0);

    for polyline in &layer.polylines {
        let mut points = polyline.points.iter();
        let Some(&(x0, y0)) = points.next() else {
            continue;
        };
        if polyline.points.len() < 2 {
            continue;
        }
        apply_color(context, polyline.color);
        context.set_line_width(polyline.stroke_width);
        context.move_to(x0, y0);
        for &(x, y) in points {
            context.line_to(x, y);
        }
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
        stats.lines_drawn += 1;
    }

    for circle in &layer.circles {
        draw_circle(context, *circle)?;
        stats.markers_drawn += 1;
    }

    for text in &layer.texts {
        let layout = pangocairo::functions::create_layout(context);
        let font_description =
            FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, _text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };

        apply_color(context, text.color);
        context.move_to(x, text.y);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }

    Ok(())
}

fn draw_polygon(context: &Context, polygon: &PolygonPrimitive) -> PlotResult<()> {
    let mut points = polygon.points.iter();
    let Some(&(x0, y0)) = points.next() else {
        return Ok(());
    };
    context.new_path();
    context.move_to(x0, y0);
    for &(x, y) in points {
        context.line_to(x, y);
    }
    context.close_path();
    fill_and_stroke(
        context,
        polygon.fill_color,
        polygon.border_color,
        polygon.border_width,
    )
}

fn draw_circle(context: &Context, circle: CirclePrimitive) -> PlotResult<()> {
    context.new_sub_path();
    context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
    context.close_path();
    fill_and_stroke(
        context,
        circle.fill_color,
        Some(circle.border_color),
        circle.border_width,
    )
}

fn fill_and_stroke(
    context: &Context,
    fill: Option<Color>,
    border: Option<Color>,
    border_width: f64,
) -> PlotResult<()> {
    if let Some(color) = fill {
        apply_color(context, color);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill shape", err))?;
    }
    match border {
        Some(color) if border_width > 0.0 => {
            apply_color(context, color);
            context.set_line_width(border_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke shape", err))
        }
        _ => {
            context.new_path();
            Ok(())
        }
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::InvalidData(format!("{prefix}: {err}"))
}
