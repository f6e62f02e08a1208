mod frame;
mod null_renderer;
mod primitives;
mod style;
mod ticks;
mod trajectory_renderer;

use std::path::Path;

pub use frame::{LayerPrimitives, PlotLayerKind, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive, TextHAlign, TextPrimitive,
};
pub use style::PlotStyle;
pub use trajectory_renderer::{
    LegendEntry, LegendSwatch, TrajectoryRenderer, car_label, track_label,
};

use crate::error::PlotResult;

/// Contract implemented by any image backend.
///
/// Each call receives one fully materialized `RenderFrame` and owns whatever
/// drawing context it needs for that single image.
pub trait Renderer {
    fn render_png(&mut self, frame: &RenderFrame, path: &Path) -> PlotResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
