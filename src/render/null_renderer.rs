use std::path::{Path, PathBuf};

use crate::error::PlotResult;
use crate::render::{RenderFrame, Renderer};

/// Renderer that validates frames and records target paths without writing
/// any file. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub rendered_paths: Vec<PathBuf>,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render_png(&mut self, frame: &RenderFrame, path: &Path) -> PlotResult<()> {
        frame.validate()?;
        self.rendered_paths.push(path.to_path_buf());
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
