//! End-to-end run over a result document: select failing cases, map their
//! trajectories and render one diagram per expected track.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::{CaseResult, TrajectoryRecord};
use crate::error::{PlotError, PlotResult};
use crate::parse::{CaseSelector, keys};
use crate::render::{PlotStyle, Renderer, TrajectoryRenderer};

/// Images produced for one test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseImages {
    /// Position of the case in the document's `test_cases` array.
    pub position: usize,
    pub case_id: String,
    pub description: String,
    pub saved_images: Vec<PathBuf>,
}

/// A case dropped because its data could not be decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseFailure {
    pub position: usize,
    pub case_id: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub rendered: Vec<CaseImages>,
    pub skipped: usize,
    pub failed: Vec<CaseFailure>,
    /// How often each failure reason was reported, in first-seen order.
    pub failure_reason_counts: IndexMap<String, usize>,
}

impl RunSummary {
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.rendered.iter().map(|case| case.saved_images.len()).sum()
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            PlotError::InvalidData(format!("failed to serialize run summary: {err}"))
        })
    }

    fn count_reasons(&mut self, record: &TrajectoryRecord) {
        for reason in record.failure_reasons().iter().flatten() {
            *self.failure_reason_counts.entry(reason.clone()).or_insert(0) += 1;
        }
    }
}

/// Reads and decodes a result document.
pub fn load_result_document(path: &Path) -> PlotResult<Value> {
    let raw = fs::read_to_string(path).map_err(|err| PlotError::io(path, err))?;
    serde_json::from_str(&raw).map_err(|err| {
        PlotError::MalformedPayload(format!(
            "result document `{}` is not valid JSON: {err}",
            path.display()
        ))
    })
}

/// Drives case selection and rendering strictly one case at a time.
#[derive(Debug)]
pub struct PosePlotter<R: Renderer> {
    selector: CaseSelector,
    renderer: TrajectoryRenderer<R>,
}

impl<R: Renderer> PosePlotter<R> {
    pub fn new(renderer: R, style: PlotStyle) -> PlotResult<Self> {
        Ok(Self {
            selector: CaseSelector::default(),
            renderer: TrajectoryRenderer::new(renderer, style)?,
        })
    }

    #[must_use]
    pub fn with_selector(mut self, selector: CaseSelector) -> Self {
        self.selector = selector;
        self
    }

    #[must_use]
    pub fn trajectory_renderer(&self) -> &TrajectoryRenderer<R> {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer.into_renderer()
    }

    /// Renders every failing case of `document` into `out_dir`.
    ///
    /// Decoding problems and undrawable geometry of a single case are logged
    /// and recorded in `RunSummary::failed`. Any other error aborts the run.
    pub fn run(&mut self, document: &Value, out_dir: &Path) -> PlotResult<RunSummary> {
        let cases = self.selector.test_cases(document)?;
        let mut summary = RunSummary::default();

        for (position, case) in cases.iter().enumerate() {
            let outcome = self.selector.mapper().map_case(case).and_then(|result| match result {
                CaseResult::Found(identity, record) => self
                    .renderer
                    .render_case(&identity, &record, out_dir)
                    .map(|saved_images| Some((identity, record, saved_images))),
                CaseResult::Skipped(reason) => {
                    debug!(position, ?reason, "skipping test case");
                    Ok(None)
                }
            });

            match outcome {
                Ok(Some((identity, record, saved_images))) => {
                    summary.count_reasons(&record);
                    summary.rendered.push(CaseImages {
                        position,
                        case_id: identity.case_id,
                        description: identity.description,
                        saved_images,
                    });
                }
                Ok(None) => summary.skipped += 1,
                Err(err) if err.is_case_scoped() => {
                    let case_id = case_id_hint(case);
                    warn!(position, case_id = ?case_id, error = %err, "dropping test case");
                    summary.failed.push(CaseFailure {
                        position,
                        case_id,
                        error: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            cases = cases.len(),
            rendered = summary.rendered.len(),
            images = summary.image_count(),
            skipped = summary.skipped,
            failed = summary.failed.len(),
            "trajectory run finished"
        );
        Ok(summary)
    }

    pub fn run_file(&mut self, result_path: &Path, out_dir: &Path) -> PlotResult<RunSummary> {
        let document = load_result_document(result_path)?;
        self.run(&document, out_dir)
    }
}

fn case_id_hint(case: &Value) -> Option<String> {
    case.get(keys::DESCRIPTIONS)
        .or_else(|| case.get(keys::DESCRIPTIONS_LEGACY))
        .and_then(|descriptions| descriptions.get(keys::CASE_ID))
        .and_then(Value::as_str)
        .map(str::to_owned)
}
