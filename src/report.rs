//! JSON consumed by the HTML report templates.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{PlotError, PlotResult};
use crate::parse::keys;
use crate::pipeline::RunSummary;

pub const SHOW_DESCRIPTIONS: &str = "show_descriptions";
pub const CASE_INDEX: &str = "index";
pub const REPORT_NAME: &str = "report_name";
pub const PASS_RATE: &str = "pass_rate";
pub const FAILED_TEST_CASES: &str = "failed_test_cases";
pub const PASSED_TEST_CASES: &str = "passed_test_cases";

/// Template-friendly form of a description key: `"Test Case ID"` becomes
/// `"test_case_id"`.
#[must_use]
pub fn show_description_key(raw: &str) -> String {
    raw.replace(' ', "_").to_lowercase()
}

/// Adds a `saved_images` array to every case that produced images. Returns
/// the number of annotated cases.
pub fn annotate_saved_images(document: &mut Value, summary: &RunSummary) -> PlotResult<usize> {
    let cases = test_cases_mut(document)?;
    let mut annotated = 0;
    for images in &summary.rendered {
        let Some(case) = cases.get_mut(images.position).and_then(Value::as_object_mut) else {
            warn!(position = images.position, "rendered case not found in document");
            continue;
        };
        let paths = images
            .saved_images
            .iter()
            .map(|path| Value::String(path.to_string_lossy().into_owned()))
            .collect();
        case.insert(keys::SAVED_IMAGES.to_owned(), Value::Array(paths));
        annotated += 1;
    }
    Ok(annotated)
}

/// Builds the report view of `document`.
///
/// Every case gets `index` and `show_descriptions`; the document gets
/// `report_name`, a `pass_rate` rounded to two decimals and the
/// `failed_test_cases` / `passed_test_cases` partitions in document order.
/// A case without a boolean `pass` flag is listed as failed.
pub fn build_report_document(document: &Value, report_name: &str) -> PlotResult<Value> {
    let mut report = document.clone();

    let mut failed = Vec::new();
    let mut passed = Vec::new();
    for (index, case) in test_cases_mut(&mut report)?.iter_mut().enumerate() {
        let Some(case) = case.as_object_mut() else {
            warn!(index, "test case is not an object");
            continue;
        };

        let show_descriptions: Map<String, Value> = case
            .get(keys::DESCRIPTIONS)
            .or_else(|| case.get(keys::DESCRIPTIONS_LEGACY))
            .and_then(Value::as_object)
            .map(|descriptions| {
                descriptions
                    .iter()
                    .map(|(key, value)| (show_description_key(key), value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        case.insert(SHOW_DESCRIPTIONS.to_owned(), Value::Object(show_descriptions));
        case.insert(CASE_INDEX.to_owned(), Value::from(index));

        let is_pass = case
            .get(keys::CASE_PASS)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if is_pass {
            passed.push(Value::Object(case.clone()));
        } else {
            failed.push(Value::Object(case.clone()));
        }
    }

    let root = report
        .as_object_mut()
        .ok_or_else(|| PlotError::SchemaViolation("result document is not an object".to_owned()))?;
    root.insert(
        REPORT_NAME.to_owned(),
        Value::String(format!("Integration Test Report for {report_name}")),
    );
    if let Some(rate) = root.get(PASS_RATE).and_then(Value::as_f64) {
        root.insert(PASS_RATE.to_owned(), Value::from((rate * 100.0).round() / 100.0));
    }
    root.insert(FAILED_TEST_CASES.to_owned(), Value::Array(failed));
    root.insert(PASSED_TEST_CASES.to_owned(), Value::Array(passed));
    Ok(report)
}

fn test_cases_mut(document: &mut Value) -> PlotResult<&mut Vec<Value>> {
    document
        .get_mut(keys::TEST_CASES)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| {
            PlotError::SchemaViolation(format!(
                "result document has no `{}` array",
                keys::TEST_CASES
            ))
        })
}
