mod common;

use std::path::Path;

use serde_json::json;
use trajectory_plot::render::{NullRenderer, PlotStyle};
use trajectory_plot::report::{
    annotate_saved_images, build_report_document, show_description_key,
};
use trajectory_plot::{PlotError, PosePlotter};

fn document() -> serde_json::Value {
    json!({
        "pass_rate": 0.33333,
        "test_cases": [
            common::single_track_case("TC-1", "failing"),
            common::test_case("TC-2", "passing", true, vec![]),
            { "descriptions": { "Test Case ID": "TC-3" }, "channels": [] },
        ]
    })
}

#[test]
fn description_keys_become_template_friendly() {
    assert_eq!(show_description_key("Test Case ID"), "test_case_id");
    assert_eq!(show_description_key("Description"), "description");
}

#[test]
fn report_partitions_cases_and_rounds_pass_rate() {
    let report = build_report_document(&document(), "Planning BVT").expect("report");

    assert_eq!(report["report_name"], json!("Integration Test Report for Planning BVT"));
    assert_eq!(report["pass_rate"], json!(0.33));

    let failed = report["failed_test_cases"].as_array().expect("failed");
    let passed = report["passed_test_cases"].as_array().expect("passed");
    assert_eq!(failed.len(), 2);
    assert_eq!(passed.len(), 1);
    assert_eq!(failed[0]["index"], json!(0));
    assert_eq!(failed[1]["index"], json!(2));
    assert_eq!(passed[0]["index"], json!(1));
    assert_eq!(
        passed[0]["show_descriptions"],
        json!({ "test_case_id": "TC-2", "description": "passing" })
    );
}

#[test]
fn report_leaves_the_input_untouched() {
    let input = document();
    let _ = build_report_document(&input, "x").expect("report");
    assert_eq!(input, document());
}

#[test]
fn saved_images_are_attached_to_rendered_cases() {
    let mut doc = document();
    let mut plotter = PosePlotter::new(NullRenderer::default(), PlotStyle::default()).expect("plotter");
    let summary = plotter.run(&doc, Path::new("img")).expect("run");

    let annotated = annotate_saved_images(&mut doc, &summary).expect("annotate");
    assert_eq!(annotated, 1);
    assert_eq!(doc["test_cases"][0]["saved_images"], json!(["img/TC-1_failing_0.png"]));
    assert!(doc["test_cases"][1].get("saved_images").is_none());

    let report = build_report_document(&doc, "Planning BVT").expect("report");
    assert_eq!(
        report["failed_test_cases"][0]["saved_images"],
        json!(["img/TC-1_failing_0.png"])
    );
}

#[test]
fn document_without_test_cases_is_rejected() {
    let err = build_report_document(&json!({ "pass_rate": 1.0 }), "x").expect_err("no cases");
    assert!(matches!(err, PlotError::SchemaViolation(_)));
}
