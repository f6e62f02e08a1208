#![allow(dead_code)]

use serde_json::{Value, json};

/// `(x, y, theta)` waypoints as a pretty-printed track message.
pub fn track_json(points: &[(f64, f64, f64)]) -> String {
    let waypoints: Vec<Value> = points
        .iter()
        .map(|&(x, y, theta)| {
            json!({
                "direction": 1,
                "speed": 0.5,
                "pose": { "x": x, "y": y, "theta": theta }
            })
        })
        .collect();
    serde_json::to_string_pretty(&json!({ "waypoints": waypoints })).expect("track json")
}

/// Several track messages as one pretty-printed JSON array.
pub fn track_array_json(tracks: &[&[(f64, f64, f64)]]) -> String {
    let values: Vec<Value> = tracks
        .iter()
        .map(|points| serde_json::from_str(&track_json(points)).expect("track value"))
        .collect();
    serde_json::to_string_pretty(&Value::Array(values)).expect("track array json")
}

/// Log text as produced by the test runner: prose, both blocks, `<br/>` breaks.
pub fn output_message(actual_json: &str, expect_json: &str) -> String {
    let mut lines = vec!["Planning result mismatch", "", "Actual Message:"];
    lines.extend(actual_json.lines());
    lines.extend(["", "Expect Message:"]);
    lines.extend(expect_json.lines());
    lines.extend(["", "end of report"]);
    lines.join("<br/>")
}

pub fn trajectory_channel(reasons: Value, message: &str) -> Value {
    json!({
        "topic_name": "TrajectoryFully",
        "plan_failed_reasons": reasons,
        "car_loc": { "x": 2.0, "y": 1.0, "theta": 0.3 },
        "parking_space": {
            "p0": { "x": 8.0, "y": -3.0 },
            "p1": { "x": 8.0, "y": 0.0 },
            "p2": { "x": 14.0, "y": 0.0 },
            "p3": { "x": 14.0, "y": -3.0 }
        },
        "output_messages": [message]
    })
}

pub fn other_channel(topic: &str) -> Value {
    json!({ "topic_name": topic, "output_messages": ["irrelevant"] })
}

pub fn test_case(case_id: &str, description: &str, pass: bool, channels: Vec<Value>) -> Value {
    json!({
        "descriptions": {
            "Test Case ID": case_id,
            "Description": description
        },
        "pass": pass,
        "channels": channels
    })
}

pub const ACTUAL_POINTS: [(f64, f64, f64); 3] = [(0.0, 0.0, 0.0), (4.0, 1.0, 0.2), (9.0, -1.5, 1.2)];
pub const EXPECTED_A: [(f64, f64, f64); 3] = [(0.0, 0.0, 0.0), (5.0, 0.5, 0.1), (10.0, -2.0, 1.5)];
pub const EXPECTED_B: [(f64, f64, f64); 2] = [(0.0, 0.0, 0.0), (11.0, -1.0, 1.4)];

/// Failing case with two expected tracks and a three-point actual track.
pub fn two_track_case(case_id: &str, description: &str) -> Value {
    let message = output_message(
        &track_json(&ACTUAL_POINTS),
        &track_array_json(&[&EXPECTED_A, &EXPECTED_B]),
    );
    let reasons = json!([
        ["TypeValidationFailure"],
        ["StartEndDistanceFailure", "TurnCountDiffFailure"]
    ]);
    test_case(
        case_id,
        description,
        false,
        vec![other_channel("Localization"), trajectory_channel(reasons, &message)],
    )
}

/// Failing case whose expect block is a single object.
pub fn single_track_case(case_id: &str, description: &str) -> Value {
    let message = output_message(&track_json(&ACTUAL_POINTS), &track_json(&EXPECTED_A));
    test_case(
        case_id,
        description,
        false,
        vec![trajectory_channel(json!([["TurnCurveRateFailure"]]), &message)],
    )
}

/// Fresh empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "trajectory-plot-{name}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
