mod common;

use approx::assert_relative_eq;
use serde_json::json;
use trajectory_plot::PlotError;
use trajectory_plot::core::{CaseResult, SkipReason};
use trajectory_plot::parse::{ExpectedPayload, TrajectoryMapper};

fn found(result: CaseResult) -> (trajectory_plot::core::CaseIdentity, trajectory_plot::core::TrajectoryRecord) {
    match result {
        CaseResult::Found(identity, record) => (identity, record),
        CaseResult::Skipped(reason) => panic!("expected trajectory, got skip: {reason:?}"),
    }
}

#[test]
fn passed_case_is_skipped_without_looking_at_channels() {
    let case = json!({
        "descriptions": { "Test Case ID": "TC-1", "Description": "ok" },
        "pass": true,
        "channels": "not even a list"
    });
    let result = TrajectoryMapper::new().map_case(&case).expect("map");
    assert_eq!(result, CaseResult::Skipped(SkipReason::Passed));
}

#[test]
fn case_without_trajectory_topic_is_skipped() {
    let case = common::test_case(
        "TC-2",
        "no planner output",
        false,
        vec![common::other_channel("Localization"), common::other_channel("Chassis")],
    );
    let result = TrajectoryMapper::new().map_case(&case).expect("map");
    assert_eq!(result, CaseResult::Skipped(SkipReason::NoTrajectoryChannel));
}

#[test]
fn channel_without_failure_reasons_means_no_actual_data() {
    let case = common::test_case(
        "TC-3",
        "silent planner",
        false,
        vec![json!({ "topic_name": "TrajectoryFully" })],
    );
    let result = TrajectoryMapper::new().map_case(&case).expect("map");
    assert_eq!(result, CaseResult::Skipped(SkipReason::NoActualData));
}

#[test]
fn missing_failure_reasons_skip_before_other_fields_are_read() {
    let case = common::test_case(
        "TC-3b",
        "half written channel",
        false,
        vec![json!({
            "topic_name": "TrajectoryFully",
            "car_loc": { "x": 1.0 },
            "output_messages": "none"
        })],
    );
    let result = TrajectoryMapper::new().map_case(&case).expect("map");
    assert_eq!(result, CaseResult::Skipped(SkipReason::NoActualData));
}

#[test]
fn two_expected_tracks_are_mapped_in_order() {
    let case = common::two_track_case("TC-4", "parallel/left");
    let (identity, record) = found(TrajectoryMapper::new().map_case(&case).expect("map"));

    assert_eq!(identity.case_id, "TC-4");
    assert_eq!(identity.description, "parallel/left");
    assert_eq!(record.expected_tracks().len(), 2);
    assert_eq!(record.failure_reasons().len(), 2);
    assert_eq!(record.expected_tracks()[0].len(), 3);
    assert_eq!(record.expected_tracks()[1].len(), 2);
    assert_eq!(record.actual_track().len(), 3);
    assert_eq!(
        record.failure_reasons()[1],
        vec!["StartEndDistanceFailure", "TurnCountDiffFailure"]
    );

    let last = record.actual_track().poses()[2];
    assert_relative_eq!(last.x, 9.0);
    assert_relative_eq!(last.y, -1.5);
    assert_relative_eq!(last.theta, 1.2);
    assert_relative_eq!(last.direction, 1.0);
    assert_relative_eq!(last.speed, 0.5);

    let car = record.car_location();
    assert_relative_eq!(car.theta, 0.3);
    assert_eq!(car.direction, 0.0);
    assert_relative_eq!(record.parking_lot().p2.x, 14.0);
}

#[test]
fn single_expected_object_becomes_one_track() {
    let case = common::single_track_case("TC-5", "perpendicular");
    let (_, record) = found(TrajectoryMapper::new().map_case(&case).expect("map"));
    assert_eq!(record.expected_tracks().len(), 1);
    assert_eq!(record.failure_reasons().len(), 1);
    assert_eq!(record.joined_reasons(0), "TurnCurveRateFailure");
}

#[test]
fn expected_payload_variant_is_resolved_once() {
    let single = ExpectedPayload::from_value(&json!({ "waypoints": [] })).expect("single");
    assert!(matches!(single, ExpectedPayload::SingleTrack(_)));
    assert_eq!(single.len(), 1);

    let multiple = ExpectedPayload::from_value(&json!([{ "waypoints": [] }, { "waypoints": [] }]))
        .expect("multiple");
    assert!(matches!(multiple, ExpectedPayload::MultipleTracks(_)));
    assert_eq!(multiple.into_tracks().len(), 2);
}

#[test]
fn first_matching_channel_wins() {
    let first = common::trajectory_channel(
        json!([["TypeValidationFailure"]]),
        &common::output_message(
            &common::track_json(&common::ACTUAL_POINTS),
            &common::track_json(&common::EXPECTED_B),
        ),
    );
    let second = json!({ "topic_name": "TrajectoryFully", "plan_failed_reasons": "broken" });
    let case = common::test_case("TC-6", "dup topics", false, vec![first, second]);

    let (_, record) = found(TrajectoryMapper::new().map_case(&case).expect("map"));
    assert_eq!(record.expected_tracks()[0].len(), 2);
}

#[test]
fn custom_topic_is_honoured() {
    let mut channel = common::trajectory_channel(
        json!([[]]),
        &common::output_message(
            &common::track_json(&common::ACTUAL_POINTS),
            &common::track_json(&common::EXPECTED_A),
        ),
    );
    channel["topic_name"] = json!("TrajectoryLite");
    let case = common::test_case("TC-7", "lite", false, vec![channel]);

    let default = TrajectoryMapper::new().map_case(&case).expect("map");
    assert!(default.is_skipped());

    let custom = TrajectoryMapper::new().with_topic("TrajectoryLite");
    let (_, record) = found(custom.map_case(&case).expect("map"));
    assert_eq!(record.joined_reasons(0), "");
}

#[test]
fn legacy_description_key_is_accepted() {
    let mut case = common::single_track_case("TC-8", "legacy");
    let descriptions = case
        .as_object_mut()
        .and_then(|object| object.remove("descriptions"))
        .expect("descriptions");
    case["Description"] = descriptions;

    let (identity, _) = found(TrajectoryMapper::new().map_case(&case).expect("map"));
    assert_eq!(identity.case_id, "TC-8");
}

#[test]
fn missing_parking_corner_is_schema_violation() {
    let mut case = common::single_track_case("TC-9", "no p2");
    case["channels"][0]["parking_space"]
        .as_object_mut()
        .expect("parking space")
        .remove("p2");

    let err = TrajectoryMapper::new().map_case(&case).expect_err("must fail");
    assert!(matches!(err, PlotError::SchemaViolation(_)), "{err:?}");
    assert!(err.is_case_scoped());
}

#[test]
fn missing_pose_theta_is_schema_violation() {
    let actual = common::track_json(&common::ACTUAL_POINTS).replacen("\"theta\"", "\"heading\"", 1);
    let message = common::output_message(&actual, &common::track_json(&common::EXPECTED_A));
    let case = common::test_case(
        "TC-10",
        "bad pose",
        false,
        vec![common::trajectory_channel(json!([["TypeValidationFailure"]]), &message)],
    );

    let err = TrajectoryMapper::new().map_case(&case).expect_err("must fail");
    match err {
        PlotError::SchemaViolation(message) => assert!(message.contains("theta"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn broken_embedded_json_is_malformed_payload() {
    let message = "Actual Message:<br/>{\"waypoints\": [<br/><br/>Expect Message:<br/>{}";
    let case = common::test_case(
        "TC-11",
        "truncated",
        false,
        vec![common::trajectory_channel(json!([["TypeValidationFailure"]]), message)],
    );

    let err = TrajectoryMapper::new().map_case(&case).expect_err("must fail");
    assert!(matches!(err, PlotError::MalformedPayload(_)), "{err:?}");
}

#[test]
fn reason_count_must_match_expected_tracks() {
    let message = common::output_message(
        &common::track_json(&common::ACTUAL_POINTS),
        &common::track_array_json(&[&common::EXPECTED_A, &common::EXPECTED_B]),
    );
    let case = common::test_case(
        "TC-12",
        "one reason set",
        false,
        vec![common::trajectory_channel(json!([["TypeValidationFailure"]]), &message)],
    );

    let err = TrajectoryMapper::new().map_case(&case).expect_err("must fail");
    assert!(matches!(err, PlotError::SchemaViolation(_)), "{err:?}");
}

#[test]
fn missing_pass_flag_is_schema_violation() {
    let case = json!({ "descriptions": {}, "channels": [] });
    let err = TrajectoryMapper::new().map_case(&case).expect_err("must fail");
    assert!(matches!(err, PlotError::SchemaViolation(_)));
}
