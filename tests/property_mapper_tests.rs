mod common;

use proptest::prelude::*;
use serde_json::{Value, json};
use trajectory_plot::core::CaseResult;
use trajectory_plot::parse::TrajectoryMapper;

fn waypoints() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((-80.0f64..80.0, -80.0f64..80.0, -3.1f64..3.1), 0..6)
}

fn reasons() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "TypeValidationFailure",
            "StartEndDistanceFailure",
            "TurnCountDiffFailure",
            "TurnCurveRateFailure",
        ])
        .prop_map(str::to_owned),
        0..3,
    )
}

proptest! {
    #[test]
    fn reason_sets_and_expected_tracks_stay_paired(
        expected in prop::collection::vec((waypoints(), reasons()), 1..5),
        actual in waypoints(),
        as_single_object in any::<bool>(),
    ) {
        let single = as_single_object && expected.len() == 1;
        let expect_json = if single {
            common::track_json(&expected[0].0)
        } else {
            let tracks: Vec<&[(f64, f64, f64)]> =
                expected.iter().map(|(points, _)| points.as_slice()).collect();
            common::track_array_json(&tracks)
        };
        let reason_sets: Vec<Value> = expected.iter().map(|(_, reasons)| json!(reasons)).collect();
        let message = common::output_message(&common::track_json(&actual), &expect_json);
        let case = common::test_case(
            "TC-P",
            "property",
            false,
            vec![common::trajectory_channel(Value::Array(reason_sets), &message)],
        );

        let CaseResult::Found(_, record) = TrajectoryMapper::new().map_case(&case).expect("map") else {
            panic!("failing case with trajectory channel must map");
        };
        prop_assert_eq!(record.failure_reasons().len(), record.expected_tracks().len());
        prop_assert_eq!(record.expected_tracks().len(), expected.len());
        prop_assert_eq!(record.actual_track().len(), actual.len());
        for (index, (points, reasons)) in expected.iter().enumerate() {
            prop_assert_eq!(record.expected_tracks()[index].len(), points.len());
            prop_assert_eq!(&record.failure_reasons()[index], reasons);
        }
    }

    #[test]
    fn passed_cases_never_map(channels in prop::collection::vec(any::<u8>(), 0..4)) {
        let channels: Vec<Value> = channels.into_iter().map(|byte| json!({ "noise": byte })).collect();
        let case = common::test_case("TC-Q", "passed", true, channels);
        prop_assert!(TrajectoryMapper::new().map_case(&case).expect("map").is_skipped());
    }
}
