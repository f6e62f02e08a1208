use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;
use trajectory_plot::core::CaseResult;
use trajectory_plot::parse::{MessageBlockExtractor, TrajectoryMapper, split_output_message};
use trajectory_plot::render::{NullRenderer, PlotStyle, TrajectoryRenderer};

fn track_json(len: usize, phase: f64) -> String {
    let waypoints: Vec<Value> = (0..len)
        .map(|i| {
            let t = i as f64 * 0.05;
            json!({
                "direction": 1,
                "speed": 1.2,
                "pose": { "x": t * 10.0, "y": (t + phase).sin() * 3.0, "theta": (t + phase).cos() }
            })
        })
        .collect();
    serde_json::to_string_pretty(&json!({ "waypoints": waypoints })).expect("track json")
}

fn output_message(waypoints: usize) -> String {
    let expect = format!("[{}, {}]", track_json(waypoints, 0.0), track_json(waypoints, 0.4));
    let actual = track_json(waypoints, 0.2);
    let mut lines = vec!["Planning result mismatch", "", "Actual Message:"];
    lines.extend(actual.lines());
    lines.extend(["", "Expect Message:"]);
    lines.extend(expect.lines());
    lines.push("");
    lines.join("<br/>")
}

fn failing_case(waypoints: usize) -> Value {
    json!({
        "descriptions": { "Test Case ID": "BENCH-1", "Description": "sine" },
        "pass": false,
        "channels": [{
            "topic_name": "TrajectoryFully",
            "plan_failed_reasons": [["TypeValidationFailure"], ["TurnCountDiffFailure"]],
            "car_loc": { "x": 0.0, "y": 0.0, "theta": 0.0 },
            "parking_space": {
                "p0": { "x": 20.0, "y": -3.0 },
                "p1": { "x": 20.0, "y": 0.0 },
                "p2": { "x": 26.0, "y": 0.0 },
                "p3": { "x": 26.0, "y": -3.0 }
            },
            "output_messages": [output_message(waypoints)]
        }]
    })
}

fn bench_extract_blocks_1k(c: &mut Criterion) {
    let raw = output_message(1_000);

    c.bench_function("extract_blocks_1k", |b| {
        b.iter(|| {
            let _ = MessageBlockExtractor::extract(split_output_message(black_box(&raw)))
                .expect("extract");
        })
    });
}

fn bench_map_case_1k(c: &mut Criterion) {
    let case = failing_case(1_000);
    let mapper = TrajectoryMapper::new();

    c.bench_function("map_case_1k", |b| {
        b.iter(|| {
            let _ = mapper.map_case(black_box(&case)).expect("map");
        })
    });
}

fn bench_build_frame_1k(c: &mut Criterion) {
    let CaseResult::Found(_, record) = TrajectoryMapper::new()
        .map_case(&failing_case(1_000))
        .expect("map")
    else {
        panic!("bench case must map to a trajectory");
    };
    let renderer =
        TrajectoryRenderer::new(NullRenderer::default(), PlotStyle::default()).expect("renderer");

    c.bench_function("build_frame_1k", |b| {
        b.iter(|| {
            let _ = renderer
                .build_frame(black_box(&record), 1)
                .expect("frame");
        })
    });
}

criterion_group!(
    benches,
    bench_extract_blocks_1k,
    bench_map_case_1k,
    bench_build_frame_1k
);
criterion_main!(benches);
