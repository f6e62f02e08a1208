//! Field names of the integration-test result document.

pub const TEST_CASES: &str = "test_cases";
pub const DESCRIPTIONS: &str = "descriptions";
/// Older result files store the description map under this key.
pub const DESCRIPTIONS_LEGACY: &str = "Description";
pub const DESCRIPTION: &str = "Description";
pub const CASE_ID: &str = "Test Case ID";
pub const CASE_PASS: &str = "pass";
pub const CHANNELS: &str = "channels";
pub const TOPIC_NAME: &str = "topic_name";
/// Absent when the run produced no result messages for the channel.
pub const PLAN_FAILED_REASONS: &str = "plan_failed_reasons";
pub const SAVED_IMAGES: &str = "saved_images";

/// Topic of the channel that carries planning trajectories.
pub const TRAJECTORY_TOPIC: &str = "TrajectoryFully";

/// Line separator used inside `output_messages` strings.
pub const LINE_BREAK: &str = "<br/>";
