use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::{CaseIdentity, CaseResult, SkipReason, TrajectoryRecord};
use crate::error::{PlotError, PlotResult};
use crate::parse::keys;
use crate::parse::message_block::{MessageBlockExtractor, split_output_message};
use crate::parse::payload::{ExpectedPayload, RawParkingSpace, RawPose, TrackPayload};

/// Typed view of a trajectory channel that carries failure reasons. The rest is
/// checked field by field so a missing key names itself.
#[derive(Debug, Deserialize)]
struct TrajectoryChannel {
    #[serde(default)]
    plan_failed_reasons: Option<Vec<Vec<String>>>,
    #[serde(default)]
    car_loc: Option<RawPose>,
    #[serde(default)]
    parking_space: Option<RawParkingSpace>,
    #[serde(default)]
    output_messages: Option<Vec<String>>,
}

/// Builds a [`TrajectoryRecord`] out of one test case of the result document.
#[derive(Debug, Clone)]
pub struct TrajectoryMapper {
    topic: String,
}

impl Default for TrajectoryMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl TrajectoryMapper {
    #[must_use]
    pub fn new() -> Self {
        Self {
            topic: keys::TRAJECTORY_TOPIC.to_owned(),
        }
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Maps one test case.
    ///
    /// Passed cases are skipped before any channel is looked at. Errors are
    /// scoped to this case: `MalformedPayload` for undecodable embedded text,
    /// `SchemaViolation` for missing or mistyped keys.
    pub fn map_case(&self, case: &Value) -> PlotResult<CaseResult> {
        let passed = case
            .get(keys::CASE_PASS)
            .and_then(Value::as_bool)
            .ok_or_else(|| missing_key(keys::CASE_PASS))?;
        if passed {
            return Ok(CaseResult::Skipped(SkipReason::Passed));
        }

        let channels = case
            .get(keys::CHANNELS)
            .and_then(Value::as_array)
            .ok_or_else(|| missing_key(keys::CHANNELS))?;

        let mut selected = None;
        for channel in channels {
            let topic = channel
                .get(keys::TOPIC_NAME)
                .and_then(Value::as_str)
                .ok_or_else(|| missing_key(keys::TOPIC_NAME))?;
            if topic == self.topic {
                selected = Some(channel);
                break;
            }
        }
        let Some(channel) = selected else {
            return Ok(CaseResult::Skipped(SkipReason::NoTrajectoryChannel));
        };

        let identity = read_identity(case)?;
        match self.map_channel(channel)? {
            Some(record) => Ok(CaseResult::Found(identity, record)),
            None => {
                debug!(case_id = %identity.case_id, "trajectory channel has no result messages");
                Ok(CaseResult::Skipped(SkipReason::NoActualData))
            }
        }
    }

    /// Maps the trajectory channel itself. Returns `None` when the channel has
    /// no failure reasons, which means the run produced no actual messages.
    pub fn map_channel(&self, channel: &Value) -> PlotResult<Option<TrajectoryRecord>> {
        if channel.get(keys::PLAN_FAILED_REASONS).is_none() {
            return Ok(None);
        }
        let channel = TrajectoryChannel::deserialize(channel).map_err(|err| {
            PlotError::SchemaViolation(format!("{} channel: {err}", self.topic))
        })?;

        let Some(failure_reasons) = channel.plan_failed_reasons else {
            return Ok(None);
        };
        let car_location = channel
            .car_loc
            .ok_or_else(|| missing_key("car_loc"))?
            .into_pose(0.0, 0.0);
        let parking_lot = channel
            .parking_space
            .ok_or_else(|| missing_key("parking_space"))?
            .into();
        let raw_message = channel
            .output_messages
            .as_deref()
            .and_then(<[String]>::first)
            .ok_or_else(|| missing_key("output_messages[0]"))?;

        let blocks = MessageBlockExtractor::extract(split_output_message(raw_message))?;
        let expected = ExpectedPayload::from_value(&blocks.expect)?;
        let actual = TrackPayload::from_value(&blocks.actual)?;
        debug!(
            expected_tracks = expected.len(),
            reason_sets = failure_reasons.len(),
            "decoded trajectory messages"
        );

        TrajectoryRecord::new(
            failure_reasons,
            car_location,
            parking_lot,
            expected.into_tracks(),
            actual.into_track(),
        )
        .map(Some)
    }
}

fn read_identity(case: &Value) -> PlotResult<CaseIdentity> {
    let descriptions = case
        .get(keys::DESCRIPTIONS)
        .or_else(|| case.get(keys::DESCRIPTIONS_LEGACY))
        .filter(|value| value.is_object())
        .ok_or_else(|| missing_key(keys::DESCRIPTIONS))?;
    let case_id = descriptions
        .get(keys::CASE_ID)
        .and_then(Value::as_str)
        .ok_or_else(|| missing_key(keys::CASE_ID))?;
    let description = descriptions
        .get(keys::DESCRIPTION)
        .and_then(Value::as_str)
        .ok_or_else(|| missing_key(keys::DESCRIPTION))?;
    Ok(CaseIdentity::new(case_id, description))
}

fn missing_key(key: &str) -> PlotError {
    PlotError::SchemaViolation(format!("missing or mistyped key `{key}`"))
}
