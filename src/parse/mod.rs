//! Decoding of integration-test result documents into trajectory records.

pub mod keys;
mod mapper;
mod message_block;
mod payload;
mod selector;

pub use mapper::TrajectoryMapper;
pub use message_block::{
    ACTUAL_MARKER, EXPECT_MARKER, ExtractorState, MessageBlockExtractor, MessageBlocks,
    split_output_message,
};
pub use payload::{ExpectedPayload, TrackPayload};
pub use selector::CaseSelector;
