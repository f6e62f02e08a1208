//! trajectory-plot: diagnostic diagrams for planning integration tests.
//!
//! Failing test cases of a result document carry the planner's expected and
//! actual trajectories as JSON embedded in log text. This crate extracts those
//! payloads, maps them into typed poses and tracks, and draws one image per
//! expected track next to the actual one, the car and the parking space.

pub mod core;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod telemetry;

pub use error::{PlotError, PlotResult};
pub use pipeline::{PosePlotter, RunSummary};
