use serde_json::Value;
use tracing::trace;

use crate::error::{PlotError, PlotResult};

pub const ACTUAL_MARKER: &str = "Actual Message:";
pub const EXPECT_MARKER: &str = "Expect Message:";

/// Scan state of [`MessageBlockExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorState {
    #[default]
    Unknown,
    InActualBlock,
    InExpectBlock,
}

impl ExtractorState {
    /// Pure transition function. Returns the next state and whether `line`
    /// belongs to the block that is currently open.
    #[must_use]
    pub fn next(self, line: &str) -> (Self, bool) {
        let trimmed = line.trim();
        match self {
            Self::Unknown => match trimmed {
                ACTUAL_MARKER => (Self::InActualBlock, false),
                EXPECT_MARKER => (Self::InExpectBlock, false),
                _ => (Self::Unknown, false),
            },
            Self::InActualBlock | Self::InExpectBlock => {
                if trimmed.is_empty() {
                    (Self::Unknown, false)
                } else {
                    (self, true)
                }
            }
        }
    }
}

/// Both embedded payloads of one output message, decoded as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBlocks {
    pub actual: Value,
    pub expect: Value,
}

/// Collects the `Actual Message:` and `Expect Message:` blocks out of log
/// lines.
///
/// A block starts after its marker line and runs until the next blank line or
/// the end of input. Block lines are kept verbatim and concatenated without
/// separators.
#[derive(Debug, Default)]
pub struct MessageBlockExtractor {
    state: ExtractorState,
    actual: String,
    expect: String,
}

impl MessageBlockExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> ExtractorState {
        self.state
    }

    pub fn feed_line(&mut self, line: &str) -> ExtractorState {
        let (next, keep) = self.state.next(line);
        if keep {
            match self.state {
                ExtractorState::InActualBlock => self.actual.push_str(line),
                ExtractorState::InExpectBlock => self.expect.push_str(line),
                ExtractorState::Unknown => {}
            }
        }
        if next != self.state {
            trace!(from = ?self.state, to = ?next, "message block transition");
        }
        self.state = next;
        next
    }

    pub fn feed_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        for line in lines {
            self.feed_line(line);
        }
    }

    #[must_use]
    pub fn actual_text(&self) -> &str {
        &self.actual
    }

    #[must_use]
    pub fn expect_text(&self) -> &str {
        &self.expect
    }

    /// Ends the scan and returns the raw `(actual, expect)` texts. A block still
    /// open at this point is kept as accumulated.
    #[must_use]
    pub fn into_texts(self) -> (String, String) {
        (self.actual, self.expect)
    }

    /// Ends the scan and decodes both blocks.
    pub fn finish(self) -> PlotResult<MessageBlocks> {
        let actual = decode_block("actual", &self.actual)?;
        let expect = decode_block("expect", &self.expect)?;
        Ok(MessageBlocks { actual, expect })
    }

    /// Runs a fresh extractor over `lines` and decodes both blocks.
    pub fn extract<'a>(lines: impl IntoIterator<Item = &'a str>) -> PlotResult<MessageBlocks> {
        let mut extractor = Self::new();
        extractor.feed_lines(lines);
        extractor.finish()
    }
}

/// Splits one `output_messages` entry into log lines.
pub fn split_output_message(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(crate::parse::keys::LINE_BREAK)
}

fn decode_block(name: &str, text: &str) -> PlotResult<Value> {
    if text.is_empty() {
        return Err(PlotError::MalformedPayload(format!(
            "{name} message block is missing or empty"
        )));
    }
    serde_json::from_str(text).map_err(|err| {
        PlotError::MalformedPayload(format!("{name} message block is not valid JSON: {err}"))
    })
}
