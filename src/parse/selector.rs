use serde_json::Value;

use crate::core::CaseResult;
use crate::error::{PlotError, PlotResult};
use crate::parse::keys;
use crate::parse::mapper::TrajectoryMapper;

/// Walks the test cases of a result document in document order.
#[derive(Debug, Clone, Default)]
pub struct CaseSelector {
    mapper: TrajectoryMapper,
}

impl CaseSelector {
    #[must_use]
    pub fn new(mapper: TrajectoryMapper) -> Self {
        Self { mapper }
    }

    #[must_use]
    pub fn mapper(&self) -> &TrajectoryMapper {
        &self.mapper
    }

    /// Returns the raw test-case list of `document`.
    pub fn test_cases<'a>(&self, document: &'a Value) -> PlotResult<&'a [Value]> {
        document
            .get(keys::TEST_CASES)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                PlotError::SchemaViolation(format!(
                    "result document has no `{}` array",
                    keys::TEST_CASES
                ))
            })
    }

    /// Lazily maps every test case. Each item carries its own result so one
    /// broken case never hides the others.
    pub fn cases<'a>(
        &'a self,
        document: &'a Value,
    ) -> PlotResult<impl Iterator<Item = PlotResult<CaseResult>> + 'a> {
        let cases = self.test_cases(document)?;
        Ok(cases.iter().map(|case| self.mapper.map_case(case)))
    }

    pub fn select(&self, document: &Value) -> PlotResult<Vec<PlotResult<CaseResult>>> {
        Ok(self.cases(document)?.collect())
    }
}
