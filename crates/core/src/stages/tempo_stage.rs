use std::path::Path;

use super::run_operation;
use crate::engine::domain::operation::OperationSpec;
use crate::engine::domain::stage_result::StageResult;
use crate::engine::domain::transform_engine::TransformEngine;

/// Pitch-preserving tempo shift. Always the first stage.
pub struct TempoStage {
    factor: f64,
}

impl TempoStage {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    pub fn operation(&self) -> OperationSpec {
        OperationSpec::Tempo {
            factor: self.factor,
        }
    }

    pub fn apply(&self, engine: &dyn TransformEngine, input: &Path, target: &Path) -> StageResult {
        run_operation(engine, &[input], target, &self.operation())
    }
}
