use std::path::Path;

use super::run_operation;
use crate::engine::domain::operation::OperationSpec;
use crate::engine::domain::stage_result::StageResult;
use crate::engine::domain::transform_engine::TransformEngine;
use crate::shared::constants::REFERENCE_SAMPLE_RATE;

/// Pitch shift by playback-rate reinterpretation followed by resampling back
/// to the reference rate.
///
/// This also scales duration by `1 / factor`. Always runs after the tempo stage.
pub struct PitchStage {
    factor: f64,
    reference_rate: u32,
}

impl PitchStage {
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            reference_rate: REFERENCE_SAMPLE_RATE,
        }
    }

    pub fn operation(&self) -> OperationSpec {
        OperationSpec::Pitch {
            factor: self.factor,
            reference_rate: self.reference_rate,
        }
    }

    pub fn apply(&self, engine: &dyn TransformEngine, input: &Path, target: &Path) -> StageResult {
        run_operation(engine, &[input], target, &self.operation())
    }
}
