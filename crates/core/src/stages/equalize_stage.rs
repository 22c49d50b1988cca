use std::path::Path;

use super::run_operation;
use crate::engine::domain::operation::{EqBand, OperationSpec};
use crate::engine::domain::stage_result::StageResult;
use crate::engine::domain::transform_engine::TransformEngine;

/// Fixed curve: cut harsh mids around 3 kHz, add warmth around 150 Hz.
pub const EQ_BANDS: [EqBand; 2] = [
    EqBand {
        frequency_hz: 3000.0,
        width_q: 1.0,
        gain_db: -3.0,
    },
    EqBand {
        frequency_hz: 150.0,
        width_q: 1.0,
        gain_db: 2.0,
    },
];

/// Non-parameterized equalization pass.
#[derive(Default)]
pub struct EqualizeStage;

impl EqualizeStage {
    pub fn new() -> Self {
        Self
    }

    pub fn operation(&self) -> OperationSpec {
        OperationSpec::Equalize {
            bands: EQ_BANDS.to_vec(),
        }
    }

    pub fn apply(&self, engine: &dyn TransformEngine, input: &Path, target: &Path) -> StageResult {
        run_operation(engine, &[input], target, &self.operation())
    }
}
