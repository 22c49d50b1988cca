use std::path::Path;

use super::run_operation;
use crate::engine::domain::operation::OperationSpec;
use crate::engine::domain::stage_result::StageResult;
use crate::engine::domain::transform_engine::TransformEngine;

/// Repeats the finished track by stream repetition with a container copy.
///
/// Crossfaded looping is not implemented. A crossfade request is accepted,
/// logged as unsupported, and the plain repeat is used instead.
pub struct LoopStage {
    count: u32,
    crossfade: bool,
}

impl LoopStage {
    /// Returns `None` when looping is disabled (no count, or zero).
    pub fn from_count(count: Option<u32>, crossfade: bool) -> Option<Self> {
        match count {
            Some(count) if count > 0 => Some(Self { count, crossfade }),
            _ => None,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn operation(&self) -> OperationSpec {
        OperationSpec::LoopCopy { count: self.count }
    }

    pub fn apply(&self, engine: &dyn TransformEngine, input: &Path, target: &Path) -> StageResult {
        if self.crossfade {
            log::warn!("Crossfaded looping is not supported, repeating the stream without crossfade");
        }
        run_operation(engine, &[input], target, &self.operation())
    }
}
