use std::path::Path;

use super::operation::OperationSpec;
use super::stage_result::StageResult;
use crate::shared::pipeline_error::PipelineError;

/// Port to the external audio-transformation engine.
///
/// Implementations translate an [`OperationSpec`] into a concrete invocation,
/// write (or overwrite) `output`, and report success plus any diagnostic text.
/// They perform no retries and no musical validation.
pub trait TransformEngine: Send {
    /// Checks that the engine can be located and started at all.
    fn probe(&self) -> Result<(), PipelineError>;

    /// Runs one operation over the ordered `inputs`, writing `output`.
    fn invoke(&self, inputs: &[&Path], output: &Path, operation: &OperationSpec) -> StageResult;
}
