//! Stage definitions: each maps its parameters to engine invocations.

pub mod equalize_stage;
pub mod loop_stage;
pub mod noise_stage;
pub mod pitch_stage;
pub mod tempo_stage;

use std::path::Path;

use crate::engine::domain::operation::OperationSpec;
use crate::engine::domain::stage_result::StageResult;
use crate::engine::domain::transform_engine::TransformEngine;

/// Invokes the engine once, logging the operation's progress label.
fn run_operation(
    engine: &dyn TransformEngine,
    inputs: &[&Path],
    output: &Path,
    operation: &OperationSpec,
) -> StageResult {
    let description = operation.description();
    log::info!("{description}...");
    log::debug!("{} parameters: {:?}", operation.tag(), operation.parameters());
    let result = engine.invoke(inputs, output, operation);
    if result.success {
        log::info!("{description} completed");
    } else {
        log::error!(
            "Error during {}: {}",
            description,
            result.diagnostic_or_default()
        );
    }
    result
}
