use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::engine::domain::operation::OperationSpec;
use crate::engine::domain::stage_result::StageResult;
use crate::engine::domain::transform_engine::TransformEngine;
use crate::shared::pipeline_error::PipelineError;

#[derive(Debug, Clone)]
pub struct Invocation {
    pub tag: &'static str,
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
}

/// Engine double that writes `tag(input+input...)` as the output content so
/// tests can read back exactly which operations produced a file.
///
/// Clones share the recorded calls. Inputs whose content starts with
/// `CORRUPT` fail like an unreadable source would.
#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    calls: Arc<Mutex<Vec<Invocation>>>,
    fail_on: Option<&'static str>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, tag: &'static str) -> Self {
        self.fail_on = Some(tag);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tags(&self) -> Vec<&'static str> {
        self.calls().iter().map(|c| c.tag).collect()
    }
}

impl TransformEngine for FakeEngine {
    fn probe(&self) -> Result<(), PipelineError> {
        Ok(())
    }

    fn invoke(&self, inputs: &[&Path], output: &Path, operation: &OperationSpec) -> StageResult {
        let tag = operation.tag();
        self.calls.lock().unwrap().push(Invocation {
            tag,
            inputs: inputs.iter().map(|p| p.to_path_buf()).collect(),
            output: output.to_path_buf(),
        });

        if self.fail_on == Some(tag) {
            return StageResult::failed(format!("{tag} failed"));
        }

        let mut contents = Vec::new();
        for input in inputs {
            match fs::read_to_string(input) {
                Ok(text) if text.starts_with("CORRUPT") => {
                    return StageResult::failed(format!("{}: invalid data", input.display()))
                }
                Ok(text) => contents.push(text),
                Err(e) => return StageResult::failed(format!("{}: {e}", input.display())),
            }
        }

        match fs::write(output, format!("{tag}({})", contents.join("+"))) {
            Ok(()) => StageResult::succeeded(output),
            Err(e) => StageResult::failed(e.to_string()),
        }
    }
}
