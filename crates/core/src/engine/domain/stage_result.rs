use std::path::{Path, PathBuf};

/// Outcome of one stage invocation, consumed by the orchestrator to decide
/// whether to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult {
    pub success: bool,
    pub output_path: Option<PathBuf>,
    pub diagnostic: Option<String>,
}

impl StageResult {
    pub fn succeeded(output: &Path) -> Self {
        Self {
            success: true,
            output_path: Some(output.to_path_buf()),
            diagnostic: None,
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            output_path: None,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Diagnostic text, or a generic note when the engine gave none.
    pub fn diagnostic_or_default(&self) -> String {
        self.diagnostic
            .clone()
            .unwrap_or_else(|| "no diagnostic output".to_string())
    }
}
