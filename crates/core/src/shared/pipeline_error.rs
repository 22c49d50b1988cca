use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the pipeline and its drivers.
///
/// Only `EngineUnavailable` and `StageExecution` end a run. `MissingOptionalAsset`
/// and `Cleanup` are reported as warnings and never change an outcome.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("transformation engine '{program}' is unavailable: {reason}")]
    EngineUnavailable { program: String, reason: String },
    #[error("{stage} stage failed: {diagnostic}")]
    StageExecution {
        stage: &'static str,
        diagnostic: String,
    },
    #[error("{layer} asset '{}' not found, skipping layer", .path.display())]
    MissingOptionalAsset { layer: &'static str, path: PathBuf },
    #[error("could not remove intermediate {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),
    #[error("no audio files found in {}", .0.display())]
    NoAudioFiles(PathBuf),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_stage_execution_message_names_stage() {
        let err = PipelineError::StageExecution {
            stage: "pitch",
            diagnostic: "Invalid data found when processing input".to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("pitch stage failed"));
        assert!(text.contains("Invalid data"));
    }

    #[test]
    fn test_missing_asset_message_includes_path() {
        let err = PipelineError::MissingOptionalAsset {
            layer: "rain",
            path: PathBuf::from("assets/rain.wav"),
        };
        assert_eq!(
            err.to_string(),
            "rain asset 'assets/rain.wav' not found, skipping layer"
        );
    }

    #[test]
    fn test_cleanup_message_keeps_io_source() {
        let err = PipelineError::Cleanup {
            path: PathBuf::from("a_tempo.wav"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "could not remove intermediate a_tempo.wav: denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_engine_unavailable_names_program() {
        let err = PipelineError::EngineUnavailable {
            program: "ffmpeg".to_string(),
            reason: "not found".to_string(),
        };
        assert!(err.to_string().contains("'ffmpeg'"));
    }
}
