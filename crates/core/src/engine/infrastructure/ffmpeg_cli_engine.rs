use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::engine::domain::operation::{EqBand, OperationSpec};
use crate::engine::domain::stage_result::StageResult;
use crate::engine::domain::transform_engine::TransformEngine;
use crate::shared::constants::DEFAULT_ENGINE_PROGRAM;
use crate::shared::pipeline_error::PipelineError;

/// Runs operations by spawning the `ffmpeg` command-line program.
///
/// Arguments are passed as a vector, never through a shell, so paths with
/// spaces or quotes need no escaping. Every invocation blocks until ffmpeg
/// exits; stderr is captured as the diagnostic on failure.
pub struct FfmpegCliEngine {
    program: PathBuf,
}

impl FfmpegCliEngine {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_ENGINE_PROGRAM)
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Full argument list for one operation, excluding the program itself.
    pub fn build_args(inputs: &[&Path], output: &Path, operation: &OperationSpec) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-hide_banner".into(), "-nostdin".into()];

        if let OperationSpec::LoopCopy { count } = operation {
            args.push("-stream_loop".into());
            args.push(count.to_string().into());
        }

        for input in inputs {
            args.push("-i".into());
            args.push(input.as_os_str().to_os_string());
        }

        match operation {
            OperationSpec::Tempo { factor } => {
                args.push("-filter:a".into());
                args.push(format!("atempo={factor}").into());
            }
            OperationSpec::Pitch {
                factor,
                reference_rate,
            } => {
                let new_rate = OperationSpec::reinterpreted_rate(*factor, *reference_rate);
                args.push("-filter:a".into());
                args.push(format!("asetrate={new_rate},aresample={reference_rate}").into());
            }
            OperationSpec::Mix { volume } => {
                args.push("-filter_complex".into());
                args.push(format!("[1:a]volume={volume}[a1];[0:a][a1]amix=inputs=2").into());
            }
            OperationSpec::Equalize { bands } => {
                args.push("-filter:a".into());
                args.push(equalizer_chain(bands).into());
            }
            OperationSpec::LoopCopy { .. } => {
                args.push("-c".into());
                args.push("copy".into());
            }
            OperationSpec::Transcode => {}
        }

        args.push("-y".into());
        args.push(output.as_os_str().to_os_string());
        args
    }
}

impl Default for FfmpegCliEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformEngine for FfmpegCliEngine {
    fn probe(&self) -> Result<(), PipelineError> {
        let unavailable = |reason: String| PipelineError::EngineUnavailable {
            program: self.program.display().to_string(),
            reason,
        };
        let status = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| unavailable(e.to_string()))?;
        if !status.success() {
            return Err(unavailable(format!("'-version' exited with {status}")));
        }
        log::debug!("Found transformation engine at {}", self.program.display());
        Ok(())
    }

    fn invoke(&self, inputs: &[&Path], output: &Path, operation: &OperationSpec) -> StageResult {
        let args = Self::build_args(inputs, output, operation);
        log::debug!("Running {} {:?}", self.program.display(), args);

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output();

        match result {
            Ok(out) if out.status.success() => StageResult::succeeded(output),
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                StageResult::failed(format!(
                    "{} {} exited with {}: {}",
                    self.program.display(),
                    operation.tag(),
                    out.status,
                    stderr.trim()
                ))
            }
            Err(e) => StageResult::failed(format!(
                "failed to launch {}: {e}",
                self.program.display()
            )),
        }
    }
}

fn equalizer_chain(bands: &[EqBand]) -> String {
    bands
        .iter()
        .map(|b| {
            format!(
                "equalizer=f={}:t=q:w={}:g={}",
                b.frequency_hz, b.width_q, b.gain_db
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}
