use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::artifacts::artifact_manager::{cleanup, promote, ArtifactManager, ArtifactTag};
use crate::engine::domain::stage_result::StageResult;
use crate::engine::domain::transform_engine::TransformEngine;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::pipeline_run::PipelineRun;
use crate::pipeline::pipeline_state::{ActiveStage, PipelineState};
use crate::shared::pipeline_error::PipelineError;
use crate::shared::transform_parameters::TransformParameters;
use crate::stages::equalize_stage::EqualizeStage;
use crate::stages::loop_stage::LoopStage;
use crate::stages::noise_stage::NoiseStage;
use crate::stages::pitch_stage::PitchStage;
use crate::stages::tempo_stage::TempoStage;

/// Where one run reads from, writes to, and keeps its intermediates.
#[derive(Debug, Clone, PartialEq)]
pub struct RunTarget {
    pub input: PathBuf,
    pub output: PathBuf,
    pub base_name: String,
    pub work_dir: PathBuf,
}

impl RunTarget {
    /// Base name from the input's stem, intermediates next to the input.
    pub fn new(input: &Path, output: &Path) -> Self {
        let base_name = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        let work_dir = input.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            base_name,
            work_dir,
        }
    }

    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }
}

/// Single-file pipeline: tempo → pitch → noise → EQ → loop.
///
/// Each stage consumes the previous stage's artifact. The first failing stage
/// ends the run; intermediates are cleaned up on both success and failure
/// unless retention was requested.
pub struct ProcessAudioUseCase {
    engine: Box<dyn TransformEngine>,
    params: TransformParameters,
}

impl ProcessAudioUseCase {
    pub fn new(engine: Box<dyn TransformEngine>, params: TransformParameters) -> Self {
        Self { engine, params }
    }

    pub fn parameters(&self) -> &TransformParameters {
        &self.params
    }

    /// Processes one input. Returns the final artifact path on success.
    pub fn run(
        &self,
        target: &RunTarget,
        logger: &mut dyn PipelineLogger,
    ) -> Result<PathBuf, PipelineError> {
        logger.info(&format!("Processing: {}", target.input.display()));
        for advisory in self.params.advisories() {
            log::warn!("{advisory}");
        }

        let artifacts = ArtifactManager::new(&target.work_dir, &target.base_name);
        let mut run = PipelineRun::start(&target.input, &target.base_name, &target.work_dir);
        let mut state = PipelineState::Tempo;

        let outcome = loop {
            let Some(stage) = state.active_stage() else {
                break match state {
                    PipelineState::Failed { stage, diagnostic } => {
                        Err(PipelineError::StageExecution { stage, diagnostic })
                    }
                    _ => Ok(run.current_file().to_path_buf()),
                };
            };
            let started = Instant::now();
            let (next_run, result) = self.execute(stage, run, target, &artifacts);
            logger.timing(state.name(), started.elapsed().as_secs_f64() * 1000.0);
            run = next_run;
            state = if result.success {
                let next = state.next(self.params.skip_eq);
                if stage == ActiveStage::Noise && next == PipelineState::Loop {
                    logger.info("Skipping EQ step");
                }
                next
            } else {
                state.fail(result.diagnostic_or_default())
            };
        };

        // The final output is never an intermediate, even if a caller pointed
        // it at one of the allocated paths.
        let run = run.release(&target.output);
        if self.params.keep_intermediates {
            logger.info("Keeping intermediate files as requested");
        } else {
            let report = cleanup(run.intermediates());
            if !report.failures.is_empty() {
                logger.info(&format!(
                    "{} intermediate file(s) could not be removed",
                    report.failures.len()
                ));
            }
        }

        match &outcome {
            Ok(path) => logger.info(&format!("Processing complete, output: {}", path.display())),
            Err(e) => log::error!("Processing {} failed: {e}", target.input.display()),
        }
        outcome
    }

    fn execute(
        &self,
        stage: ActiveStage,
        run: PipelineRun,
        target: &RunTarget,
        artifacts: &ArtifactManager,
    ) -> (PipelineRun, StageResult) {
        let engine = self.engine.as_ref();
        match stage {
            ActiveStage::Tempo => {
                let stage = TempoStage::new(self.params.tempo_factor);
                produce(run, artifacts.path_for(ArtifactTag::Tempo), |input, output| {
                    stage.apply(engine, input, output)
                })
            }
            ActiveStage::Pitch => {
                let stage = PitchStage::new(self.params.pitch_factor);
                produce(run, artifacts.path_for(ArtifactTag::Pitch), |input, output| {
                    stage.apply(engine, input, output)
                })
            }
            ActiveStage::Noise => {
                let stage = NoiseStage::from_parameters(&self.params);
                let rain_mix = artifacts.path_for(ArtifactTag::Rain);
                let run = if stage.plan().mixes_rain() {
                    warn_if_occupied(&rain_mix);
                    run.record_intermediate(rain_mix.clone())
                } else {
                    run
                };
                produce(run, artifacts.path_for(ArtifactTag::Textured), |input, output| {
                    stage.apply(engine, input, output, &rain_mix)
                })
            }
            ActiveStage::Equalize => {
                let stage = EqualizeStage::new();
                produce(run, artifacts.path_for(ArtifactTag::Final), |input, output| {
                    stage.apply(engine, input, output)
                })
            }
            ActiveStage::Loop => self.finish(run, &target.output),
        }
    }

    /// Loops into the final output, or promotes the last artifact to it.
    fn finish(&self, run: PipelineRun, output: &Path) -> (PipelineRun, StageResult) {
        match LoopStage::from_count(self.params.loop_count, self.params.crossfade) {
            Some(stage) => {
                let result = stage.apply(self.engine.as_ref(), run.current_file(), output);
                if result.success {
                    (run.with_current(output.to_path_buf()), result)
                } else {
                    remove_partial_output(output);
                    (run, result)
                }
            }
            None => {
                let last = run.current_file().to_path_buf();
                if last == output {
                    return (run, StageResult::succeeded(output));
                }
                match promote(&last, output) {
                    Ok(()) => (
                        run.release(&last).with_current(output.to_path_buf()),
                        StageResult::succeeded(output),
                    ),
                    Err(e) => {
                        let result = StageResult::failed(format!(
                            "could not move {} to {}: {e}",
                            last.display(),
                            output.display()
                        ));
                        (run, result)
                    }
                }
            }
        }
    }
}

/// Runs a stage that writes a new intermediate at `path`.
///
/// The path is recorded before the engine runs so a partially written file
/// is cleaned up too.
fn produce(
    run: PipelineRun,
    path: PathBuf,
    apply: impl FnOnce(&Path, &Path) -> StageResult,
) -> (PipelineRun, StageResult) {
    warn_if_occupied(&path);
    let run = run.record_intermediate(path.clone());
    let result = apply(run.current_file(), &path);
    if result.success {
        (run.with_current(path), result)
    } else {
        (run, result)
    }
}

/// Warns when an intermediate path already holds a file. The stage overwrites
/// it and cleanup removes it afterwards. Returns whether the path was taken.
fn warn_if_occupied(path: &Path) -> bool {
    let occupied = path.exists();
    if occupied {
        log::warn!(
            "{} already exists and will be overwritten as an intermediate file",
            path.display()
        );
    }
    occupied
}

fn remove_partial_output(output: &Path) {
    match fs::remove_file(output) {
        Ok(()) => log::debug!("Removed partial output {}", output.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Could not remove partial output {}: {e}", output.display()),
    }
}
