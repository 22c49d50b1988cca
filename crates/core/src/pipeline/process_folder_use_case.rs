use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::artifacts::artifact_manager::ArtifactManager;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::process_audio_use_case::{ProcessAudioUseCase, RunTarget};
use crate::shared::constants::{AUDIO_EXTENSIONS, PROCESSED_SUFFIX};
use crate::shared::pipeline_error::PipelineError;

/// Result of processing one file of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub input_path: PathBuf,
    pub success: bool,
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    /// `"<successes>/<total>"`.
    pub fn summary(&self) -> String {
        format!("{}/{}", self.success_count(), self.total())
    }
}

/// Runs the single-file pipeline over every audio file in a directory.
///
/// Files are processed sequentially in path order. A failing file is recorded
/// and the batch moves on.
pub struct ProcessFolderUseCase {
    single: ProcessAudioUseCase,
}

impl ProcessFolderUseCase {
    pub fn new(single: ProcessAudioUseCase) -> Self {
        Self { single }
    }

    /// Audio files directly inside `dir`, sorted, excluding earlier outputs.
    pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
        if !dir.is_dir() {
            return Err(PipelineError::FolderNotFound(dir.to_path_buf()));
        }
        let entries = fs::read_dir(dir).map_err(|source| PipelineError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_audio_file(path) && !is_processed_output(path))
            .collect();
        files.sort();
        Ok(files)
    }

    pub fn run(
        &self,
        dir: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<BatchReport, PipelineError> {
        let files = Self::discover(dir)?;
        if files.is_empty() {
            return Err(PipelineError::NoAudioFiles(dir.to_path_buf()));
        }

        let total = files.len();
        logger.info(&format!("Found {total} audio file(s) in {}", dir.display()));

        let mut report = BatchReport::default();
        for (i, (input, base_name)) in assign_base_names(&files).into_iter().enumerate() {
            logger.progress(i + 1, total);
            let output = ArtifactManager::default_output(dir, &base_name);
            let target = RunTarget::new(&input, &output)
                .with_base_name(base_name)
                .with_work_dir(dir);

            let outcome = match self.single.run(&target, logger) {
                Ok(path) => BatchOutcome {
                    input_path: input,
                    success: true,
                    output_path: Some(path),
                },
                Err(e) => {
                    log::error!("Skipping {}: {e}", input.display());
                    BatchOutcome {
                        input_path: input,
                        success: false,
                        output_path: None,
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        logger.info(&format!(
            "Batch complete: {} file(s) processed successfully",
            report.summary()
        ));
        Ok(report)
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn is_processed_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(PROCESSED_SUFFIX))
}

/// Pairs each file with a base name unique within the batch.
///
/// Stems shared by several files get the lowercased source extension
/// appended. A suffixed name that is still taken, by another file's stem or
/// an earlier assignment, gets a counter (`_2`, `_3`, ...) on top.
fn assign_base_names(files: &[PathBuf]) -> Vec<(PathBuf, String)> {
    let stem = |path: &Path| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for file in files {
        *counts.entry(stem(file)).or_default() += 1;
    }
    let mut taken: HashSet<String> = counts
        .iter()
        .filter(|(_, count)| **count == 1)
        .map(|(stem, _)| stem.clone())
        .collect();

    files
        .iter()
        .map(|file| {
            let base = stem(file);
            if counts[&base] == 1 {
                return (file.clone(), base);
            }
            let ext = file
                .extension()
                .map(|e| e.to_string_lossy().to_ascii_lowercase())
                .unwrap_or_default();
            let suffixed = format!("{base}_{ext}");
            let mut candidate = suffixed.clone();
            let mut n = 2;
            while taken.contains(&candidate) {
                candidate = format!("{suffixed}_{n}");
                n += 1;
            }
            taken.insert(candidate.clone());
            (file.clone(), candidate)
        })
        .collect()
}
