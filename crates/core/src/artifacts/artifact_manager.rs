use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::shared::constants::{PROCESSED_SUFFIX, WORKING_EXTENSION};
use crate::shared::pipeline_error::PipelineError;

/// Identifies which intermediate a path belongs to. Unique per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactTag {
    Tempo,
    Pitch,
    Rain,
    Textured,
    Final,
}

impl ArtifactTag {
    pub const ALL: &[ArtifactTag] = &[
        ArtifactTag::Tempo,
        ArtifactTag::Pitch,
        ArtifactTag::Rain,
        ArtifactTag::Textured,
        ArtifactTag::Final,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactTag::Tempo => "tempo",
            ArtifactTag::Pitch => "pitch",
            ArtifactTag::Rain => "rain",
            ArtifactTag::Textured => "textured",
            ArtifactTag::Final => "final",
        }
    }
}

/// Allocates deterministic intermediate paths for one input.
///
/// The path for tag `T` of base name `B` in work directory `D` is always
/// `D/B_T.wav`, so re-runs land on the same files and two inputs with
/// different base names never collide.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    work_dir: PathBuf,
    base_name: String,
}

impl ArtifactManager {
    pub fn new(work_dir: &Path, base_name: &str) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            base_name: base_name.to_string(),
        }
    }

    pub fn path_for(&self, tag: ArtifactTag) -> PathBuf {
        self.work_dir.join(format!(
            "{}_{}.{}",
            self.base_name,
            tag.as_str(),
            WORKING_EXTENSION
        ))
    }

    /// `<dir>/<base_name>_processed.wav`.
    pub fn default_output(dir: &Path, base_name: &str) -> PathBuf {
        dir.join(format!("{base_name}{PROCESSED_SUFFIX}.{WORKING_EXTENSION}"))
    }
}

/// What a cleanup pass removed and what it could not.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<PipelineError>,
}

/// Removes exactly the given paths. Paths already gone are skipped; any other
/// failure is logged and recorded, never propagated.
pub fn cleanup(paths: &[PathBuf]) -> CleanupReport {
    let mut report = CleanupReport::default();
    if paths.is_empty() {
        return report;
    }
    log::info!("Cleaning up intermediate files...");
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => {
                log::info!("  Removed: {}", path.display());
                report.removed.push(path.clone());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                let failure = PipelineError::Cleanup {
                    path: path.clone(),
                    source,
                };
                log::warn!("{failure}");
                report.failures.push(failure);
            }
        }
    }
    report
}

/// Moves an artifact to a new path without re-encoding.
///
/// Falls back to copy-then-delete when a plain rename is refused, e.g. across
/// filesystems.
pub fn promote(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}
