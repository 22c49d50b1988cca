use std::path::{Path, PathBuf};

/// State threaded through one input's processing.
///
/// Every update consumes the run and returns the next one, so a stage can
/// only see the run it was handed.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    input: PathBuf,
    current_file: PathBuf,
    intermediates: Vec<PathBuf>,
    base_name: String,
    work_dir: PathBuf,
}

impl PipelineRun {
    pub fn start(input: &Path, base_name: &str, work_dir: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            current_file: input.to_path_buf(),
            intermediates: Vec::new(),
            base_name: base_name.to_string(),
            work_dir: work_dir.to_path_buf(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Latest artifact; the input of whichever stage runs next.
    pub fn current_file(&self) -> &Path {
        &self.current_file
    }

    /// Paths created by this run, in creation order.
    pub fn intermediates(&self) -> &[PathBuf] {
        &self.intermediates
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Marks `path` as a temporary artifact of this run. The source input is
    /// never recorded, and a path is recorded at most once.
    #[must_use]
    pub fn record_intermediate(mut self, path: PathBuf) -> Self {
        if path != self.input && !self.intermediates.contains(&path) {
            self.intermediates.push(path);
        }
        self
    }

    #[must_use]
    pub fn with_current(mut self, path: PathBuf) -> Self {
        self.current_file = path;
        self
    }

    /// Drops `path` from the cleanup set, typically because it was promoted
    /// to the final output.
    #[must_use]
    pub fn release(mut self, path: &Path) -> Self {
        self.intermediates.retain(|p| p != path);
        self
    }
}
