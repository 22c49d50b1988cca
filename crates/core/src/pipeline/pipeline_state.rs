/// Position of a run in the fixed stage sequence.
///
/// `Tempo → Pitch → Noise → Equalize → Loop → Done`, where `Equalize` is
/// bypassed when EQ is skipped. `Loop` either loops into the final output or
/// promotes the last artifact to it. `Failed` absorbs from any active state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Tempo,
    Pitch,
    Noise,
    Equalize,
    Loop,
    Done,
    Failed {
        stage: &'static str,
        diagnostic: String,
    },
}

/// A state in which a stage still has to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStage {
    Tempo,
    Pitch,
    Noise,
    Equalize,
    Loop,
}

impl PipelineState {
    /// The stage to run next, or `None` once the run has ended.
    pub fn active_stage(&self) -> Option<ActiveStage> {
        match self {
            PipelineState::Tempo => Some(ActiveStage::Tempo),
            PipelineState::Pitch => Some(ActiveStage::Pitch),
            PipelineState::Noise => Some(ActiveStage::Noise),
            PipelineState::Equalize => Some(ActiveStage::Equalize),
            PipelineState::Loop => Some(ActiveStage::Loop),
            PipelineState::Done | PipelineState::Failed { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Tempo => "tempo",
            PipelineState::Pitch => "pitch",
            PipelineState::Noise => "noise",
            PipelineState::Equalize => "equalize",
            PipelineState::Loop => "loop",
            PipelineState::Done => "done",
            PipelineState::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed { .. })
    }

    /// Successor after the current stage succeeded. Terminal states stay put.
    pub fn next(&self, skip_eq: bool) -> PipelineState {
        match self {
            PipelineState::Tempo => PipelineState::Pitch,
            PipelineState::Pitch => PipelineState::Noise,
            PipelineState::Noise if skip_eq => PipelineState::Loop,
            PipelineState::Noise => PipelineState::Equalize,
            PipelineState::Equalize => PipelineState::Loop,
            PipelineState::Loop => PipelineState::Done,
            terminal => terminal.clone(),
        }
    }

    /// Transition taken when the current stage reported failure.
    pub fn fail(&self, diagnostic: String) -> PipelineState {
        if self.is_terminal() {
            return self.clone();
        }
        PipelineState::Failed {
            stage: self.name(),
            diagnostic,
        }
    }
}
