/// One peaking band of the fixed equalizer curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqBand {
    pub frequency_hz: f64,
    /// Bandwidth expressed as a Q factor.
    pub width_q: f64,
    pub gain_db: f64,
}

/// Declarative description of a single engine invocation.
///
/// Carries the operation tag and its named parameters; input and output paths
/// travel alongside it through [`TransformEngine::invoke`](super::transform_engine::TransformEngine::invoke).
#[derive(Debug, Clone, PartialEq)]
pub enum OperationSpec {
    /// Pitch-preserving tempo shift.
    Tempo { factor: f64 },
    /// Rate reinterpretation at `reference_rate * factor`, resampled back to `reference_rate`.
    Pitch { factor: f64, reference_rate: u32 },
    /// Adds the second input on top of the first at `volume` gain.
    Mix { volume: f64 },
    Equalize { bands: Vec<EqBand> },
    /// Repeats the stream `count` extra times without re-encoding.
    LoopCopy { count: u32 },
    /// Plain decode/encode pass into the working container.
    Transcode,
}

impl OperationSpec {
    pub fn tag(&self) -> &'static str {
        match self {
            OperationSpec::Tempo { .. } => "tempo",
            OperationSpec::Pitch { .. } => "pitch",
            OperationSpec::Mix { .. } => "mix",
            OperationSpec::Equalize { .. } => "equalize",
            OperationSpec::LoopCopy { .. } => "loop-copy",
            OperationSpec::Transcode => "transcode",
        }
    }

    /// Sample rate the input is reinterpreted at by a pitch operation, rounded
    /// to whole hertz.
    pub fn reinterpreted_rate(factor: f64, reference_rate: u32) -> u32 {
        (reference_rate as f64 * factor).round() as u32
    }

    /// Named parameters in a stable order, as they cross the engine boundary.
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        match self {
            OperationSpec::Tempo { factor } => vec![("factor", factor.to_string())],
            OperationSpec::Pitch {
                factor,
                reference_rate,
            } => vec![
                ("factor", factor.to_string()),
                (
                    "sample_rate",
                    Self::reinterpreted_rate(*factor, *reference_rate).to_string(),
                ),
                ("reference_rate", reference_rate.to_string()),
            ],
            OperationSpec::Mix { volume } => vec![("volume", volume.to_string())],
            OperationSpec::Equalize { bands } => bands
                .iter()
                .map(|b| ("band", format!("{}Hz q{} {:+}dB", b.frequency_hz, b.width_q, b.gain_db)))
                .collect(),
            OperationSpec::LoopCopy { count } => vec![("count", count.to_string())],
            OperationSpec::Transcode => Vec::new(),
        }
    }

    /// Human-readable progress label.
    pub fn description(&self) -> String {
        match self {
            OperationSpec::Tempo { factor } => {
                format!("Changing tempo by {:.1}%", (factor - 1.0) * 100.0)
            }
            OperationSpec::Pitch { factor, .. } => {
                format!("Changing pitch by {:.1}%", (factor - 1.0) * 100.0)
            }
            OperationSpec::Mix { volume } => format!("Mixing noise layer at volume {volume}"),
            OperationSpec::Equalize { .. } => {
                "Applying EQ (reducing mids, boosting warmth)".to_string()
            }
            OperationSpec::LoopCopy { count } => {
                format!("Creating looped version ({count} loops)")
            }
            OperationSpec::Transcode => "Copying file (no noise layers available)".to_string(),
        }
    }
}
