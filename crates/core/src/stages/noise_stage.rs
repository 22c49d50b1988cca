use std::path::{Path, PathBuf};

use super::run_operation;
use crate::artifacts::artifact_manager::promote;
use crate::engine::domain::operation::OperationSpec;
use crate::engine::domain::stage_result::StageResult;
use crate::engine::domain::transform_engine::TransformEngine;
use crate::shared::pipeline_error::PipelineError;
use crate::shared::transform_parameters::TransformParameters;

/// An additive noise bed that exists on disk and will be mixed in.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseLayer {
    pub path: PathBuf,
    pub volume: f64,
}

impl NoiseLayer {
    /// Returns the layer only when an asset path is given and the file exists.
    ///
    /// A given-but-missing asset is logged as a warning and treated as absent.
    pub fn resolve(layer: &'static str, path: Option<&Path>, volume: f64) -> Option<Self> {
        let path = path?;
        if path.exists() {
            return Some(Self {
                path: path.to_path_buf(),
                volume,
            });
        }
        let warning = PipelineError::MissingOptionalAsset {
            layer,
            path: path.to_path_buf(),
        };
        log::warn!("{warning}");
        None
    }
}

/// Decision table over which noise layers are available.
///
/// | rain | vinyl | plan           |
/// |------|-------|----------------|
/// | yes  | yes   | `RainThenVinyl`: mix rain into an intermediate, mix vinyl over it into the target |
/// | yes  | no    | `RainOnly`: mix rain into an intermediate, rename it to the target |
/// | no   | yes   | `VinylOnly`: mix vinyl over the input into the target |
/// | no   | no    | `Passthrough`: re-encode the input into the target |
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoisePlan<'a> {
    RainThenVinyl {
        rain: &'a NoiseLayer,
        vinyl: &'a NoiseLayer,
    },
    RainOnly {
        rain: &'a NoiseLayer,
    },
    VinylOnly {
        vinyl: &'a NoiseLayer,
    },
    Passthrough,
}

impl<'a> NoisePlan<'a> {
    pub fn from_availability(rain: Option<&'a NoiseLayer>, vinyl: Option<&'a NoiseLayer>) -> Self {
        match (rain, vinyl) {
            (Some(rain), Some(vinyl)) => NoisePlan::RainThenVinyl { rain, vinyl },
            (Some(rain), None) => NoisePlan::RainOnly { rain },
            (None, Some(vinyl)) => NoisePlan::VinylOnly { vinyl },
            (None, None) => NoisePlan::Passthrough,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NoisePlan::RainThenVinyl { .. } => "rain then vinyl",
            NoisePlan::RainOnly { .. } => "rain only",
            NoisePlan::VinylOnly { .. } => "vinyl only",
            NoisePlan::Passthrough => "passthrough",
        }
    }

    /// Whether this plan writes the rain-mixed intermediate.
    pub fn mixes_rain(&self) -> bool {
        matches!(
            self,
            NoisePlan::RainThenVinyl { .. } | NoisePlan::RainOnly { .. }
        )
    }

    /// Number of engine invocations the plan performs.
    pub fn engine_calls(&self) -> usize {
        match self {
            NoisePlan::RainThenVinyl { .. } => 2,
            NoisePlan::RainOnly { .. } | NoisePlan::VinylOnly { .. } | NoisePlan::Passthrough => 1,
        }
    }
}

/// Layers rain and vinyl noise over the signal. Always leaves a file at the
/// target on success, even when no layer is available.
pub struct NoiseStage {
    rain: Option<NoiseLayer>,
    vinyl: Option<NoiseLayer>,
}

impl NoiseStage {
    pub fn new(rain: Option<NoiseLayer>, vinyl: Option<NoiseLayer>) -> Self {
        Self { rain, vinyl }
    }

    pub fn from_parameters(params: &TransformParameters) -> Self {
        Self::new(
            NoiseLayer::resolve("Rain", params.rain_asset.as_deref(), params.rain_volume),
            NoiseLayer::resolve("Vinyl", params.vinyl_asset.as_deref(), params.vinyl_volume),
        )
    }

    pub fn plan(&self) -> NoisePlan<'_> {
        NoisePlan::from_availability(self.rain.as_ref(), self.vinyl.as_ref())
    }

    /// Runs the plan. `rain_mix` is where the rain-mixed intermediate goes
    /// when the plan needs one.
    pub fn apply(
        &self,
        engine: &dyn TransformEngine,
        input: &Path,
        target: &Path,
        rain_mix: &Path,
    ) -> StageResult {
        let plan = self.plan();
        log::debug!(
            "Noise plan: {} ({} engine call(s))",
            plan.name(),
            plan.engine_calls()
        );
        match plan {
            NoisePlan::RainThenVinyl { rain, vinyl } => {
                let mixed = mix(engine, input, rain, rain_mix);
                if !mixed.success {
                    return mixed;
                }
                mix(engine, rain_mix, vinyl, target)
            }
            NoisePlan::RainOnly { rain } => {
                let mixed = mix(engine, input, rain, rain_mix);
                if !mixed.success {
                    return mixed;
                }
                match promote(rain_mix, target) {
                    Ok(()) => StageResult::succeeded(target),
                    Err(e) => StageResult::failed(format!(
                        "could not move {} to {}: {e}",
                        rain_mix.display(),
                        target.display()
                    )),
                }
            }
            NoisePlan::VinylOnly { vinyl } => mix(engine, input, vinyl, target),
            NoisePlan::Passthrough => {
                run_operation(engine, &[input], target, &OperationSpec::Transcode)
            }
        }
    }
}

fn mix(engine: &dyn TransformEngine, signal: &Path, layer: &NoiseLayer, target: &Path) -> StageResult {
    log::info!("Layering {}", layer.path.display());
    run_operation(
        engine,
        &[signal, layer.path.as_path()],
        target,
        &OperationSpec::Mix {
            volume: layer.volume,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeEngine;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        input: PathBuf,
        target: PathBuf,
        rain_mix: PathBuf,
        rain_asset: PathBuf,
        vinyl_asset: PathBuf,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("song_pitch.wav");
        let rain_asset = tmp.path().join("rain.wav");
        let vinyl_asset = tmp.path().join("vinyl.wav");
        fs::write(&input, "song").unwrap();
        fs::write(&rain_asset, "RAIN").unwrap();
        fs::write(&vinyl_asset, "VINYL").unwrap();
        Fixture {
            target: tmp.path().join("song_textured.wav"),
            rain_mix: tmp.path().join("song_rain.wav"),
            input,
            rain_asset,
            vinyl_asset,
            _tmp: tmp,
        }
    }

    fn stage(fx: &Fixture, rain: bool, vinyl: bool) -> NoiseStage {
        let rain = rain.then(|| NoiseLayer {
            path: fx.rain_asset.clone(),
            volume: 0.05,
        });
        let vinyl = vinyl.then(|| NoiseLayer {
            path: fx.vinyl_asset.clone(),
            volume: 0.03,
        });
        NoiseStage::new(rain, vinyl)
    }

    // ── Decision table ───────────────────────────────────────────────

    #[rstest]
    #[case::both(true, true, "rain then vinyl", 2, true)]
    #[case::rain_only(true, false, "rain only", 1, true)]
    #[case::vinyl_only(false, true, "vinyl only", 1, false)]
    #[case::neither(false, false, "passthrough", 1, false)]
    fn test_plan_from_availability(
        #[case] rain: bool,
        #[case] vinyl: bool,
        #[case] name: &str,
        #[case] calls: usize,
        #[case] mixes_rain: bool,
    ) {
        let fx = fixture();
        let stage = stage(&fx, rain, vinyl);
        let plan = stage.plan();
        assert_eq!(plan.name(), name);
        assert_eq!(plan.engine_calls(), calls);
        assert_eq!(plan.mixes_rain(), mixes_rain);
    }

    #[test]
    fn test_plan_carries_the_layers_it_mixes() {
        let fx = fixture();
        let stage = stage(&fx, true, true);
        match stage.plan() {
            NoisePlan::RainThenVinyl { rain, vinyl } => {
                assert_eq!(rain.path, fx.rain_asset);
                assert_eq!(vinyl.path, fx.vinyl_asset);
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[rstest]
    #[case::both(true, true, "mix(mix(song+RAIN)+VINYL)", vec!["mix", "mix"])]
    #[case::rain_only(true, false, "mix(song+RAIN)", vec!["mix"])]
    #[case::vinyl_only(false, true, "mix(song+VINYL)", vec!["mix"])]
    #[case::neither(false, false, "transcode(song)", vec!["transcode"])]
    fn test_every_cell_produces_target(
        #[case] rain: bool,
        #[case] vinyl: bool,
        #[case] expected: &str,
        #[case] tags: Vec<&str>,
    ) {
        let fx = fixture();
        let engine = FakeEngine::new();
        let stage = stage(&fx, rain, vinyl);

        let result = stage.apply(&engine, &fx.input, &fx.target, &fx.rain_mix);

        assert!(result.success);
        assert_eq!(result.output_path.as_deref(), Some(fx.target.as_path()));
        assert_eq!(fs::read_to_string(&fx.target).unwrap(), expected);
        assert_eq!(engine.tags(), tags);
        assert_eq!(engine.tags().len(), stage.plan().engine_calls());
    }

    #[test]
    fn test_rain_only_renames_rather_than_reencodes() {
        let fx = fixture();
        let engine = FakeEngine::new();

        stage(&fx, true, false).apply(&engine, &fx.input, &fx.target, &fx.rain_mix);

        assert!(!fx.rain_mix.exists());
        assert!(fx.target.exists());
        assert!(!engine.tags().contains(&"transcode"));
    }

    #[test]
    fn test_rain_then_vinyl_leaves_rain_intermediate() {
        let fx = fixture();
        let engine = FakeEngine::new();

        stage(&fx, true, true).apply(&engine, &fx.input, &fx.target, &fx.rain_mix);

        assert_eq!(fs::read_to_string(&fx.rain_mix).unwrap(), "mix(song+RAIN)");
    }

    #[test]
    fn test_rain_failure_stops_before_vinyl() {
        let fx = fixture();
        let engine = FakeEngine::new().failing_on("mix");

        let result = stage(&fx, true, true).apply(&engine, &fx.input, &fx.target, &fx.rain_mix);

        assert!(!result.success);
        assert_eq!(engine.tags(), vec!["mix"]);
        assert!(!fx.target.exists());
    }

    // ── Asset resolution ─────────────────────────────────────────────

    #[test]
    fn test_missing_asset_resolves_to_none() {
        let fx = fixture();
        let missing = fx.rain_asset.with_file_name("storm.wav");
        assert!(NoiseLayer::resolve("Rain", Some(&missing), 0.05).is_none());
    }

    #[test]
    fn test_absent_asset_resolves_to_none() {
        assert!(NoiseLayer::resolve("Vinyl", None, 0.03).is_none());
    }

    #[test]
    fn test_from_parameters_degrades_missing_layers() {
        let fx = fixture();
        let params = TransformParameters {
            rain_asset: Some(fx.rain_asset.with_file_name("missing.wav")),
            vinyl_asset: Some(fx.vinyl_asset.clone()),
            ..TransformParameters::default()
        };

        let stage = NoiseStage::from_parameters(&params);

        assert!(matches!(stage.plan(), NoisePlan::VinylOnly { .. }));
    }
}
