use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use lofi_core::artifacts::artifact_manager::ArtifactManager;
use lofi_core::engine::domain::transform_engine::TransformEngine;
use lofi_core::engine::infrastructure::ffmpeg_cli_engine::FfmpegCliEngine;
use lofi_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use lofi_core::pipeline::process_audio_use_case::{ProcessAudioUseCase, RunTarget};
use lofi_core::pipeline::process_folder_use_case::ProcessFolderUseCase;
use lofi_core::shared::constants::DEFAULT_MUSIC_DIR;
use lofi_core::shared::pipeline_error::PipelineError;
use lofi_core::shared::settings::Settings;

/// Turns audio files into slowed, detuned, textured lo-fi versions.
#[derive(Parser, Debug)]
#[command(name = "lofi-process")]
struct Cli {
    /// Input audio file (required unless --music-folder is used).
    input: Option<PathBuf>,

    /// Output file (default: <input>_processed.wav in the current directory).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process every audio file in the music directory instead of one file.
    #[arg(long)]
    music_folder: bool,

    /// Directory scanned by --music-folder.
    #[arg(long, default_value = DEFAULT_MUSIC_DIR)]
    music_dir: PathBuf,

    /// Tempo factor (recommended 0.97-1.03).
    #[arg(long)]
    tempo: Option<f64>,

    /// Pitch factor (recommended 0.99-1.01).
    #[arg(long)]
    pitch: Option<f64>,

    /// Rain noise bed.
    #[arg(long)]
    rain: Option<PathBuf>,

    /// Vinyl crackle noise bed.
    #[arg(long)]
    vinyl: Option<PathBuf>,

    /// Rain layer volume (0.0-1.0).
    #[arg(long)]
    rain_volume: Option<f64>,

    /// Vinyl layer volume (0.0-1.0).
    #[arg(long)]
    vinyl_volume: Option<f64>,

    /// Repeat the finished track N extra times (0 disables looping).
    #[arg(long = "loop", value_name = "N")]
    loop_count: Option<u32>,

    /// Request a plain repeat instead of a crossfaded loop.
    #[arg(long)]
    no_crossfade: bool,

    /// Keep intermediate files after processing.
    #[arg(long)]
    keep_intermediate: bool,

    /// Skip the EQ stage.
    #[arg(long)]
    skip_eq: bool,

    /// ffmpeg program name or path.
    #[arg(long)]
    ffmpeg: Option<String>,

    /// Settings file (default: the platform config directory).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save_settings: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    apply_overrides(&cli, &mut settings);

    if cli.save_settings {
        let path = cli.settings.clone().or_else(Settings::config_path);
        match path {
            Some(path) => {
                settings.save_to(&path)?;
                log::info!("Settings saved to {}", path.display());
            }
            None => log::warn!("No config directory available, settings not saved"),
        }
    }

    let engine = FfmpegCliEngine::with_program(&settings.engine_program);
    engine.probe()?;
    let use_case = ProcessAudioUseCase::new(Box::new(engine), settings.parameters);
    let mut logger = StdoutPipelineLogger::new();

    if cli.music_folder {
        run_batch(use_case, &cli.music_dir, &mut logger)?;
    } else if let Some(input) = &cli.input {
        run_single(&use_case, input, cli.output.as_deref(), &mut logger)?;
    }

    logger.summary();
    Ok(())
}

fn run_single(
    use_case: &ProcessAudioUseCase,
    input: &Path,
    output: Option<&Path>,
    logger: &mut dyn PipelineLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = match output {
        Some(output) => RunTarget::new(input, output),
        None => {
            let target = RunTarget::new(input, Path::new(""));
            let output = ArtifactManager::default_output(Path::new(""), &target.base_name);
            RunTarget { output, ..target }
        }
    };

    logger.progress(1, 1);
    let output = use_case.run(&target, logger)?;
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_batch(
    use_case: ProcessAudioUseCase,
    dir: &Path,
    logger: &mut dyn PipelineLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = ProcessFolderUseCase::new(use_case).run(dir, logger)?;
    for failure in report.failures() {
        log::warn!("Failed: {}", failure.input_path.display());
    }
    log::info!("Processed {} file(s) successfully", report.summary());
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.music_folder {
        if cli.input.is_some() || cli.output.is_some() {
            return Err("INPUT and --output cannot be combined with --music-folder".into());
        }
        return Ok(());
    }
    match &cli.input {
        None => Err("Input file is required unless --music-folder is used".into()),
        Some(input) if !input.exists() => Err(PipelineError::InputNotFound(input.clone()).into()),
        Some(_) => Ok(()),
    }
}

/// Command-line flags win over whatever the settings file holds.
fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    let params = &mut settings.parameters;
    if let Some(tempo) = cli.tempo {
        params.tempo_factor = tempo;
    }
    if let Some(pitch) = cli.pitch {
        params.pitch_factor = pitch;
    }
    if let Some(rain) = &cli.rain {
        params.rain_asset = Some(rain.clone());
    }
    if let Some(vinyl) = &cli.vinyl {
        params.vinyl_asset = Some(vinyl.clone());
    }
    if let Some(volume) = cli.rain_volume {
        params.rain_volume = volume;
    }
    if let Some(volume) = cli.vinyl_volume {
        params.vinyl_volume = volume;
    }
    if let Some(count) = cli.loop_count {
        params.loop_count = Some(count);
    }
    if cli.no_crossfade {
        params.crossfade = false;
    }
    if cli.keep_intermediate {
        params.keep_intermediates = true;
    }
    if cli.skip_eq {
        params.skip_eq = true;
    }
    if let Some(program) = &cli.ffmpeg {
        settings.engine_program = program.clone();
    }
}
