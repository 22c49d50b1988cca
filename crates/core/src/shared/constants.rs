use std::ops::RangeInclusive;

pub const DEFAULT_ENGINE_PROGRAM: &str = "ffmpeg";

/// Rate the pitch stage resamples back to after reinterpreting the input rate.
pub const REFERENCE_SAMPLE_RATE: u32 = 44100;

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "m4a", "aac", "ogg"];

/// Container used for every intermediate and final artifact.
pub const WORKING_EXTENSION: &str = "wav";
pub const PROCESSED_SUFFIX: &str = "_processed";
pub const DEFAULT_MUSIC_DIR: &str = "music";

pub const DEFAULT_TEMPO_FACTOR: f64 = 0.975;
pub const DEFAULT_PITCH_FACTOR: f64 = 0.99;
pub const DEFAULT_RAIN_ASSET: &str = "rain.wav";
pub const DEFAULT_VINYL_ASSET: &str = "vinyl.wav";
pub const DEFAULT_RAIN_VOLUME: f64 = 0.05;
pub const DEFAULT_VINYL_VOLUME: f64 = 0.03;

pub const TEMPO_ADVISORY_RANGE: RangeInclusive<f64> = 0.97..=1.03;
pub const PITCH_ADVISORY_RANGE: RangeInclusive<f64> = 0.99..=1.01;
pub const VOLUME_ADVISORY_RANGE: RangeInclusive<f64> = 0.0..=1.0;
