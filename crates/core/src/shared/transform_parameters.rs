use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_PITCH_FACTOR, DEFAULT_RAIN_ASSET, DEFAULT_RAIN_VOLUME, DEFAULT_TEMPO_FACTOR,
    DEFAULT_VINYL_ASSET, DEFAULT_VINYL_VOLUME, PITCH_ADVISORY_RANGE, TEMPO_ADVISORY_RANGE,
    VOLUME_ADVISORY_RANGE,
};

/// Everything a single pipeline run needs to know about how to transform audio.
///
/// Values outside their recommended range are never rejected; see
/// [`TransformParameters::advisories`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParameters {
    pub tempo_factor: f64,
    pub pitch_factor: f64,
    pub rain_asset: Option<PathBuf>,
    pub vinyl_asset: Option<PathBuf>,
    pub rain_volume: f64,
    pub vinyl_volume: f64,
    /// Extra repetitions of the finished track. `None` or zero skips looping.
    pub loop_count: Option<u32>,
    pub crossfade: bool,
    pub skip_eq: bool,
    pub keep_intermediates: bool,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            tempo_factor: DEFAULT_TEMPO_FACTOR,
            pitch_factor: DEFAULT_PITCH_FACTOR,
            rain_asset: Some(PathBuf::from(DEFAULT_RAIN_ASSET)),
            vinyl_asset: Some(PathBuf::from(DEFAULT_VINYL_ASSET)),
            rain_volume: DEFAULT_RAIN_VOLUME,
            vinyl_volume: DEFAULT_VINYL_VOLUME,
            loop_count: None,
            crossfade: true,
            skip_eq: false,
            keep_intermediates: false,
        }
    }
}

impl TransformParameters {
    /// Collects a warning for every numeric field outside its recommended range.
    pub fn advisories(&self) -> Vec<RangeAdvisory> {
        [
            RangeAdvisory::check("Tempo factor", self.tempo_factor, &TEMPO_ADVISORY_RANGE),
            RangeAdvisory::check("Pitch factor", self.pitch_factor, &PITCH_ADVISORY_RANGE),
            RangeAdvisory::check("Rain volume", self.rain_volume, &VOLUME_ADVISORY_RANGE),
            RangeAdvisory::check("Vinyl volume", self.vinyl_volume, &VOLUME_ADVISORY_RANGE),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// A parameter value that lies outside its recommended range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAdvisory {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl RangeAdvisory {
    pub fn check(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Option<Self> {
        if range.contains(&value) {
            return None;
        }
        Some(Self {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

impl fmt::Display for RangeAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is outside recommended range ({}-{})",
            self.field, self.value, self.min, self.max
        )
    }
}
