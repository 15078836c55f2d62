//! Generation and scoring parameters
//!
//! Built once before a round and read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Thresholds used when scoring an attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Required trace samples as a fraction of track length
    pub min_coverage_fraction: f32,
    /// Max distance between the trace end and the ideal line start
    pub closed_loop_tolerance: f32,
    /// Average deviation at which accuracy drops to zero
    pub max_acceptable_deviation: f32,
    /// Samples per 100 units of path length before the smoothness penalty kicks in
    pub max_point_density: f32,
    /// Time (seconds) that earns the full time score
    pub target_time: f32,
    /// A sample farther than this from both boundaries is off the track
    pub off_track_tolerance: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_coverage_fraction: 0.98,
            closed_loop_tolerance: 30.0,
            max_acceptable_deviation: 50.0,
            max_point_density: 25.0,
            target_time: 60.0,
            off_track_tolerance: 10.0,
        }
    }
}

/// Full game configuration.
///
/// With the defaults a centerline point sits `track_width / 2` (12.5) from both boundaries,
/// which is past `scoring.off_track_tolerance` (10). Tracing the middle of the track, or an
/// ideal line that falls back to the centerline, is therefore scored as off-track. Raise the
/// tolerance above half the track width for a centerline trace to count as on the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid cells (perfect square)
    pub boxes: u32,
    /// Canvas extent in both axes
    pub canvas_size: f32,
    pub point_probability: f32,
    pub corner_probability: f32,
    pub track_width: f32,
    pub segments_per_span: usize,
    /// Corner detection threshold (radians)
    pub min_corner_angle: f32,
    /// Ticks per second
    pub frame_rate: f32,
    pub scoring: ScoringConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            boxes: BOXES,
            canvas_size: CANVAS_SIZE,
            point_probability: POINT_PROBABILITY,
            corner_probability: CORNER_PROBABILITY,
            track_width: TRACK_WIDTH,
            segments_per_span: SEGMENTS_PER_SPAN,
            min_corner_angle: MIN_CORNER_ANGLE,
            frame_rate: FRAME_RATE,
            scoring: ScoringConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON config (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Grid sections per axis
    pub fn sections(&self) -> u32 {
        (self.boxes as f64).sqrt() as u32
    }

    /// Side length of one grid cell
    pub fn cell_size(&self) -> f32 {
        self.canvas_size / self.sections().max(1) as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sections = self.sections();
        if self.boxes == 0 || sections * sections != self.boxes {
            return Err(ConfigError::invalid(
                "boxes",
                format!("{} is not a non-zero perfect square", self.boxes),
            ));
        }
        positive("canvas_size", self.canvas_size)?;
        positive("track_width", self.track_width)?;
        positive("frame_rate", self.frame_rate)?;
        probability("point_probability", self.point_probability)?;
        probability("corner_probability", self.corner_probability)?;
        if self.segments_per_span == 0 {
            return Err(ConfigError::invalid("segments_per_span", "must be at least 1"));
        }
        if !self.min_corner_angle.is_finite() || self.min_corner_angle < 0.0 {
            return Err(ConfigError::invalid(
                "min_corner_angle",
                format!("{} must be a non-negative angle", self.min_corner_angle),
            ));
        }

        let scoring = &self.scoring;
        probability("scoring.min_coverage_fraction", scoring.min_coverage_fraction)?;
        positive("scoring.closed_loop_tolerance", scoring.closed_loop_tolerance)?;
        positive("scoring.max_acceptable_deviation", scoring.max_acceptable_deviation)?;
        positive("scoring.max_point_density", scoring.max_point_density)?;
        positive("scoring.target_time", scoring.target_time)?;
        positive("scoring.off_track_tolerance", scoring.off_track_tolerance)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be positive")))
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")))
    }
}
