//! Attempt scoring
//!
//! Checks run in order and the first failure short-circuits with a fixed low score:
//! coverage, loop closure, off-track. A successful attempt earns
//! `400 + accuracy (up to 720) + time (up to 480) - smoothness penalty`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::track::Boundaries;
use crate::{nearest_distance, polyline_length};

/// Points every finished attempt starts from
pub const BASE_SCORE: i32 = 400;
/// Accuracy score at zero average deviation
pub const ACCURACY_WEIGHT: f32 = 720.0;
/// Time score at or under the target time
pub const TIME_WEIGHT: f32 = 480.0;
/// Penalty per unit of sample density above the limit
pub const DENSITY_PENALTY: f32 = 5.0;
/// Deducted from the base score for leaving the track
pub const OFF_TRACK_PENALTY: i32 = 500;
/// Floor for the traced path length in the density computation
const MIN_PATH_LENGTH: f32 = 1.0;

/// How an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreOutcome {
    TooShort,
    LoopNotClosed,
    OffTrack,
    Success,
}

impl ScoreOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ScoreOutcome::TooShort => "Line is too short.",
            ScoreOutcome::LoopNotClosed => "Line did not close the loop.",
            ScoreOutcome::OffTrack => "You went off the track!",
            ScoreOutcome::Success => "Success!",
        }
    }
}

/// Final score for one attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub accuracy: i32,
    pub time: i32,
    pub total: i32,
    pub message: String,
    pub outcome: ScoreOutcome,
}

impl ScoreResult {
    fn failed(outcome: ScoreOutcome, total: i32) -> Self {
        Self {
            accuracy: 0,
            time: 0,
            total,
            message: outcome.message().to_string(),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ScoreOutcome::Success
    }
}

/// True if `p` is farther than `tolerance` from every sample of both boundaries.
///
/// Proximity to boundary samples only; says nothing about which side of the track `p` is on.
pub fn is_off_track(p: Vec2, boundaries: &Boundaries, tolerance: f32) -> bool {
    nearest_distance(p, &boundaries.outer) > tolerance
        && nearest_distance(p, &boundaries.inner) > tolerance
}

/// Average of each trace point's distance to its nearest ideal-line sample
pub fn average_deviation(trace: &[Vec2], ideal_line: &[Vec2]) -> f32 {
    if trace.is_empty() {
        return 0.0;
    }
    let total: f32 = trace.iter().map(|p| nearest_distance(*p, ideal_line)).sum();
    total / trace.len() as f32
}

/// Samples per 100 units of traced path
pub fn point_density(trace: &[Vec2]) -> f32 {
    let path_length = polyline_length(trace).max(MIN_PATH_LENGTH);
    trace.len() as f32 / path_length * 100.0
}

/// Penalty for tracing too slowly (too many samples per unit of path)
pub fn smoothness_penalty(trace: &[Vec2], max_point_density: f32) -> f32 {
    let density = point_density(trace);
    if density > max_point_density {
        (density - max_point_density) * DENSITY_PENALTY
    } else {
        0.0
    }
}

/// Score a finished attempt.
///
/// `track_length` is the centerline arc length. The coverage check compares the trace's
/// sample count against `track_length * min_coverage_fraction`.
pub fn score_attempt(
    trace: &[Vec2],
    ideal_line: &[Vec2],
    elapsed_seconds: f32,
    track_length: f32,
    boundaries: &Boundaries,
    config: &ScoringConfig,
) -> ScoreResult {
    // Sample count against a length: a unit mismatch kept for score compatibility
    let min_samples = track_length * config.min_coverage_fraction;
    let (Some(&last), Some(&first_ideal)) = (trace.last(), ideal_line.first()) else {
        return ScoreResult::failed(ScoreOutcome::TooShort, BASE_SCORE);
    };
    if (trace.len() as f32) < min_samples {
        return ScoreResult::failed(ScoreOutcome::TooShort, BASE_SCORE);
    }

    if last.distance(first_ideal) > config.closed_loop_tolerance {
        return ScoreResult::failed(ScoreOutcome::LoopNotClosed, BASE_SCORE);
    }

    if let Some(p) = trace
        .iter()
        .find(|p| is_off_track(**p, boundaries, config.off_track_tolerance))
    {
        log::debug!("Trace left the track at ({:.1}, {:.1})", p.x, p.y);
        return ScoreResult::failed(ScoreOutcome::OffTrack, BASE_SCORE - OFF_TRACK_PENALTY);
    }

    let deviation = average_deviation(trace, ideal_line);
    let accuracy_pct = (1.0 - deviation / config.max_acceptable_deviation).max(0.0);
    let accuracy_score = accuracy_pct * ACCURACY_WEIGHT;

    let penalty = smoothness_penalty(trace, config.max_point_density);

    let time_pct = (config.target_time / elapsed_seconds).min(1.0);
    let time_score = time_pct * TIME_WEIGHT;

    let total = BASE_SCORE as f32 + accuracy_score + time_score - penalty;
    log::debug!(
        "deviation {:.2}, accuracy {:.1}, time {:.1}, penalty {:.1}",
        deviation,
        accuracy_score,
        time_score,
        penalty
    );

    ScoreResult {
        accuracy: accuracy_score.round() as i32,
        time: time_score.round() as i32,
        total: total.round() as i32,
        message: ScoreOutcome::Success.message().to_string(),
        outcome: ScoreOutcome::Success,
    }
}
