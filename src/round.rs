//! Round state
//!
//! One round: a track built at the start, a trace that grows while the pointer is held,
//! and a score computed once when the pointer is released.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::polyline_length;
use crate::scoring::{ScoreResult, score_attempt};
use crate::track::{Track, build_track};

/// Read-only pointer queries the round polls once per tick
pub trait PointerSource {
    fn is_pointer_active(&self) -> bool;
    fn current_pointer_position(&self) -> Vec2;
}

/// Pointer snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    pub active: bool,
    pub pos: Vec2,
}

impl PointerInput {
    pub fn pressed(pos: Vec2) -> Self {
        Self { active: true, pos }
    }

    pub fn released() -> Self {
        Self::default()
    }
}

impl PointerSource for PointerInput {
    fn is_pointer_active(&self) -> bool {
        self.active
    }

    fn current_pointer_position(&self) -> Vec2 {
        self.pos
    }
}

/// The player's traced line, in sample order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerTrace {
    points: Vec<Vec2>,
    frozen: bool,
}

impl PlayerTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample; ignored once the trace is frozen
    pub fn record_sample(&mut self, point: Vec2) {
        if !self.frozen {
            self.points.push(point);
        }
    }

    /// Stop accepting samples
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Open polyline length of the samples
    pub fn path_length(&self) -> f32 {
        polyline_length(&self.points)
    }
}

/// Everything a single round owns
#[derive(Debug, Clone)]
pub struct RoundState {
    pub config: GameConfig,
    /// Seed the track was generated from
    pub seed: u64,
    pub track: Track,
    pub trace: PlayerTrace,
    /// Ticks polled so far
    pub tick: u64,
    /// Tick of the first recorded sample
    pub start_tick: Option<u64>,
    /// Tick the pointer was released on
    pub end_tick: Option<u64>,
    score: Option<ScoreResult>,
}

impl RoundState {
    /// Start a round on a freshly generated track
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let track = build_track(&config, &mut rng);
        log::info!(
            "Round started (seed {}): {} control points, length {:.1}",
            seed,
            track.control_points.len(),
            track.length()
        );
        Self::with_track(config, seed, track)
    }

    /// Start a round on an existing track
    pub fn with_track(config: GameConfig, seed: u64, track: Track) -> Self {
        Self {
            config,
            seed,
            track,
            trace: PlayerTrace::new(),
            tick: 0,
            start_tick: None,
            end_tick: None,
            score: None,
        }
    }

    /// Throw the round away and start over on a new track
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(self.config.clone(), seed);
    }

    /// Advance one tick.
    ///
    /// While the round runs, an active pointer appends one sample. Releasing the pointer
    /// after at least one sample freezes the trace and scores it; the score is returned on
    /// that tick only. Releasing with an empty trace does nothing.
    pub fn poll<P: PointerSource + ?Sized>(&mut self, pointer: &P) -> Option<&ScoreResult> {
        self.tick += 1;
        if self.is_over() {
            return None;
        }

        if pointer.is_pointer_active() {
            self.trace.record_sample(pointer.current_pointer_position());
            if self.start_tick.is_none() {
                self.start_tick = Some(self.tick);
            }
            return None;
        }

        if self.trace.is_empty() {
            return None;
        }

        self.trace.freeze();
        self.end_tick = Some(self.tick);
        let elapsed = self.elapsed_seconds();
        let result = score_attempt(
            self.trace.points(),
            &self.track.ideal_line,
            elapsed,
            self.track.length(),
            &self.track.boundaries,
            &self.config.scoring,
        );
        log::info!(
            "Final score: {} (accuracy {}, time {}) - {}",
            result.total,
            result.accuracy,
            result.time,
            result.message
        );
        self.score = Some(result);
        self.score.as_ref()
    }

    /// Seconds from the first sample to release, or to now while drawing
    pub fn elapsed_seconds(&self) -> f32 {
        match self.start_tick {
            Some(start) => {
                let end = self.end_tick.unwrap_or(self.tick);
                (end - start) as f32 / self.config.frame_rate
            }
            None => 0.0,
        }
    }

    /// True while samples are being recorded
    pub fn is_drawing(&self) -> bool {
        self.start_tick.is_some() && !self.is_over()
    }

    pub fn is_over(&self) -> bool {
        self.score.is_some()
    }

    pub fn score(&self) -> Option<&ScoreResult> {
        self.score.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreOutcome;

    fn round() -> RoundState {
        RoundState::new(GameConfig::default(), 12345)
    }

    #[test]
    fn test_trace_append_only() {
        let mut trace = PlayerTrace::new();
        trace.record_sample(Vec2::new(0.0, 0.0));
        trace.record_sample(Vec2::new(3.0, 4.0));
        assert_eq!(trace.len(), 2);
        assert!((trace.path_length() - 5.0).abs() < 0.0001);

        trace.freeze();
        trace.record_sample(Vec2::new(10.0, 10.0));
        assert_eq!(trace.len(), 2);
        assert!(trace.is_frozen());
    }

    #[test]
    fn test_release_without_samples_is_noop() {
        let mut state = round();
        for _ in 0..5 {
            assert!(state.poll(&PointerInput::released()).is_none());
        }
        assert!(!state.is_over());
        assert!(state.trace.is_empty());
        assert_eq!(state.elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_short_attempt_scored_once() {
        let mut state = round();
        for i in 0..10 {
            let pos = Vec2::new(100.0 + i as f32, 100.0);
            assert!(state.poll(&PointerInput::pressed(pos)).is_none());
        }
        assert!(state.is_drawing());
        assert_eq!(state.trace.len(), 10);

        let result = state.poll(&PointerInput::released()).cloned().unwrap();
        assert_eq!(result.outcome, ScoreOutcome::TooShort);
        assert_eq!(result.total, 400);
        assert!(state.is_over());
        assert!(state.trace.is_frozen());

        // Later input is ignored and the score never changes
        assert!(state.poll(&PointerInput::pressed(Vec2::ZERO)).is_none());
        assert!(state.poll(&PointerInput::released()).is_none());
        assert_eq!(state.trace.len(), 10);
        assert_eq!(state.score(), Some(&result));
    }

    #[test]
    fn test_elapsed_counts_ticks_from_first_sample() {
        let mut state = round();
        state.poll(&PointerInput::released());
        state.poll(&PointerInput::released());
        for _ in 0..60 {
            state.poll(&PointerInput::pressed(Vec2::splat(50.0)));
        }
        // First sample at tick 3, now at tick 62
        assert!((state.elapsed_seconds() - 59.0 / 60.0).abs() < 0.0001);
        state.poll(&PointerInput::released());
        assert!((state.elapsed_seconds() - 1.0).abs() < 0.0001);

        // Stopwatch stops on release
        state.poll(&PointerInput::released());
        assert!((state.elapsed_seconds() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_tracing_ideal_line_succeeds() {
        // Coverage compares samples to length, so a tiny track keeps the trace short
        let config = GameConfig {
            canvas_size: 40.0,
            boxes: 4,
            point_probability: 1.0,
            track_width: 10.0,
            ..Default::default()
        };
        let mut state = RoundState::new(config, 77);
        let ideal = state.track.ideal_line.clone();
        for p in &ideal {
            state.poll(&PointerInput::pressed(*p));
        }
        let result = state.poll(&PointerInput::released()).cloned().unwrap();
        assert_eq!(result.outcome, ScoreOutcome::Success);
        assert_eq!(result.accuracy, 720);
        assert_eq!(result.time, 480);
    }

    #[test]
    fn test_restart_builds_new_round() {
        let mut state = round();
        state.poll(&PointerInput::pressed(Vec2::ONE));
        state.poll(&PointerInput::released());
        assert!(state.is_over());

        state.restart(54321);
        assert!(!state.is_over());
        assert!(state.trace.is_empty());
        assert_eq!(state.tick, 0);
        assert_eq!(state.seed, 54321);
        assert_eq!(state.track, RoundState::new(GameConfig::default(), 54321).track);
    }
}
