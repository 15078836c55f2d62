//! Deterministic track generation
//!
//! All generation lives here. This module must be pure and deterministic:
//! - Randomness only through the injected `Rng`
//! - Stable sort order for equal angles
//! - No rendering or platform dependencies
//!
//! Pipeline: sampler -> sort -> spline -> boundary -> racing_line, folded by `builder`.

pub mod boundary;
pub mod builder;
pub mod closed;
pub mod racing_line;
pub mod sampler;
pub mod sort;
pub mod spline;

pub use boundary::extrude_boundaries;
pub use builder::{Boundaries, Track, build_track};
pub use racing_line::{detect_corners, ideal_racing_line};
pub use sampler::{ControlPoint, sample_control_points};
pub use sort::sort_by_angle;
pub use spline::{catmull_rom_loop, catmull_rom_point};
