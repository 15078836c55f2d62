//! WebGPU rendering module
//!
//! Turns the round's read-only point sequences into one triangle list per frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use glam::Vec2;

use crate::config::GameConfig;
use crate::round::RoundState;
use vertex::colors;

const GRID_WIDTH: f32 = 1.0;
const BOUNDARY_WIDTH: f32 = 2.0;
const START_LINE_WIDTH: f32 = 4.0;
const LINE_WIDTH: f32 = 5.0;
const CONTROL_POINT_RADIUS: f32 = 4.0;

/// Interior lines between the sampling cells, vertical then horizontal at each step
pub fn grid_lines(config: &GameConfig) -> Vec<(Vec2, Vec2)> {
    let size = config.canvas_size;
    let spacing = config.cell_size();
    (1..config.sections())
        .flat_map(|i| {
            let offset = spacing * i as f32;
            [
                (Vec2::new(offset, 0.0), Vec2::new(offset, size)),
                (Vec2::new(0.0, offset), Vec2::new(size, offset)),
            ]
        })
        .collect()
}

/// Build the frame's vertices: grid, boundaries, start line, control points, the player's
/// line, and the ideal line once the round is over
pub fn scene(round: &RoundState) -> Vec<Vertex> {
    let track = &round.track;
    let mut vertices = Vec::new();

    for (a, b) in grid_lines(&round.config) {
        vertices.extend(shapes::segment(a, b, GRID_WIDTH, colors::GRID));
    }

    vertices.extend(shapes::polyline(&track.boundaries.outer, BOUNDARY_WIDTH, colors::BOUNDARY, true));
    vertices.extend(shapes::polyline(&track.boundaries.inner, BOUNDARY_WIDTH, colors::BOUNDARY, true));

    let (start_a, start_b) = track.start_line;
    vertices.extend(shapes::segment(start_a, start_b, START_LINE_WIDTH, colors::START_LINE));

    for cp in &track.control_points {
        vertices.extend(shapes::circle(cp.pos, CONTROL_POINT_RADIUS, colors::CONTROL_POINT, 12));
    }

    vertices.extend(shapes::polyline(round.trace.points(), LINE_WIDTH, colors::PLAYER_LINE, false));

    if round.is_over() {
        vertices.extend(shapes::polyline(&track.ideal_line, LINE_WIDTH, colors::IDEAL_LINE, true));
    }

    vertices
}
