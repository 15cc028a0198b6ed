//! Pointer-proximity glow.
//!
//! Every function here is pure: the same cell, pointer and parameters always
//! give the same opacity and stroke width.

use bevy::prelude::*;

use super::HexFieldConfig;
use super::lattice::Cell;
use crate::math;

/// Outline width of an unlit cell, in logical pixels.
pub const BASE_STROKE_WIDTH: f32 = 0.75;

/// Extra outline width of a cell directly under the pointer.
pub const STROKE_WIDTH_BOOST: f32 = 1.25;

/// Last known pointer position in surface-local logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub enum PointerState {
    /// Pointer inside the window.
    Tracked(Vec2),
    /// Pointer left the window or was never seen; infinitely far from every cell.
    #[default]
    FarAway,
}

impl PointerState {
    /// Euclidean distance to `point`, infinite for [`PointerState::FarAway`].
    pub fn distance_to(self, point: Vec2) -> f32 {
        match self {
            Self::Tracked(pos) => pos.distance(point),
            Self::FarAway => f32::INFINITY,
        }
    }
}

/// Glow strength in `[0, 1]` for a cell `distance` away from the pointer.
pub fn boost(distance: f32, hover_radius: f32) -> f32 {
    if distance.is_nan() || distance >= hover_radius {
        return 0.0;
    }
    math::glow_falloff(distance / hover_radius)
}

/// Stroke opacity of `cell` with the pointer at `pointer`.
///
/// Exactly `base_alpha` at or beyond `hover_radius`, exactly `peak_alpha`
/// with the pointer on the cell center, never increasing with distance.
pub fn opacity_for(
    cell: &Cell,
    pointer: Vec2,
    base_alpha: f32,
    peak_alpha: f32,
    hover_radius: f32,
) -> f32 {
    blend_opacity(
        boost(cell.center.distance(pointer), hover_radius),
        base_alpha,
        peak_alpha,
    )
}

/// Stroke width for a given [`boost`].
pub fn stroke_width_for(boost: f32) -> f32 {
    BASE_STROKE_WIDTH + boost.clamp(0.0, 1.0) * STROKE_WIDTH_BOOST
}

fn blend_opacity(boost: f32, base_alpha: f32, peak_alpha: f32) -> f32 {
    if boost <= 0.0 {
        base_alpha
    } else if boost >= 1.0 {
        peak_alpha
    } else {
        base_alpha + boost * (peak_alpha - base_alpha)
    }
}

/// Opacity and width of one cell's outline for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    /// Stroke opacity in `[base_alpha, peak_alpha]`.
    pub opacity: f32,
    /// Stroke width in logical pixels.
    pub width: f32,
}

impl Glow {
    /// Glow of `cell` under `pointer` with the configured alphas and radius.
    pub fn at(cell: &Cell, pointer: PointerState, cfg: &HexFieldConfig) -> Self {
        let b = boost(pointer.distance_to(cell.center), cfg.hover_radius);
        Self {
            opacity: blend_opacity(b, cfg.base_alpha, cfg.peak_alpha),
            width: stroke_width_for(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_at(x: f32, y: f32) -> Cell {
        Cell {
            center: Vec2::new(x, y),
        }
    }

    // ── opacity_for ─────────────────────────────────────────────────

    #[test]
    fn pointer_on_center_gives_peak() {
        let cell = cell_at(120.0, 80.0);
        let a = opacity_for(&cell, cell.center, 0.06, 0.55, 140.0);
        assert_eq!(a, 0.55);
    }

    #[test]
    fn at_hover_radius_gives_base() {
        let cell = cell_at(0.0, 0.0);
        let a = opacity_for(&cell, Vec2::new(130.0, 0.0), 0.07, 0.5, 130.0);
        assert_eq!(a, 0.07);
    }

    #[test]
    fn beyond_hover_radius_gives_base() {
        let cell = cell_at(10.0, 10.0);
        for d in [131.0, 200.0, 5_000.0, 1e9] {
            let a = opacity_for(&cell, Vec2::new(10.0 + d, 10.0), 0.07, 0.5, 130.0);
            assert_eq!(a, 0.07, "distance {d}");
        }
    }

    #[test]
    fn inside_radius_is_between_base_and_peak() {
        let cell = cell_at(0.0, 0.0);
        let a = opacity_for(&cell, Vec2::new(30.0, 40.0), 0.07, 0.5, 130.0);
        assert!(a > 0.07 && a < 0.5);
        let expected = 0.07 + (1.0f32 - 50.0 / 130.0).powf(1.8) * (0.5 - 0.07);
        assert!((a - expected).abs() < 1e-6);
    }

    #[test]
    fn opacity_never_increases_with_distance() {
        let cell = cell_at(0.0, 0.0);
        let samples: Vec<f32> = (0..=300)
            .map(|i| opacity_for(&cell, Vec2::new(i as f32 * 0.5, 0.0), 0.07, 0.5, 130.0))
            .collect();
        for w in samples.windows(2) {
            assert!(w[1] <= w[0], "opacity rose from {} to {}", w[0], w[1]);
        }
    }

    // ── stroke width ────────────────────────────────────────────────

    #[test]
    fn width_grows_with_boost() {
        assert_eq!(stroke_width_for(0.0), BASE_STROKE_WIDTH);
        assert_eq!(stroke_width_for(1.0), BASE_STROKE_WIDTH + STROKE_WIDTH_BOOST);
        assert!(stroke_width_for(0.5) > stroke_width_for(0.25));
    }

    #[test]
    fn width_increment_is_bounded() {
        assert_eq!(stroke_width_for(7.0), BASE_STROKE_WIDTH + STROKE_WIDTH_BOOST);
        assert_eq!(stroke_width_for(-1.0), BASE_STROKE_WIDTH);
    }

    // ── Glow::at ────────────────────────────────────────────────────

    #[test]
    fn far_away_pointer_gives_base_glow() {
        let cfg = HexFieldConfig::default();
        let glow = Glow::at(&cell_at(5.0, 5.0), PointerState::FarAway, &cfg);
        assert_eq!(glow.opacity, cfg.base_alpha);
        assert_eq!(glow.width, BASE_STROKE_WIDTH);
    }

    #[test]
    fn tracked_pointer_on_cell_gives_peak_glow() {
        let cfg = HexFieldConfig::default();
        let cell = cell_at(5.0, 5.0);
        let glow = Glow::at(&cell, PointerState::Tracked(cell.center), &cfg);
        assert_eq!(glow.opacity, cfg.peak_alpha);
        assert_eq!(glow.width, BASE_STROKE_WIDTH + STROKE_WIDTH_BOOST);
    }

    #[test]
    fn glow_matches_opacity_for() {
        let cfg = HexFieldConfig::default();
        let cell = cell_at(40.0, 60.0);
        let pointer = Vec2::new(90.0, 20.0);
        let glow = Glow::at(&cell, PointerState::Tracked(pointer), &cfg);
        let a = opacity_for(&cell, pointer, cfg.base_alpha, cfg.peak_alpha, cfg.hover_radius);
        assert_eq!(glow.opacity, a);
    }
}
