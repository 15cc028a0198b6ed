//! Geometry, falloff and pixel-density helpers shared by the lattice, glow
//! and surface code. Plain numbers and `Vec2` in, plain numbers out; no ECS.

use bevy::prelude::{UVec2, Vec2};

/// Exponent of the glow falloff curve.
pub const FALLOFF_EXPONENT: f32 = 1.8;

/// Horizontal and vertical distance between neighbouring pointy-top hex
/// centers of circumradius `radius`.
///
/// # Examples
/// ```
/// # use hex_field::math::hex_pitch;
/// let pitch = hex_pitch(2.0);
/// assert!((pitch.x - 2.0 * 3f32.sqrt()).abs() < 1e-6);
/// assert_eq!(pitch.y, 3.0);
/// ```
pub fn hex_pitch(radius: f32) -> Vec2 {
    Vec2::new(radius * 3f32.sqrt(), radius * 1.5)
}

/// Glow strength for a normalized distance `t = distance / hover_radius`.
///
/// Returns `(1 - t)^1.8` for `t` in `[0, 1]` and `0` past the edge. The curve
/// is steeper near the edge of the hover radius than near its center.
///
/// # Examples
/// ```
/// # use hex_field::math::glow_falloff;
/// assert_eq!(glow_falloff(0.0), 1.0);
/// assert_eq!(glow_falloff(1.0), 0.0);
/// assert_eq!(glow_falloff(3.0), 0.0);
/// ```
pub fn glow_falloff(t: f32) -> f32 {
    if t.is_nan() || t >= 1.0 {
        return 0.0;
    }
    (1.0 - t.max(0.0)).powf(FALLOFF_EXPONENT)
}

/// Device pixel ratio actually used for the backing buffer.
///
/// Non-positive or non-finite ratios fall back to `1.0`; anything above
/// `cap` is clamped to it.
pub fn capped_pixel_ratio(scale: f32, cap: f32) -> f32 {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    scale.min(cap)
}

/// Backing-buffer size in physical pixels for a logical surface size.
pub fn backing_extent(logical: Vec2, pixel_ratio: f32) -> UVec2 {
    let scaled = (logical * pixel_ratio).round().max(Vec2::ZERO);
    UVec2::new(scaled.x as u32, scaled.y as u32)
}
