//! Surface measurement: logical size, pixel density and backing resolution.

use bevy::prelude::*;

use crate::math;

/// Source of the display's device pixel ratio.
///
/// Keeps measurement independent of a real window so it can be tested with
/// [`FixedScale`].
pub trait DisplayScale {
    /// Physical pixels per logical pixel reported by the display.
    fn device_pixel_ratio(&self) -> f32;
}

impl DisplayScale for Window {
    fn device_pixel_ratio(&self) -> f32 {
        self.scale_factor()
    }
}

/// A constant pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedScale(pub f32);

impl DisplayScale for FixedScale {
    fn device_pixel_ratio(&self) -> f32 {
        self.0
    }
}

/// Measured size of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
    /// Size in logical pixels; the lattice and pointer live in this space.
    pub logical: Vec2,
    /// Pixel ratio reported by the display, before capping.
    pub device_ratio: f32,
    /// Pixel ratio applied to the backing buffer.
    pub pixel_ratio: f32,
    /// Backing buffer size in physical pixels.
    pub backing: UVec2,
}

impl SurfaceMetrics {
    /// Measures a surface of `logical` size on `display`, capping the pixel
    /// ratio at `max_pixel_ratio`.
    ///
    /// Returns `None` while the surface has no area.
    pub fn measure(logical: Vec2, display: &impl DisplayScale, max_pixel_ratio: f32) -> Option<Self> {
        if !(logical.x.is_finite() && logical.y.is_finite() && logical.x > 0.0 && logical.y > 0.0) {
            return None;
        }
        let device_ratio = display.device_pixel_ratio();
        let pixel_ratio = math::capped_pixel_ratio(device_ratio, max_pixel_ratio);
        let backing = math::backing_extent(logical, pixel_ratio);
        if backing.x == 0 || backing.y == 0 {
            return None;
        }
        Some(Self {
            logical,
            device_ratio,
            pixel_ratio,
            backing,
        })
    }
}
