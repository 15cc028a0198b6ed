//! Ambient hex field: lattice generation, pointer glow, frame rendering and
//! the mount lifecycle that ties them to a window.
//!
//! [`HexFieldPlugin`] owns everything that does not need a GPU: measurement,
//! lattice rebuilds, pointer tracking and stroking outlines into a mesh.
//! [`HexFieldRenderPlugin`] draws that mesh into a backing-size image and
//! shows it as a full-window sprite.

pub mod canvas;
mod entities;
pub mod glow;
pub mod lattice;
pub mod render_loop;
mod startup_systems;
pub mod surface;
mod systems;

pub use entities::{FramesDrawn, HexSurface, SURFACE_LAYER, SurfaceCamera, SurfaceTarget};
pub use render_loop::{HexField, LoopHandle};

use bevy::prelude::*;

use crate::FieldState;
use crate::math::capped_pixel_ratio;

/// Smallest circumradius accepted; the outline is inset by one pixel.
pub const MIN_CELL_RADIUS: f32 = 2.0;

/// Default cap on the device pixel ratio used for the backing buffer.
pub const DEFAULT_MAX_PIXEL_RATIO: f32 = 2.0;

/// Host-facing configuration of the hex field.
///
/// Changing this resource at runtime reconfigures every mounted surface and
/// rebuilds its lattice from scratch.
#[derive(Resource, Clone, Debug, PartialEq, Reflect)]
pub struct HexFieldConfig {
    /// Stroke opacity of unlit cells.
    pub base_alpha: f32,
    /// Stroke opacity of a cell directly under the pointer.
    pub peak_alpha: f32,
    /// Hexagon circumradius in logical pixels.
    pub size: f32,
    /// Distance from the pointer within which cells glow.
    pub hover_radius: f32,
    /// Light-on-dark palette instead of the warm-on-light default.
    pub dark: bool,
    /// Upper bound on the device pixel ratio applied to the backing buffer.
    pub max_pixel_ratio: f32,
}

impl Default for HexFieldConfig {
    fn default() -> Self {
        Self {
            base_alpha: 0.07,
            peak_alpha: 0.5,
            size: 34.0,
            hover_radius: 130.0,
            dark: false,
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
        }
    }
}

impl HexFieldConfig {
    /// Palette selected by [`Self::dark`].
    pub fn palette(&self) -> Palette {
        if self.dark {
            Palette::WarmOnDark
        } else {
            Palette::WarmOnLight
        }
    }

    /// Copy with every value forced into its usable range.
    ///
    /// Opacities are clamped to `[0, 1]` with `peak >= base`, the radius to at
    /// least [`MIN_CELL_RADIUS`], the hover radius to a positive value and the
    /// pixel ratio cap to at least `1`.
    pub fn sanitized(&self) -> Self {
        let unit = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        let base_alpha = unit(self.base_alpha);
        let peak_alpha = unit(self.peak_alpha).max(base_alpha);
        let size = if self.size.is_finite() {
            self.size.max(MIN_CELL_RADIUS)
        } else {
            Self::default().size
        };
        let hover_radius = if self.hover_radius.is_finite() && self.hover_radius > 0.0 {
            self.hover_radius
        } else {
            Self::default().hover_radius
        };
        Self {
            base_alpha,
            peak_alpha,
            size,
            hover_radius,
            dark: self.dark,
            max_pixel_ratio: capped_pixel_ratio(self.max_pixel_ratio, f32::MAX).max(1.0),
        }
    }
}

/// The two fixed stroke palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Warm brown accent over a cream page.
    WarmOnLight,
    /// Pale amber over a near-black page.
    WarmOnDark,
}

impl Palette {
    /// Stroke color as 8-bit sRGB.
    pub fn stroke_rgb(self) -> [u8; 3] {
        match self {
            Self::WarmOnLight => [139, 115, 85],
            Self::WarmOnDark => [255, 210, 160],
        }
    }

    /// Page color behind the surface.
    pub fn background(self) -> Color {
        match self {
            Self::WarmOnLight => Color::srgb_u8(247, 243, 238),
            Self::WarmOnDark => Color::srgb_u8(28, 25, 23),
        }
    }
}

/// Ordering for the per-frame field systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldSet {
    /// Reconfigure, resize, pointer tracking, then stroking.
    Frame,
}

/// Mount lifecycle, pointer tracking and per-frame stroking.
pub struct HexFieldPlugin(pub HexFieldConfig);

impl Plugin for HexFieldPlugin {
    fn build(&self, app: &mut App) {
        let cfg = self.0.sanitized();
        if cfg != self.0 {
            warn!("hex field config adjusted to {cfg:?}");
        }

        app.register_type::<HexFieldConfig>()
            .register_type::<FieldState>()
            .init_state::<FieldState>()
            .insert_resource(cfg)
            .init_resource::<FramesDrawn>()
            .add_systems(OnEnter(FieldState::Mounted), startup_systems::mount_surface)
            .add_systems(OnExit(FieldState::Mounted), startup_systems::unmount_surface)
            .add_systems(
                Update,
                (
                    systems::apply_config.run_if(resource_changed::<HexFieldConfig>),
                    systems::sync_surface_size,
                    systems::track_pointer,
                    systems::draw_field,
                )
                    .chain()
                    .in_set(FieldSet::Frame)
                    .run_if(in_state(FieldState::Mounted)),
            );
    }
}

/// Cameras, background color and presentation of the outline mesh.
pub struct HexFieldRenderPlugin;

impl Plugin for HexFieldRenderPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SurfaceCamera>()
            .insert_resource(ClearColor(Palette::WarmOnLight.background()))
            .add_systems(OnEnter(FieldState::Mounted), startup_systems::spawn_camera)
            .add_systems(OnExit(FieldState::Mounted), startup_systems::despawn_camera)
            .add_systems(
                Update,
                systems::sync_clear_color.run_if(resource_changed::<HexFieldConfig>),
            )
            .add_systems(
                Update,
                systems::present_surface
                    .after(FieldSet::Frame)
                    .run_if(in_state(FieldState::Mounted)),
            );
    }
}
