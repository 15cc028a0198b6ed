use bevy::prelude::*;

use super::HexFieldConfig;
use super::canvas::OutlineMesh;
use super::render_loop::HexField;
use super::surface::{DisplayScale, SurfaceMetrics};

/// The mounted drawing surface: render-loop state plus its outline mesh.
///
/// Spawned on mount alongside a [`super::LoopHandle`], despawned on unmount.
#[derive(Component)]
pub struct HexSurface {
    /// Lattice, pointer and configuration.
    pub field: HexField,
    /// Outline geometry the field is stroked into each frame.
    pub canvas: OutlineMesh,
    /// Window whose size and pointer drive this surface.
    pub window: Entity,
}

impl HexSurface {
    /// Unmeasured surface bound to `window`.
    pub fn new(config: HexFieldConfig, window: Entity) -> Self {
        Self {
            field: HexField::new(config),
            canvas: OutlineMesh::default(),
            window,
        }
    }

    /// Re-measures, adopts the new backing size and rebuilds the lattice.
    pub fn resize(&mut self, logical: Vec2, display: &impl DisplayScale) -> Option<SurfaceMetrics> {
        let metrics = *self.field.resize(logical, display)?;
        self.canvas.resize(&metrics);
        Some(metrics)
    }

    /// Applies a new configuration; the canvas follows any change of pixel
    /// ratio.
    pub fn reconfigure(&mut self, config: HexFieldConfig) {
        self.field.reconfigure(config);
        if let Some(metrics) = self.field.metrics()
            && (metrics.backing != self.canvas.backing()
                || metrics.pixel_ratio != self.canvas.pixel_ratio())
        {
            self.canvas.resize(metrics);
        }
    }
}

/// GPU side of a presented surface.
///
/// The outline mesh is drawn on [`SURFACE_LAYER`] by an offscreen camera
/// into `image`, which the surface's sprite shows at logical size.
#[derive(Component, Debug)]
pub struct SurfaceTarget {
    /// Render target sized to the backing resolution.
    pub image: Handle<Image>,
    /// Mesh rebuilt from [`HexSurface::canvas`] every frame.
    pub mesh: Handle<Mesh>,
}

/// Render layer reserved for the outline mesh and its offscreen camera.
pub const SURFACE_LAYER: usize = 1;

/// Marker for the 2D camera that shows the surface.
#[derive(Component, Reflect)]
pub struct SurfaceCamera;

/// Frames stroked across all surfaces since startup.
#[derive(Resource, Default, Debug)]
pub struct FramesDrawn(pub u64);
