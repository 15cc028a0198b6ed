//! The long-lived render-loop object and its start/stop handle.

use bevy::prelude::*;

use super::HexFieldConfig;
use super::canvas::{HexCanvas, Stroke};
use super::glow::{Glow, PointerState};
use super::lattice::{Cell, Lattice};
use super::surface::{DisplayScale, FixedScale, SurfaceMetrics};

/// Gap between the drawn outline and the cell's true circumradius, so
/// neighbouring outlines do not overlap.
pub const CELL_INSET: f32 = 1.0;

/// Owned state of one hex field: configuration, measured surface, the live
/// lattice generation and the latest pointer position.
///
/// Resize and pointer updates are discrete mutations; [`HexField::render`]
/// reads whatever is current when it runs.
#[derive(Debug, Clone)]
pub struct HexField {
    config: HexFieldConfig,
    metrics: Option<SurfaceMetrics>,
    lattice: Option<Lattice>,
    generation: u64,
    pointer: PointerState,
}

impl HexField {
    /// Unmeasured field; nothing renders until [`Self::resize`] succeeds.
    pub fn new(config: HexFieldConfig) -> Self {
        Self {
            config,
            metrics: None,
            lattice: None,
            generation: 0,
            pointer: PointerState::FarAway,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &HexFieldConfig {
        &self.config
    }

    /// Last successful measurement.
    pub fn metrics(&self) -> Option<&SurfaceMetrics> {
        self.metrics.as_ref()
    }

    /// Live lattice generation, if one was built.
    pub fn lattice(&self) -> Option<&Lattice> {
        self.lattice.as_ref()
    }

    /// Number of lattices built so far; increases on every rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest pointer state.
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Re-measures the surface and rebuilds the lattice from scratch.
    ///
    /// An unmeasurable size leaves the previous generation in place and
    /// returns `None`.
    pub fn resize(&mut self, logical: Vec2, display: &impl DisplayScale) -> Option<&SurfaceMetrics> {
        let metrics = SurfaceMetrics::measure(logical, display, self.config.max_pixel_ratio)?;
        self.metrics = Some(metrics);
        self.rebuild();
        self.metrics.as_ref()
    }

    /// Swaps the configuration and rebuilds against the last measurement.
    pub fn reconfigure(&mut self, config: HexFieldConfig) {
        self.config = config;
        if let Some(m) = self.metrics {
            self.metrics =
                SurfaceMetrics::measure(m.logical, &FixedScale(m.device_ratio), self.config.max_pixel_ratio);
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let Some(metrics) = self.metrics else {
            return;
        };
        let Some(lattice) = Lattice::build(metrics.logical, self.config.size) else {
            return;
        };
        self.generation += 1;
        debug!(
            "hex lattice generation {}: {} cells ({}x{}) for {}x{} @{}x",
            self.generation,
            lattice.len(),
            lattice.columns(),
            lattice.rows(),
            metrics.logical.x,
            metrics.logical.y,
            metrics.pixel_ratio,
        );
        self.lattice = Some(lattice);
    }

    /// Records a pointer position in surface-local logical pixels.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer = PointerState::Tracked(position);
    }

    /// Pointer left the window; every cell decays to the base opacity.
    pub fn pointer_left(&mut self) {
        self.pointer = PointerState::FarAway;
    }

    /// Glow of `cell` under the current pointer.
    pub fn glow_for(&self, cell: &Cell) -> Glow {
        Glow::at(cell, self.pointer, &self.config)
    }

    /// Paints one frame: clears `canvas` and strokes every cell.
    ///
    /// Returns `false` without touching the canvas while no lattice exists.
    pub fn render(&self, canvas: &mut impl HexCanvas) -> bool {
        let Some(lattice) = &self.lattice else {
            return false;
        };
        canvas.clear();
        let rgb = self.config.palette().stroke_rgb();
        let outline = lattice.radius() - CELL_INSET;
        for cell in lattice.cells() {
            let glow = self.glow_for(cell);
            canvas.stroke_hexagon(
                cell.center,
                outline,
                Stroke {
                    rgb,
                    alpha: glow.opacity,
                    width: glow.width,
                },
            );
        }
        true
    }
}

/// Start/stop handle of a frame loop.
///
/// Once stopped it never runs again; stopping twice is harmless.
#[derive(Component, Debug, PartialEq, Eq)]
pub struct LoopHandle {
    running: bool,
    frames: u64,
}

impl LoopHandle {
    /// A running loop with no frames drawn.
    pub fn start() -> Self {
        Self {
            running: true,
            frames: 0,
        }
    }

    /// Stops the loop. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether frames should still be drawn.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames drawn through this handle.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Counts a drawn frame; ignored once stopped.
    pub fn record_frame(&mut self) {
        if self.running {
            self.frames += 1;
        }
    }
}
