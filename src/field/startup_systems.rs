use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::HexFieldConfig;
use super::entities::{HexSurface, SurfaceCamera};
use super::render_loop::LoopHandle;

// ── Mount / unmount ─────────────────────────────────────────────────

/// Measures the primary window, builds the first lattice and starts the
/// frame loop.
///
/// A window without area still gets a surface; its lattice is built by the
/// first resize that reports a usable size.
pub fn mount_surface(
    mut commands: Commands,
    cfg: Res<HexFieldConfig>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
) {
    let Ok((window_entity, window)) = windows.single() else {
        warn!("hex field: no primary window, mount skipped");
        return;
    };

    let mut surface = HexSurface::new(cfg.sanitized(), window_entity);
    let logical = Vec2::new(window.width(), window.height());
    match surface.resize(logical, window) {
        Some(metrics) => info!(
            "hex field mounted: {}x{} logical, {}x{} backing",
            metrics.logical.x, metrics.logical.y, metrics.backing.x, metrics.backing.y
        ),
        None => info!("hex field mounted; surface not measurable yet"),
    }
    if let Some(pos) = window.cursor_position() {
        surface.field.pointer_moved(pos);
    }

    commands.spawn((Name::new("HexSurface"), surface, LoopHandle::start()));
}

/// Stops every frame loop and despawns the surfaces.
pub fn unmount_surface(
    mut commands: Commands,
    mut surfaces: Query<(Entity, &mut LoopHandle), With<HexSurface>>,
) {
    for (entity, mut handle) in &mut surfaces {
        handle.stop();
        info!("hex field unmounted after {} frames", handle.frames());
        commands.entity(entity).despawn();
    }
}

// ── Camera ──────────────────────────────────────────────────────────

/// Spawns the 2D camera that shows the surface sprite.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("SurfaceCamera"), Camera2d, SurfaceCamera));
}

/// Removes the surface camera on unmount.
pub fn despawn_camera(mut commands: Commands, cameras: Query<Entity, With<SurfaceCamera>>) {
    for entity in &cameras {
        commands.entity(entity).despawn();
    }
}
