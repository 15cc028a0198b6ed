use bevy::camera::RenderTarget;
use bevy::camera::visibility::RenderLayers;
use bevy::picking::Pickable;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureFormat};
use bevy::window::WindowEvent;

use super::HexFieldConfig;
use super::canvas::OutlineMesh;
use super::entities::{FramesDrawn, HexSurface, SURFACE_LAYER, SurfaceTarget};
use super::render_loop::LoopHandle;
use super::surface::SurfaceMetrics;

// ── Update: configuration, size, pointer ────────────────────────────

/// Pushes a changed [`HexFieldConfig`] into every surface (full rebuild).
pub fn apply_config(cfg: Res<HexFieldConfig>, mut surfaces: Query<&mut HexSurface>) {
    let cfg = cfg.sanitized();
    for mut surface in &mut surfaces {
        if surface.field.config() == &cfg {
            continue;
        }
        surface.reconfigure(cfg.clone());
        debug!("hex field reconfigured: {cfg:?}");
    }
}

/// Re-measures surfaces whose window was resized or changed scale factor.
///
/// Several resizes within one frame collapse into the last one.
pub fn sync_surface_size(
    mut events: MessageReader<WindowEvent>,
    windows: Query<&Window>,
    mut surfaces: Query<&mut HexSurface>,
) {
    let mut latest: Vec<(Entity, Vec2)> = Vec::new();
    for ev in events.read() {
        let (window, size) = match ev {
            WindowEvent::WindowResized(resized) => (
                resized.window,
                Some(Vec2::new(resized.width, resized.height)),
            ),
            WindowEvent::WindowScaleFactorChanged(changed) => (changed.window, None),
            _ => continue,
        };
        let Ok(w) = windows.get(window) else {
            continue;
        };
        let size = size.unwrap_or_else(|| Vec2::new(w.width(), w.height()));
        match latest.iter_mut().find(|(e, _)| *e == window) {
            Some(entry) => entry.1 = size,
            None => latest.push((window, size)),
        }
    }
    if latest.is_empty() {
        return;
    }

    for mut surface in &mut surfaces {
        let Some(&(_, size)) = latest.iter().find(|(e, _)| *e == surface.window) else {
            continue;
        };
        let Ok(window) = windows.get(surface.window) else {
            continue;
        };
        if surface.resize(size, window).is_none() {
            debug!("hex field: {}x{} not measurable, keeping previous lattice", size.x, size.y);
        }
    }
}

/// Applies pointer moves and leaves in arrival order; the last one wins.
pub fn track_pointer(mut events: MessageReader<WindowEvent>, mut surfaces: Query<&mut HexSurface>) {
    for ev in events.read() {
        match ev {
            WindowEvent::CursorMoved(moved) => {
                for mut surface in &mut surfaces {
                    if surface.window == moved.window {
                        surface.field.pointer_moved(moved.position);
                    }
                }
            }
            WindowEvent::CursorLeft(left) => {
                for mut surface in &mut surfaces {
                    if surface.window == left.window {
                        surface.field.pointer_left();
                    }
                }
            }
            _ => {}
        }
    }
}

// ── Update: frame ───────────────────────────────────────────────────

/// Strokes every running surface into its outline mesh.
pub fn draw_field(
    mut surfaces: Query<(&mut HexSurface, &mut LoopHandle)>,
    mut drawn: ResMut<FramesDrawn>,
) {
    for (mut surface, mut handle) in &mut surfaces {
        if !handle.is_running() {
            continue;
        }
        let HexSurface { field, canvas, .. } = &mut *surface;
        if field.render(canvas) {
            handle.record_frame();
            drawn.0 += 1;
        }
    }
}

// ── Update: presentation ────────────────────────────────────────────

/// Matches the window's clear color to the configured palette.
pub fn sync_clear_color(cfg: Res<HexFieldConfig>, mut clear: ResMut<ClearColor>) {
    clear.0 = cfg.palette().background();
}

/// Hands each surface's outlines to the GPU.
///
/// The first presentation creates the render target, the offscreen camera,
/// the mesh and the full-window sprite; later ones only upload geometry and
/// follow the backing size.
pub fn present_surface(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut surfaces: Query<(Entity, &HexSurface, Option<&SurfaceTarget>, Option<&mut Sprite>)>,
) {
    for (entity, surface, target, sprite) in &mut surfaces {
        let Some(metrics) = surface.field.metrics() else {
            continue;
        };

        let (Some(target), Some(mut sprite)) = (target, sprite) else {
            let image = images.add(target_image(metrics));
            let mut mesh = OutlineMesh::empty_mesh();
            surface.canvas.write_to(&mut mesh);
            let mesh = meshes.add(mesh);
            let material = materials.add(ColorMaterial::default());

            // purely decorative: never a picking target
            commands
                .entity(entity)
                .insert((
                    Sprite {
                        image: image.clone(),
                        custom_size: Some(metrics.logical),
                        ..default()
                    },
                    Pickable::IGNORE,
                    SurfaceTarget {
                        image: image.clone(),
                        mesh: mesh.clone(),
                    },
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Name::new("SurfaceTargetCamera"),
                        Camera2d,
                        Camera {
                            order: -1,
                            clear_color: ClearColorConfig::Custom(Color::NONE),
                            ..default()
                        },
                        RenderTarget::Image(image.into()),
                        RenderLayers::layer(SURFACE_LAYER),
                    ));
                    parent.spawn((
                        Name::new("SurfaceOutlines"),
                        Mesh2d(mesh),
                        MeshMaterial2d(material),
                        RenderLayers::layer(SURFACE_LAYER),
                        Pickable::IGNORE,
                    ));
                });
            continue;
        };

        if sprite.custom_size != Some(metrics.logical) {
            sprite.custom_size = Some(metrics.logical);
        }
        if images
            .get(&target.image)
            .is_some_and(|image| image.size() != metrics.backing)
            && let Some(image) = images.get_mut(&target.image)
        {
            image.resize(backing_extent(metrics));
        }
        if let Some(mesh) = meshes.get_mut(&target.mesh) {
            surface.canvas.write_to(mesh);
        }
    }
}

fn backing_extent(metrics: &SurfaceMetrics) -> Extent3d {
    Extent3d {
        width: metrics.backing.x,
        height: metrics.backing.y,
        depth_or_array_layers: 1,
    }
}

fn target_image(metrics: &SurfaceMetrics) -> Image {
    Image::new_target_texture(
        metrics.backing.x,
        metrics.backing.y,
        TextureFormat::Rgba8UnormSrgb,
        None,
    )
}
