//! Hex field viewer: a window filled with the ambient hex field.
//!
//! Keys: Space mounts/unmounts the field, D flips the palette, Tab toggles
//! the world inspector, Esc quits.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use hex_field::FieldState;
use hex_field::field::{HexFieldConfig, HexFieldPlugin, HexFieldRenderPlugin};

/// Whether the world inspector overlay is shown.
#[derive(Resource, Default, PartialEq, Eq, Reflect)]
struct InspectorVisible(bool);

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Field".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<InspectorVisible>()
    .init_resource::<InspectorVisible>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(HexFieldPlugin(config_from_args()))
    .add_plugins(HexFieldRenderPlugin)
    .add_systems(Update, (exit_on_esc, toggle_mount, toggle_palette, toggle_inspector))
    .add_plugins(WorldInspectorPlugin::new().run_if(resource_equals(InspectorVisible(true))));

    #[cfg(feature = "native")]
    app.add_plugins(bevy::remote::RemotePlugin::default())
        .add_plugins(bevy::remote::http::RemoteHttpPlugin::default());

    app.run();
}

#[cfg(feature = "native")]
fn config_from_args() -> HexFieldConfig {
    use clap::Parser;
    hex_field::cli::Args::parse().into_config()
}

#[cfg(not(feature = "native"))]
fn config_from_args() -> HexFieldConfig {
    HexFieldConfig::default()
}

fn toggle_mount(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<FieldState>>,
    mut next: ResMut<NextState<FieldState>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        next.set(match state.get() {
            FieldState::Mounted => FieldState::Unmounted,
            FieldState::Unmounted => FieldState::Mounted,
        });
    }
}

fn toggle_palette(keys: Res<ButtonInput<KeyCode>>, mut cfg: ResMut<HexFieldConfig>) {
    if keys.just_pressed(KeyCode::KeyD) {
        cfg.dark = !cfg.dark;
    }
}

fn toggle_inspector(keys: Res<ButtonInput<KeyCode>>, mut visible: ResMut<InspectorVisible>) {
    if keys.just_pressed(KeyCode::Tab) {
        visible.0 = !visible.0;
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
