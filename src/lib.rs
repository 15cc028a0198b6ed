#![warn(missing_docs)]
//! Ambient hex field: a full-bleed grid of pointy-top hexagon outlines whose
//! stroke brightens as the pointer approaches.
//!
//! The geometry, glow and outline meshing live in plain structs under
//! [`field`] so they can be exercised without a display; the Bevy plugins in
//! the same module tie them to a window, its pointer and its resize events.

#[cfg(feature = "native")]
pub mod cli;
pub mod field;
pub mod math;

use bevy::prelude::*;

/// Mount lifetime of the hex field, used for system scheduling.
///
/// Entering [`FieldState::Mounted`] measures the window, builds the lattice
/// and starts the frame loop; leaving it tears all of that down.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum FieldState {
    /// Surface exists, pointer tracking and rendering are active.
    #[default]
    Mounted,
    /// Nothing is drawn and no window messages are consumed.
    Unmounted,
}
