//! Command-line overrides for [`HexFieldConfig`].

use clap::Parser;

use crate::field::HexFieldConfig;

/// Ambient hex field viewer.
#[derive(Parser, Debug, Default)]
#[command(name = "hex-field", version, about = "Ambient hex field viewer")]
pub struct Args {
    /// Stroke opacity of unlit cells, 0..1.
    #[arg(long)]
    pub base_alpha: Option<f32>,
    /// Stroke opacity of the cell under the pointer, 0..1.
    #[arg(long)]
    pub peak_alpha: Option<f32>,
    /// Hexagon circumradius in logical pixels.
    #[arg(long)]
    pub size: Option<f32>,
    /// Glow reach around the pointer in logical pixels.
    #[arg(long)]
    pub hover_radius: Option<f32>,
    /// Pale strokes over a dark page.
    #[arg(long)]
    pub dark: bool,
    /// Cap on the device pixel ratio of the backing buffer.
    #[arg(long)]
    pub max_pixel_ratio: Option<f32>,
}

impl Args {
    /// Defaults overridden by whatever was passed on the command line.
    pub fn into_config(self) -> HexFieldConfig {
        let d = HexFieldConfig::default();
        HexFieldConfig {
            base_alpha: self.base_alpha.unwrap_or(d.base_alpha),
            peak_alpha: self.peak_alpha.unwrap_or(d.peak_alpha),
            size: self.size.unwrap_or(d.size),
            hover_radius: self.hover_radius.unwrap_or(d.hover_radius),
            dark: self.dark,
            max_pixel_ratio: self.max_pixel_ratio.unwrap_or(d.max_pixel_ratio),
        }
    }
}
