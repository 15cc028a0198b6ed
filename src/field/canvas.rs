//! Drawing surface: the [`HexCanvas`] seam and the outline mesh the GPU
//! strokes every frame.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use hexx::{HexLayout, HexOrientation};

use super::surface::SurfaceMetrics;

/// Color, opacity and width of one outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// 8-bit sRGB color.
    pub rgb: [u8; 3],
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Line width in logical pixels.
    pub width: f32,
}

/// Anything the frame renderer can paint hexagon outlines onto.
///
/// Coordinates are logical pixels; implementations apply their own pixel
/// density transform.
pub trait HexCanvas {
    /// Erases the whole surface.
    fn clear(&mut self);

    /// Strokes a closed pointy-top hexagon outline.
    fn stroke_hexagon(&mut self, center: Vec2, radius: f32, stroke: Stroke);
}

/// Corners of a pointy-top hexagon of circumradius 1, centered on the origin.
pub fn unit_hex_corners() -> [Vec2; 6] {
    let layout = HexLayout {
        orientation: HexOrientation::Pointy,
        scale: Vec2::splat(1.0),
        ..default()
    };
    let corners = layout.center_aligned_hex_corners();
    std::array::from_fn(|i| corners[i])
}

/// Vertices per outline: an outer and an inner ring of six.
pub const VERTICES_PER_OUTLINE: usize = 12;

/// Indices per outline: two triangles for each of the six sides.
pub const INDICES_PER_OUTLINE: usize = 36;

/// Outline rings as a triangle list in backing pixels.
///
/// Positions are centered on the backing buffer with y up, which is how a
/// `Camera2d` rendering into an image of that size sees the world. Colors are
/// linear RGBA with straight alpha, one per vertex.
#[derive(Debug)]
pub struct OutlineMesh {
    backing: Vec2,
    pixel_ratio: f32,
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,
    unit_corners: [Vec2; 6],
}

impl Default for OutlineMesh {
    fn default() -> Self {
        Self {
            backing: Vec2::ZERO,
            pixel_ratio: 1.0,
            positions: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
            unit_corners: unit_hex_corners(),
        }
    }
}

impl OutlineMesh {
    /// Empty mesh matching `metrics`.
    pub fn new(metrics: &SurfaceMetrics) -> Self {
        let mut canvas = Self::default();
        canvas.resize(metrics);
        canvas
    }

    /// Adopts new metrics; the outlines are dropped.
    pub fn resize(&mut self, metrics: &SurfaceMetrics) {
        self.backing = metrics.backing.as_vec2();
        self.pixel_ratio = metrics.pixel_ratio;
        self.clear();
    }

    /// Backing size in physical pixels.
    pub fn backing(&self) -> UVec2 {
        self.backing.as_uvec2()
    }

    /// Physical pixels per logical pixel.
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Vertex positions, [`VERTICES_PER_OUTLINE`] per stroked hexagon.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Linear RGBA per vertex.
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Triangle list indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of outlines stroked since the last clear.
    pub fn outline_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_OUTLINE
    }

    /// Maps logical surface coordinates (origin top-left, y down) to mesh
    /// coordinates.
    pub fn to_mesh_space(&self, logical: Vec2) -> Vec2 {
        let p = logical * self.pixel_ratio;
        Vec2::new(p.x - self.backing.x / 2.0, self.backing.y / 2.0 - p.y)
    }

    /// Empty mesh with the attributes [`Self::write_to`] fills.
    pub fn empty_mesh() -> Mesh {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, Vec::<[f32; 3]>::new())
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, Vec::<[f32; 4]>::new())
        .with_inserted_indices(Indices::U32(Vec::new()))
    }

    /// Replaces the geometry of `mesh` with the current outlines.
    pub fn write_to(&self, mesh: &mut Mesh) {
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors.clone());
        mesh.insert_indices(Indices::U32(self.indices.clone()));
    }
}

impl HexCanvas for OutlineMesh {
    fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.indices.clear();
    }

    fn stroke_hexagon(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        if radius <= 0.0 || stroke.alpha <= 0.0 || stroke.width <= 0.0 {
            return;
        }
        let [r, g, b] = stroke.rgb;
        let color = Color::srgb_u8(r, g, b)
            .with_alpha(stroke.alpha.clamp(0.0, 1.0))
            .to_linear()
            .to_f32_array();

        // half the width along each side's normal is w/√3 along the corner
        let offset = stroke.width / 3f32.sqrt();
        let outer = radius + offset;
        let inner = (radius - offset).max(0.0);

        let base = self.positions.len() as u32;
        for corner in self.unit_corners {
            for ring in [outer, inner] {
                let p = self.to_mesh_space(center + corner * ring);
                self.positions.push([p.x, p.y, 0.0]);
                self.colors.push(color);
            }
        }
        for side in 0..6u32 {
            let next = (side + 1) % 6;
            let (o0, i0) = (base + side * 2, base + side * 2 + 1);
            let (o1, i1) = (base + next * 2, base + next * 2 + 1);
            self.indices.extend_from_slice(&[o0, i0, o1, i0, i1, o1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::surface::FixedScale;

    fn canvas(w: f32, h: f32, ratio: f32) -> OutlineMesh {
        let metrics = SurfaceMetrics::measure(Vec2::new(w, h), &FixedScale(ratio), 2.0).unwrap();
        OutlineMesh::new(&metrics)
    }

    fn vertex(c: &OutlineMesh, i: usize) -> Vec2 {
        Vec2::new(c.positions()[i][0], c.positions()[i][1])
    }

    const STROKE: Stroke = Stroke {
        rgb: [139, 115, 85],
        alpha: 0.5,
        width: 1.5,
    };

    // ── unit_hex_corners ────────────────────────────────────────────

    #[test]
    fn unit_corners_are_pointy_top() {
        let corners = unit_hex_corners();
        for c in corners {
            assert!((c.length() - 1.0).abs() < 1e-5);
        }
        // a vertex straight up and one straight down
        assert!(corners.iter().any(|c| c.x.abs() < 1e-5 && (c.y - 1.0).abs() < 1e-5));
        assert!(corners.iter().any(|c| c.x.abs() < 1e-5 && (c.y + 1.0).abs() < 1e-5));
    }

    // ── OutlineMesh ─────────────────────────────────────────────────

    #[test]
    fn new_canvas_matches_backing_size() {
        let c = canvas(64.0, 32.0, 2.0);
        assert_eq!(c.backing(), UVec2::new(128, 64));
        assert_eq!(c.pixel_ratio(), 2.0);
        assert_eq!(c.outline_count(), 0);
    }

    #[test]
    fn stroke_emits_one_ring_per_hexagon() {
        let mut c = canvas(100.0, 100.0, 1.0);
        c.stroke_hexagon(Vec2::splat(50.0), 30.0, STROKE);
        c.stroke_hexagon(Vec2::splat(20.0), 30.0, STROKE);
        assert_eq!(c.outline_count(), 2);
        assert_eq!(c.positions().len(), 2 * VERTICES_PER_OUTLINE);
        assert_eq!(c.colors().len(), 2 * VERTICES_PER_OUTLINE);
        assert_eq!(c.indices().len(), 2 * INDICES_PER_OUTLINE);
        let max = *c.indices().iter().max().unwrap() as usize;
        assert_eq!(max, 2 * VERTICES_PER_OUTLINE - 1);
    }

    #[test]
    fn clear_drops_all_geometry() {
        let mut c = canvas(64.0, 64.0, 1.0);
        c.stroke_hexagon(Vec2::splat(32.0), 20.0, STROKE);
        c.clear();
        assert!(c.positions().is_empty());
        assert!(c.colors().is_empty());
        assert!(c.indices().is_empty());
    }

    #[test]
    fn surface_corners_map_to_centered_y_up_space() {
        let c = canvas(100.0, 50.0, 2.0);
        assert_eq!(c.to_mesh_space(Vec2::ZERO), Vec2::new(-100.0, 50.0));
        assert_eq!(c.to_mesh_space(Vec2::new(100.0, 50.0)), Vec2::new(100.0, -50.0));
        assert_eq!(c.to_mesh_space(Vec2::new(50.0, 25.0)), Vec2::ZERO);
    }

    #[test]
    fn rings_straddle_the_outline_by_the_stroke_width() {
        let mut c = canvas(100.0, 100.0, 1.0);
        let stroke = Stroke { width: 2.0, ..STROKE };
        c.stroke_hexagon(Vec2::splat(50.0), 30.0, stroke);
        let center = c.to_mesh_space(Vec2::splat(50.0));
        // apothem of each ring differs by the width along the side normal
        let apothem = |i: usize| vertex(&c, i).distance(center) * 3f32.sqrt() / 2.0;
        for side in 0..6 {
            let outer = apothem(side * 2);
            let inner = apothem(side * 2 + 1);
            assert!((outer - inner - 2.0).abs() < 1e-3, "side {side}: {outer} {inner}");
            assert!(outer > 30.0 * 3f32.sqrt() / 2.0);
        }
    }

    #[test]
    fn pixel_ratio_scales_geometry() {
        let mut lo = canvas(100.0, 100.0, 1.0);
        let mut hi = canvas(100.0, 100.0, 2.0);
        lo.stroke_hexagon(Vec2::splat(50.0), 30.0, STROKE);
        hi.stroke_hexagon(Vec2::splat(50.0), 30.0, STROKE);
        for i in 0..VERTICES_PER_OUTLINE {
            assert!((vertex(&hi, i) - vertex(&lo, i) * 2.0).length() < 1e-3);
        }
    }

    #[test]
    fn vertex_color_carries_stroke_opacity() {
        let mut c = canvas(100.0, 100.0, 1.0);
        c.stroke_hexagon(Vec2::splat(50.0), 30.0, Stroke { alpha: 0.07, ..STROKE });
        let expected = Color::srgb_u8(139, 115, 85).to_linear();
        for color in c.colors() {
            assert!((color[0] - expected.red).abs() < 1e-6);
            assert!((color[3] - 0.07).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_alpha_or_radius_is_a_noop() {
        let mut c = canvas(64.0, 64.0, 1.0);
        c.stroke_hexagon(Vec2::splat(32.0), 20.0, Stroke { alpha: 0.0, ..STROKE });
        c.stroke_hexagon(Vec2::splat(32.0), 0.0, STROKE);
        assert_eq!(c.outline_count(), 0);
    }

    #[test]
    fn write_to_replaces_mesh_geometry() {
        let mut c = canvas(100.0, 100.0, 1.0);
        let mut mesh = OutlineMesh::empty_mesh();
        c.stroke_hexagon(Vec2::splat(50.0), 30.0, STROKE);
        c.write_to(&mut mesh);
        assert_eq!(mesh.count_vertices(), VERTICES_PER_OUTLINE);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(INDICES_PER_OUTLINE));

        c.clear();
        c.write_to(&mut mesh);
        assert_eq!(mesh.count_vertices(), 0);
    }
}
