use bevy::prelude::*;

use crate::math;

/// Rows and columns added past the minimum tiling count on each axis.
pub const OVERSCAN: u32 = 3;

/// One hexagon of the lattice, centered in surface-local logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Center position; origin top-left, y down.
    pub center: Vec2,
}

/// One generation of cells tiling a viewport with pointy-top hexagons.
///
/// Built as a whole and replaced as a whole; cells are never edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    cells: Vec<Cell>,
    radius: f32,
    columns: u32,
    rows: u32,
}

impl Lattice {
    /// Tiles `size` with hexagons of circumradius `radius`.
    ///
    /// Rows are `1.5·r` apart and columns `√3·r` apart, odd rows shifted right
    /// by half a column. One leading row and column plus [`OVERSCAN`] trailing
    /// ones keep the edges covered.
    ///
    /// Returns `None` when the surface is not measurable yet (zero, negative
    /// or non-finite size) or the radius is unusable.
    pub fn build(size: Vec2, radius: f32) -> Option<Self> {
        let measurable = |v: f32| v.is_finite() && v > 0.0;
        if !measurable(size.x) || !measurable(size.y) || !measurable(radius) {
            return None;
        }

        let pitch = math::hex_pitch(radius);
        let cols = (size.x / pitch.x).ceil() as i32 + OVERSCAN as i32;
        let rows = (size.y / pitch.y).ceil() as i32 + OVERSCAN as i32;

        let mut cells = Vec::with_capacity(((cols + 1) * (rows + 1)) as usize);
        for row in -1..rows {
            // rem_euclid keeps row -1 odd
            let stagger = if row.rem_euclid(2) == 1 {
                pitch.x / 2.0
            } else {
                0.0
            };
            for col in -1..cols {
                cells.push(Cell {
                    center: Vec2::new(col as f32 * pitch.x + stagger, row as f32 * pitch.y),
                });
            }
        }

        Some(Self {
            cells,
            radius,
            columns: (cols + 1) as u32,
            rows: (rows + 1) as u32,
        })
    }

    /// Cells in row-major order, top row first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Circumradius the lattice was built with.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Cells per row, including the leading overscan column.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows, including the leading overscan row.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a built lattice.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
