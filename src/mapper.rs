//! World-grid to screen transform.
//!
//! The simulation never sees screen units; a renderer fits a `Layout` to its
//! surface once per frame and maps every sprite through it.  Each grid step
//! adds a padding gap on top of the scaled cell, so cells never touch.

use glam::Vec2;

use crate::consts::{COLUMNS, GAME_ROWS};

/// Share of each screen axis kept free as a margin.
const MARGIN: f32 = 0.1;
/// Gap between neighbouring cells, as a share of the usable extent.
const GAP: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Screen units per world unit.
    pub scale: f32,
    pub offset: Vec2,
    /// Extra screen distance per whole world unit.
    pub padding: Vec2,
}

impl Layout {
    /// Fit the `COLUMNS × GAME_ROWS` grid into a screen of `size` units.
    pub fn fit(size: Vec2) -> Self {
        let usable = size * (1.0 - MARGIN);
        let padding = usable * GAP;

        let cell_x = (usable.x - padding.x * COLUMNS as f32) / (COLUMNS + 1) as f32;
        let cell_y = (usable.y - padding.y * GAME_ROWS as f32) / GAME_ROWS as f32;
        let scale = cell_x.min(cell_y).max(0.0);

        let offset = Vec2::new(
            size.x - cell_x * COLUMNS as f32 - padding.x * COLUMNS as f32,
            size.y * MARGIN,
        );

        Self {
            scale,
            offset,
            padding,
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.offset + self.padding * world
    }

    /// Screen extent of a world-sized box.
    pub fn size_to_screen(&self, size: Vec2) -> Vec2 {
        size * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_offset() {
        let layout = Layout::fit(Vec2::new(800.0, 600.0));
        assert_eq!(layout.world_to_screen(Vec2::ZERO), layout.offset);
    }

    #[test]
    fn fits_the_tighter_axis() {
        let layout = Layout::fit(Vec2::new(800.0, 600.0));
        // 600 * 0.9 = 540 usable, 27 padding, (540 - 27 * 8) / 8 = 40.5
        assert!((layout.scale - 40.5).abs() < 1e-3);
        assert!((layout.offset.y - 60.0).abs() < 1e-3);
    }

    #[test]
    fn neighbouring_cells_are_separated_by_padding() {
        let layout = Layout::fit(Vec2::new(800.0, 600.0));
        let a = layout.world_to_screen(Vec2::new(1.0, 1.0));
        let b = layout.world_to_screen(Vec2::new(2.0, 1.0));
        assert!((b.x - a.x - (layout.scale + layout.padding.x)).abs() < 1e-3);
        assert_eq!(a.y, b.y);
    }

    #[test]
    fn degenerate_screen_never_yields_negative_scale() {
        let layout = Layout::fit(Vec2::ZERO);
        assert_eq!(layout.scale, 0.0);
    }
}
