//! Tiled 2x2 window geometry.
//!
//! The screen is split into four cells in row-major order. Each cell is then
//! grown on every side: outer screen edges by `outer_margin` (plus
//! `border_offset` on the left and top, where the window manager hides an
//! invisible border), inner seams by `seam_margin` so neighbours overlap
//! instead of leaving a gap.

use mediawall_config::{GeometryConfig, WALL_SLOTS};
use serde::{Deserialize, Serialize};

/// Screen dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// A window rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x as i64 && x < self.right() && y >= self.y as i64 && y < self.bottom()
    }
}

/// Stateless planner for the four window rectangles.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryPlanner {
    config: GeometryConfig,
}

impl GeometryPlanner {
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Rectangle for `slot` on a screen of the given size.
    ///
    /// Returns `None` for slots outside `0..WALL_SLOTS`.
    pub fn plan(&self, screen: ScreenSize, slot: usize) -> Option<Rect> {
        if slot >= WALL_SLOTS {
            return None;
        }

        let col = (slot % 2) as u32;
        let row = (slot / 2) as u32;
        let (left, right) = self.span(screen.width, col);
        let (top, bottom) = self.span(screen.height, row);

        Some(Rect {
            x: clamp_i32(left),
            y: clamp_i32(top),
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        })
    }

    /// Rectangles for every slot, in slot order.
    pub fn plan_all(&self, screen: ScreenSize) -> [Rect; WALL_SLOTS] {
        std::array::from_fn(|slot| {
            self.plan(screen, slot).unwrap_or(Rect {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            })
        })
    }

    /// Start and end of cell `index` (0 or 1) along one axis of `extent` pixels.
    fn span(&self, extent: u32, index: u32) -> (i64, i64) {
        let half = (extent / 2) as i64;
        let outer = self.config.outer_margin as i64;
        let seam = self.config.seam_margin as i64;
        let border = self.config.border_offset as i64;

        if index == 0 {
            (-(outer + border), half + seam)
        } else {
            // The far cell absorbs the odd pixel of an odd extent.
            (half - seam, extent as i64 + outer)
        }
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
