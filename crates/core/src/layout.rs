//! Desk layout geometry
//!
//! Desks are laid out row-major in equal cells separated by a fixed gap.
//! The same geometry is used to draw desks and to resolve pointer
//! positions back to seat indices, so a release over a gap or outside the
//! grid never resolves to a seat.

use crate::models::SeatId;

/// Gap between neighbouring desks, in logical pixels
pub const DESK_GAP: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub rows: usize,
    pub cols: usize,
    pub gap: f32,
}

impl GridGeometry {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            gap: DESK_GAP,
        }
    }

    /// Width and height of one desk for a grid area of the given size
    pub fn desk_size(&self, width: f32, height: f32) -> (f32, f32) {
        (
            Self::cell_extent(width, self.cols, self.gap),
            Self::cell_extent(height, self.rows, self.gap),
        )
    }

    /// Seat under a point relative to the grid's top-left corner
    pub fn hit_test(&self, x: f32, y: f32, width: f32, height: f32) -> Option<SeatId> {
        let col = Self::axis_hit(x, width, self.cols, self.gap)?;
        let row = Self::axis_hit(y, height, self.rows, self.gap)?;
        Some(row * self.cols + col)
    }

    fn cell_extent(total: f32, count: usize, gap: f32) -> f32 {
        if count == 0 {
            return 0.0;
        }
        let gaps = gap * (count - 1) as f32;
        ((total - gaps) / count as f32).max(0.0)
    }

    fn axis_hit(pos: f32, total: f32, count: usize, gap: f32) -> Option<usize> {
        if !(0.0..total).contains(&pos) {
            return None;
        }
        let extent = Self::cell_extent(total, count, gap);
        if extent <= 0.0 {
            return None;
        }
        let pitch = extent + gap;
        let index = (pos / pitch).floor() as usize;
        let offset = pos - index as f32 * pitch;
        (index < count && offset < extent).then_some(index)
    }
}
