/// Integer axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Vertical midpoint
    pub fn mid_y(&self) -> f64 {
        self.y as f64 + self.h as f64 / 2.0
    }

    /// Interiors overlap. Touching edges do not count, and empty rectangles
    /// never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        other.right() > self.x
            && other.bottom() > self.y
            && self.right() > other.x
            && self.bottom() > other.y
    }
}
