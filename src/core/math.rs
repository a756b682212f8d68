// Math utilities and helper functions

/// Axis-aligned rectangle in canvas pixel space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Integer pixel bounds `[x0, x1) x [y0, y1)` produced by clipping a `Rect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSpan {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width` x `height` surface
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Clip to a `width` x `height` surface, returning the pixels whose centers lie inside.
    /// Returns `None` when nothing is left.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<PixelSpan> {
        if self.is_empty() {
            return None;
        }

        // A pixel is covered when its center (p + 0.5) lies in [start, end)
        let first = |start: f32| (start - 0.5).ceil().max(0.0);
        let last = |end: f32, limit: u32| (end - 0.5).ceil().clamp(0.0, limit as f32);

        let x0 = first(self.x);
        let y0 = first(self.y);
        let x1 = last(self.right(), width);
        let y1 = last(self.bottom(), height);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some(PixelSpan {
            x0: x0 as u32,
            y0: y0 as u32,
            x1: x1 as u32,
            y1: y1 as u32,
        })
    }
}

#[cfg(test)]
impl PixelSpan {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}
