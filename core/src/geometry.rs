// This code was basically taken from Xilem/Kurbo.
pub trait FloatExt {
    fn expand(&self) -> f32;
}

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32
}

/// Integer rectangle expressed by its edges, the way toolkit canvases
/// address bitmap regions.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32
}

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Size {
    pub width: f32,
    pub height: f32
}

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32
}

impl Size {
    pub const ZERO: Size = Size::new(0f32, 0f32);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }

    /// Returns a new `Size` with `width` and `height` rounded
    /// away from zero to the nearest integer, unless they are
    /// already an integer.
    #[inline]
    pub fn expand(self) -> Size {
        Size::new(self.width.expand(), self.height.expand())
    }

    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        let width = self.width.clamp(min.width, max.width);
        let height = self.height.clamp(min.height, max.height);

        Self { width, height }
    }
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::new(0f32, 0f32, size.width, size.height)
    }

    #[inline]
    pub fn set_size(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size { width: self.width, height: self.height }
    }

    #[inline]
    pub fn set_origin(&mut self, point: impl Into<Point>) {
        let point = point.into();

        self.x = point.x;
        self.y = point.y;
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl IntRect {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Overwrites all four edges in place.
    #[inline]
    pub fn set(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        self.left = left;
        self.top = top;
        self.right = right;
        self.bottom = bottom;
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

impl Point {
    pub const ZERO: Self = Self::new(0f32, 0f32);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl FloatExt for f32 {
    #[inline]
    fn expand(&self) -> f32 {
        self.abs().ceil().copysign(*self)
    }
}

impl From<(f32, f32)> for Point {
    fn from(point: (f32, f32)) -> Self {
        Self { x: point.0, y: point.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_rect_set_in_place() {
        let mut rect = IntRect::default();
        assert!(rect.is_empty());

        rect.set(10, 4, 50, 44);
        assert_eq!(rect.width(), 40);
        assert_eq!(rect.height(), 40);
    }

    #[test]
    fn expand_rounds_away_from_zero() {
        assert_eq!(1.2f32.expand(), 2f32);
        assert_eq!((-1.2f32).expand(), -2f32);
        assert_eq!(3f32.expand(), 3f32);
    }
}
