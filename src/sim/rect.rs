//! Axis-aligned rectangle primitive
//!
//! Everything that occupies space on the field (farmers, crops, scarecrows)
//! is an axis-aligned box; all collision in the game is rectangle overlap.

use glam::Vec2;

/// An axis-aligned rectangle in field coordinates (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict-inequality overlap test: rectangles that merely touch along an
    /// edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Top-left corner as a vector
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Clamp the rectangle's position so it lies fully inside a
    /// `field_w x field_h` field.
    pub fn clamp_into(&mut self, field_w: f32, field_h: f32) {
        self.x = self.x.clamp(0.0, field_w - self.w);
        self.y = self.y.clamp(0.0, field_h - self.h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(!a.overlaps(&corner));
    }

    #[test]
    fn disjoint_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(50.0, 50.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn center_point() {
        let r = Rect::new(10.0, 20.0, 30.0, 50.0);
        assert_eq!(r.center(), glam::Vec2::new(25.0, 45.0));
    }

    #[test]
    fn clamp_into_field() {
        let mut r = Rect::new(-5.0, 600.0, 34.0, 34.0);
        r.clamp_into(900.0, 540.0);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 540.0 - 34.0);
    }

    proptest! {
        #[test]
        fn clamp_into_always_inside(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
        ) {
            let mut r = Rect::new(x, y, 34.0, 34.0);
            r.clamp_into(900.0, 540.0);
            prop_assert!(r.x >= 0.0 && r.x <= 900.0 - r.w);
            prop_assert!(r.y >= 0.0 && r.y <= 540.0 - r.h);
        }

        #[test]
        fn overlap_is_symmetric(
            ax in 0.0f32..200.0, ay in 0.0f32..200.0,
            bx in 0.0f32..200.0, by in 0.0f32..200.0,
            w in 1.0f32..50.0, h in 1.0f32..50.0,
        ) {
            let a = Rect::new(ax, ay, w, h);
            let b = Rect::new(bx, by, w, h);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
