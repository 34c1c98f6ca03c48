//! Axis-aligned rectangle geometry
//!
//! Everything in the world collides as an axis-aligned rectangle in
//! screen-style coordinates: x grows to the right, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (left <= right, top <= bottom)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Build from a top-left corner and a size
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, pos.x + size.x, pos.y + size.y)
    }

    /// Square of side `size` centered on `center`
    pub fn centered_square(center: Vec2, size: f32) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, center.x + half, center.y + half)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Overlap test that ignores penetration of `slack` or less on either axis
    #[inline]
    pub fn penetrates(&self, other: &Rect, slack: f32) -> bool {
        self.left < other.right - slack
            && self.right > other.left + slack
            && self.top < other.bottom - slack
            && self.bottom > other.top + slack
    }

    /// Penetration depth on each axis (zero when not overlapping on that axis)
    pub fn overlap_depth(&self, other: &Rect) -> Vec2 {
        let x = (self.right.min(other.right) - self.left.max(other.left)).max(0.0);
        let y = (self.bottom.min(other.bottom) - self.top.max(other.top)).max(0.0);
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_new_normalizes_corners() {
        let r = Rect::new(10.0, 20.0, 0.0, 5.0);
        assert_eq!(r.left, 0.0);
        assert_eq!(r.right, 10.0);
        assert_eq!(r.top, 5.0);
        assert_eq!(r.bottom, 20.0);
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::from_pos_size(Vec2::new(0.0, 0.0), Vec2::splat(16.0));
        let b = Rect::from_pos_size(Vec2::new(16.0, 0.0), Vec2::splat(16.0));
        assert!(!a.intersects(&b));

        let c = Rect::from_pos_size(Vec2::new(15.0, 15.0), Vec2::splat(16.0));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_penetrates_ignores_slack() {
        let a = Rect::from_pos_size(Vec2::ZERO, Vec2::splat(16.0));
        let grazing = Rect::from_pos_size(Vec2::new(15.9999, 0.0), Vec2::splat(16.0));
        assert!(a.intersects(&grazing));
        assert!(!a.penetrates(&grazing, 1e-3));
    }

    #[test]
    fn test_centered_square() {
        let r = Rect::centered_square(Vec2::new(100.0, 50.0), 64.0);
        assert_eq!(r, Rect::new(68.0, 18.0, 132.0, 82.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_overlap_depth() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(8.0, 5.0, 20.0, 20.0);
        assert_eq!(a.overlap_depth(&b), Vec2::new(2.0, 5.0));
        let far = Rect::new(30.0, 30.0, 40.0, 40.0);
        assert_eq!(a.overlap_depth(&far), Vec2::ZERO);
    }
}
