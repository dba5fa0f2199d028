use std::ops::{Add, Sub};

use crate::Vec2;

/// Axis-aligned rectangle described by its top-left origin and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T> Rect<T> {
    pub fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            origin: Vec2::zero(),
            size: Vec2::zero(),
        }
    }
}

impl<T: Sub<Output = T> + Copy> Rect<T> {
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }
}

impl<T: Add<Output = T> + Copy> Rect<T> {
    pub fn min(&self) -> Vec2<T> {
        self.origin
    }

    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl<T: Add<Output = T> + Sub<Output = T> + PartialOrd + Copy> Rect<T> {
    /// Overlap of two rectangles, or `None` when they are disjoint.
    pub fn intersection(self, other: Self) -> Option<Self> {
        let min_x = partial_max(self.origin.x, other.origin.x);
        let min_y = partial_max(self.origin.y, other.origin.y);
        let max_x = partial_min(self.max().x, other.max().x);
        let max_y = partial_min(self.max().y, other.max().y);

        if min_x < max_x && min_y < max_y {
            Some(Self::from_min_max(
                Vec2::new(min_x, min_y),
                Vec2::new(max_x, max_y),
            ))
        } else {
            None
        }
    }
}

fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { b } else { a }
}

fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect<f32> {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn min_max() {
        let r = rect(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.min(), Vec2::new(1.0, 2.0));
        assert_eq!(r.max(), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn intersection_overlapping() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(2.0, 2.0, 4.0, 4.0);
        let i = a.intersection(b).unwrap();
        assert_eq!(i, rect(2.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn intersection_disjoint_is_none() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(5.0, 5.0, 1.0, 1.0);
        assert!(a.intersection(b).is_none());
    }

    #[test]
    fn intersection_touching_edges_is_none() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(2.0, 0.0, 2.0, 2.0);
        assert!(a.intersection(b).is_none());
    }
}
