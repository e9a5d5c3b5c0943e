//! Axis-aligned geometry primitives shared by every engine algorithm.
//!
//! Two box representations are used: [`Rect`] (`x, y, w, h`) for shapes and
//! placement candidates, and [`Bounds`] (`min/max`) for accumulating unions.
//! All coordinates are page-space canvas units with y growing downward.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A rect of size `w`×`h` centered on `center`.
    #[must_use]
    pub fn centered_on(center: Point, w: f64, h: f64) -> Self {
        Self { x: center.x - w / 2.0, y: center.y - h / 2.0, w, h }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.x + self.w / 2.0, y: self.y + self.h / 2.0 }
    }

    /// Returns `true` when the boxes come closer than `gap` on both axes.
    ///
    /// Boxes separated by at least `gap` along either axis do not overlap;
    /// with `gap == 0` touching edges do not overlap either.
    #[must_use]
    pub fn overlaps(&self, other: &Rect, gap: f64) -> bool {
        self.x < other.right() + gap
            && self.right() + gap > other.x
            && self.y < other.bottom() + gap
            && self.bottom() + gap > other.y
    }
}

/// Axis-aligned box given by its extreme coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub fn from_rect(rect: &Rect) -> Self {
        Self { min_x: rect.x, min_y: rect.y, max_x: rect.right(), max_y: rect.bottom() }
    }

    /// Union of every rect in `rects`, or `None` when the iterator is empty.
    #[must_use]
    pub fn enclosing<'a, I>(rects: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects.into_iter().fold(None, |acc: Option<Bounds>, rect| {
            let b = Bounds::from_rect(rect);
            Some(acc.map_or(b, |a| a.union(&b)))
        })
    }

    #[must_use]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: (self.min_x + self.max_x) / 2.0, y: (self.min_y + self.max_y) / 2.0 }
    }

    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect { x: self.min_x, y: self.min_y, w: self.width(), h: self.height() }
    }
}
