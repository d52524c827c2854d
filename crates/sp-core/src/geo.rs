//! Planar coordinates on the patrol grid.
//!
//! Positions are continuous `f64` cell coordinates: `(3.0, 4.0)` is the
//! top-left corner of cell `(3, 4)` as far as [`Point::cell_floor`] is
//! concerned, and its centre as far as [`Point::cell_round`] is concerned.
//! Both conventions are used by the field and must not be unified.

use std::fmt;

/// The base station.  Drones start, upload and recharge here.
pub const BASE: Point = Point { x: 0.0, y: 0.0 };

/// A continuous position on the grid.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Distance from the base station at the origin.
    #[inline]
    pub fn distance_to_base(self) -> f64 {
        self.distance(BASE)
    }

    /// Cell index by truncation towards negative infinity.
    #[inline]
    pub fn cell_floor(self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }

    /// Nearest cell index (half rounds up, matching `floor(v + 0.5)`).
    #[inline]
    pub fn cell_round(self) -> (i64, i64) {
        ((self.x + 0.5).floor() as i64, (self.y + 0.5).floor() as i64)
    }

    /// Move towards `target` by at most `max_step`, never overshooting.
    ///
    /// Returns `self` unchanged when already within `0.1` of `target`.
    pub fn step_toward(self, target: Point, max_step: f64) -> Point {
        let dist = self.distance(target);
        if dist < 0.1 {
            return self;
        }
        let ratio = (max_step / dist).min(1.0);
        Point {
            x: self.x + (target.x - self.x) * ratio,
            y: self.y + (target.y - self.y) * ratio,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── ForbiddenZone ─────────────────────────────────────────────────────────────

/// A rectangular no-fly area covering cells `[x, x+width) × [y, y+height)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForbiddenZone {
    pub x:      i64,
    pub y:      i64,
    pub width:  i64,
    pub height: i64,
    /// Descriptive label, e.g. "Building A".
    pub name:   String,
}

impl ForbiddenZone {
    pub fn new(x: i64, y: i64, width: i64, height: i64, name: impl Into<String>) -> Self {
        Self { x, y, width, height, name: name.into() }
    }

    /// `true` if the continuous point lies inside the zone.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x as f64
            && p.x < self.right() as f64
            && p.y >= self.y as f64
            && p.y < self.bottom() as f64
    }

    /// `true` if the integer cell lies inside the zone.
    #[inline]
    pub fn contains_cell(&self, cx: i64, cy: i64) -> bool {
        cx >= self.x && cx < self.right() && cy >= self.y && cy < self.bottom()
    }

    #[inline]
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }
}
