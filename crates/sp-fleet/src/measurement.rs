//! Sensor readings carried by a drone until it uploads at base.

use sp_core::{Point, Tick};

/// One reading.  Immutable once recorded.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Measured intensity, including sensor noise (may leave `[0, 1]`).
    pub intensity: f64,
    pub tick:      Tick,
    pub x:         f64,
    pub y:         f64,
}

impl Measurement {
    pub fn new(intensity: f64, tick: Tick, at: Point) -> Self {
        Self { intensity, tick, x: at.x, y: at.y }
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
