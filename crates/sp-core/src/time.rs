//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  Every tick covers the
//! same fixed number of simulated milliseconds, held in `SimClock`:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! Integer ticks keep all countdown arithmetic exact, which is what lets a
//! full drain/recharge cycle land back on exactly the configured autonomy.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `true` on every `interval`-th tick, starting with tick 0.
    ///
    /// An interval of zero never fires.
    #[inline]
    pub fn is_every(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps tick counts to simulated milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated milliseconds one tick represents.
    pub tick_duration_ms: u64,
    /// The tick currently being (or about to be) processed.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u64) -> Self {
        Self { tick_duration_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Rewind to tick 0.
    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }

    /// Simulated milliseconds elapsed before `current_tick` started.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.ms_at(self.current_tick)
    }

    /// Simulated milliseconds at the start of `tick`.
    #[inline]
    pub fn ms_at(&self, tick: Tick) -> u64 {
        tick.0 * self.tick_duration_ms
    }

    /// Simulated seconds at the start of `tick`, for display and export.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        self.ms_at(tick) as f64 / 1000.0
    }

    /// Tick duration in seconds, the unit movement speeds are expressed in.
    #[inline]
    pub fn tick_duration_secs(&self) -> f64 {
        self.tick_duration_ms as f64 / 1000.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.secs_at(self.current_tick))
    }
}
