//! `AnomalyField` — the intensity grid as a derived view of the live
//! anomaly set.
//!
//! # Update order
//!
//! ```text
//! update(now):
//!   ① Spawn    — one Bernoulli draw; on success a new anomaly at a uniform
//!                random cell with intensity in [0.5, 1.0).
//!   ② Clear    — every cell back to 0.
//!   ③ Deposit  — each anomaly adds its intensity to its rounded cell,
//!                then decays.
//!   ④ Diffuse  — every nonzero cell pushes value × diffusion / 8 into each
//!                in-bounds neighbour (read from the pre-diffusion grid).
//!   ⑤ Clamp    — cells capped at 1.0.
//!   ⑥ Expire   — anomalies at or below ALIVE_FLOOR are dropped.
//! ```
//!
//! The deposit uses the pre-decay intensity, so a fresh anomaly of intensity
//! 1.0 decaying at 0.95 shows 1.0 on its first tick and 0.95 on the next.

use sp_core::{AnomalyId, ForbiddenZone, Point, ProfileMode, SimConfig, SimRng, Tick};
use tracing::{debug, trace};

use crate::{Anomaly, AnomalyKind, FieldError, FieldResult, IntensityGrid};

/// Lower bound of the uniform spawn intensity draw.
const SPAWN_INTENSITY_MIN: f64 = 0.5;

/// 8-connected neighbourhood offsets `(dx, dy)`.
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// What one call to [`AnomalyField::update`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldUpdate {
    /// The anomaly spawned this tick, if any.
    pub spawned: Option<AnomalyId>,
    /// Number of anomalies that fell below the alive floor and were removed.
    pub expired: usize,
}

/// Owner of the intensity grid and the live anomaly set.
pub struct AnomalyField {
    grid:    IntensityGrid,
    /// Diffusion scratch buffer; reused every tick.
    scratch: Vec<f64>,
    /// Σ intensity × kind diffusion per cell (`ProfileMode::PerKind` only).
    weights: Vec<f64>,

    anomalies: Vec<Anomaly>,
    zones:     Vec<ForbiddenZone>,

    spawn_probability: f64,
    decay_rate:        f64,
    diffusion_factor:  f64,
    profile_mode:      ProfileMode,

    rng:  SimRng,
    seed: u64,
    initial_zones: Vec<ForbiddenZone>,

    next_id:               u64,
    total_spawned:         u64,
    total_detected:        u64,
    detection_latency_sum: u64,
}

impl AnomalyField {
    /// Build an empty field from `config`, seeding its spawn RNG with
    /// `config.seed` and registering `config.forbidden_zones`.
    pub fn new(config: &SimConfig) -> FieldResult<Self> {
        let (width, height) = (config.grid_width, config.grid_height);
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyGrid { width, height });
        }

        let mut field = Self {
            grid:    IntensityGrid::new(width, height),
            scratch: vec![0.0; width * height],
            weights: vec![0.0; width * height],
            anomalies: Vec::new(),
            zones:     Vec::new(),
            spawn_probability: config.spawn_probability,
            decay_rate:        config.decay_rate,
            diffusion_factor:  config.diffusion_factor,
            profile_mode:      config.profile_mode,
            rng:  SimRng::new(config.seed),
            seed: config.seed,
            initial_zones: Vec::new(),
            next_id:               0,
            total_spawned:         0,
            total_detected:        0,
            detection_latency_sum: 0,
        };
        for zone in &config.forbidden_zones {
            field.add_forbidden_zone(zone.clone())?;
        }
        field.initial_zones = field.zones.clone();
        Ok(field)
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    /// Advance the field by one tick.  `now` stamps any anomaly spawned.
    pub fn update(&mut self, now: Tick) -> FieldUpdate {
        let spawned = self.try_spawn(now);
        self.rebuild_grid();

        let before = self.anomalies.len();
        self.anomalies.retain(Anomaly::is_alive);
        let expired = before - self.anomalies.len();
        if expired > 0 {
            trace!(%now, expired, "anomalies expired");
        }

        FieldUpdate { spawned, expired }
    }

    fn try_spawn(&mut self, now: Tick) -> Option<AnomalyId> {
        if !self.rng.chance(self.spawn_probability) {
            return None;
        }
        let x = self.rng.gen_range(0..self.grid.width());
        let y = self.rng.gen_range(0..self.grid.height());
        let intensity = SPAWN_INTENSITY_MIN + self.rng.random::<f64>() * (1.0 - SPAWN_INTENSITY_MIN);
        let kind = AnomalyKind::ALL[self.rng.gen_range(0..AnomalyKind::ALL.len())];

        let id = self.insert_anomaly(Point::new(x as f64, y as f64), intensity, kind, now);
        debug!(%id, %kind, x, y, intensity, "anomaly spawned");
        Some(id)
    }

    /// Steps ②–⑤.
    fn rebuild_grid(&mut self) {
        self.grid.clear();
        let per_kind = self.profile_mode == ProfileMode::PerKind;
        if per_kind {
            self.weights.fill(0.0);
        }

        for anomaly in &mut self.anomalies {
            let (cx, cy) = anomaly.position.cell_round();
            let profile = anomaly.kind.profile();
            if let Some(i) = self.grid.index_of(cx, cy) {
                self.grid.cells_mut()[i] += anomaly.intensity();
                if per_kind {
                    self.weights[i] += anomaly.intensity() * profile.diffusion_factor;
                }
            }
            let rate = if per_kind { profile.decay_rate } else { self.decay_rate };
            anomaly.decay(rate);
        }

        let (width, height) = (self.grid.width(), self.grid.height());
        self.scratch.copy_from_slice(self.grid.as_slice());
        let source = self.grid.as_slice();
        for y in 0..height {
            for x in 0..width {
                let i = y * width + x;
                let value = source[i];
                if value <= 0.0 {
                    continue;
                }
                let diffusion = if per_kind {
                    self.weights[i] / value
                } else {
                    self.diffusion_factor
                };
                let spread = value * diffusion / 8.0;
                for (dx, dy) in NEIGHBOURS {
                    if let Some(n) = self.grid.index_of(x as i64 + dx, y as i64 + dy) {
                        self.scratch[n] += spread;
                    }
                }
            }
        }

        for (cell, &v) in self.grid.cells_mut().iter_mut().zip(&self.scratch) {
            *cell = v.clamp(0.0, 1.0);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Value of the cell containing `(x, y)`, found by flooring both
    /// coordinates.  Returns 0 outside the grid.  No interpolation.
    pub fn intensity_at(&self, x: f64, y: f64) -> f64 {
        let (cx, cy) = Point::new(x, y).cell_floor();
        self.grid.get(cx, cy).unwrap_or(0.0)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn grid(&self) -> &IntensityGrid {
        &self.grid
    }

    /// Live anomalies in spawn order.
    #[inline]
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Anomalies ever spawned or inserted since construction or reset.
    #[inline]
    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// Anomalies ever marked detected, including ones that have since expired.
    #[inline]
    pub fn total_detected(&self) -> u64 {
        self.total_detected
    }

    /// Mean creation-to-detection delta over every detection so far.
    pub fn mean_detection_latency_ticks(&self) -> Option<f64> {
        (self.total_detected > 0)
            .then(|| self.detection_latency_sum as f64 / self.total_detected as f64)
    }

    /// Live anomalies that no drone has detected yet.
    pub fn undetected_count(&self) -> usize {
        self.anomalies.iter().filter(|a| !a.is_detected()).count()
    }

    // ── Mutation outside the tick ─────────────────────────────────────────

    /// Add an anomaly directly (scenario seeding, tests).  Counts towards
    /// `total_spawned` exactly like a random spawn.  The grid reflects it
    /// from the next `update`.
    pub fn insert_anomaly(&mut self, position: Point, intensity: f64, kind: AnomalyKind, now: Tick) -> AnomalyId {
        let id = AnomalyId(self.next_id);
        self.next_id += 1;
        self.total_spawned += 1;
        self.anomalies.push(Anomaly::new(id, position, intensity, kind, now));
        id
    }

    /// Mark every undetected live anomaly strictly closer than `radius` to
    /// `at` as detected at `now`.  Returns the ids newly marked.
    pub fn mark_detected_near(&mut self, at: Point, radius: f64, now: Tick) -> Vec<AnomalyId> {
        let mut marked = Vec::new();
        for anomaly in &mut self.anomalies {
            if anomaly.position.distance(at) < radius && anomaly.mark_detected(now) {
                self.total_detected += 1;
                self.detection_latency_sum += now.since(anomaly.created);
                marked.push(anomaly.id);
            }
        }
        marked
    }

    // ── Forbidden zones ───────────────────────────────────────────────────

    /// Register a no-fly zone.  Zones that miss the grid entirely are
    /// rejected.
    pub fn add_forbidden_zone(&mut self, zone: ForbiddenZone) -> FieldResult<()> {
        let (w, h) = (self.grid.width() as i64, self.grid.height() as i64);
        if zone.right() <= 0 || zone.bottom() <= 0 || zone.x >= w || zone.y >= h {
            return Err(FieldError::ZoneOutsideGrid {
                name:   zone.name,
                width:  self.grid.width(),
                height: self.grid.height(),
            });
        }
        self.zones.push(zone);
        Ok(())
    }

    #[inline]
    pub fn forbidden_zones(&self) -> &[ForbiddenZone] {
        &self.zones
    }

    /// `true` unless `p` lies inside a forbidden zone.
    pub fn is_traversable(&self, p: Point) -> bool {
        !self.zones.iter().any(|z| z.contains(p))
    }

    /// Integer-cell variant of [`is_traversable`](Self::is_traversable).
    pub fn is_cell_traversable(&self, cx: i64, cy: i64) -> bool {
        !self.zones.iter().any(|z| z.contains_cell(cx, cy))
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Back to the state right after construction: no anomalies, zero grid,
    /// configured zones only, counters cleared and the spawn RNG reseeded.
    pub fn reset(&mut self) {
        self.anomalies.clear();
        self.grid.clear();
        self.zones = self.initial_zones.clone();
        self.rng = SimRng::new(self.seed);
        self.next_id = 0;
        self.total_spawned = 0;
        self.total_detected = 0;
        self.detection_latency_sum = 0;
    }
}
