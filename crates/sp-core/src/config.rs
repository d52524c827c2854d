//! Simulation configuration.
//!
//! `SimConfig` is built once (from `Default`, a [`Scenario`], or a config
//! file via the `serde` feature), validated, and then handed by value or
//! reference to every component that needs it.  Nothing reads configuration
//! from global state.

use crate::{CoreError, CoreResult, ForbiddenZone, SimClock};

// ── ProfileMode ───────────────────────────────────────────────────────────────

/// Where anomaly decay and diffusion coefficients come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProfileMode {
    /// Every anomaly uses `SimConfig::decay_rate` and
    /// `SimConfig::diffusion_factor`.
    #[default]
    Uniform,
    /// Each anomaly uses the static profile of its kind.
    PerKind,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Grid size in cells.
    pub grid_width:  usize,
    pub grid_height: usize,

    /// Simulated milliseconds per tick.
    pub tick_duration_ms: u64,

    /// Number of drones in the fleet.
    pub drone_count: usize,

    /// Drone cruise speed in cells per simulated second.
    pub drone_speed: f64,

    /// Full battery, expressed as flight time in milliseconds.
    pub autonomy_ms: i64,

    /// Time on the charging pad before a drone flies again.
    pub recharge_ms: i64,

    /// Time a drone hovers to take a measurement.
    pub measurement_ms: i64,

    /// Probability of one anomaly spawning per tick.
    pub spawn_probability: f64,

    /// Fraction of a cell's intensity spread (in total) to its 8 neighbours.
    pub diffusion_factor: f64,

    /// Per-tick multiplicative intensity decay.
    pub decay_rate: f64,

    /// Cells above this intensity count as covered and trigger detection.
    pub detection_threshold: f64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Run the retasking coordinator every N ticks (0 disables it).
    pub retask_interval_ticks: u64,

    /// Minimum simulated time between two metrics snapshots.
    pub snapshot_interval_ms: u64,

    /// Peak-to-peak amplitude of the noise added to recorded measurements.
    pub measurement_noise: f64,

    /// Undetected anomalies closer than this to a detecting drone are marked.
    pub detection_radius: f64,

    pub profile_mode: ProfileMode,

    /// No-fly areas.  Coverage planning skips cells inside them; movement
    /// ignores them.
    pub forbidden_zones: Vec<ForbiddenZone>,

    /// Maximum number of retained event-log lines (oldest dropped first).
    pub event_log_capacity: usize,

    /// Number of recent positions kept per drone for trail rendering.
    pub trail_length: usize,

    /// Put a drone into the measuring phase when it detects something.
    pub measure_on_detection: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width:            50,
            grid_height:           50,
            tick_duration_ms:      200,
            drone_count:           7,
            drone_speed:           2.0,
            autonomy_ms:           30 * 60 * 1000,
            recharge_ms:           10 * 60 * 1000,
            measurement_ms:        10 * 1000,
            spawn_probability:     0.05,
            diffusion_factor:      0.1,
            decay_rate:            0.95,
            detection_threshold:   0.3,
            seed:                  42,
            retask_interval_ticks: 30,
            snapshot_interval_ms:  5_000,
            measurement_noise:     0.1,
            detection_radius:      1.0,
            profile_mode:          ProfileMode::Uniform,
            forbidden_zones:       Vec::new(),
            event_log_capacity:    1_000,
            trail_length:          64,
            measure_on_detection:  true,
        }
    }
}

impl SimConfig {
    /// Default configuration with a scenario's anomaly parameters applied.
    pub fn for_scenario(scenario: Scenario) -> Self {
        let mut config = Self::default();
        scenario.apply(&mut config);
        config
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    /// Total number of grid cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Reject configurations the kernel cannot run meaningfully.
    pub fn validate(&self) -> CoreResult<()> {
        let fail = |msg: String| Err(CoreError::Config(msg));

        if self.grid_width == 0 || self.grid_height == 0 {
            return fail(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        if self.tick_duration_ms == 0 {
            return fail("tick_duration_ms must be positive".into());
        }
        if !(self.drone_speed > 0.0) {
            return fail(format!("drone_speed must be positive, got {}", self.drone_speed));
        }
        if self.autonomy_ms <= 0 {
            return fail(format!("autonomy_ms must be positive, got {}", self.autonomy_ms));
        }
        if self.recharge_ms < 0 || self.measurement_ms < 0 {
            return fail("recharge_ms and measurement_ms must not be negative".into());
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return fail(format!(
                "spawn_probability must be in [0, 1], got {}",
                self.spawn_probability
            ));
        }
        if !(self.decay_rate > 0.0 && self.decay_rate <= 1.0) {
            return fail(format!("decay_rate must be in (0, 1], got {}", self.decay_rate));
        }
        if !(self.diffusion_factor >= 0.0) {
            return fail(format!(
                "diffusion_factor must not be negative, got {}",
                self.diffusion_factor
            ));
        }
        if !(0.0..=1.0).contains(&self.detection_threshold) {
            return fail(format!(
                "detection_threshold must be in [0, 1], got {}",
                self.detection_threshold
            ));
        }
        for zone in &self.forbidden_zones {
            if zone.width <= 0 || zone.height <= 0 {
                return fail(format!("forbidden zone '{}' has an empty extent", zone.name));
            }
        }
        Ok(())
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// Pre-defined anomaly regimes for experiments.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scenario {
    NoAnomalies,
    Sparse,
    Normal,
    HeavyPollution,
    RapidlySpreading,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::NoAnomalies,
        Scenario::Sparse,
        Scenario::Normal,
        Scenario::HeavyPollution,
        Scenario::RapidlySpreading,
    ];

    /// `(spawn_probability, decay_rate, diffusion_factor)`.
    pub fn parameters(self) -> (f64, f64, f64) {
        match self {
            Scenario::NoAnomalies      => (0.00, 0.90, 0.05),
            Scenario::Sparse           => (0.02, 0.93, 0.08),
            Scenario::Normal           => (0.05, 0.95, 0.10),
            Scenario::HeavyPollution   => (0.15, 0.92, 0.15),
            Scenario::RapidlySpreading => (0.08, 0.90, 0.20),
        }
    }

    /// Overwrite the anomaly parameters of `config`, leaving the rest alone.
    pub fn apply(self, config: &mut SimConfig) {
        let (spawn, decay, diffusion) = self.parameters();
        config.spawn_probability = spawn;
        config.decay_rate = decay;
        config.diffusion_factor = diffusion;
    }

    pub fn label(self) -> &'static str {
        match self {
            Scenario::NoAnomalies      => "no anomalies",
            Scenario::Sparse           => "sparse anomalies",
            Scenario::Normal           => "normal",
            Scenario::HeavyPollution   => "heavy pollution",
            Scenario::RapidlySpreading => "rapidly spreading",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Scenario {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "none" | "no_anomalies"  => Ok(Scenario::NoAnomalies),
            "sparse"                 => Ok(Scenario::Sparse),
            "normal"                 => Ok(Scenario::Normal),
            "heavy" | "heavy_pollution" => Ok(Scenario::HeavyPollution),
            "rapid" | "rapidly_spreading" => Ok(Scenario::RapidlySpreading),
            other => Err(CoreError::Config(format!("unknown scenario '{other}'"))),
        }
    }
}
