//! Anomaly point sources and their kind profiles.

use std::fmt;

use sp_core::{AnomalyId, Point, Tick};

/// An anomaly whose intensity falls to or below this value is removed.
pub const ALIVE_FLOOR: f64 = 0.01;

// ── Kind profiles ─────────────────────────────────────────────────────────────

/// The physical nature of an anomaly.  Fixed at spawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AnomalyKind {
    Pollution = 0,
    StructuralFailure = 1,
    Radiation = 2,
}

/// Static per-kind coefficients, used when the field runs in
/// `ProfileMode::PerKind`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KindProfile {
    /// Per-tick multiplicative decay (1.0 = no decay).
    pub decay_rate:       f64,
    /// Fraction of a cell's intensity spread to its 8 neighbours per tick.
    pub diffusion_factor: f64,
    pub label:            &'static str,
}

/// Indexed by `AnomalyKind as usize`.
const PROFILES: [KindProfile; 3] = [
    KindProfile { decay_rate: 0.90, diffusion_factor: 0.15, label: "pollution" },
    KindProfile { decay_rate: 0.98, diffusion_factor: 0.05, label: "structural failure" },
    KindProfile { decay_rate: 0.85, diffusion_factor: 0.10, label: "radiation" },
];

impl AnomalyKind {
    pub const ALL: [AnomalyKind; 3] = [
        AnomalyKind::Pollution,
        AnomalyKind::StructuralFailure,
        AnomalyKind::Radiation,
    ];

    #[inline]
    pub fn profile(self) -> &'static KindProfile {
        &PROFILES[self as usize]
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().label)
    }
}

// ── Detection ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Detection {
    #[default]
    Undetected,
    Detected(Tick),
}

// ── Anomaly ───────────────────────────────────────────────────────────────────

/// A transient point source of intensity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anomaly {
    pub id:       AnomalyId,
    pub position: Point,
    pub kind:     AnomalyKind,
    /// Tick during which the anomaly spawned.
    pub created:  Tick,
    intensity:    f64,
    peak:         f64,
    detection:    Detection,
}

impl Anomaly {
    /// `intensity` is clamped to `[0, 1]`.
    pub fn new(id: AnomalyId, position: Point, intensity: f64, kind: AnomalyKind, created: Tick) -> Self {
        let intensity = intensity.clamp(0.0, 1.0);
        Self {
            id,
            position,
            kind,
            created,
            intensity,
            peak: intensity,
            detection: Detection::Undetected,
        }
    }

    #[inline]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Intensity at spawn.
    #[inline]
    pub fn peak_intensity(&self) -> f64 {
        self.peak
    }

    #[inline]
    pub fn decay(&mut self, rate: f64) {
        self.intensity *= rate;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.intensity > ALIVE_FLOOR
    }

    #[inline]
    pub fn detection(&self) -> Detection {
        self.detection
    }

    #[inline]
    pub fn is_detected(&self) -> bool {
        matches!(self.detection, Detection::Detected(_))
    }

    /// Record the first detection.  Returns `false` (and changes nothing) if
    /// the anomaly was already detected.
    pub fn mark_detected(&mut self, now: Tick) -> bool {
        if self.is_detected() {
            return false;
        }
        self.detection = Detection::Detected(now);
        true
    }

    /// Ticks from creation to first detection.
    pub fn detection_latency(&self) -> Option<u64> {
        match self.detection {
            Detection::Detected(at) => Some(at.since(self.created)),
            Detection::Undetected => None,
        }
    }
}
