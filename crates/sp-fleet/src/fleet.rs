//! `Fleet` (the drones) and `DroneRngs` (their per-drone RNG streams).
//!
//! The two are kept apart so the engine can hold `&mut Fleet` and
//! `&mut DroneRngs` at once while zipping them in the measurement pass.

use sp_core::{AgentRng, DroneId, SimConfig};

use crate::{Drone, DroneParams, DroneState};

// ── DroneRngs ─────────────────────────────────────────────────────────────────

/// One deterministic RNG per drone, derived from the global seed and the
/// drone id.  Used for measurement noise.
pub struct DroneRngs {
    inner: Vec<AgentRng>,
}

impl DroneRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, DroneId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, drone: DroneId) -> &mut AgentRng {
        &mut self.inner[drone.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

/// All drones, indexed by `DroneId`.
#[derive(Clone, Debug)]
pub struct Fleet {
    drones: Vec<Drone>,
}

impl Fleet {
    /// Wrap pre-built drones.  `drones[i]` must carry `DroneId(i)`.
    pub fn from_drones(drones: Vec<Drone>) -> Self {
        debug_assert!(drones.iter().enumerate().all(|(i, d)| d.id().index() == i));
        Self { drones }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.drones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }

    #[inline]
    pub fn get(&self, id: DroneId) -> Option<&Drone> {
        self.drones.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: DroneId) -> Option<&mut Drone> {
        self.drones.get_mut(id.index())
    }

    #[inline]
    pub fn as_slice(&self) -> &[Drone] {
        &self.drones
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Drone] {
        &mut self.drones
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Drone> {
        self.drones.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Drone> {
        self.drones.iter_mut()
    }

    /// Number of drones currently in `state`.
    pub fn count_in(&self, state: DroneState) -> usize {
        self.drones.iter().filter(|d| d.state() == state).count()
    }

    /// Measurements currently held on board across the fleet (not yet
    /// uploaded).
    pub fn pending_measurements(&self) -> usize {
        self.drones.iter().map(|d| d.measurements().len()).sum()
    }

    pub fn total_energy_consumed(&self) -> f64 {
        self.drones.iter().map(Drone::energy_consumed).sum()
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Drone;
    type IntoIter = std::slice::Iter<'a, Drone>;

    fn into_iter(self) -> Self::IntoIter {
        self.drones.iter()
    }
}

// ── FleetBuilder ──────────────────────────────────────────────────────────────

/// Builds a [`Fleet`] and its [`DroneRngs`] in one step.
///
/// ```rust
/// use sp_fleet::FleetBuilder;
///
/// let (fleet, rngs) = FleetBuilder::new(7, 42).build();
/// assert_eq!(fleet.len(), 7);
/// assert_eq!(rngs.len(), 7);
/// ```
pub struct FleetBuilder {
    count:  usize,
    seed:   u64,
    params: DroneParams,
}

impl FleetBuilder {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, params: DroneParams::default() }
    }

    /// Drone count, seed and drone parameters all taken from `config`.
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            count:  config.drone_count,
            seed:   config.seed,
            params: DroneParams::from_config(config),
        }
    }

    pub fn params(mut self, params: DroneParams) -> Self {
        self.params = params;
        self
    }

    /// Every drone starts `Active` at [`BASE`] with a full battery.
    pub fn build(self) -> (Fleet, DroneRngs) {
        let drones = (0..self.count as u32)
            .map(|i| Drone::at_base(DroneId(i), self.params))
            .collect();
        (Fleet { drones }, DroneRngs::new(self.count, self.seed))
    }
}
