//! Drone states and the `(state, condition) → state` transition table.

use std::fmt;

/// The four phases of a drone's duty cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DroneState {
    /// Flying the waypoint queue with sensors on.
    Active,
    /// Hovering while a measurement completes.
    Measuring,
    /// Battery exhausted; flying straight home.
    Returning,
    /// On the pad at base.
    Charging,
}

impl DroneState {
    pub const ALL: [DroneState; 4] = [
        DroneState::Active,
        DroneState::Measuring,
        DroneState::Returning,
        DroneState::Charging,
    ];

    /// Energy units charged to the consumption counter per tick spent in
    /// this state.
    #[inline]
    pub fn energy_rate(self) -> f64 {
        match self {
            DroneState::Active    => 1.0,
            DroneState::Measuring => 1.5,
            DroneState::Returning => 0.8,
            DroneState::Charging  => 0.0,
        }
    }

    /// `true` for states that draw down the autonomy budget.
    #[inline]
    pub fn drains_battery(self) -> bool {
        !matches!(self, DroneState::Charging)
    }

    pub fn label(self) -> &'static str {
        match self {
            DroneState::Active    => "active",
            DroneState::Measuring => "measuring",
            DroneState::Returning => "returning",
            DroneState::Charging  => "charging",
        }
    }
}

impl fmt::Display for DroneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Events that can move a drone between states.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Raised from outside by `Drone::start_measurement`.
    MeasurementRequested,
    MeasurementDone,
    BatteryDepleted,
    ReachedBase,
    Recharged,
}

/// Every legal transition.  Pairs not listed leave the state unchanged.
pub const TRANSITIONS: [(DroneState, Condition, DroneState); 6] = [
    (DroneState::Active,    Condition::MeasurementRequested, DroneState::Measuring),
    (DroneState::Active,    Condition::BatteryDepleted,      DroneState::Returning),
    (DroneState::Measuring, Condition::MeasurementDone,      DroneState::Active),
    (DroneState::Measuring, Condition::BatteryDepleted,      DroneState::Returning),
    (DroneState::Returning, Condition::ReachedBase,          DroneState::Charging),
    (DroneState::Charging,  Condition::Recharged,            DroneState::Active),
];

/// Look up the successor of `state` under `condition`.
pub fn next_state(state: DroneState, condition: Condition) -> Option<DroneState> {
    TRANSITIONS
        .iter()
        .find(|(from, cond, _)| *from == state && *cond == condition)
        .map(|&(_, _, to)| to)
}
