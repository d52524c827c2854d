//! `sp-fleet` — the drones.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`state`]       | `DroneState`, `Condition`, the transition table           |
//! | [`drone`]       | `Drone`, `DroneParams`, `StepOutcome`, `Transition`       |
//! | [`measurement`] | `Measurement`                                             |
//! | [`fleet`]       | `Fleet`, `DroneRngs`, `FleetBuilder`                      |
//!
//! # State machine
//!
//! ```text
//!            start_measurement()            countdown ≤ 0
//!   Active ───────────────────────▶ Measuring ─────────────▶ Active
//!     │                                 │
//!     │ autonomy ≤ 0                    │ autonomy ≤ 0
//!     ▼                                 ▼
//!   Returning ◀─────────────────────────┘
//!     │ within 0.5 of base (upload log)
//!     ▼
//!   Charging ── countdown ≤ 0 (autonomy restored) ──▶ Active
//! ```
//!
//! There is no terminal state: a drone cycles for the whole run.

pub mod drone;
pub mod fleet;
pub mod measurement;
pub mod state;


pub use drone::{ARRIVAL_RADIUS, Drone, DroneParams, StepOutcome, Transition};
pub use fleet::{DroneRngs, Fleet, FleetBuilder};
pub use measurement::Measurement;
pub use state::{Condition, DroneState};
