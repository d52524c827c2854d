//! `sp-core` — foundational types for the `swarm_patrol` simulator.
//!
//! This crate is a dependency of every other `sp-*` crate.  It has no `sp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `DroneId`, `AnomalyId`                                |
//! | [`geo`]         | `Point`, `ForbiddenZone`, `BASE`                      |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `SimConfig`, `Scenario`, `ProfileMode`                |
//! | [`rng`]         | `AgentRng` (per-drone), `SimRng` (global)             |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ProfileMode, Scenario, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{BASE, ForbiddenZone, Point};
pub use ids::{AnomalyId, DroneId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
