//! `sp-field` — the environment drones patrol.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`anomaly`] | `Anomaly`, `AnomalyKind`, `KindProfile` table, `Detection`  |
//! | [`grid`]    | `IntensityGrid` — dense row-major `[0, 1]` cell values      |
//! | [`field`]   | `AnomalyField` — spawn, decay, diffuse, clamp, expire       |
//! | [`error`]   | `FieldError`, `FieldResult<T>`                              |
//!
//! # Ownership
//!
//! `AnomalyField` is the only owner of the grid and the live anomaly set.
//! Everything else reads them through `&AnomalyField`; the grid is rebuilt
//! from the anomaly set on every [`AnomalyField::update`] and never patched
//! from outside.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public data types.      |

pub mod anomaly;
pub mod error;
pub mod field;
pub mod grid;

#[cfg(test)]
mod tests;

pub use anomaly::{ALIVE_FLOOR, Anomaly, AnomalyKind, Detection, KindProfile};
pub use error::{FieldError, FieldResult};
pub use field::{AnomalyField, FieldUpdate};
pub use grid::IntensityGrid;
