//! `sp-coord` — who flies where.
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`plan`]        | `Region`, `CoveragePlan` (boustrophedon sweeps)        |
//! | [`retask`]      | `RetaskPolicy`, `HotspotRetasker`, `NoRetasking`       |
//! | [`coordinator`] | `CoverageCoordinator`: plan + policy + cadence         |
//!
//! The grid is split into `⌈√N⌉` region columns.  Each drone sweeps its own
//! region row by row, alternating direction, then heads home.  Every
//! `retask_interval_ticks` the policy may pull a drone off its sweep towards
//! an unattended hotspot.

pub mod coordinator;
pub mod plan;
pub mod retask;


pub use coordinator::CoverageCoordinator;
pub use plan::{CoveragePlan, Region};
pub use retask::{HOTSPOT_RADIUS, HOTSPOT_THRESHOLD, HotspotRetasker, NoRetasking, Retask, RetaskPolicy};
