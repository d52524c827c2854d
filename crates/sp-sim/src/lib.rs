//! `sp-sim` — the tick loop for the swarm_patrol simulator.
//!
//! # Tick order
//!
//! ```text
//! tick(now):                                   (no-op while stopped)
//!   ① Field     — spawn, decay, diffuse, clamp, expire.
//!   ② Drones    — every drone's state machine advances by one tick
//!                 (parallel with the `parallel` feature).
//!   ③ Settle    — in DroneId order: log transitions, hand uploads to the
//!                 observer and the archive.
//!     Sense     — in the same pass, an Active drone over a cell above the
//!                 detection threshold records a noisy reading, marks
//!                 anomalies within the detection radius, and may start
//!                 hovering to measure.
//!   ④ Retask    — on ticks 0, n, 2n, … the coordinator's policy may pull
//!                 drones towards unattended hotspots.
//!   ⑤ Metrics   — snapshot when the interval has elapsed; record trails.
//!   ⑥ Clock     — advance.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs step ② on Rayon's thread pool.                    |
//! | `serde`    | Forwards `serde` to the data crates.                   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sp_core::SimConfig;
//! use sp_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! sim.start();
//! sim.run_ticks(1_000, &mut NoopObserver);
//! println!("{} snapshots", sim.snapshots().len());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{EventLog, TickReport, Trajectories};
pub use sim::Sim;
