//! `ca-core`: foundational types for the control-affine agent simulator.
//!
//! This crate is a dependency of every other `ca-*` crate.  It has no `ca-*`
//! dependencies and minimal external ones (`glam` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `ObstacleId`, `ConditionId`                               |
//! | [`pose`]    | `Pose`: position and heading in simulation coordinates    |
//! | [`time`]    | `SessionClock`, `TimeScale`                               |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod pose;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use glam::DVec2;
pub use ids::{ConditionId, ObstacleId};
pub use pose::Pose;
pub use time::{SessionClock, TimeScale};
