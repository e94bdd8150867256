//! `ca-proximity`: obstacles and collision checks.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`obstacle`]  | `Obstacle`: circle with optional spin, NaN radius = off   |
//! | [`evaluator`] | `ProximityEvaluator`, `Proximity`, `NO_OBSTACLE`          |
//! | [`error`]     | `ProximityError`, `ProximityResult<T>`                    |
//!
//! # Sign convention
//!
//! A proximity value is `|p − c| − (r + agent_radius)`.  Positive means clear,
//! zero means touching, negative means the agent disc overlaps the obstacle.
//! An inactive obstacle reports [`NO_OBSTACLE`] (`+∞`), which never counts as
//! a collision.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Obstacle`.             |

pub mod error;
pub mod evaluator;
pub mod obstacle;


pub use error::{ProximityError, ProximityResult};
pub use evaluator::{NO_OBSTACLE, Proximity, ProximityEvaluator};
pub use obstacle::Obstacle;
