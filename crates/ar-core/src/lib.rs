//! `ar-core` — foundational types for the area-race keyframe pipeline.
//!
//! This crate is a dependency of every other `ar-*` crate.  It has no `ar-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`ids`]    | `EntityId`                                                  |
//! | [`geo`]    | `Vertex`, `polygon_area` (shoelace)                         |
//! | [`time`]   | `Timestamp`, `TimeIndexTable`                               |
//! | [`config`] | `RaceConfig`, `SingleIndexPolicy`, `MergePolicy`            |
//! | [`error`]  | `CoreError`, `CoreResult`                                   |
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
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MergePolicy, RaceConfig, SingleIndexPolicy};
pub use error::{CoreError, CoreResult};
pub use geo::{Vertex, polygon_area};
pub use ids::EntityId;
pub use time::{TimeIndexTable, Timestamp};
