//! `ar-dataset` — atlas entities, boundary periods, and input loading.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`period`]      | `Period`, `PeriodSet`, `parse_periods`                   |
//! | [`atlas`]       | `Boundary`, `AtlasEntry`, `Dataset`, `Roster`            |
//! | [`loader`]      | `load_atlas_json`, `load_atlas_reader`                   |
//! | [`time_table`]  | `load_time_table_csv`, `load_time_table_reader`          |
//! | [`error`]       | `DatasetError`, `DatasetResult<T>`                       |
//!
//! # Period strings (summary)
//!
//! Every boundary in the atlas is keyed by the periods during which it was
//! valid:
//!
//! ```text
//! "1-166, T"   → [1..=166], ongoing
//! "3"          → [3]
//! "1-2,5-6"    → [1..=2], [5..=6]
//! ```
//!
//! Indices refer to the time-index table; they are not bounds-checked here.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `serde`    | Serde derives on the `ar-core` types.                    |
//! | `fx-hash`  | FxHash for the roster's id lookup.                       |

pub mod atlas;
pub mod error;
pub mod loader;
pub mod period;
pub mod time_table;


pub use atlas::{AtlasEntry, Boundary, Dataset, Roster};
pub use error::{DatasetError, DatasetResult};
pub use loader::{load_atlas_json, load_atlas_reader};
pub use period::{Period, PeriodSet, parse_periods};
pub use time_table::{load_time_table_csv, load_time_table_reader};
