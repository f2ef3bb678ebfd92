//! Public data types shared by the countdown registry and its API layer.
//!
//! Nothing here owns state or spawns work; these are the values that cross
//! crate boundaries (ids, statuses, snapshots, queries).

mod domain;
pub use domain::*;
