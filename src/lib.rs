//! Deterministic state core for a job-listing map application.
//!
//! `jobmap-core` normalizes free-text category strings into canonical join
//! keys, indexes job and skill records by those keys into atomically replaced
//! snapshots, and derives the selected-job set consumed by map rendering.
//! All computation is synchronous and deterministic: a write recomputes its
//! dependents before control returns to the writer.
//!
//! See <https://github.com/jobmaphq/jobmap> for the full application.

pub mod config;
pub mod index;
pub mod normalize;
pub mod select;
pub mod state;
pub mod types;
