//! Commit-graph crochet patterns.
//!
//! Turns daily contribution counts into stacked, bordered year grids of C2C
//! squares and the printable artifacts derived from them:
//!
//! 1. [`calendar`] fills each requested year with one entry per date.
//! 2. [`level`] buckets each count into an activity level.
//! 3. [`grid`] lays a year out as a 110 × 18 bordered grid.
//! 4. [`pattern`] stacks the years, newest first.
//! 5. [`export`] renders the transcript, measurements and instructions.
//!
//! All operations are pure; nothing here touches the network or the disk.

pub mod calendar;
pub mod contribution;
pub mod error;
pub mod export;
pub mod grid;
pub mod level;
pub mod pattern;
pub mod theme;

pub use error::{PatternError, Result};
