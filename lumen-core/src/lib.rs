//! # lumen-core
//!
//! Shared vocabulary for the Lumen text subsystem: character indices,
//! character ranges, and the generic style-run list that every style
//! dimension of the logical text model is stored in.
//!
//! ## Modules
//!
//! - [`types`] — index aliases and [`CharacterRun`].
//! - [`runs`] — [`StyleRun`] and [`RunList`], an overlap-tolerant run list
//!   with "last stored run wins" lookup and in-place edit updates.

pub mod runs;
pub mod types;

// Re-exports for ergonomic use.
pub use runs::{RunList, StyleRun};
pub use types::{Character, CharacterDirection, CharacterIndex, CharacterRun, Length};
