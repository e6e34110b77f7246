//! # lumen-text
//!
//! Logical text model for the Lumen toolkit. Stores the characters of a
//! text, its style runs and paragraphs, and applies an externally computed
//! bidirectional resolution to produce visual order and caret placement.
//!
//! ## Architecture
//!
//! ```text
//! editor ──► set_text / update_text_style_runs / create_paragraph_info
//!                         │
//!                         ▼
//!                   LogicalModel ◄── bidi paragraph + line runs (external)
//!                         │
//!                         ▼
//! renderer ◄── retrieve_style / get_logical_character_index / cursor map
//! ```
//!
//! - **`model`** — the [`LogicalModel`] aggregate.
//! - **`style`** — style values and the resolved [`InputStyle`].
//! - **`paragraph`** — line-break flags and incremental paragraph tables.
//! - **`bidi`** — bidi run tables and the visual/logical/cursor maps.
//! - **`script`** — script tags and script runs.

pub mod bidi;
pub mod model;
pub mod paragraph;
pub mod script;
pub mod style;

// Re-exports for ergonomic use.
pub use bidi::{BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, ReorderTables};
pub use model::LogicalModel;
pub use paragraph::{LineBreakInfo, ParagraphRun, ParagraphRunIndex};
pub use script::{Script, ScriptRun};
pub use style::{
    Color, FontDescription, FontStretch, FontStyle, InputStyle, StrikethroughStyle,
    UnderlineKind, UnderlineStyle,
};
