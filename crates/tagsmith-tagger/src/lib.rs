//! Tag generation for introspected tables.
//!
//! Turns the columns fetched by a [`tagsmith_introspect::Database`] into
//! annotation strings (`db`, `stbl`, `sql`) ready for a renderer.

pub mod engine;
pub mod model;
pub mod tagger;

pub use engine::{GenerationResult, generate, run, tag_table};
pub use model::{GenerationOutput, TaggedColumn, TaggedTable};
pub use tagger::{Tagger, tag_name};
