//! Static HTML rendering for the assembled catalog model
//!
//! Consumes summaries, the procedure map and the table list and produces one
//! page per entity plus overview pages. Templates are embedded in the binary
//! and rendered with minijinja.

pub mod renderer;

pub use renderer::{DocRenderer, RenderError};
