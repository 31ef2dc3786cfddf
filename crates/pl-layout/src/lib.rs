//! `pl-layout` — the ring topology table.
//!
//! # Crate layout
//!
//! | Module      | Contents                                        |
//! |-------------|-------------------------------------------------|
//! | [`layout`]  | `StopSpec`, `LineLayout`                        |
//! | [`loader`]  | `load_layout_csv`, `load_layout_reader`         |
//! | [`error`]   | `LayoutError`, `LayoutResult<T>`                |
//!
//! The layout is static configuration: it is built once, validated, and
//! handed to the ring builder.  Nothing here changes during a run.

pub mod error;
pub mod layout;
pub mod loader;

#[cfg(test)]
mod tests;

pub use error::{LayoutError, LayoutResult};
pub use layout::{LineLayout, StopSpec};
pub use loader::{load_layout_csv, load_layout_reader};
