//! Trellis - A terminal editor for nested field schemas
//!
//! Trellis builds a schema as an ordered forest of named, typed fields.
//! Fields can be added (at the root or under a nested field), renamed,
//! retyped, and deleted, and the forest can be previewed at any point as
//! pretty-printed JSON whose key order follows field insertion order.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`editor`] - Editing surface: command grammar and session state
//! - [`core`] - Domain types, the schema forest, and configuration
//! - [`ui`] - Output and rendering utilities
//!
//! # Correctness Invariants
//!
//! The schema forest maintains the following invariants:
//!
//! 1. Every field id is unique for the lifetime of the forest and never reused
//! 2. A field owns a children list exactly when its kind is `nested`
//! 3. Each field is owned by exactly one sibling list (the root list or one
//!    nested field's children); there are no cycles
//! 4. Sibling insertion order is preserved and is the serialization order

pub mod cli;
pub mod core;
pub mod editor;
pub mod ui;
