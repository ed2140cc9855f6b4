//! core
//!
//! Core domain types and operations for Trellis.
//!
//! # Modules
//!
//! - [`types`] - Strong types: FieldId, FieldKind, Fingerprint
//! - [`forest`] - The schema forest model and its operations
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Mutations validate first; an operation never partially applies
//! - The model is an explicit owned value, not ambient state

pub mod config;
pub mod forest;
pub mod types;
