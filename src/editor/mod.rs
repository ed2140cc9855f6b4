//! editor
//!
//! The editing surface: command grammar and session state.
//!
//! # Modules
//!
//! - [`command`] - Line grammar for editor commands
//! - [`session`] - Session state and command application

pub mod command;
pub mod session;

pub use command::EditCommand;
pub use session::{Outcome, Session};
