//! Packet Checklist - application state for the checklist editor
//!
//! The presentation layer drives an [`AppState`]: it sends template edits,
//! checklist actions and uploaded documents, and reads back
//! [`ChecklistView`] snapshots with rendered excerpts to display.

mod config;
mod error;
pub mod logging;
mod state;
mod view;

pub use config::*;
pub use error::*;
pub use state::*;
pub use view::*;
