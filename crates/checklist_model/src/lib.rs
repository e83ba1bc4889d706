//! Checklist Model - Templates, checklists and packet region references
//!
//! This crate provides the typed data model shared by the stores and the
//! excerpt renderer: the master template, checklist instances copied from
//! it, and the per-packet region references that bind an item to a
//! rectangle on a page of one of the packet documents.

mod variant;
mod region;
mod template;
mod checklist;
mod document;
mod error;

pub use variant::*;
pub use region::*;
pub use template::*;
pub use checklist::*;
pub use document::*;
pub use error::*;
