//! Store - Persistence of the master template and named checklists
//!
//! This crate owns the two application stores and their persistence to a
//! key-value backend: the template under `masterTemplate` and the
//! checklists under `checklists`, both as JSON. Attached document bytes are
//! never written.

mod error;
mod kv;
mod template_store;
mod checklist_store;

pub use error::*;
pub use kv::*;
pub use template_store::*;
pub use checklist_store::*;

/// Storage key of the master template
pub const TEMPLATE_KEY: &str = "masterTemplate";

/// Storage key of the checklist map
pub const CHECKLISTS_KEY: &str = "checklists";
