//! Named checklist store

use crate::{KeyValueStore, Result, StoreError, CHECKLISTS_KEY};
use checklist_model::{Checklist, PacketVariant, Template};
use indexmap::IndexMap;

/// Checklists by name, in creation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecklistStore {
    checklists: IndexMap<String, Checklist>,
}

impl ChecklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load stored checklists, starting empty if none are stored or the
    /// stored JSON cannot be parsed.
    pub fn load(kv: &dyn KeyValueStore) -> Result<Self> {
        let Some(json) = kv.get(CHECKLISTS_KEY)? else {
            return Ok(Self::new());
        };

        match serde_json::from_str::<IndexMap<String, Checklist>>(&json) {
            Ok(mut checklists) => {
                // The map key is authoritative
                for (name, checklist) in checklists.iter_mut() {
                    checklist.name.clone_from(name);
                }
                tracing::debug!("Loaded {} checklists", checklists.len());
                Ok(Self { checklists })
            }
            Err(e) => {
                tracing::warn!("Failed to parse stored checklists, starting empty: {}", e);
                Ok(Self::new())
            }
        }
    }

    pub fn save(&self, kv: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.checklists)?;
        kv.set(CHECKLISTS_KEY, &json)
    }

    /// Create a checklist by copying `template`.
    ///
    /// An empty name creates nothing and returns `None`. An existing
    /// checklist with the same name is replaced, keeping its position.
    pub fn create(&mut self, name: &str, template: &Template) -> Option<&Checklist> {
        if name.is_empty() {
            tracing::debug!("Ignoring checklist with empty name");
            return None;
        }

        let checklist = Checklist::from_template(name, template);
        let (index, previous) = self.checklists.insert_full(name.to_string(), checklist);
        if previous.is_some() {
            tracing::warn!("Replaced existing checklist '{}'", name);
        }
        self.checklists.get_index(index).map(|(_, c)| c)
    }

    pub fn get(&self, name: &str) -> Option<&Checklist> {
        self.checklists.get(name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Checklist> {
        self.checklists
            .get_mut(name)
            .ok_or_else(|| StoreError::ChecklistNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checklists.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.checklists.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checklist> + '_ {
        self.checklists.values()
    }

    pub fn len(&self) -> usize {
        self.checklists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checklists.is_empty()
    }

    pub fn set_checked(
        &mut self,
        name: &str,
        section: usize,
        item: usize,
        checked: bool,
    ) -> Result<()> {
        self.get_mut(name)?.set_checked(section, item, checked)?;
        Ok(())
    }

    /// Attach document bytes to a checklist, replacing any earlier document
    pub fn attach_document(
        &mut self,
        name: &str,
        file_name: &str,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<()> {
        self.get_mut(name)?.attach_document(file_name, bytes);
        Ok(())
    }

    pub fn set_variant(&mut self, name: &str, variant: Option<PacketVariant>) -> Result<()> {
        self.get_mut(name)?.set_variant(variant)?;
        Ok(())
    }
}
