//! The master template store
//!
//! Owns the one template checklists are copied from. Edits address
//! sections and items by index; an index that does not exist is reported
//! as a [`ModelError`](checklist_model::ModelError) rather than ignored.

use crate::{KeyValueStore, Result, TEMPLATE_KEY};
use checklist_model::{
    ModelError, PacketVariant, RegionField, RegionRef, RegionUpdate, Section, Template,
    TemplateItem,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateStore {
    template: Template,
}

impl TemplateStore {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Load the stored template.
    ///
    /// Seeds the sample template when nothing is stored yet, and falls back
    /// to it with a warning when the stored JSON cannot be parsed.
    pub fn load(kv: &dyn KeyValueStore) -> Result<Self> {
        let template = match kv.get(TEMPLATE_KEY)? {
            Some(json) => match serde_json::from_str::<Template>(&json) {
                Ok(template) => template,
                Err(e) => {
                    tracing::warn!("Failed to parse stored template, using defaults: {}", e);
                    Template::sample()
                }
            },
            None => {
                tracing::info!("No stored template, seeding sample template");
                Template::sample()
            }
        };
        Ok(Self { template })
    }

    pub fn save(&self, kv: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.template)?;
        kv.set(TEMPLATE_KEY, &json)
    }

    pub fn get(&self) -> &Template {
        &self.template
    }

    /// Append an empty section and return its index
    pub fn add_section(&mut self, title: impl Into<String>) -> usize {
        self.template.sections.push(Section::new(title));
        self.template.sections.len() - 1
    }

    /// Remove a section; later sections move up by one
    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        self.template.section(index)?;
        Ok(self.template.sections.remove(index))
    }

    pub fn rename_section(&mut self, index: usize, title: impl Into<String>) -> Result<()> {
        self.template.section_mut(index)?.title = title.into();
        Ok(())
    }

    /// Move a section so that it ends up at index `to`
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<()> {
        self.template.section(from)?;
        self.template.section(to)?;
        let section = self.template.sections.remove(from);
        self.template.sections.insert(to, section);
        Ok(())
    }

    /// Append an item with no region references and return its index
    pub fn add_item(&mut self, section: usize, text: impl Into<String>) -> Result<usize> {
        let items = &mut self.template.section_mut(section)?.items;
        items.push(TemplateItem::new(text));
        Ok(items.len() - 1)
    }

    pub fn remove_item(&mut self, section: usize, item: usize) -> Result<TemplateItem> {
        self.template.item(section, item)?;
        Ok(self.template.sections[section].items.remove(item))
    }

    pub fn set_item_text(
        &mut self,
        section: usize,
        item: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        self.template.item_mut(section, item)?.text = text.into();
        Ok(())
    }

    /// Move an item within its section so that it ends up at index `to`
    pub fn move_item(&mut self, section: usize, from: usize, to: usize) -> Result<()> {
        let items = &mut self.template.section_mut(section)?.items;
        let len = items.len();
        for index in [from, to] {
            if index >= len {
                return Err(ModelError::ItemOutOfRange { section, index, len }.into());
            }
        }
        let moved = items.remove(from);
        items.insert(to, moved);
        Ok(())
    }

    /// Create or overwrite an item's region reference for one variant
    pub fn set_region_ref(
        &mut self,
        section: usize,
        item: usize,
        variant: PacketVariant,
        update: RegionUpdate,
    ) -> Result<RegionRef> {
        let region = update.to_region();
        self.template
            .item_mut(section, item)?
            .region_refs
            .set(variant, region);
        Ok(region)
    }

    /// Change one field of an item's region reference, creating the
    /// reference first if the variant has none
    pub fn set_region_field(
        &mut self,
        section: usize,
        item: usize,
        variant: PacketVariant,
        field: RegionField,
        value: f64,
    ) -> Result<RegionRef> {
        let region = self
            .template
            .item_mut(section, item)?
            .region_refs
            .entry(variant);
        region.set_field(field, value);
        Ok(*region)
    }

    pub fn clear_region_ref(
        &mut self,
        section: usize,
        item: usize,
        variant: PacketVariant,
    ) -> Result<Option<RegionRef>> {
        Ok(self
            .template
            .item_mut(section, item)?
            .region_refs
            .remove(variant))
    }
}
