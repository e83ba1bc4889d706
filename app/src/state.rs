//! Application state management
//!
//! [`AppState`] owns both stores, the storage backend and the excerpt
//! renderer. It is built once at startup (template, then checklists) and
//! every mutation is written through to storage before returning.
//!
//! Mutations are applied in memory first. If the write then fails the call
//! returns the storage error and the in-memory state stays ahead of what is
//! stored; the next successful mutation writes both keys in full again.

use crate::{AppConfig, Result};
use checklist_model::{
    Checklist, PacketVariant, RegionField, RegionRef, RegionUpdate, Section, Template,
    TemplateItem,
};
use excerpt::{ExcerptRenderer, PdfBackend};
use serde::Serialize;
use std::path::Path;
use store::{ChecklistStore, FileStore, KeyValueStore, StoreError, TemplateStore};

/// A checklist name as listed to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistEntry {
    pub name: String,
    pub active: bool,
}

pub struct AppState<B> {
    kv: Box<dyn KeyValueStore>,
    templates: TemplateStore,
    checklists: ChecklistStore,
    pub(crate) renderer: ExcerptRenderer<B>,
    pub(crate) config: AppConfig,
    active: Option<String>,
}

impl<B: PdfBackend> AppState<B> {
    /// Load the template and then the checklists from `kv`
    pub fn load(kv: Box<dyn KeyValueStore>, backend: B, config: AppConfig) -> Result<Self> {
        tracing::info!("Loading template...");
        let templates = TemplateStore::load(kv.as_ref())?;
        tracing::info!("Loading checklists...");
        let checklists = ChecklistStore::load(kv.as_ref())?;
        tracing::info!(
            "Ready: {} template sections, {} checklists",
            templates.get().sections.len(),
            checklists.len()
        );

        Ok(Self {
            kv,
            templates,
            checklists,
            renderer: ExcerptRenderer::new(backend),
            config,
            active: None,
        })
    }

    /// Open the state stored in `data_dir`, reading its `config.json`
    pub fn open(data_dir: &Path, backend: B) -> Result<Self> {
        let config = AppConfig::load(data_dir)?;
        Self::load(Box::new(FileStore::new(data_dir)), backend, config)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn renderer(&self) -> &ExcerptRenderer<B> {
        &self.renderer
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    fn save(&mut self) -> Result<()> {
        let saved = self
            .templates
            .save(self.kv.as_mut())
            .and_then(|()| self.checklists.save(self.kv.as_mut()));
        if let Err(e) = &saved {
            tracing::error!("Failed to save, unsaved changes kept in memory: {}", e);
        }
        Ok(saved?)
    }

    // ========================
    // Template
    // ========================

    pub fn template(&self) -> &Template {
        self.templates.get()
    }

    pub fn add_section(&mut self, title: &str) -> Result<usize> {
        let index = self.templates.add_section(title);
        tracing::debug!("Added section {} '{}'", index, title);
        self.save()?;
        Ok(index)
    }

    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        let section = self.templates.remove_section(index)?;
        tracing::debug!("Removed section {} '{}'", index, section.title);
        self.save()?;
        Ok(section)
    }

    pub fn rename_section(&mut self, index: usize, title: &str) -> Result<()> {
        self.templates.rename_section(index, title)?;
        self.save()
    }

    pub fn move_section(&mut self, from: usize, to: usize) -> Result<()> {
        self.templates.move_section(from, to)?;
        self.save()
    }

    pub fn add_item(&mut self, section: usize, text: &str) -> Result<usize> {
        let index = self.templates.add_item(section, text)?;
        tracing::debug!("Added item {} to section {}", index, section);
        self.save()?;
        Ok(index)
    }

    pub fn remove_item(&mut self, section: usize, item: usize) -> Result<TemplateItem> {
        let removed = self.templates.remove_item(section, item)?;
        self.save()?;
        Ok(removed)
    }

    pub fn set_item_text(&mut self, section: usize, item: usize, text: &str) -> Result<()> {
        self.templates.set_item_text(section, item, text)?;
        self.save()
    }

    pub fn move_item(&mut self, section: usize, from: usize, to: usize) -> Result<()> {
        self.templates.move_item(section, from, to)?;
        self.save()
    }

    pub fn set_region_ref(
        &mut self,
        section: usize,
        item: usize,
        variant: PacketVariant,
        update: RegionUpdate,
    ) -> Result<RegionRef> {
        let region = self
            .templates
            .set_region_ref(section, item, variant, update)?;
        tracing::debug!(
            "Set {} region of item {}/{} to page {}",
            variant,
            section,
            item,
            region.page
        );
        self.save()?;
        Ok(region)
    }

    pub fn set_region_field(
        &mut self,
        section: usize,
        item: usize,
        variant: PacketVariant,
        field: RegionField,
        value: f64,
    ) -> Result<RegionRef> {
        let region = self
            .templates
            .set_region_field(section, item, variant, field, value)?;
        self.save()?;
        Ok(region)
    }

    pub fn clear_region_ref(
        &mut self,
        section: usize,
        item: usize,
        variant: PacketVariant,
    ) -> Result<Option<RegionRef>> {
        let removed = self.templates.clear_region_ref(section, item, variant)?;
        self.save()?;
        Ok(removed)
    }

    // ========================
    // Checklists
    // ========================

    /// Create a checklist from the current template.
    ///
    /// Returns `false` and stores nothing when `name` is empty. A checklist
    /// with the same name is replaced.
    pub fn create_checklist(&mut self, name: &str) -> Result<bool> {
        let created = self
            .checklists
            .create(name, self.templates.get())
            .is_some();
        if created {
            tracing::info!("Created checklist '{}'", name);
            self.save()?;
        }
        Ok(created)
    }

    pub fn checklist(&self, name: &str) -> Option<&Checklist> {
        self.checklists.get(name)
    }

    /// Checklist names in creation order, flagging the open one
    pub fn checklist_names(&self) -> Vec<ChecklistEntry> {
        self.checklists
            .names()
            .map(|name| ChecklistEntry {
                name: name.to_string(),
                active: self.active.as_deref() == Some(name),
            })
            .collect()
    }

    /// Make `name` the checklist the user is working on
    pub fn open_checklist(&mut self, name: &str) -> Result<&Checklist> {
        let checklist = self
            .checklists
            .get(name)
            .ok_or_else(|| StoreError::ChecklistNotFound(name.to_string()))?;
        self.active = Some(name.to_string());
        Ok(checklist)
    }

    pub fn active_checklist(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set_checked(
        &mut self,
        name: &str,
        section: usize,
        item: usize,
        checked: bool,
    ) -> Result<()> {
        self.checklists.set_checked(name, section, item, checked)?;
        self.save()
    }

    /// Attach uploaded document bytes. The bytes are kept for this session
    /// only; the file name is persisted.
    pub fn attach_document(&mut self, name: &str, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let len = bytes.len();
        self.checklists.attach_document(name, file_name, bytes)?;
        tracing::info!("Attached '{}' ({} bytes) to '{}'", file_name, len, name);
        self.save()
    }

    pub fn set_variant(&mut self, name: &str, variant: Option<PacketVariant>) -> Result<()> {
        self.checklists.set_variant(name, variant)?;
        self.save()
    }
}

#[cfg(feature = "pdfium")]
impl AppState<excerpt::PdfiumBackend> {
    /// Open the state in `data_dir`, rendering with PDFium as configured
    pub fn open_with_pdfium(data_dir: &Path) -> Result<Self> {
        let config = AppConfig::load(data_dir)?;
        let backend = excerpt::PdfiumBackend::bind(config.pdfium_library.as_deref())?;
        Self::load(Box::new(FileStore::new(data_dir)), backend, config)
    }
}
