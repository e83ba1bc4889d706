//! Render pass for an open checklist
//!
//! Builds everything a front end needs to draw a checklist: section and
//! item text, checked flags, progress, and for each item the excerpt of the
//! attached document that belongs to the selected packet variant.

use crate::AppState;
use checklist_model::{
    Checklist, ChecklistItem, DocumentHandle, PacketVariant, Progress, RegionBound,
};
use excerpt::{ExcerptOutcome, PdfBackend};

#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub text: String,
    pub checked: bool,
    pub excerpt: ExcerptOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub title: String,
    pub progress: Progress,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistView {
    pub name: String,
    /// Name of the attached file, if any
    pub file_name: Option<String>,
    pub variant: Option<PacketVariant>,
    /// Whether document bytes are available this session
    pub document_loaded: bool,
    pub progress: Progress,
    pub sections: Vec<SectionView>,
}

impl ChecklistView {
    pub fn item(&self, section: usize, index: usize) -> Option<&ItemView> {
        self.sections.get(section)?.items.get(index)
    }

    /// Iterate over every item with its section and item index
    pub fn items(&self) -> impl Iterator<Item = (usize, usize, &ItemView)> + '_ {
        self.sections.iter().enumerate().flat_map(|(s, section)| {
            section
                .items
                .iter()
                .enumerate()
                .map(move |(i, item)| (s, i, item))
        })
    }
}

impl<B: PdfBackend> AppState<B> {
    /// Build the view of checklist `name`, rendering excerpts for the
    /// selected variant. Returns `None` for an unknown checklist.
    pub fn checklist_view(&self, name: &str) -> Option<ChecklistView> {
        let checklist = self.checklist(name)?;
        Some(self.build_view(checklist))
    }

    /// View of the checklist opened with [`AppState::open_checklist`]
    pub fn active_view(&self) -> Option<ChecklistView> {
        self.checklist_view(self.active_checklist()?)
    }

    fn build_view(&self, checklist: &Checklist) -> ChecklistView {
        let variant = checklist.selected_variant();
        let handle = checklist.document_handle();

        if variant.is_some() && handle.is_none() {
            tracing::debug!(
                "Checklist '{}' has a variant but no document bytes; excerpts hidden",
                checklist.name
            );
        }

        let sections = checklist
            .sections
            .iter()
            .map(|section| SectionView {
                title: section.title.clone(),
                progress: section.progress(),
                items: section
                    .items
                    .iter()
                    .map(|item| ItemView {
                        text: item.text.clone(),
                        checked: item.checked,
                        excerpt: self.item_excerpt(item, handle, variant),
                    })
                    .collect(),
            })
            .collect();

        ChecklistView {
            name: checklist.name.clone(),
            file_name: checklist.document.as_ref().map(|d| d.file_name.clone()),
            variant,
            document_loaded: handle.is_some(),
            progress: checklist.progress(),
            sections,
        }
    }

    fn item_excerpt(
        &self,
        item: &ChecklistItem,
        handle: Option<&DocumentHandle>,
        variant: Option<PacketVariant>,
    ) -> ExcerptOutcome {
        let (Some(handle), Some(region)) = (handle, item.lookup(variant)) else {
            return ExcerptOutcome::NotShown;
        };
        self.renderer
            .render_or_placeholder(handle, &region, self.config.excerpt_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppConfig;
    use excerpt::testing::{fake_pdf_bytes, FakePdfBackend, PageSize};
    use store::MemoryStore;

    fn state() -> AppState<FakePdfBackend> {
        AppState::load(
            Box::new(MemoryStore::new()),
            FakePdfBackend::new(vec![PageSize::new(400.0, 600.0), PageSize::new(400.0, 600.0)]),
            AppConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_checklist_has_no_view() {
        assert!(state().checklist_view("missing").is_none());
        assert!(state().active_view().is_none());
    }

    #[test]
    fn test_no_document_shows_no_excerpts() {
        let mut state = state();
        state.create_checklist("c").unwrap();

        let view = state.checklist_view("c").unwrap();
        assert_eq!(view.file_name, None);
        assert!(!view.document_loaded);
        assert!(view.items().all(|(_, _, item)| item.excerpt == ExcerptOutcome::NotShown));
        assert!(state.renderer().backend().calls().is_empty());
    }

    #[test]
    fn test_document_without_variant_renders_nothing() {
        let mut state = state();
        state.create_checklist("c").unwrap();
        state.attach_document("c", "p.pdf", fake_pdf_bytes()).unwrap();

        let view = state.checklist_view("c").unwrap();
        assert!(view.document_loaded);
        assert_eq!(view.variant, None);
        assert!(view.items().all(|(_, _, item)| item.excerpt == ExcerptOutcome::NotShown));
        assert!(state.renderer().backend().calls().is_empty());
    }

    #[test]
    fn test_variant_selects_page() {
        let mut state = state();
        state.create_checklist("c").unwrap();
        state.attach_document("c", "p.pdf", fake_pdf_bytes()).unwrap();
        state.set_variant("c", Some(PacketVariant::Packet2)).unwrap();

        let view = state.checklist_view("c").unwrap();
        let excerpt = view.item(0, 0).unwrap().excerpt.excerpt().unwrap();
        assert_eq!(excerpt.page, 2);
        assert_eq!((excerpt.width(), excerpt.height()), (400, 200));
        assert_eq!(view.item(0, 1).unwrap().excerpt, ExcerptOutcome::NotShown);
        assert_eq!(state.renderer().backend().rendered_pages(), vec![2]);
    }

    #[test]
    fn test_progress_is_reported() {
        let mut state = state();
        state.create_checklist("c").unwrap();
        state.set_checked("c", 0, 1, true).unwrap();

        let view = state.checklist_view("c").unwrap();
        assert_eq!(view.progress, Progress { checked: 1, total: 2 });
        assert_eq!(view.sections[0].progress, view.progress);
        assert!(view.item(0, 1).unwrap().checked);
        assert!(!view.item(0, 0).unwrap().checked);
    }

    #[test]
    fn test_active_view_follows_open_checklist() {
        let mut state = state();
        state.create_checklist("a").unwrap();
        state.create_checklist("b").unwrap();
        state.open_checklist("b").unwrap();
        assert_eq!(state.active_view().unwrap().name, "b");
    }
}
