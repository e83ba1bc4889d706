//! Checklist instances derived from the template

use crate::{
    DocumentBinding, DocumentHandle, ModelError, PacketVariant, RegionBound, RegionRefs, Result,
    Section, Template, TemplateItem,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A checklist item: the template item's text and regions plus a checked flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(rename = "pdfRefs", alias = "regionRefs", default)]
    pub region_refs: RegionRefs,
}

impl From<&TemplateItem> for ChecklistItem {
    fn from(item: &TemplateItem) -> Self {
        Self {
            text: item.text.clone(),
            checked: false,
            region_refs: item.region_refs,
        }
    }
}

impl RegionBound for ChecklistItem {
    fn region_refs(&self) -> &RegionRefs {
        &self.region_refs
    }
}

/// Checked count of a section or checklist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub checked: usize,
    pub total: usize,
}

impl Progress {
    /// Completed share in `0.0..=1.0`; an empty list counts as 0
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.checked as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.checked == self.total
    }
}

impl std::ops::Add for Progress {
    type Output = Progress;

    fn add(self, other: Progress) -> Progress {
        Progress {
            checked: self.checked + other.checked,
            total: self.total + other.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistSection {
    pub title: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl From<&Section> for ChecklistSection {
    fn from(section: &Section) -> Self {
        Self {
            title: section.title.clone(),
            items: section.items.iter().map(ChecklistItem::from).collect(),
        }
    }
}

impl ChecklistSection {
    pub fn progress(&self) -> Progress {
        Progress {
            checked: self.items.iter().filter(|i| i.checked).count(),
            total: self.items.len(),
        }
    }
}

/// A named checklist, independent of later template edits.
///
/// Reads both its own layout and the layout the browser app stores
/// (`template.sections`, `pdfFile`, `pdfType`); always writes its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredChecklist")]
pub struct Checklist {
    pub name: String,
    pub sections: Vec<ChecklistSection>,
    pub document: Option<DocumentBinding>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredChecklist {
    Current(CurrentChecklist),
    Browser(BrowserChecklist),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentChecklist {
    #[serde(default)]
    name: String,
    sections: Vec<ChecklistSection>,
    #[serde(default)]
    document: Option<DocumentBinding>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    modified_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowserChecklist {
    #[serde(default)]
    name: String,
    template: BrowserSections,
    #[serde(default)]
    pdf_file: Option<String>,
    #[serde(default)]
    pdf_type: Option<PacketVariant>,
}

#[derive(Deserialize)]
struct BrowserSections {
    #[serde(default)]
    sections: Vec<ChecklistSection>,
}

impl From<StoredChecklist> for Checklist {
    fn from(stored: StoredChecklist) -> Self {
        match stored {
            StoredChecklist::Current(c) => Self {
                name: c.name,
                sections: c.sections,
                document: c.document,
                created_at: c.created_at,
                modified_at: c.modified_at,
            },
            StoredChecklist::Browser(b) => {
                let now = Utc::now();
                // The browser never kept bytes across reloads either
                let document = b.pdf_file.map(|file_name| DocumentBinding {
                    file_name,
                    variant: b.pdf_type,
                    handle: None,
                });
                Self {
                    name: b.name,
                    sections: b.template.sections,
                    document,
                    created_at: now,
                    modified_at: now,
                }
            }
        }
    }
}

impl Checklist {
    /// Copy the template's sections and items into a new checklist.
    ///
    /// Every item starts unchecked and owns its own copy of the template
    /// item's region references.
    pub fn from_template(name: impl Into<String>, template: &Template) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            sections: template.sections.iter().map(ChecklistSection::from).collect(),
            document: None,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn item(&self, section: usize, index: usize) -> Result<&ChecklistItem> {
        let len = self.sections.len();
        let items = &self
            .sections
            .get(section)
            .ok_or(ModelError::SectionOutOfRange { index: section, len })?
            .items;
        items.get(index).ok_or(ModelError::ItemOutOfRange {
            section,
            index,
            len: items.len(),
        })
    }

    fn item_mut(&mut self, section: usize, index: usize) -> Result<&mut ChecklistItem> {
        let len = self.sections.len();
        let items = &mut self
            .sections
            .get_mut(section)
            .ok_or(ModelError::SectionOutOfRange { index: section, len })?
            .items;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(ModelError::ItemOutOfRange { section, index, len })
    }

    pub fn set_checked(&mut self, section: usize, index: usize, checked: bool) -> Result<()> {
        self.item_mut(section, index)?.checked = checked;
        self.touch();
        Ok(())
    }

    /// Bind a document, replacing any previous one.
    ///
    /// A previously selected variant is kept so that replacing the file
    /// does not reset the packet layout.
    pub fn attach_document(&mut self, file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let variant = self.selected_variant();
        let mut binding = DocumentBinding::new(file_name, bytes);
        binding.variant = variant;
        self.document = Some(binding);
        self.touch();
    }

    /// Select which packet variant's regions apply, or clear the selection
    pub fn set_variant(&mut self, variant: Option<PacketVariant>) -> Result<()> {
        let binding = self
            .document
            .as_mut()
            .ok_or_else(|| ModelError::NoDocumentAttached(self.name.clone()))?;
        binding.variant = variant;
        self.touch();
        Ok(())
    }

    pub fn selected_variant(&self) -> Option<PacketVariant> {
        self.document.as_ref().and_then(|d| d.variant)
    }

    pub fn document_handle(&self) -> Option<&DocumentHandle> {
        self.document.as_ref().and_then(|d| d.handle.as_ref())
    }

    pub fn progress(&self) -> Progress {
        self.sections
            .iter()
            .map(ChecklistSection::progress)
            .fold(Progress::default(), |acc, p| acc + p)
    }

    fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rect, RegionRef};
    use proptest::prelude::*;

    fn intake_template() -> Template {
        Template {
            sections: vec![Section::new("Intake")
                .with_item(TemplateItem::new("Verify ID").with_region(
                    PacketVariant::Packet1,
                    RegionRef::new(1, Rect::new(100.0, 100.0, 400.0, 200.0)),
                ))
                .with_item(TemplateItem::new("Sign form"))],
        }
    }

    #[test]
    fn test_from_template_copies_items_unchecked() {
        let checklist = Checklist::from_template("Case-42", &intake_template());

        assert_eq!(checklist.name, "Case-42");
        assert_eq!(checklist.sections.len(), 1);
        let items = &checklist.sections[0].items;
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| !i.checked));

        let refs: Vec<_> = items[0].region_refs.iter().collect();
        assert_eq!(
            refs,
            vec![(
                PacketVariant::Packet1,
                &RegionRef::new(1, Rect::new(100.0, 100.0, 400.0, 200.0))
            )]
        );
        assert!(items[1].region_refs.is_empty());
    }

    #[test]
    fn test_set_checked_and_progress() {
        let mut checklist = Checklist::from_template("c", &intake_template());
        checklist.set_checked(0, 1, true).unwrap();

        assert!(checklist.item(0, 1).unwrap().checked);
        assert_eq!(checklist.sections[0].progress(), Progress { checked: 1, total: 2 });
        assert_eq!(checklist.progress().fraction(), 0.5);
        assert!(matches!(
            checklist.set_checked(0, 5, true),
            Err(ModelError::ItemOutOfRange { section: 0, index: 5, len: 2 })
        ));
        assert!(matches!(
            checklist.set_checked(1, 0, true),
            Err(ModelError::SectionOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_empty_section_progress() {
        let section = ChecklistSection {
            title: "Empty".into(),
            items: vec![],
        };
        assert_eq!(section.progress().fraction(), 0.0);
        assert!(!section.progress().is_complete());
    }

    #[test]
    fn test_variant_requires_document() {
        let mut checklist = Checklist::from_template("c", &intake_template());
        assert_eq!(
            checklist.set_variant(Some(PacketVariant::Packet1)),
            Err(ModelError::NoDocumentAttached("c".into()))
        );

        checklist.attach_document("a.pdf", b"%PDF-1.4".to_vec());
        checklist.set_variant(Some(PacketVariant::Packet3)).unwrap();
        assert_eq!(checklist.selected_variant(), Some(PacketVariant::Packet3));

        // Replacing the file keeps the chosen layout
        checklist.attach_document("b.pdf", b"%PDF-1.4".to_vec());
        assert_eq!(checklist.selected_variant(), Some(PacketVariant::Packet3));
        assert_eq!(checklist.document.as_ref().unwrap().file_name, "b.pdf");

        checklist.set_variant(None).unwrap();
        assert_eq!(checklist.selected_variant(), None);
    }

    #[test]
    fn test_reads_browser_layout() {
        let json = r#"{
            "name": "Case-1",
            "template": {"sections": [{"title": "Intake", "items": [
                {"text": "Verify ID", "checked": true,
                 "pdfRefs": {"packet1": {"page": 1, "coordinates": {"x": 100, "y": 100, "width": 400, "height": 200}}}},
                {"text": "Sign form", "checked": false, "pdfRefs": {}}
            ]}]},
            "pdfFile": "case-1.pdf",
            "pdfType": "packet1",
            "pdfUrl": "blob:stale"
        }"#;

        let checklist: Checklist = serde_json::from_str(json).unwrap();

        assert_eq!(checklist.name, "Case-1");
        assert_eq!(checklist.sections.len(), 1);
        let items = &checklist.sections[0].items;
        assert_eq!(items.len(), 2);
        assert!(items[0].checked);
        assert_eq!(
            items[0].region_refs.lookup(PacketVariant::Packet1),
            Some(RegionRef::new(1, Rect::new(100.0, 100.0, 400.0, 200.0)))
        );
        let document = checklist.document.as_ref().unwrap();
        assert_eq!(document.file_name, "case-1.pdf");
        assert_eq!(document.variant, Some(PacketVariant::Packet1));
        assert!(document.handle.is_none());
    }

    #[test]
    fn test_browser_layout_without_file() {
        let json = r#"{"name": "c", "template": {"sections": []}, "pdfFile": null, "pdfType": null}"#;
        let checklist: Checklist = serde_json::from_str(json).unwrap();
        assert!(checklist.sections.is_empty());
        assert!(checklist.document.is_none());
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let json = r#"{"name": "c", "items": []}"#;
        assert!(serde_json::from_str::<Checklist>(json).is_err());
    }

    #[test]
    fn test_own_layout_round_trips() {
        let mut checklist = Checklist::from_template("Case-42", &intake_template());
        checklist.set_checked(0, 0, true).unwrap();
        checklist.attach_document("p.pdf", b"%PDF-1.4".to_vec());
        checklist.set_variant(Some(PacketVariant::Packet2)).unwrap();

        let json = serde_json::to_value(&checklist).unwrap();
        assert!(json.get("template").is_none());
        let restored: Checklist = serde_json::from_value(json).unwrap();

        assert_eq!(restored.sections, checklist.sections);
        assert_eq!(restored.selected_variant(), Some(PacketVariant::Packet2));
        assert_eq!(restored.created_at, checklist.created_at);
    }

    fn arb_template() -> impl Strategy<Value = Template> {
        let region = (1u32..20, 0.0f64..600.0, 0.0f64..800.0, 1.0f64..300.0, 1.0f64..300.0)
            .prop_map(|(page, x, y, w, h)| RegionRef::new(page, Rect::new(x, y, w, h)));
        let item = ("[a-z ]{1,12}", proptest::option::of(region.clone()), proptest::option::of(region))
            .prop_map(|(text, first, third)| {
                let mut item = TemplateItem::new(text);
                if let Some(r) = first {
                    item.region_refs.set(PacketVariant::Packet1, r);
                }
                if let Some(r) = third {
                    item.region_refs.set(PacketVariant::Packet3, r);
                }
                item
            });
        let section = ("[A-Z][a-z]{0,8}", proptest::collection::vec(item, 0..5)).prop_map(
            |(title, items)| Section { title, items },
        );
        proptest::collection::vec(section, 0..4).prop_map(|sections| Template { sections })
    }

    proptest! {
        #[test]
        fn prop_copy_is_isolated_from_template_edits(mut template in arb_template()) {
            let checklist = Checklist::from_template("copy", &template);
            let snapshot = template.clone();

            for section in &mut template.sections {
                section.title.push('!');
                for item in &mut section.items {
                    item.text.push_str(" (edited)");
                    item.region_refs.entry(PacketVariant::Packet2).page = 99;
                    item.region_refs.remove(PacketVariant::Packet1);
                }
            }
            template.sections.push(Section::new("Added later"));

            prop_assert_eq!(checklist.sections.len(), snapshot.sections.len());
            for (copied, original) in checklist.sections.iter().zip(&snapshot.sections) {
                prop_assert_eq!(&copied.title, &original.title);
                prop_assert_eq!(copied.items.len(), original.items.len());
                for (c, o) in copied.items.iter().zip(&original.items) {
                    prop_assert_eq!(&c.text, &o.text);
                    prop_assert_eq!(c.region_refs, o.region_refs);
                    prop_assert!(!c.checked);
                }
            }
        }

        #[test]
        fn prop_checking_never_touches_template(template in arb_template()) {
            let snapshot = template.clone();
            let mut checklist = Checklist::from_template("copy", &template);
            for s in 0..checklist.sections.len() {
                for i in 0..checklist.sections[s].items.len() {
                    checklist.set_checked(s, i, true).unwrap();
                }
            }
            prop_assert_eq!(template, snapshot);
            prop_assert_eq!(checklist.progress().checked, checklist.progress().total);
        }
    }
}
