//! The master template

use crate::{ModelError, PacketVariant, Rect, RegionBound, RegionRef, RegionRefs, Result};
use serde::{Deserialize, Serialize};

/// A checkable line in the template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItem {
    pub text: String,
    /// Where this item appears in each packet variant
    #[serde(rename = "pdfRefs", alias = "regionRefs", default)]
    pub region_refs: RegionRefs,
}

impl TemplateItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            region_refs: RegionRefs::new(),
        }
    }

    pub fn with_region(mut self, variant: PacketVariant, region: RegionRef) -> Self {
        self.region_refs.set(variant, region);
        self
    }
}

impl RegionBound for TemplateItem {
    fn region_refs(&self) -> &RegionRefs {
        &self.region_refs
    }
}

/// A titled group of template items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub items: Vec<TemplateItem>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: TemplateItem) -> Self {
        self.items.push(item);
        self
    }
}

/// Ordered sections shared by every checklist at creation time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// The template seeded on first start, before anything is stored
    pub fn sample() -> Self {
        let ref_at = |page, x, y| RegionRef::new(page, Rect::new(x, y, 400.0, 200.0));
        Self {
            sections: vec![Section::new("Section 1")
                .with_item(
                    TemplateItem::new("Sample item 1")
                        .with_region(PacketVariant::Packet1, ref_at(1, 100.0, 100.0))
                        .with_region(PacketVariant::Packet2, ref_at(2, 150.0, 150.0))
                        .with_region(PacketVariant::Packet3, ref_at(1, 200.0, 200.0)),
                )
                .with_item(TemplateItem::new("Sample item 2"))],
        }
    }

    pub fn section(&self, index: usize) -> Result<&Section> {
        let len = self.sections.len();
        self.sections
            .get(index)
            .ok_or(ModelError::SectionOutOfRange { index, len })
    }

    pub fn section_mut(&mut self, index: usize) -> Result<&mut Section> {
        let len = self.sections.len();
        self.sections
            .get_mut(index)
            .ok_or(ModelError::SectionOutOfRange { index, len })
    }

    pub fn item(&self, section: usize, index: usize) -> Result<&TemplateItem> {
        let items = &self.section(section)?.items;
        items.get(index).ok_or(ModelError::ItemOutOfRange {
            section,
            index,
            len: items.len(),
        })
    }

    pub fn item_mut(&mut self, section: usize, index: usize) -> Result<&mut TemplateItem> {
        let items = &mut self.section_mut(section)?.items;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(ModelError::ItemOutOfRange { section, index, len })
    }

    /// Total number of items across all sections
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_template() {
        let template = Template::sample();
        assert_eq!(template.sections.len(), 1);
        assert_eq!(template.item_count(), 2);

        let first = template.item(0, 0).unwrap();
        assert_eq!(first.text, "Sample item 1");
        assert_eq!(
            first.region_refs.lookup(PacketVariant::Packet2),
            Some(RegionRef::new(2, Rect::new(150.0, 150.0, 400.0, 200.0)))
        );
        assert!(template.item(0, 1).unwrap().region_refs.is_empty());
    }

    #[test]
    fn test_index_errors() {
        let template = Template::sample();
        assert_eq!(
            template.section(3).unwrap_err(),
            ModelError::SectionOutOfRange { index: 3, len: 1 }
        );
        assert_eq!(
            template.item(0, 2).unwrap_err(),
            ModelError::ItemOutOfRange { section: 0, index: 2, len: 2 }
        );
    }

    #[test]
    fn test_loads_browser_storage_shape() {
        // Items written by the browser build carry a stray `checked` flag
        let json = r#"{
            "sections": [{
                "title": "Intake",
                "items": [
                    {"text": "Verify ID", "checked": true,
                     "pdfRefs": {"packet1": {"page": 1, "coordinates": {"x": 100, "y": 100, "width": 400, "height": 200}}}},
                    {"text": "Sign form", "checked": false}
                ]
            }]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        let item = template.item(0, 0).unwrap();
        assert_eq!(
            item.lookup(Some(PacketVariant::Packet1)),
            Some(RegionRef::new(1, Rect::new(100.0, 100.0, 400.0, 200.0)))
        );
        assert_eq!(item.lookup(None), None);
        assert!(template.item(0, 1).unwrap().region_refs.is_empty());

        let written = serde_json::to_value(&template).unwrap();
        assert!(written["sections"][0]["items"][0].get("checked").is_none());
        assert!(written["sections"][0]["items"][0].get("pdfRefs").is_some());
    }
}
