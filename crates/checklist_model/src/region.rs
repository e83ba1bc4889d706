//! Region references into packet document pages
//!
//! A region reference points at a rectangle on one page of a packet
//! document. Coordinates are in the page's own space at scale 1.0, so the
//! excerpt renderer can rescale them for any display width.

use crate::PacketVariant;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as the type's default.
///
/// Persisted references written by hand-edited number fields may contain
/// `null` where a field was left blank.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default, deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// True if the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// The same rectangle with every component multiplied by `scale`
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            x: self.x * scale,
            y: self.y * scale,
            width: self.width * scale,
            height: self.height * scale,
        }
    }
}

/// A page number and rectangle in one packet variant's document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionRef {
    /// 1-indexed page number; 0 means the reference is unset
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    /// Rectangle on that page at scale 1.0
    #[serde(rename = "coordinates", default)]
    pub rect: Rect,
}

impl Default for RegionRef {
    /// A fresh reference: first page, empty rectangle
    fn default() -> Self {
        Self {
            page: 1,
            rect: Rect::default(),
        }
    }
}

impl RegionRef {
    pub fn new(page: u32, rect: Rect) -> Self {
        Self { page, rect }
    }

    /// A reference with no page is treated as absent
    pub fn is_set(&self) -> bool {
        self.page > 0
    }

    /// True if an excerpt can be produced from this reference
    pub fn is_renderable(&self) -> bool {
        self.is_set() && !self.rect.is_empty()
    }

    /// Overwrite a single numeric field.
    ///
    /// Negative and NaN values are clamped to zero; a page of zero unsets
    /// the reference.
    pub fn set_field(&mut self, field: RegionField, value: f64) {
        let value = if value.is_nan() { 0.0 } else { value.max(0.0) };
        match field {
            RegionField::Page => self.page = value as u32,
            RegionField::X => self.rect.x = value,
            RegionField::Y => self.rect.y = value,
            RegionField::Width => self.rect.width = value,
            RegionField::Height => self.rect.height = value,
        }
    }
}

/// Individually editable fields of a region reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionField {
    Page,
    X,
    Y,
    Width,
    Height,
}

/// A full region reference given as optional fields.
///
/// Fields left as `None` take the values of a fresh reference: page 1 and
/// zero for each rectangle component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegionUpdate {
    pub page: Option<u32>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl RegionUpdate {
    pub fn to_region(&self) -> RegionRef {
        let mut region = RegionRef::default();
        let fields = [
            (RegionField::Page, self.page.map(f64::from)),
            (RegionField::X, self.x),
            (RegionField::Y, self.y),
            (RegionField::Width, self.width),
            (RegionField::Height, self.height),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                region.set_field(field, value);
            }
        }
        region
    }
}

impl From<RegionRef> for RegionUpdate {
    fn from(region: RegionRef) -> Self {
        Self {
            page: Some(region.page),
            x: Some(region.rect.x),
            y: Some(region.rect.y),
            width: Some(region.rect.width),
            height: Some(region.rect.height),
        }
    }
}

/// Region references keyed by packet variant.
///
/// Serialized as a map from variant key to reference, omitting variants
/// with no reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionRefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    packet1: Option<RegionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    packet2: Option<RegionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    packet3: Option<RegionRef>,
}

impl RegionRefs {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, variant: PacketVariant) -> &Option<RegionRef> {
        match variant {
            PacketVariant::Packet1 => &self.packet1,
            PacketVariant::Packet2 => &self.packet2,
            PacketVariant::Packet3 => &self.packet3,
        }
    }

    fn slot_mut(&mut self, variant: PacketVariant) -> &mut Option<RegionRef> {
        match variant {
            PacketVariant::Packet1 => &mut self.packet1,
            PacketVariant::Packet2 => &mut self.packet2,
            PacketVariant::Packet3 => &mut self.packet3,
        }
    }

    /// Get the stored reference for a variant, set or not
    pub fn get(&self, variant: PacketVariant) -> Option<&RegionRef> {
        self.slot(variant).as_ref()
    }

    /// Builder-style insert
    pub fn with(mut self, variant: PacketVariant, region: RegionRef) -> Self {
        self.set(variant, region);
        self
    }

    /// Create or overwrite the reference for a variant
    pub fn set(&mut self, variant: PacketVariant, region: RegionRef) {
        *self.slot_mut(variant) = Some(region);
    }

    /// Get the reference for a variant, creating a default one if missing
    pub fn entry(&mut self, variant: PacketVariant) -> &mut RegionRef {
        self.slot_mut(variant).get_or_insert_with(RegionRef::default)
    }

    /// Remove the reference for a variant
    pub fn remove(&mut self, variant: PacketVariant) -> Option<RegionRef> {
        self.slot_mut(variant).take()
    }

    /// True if no variant has a reference
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Iterate over the variants that have a reference
    pub fn iter(&self) -> impl Iterator<Item = (PacketVariant, &RegionRef)> + '_ {
        PacketVariant::ALL
            .into_iter()
            .filter_map(move |v| self.get(v).map(|r| (v, r)))
    }

    /// Look up the reference that applies to `variant`.
    ///
    /// Absent when the item has no reference for the variant or the stored
    /// reference has no page.
    pub fn lookup(&self, variant: PacketVariant) -> Option<RegionRef> {
        self.get(variant).copied().filter(RegionRef::is_set)
    }
}

/// Anything that carries region references: template items and their
/// checklist copies.
pub trait RegionBound {
    fn region_refs(&self) -> &RegionRefs;

    /// Region reference for the selected variant, if any.
    ///
    /// With no variant selected there is nothing to show.
    fn lookup(&self, variant: Option<PacketVariant>) -> Option<RegionRef> {
        variant.and_then(|v| self.region_refs().lookup(v))
    }
}
