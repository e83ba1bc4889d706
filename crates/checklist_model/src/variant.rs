//! Packet document variants

use serde::{Deserialize, Serialize};

/// One of the three packet layouts a checklist document can follow.
///
/// The packets share the same checklist items but place them on different
/// pages and coordinates, so each item keeps one region reference per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketVariant {
    Packet1,
    Packet2,
    Packet3,
}

impl PacketVariant {
    /// All variants in display order
    pub const ALL: [PacketVariant; 3] = [Self::Packet1, Self::Packet2, Self::Packet3];

    /// Storage key, as used in persisted region references
    pub fn key(&self) -> &'static str {
        match self {
            Self::Packet1 => "packet1",
            Self::Packet2 => "packet2",
            Self::Packet3 => "packet3",
        }
    }

    /// Human-readable label for variant pickers
    pub fn label(&self) -> &'static str {
        match self {
            Self::Packet1 => "Type 1",
            Self::Packet2 => "Type 2",
            Self::Packet3 => "Type 3",
        }
    }

    /// Parse a storage key. Returns `None` for unknown keys and for the
    /// empty string a picker sends when nothing is selected.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.key() == key)
    }
}

impl std::fmt::Display for PacketVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_keys() {
        assert_eq!(serde_json::to_string(&PacketVariant::Packet2).unwrap(), "\"packet2\"");
        assert_eq!(PacketVariant::from_key("packet3"), Some(PacketVariant::Packet3));
        assert_eq!(PacketVariant::from_key(""), None);
        assert_eq!(PacketVariant::from_key("Packet1"), None);
    }

    #[test]
    fn test_variant_labels() {
        let labels: Vec<_> = PacketVariant::ALL.iter().map(|v| v.label()).collect();
        assert_eq!(labels, vec!["Type 1", "Type 2", "Type 3"]);
    }
}
