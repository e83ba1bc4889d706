//! Documents attached to checklists

use crate::PacketVariant;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A runtime handle to an attached document's raw bytes.
///
/// Cloning is cheap; clones share the same bytes and compare equal.
#[derive(Clone)]
pub struct DocumentHandle {
    id: Uuid,
    bytes: Arc<[u8]>,
}

impl DocumentHandle {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            bytes: Arc::from(bytes.into()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq for DocumentHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::fmt::Debug for DocumentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentHandle")
            .field("id", &self.id)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The document bound to a checklist and the packet variant it follows.
///
/// Only the file name and variant are persisted; the bytes live for the
/// current session and must be attached again after a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBinding {
    pub file_name: String,
    #[serde(default)]
    pub variant: Option<PacketVariant>,
    #[serde(skip)]
    pub handle: Option<DocumentHandle>,
}

impl DocumentBinding {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            variant: None,
            handle: Some(DocumentHandle::new(bytes)),
        }
    }

    /// True if the bytes are available in this session
    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_identity() {
        let handle = DocumentHandle::new(b"%PDF-1.7".to_vec());
        let clone = handle.clone();
        assert_eq!(handle, clone);
        assert_eq!(clone.bytes(), b"%PDF-1.7");
        assert_ne!(handle, DocumentHandle::new(b"%PDF-1.7".to_vec()));
    }

    #[test]
    fn test_bytes_are_not_persisted() {
        let mut binding = DocumentBinding::new("packet.pdf", vec![1, 2, 3]);
        binding.variant = Some(PacketVariant::Packet2);

        let json = serde_json::to_string(&binding).unwrap();
        let restored: DocumentBinding = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.file_name, "packet.pdf");
        assert_eq!(restored.variant, Some(PacketVariant::Packet2));
        assert!(!restored.is_loaded());
    }
}
