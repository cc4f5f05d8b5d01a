//! Opaque extension mapping shared by client offers and server responses.

use crate::error::{Error, Result};
use crate::protocol::ExtensionType;

/// A single extension: identifier plus opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension type
    pub extension_type: ExtensionType,

    /// Extension data
    pub data: Vec<u8>,
}

impl Extension {
    /// Create a new extension.
    pub fn new(extension_type: ExtensionType, data: Vec<u8>) -> Self {
        Self {
            extension_type,
            data,
        }
    }

    /// Create an empty-payload extension (presence indicates the feature).
    pub fn empty(extension_type: ExtensionType) -> Self {
        Self::new(extension_type, Vec::new())
    }
}

/// Insertion-ordered extension mapping with unique keys.
///
/// Used both for the client's offered extensions and for the server's
/// accumulated response set. Duplicate identifiers are a protocol violation
/// on ingestion and a server bug on response building, so `insert` rejects
/// them in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionMap {
    extensions: Vec<Extension>,
}

impl ExtensionMap {
    /// Create a new empty extension map.
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    /// Add an extension; fails on a duplicate identifier.
    pub fn insert(&mut self, extension: Extension) -> Result<()> {
        if self.has(extension.extension_type) {
            return Err(Error::IllegalParameter(format!(
                "Duplicate extension: {:?}",
                extension.extension_type
            )));
        }
        self.extensions.push(extension);
        Ok(())
    }

    /// Get an extension payload by type.
    pub fn get(&self, ext_type: ExtensionType) -> Option<&[u8]> {
        self.extensions
            .iter()
            .find(|e| e.extension_type == ext_type)
            .map(|e| e.data.as_slice())
    }

    /// Check if an extension is present.
    pub fn has(&self, ext_type: ExtensionType) -> bool {
        self.get(ext_type).is_some()
    }

    /// Iterate over the extensions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.iter()
    }

    /// Get the number of extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut map = ExtensionMap::new();
        map.insert(Extension::new(ExtensionType::MaxFragmentLength, vec![1]))
            .unwrap();
        map.insert(Extension::empty(ExtensionType::EncryptThenMac))
            .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(ExtensionType::MaxFragmentLength), Some(&[1u8][..]));
        assert_eq!(map.get(ExtensionType::EncryptThenMac), Some(&[][..]));
        assert!(!map.has(ExtensionType::TruncatedHmac));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut map = ExtensionMap::new();
        map.insert(Extension::empty(ExtensionType::EncryptThenMac))
            .unwrap();

        let err = map
            .insert(Extension::empty(ExtensionType::EncryptThenMac))
            .unwrap_err();
        assert!(matches!(err, Error::IllegalParameter(_)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = ExtensionMap::new();
        map.insert(Extension::empty(ExtensionType::EncryptThenMac))
            .unwrap();
        map.insert(Extension::new(ExtensionType::MaxFragmentLength, vec![2]))
            .unwrap();

        let order: Vec<_> = map.iter().map(|e| e.extension_type).collect();
        assert_eq!(
            order,
            vec![
                ExtensionType::EncryptThenMac,
                ExtensionType::MaxFragmentLength
            ]
        );
    }
}
