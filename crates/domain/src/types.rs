// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

/// An inventory file selected by the user.
///
/// The file is immutable once selected. Re-selecting replaces it wholesale.
/// The raw bytes are shared so that state snapshots and outgoing requests
/// do not copy the file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryFile {
    /// The original file name as reported by the picker.
    name: String,
    /// The declared media type, if the picker reported one.
    mime_type: Option<String>,
    /// The raw file contents.
    bytes: Arc<[u8]>,
}

impl InventoryFile {
    /// Creates a new inventory file.
    ///
    /// # Arguments
    ///
    /// * `name` - The original file name
    /// * `mime_type` - The declared media type, if any
    /// * `bytes` - The raw file contents
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        mime_type: Option<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes: bytes.into(),
        }
    }

    /// Returns the original file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared media type, if any.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the raw file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns a shared handle to the raw file contents.
    #[must_use]
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Returns the size of the file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the file has no contents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
