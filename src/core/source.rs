//! Source buffer
//!
//! The whole markup text, loaded in one read and immutable afterwards.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Named, length-known byte buffer holding a markup source
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    content: Vec<u8>,
}

impl Source {
    /// Read the file at `path` in one shot
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| Error::io(path, e))?;
        log::debug!("loaded {} ({} bytes)", path.display(), content.len());
        Ok(Source {
            name: path.display().to_string(),
            content,
        })
    }

    /// Wrap bytes that are already in memory
    pub fn from_bytes(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Source {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Wrap a string that is already in memory
    pub fn from_text(name: impl Into<String>, content: &str) -> Self {
        Self::from_bytes(name, content.as_bytes())
    }

    /// Name the source was loaded from (file path or caller-supplied label)
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw content
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Content length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
