//! sdfdom - Parser and arena DOM for a minimal SDF-style markup dialect
//!
//! Pipeline:
//! 1. `open_source`: load the raw bytes
//! 2. `parse` / `parse_with`: bracket pre-check, then the parser state
//!    machine builds an element arena
//! 3. `Document`: search, splice fragments, replace text
//! 4. `serialize`: write indented markup to a file or stdout
//!
//! ```
//! let mut world = sdfdom::Document::with_root("world");
//! let model = sdfdom::parse_str("<model name='box'><pose>0 0 0</pose></model>")?;
//! let id = world.append(world.root_id(), model).unwrap();
//! world.search_and_replace_content(id, "pose", "1 2 0")?;
//! assert_eq!(
//!     world.to_string(),
//!     "<world>\n\t<model name='box'>\n\t\t<pose>1 2 0</pose>\n\t</model>\n</world>\n"
//! );
//! # Ok::<(), sdfdom::Error>(())
//! ```

pub mod core;
pub mod dom;
pub mod error;
pub mod writer;

use std::path::Path;

pub use crate::core::{ParseOptions, Source};
pub use crate::dom::{Attribute, AttributeId, Document, Element, Label, NodeId, Quote};
pub use crate::error::{Error, Result};
pub use crate::writer::{serialize, Destination, WriteOptions};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Entry points
// ============================================================================

/// Read a file into a parse source
pub fn open_source(path: impl AsRef<Path>) -> Result<Source> {
    Source::open(path)
}

/// Parse with strict options (bracket pre-check on, unclosed tags rejected)
pub fn parse(source: &Source) -> Result<Document> {
    parse_with(source, &ParseOptions::strict())
}

/// Parse with explicit options
pub fn parse_with(source: &Source, options: &ParseOptions) -> Result<Document> {
    crate::core::parser::parse_source(source, options)
}

/// Parse markup held in a string
pub fn parse_str(input: &str) -> Result<Document> {
    parse(&Source::from_text("<string>", input))
}
