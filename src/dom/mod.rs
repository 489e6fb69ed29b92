//! DOM Module - Arena-based element tree
//!
//! - Arena allocation for elements, addressed by `NodeId` (u32)
//! - Owned `Label` text spans for names, values and content
//! - Lookup (`search`, `deep_search`, `attribute_search`)
//! - Mutation (`append`, `append_sibling`, `replace_*`)

pub mod document;
pub mod label;
pub mod mutate;
pub mod node;
pub mod search;

pub use document::{ChainIter, DescendantIter, Document};
pub use label::Label;
pub use node::{Attribute, AttributeId, Element, NodeId, Quote};
