//! Document - arena-based element tree
//!
//! All elements of a document live in one `Vec<Element>` and are addressed
//! by [`NodeId`]. The root element is the first top-level element; further
//! top-level elements hang off its `sibling` chain. Freeing the document
//! releases every element exactly once.

use super::label::Label;
use super::node::{Attribute, AttributeId, Element, NodeId};

/// A parsed (or spliced) markup document
#[derive(Debug, Clone)]
pub struct Document {
    /// Arena of elements
    pub(crate) nodes: Vec<Element>,
    /// Root element ID
    pub(crate) root: NodeId,
}

impl Document {
    /// Assemble a document from an arena built by the parser
    pub(crate) fn from_parts(nodes: Vec<Element>, root: NodeId) -> Self {
        debug_assert!((root as usize) < nodes.len());
        Document { nodes, root }
    }

    /// Create a document holding a single empty root element
    ///
    /// Used as the synthetic root that parsed fragments get spliced under.
    pub fn with_root(name: &str) -> Self {
        Document {
            nodes: vec![Element::new(Label::new(name), None)],
            root: 0,
        }
    }

    /// Get root element ID
    #[inline]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.nodes[self.root as usize]
    }

    /// Get an element by ID
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id as usize)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id as usize)
    }

    /// Get element name
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Element::name)
    }

    /// Get element text content
    pub fn content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Element::content)
    }

    /// Resolve an attribute handle
    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.get(id.element)?.attributes.get(id.slot as usize)
    }

    /// Number of elements in the arena
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over the direct children of an element
    pub fn children(&self, id: NodeId) -> ChainIter<'_> {
        let first = self.get(id).and_then(|e| e.children);
        ChainIter { doc: self, next: first }
    }

    /// Iterate over an element and the siblings that follow it
    pub fn siblings(&self, id: NodeId) -> ChainIter<'_> {
        let next = self.get(id).map(|_| id);
        ChainIter { doc: self, next }
    }

    /// Iterate over the top-level elements (root and its siblings)
    pub fn top_level(&self) -> ChainIter<'_> {
        self.siblings(self.root)
    }

    /// Iterate over all descendants of an element in document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut stack = Vec::new();
        if let Some(first) = self.get(id).and_then(|e| e.children) {
            stack.push(first);
        }
        DescendantIter { doc: self, stack }
    }

    /// Release the whole tree
    ///
    /// Consumes the document, so no element can be used or released again.
    pub fn close(self) {
        log::debug!("closing document ({} elements)", self.nodes.len());
        drop(self);
    }
}

/// Iterator along a `sibling` chain
pub struct ChainIter<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get(current).and_then(|e| e.sibling);
        Some(current)
    }
}

/// Pre-order iterator over a subtree
pub struct DescendantIter<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DescendantIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Some(elem) = self.doc.get(current) {
            // sibling below child so the child subtree comes out first
            if let Some(sibling) = elem.sibling {
                self.stack.push(sibling);
            }
            if let Some(child) = elem.children {
                self.stack.push(child);
            }
        }
        Some(current)
    }
}
