//! Element and attribute representation
//!
//! Elements live in the document arena and refer to each other through
//! [`NodeId`] indices: `children` and `sibling` are the owning edges of the
//! tree, `father` is a plain back-reference used for upward navigation.

use super::label::Label;

/// Compact element identifier (index into the document arena)
pub type NodeId = u32;

/// Quote style an attribute value was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quote {
    #[default]
    Single,
    Double,
    /// Bare value, terminated by whitespace, `>` or `/`
    None,
}

impl Quote {
    pub(crate) fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'\'' => Some(Quote::Single),
            b'"' => Some(Quote::Double),
            _ => None,
        }
    }

    /// The delimiter written around values, if any
    pub fn as_str(self) -> &'static str {
        match self {
            Quote::Single => "'",
            Quote::Double => "\"",
            Quote::None => "",
        }
    }
}

/// One `name=value` pair on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub(crate) name: Label,
    pub(crate) value: Label,
    pub(crate) quote: Quote,
}

impl Attribute {
    pub fn new(name: impl Into<Label>, value: impl Into<Label>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
            quote: Quote::Single,
        }
    }

    pub(crate) fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = quote;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Value without its surrounding quotes
    #[inline]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    #[inline]
    pub fn quote(&self) -> Quote {
        self.quote
    }
}

/// Handle to one attribute of one element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeId {
    pub element: NodeId,
    pub slot: u32,
}

/// A tree node: one tag and the links to its subtree and next sibling
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) name: Label,
    pub(crate) content: Option<Label>,
    pub(crate) attributes: Vec<Attribute>,
    /// First child; owns the whole children chain
    pub(crate) children: Option<NodeId>,
    /// Next element at the same depth
    pub(crate) sibling: Option<NodeId>,
    /// Parent element (None for top-level elements)
    pub(crate) father: Option<NodeId>,
}

impl Element {
    pub(crate) fn new(name: Label, father: Option<NodeId>) -> Self {
        Element {
            name,
            content: None,
            attributes: Vec::new(),
            children: None,
            sibling: None,
            father,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Text content, present only for leaf elements written as `<tag>text</tag>`
    #[inline]
    pub fn content(&self) -> Option<&str> {
        self.content.as_ref().map(Label::as_str)
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the first attribute named `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(Attribute::value)
    }

    #[inline]
    pub fn first_child(&self) -> Option<NodeId> {
        self.children
    }

    #[inline]
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.sibling
    }

    #[inline]
    pub fn father(&self) -> Option<NodeId> {
        self.father
    }

    /// Check if this element has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    /// Check if this element has attributes
    #[inline]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_creation() {
        let elem = Element::new(Label::new("model"), Some(0));
        assert_eq!(elem.name(), "model");
        assert_eq!(elem.father(), Some(0));
        assert!(elem.content().is_none());
        assert!(!elem.has_children());
        assert!(!elem.has_attributes());
    }

    #[test]
    fn test_attribute_lookup() {
        let mut elem = Element::new(Label::new("model"), None);
        elem.attributes.push(Attribute::new("name", "box"));
        elem.attributes.push(Attribute::new("type", "static").with_quote(Quote::Double));
        assert_eq!(elem.attribute("type"), Some("static"));
        assert_eq!(elem.attribute("pose"), None);
        assert_eq!(elem.attributes()[1].quote().as_str(), "\"");
    }
}
