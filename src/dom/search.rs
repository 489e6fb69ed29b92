//! Element and attribute lookup

use super::document::Document;
use super::node::{AttributeId, NodeId};

impl Document {
    /// Find the first element named `name` along the sibling chain starting at `start`
    ///
    /// `start` itself is checked first. Children are never visited.
    pub fn search(&self, start: NodeId, name: &str) -> Option<NodeId> {
        self.siblings(start).find(|&id| self.name(id) == Some(name))
    }

    /// Find the first element named `name` in document order
    ///
    /// Checks `start`, then its whole children subtree, then each following
    /// sibling and its subtree. A match inside the children always wins over
    /// a match on a later sibling.
    pub fn deep_search(&self, start: NodeId, name: &str) -> Option<NodeId> {
        let mut stack = Vec::new();
        if self.get(start).is_some() {
            stack.push(start);
        }

        while let Some(id) = stack.pop() {
            let elem = self.get(id)?;
            if elem.name == name {
                return Some(id);
            }
            if let Some(sibling) = elem.sibling {
                stack.push(sibling);
            }
            if let Some(child) = elem.children {
                stack.push(child);
            }
        }

        None
    }

    /// Find the first attribute named `name` on `element`
    pub fn attribute_search(&self, element: NodeId, name: &str) -> Option<AttributeId> {
        let slot = self
            .get(element)?
            .attributes
            .iter()
            .position(|a| a.name == name)?;
        Some(AttributeId {
            element,
            slot: slot as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_str;

    #[test]
    fn test_search_stays_on_sibling_chain() {
        let doc = parse_str("<a><target/></a><b/><target/>").unwrap();
        let found = doc.search(doc.root_id(), "target").unwrap();
        // the nested <target> under <a> is not visited
        assert_eq!(doc.get(found).unwrap().father(), None);
        assert!(doc.search(doc.root_id(), "missing").is_none());
    }

    #[test]
    fn test_search_includes_start() {
        let doc = parse_str("<a/><b/>").unwrap();
        assert_eq!(doc.search(doc.root_id(), "a"), Some(doc.root_id()));
    }

    #[test]
    fn test_deep_search_prefers_children() {
        let doc = parse_str("<a><b><hit k='child'/></b></a><hit k='sibling'/>").unwrap();
        let found = doc.deep_search(doc.root_id(), "hit").unwrap();
        assert_eq!(doc.get(found).unwrap().attribute("k"), Some("child"));
    }

    #[test]
    fn test_deep_search_reaches_later_siblings() {
        let doc = parse_str("<a><b/></a><c><d>x</d></c>").unwrap();
        let found = doc.deep_search(doc.root_id(), "d").unwrap();
        assert_eq!(doc.content(found), Some("x"));
    }

    #[test]
    fn test_attribute_search() {
        let doc = parse_str("<model name='X' type='Y'/>").unwrap();
        let attr = doc.attribute_search(doc.root_id(), "type").unwrap();
        assert_eq!(doc.attribute(attr).unwrap().value(), "Y");
        assert!(doc.attribute_search(doc.root_id(), "pose").is_none());
    }
}
