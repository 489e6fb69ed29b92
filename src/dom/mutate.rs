//! Tree mutation: splicing fragments and replacing leaf text
//!
//! These are the only operations that reassign `children`/`sibling` links
//! or change text after parsing.

use super::document::Document;
use super::label::Label;
use super::node::{AttributeId, NodeId};
use crate::error::{Error, Result};

impl Document {
    /// Attach `fragment` as the last child of `father`
    ///
    /// The fragment's root (with any top-level siblings it carries) becomes
    /// the new tail of `father`'s children chain. Returns the new ID of the
    /// fragment root, or `None` if `father` is not in this document.
    pub fn append(&mut self, father: NodeId, fragment: Document) -> Option<NodeId> {
        self.get(father)?;
        let grafted = self.graft(fragment, Some(father));

        match self.nodes[father as usize].children {
            Some(first) => {
                let last = self.last_in_chain(first);
                self.nodes[last as usize].sibling = Some(grafted);
            }
            None => self.nodes[father as usize].children = Some(grafted),
        }

        log::debug!(
            "appended <{}> under <{}>",
            self.nodes[grafted as usize].name,
            self.nodes[father as usize].name
        );
        Some(grafted)
    }

    /// Attach `fragment` at the end of the sibling chain that `element` belongs to
    ///
    /// Returns the new ID of the fragment root, or `None` if `element` is not
    /// in this document.
    pub fn append_sibling(&mut self, element: NodeId, fragment: Document) -> Option<NodeId> {
        let father = self.get(element)?.father;
        let grafted = self.graft(fragment, father);

        let last = self.last_in_chain(element);
        self.nodes[last as usize].sibling = Some(grafted);

        log::debug!(
            "appended <{}> after <{}>",
            self.nodes[grafted as usize].name,
            self.nodes[element as usize].name
        );
        Some(grafted)
    }

    /// Install `text` as the content of `element`, discarding the previous content
    ///
    /// Returns false if `element` is not in this document.
    pub fn replace_content(&mut self, element: NodeId, text: &str) -> bool {
        match self.get_mut(element) {
            Some(elem) => {
                elem.content = Some(Label::new(text));
                true
            }
            None => false,
        }
    }

    /// Install `text` as the value of an attribute, discarding the previous value
    ///
    /// `text` is the bare value; the attribute keeps its quote style.
    /// Values are never escaped, so a `text` holding both `'` and `"` could
    /// not be written back and is refused. Returns false if the handle does
    /// not resolve or the value is refused.
    pub fn replace_attribute_value(&mut self, attribute: AttributeId, text: &str) -> bool {
        if !is_quotable(text) {
            log::warn!("refusing attribute value with both quote characters: {:?}", text);
            return false;
        }
        let slot = attribute.slot as usize;
        match self
            .get_mut(attribute.element)
            .and_then(|e| e.attributes.get_mut(slot))
        {
            Some(attr) => {
                attr.value = Label::new(text);
                true
            }
            None => false,
        }
    }

    /// Find the element named `tag` (see [`Document::deep_search`]) and replace its content
    pub fn search_and_replace_content(
        &mut self,
        start: NodeId,
        tag: &str,
        text: &str,
    ) -> Result<NodeId> {
        let id = self
            .deep_search(start, tag)
            .ok_or_else(|| Error::TagNotFound { name: tag.to_string() })?;
        self.replace_content(id, text);
        log::trace!("content of <{}> set to {:?}", tag, text);
        Ok(id)
    }

    /// Find the element named `tag`, then its attribute `name`, and replace the value
    pub fn search_and_replace_attribute(
        &mut self,
        start: NodeId,
        tag: &str,
        name: &str,
        value: &str,
    ) -> Result<AttributeId> {
        if !is_quotable(value) {
            return Err(Error::UnquotableValue {
                value: value.to_string(),
            });
        }
        let id = self
            .deep_search(start, tag)
            .ok_or_else(|| Error::TagNotFound { name: tag.to_string() })?;
        let attr = self
            .attribute_search(id, name)
            .ok_or_else(|| Error::AttributeNotFound {
                element: tag.to_string(),
                name: name.to_string(),
            })?;
        self.replace_attribute_value(attr, value);
        log::trace!("attribute {} of <{}> set to {:?}", name, tag, value);
        Ok(attr)
    }

    /// Move every element of `fragment` into this arena
    ///
    /// Links inside the fragment are shifted by the arena offset; the
    /// fragment's top-level elements get `father` as their parent.
    fn graft(&mut self, fragment: Document, father: Option<NodeId>) -> NodeId {
        let offset = self.nodes.len() as NodeId;
        let shift = |id: Option<NodeId>| id.map(|i| i + offset);

        self.nodes.reserve(fragment.nodes.len());
        for mut elem in fragment.nodes {
            elem.children = shift(elem.children);
            elem.sibling = shift(elem.sibling);
            elem.father = match elem.father {
                Some(f) => Some(f + offset),
                None => father,
            };
            self.nodes.push(elem);
        }

        fragment.root + offset
    }

    fn last_in_chain(&self, start: NodeId) -> NodeId {
        let mut last = start;
        while let Some(next) = self.nodes[last as usize].sibling {
            last = next;
        }
        last
    }
}

/// A value can be delimited by at least one quote style
fn is_quotable(value: &str) -> bool {
    !(value.contains('\'') && value.contains('"'))
}

#[cfg(test)]
mod tests {
    use crate::{parse_str, Document, Error};

    #[test]
    fn test_append_first_child() {
        let mut world = Document::with_root("world");
        let id = world.append(world.root_id(), parse_str("<light/>").unwrap()).unwrap();
        assert_eq!(world.root().first_child(), Some(id));
        assert_eq!(world.get(id).unwrap().father(), Some(world.root_id()));
    }

    #[test]
    fn test_append_keeps_order() {
        let mut world = Document::with_root("world");
        for name in ["first", "second", "third"] {
            let fragment = parse_str(&format!("<{}/>", name)).unwrap();
            world.append(world.root_id(), fragment);
        }
        let names: Vec<_> = world
            .children(world.root_id())
            .filter_map(|id| world.name(id))
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_append_remaps_fragment_links() {
        let mut world = parse_str("<world><gui/></world>").unwrap();
        let fragment = parse_str("<model><link><pose>0</pose></link></model>").unwrap();
        let model = world.append(world.root_id(), fragment).unwrap();

        let link = world.children(model).next().unwrap();
        let pose = world.children(link).next().unwrap();
        assert_eq!(world.name(link), Some("link"));
        assert_eq!(world.content(pose), Some("0"));
        assert_eq!(world.get(pose).unwrap().father(), Some(link));
        assert_eq!(world.get(link).unwrap().father(), Some(model));
    }

    #[test]
    fn test_append_to_missing_father() {
        let mut doc = parse_str("<a/>").unwrap();
        assert!(doc.append(42, parse_str("<b/>").unwrap()).is_none());
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn test_append_sibling() {
        let mut doc = parse_str("<a><b/></a>").unwrap();
        let b = doc.children(doc.root_id()).next().unwrap();
        let c = doc.append_sibling(b, parse_str("<c/>").unwrap()).unwrap();
        assert_eq!(doc.get(b).unwrap().next_sibling(), Some(c));
        assert_eq!(doc.get(c).unwrap().father(), Some(doc.root_id()));

        let top = doc.append_sibling(doc.root_id(), parse_str("<d/>").unwrap()).unwrap();
        assert_eq!(doc.get(top).unwrap().father(), None);
        assert_eq!(doc.top_level().count(), 2);
    }

    #[test]
    fn test_replace_content_last_write_wins() {
        let mut doc = parse_str("<pose>0 0 0</pose>").unwrap();
        let root = doc.root_id();
        assert!(doc.replace_content(root, "1 2 3"));
        assert!(doc.replace_content(root, "1 2 3"));
        assert_eq!(doc.content(root), Some("1 2 3"));
        assert!(!doc.replace_content(99, "x"));
    }

    #[test]
    fn test_replace_attribute_leaves_others() {
        let mut doc = parse_str("<m name='X' type='Y'/>").unwrap();
        let attr = doc.attribute_search(doc.root_id(), "name").unwrap();
        assert!(doc.replace_attribute_value(attr, "Z"));
        assert_eq!(doc.root().attribute("name"), Some("Z"));
        assert_eq!(doc.root().attribute("type"), Some("Y"));
    }

    #[test]
    fn test_value_with_both_quotes_refused() {
        let mut doc = parse_str("<m a='x'/>").unwrap();
        let root = doc.root_id();
        let attr = doc.attribute_search(root, "a").unwrap();
        assert!(!doc.replace_attribute_value(attr, "it's \"q\""));
        assert_eq!(doc.root().attribute("a"), Some("x"));

        let err = doc
            .search_and_replace_attribute(root, "m", "a", "it's \"q\"")
            .unwrap_err();
        assert!(matches!(err, Error::UnquotableValue { .. }));

        // still readable after a single-quote-only value
        assert!(doc.replace_attribute_value(attr, "it's"));
        let again = parse_str(&doc.to_string()).unwrap();
        assert_eq!(again.root().attribute("a"), Some("it's"));
    }

    #[test]
    fn test_search_and_replace_errors() {
        let mut doc = parse_str("<model name='m'><pose>0</pose></model>").unwrap();
        let root = doc.root_id();

        let err = doc.search_and_replace_content(root, "size", "1").unwrap_err();
        assert!(matches!(err, Error::TagNotFound { ref name } if name == "size"));

        let err = doc
            .search_and_replace_attribute(root, "model", "kind", "x")
            .unwrap_err();
        assert!(matches!(err, Error::AttributeNotFound { .. }));

        let pose = doc.search_and_replace_content(root, "pose", "1 1 0").unwrap();
        assert_eq!(doc.content(pose), Some("1 1 0"));
        doc.search_and_replace_attribute(root, "model", "name", "Box_1").unwrap();
        assert_eq!(doc.root().attribute("name"), Some("Box_1"));
    }
}
