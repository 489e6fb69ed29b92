//! Owned text spans
//!
//! Every tag name, attribute name, attribute value and content string in a
//! document is a [`Label`]: an owned, immutable UTF-8 sequence whose length
//! is stored with it. Bytes that are not valid UTF-8 are replaced with
//! U+FFFD when the label is created.

use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Label {
    text: Box<str>,
}

impl Label {
    pub fn new(text: &str) -> Self {
        Label { text: text.into() }
    }

    /// Materialize a label from raw source bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Label {
            text: String::from_utf8_lossy(bytes).into(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.text, f)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::new(text)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Label { text: text.into_boxed_str() }
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        &*self.text == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        &*self.text == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_explicit() {
        let label = Label::from_bytes(b"Box_Red_12");
        assert_eq!(label.len(), 10);
        assert_eq!(label, "Box_Red_12");
    }

    #[test]
    fn test_lossy_bytes() {
        let label = Label::from_bytes(b"a\xffb");
        assert_eq!(label.as_str(), "a\u{fffd}b");
    }

    #[test]
    fn test_empty() {
        let label = Label::default();
        assert!(label.is_empty());
        assert_eq!(label.to_string(), "");
    }
}
