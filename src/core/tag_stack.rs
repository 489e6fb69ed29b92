//! Tag matching stack
//!
//! LIFO of open tag names. Owned by one parse and dropped with it.

use crate::dom::Label;

/// Names of the tags opened and not yet closed, innermost last
#[derive(Debug, Default)]
pub struct TagStack {
    names: Vec<Label>,
}

impl TagStack {
    pub fn new() -> Self {
        TagStack { names: Vec::with_capacity(16) }
    }

    /// Push a newly opened tag name
    #[inline]
    pub fn push(&mut self, name: Label) {
        self.names.push(name);
    }

    /// Remove the innermost name
    #[inline]
    pub fn pop(&mut self) -> Option<Label> {
        self.names.pop()
    }

    /// Innermost name without removing it
    #[inline]
    pub fn peek(&self) -> Option<&Label> {
        self.names.last()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Current nesting depth
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }
}
