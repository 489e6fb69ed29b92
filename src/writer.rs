//! Serializer
//!
//! Renders a document back to indented markup. Each element starts on its
//! own line, indented one level per depth:
//!
//! ```text
//! <model name='box'>
//!     <pose>0 0 0 0 0 0</pose>
//!     <static>true</static>
//!     <link name='l'/>
//! </model>
//! ```
//!
//! An element with content is written on one line, an element with
//! children gets a closing tag on its own line, anything else self-closes.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::dom::{Attribute, Document, NodeId, Quote};
use crate::error::{Error, Result};

/// Serializer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Written once per depth level in front of every line
    pub indent: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: "\t".to_string(),
        }
    }
}

/// Where [`serialize`] sends its output
#[derive(Debug, Clone, Copy)]
pub enum Destination<'a> {
    Stdout,
    Path(&'a Path),
}

/// Write a document to a file or to standard output
pub fn serialize(doc: &Document, destination: Destination<'_>) -> Result<()> {
    let options = WriteOptions::default();

    match destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            doc.write_to(&mut out, &options)
                .and_then(|_| out.flush())
                .map_err(|e| Error::io("<stdout>", e))
        }
        Destination::Path(path) => {
            let file = File::create(path).map_err(|e| Error::io(path, e))?;
            let mut out = BufWriter::new(file);
            doc.write_to(&mut out, &options)
                .and_then(|_| out.flush())
                .map_err(|e| Error::io(path, e))?;
            log::debug!("wrote {} elements to {}", doc.node_count(), path.display());
            Ok(())
        }
    }
}

impl Document {
    /// Render the whole document (root and its top-level siblings)
    pub fn to_string_with(&self, options: &WriteOptions) -> String {
        let mut buf = String::with_capacity(self.node_count() * 32);
        self.render(self.root_id(), options, &mut buf);
        buf
    }

    /// Render the document into `out`
    pub fn write_to<W: Write>(&self, out: &mut W, options: &WriteOptions) -> io::Result<()> {
        out.write_all(self.to_string_with(options).as_bytes())
    }

    /// Render `start`, its subtree and the siblings that follow it
    ///
    /// Iterative with an explicit stack so deep trees cannot overflow.
    fn render(&self, start: NodeId, options: &WriteOptions, buf: &mut String) {
        enum Step {
            Enter(NodeId, usize),
            Close(NodeId, usize),
        }

        let mut stack = Vec::with_capacity(64);
        stack.push(Step::Enter(start, 0));

        while let Some(step) = stack.pop() {
            match step {
                Step::Close(id, depth) => {
                    push_indent(buf, &options.indent, depth);
                    buf.push_str("</");
                    buf.push_str(self.name(id).unwrap_or_default());
                    buf.push_str(">\n");
                }
                Step::Enter(id, depth) => {
                    let elem = match self.get(id) {
                        Some(e) => e,
                        None => continue,
                    };

                    // the sibling comes after this element's whole subtree
                    if let Some(sibling) = elem.next_sibling() {
                        stack.push(Step::Enter(sibling, depth));
                    }

                    push_indent(buf, &options.indent, depth);
                    buf.push('<');
                    buf.push_str(elem.name());
                    for attr in elem.attributes() {
                        push_attribute(buf, attr);
                    }

                    if let Some(content) = elem.content() {
                        buf.push('>');
                        buf.push_str(content);
                        buf.push_str("</");
                        buf.push_str(elem.name());
                        buf.push_str(">\n");
                    } else if let Some(child) = elem.first_child() {
                        buf.push_str(">\n");
                        stack.push(Step::Close(id, depth));
                        stack.push(Step::Enter(child, depth + 1));
                    } else {
                        buf.push_str("/>\n");
                    }
                }
            }
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&WriteOptions::default()))
    }
}

#[inline]
fn push_indent(buf: &mut String, indent: &str, depth: usize) {
    if indent.is_empty() {
        return;
    }
    for _ in 0..depth {
        buf.push_str(indent);
    }
}

fn push_attribute(buf: &mut String, attr: &Attribute) {
    let quote = effective_quote(attr).as_str();
    buf.push(' ');
    buf.push_str(attr.name());
    buf.push('=');
    buf.push_str(quote);
    buf.push_str(attr.value());
    buf.push_str(quote);
}

/// Quote style that keeps the value readable by the parser
///
/// A value replaced after parsing may no longer fit the style it was parsed with.
fn effective_quote(attr: &Attribute) -> Quote {
    let value = attr.value();
    match attr.quote() {
        Quote::None
            if value.is_empty()
                || value.bytes().next().and_then(Quote::from_byte).is_some()
                || value
                    .bytes()
                    .any(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'>' | b'/' | b'<')) =>
        {
            if value.contains('\'') {
                Quote::Double
            } else {
                Quote::Single
            }
        }
        Quote::Single if value.contains('\'') => Quote::Double,
        Quote::Double if value.contains('"') => Quote::Single,
        quote => quote,
    }
}
