//! Parser state machine
//!
//! Scans the source left to right and builds the element arena directly.
//! At every step the lexeme under the cursor decides the transition:
//!
//! - `<!` / `<?`: comment or declaration, skipped
//! - `</`: closing tag, checked against the tag stack
//! - `/>`: end of a self-closing tag
//! - `>`: end of an opening tag, followed by content or children
//! - `<`: a new element, linked as child or sibling of the cursor
//!
//! Any illegal transition aborts the whole parse.

use super::attributes::extract_attributes;
use super::scanner::{is_whitespace, Scanner};
use super::source::Source;
use super::syntax::check_brackets;
use super::tag_stack::TagStack;
use crate::dom::{Document, Element, Label, NodeId};
use crate::error::{Error, Result};

/// Bytes that end a tag name
const TAG_NAME_STOPS: &[u8] = b" \t\r\n>/<";

/// Current parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// No element seen yet
    Start,
    /// Inside an opening tag, before its `>` or `/>`
    SawOpenBracket,
    /// Just consumed the `>` of an opening tag; content or children follow
    TagOpenComplete,
    /// Just finished an element; a sibling or the parent's close follows
    TagClosedOrSelfClosed,
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Run the bracket pre-check before parsing
    pub precheck: bool,
    /// Fail when input ends with tags still open
    pub reject_unclosed: bool,
}

impl ParseOptions {
    /// Pre-check on, unclosed tags rejected
    pub fn strict() -> Self {
        ParseOptions {
            precheck: true,
            reject_unclosed: true,
        }
    }

    /// Pre-check off, unclosed tags at end of input accepted
    pub fn lenient() -> Self {
        ParseOptions {
            precheck: false,
            reject_unclosed: false,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Parse a source into a document
pub fn parse_source(source: &Source, options: &ParseOptions) -> Result<Document> {
    log::debug!("parsing {} ({} bytes)", source.name(), source.len());

    if options.precheck {
        check_brackets(source.as_bytes())?;
    }

    let doc = Parser::new(source.as_bytes(), options).run()?;
    log::debug!("parsed {}: {} elements", source.name(), doc.node_count());
    Ok(doc)
}

/// Single-use markup parser
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    state: ParseState,
    /// Arena under construction
    nodes: Vec<Element>,
    /// Element currently being built or just finished
    cursor: Option<NodeId>,
    stack: TagStack,
    reject_unclosed: bool,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8], options: &ParseOptions) -> Self {
        Parser {
            scanner: Scanner::new(input),
            state: ParseState::Start,
            nodes: Vec::with_capacity(64),
            cursor: None,
            stack: TagStack::new(),
            reject_unclosed: options.reject_unclosed,
        }
    }

    /// Get the current parse state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Get the current position in the input
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Run the state machine to the end of input
    pub fn run(mut self) -> Result<Document> {
        while !self.scanner.is_eof() {
            self.step()?;
        }
        self.finish()
    }

    /// Consume one lexeme
    fn step(&mut self) -> Result<()> {
        if self.scanner.starts_with(b"<!") || self.scanner.starts_with(b"<?") {
            self.skip_comment()
        } else if self.scanner.starts_with(b"</") {
            self.close_tag()
        } else if self.scanner.starts_with(b"/>") {
            self.self_close_tag()
        } else {
            match self.scanner.peek() {
                Some(b'>') => self.open_tag_end(),
                Some(b'<') => self.open_tag(),
                _ => self.stray_text(),
            }
        }
    }

    fn set_state(&mut self, next: ParseState) {
        log::trace!(
            "{:?} -> {:?} at byte {}",
            self.state,
            next,
            self.scanner.position()
        );
        self.state = next;
    }

    /// `<!-- ... -->`, `<!DOCTYPE ...>` or `<? ... ?>`
    fn skip_comment(&mut self) -> Result<()> {
        let start = self.scanner.position();
        if self.state == ParseState::SawOpenBracket {
            return Err(Error::unexpected("<!", start));
        }

        let (terminator, expected) = if self.scanner.starts_with(b"<!--") {
            self.scanner.advance(4);
            (&b"-->"[..], "'-->'")
        } else if self.scanner.starts_with(b"<?") {
            self.scanner.advance(2);
            (&b"?>"[..], "'?>'")
        } else {
            self.scanner.advance(2);
            (&b">"[..], "'>'")
        };

        let end = self.scanner.find_seq(terminator).ok_or(Error::UnexpectedEof {
            expected,
            position: start,
        })?;
        self.scanner.set_position(end + terminator.len());
        self.skip_to_next_tag()?;
        Ok(())
    }

    /// `</name>`
    fn close_tag(&mut self) -> Result<()> {
        let start = self.scanner.position();
        if self.state == ParseState::SawOpenBracket {
            return Err(Error::unexpected("</", start));
        }

        self.scanner.advance(1);
        let raw = self.scanner.extract(b">").ok_or(Error::UnexpectedEof {
            expected: "'>' of closing tag",
            position: start,
        })?;
        let name = Label::new(String::from_utf8_lossy(raw).trim());

        let open = self.stack.pop().ok_or_else(|| Error::UnmatchedCloseTag {
            name: name.to_string(),
            position: start,
        })?;
        if open != name {
            return Err(Error::MismatchedCloseTag {
                expected: open.to_string(),
                found: name.to_string(),
                position: start,
            });
        }

        if self.state == ParseState::TagClosedOrSelfClosed {
            let cursor = self.cursor.and_then(|id| self.nodes[id as usize].father);
            if cursor.is_none() {
                return Err(Error::UnmatchedCloseTag {
                    name: name.to_string(),
                    position: start,
                });
            }
            self.cursor = cursor;
        }

        self.scanner.advance(1);
        self.skip_to_next_tag()?;
        self.set_state(ParseState::TagClosedOrSelfClosed);
        Ok(())
    }

    /// `/>`
    fn self_close_tag(&mut self) -> Result<()> {
        if self.state != ParseState::SawOpenBracket {
            return Err(Error::unexpected("/>", self.scanner.position()));
        }

        self.scanner.advance(2);
        self.skip_to_next_tag()?;
        self.set_state(ParseState::TagClosedOrSelfClosed);
        Ok(())
    }

    /// `>` ending an opening tag
    fn open_tag_end(&mut self) -> Result<()> {
        let start = self.scanner.position();
        let cursor = match (self.state, self.cursor) {
            (ParseState::SawOpenBracket, Some(id)) => id,
            _ => return Err(Error::unexpected(">", start)),
        };

        let next = self.scanner.find_tag_start();
        let child = next.filter(|&n| !self.scanner.slice(n, self.scanner.len()).starts_with(b"</"));

        if let Some(next) = child {
            // text in front of a child tag or comment is dropped
            let skipped = self.scanner.slice(start + 1, next);
            if !skipped.iter().all(|&b| is_whitespace(b)) {
                log::warn!(
                    "discarding text before child tag at byte {}: {:?}",
                    start + 1,
                    String::from_utf8_lossy(skipped)
                );
            }
            self.scanner.set_position(next);
        } else {
            // up to the close tag, or to the end of input when the tag is never closed
            let end = next.unwrap_or(self.scanner.len());
            let text = self.scanner.slice(start + 1, end);
            if !text.is_empty() {
                self.nodes[cursor as usize].content = Some(Label::from_bytes(text));
            }
            self.scanner.set_position(end);
        }

        let name = self.nodes[cursor as usize].name.clone();
        self.stack.push(name);
        self.set_state(ParseState::TagOpenComplete);
        Ok(())
    }

    /// `<name attr=value ...`
    fn open_tag(&mut self) -> Result<()> {
        let start = self.scanner.position();
        let placement = match self.state {
            ParseState::SawOpenBracket => return Err(Error::unexpected("<", start)),
            ParseState::Start => Placement::Root,
            ParseState::TagOpenComplete => Placement::Child,
            ParseState::TagClosedOrSelfClosed => Placement::Sibling,
        };

        let raw = self.scanner.extract(TAG_NAME_STOPS).ok_or(Error::UnexpectedEof {
            expected: "end of tag name",
            position: start,
        })?;
        if raw.is_empty() || self.scanner.peek() == Some(b'<') {
            let token = String::from_utf8_lossy(self.scanner.slice(start, self.scanner.position() + 1));
            return Err(Error::unexpected(token, start));
        }

        let id = self.new_element(Label::from_bytes(raw), placement)?;
        self.set_state(ParseState::SawOpenBracket);

        let attributes = extract_attributes(&mut self.scanner)?;
        self.nodes[id as usize].attributes = attributes;
        Ok(())
    }

    /// Text outside any tag: whitespace is skipped, anything else is rejected
    fn stray_text(&mut self) -> Result<()> {
        let start = self.scanner.position();
        let end = self.scanner.find_tag_start().unwrap_or(self.scanner.len());
        let text = self.scanner.slice(start, end);

        if self.state == ParseState::SawOpenBracket || !text.iter().all(|&b| is_whitespace(b)) {
            let shown = text.iter().take(16).copied().collect::<Vec<u8>>();
            return Err(Error::unexpected(String::from_utf8_lossy(&shown), start));
        }

        self.scanner.set_position(end);
        Ok(())
    }

    /// Move past whatever text sits before the next tag
    ///
    /// Text outside every element is rejected; text inside an open element
    /// is dropped with a warning.
    fn skip_to_next_tag(&mut self) -> Result<()> {
        let start = self.scanner.position();
        self.scanner.go_next_tag();
        let skipped = self.scanner.slice(start, self.scanner.position());
        if !skipped.iter().all(|&b| is_whitespace(b)) {
            if self.stack.is_empty() {
                let shown = skipped.iter().take(16).copied().collect::<Vec<u8>>();
                return Err(Error::unexpected(String::from_utf8_lossy(&shown), start));
            }
            log::warn!(
                "ignoring text between tags at byte {}: {:?}",
                start,
                String::from_utf8_lossy(skipped)
            );
        }
        Ok(())
    }

    /// Allocate an element and link it into the tree
    fn new_element(&mut self, name: Label, placement: Placement) -> Result<NodeId> {
        let id = self.nodes.len() as NodeId;

        match (placement, self.cursor) {
            (Placement::Root, _) => {
                self.nodes.push(Element::new(name, None));
            }
            (Placement::Child, Some(father)) => {
                self.nodes.push(Element::new(name, Some(father)));
                self.nodes[father as usize].children = Some(id);
            }
            (Placement::Sibling, Some(prev)) => {
                let father = self.nodes[prev as usize].father;
                self.nodes.push(Element::new(name, father));
                self.nodes[prev as usize].sibling = Some(id);
            }
            (_, None) => return Err(Error::unexpected("<", self.scanner.position())),
        }

        self.cursor = Some(id);
        Ok(id)
    }

    /// Check the end-of-input state and hand out the document
    fn finish(self) -> Result<Document> {
        let end = self.scanner.position();
        if self.state == ParseState::SawOpenBracket {
            return Err(Error::UnexpectedEof {
                expected: "'>' or '/>'",
                position: end,
            });
        }
        if self.nodes.is_empty() {
            return Err(Error::EmptyDocument);
        }
        if let Some(open) = self.stack.peek() {
            if self.reject_unclosed {
                return Err(Error::UnclosedTag {
                    name: open.to_string(),
                });
            }
            log::warn!("input ended with {} tag(s) still open", self.stack.len());
        }

        Ok(Document::from_parts(self.nodes, 0))
    }
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    Root,
    Child,
    Sibling,
}
