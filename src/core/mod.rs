//! Core parsing primitives
//!
//! This module contains the building blocks for markup parsing:
//! - Source: loading the input buffer
//! - Scanner: memchr-accelerated delimiter search and extraction
//! - Syntax: linear bracket pre-check
//! - TagStack: open-tag matching
//! - Attributes: attribute list extraction
//! - Parser: the state machine that builds the element arena

pub mod attributes;
pub mod parser;
pub mod scanner;
pub mod source;
pub mod syntax;
pub mod tag_stack;

pub use parser::{ParseOptions, ParseState, Parser};
pub use source::Source;
