//! Bracket pre-check
//!
//! A single linear pass that rejects inputs where `<` and `>` do not
//! alternate. Tag name matching is left to the parser's tag stack.

use crate::error::{Error, Result};
use memchr::memchr2_iter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastBracket {
    None,
    Open,
    Close,
}

/// Verify that every `<` is followed by a `>` before the next `<`, and vice versa
pub fn check_brackets(input: &[u8]) -> Result<()> {
    let mut last = LastBracket::None;

    for pos in memchr2_iter(b'<', b'>', input) {
        let (seen, bracket) = if input[pos] == b'<' {
            (LastBracket::Open, '<')
        } else {
            (LastBracket::Close, '>')
        };
        if last == seen {
            return Err(Error::SyntaxImbalance {
                bracket,
                position: pos,
            });
        }
        last = seen;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced() {
        assert!(check_brackets(b"<a x='1'><b>hi</b></a>").is_ok());
        assert!(check_brackets(b"").is_ok());
        assert!(check_brackets(b"no markup at all").is_ok());
    }

    #[test]
    fn test_double_open() {
        let err = check_brackets(b"<a <b>").unwrap_err();
        assert!(matches!(err, Error::SyntaxImbalance { bracket: '<', position: 3 }));
    }

    #[test]
    fn test_double_close() {
        let err = check_brackets(b"<a>>").unwrap_err();
        assert!(matches!(err, Error::SyntaxImbalance { bracket: '>', position: 3 }));
    }

    #[test]
    fn test_leading_close() {
        // A lone '>' before any '<' is accepted; only repetition is rejected
        assert!(check_brackets(b"> <a/>").is_ok());
    }
}
