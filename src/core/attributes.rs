//! Attribute list extraction
//!
//! Reads `name=value` pairs from inside an opening tag until the cursor
//! reaches `>` or `/`.

use super::scanner::Scanner;
use crate::dom::{Attribute, Label, Quote};
use crate::error::{Error, Result};

/// Bytes that end an attribute name
const NAME_STOPS: &[u8] = b"= \t\r\n>/<";
/// Bytes that end an unquoted attribute value
const BARE_VALUE_STOPS: &[u8] = b" \t\r\n>/<";

/// Parse attributes starting at the scanner position
///
/// On success the cursor is left on the `>` or `/` that ends the tag,
/// and the attributes are returned in source order.
pub fn extract_attributes(scanner: &mut Scanner<'_>) -> Result<Vec<Attribute>> {
    let mut attrs = Vec::new();

    loop {
        scanner.skip_whitespace();

        match scanner.peek() {
            None => {
                return Err(Error::UnexpectedEof {
                    expected: "'>' or '/>'",
                    position: scanner.position(),
                })
            }
            Some(b'>') | Some(b'/') => break,
            Some(b'<') => return Err(Error::unexpected("<", scanner.position())),
            Some(_) => {}
        }

        let name = read_name(scanner)?;
        let (value, quote) = read_value(scanner)?;
        attrs.push(Attribute::new(name, value).with_quote(quote));
    }

    Ok(attrs)
}

fn read_name(scanner: &mut Scanner<'_>) -> Result<Label> {
    let start = scanner.position();
    let end = scanner
        .find_any_from(start, NAME_STOPS)
        .ok_or(Error::UnexpectedEof {
            expected: "'=' after attribute name",
            position: start,
        })?;
    let name = scanner.slice(start, end);
    scanner.set_position(end);
    scanner.skip_whitespace();

    let at = scanner.position();
    match scanner.peek() {
        Some(b'=') if !name.is_empty() => {
            scanner.advance(1);
            scanner.skip_whitespace();
            Ok(Label::from_bytes(name))
        }
        Some(b) => Err(Error::unexpected(
            format!("{} (expected '=' after attribute name)", b as char),
            at,
        )),
        None => Err(Error::UnexpectedEof {
            expected: "'=' after attribute name",
            position: at,
        }),
    }
}

fn read_value(scanner: &mut Scanner<'_>) -> Result<(Label, Quote)> {
    let start = scanner.position();
    let first = scanner.peek().ok_or(Error::UnexpectedEof {
        expected: "attribute value",
        position: start,
    })?;

    if let Some(quote) = Quote::from_byte(first) {
        let close = scanner
            .find_any_from(start + 1, &[first])
            .ok_or(Error::UnexpectedEof {
                expected: "closing quote",
                position: start,
            })?;
        let value = Label::from_bytes(scanner.slice(start + 1, close));
        scanner.set_position(close + 1);
        return Ok((value, quote));
    }

    let end = scanner
        .find_any_from(start, BARE_VALUE_STOPS)
        .ok_or(Error::UnexpectedEof {
            expected: "'>' or '/>'",
            position: start,
        })?;
    if end == start || scanner.slice(end, end + 1) == b"<" {
        return Err(Error::unexpected(
            String::from_utf8_lossy(scanner.slice(end, end + 1)),
            end,
        ));
    }
    let value = Label::from_bytes(scanner.slice(start, end));
    scanner.set_position(end);
    Ok((value, Quote::None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs_of(input: &[u8]) -> Result<Vec<(String, String)>> {
        let mut scanner = Scanner::new(input);
        let attrs = extract_attributes(&mut scanner)?;
        Ok(attrs
            .into_iter()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect())
    }

    #[test]
    fn test_quoted_values() {
        let attrs = attrs_of(b" name='X' type=\"Y\">").unwrap();
        assert_eq!(
            attrs,
            vec![
                ("name".to_string(), "X".to_string()),
                ("type".to_string(), "Y".to_string())
            ]
        );
    }

    #[test]
    fn test_quoted_value_may_contain_space_and_slash() {
        let attrs = attrs_of(b" uri='model://ground plane'/>").unwrap();
        assert_eq!(attrs[0].1, "model://ground plane");
    }

    #[test]
    fn test_bare_value() {
        let mut scanner = Scanner::new(b" version=1.6 >");
        let attrs = extract_attributes(&mut scanner).unwrap();
        assert_eq!(attrs[0].value(), "1.6");
        assert_eq!(attrs[0].quote(), Quote::None);
        assert_eq!(scanner.peek(), Some(b'>'));
    }

    #[test]
    fn test_stops_on_self_close() {
        let mut scanner = Scanner::new(b" a='1'/>");
        extract_attributes(&mut scanner).unwrap();
        assert!(scanner.starts_with(b"/>"));
    }

    #[test]
    fn test_no_attributes() {
        assert!(attrs_of(b">").unwrap().is_empty());
    }

    #[test]
    fn test_missing_equals() {
        let err = attrs_of(b" flag>").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { position: 5, .. }));
    }

    #[test]
    fn test_nested_open_bracket() {
        let err = attrs_of(b" <b>").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { ref token, position: 1 } if token == "<"));
    }

    #[test]
    fn test_unterminated_quote() {
        let err = attrs_of(b" a='oops>").unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof { .. }));
    }
}
