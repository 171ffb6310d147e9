//! EasyMarkup lexical rules.
//!
//! # Overview
//!
//! An EasyMarkup document is a sequence of `key:value;` properties. A value
//! is a scalar, a parenthesized composite of further properties, or a
//! parenthesized, comma-separated list.
//!
//! ```text
//! CustomRecipe:
//! (
//!     ItemID: Titanium;          # a scalar #
//!     Ingredients:
//!     (
//!         Ingredient:
//!         (
//!             ItemID: Copper;
//!             Required: 2;
//!         );
//!     );
//!     LinkedItemIDs:
//!     (
//!         Glass,
//!         Quartz
//!     );
//! );
//! ```
//!
//! ## Reserved characters
//!
//! | Char | Meaning |
//! |------|---------|
//! | `:`  | separates a key from its value |
//! | `;`  | terminates a value |
//! | `(` `)` | open and close a composite or list |
//! | `,`  | separates list items |
//! | `#`  | opens and closes a comment |
//! | `"`  | opens and closes a literal string |
//! | `\`  | escapes the next character |
//!
//! ## Whitespace and comments
//!
//! Spaces, tabs and line breaks outside literal strings are insignificant
//! and removed before anything else is read, as are `#...#` comment blocks.
//!
//! ## Scalars
//!
//! A scalar is either escaped text (`Gold\:Ore`) or a literal string that
//! starts the value (`"Gold: Ore"`). Inside a literal only `"` and `\` need
//! escaping. A quote anywhere other than the start of a value is a syntax
//! error.
//!
//! When writing, a value containing whitespace is wrapped in quotes;
//! otherwise every reserved character is prefixed with `\`.

use std::borrow::Cow;

use crate::{CursorBuffer, Error, Result};

pub const KEY_DELIMITER: char = ':';
pub const VALUE_DELIMITER: char = ';';
pub const BEGIN_COMPLEX_VALUE: char = '(';
pub const FINISH_COMPLEX_VALUE: char = ')';
pub const LIST_ITEM_SPLITTER: char = ',';
pub const COMMENT_BLOCK: char = '#';
pub const LITERAL_STRING_BLOCK: char = '"';
pub const ESCAPE_CHAR: char = '\\';

/// Insignificant whitespace outside literal strings.
pub const WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

/// Characters that carry structure once comments are gone.
const STRUCTURAL: [char; 5] = [
    KEY_DELIMITER,
    VALUE_DELIMITER,
    BEGIN_COMPLEX_VALUE,
    FINISH_COMPLEX_VALUE,
    LIST_ITEM_SPLITTER,
];

#[inline]
fn is_reserved(ch: char) -> bool {
    STRUCTURAL.contains(&ch)
        || ch == COMMENT_BLOCK
        || ch == LITERAL_STRING_BLOCK
        || ch == ESCAPE_CHAR
}

/// Strips whitespace and comments from `raw`, draining it into a new buffer.
///
/// Literal strings and escaped characters are copied verbatim. With
/// `stop_at_key`, cleaning stops at the first unescaped `:` and only the key
/// part is returned.
///
/// # Errors
///
/// Returns [`Error::BufferUnderflow`] for an unterminated comment, literal
/// string or trailing escape.
pub fn clean_value(raw: &mut CursorBuffer, stop_at_key: bool) -> Result<CursorBuffer> {
    let mut clean = CursorBuffer::with_capacity(raw.len());

    while let Some(ch) = raw.peek_start() {
        match ch {
            ' ' | '\t' | '\r' | '\n' => {
                raw.trim_start(&WHITESPACE);
            }
            COMMENT_BLOCK => {
                raw.pop_from_start()?;
                loop {
                    let popped = raw
                        .pop_from_start()
                        .map_err(|_| Error::underflow("closing '#' of comment"))?;
                    if popped == COMMENT_BLOCK {
                        break;
                    }
                }
            }
            KEY_DELIMITER if stop_at_key => return Ok(clean),
            LITERAL_STRING_BLOCK => {
                clean.push_to_end(raw.pop_from_start()?);
                loop {
                    let popped = raw
                        .pop_from_start()
                        .map_err(|_| Error::underflow("closing '\"' of literal string"))?;
                    clean.push_to_end(popped);
                    if popped == ESCAPE_CHAR {
                        clean.push_to_end(
                            raw.pop_from_start()
                                .map_err(|_| Error::underflow("escaped character"))?,
                        );
                    } else if popped == LITERAL_STRING_BLOCK {
                        break;
                    }
                }
            }
            ESCAPE_CHAR => {
                clean.push_to_end(raw.pop_from_start()?);
                clean.push_to_end(
                    raw.pop_from_start()
                        .map_err(|_| Error::underflow("escaped character"))?,
                );
            }
            _ => clean.push_to_end(raw.pop_from_start()?),
        }
    }

    Ok(clean)
}

fn describe(delimiters: &[char]) -> String {
    delimiters
        .iter()
        .map(|d| format!("'{d}'"))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Reads from a cleaned buffer until one of `delimiters`, consuming the delimiter.
///
/// Escapes are resolved and a leading literal string is unwrapped. Returns
/// the collected text and the delimiter that ended it.
///
/// # Errors
///
/// - [`Error::BufferUnderflow`] if the buffer runs out before a delimiter
/// - [`Error::Syntax`] for a quote that does not start the value, text after a
///   closing quote, or an unescaped structural character that is not one of
///   `delimiters`
pub fn read_until_delimiter(
    buffer: &mut CursorBuffer,
    delimiters: &[char],
) -> Result<(String, char)> {
    let mut value = String::new();

    if buffer.peek_start() == Some(LITERAL_STRING_BLOCK) {
        buffer.pop_from_start()?;
        loop {
            match buffer
                .pop_from_start()
                .map_err(|_| Error::underflow("closing '\"' of literal string"))?
            {
                ESCAPE_CHAR => value.push(
                    buffer
                        .pop_from_start()
                        .map_err(|_| Error::underflow("escaped character"))?,
                ),
                LITERAL_STRING_BLOCK => break,
                ch => value.push(ch),
            }
        }

        let next = buffer
            .pop_from_start()
            .map_err(|_| Error::underflow(&describe(delimiters)))?;
        if delimiters.contains(&next) {
            return Ok((value, next));
        }
        return Err(Error::syntax(format!(
            "unexpected `{next}` after literal string \"{value}\""
        )));
    }

    loop {
        let ch = buffer
            .pop_from_start()
            .map_err(|_| Error::underflow(&describe(delimiters)))?;
        match ch {
            ESCAPE_CHAR => value.push(
                buffer
                    .pop_from_start()
                    .map_err(|_| Error::underflow("escaped character"))?,
            ),
            LITERAL_STRING_BLOCK => {
                return Err(Error::syntax(format!(
                    "literal string must start the value, found quote after `{value}`"
                )))
            }
            ch if delimiters.contains(&ch) => return Ok((value, ch)),
            ch if STRUCTURAL.contains(&ch) => {
                return Err(Error::syntax(format!(
                    "unexpected `{ch}` after `{value}`, expected {}",
                    describe(delimiters)
                )))
            }
            ch => value.push(ch),
        }
    }
}

/// Reads a key and its `:` from a cleaned buffer.
///
/// # Errors
///
/// Fails like [`read_until_delimiter`] when no `:` follows the key.
pub fn read_key(buffer: &mut CursorBuffer) -> Result<String> {
    read_until_delimiter(buffer, &[KEY_DELIMITER]).map(|(key, _)| key)
}

/// Pops the next character of a cleaned buffer and checks that it is `expected`.
///
/// # Errors
///
/// [`Error::BufferUnderflow`] on an empty buffer, [`Error::Syntax`] on any other character.
pub fn expect(buffer: &mut CursorBuffer, expected: char) -> Result<()> {
    match buffer.pop_from_start() {
        Ok(ch) if ch == expected => Ok(()),
        Ok(ch) => Err(Error::syntax(format!("expected '{expected}', found `{ch}`"))),
        Err(_) => Err(Error::underflow(&format!("'{expected}'"))),
    }
}

/// Detects the key of the first property in `raw` without parsing its value.
///
/// Returns `Ok(None)` when the text holds no key.
///
/// # Examples
///
/// ```rust
/// use easy_markup::check_key;
///
/// let key = check_key("# recipes # CustomRecipe: (ItemID: Glass;);").unwrap();
/// assert_eq!(key.as_deref(), Some("CustomRecipe"));
/// assert_eq!(check_key("  # nothing here #").unwrap(), None);
/// ```
///
/// # Errors
///
/// Returns an error for an unterminated comment or literal string.
pub fn check_key(raw: &str) -> Result<Option<String>> {
    let mut clean = clean_value(&mut CursorBuffer::from(raw), true)?;
    if clean.is_empty() {
        return Ok(None);
    }
    clean.push_to_end(KEY_DELIMITER);
    let key = read_key(&mut clean)?;
    Ok(Some(key).filter(|k| !k.is_empty()))
}

/// Escapes a key or scalar value for output.
///
/// # Examples
///
/// ```rust
/// use easy_markup::escape_special_characters;
///
/// assert_eq!(escape_special_characters("Titanium"), "Titanium");
/// assert_eq!(escape_special_characters("a:b;c"), "a\\:b\\;c");
/// assert_eq!(escape_special_characters("two words"), "\"two words\"");
/// ```
#[must_use]
pub fn escape_special_characters(unescaped: &str) -> Cow<'_, str> {
    if !unescaped
        .chars()
        .any(|ch| is_reserved(ch) || WHITESPACE.contains(&ch))
    {
        return Cow::Borrowed(unescaped);
    }

    let mut original = CursorBuffer::from(unescaped);
    let mut escaped = CursorBuffer::with_capacity(original.len() + 8);

    if WHITESPACE.iter().any(|ch| original.contains(*ch)) {
        escaped.push_to_end(LITERAL_STRING_BLOCK);
        if original.contains(LITERAL_STRING_BLOCK) || original.contains(ESCAPE_CHAR) {
            while let Ok(ch) = original.pop_from_start() {
                if ch == LITERAL_STRING_BLOCK || ch == ESCAPE_CHAR {
                    escaped.push_to_end(ESCAPE_CHAR);
                }
                escaped.push_to_end(ch);
            }
        } else {
            escaped.transfer_to_end(&mut original);
        }
        escaped.push_to_end(LITERAL_STRING_BLOCK);
    } else {
        while let Ok(ch) = original.pop_from_start() {
            if is_reserved(ch) {
                escaped.push_to_end(ESCAPE_CHAR);
            }
            escaped.push_to_end(ch);
        }
    }

    Cow::Owned(escaped.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(raw: &str) -> String {
        clean_value(&mut CursorBuffer::from(raw), false)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_clean_strips_whitespace_and_comments() {
        assert_eq!(clean(" Key :\r\n\t Value ; "), "Key:Value;");
        assert_eq!(clean("#lead#A:1;# between #B:2;"), "A:1;B:2;");
    }

    #[test]
    fn test_clean_keeps_literals_and_escapes() {
        assert_eq!(clean("A: \"two  words #x#\" ;"), "A:\"two  words #x#\";");
        assert_eq!(clean("A: \\# not a comment ;"), "A:\\#notacomment;");
        assert_eq!(clean("A:\"say \\\"hi\\\"\";"), "A:\"say \\\"hi\\\"\";");
    }

    #[test]
    fn test_clean_unterminated_regions_underflow() {
        for raw in ["A:1; # open", "A:\"open;", "A:\\"] {
            let result = clean_value(&mut CursorBuffer::from(raw), false);
            assert!(
                matches!(result, Err(Error::BufferUnderflow { .. })),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_clean_stop_at_key() {
        let key = clean_value(&mut CursorBuffer::from(" Ke\\:y : 1;"), true).unwrap();
        assert_eq!(key.to_string(), "Ke\\:y");
    }

    #[test]
    fn test_read_until_consumes_delimiter() {
        let mut buffer = CursorBuffer::from("a\\;b;rest");
        let (value, delimiter) = read_until_delimiter(&mut buffer, &[VALUE_DELIMITER]).unwrap();
        assert_eq!(value, "a;b");
        assert_eq!(delimiter, ';');
        assert_eq!(buffer.to_string(), "rest");
    }

    #[test]
    fn test_read_until_reports_which_delimiter() {
        let mut buffer = CursorBuffer::from("x,y)");
        let delimiters = [LIST_ITEM_SPLITTER, FINISH_COMPLEX_VALUE];
        assert_eq!(
            read_until_delimiter(&mut buffer, &delimiters).unwrap(),
            ("x".to_string(), ',')
        );
        assert_eq!(
            read_until_delimiter(&mut buffer, &delimiters).unwrap(),
            ("y".to_string(), ')')
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_read_literal_only_at_value_start() {
        let mut buffer = CursorBuffer::from("\"a; b\";");
        assert_eq!(
            read_until_delimiter(&mut buffer, &[VALUE_DELIMITER]).unwrap().0,
            "a; b"
        );

        let mut buffer = CursorBuffer::from("ab\"c\";");
        assert!(matches!(
            read_until_delimiter(&mut buffer, &[VALUE_DELIMITER]),
            Err(Error::Syntax { .. })
        ));

        let mut buffer = CursorBuffer::from("\"ab\"c;");
        assert!(matches!(
            read_until_delimiter(&mut buffer, &[VALUE_DELIMITER]),
            Err(Error::Syntax { .. })
        ));
    }

    #[test]
    fn test_read_rejects_unescaped_structure() {
        let mut buffer = CursorBuffer::from("1B:2;");
        assert!(matches!(
            read_until_delimiter(&mut buffer, &[VALUE_DELIMITER]),
            Err(Error::Syntax { .. })
        ));
    }

    #[test]
    fn test_read_missing_delimiter_underflows() {
        let mut buffer = CursorBuffer::from("value");
        assert!(matches!(
            read_until_delimiter(&mut buffer, &[VALUE_DELIMITER]),
            Err(Error::BufferUnderflow { .. })
        ));
    }

    #[test]
    fn test_escape_prefers_quotes_for_whitespace() {
        assert_eq!(escape_special_characters(""), "");
        assert_eq!(escape_special_characters("(x),#y#"), "\\(x\\)\\,\\#y\\#");
        assert_eq!(escape_special_characters("a b:c"), "\"a b:c\"");
        assert_eq!(
            escape_special_characters("say \"hi\""),
            "\"say \\\"hi\\\"\""
        );
        assert_eq!(escape_special_characters("q\"uote"), "q\\\"uote");
    }

    #[test]
    fn test_check_key_ignores_value() {
        assert_eq!(check_key("Recipe:(A:1;);").unwrap().as_deref(), Some("Recipe"));
        assert_eq!(check_key("").unwrap(), None);
    }
}
