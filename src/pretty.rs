//! Pretty-printing.
//!
//! The pretty printer re-lexes EasyMarkup text (compact or already indented)
//! and lays it out one property per line:
//!
//! ```text
//! Recipe:
//! (
//!     ItemID: Glass;
//!     LinkedItemIDs:
//!     (
//!         Quartz,
//!         Sand
//!     );
//! );
//! ```
//!
//! Whitespace outside literal strings is dropped and rebuilt; literals,
//! escapes and comments are copied verbatim. The output parses to the same
//! tree as the input and printing it again changes nothing.

use crate::grammar::{
    BEGIN_COMPLEX_VALUE, COMMENT_BLOCK, ESCAPE_CHAR, FINISH_COMPLEX_VALUE, KEY_DELIMITER,
    LIST_ITEM_SPLITTER, LITERAL_STRING_BLOCK, VALUE_DELIMITER, WHITESPACE,
};
use crate::{CursorBuffer, MarkupOptions, Property};

const INDENT_CHAR: char = ' ';

struct PrettyPrinter<'a> {
    input: CursorBuffer,
    output: CursorBuffer,
    options: &'a MarkupOptions,
    level: usize,
    at_line_start: bool,
}

impl<'a> PrettyPrinter<'a> {
    fn new(raw: &str, options: &'a MarkupOptions) -> Self {
        PrettyPrinter {
            input: CursorBuffer::from(raw),
            output: CursorBuffer::with_capacity(raw.len() * 2),
            options,
            level: 0,
            at_line_start: true,
        }
    }

    fn push(&mut self, ch: char) {
        self.output.push_to_end(ch);
        self.at_line_start = false;
    }

    /// Breaks the line. Only indentation pushed by [`indent`](Self::indent) is
    /// ever trimmed; a trailing space may be an escaped one.
    fn newline(&mut self) {
        if self.at_line_start {
            self.output.trim_end(&[INDENT_CHAR]);
        }
        self.output.push_str(self.options.line_ending.as_str());
        self.indent();
    }

    fn indent(&mut self) {
        self.output
            .push_repeated(INDENT_CHAR, self.options.indent * self.level);
        self.at_line_start = true;
    }

    /// Copies a `"..."` literal or `#...#` comment whose opening char was just pushed.
    fn copy_block(&mut self, close: char, escapes: bool) {
        while let Ok(ch) = self.input.pop_from_start() {
            self.push(ch);
            if escapes && ch == ESCAPE_CHAR {
                if let Ok(escaped) = self.input.pop_from_start() {
                    self.push(escaped);
                }
            } else if ch == close {
                return;
            }
        }
    }

    fn run(mut self) -> String {
        while let Ok(ch) = self.input.pop_from_start() {
            match ch {
                ' ' | '\t' | '\r' | '\n' => {}
                BEGIN_COMPLEX_VALUE => {
                    if !self.at_line_start {
                        self.newline();
                    }
                    self.push(ch);
                    self.level += 1;
                    self.newline();
                }
                FINISH_COMPLEX_VALUE => {
                    self.level = self.level.saturating_sub(1);
                    if self.at_line_start {
                        self.output.trim_end(&[INDENT_CHAR]);
                        self.indent();
                    } else {
                        self.newline();
                    }
                    self.push(ch);
                }
                VALUE_DELIMITER => {
                    self.push(ch);
                    self.input.trim_start(&WHITESPACE);
                    match self.input.peek_start() {
                        Some(LIST_ITEM_SPLITTER) | None => {}
                        Some(_) => self.newline(),
                    }
                }
                LIST_ITEM_SPLITTER => {
                    self.push(ch);
                    self.newline();
                }
                KEY_DELIMITER => {
                    self.push(ch);
                    self.input.trim_start(&WHITESPACE);
                    match self.input.peek_start() {
                        Some(
                            BEGIN_COMPLEX_VALUE
                            | FINISH_COMPLEX_VALUE
                            | VALUE_DELIMITER
                            | LIST_ITEM_SPLITTER,
                        )
                        | None => {}
                        Some(_) => self.push(' '),
                    }
                }
                COMMENT_BLOCK => {
                    self.push(ch);
                    self.copy_block(COMMENT_BLOCK, false);
                    self.newline();
                }
                LITERAL_STRING_BLOCK => {
                    self.push(ch);
                    self.copy_block(LITERAL_STRING_BLOCK, true);
                }
                ESCAPE_CHAR => {
                    self.push(ch);
                    if let Ok(escaped) = self.input.pop_from_start() {
                        self.push(escaped);
                    }
                }
                _ => self.push(ch),
            }
        }

        if self.at_line_start {
            self.output.trim_end(&WHITESPACE);
        }
        self.output.to_string()
    }
}

/// Lays out EasyMarkup text with the default options.
///
/// # Examples
///
/// ```rust
/// use easy_markup::pretty_print;
///
/// let pretty = pretty_print("Recipe:(ItemID:Glass;Tags:(a,b););");
/// assert_eq!(
///     pretty,
///     "Recipe:\n(\n    ItemID: Glass;\n    Tags:\n    (\n        a,\n        b\n    );\n);"
/// );
/// ```
#[must_use]
pub fn pretty_print(raw: &str) -> String {
    pretty_print_with_options(raw, &MarkupOptions::default())
}

/// Lays out EasyMarkup text using the indent width and line ending from `options`.
///
/// Unterminated literals and comments are copied as they are; the printer
/// never fails, and text that did not parse before will not parse after.
#[must_use]
pub fn pretty_print_with_options(raw: &str, options: &MarkupOptions) -> String {
    PrettyPrinter::new(raw, options).run()
}

impl Property {
    /// Returns the pretty-printed form of this property.
    #[must_use]
    pub fn pretty_print(&self) -> String {
        pretty_print(&self.to_string())
    }

    #[must_use]
    pub fn pretty_print_with_options(&self, options: &MarkupOptions) -> String {
        pretty_print_with_options(&self.to_string(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LineEnding;

    const NESTED: &str = "R:(A:1;B:(C:2;);L:(x,y););";

    #[test]
    fn test_nested_layout() {
        let expected = "\
R:
(
    A: 1;
    B:
    (
        C: 2;
    );
    L:
    (
        x,
        y
    );
);";
        assert_eq!(pretty_print(NESTED), expected);
    }

    #[test]
    fn test_collection_items_keep_separator_on_closing_line() {
        let pretty = pretty_print("L:(C:(A:1;);,C:(A:2;););");
        assert!(pretty.contains("    );,\n    C:\n"), "{pretty}");
    }

    #[test]
    fn test_idempotent() {
        let once = pretty_print(NESTED);
        assert_eq!(pretty_print(&once), once);

        let commented = "#head# R : ( A:\"x  y\" ; #note# B:\\(z; ) ;";
        let once = pretty_print(commented);
        assert_eq!(pretty_print(&once), once);
    }

    #[test]
    fn test_literals_and_comments_are_verbatim() {
        let pretty = pretty_print("A:(B:\"two  (words);\";#keep  this#C:x\\;y;);");
        assert!(pretty.contains("B: \"two  (words);\";"), "{pretty}");
        assert!(pretty.contains("#keep  this#\n"), "{pretty}");
        assert!(pretty.contains("C: x\\;y;"), "{pretty}");
    }

    #[test]
    fn test_escaped_spaces_survive_line_breaks() {
        let tags = Property::scalar_list("L", crate::ScalarKind::Text);
        for (raw, pretty) in [
            ("L:(a,b\\ );", "L:\n(\n    a,\n    b\\ \n);"),
            ("L:(a\\ ,b);", "L:\n(\n    a\\ ,\n    b\n);"),
        ] {
            assert_eq!(pretty_print(raw), pretty);
            assert_eq!(pretty_print(pretty), pretty);
            assert_eq!(
                crate::from_str(&tags, pretty).unwrap(),
                crate::from_str(&tags, raw).unwrap()
            );
        }
        let values = crate::from_str(&tags, &pretty_print("L:(a,b\\ );")).unwrap();
        assert_eq!(
            values.as_list().unwrap().values::<String>(),
            vec!["a".to_string(), "b ".to_string()]
        );
    }

    #[test]
    fn test_escaped_space_before_closing_composite() {
        let pretty = pretty_print("R:(A:x\\ ;B:(C:y\\ ;););");
        assert!(pretty.contains("A: x\\ ;"), "{pretty}");
        assert!(pretty.contains("C: y\\ ;"), "{pretty}");
        assert_eq!(pretty_print(&pretty), pretty);
    }

    #[test]
    fn test_options_change_layout() {
        let options = MarkupOptions::new()
            .with_indent(2)
            .with_line_ending(LineEnding::CrLf);
        assert_eq!(
            pretty_print_with_options("R:(A:1;);", &options),
            "R:\r\n(\r\n  A: 1;\r\n);"
        );
    }

    #[test]
    fn test_unbalanced_input_does_not_panic() {
        assert_eq!(pretty_print("))"), ")\n)");
        assert_eq!(pretty_print("A:\"open"), "A: \"open");
        assert_eq!(pretty_print(""), "");
    }
}
