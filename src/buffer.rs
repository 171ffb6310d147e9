//! The cursor buffer every lexing pass runs on.
//!
//! [`CursorBuffer`] is a character sequence addressable from both ends. The
//! parser consumes it destructively from the front while the writers build
//! their output at the back; no pass needs indexed random access.

use std::collections::VecDeque;
use std::fmt;

use crate::{Error, Result};

/// A mutable, ends-addressable character buffer.
///
/// # Examples
///
/// ```rust
/// use easy_markup::CursorBuffer;
///
/// let mut buffer = CursorBuffer::from("  key:value;");
/// buffer.trim_start(&[' ']);
/// assert_eq!(buffer.peek_start(), Some('k'));
/// assert_eq!(buffer.pop_from_end().unwrap(), ';');
/// assert_eq!(buffer.to_string(), "key:value");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorBuffer {
    chars: VecDeque<char>,
}

impl CursorBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        CursorBuffer {
            chars: VecDeque::new(),
        }
    }

    /// Creates an empty buffer with room for `capacity` characters.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        CursorBuffer {
            chars: VecDeque::with_capacity(capacity),
        }
    }

    #[inline]
    #[must_use]
    pub fn peek_start(&self) -> Option<char> {
        self.chars.front().copied()
    }

    #[inline]
    #[must_use]
    pub fn peek_end(&self) -> Option<char> {
        self.chars.back().copied()
    }

    /// Removes and returns the first character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferUnderflow`] if the buffer is empty.
    #[inline]
    pub fn pop_from_start(&mut self) -> Result<char> {
        self.chars
            .pop_front()
            .ok_or_else(|| Error::underflow("another character"))
    }

    /// Removes and returns the last character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferUnderflow`] if the buffer is empty.
    #[inline]
    pub fn pop_from_end(&mut self) -> Result<char> {
        self.chars
            .pop_back()
            .ok_or_else(|| Error::underflow("another character"))
    }

    #[inline]
    pub fn push_to_end(&mut self, ch: char) {
        self.chars.push_back(ch);
    }

    pub fn push_str(&mut self, s: &str) {
        self.chars.extend(s.chars());
    }

    /// Appends `count` copies of `ch`.
    pub fn push_repeated(&mut self, ch: char, count: usize) {
        self.chars.extend(std::iter::repeat(ch).take(count));
    }

    /// Removes the run of leading characters contained in `set`.
    ///
    /// Returns the number of characters removed.
    pub fn trim_start(&mut self, set: &[char]) -> usize {
        let mut removed = 0;
        while self.chars.front().is_some_and(|ch| set.contains(ch)) {
            self.chars.pop_front();
            removed += 1;
        }
        removed
    }

    /// Removes the run of trailing characters contained in `set`.
    ///
    /// Returns the number of characters removed.
    pub fn trim_end(&mut self, set: &[char]) -> usize {
        let mut removed = 0;
        while self.chars.back().is_some_and(|ch| set.contains(ch)) {
            self.chars.pop_back();
            removed += 1;
        }
        removed
    }

    /// Moves the entire contents of `other` onto the end of this buffer, leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::CursorBuffer;
    ///
    /// let mut head = CursorBuffer::from("ab");
    /// let mut tail = CursorBuffer::from("cd");
    /// head.transfer_to_end(&mut tail);
    /// assert_eq!(head.to_string(), "abcd");
    /// assert!(tail.is_empty());
    /// ```
    pub fn transfer_to_end(&mut self, other: &mut CursorBuffer) {
        self.chars.append(&mut other.chars);
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl From<&str> for CursorBuffer {
    fn from(s: &str) -> Self {
        CursorBuffer {
            chars: s.chars().collect(),
        }
    }
}

impl FromIterator<char> for CursorBuffer {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        CursorBuffer {
            chars: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for CursorBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (front, back) = self.chars.as_slices();
        for ch in front.iter().chain(back) {
            fmt::Write::write_char(f, *ch)?;
        }
        Ok(())
    }
}
