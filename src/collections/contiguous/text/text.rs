use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Deref};
use std::str;

use crate::collections::contiguous::Buffer;
use crate::collections::contiguous::error::{IndexOutOfBounds, InteriorNul};

/// A growable UTF-8 string backed by a [`Buffer<u8>`].
///
/// Text grows exactly like the Buffer beneath it, one byte push at a time, so appending keeps the
/// same doubling behavior and amortized cost. The contents are always valid UTF-8 because the only
/// ways to add bytes take a [`str`] or a [`char`].
#[derive(Clone, Default)]
pub struct Text {
    pub(crate) buf: Buffer<u8>,
}

impl Text {
    /// Creates an empty Text without allocating.
    pub const fn new() -> Text {
        Text {
            buf: Buffer::new(),
        }
    }

    /// Creates an empty Text with room for exactly `cap` bytes.
    ///
    /// # Panics
    /// Panics if `cap` exceeds [`isize::MAX`].
    pub fn with_cap(cap: usize) -> Text {
        Text {
            buf: Buffer::with_cap(cap),
        }
    }

    /// Returns the length of the Text in bytes.
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the Text contains no bytes.
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the capacity of the underlying Buffer in bytes.
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Returns the contents as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: Bytes only ever enter the Buffer from a str or char, and are only removed a whole
        // char at a time, so the contents are always valid UTF-8.
        unsafe { str::from_utf8_unchecked(&self.buf) }
    }

    /// Returns the contents as raw UTF-8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Appends a single char to the end of the Text.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Text;
    /// let mut text = Text::from("caf");
    /// text.push('é');
    /// assert_eq!(text, "café");
    /// assert_eq!(text.len(), 5);
    /// ```
    pub fn push(&mut self, value: char) {
        let mut encoded = [0_u8; 4];
        self.push_str(value.encode_utf8(&mut encoded));
    }

    /// Appends a string slice to the end of the Text.
    pub fn push_str(&mut self, value: &str) {
        self.buf.extend(value.as_bytes());
    }

    /// Removes the last char from the Text and returns it.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Text;
    /// let mut text = Text::from("hé");
    /// assert_eq!(text.pop(), Some('é'));
    /// assert_eq!(text.pop(), Some('h'));
    /// assert_eq!(text.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<char> {
        let last = self.as_str().chars().next_back()?;

        for _ in 0..last.len_utf8() {
            self.buf.pop();
        }

        Some(last)
    }

    /// Shortens the Text to `new_len` bytes, keeping the capacity. Does nothing if `new_len` is not
    /// less than the current length.
    ///
    /// # Panics
    /// Panics if `new_len` doesn't lie on a char boundary.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Text;
    /// let mut text = Text::from("héllo");
    /// text.truncate(3);
    /// assert_eq!(text, "hé");
    /// ```
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }

        assert!(
            self.is_char_boundary(new_len),
            "Byte {new_len} is not a char boundary!"
        );
        self.buf.truncate(new_len);
    }

    /// Returns the byte offset of the first occurrence of `needle` that starts at or after byte
    /// `pos`, or [`None`] if there isn't one (including when `pos` is past the end).
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Text;
    /// let text = Text::from("abcabc");
    /// assert_eq!(text.find_from("bc", 0), Some(1));
    /// assert_eq!(text.find_from("bc", 2), Some(4));
    /// assert_eq!(text.find_from("bc", 5), None);
    /// ```
    pub fn find_from(&self, needle: &str, pos: usize) -> Option<usize> {
        let haystack = self.as_bytes().get(pos..)?;

        if needle.is_empty() {
            return Some(pos);
        }

        // Matches of a whole UTF-8 needle can only start on char boundaries.
        haystack
            .windows(needle.len())
            .position(|window| window == needle.as_bytes())
            .map(|offset| pos + offset)
    }

    /// Returns the first char of the Text.
    pub fn front(&self) -> Option<char> {
        self.as_str().chars().next()
    }

    /// Empties the Text and releases its storage.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Returns the byte at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` isn't less than the byte length.
    pub fn byte_at(&self, index: usize) -> Result<u8, IndexOutOfBounds> {
        self.buf.at(index).copied()
    }

    /// Produces a copy of the Text's bytes followed by a single nul terminator, suitable for
    /// handing to C-style string consumers.
    ///
    /// # Errors
    /// Returns [`InteriorNul`] if the Text itself contains a nul byte, because the result would be
    /// cut short by any consumer looking for the terminator.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Text;
    /// let text = Text::from("hi");
    /// assert_eq!(text.to_nul_terminated().unwrap(), [b'h', b'i', 0]);
    /// assert!(Text::from("a\0b").to_nul_terminated().is_err());
    /// ```
    pub fn to_nul_terminated(&self) -> Result<Buffer<u8>, InteriorNul> {
        if let Some(position) = self.buf.iter().position(|byte| *byte == 0) {
            return Err(InteriorNul { position });
        }

        let mut terminated = Buffer::with_cap(self.len() + 1);
        terminated.extend(self.as_bytes());
        terminated.push(0);
        Ok(terminated)
    }

    /// Consumes the Text, returning the underlying bytes.
    pub fn into_bytes(self) -> Buffer<u8> {
        self.buf
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text {
            buf: Buffer::from(value.as_bytes()),
        }
    }
}

impl From<char> for Text {
    fn from(value: char) -> Self {
        let mut text = Text::new();
        text.push(value);
        text
    }
}

impl FromIterator<char> for Text {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut text = Text::new();
        text.extend(iter);
        text
    }
}

impl Extend<char> for Text {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for c in iter {
            self.push(c);
        }
    }
}

impl<'a> Extend<&'a str> for Text {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for s in iter {
            self.push_str(s);
        }
    }
}

impl Add<&str> for Text {
    type Output = Text;

    fn add(mut self, rhs: &str) -> Self::Output {
        self.push_str(rhs);
        self
    }
}

impl AddAssign<&str> for Text {
    fn add_assign(&mut self, rhs: &str) {
        self.push_str(rhs);
    }
}

impl Add<&Text> for Text {
    type Output = Text;

    fn add(self, rhs: &Text) -> Self::Output {
        self + rhs.as_str()
    }
}

impl AddAssign<&Text> for Text {
    fn add_assign(&mut self, rhs: &Text) {
        self.push_str(rhs);
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<[u8]> for Text {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Borrow<str> for Text {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must match str so that Borrow<str> lookups work.
        self.as_str().hash(state);
    }
}

impl Debug for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.as_str(), f)
    }
}
