//! `StringBuilder`: A growable character buffer with a cached string view.
//!
//! Every mutating call reserves capacity first, then edits the buffer,
//! then drops the cached string. Reads render the cache lazily.

use super::numeric::{self, DecimalInt};
use super::search::{self, Case};
use super::storage::{CharBuffer, DEFAULT_CAPACITY};
use crate::error::{BuilderError, Result};
use std::cell::OnceCell;
use std::fmt;
use std::io;
use std::ops::{Index, IndexMut};
use unicode_width::UnicodeWidthChar;

/// Bytes encoded per `write_all` call in [`StringBuilder::write_to`].
const WRITE_CHUNK: usize = 256;

/// Configuration for a [`StringBuilder`].
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Characters the buffer can hold before its first reallocation.
    pub initial_capacity: usize,
    /// Characters reserved up front for the scratch workspace used by
    /// length-growing replacements. Zero allocates it on first use.
    pub scratch_capacity: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            scratch_capacity: 0,
        }
    }
}

/// A mutable, growable string builder that minimises allocations.
///
/// Content is stored as `char`s in a single buffer that only grows. The
/// rendered [`String`] is cached until the next mutation, so repeated
/// reads of an unchanged builder are free.
///
/// All indices and lengths count `char`s, not bytes.
///
/// # Example
///
/// ```
/// use strand::StringBuilder;
///
/// let mut sb = StringBuilder::new();
/// sb.append("fps: ").append_f32(59.5).append_char(' ').append_int(-3);
/// assert_eq!(sb.as_str(), "fps: 59.5 -3");
/// ```
pub struct StringBuilder {
    /// Character storage.
    buffer: CharBuffer,
    /// Rendered view of the logical content, empty once invalidated.
    cache: OnceCell<String>,
    /// Workspace for replacements that lengthen the content. Cleared
    /// before every use.
    scratch: Vec<char>,
}

impl StringBuilder {
    /// Create a builder with the default capacity of 64 characters.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a builder that can hold `capacity` characters before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(BuilderConfig {
            initial_capacity: capacity,
            ..BuilderConfig::default()
        })
    }

    /// Create a builder from a full configuration.
    pub fn with_config(config: BuilderConfig) -> Self {
        if config.scratch_capacity > 0 {
            log::debug!(
                "builder created with {} chars and a {} char scratch workspace",
                config.initial_capacity,
                config.scratch_capacity
            );
        }
        Self {
            buffer: CharBuffer::with_capacity(config.initial_capacity),
            cache: OnceCell::new(),
            scratch: Vec::with_capacity(config.scratch_capacity),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Number of characters in the builder.
    #[inline]
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Number of characters the builder can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Check if the builder holds no characters.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// The content as a slice of characters.
    #[inline]
    pub fn as_chars(&self) -> &[char] {
        self.buffer.as_slice()
    }

    /// The content as a string.
    ///
    /// The first call after a mutation renders and caches the string;
    /// later calls return the cached value until the next mutation.
    pub fn as_str(&self) -> &str {
        self.cache
            .get_or_init(|| self.buffer.as_slice().iter().collect())
    }

    /// Check if a rendered string is currently cached.
    #[inline]
    pub fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Iterate over the characters.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, char>> {
        self.buffer.as_slice().iter().copied()
    }

    /// Terminal column width of the content.
    ///
    /// Control characters count as zero columns, wide (CJK) characters
    /// as two.
    pub fn display_width(&self) -> usize {
        self.buffer
            .as_slice()
            .iter()
            .map(|&c| c.width().unwrap_or(0))
            .sum()
    }

    /// Get the character at `index`.
    pub fn char_at(&self, index: usize) -> Result<char> {
        self.buffer
            .as_slice()
            .get(index)
            .copied()
            .ok_or(BuilderError::OutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Overwrite the character at `index`.
    pub fn set_char(&mut self, index: usize, c: char) -> Result<&mut Self> {
        let len = self.len();
        let slot = self
            .buffer
            .as_mut_slice()
            .get_mut(index)
            .ok_or(BuilderError::OutOfRange { index, len })?;
        *slot = c;
        self.invalidate();
        Ok(self)
    }

    /// Copy the content into `dest` starting at `offset`.
    pub fn copy_to(&self, dest: &mut [char], offset: usize) -> Result<()> {
        let len = self.len();
        let dest_len = dest.len();
        let target = offset
            .checked_add(len)
            .and_then(|end| dest.get_mut(offset..end))
            .ok_or(BuilderError::RangeOutOfBounds {
                start: offset,
                count: len,
                len: dest_len,
            })?;
        target.copy_from_slice(self.buffer.as_slice());
        Ok(())
    }

    /// Write the content to `writer` as UTF-8 and flush it.
    ///
    /// Uses the cached string when present. Otherwise characters are
    /// encoded through a small stack buffer, so no heap allocation
    /// happens either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        if let Some(text) = self.cache.get() {
            writer.write_all(text.as_bytes())?;
            return writer.flush();
        }

        let mut chunk = [0u8; WRITE_CHUNK];
        let mut filled = 0;
        for &c in self.buffer.as_slice() {
            if filled + c.len_utf8() > WRITE_CHUNK {
                writer.write_all(&chunk[..filled])?;
                filled = 0;
            }
            filled += c.encode_utf8(&mut chunk[filled..]).len();
        }
        writer.write_all(&chunk[..filled])?;
        writer.flush()
    }

    // ------------------------------------------------------------------
    // Appends
    // ------------------------------------------------------------------

    /// Drop the content, keeping the allocated capacity.
    pub fn clear(&mut self) -> &mut Self {
        self.buffer.clear();
        self.invalidate();
        self
    }

    /// Append a string. Appending `""` does nothing.
    pub fn append(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        let count = text.chars().count();
        self.buffer.ensure_capacity(count);
        self.buffer.push_chars(text.chars());
        self.invalidate();
        self
    }

    /// Append `count` characters of `text` starting at character `start`.
    ///
    /// With `count` of `None` everything from `start` to the end of
    /// `text` is appended. The range must lie within `text`.
    pub fn append_range(&mut self, text: &str, start: usize, count: Option<usize>) -> Result<&mut Self> {
        let total = text.chars().count();
        let count = count.unwrap_or_else(|| total.saturating_sub(start));
        match start.checked_add(count) {
            Some(end) if end <= total => {}
            _ => {
                return Err(BuilderError::RangeOutOfBounds {
                    start,
                    count,
                    len: total,
                })
            }
        }
        if count == 0 {
            return Ok(self);
        }

        self.buffer.ensure_capacity(count);
        self.buffer.push_chars(text.chars().skip(start).take(count));
        self.invalidate();
        Ok(self)
    }

    /// Append a single character.
    pub fn append_char(&mut self, c: char) -> &mut Self {
        self.buffer.ensure_capacity(1);
        self.buffer.push(c);
        self.invalidate();
        self
    }

    /// Append `count` copies of `c`.
    pub fn append_repeated(&mut self, c: char, count: usize) -> &mut Self {
        if count == 0 {
            return self;
        }
        self.buffer.ensure_capacity(count);
        self.buffer.push_repeated(c, count);
        self.invalidate();
        self
    }

    /// Append the content of another builder.
    ///
    /// Characters are copied; the two builders never share storage.
    pub fn append_builder(&mut self, other: &Self) -> &mut Self {
        if other.is_empty() {
            return self;
        }
        self.buffer.ensure_capacity(other.len());
        self.buffer.push_slice(other.as_chars());
        self.invalidate();
        self
    }

    /// Append any value through its [`fmt::Display`] implementation.
    ///
    /// The value is formatted straight into the buffer. If its `Display`
    /// implementation fails, the content is rolled back to what it was
    /// before the call.
    pub fn append_display<T: fmt::Display + ?Sized>(&mut self, value: &T) -> &mut Self {
        let len = self.len();
        if fmt::Write::write_fmt(self, format_args!("{value}")).is_err() {
            log::debug!("display formatting failed, dropping {} chars", self.len() - len);
            self.buffer.truncate(len);
            self.invalidate();
        }
        self
    }

    /// Append an integer in base 10 without allocating.
    pub fn append_int<T: DecimalInt>(&mut self, value: T) -> &mut Self {
        let (negative, magnitude) = value.into_parts();
        numeric::write_integer(&mut self.buffer, negative, magnitude);
        self.invalidate();
        self
    }

    /// Append an `f32` with 7 significant digits without allocating.
    pub fn append_f32(&mut self, value: f32) -> &mut Self {
        self.append_f64(f64::from(value))
    }

    /// Append an `f64` with 7 significant digits without allocating.
    ///
    /// `NaN` and the infinities render as `NaN`, `Infinity` and
    /// `-Infinity`.
    pub fn append_f64(&mut self, value: f64) -> &mut Self {
        numeric::write_float(&mut self.buffer, value);
        self.invalidate();
        self
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    /// Insert `text` so that it starts at `index`.
    ///
    /// `index` may equal the length, which appends.
    pub fn insert(&mut self, index: usize, text: &str) -> Result<&mut Self> {
        self.check_insert_index(index)?;
        let count = text.chars().count();
        if count == 0 {
            return Ok(self);
        }

        self.buffer.ensure_capacity(count);
        let gap = self.buffer.open_gap(index, count);
        for (slot, c) in gap.iter_mut().zip(text.chars()) {
            *slot = c;
        }
        self.invalidate();
        Ok(self)
    }

    /// Insert a single character at `index`.
    pub fn insert_char(&mut self, index: usize, c: char) -> Result<&mut Self> {
        self.check_insert_index(index)?;
        self.buffer.ensure_capacity(1);
        self.buffer.open_gap(index, 1)[0] = c;
        self.invalidate();
        Ok(self)
    }

    /// Remove `count` characters starting at `index`.
    pub fn remove(&mut self, index: usize, count: usize) -> Result<&mut Self> {
        let len = self.len();
        match index.checked_add(count) {
            Some(end) if end <= len => {}
            _ => {
                return Err(BuilderError::RangeOutOfBounds {
                    start: index,
                    count,
                    len,
                })
            }
        }
        if count == 0 {
            return Ok(self);
        }

        self.buffer.close_gap(index, count);
        self.invalidate();
        Ok(self)
    }

    /// Replace every occurrence of `old` with `new`.
    pub fn replace_char(&mut self, old: char, new: char) -> &mut Self {
        for c in self.buffer.as_mut_slice() {
            if *c == old {
                *c = new;
            }
        }
        self.invalidate();
        self
    }

    /// Replace every non-overlapping occurrence of `old` with `new`.
    ///
    /// Matches are found left to right; scanning resumes right after each
    /// match, so a match is never searched for inside a replacement.
    /// `new` may be empty to delete the matches.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if `old` is empty.
    pub fn replace(&mut self, old: &str, new: &str) -> Result<&mut Self> {
        if old.is_empty() {
            return Err(BuilderError::InvalidArgument("replaced text must not be empty"));
        }
        if self.is_empty() {
            return Ok(self);
        }

        let old_len = old.chars().count();
        let new_len = new.chars().count();
        if new_len <= old_len {
            self.replace_in_place(old, old_len, new);
        } else {
            self.replace_through_scratch(old, old_len, new, new_len);
        }
        self.invalidate();
        Ok(self)
    }

    /// Replacement that never lengthens the content.
    ///
    /// The write cursor trails the read cursor, so matching always sees
    /// original characters.
    fn replace_in_place(&mut self, old: &str, old_len: usize, new: &str) {
        let chars = self.buffer.as_mut_slice();
        let len = chars.len();
        let mut read = 0;
        let mut write = 0;
        while read < len {
            if search::is_match(chars, read, old, old_len) {
                for c in new.chars() {
                    chars[write] = c;
                    write += 1;
                }
                read += old_len;
            } else {
                chars[write] = chars[read];
                write += 1;
                read += 1;
            }
        }
        self.buffer.truncate(write);
    }

    /// Replacement that lengthens the content, built in the scratch
    /// workspace and copied back.
    fn replace_through_scratch(&mut self, old: &str, old_len: usize, new: &str, new_len: usize) {
        let matches = search::count_matches(self.buffer.as_slice(), old, old_len);
        if matches == 0 {
            return;
        }
        let result_len = self.len() + matches * (new_len - old_len);

        if self.scratch.capacity() == 0 {
            log::trace!("allocating scratch workspace for {result_len} chars");
        }
        self.scratch.clear();
        self.scratch.reserve(result_len);

        let chars = self.buffer.as_slice();
        let mut read = 0;
        while read < chars.len() {
            if search::is_match(chars, read, old, old_len) {
                self.scratch.extend(new.chars());
                read += old_len;
            } else {
                self.scratch.push(chars[read]);
                read += 1;
            }
        }

        self.buffer.assign(&self.scratch);
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Position of the first `c` at or after `start`.
    pub fn index_of_char(&self, c: char, start: usize) -> Option<usize> {
        search::index_of_char(self.buffer.as_slice(), c, start)
    }

    /// Position of the first `c`.
    pub fn find_char(&self, c: char) -> Option<usize> {
        self.index_of_char(c, 0)
    }

    /// Position of the first match of `text` starting at or after `start`.
    pub fn index_of(&self, text: &str, start: usize, case: Case) -> Option<usize> {
        search::index_of(self.buffer.as_slice(), text, start, case)
    }

    /// Position of the first case-sensitive match of `text`.
    pub fn find(&self, text: &str) -> Option<usize> {
        self.index_of(text, 0, Case::Sensitive)
    }

    /// Check if the content begins with `text`.
    pub fn starts_with(&self, text: &str) -> bool {
        matches!(
            search::starts_with(self.buffer.as_slice(), text, 0, Case::Sensitive),
            Ok(true)
        )
    }

    /// Check if `text` occurs exactly at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::OutOfRange`] if `start` is past the end.
    pub fn starts_with_at(&self, text: &str, start: usize, case: Case) -> Result<bool> {
        search::starts_with(self.buffer.as_slice(), text, start, case)
    }

    // ------------------------------------------------------------------
    // Collection conveniences
    // ------------------------------------------------------------------

    /// Append a single character.
    #[inline]
    pub fn push(&mut self, c: char) {
        self.append_char(c);
    }

    /// Check if `c` occurs anywhere in the content.
    pub fn contains_char(&self, c: char) -> bool {
        self.find_char(c).is_some()
    }

    /// Remove the first occurrence of `c`. Returns whether one was found.
    pub fn remove_char(&mut self, c: char) -> bool {
        match self.find_char(c) {
            Some(index) => {
                self.buffer.close_gap(index, 1);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    #[inline]
    fn invalidate(&mut self) {
        self.cache.take();
    }

    fn check_insert_index(&self, index: usize) -> Result<()> {
        if index > self.len() {
            return Err(BuilderError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }
}

impl Default for StringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StringBuilder {
    /// Copies the content and capacity. The clone starts with no cached
    /// string and its own scratch workspace.
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            cache: OnceCell::new(),
            scratch: Vec::new(),
        }
    }
}

impl fmt::Debug for StringBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringBuilder")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("cached", &self.is_cached())
            .field("text", &self.as_chars().iter().collect::<String>())
            .finish()
    }
}

impl fmt::Display for StringBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Write for StringBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.append_char(c);
        Ok(())
    }
}

impl Index<usize> for StringBuilder {
    type Output = char;

    /// # Panics
    ///
    /// Panics if `index` is not below the length.
    fn index(&self, index: usize) -> &char {
        &self.buffer.as_slice()[index]
    }
}

impl IndexMut<usize> for StringBuilder {
    /// Drops the cached string before handing out the slot.
    fn index_mut(&mut self, index: usize) -> &mut char {
        self.invalidate();
        &mut self.buffer.as_mut_slice()[index]
    }
}

impl PartialEq for StringBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.as_chars() == other.as_chars()
    }
}

impl Eq for StringBuilder {}

impl PartialEq<str> for StringBuilder {
    fn eq(&self, other: &str) -> bool {
        self.iter().eq(other.chars())
    }
}

impl PartialEq<&str> for StringBuilder {
    fn eq(&self, other: &&str) -> bool {
        self.iter().eq(other.chars())
    }
}

impl From<&str> for StringBuilder {
    fn from(text: &str) -> Self {
        let mut sb = Self::with_capacity(DEFAULT_CAPACITY.max(text.len()));
        sb.append(text);
        sb
    }
}

impl From<&StringBuilder> for String {
    fn from(sb: &StringBuilder) -> Self {
        sb.as_str().to_owned()
    }
}

impl Extend<char> for StringBuilder {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.buffer.ensure_capacity(iter.size_hint().0);
        for c in iter {
            self.append_char(c);
        }
    }
}

impl<'a> Extend<&'a str> for StringBuilder {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for text in iter {
            self.append(text);
        }
    }
}

impl FromIterator<char> for StringBuilder {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut sb = Self::new();
        sb.extend(iter);
        sb
    }
}

impl<'a> IntoIterator for &'a StringBuilder {
    type Item = char;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, char>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
