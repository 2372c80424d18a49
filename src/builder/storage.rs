//! Storage: The contiguous character buffer and its growth policy.
//!
//! The buffer keeps an explicit logical length next to a fixed-size
//! allocation. Slots past the logical length hold stale characters and
//! are never observable through the public API.

/// Capacity used when a builder is created without an explicit size.
pub const DEFAULT_CAPACITY: usize = 64;

/// Value written into freshly allocated slots.
const FILL: char = '\0';

/// Compute the capacity needed to hold `additional` more characters.
///
/// Returns `capacity` unchanged when it already fits `len + additional`.
/// Otherwise the result is the larger of the exact requirement and twice
/// the current capacity, so a run of small appends reallocates
/// O(log n) times.
#[inline]
pub const fn grown_capacity(len: usize, capacity: usize, additional: usize) -> usize {
    let required = len.saturating_add(additional);
    if required <= capacity {
        return capacity;
    }
    let doubled = capacity.saturating_mul(2);
    if required > doubled {
        required
    } else {
        doubled
    }
}

/// A fixed allocation of characters with a logical length.
///
/// All writes go through methods that assume capacity was reserved by a
/// prior [`CharBuffer::ensure_capacity`] call; writing past the
/// allocation panics like any slice access.
#[derive(Debug)]
pub(crate) struct CharBuffer {
    /// Backing storage. Its length is the physical capacity.
    chars: Box<[char]>,
    /// Number of meaningful characters at the front of `chars`.
    len: usize,
}

impl CharBuffer {
    /// Create an empty buffer with room for `capacity` characters.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chars: vec![FILL; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Number of meaningful characters.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Size of the allocation in characters.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.chars.len()
    }

    /// The logical region.
    #[inline]
    pub fn as_slice(&self) -> &[char] {
        &self.chars[..self.len]
    }

    /// The logical region, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [char] {
        &mut self.chars[..self.len]
    }

    /// Make room for `additional` characters past the logical length.
    ///
    /// Existing content keeps its order. Returns `true` when the buffer
    /// had to be reallocated.
    pub fn ensure_capacity(&mut self, additional: usize) -> bool {
        let old = self.chars.len();
        let new = grown_capacity(self.len, old, additional);
        if new == old {
            return false;
        }

        let mut chars = vec![FILL; new].into_boxed_slice();
        chars[..self.len].copy_from_slice(&self.chars[..self.len]);
        self.chars = chars;
        log::trace!("char buffer grown from {old} to {new} chars");
        true
    }

    /// Drop the logical content, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append one character. Capacity must already be reserved.
    #[inline]
    pub fn push(&mut self, c: char) {
        self.chars[self.len] = c;
        self.len += 1;
    }

    /// Append `count` copies of `c`. Capacity must already be reserved.
    #[inline]
    pub fn push_repeated(&mut self, c: char, count: usize) {
        self.chars[self.len..self.len + count].fill(c);
        self.len += count;
    }

    /// Append every character yielded by `chars`. Capacity must already be
    /// reserved for all of them.
    #[inline]
    pub fn push_chars(&mut self, chars: impl Iterator<Item = char>) {
        for c in chars {
            self.push(c);
        }
    }

    /// Append a slice of characters. Capacity must already be reserved.
    #[inline]
    pub fn push_slice(&mut self, src: &[char]) {
        self.chars[self.len..self.len + src.len()].copy_from_slice(src);
        self.len += src.len();
    }

    /// Shift `index..len` right by `count` and return the opened gap.
    ///
    /// Capacity must already be reserved. The gap holds stale characters
    /// until the caller fills it.
    pub fn open_gap(&mut self, index: usize, count: usize) -> &mut [char] {
        self.chars.copy_within(index..self.len, index + count);
        self.len += count;
        &mut self.chars[index..index + count]
    }

    /// Remove `index..index + count`, shifting the tail left.
    pub fn close_gap(&mut self, index: usize, count: usize) {
        self.chars.copy_within(index + count..self.len, index);
        self.len -= count;
    }

    /// Shorten the logical content to `len` characters.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        debug_assert!(len <= self.len);
        self.len = len;
    }

    /// Reverse the last `count` characters in place.
    #[inline]
    pub fn reverse_tail(&mut self, count: usize) {
        self.chars[self.len - count..self.len].reverse();
    }

    /// Replace the whole logical content with `src`, growing if needed.
    pub fn assign(&mut self, src: &[char]) {
        self.len = 0;
        self.ensure_capacity(src.len());
        self.push_slice(src);
    }
}

impl Clone for CharBuffer {
    /// Copies the logical region into an allocation of the same capacity.
    fn clone(&self) -> Self {
        let mut chars = vec![FILL; self.chars.len()].into_boxed_slice();
        chars[..self.len].copy_from_slice(self.as_slice());
        Self {
            chars,
            len: self.len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grown_capacity_fits() {
        assert_eq!(grown_capacity(10, 64, 54), 64);
        assert_eq!(grown_capacity(0, 64, 0), 64);
    }

    #[test]
    fn test_grown_capacity_doubles() {
        assert_eq!(grown_capacity(64, 64, 1), 128);
        assert_eq!(grown_capacity(60, 64, 10), 128);
    }

    #[test]
    fn test_grown_capacity_exact_when_larger() {
        assert_eq!(grown_capacity(64, 64, 500), 564);
        assert_eq!(grown_capacity(0, 0, 3), 3);
    }

    #[test]
    fn test_grown_capacity_saturates() {
        assert_eq!(grown_capacity(usize::MAX, 1, 1), usize::MAX);
    }

    #[test]
    fn test_growth_is_logarithmic() {
        let mut buffer = CharBuffer::with_capacity(1);
        let mut reallocations = 0;
        for _ in 0..1024 {
            if buffer.ensure_capacity(1) {
                reallocations += 1;
            }
            buffer.push('x');
        }
        assert_eq!(buffer.len(), 1024);
        assert_eq!(reallocations, 10);
    }

    #[test]
    fn test_ensure_capacity_preserves_content() {
        let mut buffer = CharBuffer::with_capacity(2);
        buffer.ensure_capacity(2);
        buffer.push('a');
        buffer.push('b');
        assert!(buffer.ensure_capacity(3));
        assert_eq!(buffer.capacity(), 5);
        assert_eq!(buffer.as_slice(), &['a', 'b']);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = CharBuffer::with_capacity(8);
        buffer.push_repeated('z', 8);
        buffer.clear();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 8);
        assert!(buffer.as_slice().is_empty());
    }

    #[test]
    fn test_gap_open_and_close() {
        let mut buffer = CharBuffer::with_capacity(16);
        buffer.push_chars("held".chars());
        buffer.ensure_capacity(2);
        buffer.open_gap(2, 2).copy_from_slice(&['X', 'Y']);
        assert_eq!(buffer.as_slice().iter().collect::<String>(), "heXYld");

        buffer.close_gap(2, 2);
        assert_eq!(buffer.as_slice().iter().collect::<String>(), "held");
    }

    #[test]
    fn test_reverse_tail() {
        let mut buffer = CharBuffer::with_capacity(8);
        buffer.push_chars("-321".chars());
        buffer.reverse_tail(3);
        assert_eq!(buffer.as_slice().iter().collect::<String>(), "-123");
    }

    #[test]
    fn test_assign_and_clone() {
        let mut buffer = CharBuffer::with_capacity(4);
        buffer.push_chars("old".chars());
        buffer.assign(&['n', 'e', 'w', '!', '!']);
        assert_eq!(buffer.as_slice().iter().collect::<String>(), "new!!");

        let copy = buffer.clone();
        assert_eq!(copy.as_slice(), buffer.as_slice());
        assert_eq!(copy.capacity(), buffer.capacity());
    }
}
