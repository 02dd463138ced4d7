use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::collections::contiguous::error::{CapacityOverflow, IndexOutOfBounds, ReserveError};
use crate::collections::contiguous::storage::{Storage, handle_reserve};

/// The smallest capacity a Buffer grows to from empty.
pub const MIN_CAP: usize = 1;

/// The factor the capacity is multiplied by whenever a full Buffer needs more room.
pub const GROWTH_FACTOR: usize = 2;

/// An owning, contiguous, growable sequence of `T`.
///
/// A Buffer tracks its length (live elements) separately from its capacity (allocated slots).
/// Pushing onto a full Buffer doubles the capacity (starting at [`MIN_CAP`]) by allocating a new
/// block, moving the existing elements across and releasing the old block, which keeps the
/// amortized cost of [`push`](Buffer::push) at `O(1)`.
///
/// An empty Buffer holds no allocation at all. Cloning a Buffer always produces fresh storage, so
/// two Buffers never alias.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Buffer.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `len` | `O(1)` |
/// | `cap` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `truncate` | `O(n)` |
/// | `resize` | `O(n)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `clear` | `O(n)` |
/// | `clone` | `O(n)` |
///
/// \* If the Buffer is full, `push` will take `O(n)` to move into a larger allocation.
///
/// \** If the Buffer has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Buffer<T> {
    pub(crate) storage: Storage<T>,
    pub(crate) len: usize,
}

impl<T> Buffer<T> {
    /// Creates a new Buffer with length and capacity 0. No memory is allocated until the first
    /// push.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Buffer;
    /// let buf: Buffer<u8> = Buffer::new();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.cap(), 0);
    /// ```
    pub const fn new() -> Buffer<T> {
        Buffer {
            storage: Storage::new(),
            len: 0,
        }
    }

    /// Creates a new Buffer with capacity exactly equal to the provided value.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Buffer;
    /// let mut buf: Buffer<u8> = Buffer::with_cap(5);
    /// assert_eq!(buf.cap(), 5);
    /// buf.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(buf.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Buffer<T> {
        Buffer {
            storage: Storage::with_cap(cap),
            len: 0,
        }
    }

    /// Returns the number of live elements in the Buffer.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Buffer contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Buffer;
    /// let mut buf: Buffer<u8> = Buffer::new();
    /// assert!(buf.is_empty());
    /// buf.push(1);
    /// assert!(!buf.is_empty())
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots currently allocated, which is always at least
    /// [`len`](Buffer::len).
    pub const fn cap(&self) -> usize {
        self.storage.cap()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` isn't less than the length of the Buffer.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Buffer;
    /// let buf = Buffer::from([10, 20, 30]);
    /// assert_eq!(buf.at(1), Ok(&20));
    /// assert!(buf.at(3).is_err());
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        let len = self.len;
        self.get(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` isn't less than the length of the Buffer.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.len;
        self.get_mut(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Push the provided value onto the end of the Buffer, doubling the capacity first if the
    /// Buffer is full.
    ///
    /// # Panics
    /// Panics if the memory layout of the Buffer would have a size that exceeds [`isize::MAX`].
    /// Allocation failure aborts through [`handle_alloc_error`](std::alloc::handle_alloc_error).
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Buffer;
    /// let mut buf = Buffer::new();
    /// let mut caps = [0; 5];
    /// for i in 0..5 {
    ///     buf.push(i + 1);
    ///     caps[i] = buf.cap();
    /// }
    /// assert_eq!(&*buf, &[1, 2, 3, 4, 5]);
    /// assert_eq!(caps, [1, 2, 4, 4, 8]);
    /// ```
    pub fn push(&mut self, value: T) {
        handle_reserve(self.try_push(value))
    }

    /// Push the provided value onto the end of the Buffer, returning an error instead of
    /// panicking or aborting if the Buffer needed to grow and couldn't.
    ///
    /// # Errors
    /// Returns a [`ReserveError`] if growth failed, in which case the Buffer is unchanged and
    /// `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), ReserveError> {
        if self.len == self.cap() {
            self.try_grow()?;
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
        Ok(())
    }

    /// Push the provided value onto the end of the Buffer, assuming that there is enough capacity
    /// to do so.
    ///
    /// # Safety
    /// The caller must ensure that `len < cap`, using [`reserve`](Buffer::reserve) or
    /// [`with_cap`](Buffer::with_cap). Using this method on a full Buffer is undefined behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Buffer has room for this push, so the
        // write is in bounds of the allocation.
        unsafe { self.storage.as_ptr().add(self.len).write(value) }
        self.len += 1;
    }

    /// Pops the last value off the end of the Buffer. The capacity is left as it was.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from([1, 2]);
    /// assert_eq!(buf.pop(), Some(2));
    /// assert_eq!(buf.pop(), Some(1));
    /// assert_eq!(buf.pop(), None);
    /// assert_eq!(buf.cap(), 2);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: The value at the newly decremented len is initialized and is now outside of
            // the live range, so reading it out moves it off the heap.
            Some(unsafe { self.storage.as_ptr().add(self.len).read() })
        }
    }

    /// Drops every element and releases the Buffer's storage, leaving length and capacity at 0.
    /// Clearing an empty Buffer does nothing.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from([1, 2, 3]);
    /// buf.clear();
    /// assert_eq!((buf.len(), buf.cap()), (0, 0));
    /// buf.push(4);
    /// assert_eq!(&*buf, &[4]);
    /// ```
    pub fn clear(&mut self) {
        self.drop_elements();
        self.storage.release();
    }

    /// Shortens the Buffer to `len` elements, dropping the rest. The capacity is left as it was.
    /// Does nothing if `len` is not less than the current length.
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from([1, 2, 3, 4]);
    /// buf.truncate(1);
    /// assert_eq!(buf, [1]);
    /// assert_eq!(buf.cap(), 4);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail = self.len - len;
        // Shorten first, so that a panicking drop can't cause a double drop later on.
        self.len = len;

        // SAFETY: Slots len..len + tail were initialized and are no longer reachable through self.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.storage.as_ptr().add(len), tail));
        }
    }

    /// Changes the length of the Buffer to `new_len`. Shrinking truncates, growing pushes clones
    /// of `value` one at a time, so the capacity doubles exactly as it would for [`push`].
    ///
    /// # Panics
    /// Panics if the memory layout of the Buffer would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use growbuf::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from([7]);
    /// buf.resize(3, 0);
    /// assert_eq!(buf, [7, 0, 0]);
    /// assert_eq!(buf.cap(), 4);
    /// buf.resize(1, 0);
    /// assert_eq!(buf, [7]);
    /// ```
    ///
    /// [`push`]: Buffer::push
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        for _ in self.len + 1..new_len {
            self.push(value.clone());
        }
        self.push(value);
    }

    /// Ensures that the Buffer has capacity to hold an additional `extra` elements. After invoking
    /// this method, the capacity will be >= len + extra.
    ///
    /// # Panics
    /// Panics if the memory layout of the Buffer would have a size that exceeds [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        handle_reserve(self.try_reserve(extra))
    }

    /// Fallible version of [`reserve`](Buffer::reserve).
    ///
    /// # Errors
    /// Returns a [`ReserveError`] if the new capacity couldn't be allocated, leaving the Buffer
    /// unchanged.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), ReserveError> {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityOverflow)?;

        if new_cap <= self.cap() {
            return Ok(());
        }

        self.try_realloc(new_cap)
    }

    /// Shrinks the Buffer so that its capacity is equal to its length. An empty Buffer releases its
    /// storage entirely.
    pub fn shrink_to_fit(&mut self) {
        handle_reserve(self.try_realloc(self.len))
    }

    /// Returns the live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Returns the live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Grows the Buffer by [`GROWTH_FACTOR`], so that it can take at least one more element.
    pub(crate) fn try_grow(&mut self) -> Result<(), ReserveError> {
        let new_cap = self.cap()
            .checked_mul(GROWTH_FACTOR)
            .map(|cap| cmp::max(cap, MIN_CAP))
            .ok_or(CapacityOverflow)?;

        self.try_realloc(new_cap)
    }

    /// Moves the Buffer's elements into storage with exactly `new_cap` slots.
    ///
    /// # Panics
    /// Panics in debug builds if `new_cap` is less than the length.
    pub(crate) fn try_realloc(&mut self, new_cap: usize) -> Result<(), ReserveError> {
        // SAFETY: Callers never shrink below len and len <= cap always holds.
        unsafe { self.storage.try_regrow(self.len, new_cap) }
    }

    /// Drops all live elements in place without touching the storage.
    pub(crate) fn drop_elements(&mut self) {
        self.truncate(0);
    }

    /// Returns true if the Buffer currently holds an allocation.
    #[cfg(test)]
    pub(crate) const fn is_allocated(&self) -> bool {
        self.storage.is_allocated()
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        self.drop_elements();
        // The storage is dropped implicitly afterwards, returning the memory.
    }
}

impl<T> Extend<T> for Buffer<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Buffer<T> {
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        for item in iter {
            self.push(*item);
        }
    }
}

impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut buf = Buffer::with_cap(iter.size_hint().0);

        for item in iter {
            buf.push(item);
        }

        buf
    }
}

impl<T: Clone> From<&[T]> for Buffer<T> {
    fn from(value: &[T]) -> Self {
        let mut buf = Buffer::with_cap(value.len());

        for item in value {
            // SAFETY: buf has been created with the right capacity.
            unsafe { buf.push_unchecked(item.clone()) }
        }

        buf
    }
}

impl<T, const N: usize> From<[T; N]> for Buffer<T> {
    fn from(value: [T; N]) -> Self {
        let mut buf = Buffer::with_cap(N);

        for item in value {
            // SAFETY: buf has been created with the right capacity.
            unsafe { buf.push_unchecked(item) }
        }

        buf
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len slots are initialized, the pointer is nonnull and properly aligned
        // (dangling is fine for len 0 or a ZST) and the whole range lies within the allocation.
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for Buffer<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for deref, and the mutable borrow of self prevents any other access.
        unsafe { slice::from_raw_parts_mut(self.storage.as_ptr(), self.len) }
    }
}

impl<T> AsRef<[T]> for Buffer<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for Buffer<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for Buffer<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for Buffer<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T: Clone> Clone for Buffer<T> {
    /// Deep-copies the Buffer into fresh storage with the same capacity.
    fn clone(&self) -> Self {
        let mut buf = Self::with_cap(self.cap());

        for value in self.iter() {
            // SAFETY: buf has at least as much capacity as self has elements.
            unsafe { buf.push_unchecked(value.clone()) }
        }

        buf
    }

    /// Replaces the contents of self with copies of the elements in `source`, matching its
    /// capacity. The existing allocation is reused when the capacities already agree.
    fn clone_from(&mut self, source: &Self) {
        self.drop_elements();
        handle_reserve(self.try_realloc(source.cap()));

        for value in source.iter() {
            // SAFETY: self now has exactly as much capacity as source.
            unsafe { self.push_unchecked(value.clone()) }
        }
    }
}

impl<T: PartialEq> PartialEq for Buffer<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Buffer<T> {}

impl<T: PartialEq> PartialEq<[T]> for Buffer<T> {
    fn eq(&self, other: &[T]) -> bool {
        **self == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Buffer<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        **self == *other
    }
}

impl<T: Hash> Hash for Buffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Buffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Buffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
