use std::iter::FusedIterator;
use std::mem;
use std::ptr;

use super::Buffer;
use crate::collections::contiguous::storage::Storage;

impl<T> IntoIterator for Buffer<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let result = IntoIter {
            storage: mem::replace(&mut self.storage, Storage::new()),
            start: 0,
            end: self.len,
        };
        // self now owns nothing, so forgetting it leaks nothing and avoids dropping moved values.
        mem::forget(self);
        result
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;

    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Buffer<T> {
    type Item = &'a mut T;

    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owned iterator over the elements of a [`Buffer`]. See [`Buffer::into_iter`].
///
/// Elements that haven't been yielded are dropped along with the iterator, which then returns the
/// Buffer's memory.
pub struct IntoIter<T> {
    pub(crate) storage: Storage<T>,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl<T> IntoIter<T> {
    /// Returns the elements that are yet to be yielded as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots in start..end are initialized and within the allocation.
        unsafe {
            std::slice::from_raw_parts(self.storage.as_ptr().add(self.start), self.end - self.start)
        }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            // SAFETY: start <= end <= cap, so the offset is in bounds.
            unsafe { self.storage.as_ptr().add(self.start) },
            self.end - self.start,
        );
        self.start = self.end;

        // SAFETY: The remaining slots are initialized and will never be read again.
        unsafe { ptr::drop_in_place(remaining) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            // SAFETY: start is in the initialized range. Incrementing it afterwards means the
            // value is effectively moved off of the heap.
            let value = unsafe { self.storage.as_ptr().add(self.start).read() };
            self.start += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            // SAFETY: The newly decremented end is in the initialized range and is now outside of
            // the live range.
            let value = unsafe { self.storage.as_ptr().add(self.end).read() };
            Some(value)
        } else {
            None
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

// Borrowed iteration uses the iter and iter_mut definitions provided by Deref<Target = [T]>.
