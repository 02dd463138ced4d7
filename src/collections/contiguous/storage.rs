use std::alloc::{self, Layout};
use std::any;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::{self, NonNull};

use super::error::{AllocFailed, CapacityOverflow, ReserveError};
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// An exclusively owned block of `cap` uninitialized slots of `T`.
///
/// Storage never reads, writes or drops the slots themselves, that is left to the owning
/// collection. It only tracks the allocation: a capacity of zero (or a zero-sized `T`) means that
/// no memory is held and the pointer is dangling.
pub(crate) struct Storage<T> {
    pub(crate) ptr: NonNull<MaybeUninit<T>>,
    pub(crate) cap: usize,
    _phantom: PhantomData<T>,
}

impl<T> Storage<T> {
    pub(crate) const fn new() -> Storage<T> {
        Storage {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    pub(crate) fn try_with_cap(cap: usize) -> Result<Storage<T>, ReserveError> {
        Ok(Storage {
            ptr: Self::try_alloc(cap)?,
            cap,
            _phantom: PhantomData,
        })
    }

    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub(crate) fn with_cap(cap: usize) -> Storage<T> {
        handle_reserve(Self::try_with_cap(cap))
    }

    pub(crate) const fn cap(&self) -> usize {
        self.cap
    }

    pub(crate) const fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr().cast()
    }

    /// Returns true if this Storage currently holds memory from the global allocator.
    pub(crate) const fn is_allocated(&self) -> bool {
        self.cap != 0 && size_of::<T>() != 0
    }

    /// Moves the first `len` slots into a fresh block of `new_cap` slots and releases the old
    /// block. If anything fails, self is left untouched.
    ///
    /// # Safety
    /// `len` must be no greater than either the current capacity or `new_cap`.
    pub(crate) unsafe fn try_regrow(&mut self, len: usize, new_cap: usize) -> Result<(), ReserveError> {
        debug_assert!(len <= self.cap && len <= new_cap);

        if new_cap == self.cap {
            return Ok(());
        }

        let new_ptr = Self::try_alloc(new_cap)?;

        // SAFETY: Both blocks are valid for at least len slots, as guaranteed by the caller, and
        // they can't overlap because new_ptr was just allocated (or is dangling for a ZST, where
        // the copy is a no-op).
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr().cast_const(), new_ptr.as_ptr(), len);
        }

        log::trace!(
            "regrew storage of {} from {} to {} slots",
            any::type_name::<T>(),
            self.cap,
            new_cap,
        );

        self.dealloc();
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Releases the held memory, leaving zero slots. Calling this on empty Storage does nothing.
    pub(crate) fn release(&mut self) {
        self.dealloc();
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow)
    }

    fn try_alloc(cap: usize) -> Result<NonNull<MaybeUninit<T>>, ReserveError> {
        let layout = Self::make_layout(cap)?;

        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: Zero-sized layouts have been guarded against.
        let raw_ptr: *mut MaybeUninit<T> = unsafe { alloc::alloc(layout).cast() };

        NonNull::new(raw_ptr).ok_or_else(|| {
            log::error!("{}:{}: failed allocation of {} bytes", file!(), line!(), layout.size());
            AllocFailed { layout }.into()
        })
    }

    fn dealloc(&mut self) {
        if !self.is_allocated() {
            return;
        }

        // SAFETY: The same layout was successfully created when this block was allocated.
        let layout = unsafe { Self::make_layout(self.cap).ok().unreachable() };

        // SAFETY: ptr was allocated in the global allocator with this exact layout, and the layout
        // has a non-zero size.
        unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
    }
}

impl<T> Drop for Storage<T> {
    fn drop(&mut self) {
        // Slots are never dropped here, only the memory is returned.
        self.dealloc();
    }
}

// SAFETY: Storage uniquely owns its allocation, so it can be sent when T can.
unsafe impl<T: Send> Send for Storage<T> {}
// SAFETY: Storage provides no interior mutability.
unsafe impl<T: Sync> Sync for Storage<T> {}

/// Unwraps the result of a growth operation for methods that don't return errors. Allocation
/// failure is passed on to [`alloc::handle_alloc_error`], capacity overflow panics.
///
/// # Panics
/// Panics if the result is a [`ReserveError::CapacityOverflow`].
pub(crate) fn handle_reserve<R>(result: Result<R, ReserveError>) -> R {
    match result {
        Ok(value) => value,
        Err(ReserveError::AllocFailed(AllocFailed { layout })) => alloc::handle_alloc_error(layout),
        Err(ReserveError::CapacityOverflow(error)) => Err::<R, _>(error).throw(),
    }
}
