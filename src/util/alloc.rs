//! Test helpers for observing allocations and drops.
use std::alloc::System;
use std::cell::RefCell;
use std::ops::Deref;
use std::rc::Rc;

use mockalloc::Mockalloc;

// Passes straight through to the system allocator unless a test is inside
// `mockalloc::record_allocs`.
#[global_allocator]
static ALLOCATOR: Mockalloc<System> = Mockalloc(System);

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

/// Counts how many times it (or any of its clones) has been dropped.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}
