//! This crate is a single, generic growable buffer, written to replace the handful of hand-rolled
//! dynamic arrays (string classes, float allocators, stacks) that keep getting rewritten with the
//! same bugs.
//!
//! # Purpose
//! [`Buffer<T>`](collections::contiguous::Buffer) is an owning, contiguous, resizable sequence with
//! amortized `O(1)` push, a clear split between length and capacity, deep-copy clones and exactly
//! one release of its memory. [`Text`](collections::contiguous::Text) builds a UTF-8 string on top
//! of it and makes the nul-terminator convention an explicit conversion instead of a hidden byte.
//!
//! # Method
//! Memory comes straight from [`std::alloc`]. The allocation itself is owned by a small internal
//! storage type, which only moves raw slots around. The Buffer on top of it decides what is
//! initialized and what gets dropped. Growth always allocates a fresh block, moves the elements
//! across and only then frees the old block, so a failed growth never leaves a half-moved Buffer.
//!
//! # Error Handling
//! The only error most callers will see is
//! [`IndexOutOfBounds`](collections::contiguous::error::IndexOutOfBounds) from
//! [`at`](collections::contiguous::Buffer::at). Running out of memory isn't something a caller can
//! usefully handle on every push, so [`push`](collections::contiguous::Buffer::push) aborts through
//! [`handle_alloc_error`](std::alloc::handle_alloc_error) and panics on capacity overflow. Callers
//! that do want to handle it use the `try_` methods, which return a
//! [`ReserveError`](collections::contiguous::error::ReserveError) and leave the Buffer untouched.
//!
//! Errors are strongly typed: one struct per failure, grouped into enums for static dispatch.
//!
//! # Logging
//! Reallocations are logged at trace level and failed allocations at error level through the
//! [`log`] facade. Nothing is printed unless the application installs a logger.
//!
//! # Dependencies
//! This crate doesn't use [`Vec`] anywhere. It depends on `derive_more` for the repetitive error
//! trait implementations and on `log` for diagnostics. Tests count allocations with `mockalloc`.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
