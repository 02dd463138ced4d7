//! Collection types built on a single owned allocation.
//!
//! # Method
//! Applicable types here implement [`Deref`](std::ops::Deref) to a slice (or [`str`]), which
//! provides most of the read-only functionality for free.

pub mod contiguous;
