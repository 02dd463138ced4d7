//! A module containing [`Buffer`] and associated types.
//!
//! The only other included type is [`IntoIter`] for owned iteration over a Buffer.
//! [`IterMut`](std::slice::IterMut) and [`Iter`](std::slice::Iter) from [`std::slice`] are used for
//! borrowed iteration.
//!
//! [`Buffer`] is also re-exported under the parent module.

mod buffer;
mod iter;

pub use buffer::*;
pub use iter::*;
