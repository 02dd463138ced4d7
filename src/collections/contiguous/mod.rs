//! Contiguous collection types. [`Buffer`] is a growable sequence of any element type and
//! [`Text`] layers UTF-8 text on top of a `Buffer<u8>`.
#![warn(missing_docs)]

pub mod buffer;
pub mod error;
#[cfg(feature = "text")]
pub mod text;

pub(crate) mod storage;

#[doc(inline)]
pub use buffer::Buffer;
#[doc(inline)]
#[cfg(feature = "text")]
pub use text::Text;
