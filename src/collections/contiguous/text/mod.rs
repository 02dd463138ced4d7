//! A module containing [`Text`], a growable UTF-8 string stored in a [`Buffer<u8>`](super::Buffer).
//!
//! Text never stores a nul terminator. Code that needs a C-style string asks for one explicitly
//! through [`Text::to_nul_terminated`].

mod tests;
mod text;

pub use text::*;
