//! This crate provides non-owning, bounds-checked views over contiguous memory.
//!
//! A view is two machine words: a pointer and an element count. It never
//! allocates, copies or frees the memory it refers to; the lifetime `'a`
//! ties it to whoever owns the buffer.
//!
//! **View** and **ViewMut**
//!
//! [`View<'a, T>`] is a read-only view, similar to `&'a [T]` but nullable.
//! [`ViewMut<'a, T>`] is the writable counterpart, similar to `&'a mut [T]`.
//! A `ViewMut` always converts into a `View`, never the other way around.
//!
//! Construction performs no validation. Every access path (indexing,
//! `first`/`last`, slicing) does: a failed check is reported through the
//! [contract](crate::contract) machinery, or returned as a [`MemError`] by
//! the `try_*` variants.
//!
//! **ByteView** and **ByteViewMut**
//!
//! [`ByteView<'a>`] and [`ByteViewMut<'a>`] are views over raw bytes, the
//! common interchange format of the [`mem`] primitives. Any view over a
//! plain-old-data type can be reinterpreted as one with `to_bytes`.
//!
//! **Memory primitives**
//!
//! [`zero`](mem::zero), [`copy`](mem::copy), [`compare`](mem::compare) and
//! [`equal`](mem::equal) are the only operations that touch raw memory.
//!
//! # Examples
//!
//! ```
//! use vc_view::{View, ViewMut, mem};
//!
//! let src = [1_u8, 2, 3, 4];
//! let mut dst = [0_u8; 6];
//!
//! mem::copy(ViewMut::from(&mut dst), View::from(&src)).unwrap();
//! assert_eq!(dst, [1, 2, 3, 4, 0, 0]);
//! ```
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod bytes;
mod error;
mod view;

pub mod contract;
pub mod mem;

// -----------------------------------------------------------------------------
// Top-level exports

pub use bytes::{ByteView, ByteViewMut};
pub use contract::ContractUnwrap;
pub use error::{ErrorKind, MemError};
pub use mem::byte_size;
pub use view::{View, ViewMut};
