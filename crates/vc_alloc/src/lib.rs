//! Byte-granularity allocators that hand out [`vc_view`] views.
//!
//! [`Allocator`] is the contract: produce a [`ByteViewMut`] of the requested
//! size or fail with [`MemError::Allocation`], and take it back exactly once.
//! [`AllocatorExt`] adds typed `alloc_array` / `free_array` on top of it,
//! constructing and dropping the elements.
//!
//! Two implementations are provided:
//!
//! - [`SystemAllocator`]: the global heap, with a registry of live blocks
//!   that catches foreign and double frees.
//! - [`BumpAllocator`]: an arena; `free` is bookkeeping only and memory is
//!   reclaimed in bulk by [`reset`](BumpAllocator::reset).
//!
//! Neither is thread-safe. Blocks borrow their allocator, so it cannot be
//! dropped or reset while a block is still in use.
//!
//! # Examples
//!
//! ```
//! use vc_alloc::{AllocatorExt, SystemAllocator};
//!
//! let heap = SystemAllocator::new();
//!
//! let mut names = heap.alloc_array::<u64>(4).unwrap();
//! names[3] = 7;
//! assert_eq!(names.as_slice(), &[0, 0, 0, 7]);
//!
//! unsafe { heap.free_array(names) };
//! assert_eq!(heap.stats().live_blocks, 0);
//! ```
//!
//! [`ByteViewMut`]: vc_view::ByteViewMut
//! [`MemError::Allocation`]: vc_view::MemError::Allocation
#![expect(unsafe_code, reason = "Allocation is inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod allocator;
mod bump;
mod system;

// -----------------------------------------------------------------------------
// Top-level exports

pub use allocator::{Allocator, AllocatorExt, DEFAULT_ALIGN};
pub use bump::BumpAllocator;
pub use system::{AllocStats, SystemAllocator};
