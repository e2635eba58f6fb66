use core::alloc::Layout;
use core::ptr;

use vc_view::{ByteViewMut, MemError, ViewMut};

/// Alignment used by [`Allocator::alloc`] and [`Allocator::free`].
pub const DEFAULT_ALIGN: usize = 16;

// -----------------------------------------------------------------------------
// Allocator

/// A source of raw byte blocks.
///
/// # Contract
///
/// - A successful `alloc*` returns a non-null view of exactly `size` bytes,
///   aligned to `align`. The bytes are uninitialized garbage (but writable).
/// - A zero-byte request returns an empty but non-null view without
///   touching the backend; freeing it is a no-op.
/// - Every block must be passed back to `free*` of the same allocator
///   exactly once, with the same alignment, or it leaks.
///
/// Implementations are not required to be thread-safe.
pub trait Allocator {
    /// Allocates `size` bytes aligned to `align`.
    ///
    /// # Errors
    ///
    /// [`MemError::Allocation`] if the request cannot be satisfied, or if
    /// `align` is not a power of two.
    fn alloc_aligned(&self, size: usize, align: usize) -> Result<ByteViewMut<'_>, MemError>;

    /// Releases a block returned by [`alloc_aligned`](Self::alloc_aligned).
    ///
    /// # Safety
    ///
    /// - `block` must have been returned by this allocator with `align`,
    ///   unmodified in pointer and length.
    /// - `block` must not have been freed already.
    unsafe fn free_aligned(&self, block: ByteViewMut<'_>, align: usize);

    /// Allocates `size` bytes aligned to [`DEFAULT_ALIGN`].
    ///
    /// # Errors
    ///
    /// [`MemError::Allocation`] if the request cannot be satisfied.
    #[inline]
    fn alloc(&self, size: usize) -> Result<ByteViewMut<'_>, MemError> {
        self.alloc_aligned(size, DEFAULT_ALIGN)
    }

    /// Releases a block returned by [`alloc`](Self::alloc).
    ///
    /// # Safety
    ///
    /// See [`free_aligned`](Self::free_aligned).
    #[inline]
    unsafe fn free(&self, block: ByteViewMut<'_>) {
        unsafe { self.free_aligned(block, DEFAULT_ALIGN) }
    }
}

impl<A: Allocator + ?Sized> Allocator for &A {
    #[inline]
    fn alloc_aligned(&self, size: usize, align: usize) -> Result<ByteViewMut<'_>, MemError> {
        (**self).alloc_aligned(size, align)
    }

    #[inline]
    unsafe fn free_aligned(&self, block: ByteViewMut<'_>, align: usize) {
        unsafe { (**self).free_aligned(block, align) }
    }
}

// -----------------------------------------------------------------------------
// helpers for implementors

/// Validates `size` and `align` as a [`Layout`].
#[inline]
pub(crate) fn block_layout(size: usize, align: usize) -> Result<Layout, MemError> {
    Layout::from_size_align(size, align)
        .map_err(|_| MemError::Allocation { size, align })
}

/// The block returned for zero-byte requests: non-null, aligned, empty.
#[inline]
pub(crate) const fn empty_block(layout: Layout) -> ByteViewMut<'static> {
    // SAFETY: a zero-length view over a non-null, aligned address.
    unsafe { ByteViewMut::from_raw_parts(ptr::without_provenance_mut(layout.align()), 0) }
}

// -----------------------------------------------------------------------------
// AllocatorExt

/// Typed allocation on top of any [`Allocator`].
pub trait AllocatorExt: Allocator {
    /// Allocates `count` values of `T`, each initialized with `T::default()`.
    ///
    /// If a `T::default()` call panics, the values constructed so far are
    /// dropped and the block is released before the panic continues.
    ///
    /// Zero-sized types take no memory, but `T::default()` still runs `count`
    /// times, so a huge `count` of them costs that many constructor calls.
    ///
    /// # Errors
    ///
    /// [`MemError::Allocation`] if the byte allocation fails or the size
    /// overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_alloc::{AllocatorExt, BumpAllocator};
    ///
    /// let arena = BumpAllocator::new();
    /// let strings = arena.alloc_array::<String>(3).unwrap();
    ///
    /// assert!(strings.iter().all(String::is_empty));
    /// unsafe { arena.free_array(strings) };
    /// ```
    fn alloc_array<T: Default>(&self, count: usize) -> Result<ViewMut<'_, T>, MemError> {
        let align = align_of::<T>();
        let layout = Layout::array::<T>(count).map_err(|_| MemError::Allocation {
            size: count.saturating_mul(size_of::<T>()),
            align,
        })?;

        let mut block = self.alloc_aligned(layout.size(), align)?;
        let data = block.as_mut_ptr().cast::<T>();

        let mut guard = InitGuard {
            allocator: self,
            block: Some(block),
            data,
            init: 0,
        };
        while guard.init < count {
            // SAFETY: `init < count` and the block holds `count` values of `T`.
            unsafe { data.add(guard.init).write(T::default()) };
            guard.init += 1;
        }
        guard.block = None;

        // SAFETY: all `count` values are initialized; the block lives as long as `&self`.
        Ok(unsafe { ViewMut::from_raw_parts(data, count) })
    }

    /// Drops every value of `view` in place, then releases its memory.
    ///
    /// A null view is ignored.
    ///
    /// # Safety
    ///
    /// `view` must have been returned by [`alloc_array`](Self::alloc_array)
    /// of this allocator, unmodified in pointer and length, and not freed yet.
    unsafe fn free_array<T>(&self, mut view: ViewMut<'_, T>) {
        if view.is_null() {
            return;
        }
        let size = view.byte_size();
        let data = view.as_mut_ptr();

        // SAFETY: the caller guarantees `view` is a live `alloc_array` result
        // of this allocator, so its `size` bytes form one block with `T`'s
        // alignment and every element is initialized.
        unsafe {
            ptr::drop_in_place(view.as_mut_slice());
            let block = ByteViewMut::from_raw_parts(data.cast::<u8>(), size);
            self.free_aligned(block, align_of::<T>());
        }
    }
}

impl<A: Allocator + ?Sized> AllocatorExt for A {}

// -----------------------------------------------------------------------------
// InitGuard

/// Drops the constructed prefix and frees the block if construction unwinds.
struct InitGuard<'a, A: Allocator + ?Sized, T> {
    allocator: &'a A,
    block: Option<ByteViewMut<'a>>,
    data: *mut T,
    init: usize,
}

impl<A: Allocator + ?Sized, T> Drop for InitGuard<'_, A, T> {
    #[cold]
    fn drop(&mut self) {
        if let Some(block) = self.block.take() {
            // SAFETY: exactly the first `init` values were written, and `block`
            // came from `alloc_aligned` with `T`'s alignment and is freed once
            // since `take` clears it.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data, self.init));
                self.allocator.free_aligned(block, align_of::<T>());
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
