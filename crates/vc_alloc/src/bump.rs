use core::cell::Cell;

use bumpalo::Bump;
use vc_view::{ByteViewMut, MemError};

use crate::allocator::{Allocator, block_layout, empty_block};

/// An arena [`Allocator`].
///
/// Allocation bumps a pointer inside chunks obtained from the global heap.
/// `free` only updates the block count; memory comes back all at once on
/// [`reset`](Self::reset) or when the arena is dropped. Since blocks borrow
/// the arena, `reset` cannot run while any of them is still reachable.
///
/// Destructors of values created with
/// [`alloc_array`](crate::AllocatorExt::alloc_array) run only through
/// [`free_array`](crate::AllocatorExt::free_array).
///
/// # Examples
///
/// ```
/// use vc_alloc::{Allocator, BumpAllocator};
///
/// let mut arena = BumpAllocator::new();
/// let block = arena.alloc(100).unwrap();
/// assert_eq!(arena.live_blocks(), 1);
///
/// unsafe { arena.free(block) };
/// arena.reset();
/// assert_eq!(arena.live_blocks(), 0);
/// ```
pub struct BumpAllocator {
    bump: Bump,
    live_blocks: Cell<usize>,
}

impl BumpAllocator {
    /// Creates an empty arena. No memory is reserved until the first allocation.
    #[inline]
    pub fn new() -> Self {
        Self {
            bump: Bump::new(),
            live_blocks: Cell::new(0),
        }
    }

    /// Creates an arena whose chunks may not exceed `limit` bytes in total.
    pub fn with_limit(limit: usize) -> Self {
        let this = Self::new();
        this.bump.set_allocation_limit(Some(limit));
        this
    }

    /// Bytes reserved from the heap by the arena's chunks.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Blocks handed out and not yet freed.
    #[inline]
    pub fn live_blocks(&self) -> usize {
        self.live_blocks.get()
    }

    /// Reclaims every block at once, keeping the largest chunk for reuse.
    pub fn reset(&mut self) {
        let live = self.live_blocks.replace(0);
        if live != 0 {
            log::warn!("BumpAllocator reset with {live} blocks never freed");
        }
        self.bump.reset();
    }
}

impl Default for BumpAllocator {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator for BumpAllocator {
    fn alloc_aligned(&self, size: usize, align: usize) -> Result<ByteViewMut<'_>, MemError> {
        let layout = block_layout(size, align)?;
        if size == 0 {
            return Ok(empty_block(layout));
        }

        let ptr = self.bump.try_alloc_layout(layout).map_err(|_| {
            log::warn!("arena failed to provide {size} bytes (align {align})");
            MemError::Allocation { size, align }
        })?;
        self.live_blocks.set(self.live_blocks.get() + 1);
        log::trace!("bump {size} bytes at {ptr:p}");

        // SAFETY: `ptr` is a fresh arena allocation of `size` bytes.
        Ok(unsafe { ByteViewMut::from_raw_parts(ptr.as_ptr(), size) })
    }

    unsafe fn free_aligned(&self, block: ByteViewMut<'_>, _align: usize) {
        if block.is_empty() {
            return;
        }
        match self.live_blocks.get().checked_sub(1) {
            Some(live) => self.live_blocks.set(live),
            None => vc_view::contract::violated(MemError::UnknownBlock {
                addr: block.as_ptr().addr(),
                len: block.len(),
            }),
        }
    }
}

impl Drop for BumpAllocator {
    fn drop(&mut self) {
        let live = self.live_blocks.get();
        if live != 0 {
            log::warn!("BumpAllocator dropped with {live} blocks never freed");
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::BumpAllocator;
    use crate::{Allocator, AllocatorExt};
    use alloc::string::String;
    use vc_view::{ByteViewMut, MemError, View, mem};

    #[test]
    fn is_send() {
        fn is_send<T: Send>() {}
        is_send::<BumpAllocator>();
    }

    #[test]
    fn blocks_are_disjoint() {
        let arena = BumpAllocator::new();
        let mut a = arena.alloc(16).unwrap();
        let mut b = arena.alloc(16).unwrap();
        mem::zero(a.reborrow(), 1).unwrap();
        mem::zero(b.reborrow(), 2).unwrap();

        assert!(a.iter().all(|x| *x == 1));
        assert!(b.iter().all(|x| *x == 2));
        assert_eq!(arena.live_blocks(), 2);
        assert!(arena.allocated_bytes() >= 32);

        unsafe {
            arena.free(a);
            arena.free(b);
        }
        assert_eq!(arena.live_blocks(), 0);
    }

    #[test]
    fn typed_values_drop_on_free() {
        let arena = BumpAllocator::new();
        let mut names = arena.alloc_array::<String>(2).unwrap();
        names[0].push_str("alpha");
        names[1].push_str("beta");
        assert_eq!(View::from(names.as_slice()).last(), "beta");
        unsafe { arena.free_array(names) };
    }

    #[test]
    fn reset_reclaims() {
        let mut arena = BumpAllocator::new();
        for _ in 0..8 {
            let block = arena.alloc_aligned(100, 8).unwrap();
            assert_eq!(block.as_ptr().addr() % 8, 0);
        }
        assert_eq!(arena.live_blocks(), 8);

        arena.reset();
        assert_eq!(arena.live_blocks(), 0);
        let block = arena.alloc(10).unwrap();
        unsafe { arena.free(block) };
    }

    #[test]
    fn respects_limit() {
        let arena = BumpAllocator::with_limit(0);
        assert_eq!(
            arena.alloc_aligned(64, 8).unwrap_err(),
            MemError::Allocation { size: 64, align: 8 }
        );
        assert!(arena.alloc(0).is_ok());
    }

    #[test]
    #[should_panic(expected = "is not a live allocation of this allocator")]
    fn free_without_alloc() {
        let arena = BumpAllocator::new();
        let mut local = [0_u8; 4];
        unsafe { arena.free(ByteViewMut::from(&mut local)) };
    }
}
