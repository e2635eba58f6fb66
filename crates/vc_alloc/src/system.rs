use alloc::alloc::{alloc, dealloc};
use core::alloc::Layout;
use core::cell::RefCell;

use foldhash::fast::FixedState;
use hashbrown::HashMap;
use vc_view::{ByteViewMut, MemError, contract};

use crate::allocator::{Allocator, block_layout, empty_block};

// -----------------------------------------------------------------------------
// AllocStats

/// A snapshot of a [`SystemAllocator`]'s bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Blocks allocated and not yet freed.
    pub live_blocks: usize,
    /// Total size of the live blocks.
    pub live_bytes: usize,
    /// Non-empty blocks handed out over the allocator's lifetime.
    pub total_allocs: usize,
}

// -----------------------------------------------------------------------------
// SystemAllocator

struct Registry {
    blocks: HashMap<usize, Layout, FixedState>,
    stats: AllocStats,
}

/// An [`Allocator`] backed by the global heap.
///
/// Every live block is recorded with its layout, so freeing a block this
/// allocator did not hand out (or freeing one twice) is detected and
/// reported as a contract violation instead of corrupting the heap.
///
/// Blocks still live when the allocator is dropped are logged and released.
///
/// # Examples
///
/// ```
/// use vc_alloc::{Allocator, SystemAllocator};
///
/// let heap = SystemAllocator::with_limit(64);
///
/// let block = heap.alloc(48).unwrap();
/// assert_eq!(block.len(), 48);
/// assert!(heap.alloc(32).is_err());
///
/// unsafe { heap.free(block) };
/// assert_eq!(heap.stats().live_bytes, 0);
/// ```
pub struct SystemAllocator {
    registry: RefCell<Registry>,
    limit: Option<usize>,
}

impl SystemAllocator {
    /// Creates an allocator with no limit on live bytes.
    #[inline]
    pub const fn new() -> Self {
        Self {
            registry: RefCell::new(Registry {
                blocks: HashMap::with_hasher(FixedState::with_seed(0)),
                stats: AllocStats {
                    live_blocks: 0,
                    live_bytes: 0,
                    total_allocs: 0,
                },
            }),
            limit: None,
        }
    }

    /// Creates an allocator that refuses to hold more than `limit` live bytes.
    #[inline]
    pub const fn with_limit(limit: usize) -> Self {
        let mut this = Self::new();
        this.limit = Some(limit);
        this
    }

    /// Returns the configured byte limit, if any.
    #[inline]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns a snapshot of the current bookkeeping.
    #[inline]
    pub fn stats(&self) -> AllocStats {
        self.registry.borrow().stats
    }

    /// Returns `true` if `block` is a live allocation of this allocator.
    pub fn owns(&self, block: &ByteViewMut<'_>) -> bool {
        let addr = block.as_ptr().addr();
        self.registry
            .borrow()
            .blocks
            .get(&addr)
            .is_some_and(|layout| layout.size() == block.len())
    }
}

impl Default for SystemAllocator {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator for SystemAllocator {
    fn alloc_aligned(&self, size: usize, align: usize) -> Result<ByteViewMut<'_>, MemError> {
        let layout = block_layout(size, align)?;
        if size == 0 {
            return Ok(empty_block(layout));
        }

        let mut registry = self.registry.borrow_mut();
        let requested = registry.stats.live_bytes.saturating_add(size);
        if let Some(limit) = self.limit.filter(|limit| requested > *limit) {
            log::warn!("refusing {size} bytes: limit of {limit} bytes reached");
            return Err(MemError::Allocation { size, align });
        }

        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { alloc(layout) };
        if ptr.is_null() {
            log::warn!("heap failed to provide {size} bytes (align {align})");
            return Err(MemError::Allocation { size, align });
        }

        registry.blocks.insert(ptr.expose_provenance(), layout);
        registry.stats.live_blocks += 1;
        registry.stats.live_bytes += size;
        registry.stats.total_allocs += 1;
        log::trace!("alloc {size} bytes at {ptr:p}");

        // SAFETY: `ptr` is a fresh allocation of `size` bytes owned by `self`.
        Ok(unsafe { ByteViewMut::from_raw_parts(ptr, size) })
    }

    unsafe fn free_aligned(&self, mut block: ByteViewMut<'_>, align: usize) {
        if block.is_empty() {
            return;
        }

        let ptr = block.as_mut_ptr();
        let addr = ptr.addr();
        let len = block.len();

        let layout = {
            let mut registry = self.registry.borrow_mut();
            let known = registry
                .blocks
                .get(&addr)
                .is_some_and(|layout| layout.size() == len && layout.align() == align);
            if known {
                registry.stats.live_blocks -= 1;
                registry.stats.live_bytes -= len;
                registry.blocks.remove(&addr)
            } else {
                None
            }
        };

        let Some(layout) = layout else {
            contract::violated(MemError::UnknownBlock { addr, len });
        };

        log::trace!("free {len} bytes at {ptr:p}");
        // SAFETY: the registry proves `ptr` was allocated here with `layout`.
        unsafe { dealloc(ptr, layout) };
    }
}

impl Drop for SystemAllocator {
    fn drop(&mut self) {
        let registry = self.registry.get_mut();
        if registry.blocks.is_empty() {
            return;
        }

        log::warn!(
            "SystemAllocator dropped with {} live blocks ({} bytes); releasing them",
            registry.stats.live_blocks,
            registry.stats.live_bytes,
        );
        for (addr, layout) in registry.blocks.drain() {
            // SAFETY: every registered block is a live allocation with `layout`.
            unsafe { dealloc(core::ptr::with_exposed_provenance_mut(addr), layout) };
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
