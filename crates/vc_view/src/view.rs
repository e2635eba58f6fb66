use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut, Range};
use core::ptr;
use core::slice;

use crate::{ContractUnwrap, MemError};

// -----------------------------------------------------------------------------
// Common methods

macro_rules! impl_view {
    ($view:ident) => {
        impl<T> $view<'_, T> {
            /// Returns the number of elements in the view.
            #[inline(always)]
            pub const fn len(&self) -> usize {
                self.len
            }

            /// Returns `true` if the view has no elements.
            ///
            /// A null view is empty, but so is a non-null view of length `0`.
            #[inline(always)]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            /// Returns `true` if the view has no backing pointer.
            #[inline(always)]
            pub const fn is_null(&self) -> bool {
                self.ptr.is_null()
            }

            /// Returns `len * size_of::<T>()`.
            #[inline(always)]
            pub const fn byte_size(&self) -> usize {
                crate::byte_size::<T>(self.len)
            }

            /// Returns the half-open pointer range spanning the view.
            ///
            /// Both pointers are null for a null view.
            #[inline]
            pub fn as_ptr_range(&self) -> Range<*const T> {
                let start = self.ptr as *const T;
                // `wrapping_add` keeps this well defined for null views.
                start..start.wrapping_add(self.len)
            }

            #[inline(always)]
            const fn check_index(&self, index: usize) -> Result<(), MemError> {
                if index < self.len {
                    Ok(())
                } else {
                    Err(MemError::OutOfBounds {
                        index,
                        len: self.len,
                    })
                }
            }

            #[inline(always)]
            const fn check_range(&self, start: usize, end: usize) -> Result<(), MemError> {
                if start < end && end <= self.len {
                    Ok(())
                } else {
                    Err(MemError::InvalidRange {
                        start,
                        end,
                        len: self.len,
                    })
                }
            }
        }

        impl<T> Default for $view<'_, T> {
            #[inline(always)]
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> fmt::Pointer for $view<'_, T> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Pointer::fmt(&self.ptr, f)
            }
        }

        impl<T> fmt::Debug for $view<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:p}, {})", stringify!($view), self.ptr, self.len)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// View

/// A read-only, non-owning view over `len` contiguous values of `T`.
///
/// Like `&'a [T]`, but it may be null and every access is checked.
///
/// # Examples
///
/// ```
/// use vc_view::View;
///
/// let x = [10, 20, 30, 40, 50];
/// let view = View::from(&x).slice(1, 4);
///
/// assert_eq!(view.len(), 3);
/// assert_eq!(view[1], 30);
/// assert_eq!(view.as_slice(), &[20, 30, 40]);
/// ```
pub struct View<'a, T> {
    ptr: *const T,
    len: usize,
    _marker: PhantomData<&'a [T]>,
}

impl_view!(View);

impl<T> Clone for View<'_, T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T> {}

// SAFETY: `View<'a, T>` behaves like `&'a [T]`.
unsafe impl<T: Sync> Send for View<'_, T> {}
// SAFETY: `View<'a, T>` behaves like `&'a [T]`.
unsafe impl<T: Sync> Sync for View<'_, T> {}

impl<'a, T> View<'a, T> {
    /// Creates a null view of length `0`.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            ptr: ptr::null(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a view from a raw pointer and an element count.
    ///
    /// No validation is performed.
    ///
    /// # Safety
    ///
    /// If `len > 0`, `ptr` must be non-null, aligned, and valid for reads of
    /// `len` initialized values of `T` that are not mutated during `'a`.
    #[inline(always)]
    pub const unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Creates a view over a slice.
    #[inline(always)]
    pub const fn from_slice(slice: &'a [T]) -> Self {
        Self {
            ptr: slice.as_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Creates a view over a fixed-size array, with `len == N`.
    #[inline(always)]
    pub const fn from_array<const N: usize>(array: &'a [T; N]) -> Self {
        Self {
            ptr: array.as_ptr(),
            len: N,
            _marker: PhantomData,
        }
    }

    /// Acquires the underlying pointer, which may be null.
    #[inline(always)]
    pub const fn as_ptr(self) -> *const T {
        self.ptr
    }

    /// Borrows the view as a slice. A null view yields an empty slice.
    #[inline]
    pub const fn as_slice(self) -> &'a [T] {
        if self.ptr.is_null() {
            &[]
        } else {
            // SAFETY: guaranteed by the constructor.
            unsafe { slice::from_raw_parts(self.ptr, self.len) }
        }
    }

    /// Returns an iterator over the elements.
    ///
    /// Each call starts again from the first element.
    #[inline]
    pub fn iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(self, index: usize) -> Option<&'a T> {
        self.try_get(index).ok()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`MemError::OutOfBounds`] if `index >= len`.
    #[inline]
    pub fn try_get(self, index: usize) -> Result<&'a T, MemError> {
        self.check_index(index)?;
        // SAFETY: `index` is in-bounds.
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// Returns the element at `index` without doing bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be in-bounds.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get_unchecked(self, index: usize) -> &'a T {
        #[cfg(debug_assertions)]
        self.check_index(index).contract_unwrap();

        // SAFETY: `index` is in-bounds so the resulting pointer is valid to deref.
        unsafe { &*self.ptr.add(index) }
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if the view is empty.
    #[inline]
    #[track_caller]
    pub fn first(self) -> &'a T {
        self.try_first().contract_unwrap()
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if the view is empty.
    #[inline]
    #[track_caller]
    pub fn last(self) -> &'a T {
        self.try_last().contract_unwrap()
    }

    /// Returns the first element, or [`MemError::OutOfBounds`] if empty.
    #[inline]
    pub fn try_first(self) -> Result<&'a T, MemError> {
        self.try_get(0)
    }

    /// Returns the last element, or [`MemError::OutOfBounds`] if empty.
    #[inline]
    pub fn try_last(self) -> Result<&'a T, MemError> {
        match self.len.checked_sub(1) {
            Some(index) => self.try_get(index),
            None => Err(MemError::OutOfBounds { index: 0, len: 0 }),
        }
    }

    /// Returns a view aliasing `[start, end)`.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if `start >= end` or `end > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_view::View;
    ///
    /// let x = [1, 2, 3, 4];
    /// let view = View::from(&x);
    ///
    /// assert_eq!(view.slice(1, 3).as_slice(), &[2, 3]);
    /// assert!(view.try_slice(2, 2).is_err());
    /// ```
    #[inline]
    #[track_caller]
    pub fn slice(self, start: usize, end: usize) -> Self {
        self.try_slice(start, end).contract_unwrap()
    }

    /// Returns a view aliasing `[start, len)`.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if `start >= len`.
    #[inline]
    #[track_caller]
    pub fn slice_from(self, start: usize) -> Self {
        self.try_slice(start, self.len).contract_unwrap()
    }

    /// Fallible version of [`slice`](Self::slice).
    ///
    /// # Errors
    ///
    /// [`MemError::InvalidRange`] if `start >= end` or `end > len`.
    #[inline]
    pub fn try_slice(self, start: usize, end: usize) -> Result<Self, MemError> {
        self.check_range(start, end)?;
        // SAFETY: `[start, end)` lies inside the view.
        Ok(unsafe { Self::from_raw_parts(self.ptr.add(start), end - start) })
    }

    /// Fallible version of [`slice_from`](Self::slice_from).
    #[inline]
    pub fn try_slice_from(self, start: usize) -> Result<Self, MemError> {
        self.try_slice(start, self.len)
    }
}

impl<T> Index<usize> for View<'_, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.try_get(index).contract_unwrap()
    }
}

impl<'a, T> IntoIterator for View<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> From<&'a [T]> for View<'a, T> {
    #[inline]
    fn from(slice: &'a [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for View<'a, T> {
    #[inline]
    fn from(array: &'a [T; N]) -> Self {
        Self::from_array(array)
    }
}

impl<'a, T> From<ViewMut<'a, T>> for View<'a, T> {
    #[inline]
    fn from(view: ViewMut<'a, T>) -> Self {
        view.into_view()
    }
}

// -----------------------------------------------------------------------------
// ViewMut

/// A writable, non-owning view over `len` contiguous values of `T`.
///
/// Like `&'a mut [T]`, but it may be null and every access is checked.
/// It cannot be copied; use [`reborrow`](Self::reborrow) to pass it on
/// and keep using it afterwards.
///
/// # Examples
///
/// ```
/// use vc_view::ViewMut;
///
/// let mut x = [1, 2, 3];
/// let mut view = ViewMut::from(&mut x);
///
/// view[1] = 20;
/// *view.last_mut() += 1;
///
/// assert_eq!(x, [1, 20, 4]);
/// ```
pub struct ViewMut<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl_view!(ViewMut);

// SAFETY: `ViewMut<'a, T>` behaves like `&'a mut [T]`.
unsafe impl<T: Send> Send for ViewMut<'_, T> {}
// SAFETY: `ViewMut<'a, T>` behaves like `&'a mut [T]`.
unsafe impl<T: Sync> Sync for ViewMut<'_, T> {}

impl<'a, T> ViewMut<'a, T> {
    /// Creates a null view of length `0`.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a view from a raw pointer and an element count.
    ///
    /// No validation is performed.
    ///
    /// # Safety
    ///
    /// If `len > 0`, `ptr` must be non-null, aligned, and valid for reads and
    /// writes of `len` initialized values of `T`, and no other reference may
    /// access that memory during `'a`.
    #[inline(always)]
    pub const unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Creates a view over a mutable slice.
    #[inline(always)]
    pub const fn from_slice(slice: &'a mut [T]) -> Self {
        Self {
            len: slice.len(),
            ptr: slice.as_mut_ptr(),
            _marker: PhantomData,
        }
    }

    /// Creates a view over a fixed-size array, with `len == N`.
    #[inline(always)]
    pub const fn from_array<const N: usize>(array: &'a mut [T; N]) -> Self {
        Self {
            ptr: array.as_mut_ptr(),
            len: N,
            _marker: PhantomData,
        }
    }

    /// Acquires the underlying pointer, which may be null.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Acquires the underlying mutable pointer, which may be null.
    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// Borrows the elements read-only for the lifetime of `&self`.
    #[inline(always)]
    pub const fn as_view(&self) -> View<'_, T> {
        // SAFETY: `&self` keeps the memory from being written meanwhile.
        unsafe { View::from_raw_parts(self.ptr, self.len) }
    }

    /// Converts into a read-only view with the full lifetime `'a`.
    #[inline(always)]
    pub const fn into_view(self) -> View<'a, T> {
        // SAFETY: `self` is consumed, so nothing can write through it anymore.
        unsafe { View::from_raw_parts(self.ptr, self.len) }
    }

    /// Re-borrows the view for a shorter lifetime.
    #[inline(always)]
    pub const fn reborrow(&mut self) -> ViewMut<'_, T> {
        ViewMut {
            ptr: self.ptr,
            len: self.len,
            _marker: PhantomData,
        }
    }

    /// Borrows the view as a slice. A null view yields an empty slice.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        self.as_view().as_slice()
    }

    /// Borrows the view as a mutable slice. A null view yields an empty slice.
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        if self.ptr.is_null() {
            &mut []
        } else {
            // SAFETY: guaranteed by the constructor.
            unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
        }
    }

    /// Converts into a mutable slice with the full lifetime `'a`.
    #[inline]
    pub const fn into_mut_slice(self) -> &'a mut [T] {
        if self.ptr.is_null() {
            &mut []
        } else {
            // SAFETY: guaranteed by the constructor, `self` is consumed.
            unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
        }
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_view().get(index)
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.try_get_mut(index).ok()
    }

    /// Returns the element at `index`, or [`MemError::OutOfBounds`].
    #[inline]
    pub fn try_get(&self, index: usize) -> Result<&T, MemError> {
        self.as_view().try_get(index)
    }

    /// Returns the element at `index`, or [`MemError::OutOfBounds`].
    #[inline]
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, MemError> {
        self.check_index(index)?;
        // SAFETY: `index` is in-bounds.
        Ok(unsafe { self.get_unchecked_mut(index) })
    }

    /// Returns the element at `index` without doing bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be in-bounds.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        #[cfg(debug_assertions)]
        self.check_index(index).contract_unwrap();

        // SAFETY: `index` is in-bounds so the resulting pointer is valid to deref.
        unsafe { &mut *self.ptr.add(index) }
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if the view is empty.
    #[inline]
    #[track_caller]
    pub fn first(&self) -> &T {
        self.as_view().try_first().contract_unwrap()
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if the view is empty.
    #[inline]
    #[track_caller]
    pub fn last(&self) -> &T {
        self.as_view().try_last().contract_unwrap()
    }

    /// Mutable version of [`first`](Self::first).
    #[inline]
    #[track_caller]
    pub fn first_mut(&mut self) -> &mut T {
        self.try_get_mut(0).contract_unwrap()
    }

    /// Mutable version of [`last`](Self::last).
    #[inline]
    #[track_caller]
    pub fn last_mut(&mut self) -> &mut T {
        let index = self.len.saturating_sub(1);
        self.try_get_mut(index).contract_unwrap()
    }

    /// Returns a read-only view aliasing `[start, end)`.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if `start >= end` or `end > len`.
    #[inline]
    #[track_caller]
    pub fn slice(&self, start: usize, end: usize) -> View<'_, T> {
        self.as_view().try_slice(start, end).contract_unwrap()
    }

    /// Returns a writable view aliasing `[start, end)`.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if `start >= end` or `end > len`.
    #[inline]
    #[track_caller]
    pub fn slice_mut(&mut self, start: usize, end: usize) -> ViewMut<'_, T> {
        self.reborrow().try_into_slice(start, end).contract_unwrap()
    }

    /// Returns a writable view aliasing `[start, len)`.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if `start >= len`.
    #[inline]
    #[track_caller]
    pub fn slice_from_mut(&mut self, start: usize) -> ViewMut<'_, T> {
        let len = self.len;
        self.reborrow().try_into_slice(start, len).contract_unwrap()
    }

    /// Narrows this view to `[start, end)`, keeping the lifetime `'a`.
    ///
    /// # Panics
    ///
    /// Reports a contract violation if `start >= end` or `end > len`.
    #[inline]
    #[track_caller]
    pub fn into_slice(self, start: usize, end: usize) -> Self {
        self.try_into_slice(start, end).contract_unwrap()
    }

    /// Fallible version of [`into_slice`](Self::into_slice).
    ///
    /// # Errors
    ///
    /// [`MemError::InvalidRange`] if `start >= end` or `end > len`.
    #[inline]
    pub fn try_into_slice(self, start: usize, end: usize) -> Result<Self, MemError> {
        self.check_range(start, end)?;
        // SAFETY: `[start, end)` lies inside the view, `self` is consumed.
        Ok(unsafe { Self::from_raw_parts(self.ptr.add(start), end - start) })
    }
}

impl<T> Index<usize> for ViewMut<'_, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.try_get(index).contract_unwrap()
    }
}

impl<T> IndexMut<usize> for ViewMut<'_, T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).contract_unwrap()
    }
}

impl<'a, T> IntoIterator for ViewMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.into_mut_slice().iter_mut()
    }
}

impl<'s, T> IntoIterator for &'s ViewMut<'_, T> {
    type Item = &'s T;
    type IntoIter = slice::Iter<'s, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'s, T> IntoIterator for &'s mut ViewMut<'_, T> {
    type Item = &'s mut T;
    type IntoIter = slice::IterMut<'s, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, T> From<&'a mut [T]> for ViewMut<'a, T> {
    #[inline]
    fn from(slice: &'a mut [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for ViewMut<'a, T> {
    #[inline]
    fn from(array: &'a mut [T; N]) -> Self {
        Self::from_array(array)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{View, ViewMut};
    use crate::{ContractUnwrap, MemError};
    use std::vec::Vec;

    #[test]
    fn is_sync_send() {
        use core::panic::{RefUnwindSafe, UnwindSafe};

        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}
        fn is_unwindsafe<T: UnwindSafe>() {}
        fn is_refunwindsafe<T: RefUnwindSafe>() {}

        is_send::<View<'_, i32>>();
        is_sync::<View<'_, i32>>();
        is_unwindsafe::<View<'_, i32>>();
        is_refunwindsafe::<View<'_, i32>>();

        is_send::<ViewMut<'_, i32>>();
        is_sync::<ViewMut<'_, i32>>();
        is_refunwindsafe::<ViewMut<'_, i32>>();
    }

    #[test]
    fn null_view() {
        let view = View::<u32>::new();
        assert!(view.is_null());
        assert!(view.is_empty());
        assert_eq!(view.byte_size(), 0);
        assert_eq!(view.as_slice(), &[] as &[u32]);
        assert_eq!(view.iter().count(), 0);
        assert_eq!(
            view.try_first(),
            Err(MemError::OutOfBounds { index: 0, len: 0 })
        );

        let view = ViewMut::<u32>::default();
        assert!(view.is_null());
    }

    #[test]
    fn empty_but_assigned() {
        let x: [u64; 0] = [];
        let view = View::from(&x);
        assert!(!view.is_null());
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn size_and_byte_size() {
        let x = [0_u32; 7];
        let view = View::from(&x);
        assert_eq!(view.len(), 7);
        assert_eq!(view.byte_size(), 28);

        let y = [0_u16; 3];
        let view = unsafe { View::from_raw_parts(y.as_ptr(), 2) };
        assert_eq!(view.len(), 2);
        assert_eq!(view.byte_size(), 4);
    }

    #[test]
    fn aliasing_identity() {
        let mut x = [1, 2, 3, 4];
        let mut view = ViewMut::from(&mut x);
        for i in 0..view.len() {
            view[i] *= 10;
        }
        assert!(core::ptr::eq(&view[2], view.as_ptr().wrapping_add(2)));
        assert_eq!(x, [10, 20, 30, 40]);
    }

    #[test]
    fn slice_scenario() {
        let arr = [10, 20, 30, 40, 50];
        let view = View::from(&arr).slice(1, 4);

        assert_eq!(view.len(), 3);
        assert_eq!(view.as_slice(), &[20, 30, 40]);
        assert_eq!(view[1], 30);
        assert_eq!(
            view.try_get(3),
            Err(MemError::OutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn slice_matches_parent() {
        let arr: Vec<i32> = (0..16).collect();
        let view = View::from(arr.as_slice());
        for a in 0..arr.len() {
            for b in (a + 1)..=arr.len() {
                let sub = view.slice(a, b);
                assert_eq!(sub.len(), b - a);
                for k in 0..sub.len() {
                    assert_eq!(sub[k], view[a + k]);
                }
            }
        }
    }

    #[test]
    fn slice_rejects_bad_ranges() {
        let arr = [1, 2, 3];
        let view = View::from(&arr);
        assert_eq!(
            view.try_slice(2, 2).unwrap_err(),
            MemError::InvalidRange {
                start: 2,
                end: 2,
                len: 3,
            }
        );
        assert!(view.try_slice(2, 1).is_err());
        assert!(view.try_slice(0, 4).is_err());
        assert!(view.try_slice_from(3).is_err());
        assert_eq!(view.slice_from(1).as_slice(), &[2, 3]);
    }

    #[test]
    #[should_panic(expected = "index 3 is out of range for a view of length 3")]
    fn index_out_of_range() {
        let arr = [10, 20, 30, 40, 50];
        let view = View::from(&arr).slice(1, 4);
        let _value = view[3];
    }

    #[test]
    #[should_panic(expected = "range 1..1 is invalid")]
    fn empty_slice_fails() {
        let arr = [1, 2];
        View::from(&arr).slice(1, 1);
    }

    #[test]
    #[should_panic(expected = "index 0 is out of range for a view of length 0")]
    fn last_of_empty_fails() {
        View::<u8>::new().last();
    }

    #[test]
    fn first_and_last() {
        let mut x = [3, 4, 5];
        let mut view = ViewMut::from(&mut x);
        assert_eq!(*view.first(), 3);
        assert_eq!(*view.last(), 5);
        *view.first_mut() = 0;
        assert_eq!(x[0], 0);
    }

    #[test]
    fn iteration_restarts() {
        let x = [1, 2, 3];
        let view = View::from(&x);
        let a: i32 = view.iter().sum();
        let b: i32 = view.into_iter().sum();
        assert_eq!(a, b);

        let range = view.as_ptr_range();
        assert_eq!(unsafe { range.end.offset_from(range.start) }, 3);
    }

    #[test]
    fn mut_to_const() {
        let mut x = [1, 2, 3];
        let view = ViewMut::from(&mut x);
        let ptr = view.as_ptr();
        let view: View<'_, i32> = view.into();
        assert_eq!(view.as_ptr(), ptr);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn slice_mut_writes_through() {
        let mut x = [0_u8; 5];
        let mut view = ViewMut::from(&mut x);
        for v in view.slice_mut(1, 3).iter_mut() {
            *v = 9;
        }
        view.slice_from_mut(4)[0] = 7;
        assert_eq!(x, [0, 9, 9, 0, 7]);
    }

    #[test]
    fn unchecked_access() {
        let x = [5, 6];
        let view = View::from(&x);
        assert_eq!(unsafe { *view.get_unchecked(1) }, 6);
        assert_eq!(*view.try_get(0).contract_unwrap(), 5);
        assert_eq!(view.get(2), None);
    }

    #[test]
    #[should_panic(expected = "index 3 is out of range for a view of length 3")]
    fn mut_index_out_of_range() {
        let mut x = [1, 2, 3];
        let mut view = ViewMut::from(&mut x);
        view[3] = 4;
    }

    #[test]
    #[should_panic(expected = "index 0 is out of range for a view of length 0")]
    fn first_mut_of_empty_fails() {
        let mut view = ViewMut::<u8>::new();
        *view.first_mut() = 1;
    }

    #[test]
    #[should_panic(expected = "index 0 is out of range for a view of length 0")]
    fn last_mut_of_empty_fails() {
        let mut x: [u8; 0] = [];
        let mut view = ViewMut::from(&mut x);
        *view.last_mut() = 1;
    }

    #[test]
    #[should_panic(expected = "range 2..2 is invalid for a view of length 4")]
    fn slice_mut_empty_range_fails() {
        let mut x = [0_u8; 4];
        let mut view = ViewMut::from(&mut x);
        view.slice_mut(2, 2);
    }

    #[test]
    #[should_panic(expected = "range 1..5 is invalid for a view of length 4")]
    fn slice_mut_past_end_fails() {
        let mut x = [0_u8; 4];
        let mut view = ViewMut::from(&mut x);
        view.slice_mut(1, 5);
    }

    #[test]
    #[should_panic(expected = "range 4..4 is invalid for a view of length 4")]
    fn slice_from_mut_at_end_fails() {
        let mut x = [0_u8; 4];
        let mut view = ViewMut::from(&mut x);
        view.slice_from_mut(4);
    }

    #[test]
    #[should_panic(expected = "range 3..1 is invalid for a view of length 4")]
    fn into_slice_reversed_fails() {
        let mut x = [0_u8; 4];
        ViewMut::from(&mut x).into_slice(3, 1);
    }

    #[test]
    fn mut_fallible_access() {
        let mut x = [1, 2, 3];
        let mut view = ViewMut::from(&mut x);
        assert_eq!(
            view.try_get_mut(3).unwrap_err(),
            MemError::OutOfBounds { index: 3, len: 3 }
        );
        assert!(view.get_mut(3).is_none());
        *view.try_get_mut(2).unwrap() = 30;

        assert_eq!(
            view.reborrow().try_into_slice(1, 1).unwrap_err(),
            MemError::InvalidRange {
                start: 1,
                end: 1,
                len: 3,
            }
        );
        assert_eq!(
            view.reborrow().try_into_slice(0, 4).unwrap_err(),
            MemError::InvalidRange {
                start: 0,
                end: 4,
                len: 3,
            }
        );
        assert!(view.reborrow().try_into_slice(2, 1).is_err());

        let tail = view.try_into_slice(1, 3).unwrap();
        assert_eq!(tail.as_slice(), &[2, 30]);
        assert_eq!(x, [1, 2, 30]);
    }

    #[test]
    fn empty_mut_fallible_access() {
        let mut view = ViewMut::<u16>::new();
        assert_eq!(
            view.try_get_mut(0).unwrap_err(),
            MemError::OutOfBounds { index: 0, len: 0 }
        );
        assert!(view.reborrow().try_into_slice(0, 0).is_err());
        assert!(view.get(0).is_none());
    }
}
