use core::fmt;
use core::ops::{Index, IndexMut};
use core::slice;

use bytemuck::{NoUninit, Pod};
use vc_view::{ByteView, ByteViewMut, ContractUnwrap, MemError, View, ViewMut, contract};

// -----------------------------------------------------------------------------
// FixedArray

/// An owned array of exactly `N` values, `N > 0`.
///
/// A thin wrapper around `[T; N]` whose accessors go through the same
/// bounds checks as [`View`]: an out-of-range index or slice is a contract
/// violation rather than a plain panic. Since it can never be empty,
/// [`first`](Self::first) and [`last`](Self::last) need no check.
///
/// `N == 0` is rejected at compile time, when `FixedArray::<T, 0>::new`
/// is instantiated.
///
/// # Examples
///
/// ```
/// use vc_utils::fixed_array;
///
/// let mut array = fixed_array![10, 20, 30, 40, 50];
/// array[4] += 5;
///
/// assert_eq!(*array.first(), 10);
/// assert_eq!(*array.last(), 55);
/// assert_eq!(array.slice(1, 3).as_slice(), &[20, 30]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedArray<T, const N: usize> {
    data: [T; N],
}

impl<T, const N: usize> FixedArray<T, N> {
    /// Number of elements, always `N`.
    pub const LEN: usize = N;

    /// Size of the array in bytes.
    pub const BYTE_SIZE: usize = vc_view::byte_size::<T>(N);

    /// Wraps `data`.
    #[inline]
    pub const fn new(data: [T; N]) -> Self {
        const { assert!(N > 0, "`FixedArray` must hold at least one element") };
        Self { data }
    }

    /// Unwraps the inner array.
    #[inline]
    pub fn into_inner(self) -> [T; N] {
        self.data
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn byte_size(&self) -> usize {
        Self::BYTE_SIZE
    }

    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.data
    }

    #[inline]
    pub const fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.data
    }

    /// Borrows the whole array as a [`View`].
    #[inline]
    pub const fn as_view(&self) -> View<'_, T> {
        View::from_array(&self.data)
    }

    /// Borrows the whole array as a [`ViewMut`].
    #[inline]
    pub const fn as_view_mut(&mut self) -> ViewMut<'_, T> {
        ViewMut::from_array(&mut self.data)
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    #[inline]
    pub const fn first(&self) -> &T {
        &self.data[0]
    }

    #[inline]
    pub const fn first_mut(&mut self) -> &mut T {
        &mut self.data[0]
    }

    #[inline]
    pub const fn last(&self) -> &T {
        &self.data[N - 1]
    }

    #[inline]
    pub const fn last_mut(&mut self) -> &mut T {
        &mut self.data[N - 1]
    }

    /// Returns a view of the elements `[start, end)`.
    ///
    /// # Panics
    ///
    /// Reports a contract violation unless `start < end <= N`.
    #[inline]
    #[track_caller]
    pub fn slice(&self, start: usize, end: usize) -> View<'_, T> {
        self.as_view().try_slice(start, end).contract_unwrap()
    }

    /// Returns a writable view of the elements `[start, end)`.
    ///
    /// # Panics
    ///
    /// Reports a contract violation unless `start < end <= N`.
    #[inline]
    #[track_caller]
    pub fn slice_mut(&mut self, start: usize, end: usize) -> ViewMut<'_, T> {
        let view = self.as_view_mut();
        view.try_into_slice(start, end).contract_unwrap()
    }

    /// Returns a view of the elements `[start, end)`.
    ///
    /// # Errors
    ///
    /// [`MemError::InvalidRange`] unless `start < end <= N`.
    #[inline]
    pub fn try_slice(&self, start: usize, end: usize) -> Result<View<'_, T>, MemError> {
        self.as_view().try_slice(start, end)
    }
}

impl<T: NoUninit, const N: usize> FixedArray<T, N> {
    /// Reinterprets the whole array as bytes.
    #[inline]
    pub const fn to_bytes(&self) -> ByteView<'_> {
        self.as_view().to_bytes()
    }

    /// Returns the bytes `[start, end)` of the array.
    ///
    /// Offsets are in bytes, not elements.
    ///
    /// # Panics
    ///
    /// Reports a contract violation unless `start < end <= BYTE_SIZE`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_utils::FixedArray;
    ///
    /// let array = FixedArray::new([0x0101_u16, 0x0202, 0x0303]);
    /// assert_eq!(array.byte_slice(2, 4).as_slice(), &[2, 2]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn byte_slice(&self, start: usize, end: usize) -> ByteView<'_> {
        self.to_bytes().try_slice(start, end).contract_unwrap()
    }
}

impl<T: Pod, const N: usize> FixedArray<T, N> {
    /// Reinterprets the whole array as writable bytes.
    #[inline]
    pub const fn to_bytes_mut(&mut self) -> ByteViewMut<'_> {
        ViewMut::from_array(&mut self.data).into_bytes_mut()
    }
}

impl<T: Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self::new(core::array::from_fn(|_| T::default()))
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        Self::new(data)
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.data).finish()
    }
}

impl<T, const N: usize> Index<usize> for FixedArray<T, N> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        match self.data.get(index) {
            Some(value) => value,
            None => contract::violated(MemError::OutOfBounds { index, len: N }),
        }
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedArray<T, N> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.data.get_mut(index) {
            Some(value) => value,
            None => contract::violated(MemError::OutOfBounds { index, len: N }),
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedArray<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedArray<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

impl<'a, T, const N: usize> From<&'a FixedArray<T, N>> for View<'a, T> {
    #[inline]
    fn from(array: &'a FixedArray<T, N>) -> Self {
        array.as_view()
    }
}

impl<'a, T, const N: usize> From<&'a mut FixedArray<T, N>> for ViewMut<'a, T> {
    #[inline]
    fn from(array: &'a mut FixedArray<T, N>) -> Self {
        array.as_view_mut()
    }
}

// -----------------------------------------------------------------------------
// fixed_array!

/// Builds a [`FixedArray`] from a list of values or a `[value; N]` repeat.
///
/// # Examples
///
/// ```
/// use vc_utils::{FixedArray, fixed_array};
///
/// let listed: FixedArray<i32, 3> = fixed_array![1, 2, 3];
/// let repeated = fixed_array![0_u8; 16];
///
/// assert_eq!(listed.len(), 3);
/// assert_eq!(repeated.byte_size(), 16);
/// ```
#[macro_export]
macro_rules! fixed_array {
    ($value:expr; $n:expr) => {
        $crate::FixedArray::new([$value; $n])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::FixedArray::new([$($value),+])
    };
}

// -----------------------------------------------------------------------------
// Tests
