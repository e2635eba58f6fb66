use bytemuck::{NoUninit, Pod};

use crate::{MemError, View, ViewMut};

// -----------------------------------------------------------------------------
// ByteView

/// A read-only view over raw bytes.
///
/// The common interchange format of the [`mem`](crate::mem) primitives:
/// any [`View`] over a plain-old-data type converts into one with
/// [`View::to_bytes`], keeping the same address and `byte_size()` as length.
///
/// # Examples
///
/// ```
/// use vc_view::{ByteView, View};
///
/// let x = [1_u16, 2, 3];
/// let bytes: ByteView<'_> = View::from(&x).to_bytes();
///
/// assert_eq!(bytes.len(), 6);
/// assert_eq!(bytes.as_ptr(), x.as_ptr().cast());
/// ```
pub type ByteView<'a> = View<'a, u8>;

/// A writable view over raw bytes.
///
/// Only views over [`Pod`] types convert into one, since any byte pattern
/// written through it must remain a valid `T`.
pub type ByteViewMut<'a> = ViewMut<'a, u8>;

// -----------------------------------------------------------------------------
// Typed -> bytes

impl<'a, T: NoUninit> View<'a, T> {
    /// Reinterprets the view as bytes, with `len == self.byte_size()`.
    ///
    /// A null view stays null.
    #[inline]
    pub const fn to_bytes(self) -> ByteView<'a> {
        // SAFETY: `T: NoUninit` has no padding, so every byte is initialized.
        unsafe { ByteView::from_raw_parts(self.as_ptr().cast::<u8>(), self.byte_size()) }
    }
}

impl<'a, T: NoUninit> ViewMut<'a, T> {
    /// Reinterprets the view as read-only bytes for the lifetime of `&self`.
    #[inline]
    pub const fn to_bytes(&self) -> ByteView<'_> {
        self.as_view().to_bytes()
    }
}

impl<'a, T: Pod> ViewMut<'a, T> {
    /// Reinterprets the view as writable bytes for the lifetime of `&mut self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_view::{ViewMut, mem};
    ///
    /// let mut x = [u32::MAX; 2];
    /// let mut view = ViewMut::from(&mut x);
    ///
    /// mem::zero(view.to_bytes_mut(), 0).unwrap();
    /// assert_eq!(x, [0, 0]);
    /// ```
    #[inline]
    pub const fn to_bytes_mut(&mut self) -> ByteViewMut<'_> {
        let len = self.byte_size();
        // SAFETY: `T: Pod` accepts any byte pattern; `&mut self` is exclusive.
        unsafe { ByteViewMut::from_raw_parts(self.as_mut_ptr().cast::<u8>(), len) }
    }

    /// Converts into writable bytes with the full lifetime `'a`.
    #[inline]
    pub const fn into_bytes_mut(mut self) -> ByteViewMut<'a> {
        let len = self.byte_size();
        // SAFETY: `T: Pod` accepts any byte pattern; `self` is consumed.
        unsafe { ByteViewMut::from_raw_parts(self.as_mut_ptr().cast::<u8>(), len) }
    }
}

// -----------------------------------------------------------------------------
// Bytes -> typed

impl<'a> ByteView<'a> {
    /// Reinterprets the bytes as a view of `T`.
    ///
    /// # Errors
    ///
    /// [`MemError::Cast`] if the address is misaligned for `T` or the length
    /// is not a multiple of `size_of::<T>()`. An empty view always succeeds,
    /// whatever its address.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_view::View;
    ///
    /// let x = [7_u32, 8];
    /// let bytes = View::from(&x).to_bytes();
    ///
    /// assert_eq!(bytes.cast::<u32>().unwrap().as_slice(), &[7, 8]);
    /// assert!(bytes.slice(0, 3).cast::<u32>().is_err());
    /// ```
    pub fn cast<T: Pod>(self) -> Result<View<'a, T>, MemError> {
        if self.is_null() {
            return Ok(View::new());
        }
        if self.is_empty() {
            return Ok(View::from_slice(&[]));
        }
        bytemuck::try_cast_slice::<u8, T>(self.as_slice())
            .map(View::from_slice)
            .map_err(|_| MemError::Cast {
                len: self.len(),
                type_name: core::any::type_name::<T>(),
            })
    }

    /// Returns the bytes covering the elements `[start, end)` of a `T` array.
    ///
    /// # Errors
    ///
    /// [`MemError::InvalidRange`] if the byte range is empty or exceeds `len`.
    pub fn try_element_range<T>(self, start: usize, end: usize) -> Result<Self, MemError> {
        let size = size_of::<T>();
        match (start.checked_mul(size), end.checked_mul(size)) {
            (Some(from), Some(to)) => self.try_slice(from, to),
            _ => Err(MemError::InvalidRange {
                start,
                end,
                len: self.len(),
            }),
        }
    }
}

impl<'a> ByteViewMut<'a> {
    /// Reinterprets the bytes as a writable view of `T`.
    ///
    /// # Errors
    ///
    /// [`MemError::Cast`] if the address is misaligned for `T` or the length
    /// is not a multiple of `size_of::<T>()`. Empty views always succeed.
    pub fn cast_mut<T: Pod>(self) -> Result<ViewMut<'a, T>, MemError> {
        if self.is_null() {
            return Ok(ViewMut::new());
        }
        if self.is_empty() {
            return Ok(ViewMut::from_slice(&mut []));
        }
        let len = self.len();
        bytemuck::try_cast_slice_mut::<u8, T>(self.into_mut_slice())
            .map(ViewMut::from_slice)
            .map_err(|_| MemError::Cast {
                len,
                type_name: core::any::type_name::<T>(),
            })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::{ByteView, ByteViewMut, MemError, View, ViewMut};

    #[test]
    fn to_bytes_aliases_memory() {
        let x = [0x0102_0304_u32, 0x0506_0708];
        let view = View::from(&x);
        let bytes = view.to_bytes();

        assert_eq!(bytes.len(), view.byte_size());
        assert_eq!(bytes.as_ptr(), view.as_ptr().cast::<u8>());
        assert_eq!(bytes.as_slice(), bytemuck::cast_slice::<u32, u8>(&x));
    }

    #[test]
    fn null_stays_null() {
        let bytes = View::<u64>::new().to_bytes();
        assert!(bytes.is_null());
        assert_eq!(bytes.len(), 0);
        assert!(bytes.cast::<u64>().unwrap().is_null());
    }

    #[test]
    fn writable_bytes() {
        let mut x = [0_u16; 2];
        let mut view = ViewMut::from(&mut x);
        {
            let mut bytes = view.to_bytes_mut();
            bytes[0] = 0xFF;
            bytes[1] = 0xFF;
        }
        assert_eq!(view.to_bytes().len(), 4);
        assert_eq!(x, [u16::MAX, 0]);
    }

    #[test]
    fn cast_round_trip() {
        let mut x = [1_u32, 2, 3];
        let bytes = ViewMut::from(&mut x).into_bytes_mut();
        let mut typed = bytes.cast_mut::<u32>().unwrap();
        typed[2] = 30;
        assert_eq!(x, [1, 2, 30]);
    }

    #[test]
    fn cast_rejects_odd_length() {
        let x = [0_u8; 5];
        let err = ByteView::from(&x).cast::<u16>().unwrap_err();
        let expected = MemError::Cast {
            len: 5,
            type_name: "u16",
        };
        assert_eq!(err, expected);
    }

    #[test]
    fn empty_cast_ignores_alignment() {
        let mut x = [0_u32; 2];
        let bytes = View::from(&x).to_bytes();
        let odd = ByteView::from(&bytes.as_slice()[1..1]);
        assert_eq!(odd.as_ptr().addr() % 4, 1);

        let typed = odd.cast::<u32>().unwrap();
        assert!(typed.is_empty());
        assert!(!typed.is_null());

        let bytes = ViewMut::from(&mut x).into_bytes_mut();
        let odd = ByteViewMut::from(&mut bytes.into_mut_slice()[3..3]);
        let typed = odd.cast_mut::<u32>().unwrap();
        assert_eq!(typed.len(), 0);
        assert!(typed.as_ptr().is_aligned());
    }

    #[test]
    fn element_range() {
        let x = [1_u32, 2, 3, 4];
        let bytes = View::from(&x).to_bytes();
        let middle = bytes.try_element_range::<u32>(1, 3).unwrap();
        assert_eq!(middle.len(), 8);
        assert_eq!(middle.cast::<u32>().unwrap().as_slice(), &[2, 3]);
        assert!(bytes.try_element_range::<u32>(3, 5).is_err());
    }
}
