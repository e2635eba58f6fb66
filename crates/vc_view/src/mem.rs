//! Byte-level memory primitives.
//!
//! These functions are the only place where raw memory is written or
//! compared. They take [`ByteView`]s, so any view over a plain-old-data
//! type can be passed after a `to_bytes` conversion.
//!
//! Every function rejects null views with [`MemError::NullPointer`]. An
//! empty but non-null view is valid input.

use core::cmp::Ordering;
use core::ops::Range;
use core::ptr;

use bytemuck::Pod;

use crate::{ByteView, ByteViewMut, MemError, View, ViewMut};

/// Size in bytes of `count` values of `T`.
///
/// # Examples
///
/// ```
/// assert_eq!(vc_view::byte_size::<u32>(3), 12);
/// assert_eq!(vc_view::byte_size::<()>(3), 0);
/// ```
#[inline(always)]
pub const fn byte_size<T>(count: usize) -> usize {
    count * size_of::<T>()
}

#[inline(always)]
const fn ensure_usable<T>(view: &View<'_, T>) -> Result<(), MemError> {
    if view.is_null() {
        Err(MemError::NullPointer)
    } else {
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// zero

/// Fills every byte of `dst` with `fill`.
///
/// # Errors
///
/// [`MemError::NullPointer`] if `dst` is null.
///
/// # Examples
///
/// ```
/// use vc_view::{ViewMut, mem};
///
/// let mut x = [1_u8, 2, 3];
/// mem::zero(ViewMut::from(&mut x), 0xAB).unwrap();
///
/// assert_eq!(x, [0xAB; 3]);
/// ```
pub fn zero(mut dst: ByteViewMut<'_>, fill: u8) -> Result<(), MemError> {
    ensure_usable(&dst.as_view())?;
    dst.as_mut_slice().fill(fill);
    Ok(())
}

// -----------------------------------------------------------------------------
// copy

/// Copies all of `src` into the front of `dst`.
///
/// Nothing is written unless the whole copy can be performed.
///
/// The two views must not overlap. Views built from Rust references never
/// do; for regions of the same buffer use [`copy_within`].
///
/// # Errors
///
/// - [`MemError::NullPointer`] if either view is null.
/// - [`MemError::Capacity`] if `dst` is shorter than `src`.
///
/// # Examples
///
/// ```
/// use vc_view::{View, ViewMut, mem};
///
/// let src = [1_u8, 2, 3, 4];
/// let mut dst = [0_u8; 6];
///
/// mem::copy(ViewMut::from(&mut dst), View::from(&src)).unwrap();
/// assert_eq!(dst, [1, 2, 3, 4, 0, 0]);
/// ```
pub fn copy(mut dst: ByteViewMut<'_>, src: ByteView<'_>) -> Result<(), MemError> {
    ensure_usable(&dst.as_view())?;
    ensure_usable(&src)?;

    if dst.len() < src.len() {
        return Err(MemError::Capacity {
            required: src.len(),
            available: dst.len(),
        });
    }

    // SAFETY: both views are valid for `src.len()` bytes and do not overlap.
    unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), dst.as_mut_ptr(), src.len());
    }
    Ok(())
}

/// Moves the bytes in `src` to offset `dest` of the same view.
///
/// The regions may overlap.
///
/// # Errors
///
/// - [`MemError::NullPointer`] if `buf` is null.
/// - [`MemError::InvalidRange`] if `src` is reversed or exceeds the view.
/// - [`MemError::Capacity`] if `dest + src.len()` exceeds the view.
///
/// # Examples
///
/// ```
/// use vc_view::{ViewMut, mem};
///
/// let mut x = [1_u8, 2, 3, 4, 5];
/// mem::copy_within(ViewMut::from(&mut x), 0..3, 2).unwrap();
///
/// assert_eq!(x, [1, 2, 1, 2, 3]);
/// ```
pub fn copy_within(
    mut buf: ByteViewMut<'_>,
    src: Range<usize>,
    dest: usize,
) -> Result<(), MemError> {
    ensure_usable(&buf.as_view())?;

    let len = buf.len();
    if src.start > src.end || src.end > len {
        return Err(MemError::InvalidRange {
            start: src.start,
            end: src.end,
            len,
        });
    }

    let count = src.end - src.start;
    if dest.checked_add(count).is_none_or(|end| end > len) {
        return Err(MemError::Capacity {
            required: dest.saturating_add(count),
            available: len,
        });
    }

    buf.as_mut_slice().copy_within(src, dest);
    Ok(())
}

/// Copies all elements of `src` into the front of `dst`.
///
/// Delegates to [`copy`] over the byte views.
///
/// # Errors
///
/// Same as [`copy`]; capacity is reported in bytes.
pub fn copy_elements<T: Pod>(mut dst: ViewMut<'_, T>, src: View<'_, T>) -> Result<(), MemError> {
    copy(dst.to_bytes_mut(), src.to_bytes())
}

// -----------------------------------------------------------------------------
// compare

/// Compares two byte views lexicographically.
///
/// The first `min(a.len(), b.len())` bytes decide; if they are all equal the
/// shorter view orders first.
///
/// # Errors
///
/// [`MemError::NullPointer`] if either view is null.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use vc_view::{ByteView, mem};
///
/// let a = ByteView::from(&[1, 2, 3]);
/// let b = ByteView::from(&[1, 2]);
///
/// assert_eq!(mem::compare(a, b), Ok(Ordering::Greater));
/// assert_eq!(mem::compare(b, a), Ok(Ordering::Less));
/// assert_eq!(mem::compare(a, a), Ok(Ordering::Equal));
/// ```
pub fn compare(a: ByteView<'_>, b: ByteView<'_>) -> Result<Ordering, MemError> {
    ensure_usable(&a)?;
    ensure_usable(&b)?;
    Ok(a.as_slice().cmp(b.as_slice()))
}

/// Returns `true` if both views have the same length and the same bytes.
///
/// # Errors
///
/// [`MemError::NullPointer`] if either view is null.
#[inline]
pub fn equal(a: ByteView<'_>, b: ByteView<'_>) -> Result<bool, MemError> {
    compare(a, b).map(Ordering::is_eq)
}

// -----------------------------------------------------------------------------
// search

/// Returns the index of the first element equal to `value`.
///
/// Uses `T: PartialEq`, not byte comparison.
///
/// # Errors
///
/// [`MemError::NullPointer`] if `view` is null.
///
/// # Examples
///
/// ```
/// use vc_view::{View, mem};
///
/// let x = [3.0, -0.0, 1.5];
/// let view = View::from(&x);
///
/// assert_eq!(mem::linear_search(view, &0.0), Ok(Some(1)));
/// assert_eq!(mem::linear_search(view, &2.0), Ok(None));
/// ```
pub fn linear_search<T: PartialEq>(
    view: View<'_, T>,
    value: &T,
) -> Result<Option<usize>, MemError> {
    ensure_usable(&view)?;
    Ok(view.iter().position(|item| item == value))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{compare, copy, copy_elements, copy_within, equal, linear_search, zero};
    use crate::{ByteView, ByteViewMut, MemError, View, ViewMut};
    use core::cmp::Ordering;

    const NULL: Result<(), MemError> = Err(MemError::NullPointer);

    #[test]
    fn zero_fills_every_byte() {
        for fill in [0_u8, 1, 0x7F, 0xFF] {
            let mut x = [0x55_u64; 3];
            let bytes = ViewMut::from(&mut x).into_bytes_mut();
            zero(bytes, fill).unwrap();

            let bytes = bytemuck::cast_slice::<u64, u8>(&x);
            assert!(bytes.iter().all(|b| *b == fill));
        }
    }

    #[test]
    fn zero_rejects_null() {
        assert_eq!(zero(ByteViewMut::new(), 0), NULL);

        let mut empty: [u8; 0] = [];
        assert_eq!(zero(ByteViewMut::from(&mut empty), 1), Ok(()));
    }

    #[test]
    fn copy_into_larger_destination() {
        let src = [1_u8, 2, 3, 4];
        let mut dst = [0_u8; 6];
        zero(ByteViewMut::from(&mut dst), 0).unwrap();

        copy(ByteViewMut::from(&mut dst), ByteView::from(&src)).unwrap();
        assert_eq!(dst, [1, 2, 3, 4, 0, 0]);

        let copied = ByteView::from(&dst).slice(0, src.len());
        let ordering = compare(copied, ByteView::from(&src));
        assert_eq!(ordering, Ok(Ordering::Equal));
    }

    #[test]
    fn copy_too_small_writes_nothing() {
        let src = [9_u8; 4];
        let mut dst = [0_u8; 3];
        let result = copy(ByteViewMut::from(&mut dst), ByteView::from(&src));

        let expected = MemError::Capacity {
            required: 4,
            available: 3,
        };
        assert_eq!(result, Err(expected));
        assert_eq!(dst, [0, 0, 0]);
    }

    #[test]
    fn copy_rejects_null() {
        let src = [1_u8];
        let mut dst = [0_u8; 1];
        assert_eq!(copy(ByteViewMut::new(), ByteView::from(&src)), NULL);
        assert_eq!(copy(ByteViewMut::from(&mut dst), ByteView::new()), NULL);
    }

    #[test]
    fn copy_typed_elements() {
        let src = [1.5_f32, 2.5];
        let mut dst = [0.0_f32; 3];
        copy_elements(ViewMut::from(&mut dst), View::from(&src)).unwrap();
        assert_eq!(dst, [1.5, 2.5, 0.0]);

        let short = ViewMut::from(&mut dst[..1]);
        let result = copy_elements(short, View::from(&src));

        let expected = MemError::Capacity {
            required: 8,
            available: 4,
        };
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn overlapping_move() {
        let mut x = [1_u8, 2, 3, 4, 5];
        copy_within(ByteViewMut::from(&mut x), 2..5, 0).unwrap();
        assert_eq!(x, [3, 4, 5, 4, 5]);

        assert!(matches!(
            copy_within(ByteViewMut::from(&mut x), 3..6, 0),
            Err(MemError::InvalidRange { .. })
        ));
        assert!(matches!(
            copy_within(ByteViewMut::from(&mut x), 0..3, 3),
            Err(MemError::Capacity {
                required: 6,
                available: 5,
            })
        ));
    }

    #[test]
    fn compare_orders_by_content_then_length() {
        let cases: [(&[u8], &[u8], Ordering); 6] = [
            (&[], &[], Ordering::Equal),
            (&[], &[0], Ordering::Less),
            (&[1, 2], &[1, 2], Ordering::Equal),
            (&[1, 2], &[1, 3], Ordering::Less),
            (&[2], &[1, 9, 9], Ordering::Greater),
            (&[1, 2, 0], &[1, 2], Ordering::Greater),
        ];
        for (a, b, expect) in cases {
            let (a, b) = (ByteView::from(a), ByteView::from(b));
            assert_eq!(compare(a, b), Ok(expect));
            assert_eq!(compare(b, a), Ok(expect.reverse()));
            assert_eq!(equal(a, b), Ok(expect == Ordering::Equal));
        }
    }

    #[test]
    fn compare_rejects_null() {
        let x = [1_u8];
        let null = MemError::NullPointer;
        assert_eq!(compare(ByteView::new(), ByteView::from(&x)), Err(null));
        assert_eq!(equal(ByteView::from(&x), ByteView::new()), Err(null));
    }

    #[test]
    fn search_uses_element_equality() {
        let x = [10, 20, 30, 20];
        let view = View::from(&x);
        assert_eq!(linear_search(view, &20), Ok(Some(1)));
        assert_eq!(linear_search(view, &99), Ok(None));

        let null = linear_search(View::<i32>::new(), &1);
        assert_eq!(null, Err(MemError::NullPointer));
    }
}
