// -----------------------------------------------------------------------------
// Defer

/// Runs a closure when dropped.
///
/// The closure runs exactly once, when the guard goes out of scope, whether
/// the scope ends normally, through `?` or by unwinding.
/// [`cancel`](Self::cancel) disarms it.
///
/// Guards in the same scope run in reverse order of creation.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
/// use vc_utils::Defer;
///
/// let closed = Cell::new(false);
/// {
///     let _guard = Defer::new(|| closed.set(true));
///     assert!(!closed.get());
/// }
/// assert!(closed.get());
/// ```
#[must_use = "the closure runs as soon as an unbound guard is dropped"]
pub struct Defer<F: FnOnce()> {
    func: Option<F>,
}

impl<F: FnOnce()> Defer<F> {
    #[inline]
    pub const fn new(func: F) -> Self {
        Self { func: Some(func) }
    }

    /// Disarms the guard; the closure is dropped without running.
    #[inline]
    pub fn cancel(mut self) {
        self.func = None;
    }
}

impl<F: FnOnce()> Drop for Defer<F> {
    #[inline]
    fn drop(&mut self) {
        if let Some(func) = self.func.take() {
            func();
        }
    }
}

/// Runs the given statements when the enclosing scope ends.
///
/// Expands to an anonymous [`Defer`] guard bound in the current scope.
///
/// # Examples
///
/// ```
/// use core::cell::RefCell;
/// use vc_utils::defer;
///
/// let log = RefCell::new(Vec::new());
/// {
///     defer! { log.borrow_mut().push("first"); }
///     defer! { log.borrow_mut().push("second"); }
///     log.borrow_mut().push("body");
/// }
/// assert_eq!(*log.borrow(), ["body", "second", "first"]);
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _guard = $crate::Defer::new(|| { $($body)* });
    };
}

// -----------------------------------------------------------------------------
// Tests
