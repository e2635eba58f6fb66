//! Reporting of contract violations.
//!
//! Checked operations never return garbage: when a precondition fails they
//! call [`violated`], which
//!
//! 1. logs the violation at `error` level,
//! 2. invokes the installed [`FailureHook`], if any,
//! 3. panics with the diagnostic.
//!
//! The hook is process-wide and can be installed exactly once, normally at
//! startup, before any view is used concurrently. It is never removed.
//!
//! ```no_run
//! use vc_view::contract::{self, FailureHook};
//!
//! static HOOK: FailureHook = FailureHook::new("stderr", |v| {
//!     std::eprintln!("{v}");
//! });
//!
//! contract::install_failure_hook(&HOOK).unwrap();
//! ```

use core::fmt;
use core::panic::Location;
use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

use thiserror::Error;

use crate::MemError;

// -----------------------------------------------------------------------------
// ContractViolation

/// A failed precondition and the location of the offending call.
#[derive(Debug, Clone, Copy)]
pub struct ContractViolation<'a> {
    error: MemError,
    location: &'a Location<'a>,
}

impl<'a> ContractViolation<'a> {
    #[inline]
    pub const fn new(error: MemError, location: &'a Location<'a>) -> Self {
        Self { error, location }
    }

    #[inline(always)]
    pub const fn error(&self) -> MemError {
        self.error
    }

    #[inline(always)]
    pub const fn location(&self) -> &'a Location<'a> {
        self.location
    }
}

impl fmt::Display for ContractViolation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "contract violation: {} at {}:{}:{}",
            self.error,
            self.location.file(),
            self.location.line(),
            self.location.column(),
        )
    }
}

// -----------------------------------------------------------------------------
// FailureHook

/// A named callback invoked for every contract violation.
///
/// The callback may diverge (abort, exit). If it returns, the violation
/// still panics.
#[derive(Clone, Copy)]
pub struct FailureHook {
    name: &'static str,
    func: fn(&ContractViolation<'_>),
}

impl FailureHook {
    /// Prints the diagnostic to stderr and aborts the process.
    #[cfg(feature = "std")]
    pub const ABORT: FailureHook = FailureHook::new("abort", |violation| {
        ::std::eprintln!("{violation}");
        ::std::process::abort();
    });

    #[inline]
    pub const fn new(name: &'static str, func: fn(&ContractViolation<'_>)) -> Self {
        Self { name, func }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    fn call(&self, violation: &ContractViolation<'_>) {
        (self.func)(violation)
    }
}

impl fmt::Debug for FailureHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureHook").field("name", &self.name).finish()
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HookError {
    #[error("failure hook `{0}` is already installed")]
    AlreadyInstalled(&'static str),
}

// Only ever holds null or a pointer derived from a `&'static FailureHook`.
static HOOK: AtomicPtr<FailureHook> = AtomicPtr::new(ptr::null_mut());

/// Installs the process-wide failure hook.
///
/// Succeeds once; later calls leave the first hook in place.
pub fn install_failure_hook(hook: &'static FailureHook) -> Result<(), HookError> {
    let new = ptr::from_ref(hook).cast_mut();
    match HOOK.compare_exchange(
        ptr::null_mut(),
        new,
        Ordering::AcqRel,
        Ordering::Acquire,
    ) {
        Ok(_) => {
            log::debug!("installed contract failure hook `{}`", hook.name);
            Ok(())
        }
        Err(current) => {
            // SAFETY: non-null values always come from a `&'static FailureHook`.
            let current = unsafe { &*current };
            Err(HookError::AlreadyInstalled(current.name))
        }
    }
}

/// Returns the installed failure hook, if any.
#[inline]
pub fn failure_hook() -> Option<&'static FailureHook> {
    // SAFETY: non-null values always come from a `&'static FailureHook`.
    unsafe { HOOK.load(Ordering::Acquire).as_ref() }
}

// -----------------------------------------------------------------------------
// violated

/// Reports a contract violation at the caller's location and panics.
#[cold]
#[inline(never)]
#[track_caller]
pub fn violated(error: MemError) -> ! {
    let violation = ContractViolation::new(error, Location::caller());

    log::error!("{violation}");

    if let Some(hook) = failure_hook() {
        hook.call(&violation);
    }

    panic!("{violation}");
}

// -----------------------------------------------------------------------------
// ContractUnwrap

/// Unwraps a `Result<T, MemError>`, reporting the error as a contract violation.
///
/// # Examples
///
/// ```
/// use vc_view::{ContractUnwrap, View};
///
/// let x = [1, 2, 3];
/// let view = View::from(&x);
///
/// assert_eq!(*view.try_get(1).contract_unwrap(), 2);
/// ```
pub trait ContractUnwrap {
    type Item;

    fn contract_unwrap(self) -> Self::Item;
}

impl<T> ContractUnwrap for Result<T, MemError> {
    type Item = T;

    #[inline(always)]
    #[track_caller]
    fn contract_unwrap(self) -> Self::Item {
        match self {
            Ok(value) => value,
            Err(error) => violated(error),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{ContractUnwrap, FailureHook, HookError, MemError};
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::string::ToString;

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    static COUNTING: FailureHook = FailureHook::new("counting", |_| {
        CALLS.fetch_add(1, Ordering::SeqCst);
    });

    static OTHER: FailureHook = FailureHook::new("other", |_| {});

    // The only test in this binary that installs a hook.
    #[test]
    fn hook_runs_before_panic() {
        super::install_failure_hook(&COUNTING).unwrap();
        assert_eq!(
            super::install_failure_hook(&OTHER),
            Err(HookError::AlreadyInstalled("counting"))
        );
        let installed = super::failure_hook().map(FailureHook::name);
        assert_eq!(installed, Some("counting"));

        let before = CALLS.load(Ordering::SeqCst);
        let result = std::panic::catch_unwind(|| {
            super::violated(MemError::NullPointer);
        });
        assert!(result.is_err());
        assert!(CALLS.load(Ordering::SeqCst) > before);
    }

    #[test]
    fn diagnostic_names_caller() {
        let result = std::panic::catch_unwind(|| {
            Err::<(), _>(MemError::NullPointer).contract_unwrap();
        });
        let payload = result.unwrap_err();
        let message = payload.downcast_ref::<std::string::String>().unwrap();
        let prefix = "contract violation: view has a null pointer at ";
        assert!(message.starts_with(prefix));
        assert!(message.contains(file!()));
    }

    #[test]
    fn unwrap_ok_passes_through() {
        assert_eq!(Ok::<_, MemError>(7).contract_unwrap(), 7);
        assert_eq!(MemError::NullPointer.to_string(), "view has a null pointer");
    }
}
