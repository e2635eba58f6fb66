#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod defer;
mod fixed_array;

#[cfg(feature = "std")]
mod stopwatch;

// -----------------------------------------------------------------------------
// Top-level exports

pub use defer::Defer;
pub use fixed_array::FixedArray;

#[cfg(feature = "std")]
pub use stopwatch::Stopwatch;
