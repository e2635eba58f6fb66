#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_alloc as alloc;
pub use vc_utils as utils;
pub use vc_view as view;
