#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `vc_serial` in tests.
// But `macro_utils::Manifest` can only choose one, so we must have an
// `extern self` to ensure `vc_serial` can be used as an alias for `crate`.
extern crate self as vc_serial;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod engine;

pub mod analysis;
pub mod compile;
pub mod error;
pub mod impls;
pub mod info;
pub mod node;
pub mod registry;
pub mod utils;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use engine::SerialEngine;
pub use error::{FormatError, InitError};
pub use info::Serializability;
pub use node::Node;
pub use registry::{Serializable, TypeRegistry};
pub use vc_serial_derive as derive;
pub use vc_serial_derive::Serializable;
