//! FFI module for the compiled model and the host-runtime boundary.
//!
//! With the `ffi` feature enabled the model's C entry point is linked in and
//! exposed as [`LinkedModel`], and the crate exports the C symbol the host
//! runtime registers as `digit_classifier.invoke`.

pub mod capi;

#[cfg(feature = "ffi")]
mod bindings;
#[cfg(feature = "ffi")]
mod linked;

#[cfg(feature = "ffi")]
pub use linked::LinkedModel;
