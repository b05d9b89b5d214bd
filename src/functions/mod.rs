//! Pixel function module.
//!
//! Contains the function registry, the shared iteration kernel and the
//! built-in pixel functions.

pub mod registry;
pub mod kernel;
pub mod builtin;

#[cfg(test)]
pub(crate) mod test_support;

pub use registry::{FunctionRegistry, RegistryBuilder, RegistryEntry, SharedFunction};
