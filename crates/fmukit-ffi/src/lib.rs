//! FMI 2.0 co-simulation C ABI for the fmukit runtime.
//!
//! Builds as a `cdylib` whose exported symbols are the `fmi2*` functions
//! a co-simulation master resolves from the shared library named in
//! `modelDescription.xml`. The embedding crate installs its
//! [`ModelDescriptor`](fmukit_model::ModelDescriptor) once via
//! [`install_model`]; every instantiation is validated against it.
//!
//! This is the only crate in the workspace that may contain `unsafe`
//! code. Every use sits at the C boundary and carries a SAFETY comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Catch panics at the FFI boundary, returning `$fallback` instead of
/// unwinding into the C caller (which would be UB).
macro_rules! ffi_guard {
    ($fallback:expr, $body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(_) => $fallback,
        }
    };
}

/// Lock a mutex, bailing out with `$fallback` if it is poisoned (a
/// prior call panicked while holding it).
macro_rules! ffi_lock {
    ($mutex:expr, $fallback:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $fallback,
        }
    };
}

mod callbacks;
mod component;
mod handle;
mod lifecycle;
mod optional;
mod registry;
mod status;
mod step;
mod types;
mod variables;

#[cfg(test)]
pub(crate) mod test_support;

pub use callbacks::{
    Fmi2CallbackAllocateMemory, Fmi2CallbackFreeMemory, Fmi2CallbackFunctions, Fmi2CallbackLogger,
    Fmi2StepFinished,
};
pub use registry::{install_model, InstallError};
pub use types::{
    Fmi2Boolean, Fmi2Byte, Fmi2Char, Fmi2Component, Fmi2ComponentEnvironment, Fmi2FmuState,
    Fmi2Integer, Fmi2Real, Fmi2Status, Fmi2StatusKind, Fmi2String, Fmi2Type, Fmi2ValueReference,
};
