//! The process-wide model registry.
//!
//! A shared library built from this workspace embeds exactly one model.
//! The embedding crate calls [`install_model`] with its descriptor once,
//! before the master's first `fmi2Instantiate`; instantiation validates
//! the caller's GUID against the installed descriptor and lays every
//! instance out against it.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

use fmukit_model::ModelDescriptor;

static MODEL: OnceLock<Arc<ModelDescriptor>> = OnceLock::new();

/// A model was already installed in this process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstallError;

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a model is already installed in this process")
    }
}

impl Error for InstallError {}

/// Install the process-wide model definition.
///
/// At most one model per process; a second call fails without replacing
/// the first. The installed descriptor lives for the remainder of the
/// process.
pub fn install_model(descriptor: ModelDescriptor) -> Result<(), InstallError> {
    MODEL.set(Arc::new(descriptor)).map_err(|_| InstallError)
}

/// The installed descriptor, or `None` before installation.
pub(crate) fn model() -> Option<Arc<ModelDescriptor>> {
    MODEL.get().cloned()
}
