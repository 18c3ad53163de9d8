//! The process-wide component table.
//!
//! Each live instance is stored here together with its callback set,
//! addressed by the opaque pointer handed to the master. The global
//! lock is held only for the duration of one call; the calls themselves
//! are short and synchronous, so concurrently driven instances
//! serialize briefly at the table and nowhere else.

use std::ffi::CString;
use std::sync::Mutex;

use fmukit_engine::Instance;

use crate::callbacks::{CallbackSet, CATEGORY_ERROR, CATEGORY_FMI_CALL};
use crate::handle::HandleTable;
use crate::types::{Fmi2Component, Fmi2Status};

/// One live component: engine instance plus master-supplied callbacks.
pub(crate) struct Component {
    pub instance: Instance,
    pub callbacks: CallbackSet,
    pub name: CString,
    pub logging_on: bool,
}

impl Component {
    /// Report an operational error through the master's logger.
    ///
    /// Errors are always delivered, even with debug logging off; the
    /// `loggingOn` flag gates verbosity, not failure reporting.
    pub fn log_error(&self, message: &str) {
        self.callbacks
            .log(&self.name, Fmi2Status::Error, CATEGORY_ERROR, message);
    }

    /// Trace one call through the master's logger when debug logging is
    /// enabled.
    pub fn log_call(&self, message: &str) {
        if self.logging_on {
            self.callbacks
                .log(&self.name, Fmi2Status::Ok, CATEGORY_FMI_CALL, message);
        }
    }
}

static COMPONENTS: Mutex<HandleTable<Component>> = Mutex::new(HandleTable::new());

pub(crate) fn components() -> &'static Mutex<HandleTable<Component>> {
    &COMPONENTS
}

/// Decode an opaque component pointer back to a table handle.
///
/// Live handles are never zero, so a null component decodes to a
/// handle no slot matches. Pointers wider than 32 bits were never
/// produced by this table and are invalid by construction.
pub(crate) fn component_handle(c: Fmi2Component) -> Option<u32> {
    u32::try_from(c as usize).ok()
}

/// Encode a table handle as the opaque pointer given to the master.
pub(crate) fn component_pointer(handle: u32) -> Fmi2Component {
    handle as usize as Fmi2Component
}

/// Run `f` against the component behind `c`.
///
/// Invalid, stale, and null handles return `Error` without reaching
/// `f`; there is no logger to reach in that case. A poisoned table
/// lock (a prior call panicked) reports `Fatal`.
pub(crate) fn with_component(
    c: Fmi2Component,
    f: impl FnOnce(&mut Component) -> Fmi2Status,
) -> Fmi2Status {
    let Some(handle) = component_handle(c) else {
        return Fmi2Status::Error;
    };
    let mut table = ffi_lock!(components(), Fmi2Status::Fatal);
    match table.get_mut(handle) {
        Some(component) => f(component),
        None => Fmi2Status::Error,
    }
}
