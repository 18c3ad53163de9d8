//! The master-supplied callback table and the logging bridge.
//!
//! `fmi2CallbackFunctions` arrives by pointer at instantiation. The
//! logger is declared variadic in the standard header, but this runtime
//! formats every message in Rust and invokes it with the four fixed
//! arguments only, so no printf-style substitution ever happens on the
//! master side and no variadic argument is ever read.

use std::ffi::{CStr, CString};
use std::os::raw::c_void;

use crate::types::{Fmi2ComponentEnvironment, Fmi2Status, Fmi2String};

/// `fmi2CallbackLogger`. Variadic in the header; always invoked here
/// with the fixed arguments only.
pub type Fmi2CallbackLogger = unsafe extern "C" fn(
    Fmi2ComponentEnvironment,
    Fmi2String,
    Fmi2Status,
    Fmi2String,
    Fmi2String,
    ...
);

/// `fmi2CallbackAllocateMemory`.
pub type Fmi2CallbackAllocateMemory = unsafe extern "C" fn(usize, usize) -> *mut c_void;

/// `fmi2CallbackFreeMemory`.
pub type Fmi2CallbackFreeMemory = unsafe extern "C" fn(*mut c_void);

/// `fmi2StepFinished`.
pub type Fmi2StepFinished = unsafe extern "C" fn(Fmi2ComponentEnvironment, Fmi2Status);

/// Mirror of the `fmi2CallbackFunctions` struct. Field order is ABI.
///
/// Nullable C function pointers are modelled as `Option`; the null
/// checks required at instantiation happen in `fmi2Instantiate`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Fmi2CallbackFunctions {
    /// Message sink. Required: without it no failure can be reported.
    pub logger: Option<Fmi2CallbackLogger>,
    /// Allocator. Required by the standard even though this runtime
    /// allocates on the Rust side.
    pub allocate_memory: Option<Fmi2CallbackAllocateMemory>,
    /// Deallocator paired with `allocate_memory`. Required.
    pub free_memory: Option<Fmi2CallbackFreeMemory>,
    /// Completion callback for asynchronous steps. Unused: every step
    /// here acknowledges synchronously.
    pub step_finished: Option<Fmi2StepFinished>,
    /// Opaque pointer echoed back through `logger`.
    pub component_environment: Fmi2ComponentEnvironment,
}

/// Log category attached to every error message.
pub(crate) const CATEGORY_ERROR: &CStr = c"error";

/// Log category for call tracing, emitted only with debug logging on.
pub(crate) const CATEGORY_FMI_CALL: &CStr = c"logFmiCall";

/// Instance-name placeholder used before a name has been validated.
pub(crate) const UNNAMED: &CStr = c"?";

/// The validated logging channel kept for one live instance.
#[derive(Clone, Copy)]
pub(crate) struct CallbackSet {
    logger: Fmi2CallbackLogger,
    environment: Fmi2ComponentEnvironment,
}

// SAFETY: the pointers are plain data; they are only ever invoked on
// the thread currently inside an fmi2* call, which is the use the
// master granted by passing them in.
#[allow(unsafe_code)]
unsafe impl Send for CallbackSet {}

impl CallbackSet {
    pub fn new(logger: Fmi2CallbackLogger, environment: Fmi2ComponentEnvironment) -> Self {
        Self {
            logger,
            environment,
        }
    }

    /// Deliver one fully-formatted message to the master's logger.
    ///
    /// Messages with an interior NUL cannot cross the boundary and are
    /// dropped; none of the runtime's own messages contain one.
    #[allow(unsafe_code)]
    pub fn log(&self, instance_name: &CStr, status: Fmi2Status, category: &CStr, message: &str) {
        let Ok(message) = CString::new(message) else {
            return;
        };
        // SAFETY: the logger was checked non-null at instantiation, the
        // four fixed arguments are valid NUL-terminated strings that
        // outlive the call, and no variadic argument is passed.
        unsafe {
            (self.logger)(
                self.environment,
                instance_name.as_ptr(),
                status,
                category.as_ptr(),
                message.as_ptr(),
            );
        }
    }
}
