//! Instance lifecycle exports: instantiate, free, experiment setup,
//! initialization mode, terminate and reset, plus the identification
//! and debug-logging entry points.
//!
//! `fmi2Instantiate` validates the caller's identity claims in a fixed
//! order that is observable through the logger: callbacks first
//! (nothing can be reported without them), then the instance name, the
//! allocator pair, GUID presence, and finally the GUID match. Every
//! logged failure returns null.

#![allow(non_snake_case)]

use std::ffi::CStr;
use std::os::raw::c_int;
use std::ptr;

use fmukit_engine::{Experiment, Instance};

use crate::callbacks::{CallbackSet, Fmi2CallbackFunctions, CATEGORY_ERROR, UNNAMED};
use crate::component::{component_pointer, components, with_component, Component};
use crate::registry;
use crate::types::{Fmi2Boolean, Fmi2Component, Fmi2Real, Fmi2Status, Fmi2String};

/// Borrow a C string argument. `None` for null.
#[allow(unsafe_code)]
fn cstr<'a>(s: Fmi2String) -> Option<&'a CStr> {
    if s.is_null() {
        None
    } else {
        // SAFETY: non-null and NUL-terminated per the C calling
        // convention; borrowed only for the duration of this call.
        Some(unsafe { CStr::from_ptr(s) })
    }
}

/// `fmi2GetTypesPlatform`: the header variant this binary was built
/// against.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetTypesPlatform() -> Fmi2String {
    c"default".as_ptr()
}

/// `fmi2GetVersion`: the FMI standard version implemented.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetVersion() -> Fmi2String {
    c"2.0".as_ptr()
}

/// `fmi2Instantiate`: validate the caller's identity claims and create
/// an isolated instance.
///
/// Both `fmi2ModelExchange` and `fmi2CoSimulation` are accepted; an
/// algebraic model behaves identically under either. The resource
/// location is ignored (the model is compiled in, not loaded from
/// resources).
#[allow(unsafe_code)]
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fmi2Instantiate(
    instance_name: Fmi2String,
    _fmu_type: c_int,
    fmu_guid: Fmi2String,
    _fmu_resource_location: Fmi2String,
    functions: *const Fmi2CallbackFunctions,
    _visible: Fmi2Boolean,
    logging_on: Fmi2Boolean,
) -> Fmi2Component {
    ffi_guard!(ptr::null_mut(), {
        if functions.is_null() {
            return ptr::null_mut();
        }
        // SAFETY: non-null per the check above; points to a valid
        // callback table for the duration of the call, per the FMI
        // contract. Copied out immediately.
        let functions = unsafe { *functions };

        // Without a logger nothing can be reported; fail silently.
        let Some(logger) = functions.logger else {
            return ptr::null_mut();
        };
        let callbacks = CallbackSet::new(logger, functions.component_environment);

        let name = match cstr(instance_name) {
            Some(s) if !s.to_bytes().is_empty() => s.to_owned(),
            _ => {
                callbacks.log(
                    UNNAMED,
                    Fmi2Status::Error,
                    CATEGORY_ERROR,
                    "fmi2Instantiate: Missing instance name.",
                );
                return ptr::null_mut();
            }
        };

        if functions.allocate_memory.is_none() || functions.free_memory.is_none() {
            callbacks.log(
                &name,
                Fmi2Status::Error,
                CATEGORY_ERROR,
                "fmi2Instantiate: Missing callback function.",
            );
            return ptr::null_mut();
        }

        let guid = match cstr(fmu_guid) {
            Some(s) if !s.to_bytes().is_empty() => s.to_string_lossy().into_owned(),
            _ => {
                callbacks.log(
                    &name,
                    Fmi2Status::Error,
                    CATEGORY_ERROR,
                    "fmi2Instantiate: Missing GUID.",
                );
                return ptr::null_mut();
            }
        };

        let Some(descriptor) = registry::model() else {
            callbacks.log(
                &name,
                Fmi2Status::Error,
                CATEGORY_ERROR,
                "fmi2Instantiate: No model installed.",
            );
            return ptr::null_mut();
        };

        if guid != descriptor.guid() {
            callbacks.log(
                &name,
                Fmi2Status::Error,
                CATEGORY_ERROR,
                &format!(
                    "fmi2Instantiate: Wrong GUID {guid}. Expected {}.",
                    descriptor.guid()
                ),
            );
            return ptr::null_mut();
        }

        let component = Component {
            instance: Instance::new(name.to_string_lossy().into_owned(), descriptor),
            callbacks,
            name: name.clone(),
            logging_on: logging_on != 0,
        };
        match ffi_lock!(components(), ptr::null_mut()).insert(component) {
            Some(handle) => component_pointer(handle),
            None => {
                callbacks.log(
                    &name,
                    Fmi2Status::Error,
                    CATEGORY_ERROR,
                    "fmi2Instantiate: Too many instances.",
                );
                ptr::null_mut()
            }
        }
    })
}

/// `fmi2FreeInstance`: destroy the instance behind the handle.
///
/// Null and stale handles are ignored; double-free is a safe no-op.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2FreeInstance(c: Fmi2Component) {
    ffi_guard!((), {
        if let Some(handle) = crate::component::component_handle(c) {
            ffi_lock!(components(), ()).remove(handle);
        }
    })
}

/// `fmi2SetDebugLogging`: toggle call tracing.
///
/// Category selection is accepted but not filtered on; error messages
/// are delivered regardless of the flag.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2SetDebugLogging(
    c: Fmi2Component,
    logging_on: Fmi2Boolean,
    _n_categories: usize,
    _categories: *const Fmi2String,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, {
        with_component(c, |component| {
            component.logging_on = logging_on != 0;
            Fmi2Status::Ok
        })
    })
}

/// `fmi2SetupExperiment`: record the experiment bounds.
///
/// The bounds are retained as data; a purely algebraic model never
/// integrates over them.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2SetupExperiment(
    c: Fmi2Component,
    tolerance_defined: Fmi2Boolean,
    tolerance: Fmi2Real,
    start_time: Fmi2Real,
    stop_time_defined: Fmi2Boolean,
    stop_time: Fmi2Real,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, {
        with_component(c, |component| {
            let experiment = Experiment {
                start_time,
                stop_time: (stop_time_defined != 0).then_some(stop_time),
                tolerance: (tolerance_defined != 0).then_some(tolerance),
            };
            match component.instance.setup_experiment(experiment) {
                Ok(()) => Fmi2Status::Ok,
                Err(e) => {
                    component.log_error(&format!("fmi2SetupExperiment: {e}."));
                    Fmi2Status::from(&e)
                }
            }
        })
    })
}

/// `fmi2EnterInitializationMode`.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2EnterInitializationMode(c: Fmi2Component) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, {
        with_component(c, |component| {
            match component.instance.enter_initialization_mode() {
                Ok(()) => Fmi2Status::Ok,
                Err(e) => {
                    component.log_error(&format!("fmi2EnterInitializationMode: {e}."));
                    Fmi2Status::from(&e)
                }
            }
        })
    })
}

/// `fmi2ExitInitializationMode`.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2ExitInitializationMode(c: Fmi2Component) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, {
        with_component(c, |component| {
            match component.instance.exit_initialization_mode() {
                Ok(()) => Fmi2Status::Ok,
                Err(e) => {
                    component.log_error(&format!("fmi2ExitInitializationMode: {e}."));
                    Fmi2Status::from(&e)
                }
            }
        })
    })
}

/// `fmi2Terminate`: end the simulation run.
///
/// Values remain readable afterwards; writes and steps do not.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2Terminate(c: Fmi2Component) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, {
        with_component(c, |component| match component.instance.terminate() {
            Ok(()) => Fmi2Status::Ok,
            Err(e) => {
                component.log_error(&format!("fmi2Terminate: {e}."));
                Fmi2Status::from(&e)
            }
        })
    })
}

/// `fmi2Reset`: return the instance to its freshly-instantiated state.
///
/// Legal in every state, including after `fmi2Terminate`. Inputs are
/// zeroed and the recorded experiment is discarded.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2Reset(c: Fmi2Component) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, {
        with_component(c, |component| {
            component.instance.reset();
            Fmi2Status::Ok
        })
    })
}
