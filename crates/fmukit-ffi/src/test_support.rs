//! Shared fixtures for exercising the C surface from Rust tests.
//!
//! Tests run in parallel against one process-wide model and one shared
//! log sink, so every test uses a unique instance name and filters the
//! captured records by it.

#![allow(unsafe_code)]

use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::Mutex;

use fmukit_test_utils::{adder_model, ADDER_GUID};

use crate::callbacks::{Fmi2CallbackFunctions, Fmi2CallbackLogger};
use crate::lifecycle::{
    fmi2EnterInitializationMode, fmi2ExitInitializationMode, fmi2Instantiate, fmi2SetupExperiment,
};
use crate::registry::install_model;
use crate::types::{Fmi2Component, Fmi2ComponentEnvironment, Fmi2Status, Fmi2String};

/// One captured logger invocation.
#[derive(Clone, Debug)]
pub struct LogRecord {
    pub instance: String,
    pub status: i32,
    pub category: String,
    pub message: String,
}

static LOG: Mutex<Vec<LogRecord>> = Mutex::new(Vec::new());

unsafe extern "C" fn recording_logger(
    _environment: Fmi2ComponentEnvironment,
    instance: Fmi2String,
    status: Fmi2Status,
    category: Fmi2String,
    message: Fmi2String,
) {
    let grab = |s: Fmi2String| {
        if s.is_null() {
            String::new()
        } else {
            // SAFETY: the runtime passes NUL-terminated strings valid
            // for the duration of the callback.
            unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
        }
    };
    LOG.lock().unwrap().push(LogRecord {
        instance: grab(instance),
        status: status as i32,
        category: grab(category),
        message: grab(message),
    });
}

/// The recording logger, as the variadic pointer type the ABI declares.
pub fn capture_logger() -> Fmi2CallbackLogger {
    // SAFETY: the runtime always invokes the logger with exactly the
    // four fixed arguments, which matches recording_logger's actual
    // signature; the extra variadic marker is never materialized.
    unsafe {
        std::mem::transmute::<
            unsafe extern "C" fn(
                Fmi2ComponentEnvironment,
                Fmi2String,
                Fmi2Status,
                Fmi2String,
                Fmi2String,
            ),
            Fmi2CallbackLogger,
        >(recording_logger)
    }
}

unsafe extern "C" fn failing_alloc(_nobj: usize, _size: usize) -> *mut std::os::raw::c_void {
    // Never called: the runtime allocates on the Rust side. Present so
    // the callback-table validation passes.
    ptr::null_mut()
}

unsafe extern "C" fn noop_free(_p: *mut std::os::raw::c_void) {}

/// A complete, valid callback table wired to the recording logger.
pub fn callback_table() -> Fmi2CallbackFunctions {
    Fmi2CallbackFunctions {
        logger: Some(capture_logger()),
        allocate_memory: Some(failing_alloc),
        free_memory: Some(noop_free),
        step_finished: None,
        component_environment: ptr::null_mut(),
    }
}

/// Install the shared fixture model; a no-op once any test has done it.
pub fn install_fixture() {
    let _ = install_model(adder_model());
}

/// Instantiate against the fixture model with debug logging off.
pub fn instantiate(name: &str) -> Fmi2Component {
    install_fixture();
    let name = CString::new(name).unwrap();
    let guid = CString::new(ADDER_GUID).unwrap();
    let functions = callback_table();
    let c = fmi2Instantiate(name.as_ptr(), 1, guid.as_ptr(), ptr::null(), &functions, 0, 0);
    assert!(!c.is_null());
    c
}

/// Drive a fresh instance to the steppable state.
pub fn initialize(c: Fmi2Component) {
    assert_eq!(fmi2SetupExperiment(c, 0, 0.0, 0.0, 0, 0.0), Fmi2Status::Ok);
    assert_eq!(fmi2EnterInitializationMode(c), Fmi2Status::Ok);
    assert_eq!(fmi2ExitInitializationMode(c), Fmi2Status::Ok);
}

/// All captured records for one instance name, in arrival order.
pub fn records_for(instance: &str) -> Vec<LogRecord> {
    LOG.lock()
        .unwrap()
        .iter()
        .filter(|r| r.instance == instance)
        .cloned()
        .collect()
}
