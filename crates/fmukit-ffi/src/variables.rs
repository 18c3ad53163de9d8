//! Variable access exports.
//!
//! The Real family is the live data path, backed by the engine's
//! bounds-checked batch operations: a batch with any invalid reference
//! is refused whole and the caller's buffers stay untouched. The
//! Integer, Boolean and String families exist to satisfy symbol
//! resolution for a model class that declares only Real variables; they
//! validate the handle and otherwise do nothing.

#![allow(non_snake_case)]

use fmukit_model::ValueReference;
use smallvec::SmallVec;

use crate::component::with_component;
use crate::types::{
    Fmi2Boolean, Fmi2Component, Fmi2Integer, Fmi2Real, Fmi2Status, Fmi2String, Fmi2ValueReference,
};

/// Per-call staging for reference conversion; 16 covers typical
/// batches without heap traffic.
type RefBuf = SmallVec<[ValueReference; 16]>;

/// `fmi2GetReal`: read `nvr` variables into `value`.
///
/// Inputs come from storage; outputs are evaluated on the spot from
/// the current inputs. The whole batch is validated before `value` is
/// written.
#[allow(unsafe_code)]
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fmi2GetReal(
    c: Fmi2Component,
    vr: *const Fmi2ValueReference,
    nvr: usize,
    value: *mut Fmi2Real,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, {
        with_component(c, |component| {
            if nvr == 0 {
                return Fmi2Status::Ok;
            }
            if vr.is_null() || value.is_null() {
                component.log_error("fmi2GetReal: Null argument array.");
                return Fmi2Status::Error;
            }
            // SAFETY: both pointers were checked non-null and each
            // addresses nvr elements per the FMI calling convention.
            let (refs, out) = unsafe {
                (
                    std::slice::from_raw_parts(vr, nvr),
                    std::slice::from_raw_parts_mut(value, nvr),
                )
            };
            let refs: RefBuf = refs.iter().map(|&r| ValueReference(r)).collect();
            match component.instance.get_reals(&refs, out) {
                Ok(()) => Fmi2Status::Ok,
                Err(e) => {
                    component.log_error(&format!("fmi2GetReal: {e}."));
                    Fmi2Status::from(&e)
                }
            }
        })
    })
}

/// `fmi2SetReal`: write `nvr` input variables.
///
/// Writes to output references and out-of-range references reject the
/// whole batch; the store is left unchanged.
#[allow(unsafe_code)]
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn fmi2SetReal(
    c: Fmi2Component,
    vr: *const Fmi2ValueReference,
    nvr: usize,
    value: *const Fmi2Real,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, {
        with_component(c, |component| {
            if nvr == 0 {
                return Fmi2Status::Ok;
            }
            if vr.is_null() || value.is_null() {
                component.log_error("fmi2SetReal: Null argument array.");
                return Fmi2Status::Error;
            }
            // SAFETY: both pointers were checked non-null and each
            // addresses nvr elements per the FMI calling convention.
            let (refs, values) = unsafe {
                (
                    std::slice::from_raw_parts(vr, nvr),
                    std::slice::from_raw_parts(value, nvr),
                )
            };
            let refs: RefBuf = refs.iter().map(|&r| ValueReference(r)).collect();
            match component.instance.set_reals(&refs, values) {
                Ok(()) => Fmi2Status::Ok,
                Err(e) => {
                    component.log_error(&format!("fmi2SetReal: {e}."));
                    Fmi2Status::from(&e)
                }
            }
        })
    })
}

/// `fmi2GetInteger`: no Integer variables exist; succeeds without
/// writing.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetInteger(
    c: Fmi2Component,
    _vr: *const Fmi2ValueReference,
    _nvr: usize,
    _value: *mut Fmi2Integer,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2SetInteger`: no Integer variables exist; accepted and ignored.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2SetInteger(
    c: Fmi2Component,
    _vr: *const Fmi2ValueReference,
    _nvr: usize,
    _value: *const Fmi2Integer,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2GetBoolean`: no Boolean variables exist; succeeds without
/// writing.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetBoolean(
    c: Fmi2Component,
    _vr: *const Fmi2ValueReference,
    _nvr: usize,
    _value: *mut Fmi2Boolean,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2SetBoolean`: no Boolean variables exist; accepted and ignored.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2SetBoolean(
    c: Fmi2Component,
    _vr: *const Fmi2ValueReference,
    _nvr: usize,
    _value: *const Fmi2Boolean,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2GetString`: no String variables exist; succeeds without
/// writing.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetString(
    c: Fmi2Component,
    _vr: *const Fmi2ValueReference,
    _nvr: usize,
    _value: *mut Fmi2String,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2SetString`: no String variables exist; accepted and ignored.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2SetString(
    c: Fmi2Component,
    _vr: *const Fmi2ValueReference,
    _nvr: usize,
    _value: *const Fmi2String,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}
