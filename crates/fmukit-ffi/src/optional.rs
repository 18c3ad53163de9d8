//! Optional-capability exports: FMU state capture, serialization,
//! derivatives and the asynchronous status queries.
//!
//! The model description advertises none of these capabilities, so a
//! conforming master never calls them. They are still exported so that
//! symbol resolution succeeds; each validates the handle and returns
//! success without producing data. No output pointer is ever written,
//! in particular no fake `fmi2FMUstate` is ever handed out.

#![allow(non_snake_case)]

use std::os::raw::c_int;

use crate::component::with_component;
use crate::types::{
    Fmi2Boolean, Fmi2Byte, Fmi2Component, Fmi2FmuState, Fmi2Integer, Fmi2Real, Fmi2Status,
    Fmi2String, Fmi2ValueReference,
};

/// `fmi2GetFMUstate`: state capture is not supported.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetFMUstate(c: Fmi2Component, _state: *mut Fmi2FmuState) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2SetFMUstate`: state capture is not supported.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2SetFMUstate(c: Fmi2Component, _state: Fmi2FmuState) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2FreeFMUstate`: no state is ever allocated, so there is nothing
/// to free.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2FreeFMUstate(c: Fmi2Component, _state: *mut Fmi2FmuState) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2SerializedFMUstateSize`: state serialization is not supported.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2SerializedFMUstateSize(
    c: Fmi2Component,
    _state: Fmi2FmuState,
    _size: *mut usize,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2SerializeFMUstate`: state serialization is not supported.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2SerializeFMUstate(
    c: Fmi2Component,
    _state: Fmi2FmuState,
    _data: *mut Fmi2Byte,
    _size: usize,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2DeSerializeFMUstate`: state serialization is not supported.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2DeSerializeFMUstate(
    c: Fmi2Component,
    _data: *const Fmi2Byte,
    _size: usize,
    _state: *mut Fmi2FmuState,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2GetDirectionalDerivative`: directional derivatives are not
/// provided.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetDirectionalDerivative(
    c: Fmi2Component,
    _unknown_refs: *const Fmi2ValueReference,
    _n_unknown: usize,
    _known_refs: *const Fmi2ValueReference,
    _n_known: usize,
    _dv_known: *const Fmi2Real,
    _dv_unknown: *mut Fmi2Real,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2SetRealInputDerivatives`: input interpolation is not supported.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2SetRealInputDerivatives(
    c: Fmi2Component,
    _vr: *const Fmi2ValueReference,
    _nvr: usize,
    _order: *const Fmi2Integer,
    _value: *const Fmi2Real,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2GetRealOutputDerivatives`: output derivatives are not provided.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetRealOutputDerivatives(
    c: Fmi2Component,
    _vr: *const Fmi2ValueReference,
    _nvr: usize,
    _order: *const Fmi2Integer,
    _value: *mut Fmi2Real,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2GetStatus`: every step completes synchronously, so there is no
/// asynchronous status to report.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetStatus(
    c: Fmi2Component,
    _kind: c_int,
    _value: *mut Fmi2Status,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2GetRealStatus`: no asynchronous status to report.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetRealStatus(
    c: Fmi2Component,
    _kind: c_int,
    _value: *mut Fmi2Real,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2GetIntegerStatus`: no asynchronous status to report.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetIntegerStatus(
    c: Fmi2Component,
    _kind: c_int,
    _value: *mut Fmi2Integer,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2GetBooleanStatus`: no asynchronous status to report.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetBooleanStatus(
    c: Fmi2Component,
    _kind: c_int,
    _value: *mut Fmi2Boolean,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

/// `fmi2GetStringStatus`: no asynchronous status to report.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2GetStringStatus(
    c: Fmi2Component,
    _kind: c_int,
    _value: *mut Fmi2String,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}
