//! Co-simulation stepping exports.
//!
//! A purely algebraic model has no internal dynamics: `fmi2DoStep`
//! advances nothing and exists to satisfy protocol ordering. It still
//! enforces the state machine, so a master that steps before
//! initialization gets a logged error rather than silent acceptance.

#![allow(non_snake_case)]

use crate::component::with_component;
use crate::types::{Fmi2Boolean, Fmi2Component, Fmi2Real, Fmi2Status};

/// `fmi2DoStep`: acknowledge one communication step.
///
/// Outputs are functions of the current inputs alone and are computed
/// on read, so the step itself performs no work. Always synchronous;
/// `fmi2Pending` is never returned.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2DoStep(
    c: Fmi2Component,
    current_communication_point: Fmi2Real,
    communication_step_size: Fmi2Real,
    _no_set_fmu_state_prior_to_current_point: Fmi2Boolean,
) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, {
        with_component(c, |component| {
            component.log_call(&format!(
                "fmi2DoStep: t={current_communication_point}, h={communication_step_size}."
            ));
            match component
                .instance
                .do_step(current_communication_point, communication_step_size)
            {
                Ok(()) => Fmi2Status::Ok,
                Err(e) => {
                    component.log_error(&format!("fmi2DoStep: {e}."));
                    Fmi2Status::from(&e)
                }
            }
        })
    })
}

/// `fmi2CancelStep`: nothing to cancel.
///
/// Steps always complete synchronously, so there is never a pending
/// step; the call is accepted and does nothing.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn fmi2CancelStep(c: Fmi2Component) -> Fmi2Status {
    ffi_guard!(Fmi2Status::Fatal, { with_component(c, |_| Fmi2Status::Ok) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{fmi2FreeInstance, fmi2SetDebugLogging};
    use crate::test_support::{initialize, instantiate, records_for};
    use std::ptr;

    #[test]
    fn do_step_requires_an_initialized_instance() {
        let c = instantiate("step-uninit");
        assert_eq!(fmi2DoStep(c, 0.0, 0.1, 0), Fmi2Status::Error);

        let records = records_for("step-uninit");
        assert_eq!(records.len(), 1);
        assert!(records[0].message.starts_with("fmi2DoStep:"));
        assert!(records[0].message.contains("do_step"));
        fmi2FreeInstance(c);
    }

    #[test]
    fn repeated_steps_are_accepted_after_initialization() {
        let c = instantiate("step-repeat");
        initialize(c);
        let mut t = 0.0;
        for _ in 0..20 {
            assert_eq!(fmi2DoStep(c, t, 0.05, 0), Fmi2Status::Ok);
            t += 0.05;
        }
        fmi2FreeInstance(c);
    }

    #[test]
    fn cancel_step_is_inert() {
        let c = instantiate("step-cancel");
        assert_eq!(fmi2CancelStep(c), Fmi2Status::Ok);
        initialize(c);
        assert_eq!(fmi2CancelStep(c), Fmi2Status::Ok);
        fmi2FreeInstance(c);
        assert_eq!(fmi2CancelStep(c), Fmi2Status::Error);
    }

    #[test]
    fn debug_logging_traces_steps() {
        let c = instantiate("step-trace");
        initialize(c);
        assert_eq!(fmi2SetDebugLogging(c, 1, 0, ptr::null()), Fmi2Status::Ok);
        assert_eq!(fmi2DoStep(c, 0.5, 0.25, 0), Fmi2Status::Ok);

        let records = records_for("step-trace");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "logFmiCall");
        assert!(records[0].message.contains("t=0.5"));
        assert!(records[0].message.contains("h=0.25"));

        // Toggling the flag off silences the trace again.
        assert_eq!(fmi2SetDebugLogging(c, 0, 0, ptr::null()), Fmi2Status::Ok);
        assert_eq!(fmi2DoStep(c, 0.75, 0.25, 0), Fmi2Status::Ok);
        assert_eq!(records_for("step-trace").len(), 1);
        fmi2FreeInstance(c);
    }
}
