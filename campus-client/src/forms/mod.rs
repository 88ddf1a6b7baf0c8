//! Admin forms with live code checks.
//!
//! Each form owns a [`CodeField`](campus_check::CodeField) and plain text
//! fields. `to_request` runs the same checks the submit button does and
//! reports the first failure as a [`ValidationError`].

pub mod branch;
pub mod course;
pub mod department;
pub mod institution;

pub use branch::BranchForm;
pub use course::CourseForm;
pub use department::DepartmentForm;
pub use institution::{RegisterInstitutionForm, RegisterStep};

use crate::api_client::ApiClientError;
use crate::error::ClientResult;
use crate::notifications::{NotificationLevel, Notifier};
use campus_check::SubmitGate;
use campus_core::{EntityKind, ValidationError};

/// The message a blocked submit button stands for.
pub(crate) fn check_gate(gate: SubmitGate, kind: EntityKind) -> Result<(), ValidationError> {
    match gate {
        SubmitGate::Open => Ok(()),
        SubmitGate::Taken => Err(ValidationError::CodeTaken { kind }),
        SubmitGate::Checking | SubmitGate::Unconfirmed => {
            Err(ValidationError::CodeCheckIncomplete { kind })
        }
    }
}

/// Surface a validation failure and hand it back.
pub(crate) fn rejected<T>(notifier: &dyn Notifier, err: ValidationError) -> ClientResult<T> {
    notifier.notify(NotificationLevel::Warning, &err.to_string());
    Err(err.into())
}

/// Surface the outcome of a submit call.
pub(crate) fn report(
    notifier: &dyn Notifier,
    result: Result<(), ApiClientError>,
    success: &str,
) -> ClientResult<()> {
    match result {
        Ok(()) => {
            notifier.notify(NotificationLevel::Success, success);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(error = %err, "submit failed");
            notifier.notify(NotificationLevel::Error, &err.to_string());
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_messages() {
        assert!(check_gate(SubmitGate::Open, EntityKind::Branch).is_ok());
        assert_eq!(
            check_gate(SubmitGate::Taken, EntityKind::Branch)
                .unwrap_err()
                .to_string(),
            "Branch code already exists"
        );
        assert_eq!(
            check_gate(SubmitGate::Unconfirmed, EntityKind::Institution)
                .unwrap_err()
                .to_string(),
            "Please wait for institution code validation"
        );
    }
}
