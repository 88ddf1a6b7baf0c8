//! Three-step institution registration.

use super::{check_gate, rejected, report};
use crate::api_client::RestClient;
use crate::error::ClientResult;
use crate::notifications::Notifier;
use crate::oracle::RestCodeOracle;
use campus_check::{
    AvailabilityChecker, AvailabilityOracle, CheckOutcome, CodeField, StatusFlags, SubmitGate,
};
use campus_core::validate::{
    current_year, validate_email, validate_established_year, validate_password, validate_phone,
};
use campus_core::{
    CodeScope, EntityKind, InstitutionType, RegisterInstitutionRequest, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegisterStep {
    /// Name, code, address, type and founding year.
    Details,
    /// Email and phone.
    Contact,
    /// Password.
    Credentials,
}

impl RegisterStep {
    /// One-based position, as shown in "Step n of 3".
    pub fn number(&self) -> u8 {
        match self {
            RegisterStep::Details => 1,
            RegisterStep::Contact => 2,
            RegisterStep::Credentials => 3,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            RegisterStep::Details => Some(RegisterStep::Contact),
            RegisterStep::Contact => Some(RegisterStep::Credentials),
            RegisterStep::Credentials => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            RegisterStep::Details => None,
            RegisterStep::Contact => Some(RegisterStep::Details),
            RegisterStep::Credentials => Some(RegisterStep::Contact),
        }
    }
}

/// Registration wizard. The institution code must be confirmed free before
/// the first step can be left.
#[derive(Debug)]
pub struct RegisterInstitutionForm<O = RestCodeOracle> {
    pub name: String,
    pub address: String,
    pub established_year: String,
    pub institution_type: Option<InstitutionType>,
    pub contact_email: String,
    pub contact_phone: String,
    pub password: String,
    code: CodeField<CodeScope, O>,
    step: RegisterStep,
}

impl<O> RegisterInstitutionForm<O>
where
    O: AvailabilityOracle<CodeScope> + 'static,
{
    pub fn new(checker: AvailabilityChecker<CodeScope, O>) -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            established_year: String::new(),
            institution_type: None,
            contact_email: String::new(),
            contact_phone: String::new(),
            password: String::new(),
            code: CodeField::with_scope(checker, CodeScope::Institution),
            step: RegisterStep::Details,
        }
    }

    pub fn set_code(&mut self, raw: &str) -> Option<CheckOutcome> {
        self.code.set_value(raw)
    }

    pub fn blur_code(&mut self) -> Option<CheckOutcome> {
        self.code.blur()
    }

    /// The code as displayed (upper-cased while typing).
    pub fn code(&self) -> String {
        self.code.normalized()
    }

    pub fn code_flags(&self) -> StatusFlags {
        self.code.flags()
    }

    pub fn submit_gate(&self) -> SubmitGate {
        self.code.submit_gate(true)
    }

    pub fn step(&self) -> RegisterStep {
        self.step
    }

    /// Check the fields of `step`.
    pub fn validate_step(&self, step: RegisterStep) -> Result<(), ValidationError> {
        self.validate_step_in(step, current_year())
    }

    fn validate_step_in(&self, step: RegisterStep, year: i32) -> Result<(), ValidationError> {
        match step {
            RegisterStep::Details => {
                check_gate(self.submit_gate(), EntityKind::Institution)?;
                let blank = [self.name.as_str(), self.code.raw(), self.address.as_str()]
                    .iter()
                    .any(|value| value.trim().is_empty());
                if blank || self.institution_type.is_none() {
                    return Err(ValidationError::required(
                        "details",
                        "Complete all institution details",
                    ));
                }
                validate_established_year(&self.established_year, year)?;
            }
            RegisterStep::Contact => {
                if self.contact_email.trim().is_empty() || self.contact_phone.trim().is_empty() {
                    return Err(ValidationError::required(
                        "contact",
                        "Complete contact details",
                    ));
                }
                validate_phone(&self.contact_phone)?;
                validate_email(&self.contact_email)?;
            }
            RegisterStep::Credentials => validate_password(&self.password)?,
        }
        Ok(())
    }

    /// Validate the current step and move on.
    pub fn next_step(&mut self) -> Result<RegisterStep, ValidationError> {
        self.validate_step(self.step)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn previous_step(&mut self) -> RegisterStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Validate every step and build the request.
    pub fn to_request(&self) -> Result<RegisterInstitutionRequest, ValidationError> {
        let year = current_year();
        for step in [
            RegisterStep::Details,
            RegisterStep::Contact,
            RegisterStep::Credentials,
        ] {
            self.validate_step_in(step, year)?;
        }

        let institution_type = self.institution_type.ok_or_else(|| {
            ValidationError::required("details", "Complete all institution details")
        })?;
        Ok(RegisterInstitutionRequest {
            name: self.name.trim().to_string(),
            code: self.code.normalized(),
            address: self.address.trim().to_string(),
            established_year: validate_established_year(&self.established_year, year)?,
            contact_email: self.contact_email.trim().to_string(),
            contact_phone: self.contact_phone.clone(),
            password: self.password.clone(),
            institution_type,
        })
    }

    /// Register from the last step.
    pub async fn submit(
        &mut self,
        client: &RestClient,
        notifier: &dyn Notifier,
    ) -> ClientResult<()> {
        if self.step != RegisterStep::Credentials {
            return rejected(
                notifier,
                ValidationError::invalid("step", "Complete all steps before registering"),
            );
        }
        let request = match self.to_request() {
            Ok(request) => request,
            Err(err) => return rejected(notifier, err),
        };
        let result = client.register_institution(&request).await;
        if result.is_ok() {
            tracing::info!(code = %request.code, "institution registered");
        }
        report(notifier, result, "Institution registered successfully")?;
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.code.close();
        self.name.clear();
        self.address.clear();
        self.established_year.clear();
        self.institution_type = None;
        self.contact_email.clear();
        self.contact_phone.clear();
        self.password.clear();
        self.step = RegisterStep::Details;
    }
}
