//! Department create/edit form.

use super::{check_gate, rejected, report};
use crate::api_client::RestClient;
use crate::error::ClientResult;
use crate::notifications::Notifier;
use crate::oracle::RestCodeOracle;
use campus_check::{
    AvailabilityChecker, AvailabilityOracle, CheckOutcome, CodeField, StatusFlags, SubmitGate,
};
use campus_core::validate::require;
use campus_core::{
    CodeScope, CreateDepartmentRequest, Department, DepartmentId, EntityKind, FacultyId,
    InstitutionId, UpdateDepartmentRequest, ValidationError,
};

const ALL_REQUIRED: &str = "All fields are required";

/// Department codes keep their casing, so the checker handed in should be
/// built with `CheckerConfig::for_kind(EntityKind::Department)`.
#[derive(Debug)]
pub struct DepartmentForm<O = RestCodeOracle> {
    pub name: String,
    pub contact_email: String,
    pub head_of_department: Option<FacultyId>,
    institution_id: InstitutionId,
    code: CodeField<CodeScope, O>,
    editing: Option<DepartmentId>,
}

impl<O> DepartmentForm<O>
where
    O: AvailabilityOracle<CodeScope> + 'static,
{
    pub fn new(checker: AvailabilityChecker<CodeScope, O>, institution_id: InstitutionId) -> Self {
        let scope = CodeScope::Department {
            institution_id: institution_id.clone(),
        };
        Self {
            name: String::new(),
            contact_email: String::new(),
            head_of_department: None,
            institution_id,
            code: CodeField::with_scope(checker, scope),
            editing: None,
        }
    }

    /// Pre-filled form for an existing department. Its current code is
    /// accepted without a uniqueness check.
    pub fn for_edit(
        checker: AvailabilityChecker<CodeScope, O>,
        institution_id: InstitutionId,
        department: &Department,
    ) -> Self {
        let mut form = Self::new(checker, institution_id);
        form.name = department.name.clone();
        form.contact_email = department.contact_email.clone().unwrap_or_default();
        form.head_of_department = department.head_of_department.clone();
        form.editing = Some(department.id.clone());
        form.code.begin_edit(&department.code);
        form
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_code(&mut self, raw: &str) -> Option<CheckOutcome> {
        self.code.set_value(raw)
    }

    pub fn blur_code(&mut self) -> Option<CheckOutcome> {
        self.code.blur()
    }

    /// The code as it is checked and submitted.
    pub fn code(&self) -> String {
        self.code.normalized()
    }

    pub fn code_flags(&self) -> StatusFlags {
        self.code.flags()
    }

    pub fn submit_gate(&self) -> SubmitGate {
        self.code.submit_gate(false)
    }

    fn checked_fields(&self) -> Result<(String, String, String), ValidationError> {
        check_gate(self.submit_gate(), EntityKind::Department)?;
        let name = require("name", &self.name, ALL_REQUIRED)?;
        require("code", self.code.raw(), ALL_REQUIRED)?;
        let email = require("contactEmail", &self.contact_email, ALL_REQUIRED)?;
        Ok((name.to_string(), self.code.normalized(), email.to_string()))
    }

    pub fn to_request(&self) -> Result<CreateDepartmentRequest, ValidationError> {
        let (name, code, contact_email) = self.checked_fields()?;
        Ok(CreateDepartmentRequest {
            institution_id: self.institution_id.clone(),
            name,
            code,
            contact_email,
            head_of_department: self.head_of_department.clone(),
        })
    }

    pub fn to_update_request(&self) -> Result<UpdateDepartmentRequest, ValidationError> {
        let (name, code, contact_email) = self.checked_fields()?;
        Ok(UpdateDepartmentRequest {
            name,
            code,
            contact_email,
        })
    }

    /// Create, or update when editing.
    pub async fn submit(
        &mut self,
        client: &RestClient,
        notifier: &dyn Notifier,
    ) -> ClientResult<()> {
        match self.editing.clone() {
            Some(department_id) => {
                let request = match self.to_update_request() {
                    Ok(request) => request,
                    Err(err) => return rejected(notifier, err),
                };
                let result = client.update_department(&department_id, &request).await;
                report(notifier, result, "Department updated successfully")
            }
            None => {
                let request = match self.to_request() {
                    Ok(request) => request,
                    Err(err) => return rejected(notifier, err),
                };
                let result = client.create_department(&request).await;
                report(notifier, result, "Department created successfully")?;
                self.reset();
                Ok(())
            }
        }
    }

    /// Clear every field. Closing an edit form drops its exemption.
    pub fn reset(&mut self) {
        self.code.close();
        self.name.clear();
        self.contact_email.clear();
        self.head_of_department = None;
        self.editing = None;
    }
}
