//! Branch create/edit form.

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
    Branch, BranchId, CodeScope, CreateBranchRequest, DepartmentId, EntityKind, InstitutionId,
    UpdateBranchRequest, ValidationError,
};

const ALL_REQUIRED: &str = "All fields are required";

/// Branch codes are unique per institution, whatever department the branch
/// belongs to.
#[derive(Debug)]
pub struct BranchForm<O = RestCodeOracle> {
    pub name: String,
    pub department_id: Option<DepartmentId>,
    institution_id: InstitutionId,
    code: CodeField<CodeScope, O>,
    editing: Option<BranchId>,
}

impl<O> BranchForm<O>
where
    O: AvailabilityOracle<CodeScope> + 'static,
{
    pub fn new(checker: AvailabilityChecker<CodeScope, O>, institution_id: InstitutionId) -> Self {
        let scope = CodeScope::Branch {
            institution_id: institution_id.clone(),
        };
        Self {
            name: String::new(),
            department_id: None,
            institution_id,
            code: CodeField::with_scope(checker, scope),
            editing: None,
        }
    }

    pub fn for_edit(
        checker: AvailabilityChecker<CodeScope, O>,
        institution_id: InstitutionId,
        branch: &Branch,
    ) -> Self {
        let mut form = Self::new(checker, institution_id);
        form.name = branch.name.clone();
        form.department_id = branch.department_id.clone();
        form.editing = Some(branch.id.clone());
        form.code.begin_edit(&branch.code);
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

    pub fn code(&self) -> String {
        self.code.normalized()
    }

    pub fn code_flags(&self) -> StatusFlags {
        self.code.flags()
    }

    pub fn submit_gate(&self) -> SubmitGate {
        self.code.submit_gate(false)
    }

    fn checked_fields(&self) -> Result<(String, String, DepartmentId), ValidationError> {
        check_gate(self.submit_gate(), EntityKind::Branch)?;
        let name = require("name", &self.name, ALL_REQUIRED)?;
        require("code", self.code.raw(), ALL_REQUIRED)?;
        let department_id = self
            .department_id
            .clone()
            .ok_or_else(|| ValidationError::required("departmentId", ALL_REQUIRED))?;
        Ok((name.to_string(), self.code.normalized(), department_id))
    }

    pub fn to_request(&self) -> Result<CreateBranchRequest, ValidationError> {
        let (name, code, department_id) = self.checked_fields()?;
        Ok(CreateBranchRequest {
            name,
            code,
            department_id,
        })
    }

    pub fn to_update_request(&self) -> Result<UpdateBranchRequest, ValidationError> {
        let (name, code, department_id) = self.checked_fields()?;
        Ok(UpdateBranchRequest {
            name,
            code,
            department_id,
        })
    }

    pub async fn submit(
        &mut self,
        client: &RestClient,
        notifier: &dyn Notifier,
    ) -> ClientResult<()> {
        match self.editing.clone() {
            Some(branch_id) => {
                let request = match self.to_update_request() {
                    Ok(request) => request,
                    Err(err) => return rejected(notifier, err),
                };
                let result = client.update_branch(&branch_id, &request).await;
                report(notifier, result, "Branch updated successfully")
            }
            None => {
                let request = match self.to_request() {
                    Ok(request) => request,
                    Err(err) => return rejected(notifier, err),
                };
                let result = client.create_branch(&self.institution_id, &request).await;
                report(notifier, result, "Branch created successfully")?;
                self.reset();
                Ok(())
            }
        }
    }

    pub fn reset(&mut self) {
        self.code.close();
        self.name.clear();
        self.department_id = None;
        self.editing = None;
    }
}
