//! Course creation form.
//!
//! Course codes are unique per department, so the code field has no scope
//! until a department is picked, and picking another one checks the code
//! again under the new department.

use super::{check_gate, rejected, report};
use crate::api_client::RestClient;
use crate::error::ClientResult;
use crate::notifications::Notifier;
use crate::oracle::RestCodeOracle;
use campus_check::{
    AvailabilityChecker, AvailabilityOracle, CheckOutcome, CodeField, StatusFlags, SubmitGate,
};
use campus_core::validate::{parse_credits, require, validate_components};
use campus_core::{
    CodeScope, ComponentDraft, ComponentKind, CreateCourseRequest, DepartmentId, EntityKind,
    EvaluationScheme, ValidationError,
};

const ALL_REQUIRED: &str = "All fields are required";

#[derive(Debug)]
pub struct CourseForm<O = RestCodeOracle> {
    pub name: String,
    pub credits: String,
    pub semester: String,
    pub evaluation_scheme: Option<EvaluationScheme>,
    pub components: Vec<ComponentDraft>,
    department_id: Option<DepartmentId>,
    code: CodeField<CodeScope, O>,
}

impl<O> CourseForm<O>
where
    O: AvailabilityOracle<CodeScope> + 'static,
{
    pub fn new(checker: AvailabilityChecker<CodeScope, O>) -> Self {
        Self {
            name: String::new(),
            credits: String::new(),
            semester: String::new(),
            evaluation_scheme: None,
            components: Vec::new(),
            department_id: None,
            code: CodeField::new(checker),
        }
    }

    pub fn department_id(&self) -> Option<&DepartmentId> {
        self.department_id.as_ref()
    }

    /// Pick (or clear) the department. The code keeps its text and is
    /// checked again under the new department.
    pub fn select_department(&mut self, department_id: Option<DepartmentId>) -> Option<CheckOutcome> {
        if self.department_id == department_id {
            return None;
        }
        tracing::debug!(department_id = ?department_id, "course department changed");
        self.department_id = department_id;
        let scope = self
            .department_id
            .clone()
            .map(|department_id| CodeScope::Course { department_id });
        self.code.set_scope(scope)
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

    /// Append an empty component and return its index.
    pub fn add_component(&mut self, kind: ComponentKind) -> usize {
        self.components.push(ComponentDraft::new(kind));
        self.components.len() - 1
    }

    pub fn remove_component(&mut self, index: usize) -> Option<ComponentDraft> {
        (index < self.components.len()).then(|| self.components.remove(index))
    }

    pub fn to_request(&self) -> Result<CreateCourseRequest, ValidationError> {
        let department_id = self
            .department_id
            .clone()
            .ok_or_else(|| ValidationError::required("departmentId", ALL_REQUIRED))?;
        let name = require("name", &self.name, ALL_REQUIRED)?;
        require("code", self.code.raw(), ALL_REQUIRED)?;
        if self.credits.is_empty() {
            return Err(ValidationError::required("credits", ALL_REQUIRED));
        }
        let semester = require("semester", &self.semester, ALL_REQUIRED)?;
        let evaluation_scheme = self.evaluation_scheme.ok_or_else(|| {
            ValidationError::required("evaluationScheme", "Select evaluation scheme")
        })?;

        check_gate(self.submit_gate(), EntityKind::Course)?;

        let credits = parse_credits(&self.credits)?;
        let components = validate_components(&self.components)?;

        Ok(CreateCourseRequest {
            department_id,
            name: name.to_string(),
            code: self.code.normalized(),
            credits,
            semester: semester.to_string(),
            evaluation_scheme,
            components,
        })
    }

    pub async fn submit(
        &mut self,
        client: &RestClient,
        notifier: &dyn Notifier,
    ) -> ClientResult<()> {
        let request = match self.to_request() {
            Ok(request) => request,
            Err(err) => return rejected(notifier, err),
        };
        let result = client.create_course(&request).await;
        report(notifier, result, "Course created successfully")?;
        self.reset();
        Ok(())
    }

    /// Clear every field, including the selected department.
    pub fn reset(&mut self) {
        self.code.close();
        self.code.set_scope(None);
        self.department_id = None;
        self.name.clear();
        self.credits.clear();
        self.semester.clear();
        self.evaluation_scheme = None;
        self.components.clear();
    }
}
