//! Entity and wire types
//!
//! Mirrors the documents the backend returns (camelCase fields, `_id` as the
//! identifier) and the request bodies the client sends.

use crate::code::CodeStyle;
use crate::identity::{BranchId, CourseId, DepartmentId, FacultyId, InstitutionId};
use serde::{Deserialize, Serialize};

// ============================================================================
// ENTITY KINDS
// ============================================================================

/// Entity types that carry a code unique within some scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Institution,
    Department,
    Branch,
    Course,
}

impl EntityKind {
    /// REST collection segment (`/api/{collection}/...`).
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Institution => "institutions",
            EntityKind::Department => "departments",
            EntityKind::Branch => "branches",
            EntityKind::Course => "courses",
        }
    }

    /// Human-readable name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Institution => "Institution",
            EntityKind::Department => "Department",
            EntityKind::Branch => "Branch",
            EntityKind::Course => "Course",
        }
    }

    /// How codes of this kind are normalized.
    pub fn code_style(&self) -> CodeStyle {
        match self {
            EntityKind::Department => CodeStyle::AsTyped,
            EntityKind::Institution | EntityKind::Branch | EntityKind::Course => CodeStyle::Upper,
        }
    }
}

// ============================================================================
// DOCUMENTS
// ============================================================================

/// Institution category offered at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstitutionType {
    University,
    College,
    School,
    Institute,
}

impl InstitutionType {
    pub fn all() -> &'static [InstitutionType] {
        &[
            InstitutionType::University,
            InstitutionType::College,
            InstitutionType::School,
            InstitutionType::Institute,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    #[serde(rename = "_id")]
    pub id: InstitutionId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub established_year: Option<i32>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(rename = "type", default)]
    pub institution_type: Option<InstitutionType>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: DepartmentId,
    #[serde(default)]
    pub institution_id: Option<InstitutionId>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub head_of_department: Option<FacultyId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(rename = "_id")]
    pub id: BranchId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default = "default_open")]
    pub is_open: bool,
}

/// Component type of a course evaluation component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentKind {
    Theory,
    Lab,
}

/// Evaluation scheme a course is graded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationScheme {
    /// Mid-semester plus end-semester examination.
    MidEnd,
    /// Class tests plus end-semester examination.
    CtEnd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub max_marks: f64,
    pub weightage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: CourseId,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub credits: Option<f64>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub evaluation_scheme: Option<EvaluationScheme>,
    #[serde(default)]
    pub components: Vec<CourseComponent>,
    #[serde(default = "default_open")]
    pub is_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    #[serde(rename = "_id")]
    pub id: FacultyId,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_in_charge: bool,
}

fn default_open() -> bool {
    true
}

// ============================================================================
// REQUESTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInstitutionRequest {
    pub name: String,
    pub code: String,
    pub address: String,
    pub established_year: i32,
    pub contact_email: String,
    pub contact_phone: String,
    pub password: String,
    #[serde(rename = "type")]
    pub institution_type: InstitutionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    pub institution_id: InstitutionId,
    pub name: String,
    pub code: String,
    pub contact_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_of_department: Option<FacultyId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    pub name: String,
    pub code: String,
    pub contact_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    pub name: String,
    pub code: String,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchRequest {
    pub name: String,
    pub code: String,
    pub department_id: DepartmentId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBranchOpenRequest {
    pub is_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub department_id: DepartmentId,
    pub name: String,
    pub code: String,
    pub credits: f64,
    pub semester: String,
    pub evaluation_scheme: EvaluationScheme,
    pub components: Vec<CourseComponent>,
}

/// Body of a `code-exists` call. Scope parameters are flattened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExistsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<InstitutionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExistsResponse {
    #[serde(default)]
    pub exists: bool,
}
