//! Campus Core - Shared Types
//!
//! Identifiers, uniqueness scopes, code normalization, wire DTOs and the
//! client-side validation rules shared by every other crate in the workspace.
//! No I/O lives here.

pub mod code;
pub mod entity;
pub mod error;
pub mod identity;
pub mod scope;
pub mod validate;

pub use code::{meets_threshold, normalize_code, CodeStyle, MIN_CODE_LEN};
pub use entity::{
    Branch, CodeExistsRequest, CodeExistsResponse, ComponentKind, Course, CourseComponent,
    CreateBranchRequest, CreateCourseRequest, CreateDepartmentRequest, Department, EntityKind,
    EvaluationScheme, Faculty, Institution, InstitutionType, RegisterInstitutionRequest,
    SetBranchOpenRequest, UpdateBranchRequest, UpdateDepartmentRequest,
};
pub use error::{CampusError, CampusResult, ValidationError};
pub use identity::{BranchId, CourseId, DepartmentId, FacultyId, InstitutionId};
pub use scope::CodeScope;
pub use validate::ComponentDraft;
