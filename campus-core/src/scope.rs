//! Uniqueness scopes
//!
//! A code is only unique within something: institution codes across the
//! platform, department and branch codes within an institution, course
//! codes within a department. `CodeScope` names that something and is the
//! key the availability checker tracks state under.

use crate::code::CodeStyle;
use crate::entity::{CodeExistsRequest, EntityKind};
use crate::identity::{DepartmentId, InstitutionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeScope {
    /// Institution codes, checked during (unauthenticated) registration.
    Institution,
    Department { institution_id: InstitutionId },
    Branch { institution_id: InstitutionId },
    Course { department_id: DepartmentId },
}

impl CodeScope {
    pub fn kind(&self) -> EntityKind {
        match self {
            CodeScope::Institution => EntityKind::Institution,
            CodeScope::Department { .. } => EntityKind::Department,
            CodeScope::Branch { .. } => EntityKind::Branch,
            CodeScope::Course { .. } => EntityKind::Course,
        }
    }

    pub fn code_style(&self) -> CodeStyle {
        self.kind().code_style()
    }

    /// Build the `code-exists` body for an already normalized code.
    pub fn to_request(&self, code: &str) -> CodeExistsRequest {
        let (institution_id, department_id) = match self {
            CodeScope::Institution => (None, None),
            CodeScope::Department { institution_id } | CodeScope::Branch { institution_id } => {
                (Some(institution_id.clone()), None)
            }
            CodeScope::Course { department_id } => (None, Some(department_id.clone())),
        };
        CodeExistsRequest {
            institution_id,
            department_id,
            code: code.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_with_different_parents_differ() {
        let a = CodeScope::Course {
            department_id: DepartmentId::new("a"),
        };
        let b = CodeScope::Course {
            department_id: DepartmentId::new("b"),
        };
        assert_ne!(a, b);
        assert_eq!(a.kind(), b.kind());
    }

    #[test]
    fn test_department_and_branch_scopes_are_distinct() {
        let inst = InstitutionId::new("i1");
        let dept = CodeScope::Department {
            institution_id: inst.clone(),
        };
        let branch = CodeScope::Branch {
            institution_id: inst,
        };
        assert_ne!(dept, branch);
    }

    #[test]
    fn test_branch_request_carries_institution() {
        let scope = CodeScope::Branch {
            institution_id: InstitutionId::new("i1"),
        };
        let req = scope.to_request("CSEA");
        assert_eq!(req.institution_id, Some(InstitutionId::new("i1")));
        assert!(req.department_id.is_none());
        assert_eq!(req.code, "CSEA");
    }
}
