//! Identity types for campus entities
//!
//! The backend hands out opaque document ids (`"65f0c2a9e1..."`). They are
//! never parsed on the client, only compared and echoed back, so each kind
//! gets its own string newtype to keep them from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw backend id.
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the raw id as sent on the wire.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the id, returning the raw string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

define_entity_id!(
    /// Institution (tenant) identifier.
    InstitutionId
);
define_entity_id!(
    /// Department identifier, scoped to an institution.
    DepartmentId
);
define_entity_id!(
    /// Branch identifier, owned by a department.
    BranchId
);
define_entity_id!(
    /// Course identifier, owned by a department.
    CourseId
);
define_entity_id!(
    /// Faculty member identifier.
    FacultyId
);
