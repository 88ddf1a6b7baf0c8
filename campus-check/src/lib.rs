//! Campus Check - Code Availability
//!
//! Answers "is this code already taken?" for form fields while the user is
//! still typing. One [`AvailabilityChecker`] tracks an independent state
//! machine per scope key:
//!
//! ```text
//! Unknown --(long enough & changed)--> Pending --(ok)--> Resolved { exists }
//!                                        |--(error)--> Unknown
//! any --(cleared / too short / closed)--> Unknown
//! ```
//!
//! At most one request is live per scope; superseded requests are cancelled
//! and any answer that no longer matches the field is discarded.

pub mod checker;
pub mod field;
pub mod oracle;
pub mod status;

pub use checker::{AvailabilityChecker, CheckOutcome, CheckTicket, CheckerConfig};
pub use field::{CodeField, SubmitGate};
pub use oracle::{AvailabilityOracle, CheckError};
pub use status::{AvailabilityStatus, StatusFlags};
