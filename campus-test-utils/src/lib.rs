//! Campus Test Utilities
//!
//! Shared test infrastructure for the campus workspace:
//! - Mock availability oracles (scripted and static)
//! - Proptest generators for codes, ids and scopes
//! - Fixtures for common scenarios

pub use campus_check::{AvailabilityOracle, CheckError};
pub use campus_core::{
    CodeScope, DepartmentId, EntityKind, Institution, InstitutionId, InstitutionType,
};

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};

// ============================================================================
// MOCK ORACLES
// ============================================================================

/// One outstanding oracle call, answered by the test.
#[derive(Debug)]
pub struct PendingCall<K> {
    pub scope: K,
    pub code: String,
    responder: oneshot::Sender<Result<bool, CheckError>>,
}

impl<K> PendingCall<K> {
    /// Deliver the answer. Returns `false` if the caller already gave up
    /// (the check was cancelled).
    pub fn respond(self, result: Result<bool, CheckError>) -> bool {
        self.responder.send(result).is_ok()
    }

    /// True once the checker dropped the request.
    pub fn is_abandoned(&self) -> bool {
        self.responder.is_closed()
    }

    /// Wait until the checker drops the request.
    pub async fn abandoned(&mut self) {
        self.responder.closed().await;
    }
}

/// Oracle whose calls are handed to the test one by one, so responses can be
/// delivered in any order.
#[derive(Debug)]
pub struct ScriptedOracle<K> {
    calls: mpsc::UnboundedSender<PendingCall<K>>,
}

impl<K> ScriptedOracle<K> {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingCall<K>>) {
        let (calls, rx) = mpsc::unbounded_channel();
        (Self { calls }, rx)
    }
}

#[async_trait]
impl<K> AvailabilityOracle<K> for ScriptedOracle<K>
where
    K: Clone + Send + Sync,
{
    async fn code_exists(&self, scope: &K, code: &str) -> Result<bool, CheckError> {
        let (responder, answer) = oneshot::channel();
        let call = PendingCall {
            scope: scope.clone(),
            code: code.to_string(),
            responder,
        };
        self.calls
            .send(call)
            .map_err(|_| CheckError::Transport("scripted oracle receiver dropped".into()))?;
        answer
            .await
            .map_err(|_| CheckError::Transport("scripted call dropped unanswered".into()))?
    }
}

/// Oracle that answers immediately from a fixed set of taken codes.
#[derive(Debug)]
pub struct StaticOracle<K> {
    taken: HashSet<String>,
    failing: AtomicBool,
    calls: AtomicUsize,
    seen: Mutex<Vec<(K, String)>>,
}

impl<K> StaticOracle<K> {
    pub fn new<I, S>(taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: taken.into_iter().map(Into::into).collect(),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// While set, every call fails with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(K, String)>
    where
        K: Clone,
    {
        self.seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl<K> AvailabilityOracle<K> for StaticOracle<K>
where
    K: Clone + Send + Sync,
{
    async fn code_exists(&self, scope: &K, code: &str) -> Result<bool, CheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((scope.clone(), code.to_string()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(CheckError::Transport("connection refused".into()));
        }
        Ok(self.taken.contains(code))
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    use super::*;
    use proptest::prelude::*;

    /// A code as a user might type it: mixed case, optional padding.
    pub fn arb_typed_code() -> impl Strategy<Value = String> {
        ("[ ]{0,3}", "[A-Za-z0-9]{0,10}", "[ ]{0,3}")
            .prop_map(|(lead, body, trail)| format!("{lead}{body}{trail}"))
    }

    /// A code long enough to be checked.
    pub fn arb_checkable_code() -> impl Strategy<Value = String> {
        "[A-Z0-9]{2,10}"
    }

    pub fn arb_institution_id() -> impl Strategy<Value = InstitutionId> {
        "[a-f0-9]{24}".prop_map(InstitutionId::new)
    }

    pub fn arb_department_id() -> impl Strategy<Value = DepartmentId> {
        "[a-f0-9]{24}".prop_map(DepartmentId::new)
    }

    pub fn arb_entity_kind() -> impl Strategy<Value = EntityKind> {
        prop_oneof![
            Just(EntityKind::Institution),
            Just(EntityKind::Department),
            Just(EntityKind::Branch),
            Just(EntityKind::Course),
        ]
    }

    pub fn arb_code_scope() -> impl Strategy<Value = CodeScope> {
        prop_oneof![
            Just(CodeScope::Institution),
            arb_institution_id().prop_map(|institution_id| CodeScope::Department { institution_id }),
            arb_institution_id().prop_map(|institution_id| CodeScope::Branch { institution_id }),
            arb_department_id().prop_map(|department_id| CodeScope::Course { department_id }),
        ]
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    use super::*;
    use serde_json::{json, Value};

    pub fn institution_id() -> InstitutionId {
        InstitutionId::new("665f1c2e9b1d4a0012ab34cd")
    }

    pub fn department_id(n: u8) -> DepartmentId {
        DepartmentId::new(format!("665f1c2e9b1d4a0012ab35{n:02x}"))
    }

    pub fn department_scope() -> CodeScope {
        CodeScope::Department {
            institution_id: institution_id(),
        }
    }

    pub fn branch_scope() -> CodeScope {
        CodeScope::Branch {
            institution_id: institution_id(),
        }
    }

    pub fn course_scope(n: u8) -> CodeScope {
        CodeScope::Course {
            department_id: department_id(n),
        }
    }

    pub fn institution() -> Institution {
        Institution {
            id: institution_id(),
            name: "Northfield College".into(),
            code: "NFC".into(),
            address: Some("12 College Road".into()),
            established_year: Some(1962),
            contact_email: Some("admin@northfield.edu".into()),
            contact_phone: Some("9876543210".into()),
            institution_type: Some(InstitutionType::College),
            avatar: None,
        }
    }

    /// Institution document as the backend sends it.
    pub fn institution_json() -> Value {
        json!({
            "_id": institution_id().as_str(),
            "name": "Northfield College",
            "code": "NFC",
            "address": "12 College Road",
            "establishedYear": 1962,
            "contactEmail": "admin@northfield.edu",
            "contactPhone": "9876543210",
            "type": "College"
        })
    }

    /// Standard response envelope.
    pub fn envelope(data: Value) -> Value {
        json!({ "success": true, "message": "OK", "data": data })
    }

    pub fn failure_envelope(message: &str) -> Value {
        json!({ "success": false, "message": message })
    }

    pub fn code_exists_body(exists: bool) -> Value {
        envelope(json!({ "exists": exists }))
    }
}
