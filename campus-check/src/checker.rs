//! Debounced, single-flight availability checker.
//!
//! Every scope key owns a slot holding the status, the value currently in
//! the field, the last value checked or in flight, and the cancellation
//! token of the live request. All transitions happen under one lock and
//! are synchronous; the only suspension point is the oracle call itself.

use crate::oracle::{AvailabilityOracle, CheckError};
use crate::status::{AvailabilityStatus, StatusFlags};
use campus_core::{meets_threshold, normalize_code, CodeStyle, EntityKind, MIN_CODE_LEN};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// How candidate values are normalized and gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Values shorter than this (in characters) never reach the oracle.
    pub min_len: usize,
    /// Normalization applied before comparing or sending.
    pub style: CodeStyle,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            min_len: MIN_CODE_LEN,
            style: CodeStyle::Upper,
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with the normalization `kind` uses for its codes.
    pub fn for_kind(kind: EntityKind) -> Self {
        Self::default().with_style(kind.code_style())
    }

    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    pub fn with_style(mut self, style: CodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn normalize(&self, raw: &str) -> String {
        normalize_code(raw, self.style)
    }
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// What a candidate change did.
#[derive(Debug)]
pub enum CheckOutcome {
    /// Too short (or blank); the scope was reset to `Unknown`.
    BelowThreshold,
    /// Same value as the last one checked or in flight; nothing happened.
    Unchanged,
    /// The value is the entity's own persisted code; resolved without a call.
    OwnCode,
    /// A request was issued.
    Dispatched(CheckTicket),
}

impl CheckOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, CheckOutcome::Dispatched(_))
    }

    /// Wait for the dispatched request (if any) to settle.
    pub async fn settled(self) {
        if let CheckOutcome::Dispatched(ticket) = self {
            ticket.settled().await;
        }
    }
}

/// Handle on a dispatched check.
///
/// Dropping the ticket does not cancel the check.
#[derive(Debug)]
pub struct CheckTicket {
    sequence: u64,
    handle: JoinHandle<()>,
}

impl CheckTicket {
    /// Sequence token of the request within its scope.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Resolves once the response has been applied, discarded, or the
    /// request was cancelled.
    pub async fn settled(self) {
        // A panicking oracle only loses its own answer.
        let _ = self.handle.await;
    }
}

// ============================================================================
// PER-SCOPE STATE
// ============================================================================

#[derive(Debug)]
struct InFlight {
    sequence: u64,
    cancel: CancellationToken,
}

#[derive(Debug, Default)]
struct ScopeSlot {
    status: AvailabilityStatus,
    /// Normalized value currently in the field (None below threshold).
    current: Option<String>,
    /// Last value already checked or currently in flight.
    requested: Option<String>,
    sequence: u64,
    in_flight: Option<InFlight>,
    own_code: Option<String>,
}

/// Result of applying a response to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settlement {
    Applied(AvailabilityStatus),
    Stale,
    Cancelled,
}

impl ScopeSlot {
    fn cancel_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                in_flight.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Back to `Unknown`, forgetting the field value. Edit-mode exemption stays.
    fn clear_value(&mut self) {
        self.cancel_in_flight();
        self.current = None;
        self.requested = None;
        self.status = AvailabilityStatus::Unknown;
    }

    fn begin(&mut self, code: &str) -> (u64, CancellationToken) {
        self.cancel_in_flight();
        self.sequence += 1;
        self.requested = Some(code.to_string());
        self.status = AvailabilityStatus::Pending;
        let cancel = CancellationToken::new();
        self.in_flight = Some(InFlight {
            sequence: self.sequence,
            cancel: cancel.clone(),
        });
        (self.sequence, cancel)
    }

    fn settle(
        &mut self,
        sequence: u64,
        code: &str,
        result: Result<bool, CheckError>,
    ) -> Settlement {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.sequence == sequence)
        {
            self.in_flight = None;
        }

        // The answer must be for the request we are waiting on and for the
        // value that is in the field right now.
        if sequence != self.sequence || self.current.as_deref() != Some(code) {
            return Settlement::Stale;
        }

        match result {
            Ok(exists) => {
                self.status = AvailabilityStatus::Resolved { exists };
                Settlement::Applied(self.status)
            }
            Err(err) => {
                // Nothing is in flight any more, so the status cannot stay
                // Pending. Let the next edit or blur try again.
                self.status = AvailabilityStatus::Unknown;
                self.requested = None;
                if err.is_cancellation() {
                    Settlement::Cancelled
                } else {
                    Settlement::Applied(self.status)
                }
            }
        }
    }
}

struct Slots<K> {
    map: Mutex<HashMap<K, ScopeSlot>>,
}

impl<K> Slots<K> {
    fn lock(&self) -> MutexGuard<'_, HashMap<K, ScopeSlot>> {
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K> Drop for Slots<K> {
    fn drop(&mut self) {
        let map = self.map.get_mut().unwrap_or_else(PoisonError::into_inner);
        for slot in map.values_mut() {
            slot.cancel_in_flight();
        }
    }
}

// ============================================================================
// CHECKER
// ============================================================================

/// Debounced availability checker, generic over the scope key `K` and the
/// remote oracle `O`.
///
/// Clones share state. When the last clone is dropped every in-flight
/// request is cancelled.
///
/// Checks are spawned onto the current Tokio runtime, so
/// [`on_candidate_change`](Self::on_candidate_change) panics if called
/// outside one.
pub struct AvailabilityChecker<K, O> {
    slots: Arc<Slots<K>>,
    oracle: Arc<O>,
    config: CheckerConfig,
}

impl<K, O> Clone for AvailabilityChecker<K, O> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            oracle: Arc::clone(&self.oracle),
            config: self.config,
        }
    }
}

impl<K, O> fmt::Debug for AvailabilityChecker<K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailabilityChecker")
            .field("config", &self.config)
            .field("scopes", &self.slots.lock().len())
            .finish()
    }
}

impl<K, O> AvailabilityChecker<K, O>
where
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
    O: AvailabilityOracle<K> + 'static,
{
    pub fn new(oracle: O, config: CheckerConfig) -> Self {
        Self {
            slots: Arc::new(Slots {
                map: Mutex::new(HashMap::new()),
            }),
            oracle: Arc::new(oracle),
            config,
        }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Entry point for every keystroke or field change.
    pub fn on_candidate_change(&self, scope: K, raw: &str) -> CheckOutcome {
        let code = self.config.normalize(raw);
        let mut slots = self.slots.lock();
        let slot = slots.entry(scope.clone()).or_default();

        if !meets_threshold(&code, self.config.min_len) {
            slot.clear_value();
            tracing::trace!(scope = ?scope, "candidate below threshold");
            return CheckOutcome::BelowThreshold;
        }

        slot.current = Some(code.clone());

        if slot.requested.as_deref() == Some(code.as_str()) {
            return CheckOutcome::Unchanged;
        }

        if slot.own_code.as_deref() == Some(code.as_str()) {
            slot.cancel_in_flight();
            slot.requested = Some(code);
            slot.status = AvailabilityStatus::Resolved { exists: false };
            tracing::debug!(scope = ?scope, "candidate is the entity's own code");
            return CheckOutcome::OwnCode;
        }

        let (sequence, cancel) = slot.begin(&code);
        drop(slots);

        tracing::debug!(scope = ?scope, code = %code, sequence, "dispatching availability check");
        CheckOutcome::Dispatched(self.dispatch(scope, code, sequence, cancel))
    }

    fn dispatch(
        &self,
        scope: K,
        code: String,
        sequence: u64,
        cancel: CancellationToken,
    ) -> CheckTicket {
        let oracle = Arc::clone(&self.oracle);
        let slots: Weak<Slots<K>> = Arc::downgrade(&self.slots);

        let handle = tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::trace!(scope = ?scope, sequence, "availability check cancelled");
                    return;
                }
                result = oracle.code_exists(&scope, &code) => result,
            };

            let Some(slots) = slots.upgrade() else {
                return;
            };
            let mut map = slots.lock();
            let Some(slot) = map.get_mut(&scope) else {
                tracing::trace!(scope = ?scope, sequence, "scope retired before response");
                return;
            };

            let failure = result.as_ref().err().map(ToString::to_string);
            match slot.settle(sequence, &code, result) {
                Settlement::Applied(status) => match failure {
                    Some(reason) => tracing::debug!(
                        scope = ?scope,
                        sequence,
                        %reason,
                        "availability check failed, status reset"
                    ),
                    None => tracing::debug!(scope = ?scope, sequence, ?status, "availability resolved"),
                },
                Settlement::Stale => {
                    tracing::trace!(scope = ?scope, sequence, code = %code, "stale availability response discarded")
                }
                Settlement::Cancelled => {
                    tracing::trace!(scope = ?scope, sequence, "oracle reported cancellation, status reset")
                }
            }
        });

        CheckTicket { sequence, handle }
    }

    pub fn availability(&self, scope: &K) -> AvailabilityStatus {
        self.slots
            .lock()
            .get(scope)
            .map(|slot| slot.status)
            .unwrap_or_default()
    }

    pub fn status(&self, scope: &K) -> StatusFlags {
        self.availability(scope).flags()
    }

    /// Reset a scope to `Unknown` (field cleared, modal closed, scope left).
    pub fn reset(&self, scope: &K) {
        if let Some(slot) = self.slots.lock().get_mut(scope) {
            slot.clear_value();
            tracing::trace!(scope = ?scope, "scope reset");
        }
    }

    /// Reset a scope and drop everything known about it, including the
    /// edit-mode exemption.
    pub fn forget(&self, scope: &K) {
        if let Some(mut slot) = self.slots.lock().remove(scope) {
            slot.cancel_in_flight();
        }
    }

    /// Mark `code` as the entity's own persisted code within `scope`.
    pub fn set_own_code(&self, scope: K, code: &str) {
        let code = self.config.normalize(code);
        self.slots.lock().entry(scope).or_default().own_code = Some(code);
    }

    pub fn clear_own_code(&self, scope: &K) {
        if let Some(slot) = self.slots.lock().get_mut(scope) {
            slot.own_code = None;
        }
    }

    /// Cancel every in-flight check and forget all scopes.
    pub fn shutdown(&self) {
        let mut map = self.slots.lock();
        for slot in map.values_mut() {
            slot.cancel_in_flight();
        }
        map.clear();
    }

    /// Number of scopes with a live request.
    pub fn in_flight(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.in_flight.is_some())
            .count()
    }
}
