//! A single code input bound to a checker.
//!
//! Forms own one [`CodeField`] per code input. It remembers which scope the
//! field currently checks against, the raw text, and (in edit mode) the
//! entity's own code, and it turns scope switches and modal closes into the
//! right checker calls.

use crate::checker::{AvailabilityChecker, CheckOutcome};
use crate::oracle::AvailabilityOracle;
use crate::status::{AvailabilityStatus, StatusFlags};
use std::fmt;
use std::hash::Hash;

/// Whether a form may submit given its code field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitGate {
    Open,
    /// A check is in flight.
    Checking,
    /// The backend says the code is taken.
    Taken,
    /// No confirmation for the current value and the form requires one.
    Unconfirmed,
}

impl SubmitGate {
    pub fn allows_submit(&self) -> bool {
        matches!(self, SubmitGate::Open)
    }
}

pub struct CodeField<K, O> {
    checker: AvailabilityChecker<K, O>,
    scope: Option<K>,
    raw: String,
    own: Option<(K, String)>,
}

impl<K: fmt::Debug, O> fmt::Debug for CodeField<K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeField")
            .field("scope", &self.scope)
            .field("raw", &self.raw)
            .field("own", &self.own)
            .finish_non_exhaustive()
    }
}

impl<K, O> CodeField<K, O>
where
    K: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
    O: AvailabilityOracle<K> + 'static,
{
    /// A field with no scope yet (e.g. no parent department selected).
    pub fn new(checker: AvailabilityChecker<K, O>) -> Self {
        Self {
            checker,
            scope: None,
            raw: String::new(),
            own: None,
        }
    }

    pub fn with_scope(checker: AvailabilityChecker<K, O>, scope: K) -> Self {
        Self {
            scope: Some(scope),
            ..Self::new(checker)
        }
    }

    /// Enter edit mode for an entity whose persisted code is `code`.
    ///
    /// The code is exempt from the uniqueness check, but only within the
    /// scope the field is in right now. The field is pre-filled with it.
    pub fn begin_edit(&mut self, code: &str) -> Option<CheckOutcome> {
        if let Some(scope) = self.scope.clone() {
            self.checker.set_own_code(scope.clone(), code);
            self.own = Some((scope, code.to_string()));
        }
        self.set_value(code)
    }

    /// The user typed; re-evaluate the current value.
    ///
    /// Returns `None` while the field has no scope.
    pub fn set_value(&mut self, raw: &str) -> Option<CheckOutcome> {
        self.raw = raw.to_string();
        self.recheck()
    }

    /// The field lost focus. Same evaluation as an edit, which makes it a
    /// no-op unless a previous failure left the value unchecked.
    pub fn blur(&mut self) -> Option<CheckOutcome> {
        self.recheck()
    }

    /// Switch the parent scope (e.g. another department was selected).
    ///
    /// The old scope is dropped entirely and the current text is checked
    /// again under the new one.
    pub fn set_scope(&mut self, scope: Option<K>) -> Option<CheckOutcome> {
        if self.scope == scope {
            return None;
        }
        if let Some(old) = self.scope.take() {
            self.checker.forget(&old);
        }
        self.scope = scope;

        if let (Some(scope), Some((own_scope, code))) = (&self.scope, &self.own) {
            if scope == own_scope {
                self.checker.set_own_code(scope.clone(), code);
            }
        }
        self.recheck()
    }

    /// Modal closed or form reset. Clears the text and the checker state.
    pub fn close(&mut self) {
        if let Some(scope) = &self.scope {
            self.checker.forget(scope);
        }
        self.raw.clear();
        self.own = None;
    }

    fn recheck(&mut self) -> Option<CheckOutcome> {
        let scope = self.scope.clone()?;
        Some(self.checker.on_candidate_change(scope, &self.raw))
    }

    pub fn availability(&self) -> AvailabilityStatus {
        self.scope
            .as_ref()
            .map(|scope| self.checker.availability(scope))
            .unwrap_or_default()
    }

    pub fn flags(&self) -> StatusFlags {
        self.availability().flags()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The value as it would be sent to the backend.
    pub fn normalized(&self) -> String {
        self.checker.config().normalize(&self.raw)
    }

    pub fn scope(&self) -> Option<&K> {
        self.scope.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.own.is_some()
    }

    /// Gate for the submit button.
    ///
    /// With `require_confirmation`, an `Unknown` status (check failed or
    /// never ran) blocks submission as well.
    pub fn submit_gate(&self, require_confirmation: bool) -> SubmitGate {
        match self.availability() {
            AvailabilityStatus::Pending => SubmitGate::Checking,
            AvailabilityStatus::Resolved { exists: true } => SubmitGate::Taken,
            AvailabilityStatus::Resolved { exists: false } => SubmitGate::Open,
            AvailabilityStatus::Unknown if require_confirmation => SubmitGate::Unconfirmed,
            AvailabilityStatus::Unknown => SubmitGate::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_open_allows_submit() {
        assert!(SubmitGate::Open.allows_submit());
        assert!(!SubmitGate::Checking.allows_submit());
        assert!(!SubmitGate::Taken.allows_submit());
        assert!(!SubmitGate::Unconfirmed.allows_submit());
    }
}
