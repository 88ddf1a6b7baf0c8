//! Institution session.
//!
//! The session is owned by the caller and passed by reference to whatever
//! needs the signed-in institution. There is no global auth state.

use crate::api_client::{ApiClientError, RestClient};
use campus_core::{Institution, InstitutionId};

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    institution: Option<Institution>,
    auth_checked: bool,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the backend who the session cookie belongs to.
    ///
    /// Any failure leaves the session signed out; either way the session
    /// is marked as checked.
    pub async fn init(client: &RestClient) -> Self {
        let mut session = Self::new();
        session.verify(client).await;
        session
    }

    /// Re-run the verification round trip. Returns whether a session exists.
    pub async fn verify(&mut self, client: &RestClient) -> bool {
        match client.current_institution().await {
            Ok(institution) => {
                tracing::info!(institution_id = %institution.id, "session verified");
                self.institution = Some(institution);
            }
            Err(err) => {
                if err.is_unauthorized() {
                    tracing::debug!("no institution session");
                } else {
                    tracing::warn!(error = %err, "session verification failed");
                }
                self.institution = None;
            }
        }
        self.auth_checked = true;
        self.is_authenticated()
    }

    /// Record a successful sign-in.
    pub fn login(&mut self, institution: Institution) {
        self.institution = Some(institution);
        self.auth_checked = true;
    }

    pub fn institution(&self) -> Option<&Institution> {
        self.institution.as_ref()
    }

    pub fn institution_id(&self) -> Option<&InstitutionId> {
        self.institution.as_ref().map(|institution| &institution.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.institution.is_some()
    }

    /// False until the first verification finished.
    pub fn auth_checked(&self) -> bool {
        self.auth_checked
    }

    /// Sign out. Local state is cleared even when the logout call fails.
    pub async fn teardown(&mut self, client: &RestClient) -> Result<(), ApiClientError> {
        let result = client.logout_institution().await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "logout call failed, clearing session anyway");
        }
        self.institution = None;
        result
    }
}
