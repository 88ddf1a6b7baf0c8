//! Availability oracle backed by the `code-exists` endpoints.

use crate::api_client::{ApiClientError, RestClient};
use crate::config::ClientConfig;
use async_trait::async_trait;
use campus_check::{AvailabilityChecker, AvailabilityOracle, CheckError, CheckerConfig};
use campus_core::{CodeScope, EntityKind};

#[derive(Debug, Clone)]
pub struct RestCodeOracle {
    client: RestClient,
}

impl RestCodeOracle {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AvailabilityOracle<CodeScope> for RestCodeOracle {
    async fn code_exists(&self, scope: &CodeScope, code: &str) -> Result<bool, CheckError> {
        self.client
            .code_exists(scope, code)
            .await
            .map_err(check_error)
    }
}

/// Classify a client failure for the checker.
pub fn check_error(err: ApiClientError) -> CheckError {
    match err {
        ApiClientError::Http(err) if err.is_decode() => CheckError::Decode(err.to_string()),
        ApiClientError::Http(err) => CheckError::Transport(err.to_string()),
        ApiClientError::Api { status, message } => CheckError::Rejected { status, message },
        ApiClientError::Serde(err) => CheckError::Decode(err.to_string()),
        ApiClientError::InvalidResponse(message) => CheckError::Decode(message),
    }
}

/// A checker for codes of `kind`, talking to the backend through `client`.
pub fn rest_checker(
    client: &RestClient,
    kind: EntityKind,
    config: &ClientConfig,
) -> AvailabilityChecker<CodeScope, RestCodeOracle> {
    AvailabilityChecker::new(
        RestCodeOracle::new(client.clone()),
        CheckerConfig::for_kind(kind).with_min_len(config.min_code_len),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_become_rejections() {
        let err = check_error(ApiClientError::Api {
            status: 500,
            message: "Internal server error".into(),
        });
        assert_eq!(
            err,
            CheckError::Rejected {
                status: 500,
                message: "Internal server error".into()
            }
        );
        assert!(!err.is_cancellation());
    }

    #[test]
    fn test_missing_data_is_decode_error() {
        let err = check_error(ApiClientError::InvalidResponse("no data".into()));
        assert!(matches!(err, CheckError::Decode(_)));
    }

    #[tokio::test]
    async fn test_rest_checker_uses_configured_threshold() {
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".into(),
            request_timeout_ms: 100,
            min_code_len: 4,
            log_filter: None,
        };
        let client = RestClient::new(&config).unwrap();
        let checker = rest_checker(&client, EntityKind::Department, &config);
        assert_eq!(checker.config().min_len, 4);
        assert!(matches!(
            checker.on_candidate_change(CodeScope::Institution, "abc"),
            campus_check::CheckOutcome::BelowThreshold
        ));
    }
}
