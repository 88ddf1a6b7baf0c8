//! Campus Client
//!
//! Institution admin client: configuration, the REST API, the signed-in
//! session, and the admin forms whose code fields are checked for
//! uniqueness while the user types.

pub mod api_client;
pub mod config;
pub mod error;
pub mod forms;
pub mod notifications;
pub mod oracle;
pub mod session;
pub mod telemetry;

pub use api_client::{parse_envelope, ApiClientError, RestClient};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
pub use forms::{BranchForm, CourseForm, DepartmentForm, RegisterInstitutionForm, RegisterStep};
pub use notifications::{
    Notification, NotificationLevel, NotificationLog, Notifier, TracingNotifier,
};
pub use oracle::{rest_checker, RestCodeOracle};
pub use session::SessionContext;
pub use telemetry::{init_tracing, TelemetryError};

/// Load configuration, install tracing and build the REST client.
pub fn bootstrap() -> ClientResult<(ClientConfig, RestClient)> {
    let config = ClientConfig::load()?;
    init_tracing(config.log_filter.as_deref())?;
    let client = RestClient::new(&config)?;
    tracing::info!(api_base_url = %client.base_url(), "campus client ready");
    Ok((config, client))
}
