//! REST client for the institution admin backend.
//!
//! The session lives in a cookie set by the backend, so the underlying
//! `reqwest::Client` keeps a cookie store. Every response is wrapped in the
//! envelope `{ success, message, data }`.

use crate::config::ClientConfig;
use campus_core::{
    Branch, BranchId, CodeExistsResponse, CodeScope, Course, CourseId, CreateBranchRequest,
    CreateCourseRequest, CreateDepartmentRequest, Department, DepartmentId, Faculty, Institution,
    InstitutionId, RegisterInstitutionRequest, SetBranchOpenRequest, UpdateBranchRequest,
    UpdateDepartmentRequest,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The backend answered with an error status or `success: false`.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl ApiClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiClientError::Api { status, .. } => Some(*status),
            ApiClientError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// No session, or the session does not grant access.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default = "Option::default")]
    data: Option<T>,
}

/// Decode a response body given its HTTP status.
///
/// Returns the `data` member, which may legitimately be absent.
pub fn parse_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<Option<T>, ApiClientError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Envelope<IgnoredAny>>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(ApiClientError::Api { status, message });
    }

    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if envelope.success == Some(false) {
        return Err(ApiClientError::Api {
            status,
            message: envelope
                .message
                .unwrap_or_else(|| "Request failed".to_string()),
        });
    }
    Ok(envelope.data)
}

fn require_data<T>(data: Option<T>, what: &str) -> Result<T, ApiClientError> {
    data.ok_or_else(|| ApiClientError::InvalidResponse(format!("{what} response has no data")))
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Institution and session
    // ------------------------------------------------------------------

    /// The institution the session cookie belongs to.
    pub async fn current_institution(&self) -> Result<Institution, ApiClientError> {
        let data = self.get("/api/institutions/current-institution").await?;
        require_data(data, "current-institution")
    }

    pub async fn register_institution(
        &self,
        request: &RegisterInstitutionRequest,
    ) -> Result<(), ApiClientError> {
        self.post::<IgnoredAny, _>("/api/institutions/register", request)
            .await?;
        Ok(())
    }

    pub async fn logout_institution(&self) -> Result<(), ApiClientError> {
        self.post::<IgnoredAny, _>("/api/auth/institution/logout", &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// Whether `code` (already normalized) is taken within `scope`.
    pub async fn code_exists(&self, scope: &CodeScope, code: &str) -> Result<bool, ApiClientError> {
        let path = format!("/api/{}/code-exists", scope.kind().collection());
        let data: Option<CodeExistsResponse> = self.post(&path, &scope.to_request(code)).await?;
        Ok(require_data(data, "code-exists")?.exists)
    }

    // ------------------------------------------------------------------
    // Departments
    // ------------------------------------------------------------------

    pub async fn list_departments(
        &self,
        institution_id: &InstitutionId,
    ) -> Result<Vec<Department>, ApiClientError> {
        let path = format!("/api/departments/institution/{institution_id}");
        Ok(self.get(&path).await?.unwrap_or_default())
    }

    pub async fn create_department(
        &self,
        request: &CreateDepartmentRequest,
    ) -> Result<(), ApiClientError> {
        self.post::<IgnoredAny, _>("/api/departments/create-department", request)
            .await?;
        Ok(())
    }

    pub async fn update_department(
        &self,
        department_id: &DepartmentId,
        request: &UpdateDepartmentRequest,
    ) -> Result<(), ApiClientError> {
        let path = format!("/api/departments/update-department/{department_id}");
        self.put::<IgnoredAny, _>(&path, request).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Branches
    // ------------------------------------------------------------------

    pub async fn list_branches(
        &self,
        institution_id: &InstitutionId,
    ) -> Result<Vec<Branch>, ApiClientError> {
        let path = format!("/api/branches/institutions/{institution_id}/branches");
        Ok(self.get(&path).await?.unwrap_or_default())
    }

    pub async fn create_branch(
        &self,
        institution_id: &InstitutionId,
        request: &CreateBranchRequest,
    ) -> Result<(), ApiClientError> {
        let path = format!("/api/branches/institutions/{institution_id}/branches");
        self.post::<IgnoredAny, _>(&path, request).await?;
        Ok(())
    }

    pub async fn update_branch(
        &self,
        branch_id: &BranchId,
        request: &UpdateBranchRequest,
    ) -> Result<(), ApiClientError> {
        let path = format!("/api/branches/branches/{branch_id}");
        self.put::<IgnoredAny, _>(&path, request).await?;
        Ok(())
    }

    /// Open or close a branch for enrolment.
    pub async fn set_branch_open(
        &self,
        branch_id: &BranchId,
        is_open: bool,
    ) -> Result<(), ApiClientError> {
        let path = format!("/api/branches/branches/{branch_id}/status");
        let request = self
            .client
            .patch(self.url(&path))
            .json(&SetBranchOpenRequest { is_open });
        self.execute::<IgnoredAny>(request).await?;
        Ok(())
    }

    pub async fn delete_branch(&self, branch_id: &BranchId) -> Result<(), ApiClientError> {
        let path = format!("/api/branches/branches/{branch_id}");
        self.delete(&path).await
    }

    // ------------------------------------------------------------------
    // Courses and faculties
    // ------------------------------------------------------------------

    pub async fn list_courses(
        &self,
        department_id: &DepartmentId,
    ) -> Result<Vec<Course>, ApiClientError> {
        let path = format!("/api/courses/department/{department_id}");
        Ok(self.get(&path).await?.unwrap_or_default())
    }

    pub async fn create_course(&self, request: &CreateCourseRequest) -> Result<(), ApiClientError> {
        self.post::<IgnoredAny, _>("/api/courses/create-course", request)
            .await?;
        Ok(())
    }

    pub async fn delete_course(&self, course_id: &CourseId) -> Result<(), ApiClientError> {
        let path = format!("/api/courses/{course_id}");
        self.delete(&path).await
    }

    pub async fn list_faculties(
        &self,
        institution_id: &InstitutionId,
    ) -> Result<Vec<Faculty>, ApiClientError> {
        let path = format!("/api/faculties/by-institution/{institution_id}");
        Ok(self.get(&path).await?.unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiClientError> {
        let request = self.client.get(self.url(path));
        self.execute(request).await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.execute(request).await
    }

    async fn put<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.client.put(self.url(path)).json(body);
        self.execute(request).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiClientError> {
        let request = self.client.delete(self.url(path));
        self.execute::<IgnoredAny>(request).await?;
        Ok(())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ApiClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = response.url().path().to_string();
        let body = response.text().await?;
        tracing::debug!(status, path = %url, bytes = body.len(), "api response");
        parse_envelope(status, &body)
    }
}
