use fleet_models::{ApiResponseData, RoleDto, RoleRequest};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::DEFAULT_ROLES_PATH;
use crate::error::{ApiError, CallFailure, Result};
use crate::transport::{HttpRequest, HttpTransport};

/// Typed client for the roles resource.
pub struct RolesService {
    transport: Arc<dyn HttpTransport>,
    base_path: String,
}

impl RolesService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_base_path(transport, DEFAULT_ROLES_PATH)
    }

    pub fn with_base_path(transport: Arc<dyn HttpTransport>, base_path: &str) -> Self {
        Self {
            transport,
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.base_path, suffix)
    }

    /// List all roles. The backend returns a bare array here, not an envelope.
    pub async fn get_roles(&self) -> Result<Vec<RoleDto>> {
        self.call(HttpRequest::get(self.path(""))).await
    }

    pub async fn get_role(&self, id: &str) -> Result<ApiResponseData<RoleDto>> {
        let path = self.path(&format!("/{}", urlencoding::encode(id)));
        self.call(HttpRequest::get(path)).await
    }

    pub async fn add_role(&self, request: &RoleRequest) -> Result<ApiResponseData<RoleDto>> {
        let body = to_body(request)?;
        self.call(HttpRequest::post(self.path(""), body)).await
    }

    pub async fn update_role(
        &self,
        id: &str,
        request: &RoleRequest,
    ) -> Result<ApiResponseData<RoleDto>> {
        let body = to_body(request)?;
        let path = self.path(&format!("/{}", urlencoding::encode(id)));
        self.call(HttpRequest::put(path, body)).await
    }

    /// Delete a role. A 2xx reply with an empty body counts as success.
    pub async fn delete_role(&self, id: &str) -> Result<ApiResponseData<serde_json::Value>> {
        let path = self.path(&format!("/{}", urlencoding::encode(id)));
        let response: Option<ApiResponseData<serde_json::Value>> =
            self.call(HttpRequest::delete(path)).await?;
        Ok(response.unwrap_or_else(|| ApiResponseData::ok(serde_json::Value::Null)))
    }

    pub async fn get_role_by_code(&self, code: &str) -> Result<ApiResponseData<RoleDto>> {
        let path = self.path(&format!("/by-code/{}", urlencoding::encode(code)));
        self.call(HttpRequest::get(path)).await
    }

    pub async fn get_roles_by_ids(&self, ids: &[String]) -> Result<ApiResponseData<Vec<RoleDto>>> {
        let body = to_body(ids)?;
        self.call(HttpRequest::post(self.path("/by-ids"), body)).await
    }

    /// Permission catalogue wrapped in the standard envelope.
    pub async fn get_all_permissions(&self) -> Result<ApiResponseData<Vec<String>>> {
        self.call(HttpRequest::get(self.path("/permissions"))).await
    }

    /// Permission catalogue as a bare array.
    pub async fn get_permissions(&self) -> Result<Vec<String>> {
        self.call(HttpRequest::get(self.path("/permissions"))).await
    }

    /// Roles assigned to a user, given the user's role ids.
    pub async fn get_user_roles(&self, ids: &[String]) -> Result<Vec<RoleDto>> {
        let response = self.get_roles_by_ids(ids).await?;
        Ok(response.data.unwrap_or_default())
    }

    /// Whether another role already uses `code`.
    ///
    /// A failed lookup (including 404 and network errors) reads as "does not
    /// exist"; the error is not propagated.
    pub async fn check_role_code_exists(&self, code: &str, exclude_id: Option<&str>) -> bool {
        match self.get_role_by_code(code).await {
            Ok(response) => response
                .into_data()
                .map_or(false, |role| exclude_id.map_or(true, |id| role.id != id)),
            Err(e) => {
                tracing::warn!("Role code lookup for '{}' failed, treating as absent: {}", code, e);
                false
            }
        }
    }

    /// Whether another role already uses `name`, compared case-insensitively.
    /// Transport failures are propagated.
    pub async fn check_role_name_exists(&self, name: &str, exclude_id: Option<&str>) -> Result<bool> {
        let wanted = name.to_lowercase();
        let roles = self.get_roles().await?;

        Ok(roles.iter().any(|role| {
            role.role_name.to_lowercase() == wanted
                && exclude_id.map_or(true, |id| role.id != id)
        }))
    }

    pub async fn get_visible_roles(&self) -> Result<Vec<RoleDto>> {
        self.filtered(|role| role.is_visible).await
    }

    pub async fn get_system_roles(&self) -> Result<Vec<RoleDto>> {
        self.filtered(|role| role.is_system).await
    }

    pub async fn get_editable_roles(&self) -> Result<Vec<RoleDto>> {
        self.filtered(RoleDto::is_editable).await
    }

    async fn filtered<F>(&self, keep: F) -> Result<Vec<RoleDto>>
    where
        F: Fn(&RoleDto) -> bool,
    {
        let mut roles = self.get_roles().await?;
        roles.retain(|role| keep(role));
        Ok(roles)
    }

    async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let method = request.method.as_str();
        let path = request.path.clone();

        self.execute(request)
            .await
            .map_err(|failure| handle_error(method, &path, failure))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> std::result::Result<T, CallFailure> {
        tracing::debug!("{} {}", request.method.as_str(), request.path);

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(CallFailure::Status {
                status: response.status,
                body: response.body,
            });
        }

        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };

        Ok(serde_json::from_str(body)?)
    }
}

/// Log the raw failure once and collapse it into the caller-facing message.
fn handle_error(method: &str, path: &str, failure: CallFailure) -> ApiError {
    let error = failure.api_error();
    tracing::error!("Roles API {} {} failed: {} ({})", method, path, failure, error);
    error
}

fn to_body<T: serde::Serialize + ?Sized>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!("Failed to serialize roles request body: {}", e);
        ApiError::Unexpected
    })
}
