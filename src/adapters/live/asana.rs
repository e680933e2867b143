//! Live adapter for the `AsanaApi` port using the Asana REST API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, ConfigError};
use crate::ports::asana::{
    ApiFuture, AsanaApi, CreatedTask, CustomFieldSetting, EnumOption, Project, User, Workspace,
};
use crate::task::TaskCreationRequest;

/// Page size requested from listing endpoints.
const PAGE_LIMIT: &str = "100";

/// Live Asana client authenticating with a personal access token.
pub struct LiveAsanaApi {
    client: Client,
    base_url: String,
    token: String,
}

impl LiveAsanaApi {
    /// Creates a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.into(), token: token.into() })
    }

    /// Creates a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no access token is configured or the client
    /// cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let token = config.require_token().map_err(|e: ConfigError| e.to_string())?;
        Self::new(config.api_url.clone(), token, config.timeout).map_err(|e| e.to_string())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and unwraps the `{"data": ...}` envelope.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Envelope<T>, ApiError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(describe_transport_error(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read Asana response: {e}")))?;

        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status.as_u16(), &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Fetches every page of a listing endpoint.
    async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request =
                self.client.get(self.url(path)).query(query).query(&[("limit", PAGE_LIMIT)]);
            if let Some(offset) = &offset {
                request = request.query(&[("offset", offset.as_str())]);
            }

            let page: Envelope<Vec<T>> = self.send(request).await?;
            items.extend(page.data);

            match page.next_page {
                Some(next) => {
                    debug!(path, fetched = items.len(), "following next page");
                    offset = Some(next.offset);
                }
                None => return Ok(items),
            }
        }
    }
}

/// Standard Asana response envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(default)]
    next_page: Option<NextPage>,
}

/// Pagination cursor in a listing response.
#[derive(Deserialize)]
struct NextPage {
    offset: String,
}

/// Request envelope for write calls.
#[derive(Serialize)]
struct DataBody<'a, T> {
    data: &'a T,
}

/// Error payload returned on non-success statuses.
#[derive(Deserialize)]
struct ErrorPayload {
    errors: Vec<ErrorDetail>,
}

/// A single entry in an error payload.
#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Raw `custom_field_settings` record.
#[derive(Deserialize)]
struct RawCustomFieldSetting {
    custom_field: RawCustomField,
}

#[derive(Deserialize)]
struct RawCustomField {
    gid: String,
    name: String,
    #[serde(default)]
    resource_subtype: String,
    #[serde(default)]
    enum_options: Vec<EnumOption>,
}

impl From<RawCustomFieldSetting> for CustomFieldSetting {
    fn from(raw: RawCustomFieldSetting) -> Self {
        let field = raw.custom_field;
        Self {
            gid: field.gid,
            name: field.name,
            resource_subtype: field.resource_subtype,
            enum_options: field.enum_options,
        }
    }
}

fn rejection_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| {
            payload.errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ")
        })
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| format!("Asana returned HTTP {status}"))
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("could not connect: {err}")
    } else {
        format!("request failed: {err}")
    }
}

impl AsanaApi for LiveAsanaApi {
    fn create_task<'a>(&'a self, request: &'a TaskCreationRequest) -> ApiFuture<'a, CreatedTask> {
        Box::pin(async move {
            let call = self.client.post(self.url("/tasks")).json(&DataBody { data: request });
            let envelope: Envelope<CreatedTask> = self.send(call).await?;
            Ok(envelope.data)
        })
    }

    fn list_workspaces(&self) -> ApiFuture<'_, Vec<Workspace>> {
        Box::pin(async move { self.list_all("/workspaces", &[]).await })
    }

    fn list_projects<'a>(&'a self, workspace: &'a str) -> ApiFuture<'a, Vec<Project>> {
        Box::pin(async move {
            self.list_all(&format!("/workspaces/{workspace}/projects"), &[("archived", "false")])
                .await
        })
    }

    fn list_users<'a>(&'a self, workspace: &'a str) -> ApiFuture<'a, Vec<User>> {
        Box::pin(async move {
            self.list_all("/users", &[("workspace", workspace), ("opt_fields", "name,email")])
                .await
        })
    }

    fn current_user(&self) -> ApiFuture<'_, User> {
        Box::pin(async move {
            let call = self.client.get(self.url("/users/me")).query(&[("opt_fields", "name,email")]);
            let envelope: Envelope<User> = self.send(call).await?;
            Ok(envelope.data)
        })
    }

    fn list_custom_field_settings<'a>(
        &'a self,
        project: &'a str,
    ) -> ApiFuture<'a, Vec<CustomFieldSetting>> {
        Box::pin(async move {
            let raw: Vec<RawCustomFieldSetting> = self
                .list_all(
                    &format!("/projects/{project}/custom_field_settings"),
                    &[(
                        "opt_fields",
                        "custom_field.name,custom_field.resource_subtype,\
                         custom_field.enum_options.name,custom_field.enum_options.enabled",
                    )],
                )
                .await?;
            Ok(raw.into_iter().map(CustomFieldSetting::from).collect())
        })
    }
}
