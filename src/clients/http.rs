//! `reqwest` implementation of the outbound API.
//!
//! Requests go to `<base_url>/api/v1/...` with the API key in the `X-N8N-API-KEY` header.
//! Non-2xx responses become [`RemoteError::Status`] carrying the API's `message` when the
//! body has one; a 404 therefore stays distinguishable from every other failure.

use super::api::{ExecutionListFilters, ExecutionsApi, UserListFilters, UsersApi};
use crate::config::{ConfigError, ProviderConfig};
use crate::model::wire::{
    Execution, ExecutionList, RoleChange, User, UserCreateRequest, UserCreateResponse, UserList,
};
use async_trait::async_trait;
use reconcile_framework::{CallContext, RemoteError};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Path prefix of the public API.
pub const API_PATH: &str = "/api/v1";
/// Authentication header (header names are case-insensitive).
pub const API_KEY_HEADER: &str = "x-n8n-api-key";

#[derive(Debug, Clone)]
pub struct HttpApi {
    http: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let base = api_base(&config.base_url)?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ConfigError::InvalidApiKey(e.to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { http, base })
    }

    /// `<base_url>/api/v1`
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends percent-encoded path segments to the API base.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn json<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        request: RequestBuilder,
    ) -> Result<T, RemoteError> {
        ctx.run(async {
            let response = execute(request).await?;
            response
                .json::<T>()
                .await
                .map_err(|e| RemoteError::Decode(e.to_string()))
        })
        .await
    }

    async fn no_content(
        &self,
        ctx: &CallContext,
        request: RequestBuilder,
    ) -> Result<(), RemoteError> {
        ctx.run(async { execute(request).await.map(|_| ()) }).await
    }
}

fn api_base(base_url: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let url = Url::parse(&format!("{}{API_PATH}", base_url.trim_end_matches('/')))
        .map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("not a hierarchical URL".to_string()));
    }
    Ok(url)
}

async fn execute(request: RequestBuilder) -> Result<Response, RemoteError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            RemoteError::DeadlineExceeded
        } else {
            RemoteError::Transport(e.to_string())
        }
    })?;

    let status = response.status();
    debug!(status = status.as_u16(), url = %response.url(), "Received response");
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!(status = status.as_u16(), error = %e, "Failed to read error body");
            String::new()
        }
    };
    Err(status_error(status, &body))
}

fn status_error(status: StatusCode, body: &str) -> RemoteError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|message| !message.is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|body| !body.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    RemoteError::status(status.as_u16(), message)
}

#[async_trait]
impl UsersApi for HttpApi {
    async fn get_user(
        &self,
        ctx: &CallContext,
        id_or_email: &str,
        include_role: bool,
    ) -> Result<User, RemoteError> {
        let request = self
            .http
            .get(self.endpoint(&["users", id_or_email]))
            .query(&[("includeRole", include_role)]);
        self.json(ctx, request).await
    }

    async fn create_user(
        &self,
        ctx: &CallContext,
        request: UserCreateRequest,
    ) -> Result<UserCreateResponse, RemoteError> {
        let request = self.http.post(self.endpoint(&["users"])).json(&[request]);
        let body: Value = self.json(ctx, request).await?;
        UserCreateResponse::from_body(body).map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn patch_user_role(
        &self,
        ctx: &CallContext,
        id: &str,
        change: RoleChange,
    ) -> Result<(), RemoteError> {
        let request = self
            .http
            .patch(self.endpoint(&["users", id, "role"]))
            .json(&change);
        self.no_content(ctx, request).await
    }

    async fn delete_user(&self, ctx: &CallContext, id: &str) -> Result<(), RemoteError> {
        let request = self.http.delete(self.endpoint(&["users", id]));
        self.no_content(ctx, request).await
    }

    async fn list_users(
        &self,
        ctx: &CallContext,
        filters: &UserListFilters,
    ) -> Result<UserList, RemoteError> {
        let request = self
            .http
            .get(self.endpoint(&["users"]))
            .query(&filters.query());
        self.json(ctx, request).await
    }
}

#[async_trait]
impl ExecutionsApi for HttpApi {
    async fn retry_execution(&self, ctx: &CallContext, id: u64) -> Result<Execution, RemoteError> {
        let id = id.to_string();
        let request = self.http.post(self.endpoint(&["executions", &id, "retry"]));
        self.json(ctx, request).await
    }

    async fn get_execution(
        &self,
        ctx: &CallContext,
        id: u64,
        include_data: Option<bool>,
    ) -> Result<Execution, RemoteError> {
        let id = id.to_string();
        let mut request = self.http.get(self.endpoint(&["executions", &id]));
        if let Some(include_data) = include_data {
            request = request.query(&[("includeData", include_data)]);
        }
        self.json(ctx, request).await
    }

    async fn list_executions(
        &self,
        ctx: &CallContext,
        filters: &ExecutionListFilters,
    ) -> Result<ExecutionList, RemoteError> {
        let query = filters.query();
        let mut request = self.http.get(self.endpoint(&["executions"]));
        if !query.is_empty() {
            request = request.query(&query);
        }
        self.json(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpApi {
        HttpApi::new(&ProviderConfig::new(base_url, "key")).unwrap()
    }

    #[test]
    fn test_base_url_gets_api_prefix() {
        assert_eq!(
            api("https://n8n.example.com").base_url().as_str(),
            "https://n8n.example.com/api/v1"
        );
        assert_eq!(
            api("https://n8n.example.com/").base_url().as_str(),
            "https://n8n.example.com/api/v1"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = api("http://localhost:5678");
        assert_eq!(
            api.endpoint(&["users", "a@b.c"]).as_str(),
            "http://localhost:5678/api/v1/users/a@b.c"
        );
        assert_eq!(
            api.endpoint(&["users", "a/b", "role"]).as_str(),
            "http://localhost:5678/api/v1/users/a%2Fb/role"
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let err = HttpApi::new(&ProviderConfig::new("not a url", "key")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        let err = HttpApi::new(&ProviderConfig::new("http://localhost", "bad\nkey")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiKey(_)));
    }

    #[test]
    fn test_status_error_prefers_api_message() {
        let err = status_error(StatusCode::NOT_FOUND, r#"{"message": "Not Found"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: Not Found");

        let err = status_error(StatusCode::BAD_REQUEST, "  plain text  ");
        assert_eq!(err, RemoteError::status(400, "plain text"));

        let err = status_error(StatusCode::FORBIDDEN, "");
        assert_eq!(err, RemoteError::status(403, "Forbidden"));
    }

    #[tokio::test]
    async fn test_truncated_error_body_falls_back_to_reason() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await.unwrap();
            let response = b"HTTP/1.1 500 Internal Server Error\r\n\
                Content-Length: 100\r\n\r\nshort";
            socket.write_all(response).await.unwrap();
        });

        let api = api(&format!("http://{addr}"));
        let err = api
            .delete_user(&CallContext::new(), "u1")
            .await
            .unwrap_err();

        assert_eq!(err, RemoteError::status(500, "Internal Server Error"));
        server.await.unwrap();
    }
}
