// src/api/client.rs
//! HTTP client adapter: resolves paths against the backend base URL, attaches
//! bearer credentials to protected requests and runs the single
//! refresh-and-retry cycle on 401.

use super::{AuthFailureHook, TokenProvider};
use crate::config::ClientConfig;
use crate::error::{parse_error_body, ApiError};
use crate::types::RefreshedToken;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

const JWT_CREATE_ENDPOINT: &str = "auth/jwt/create/";
const JWT_REFRESH_ENDPOINT: &str = "auth/jwt/refresh/";
const REGISTER_ENDPOINT: &str = "auth/users/";

/// Request body, kept rebuildable so a request can be replayed once after a
/// token refresh.
enum Body {
    Empty,
    Json(serde_json::Value),
    File {
        field: &'static str,
        file_name: String,
        content: Vec<u8>,
        content_type: &'static str,
    },
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
    on_auth_failure: Arc<dyn AuthFailureHook>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenProvider>,
        on_auth_failure: Arc<dyn AuthFailureHook>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let mut base_url = config.api_base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            base_url,
            tokens,
            on_auth_failure,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Login, registration and token refresh are served without credentials;
    /// everything else carries the bearer token and joins the 401 cycle.
    fn is_public(method: &Method, path: &str) -> bool {
        path == JWT_CREATE_ENDPOINT
            || path == JWT_REFRESH_ENDPOINT
            || (path == REGISTER_ENDPOINT && *method == Method::POST)
    }

    pub(super) async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request(Method::GET, path, Body::Empty).await
    }

    pub(super) async fn post_json<R: DeserializeOwned>(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<R, ApiError> {
        self.request(Method::POST, path, Body::Json(payload)).await
    }

    pub(super) async fn post_file<R: DeserializeOwned>(
        &self,
        path: &str,
        field: &'static str,
        file_name: &str,
        content: Vec<u8>,
        content_type: &'static str,
    ) -> Result<R, ApiError> {
        self.request(
            Method::POST,
            path,
            Body::File {
                field,
                file_name: file_name.to_string(),
                content,
                content_type,
            },
        )
        .await
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Body,
    ) -> Result<R, ApiError> {
        let public = Self::is_public(&method, path);
        let url = self.url(path);
        let mut refresh_attempted = false;

        loop {
            debug!("{} {}", method, url);

            let mut request = self.http.request(method.clone(), &url);
            if !public {
                if let Some(token) = self.tokens.access_token().await {
                    request = request.bearer_auth(token);
                }
            }
            request = match &body {
                Body::Empty => request,
                Body::Json(payload) => request.json(payload),
                Body::File {
                    field,
                    file_name,
                    content,
                    content_type,
                } => {
                    let part = Part::bytes(content.clone())
                        .file_name(file_name.clone())
                        .mime_str(content_type)
                        .map_err(|e| {
                            ApiError::Validation(format!("Invalid upload content type: {}", e))
                        })?;
                    request.multipart(Form::new().part(*field, part))
                }
            };

            let response = request.send().await.map_err(ApiError::from)?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED && !public {
                if !refresh_attempted {
                    refresh_attempted = true;
                    if self.try_refresh().await {
                        continue;
                    }
                }
                self.on_auth_failure.on_auth_failure().await;
                return Err(ApiError::AuthRequired);
            }

            let text = response.text().await.map_err(ApiError::from)?;

            if status.is_success() {
                return serde_json::from_str(&text).map_err(|e| {
                    ApiError::Decode(format!("{} (from {} {})", e, method, path))
                });
            }

            warn!("{} {} failed with status {}", method, path, status);
            return Err(parse_error_body(status.as_u16(), &text));
        }
    }

    /// One refresh attempt: exchange the stored refresh token for a new
    /// access token and persist it. Returns false when no refresh token
    /// exists or the exchange fails.
    async fn try_refresh(&self) -> bool {
        let Some(refresh_token) = self.tokens.refresh_token().await else {
            debug!("No refresh token available, skipping refresh");
            return false;
        };

        // Issued directly on the inner client: the refresh exchange must not
        // re-enter the 401 cycle it services.
        let payload = serde_json::json!({ "refresh": refresh_token });
        let response = match self
            .http
            .post(self.url(JWT_REFRESH_ENDPOINT))
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Token refresh failed: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            warn!("Token refresh rejected with status {}", response.status());
            return false;
        }

        let refreshed: RefreshedToken = match response.json().await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                warn!("Failed to decode refresh response: {}", e);
                return false;
            }
        };

        if let Err(e) = self.tokens.access_token_rotated(&refreshed.access).await {
            warn!("Failed to persist refreshed access token: {}", e);
            return false;
        }

        info!("Access token refreshed, retrying original request");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenPair;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// In-memory token pair implementing both adapter seams, with a flag
    /// recording whether the failure hook fired.
    struct StubTokens {
        access: Mutex<Option<String>>,
        refresh: Mutex<Option<String>>,
        failure_hook_fired: AtomicBool,
    }

    impl StubTokens {
        fn new(access: Option<&str>, refresh: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                access: Mutex::new(access.map(str::to_string)),
                refresh: Mutex::new(refresh.map(str::to_string)),
                failure_hook_fired: AtomicBool::new(false),
            })
        }

        fn access(&self) -> Option<String> {
            self.access.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenProvider for StubTokens {
        async fn access_token(&self) -> Option<String> {
            self.access.lock().unwrap().clone()
        }

        async fn refresh_token(&self) -> Option<String> {
            self.refresh.lock().unwrap().clone()
        }

        async fn access_token_rotated(&self, access_token: &str) -> Result<(), ApiError> {
            *self.access.lock().unwrap() = Some(access_token.to_string());
            Ok(())
        }
    }

    #[async_trait]
    impl AuthFailureHook for StubTokens {
        async fn on_auth_failure(&self) {
            self.failure_hook_fired.store(true, Ordering::SeqCst);
        }
    }

    #[derive(Debug)]
    struct SeenRequest {
        method: String,
        path: String,
        authorization: Option<String>,
    }

    /// Scripted HTTP/1.1 backend: `auth/jwt/refresh/` answers per
    /// `refresh_succeeds`, protected paths answer 200 only under
    /// `Bearer fresh`, and `auth/jwt/create/` always issues a pair.
    async fn serve(
        listener: TcpListener,
        seen: Arc<Mutex<Vec<SeenRequest>>>,
        refresh_succeeds: bool,
    ) {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };

            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let header_end = loop {
                match buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    Some(pos) => break pos + 4,
                    None => {
                        let n = socket.read(&mut chunk).await.unwrap();
                        assert!(n > 0, "connection closed mid-request");
                        buf.extend_from_slice(&chunk[..n]);
                    }
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let mut lines = head.lines();
            let mut request_line = lines.next().unwrap_or_default().split_whitespace();
            let method = request_line.next().unwrap_or_default().to_string();
            let path = request_line.next().unwrap_or_default().to_string();

            let mut authorization = None;
            let mut content_length = 0usize;
            for line in lines {
                if let Some(value) = line.strip_prefix("authorization: ") {
                    authorization = Some(value.to_string());
                } else if let Some(value) = line.strip_prefix("content-length: ") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }

            // Drain the body before answering.
            while buf.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed mid-body");
                buf.extend_from_slice(&chunk[..n]);
            }

            let (status, body) = if path.ends_with("auth/jwt/refresh/") {
                if refresh_succeeds {
                    ("200 OK", r#"{"access":"fresh"}"#)
                } else {
                    ("401 Unauthorized", r#"{"detail":"Token is invalid or expired"}"#)
                }
            } else if path.ends_with("auth/jwt/create/") {
                ("200 OK", r#"{"access":"a1","refresh":"r1"}"#)
            } else if authorization.as_deref() == Some("Bearer fresh") {
                ("200 OK", "[]")
            } else {
                ("401 Unauthorized", r#"{"detail":"Given token not valid"}"#)
            };

            seen.lock().unwrap().push(SeenRequest {
                method,
                path,
                authorization,
            });

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        }
    }

    async fn start_backend(refresh_succeeds: bool) -> (String, Arc<Mutex<Vec<SeenRequest>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api/", listener.local_addr().unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));
        tokio::spawn(serve(listener, seen.clone(), refresh_succeeds));
        (base_url, seen)
    }

    fn client_for(base_url: &str, tokens: Arc<StubTokens>) -> ApiClient {
        let config = ClientConfig {
            api_base_url: base_url.to_string(),
            session_path: std::path::PathBuf::from("/tmp/unused-session.json"),
            timeout_seconds: 5,
        };
        ApiClient::new(&config, tokens.clone(), tokens).unwrap()
    }

    #[tokio::test]
    async fn test_401_runs_one_refresh_then_retries_with_new_token() {
        let (base_url, seen) = start_backend(true).await;
        let tokens = StubTokens::new(Some("stale"), Some("r"));
        let client = client_for(&base_url, tokens.clone());

        let jobs: Vec<serde_json::Value> = client.get_json("jobs/").await.unwrap();
        assert!(jobs.is_empty());

        let seen = seen.lock().unwrap();
        let paths: Vec<&str> = seen.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/api/jobs/", "/api/auth/jwt/refresh/", "/api/jobs/"]
        );
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer stale"));
        assert_eq!(seen[2].authorization.as_deref(), Some("Bearer fresh"));

        assert_eq!(tokens.access().as_deref(), Some("fresh"));
        assert!(!tokens.failure_hook_fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failed_refresh_fires_teardown_and_stops() {
        let (base_url, seen) = start_backend(false).await;
        let tokens = StubTokens::new(Some("stale"), Some("r"));
        let client = client_for(&base_url, tokens.clone());

        let result: Result<Vec<serde_json::Value>, _> = client.get_json("jobs/").await;
        assert!(matches!(result, Err(ApiError::AuthRequired)));
        assert!(tokens.failure_hook_fired.load(Ordering::SeqCst));

        // One protected attempt, one refresh, no second retry.
        let seen = seen.lock().unwrap();
        let paths: Vec<&str> = seen.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/api/jobs/", "/api/auth/jwt/refresh/"]);
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_skips_refresh() {
        let (base_url, seen) = start_backend(true).await;
        let tokens = StubTokens::new(Some("stale"), None);
        let client = client_for(&base_url, tokens.clone());

        let result: Result<Vec<serde_json::Value>, _> = client.get_json("jobs/").await;
        assert!(matches!(result, Err(ApiError::AuthRequired)));
        assert!(tokens.failure_hook_fired.load(Ordering::SeqCst));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "/api/jobs/");
    }

    #[tokio::test]
    async fn test_login_endpoint_carries_no_bearer() {
        let (base_url, seen) = start_backend(true).await;
        let tokens = StubTokens::new(Some("stale"), Some("r"));
        let client = client_for(&base_url, tokens.clone());

        let payload = serde_json::json!({ "email": "jane@example.com", "password": "hunter2" });
        let pair: TokenPair = client.post_json(JWT_CREATE_ENDPOINT, payload).await.unwrap();
        assert_eq!(pair.access, "a1");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, "POST");
        assert!(seen[0].authorization.is_none());
    }
}
