//! HTTP chokepoint for the NAAI backend. Every outbound call goes through
//! [`ApiClient`]: it attaches the current bearer token, serializes JSON
//! bodies, and normalizes failures into [`AppError`]. A 401 from any endpoint
//! invokes the registered session-invalidation callback before the error is
//! returned, so a revoked token signs the user out no matter which screen
//! tripped over it. The client holds no session state of its own — the token
//! is read through an injected source on every call.

use super::errors::AppError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::cell::RefCell;
use std::rc::Rc;

/// Default request timeout (milliseconds) applied to all HTTP calls.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// A prepared request handed to the transport.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<String>,
}

/// Raw transport result before normalization.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Outbound transport seam. The browser build sends through `gloo-net`;
/// tests script responses instead of reaching the network.
#[async_trait(?Send)]
pub trait HttpBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError>;
}

/// Reads the current token from the session manager on every call, so a
/// rotated token is honored immediately.
pub type TokenSource = Rc<dyn Fn() -> Option<String>>;

struct ClientInner {
    base_url: String,
    backend: Rc<dyn HttpBackend>,
    token_source: TokenSource,
    on_unauthorized: RefCell<Option<Rc<dyn Fn()>>>,
}

#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ClientInner>,
}

impl ApiClient {
    pub fn new(base_url: &str, backend: Rc<dyn HttpBackend>, token_source: TokenSource) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                base_url: base_url.to_string(),
                backend,
                token_source,
                on_unauthorized: RefCell::new(None),
            }),
        }
    }

    /// Registers the session-invalidation callback fired on any 401.
    pub fn set_unauthorized_handler(&self, handler: impl Fn() + 'static) {
        *self.inner.on_unauthorized.borrow_mut() = Some(Rc::new(handler));
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.dispatch(Method::Get, path, None).await?;
        decode_json(&response)
    }

    /// Like [`ApiClient::get`] but treats a 404 as "not there yet".
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, AppError> {
        let response = self.dispatch(Method::Get, path, None).await?;
        if response.status == 404 {
            return Ok(None);
        }
        decode_json(&response).map(Some)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let payload = encode_body(body)?;
        let response = self.dispatch(Method::Post, path, Some(payload)).await?;
        decode_json(&response)
    }

    /// POST where the response body is irrelevant to the caller.
    pub async fn post_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let payload = encode_body(body)?;
        let response = self.dispatch(Method::Post, path, Some(payload)).await?;
        ensure_success(&response)
    }

    /// PUT where the response body is irrelevant to the caller.
    pub async fn put_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let payload = encode_body(body)?;
        let response = self.dispatch(Method::Put, path, Some(payload)).await?;
        ensure_success(&response)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, AppError> {
        let request = HttpRequest {
            method,
            url: build_url(&self.inner.base_url, path),
            bearer: (self.inner.token_source)(),
            body,
        };
        let response = self.inner.backend.send(request).await?;

        if response.status == 401 {
            tracing::debug!(method = method.as_str(), %path, "unauthorized response; invalidating session");
            let handler = self.inner.on_unauthorized.borrow().clone();
            if let Some(handler) = handler {
                handler();
            }
            return Err(AppError::Unauthorized(extract_error_message(&response.body)));
        }

        Ok(response)
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, AppError> {
    serde_json::to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

/// Parses a 2xx body as JSON and maps everything else to a server error.
fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, AppError> {
    ensure_success(response)?;
    serde_json::from_str(&response.body)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

fn ensure_success(response: &HttpResponse) -> Result<(), AppError> {
    if (200..300).contains(&response.status) {
        Ok(())
    } else {
        Err(AppError::Server {
            status: response.status,
            message: extract_error_message(&response.body),
        })
    }
}

/// Pulls the server's `{"error": ...}` message out of a failure body,
/// falling back to the sanitized raw body.
fn extract_error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.error.trim().is_empty() => parsed.error.trim().to_string(),
        _ => sanitize_body(body),
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

/// Builds a URL from the configured API base URL and the provided path.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// The transport for the current target.
#[cfg(target_arch = "wasm32")]
pub fn default_backend() -> Rc<dyn HttpBackend> {
    Rc::new(BrowserBackend)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_backend() -> Rc<dyn HttpBackend> {
    Rc::new(UnsupportedBackend)
}

/// Fetch-based transport with an abort timeout to avoid hanging UI state.
#[cfg(target_arch = "wasm32")]
pub struct BrowserBackend;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl HttpBackend for BrowserBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        use gloo_net::http::Request;
        use gloo_timers::callback::Timeout;
        use web_sys::AbortController;

        let controller = AbortController::new()
            .map_err(|_| AppError::Network("Failed to initialize request timeout.".to_string()))?;
        let signal = controller.signal();
        let timeout_controller = controller.clone();
        let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
        }
        .abort_signal(Some(&signal));

        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let prepared = if let Some(body) = request.body {
            builder.header("Content-Type", "application/json").body(body)
        } else {
            builder.build()
        }
        .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

        let response = prepared.send().await.map_err(map_request_error)?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

/// Maps transport errors into user-facing variants with timeout detection.
#[cfg(target_arch = "wasm32")]
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Stand-in used off-wasm, where the app never issues real requests.
#[cfg(not(target_arch = "wasm32"))]
struct UnsupportedBackend;

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl HttpBackend for UnsupportedBackend {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, AppError> {
        Err(AppError::Network(
            "HTTP transport is only available in the browser.".to_string(),
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeBackend;
    use super::{ApiClient, AppError, Method, build_url, extract_error_message, sanitize_body};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn client_with(backend: Rc<FakeBackend>, token: Option<&str>) -> ApiClient {
        let token = token.map(str::to_string);
        ApiClient::new("https://api.test", backend, Rc::new(move || token.clone()))
    }

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(build_url("https://api.test", "/shops"), "https://api.test/shops");
        assert_eq!(build_url("https://api.test/", "shops"), "https://api.test/shops");
        assert_eq!(build_url("  https://api.test  ", "/shops"), "https://api.test/shops");
        assert_eq!(build_url("", "/shops"), "/shops");
    }

    #[test]
    fn extract_error_message_prefers_the_json_error_field() {
        assert_eq!(
            extract_error_message(r#"{"error":"Email already registered"}"#),
            "Email already registered"
        );
        assert_eq!(extract_error_message("plain text failure"), "plain text failure");
        assert_eq!(extract_error_message(r#"{"error":"  "}"#), r#"{"error":"  "}"#);
    }

    #[test]
    fn sanitize_body_truncates_and_falls_back() {
        assert_eq!(sanitize_body("   "), "Request failed.");
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).chars().count(), 200);
    }

    #[tokio::test]
    async fn bearer_token_is_attached_when_present() {
        let backend = FakeBackend::new();
        backend.push_json(200, r#"{"ok":true}"#);
        let api = client_with(backend.clone(), Some("tok-1"));

        let _: serde_json::Value = api.get("/auth/me").await.unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "https://api.test/auth/me");
        assert_eq!(request.bearer.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn non_2xx_surfaces_the_server_message_and_status() {
        let backend = FakeBackend::new();
        backend.push_json(422, r#"{"error":"Shop name is required"}"#);
        let api = client_with(backend, None);

        let result: Result<serde_json::Value, AppError> = api.get("/shops").await;
        match result {
            Err(AppError::Server { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "Shop name is required");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_failure_body_becomes_a_generic_message() {
        let backend = FakeBackend::new();
        backend.push_json(500, "");
        let api = client_with(backend, None);

        let result: Result<serde_json::Value, AppError> = api.get("/shops").await;
        match result {
            Err(AppError::Server { message, .. }) => assert_eq!(message, "Request failed."),
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn a_401_fires_the_invalidation_handler_before_returning() {
        let backend = FakeBackend::new();
        backend.push_json(401, r#"{"error":"Token expired"}"#);
        let api = client_with(backend, Some("stale"));

        let fired = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&fired);
        api.set_unauthorized_handler(move || *flag.borrow_mut() = true);

        let result: Result<serde_json::Value, AppError> = api.get("/shops").await;
        match result {
            Err(AppError::Unauthorized(message)) => assert_eq!(message, "Token expired"),
            other => panic!("expected unauthorized, got {other:?}"),
        }
        assert!(*fired.borrow());
    }

    #[tokio::test]
    async fn get_optional_maps_404_to_none() {
        let backend = FakeBackend::new();
        backend.push_json(404, r#"{"error":"No shop yet"}"#);
        let api = client_with(backend, Some("tok"));

        let result: Option<serde_json::Value> = api.get_optional("/barber/shop").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn transport_errors_pass_through_untouched() {
        let backend = FakeBackend::new();
        backend.push_error(AppError::Timeout("Request timed out. Please try again.".to_string()));
        let api = client_with(backend, None);

        let result: Result<serde_json::Value, AppError> = api.get("/shops").await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }
}
