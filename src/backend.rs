use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};
use tokio::sync::RwLock;
use tower_http::services::{ServeDir, ServeFile};
use url::Url;

use folio::interaction::contact::{validate_fields, Field, FieldError};

const DEFAULT_RELAY_REQUEST_TIMEOUT_MS: u64 = 6_000;
const DEFAULT_RELAY_CONNECT_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_MESSAGE_MAX_CHARS: usize = 4_000;
const DEFAULT_SENDER_WINDOW_SECONDS: u64 = 600;
const DEFAULT_SENDER_WINDOW_MAX: usize = 3;
const DEFAULT_FROM_ADDRESS: &str = "no-reply@folio.invalid";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_LOG_EMAIL_MODE: EmailLogMode = EmailLogMode::Redacted;

const RELAY_REQUEST_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 120_000);
const RELAY_CONNECT_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 30_000);
const MESSAGE_MAX_CHARS_BOUNDS: (usize, usize) = (100, 50_000);
const SENDER_WINDOW_SECONDS_BOUNDS: (u64, u64) = (1, 86_400);
const SENDER_WINDOW_MAX_BOUNDS: (usize, usize) = (1, 100);
const USER_AGENT: &str = "folio-contact-relay/1.0";
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone, Copy)]
enum EmailLogMode {
    Redacted,
    Full,
}

#[derive(Clone)]
struct RelayRuntimeConfig {
    request_timeout: Duration,
    connect_timeout: Duration,
    provider_url: Option<Url>,
    provider_token: Option<String>,
    from_address: String,
    to_address: Option<String>,
    message_max_chars: usize,
    sender_window_seconds: u64,
    sender_window_max: usize,
    log_level: LogLevel,
    log_email_mode: EmailLogMode,
}

impl RelayRuntimeConfig {
    fn from_env() -> Self {
        let request_timeout_ms = parse_env_u64_with_bounds(
            "CONTACT_REQUEST_TIMEOUT_MS",
            DEFAULT_RELAY_REQUEST_TIMEOUT_MS,
            RELAY_REQUEST_TIMEOUT_MS_BOUNDS,
        );
        let connect_timeout_ms = parse_env_u64_with_bounds(
            "CONTACT_CONNECT_TIMEOUT_MS",
            DEFAULT_RELAY_CONNECT_TIMEOUT_MS,
            RELAY_CONNECT_TIMEOUT_MS_BOUNDS,
        );
        let message_max_chars = parse_env_usize_with_bounds(
            "CONTACT_MESSAGE_MAX_CHARS",
            DEFAULT_MESSAGE_MAX_CHARS,
            MESSAGE_MAX_CHARS_BOUNDS,
        );
        let sender_window_seconds = parse_env_u64_with_bounds(
            "CONTACT_SENDER_WINDOW_SECONDS",
            DEFAULT_SENDER_WINDOW_SECONDS,
            SENDER_WINDOW_SECONDS_BOUNDS,
        );
        let sender_window_max = parse_env_usize_with_bounds(
            "CONTACT_SENDER_WINDOW_MAX",
            DEFAULT_SENDER_WINDOW_MAX,
            SENDER_WINDOW_MAX_BOUNDS,
        );
        let provider_url = parse_env_http_url("CONTACT_PROVIDER_URL");
        let provider_token = parse_env_non_empty_string("CONTACT_PROVIDER_TOKEN");
        let from_address = parse_env_non_empty_string("CONTACT_FROM_ADDRESS")
            .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string());
        let to_address = parse_env_non_empty_string("CONTACT_TO_ADDRESS");
        let log_level = parse_log_level("LOG_LEVEL", DEFAULT_LOG_LEVEL);
        let log_email_mode = parse_email_log_mode("LOG_CONTACT_EMAIL_MODE", DEFAULT_LOG_EMAIL_MODE);

        Self {
            request_timeout: Duration::from_millis(request_timeout_ms),
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            provider_url,
            provider_token,
            from_address,
            to_address,
            message_max_chars,
            sender_window_seconds,
            sender_window_max,
            log_level,
            log_email_mode,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    recent_senders: Arc<RwLock<HashMap<String, Vec<u64>>>>,
    relay_client: reqwest::Client,
    config: RelayRuntimeConfig,
}

#[derive(Deserialize)]
struct ContactSubmission {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactPayload {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ContactPayload {
    fn delivered() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn error(message: &str) -> Self {
        Self {
            ok: false,
            error: Some(message.to_string()),
        }
    }
}

struct RelayFailure {
    error_class: &'static str,
    status_code: Option<u16>,
    status_class: Option<&'static str>,
    provider_message: Option<String>,
}

impl RelayFailure {
    fn unconfigured() -> Self {
        Self {
            error_class: "provider_unconfigured",
            status_code: None,
            status_class: None,
            provider_message: None,
        }
    }

    fn unreachable() -> Self {
        Self {
            error_class: "provider_unreachable",
            status_code: None,
            status_class: None,
            provider_message: None,
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let bind_address = format!("0.0.0.0:{port}");
    let config = RelayRuntimeConfig::from_env();
    let relay_client = build_relay_client(&config)?;

    let state = AppState {
        recent_senders: Arc::new(RwLock::new(HashMap::new())),
        relay_client,
        config,
    };

    let static_service = ServeDir::new("dist").not_found_service(ServeFile::new("dist/index.html"));

    let app = Router::new()
        .route("/api/contact", post(submit_contact))
        .fallback_service(static_service)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    println!("server listening on http://127.0.0.1:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn submit_contact(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(submission): Json<ContactSubmission>,
) -> impl IntoResponse {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(&headers);
    let logged_sender = value_for_email_logging(&submission.email, state.config.log_email_mode);

    log_event(
        &state.config,
        LogLevel::Info,
        "contact_request_start",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "method": method.as_str(),
            "path": uri.path(),
            "sender": logged_sender.as_str(),
        }),
    );

    if let Err(error) = check_submission(&submission, state.config.message_max_chars) {
        log_event(
            &state.config,
            LogLevel::Info,
            "contact_request_rejected",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "error_class": "validation_failed",
                "field": error.field.as_str(),
                "message": error.message,
                "duration_ms": request_started_at.elapsed().as_millis(),
            }),
        );
        return json_response(
            StatusCode::BAD_REQUEST,
            ContactPayload::error(error.message),
            &request_id,
        );
    }

    let sender_key = submission.email.trim().to_ascii_lowercase();
    if !note_sender_submission(&state, &sender_key, now_unix_seconds()).await {
        log_event(
            &state.config,
            LogLevel::Info,
            "contact_request_rejected",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "error_class": "rate_limited",
                "sender": logged_sender.as_str(),
                "duration_ms": request_started_at.elapsed().as_millis(),
            }),
        );
        return json_response(
            StatusCode::TOO_MANY_REQUESTS,
            ContactPayload::error("too many messages; try again later"),
            &request_id,
        );
    }

    if let Err(failure) = relay_message(&state, &submission, &request_id).await {
        log_event(
            &state.config,
            LogLevel::Info,
            "contact_relay_failed",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "sender": logged_sender.as_str(),
                "error_class": failure.error_class,
                "provider_status_code": failure.status_code,
                "provider_status_class": failure.status_class,
                "duration_ms": request_started_at.elapsed().as_millis(),
            }),
        );
        let (status, payload) = relay_failure_response(&failure);
        return json_response(status, payload, &request_id);
    }

    log_event(
        &state.config,
        LogLevel::Info,
        "contact_request_complete",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "status": StatusCode::OK.as_u16(),
            "duration_ms": request_started_at.elapsed().as_millis(),
        }),
    );

    json_response(StatusCode::OK, ContactPayload::delivered(), &request_id)
}

/// Local validation, mirrored from the frontend rules plus the server-only
/// length cap. Failure here never reaches the email collaborator.
fn check_submission(
    submission: &ContactSubmission,
    message_max_chars: usize,
) -> Result<(), FieldError> {
    validate_fields(&submission.name, &submission.email, &submission.message)?;

    if submission.message.chars().count() > message_max_chars {
        return Err(FieldError {
            field: Field::Message,
            message: "message is too long",
        });
    }

    Ok(())
}

fn relay_failure_response(failure: &RelayFailure) -> (StatusCode, ContactPayload) {
    if failure.error_class == "provider_unconfigured" {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            ContactPayload::error("message delivery is not configured"),
        );
    }

    let message = failure
        .provider_message
        .as_deref()
        .unwrap_or("failed to deliver message");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ContactPayload::error(message),
    )
}

/// Relays the submission to the transactional-email collaborator. The
/// collaborator contract is opaque: sender, recipient, subject, and HTML
/// body go over HTTP with a bearer credential; a 2xx means delivered.
async fn relay_message(
    state: &AppState,
    submission: &ContactSubmission,
    request_id: &str,
) -> Result<(), RelayFailure> {
    let (Some(provider_url), Some(provider_token), Some(to_address)) = (
        state.config.provider_url.as_ref(),
        state.config.provider_token.as_deref(),
        state.config.to_address.as_deref(),
    ) else {
        return Err(RelayFailure::unconfigured());
    };

    let body = serde_json::json!({
        "from": {
            "email": state.config.from_address.as_str(),
            "name": "Portfolio contact",
        },
        "to": to_address,
        "subject": message_subject(&submission.name),
        "html": render_message_html(submission),
    });

    let response = state
        .relay_client
        .post(provider_url.clone())
        .bearer_auth(provider_token)
        .header(REQUEST_ID_HEADER, request_id)
        .json(&body)
        .send()
        .await
        .map_err(|_| RelayFailure::unreachable())?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let provider_message = response
        .text()
        .await
        .ok()
        .as_deref()
        .and_then(parse_provider_error);

    Err(RelayFailure {
        error_class: "provider_rejected",
        status_code: Some(status.as_u16()),
        status_class: Some(http_status_class(status)),
        provider_message,
    })
}

fn message_subject(name: &str) -> String {
    format!("Portfolio message from {}", name.trim())
}

fn render_message_html(submission: &ContactSubmission) -> String {
    let name = escape_html(submission.name.trim());
    let email = escape_html(submission.email.trim());
    let message = escape_html(submission.message.trim()).replace('\n', "<br>");

    format!("<p><strong>{name}</strong> &lt;{email}&gt; wrote:</p><p>{message}</p>")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Collaborator error bodies are JSON with an `error` or `message` field
/// when we are lucky; anything else is discarded.
fn parse_provider_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value
        .get("error")
        .or_else(|| value.get("message"))?
        .as_str()?
        .trim();

    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

async fn note_sender_submission(state: &AppState, sender_key: &str, now: u64) -> bool {
    let mut senders = state.recent_senders.write().await;
    let window = state.config.sender_window_seconds;

    senders.retain(|_, timestamps| {
        timestamps.retain(|&at| at.saturating_add(window) > now);
        !timestamps.is_empty()
    });

    let timestamps = senders.entry(sender_key.to_string()).or_default();
    admit_submission(timestamps, now, state.config.sender_window_max)
}

/// Fixed-window admission: the timestamp list has already been pruned to the
/// live window when this runs.
fn admit_submission(timestamps: &mut Vec<u64>, now: u64, window_max: usize) -> bool {
    if timestamps.len() >= window_max {
        return false;
    }

    timestamps.push(now);
    true
}

fn build_relay_client(config: &RelayRuntimeConfig) -> Result<reqwest::Client, &'static str> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|_| "failed to prepare relay client")
}

fn json_response(
    status: StatusCode,
    payload: ContactPayload,
    request_id: &str,
) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Ok(request_id_header) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }
    (status, headers, Json(payload)).into_response()
}

fn parse_env_u64_with_bounds(name: &str, default: u64, bounds: (u64, u64)) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_usize_with_bounds(name: &str, default: usize, bounds: (usize, usize)) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env_http_url(name: &str) -> Option<Url> {
    let value = parse_env_non_empty_string(name)?;
    let parsed = Url::parse(&value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}

fn parse_log_level(name: &str, default: LogLevel) -> LogLevel {
    match parse_env_non_empty_string(name)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

fn parse_email_log_mode(name: &str, default: EmailLogMode) -> EmailLogMode {
    match parse_env_non_empty_string(name)
        .unwrap_or_default()
        .to_ascii_lowercase()
        .as_str()
    {
        "full" => EmailLogMode::Full,
        "redacted" => EmailLogMode::Redacted,
        _ => default,
    }
}

fn value_for_email_logging(email: &str, mode: EmailLogMode) -> String {
    match mode {
        EmailLogMode::Full => email.trim().to_string(),
        EmailLogMode::Redacted => redact_email(email),
    }
}

fn redact_email(email: &str) -> String {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return "invalid".to_string();
    };

    let lead = local.chars().next().map(String::from).unwrap_or_default();
    format!("{lead}***@{domain}")
}

fn http_status_class(status: StatusCode) -> &'static str {
    if status.is_informational() {
        return "1xx";
    }

    if status.is_success() {
        return "2xx";
    }

    if status.is_redirection() {
        return "3xx";
    }

    if status.is_client_error() {
        return "4xx";
    }

    if status.is_server_error() {
        return "5xx";
    }

    "unknown"
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(generate_request_id)
}

fn log_event(config: &RelayRuntimeConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_string()),
    );
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_runtime_config() -> RelayRuntimeConfig {
        RelayRuntimeConfig {
            request_timeout: Duration::from_millis(DEFAULT_RELAY_REQUEST_TIMEOUT_MS),
            connect_timeout: Duration::from_millis(DEFAULT_RELAY_CONNECT_TIMEOUT_MS),
            provider_url: None,
            provider_token: None,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            to_address: None,
            message_max_chars: DEFAULT_MESSAGE_MAX_CHARS,
            sender_window_seconds: DEFAULT_SENDER_WINDOW_SECONDS,
            sender_window_max: DEFAULT_SENDER_WINDOW_MAX,
            log_level: DEFAULT_LOG_LEVEL,
            log_email_mode: DEFAULT_LOG_EMAIL_MODE,
        }
    }

    fn test_state() -> AppState {
        AppState {
            recent_senders: Arc::new(RwLock::new(HashMap::new())),
            relay_client: reqwest::Client::new(),
            config: test_runtime_config(),
        }
    }

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn valid_submission_passes_checks() {
        let result = check_submission(
            &submission("Jane", "jane@x.com", "Hello"),
            DEFAULT_MESSAGE_MAX_CHARS,
        );

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn malformed_email_is_rejected_with_message() {
        let result = check_submission(
            &submission("Jane", "not-an-email", "Hello"),
            DEFAULT_MESSAGE_MAX_CHARS,
        );

        let error = result.expect_err("malformed email must fail");
        assert_eq!(error.field, Field::Email);
        assert_eq!(error.message, "email must contain '@'");
    }

    #[test]
    fn oversized_message_is_rejected() {
        let long_message = "x".repeat(DEFAULT_MESSAGE_MAX_CHARS + 1);

        let result = check_submission(
            &submission("Jane", "jane@x.com", &long_message),
            DEFAULT_MESSAGE_MAX_CHARS,
        );

        let error = result.expect_err("oversized message must fail");
        assert_eq!(error.field, Field::Message);
        assert_eq!(error.message, "message is too long");
    }

    #[tokio::test]
    async fn unconfigured_provider_fails_without_network() {
        let state = test_state();

        let failure = relay_message(&state, &submission("Jane", "jane@x.com", "Hello"), "req-test")
            .await
            .expect_err("missing provider configuration must fail");

        assert_eq!(failure.error_class, "provider_unconfigured");
        assert_eq!(failure.status_code, None);
    }

    #[test]
    fn unconfigured_failure_maps_to_service_unavailable() {
        let (status, payload) = relay_failure_response(&RelayFailure::unconfigured());

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            payload.error.as_deref(),
            Some("message delivery is not configured")
        );
    }

    #[test]
    fn provider_rejection_surfaces_collaborator_message() {
        let failure = RelayFailure {
            error_class: "provider_rejected",
            status_code: Some(500),
            status_class: Some("5xx"),
            provider_message: Some("boom".to_string()),
        };

        let (status, payload) = relay_failure_response(&failure);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload.error.as_deref(), Some("boom"));
    }

    #[test]
    fn provider_rejection_without_message_uses_generic_fallback() {
        let (status, payload) = relay_failure_response(&RelayFailure::unreachable());

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload.error.as_deref(), Some("failed to deliver message"));
    }

    #[test]
    fn parse_provider_error_reads_error_and_message_fields() {
        assert_eq!(
            parse_provider_error(r#"{"error":"boom"}"#),
            Some("boom".to_string())
        );
        assert_eq!(
            parse_provider_error(r#"{"message":"quota exceeded"}"#),
            Some("quota exceeded".to_string())
        );
        assert_eq!(parse_provider_error(r#"{"error":"  "}"#), None);
        assert_eq!(parse_provider_error("not json"), None);
    }

    #[test]
    fn admit_submission_blocks_at_window_capacity() {
        let mut timestamps = Vec::new();

        for _ in 0..DEFAULT_SENDER_WINDOW_MAX {
            assert!(admit_submission(
                &mut timestamps,
                1_700_000_000,
                DEFAULT_SENDER_WINDOW_MAX
            ));
        }

        assert!(!admit_submission(
            &mut timestamps,
            1_700_000_001,
            DEFAULT_SENDER_WINDOW_MAX
        ));
    }

    #[tokio::test]
    async fn sender_window_frees_up_after_expiry() {
        let state = test_state();
        let now: u64 = 1_700_000_000;

        for _ in 0..DEFAULT_SENDER_WINDOW_MAX {
            assert!(note_sender_submission(&state, "jane@x.com", now).await);
        }
        assert!(!note_sender_submission(&state, "jane@x.com", now + 1).await);

        let later = now + DEFAULT_SENDER_WINDOW_SECONDS + 1;
        assert!(note_sender_submission(&state, "jane@x.com", later).await);
    }

    #[tokio::test]
    async fn sender_windows_are_tracked_per_sender() {
        let state = test_state();
        let now: u64 = 1_700_000_000;

        for _ in 0..DEFAULT_SENDER_WINDOW_MAX {
            assert!(note_sender_submission(&state, "jane@x.com", now).await);
        }

        assert!(note_sender_submission(&state, "sam@y.org", now).await);
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Jane" & 'Sam'</b>"#),
            "&lt;b&gt;&quot;Jane&quot; &amp; &#39;Sam&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn rendered_message_escapes_user_content() {
        let html = render_message_html(&submission(
            "Jane<script>",
            "jane@x.com",
            "Hello <world>\nBye",
        ));

        assert!(html.contains("Jane&lt;script&gt;"));
        assert!(html.contains("Hello &lt;world&gt;<br>Bye"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn redacted_email_keeps_lead_character_and_domain() {
        assert_eq!(redact_email("jane@x.com"), "j***@x.com");
        assert_eq!(redact_email("@x.com"), "***@x.com");
        assert_eq!(redact_email("not-an-email"), "invalid");
    }
}
