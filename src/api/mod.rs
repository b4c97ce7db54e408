use crate::models::{NewNote, Note, NotesPage};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const DEFAULT_API_URL: &str = "https://notehub-public.goit.study/api";
pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EnvConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub log_level: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut config = Self::default_values();

        // Deployments inject `window.ENV = { API_URL, API_TOKEN, LOG_LEVEL }`.
        // Lower-case keys are accepted as a fallback.
        let Some(env) = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object())
        else {
            return config;
        };

        if let Some(api_url) = read_env_string(&env, &["API_URL", "api_url"]) {
            config.api_url = api_url;
        }
        config.api_token = read_env_string(&env, &["API_TOKEN", "api_token"]);
        if let Some(level) = read_env_string(&env, &["LOG_LEVEL", "log_level"]) {
            config.log_level = level;
        }

        config
    }

    fn default_values() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env_string(env: &wasm_bindgen::JsValue, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        js_sys::Reflect::get(env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
            .filter(|s| !s.trim().is_empty())
    })
}

/// Query parameters for `GET /notes`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchNotesParams {
    pub page: u32,
    pub per_page: u32,
    /// `None` (or empty) lists every note.
    pub search: Option<String>,
}

pub(crate) fn notes_url(base_url: &str, params: &FetchNotesParams) -> String {
    let mut url = format!(
        "{}/notes?page={}&perPage={}",
        base_url.trim_end_matches('/'),
        params.page,
        params.per_page
    );
    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        url.push_str("&search=");
        url.push_str(&urlencoding::encode(search));
    }
    url
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            token: config.api_token.clone(),
            ..Self::new(config.api_url.clone())
        }
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn request_api<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        url: String,
        body: Option<&impl Serialize>,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        debug!("event=api_request method={} url={}", method, url);
        let mut req = client.request(method, url);
        if let Some(header) = self.auth_header() {
            req = req.header("Authorization", header);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            warn!("event=api_unauthorized");
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    pub async fn fetch_notes(&self, params: &FetchNotesParams) -> ApiResult<NotesPage> {
        self.request_api(
            reqwest::Method::GET,
            notes_url(&self.base_url, params),
            None::<&()>,
        )
        .await
    }

    pub async fn create_note(&self, note: &NewNote) -> ApiResult<Note> {
        self.request_api(
            reqwest::Method::POST,
            format!("{}/notes", self.base_url.trim_end_matches('/')),
            Some(note),
        )
        .await
    }

    pub async fn delete_note(&self, note_id: &str) -> ApiResult<Note> {
        self.request_api(
            reqwest::Method::DELETE,
            format!(
                "{}/notes/{}",
                self.base_url.trim_end_matches('/'),
                urlencoding::encode(note_id)
            ),
            None::<&()>,
        )
        .await
    }
}
