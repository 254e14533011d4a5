use crate::models::{Note, User};
use crate::storage;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
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

    fn http(status: reqwest::StatusCode, body: String) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("Request failed ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "https://notes.devlop.tech".to_string();

        // Deployments may override the backend via `window.ENV.API_URL`
        // (or lowercase `api_url`); otherwise the production URL applies.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }

                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_api_url() -> String {
    EnvConfig::new().api_url
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub cin: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// Body shared by create and update. `shared_with` always carries exactly
/// one element; an empty assignee selection is written as an explicit
/// `null` entry (backend contract, not an empty list).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SaveNoteRequest {
    pub title: String,
    pub content: String,
    pub shared_with: Vec<Option<String>>,
}

impl SaveNoteRequest {
    pub fn new(title: &str, content: &str, assignee_id: &str) -> Self {
        let assignee = if assignee_id.is_empty() {
            None
        } else {
            Some(assignee_id.to_string())
        };

        Self {
            title: title.to_string(),
            content: content.to_string(),
            shared_with: vec![assignee],
        }
    }
}

#[derive(Clone)]
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

    /// Session restore on startup: a persisted token is trusted as-is, never
    /// re-validated. An expired token only shows up as failed fetches later.
    pub fn load_from_storage() -> Self {
        Self {
            base_url: get_api_url(),
            token: storage::load_token(),
        }
    }

    pub fn save_to_storage(&self) {
        if let Some(token) = &self.token {
            storage::save_token(token);
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Client-side only: drops the token without calling any endpoint.
    pub fn logout(&mut self) {
        self.token = None;
        storage::clear_token();
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.request(method, url);

        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        req.send().await.map_err(ApiError::network)
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<T> {
        let res = self.send(method, path, body).await?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body))
        }
    }

    pub async fn login(&self, cin: &str, password: &str) -> ApiResult<LoginResponse> {
        self.request(
            reqwest::Method::POST,
            "/api/login",
            Some(&LoginRequest {
                cin: cin.to_string(),
                password: password.to_string(),
            }),
        )
        .await
    }

    pub async fn fetch_notes(&self) -> ApiResult<Vec<Note>> {
        self.request(reqwest::Method::GET, "/api/notes", None::<&()>)
            .await
    }

    pub async fn fetch_users(&self) -> ApiResult<Vec<User>> {
        self.request(reqwest::Method::GET, "/api/users", None::<&()>)
            .await
    }

    pub async fn create_note(&self, req: &SaveNoteRequest) -> ApiResult<Note> {
        self.request(reqwest::Method::POST, "/api/notes", Some(req))
            .await
    }

    pub async fn update_note(&self, id: &str, req: &SaveNoteRequest) -> ApiResult<Note> {
        self.request(reqwest::Method::PUT, &format!("/api/notes/{}", id), Some(req))
            .await
    }

    /// Delete returns no body, so only the status is checked.
    pub async fn delete_note(&self, id: &str) -> ApiResult<()> {
        let res = self
            .send(
                reqwest::Method::DELETE,
                &format!("/api/notes/{}", id),
                None::<&()>,
            )
            .await?;

        if res.status().is_success() {
            Ok(())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_serialization() {
        let req = LoginRequest {
            cin: "AB123456".to_string(),
            password: "secret".to_string(),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["cin"], "AB123456");
        assert_eq!(v["password"], "secret");
    }

    #[test]
    fn test_login_response_contract_deserialize() {
        let parsed: LoginResponse =
            serde_json::from_str(r#"{"token": "abc123"}"#).expect("login response should parse");
        assert_eq!(parsed.token, "abc123");
    }

    #[test]
    fn test_save_note_request_unassigned_writes_explicit_null() {
        let req = SaveNoteRequest::new("A", "B", "");
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["title"], "A");
        assert_eq!(v["content"], "B");
        assert_eq!(v["shared_with"], serde_json::json!([null]));
    }

    #[test]
    fn test_save_note_request_with_assignee() {
        let req = SaveNoteRequest::new("A", "B", "7");
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["shared_with"], serde_json::json!(["7"]));
    }

    #[test]
    fn test_notes_list_contract_deserialize() {
        let json = r#"[
            {"id": 1, "title": "a", "content": "b", "shared_with": [null]},
            {"id": 2, "title": "c", "content": "d",
             "shared_with": [{"id": 9, "first_name": "Sara", "last_name": "Amrani"}]}
        ]"#;
        let notes: Vec<Note> = serde_json::from_str(json).expect("notes list should parse");
        assert_eq!(notes.len(), 2);
        assert!(notes[0].assignee().is_none());
        assert_eq!(notes[1].assignee_label(), "Sara Amrani");
    }

    #[test]
    fn test_users_list_contract_deserialize() {
        let json = r#"[{"id": "9", "first_name": "Sara", "last_name": "Amrani"}]"#;
        let users: Vec<User> = serde_json::from_str(json).expect("users list should parse");
        assert_eq!(users[0].full_name(), "Sara Amrani");
    }

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("https://notes.devlop.tech".to_string());
        assert_eq!(client.base_url, "https://notes.devlop.tech");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_api_client_set_token() {
        let mut client = ApiClient::new("https://notes.devlop.tech".to_string());
        client.set_token("test-token".to_string());
        assert_eq!(client.token, Some("test-token".to_string()));
    }

    #[test]
    fn test_api_client_get_auth_header_without_token() {
        let client = ApiClient::new("https://notes.devlop.tech".to_string());
        assert!(client.get_auth_header().is_none());
    }

    #[test]
    fn test_api_client_get_auth_header_with_token() {
        let mut client = ApiClient::new("https://notes.devlop.tech".to_string());
        client.set_token("my-token".to_string());
        let header = client.get_auth_header().expect("Should have auth header");
        assert_eq!(header, "Bearer my-token");
    }

    #[test]
    fn test_parse_error_kind_and_display() {
        let e = ApiError::parse("unexpected end of input");
        assert_eq!(e.kind, ApiErrorKind::Parse);
        assert_eq!(e.to_string(), "unexpected end of input");
    }

    #[test]
    fn test_http_error_message_includes_status() {
        let e = ApiError::http(reqwest::StatusCode::NOT_FOUND, "gone".to_string());
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert!(e.to_string().contains("404"));
        assert!(e.to_string().contains("gone"));
    }

    #[test]
    fn test_api_client_is_authenticated() {
        let mut client = ApiClient::new("https://notes.devlop.tech".to_string());
        assert!(!client.is_authenticated());
        client.set_token("my-token".to_string());
        assert!(client.is_authenticated());
    }
}
