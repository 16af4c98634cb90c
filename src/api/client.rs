use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::model::{Event, EventDraft, StatusSummary, Task, TaskDraft, TaskPatch};

/// Error from the remote gateway, normalized into a uniform shape.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connection refused, timeout, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// A success response carried a body we couldn't decode
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Optional query filters for GET /tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub status: Option<String>,
    pub milestone: Option<String>,
    pub priority: Option<String>,
    pub kind: Option<String>,
}

impl TaskQuery {
    fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(v) = &self.status {
            params.push(("status", v.as_str()));
        }
        if let Some(v) = &self.milestone {
            params.push(("milestone", v.as_str()));
        }
        if let Some(v) = &self.priority {
            params.push(("priority", v.as_str()));
        }
        if let Some(v) = &self.kind {
            params.push(("type", v.as_str()));
        }
        params
    }
}

/// Repository-level settings exposed by GET /config.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub github_repo_url: String,
}

/// Blocking HTTP client for the task server's JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ApiClient {
        ApiClient {
            base_url: format!("{}/api", base_url.trim_end_matches('/')),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body, normalizing failures.
    fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }
        let text = resp.text()?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request where the response body doesn't matter (DELETE).
    fn send_no_content(&self, req: RequestBuilder) -> Result<(), ApiError> {
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }
        Ok(())
    }

    pub fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
        self.send(self.http.get(self.url("/tasks")).query(&query.params()))
    }

    pub fn get_task(&self, id: i64) -> Result<Task, ApiError> {
        self.send(self.http.get(self.url(&format!("/tasks/{id}"))))
    }

    pub fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        self.send(self.http.post(self.url("/tasks")).json(draft))
    }

    pub fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task, ApiError> {
        self.send(self.http.patch(self.url(&format!("/tasks/{id}"))).json(patch))
    }

    pub fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        self.send_no_content(self.http.delete(self.url(&format!("/tasks/{id}"))))
    }

    pub fn list_events(&self, limit: Option<u32>) -> Result<Vec<Event>, ApiError> {
        let mut req = self.http.get(self.url("/events"));
        if let Some(n) = limit {
            req = req.query(&[("limit", n.to_string())]);
        }
        self.send(req)
    }

    pub fn list_task_events(&self, task_id: i64) -> Result<Vec<Event>, ApiError> {
        self.send(self.http.get(self.url(&format!("/tasks/{task_id}/events"))))
    }

    pub fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        self.send(self.http.post(self.url("/events")).json(draft))
    }

    pub fn get_status(&self) -> Result<StatusSummary, ApiError> {
        self.send(self.http.get(self.url("/status")))
    }

    pub fn get_config(&self) -> Result<ServerConfig, ApiError> {
        self.send(self.http.get(self.url("/config")))
    }

    pub fn get_milestone_order(&self) -> Result<Vec<String>, ApiError> {
        self.send(self.http.get(self.url("/settings/milestone-order")))
    }

    /// PUT the full order; the server echoes what it stored.
    pub fn set_milestone_order(&self, order: &[String]) -> Result<Vec<String>, ApiError> {
        self.send(
            self.http
                .put(self.url("/settings/milestone-order"))
                .json(&order),
        )
    }
}

/// Extract a user-visible message from an error response body.
///
/// The server answers failures with `{"error": "..."}`; anything unparseable
/// falls back to the canonical status text.
fn rejection_message(status: StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && !parsed.error.is_empty()
    {
        return parsed.error;
    }
    status
        .canonical_reason()
        .unwrap_or("request rejected")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejection_message_prefers_error_field() {
        let msg = rejection_message(StatusCode::BAD_REQUEST, r#"{"error":"title is required"}"#);
        assert_eq!(msg, "title is required");
    }

    #[test]
    fn test_rejection_message_falls_back_to_status_text() {
        assert_eq!(
            rejection_message(StatusCode::NOT_FOUND, "<html>gateway</html>"),
            "Not Found"
        );
        assert_eq!(rejection_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
    }

    #[test]
    fn test_base_url_normalization() {
        let client = ApiClient::new("http://localhost:4777/");
        assert_eq!(client.url("/tasks"), "http://localhost:4777/api/tasks");
    }

    #[test]
    fn test_task_query_params() {
        let query = TaskQuery {
            status: Some("todo".into()),
            kind: Some("bug".into()),
            ..TaskQuery::default()
        };
        assert_eq!(query.params(), vec![("status", "todo"), ("type", "bug")]);
    }
}
