//! HTTP client for the todos REST API

use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::types::{NewTodo, Todo, TodoPatch};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    Status(StatusCode),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin wrapper over `reqwest::Client` bound to one API base URL.
///
/// Cheap to clone: every background task gets its own copy.
#[derive(Clone)]
pub struct TodoClient {
    http: reqwest::Client,
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("todos/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /todos?userId=<id>`
    pub async fn get_todos(&self, user_id: u32) -> Result<Vec<Todo>, ApiError> {
        debug!(user_id, "Fetching todos");
        let response = self
            .http
            .get(self.url("/todos"))
            .query(&[("userId", user_id)])
            .send()
            .await?;
        read_json(response).await
    }

    /// `POST /todos`
    pub async fn create_todo(&self, todo: &NewTodo) -> Result<Todo, ApiError> {
        debug!(title = %todo.title, "Creating todo");
        let response = self.http.post(self.url("/todos")).json(todo).send().await?;
        read_json(response).await
    }

    /// `PATCH /todos/<id>`
    pub async fn update_todo(&self, id: u64, patch: &TodoPatch) -> Result<Todo, ApiError> {
        debug!(id, ?patch, "Updating todo");
        let response = self
            .http
            .patch(self.url(&format!("/todos/{}", id)))
            .json(patch)
            .send()
            .await?;
        read_json(response).await
    }

    /// `DELETE /todos/<id>`
    pub async fn delete_todo(&self, id: u64) -> Result<(), ApiError> {
        debug!(id, "Deleting todo");
        let response = self
            .http
            .delete(self.url(&format!("/todos/{}", id)))
            .send()
            .await?;
        check_status(&response)?;
        Ok(())
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(status))
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    check_status(&response)?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Accepts one connection, answers with a canned response and hands back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (TodoClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = TodoClient::with_client(&format!("http://{}/", addr), http);
        (client, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    #[tokio::test]
    async fn get_todos_queries_by_user() {
        let (client, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"userId":41,"title":"a","completed":false},{"id":2,"userId":41,"title":"b","completed":true}]"#,
        )
        .await;

        let todos = client.get_todos(41).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /todos?userId=41 HTTP/1.1"));
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[1].title, "b");
        assert!(todos[1].completed);
    }

    #[tokio::test]
    async fn create_todo_posts_json_body() {
        let (client, server) = serve_once(
            "201 Created",
            r#"{"id":9,"userId":41,"title":"walk","completed":false}"#,
        )
        .await;

        let created = client.create_todo(&NewTodo::new(41, "walk")).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /todos HTTP/1.1"));
        assert!(request.contains(r#""userId":41"#));
        assert_eq!(created.id, 9);
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (client, server) = serve_once("500 Internal Server Error", "{}").await;

        let err = client.delete_todo(3).await.unwrap_err();
        let request = server.await.unwrap();

        assert!(request.starts_with("DELETE /todos/3 HTTP/1.1"));
        assert!(matches!(err, ApiError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (client, server) = serve_once("200 OK", "not json").await;

        let err = client.update_todo(4, &TodoPatch::completed(true)).await.unwrap_err();
        let request = server.await.unwrap();

        assert!(request.starts_with("PATCH /todos/4 HTTP/1.1"));
        assert!(request.ends_with(r#"{"completed":true}"#));
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = TodoClient::with_client("http://localhost/api/", reqwest::Client::new());
        assert_eq!(client.base_url(), "http://localhost/api");
        assert_eq!(client.url("/todos"), "http://localhost/api/todos");
    }
}
