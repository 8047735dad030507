//! REST client for the puzzle store, built on `fetch`.

use serde::de::DeserializeOwned;
use shared::capture::Submission;
use shared::{
    paths, BookmarkResponse, DeleteResponse, PuzzleDocument, PuzzleId, StatsResponse,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::dom;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// fetch rejected or a browser API failed
    Transport(String),
    /// Server answered with a non-2xx status
    Status(u16, String),
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status(code, body) => write!(f, "Server returned {}: {}", code, body),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        ApiError::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<ApiError> for JsValue {
    fn from(err: ApiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Send a request and return the response body as text
async fn send(method: &str, url: &str, body: Option<String>) -> Result<String, ApiError> {
    let init = RequestInit::new();
    init.set_method(method);
    if let Some(body) = &body {
        init.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &init)?;
    if body.is_some() {
        request.headers().set("Content-Type", "application/json")?;
    }

    let window = dom::window()?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    let text = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        return Err(ApiError::Status(response.status(), text));
    }
    Ok(text)
}

async fn send_json<T: DeserializeOwned>(
    method: &str,
    url: &str,
    body: Option<String>,
) -> Result<T, ApiError> {
    let text = send(method, url, body).await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn create_puzzle(submission: &Submission) -> Result<PuzzleDocument, ApiError> {
    let body = serde_json::to_string(submission).map_err(|e| ApiError::Decode(e.to_string()))?;
    send_json("POST", paths::PUZZLES, Some(body)).await
}

pub async fn list_puzzles() -> Result<Vec<PuzzleDocument>, ApiError> {
    send_json("GET", paths::PUZZLES, None).await
}

/// `Ok(None)` when the store has no such puzzle
pub async fn get_puzzle(id: &PuzzleId) -> Result<Option<PuzzleDocument>, ApiError> {
    send_json("GET", &paths::puzzle(id), None).await
}

pub async fn bookmark(id: &PuzzleId) -> Result<BookmarkResponse, ApiError> {
    send_json("PATCH", &paths::bookmark(id), None).await
}

pub async fn delete_puzzle(id: &PuzzleId) -> Result<DeleteResponse, ApiError> {
    send_json("DELETE", &paths::puzzle(id), None).await
}

pub async fn stats() -> Result<StatsResponse, ApiError> {
    send_json("GET", paths::STATS, None).await
}

/// Plain-text liveness message
pub async fn connected() -> Result<String, ApiError> {
    send("GET", paths::CONNECTED, None).await
}
