// ABOUTME: Blocking HTTP client for the Dynalist API
// ABOUTME: Token-in-body POSTs with fail-fast status and _code handling

use crate::{DocumentReadResponse, Error, FileListResponse, OutlineNode, Result};
use reqwest::blocking::Client;
use serde_json::json;
use std::time::Duration;

fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        return s.to_string();
    }

    // Find a valid UTF-8 boundary at or before max_chars
    let mut boundary = max_chars;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    if boundary == 0 {
        return String::new();
    }

    format!("{}...", &s[..boundary])
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(token: String, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(ApiClient {
            client,
            base_url: base_url.unwrap_or_else(|| "https://dynalist.io/api/v1".into()),
            token,
        })
    }

    fn post<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("User-Agent", "dynamark/0.2 (Rust)")
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            let preview = truncate_str(&message, 100);
            return Err(Error::Api {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                message: preview,
            });
        }

        // Get response text for better error messages
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| {
            eprintln!("Failed to parse response from {}: {}", endpoint, e);
            eprintln!("Response body (first 500 chars): {}", truncate_str(&body, 500));
            Error::Parse(e)
        })
    }

    /// Fetches the flat folder/document listing for the whole account.
    pub fn list_files(&self) -> Result<FileListResponse> {
        let resp: FileListResponse =
            self.post("/file/list", json!({ "token": self.token }))?;

        if !resp.is_ok() {
            return Err(Error::malformed(
                "/file/list",
                format!(
                    "_code = {:?}: {}",
                    resp.code,
                    resp.msg.as_deref().unwrap_or("no message")
                ),
            ));
        }

        Ok(resp)
    }

    /// Fetches one document's outline nodes.
    pub fn read_document(&self, file_id: &str) -> Result<Vec<OutlineNode>> {
        let resp: DocumentReadResponse = self.post(
            "/doc/read",
            json!({ "token": self.token, "file_id": file_id }),
        )?;

        if !resp.is_ok() {
            return Err(Error::malformed(
                "/doc/read",
                format!(
                    "_code = {:?} for file {}: {}",
                    resp.code,
                    file_id,
                    resp.msg.as_deref().unwrap_or("no message")
                ),
            ));
        }

        Ok(resp.nodes)
    }
}
