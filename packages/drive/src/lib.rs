// ABOUTME: Drive storage client holding attachment content outside the record store
// ABOUTME: Folder-per-project layout with find-or-create semantics and an id cache

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Drive storage errors
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Drive storage not configured")]
    NotConfigured,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Drive API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type DriveResult<T> = Result<T, DriveError>;

/// Configuration for the drive client
///
/// The access token is supplied ready to use; token acquisition and refresh
/// happen outside this system.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// Id of the root folder holding one subfolder per project.
    pub folder_id: Option<String>,
    /// Bearer token for the drive API.
    pub access_token: Option<String>,
}

impl DriveConfig {
    /// Load configuration from environment variables
    ///
    /// Both `GOOGLE_DRIVE_FOLDER_ID` and `GOOGLE_DRIVE_TOKEN` must be set
    /// for uploads to be enabled.
    pub fn from_env() -> Self {
        Self {
            folder_id: std::env::var("GOOGLE_DRIVE_FOLDER_ID").ok(),
            access_token: std::env::var("GOOGLE_DRIVE_TOKEN").ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Client for the external drive holding attachment content
pub struct DriveClient {
    http_client: Client,
    config: DriveConfig,
    folders_cache: Mutex<HashMap<String, String>>,
}

impl DriveClient {
    pub fn new(config: DriveConfig) -> DriveResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DriveError::Network(e.to_string()))?;

        if config.folder_id.is_none() || config.access_token.is_none() {
            warn!("Drive storage not configured; attachment uploads are disabled");
        }

        Ok(Self {
            http_client,
            config,
            folders_cache: Mutex::new(HashMap::new()),
        })
    }

    /// Whether the client holds a folder id and token
    pub fn enabled(&self) -> bool {
        self.config.folder_id.is_some() && self.config.access_token.is_some()
    }

    fn credentials(&self) -> DriveResult<(&str, &str)> {
        match (&self.config.folder_id, &self.config.access_token) {
            (Some(folder_id), Some(token)) => Ok((folder_id, token)),
            _ => Err(DriveError::NotConfigured),
        }
    }

    fn cached_folder(&self, key: &str) -> Option<String> {
        let cache = self
            .folders_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.get(key).cloned()
    }

    fn remember_folder(&self, key: String, id: String) {
        let mut cache = self
            .folders_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.insert(key, id);
    }

    /// Find the folder for a project, creating it when absent
    pub async fn ensure_project_folder(&self, project_name: &str) -> DriveResult<String> {
        let (parent_id, token) = self.credentials()?;

        let cache_key = format!("{}:{}", parent_id, project_name);
        if let Some(folder_id) = self.cached_folder(&cache_key) {
            debug!("Using cached folder for '{}'", project_name);
            return Ok(folder_id);
        }

        let query = format!(
            "name='{}' and '{}' in parents and mimeType='{}' and trashed=false",
            escape_query(project_name),
            parent_id,
            FOLDER_MIME_TYPE,
        );

        let response = self
            .http_client
            .get(FILES_URL)
            .bearer_auth(token)
            .query(&[("q", query.as_str()), ("spaces", "drive"), ("fields", "files(id, name)")])
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let listing: FileList = response
            .json()
            .await
            .map_err(|e| DriveError::InvalidResponse(e.to_string()))?;

        if let Some(existing) = listing.files.into_iter().next() {
            debug!("Found existing folder for '{}'", project_name);
            self.remember_folder(cache_key, existing.id.clone());
            return Ok(existing.id);
        }

        let metadata = serde_json::json!({
            "name": project_name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id],
        });

        let response = self
            .http_client
            .post(FILES_URL)
            .bearer_auth(token)
            .json(&metadata)
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let created: DriveFile = response
            .json()
            .await
            .map_err(|e| DriveError::InvalidResponse(e.to_string()))?;

        info!("Created drive folder for '{}'", project_name);
        self.remember_folder(cache_key, created.id.clone());
        Ok(created.id)
    }

    /// Upload file content into the project's folder
    pub async fn upload_file(
        &self,
        data: Vec<u8>,
        filename: &str,
        project_name: &str,
    ) -> DriveResult<()> {
        let folder_id = self.ensure_project_folder(project_name).await?;
        let (_, token) = self.credentials()?;

        let metadata = serde_json::json!({
            "name": filename,
            "parents": [folder_id],
        });

        let boundary = "csms-upload-boundary";
        let body = multipart_related_body(boundary, &metadata.to_string(), &data);

        let response = self
            .http_client
            .post(UPLOAD_URL)
            .bearer_auth(token)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!("Uploaded '{}' to drive folder '{}'", filename, project_name);
        Ok(())
    }
}

/// Escape single quotes in a drive query literal
fn escape_query(value: &str) -> String {
    value.replace('\'', "\\'")
}

/// Assemble a two-part multipart/related body: JSON metadata, then content
fn multipart_related_body(boundary: &str, metadata: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(metadata.len() + content.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("--{boundary}\r\nContent-Type: application/octet-stream\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled_client() -> DriveClient {
        DriveClient::new(DriveConfig {
            folder_id: None,
            access_token: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn disabled_client_rejects_operations() {
        let client = disabled_client();
        assert!(!client.enabled());

        let folder = client.ensure_project_folder("Alpha").await;
        assert!(matches!(folder, Err(DriveError::NotConfigured)));

        let upload = client.upload_file(vec![1, 2, 3], "chart.png", "Alpha").await;
        assert!(matches!(upload, Err(DriveError::NotConfigured)));
    }

    #[test]
    fn query_literal_escapes_quotes() {
        assert_eq!(escape_query("O'Brien Well"), "O\\'Brien Well");
    }

    #[test]
    fn multipart_body_wraps_both_parts() {
        let body = multipart_related_body("b", "{\"name\":\"f\"}", b"bytes");
        let text = String::from_utf8_lossy(&body);
        assert!(text.starts_with("--b\r\n"));
        assert!(text.contains("{\"name\":\"f\"}"));
        assert!(text.contains("bytes"));
        assert!(text.ends_with("--b--\r\n"));
    }
}
