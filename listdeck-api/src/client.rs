//! REST client for the admin backend.

use crate::config::ConsoleConfig;
use crate::error::ApiClientError;
use listdeck_core::{ListRequest, RowId, RowPage};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Standard response envelope; `code == 0` is success, anything else is a
/// rejection carrying `msg`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ResponseData<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ResponseData<T> {
    fn into_data(self) -> Result<T, ApiClientError> {
        match self.accepted()? {
            Some(data) => Ok(data),
            None => Err(ApiClientError::InvalidResponse(
                "success envelope without data".to_string(),
            )),
        }
    }

    fn accepted(self) -> Result<Option<T>, ApiClientError> {
        if self.code == 0 {
            Ok(self.data)
        } else {
            Err(ApiClientError::Rejected {
                code: self.code,
                message: self.msg.unwrap_or_else(|| "no message".to_string()),
            })
        }
    }
}

/// Paged payload carried by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PageDto<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

impl<T> From<PageDto<T>> for RowPage<T> {
    fn from(page: PageDto<T>) -> Self {
        RowPage {
            rows: page.rows,
            total: page.total,
        }
    }
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
    download_dir: PathBuf,
}

impl RestClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let auth_header = build_auth_headers(config)?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_header,
            download_dir: config.download_dir.clone(),
        })
    }

    /// GET a list endpoint with the merged request as the query string.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &ListRequest,
    ) -> Result<RowPage<T>, ApiClientError> {
        debug!(path, "list request");
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(url)
            .headers(self.auth_header.clone())
            .query(request)
            .send()
            .await?;
        let envelope: ResponseData<PageDto<T>> = parse_response(response).await?;
        Ok(envelope.into_data()?.into())
    }

    /// DELETE with the ids joined into a single comma-separated `ids`
    /// query parameter, as the backend expects.
    pub async fn delete_ids(&self, path: &str, ids: &[RowId]) -> Result<(), ApiClientError> {
        debug!(path, count = ids.len(), "delete request");
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .delete(url)
            .headers(self.auth_header.clone())
            .query(&[("ids", joined)])
            .send()
            .await?;
        let envelope: ResponseData<serde_json::Value> = parse_response(response).await?;
        envelope.accepted()?;
        Ok(())
    }

    /// POST a JSON command body (create operations).
    pub async fn post_command<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiClientError> {
        debug!(path, "create request");
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(url)
            .headers(self.auth_header.clone())
            .json(body)
            .send()
            .await?;
        let envelope: ResponseData<serde_json::Value> = parse_response(response).await?;
        envelope.accepted()?;
        Ok(())
    }

    /// PUT a JSON command body (update operations).
    pub async fn put_command<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiClientError> {
        debug!(path, "update request");
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .put(url)
            .headers(self.auth_header.clone())
            .json(body)
            .send()
            .await?;
        let envelope: ResponseData<serde_json::Value> = parse_response(response).await?;
        envelope.accepted()?;
        Ok(())
    }

    /// GET an export endpoint and write the body under the configured
    /// download directory with the given file name.
    pub async fn download(
        &self,
        path: &str,
        request: &ListRequest,
        file_name: &str,
    ) -> Result<PathBuf, ApiClientError> {
        debug!(path, file_name, "export download");
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(url)
            .headers(self.auth_header.clone())
            .query(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ApiClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }
        let bytes = response.bytes().await?;
        tokio::fs::create_dir_all(&self.download_dir).await?;
        let target = self.download_dir.join(file_name);
        tokio::fs::write(&target, &bytes).await?;
        Ok(target)
    }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ResponseData<T>, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<ResponseData<T>>().await?)
    } else {
        let text = response.text().await?;
        Err(ApiClientError::InvalidResponse(format!(
            "HTTP {}: {}",
            status.as_u16(),
            text
        )))
    }
}

fn build_auth_headers(config: &ConsoleConfig) -> Result<HeaderMap, ApiClientError> {
    let mut headers = HeaderMap::new();
    if let Some(api_key) = &config.auth.api_key {
        headers.insert(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_str(api_key).map_err(|e| ApiClientError::Config(e.to_string()))?,
        );
    }
    if let Some(token) = &config.auth.bearer_token {
        let value = format!("Bearer {token}");
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&value).map_err(|e| ApiClientError::Config(e.to_string()))?,
        );
    }
    Ok(headers)
}
