//! GitHub API client implementation

use crate::config::Config;
use crate::core::{FolioError, FolioResult};
use crate::di::traits::GitHubProvider;
use crate::github::types::{
    ApiErrorBody, ContentCommit, ContentFile, ContentItem, DeleteContentsRequest, Gist,
    GistUpdateRequest, PutContentsRequest,
};
use async_trait::async_trait;
use base64::Engine;
use reqwest::{header, Client as HttpClient, RequestBuilder, StatusCode};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;

/// GitHub API client for the Contents and Gist endpoints
pub struct GitHubClient {
    http_client: HttpClient,
    api_url: String,
    token: Option<String>,
    rate_limiter: Arc<RateLimiter>,
}

/// Rate limiter for GitHub API
struct RateLimiter {
    remaining: Mutex<u64>,
    reset_time: Mutex<SystemTime>,
}

impl GitHubClient {
    /// Create a new GitHub client from config, resolving the token
    pub fn new(config: &Config) -> FolioResult<Self> {
        Self::with_token(
            &config.github.api_url,
            config.resolve_token(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create a client for an explicit API URL and token
    pub fn with_token(
        api_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> FolioResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("folio-portfolio-store"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        if let Some(ref token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("token {}", token))
                    .map_err(|e| FolioError::Config(format!("Invalid GitHub token: {}", e)))?,
            );
        }

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FolioError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let has_token = token.is_some();
        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            rate_limiter: Arc::new(RateLimiter {
                remaining: Mutex::new(if has_token { 5000 } else { 60 }),
                reset_time: Mutex::new(SystemTime::now() + Duration::from_secs(3600)),
            }),
        })
    }

    /// Whether requests carry an `Authorization` header
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            encode_path(path)
        )
    }

    fn gist_url(&self, gist_id: &str) -> String {
        format!("{}/gists/{}", self.api_url, urlencoding::encode(gist_id))
    }

    /// Fetch a file's Contents API entry; a large file's body is not downloaded
    pub async fn get_metadata(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<ContentItem> {
        let url = self.contents_url(owner, repo, path);
        let request = self.http_client.get(&url).query(&[("ref", ref_)]);
        let item: ContentItem = self.send_json(request, path).await?;

        if item.kind != crate::github::types::ContentType::File {
            return Err(FolioError::Decode(format!(
                "Expected a file at {}, found a {}",
                path, item.kind
            )));
        }
        Ok(item)
    }

    /// Fetch a file and decode its base64 body
    pub async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<ContentFile> {
        let item = self.get_metadata(owner, repo, path, ref_).await?;

        let bytes = match (item.encoding.as_deref(), item.content.as_deref()) {
            (Some("base64"), Some(content)) => decode_base64(content)?,
            // Files over 1 MB come back with encoding "none" and no inline body
            _ if item.size > 0 => match item.download_url.as_deref() {
                Some(raw_url) => self.fetch_raw(raw_url, path).await?,
                None => {
                    return Err(FolioError::Decode(format!(
                        "No inline content or download URL for {}",
                        path
                    )))
                }
            },
            _ => Vec::new(),
        };

        Ok(ContentFile {
            path: item.path,
            sha: item.sha,
            download_url: item.download_url,
            bytes,
        })
    }

    /// List the entries of a repository directory
    pub async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<Vec<ContentItem>> {
        let url = self.contents_url(owner, repo, path);
        let request = self.http_client.get(&url).query(&[("ref", ref_)]);
        self.send_json(request, path).await
    }

    /// Create or replace a file
    pub async fn put_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &PutContentsRequest,
    ) -> FolioResult<ContentCommit> {
        let url = self.contents_url(owner, repo, path);
        let request = self.http_client.put(&url).json(body);
        self.send_json(request, path).await
    }

    /// Delete a file; the body must carry the file's current SHA
    pub async fn delete_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &DeleteContentsRequest,
    ) -> FolioResult<()> {
        let url = self.contents_url(owner, repo, path);
        let request = self.http_client.delete(&url).json(body);
        self.send(request, path).await?;
        Ok(())
    }

    /// Fetch a gist with its files
    pub async fn get_gist(&self, gist_id: &str) -> FolioResult<Gist> {
        let request = self.http_client.get(self.gist_url(gist_id));
        self.send_json(request, &format!("gist {}", gist_id)).await
    }

    /// Fetch one file of a gist, following `raw_url` when the inline copy is truncated
    pub async fn get_gist_file(&self, gist_id: &str, file_name: &str) -> FolioResult<String> {
        let gist = self.get_gist(gist_id).await?;
        let file = gist.files.get(file_name).ok_or_else(|| {
            FolioError::NotFound(format!("{} in gist {}", file_name, gist_id))
        })?;

        match (&file.content, file.truncated, &file.raw_url) {
            (Some(content), false, _) => Ok(content.clone()),
            (_, _, Some(raw_url)) => {
                let bytes = self.fetch_raw(raw_url, file_name).await?;
                String::from_utf8(bytes).map_err(|e| {
                    FolioError::Decode(format!("Invalid UTF-8 in {}: {}", file_name, e))
                })
            }
            _ => Err(FolioError::Decode(format!(
                "Gist file {} has no content",
                file_name
            ))),
        }
    }

    /// Replace the content of one gist file
    pub async fn update_gist_file(
        &self,
        gist_id: &str,
        file_name: &str,
        content: String,
    ) -> FolioResult<()> {
        let body = GistUpdateRequest::single(file_name, content);
        let request = self.http_client.patch(self.gist_url(gist_id)).json(&body);
        self.send(request, &format!("gist {}", gist_id)).await?;
        Ok(())
    }

    async fn fetch_raw(&self, url: &str, target: &str) -> FolioResult<Vec<u8>> {
        let response = self.send(self.http_client.get(url), target).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Send a request, handling rate limiting and non-success statuses
    async fn send(&self, request: RequestBuilder, target: &str) -> FolioResult<reqwest::Response> {
        self.check_rate_limit().await?;

        let request = request.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "GitHub API request");

        let response = self.http_client.execute(request).await?;

        self.update_rate_limit(&response).await;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let remaining_zero = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "0")
            .unwrap_or(false);
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    body
                }
            });

        tracing::debug!(%status, path = target, %message, "GitHub API error");
        Err(classify_error(status, remaining_zero, message, target))
    }

    /// Send a request and parse the JSON response
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
        target: &str,
    ) -> FolioResult<T> {
        let response = self.send(request, target).await?;
        response.json().await.map_err(|e| {
            FolioError::Decode(format!(
                "Failed to parse GitHub API response for {}: {}",
                target, e
            ))
        })
    }

    /// Check if we're within rate limits
    async fn check_rate_limit(&self) -> FolioResult<()> {
        let remaining = *self.rate_limiter.remaining.lock().await;
        let reset_time = *self.rate_limiter.reset_time.lock().await;

        if remaining == 0 {
            let now = SystemTime::now();
            if now < reset_time {
                let wait_duration = reset_time.duration_since(now).unwrap_or(Duration::ZERO);
                return Err(FolioError::RateLimited(format!(
                    "Reset in {} seconds. {}",
                    wait_duration.as_secs(),
                    if self.token.is_none() {
                        "Consider setting GITHUB_TOKEN to increase rate limit to 5000/hour."
                    } else {
                        ""
                    }
                )));
            }
        }

        Ok(())
    }

    /// Update rate limit from response headers
    async fn update_rate_limit(&self, response: &reqwest::Response) {
        if let Some(remaining) = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
        {
            *self.rate_limiter.remaining.lock().await = remaining;
        }

        if let Some(reset) = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
        {
            *self.rate_limiter.reset_time.lock().await =
                SystemTime::UNIX_EPOCH + Duration::from_secs(reset);
        }
    }
}

/// Percent-encode each segment of a repository path, keeping `/`
fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// GitHub wraps base64 bodies at 60 columns
pub(crate) fn decode_base64(content: &str) -> FolioResult<Vec<u8>> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| FolioError::Decode(format!("Failed to decode base64 content: {}", e)))
}

/// Map a non-success status to the error taxonomy
fn classify_error(
    status: StatusCode,
    remaining_zero: bool,
    message: String,
    target: &str,
) -> FolioError {
    match status {
        StatusCode::NOT_FOUND => FolioError::NotFound(target.to_string()),
        StatusCode::CONFLICT => FolioError::Conflict(format!("{}: {}", target, message)),
        // GitHub answers a missing or mismatched sha with 422
        StatusCode::UNPROCESSABLE_ENTITY if message.to_lowercase().contains("sha") => {
            FolioError::Conflict(format!("{}: {}", target, message))
        }
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if remaining_zero => {
            FolioError::RateLimited(message)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FolioError::Unauthorized(message),
        _ => FolioError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

// Implement GitHubProvider trait
#[async_trait]
impl GitHubProvider for GitHubClient {
    async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<ContentFile> {
        Self::get_contents(self, owner, repo, path, ref_).await
    }

    async fn get_metadata(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<ContentItem> {
        Self::get_metadata(self, owner, repo, path, ref_).await
    }

    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        ref_: &str,
    ) -> FolioResult<Vec<ContentItem>> {
        Self::list_directory(self, owner, repo, path, ref_).await
    }

    async fn put_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &PutContentsRequest,
    ) -> FolioResult<ContentCommit> {
        Self::put_contents(self, owner, repo, path, body).await
    }

    async fn delete_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        body: &DeleteContentsRequest,
    ) -> FolioResult<()> {
        Self::delete_contents(self, owner, repo, path, body).await
    }

    async fn get_gist_file(&self, gist_id: &str, file_name: &str) -> FolioResult<String> {
        Self::get_gist_file(self, gist_id, file_name).await
    }

    async fn update_gist_file(
        &self,
        gist_id: &str,
        file_name: &str,
        content: String,
    ) -> FolioResult<()> {
        Self::update_gist_file(self, gist_id, file_name, content).await
    }
}
