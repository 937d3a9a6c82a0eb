//! HTTP client for the comic library backend.
//!
//! Thin typed wrappers over the backend's JSON endpoints. Errors are
//! normalized at this boundary: a missing reading position is an absent
//! value, not an error, and deleting a position that does not exist
//! succeeds. Comic paths are encoded segment by segment so the server sees
//! the original `/` boundaries.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComicInfo {
    pub page_count: u32,
}

/// Server-side bookmark for one comic. `page_number` is 1-based; `None`
/// means no bookmark exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedPosition {
    pub page_number: Option<u32>,
    pub time_spent: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub is_dir: bool,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    success: bool,
    #[serde(default)]
    page_count: u32,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PositionResponse {
    #[serde(default)]
    page_number: Option<u32>,
    #[serde(default)]
    time_spent: f64,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BrowseResponse {
    success: bool,
    #[serde(default)]
    entries: Vec<DirEntry>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    pub fn new(server_url: &str) -> Result<Self> {
        let base = Url::parse(server_url)
            .with_context(|| format!("invalid server url: {server_url}"))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("server url cannot be a base: {server_url}"));
        }
        Ok(Self {
            base,
            http: reqwest::Client::new(),
        })
    }

    /// `/api/read/{path}/...` with every comic path segment percent-encoded
    /// individually, never the path as a whole.
    fn read_url(&self, comic_path: &str, tail: &[&str]) -> Url {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .expect("base url was checked to be a valid base");
            segments.pop_if_empty().push("api").push("read");
            for segment in comic_path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
            for segment in tail {
                segments.push(segment);
            }
        }
        url
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .expect("base url was checked to be a valid base");
            segments.pop_if_empty();
            for segment in path.split('/') {
                segments.push(segment);
            }
        }
        url
    }

    pub async fn comic_info(&self, comic_path: &str) -> Result<ComicInfo> {
        let url = self.read_url(comic_path, &["info"]);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("comic info request")?
            .error_for_status()
            .context("comic info request")?;
        let body: InfoResponse = response.json().await.context("comic info response")?;
        if !body.success {
            return Err(anyhow!(
                body.error
                    .unwrap_or_else(|| "backend rejected info request".to_string())
            ));
        }
        Ok(ComicInfo {
            page_count: body.page_count,
        })
    }

    /// Raw image bytes for a 0-based page index.
    pub async fn fetch_page(&self, comic_path: &str, index: usize) -> Result<Vec<u8>> {
        let url = self.read_url(comic_path, &["page", &index.to_string()]);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("page {index} request"))?
            .error_for_status()
            .with_context(|| format!("page {index} request"))?;
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("page {index} body"))?;
        Ok(bytes.to_vec())
    }

    pub async fn load_position(&self, comic_path: &str) -> Result<SavedPosition> {
        let mut url = self.endpoint("api/reading-position");
        url.query_pairs_mut().append_pair("path", comic_path);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("reading position request")?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(SavedPosition {
                page_number: None,
                time_spent: 0.0,
            });
        }
        let body: PositionResponse = response
            .error_for_status()
            .context("reading position request")?
            .json()
            .await
            .context("reading position response")?;
        Ok(SavedPosition {
            page_number: body.page_number.filter(|page| *page > 0),
            time_spent: body.time_spent.max(0.0),
        })
    }

    pub async fn save_position(
        &self,
        comic_path: &str,
        page_number: u32,
        total_pages: u32,
        time_spent: u64,
    ) -> Result<()> {
        let url = self.endpoint("api/reading-position");
        let body = serde_json::json!({
            "comic_path": comic_path,
            "page_number": page_number,
            "total_pages": total_pages,
            "time_spent": time_spent,
        });
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .context("save position request")?;
        ack(response).await.context("save position")
    }

    /// Idempotent: deleting a position that does not exist succeeds.
    pub async fn clear_position(&self, comic_path: &str) -> Result<()> {
        let mut url = self.endpoint("api/reading-position");
        url.query_pairs_mut().append_pair("path", comic_path);
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .context("delete position request")?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        ack(response).await.context("delete position")
    }

    pub async fn mark_read(
        &self,
        comic_path: &str,
        page_count: u32,
        time_spent: u64,
    ) -> Result<()> {
        let url = self.endpoint("api/mark-comic-read");
        let body = serde_json::json!({
            "path": comic_path,
            "page_count": page_count,
            "time_spent": time_spent,
        });
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .context("mark read request")?;
        ack(response).await.context("mark read")
    }

    pub async fn list_directory(&self, dir_path: &str) -> Result<Vec<DirEntry>> {
        let mut url = self.endpoint("api/browse");
        url.query_pairs_mut().append_pair("path", dir_path);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("browse request")?
            .error_for_status()
            .context("browse request")?;
        let body: BrowseResponse = response.json().await.context("browse response")?;
        if !body.success {
            return Err(anyhow!(
                body.error
                    .unwrap_or_else(|| "backend rejected browse request".to_string())
            ));
        }
        Ok(body.entries)
    }
}

async fn ack(response: reqwest::Response) -> Result<()> {
    let body: AckResponse = response
        .error_for_status()?
        .json()
        .await
        .context("backend acknowledgement")?;
    if body.success {
        Ok(())
    } else {
        Err(anyhow!(
            body.error
                .unwrap_or_else(|| "backend reported failure".to_string())
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://comics.local:8000").unwrap()
    }

    #[test]
    fn read_url_encodes_each_segment_separately() {
        let url = client().read_url("series name/issue #1.cbz", &["info"]);
        assert_eq!(
            url.as_str(),
            "http://comics.local:8000/api/read/series%20name/issue%20%231.cbz/info"
        );
    }

    #[test]
    fn read_url_builds_page_requests() {
        let url = client().read_url("a.cbz", &["page", "12"]);
        assert_eq!(
            url.as_str(),
            "http://comics.local:8000/api/read/a.cbz/page/12"
        );
    }

    #[test]
    fn read_url_survives_a_base_with_a_path() {
        let client = ApiClient::new("http://comics.local:8000/library").unwrap();
        let url = client.read_url("a.cbz", &["info"]);
        assert_eq!(
            url.as_str(),
            "http://comics.local:8000/library/api/read/a.cbz/info"
        );
    }

    #[test]
    fn trailing_slash_on_the_base_does_not_double_up() {
        let client = ApiClient::new("http://comics.local:8000/").unwrap();
        let url = client.endpoint("api/browse");
        assert_eq!(url.as_str(), "http://comics.local:8000/api/browse");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn position_response_normalizes_missing_bookmarks() {
        let body: PositionResponse =
            serde_json::from_str(r#"{"page_number": null, "time_spent": 42.0}"#).unwrap();
        assert_eq!(body.page_number, None);

        let body: PositionResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(body.page_number, None);
        assert_eq!(body.time_spent, 0.0);
    }

    #[test]
    fn dir_entries_tolerate_missing_fields() {
        let entry: DirEntry =
            serde_json::from_str(r#"{"name": "a.cbz", "path": "x/a.cbz"}"#).unwrap();
        assert!(!entry.is_dir);
        assert_eq!(entry.thumbnail, None);
    }
}
