//! services/portal/src/adapters/articles.rs
//!
//! Adapters that implement the `ArticleSource` port, reading the article
//! manifest (`index.json`) and the files it lists either over HTTP from the
//! static site or from a local directory.

use archive_core::ports::{ArticleSource, PortError, PortResult};
use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

pub const MANIFEST_NAME: &str = "index.json";

fn parse_manifest(raw: &str) -> PortResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| PortError::Parse(MANIFEST_NAME.to_string(), e.to_string()))
}

//=========================================================================================
// HTTP
//=========================================================================================

/// Reads articles from a static site, e.g. `https://example.org/articles`.
#[derive(Clone)]
pub struct HttpArticleSource {
    client: Client,
    base_url: String,
}

impl HttpArticleSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn get_text(&self, name: &str) -> PortResult<String> {
        let url = format!("{}/{}", self.base_url, name);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PortError::Unavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PortError::NotFound(url));
        }
        if !status.is_success() {
            return Err(PortError::Unavailable(format!("{} returned {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| PortError::Unexpected(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl ArticleSource for HttpArticleSource {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_manifest(&self) -> PortResult<Vec<String>> {
        let raw = self.get_text(MANIFEST_NAME).await?;
        parse_manifest(&raw)
    }

    #[instrument(skip(self))]
    async fn fetch_source(&self, name: &str) -> PortResult<String> {
        debug!("Fetching article source over HTTP.");
        self.get_text(name).await
    }
}

//=========================================================================================
// Filesystem
//=========================================================================================

/// Reads articles from a directory laid out like the static site.
#[derive(Clone, Debug)]
pub struct FsArticleSource {
    dir: PathBuf,
}

impl FsArticleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Source names are plain file names; anything that could leave the
    /// directory is refused.
    fn resolve(&self, name: &str) -> PortResult<PathBuf> {
        let plain = Path::new(name)
            .file_name()
            .is_some_and(|file| file == name);
        if !plain {
            return Err(PortError::NotFound(name.to_string()));
        }
        Ok(self.dir.join(name))
    }

    async fn read(&self, name: &str) -> PortResult<String> {
        let path = self.resolve(name)?;
        tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PortError::NotFound(path.display().to_string()),
            _ => PortError::Unavailable(format!("{}: {}", path.display(), e)),
        })
    }
}

#[async_trait]
impl ArticleSource for FsArticleSource {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn fetch_manifest(&self) -> PortResult<Vec<String>> {
        let raw = self.read(MANIFEST_NAME).await?;
        parse_manifest(&raw)
    }

    #[instrument(skip(self))]
    async fn fetch_source(&self, name: &str) -> PortResult<String> {
        self.read(name).await
    }
}
