//! Fetching and decoding content documents.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use super::error::LoadError;
use super::http_client::HttpClient;
use super::schema::{CoffeeContent, GamingContent, PortfolioContent, SiteContent, TutorContent};
use super::validate::ValidationReport;
use crate::sites::{PageContent, SiteKind};

/// Where a page or content document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLocation {
    Url(Url),
    File(PathBuf),
}

impl ContentLocation {
    /// Interpret `s` as an `http(s)://` or `file://` URL, otherwise a path.
    pub fn parse(s: &str) -> Result<Self, LoadError> {
        if let Ok(url) = Url::parse(s) {
            match url.scheme() {
                "http" | "https" => return Ok(ContentLocation::Url(url)),
                "file" => {
                    return url
                        .to_file_path()
                        .map(ContentLocation::File)
                        .map_err(|_| LoadError::Location(s.to_string()));
                }
                // Windows drive letters parse as a one-letter scheme.
                scheme if scheme.len() > 1 => return Err(LoadError::Location(s.to_string())),
                _ => {}
            }
        }
        Ok(ContentLocation::File(PathBuf::from(s)))
    }

    /// Resolve `name` the way a page resolves a relative fetch.
    ///
    /// URLs are joined per RFC 3986; a file page resolves against its
    /// directory (or against itself when it is a directory).
    pub fn relative_to(&self, name: &str) -> Result<Self, LoadError> {
        match self {
            ContentLocation::Url(base) => base
                .join(name)
                .map(ContentLocation::Url)
                .map_err(|_| LoadError::Location(format!("{} relative to {}", name, base))),
            ContentLocation::File(page) => {
                let dir = if page.is_dir() {
                    page.as_path()
                } else {
                    page.parent().unwrap_or(Path::new("."))
                };
                Ok(ContentLocation::File(dir.join(name)))
            }
        }
    }
}

impl fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentLocation::Url(url) => write!(f, "{}", url),
            ContentLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Decode and validate a content document.
pub fn parse_content<C: SiteContent>(bytes: &[u8], location: &str) -> Result<C, LoadError> {
    let mut content: C = serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
        location: location.to_string(),
        source,
    })?;

    let mut report = ValidationReport::default();
    content.prepare(&mut report);
    if !report.is_empty() {
        return Err(LoadError::Invalid {
            location: location.to_string(),
            report,
        });
    }
    Ok(content)
}

/// Single-shot loader: one request per call, no retry.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    client: HttpClient,
}

impl ContentLoader {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Read the raw bytes at `location`.
    pub async fn fetch(&self, location: &ContentLocation) -> Result<Vec<u8>, LoadError> {
        match location {
            ContentLocation::Url(url) => {
                let network = |source| LoadError::Network {
                    location: url.to_string(),
                    source,
                };
                let response = self.client.get(url.as_str()).await.map_err(network)?;
                if !response.is_success() {
                    return Err(LoadError::Status {
                        status: response.status.as_u16(),
                        location: url.to_string(),
                    });
                }
                response.bytes().await.map_err(network)
            }
            ContentLocation::File(path) => {
                tokio::fs::read(path).await.map_err(|source| LoadError::Io {
                    location: path.display().to_string(),
                    source,
                })
            }
        }
    }

    /// Fetch, parse and validate one document.
    pub async fn load<C: SiteContent>(&self, location: &ContentLocation) -> Result<C, LoadError> {
        let bytes = self.fetch(location).await?;
        let content = parse_content(&bytes, &location.to_string())?;
        tracing::debug!("Loaded {} ({} bytes)", location, bytes.len());
        Ok(content)
    }

    /// Load the document for `kind` into its page content variant.
    pub async fn load_for(
        &self,
        kind: SiteKind,
        location: &ContentLocation,
    ) -> Result<PageContent, LoadError> {
        Ok(match kind {
            SiteKind::Coffee => PageContent::Coffee(self.load::<CoffeeContent>(location).await?),
            SiteKind::Gaming => PageContent::Gaming(self.load::<GamingContent>(location).await?),
            SiteKind::Tutor => PageContent::Tutor(self.load::<TutorContent>(location).await?),
            SiteKind::Portfolio => {
                PageContent::Portfolio(self.load::<PortfolioContent>(location).await?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    fn loader() -> ContentLoader {
        ContentLoader::new(HttpClient::new().unwrap())
    }

    async fn spawn_server() -> Url {
        let app = Router::new()
            .route(
                "/site/coffee-data.json",
                get(|| async { r#"{"about":{"title":"Our Story","storyText":"Since 2010"}}"# }),
            )
            .route("/site/broken.json", get(|| async { "{ not json" }))
            .route(
                "/site/gone.json",
                get(|| async { (StatusCode::NOT_FOUND, "missing") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{}/site/index.html", addr)).unwrap()
    }

    #[test]
    fn test_parse_location() {
        assert!(matches!(
            ContentLocation::parse("https://example.com/data.json").unwrap(),
            ContentLocation::Url(_)
        ));
        assert_eq!(
            ContentLocation::parse("sites/coffee/coffee-data.json").unwrap(),
            ContentLocation::File(PathBuf::from("sites/coffee/coffee-data.json"))
        );
        assert!(ContentLocation::parse("ftp://example.com/data.json").is_err());
    }

    #[test]
    fn test_relative_to_page() {
        let page = ContentLocation::parse("https://example.com/coffee/index.html").unwrap();
        assert_eq!(
            page.relative_to("coffee-data.json").unwrap().to_string(),
            "https://example.com/coffee/coffee-data.json"
        );

        let page = ContentLocation::File(PathBuf::from("/srv/coffee/index.html"));
        assert_eq!(
            page.relative_to("coffee-data.json").unwrap(),
            ContentLocation::File(PathBuf::from("/srv/coffee/coffee-data.json"))
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tutor-data.json");
        std::fs::write(
            &path,
            r#"{"logoText":"TutorPro","stats":{"items":[{"number":120,"label":"Students","suffix":"+"}]}}"#,
        )
        .unwrap();

        let content: TutorContent = loader()
            .load(&ContentLocation::File(path))
            .await
            .unwrap();
        assert_eq!(content.logo_text.as_deref(), Some("TutorPro"));
        assert_eq!(content.stats.unwrap().items[0].number, 120);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = loader()
            .load::<CoffeeContent>(&ContentLocation::File(dir.path().join("nope.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_invalid_content_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"projects":[{"title":"Site","liveSiteUrl":""}]}"#).unwrap();

        let err = loader()
            .load_for(SiteKind::Portfolio, &ContentLocation::File(path))
            .await
            .unwrap_err();
        let report = err.report().unwrap();
        assert_eq!(report.problems()[0].path, "projects[0].liveSiteUrl");
    }

    #[tokio::test]
    async fn test_load_over_http() {
        let page = ContentLocation::Url(spawn_server().await);
        let location = page.relative_to(CoffeeContent::FILE_NAME).unwrap();

        let content = loader().load_for(SiteKind::Coffee, &location).await.unwrap();
        match content {
            PageContent::Coffee(coffee) => {
                assert_eq!(coffee.about.unwrap().story_text, "Since 2010");
                assert!(coffee.menu.is_none());
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_status_and_parse_errors() {
        let page = ContentLocation::Url(spawn_server().await);

        let err = loader()
            .load::<CoffeeContent>(&page.relative_to("gone.json").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, .. }));
        assert!(err.to_string().starts_with("HTTP error! status: 404"));

        let err = loader()
            .load::<CoffeeContent>(&page.relative_to("broken.json").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
