//! Web server for the configured sites.
//!
//! Each request for a site page runs a fresh page session: the template is
//! read, the content document loaded and populated, and the resulting HTML
//! returned. Other paths under a site serve files from its root.

mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::content::ContentLoader;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub loader: Arc<ContentLoader>,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let loader = settings.loader()?;
        Ok(Self {
            settings: Arc::new(settings),
            loader: Arc::new(loader),
        })
    }
}

/// Start the web server.
pub async fn serve(settings: Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::Path;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::config::SiteSettings;
    use crate::session::Layout;
    use crate::sites::SiteKind;

    fn settings_for(root: &Path, content: Option<&str>) -> Settings {
        let mut sites = BTreeMap::new();
        sites.insert(
            "cafe".to_string(),
            SiteSettings {
                name: "cafe".to_string(),
                kind: SiteKind::Coffee,
                root: root.to_path_buf(),
                template: None,
                content: content.map(str::to_string),
            },
        );
        Settings {
            user_agent: None,
            request_timeout: None,
            bind: crate::config::DEFAULT_BIND.to_string(),
            layout: Layout::default(),
            sites,
            config_path: None,
        }
    }

    fn setup_test_app(content: Option<&str>) -> (axum::Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("coffee-data.json"),
            r#"{"header":{"title":"Bean There","tagline":"Coffee & more"},"menu":{"title":"Menu","items":[{"title":"Latte","category":"hot","image":"latte.jpg"}]}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("style.css"), "body { color: brown; }").unwrap();

        let state = AppState::new(settings_for(dir.path(), content)).unwrap();
        (create_router(state), dir)
    }

    async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_lists_sites() {
        let (app, _dir) = setup_test_app(None);
        let response = get(app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("/sites/cafe/index.html"));
        assert!(html.contains("coffee"));
    }

    #[tokio::test]
    async fn test_site_root_redirects() {
        let (app, _dir) = setup_test_app(None);
        let response = get(app, "/sites/cafe").await;
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/sites/cafe/index.html"
        );
    }

    #[tokio::test]
    async fn test_page_is_populated() {
        let (app, _dir) = setup_test_app(None);
        let response = get(app, "/sites/cafe/index.html").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(r#"<h1 id="header-title">Bean There</h1>"#));
        assert!(html.contains("Coffee &amp; more"));
        assert!(html.contains(r#"class="filter-btn active" data-category="all""#));
        assert!(html.contains(r#"src="images/latte.jpg""#));
    }

    #[tokio::test]
    async fn test_load_failure_serves_template() {
        let (app, dir) = setup_test_app(None);
        std::fs::remove_file(dir.path().join("coffee-data.json")).unwrap();

        let response = get(app, "/sites/cafe/index.html").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"<h1 id="header-title">Loading...</h1>"#));
        assert!(!html.contains("filter-btn"));
    }

    #[tokio::test]
    async fn test_content_override() {
        let dir = tempdir().unwrap();
        let other = dir.path().join("elsewhere.json");
        std::fs::write(&other, r#"{"about":{"title":"Elsewhere","storyText":""}}"#).unwrap();

        let (app, _site) = setup_test_app(Some(other.to_str().unwrap()));
        let html = body_text(get(app, "/sites/cafe/index.html").await).await;
        assert!(html.contains(r#"<h2 id="about-title">Elsewhere</h2>"#));
    }

    #[tokio::test]
    async fn test_static_file() {
        let (app, _dir) = setup_test_app(None);
        let response = get(app, "/sites/cafe/style.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap_or(""));
        assert!(content_type.unwrap_or("").contains("css"));
    }

    #[tokio::test]
    async fn test_traversal_and_unknown_site() {
        let (app, _dir) = setup_test_app(None);
        let response = get(app.clone(), "/sites/cafe/..%2F..%2Fetc%2Fpasswd").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get(app.clone(), "/sites/cafe/missing.png").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get(app, "/sites/bakery/index.html").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
