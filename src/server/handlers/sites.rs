//! Site index, page rendering and asset handlers.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::super::template_structs::{IndexTemplate, SiteRow};
use super::super::AppState;
use super::static_files::serve_site_file;
use crate::config::SiteSettings;
use crate::session::{PageSession, SessionOptions};

const PAGE: &str = "index.html";

/// List configured sites.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let sites = state
        .settings
        .sites
        .values()
        .map(|site| SiteRow {
            name: site.name.clone(),
            kind: site.kind.to_string(),
            href: format!("/sites/{}/{}", site.name, PAGE),
        })
        .collect();

    let template = IndexTemplate {
        title: "Showcase",
        sites,
    };
    Html(template.render().unwrap_or_else(|e| e.to_string()))
}

/// Send bare site URLs to the page so relative asset links resolve.
pub async fn site_root(State(state): State<AppState>, Path(site): Path<String>) -> Response {
    if state.settings.site(&site).is_none() {
        return not_found(&site);
    }
    Redirect::to(&format!("/sites/{}/{}", site, PAGE)).into_response()
}

/// Render the page or serve one of its files.
pub async fn site_file(
    State(state): State<AppState>,
    Path((site, path)): Path<(String, String)>,
) -> Response {
    let Some(site) = state.settings.site(&site) else {
        return not_found(&site);
    };

    if path.is_empty() || path == PAGE {
        render_page(&state, site).await
    } else {
        serve_site_file(&site.root, &path).await
    }
}

/// Populate the site's template for one request.
///
/// A content failure still yields the template with status 200, the same
/// page a browser would show.
async fn render_page(state: &AppState, site: &SiteSettings) -> Response {
    let template = match site.template_html().await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to read template for {}: {}", site.name, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read template").into_response();
        }
    };

    let loaded = match site.content_location() {
        Ok(location) => state.loader.load_for(site.kind, &location).await,
        Err(e) => Err(e),
    };

    let options = SessionOptions::today().with_layout(state.settings.layout);
    let session = PageSession::open(site.kind, &template, loaded, options);
    Html(session.to_html()).into_response()
}

fn not_found(site: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("Unknown site: {}", site)).into_response()
}
