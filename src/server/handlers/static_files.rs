//! Static file serving from a site root.

use std::path::Path;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Serve `path` from below `root`, refusing anything that escapes it.
pub async fn serve_site_file(root: &Path, path: &str) -> Response {
    let canonical_root = match root.canonicalize() {
        Ok(p) => p,
        Err(_) => {
            tracing::warn!("Site root {} is not readable", root.display());
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        }
    };

    if path.contains("..") || path.starts_with('/') || path.contains('\\') {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    let canonical_file = match canonical_root.join(path).canonicalize() {
        Ok(p) => p,
        Err(_) => {
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        }
    };

    if !canonical_file.starts_with(&canonical_root) || !canonical_file.is_file() {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    let content = match tokio::fs::read(&canonical_file).await {
        Ok(c) => c,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response();
        }
    };

    let mime = mime_guess::from_path(&canonical_file)
        .first_or_octet_stream()
        .to_string();

    ([(header::CONTENT_TYPE, mime)], content).into_response()
}
