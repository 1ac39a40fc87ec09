//! Static file serving

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

const VERITAS_CSS: &str = include_str!("../static/veritas.css");

/// Embedded static assets
pub struct StaticFiles {}

impl StaticFiles {
    pub fn new() -> Self {
        Self {}
    }

    /// Serve a static file
    pub fn serve(&self, path: &str) -> Response {
        let content_type = guess_content_type(path);

        match path {
            "veritas.css" => serve_embedded(VERITAS_CSS, content_type),
            _ => (StatusCode::NOT_FOUND, "File not found").into_response(),
        }
    }
}

impl Default for StaticFiles {
    fn default() -> Self {
        Self::new()
    }
}

fn guess_content_type(path: &str) -> &'static str {
    if path.ends_with(".js") {
        "application/javascript"
    } else if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".html") {
        "text/html"
    } else if path.ends_with(".svg") {
        "image/svg+xml"
    } else {
        "application/octet-stream"
    }
}

fn serve_embedded(content: &'static str, content_type: &'static str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        content,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("veritas.css"), "text/css");
        assert_eq!(guess_content_type("app.js"), "application/javascript");
        assert_eq!(guess_content_type("blob"), "application/octet-stream");
    }

    #[test]
    fn unknown_asset_is_not_found() {
        let files = StaticFiles::new();
        assert_eq!(files.serve("missing.css").status(), StatusCode::NOT_FOUND);
        assert_eq!(files.serve("veritas.css").status(), StatusCode::OK);
    }
}
