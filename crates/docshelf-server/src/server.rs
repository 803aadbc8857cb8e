//! Site server implementation.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use docshelf_index::ManualGroup;

use crate::shim;

/// Configuration for the site server.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Directory containing the built site (documentation trees included)
    pub site_dir: PathBuf,

    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Open browser on start
    pub open: bool,

    /// URL prefix under which documentation trees are served
    pub docs_prefix: String,

    /// Path of the manual manifest rendered on the library page
    pub manifest_path: PathBuf,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("static"),
            host: "127.0.0.1".to_string(),
            port: 4000,
            open: true,
            docs_prefix: "/documentation".to_string(),
            manifest_path: PathBuf::from("manual-list.json"),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    Bind(SocketAddr, String),
}

/// Shared server state.
pub struct ServerState {
    pub config: ServeConfig,
}

/// Static site server with the search-redirect shim installed.
pub struct SiteServer {
    config: ServeConfig,
}

impl SiteServer {
    /// Create a new site server.
    pub fn new(config: ServeConfig) -> Self {
        Self { config }
    }

    /// Build the router: library page, static site fallback, shim on top.
    pub fn router(&self) -> Router {
        let state = Arc::new(ServerState {
            config: self.config.clone(),
        });

        Router::new()
            .route("/", get(library_handler))
            .fallback_service(ServeDir::new(&self.config.site_dir))
            .layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                shim::search_redirect,
            ))
            .with_state(state)
    }

    /// Start the server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let app = self.router();

        tracing::info!(
            "Serving {} at http://{}",
            self.config.site_dir.display(),
            addr
        );

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handler for the manual library page.
async fn library_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let groups = read_manifest(&state.config.manifest_path);
    Html(render_library(&groups))
}

/// Read the manual manifest, degrading to an empty listing on any problem.
fn read_manifest(path: &Path) -> Vec<ManualGroup> {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(groups) => groups,
            Err(e) => {
                tracing::warn!("Malformed manifest {}: {}", path.display(), e);
                Vec::new()
            }
        },
        Err(e) => {
            tracing::warn!("No manifest at {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Render the manual library as plain HTML.
fn render_library(groups: &[ManualGroup]) -> String {
    let listing = if groups.is_empty() {
        "<p>No manuals have been published yet.</p>".to_string()
    } else {
        groups
            .iter()
            .map(|group| {
                let versions = group
                    .manuals
                    .iter()
                    .map(|m| format!(r#"    <li><a href="{}">{}</a></li>"#, m.path, m.version))
                    .collect::<Vec<_>>()
                    .join("\n");

                format!(
                    "<section>\n  <h2>{}</h2>\n  <ul>\n{}\n  </ul>\n</section>",
                    group.group_name, versions
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Manuals</title>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 800px; margin: 2rem auto; padding: 0 1rem; }}
    h2 {{ margin-bottom: 0.25rem; }}
    ul {{ margin-top: 0.25rem; }}
  </style>
</head>
<body>
  <h1>Manuals</h1>
  {}
</body>
</html>"#,
        listing
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    fn test_server(site_dir: &Path, manifest_path: &Path) -> SiteServer {
        SiteServer::new(ServeConfig {
            site_dir: site_dir.to_path_buf(),
            manifest_path: manifest_path.to_path_buf(),
            open: false,
            ..Default::default()
        })
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = SiteServer::new(ServeConfig::default());
        assert_eq!(server.config.port, 4000);
    }

    #[tokio::test]
    async fn redirects_suffixless_search_requests() {
        let temp = tempdir().unwrap();
        let app = test_server(temp.path(), &temp.path().join("manual-list.json")).router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/documentation/demo/en/search?q=install")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/documentation/demo/en/search.html?q=install"
        );
    }

    #[tokio::test]
    async fn serves_search_page_when_suffix_is_present() {
        let temp = tempdir().unwrap();
        let search_dir = temp.path().join("documentation").join("demo").join("en");
        fs::create_dir_all(&search_dir).unwrap();
        fs::write(search_dir.join("search.html"), "<html>results</html>").unwrap();

        let app = test_server(temp.path(), &temp.path().join("manual-list.json")).router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/documentation/demo/en/search.html?q=install")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn passes_through_requests_outside_the_prefix() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("about.html"), "<html>about</html>").unwrap();

        let app = test_server(temp.path(), &temp.path().join("manual-list.json")).router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/about.html?q=unrelated")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn passes_through_search_paths_without_q() {
        let temp = tempdir().unwrap();
        let app = test_server(temp.path(), &temp.path().join("manual-list.json")).router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/documentation/demo/en/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // No rewrite: the missing asset surfaces as a plain 404
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn library_page_lists_manifest_groups() {
        let temp = tempdir().unwrap();
        let manifest = temp.path().join("manual-list.json");
        fs::write(
            &manifest,
            r#"[{"groupName":"raibo","manuals":[{"version":"2.0","path":"/documentation/raibo/v_2.0/index.html"}]}]"#,
        )
        .unwrap();

        let app = test_server(temp.path(), &manifest).router();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(html.contains("raibo"));
        assert!(html.contains("/documentation/raibo/v_2.0/index.html"));
    }

    #[tokio::test]
    async fn library_page_tolerates_a_missing_manifest() {
        let temp = tempdir().unwrap();
        let app = test_server(temp.path(), &temp.path().join("missing.json")).router();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(html.contains("No manuals"));
    }
}
