use std::path::PathBuf;

use axum::Router;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::Config;

/// Characters that must be escaped inside a served file path, beyond what
/// the browser tolerates verbatim (matches what the webview expects for
/// URLs it loads into <img>/player elements)
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Serve the cache directory to the webview over plain HTTP.
/// Runs for the lifetime of the process; errors only if the port is taken.
pub async fn serve(cache_dir: PathBuf, port: u16) -> Result<(), String> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .fallback_service(ServeDir::new(&cache_dir))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .map_err(|e| format!("Failed to bind static server port {}: {}", port, e))?;

    println!("Static server running on http://localhost:{}", port);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Static server error: {}", e))
}

/// Translate a path relative to the cache dir into a URL the webview can load
pub fn to_app_url(config: &Config, relative_path: &str) -> String {
    let normalized = relative_path.replace('\\', "/");
    format!(
        "http://localhost:{}/{}",
        config.static_server_port,
        utf8_percent_encode(&normalized, PATH_ESCAPE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STATIC_SERVER_PORT;

    fn test_config() -> Config {
        Config {
            cache_dir: PathBuf::from("/tmp/dc-tools"),
            downloads_dir: PathBuf::from("/tmp"),
            static_server_port: STATIC_SERVER_PORT,
        }
    }

    #[test]
    fn app_url_uses_forward_slashes() {
        let url = to_app_url(
            &test_config(),
            "1000_dragon_nature\\1000_dragon_nature_3_spine-3-8-59_dxt5.png",
        );
        assert_eq!(
            url,
            "http://localhost:7273/1000_dragon_nature/1000_dragon_nature_3_spine-3-8-59_dxt5.png"
        );
    }

    #[test]
    fn app_url_escapes_spaces() {
        let url = to_app_url(&test_config(), "images/my picture.png");
        assert_eq!(url, "http://localhost:7273/images/my%20picture.png");
    }
}
