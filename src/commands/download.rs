use std::path::Path;

use reqwest::Client;
use serde::Serialize;
use tauri::{AppHandle, Emitter, State, Window};
use tauri_plugin_dialog::DialogExt;
use tokio::io::AsyncWriteExt;

use crate::config::{Config, USER_AGENT};

/// Progress payload for download events
#[derive(Clone, Serialize)]
pub struct DownloadProgressPayload {
    pub progress: f64,
    pub received_bytes: u64,
    pub total_bytes: u64,
}

/// Download a URL to a user-chosen location, streaming progress events.
/// Cancelling the save dialog returns None.
#[tauri::command]
pub async fn download_file(
    url: String,
    app: AppHandle,
    config: State<'_, Config>,
    window: Window,
) -> Result<Option<String>, String> {
    let file_name = file_name_from_url(&url);

    let picked = app
        .dialog()
        .file()
        .set_title("Save file")
        .set_directory(&config.downloads_dir)
        .set_file_name(&file_name)
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
        .add_filter("All Files", &["*"])
        .blocking_save_file();

    let Some(file_path) = picked else {
        return Ok(None);
    };

    let dest_path = file_path
        .into_path()
        .map_err(|e| format!("Invalid save location: {}", e))?;

    match stream_to_file(&url, &dest_path, &window).await {
        Ok(()) => {
            let saved = dest_path.display().to_string();
            let _ = window.emit("download-complete", saved.clone());
            Ok(Some(saved))
        }
        Err(e) => {
            // Drop the partial file, the error already describes the failure
            let _ = tokio::fs::remove_file(&dest_path).await;
            let _ = window.emit("download-error", e.clone());
            Err(e)
        }
    }
}

async fn stream_to_file(url: &str, dest_path: &Path, window: &Window) -> Result<(), String> {
    let client = Client::new();
    let mut response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await
        .map_err(|e| format!("Failed to request {}: {}", url, e))?;

    if response.status() != reqwest::StatusCode::OK {
        return Err(format!("HTTP {}", response.status()));
    }

    let total_bytes = response.content_length().unwrap_or(0);
    let mut received_bytes: u64 = 0;

    let mut file = tokio::fs::File::create(dest_path)
        .await
        .map_err(|e| format!("Failed to create {}: {}", dest_path.display(), e))?;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| format!("Failed to write {}: {}", dest_path.display(), e))?;

        received_bytes += chunk.len() as u64;

        if total_bytes > 0 {
            let _ = window.emit(
                "download-progress",
                DownloadProgressPayload {
                    progress: received_bytes as f64 / total_bytes as f64 * 100.0,
                    received_bytes,
                    total_bytes,
                },
            );
        }
    }

    file.flush()
        .await
        .map_err(|e| format!("Failed to flush {}: {}", dest_path.display(), e))
}

/// Last path segment of the URL, without query or fragment; falls back to a
/// generic image name when the URL ends in a slash
pub(crate) fn file_name_from_url(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    let path = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);

    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() && name != path => name.to_string(),
        _ => "download.png".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_last_path_segment() {
        assert_eq!(
            file_name_from_url(
                "https://dci-static-s1.socialpointgames.com/static/dragoncity/assets/sprites/1000_dragon_nature_1.swf"
            ),
            "1000_dragon_nature_1.swf"
        );
    }

    #[test]
    fn file_name_strips_query_and_fragment() {
        assert_eq!(
            file_name_from_url("https://example.com/a/thumb.png?ver=3#frag"),
            "thumb.png"
        );
    }

    #[test]
    fn file_name_falls_back_for_bare_urls() {
        assert_eq!(file_name_from_url("https://example.com/"), "download.png");
        assert_eq!(file_name_from_url("https://example.com"), "download.png");
    }
}
