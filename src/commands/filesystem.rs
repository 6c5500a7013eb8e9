use std::fs;

use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;

use crate::config::Config;
use crate::server::to_app_url;

/// Cache subdirectory user-selected images are copied into
const IMAGES_DIR_NAME: &str = "images";

/// Pick a local image, copy it into the served cache and return its app URL
/// so the webview can display it. Cancelling the dialog returns None.
#[tauri::command]
pub async fn select_image(
    app: AppHandle,
    config: State<'_, Config>,
) -> Result<Option<String>, String> {
    let picked = app
        .dialog()
        .file()
        .set_title("Select image")
        .set_directory(&config.downloads_dir)
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
        .add_filter("All Files", &["*"])
        .blocking_pick_file();

    let Some(file_path) = picked else {
        return Ok(None);
    };

    let source = file_path
        .into_path()
        .map_err(|e| format!("Invalid file selection: {}", e))?;

    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| "Invalid image path".to_string())?;

    let dest_dir = config.cache_dir.join(IMAGES_DIR_NAME);
    fs::create_dir_all(&dest_dir)
        .map_err(|e| format!("Failed to create images directory: {}", e))?;

    let dest = dest_dir.join(file_name);
    if !dest.exists() {
        fs::copy(&source, &dest)
            .map_err(|e| format!("Failed to copy image into cache: {}", e))?;
    }

    Ok(Some(to_app_url(
        &config,
        &format!("{}/{}", IMAGES_DIR_NAME, file_name),
    )))
}
