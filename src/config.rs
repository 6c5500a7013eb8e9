// Configurable constants for DC Tools
// Modify these values to adapt this app for other Social Point asset mirrors
// Note: Also update frontend/config.ts to match these values

use std::path::PathBuf;

use tauri::Manager;

/// Application title (also update in tauri.conf.json and frontend/config.ts)
#[allow(dead_code)]
pub const APP_TITLE: &str = "DC Tools";

/// Host serving the game's static content
pub const STATIC_CDN_HOST: &str = "socialpointgames.com";

/// Path prefix of all static game assets on the CDN
pub const STATIC_BASE_PATH: &str = "static/dragoncity";

/// Port the local static server listens on (converted assets are served
/// to the webview from here)
pub const STATIC_SERVER_PORT: u16 = 7273;

/// Subdirectory of the OS temp dir used as the conversion/preview cache
pub const CACHE_DIR_NAME: &str = "dc-tools";

/// Spine export version and texture compression tag baked into the
/// animation archives this tool understands. Archives exported with a
/// different tag are rejected by the converter rather than auto-detected.
pub const SPINE_VERSION_TAG: &str = "spine-3-8-59_dxt5";

/// Extension of the compressed textures inside an animation archive
pub const TEXTURE_EXT: &str = ".dds";

/// Extension textures are re-encoded to for display in the webview
pub const DISPLAY_EXT: &str = ".png";

/// Extension of the atlas manifests inside an animation archive
pub const ATLAS_EXT: &str = ".atlas";

/// User agent sent with every outgoing HTTP request
pub const USER_AGENT: &str = "DC-Tools";

/// Runtime configuration resolved once at startup and passed to commands
/// as tauri state. Nothing else in the crate reads ambient paths.
#[derive(Debug, Clone)]
pub struct Config {
    /// Flat on-disk cache holding extracted archives and converted files.
    /// Subdirectories are named after the archive base name. Append-only,
    /// never evicted.
    pub cache_dir: PathBuf,
    /// Default directory for open/save dialogs
    pub downloads_dir: PathBuf,
    /// Port of the local static server exposing `cache_dir`
    pub static_server_port: u16,
}

impl Config {
    pub fn from_app(app: &tauri::AppHandle) -> Result<Self, String> {
        let temp_dir = app
            .path()
            .temp_dir()
            .map_err(|e| format!("Failed to resolve temp dir: {}", e))?;

        let downloads_dir = app
            .path()
            .download_dir()
            .unwrap_or_else(|_| temp_dir.clone());

        Ok(Self {
            cache_dir: temp_dir.join(CACHE_DIR_NAME),
            downloads_dir,
            static_server_port: STATIC_SERVER_PORT,
        })
    }
}
