/// Get the app version from Cargo.toml/tauri.conf.json
#[tauri::command]
pub fn get_app_version(app_handle: tauri::AppHandle) -> String {
    app_handle.package_info().version.to_string()
}
