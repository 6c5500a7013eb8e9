mod assets;
mod commands;
mod config;
mod server;

use commands::{
    convert_animation, download_file, find_dragon_static_files, get_app_version, http_request,
    select_image,
};
use config::Config;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            let config = Config::from_app(app.handle())?;

            let cache_dir = config.cache_dir.clone();
            let port = config.static_server_port;
            tauri::async_runtime::spawn(async move {
                if let Err(e) = server::serve(cache_dir, port).await {
                    eprintln!("{}", e);
                }
            });

            app.manage(config);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            convert_animation,
            find_dragon_static_files,
            download_file,
            select_image,
            http_request,
            get_app_version,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
