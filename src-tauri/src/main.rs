// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Desktop entry point. The log book itself lives in the library crate.

use std::sync::Arc;

use tauri::Manager;
use tauri_plugin_store::StoreExt;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use sauna_log_lib::storage::TauriStoreStorage;
use sauna_log_lib::{AppState, LogbookConfig};

// Import the window-vibrancy crate only on macOS
#[cfg(target_os = "macos")]
use window_vibrancy::{NSVisualEffectMaterial, apply_vibrancy};

/// Plugin store file holding the record blob.
const RECORDS_FILE: &str = "records.json";
/// Optional user config in the app config directory.
const CONFIG_FILE: &str = "config.json";

fn load_config(app: &tauri::App) -> LogbookConfig {
    let Ok(dir) = app.path().app_config_dir() else {
        return LogbookConfig::default();
    };
    let path = dir.join(CONFIG_FILE);

    match std::fs::read_to_string(&path) {
        Ok(raw) => LogbookConfig::from_json(&raw).unwrap_or_else(|e| {
            warn!("Ignoring {}: {e}", path.display());
            LogbookConfig::default()
        }),
        Err(_) => {
            debug!("No config at {}, using defaults", path.display());
            LogbookConfig::default()
        }
    }
}

fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sauna_log_lib=debug,sauna_log=debug")),
        )
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stdout)
        .compact();               // Use compact formatter instead of pretty

    subscriber.init();

    info!("=== Application Starting ===");

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            sauna_log_lib::list_entries,
            sauna_log_lib::list_rows,
            sauna_log_lib::add_entry,
            sauna_log_lib::delete_entry,
            sauna_log_lib::clear_entries,
            sauna_log_lib::select_photo,
            sauna_log_lib::clear_photo,
            sauna_log_lib::preview_average,
        ])
        .setup(|app| {
            let config = load_config(app);
            let store = app.store(RECORDS_FILE).map_err(anyhow::Error::from)?;
            let storage = Arc::new(TauriStoreStorage::new(store));

            // One store instance for the whole app, shared through managed state
            app.manage(AppState::new(storage, config).map_err(anyhow::Error::from)?);
            debug!("✓ AppState initialized");

            #[cfg(target_os = "macos")]
            {
                let window = app
                    .get_webview_window("main")
                    .ok_or_else(|| anyhow::anyhow!("main window missing"))?;
                info!("Applying vibrancy effect for macOS");
                // Note: This requires macOSPrivateApi=true in tauri.conf.json
                apply_vibrancy(&window, NSVisualEffectMaterial::HudWindow, None, None)
                    .map_err(anyhow::Error::from)?;
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });
}
