mod commands;
mod multiview;

use std::sync::Arc;
use tokio::sync::Mutex;

use commands::{
    cancel_stream_dialog, clear_all_streams, export_csv, import_csv, load_preset,
    open_stream_dialog, report_player_fault, save_preset, set_grid_layout, start_stream,
    stop_stream, submit_stream_dialog, widget_api_ready,
};
use multiview::models::SystemInfo;
use multiview::state::{Multiview, SharedMultiview};
use multiview::utils::get_system_info_report;

/// Get host info (hostname, local addresses) for UI display
#[tauri::command]
async fn get_system_info() -> Result<SystemInfo, String> {
    Ok(get_system_info_report().await)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let state: SharedMultiview = Arc::new(Mutex::new(Multiview::new()));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            set_grid_layout,
            start_stream,
            stop_stream,
            clear_all_streams,
            open_stream_dialog,
            submit_stream_dialog,
            cancel_stream_dialog,
            widget_api_ready,
            report_player_fault,
            import_csv,
            export_csv,
            load_preset,
            save_preset,
            get_system_info,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application")
}
