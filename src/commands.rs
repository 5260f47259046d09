// Tauri command boundary for the multiview core
//
// Thin wrappers: lock the shared state, delegate, map errors to strings for
// the webview. Network I/O (presets) happens before the lock is taken.

use std::sync::Arc;
use tauri::{AppHandle, State};

use crate::multiview::loader;
use crate::multiview::presets::{HttpPresetStore, PresetStore};
use crate::multiview::state::SharedMultiview;
use crate::multiview::surface::{SurfaceEvent, SurfaceSink, WebviewSurface};

fn surface(app: &AppHandle) -> WebviewSurface {
    WebviewSurface::new(app.clone())
}

/// Resize the grid; returns the new slot count (n²).
#[tauri::command]
pub async fn set_grid_layout(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
    size: u8,
) -> Result<u8, String> {
    let mut mv = state.lock().await;
    mv.set_grid_layout(&surface(&app), size)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn start_stream(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
    slot: u8,
    url: String,
    name: Option<String>,
) -> Result<(), String> {
    let mut mv = state.lock().await;
    mv.start_stream(&surface(&app), slot, &url, name.as_deref().unwrap_or(""))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn stop_stream(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
    slot: u8,
) -> Result<(), String> {
    let mut mv = state.lock().await;
    mv.stop_stream(&surface(&app), slot).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_all_streams(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
) -> Result<(), String> {
    let mut mv = state.lock().await;
    mv.clear_all(&surface(&app));
    Ok(())
}

#[tauri::command]
pub async fn open_stream_dialog(
    state: State<'_, SharedMultiview>,
    slot: u8,
) -> Result<(), String> {
    let mut mv = state.lock().await;
    mv.open_dialog(slot).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn submit_stream_dialog(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
    url: String,
    name: Option<String>,
) -> Result<(), String> {
    let mut mv = state.lock().await;
    mv.submit_dialog(&surface(&app), &url, name.as_deref().unwrap_or(""))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn cancel_stream_dialog(state: State<'_, SharedMultiview>) -> Result<(), String> {
    let mut mv = state.lock().await;
    mv.cancel_dialog();
    Ok(())
}

/// The embedded-widget API script finished loading in the webview.
#[tauri::command]
pub async fn widget_api_ready(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
) -> Result<(), String> {
    let mut mv = state.lock().await;
    mv.widget_api_ready(&surface(&app));
    Ok(())
}

/// A playback engine reported an error for a slot.
#[tauri::command]
pub async fn report_player_fault(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
    slot: u8,
    detail: String,
    fatal: bool,
) -> Result<(), String> {
    let mut mv = state.lock().await;
    mv.handle_fault(&surface(&app), slot, &detail, fatal)
        .map_err(|e| e.to_string())
}

/// Parse CSV text and apply it as the new configuration.
/// Returns the number of scheduled starts.
#[tauri::command]
pub async fn import_csv(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
    text: String,
) -> Result<usize, String> {
    let entries = {
        let mv = state.lock().await;
        mv.parse_csv(&text)
    };
    let shared = state.inner().clone();
    Ok(loader::apply_entries(shared, Arc::new(surface(&app)), entries).await)
}

/// Write the current configuration to `path` (defaults to the download
/// directory) and return the CSV text.
#[tauri::command]
pub async fn export_csv(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
    path: Option<String>,
) -> Result<String, String> {
    let surface = surface(&app);
    let text = {
        let mv = state.lock().await;
        match mv.export_csv() {
            Ok(text) => text,
            Err(e) => {
                surface.emit(SurfaceEvent::notify(e.to_string(), true));
                return Err(e.to_string());
            }
        }
    };

    let path = path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(crate::multiview::csv::default_export_path);
    if let Err(e) = std::fs::write(&path, &text) {
        eprintln!("[Csv] Export to {} failed: {}", path.display(), e);
        surface.emit(SurfaceEvent::notify(format!("Export failed: {}", e), true));
        return Err(e.to_string());
    }

    eprintln!("[Csv] Exported configuration to {}", path.display());
    surface.emit(SurfaceEvent::notify("Configuration saved successfully", false));
    Ok(text)
}

/// Fetch a named preset and apply it as the new configuration.
#[tauri::command]
pub async fn load_preset(
    app: AppHandle,
    state: State<'_, SharedMultiview>,
    name: String,
) -> Result<usize, String> {
    let store = HttpPresetStore::new();
    let streams = store.load(&name).await.map_err(|e| {
        eprintln!("[Preset] Load '{}' failed: {}", name, e);
        e.to_string()
    })?;

    let entries = {
        let mv = state.lock().await;
        loader::entries_from_preset(streams, mv.slot_count())
    };
    let shared = state.inner().clone();
    Ok(loader::apply_entries(shared, Arc::new(surface(&app)), entries).await)
}

/// Save the current configuration under a preset name.
#[tauri::command]
pub async fn save_preset(state: State<'_, SharedMultiview>, name: String) -> Result<(), String> {
    let streams = {
        let mv = state.lock().await;
        mv.snapshot_preset()
    };

    let store = HttpPresetStore::new();
    store.save(&name, streams).await.map_err(|e| {
        eprintln!("[Preset] Save '{}' failed: {}", name, e);
        e.to_string()
    })
}
