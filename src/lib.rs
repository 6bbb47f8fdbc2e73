// ============================================================================
// PUSH NOTIFICATION PANEL - FRONTEND MVVM (RUST PURO + WASM)
// ============================================================================
// - Views: descripción pura (panel_view) + render DOM (notification_panel)
// - ViewModels: inicialización del SDK, listeners y acciones
// - Services: contrato PushSdk y adaptador de OneSignal
// - State: Rc<RefCell> + suscriptores de cambios
// - Models: notificaciones e eventos del SDK
// ============================================================================

mod app;
pub mod config;
pub mod dom;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;
use crate::app::App;
use crate::config::CONFIG;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    wasm_logger::init(Config::new(level));
    log::info!("🚀 Push Notification Panel ({})", CONFIG.environment);

    let mut app = App::new()?;
    app.render()?;
    app.mount();

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Al salir de la página se quitan los listeners del SDK, salvo que la
    // página entre en el back/forward cache: al volver debe seguir viva.
    // Se registra una sola vez aquí, así que forget() no acumula.
    if let Some(win) = web_sys::window() {
        let closure = Closure::wrap(Box::new(move |e: web_sys::PageTransitionEvent| {
            if should_unmount_on_pagehide(e.persisted()) {
                unmount_panel();
            } else {
                log::info!("💤 [APP] Página en bfcache, panel conservado");
            }
        }) as Box<dyn FnMut(web_sys::PageTransitionEvent)>);
        win.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Una página que se guarda en bfcache (`persisted`) no se desmonta
fn should_unmount_on_pagehide(persisted: bool) -> bool {
    !persisted
}

/// Re-render completo del panel
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(ref mut app) = *app_cell.borrow_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ [RERENDER] App no está inicializada");
        }
    });
}

/// Re-render llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_panel_wasm() {
    rerender_app();
}

/// Desmonta el panel (quita listeners del SDK y vacía #app)
#[wasm_bindgen]
pub fn unmount_panel() {
    let app = APP.with(|app_cell| app_cell.borrow_mut().take());
    if let Some(mut app) = app {
        app.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagehide_into_bfcache_keeps_panel() {
        assert!(!should_unmount_on_pagehide(true));
    }

    #[test]
    fn test_pagehide_on_real_unload_unmounts() {
        assert!(should_unmount_on_pagehide(false));
    }
}
