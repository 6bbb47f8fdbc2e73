// ============================================================================
// APP - Monta el panel de notificaciones en #app
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, clear_children, get_element_by_id, ClickListener, ListenerSlot};
use crate::services::OneSignalSdk;
use crate::utils::task::spawn_local;
use crate::viewmodels::NotificationPanelViewModel;
use crate::views::{render_notification_panel, PanelAction};

const ROOT_ID: &str = "app";

/// Aplicación principal
pub struct App {
    viewmodel: NotificationPanelViewModel<OneSignalSdk>,
    root: Option<Element>,
    /// Listeners de los botones del render actual
    click_listeners: ListenerSlot<ClickListener>,
    render_scheduled: Rc<Cell<bool>>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(ROOT_ID)
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let viewmodel = NotificationPanelViewModel::new(CONFIG.clone(), Rc::new(OneSignalSdk::new()));
        let render_scheduled = Rc::new(Cell::new(false));

        // Re-render en el próximo tick; varios cambios seguidos = un solo render
        {
            let render_scheduled = render_scheduled.clone();
            viewmodel.state().subscribe_to_changes(move || {
                if render_scheduled.replace(true) {
                    return;
                }
                let render_scheduled = render_scheduled.clone();
                Timeout::new(0, move || {
                    render_scheduled.set(false);
                    crate::rerender_app();
                })
                .forget();
            });
        }

        Ok(Self {
            viewmodel,
            root: Some(root),
            click_listeners: ListenerSlot::new(),
            render_scheduled,
        })
    }

    /// Arranca la inicialización del SDK (no bloquea)
    pub fn mount(&self) {
        if self.viewmodel.is_configured() && !OneSignalSdk::is_loaded() {
            log::info!("⏳ [APP] SDK de OneSignal aún no cargado, init esperará");
        }
        let viewmodel = self.viewmodel.clone();
        spawn_local(async move {
            viewmodel.mount().await;
        });
    }

    /// Renderizar aplicación
    pub fn render(&mut self) -> Result<(), JsValue> {
        let Some(root) = &self.root else {
            log::warn!("⚠️ [APP] render() sin raíz (app desmontada)");
            return Ok(());
        };
        self.render_scheduled.set(false);

        let on_action: Rc<dyn Fn(PanelAction)> = {
            let viewmodel = self.viewmodel.clone();
            Rc::new(move |action: PanelAction| {
                log::info!("🖱️ [APP] Acción: {:?}", action);
                let viewmodel = viewmodel.clone();
                spawn_local(async move {
                    viewmodel.perform(action).await;
                });
            })
        };

        let panel = render_notification_panel(&self.viewmodel.view(), on_action)?;
        clear_children(root);
        append_child(root, &panel.element)?;
        // Soltar los del render anterior quita sus listeners
        self.click_listeners.replace(panel.listeners);
        Ok(())
    }

    /// Desmontar: quita listeners del SDK y limpia el DOM
    pub fn unmount(&mut self) {
        self.viewmodel.teardown();
        self.click_listeners.clear();
        if let Some(root) = self.root.take() {
            clear_children(&root);
        }
    }
}
