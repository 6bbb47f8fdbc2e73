// ============================================================================
// PANEL VIEWMODEL - Lógica del panel de notificaciones push
// ============================================================================
// - Inicialización del SDK (una vez por montaje, solo si hay App ID)
// - Listeners del SDK (EventBridge) activos tras la inicialización
// - Acciones Subscribe / Unsubscribe
// Los errores del SDK se registran con log y no llegan a la UI.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use crate::config::AppConfig;
use crate::models::notification::{NotificationEntry, DEFAULT_CLICK_TITLE};
use crate::models::push_event::{PushEvent, PushNotification};
use crate::services::event_bridge::EventBridge;
use crate::services::push_sdk::{InitOptions, PushEventHandler, PushSdk};
use crate::state::panel_state::PanelState;
use crate::utils::task::spawn_local;
use crate::utils::time::local_time_of_day;
use crate::views::panel_view::{describe_panel, PanelAction, PanelView};

/// Lo que necesitan los listeners: SDK + estado (sin el bridge)
struct PanelController<S: PushSdk> {
    sdk: Rc<S>,
    state: PanelState,
}

impl<S: PushSdk> Clone for PanelController<S> {
    fn clone(&self) -> Self {
        Self {
            sdk: self.sdk.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S: PushSdk> PanelController<S> {
    /// Vuelve a consultar el id de suscripción
    async fn refresh_subscription(&self) {
        match self.sdk.subscription_id().await {
            Ok(id) => {
                let subscribed = id.as_deref().is_some_and(|id| !id.is_empty());
                log::info!("🔔 [PANEL] Suscripción: {}", if subscribed { "activa" } else { "ninguna" });
                self.state.set_subscribed(subscribed);
            }
            Err(e) => log::error!("❌ [PANEL] Error consultando suscripción: {}", e),
        }
    }

    async fn handle_event(&self, event: PushEvent) {
        match event {
            PushEvent::PermissionChanged | PushEvent::SubscriptionChanged => {
                self.refresh_subscription().await;
            }
            PushEvent::Clicked(notification) => self.record_click(&notification),
            PushEvent::ForegroundWillDisplay(notification) => self.record_foreground(&notification),
        }
    }

    fn record_click(&self, notification: &PushNotification) {
        let entry = NotificationEntry {
            title: notification.title().unwrap_or(DEFAULT_CLICK_TITLE).to_string(),
            body: notification.body().unwrap_or_default().to_string(),
            data: Some(notification.additional_data()),
            received_at: local_time_of_day(),
        };
        log::info!("👆 [PANEL] Click en notificación '{}'", entry.title);
        self.state.push_notification(entry);
    }

    fn record_foreground(&self, notification: &PushNotification) {
        let (Some(title), Some(body)) = (notification.title(), notification.body()) else {
            log::debug!("[PANEL] Notificación en primer plano sin título o cuerpo, ignorada");
            return;
        };
        self.state.push_notification(NotificationEntry {
            title: title.to_string(),
            body: body.to_string(),
            data: None,
            received_at: local_time_of_day(),
        });
    }
}

/// ViewModel del panel. Clonarlo comparte SDK, estado y bridge.
pub struct NotificationPanelViewModel<S: PushSdk + 'static> {
    config: Rc<AppConfig>,
    controller: PanelController<S>,
    bridge: Rc<RefCell<Option<EventBridge<S>>>>,
    init_started: Rc<Cell<bool>>,
}

impl<S: PushSdk + 'static> Clone for NotificationPanelViewModel<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            controller: self.controller.clone(),
            bridge: self.bridge.clone(),
            init_started: self.init_started.clone(),
        }
    }
}

impl<S: PushSdk + 'static> NotificationPanelViewModel<S> {
    pub fn new(config: AppConfig, sdk: Rc<S>) -> Self {
        Self {
            config: Rc::new(config),
            controller: PanelController {
                sdk,
                state: PanelState::new(),
            },
            bridge: Rc::new(RefCell::new(None)),
            init_started: Rc::new(Cell::new(false)),
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.controller.state
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn has_active_bridge(&self) -> bool {
        self.bridge.borrow().is_some()
    }

    /// Qué mostrar ahora mismo
    pub fn view(&self) -> PanelView {
        describe_panel(self.is_configured(), &self.state().snapshot())
    }

    /// Montaje: sin App ID no se toca el SDK
    pub async fn mount(&self) {
        if !self.is_configured() {
            log::warn!("⚠️ [PANEL] ONESIGNAL_APP_ID vacío, mostrando instrucciones");
            return;
        }
        self.initialize().await;
    }

    /// Configura el SDK y consulta la suscripción actual.
    /// Si init falla se marca inicializado igual, para no bloquear la UI.
    pub async fn initialize(&self) {
        if !self.is_configured() || self.init_started.replace(true) {
            return;
        }

        let options = InitOptions::from_config(&self.config);
        log::info!("🚀 [PANEL] Inicializando SDK de notificaciones...");

        match self.controller.sdk.init(&options).await {
            Ok(()) => {
                self.state().mark_initialized();
                self.activate_event_bridge();
                self.controller.refresh_subscription().await;
            }
            Err(e) => {
                log::error!("❌ [PANEL] OneSignal init error: {}", e);
                self.state().mark_initialized();
                self.activate_event_bridge();
            }
        }
    }

    /// (Re)registra los listeners. Los anteriores se quitan antes.
    pub fn activate_event_bridge(&self) {
        if !self.state().is_initialized() {
            return;
        }

        drop(self.bridge.borrow_mut().take());

        let handler: PushEventHandler = {
            let controller = self.controller.clone();
            Rc::new(move |event: PushEvent| {
                let controller = controller.clone();
                spawn_local(async move {
                    controller.handle_event(event).await;
                });
            })
        };

        match EventBridge::activate(self.controller.sdk.clone(), handler) {
            Ok(bridge) => *self.bridge.borrow_mut() = Some(bridge),
            Err(e) => log::error!("❌ [PANEL] Error registrando listeners: {}", e),
        }
    }

    /// Aplica un evento del SDK (lo mismo que harían los listeners)
    pub async fn handle_event(&self, event: PushEvent) {
        self.controller.handle_event(event).await;
    }

    pub async fn refresh_subscription(&self) {
        self.controller.refresh_subscription().await;
    }

    /// Pide permiso y activa la suscripción
    pub async fn subscribe(&self) {
        if !self.state().is_initialized() {
            return;
        }

        let sdk = &self.controller.sdk;
        let granted = match sdk.request_permission().await {
            Ok(granted) => granted,
            Err(e) => {
                log::error!("❌ [PANEL] Subscribe error: {}", e);
                return;
            }
        };
        if !granted {
            log::warn!("⚠️ [PANEL] Permiso de notificaciones denegado");
            return;
        }

        if let Err(e) = sdk.opt_in().await {
            log::error!("❌ [PANEL] Subscribe error: {}", e);
            return;
        }

        match sdk.subscription_id().await {
            Ok(id) => self.state().set_subscribed(id.is_some_and(|id| !id.is_empty())),
            Err(e) => log::error!("❌ [PANEL] Subscribe error: {}", e),
        }
    }

    /// Desactiva la suscripción; el estado pasa a false sin volver a consultar
    pub async fn unsubscribe(&self) {
        if !self.state().is_initialized() {
            return;
        }

        match self.controller.sdk.opt_out().await {
            Ok(()) => {
                log::info!("🔕 [PANEL] Suscripción desactivada");
                self.state().set_subscribed(false);
            }
            Err(e) => log::error!("❌ [PANEL] Unsubscribe error: {}", e),
        }
    }

    pub async fn perform(&self, action: PanelAction) {
        match action {
            PanelAction::Subscribe => self.subscribe().await,
            PanelAction::Unsubscribe => self.unsubscribe().await,
        }
    }

    /// Desmontaje: quita los listeners y los callbacks de render
    pub fn teardown(&self) {
        drop(self.bridge.borrow_mut().take());
        self.state().clear_subscribers();
        log::info!("🔌 [PANEL] Panel desmontado");
    }
}
