// ============================================================================
// PANEL VIEW - Descripción pura de lo que se renderiza
// ============================================================================
// Sin DOM: decide qué mostrar a partir de la config y del snapshot.
// notification_panel.rs convierte esto en elementos.
// ============================================================================

use crate::models::notification::NotificationEntry;
use crate::state::panel_state::PanelSnapshot;

pub const TITLE: &str = "Push Notifications";
pub const SUBTITLE: &str = "Rust + WebAssembly + OneSignal";
pub const HISTORY_TITLE: &str = "Recent notifications";

pub const NOT_CONFIGURED_TITLE: &str = "OneSignal not configured";
pub const ENV_EXAMPLE_LINE: &str = "ONESIGNAL_APP_ID=your-onesignal-app-id";
pub const DASHBOARD_URL: &str = "https://dashboard.onesignal.com";
pub const DASHBOARD_LINK_TEXT: &str = "OneSignal Dashboard → Settings → Keys & IDs";
pub const SERVICE_WORKER_PATH: &str = "OneSignalSDKWorker.js";

const HINT_SUBSCRIBED: &str = "You will receive push notifications in this browser.";
const HINT_NOT_SUBSCRIBED: &str =
    "Allow notifications to receive push messages when the app is open or in the background.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Loading,
    Subscribed,
    NotSubscribed,
}

impl StatusLabel {
    pub fn text(&self) -> &'static str {
        match self {
            StatusLabel::Loading => "Loading…",
            StatusLabel::Subscribed => "Subscribed",
            StatusLabel::NotSubscribed => "Not subscribed",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusLabel::Subscribed => "status status-subscribed",
            StatusLabel::Loading | StatusLabel::NotSubscribed => "status status-unsubscribed",
        }
    }
}

/// Acción del único botón del panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Subscribe,
    Unsubscribe,
}

impl PanelAction {
    pub fn label(&self) -> &'static str {
        match self {
            PanelAction::Subscribe => "Enable push notifications",
            PanelAction::Unsubscribe => "Disable push notifications",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PanelAction::Subscribe => "btn btn-primary",
            PanelAction::Unsubscribe => "btn btn-secondary",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LivePanel {
    pub status: StatusLabel,
    /// None hasta que el SDK esté inicializado
    pub action: Option<PanelAction>,
    pub hint: &'static str,
    /// Más reciente primero; vacío = no se muestra la lista
    pub history: Vec<NotificationEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    /// Sin App ID: solo instrucciones de configuración
    NotConfigured,
    Live(LivePanel),
}

pub fn describe_panel(configured: bool, snapshot: &PanelSnapshot) -> PanelView {
    if !configured {
        return PanelView::NotConfigured;
    }

    let status = match (snapshot.initialized, snapshot.is_subscribed) {
        (false, _) => StatusLabel::Loading,
        (true, true) => StatusLabel::Subscribed,
        (true, false) => StatusLabel::NotSubscribed,
    };

    let action = snapshot.initialized.then(|| {
        if snapshot.is_subscribed {
            PanelAction::Unsubscribe
        } else {
            PanelAction::Subscribe
        }
    });

    let hint = if snapshot.is_subscribed {
        HINT_SUBSCRIBED
    } else {
        HINT_NOT_SUBSCRIBED
    };

    PanelView::Live(LivePanel {
        status,
        action,
        hint,
        history: snapshot.notifications.clone(),
    })
}
