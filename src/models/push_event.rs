// ============================================================================
// PUSH EVENTS - Eventos que emite el SDK de notificaciones
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Objeto del SDK donde se registra el listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    /// `OneSignal.Notifications`
    Notifications,
    /// `OneSignal.User.PushSubscription`
    PushSubscription,
}

/// Los cuatro eventos que escucha el panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushEventKind {
    PermissionChange,
    SubscriptionChange,
    Click,
    ForegroundWillDisplay,
}

impl PushEventKind {
    pub const ALL: [PushEventKind; 4] = [
        PushEventKind::PermissionChange,
        PushEventKind::SubscriptionChange,
        PushEventKind::Click,
        PushEventKind::ForegroundWillDisplay,
    ];

    /// Nombre del evento en el SDK JS
    pub fn js_name(&self) -> &'static str {
        match self {
            PushEventKind::PermissionChange => "permissionChange",
            PushEventKind::SubscriptionChange => "change",
            PushEventKind::Click => "click",
            PushEventKind::ForegroundWillDisplay => "foregroundWillDisplay",
        }
    }

    pub fn target(&self) -> EventTarget {
        match self {
            PushEventKind::SubscriptionChange => EventTarget::PushSubscription,
            _ => EventTarget::Notifications,
        }
    }
}

/// Payload anidado (formato antiguo: `notification.payload.additionalData`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    #[serde(default)]
    pub additional_data: Option<Map<String, Value>>,
}

/// Notificación tal como la entrega el SDK (todos los campos opcionales)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotification {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub additional_data: Option<Map<String, Value>>,
    #[serde(default)]
    pub payload: Option<NotificationPayload>,
}

impl PushNotification {
    /// Título si existe y no está vacío
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }

    /// additionalData, buscando primero en payload y luego en la raíz
    pub fn additional_data(&self) -> Map<String, Value> {
        self.payload
            .as_ref()
            .and_then(|p| p.additional_data.clone())
            .or_else(|| self.additional_data.clone())
            .unwrap_or_default()
    }
}

/// Evento con `notification` (click y foregroundWillDisplay)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(default)]
    pub notification: Option<PushNotification>,
}

/// Evento ya traducido a Rust
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    PermissionChanged,
    SubscriptionChanged,
    Clicked(PushNotification),
    ForegroundWillDisplay(PushNotification),
}

impl PushEvent {
    pub fn kind(&self) -> PushEventKind {
        match self {
            PushEvent::PermissionChanged => PushEventKind::PermissionChange,
            PushEvent::SubscriptionChanged => PushEventKind::SubscriptionChange,
            PushEvent::Clicked(_) => PushEventKind::Click,
            PushEvent::ForegroundWillDisplay(_) => PushEventKind::ForegroundWillDisplay,
        }
    }

    /// Construye el evento desde el JSON del SDK.
    /// Eventos de notificación sin `notification` se tratan como vacíos.
    pub fn from_json(kind: PushEventKind, raw: &Value) -> Self {
        let notification = || {
            serde_json::from_value::<NotificationEvent>(raw.clone())
                .ok()
                .and_then(|e| e.notification)
                .unwrap_or_default()
        };
        match kind {
            PushEventKind::PermissionChange => PushEvent::PermissionChanged,
            PushEventKind::SubscriptionChange => PushEvent::SubscriptionChanged,
            PushEventKind::Click => PushEvent::Clicked(notification()),
            PushEventKind::ForegroundWillDisplay => PushEvent::ForegroundWillDisplay(notification()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_targets() {
        assert_eq!(PushEventKind::SubscriptionChange.target(), EventTarget::PushSubscription);
        assert_eq!(PushEventKind::Click.target(), EventTarget::Notifications);
        assert_eq!(PushEventKind::ForegroundWillDisplay.js_name(), "foregroundWillDisplay");
    }

    #[test]
    fn test_click_reads_nested_payload_data() {
        let raw = json!({
            "notification": {
                "title": "Hola",
                "body": "Mundo",
                "payload": { "additionalData": { "order": 42 } }
            }
        });
        let PushEvent::Clicked(n) = PushEvent::from_json(PushEventKind::Click, &raw) else {
            panic!("expected click");
        };
        assert_eq!(n.title(), Some("Hola"));
        assert_eq!(n.additional_data().get("order"), Some(&json!(42)));
    }

    #[test]
    fn test_click_reads_root_additional_data() {
        let raw = json!({ "notification": { "additionalData": { "k": "v" } } });
        let event = PushEvent::from_json(PushEventKind::Click, &raw);
        let PushEvent::Clicked(n) = event else { panic!("expected click") };
        assert_eq!(n.title(), None);
        assert_eq!(n.additional_data().get("k"), Some(&json!("v")));
    }

    #[test]
    fn test_missing_notification_is_empty() {
        let event = PushEvent::from_json(PushEventKind::ForegroundWillDisplay, &json!({}));
        assert_eq!(event, PushEvent::ForegroundWillDisplay(PushNotification::default()));
        assert_eq!(
            PushEvent::from_json(PushEventKind::PermissionChange, &json!(true)),
            PushEvent::PermissionChanged
        );
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let n = PushNotification {
            title: Some(String::new()),
            body: Some("b".to_string()),
            ..Default::default()
        };
        assert_eq!(n.title(), None);
        assert_eq!(n.body(), Some("b"));
        assert!(n.additional_data().is_empty());
    }
}
