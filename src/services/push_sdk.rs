// ============================================================================
// PUSH SDK - Contrato con el SDK de notificaciones (colaborador inyectado)
// ============================================================================
// El panel solo habla con este trait. En el navegador lo implementa
// OneSignalSdk; en tests, FakePushSdk.
// ============================================================================

use std::rc::Rc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use crate::config::AppConfig;
use crate::models::push_event::{PushEvent, PushEventKind};

/// Opciones de `OneSignal.init`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    pub app_id: String,
    pub allow_localhost_as_secure_origin: bool,
    pub notify_button: NotifyButtonOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyButtonOptions {
    pub enable: bool,
}

impl InitOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            app_id: config.app_id().to_string(),
            allow_localhost_as_secure_origin: config.allow_localhost_as_secure_origin,
            notify_button: NotifyButtonOptions {
                enable: config.notify_button_enabled,
            },
        }
    }
}

/// Identificador de un listener registrado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

pub type PushEventHandler = Rc<dyn Fn(PushEvent)>;

/// Error del SDK
#[derive(Debug, Clone, PartialEq)]
pub enum SdkError {
    /// El script del SDK no está cargado en la página
    NotLoaded,
    /// La promesa del SDK fue rechazada
    Rejected(String),
    /// El SDK devolvió algo inesperado
    InvalidResponse(String),
}

impl std::fmt::Display for SdkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SdkError::NotLoaded => write!(f, "Push SDK is not loaded"),
            SdkError::Rejected(msg) => write!(f, "Push SDK rejected the call: {}", msg),
            SdkError::InvalidResponse(msg) => write!(f, "Invalid response from push SDK: {}", msg),
        }
    }
}

impl std::error::Error for SdkError {}

impl From<JsValue> for SdkError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        SdkError::Rejected(msg)
    }
}

/// Operaciones del SDK que usa el panel
#[async_trait(?Send)]
pub trait PushSdk {
    /// Configura el cliente del SDK
    async fn init(&self, options: &InitOptions) -> Result<(), SdkError>;

    /// Id de la suscripción push actual (None si no hay)
    async fn subscription_id(&self) -> Result<Option<String>, SdkError>;

    async fn opt_in(&self) -> Result<(), SdkError>;

    async fn opt_out(&self) -> Result<(), SdkError>;

    /// Pide permiso de notificaciones al navegador
    async fn request_permission(&self) -> Result<bool, SdkError>;

    fn add_event_listener(
        &self,
        kind: PushEventKind,
        handler: PushEventHandler,
    ) -> Result<ListenerId, SdkError>;

    fn remove_event_listener(&self, id: ListenerId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_options_from_config() {
        let options = InitOptions::from_config(&AppConfig::with_app_id("app-1"));
        assert_eq!(options.app_id, "app-1");
        assert!(options.allow_localhost_as_secure_origin);
        assert!(!options.notify_button.enable);
    }

    #[test]
    fn test_init_options_serialize_camel_case() {
        let options = InitOptions::from_config(&AppConfig::with_app_id("app-1"));
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["appId"], "app-1");
        assert_eq!(json["allowLocalhostAsSecureOrigin"], true);
        assert_eq!(json["notifyButton"]["enable"], false);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(SdkError::NotLoaded.to_string(), "Push SDK is not loaded");
        assert!(SdkError::Rejected("denied".into()).to_string().contains("denied"));
    }
}
