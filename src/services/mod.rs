// ============================================================================
// SERVICES - Comunicación con el SDK de notificaciones push
// ============================================================================

pub mod push_sdk;
pub mod onesignal_sdk;
pub mod event_bridge;

#[cfg(test)]
pub mod fake_push_sdk;

pub use push_sdk::{InitOptions, ListenerId, PushEventHandler, PushSdk, SdkError};
pub use onesignal_sdk::OneSignalSdk;
pub use event_bridge::EventBridge;
