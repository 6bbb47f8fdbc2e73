// ============================================================================
// EVENT BRIDGE - Registro acotado de listeners del SDK
// ============================================================================
// Registra los cuatro listeners al activarse y los quita todos en Drop.
// Si un registro falla a mitad, los ya registrados se quitan igual.
// ============================================================================

use std::rc::Rc;
use crate::models::push_event::PushEventKind;
use crate::services::push_sdk::{ListenerId, PushEventHandler, PushSdk, SdkError};

pub struct EventBridge<S: PushSdk + ?Sized> {
    sdk: Rc<S>,
    registered: Vec<(PushEventKind, ListenerId)>,
}

impl<S: PushSdk + ?Sized> EventBridge<S> {
    /// Registra un listener por cada PushEventKind, todos hacia `handler`
    pub fn activate(sdk: Rc<S>, handler: PushEventHandler) -> Result<Self, SdkError> {
        let mut bridge = Self {
            sdk,
            registered: Vec::with_capacity(PushEventKind::ALL.len()),
        };

        for kind in PushEventKind::ALL {
            // Con `?` el bridge parcial se suelta y Drop limpia lo registrado
            let id = bridge.sdk.add_event_listener(kind, handler.clone())?;
            bridge.registered.push((kind, id));
        }

        log::info!("🔌 [BRIDGE] {} listeners activos", bridge.registered.len());
        Ok(bridge)
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.registered.len()
    }

    #[cfg(test)]
    pub(crate) fn kinds(&self) -> Vec<PushEventKind> {
        self.registered.iter().map(|(kind, _)| *kind).collect()
    }
}

impl<S: PushSdk + ?Sized> Drop for EventBridge<S> {
    fn drop(&mut self) {
        for (kind, id) in self.registered.drain(..) {
            self.sdk.remove_event_listener(id);
            log::debug!("🔌 [BRIDGE] Listener '{}' eliminado", kind.js_name());
        }
    }
}
