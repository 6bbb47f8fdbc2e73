// ============================================================================
// PANEL STATE - Estado local del panel de notificaciones
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::notification::{NotificationEntry, NotificationLog};

/// Estado del panel (Rc<RefCell> + notificación de cambios).
/// Se descarta al desmontar; no se persiste nada.
#[derive(Clone)]
pub struct PanelState {
    initialized: Rc<RefCell<bool>>,
    is_subscribed: Rc<RefCell<bool>>,
    notifications: Rc<RefCell<NotificationLog>>,
    change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

/// Copia inmutable del estado para renderizar
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelSnapshot {
    pub initialized: bool,
    pub is_subscribed: bool,
    pub notifications: Vec<NotificationEntry>,
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            initialized: Rc::new(RefCell::new(false)),
            is_subscribed: Rc::new(RefCell::new(false)),
            notifications: Rc::new(RefCell::new(NotificationLog::new())),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn is_initialized(&self) -> bool {
        *self.initialized.borrow()
    }

    /// Marca el SDK como inicializado. No hay camino de vuelta a false.
    pub fn mark_initialized(&self) {
        let changed = !self.is_initialized();
        *self.initialized.borrow_mut() = true;
        if changed {
            self.notify_changes();
        }
    }

    pub fn is_subscribed(&self) -> bool {
        *self.is_subscribed.borrow()
    }

    pub fn set_subscribed(&self, subscribed: bool) {
        let changed = self.is_subscribed() != subscribed;
        *self.is_subscribed.borrow_mut() = subscribed;
        if changed {
            self.notify_changes();
        }
    }

    /// Agrega al frente del historial (recorta a 10)
    pub fn push_notification(&self, entry: NotificationEntry) {
        self.notifications.borrow_mut().push_front(entry);
        self.notify_changes();
    }

    pub fn notifications(&self) -> Vec<NotificationEntry> {
        self.notifications.borrow().to_vec()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.borrow().len()
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            initialized: self.is_initialized(),
            is_subscribed: self.is_subscribed(),
            notifications: self.notifications(),
        }
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn clear_subscribers(&self) {
        self.change_subscribers.borrow_mut().clear();
    }

    fn notify_changes(&self) {
        // Clonar antes de llamar: un callback puede suscribir otro
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}
