use std::collections::VecDeque;
use serde_json::{Map, Value};

/// Máximo de notificaciones que guarda el historial
pub const MAX_NOTIFICATIONS: usize = 10;

/// Título usado cuando un click llega sin título
pub const DEFAULT_CLICK_TITLE: &str = "Notification";

/// Entrada del historial local de notificaciones
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEntry {
    pub title: String,
    pub body: String,
    /// Datos adicionales de la notificación (solo entradas de click)
    pub data: Option<Map<String, Value>>,
    /// Hora local de recepción, ya formateada
    pub received_at: String,
}

impl NotificationEntry {
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

/// Historial acotado, más reciente primero.
/// Al superar MAX_NOTIFICATIONS se descarta la más antigua.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationLog {
    entries: VecDeque<NotificationEntry>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_NOTIFICATIONS),
        }
    }

    /// Inserta al frente y recorta
    pub fn push_front(&mut self, entry: NotificationEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(MAX_NOTIFICATIONS);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &NotificationEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub(crate) fn latest(&self) -> Option<&NotificationEntry> {
        self.entries.front()
    }

    /// Copia en orden de render (más reciente primero)
    pub fn to_vec(&self) -> Vec<NotificationEntry> {
        self.entries.iter().cloned().collect()
    }
}
