// ============================================================================
// EVENT HANDLING - Listeners de elementos del DOM
// ============================================================================
// Cada render crea botones nuevos. Sus closures viven en un ClickListener
// que guarda App hasta el siguiente render; al soltarlo se quita el
// listener y se libera la closure (sin forget()).
// Los listeners del SDK NO pasan por aquí: ver services::event_bridge.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, MouseEvent};

/// Listener de click registrado; se quita en Drop
pub struct ClickListener {
    element: Element,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl Drop for ClickListener {
    fn drop(&mut self) {
        let _ = self.element.remove_event_listener_with_callback(
            "click",
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

/// Registra un click handler; el listener vive lo que viva el valor devuelto
pub fn on_click<F>(element: &Element, handler: F) -> Result<ClickListener, JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback(
        "click",
        closure.as_ref().unchecked_ref(),
    )?;
    Ok(ClickListener {
        element: element.clone(),
        closure,
    })
}

/// Listeners del render actual. `replace` suelta los del render anterior.
pub struct ListenerSlot<T> {
    current: Vec<T>,
}

impl<T> ListenerSlot<T> {
    pub fn new() -> Self {
        Self { current: Vec::new() }
    }

    pub fn replace(&mut self, next: Vec<T>) {
        self.current = next;
    }

    pub fn clear(&mut self) {
        self.current.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.current.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

impl<T> Default for ListenerSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_replace_releases_previous_render() {
        let first = Rc::new(());
        let second = Rc::new(());
        let mut slot = ListenerSlot::new();

        slot.replace(vec![first.clone()]);
        assert_eq!(Rc::strong_count(&first), 2);

        for _ in 0..5 {
            slot.replace(vec![second.clone()]);
        }
        assert_eq!(Rc::strong_count(&first), 1);
        assert_eq!(Rc::strong_count(&second), 2);
        assert_eq!(slot.len(), 1);
    }

    #[test]
    fn test_clear_releases_everything() {
        let held = Rc::new(());
        let mut slot = ListenerSlot::new();
        slot.replace(vec![held.clone(), held.clone()]);

        slot.clear();

        assert!(slot.is_empty());
        assert_eq!(Rc::strong_count(&held), 1);
    }
}
