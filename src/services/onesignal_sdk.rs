// ============================================================================
// ONESIGNAL SDK - PushSdk sobre el global `OneSignal` de la página
// ============================================================================
// La página carga el SDK web de OneSignal y el service worker
// (OneSignalSDKWorker.js). Aquí solo traducimos llamadas y eventos:
// - Llamadas: Reflect + Function::apply, promesas vía JsFuture
// - Eventos: Closure guardada en el mapa hasta remove_event_listener
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use serde_json::{Map, Value};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use crate::models::push_event::{EventTarget, PushEvent, PushEventKind};
use crate::services::push_sdk::{InitOptions, ListenerId, PushEventHandler, PushSdk, SdkError};

const GLOBAL_NAME: &str = "OneSignal";
/// Cola que el SDK v16 vacía al cargar, llamando a cada función con `OneSignal`
const DEFERRED_QUEUE: &str = "OneSignalDeferred";

struct RegisteredListener {
    kind: PushEventKind,
    target: JsValue,
    closure: Closure<dyn FnMut(JsValue)>,
}

/// Adaptador del SDK web de OneSignal
pub struct OneSignalSdk {
    listeners: RefCell<HashMap<u32, RegisteredListener>>,
    next_id: Cell<u32>,
}

impl OneSignalSdk {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    /// ¿Está el script del SDK cargado?
    pub fn is_loaded() -> bool {
        root().is_ok()
    }

    fn target(target: EventTarget) -> Result<JsValue, SdkError> {
        match target {
            EventTarget::Notifications => notifications(),
            EventTarget::PushSubscription => push_subscription(),
        }
    }
}

impl Default for OneSignalSdk {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for OneSignalSdk {
    fn drop(&mut self) {
        let ids: Vec<u32> = self.listeners.borrow().keys().copied().collect();
        for id in ids {
            self.remove_event_listener(ListenerId(id));
        }
    }
}

fn root() -> Result<JsValue, SdkError> {
    let window = web_sys::window().ok_or(SdkError::NotLoaded)?;
    let onesignal = Reflect::get(&window, &JsValue::from_str(GLOBAL_NAME))
        .map_err(|_| SdkError::NotLoaded)?;
    if onesignal.is_undefined() || onesignal.is_null() {
        return Err(SdkError::NotLoaded);
    }
    Ok(onesignal)
}

/// Espera a que el script del SDK (cargado con `defer`) esté listo
async fn wait_for_sdk() -> Result<JsValue, SdkError> {
    if let Ok(onesignal) = root() {
        return Ok(onesignal);
    }

    let window = web_sys::window().ok_or(SdkError::NotLoaded)?;
    let key = JsValue::from_str(DEFERRED_QUEUE);
    let mut queue = Reflect::get(&window, &key)?;
    if !Array::is_array(&queue) {
        queue = Array::new().into();
        Reflect::set(&window, &key, &queue)?;
    }
    let queue: Array = queue.unchecked_into();

    log::info!("⏳ [ONESIGNAL] Esperando a que cargue el SDK...");
    let mut enqueue = |resolve: Function, _reject: Function| {
        queue.push(&resolve);
    };
    let promise = Promise::new(&mut enqueue);
    Ok(JsFuture::from(promise).await?)
}

fn get_path(base: &JsValue, path: &[&str]) -> Result<JsValue, SdkError> {
    let mut current = base.clone();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key))?;
        if current.is_undefined() || current.is_null() {
            return Err(SdkError::InvalidResponse(format!("missing OneSignal.{}", path.join("."))));
        }
    }
    Ok(current)
}

fn notifications() -> Result<JsValue, SdkError> {
    get_path(&root()?, &["Notifications"])
}

fn push_subscription() -> Result<JsValue, SdkError> {
    get_path(&root()?, &["User", "PushSubscription"])
}

fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, SdkError> {
    let function = Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| SdkError::InvalidResponse(format!("{} is not a function", name)))?;
    Ok(function.apply(target, args)?)
}

/// Espera el valor si es una promesa (o lo devuelve tal cual)
async fn resolve(value: JsValue) -> Result<JsValue, SdkError> {
    let promise = Promise::resolve(&value);
    Ok(JsFuture::from(promise).await?)
}

fn js_to_map(value: JsValue) -> Option<Map<String, Value>> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    serde_wasm_bindgen::from_value::<Map<String, Value>>(value).ok()
}

fn js_string(base: &JsValue, key: &str) -> Value {
    Reflect::get(base, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
        .map(Value::String)
        .unwrap_or(Value::Null)
}

/// Extrae los campos que usamos de `event.notification`.
/// La notificación de OneSignal trae métodos, así que no se deserializa entera.
fn notification_event_json(event: &JsValue) -> Value {
    let notification = match Reflect::get(event, &JsValue::from_str("notification")) {
        Ok(n) if n.is_object() => n,
        _ => return Value::Object(Map::new()),
    };

    let mut fields = Map::new();
    fields.insert("title".into(), js_string(&notification, "title"));
    fields.insert("body".into(), js_string(&notification, "body"));

    if let Some(data) = Reflect::get(&notification, &JsValue::from_str("additionalData"))
        .ok()
        .and_then(js_to_map)
    {
        fields.insert("additionalData".into(), Value::Object(data));
    }

    if let Some(data) = Reflect::get(&notification, &JsValue::from_str("payload"))
        .ok()
        .filter(|p| p.is_object())
        .and_then(|p| Reflect::get(&p, &JsValue::from_str("additionalData")).ok())
        .and_then(js_to_map)
    {
        let mut payload = Map::new();
        payload.insert("additionalData".into(), Value::Object(data));
        fields.insert("payload".into(), Value::Object(payload));
    }

    let mut wrapper = Map::new();
    wrapper.insert("notification".into(), Value::Object(fields));
    Value::Object(wrapper)
}

#[async_trait(?Send)]
impl PushSdk for OneSignalSdk {
    async fn init(&self, options: &InitOptions) -> Result<(), SdkError> {
        let onesignal = wait_for_sdk().await?;
        let js_options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| SdkError::InvalidResponse(e.to_string()))?;
        let pending = call_method(&onesignal, "init", &Array::of1(&js_options))?;
        resolve(pending).await?;
        log::info!("✅ [ONESIGNAL] SDK inicializado (app {})", options.app_id);
        Ok(())
    }

    async fn subscription_id(&self) -> Result<Option<String>, SdkError> {
        let subscription = push_subscription()?;
        let raw = Reflect::get(&subscription, &JsValue::from_str("id"))?;
        // Según la versión del SDK, `id` es una función async o una propiedad
        let value = match raw.dyn_ref::<Function>() {
            Some(function) => function.call0(&subscription)?,
            None => raw,
        };
        let id = resolve(value).await?;
        Ok(id.as_string().filter(|s| !s.is_empty()))
    }

    async fn opt_in(&self) -> Result<(), SdkError> {
        let pending = call_method(&push_subscription()?, "optIn", &Array::new())?;
        resolve(pending).await?;
        Ok(())
    }

    async fn opt_out(&self) -> Result<(), SdkError> {
        let pending = call_method(&push_subscription()?, "optOut", &Array::new())?;
        resolve(pending).await?;
        Ok(())
    }

    async fn request_permission(&self) -> Result<bool, SdkError> {
        let notifications = notifications()?;
        let pending = call_method(&notifications, "requestPermission", &Array::new())?;
        let granted = resolve(pending).await?;
        match granted.as_bool() {
            Some(granted) => Ok(granted),
            // Versiones que resuelven sin valor: leer Notifications.permission
            None => Ok(Reflect::get(&notifications, &JsValue::from_str("permission"))?
                .as_bool()
                .unwrap_or(false)),
        }
    }

    fn add_event_listener(
        &self,
        kind: PushEventKind,
        handler: PushEventHandler,
    ) -> Result<ListenerId, SdkError> {
        let target = Self::target(kind.target())?;

        let closure = Closure::wrap(Box::new(move |event: JsValue| {
            let raw = match kind {
                PushEventKind::Click | PushEventKind::ForegroundWillDisplay => {
                    notification_event_json(&event)
                }
                _ => Value::Null,
            };
            handler(PushEvent::from_json(kind, &raw));
        }) as Box<dyn FnMut(JsValue)>);

        call_method(
            &target,
            "addEventListener",
            &Array::of2(&JsValue::from_str(kind.js_name()), closure.as_ref()),
        )?;

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.listeners.borrow_mut().insert(id, RegisteredListener { kind, target, closure });
        log::info!("👂 [ONESIGNAL] Listener '{}' registrado (#{})", kind.js_name(), id);
        Ok(ListenerId(id))
    }

    fn remove_event_listener(&self, id: ListenerId) {
        let Some(listener) = self.listeners.borrow_mut().remove(&id.0) else {
            log::warn!("⚠️ [ONESIGNAL] Listener #{} no encontrado", id.0);
            return;
        };

        let args = Array::of2(
            &JsValue::from_str(listener.kind.js_name()),
            listener.closure.as_ref(),
        );
        if let Err(e) = call_method(&listener.target, "removeEventListener", &args) {
            log::error!("❌ [ONESIGNAL] Error quitando listener '{}': {}", listener.kind.js_name(), e);
        }
        // La Closure se suelta aquí, después de quitarla del SDK
    }
}
