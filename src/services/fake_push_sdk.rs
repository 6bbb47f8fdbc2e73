// SDK falso para tests: respuestas configurables y registro de llamadas

use std::cell::RefCell;
use std::collections::BTreeMap;
use async_trait::async_trait;
use crate::models::push_event::{PushEvent, PushEventKind};
use crate::services::push_sdk::{InitOptions, ListenerId, PushEventHandler, PushSdk, SdkError};

#[derive(Default)]
pub struct FakePushSdk {
    pub subscription_id: RefCell<Option<String>>,
    /// Id que asigna opt_in
    pub id_after_opt_in: RefCell<Option<String>>,
    /// Si es false, opt_out no borra subscription_id
    pub opt_out_clears_id: RefCell<bool>,
    pub grant_permission: RefCell<bool>,
    pub fail_init: RefCell<bool>,
    pub fail_request_permission: RefCell<bool>,
    pub fail_subscription_id: RefCell<bool>,
    pub fail_opt_in: RefCell<bool>,
    pub fail_opt_out: RefCell<bool>,
    pub init_options: RefCell<Option<InitOptions>>,
    calls: RefCell<Vec<&'static str>>,
    listeners: RefCell<BTreeMap<u32, (PushEventKind, PushEventHandler)>>,
    next_listener: RefCell<u32>,
}

impl FakePushSdk {
    pub fn new() -> Self {
        let sdk = Self::default();
        *sdk.opt_out_clears_id.borrow_mut() = true;
        *sdk.grant_permission.borrow_mut() = true;
        sdk
    }

    pub fn with_subscription_id(id: Option<&str>) -> Self {
        let sdk = Self::new();
        *sdk.subscription_id.borrow_mut() = id.map(str::to_string);
        sdk
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Dispara un evento hacia los listeners del tipo correspondiente
    pub fn emit(&self, event: PushEvent) {
        let handlers: Vec<PushEventHandler> = self
            .listeners
            .borrow()
            .values()
            .filter(|(kind, _)| *kind == event.kind())
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(event.clone());
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl PushSdk for FakePushSdk {
    async fn init(&self, options: &InitOptions) -> Result<(), SdkError> {
        self.record("init");
        *self.init_options.borrow_mut() = Some(options.clone());
        if *self.fail_init.borrow() {
            return Err(SdkError::Rejected("init failed".to_string()));
        }
        Ok(())
    }

    async fn subscription_id(&self) -> Result<Option<String>, SdkError> {
        self.record("subscription_id");
        if *self.fail_subscription_id.borrow() {
            return Err(SdkError::Rejected("id failed".to_string()));
        }
        Ok(self.subscription_id.borrow().clone())
    }

    async fn opt_in(&self) -> Result<(), SdkError> {
        self.record("opt_in");
        if *self.fail_opt_in.borrow() {
            return Err(SdkError::Rejected("opt-in failed".to_string()));
        }
        let id = self.id_after_opt_in.borrow().clone();
        if id.is_some() {
            *self.subscription_id.borrow_mut() = id;
        }
        Ok(())
    }

    async fn opt_out(&self) -> Result<(), SdkError> {
        self.record("opt_out");
        if *self.fail_opt_out.borrow() {
            return Err(SdkError::Rejected("opt-out failed".to_string()));
        }
        if *self.opt_out_clears_id.borrow() {
            *self.subscription_id.borrow_mut() = None;
        }
        Ok(())
    }

    async fn request_permission(&self) -> Result<bool, SdkError> {
        self.record("request_permission");
        if *self.fail_request_permission.borrow() {
            return Err(SdkError::Rejected("permission request failed".to_string()));
        }
        Ok(*self.grant_permission.borrow())
    }

    fn add_event_listener(
        &self,
        kind: PushEventKind,
        handler: PushEventHandler,
    ) -> Result<ListenerId, SdkError> {
        self.record("add_event_listener");
        let id = {
            let mut next = self.next_listener.borrow_mut();
            *next += 1;
            *next
        };
        self.listeners.borrow_mut().insert(id, (kind, handler));
        Ok(ListenerId(id))
    }

    fn remove_event_listener(&self, id: ListenerId) {
        self.record("remove_event_listener");
        // Sacar el handler antes de soltarlo: su Drop puede volver a este SDK
        let removed = self.listeners.borrow_mut().remove(&id.0);
        drop(removed);
    }
}
