//! Per-attachment binding objects. A binding is created when the engine
//! attaches to an app component, handed to every plugin subscribed to that
//! component kind, and dropped on detach; plugins must not retain one past
//! their detach hook.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::component::{
    BroadcastReceiver, ContentProvider, HostComponent, Lifecycle, ServiceComponent,
};
use crate::event::{Intent, PermissionStatus, StateSnapshot};
use crate::listener::{
    ComponentResultListener, ModeChangeListener, NewIntentListener, PermissionResultListener,
    SaveStateListener, UserLeaveHintListener,
};

fn add_listener<T: ?Sized>(listeners: &RefCell<Vec<Rc<T>>>, listener: Rc<T>) {
    let mut listeners = listeners.borrow_mut();
    if !listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
        listeners.push(listener);
    }
}

fn remove_listener<T: ?Sized>(listeners: &RefCell<Vec<Rc<T>>>, listener: &Rc<T>) {
    listeners.borrow_mut().retain(|l| !Rc::ptr_eq(l, listener));
}

// Fan-out iterates a snapshot so a listener that adds or removes itself or a
// peer mid-dispatch cannot corrupt iteration; every listener present when the
// dispatch started still runs.
fn snapshot<T: ?Sized>(listeners: &RefCell<Vec<Rc<T>>>) -> Vec<Rc<T>> {
    listeners.borrow().clone()
}

/// Resources a host-component-aware plugin may use between its attach and
/// detach hooks: the component itself, its lifecycle, and per-event listener
/// registration.
pub struct HostComponentBinding {
    component: Rc<HostComponent>,
    lifecycle: Rc<Lifecycle>,
    permission_result_listeners: RefCell<Vec<Rc<dyn PermissionResultListener>>>,
    component_result_listeners: RefCell<Vec<Rc<dyn ComponentResultListener>>>,
    new_intent_listeners: RefCell<Vec<Rc<dyn NewIntentListener>>>,
    user_leave_hint_listeners: RefCell<Vec<Rc<dyn UserLeaveHintListener>>>,
    save_state_listeners: RefCell<Vec<Rc<dyn SaveStateListener>>>,
}

impl HostComponentBinding {
    pub fn new(component: Rc<HostComponent>, lifecycle: Rc<Lifecycle>) -> Self {
        Self {
            component,
            lifecycle,
            permission_result_listeners: RefCell::new(Vec::new()),
            component_result_listeners: RefCell::new(Vec::new()),
            new_intent_listeners: RefCell::new(Vec::new()),
            user_leave_hint_listeners: RefCell::new(Vec::new()),
            save_state_listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn component(&self) -> &Rc<HostComponent> {
        &self.component
    }

    pub fn lifecycle(&self) -> &Rc<Lifecycle> {
        &self.lifecycle
    }

    pub fn add_permission_result_listener(&self, listener: Rc<dyn PermissionResultListener>) {
        add_listener(&self.permission_result_listeners, listener);
    }

    pub fn remove_permission_result_listener(&self, listener: &Rc<dyn PermissionResultListener>) {
        remove_listener(&self.permission_result_listeners, listener);
    }

    pub fn add_component_result_listener(&self, listener: Rc<dyn ComponentResultListener>) {
        add_listener(&self.component_result_listeners, listener);
    }

    pub fn remove_component_result_listener(&self, listener: &Rc<dyn ComponentResultListener>) {
        remove_listener(&self.component_result_listeners, listener);
    }

    pub fn add_new_intent_listener(&self, listener: Rc<dyn NewIntentListener>) {
        add_listener(&self.new_intent_listeners, listener);
    }

    pub fn remove_new_intent_listener(&self, listener: &Rc<dyn NewIntentListener>) {
        remove_listener(&self.new_intent_listeners, listener);
    }

    pub fn add_user_leave_hint_listener(&self, listener: Rc<dyn UserLeaveHintListener>) {
        add_listener(&self.user_leave_hint_listeners, listener);
    }

    pub fn remove_user_leave_hint_listener(&self, listener: &Rc<dyn UserLeaveHintListener>) {
        remove_listener(&self.user_leave_hint_listeners, listener);
    }

    pub fn add_save_state_listener(&self, listener: Rc<dyn SaveStateListener>) {
        add_listener(&self.save_state_listeners, listener);
    }

    pub fn remove_save_state_listener(&self, listener: &Rc<dyn SaveStateListener>) {
        remove_listener(&self.save_state_listeners, listener);
    }

    /// Invoked by the engine that owns this binding when the attached host
    /// component reports a permission result. Returns true if any listener
    /// consumed the result; every listener runs regardless.
    pub fn dispatch_permission_result(
        &self,
        request_code: i32,
        permissions: &[String],
        results: &[PermissionStatus],
    ) -> bool {
        let mut consumed = false;
        for listener in snapshot(&self.permission_result_listeners) {
            consumed =
                listener.on_permission_result(request_code, permissions, results) || consumed;
        }
        consumed
    }

    /// Invoked by the engine that owns this binding when the attached host
    /// component receives a component result. Returns true if any listener
    /// consumed the result; every listener runs regardless.
    pub fn dispatch_component_result(
        &self,
        request_code: i32,
        result_code: i32,
        data: Option<&Intent>,
    ) -> bool {
        let mut consumed = false;
        for listener in snapshot(&self.component_result_listeners) {
            consumed = listener.on_component_result(request_code, result_code, data) || consumed;
        }
        consumed
    }

    /// Invoked by the engine that owns this binding when the attached host
    /// component receives a new intent.
    pub fn dispatch_new_intent(&self, intent: &Intent) {
        for listener in snapshot(&self.new_intent_listeners) {
            listener.on_new_intent(intent);
        }
    }

    /// Invoked by the engine that owns this binding when the user navigates
    /// away from the attached host component.
    pub fn dispatch_user_leave_hint(&self) {
        for listener in snapshot(&self.user_leave_hint_listeners) {
            listener.on_user_leave_hint();
        }
    }

    /// Invoked by the engine that owns this binding when the attached host
    /// component saves its instance state.
    pub fn dispatch_save_state(&self, state: &mut StateSnapshot) {
        for listener in snapshot(&self.save_state_listeners) {
            listener.on_save_state(state);
        }
    }

    /// Invoked by the engine that owns this binding when the attached host
    /// component restores its instance state.
    pub fn dispatch_restore_state(&self, state: Option<&StateSnapshot>) {
        for listener in snapshot(&self.save_state_listeners) {
            listener.on_restore_state(state);
        }
    }
}

/// Resources a service-aware plugin may use between its attach and detach
/// hooks.
pub struct ServiceBinding {
    service: Rc<ServiceComponent>,
    lifecycle: Option<Rc<Lifecycle>>,
    foreground: Cell<bool>,
    mode_change_listeners: RefCell<Vec<Rc<dyn ModeChangeListener>>>,
}

impl ServiceBinding {
    pub fn new(
        service: Rc<ServiceComponent>,
        lifecycle: Option<Rc<Lifecycle>>,
        is_foreground: bool,
    ) -> Self {
        Self {
            service,
            lifecycle,
            foreground: Cell::new(is_foreground),
            mode_change_listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn service(&self) -> &Rc<ServiceComponent> {
        &self.service
    }

    pub fn lifecycle(&self) -> Option<&Rc<Lifecycle>> {
        self.lifecycle.as_ref()
    }

    pub fn is_foreground(&self) -> bool {
        self.foreground.get()
    }

    pub fn add_mode_change_listener(&self, listener: Rc<dyn ModeChangeListener>) {
        add_listener(&self.mode_change_listeners, listener);
    }

    pub fn remove_mode_change_listener(&self, listener: &Rc<dyn ModeChangeListener>) {
        remove_listener(&self.mode_change_listeners, listener);
    }

    /// Invoked by the engine that owns this binding when the attached service
    /// moves to foreground execution.
    pub fn dispatch_move_to_foreground(&self) {
        self.foreground.set(true);
        for listener in snapshot(&self.mode_change_listeners) {
            listener.on_move_to_foreground();
        }
    }

    /// Invoked by the engine that owns this binding when the attached service
    /// moves to background execution.
    pub fn dispatch_move_to_background(&self) {
        self.foreground.set(false);
        for listener in snapshot(&self.mode_change_listeners) {
            listener.on_move_to_background();
        }
    }
}

/// Resources a broadcast-receiver-aware plugin may use between its attach and
/// detach hooks.
pub struct BroadcastReceiverBinding {
    receiver: Rc<BroadcastReceiver>,
}

impl BroadcastReceiverBinding {
    pub fn new(receiver: Rc<BroadcastReceiver>) -> Self {
        Self { receiver }
    }

    pub fn receiver(&self) -> &Rc<BroadcastReceiver> {
        &self.receiver
    }
}

/// Resources a content-provider-aware plugin may use between its attach and
/// detach hooks.
pub struct ContentProviderBinding {
    provider: Rc<ContentProvider>,
}

impl ContentProviderBinding {
    pub fn new(provider: Rc<ContentProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Rc<ContentProvider> {
        &self.provider
    }
}
