//! Control surfaces: the attach/detach/forward API host app components call
//! into, one surface per component kind, plus the cross-kind exclusivity
//! dispatcher.

use std::cell::RefCell;
use std::rc::Rc;

use prism_plugin_api::binding::{
    BroadcastReceiverBinding, ContentProviderBinding, HostComponentBinding, ServiceBinding,
};
use prism_plugin_api::capability::{Capability, CapabilitySet};
use prism_plugin_api::component::{
    BroadcastReceiver, ContentProvider, ExclusiveHostComponent, Lifecycle, ServiceComponent,
};
use prism_plugin_api::event::{Intent, PermissionStatus, StateSnapshot};
use prism_plugin_api::plugin::Plugin;
use prism_plugin_api::shell::ShellArgs;
use tracing::{debug, error};

use crate::registry::ConnectionRegistry;

/// The single app component an engine may be bound to at any moment, holding
/// that kind's binding. Keeping the binding inside the variant makes
/// cross-kind exclusivity a property of the representation rather than a
/// runtime check.
pub(crate) enum Attachment {
    Host {
        owner: Rc<dyn ExclusiveHostComponent>,
        binding: Rc<HostComponentBinding>,
    },
    Service {
        binding: Rc<ServiceBinding>,
    },
    BroadcastReceiver {
        binding: Rc<BroadcastReceiverBinding>,
    },
    ContentProvider {
        binding: Rc<ContentProviderBinding>,
    },
}

impl Attachment {
    pub(crate) fn kind(&self) -> Capability {
        match self {
            Attachment::Host { .. } => Capability::HostComponent,
            Attachment::Service { .. } => Capability::Service,
            Attachment::BroadcastReceiver { .. } => Capability::BroadcastReceiver,
            Attachment::ContentProvider { .. } => Capability::ContentProvider,
        }
    }
}

impl ConnectionRegistry {
    // ---- Cross-kind exclusivity dispatcher ----

    /// Detaches from whichever app component is currently attached, if any,
    /// running that kind's full detach notifications. Every attach path
    /// calls this before establishing a new attachment, which is what lets
    /// each `attach_to_*` assume a clean slate.
    pub fn detach_from_app_component(&mut self) {
        match self.attachment.as_ref().map(Attachment::kind) {
            Some(Capability::HostComponent) => self.detach_from_host_component(),
            Some(Capability::Service) => self.detach_from_service(),
            Some(Capability::BroadcastReceiver) => self.detach_from_broadcast_receiver(),
            Some(Capability::ContentProvider) => self.detach_from_content_provider(),
            None => {}
        }
    }

    // ---- Host-component control surface ----

    pub fn is_attached_to_host_component(&self) -> bool {
        matches!(self.attachment, Some(Attachment::Host { .. }))
    }

    fn host_binding(&self) -> Option<&Rc<HostComponentBinding>> {
        match &self.attachment {
            Some(Attachment::Host { binding, .. }) => Some(binding),
            _ => None,
        }
    }

    /// Attaches the engine to a UI-owning host component.
    ///
    /// Any previously attached component, of any kind, is fully detached
    /// first; if it was another host-component owner, that owner's
    /// `detach_from_engine` hook runs before the detach so it can release
    /// its engine references. Platform views are activated against the new
    /// component before any plugin is notified.
    pub fn attach_to_host_component(
        &mut self,
        owner: Rc<dyn ExclusiveHostComponent>,
        lifecycle: Rc<Lifecycle>,
    ) {
        if let Some(Attachment::Host { owner: previous, .. }) = &self.attachment {
            previous.detach_from_engine();
        }
        // Covers the case where a different kind of component was attached.
        self.detach_from_app_component();

        let component = owner.component();
        debug!(component = component.name(), "attaching to host component");

        let binding = Rc::new(HostComponentBinding::new(Rc::clone(&component), lifecycle));

        let software_rendering = component
            .shell_args()
            .contains(ShellArgs::ENABLE_SOFTWARE_RENDERING);
        self.platform_views.set_software_rendering(software_rendering);
        // Activate platform views before any plugin runs its attach hook, so
        // view factories registered by plugins find the channel already live.
        self.platform_views.attach(
            component.context(),
            self.engine_binding.renderer(),
            self.engine_binding.executor(),
        );

        self.attachment = Some(Attachment::Host {
            owner,
            binding: Rc::clone(&binding),
        });

        let reattaching = self.waiting_for_host_reattachment;
        self.for_each_with_capability(Capability::HostComponent, |plugin| {
            if let Some(aware) = plugin.as_host_component_aware() {
                if reattaching {
                    aware.on_reattached_to_host_component_for_config_changes(Rc::clone(&binding));
                } else {
                    aware.on_attached_to_host_component(Rc::clone(&binding));
                }
            }
        });
        self.waiting_for_host_reattachment = false;
    }

    /// Detaches from the host component ahead of a configuration change that
    /// will recreate the same logical screen. Plugins get the transient
    /// detach hook and the next host attach is delivered as a reattach.
    pub fn detach_from_host_component_for_config_changes(&mut self) {
        if !self.is_attached_to_host_component() {
            error!("attempted to detach plugins from a host component when none was attached");
            return;
        }
        debug!("detaching from host component for config changes");
        self.waiting_for_host_reattachment = true;
        self.for_each_with_capability(Capability::HostComponent, |plugin| {
            if let Some(aware) = plugin.as_host_component_aware() {
                aware.on_detached_from_host_component_for_config_changes();
            }
        });
        self.detach_from_host_component_internal();
    }

    /// Terminally detaches from the host component.
    pub fn detach_from_host_component(&mut self) {
        if !self.is_attached_to_host_component() {
            error!("attempted to detach plugins from a host component when none was attached");
            return;
        }
        debug!("detaching from host component");
        self.for_each_with_capability(Capability::HostComponent, |plugin| {
            if let Some(aware) = plugin.as_host_component_aware() {
                aware.on_detached_from_host_component();
            }
        });
        self.detach_from_host_component_internal();
    }

    fn detach_from_host_component_internal(&mut self) {
        self.platform_views.detach();
        self.attachment = None;
    }

    /// Forwards a permission result to the current host binding's listeners.
    /// Returns true if any listener consumed it; false (with a logged error)
    /// when no host component is attached.
    pub fn on_permission_result(
        &self,
        request_code: i32,
        permissions: &[String],
        results: &[PermissionStatus],
    ) -> bool {
        match self.host_binding() {
            Some(binding) => binding.dispatch_permission_result(request_code, permissions, results),
            None => {
                error!(
                    "attempted to forward a permission result, but no host component was attached"
                );
                false
            }
        }
    }

    /// Forwards a component result to the current host binding's listeners.
    /// Returns true if any listener consumed it; false (with a logged error)
    /// when no host component is attached.
    pub fn on_host_component_result(
        &self,
        request_code: i32,
        result_code: i32,
        data: Option<&Intent>,
    ) -> bool {
        match self.host_binding() {
            Some(binding) => binding.dispatch_component_result(request_code, result_code, data),
            None => {
                error!(
                    "attempted to forward a component result, but no host component was attached"
                );
                false
            }
        }
    }

    pub fn on_new_intent(&self, intent: &Intent) {
        match self.host_binding() {
            Some(binding) => binding.dispatch_new_intent(intent),
            None => {
                error!("attempted to forward a new intent, but no host component was attached");
            }
        }
    }

    pub fn on_user_leave_hint(&self) {
        match self.host_binding() {
            Some(binding) => binding.dispatch_user_leave_hint(),
            None => {
                error!(
                    "attempted to forward a user-leave hint, but no host component was attached"
                );
            }
        }
    }

    pub fn on_save_state(&self, state: &mut StateSnapshot) {
        match self.host_binding() {
            Some(binding) => binding.dispatch_save_state(state),
            None => {
                error!("attempted to save instance state, but no host component was attached");
            }
        }
    }

    pub fn on_restore_state(&self, state: Option<&StateSnapshot>) {
        match self.host_binding() {
            Some(binding) => binding.dispatch_restore_state(state),
            None => {
                error!("attempted to restore instance state, but no host component was attached");
            }
        }
    }

    // ---- Service control surface ----

    pub fn is_attached_to_service(&self) -> bool {
        matches!(self.attachment, Some(Attachment::Service { .. }))
    }

    fn service_binding(&self) -> Option<&Rc<ServiceBinding>> {
        match &self.attachment {
            Some(Attachment::Service { binding }) => Some(binding),
            _ => None,
        }
    }

    pub fn attach_to_service(
        &mut self,
        service: Rc<ServiceComponent>,
        lifecycle: Option<Rc<Lifecycle>>,
        is_foreground: bool,
    ) {
        self.detach_from_app_component();

        debug!(service = service.name(), is_foreground, "attaching to service");
        let binding = Rc::new(ServiceBinding::new(service, lifecycle, is_foreground));
        self.attachment = Some(Attachment::Service {
            binding: Rc::clone(&binding),
        });

        self.for_each_with_capability(Capability::Service, |plugin| {
            if let Some(aware) = plugin.as_service_aware() {
                aware.on_attached_to_service(Rc::clone(&binding));
            }
        });
    }

    pub fn detach_from_service(&mut self) {
        if !self.is_attached_to_service() {
            error!("attempted to detach plugins from a service when no service was attached");
            return;
        }
        debug!("detaching from service");
        self.for_each_with_capability(Capability::Service, |plugin| {
            if let Some(aware) = plugin.as_service_aware() {
                aware.on_detached_from_service();
            }
        });
        self.attachment = None;
    }

    /// Advisory mode-change event; silently ignored while no service is
    /// attached, since there is no result a caller could miss.
    pub fn on_move_to_foreground(&self) {
        if let Some(binding) = self.service_binding() {
            binding.dispatch_move_to_foreground();
        }
    }

    /// Advisory mode-change event; silently ignored while no service is
    /// attached.
    pub fn on_move_to_background(&self) {
        if let Some(binding) = self.service_binding() {
            binding.dispatch_move_to_background();
        }
    }

    // ---- Broadcast-receiver control surface ----

    pub fn is_attached_to_broadcast_receiver(&self) -> bool {
        matches!(self.attachment, Some(Attachment::BroadcastReceiver { .. }))
    }

    pub fn attach_to_broadcast_receiver(
        &mut self,
        receiver: Rc<BroadcastReceiver>,
        _lifecycle: Rc<Lifecycle>,
    ) {
        self.detach_from_app_component();

        debug!(receiver = receiver.name(), "attaching to broadcast receiver");
        let binding = Rc::new(BroadcastReceiverBinding::new(receiver));
        self.attachment = Some(Attachment::BroadcastReceiver {
            binding: Rc::clone(&binding),
        });

        self.for_each_with_capability(Capability::BroadcastReceiver, |plugin| {
            if let Some(aware) = plugin.as_broadcast_receiver_aware() {
                aware.on_attached_to_broadcast_receiver(Rc::clone(&binding));
            }
        });
    }

    pub fn detach_from_broadcast_receiver(&mut self) {
        if !self.is_attached_to_broadcast_receiver() {
            error!(
                "attempted to detach plugins from a broadcast receiver when none was attached"
            );
            return;
        }
        debug!("detaching from broadcast receiver");
        self.for_each_with_capability(Capability::BroadcastReceiver, |plugin| {
            if let Some(aware) = plugin.as_broadcast_receiver_aware() {
                aware.on_detached_from_broadcast_receiver();
            }
        });
        self.attachment = None;
    }

    // ---- Content-provider control surface ----

    pub fn is_attached_to_content_provider(&self) -> bool {
        matches!(self.attachment, Some(Attachment::ContentProvider { .. }))
    }

    pub fn attach_to_content_provider(
        &mut self,
        provider: Rc<ContentProvider>,
        _lifecycle: Rc<Lifecycle>,
    ) {
        self.detach_from_app_component();

        debug!(provider = provider.authority(), "attaching to content provider");
        let binding = Rc::new(ContentProviderBinding::new(provider));
        self.attachment = Some(Attachment::ContentProvider {
            binding: Rc::clone(&binding),
        });

        self.for_each_with_capability(Capability::ContentProvider, |plugin| {
            if let Some(aware) = plugin.as_content_provider_aware() {
                aware.on_attached_to_content_provider(Rc::clone(&binding));
            }
        });
    }

    pub fn detach_from_content_provider(&mut self) {
        if !self.is_attached_to_content_provider() {
            error!(
                "attempted to detach plugins from a content provider when none was attached"
            );
            return;
        }
        debug!("detaching from content provider");
        self.for_each_with_capability(Capability::ContentProvider, |plugin| {
            if let Some(aware) = plugin.as_content_provider_aware() {
                aware.on_detached_from_content_provider();
            }
        });
        self.attachment = None;
    }

    // ---- Shared notification paths used by the plugin set operations ----

    /// Notifies a just-registered plugin of the current attachment, for each
    /// capability it declares that matches the attached kind.
    pub(crate) fn notify_late_join(
        &self,
        plugin: &Rc<RefCell<dyn Plugin>>,
        capabilities: CapabilitySet,
    ) {
        let Some(attachment) = &self.attachment else {
            return;
        };
        if !capabilities.contains(attachment.kind()) {
            return;
        }
        let mut plugin = plugin.borrow_mut();
        match attachment {
            Attachment::Host { binding, .. } => {
                if let Some(aware) = plugin.as_host_component_aware() {
                    aware.on_attached_to_host_component(Rc::clone(binding));
                }
            }
            Attachment::Service { binding } => {
                if let Some(aware) = plugin.as_service_aware() {
                    aware.on_attached_to_service(Rc::clone(binding));
                }
            }
            Attachment::BroadcastReceiver { binding } => {
                if let Some(aware) = plugin.as_broadcast_receiver_aware() {
                    aware.on_attached_to_broadcast_receiver(Rc::clone(binding));
                }
            }
            Attachment::ContentProvider { binding } => {
                if let Some(aware) = plugin.as_content_provider_aware() {
                    aware.on_attached_to_content_provider(Rc::clone(binding));
                }
            }
        }
    }

    /// Runs the component detach hook for a plugin about to be unregistered,
    /// for each capability it declares that matches the attached kind, so it
    /// can release per-component references before being forgotten.
    pub(crate) fn notify_removal_detach(
        &self,
        plugin: &Rc<RefCell<dyn Plugin>>,
        capabilities: CapabilitySet,
    ) {
        let Some(attachment) = &self.attachment else {
            return;
        };
        if !capabilities.contains(attachment.kind()) {
            return;
        }
        let mut plugin = plugin.borrow_mut();
        match attachment {
            Attachment::Host { .. } => {
                if let Some(aware) = plugin.as_host_component_aware() {
                    aware.on_detached_from_host_component();
                }
            }
            Attachment::Service { .. } => {
                if let Some(aware) = plugin.as_service_aware() {
                    aware.on_detached_from_service();
                }
            }
            Attachment::BroadcastReceiver { .. } => {
                if let Some(aware) = plugin.as_broadcast_receiver_aware() {
                    aware.on_detached_from_broadcast_receiver();
                }
            }
            Attachment::ContentProvider { .. } => {
                if let Some(aware) = plugin.as_content_provider_aware() {
                    aware.on_detached_from_content_provider();
                }
            }
        }
    }
}
