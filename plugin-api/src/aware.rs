//! Capability contracts: one trait per app-component kind a plugin can
//! subscribe to. A plugin opts in by returning itself from the matching
//! `as_*_aware` accessor on [`crate::plugin::Plugin`].

use std::rc::Rc;

use crate::binding::{
    BroadcastReceiverBinding, ContentProviderBinding, HostComponentBinding, ServiceBinding,
};

/// Lifecycle hooks for plugins interested in the UI-owning host component.
///
/// The config-change pair exists because the host framework destroys and
/// immediately recreates the same logical screen on configuration changes:
/// a plugin should release transient view and surface references on
/// `on_detached_from_host_component_for_config_changes` but keep app-level
/// state for the reattach that follows.
pub trait HostComponentAware {
    fn on_attached_to_host_component(&mut self, binding: Rc<HostComponentBinding>);

    fn on_detached_from_host_component_for_config_changes(&mut self);

    fn on_reattached_to_host_component_for_config_changes(
        &mut self,
        binding: Rc<HostComponentBinding>,
    );

    /// Terminal detach. The binding must not be used after this returns.
    fn on_detached_from_host_component(&mut self);
}

/// Lifecycle hooks for plugins interested in a background service.
pub trait ServiceAware {
    fn on_attached_to_service(&mut self, binding: Rc<ServiceBinding>);

    fn on_detached_from_service(&mut self);
}

/// Lifecycle hooks for plugins interested in a broadcast receiver.
pub trait BroadcastReceiverAware {
    fn on_attached_to_broadcast_receiver(&mut self, binding: Rc<BroadcastReceiverBinding>);

    fn on_detached_from_broadcast_receiver(&mut self);
}

/// Lifecycle hooks for plugins interested in a content provider.
pub trait ContentProviderAware {
    fn on_attached_to_content_provider(&mut self, binding: Rc<ContentProviderBinding>);

    fn on_detached_from_content_provider(&mut self);
}
