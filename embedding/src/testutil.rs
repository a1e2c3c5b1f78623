//! Recording fixtures shared by the registry and control-surface tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use prism_plugin_api::aware::{
    BroadcastReceiverAware, ContentProviderAware, HostComponentAware, ServiceAware,
};
use prism_plugin_api::binding::{
    BroadcastReceiverBinding, ContentProviderBinding, HostComponentBinding, ServiceBinding,
};
use prism_plugin_api::component::{AppContext, ExclusiveHostComponent, HostComponent};
use prism_plugin_api::engine::{
    AssetPathResolver, MessageExecutor, PlatformViewsController, Renderer,
};
use prism_plugin_api::plugin::{EngineBinding, Plugin};
use prism_plugin_api::shell::ShellArgs;

use crate::ConnectionRegistry;

pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

pub(crate) fn new_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub(crate) fn test_registry() -> ConnectionRegistry {
    ConnectionRegistry::new(
        AppContext::new("dev.prism.test", "/data/prism"),
        Rc::new(MessageExecutor::new()),
        Rc::new(Renderer::new()),
        Rc::new(PlatformViewsController::new()),
        Rc::new(AssetPathResolver::new("prism_assets")),
    )
}

/// Host owner whose `detach_from_engine` invocations are counted.
pub(crate) struct FixedHostOwner {
    component: Rc<HostComponent>,
    pub(crate) detach_calls: Cell<usize>,
}

impl ExclusiveHostComponent for FixedHostOwner {
    fn component(&self) -> Rc<HostComponent> {
        Rc::clone(&self.component)
    }

    fn detach_from_engine(&self) {
        self.detach_calls.set(self.detach_calls.get() + 1);
    }
}

pub(crate) fn host_owner(name: &str) -> Rc<FixedHostOwner> {
    host_owner_with_args(name, ShellArgs::default())
}

pub(crate) fn host_owner_with_args(name: &str, shell_args: ShellArgs) -> Rc<FixedHostOwner> {
    let context = AppContext::new("dev.prism.test", "/data/prism");
    Rc::new(FixedHostOwner {
        component: Rc::new(HostComponent::new(name, context, shell_args)),
        detach_calls: Cell::new(0),
    })
}

struct Probe {
    platform_views: Rc<PlatformViewsController>,
    observed_attached: Rc<Cell<bool>>,
}

/// Host-component-aware plugin that appends every hook to a shared log and
/// retains the live binding between attach and detach.
pub(crate) struct HostRecorder {
    name: String,
    log: EventLog,
    pub(crate) binding: Option<Rc<HostComponentBinding>>,
    probe: Option<Probe>,
}

impl HostRecorder {
    pub(crate) fn boxed(name: &str, log: &EventLog) -> Rc<RefCell<dyn Plugin>> {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            log: Rc::clone(log),
            binding: None,
            probe: None,
        }))
    }

    /// Variant that records, inside the attach hook, whether the platform
    /// views controller was already live.
    pub(crate) fn observing(
        name: &str,
        log: &EventLog,
        platform_views: Rc<PlatformViewsController>,
        observed_attached: Rc<Cell<bool>>,
    ) -> Rc<RefCell<dyn Plugin>> {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            log: Rc::clone(log),
            binding: None,
            probe: Some(Probe {
                platform_views,
                observed_attached,
            }),
        }))
    }

    fn record(&self, event: &str) {
        self.log.borrow_mut().push(format!("{}: {event}", self.name));
    }
}

impl Plugin for HostRecorder {
    fn on_attached_to_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine attach");
    }

    fn on_detached_from_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine detach");
    }

    fn as_host_component_aware(&mut self) -> Option<&mut dyn HostComponentAware> {
        Some(self)
    }
}

impl HostComponentAware for HostRecorder {
    fn on_attached_to_host_component(&mut self, binding: Rc<HostComponentBinding>) {
        if let Some(probe) = &self.probe {
            probe.observed_attached.set(probe.platform_views.is_attached());
        }
        self.record(&format!("attached {}", binding.component().name()));
        self.binding = Some(binding);
    }

    fn on_detached_from_host_component_for_config_changes(&mut self) {
        self.record("detached for config changes");
        self.binding = None;
    }

    fn on_reattached_to_host_component_for_config_changes(
        &mut self,
        binding: Rc<HostComponentBinding>,
    ) {
        self.record(&format!("reattached {}", binding.component().name()));
        self.binding = Some(binding);
    }

    fn on_detached_from_host_component(&mut self) {
        self.record("detached");
        self.binding = None;
    }
}

/// Service-aware plugin recording to a shared log.
pub(crate) struct ServiceRecorder {
    name: String,
    log: EventLog,
    pub(crate) binding: Option<Rc<ServiceBinding>>,
}

impl ServiceRecorder {
    pub(crate) fn boxed(name: &str, log: &EventLog) -> Rc<RefCell<dyn Plugin>> {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            log: Rc::clone(log),
            binding: None,
        }))
    }

    fn record(&self, event: &str) {
        self.log.borrow_mut().push(format!("{}: {event}", self.name));
    }
}

impl Plugin for ServiceRecorder {
    fn on_attached_to_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine attach");
    }

    fn on_detached_from_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine detach");
    }

    fn as_service_aware(&mut self) -> Option<&mut dyn ServiceAware> {
        Some(self)
    }
}

impl ServiceAware for ServiceRecorder {
    fn on_attached_to_service(&mut self, binding: Rc<ServiceBinding>) {
        self.record(&format!("service attached {}", binding.service().name()));
        self.binding = Some(binding);
    }

    fn on_detached_from_service(&mut self) {
        self.record("service detached");
        self.binding = None;
    }
}

/// Broadcast-receiver-aware plugin recording to a shared log.
pub(crate) struct ReceiverRecorder {
    name: String,
    log: EventLog,
}

impl ReceiverRecorder {
    pub(crate) fn boxed(name: &str, log: &EventLog) -> Rc<RefCell<dyn Plugin>> {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            log: Rc::clone(log),
        }))
    }

    fn record(&self, event: &str) {
        self.log.borrow_mut().push(format!("{}: {event}", self.name));
    }
}

impl Plugin for ReceiverRecorder {
    fn on_attached_to_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine attach");
    }

    fn on_detached_from_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine detach");
    }

    fn as_broadcast_receiver_aware(&mut self) -> Option<&mut dyn BroadcastReceiverAware> {
        Some(self)
    }
}

impl BroadcastReceiverAware for ReceiverRecorder {
    fn on_attached_to_broadcast_receiver(&mut self, binding: Rc<BroadcastReceiverBinding>) {
        self.record(&format!("receiver attached {}", binding.receiver().name()));
    }

    fn on_detached_from_broadcast_receiver(&mut self) {
        self.record("receiver detached");
    }
}

/// Content-provider-aware plugin recording to a shared log.
pub(crate) struct ProviderRecorder {
    name: String,
    log: EventLog,
}

impl ProviderRecorder {
    pub(crate) fn boxed(name: &str, log: &EventLog) -> Rc<RefCell<dyn Plugin>> {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            log: Rc::clone(log),
        }))
    }

    fn record(&self, event: &str) {
        self.log.borrow_mut().push(format!("{}: {event}", self.name));
    }
}

impl Plugin for ProviderRecorder {
    fn on_attached_to_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine attach");
    }

    fn on_detached_from_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine detach");
    }

    fn as_content_provider_aware(&mut self) -> Option<&mut dyn ContentProviderAware> {
        Some(self)
    }
}

impl ContentProviderAware for ProviderRecorder {
    fn on_attached_to_content_provider(&mut self, binding: Rc<ContentProviderBinding>) {
        self.record(&format!("provider attached {}", binding.provider().authority()));
    }

    fn on_detached_from_content_provider(&mut self) {
        self.record("provider detached");
    }
}

/// Plugin with no capability accessors: only the generic engine hooks.
pub(crate) struct PlainRecorder {
    name: String,
    log: EventLog,
}

impl PlainRecorder {
    pub(crate) fn boxed(name: &str, log: &EventLog) -> Rc<RefCell<dyn Plugin>> {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            log: Rc::clone(log),
        }))
    }
}

impl Plugin for PlainRecorder {
    fn on_attached_to_engine(&mut self, _binding: &EngineBinding) {
        self.log.borrow_mut().push(format!("{}: engine attach", self.name));
    }

    fn on_detached_from_engine(&mut self, _binding: &EngineBinding) {
        self.log.borrow_mut().push(format!("{}: engine detach", self.name));
    }
}

/// Plugin declaring all four capabilities, for cross-kind sequencing tests.
pub(crate) struct AllRecorder {
    name: String,
    log: EventLog,
}

impl AllRecorder {
    pub(crate) fn boxed(name: &str, log: &EventLog) -> Rc<RefCell<dyn Plugin>> {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            log: Rc::clone(log),
        }))
    }

    fn record(&self, event: &str) {
        self.log.borrow_mut().push(format!("{}: {event}", self.name));
    }
}

impl Plugin for AllRecorder {
    fn on_attached_to_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine attach");
    }

    fn on_detached_from_engine(&mut self, _binding: &EngineBinding) {
        self.record("engine detach");
    }

    fn as_host_component_aware(&mut self) -> Option<&mut dyn HostComponentAware> {
        Some(self)
    }

    fn as_service_aware(&mut self) -> Option<&mut dyn ServiceAware> {
        Some(self)
    }

    fn as_broadcast_receiver_aware(&mut self) -> Option<&mut dyn BroadcastReceiverAware> {
        Some(self)
    }

    fn as_content_provider_aware(&mut self) -> Option<&mut dyn ContentProviderAware> {
        Some(self)
    }
}

impl HostComponentAware for AllRecorder {
    fn on_attached_to_host_component(&mut self, binding: Rc<HostComponentBinding>) {
        self.record(&format!("attached {}", binding.component().name()));
    }

    fn on_detached_from_host_component_for_config_changes(&mut self) {
        self.record("detached for config changes");
    }

    fn on_reattached_to_host_component_for_config_changes(
        &mut self,
        binding: Rc<HostComponentBinding>,
    ) {
        self.record(&format!("reattached {}", binding.component().name()));
    }

    fn on_detached_from_host_component(&mut self) {
        self.record("detached");
    }
}

impl ServiceAware for AllRecorder {
    fn on_attached_to_service(&mut self, binding: Rc<ServiceBinding>) {
        self.record(&format!("service attached {}", binding.service().name()));
    }

    fn on_detached_from_service(&mut self) {
        self.record("service detached");
    }
}

impl BroadcastReceiverAware for AllRecorder {
    fn on_attached_to_broadcast_receiver(&mut self, binding: Rc<BroadcastReceiverBinding>) {
        self.record(&format!("receiver attached {}", binding.receiver().name()));
    }

    fn on_detached_from_broadcast_receiver(&mut self) {
        self.record("receiver detached");
    }
}

impl ContentProviderAware for AllRecorder {
    fn on_attached_to_content_provider(&mut self, binding: Rc<ContentProviderBinding>) {
        self.record(&format!("provider attached {}", binding.provider().authority()));
    }

    fn on_detached_from_content_provider(&mut self) {
        self.record("provider detached");
    }
}
