use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use prism_plugin_api::capability::{Capability, CapabilitySet};
use prism_plugin_api::component::AppContext;
use prism_plugin_api::engine::{AssetResolver, MessageExecutor, PlatformViewsController, Renderer};
use prism_plugin_api::plugin::{EngineBinding, Plugin};
use tracing::{debug, warn};

use crate::control::Attachment;

/// A registered plugin together with the capability roles probed from it at
/// registration time.
pub(crate) struct PluginEntry {
    pub(crate) plugin: Rc<RefCell<dyn Plugin>>,
    pub(crate) capabilities: CapabilitySet,
}

/// Tracks which plugins are registered with one engine instance and which app
/// component that engine is currently bound to, and fans attach/detach
/// notifications out to the plugins.
///
/// Enforces the exclusivity invariant: at most one app component, of any
/// kind, is attached at a time. Every attach path funnels through
/// [`ConnectionRegistry::detach_from_app_component`] before establishing a
/// new attachment.
///
/// Everything here runs on the host's main thread; every notification
/// fan-out completes before the triggering call returns.
pub struct ConnectionRegistry {
    pub(crate) plugins: HashMap<TypeId, PluginEntry>,
    pub(crate) engine_binding: EngineBinding,
    pub(crate) platform_views: Rc<PlatformViewsController>,
    pub(crate) attachment: Option<Attachment>,
    pub(crate) waiting_for_host_reattachment: bool,
}

impl ConnectionRegistry {
    pub fn new(
        context: AppContext,
        executor: Rc<MessageExecutor>,
        renderer: Rc<Renderer>,
        platform_views: Rc<PlatformViewsController>,
        assets: Rc<dyn AssetResolver>,
    ) -> Self {
        let engine_binding = EngineBinding::new(
            context,
            executor,
            renderer,
            platform_views.registry(),
            assets,
        );
        Self {
            plugins: HashMap::new(),
            engine_binding,
            platform_views,
            attachment: None,
            waiting_for_host_reattachment: false,
        }
    }

    /// Registers a plugin and notifies it that it is attached to the engine.
    ///
    /// Registering a plugin type that is already registered is a logged
    /// no-op: host frameworks sometimes double-initialize, and that is not
    /// worth failing over. If an app component of a kind the plugin
    /// subscribes to is already attached, the plugin's attach hook for that
    /// kind runs immediately so a late joiner does not miss the current
    /// attachment.
    pub fn add(&mut self, plugin: Rc<RefCell<dyn Plugin>>) {
        let key = plugin_key(&*plugin.borrow());
        if self.plugins.contains_key(&key) {
            warn!(
                plugin = ?key,
                "attempted to register a plugin type that is already registered with this engine"
            );
            return;
        }

        let capabilities = probe_capabilities(&mut *plugin.borrow_mut());
        debug!(plugin = ?key, capabilities = ?capabilities, "adding plugin");
        self.plugins.insert(
            key,
            PluginEntry {
                plugin: Rc::clone(&plugin),
                capabilities,
            },
        );
        plugin.borrow_mut().on_attached_to_engine(&self.engine_binding);

        self.notify_late_join(&plugin, capabilities);
    }

    /// Registers each plugin in turn. No atomicity beyond the per-plugin
    /// semantics of [`ConnectionRegistry::add`].
    pub fn add_all(&mut self, plugins: impl IntoIterator<Item = Rc<RefCell<dyn Plugin>>>) {
        for plugin in plugins {
            self.add(plugin);
        }
    }

    pub fn has<P: Plugin>(&self) -> bool {
        self.contains(TypeId::of::<P>())
    }

    pub fn contains(&self, plugin_type: TypeId) -> bool {
        self.plugins.contains_key(&plugin_type)
    }

    pub fn get(&self, plugin_type: TypeId) -> Option<Rc<RefCell<dyn Plugin>>> {
        self.plugins.get(&plugin_type).map(|e| Rc::clone(&e.plugin))
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Unregisters the plugin of type `P`, if present.
    pub fn remove<P: Plugin>(&mut self) {
        self.remove_by_id(TypeId::of::<P>());
    }

    /// Unregisters a plugin by type key. No-op if absent.
    ///
    /// If an app component of a kind the plugin subscribes to is currently
    /// attached, the plugin's detach hook for that kind runs first, so the
    /// plugin can release per-component references while still registered.
    /// The generic engine-detach hook runs last, before the entry is erased.
    pub fn remove_by_id(&mut self, plugin_type: TypeId) {
        let Some((plugin, capabilities)) = self
            .plugins
            .get(&plugin_type)
            .map(|e| (Rc::clone(&e.plugin), e.capabilities))
        else {
            return;
        };

        debug!(plugin = ?plugin_type, "removing plugin");
        self.notify_removal_detach(&plugin, capabilities);
        plugin.borrow_mut().on_detached_from_engine(&self.engine_binding);
        self.plugins.remove(&plugin_type);
    }

    /// Unregisters each listed plugin in turn.
    pub fn remove_many(&mut self, plugin_types: impl IntoIterator<Item = TypeId>) {
        for plugin_type in plugin_types {
            self.remove_by_id(plugin_type);
        }
    }

    /// Unregisters every plugin. The key set is snapshotted first so detach
    /// hooks cannot corrupt the iteration.
    pub fn remove_all(&mut self) {
        let keys: Vec<TypeId> = self.plugins.keys().copied().collect();
        self.remove_many(keys);
    }

    /// Tears the registry down: detaches from whatever app component is
    /// attached, running the full detach notifications, then unregisters
    /// every plugin. Detaching first guarantees plugins can clean up
    /// app-component references in their detach hooks while still
    /// registered.
    pub fn destroy(&mut self) {
        debug!("destroying connection registry");
        self.detach_from_app_component();
        self.remove_all();
    }

    /// Runs `f` against every registered plugin that declared `capability`.
    ///
    /// Iterates a snapshot of the subset: a plugin registered during another
    /// plugin's callback sees only future events, and mutation of the plugin
    /// set mid-fan-out cannot corrupt the iteration.
    pub(crate) fn for_each_with_capability(
        &self,
        capability: Capability,
        mut f: impl FnMut(&mut dyn Plugin),
    ) {
        let subset: Vec<Rc<RefCell<dyn Plugin>>> = self
            .plugins
            .values()
            .filter(|e| e.capabilities.contains(capability))
            .map(|e| Rc::clone(&e.plugin))
            .collect();
        for plugin in subset {
            f(&mut *plugin.borrow_mut());
        }
    }
}

fn plugin_key(plugin: &dyn Plugin) -> TypeId {
    let any: &dyn Any = plugin;
    any.type_id()
}

/// Probes which capability accessors a plugin implements, producing the role
/// set the registry dispatches on for the plugin's registered lifetime.
fn probe_capabilities(plugin: &mut dyn Plugin) -> CapabilitySet {
    let mut capabilities = CapabilitySet::empty();
    if plugin.as_host_component_aware().is_some() {
        capabilities.insert(Capability::HostComponent);
    }
    if plugin.as_service_aware().is_some() {
        capabilities.insert(Capability::Service);
    }
    if plugin.as_broadcast_receiver_aware().is_some() {
        capabilities.insert(Capability::BroadcastReceiver);
    }
    if plugin.as_content_provider_aware().is_some() {
        capabilities.insert(Capability::ContentProvider);
    }
    capabilities
}
