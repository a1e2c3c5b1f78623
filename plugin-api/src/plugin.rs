use std::any::Any;
use std::rc::Rc;

use crate::aware::{BroadcastReceiverAware, ContentProviderAware, HostComponentAware, ServiceAware};
use crate::component::AppContext;
use crate::engine::{AssetResolver, MessageExecutor, PlatformViewRegistry, Renderer};

/// Resources the engine exposes to every registered plugin for the engine's
/// whole lifetime, independent of any app-component attachment.
pub struct EngineBinding {
    context: AppContext,
    executor: Rc<MessageExecutor>,
    renderer: Rc<Renderer>,
    platform_view_registry: Rc<PlatformViewRegistry>,
    assets: Rc<dyn AssetResolver>,
}

impl EngineBinding {
    pub fn new(
        context: AppContext,
        executor: Rc<MessageExecutor>,
        renderer: Rc<Renderer>,
        platform_view_registry: Rc<PlatformViewRegistry>,
        assets: Rc<dyn AssetResolver>,
    ) -> Self {
        Self {
            context,
            executor,
            renderer,
            platform_view_registry,
            assets,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn executor(&self) -> &Rc<MessageExecutor> {
        &self.executor
    }

    pub fn renderer(&self) -> &Rc<Renderer> {
        &self.renderer
    }

    pub fn platform_view_registry(&self) -> &Rc<PlatformViewRegistry> {
        &self.platform_view_registry
    }

    pub fn assets(&self) -> &Rc<dyn AssetResolver> {
        &self.assets
    }
}

/// A unit of host-platform extension code registered with an engine.
///
/// Identity is the concrete type: one instance of a given plugin type may be
/// registered per engine. The `as_*_aware` accessors declare which
/// app-component lifecycles the plugin subscribes to; a plugin opts in by
/// overriding the accessor to return itself. The registry probes the
/// accessors once at registration.
pub trait Plugin: Any {
    fn on_attached_to_engine(&mut self, binding: &EngineBinding);

    fn on_detached_from_engine(&mut self, binding: &EngineBinding);

    fn as_host_component_aware(&mut self) -> Option<&mut dyn HostComponentAware> {
        None
    }

    fn as_service_aware(&mut self) -> Option<&mut dyn ServiceAware> {
        None
    }

    fn as_broadcast_receiver_aware(&mut self) -> Option<&mut dyn BroadcastReceiverAware> {
        None
    }

    fn as_content_provider_aware(&mut self) -> Option<&mut dyn ContentProviderAware> {
        None
    }
}
