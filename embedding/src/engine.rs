use std::rc::Rc;

use prism_plugin_api::component::AppContext;
use prism_plugin_api::engine::{
    AssetResolver, MessageExecutor, PlatformViewsController, Renderer,
};
use tracing::debug;

use crate::registry::ConnectionRegistry;

/// Owning facade for one engine instance.
///
/// Constructs the native collaborator handles and the connection registry
/// that binds host app components and plugins to them. The registry doubles
/// as the control surface host components call into at their lifecycle
/// points.
pub struct Engine {
    executor: Rc<MessageExecutor>,
    renderer: Rc<Renderer>,
    platform_views: Rc<PlatformViewsController>,
    registry: ConnectionRegistry,
}

impl Engine {
    pub fn new(context: AppContext, assets: Rc<dyn AssetResolver>) -> Self {
        let executor = Rc::new(MessageExecutor::new());
        executor.start();
        let renderer = Rc::new(Renderer::new());
        let platform_views = Rc::new(PlatformViewsController::new());
        let registry = ConnectionRegistry::new(
            context,
            Rc::clone(&executor),
            Rc::clone(&renderer),
            Rc::clone(&platform_views),
            assets,
        );
        Self {
            executor,
            renderer,
            platform_views,
            registry,
        }
    }

    /// The plugin registry, which is also every control surface.
    pub fn plugins(&mut self) -> &mut ConnectionRegistry {
        &mut self.registry
    }

    pub fn executor(&self) -> &Rc<MessageExecutor> {
        &self.executor
    }

    pub fn renderer(&self) -> &Rc<Renderer> {
        &self.renderer
    }

    pub fn platform_views(&self) -> &Rc<PlatformViewsController> {
        &self.platform_views
    }

    /// Tears the engine down: detaches from any attached app component with
    /// full detach notifications, unregisters every plugin, then stops the
    /// executor.
    pub fn destroy(&mut self) {
        debug!("destroying engine");
        self.registry.destroy();
        self.executor.stop();
    }
}
