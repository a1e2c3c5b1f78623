//! Handles for the native engine collaborators the embedding wires into
//! bindings. The engine itself lives behind the JNI boundary; these types
//! model only the surface the registry and plugins touch.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::rc::Rc;

use crate::component::AppContext;

/// Handle to the engine's message-executor thread.
#[derive(Debug, Default)]
pub struct MessageExecutor {
    running: Cell<bool>,
}

impl MessageExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.running.set(true);
    }

    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Handle to the native rendering surface.
#[derive(Debug, Default)]
pub struct Renderer {
    displaying: Cell<bool>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface_available(&self) {
        self.displaying.set(true);
    }

    pub fn surface_destroyed(&self) {
        self.displaying.set(false);
    }

    pub fn is_displaying(&self) -> bool {
        self.displaying.get()
    }
}

/// Registry of named platform-view factories plugins can extend.
#[derive(Debug, Default)]
pub struct PlatformViewRegistry {
    factories: RefCell<BTreeSet<String>>,
}

impl PlatformViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `view_type`. Returns false if the name is
    /// already taken.
    pub fn register_view_factory(&self, view_type: &str) -> bool {
        self.factories.borrow_mut().insert(view_type.into())
    }

    pub fn has_factory(&self, view_type: &str) -> bool {
        self.factories.borrow().contains(view_type)
    }
}

#[derive(Debug)]
struct PlatformViewsAttachment {
    context: AppContext,
    renderer: Rc<Renderer>,
    executor: Rc<MessageExecutor>,
}

/// Engine-side controller for platform views embedded in the UI surface.
///
/// The registry activates it against the attached host component before any
/// plugin runs its attach hook, so factories registered by plugins find the
/// channel already live.
#[derive(Debug, Default)]
pub struct PlatformViewsController {
    registry: Rc<PlatformViewRegistry>,
    software_rendering: Cell<bool>,
    attachment: RefCell<Option<PlatformViewsAttachment>>,
}

impl PlatformViewsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> Rc<PlatformViewRegistry> {
        Rc::clone(&self.registry)
    }

    pub fn set_software_rendering(&self, enabled: bool) {
        self.software_rendering.set(enabled);
    }

    pub fn uses_software_rendering(&self) -> bool {
        self.software_rendering.get()
    }

    pub fn attach(
        &self,
        context: &AppContext,
        renderer: &Rc<Renderer>,
        executor: &Rc<MessageExecutor>,
    ) {
        *self.attachment.borrow_mut() = Some(PlatformViewsAttachment {
            context: context.clone(),
            renderer: Rc::clone(renderer),
            executor: Rc::clone(executor),
        });
    }

    pub fn detach(&self) {
        *self.attachment.borrow_mut() = None;
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.borrow().is_some()
    }

    pub fn attached_context(&self) -> Option<AppContext> {
        self.attachment.borrow().as_ref().map(|a| a.context.clone())
    }

    pub fn attached_renderer(&self) -> Option<Rc<Renderer>> {
        self.attachment.borrow().as_ref().map(|a| Rc::clone(&a.renderer))
    }

    pub fn attached_executor(&self) -> Option<Rc<MessageExecutor>> {
        self.attachment.borrow().as_ref().map(|a| Rc::clone(&a.executor))
    }
}

/// Resolves logical asset names to lookup keys in the host's asset store.
pub trait AssetResolver {
    fn asset_lookup_key(&self, asset_name: &str) -> String;

    fn asset_lookup_key_in_package(&self, asset_name: &str, package_name: &str) -> String;
}

/// Default resolver rooted at the engine's extracted asset directory.
#[derive(Debug, Clone)]
pub struct AssetPathResolver {
    asset_root: PathBuf,
}

impl AssetPathResolver {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }
}

impl AssetResolver for AssetPathResolver {
    fn asset_lookup_key(&self, asset_name: &str) -> String {
        self.asset_root.join(asset_name).to_string_lossy().into_owned()
    }

    fn asset_lookup_key_in_package(&self, asset_name: &str, package_name: &str) -> String {
        self.asset_root
            .join("packages")
            .join(package_name)
            .join(asset_name)
            .to_string_lossy()
            .into_owned()
    }
}
