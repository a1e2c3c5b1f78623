pub mod aware;
pub mod binding;
pub mod capability;
pub mod component;
pub mod engine;
pub mod event;
pub mod listener;
pub mod plugin;
pub mod shell;

// Re-export key types for convenience.
pub use aware::{BroadcastReceiverAware, ContentProviderAware, HostComponentAware, ServiceAware};
pub use binding::{
    BroadcastReceiverBinding, ContentProviderBinding, HostComponentBinding, ServiceBinding,
};
pub use capability::{Capability, CapabilitySet};
pub use component::{
    AppContext, BroadcastReceiver, ContentProvider, ExclusiveHostComponent, HostComponent,
    Lifecycle, LifecycleState, ServiceComponent,
};
pub use engine::{
    AssetPathResolver, AssetResolver, MessageExecutor, PlatformViewRegistry,
    PlatformViewsController, Renderer,
};
pub use event::{Intent, PermissionStatus, StateSnapshot};
pub use listener::{
    ComponentResultListener, ModeChangeListener, NewIntentListener, PermissionResultListener,
    SaveStateListener, UserLeaveHintListener,
};
pub use plugin::{EngineBinding, Plugin};
pub use shell::ShellArgs;
