use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::shell::ShellArgs;

/// Application-level context handle supplied by the host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    package_name: String,
    files_dir: PathBuf,
}

impl AppContext {
    pub fn new(package_name: &str, files_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_name: package_name.into(),
            files_dir: files_dir.into(),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }
}

/// Coarse host-framework component lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Initialized,
    Created,
    Started,
    Resumed,
    Destroyed,
}

/// Opaque lifecycle reference exposed through bindings. The host owns the
/// transitions; plugins may only observe the current state.
#[derive(Debug)]
pub struct Lifecycle {
    state: Cell<LifecycleState>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: Cell::new(LifecycleState::Initialized),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state.get()
    }

    pub fn mark(&self, state: LifecycleState) {
        self.state.set(state);
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// A UI-owning host component: a screen container capable of displaying the
/// engine's rendering surface.
#[derive(Debug)]
pub struct HostComponent {
    name: String,
    context: AppContext,
    shell_args: ShellArgs,
}

impl HostComponent {
    pub fn new(name: &str, context: AppContext, shell_args: ShellArgs) -> Self {
        Self {
            name: name.into(),
            context,
            shell_args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn shell_args(&self) -> &ShellArgs {
        &self.shell_args
    }
}

/// Implemented by whichever host object currently claims exclusive ownership
/// of the engine's UI attachment.
///
/// When a new owner attaches, `detach_from_engine` is invoked on the previous
/// owner so it can release its own engine references; the registry performs
/// the actual plugin detach immediately afterwards, so the owner must not
/// call back into the control surface from this hook.
pub trait ExclusiveHostComponent {
    fn component(&self) -> Rc<HostComponent>;

    fn detach_from_engine(&self);
}

/// A long-running background host component.
#[derive(Debug)]
pub struct ServiceComponent {
    name: String,
    context: AppContext,
}

impl ServiceComponent {
    pub fn new(name: &str, context: AppContext) -> Self {
        Self {
            name: name.into(),
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }
}

/// A short-lived host component handling a broadcast delivery.
#[derive(Debug)]
pub struct BroadcastReceiver {
    name: String,
}

impl BroadcastReceiver {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A host component exposing structured data to other applications.
#[derive(Debug)]
pub struct ContentProvider {
    authority: String,
}

impl ContentProvider {
    pub fn new(authority: &str) -> Self {
        Self {
            authority: authority.into(),
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }
}
