//! Per-event listener contracts a plugin may register on a binding between
//! its attach and detach hooks. Listeners are shared by `Rc` and removed by
//! pointer identity.

use crate::event::{Intent, PermissionStatus, StateSnapshot};

/// Receives permission-request outcomes forwarded by the attached host
/// component. Returns true if the listener consumed the result.
pub trait PermissionResultListener {
    fn on_permission_result(
        &self,
        request_code: i32,
        permissions: &[String],
        results: &[PermissionStatus],
    ) -> bool;
}

/// Receives the result of a component started for a result by the attached
/// host component. Returns true if the listener consumed the result.
pub trait ComponentResultListener {
    fn on_component_result(&self, request_code: i32, result_code: i32, data: Option<&Intent>)
    -> bool;
}

/// Receives intents delivered to the already-attached host component.
pub trait NewIntentListener {
    fn on_new_intent(&self, intent: &Intent);
}

/// Notified when the user navigates away from the attached host component.
pub trait UserLeaveHintListener {
    fn on_user_leave_hint(&self);
}

/// Contributes to and restores from the host component's saved instance
/// state. A listener that saves state is also the one asked to restore it.
pub trait SaveStateListener {
    fn on_save_state(&self, state: &mut StateSnapshot);

    /// `state` is `None` when the component starts with no saved state.
    fn on_restore_state(&self, state: Option<&StateSnapshot>);
}

/// Notified when the attached service moves between foreground and
/// background execution.
pub trait ModeChangeListener {
    fn on_move_to_foreground(&self);

    fn on_move_to_background(&self);
}
