/// Native call transport
///
/// Every call from the sound facade goes through [`NativeBridge::call`], which
/// resolves a target name to a registered [`NativeHandler`] and hands it the
/// action, the positional arguments and a [`CallbackContext`].
///
/// ## Flow
///
/// ```text
/// ┌────────┐ call(target, action, args) ┌─────────────┐  execute(action, args, cb)  ┌───────────────┐
/// │ Facade │ ─────────────────────────> │ NativeBridge│ ──────────────────────────> │ NativeHandler │
/// └────────┘                            └─────────────┘                             └───────────────┘
///      ▲                                                                                   │
///      │              PendingCall  <──── settles once ──── CallbackContext  <──────────────┘
/// ```
///
/// The bridge does not validate, transform or retry anything.
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::NativeCallError;

pub mod pending;

pub use pending::{pending_call, CallOutcome, CallbackContext, PendingCall, PluginResult};

/// A native component reachable through the bridge.
///
/// `execute` must not block: it should hand the work off and answer through
/// `callback` later, from any thread. Returning `false` means the action is unknown;
/// the caller sees [`NativeCallError::InvalidAction`] and any answer sent through a
/// kept clone of `callback` is ignored.
pub trait NativeHandler: Send + Sync {
    fn execute(&self, action: &str, args: Vec<Value>, callback: CallbackContext) -> bool;
}

/// Registry of native handlers keyed by target name.
///
/// Cloning is cheap; clones share the registry.
#[derive(Clone, Default)]
pub struct NativeBridge {
    handlers: Arc<RwLock<HashMap<String, Arc<dyn NativeHandler>>>>,
}

impl NativeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `target`, replacing any previous handler.
    pub fn register(&self, target: impl Into<String>, handler: Arc<dyn NativeHandler>) {
        let target = target.into();
        tracing::info!("Registered native handler: {}", target);
        self.handlers.write().insert(target, handler);
    }

    pub fn unregister(&self, target: &str) -> Option<Arc<dyn NativeHandler>> {
        let removed = self.handlers.write().remove(target);
        if removed.is_some() {
            tracing::info!("Unregistered native handler: {}", target);
        }
        removed
    }

    pub fn has_handler(&self, target: &str) -> bool {
        self.handlers.read().contains_key(target)
    }

    /// Invoke `action` on the handler registered as `target`.
    ///
    /// Never blocks. The returned call settles when the handler answers.
    pub fn call(&self, target: &str, action: &str, args: Vec<Value>) -> PendingCall {
        tracing::debug!(target_name = target, action, argc = args.len(), "Native call");

        // Clone out of the lock so a handler may call back into the bridge.
        let handler = self.handlers.read().get(target).cloned();
        let Some(handler) = handler else {
            tracing::error!("No native handler registered for '{}' ({})", target, action);
            return PendingCall::failed(
                action,
                NativeCallError::HandlerUnavailable {
                    target: target.to_string(),
                },
            );
        };

        let (pending, callback) = pending_call(target, action);
        let rejection = callback.clone();
        if !handler.execute(action, args, callback) {
            tracing::warn!("Native handler '{}' rejected action '{}'", target, action);
            rejection.abandon(NativeCallError::InvalidAction {
                target: target.to_string(),
                action: action.to_string(),
            });
        }
        pending
    }
}

impl std::fmt::Debug for NativeBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.read();
        f.debug_struct("NativeBridge")
            .field("targets", &handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
