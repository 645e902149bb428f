/// Single-settlement results for native calls
///
/// A [`PendingCall`] is handed to the caller, the matching [`CallbackContext`] to
/// the native handler. Whichever callback path fires first settles the call; any
/// later attempt is logged and dropped.
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use serde_json::Value;

use crate::error::NativeCallError;

pub type CallOutcome = Result<Value, NativeCallError>;

#[derive(Default)]
struct SlotState {
    outcome: Option<CallOutcome>,
    /// Latest waker of each polling `PendingCall` clone, keyed by its waker id
    wakers: Vec<(usize, Waker)>,
}

#[derive(Default)]
struct Slot {
    state: Mutex<SlotState>,
    settled: Condvar,
    next_waker_id: AtomicUsize,
}

impl Slot {
    fn new_waker_id(&self) -> usize {
        self.next_waker_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Store the outcome unless one is already present. Returns whether it was stored.
    fn settle(&self, outcome: CallOutcome) -> bool {
        let wakers = {
            let mut state = self.state.lock();
            if state.outcome.is_some() {
                return false;
            }
            state.outcome = Some(outcome);
            std::mem::take(&mut state.wakers)
        };

        self.settled.notify_all();
        for (_, waker) in wakers {
            waker.wake();
        }
        true
    }

    fn is_settled(&self) -> bool {
        self.state.lock().outcome.is_some()
    }
}

/// Result reported by a native handler for one call
#[derive(Debug, Clone, PartialEq)]
pub enum PluginResult {
    Ok(Value),
    Error(Value),
}

impl PluginResult {
    pub fn ok_message(message: impl Into<String>) -> Self {
        PluginResult::Ok(Value::String(message.into()))
    }

    pub fn error_message(message: impl Into<String>) -> Self {
        PluginResult::Error(Value::String(message.into()))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, PluginResult::Ok(_))
    }

    /// The payload as a string, when it is one
    pub fn message(&self) -> Option<&str> {
        match self {
            PluginResult::Ok(value) | PluginResult::Error(value) => value.as_str(),
        }
    }
}

struct Settler {
    slot: Arc<Slot>,
    target: String,
    action: String,
    /// Set once the bridge answered the call; drop then neither settles nor warns
    abandoned: AtomicBool,
}

impl Settler {
    fn settle(&self, outcome: CallOutcome) -> bool {
        let applied = self.slot.settle(outcome);
        if !applied {
            tracing::warn!(
                target_name = %self.target,
                action = %self.action,
                "Ignoring repeated settlement of a native call"
            );
        }
        applied
    }
}

impl Drop for Settler {
    fn drop(&mut self) {
        if self.abandoned.load(Ordering::Acquire) {
            return;
        }
        let dropped = NativeCallError::CallbackDropped {
            target: self.target.clone(),
            action: self.action.clone(),
        };
        if self.slot.settle(Err(dropped)) {
            tracing::warn!(
                target_name = %self.target,
                action = %self.action,
                "Native handler released its callback without answering"
            );
        }
    }
}

/// The native side of one call: success and error paths for a single result.
///
/// Clones share the same slot, so the success path and the error path may live in
/// different places. Once every clone is dropped, an unanswered call settles with
/// [`NativeCallError::CallbackDropped`].
#[derive(Clone)]
pub struct CallbackContext {
    inner: Arc<Settler>,
}

impl CallbackContext {
    /// Resolve the call. Returns `false` if it was already settled.
    pub fn success(&self, value: Value) -> bool {
        self.inner.settle(Ok(value))
    }

    /// Reject the call with an opaque payload. Returns `false` if it was already settled.
    pub fn error(&self, payload: Value) -> bool {
        self.inner.settle(Err(NativeCallError::Rejected(payload)))
    }

    pub fn send_plugin_result(&self, result: PluginResult) -> bool {
        match result {
            PluginResult::Ok(value) => self.success(value),
            PluginResult::Error(payload) => self.error(payload),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.inner.slot.is_settled()
    }

    pub fn action(&self) -> &str {
        &self.inner.action
    }

    /// Settle with `error` on behalf of a handler that refused the call. Dropping
    /// the handler's clones afterwards is silent.
    pub(crate) fn abandon(&self, error: NativeCallError) -> bool {
        self.inner.abandoned.store(true, Ordering::Release);
        self.inner.slot.settle(Err(error))
    }
}

/// Caller side of one in-flight native call.
///
/// Settles exactly once. It can be awaited, waited on from a blocking thread, or
/// polled; clones observe the same outcome. There is no timeout of its own: if the
/// native layer holds on to the callback and never answers, the call stays pending.
pub struct PendingCall<T = Value> {
    slot: Arc<Slot>,
    action: String,
    convert: fn(Value) -> T,
    waker_id: usize,
}

fn identity(value: Value) -> Value {
    value
}

fn discard(_: Value) {}

/// Create a linked pending call and callback for `target`/`action`.
pub fn pending_call(target: &str, action: &str) -> (PendingCall, CallbackContext) {
    let slot = Arc::new(Slot::default());
    let callback = CallbackContext {
        inner: Arc::new(Settler {
            slot: Arc::clone(&slot),
            target: target.to_string(),
            action: action.to_string(),
            abandoned: AtomicBool::new(false),
        }),
    };
    let pending = PendingCall {
        waker_id: slot.new_waker_id(),
        slot,
        action: action.to_string(),
        convert: identity,
    };
    (pending, callback)
}

impl PendingCall<Value> {
    /// A call that failed before reaching any native handler
    pub fn failed(action: &str, error: NativeCallError) -> Self {
        let slot = Arc::new(Slot::default());
        slot.settle(Err(error));
        PendingCall {
            waker_id: slot.new_waker_id(),
            slot,
            action: action.to_string(),
            convert: identity,
        }
    }

    /// Drop the success payload; the call resolves to `()`.
    pub fn discard_value(self) -> PendingCall<()> {
        PendingCall {
            slot: self.slot,
            action: self.action,
            convert: discard,
            waker_id: self.waker_id,
        }
    }
}

impl<T> PendingCall<T> {
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn is_settled(&self) -> bool {
        self.slot.is_settled()
    }

    /// The outcome if already settled, without blocking
    pub fn try_result(&self) -> Option<Result<T, NativeCallError>> {
        let outcome = self.slot.state.lock().outcome.clone();
        outcome.map(|o| o.map(self.convert))
    }

    /// Block the current thread until the call settles.
    pub fn wait(&self) -> Result<T, NativeCallError> {
        let mut state = self.slot.state.lock();
        loop {
            if let Some(outcome) = state.outcome.clone() {
                drop(state);
                return outcome.map(self.convert);
            }
            self.slot.settled.wait(&mut state);
        }
    }

    /// Block for at most `timeout`. `None` means the call is still pending.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<T, NativeCallError>> {
        let deadline = Instant::now() + timeout;
        let mut state = self.slot.state.lock();
        loop {
            if let Some(outcome) = state.outcome.clone() {
                drop(state);
                return Some(outcome.map(self.convert));
            }
            if self.slot.settled.wait_until(&mut state, deadline).timed_out() {
                return state.outcome.clone().map(|o| o.map(self.convert));
            }
        }
    }
}

impl<T> Clone for PendingCall<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            action: self.action.clone(),
            convert: self.convert,
            waker_id: self.slot.new_waker_id(),
        }
    }
}

impl<T> std::fmt::Debug for PendingCall<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCall")
            .field("action", &self.action)
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T> Future for PendingCall<T> {
    type Output = Result<T, NativeCallError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.slot.state.lock();
        if let Some(outcome) = state.outcome.clone() {
            drop(state);
            return Poll::Ready(outcome.map(self.convert));
        }
        // One waker per clone; a re-poll replaces it
        let waker_id = self.waker_id;
        match state.wakers.iter_mut().find(|(id, _)| *id == waker_id) {
            Some((_, waker)) => {
                if !waker.will_wake(cx.waker()) {
                    *waker = cx.waker().clone();
                }
            }
            None => state.wakers.push((waker_id, cx.waker().clone())),
        }
        Poll::Pending
    }
}
